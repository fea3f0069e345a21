use actix_web::{web, HttpResponse};

pub mod send_otp;
pub mod verify_otp;

pub use send_otp::send_otp;
pub use verify_otp::verify_otp;

/// Plain-text answer for browsers hitting the send endpoint directly
pub const SEND_OTP_PROBE_TEXT: &str = "OK – use POST to send OTP";

pub async fn send_otp_probe() -> HttpResponse {
    HttpResponse::Ok()
        .content_type("text/plain; charset=utf-8")
        .body(SEND_OTP_PROBE_TEXT)
}

/// Mount the OTP routes under the current scope
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::resource("/send-otp")
            .route(web::post().to(send_otp))
            .route(web::get().to(send_otp_probe)),
    )
    .service(web::resource("/verify-otp").route(web::post().to(verify_otp)));
}
