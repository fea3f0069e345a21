use actix_web::{web, HttpResponse};
use tokio::time::timeout;
use tracing::info;
use validator::Validate;

use sphere_core::RequestCodeOutcome;

use crate::app::AppState;
use crate::dto::auth::first_error_message;
use crate::dto::{ApiResponse, SendOtpRequest};
use crate::handlers::{otp_error_response, timeout_response};

pub const MSG_SMS_SENT: &str = "SMS sent successfully";
pub const MSG_SMS_DEGRADED: &str =
    "SMS delivery failed. The code was written to the server log";

/// Issue a fresh code for the phone and text it
///
/// `POST /api/auth/send-otp` with `{"phone": "..."}`.
pub async fn send_otp(
    state: web::Data<AppState>,
    request: web::Json<SendOtpRequest>,
) -> HttpResponse {
    if let Err(errors) = request.validate() {
        return HttpResponse::BadRequest()
            .json(ApiResponse::failure(first_error_message(&errors, &["phone"])));
    }
    let phone = request.into_inner().phone.unwrap_or_default();

    let outcome = match timeout(
        state.request_timeout,
        state.otp_service.request_code(&phone),
    )
    .await
    {
        Ok(result) => result,
        Err(_) => return timeout_response(),
    };

    match outcome {
        Ok(RequestCodeOutcome::Delivered { message_id }) => {
            info!(message_id = %message_id, "OTP request completed");
            HttpResponse::Ok().json(ApiResponse::ok_with(MSG_SMS_SENT))
        }
        Ok(RequestCodeOutcome::DeliveryDegraded { .. }) => {
            HttpResponse::Ok().json(ApiResponse::ok_with(MSG_SMS_DEGRADED))
        }
        Err(e) => otp_error_response(&e),
    }
}
