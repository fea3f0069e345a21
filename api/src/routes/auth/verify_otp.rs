use actix_web::{web, HttpResponse};
use tokio::time::timeout;
use validator::Validate;

use sphere_core::VerifyOutcome;

use crate::app::AppState;
use crate::dto::auth::first_error_message;
use crate::dto::{ApiResponse, VerifyOtpRequest};
use crate::handlers::{otp_error_response, timeout_response};

pub const MSG_WRONG_CODE: &str = "Wrong code";
pub const MSG_NO_ACTIVE_CODE: &str = "No active code for this phone number. Request a new one";

/// Check a submitted code; a match consumes it
///
/// `POST /api/auth/verify-otp` with `{"phone": "...", "code": "..."}`.
/// A wrong or missing code is still a 200 with `success: false`.
pub async fn verify_otp(
    state: web::Data<AppState>,
    request: web::Json<VerifyOtpRequest>,
) -> HttpResponse {
    if let Err(errors) = request.validate() {
        return HttpResponse::BadRequest().json(ApiResponse::failure(first_error_message(
            &errors,
            &["phone", "code"],
        )));
    }
    let VerifyOtpRequest { phone, code } = request.into_inner();
    let phone = phone.unwrap_or_default();
    let code = code.unwrap_or_default();

    let outcome = match timeout(
        state.request_timeout,
        state.otp_service.verify_code(&phone, &code),
    )
    .await
    {
        Ok(result) => result,
        Err(_) => return timeout_response(),
    };

    match outcome {
        Ok(VerifyOutcome::Verified) => HttpResponse::Ok().json(ApiResponse::ok()),
        Ok(VerifyOutcome::CodeMismatch) => {
            HttpResponse::Ok().json(ApiResponse::failure(MSG_WRONG_CODE))
        }
        Ok(VerifyOutcome::NoActiveCode) => {
            HttpResponse::Ok().json(ApiResponse::failure(MSG_NO_ACTIVE_CODE))
        }
        Err(e) => otp_error_response(&e),
    }
}
