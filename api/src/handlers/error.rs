//! Mapping of service failures onto HTTP responses
//!
//! Bodies always use the `{success, message}` envelope. Internal details
//! (store errors, provider replies) go to the log, never to the client.

use actix_web::{error::JsonPayloadError, HttpRequest, HttpResponse};
use tracing::{error, warn};

use sphere_core::OtpError;

use crate::dto::ApiResponse;

pub const MSG_STORE_UNAVAILABLE: &str = "Verification service temporarily unavailable";
pub const MSG_SMS_FAILED: &str = "Failed to send SMS";
pub const MSG_TIMEOUT: &str = "Request timed out";
pub const MSG_INVALID_BODY: &str = "Invalid request body";
pub const MSG_NOT_FOUND: &str = "Not found";

/// Convert a service error into its HTTP response
pub fn otp_error_response(err: &OtpError) -> HttpResponse {
    match err {
        OtpError::InvalidInput { field } => {
            HttpResponse::BadRequest().json(ApiResponse::failure(invalid_field_message(field)))
        }
        OtpError::Storage { message } => {
            error!(reason = %message, "OTP store failure");
            HttpResponse::InternalServerError().json(ApiResponse::failure(MSG_STORE_UNAVAILABLE))
        }
        OtpError::Delivery { message } => {
            error!(reason = %message, "SMS delivery failure");
            HttpResponse::InternalServerError().json(ApiResponse::failure(MSG_SMS_FAILED))
        }
    }
}

fn invalid_field_message(field: &str) -> String {
    match field {
        "phone" => "Phone number is required".to_string(),
        "code" => "Verification code is required".to_string(),
        other => format!("Invalid {}", other),
    }
}

/// The request outlived the configured deadline
pub fn timeout_response() -> HttpResponse {
    warn!("OTP request exceeded its deadline");
    HttpResponse::GatewayTimeout().json(ApiResponse::failure(MSG_TIMEOUT))
}

/// Malformed or non-JSON bodies become a 400 in the usual envelope
pub fn json_error_handler(err: JsonPayloadError, _req: &HttpRequest) -> actix_web::Error {
    warn!("Rejected request body: {}", err);
    let response = HttpResponse::BadRequest().json(ApiResponse::failure(MSG_INVALID_BODY));
    actix_web::error::InternalError::from_response(err, response).into()
}

/// Default service for unknown routes
pub async fn not_found() -> HttpResponse {
    HttpResponse::NotFound().json(ApiResponse::failure(MSG_NOT_FOUND))
}
