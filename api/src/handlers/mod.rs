//! Shared response builders for errors and fallbacks

pub mod error;

pub use error::{json_error_handler, not_found, otp_error_response, timeout_response};
