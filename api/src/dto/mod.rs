//! Request and response bodies

pub mod auth;
pub mod response;

pub use auth::{SendOtpRequest, VerifyOtpRequest};
pub use response::ApiResponse;
