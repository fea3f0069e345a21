//! Domain-specific error types and error handling.
//!
//! A wrong or missing code is not an error: those are reported as
//! [`VerifyOutcome`](crate::services::otp::VerifyOutcome) values. Errors are
//! reserved for conditions the caller has to react to differently.

use thiserror::Error;

/// Errors raised by the OTP lifecycle
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum OtpError {
    /// A required request field is missing or empty
    #[error("Missing required field: {field}")]
    InvalidInput { field: &'static str },

    /// The store could not be reached or returned unusable data
    #[error("Storage error: {message}")]
    Storage { message: String },

    /// The notifier failed to deliver the code
    #[error("Delivery error: {message}")]
    Delivery { message: String },
}

impl OtpError {
    pub fn invalid_input(field: &'static str) -> Self {
        Self::InvalidInput { field }
    }

    pub fn storage(message: impl Into<String>) -> Self {
        Self::Storage {
            message: message.into(),
        }
    }

    pub fn delivery(message: impl Into<String>) -> Self {
        Self::Delivery {
            message: message.into(),
        }
    }

    /// Whether retrying the same request later may succeed
    pub fn is_transient(&self) -> bool {
        matches!(self, OtpError::Storage { .. } | OtpError::Delivery { .. })
    }
}

pub type OtpResult<T> = Result<T, OtpError>;
