//! # Sphere Core
//!
//! OTP lifecycle and domain layer for the Sphere backend.
//! This crate holds the phone identifier normalizer, the one-time code
//! entities, the lifecycle service and the collaborator traits that the
//! infrastructure layer implements. It performs no I/O of its own.

pub mod domain;
pub mod errors;
pub mod services;

// Re-export commonly used types for convenience
pub use domain::{normalize, OtpCode, PendingOtp, PhoneKey, CODE_LENGTH};
pub use errors::{OtpError, OtpResult};
pub use services::otp::{
    DeliveryFailurePolicy, Notifier, OtpService, OtpServiceConfig, OtpStore, RequestCodeOutcome,
    VerifyOutcome,
};
