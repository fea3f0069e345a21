//! Domain layer: phone identifiers and one-time codes

pub mod otp;
pub mod phone;

pub use otp::{OtpCode, PendingOtp, CODE_LENGTH};
pub use phone::{normalize, PhoneKey};
