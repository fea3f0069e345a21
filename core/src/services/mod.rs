//! Business services

pub mod otp;

pub use otp::{
    Notifier, OtpService, OtpServiceConfig, OtpStore, RequestCodeOutcome, VerifyOutcome,
};
