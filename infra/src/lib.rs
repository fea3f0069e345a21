//! # Infrastructure Layer
//!
//! This crate implements the collaborators the OTP lifecycle depends on,
//! following Clean Architecture principles: the traits live in `sphere_core`,
//! the implementations live here.
//!
//! ## Architecture
//!
//! The infrastructure layer contains:
//! - **Cache**: Redis store with native TTL and an in-memory store for
//!   single-instance deployments and tests
//! - **SMS**: Twilio REST notifier and a logging notifier for local development
//!
//! [`create_store`] and [`create_notifier`] pick the implementations from
//! configuration.

/// Cache module - OTP store implementations
pub mod cache;

/// SMS service module - notifier implementations
pub mod sms;

pub use cache::{create_store, InMemoryOtpStore, RedisClient, RedisOtpStore};
pub use sms::{create_notifier, LogSmsService, TwilioSmsService};

/// Infrastructure-specific error types
#[derive(Debug, thiserror::Error)]
pub enum InfrastructureError {
    /// Redis cache error
    #[error("Cache error: {0}")]
    Cache(#[from] redis::RedisError),

    /// HTTP request error for external services
    #[error("HTTP request error: {0}")]
    Http(#[from] reqwest::Error),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// SMS service error
    #[error("SMS service error: {0}")]
    Sms(String),
}
