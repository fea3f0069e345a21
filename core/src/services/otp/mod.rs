//! OTP lifecycle module for SMS-based phone verification
//!
//! This module owns the request → store → deliver → verify → invalidate
//! protocol:
//! - Code generation and storage with a time-to-live
//! - Delivery through a pluggable notifier with a configurable failure policy
//! - Single-use verification through an atomic compare-and-delete
//!
//! Storage and delivery are reached only through the [`OtpStore`] and
//! [`Notifier`] traits, so the same service runs against Redis in production
//! and an in-memory map in tests and local development.

mod config;
mod service;
mod traits;
mod types;


pub use config::OtpServiceConfig;
pub use service::OtpService;
pub use sphere_shared::config::DeliveryFailurePolicy;
pub use traits::{Notifier, OtpStore};
pub use types::{RequestCodeOutcome, VerifyOutcome};
