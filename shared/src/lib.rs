//! Shared utilities and common types for the Sphere server
//!
//! This crate provides functionality used across all server modules:
//! - Configuration types loaded from the environment
//! - Configuration error types
//! - Utility functions (phone masking for logs)

pub mod config;
pub mod errors;
pub mod utils;

// Re-export commonly used items at crate root
pub use config::{
    AppConfig, CacheConfig, DeliveryFailurePolicy, Environment, OtpConfig, ServerConfig,
    SmsConfig, SmsProvider, StoreBackend,
};
pub use errors::{ConfigError, ConfigResult};
pub use utils::phone;
