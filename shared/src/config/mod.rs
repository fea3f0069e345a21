//! Configuration module with business-specific sub-modules
//!
//! - `cache` - Which store holds pending codes and how to reach Redis
//! - `environment` - Environment detection
//! - `otp` - Code lifetime, key scheme and delivery-failure policy
//! - `server` - HTTP bind address, request timeout and CORS
//! - `sms` - SMS provider selection and Twilio credentials
//!
//! Every loader takes a `lookup` function instead of reading the process
//! environment directly, so tests can feed variables without mutating global
//! state. `from_env` wires the loaders to `std::env::var`.

pub mod cache;
pub mod environment;
pub mod otp;
pub mod server;
pub mod sms;

use serde::{Deserialize, Serialize};
use std::str::FromStr;

use crate::errors::{ConfigError, ConfigResult};

// Re-export commonly used types
pub use cache::{CacheConfig, StoreBackend};
pub use environment::Environment;
pub use otp::{DeliveryFailurePolicy, OtpConfig};
pub use server::ServerConfig;
pub use sms::{SmsConfig, SmsProvider};

/// Complete application configuration combining all sub-configurations
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct AppConfig {
    pub environment: Environment,
    pub server: ServerConfig,
    pub cache: CacheConfig,
    pub sms: SmsConfig,
    pub otp: OtpConfig,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            environment: Environment::Development,
            server: ServerConfig::default(),
            cache: CacheConfig::default(),
            sms: SmsConfig::log_only(),
            otp: OtpConfig {
                delivery_failure_policy: DeliveryFailurePolicy::Degrade,
                ..OtpConfig::default()
            },
        }
    }
}

impl AppConfig {
    /// Load configuration from the process environment
    pub fn from_env() -> ConfigResult<Self> {
        Self::from_lookup(&|key: &str| std::env::var(key).ok())
    }

    /// Load configuration through an arbitrary variable lookup
    pub fn from_lookup<F>(lookup: &F) -> ConfigResult<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let environment = Environment::from_lookup(lookup);
        let server = ServerConfig::from_lookup(lookup)?;
        let cache = CacheConfig::from_lookup(lookup, environment)?;
        let sms = SmsConfig::from_lookup(lookup, environment)?;

        // Without a real provider the code only reaches the log, so failing
        // the request would strand local users.
        let default_policy = match sms.provider {
            SmsProvider::Twilio => DeliveryFailurePolicy::Fail,
            SmsProvider::Log => DeliveryFailurePolicy::Degrade,
        };
        let otp = OtpConfig::from_lookup(lookup, default_policy)?;

        Ok(Self {
            environment,
            server,
            cache,
            sms,
            otp,
        })
    }
}

/// Parse an optional variable, falling back to `default` when it is unset
pub(crate) fn parse_or<F, T>(lookup: &F, name: &str, default: T) -> ConfigResult<T>
where
    F: Fn(&str) -> Option<String>,
    T: FromStr,
    T::Err: std::fmt::Display,
{
    match lookup(name) {
        Some(raw) => raw
            .trim()
            .parse()
            .map_err(|e: T::Err| ConfigError::invalid(name, e.to_string())),
        None => Ok(default),
    }
}
