//! OTP lifecycle configuration module

use serde::{Deserialize, Serialize};

use super::parse_or;
use crate::errors::{ConfigError, ConfigResult};

/// Default lifetime of an issued code (5 minutes)
pub const DEFAULT_TTL_SECONDS: u64 = 300;

/// Default store key prefix
pub const DEFAULT_KEY_PREFIX: &str = "otp:";

/// What a code request reports when the SMS could not be delivered
///
/// The stored code is kept in both cases.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum DeliveryFailurePolicy {
    /// Surface the failure to the caller as a delivery error
    Fail,
    /// Report success and keep the code in the server log for manual recovery
    Degrade,
}

impl std::str::FromStr for DeliveryFailurePolicy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "fail" => Ok(DeliveryFailurePolicy::Fail),
            "degrade" => Ok(DeliveryFailurePolicy::Degrade),
            other => Err(format!("expected 'fail' or 'degrade', got '{}'", other)),
        }
    }
}

impl std::fmt::Display for DeliveryFailurePolicy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            DeliveryFailurePolicy::Fail => write!(f, "fail"),
            DeliveryFailurePolicy::Degrade => write!(f, "degrade"),
        }
    }
}

/// OTP lifecycle settings
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct OtpConfig {
    /// Seconds a code stays valid after issue
    pub ttl_seconds: u64,
    /// Prefix prepended to the phone key in the store
    pub key_prefix: String,
    /// Product name used in the SMS body
    pub app_name: String,
    /// Behaviour when the notifier fails
    pub delivery_failure_policy: DeliveryFailurePolicy,
}

impl Default for OtpConfig {
    fn default() -> Self {
        Self {
            ttl_seconds: DEFAULT_TTL_SECONDS,
            key_prefix: DEFAULT_KEY_PREFIX.to_string(),
            app_name: "Sphere".to_string(),
            delivery_failure_policy: DeliveryFailurePolicy::Fail,
        }
    }
}

impl OtpConfig {
    pub fn from_lookup<F>(lookup: &F, default_policy: DeliveryFailurePolicy) -> ConfigResult<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();

        let ttl_seconds = parse_or(lookup, "OTP_TTL_SECONDS", defaults.ttl_seconds)?;
        if ttl_seconds == 0 {
            return Err(ConfigError::invalid("OTP_TTL_SECONDS", "must be greater than zero"));
        }

        let delivery_failure_policy = match lookup("OTP_DELIVERY_FAILURE_POLICY") {
            Some(value) => value
                .parse()
                .map_err(|reason| ConfigError::invalid("OTP_DELIVERY_FAILURE_POLICY", reason))?,
            None => default_policy,
        };

        Ok(Self {
            ttl_seconds,
            key_prefix: lookup("OTP_KEY_PREFIX").unwrap_or(defaults.key_prefix),
            app_name: lookup("OTP_APP_NAME").unwrap_or(defaults.app_name),
            delivery_failure_policy,
        })
    }
}
