//! Configuration for the OTP service

use sphere_shared::config::otp::{DEFAULT_KEY_PREFIX, DEFAULT_TTL_SECONDS};
use sphere_shared::config::{DeliveryFailurePolicy, OtpConfig};

/// Configuration for the OTP service
#[derive(Debug, Clone)]
pub struct OtpServiceConfig {
    /// Seconds before an issued code expires
    pub ttl_seconds: u64,
    /// Prefix of the store key, followed by the normalized phone
    pub key_prefix: String,
    /// Product name used in the SMS body
    pub app_name: String,
    /// What `request_code` reports when delivery fails
    pub delivery_failure_policy: DeliveryFailurePolicy,
}

impl Default for OtpServiceConfig {
    fn default() -> Self {
        Self {
            ttl_seconds: DEFAULT_TTL_SECONDS,
            key_prefix: DEFAULT_KEY_PREFIX.to_string(),
            app_name: "Sphere".to_string(),
            delivery_failure_policy: DeliveryFailurePolicy::Fail,
        }
    }
}

impl From<&OtpConfig> for OtpServiceConfig {
    fn from(config: &OtpConfig) -> Self {
        Self {
            ttl_seconds: config.ttl_seconds,
            key_prefix: config.key_prefix.clone(),
            app_name: config.app_name.clone(),
            delivery_failure_policy: config.delivery_failure_policy,
        }
    }
}
