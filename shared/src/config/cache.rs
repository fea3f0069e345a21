//! OTP store configuration module

use serde::{Deserialize, Serialize};

use super::{parse_or, Environment};
use crate::errors::{ConfigError, ConfigResult};

/// Which key-value backend holds pending codes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum StoreBackend {
    /// Shared Redis instance with native TTL
    Redis,
    /// Process-local map; single instance only
    Memory,
}

impl std::str::FromStr for StoreBackend {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "redis" => Ok(StoreBackend::Redis),
            "memory" | "in-memory" | "inmemory" => Ok(StoreBackend::Memory),
            other => Err(format!("unknown store backend '{}'", other)),
        }
    }
}

/// Store configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct CacheConfig {
    /// Selected backend
    pub backend: StoreBackend,

    /// Redis connection URL
    pub url: String,

    /// Retry attempts for connection and transient command failures
    pub max_retries: u32,

    /// Base delay between retries in milliseconds (doubles per attempt)
    pub retry_delay_ms: u64,

    /// Sweep interval of the in-memory reaper, in seconds
    pub reaper_interval_secs: u64,
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            backend: StoreBackend::Memory,
            url: String::from("redis://localhost:6379"),
            max_retries: 3,
            retry_delay_ms: 100,
            reaper_interval_secs: 60,
        }
    }
}

impl CacheConfig {
    /// Create a Redis-backed configuration with URL
    pub fn redis(url: impl Into<String>) -> Self {
        Self {
            backend: StoreBackend::Redis,
            url: url.into(),
            ..Default::default()
        }
    }

    /// Build from variables; production defaults to Redis, everything else to memory
    pub fn from_lookup<F>(lookup: &F, environment: Environment) -> ConfigResult<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();

        let backend = match lookup("OTP_STORE") {
            Some(value) => value
                .parse()
                .map_err(|reason| ConfigError::invalid("OTP_STORE", reason))?,
            None if environment.is_production() => StoreBackend::Redis,
            None => StoreBackend::Memory,
        };

        let url = lookup("REDIS_URL").unwrap_or(defaults.url);
        if backend == StoreBackend::Redis && !url.starts_with("redis://") && !url.starts_with("rediss://") {
            return Err(ConfigError::invalid(
                "REDIS_URL",
                "must start with redis:// or rediss://",
            ));
        }

        Ok(Self {
            backend,
            url,
            max_retries: parse_or(lookup, "REDIS_MAX_RETRIES", defaults.max_retries)?,
            retry_delay_ms: parse_or(lookup, "REDIS_RETRY_DELAY_MS", defaults.retry_delay_ms)?,
            reaper_interval_secs: parse_or(
                lookup,
                "OTP_REAPER_INTERVAL_SECS",
                defaults.reaper_interval_secs,
            )?,
        })
    }
}
