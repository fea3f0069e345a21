//! Cache module for OTP storage
//!
//! Both stores implement `sphere_core::OtpStore`. Redis is the production
//! backend: it expires keys natively and is shared by every server instance.
//! The in-memory store is for tests, local development and single-instance
//! deployments only.

pub mod memory_store;
pub mod otp_store;
pub mod redis_client;

#[cfg(test)]
mod tests;

use std::sync::Arc;
use std::time::Duration;

use sphere_core::OtpStore;
use sphere_shared::config::{CacheConfig, StoreBackend};

use crate::InfrastructureError;

pub use memory_store::InMemoryOtpStore;
pub use otp_store::RedisOtpStore;
pub use redis_client::RedisClient;

/// Create the OTP store selected by configuration
///
/// Connecting to Redis is retried with backoff; a Redis backend that stays
/// unreachable is an error rather than a silent fallback to memory.
pub async fn create_store(config: &CacheConfig) -> Result<Arc<dyn OtpStore>, InfrastructureError> {
    match config.backend {
        StoreBackend::Redis => {
            let client = RedisClient::new(config.clone()).await?;
            Ok(Arc::new(RedisOtpStore::new(client)))
        }
        StoreBackend::Memory => {
            tracing::warn!(
                "Using the in-memory OTP store; codes are lost on restart and not shared between instances"
            );
            let store = InMemoryOtpStore::new();
            if config.reaper_interval_secs > 0 {
                store.spawn_reaper(Duration::from_secs(config.reaper_interval_secs));
            }
            Ok(Arc::new(store))
        }
    }
}
