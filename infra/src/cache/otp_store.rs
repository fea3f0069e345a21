//! Redis-backed OTP store
//!
//! Bridges [`RedisClient`] to the core `OtpStore` trait. Expiry is left to
//! Redis (`SETEX`), so codes survive restarts and are visible to every
//! server instance sharing the database.

use async_trait::async_trait;
use sphere_core::OtpStore;

use super::redis_client::RedisClient;

/// Adapter that implements the core `OtpStore` for Redis
#[derive(Clone)]
pub struct RedisOtpStore {
    client: RedisClient,
}

impl RedisOtpStore {
    pub fn new(client: RedisClient) -> Self {
        Self { client }
    }
}

#[async_trait]
impl OtpStore for RedisOtpStore {
    async fn set(&self, key: &str, value: &str, ttl_seconds: u64) -> Result<(), String> {
        self.client
            .set_with_expiry(key, value, ttl_seconds)
            .await
            .map_err(|e| e.to_string())
    }

    async fn get(&self, key: &str) -> Result<Option<String>, String> {
        self.client.get(key).await.map_err(|e| e.to_string())
    }

    async fn delete(&self, key: &str) -> Result<bool, String> {
        self.client.delete(key).await.map_err(|e| e.to_string())
    }

    async fn delete_if_equals(&self, key: &str, expected: &str) -> Result<bool, String> {
        self.client
            .delete_if_equals(key, expected)
            .await
            .map_err(|e| e.to_string())
    }

    async fn health_check(&self) -> Result<(), String> {
        match self.client.health_check().await {
            Ok(true) => Ok(()),
            Ok(false) => Err("Redis returned an unexpected PING reply".to_string()),
            Err(e) => Err(e.to_string()),
        }
    }
}
