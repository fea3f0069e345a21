//! Traits for store and notifier integration

use async_trait::async_trait;

/// Key-value store holding pending codes
///
/// Implementations must expire keys on their own once `ttl_seconds` has
/// elapsed; the service never schedules deletions.
#[async_trait]
pub trait OtpStore: Send + Sync {
    /// Store a value with expiration, replacing any previous value
    async fn set(&self, key: &str, value: &str, ttl_seconds: u64) -> Result<(), String>;
    /// Get the live value for a key
    async fn get(&self, key: &str) -> Result<Option<String>, String>;
    /// Delete a key, reporting whether it existed
    async fn delete(&self, key: &str) -> Result<bool, String>;
    /// Delete a key only if it still holds `expected`
    ///
    /// Must be atomic per key: of two concurrent calls with the same
    /// `expected`, at most one returns `true`.
    async fn delete_if_equals(&self, key: &str, expected: &str) -> Result<bool, String>;
    /// Check the backend is reachable
    async fn health_check(&self) -> Result<(), String> {
        Ok(())
    }
}

/// Out-of-band delivery of a message to a phone number
#[async_trait]
pub trait Notifier: Send + Sync {
    /// Send an SMS and return the provider's message ID
    async fn send_sms(&self, destination: &str, body: &str) -> Result<String, String>;
    /// Provider name for logs
    fn provider_name(&self) -> &str;
}
