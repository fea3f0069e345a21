//! Logging SMS Service Implementation
//!
//! Writes messages to the log instead of sending them. This is the local and
//! development notifier: the code reaches the developer through the server
//! output, so the full message body is logged on purpose.

use async_trait::async_trait;
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::sync::Arc;
use tracing::{info, warn};
use uuid::Uuid;

use sphere_core::Notifier;
use sphere_shared::utils::mask_phone_number;

/// SMS service that only logs
#[derive(Clone, Default)]
pub struct LogSmsService {
    /// Counter for tracking number of messages logged
    message_count: Arc<AtomicU64>,
    /// Whether to simulate failures (for testing the degrade path)
    simulate_failure: Arc<AtomicBool>,
}

impl LogSmsService {
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a service that fails every send
    pub fn failing() -> Self {
        let service = Self::new();
        service.set_simulate_failure(true);
        service
    }

    /// Get the total number of messages logged
    pub fn message_count(&self) -> u64 {
        self.message_count.load(Ordering::SeqCst)
    }

    /// Enable or disable failure simulation
    pub fn set_simulate_failure(&self, simulate: bool) {
        self.simulate_failure.store(simulate, Ordering::SeqCst);
    }
}

#[async_trait]
impl Notifier for LogSmsService {
    async fn send_sms(&self, destination: &str, body: &str) -> Result<String, String> {
        if self.simulate_failure.load(Ordering::SeqCst) {
            warn!(
                "Log SMS service simulating failure for phone: {}",
                mask_phone_number(destination)
            );
            return Err("Simulated SMS sending failure".to_string());
        }

        let message_id = format!("log_{}", Uuid::new_v4());
        let count = self.message_count.fetch_add(1, Ordering::SeqCst) + 1;

        info!(
            target: "sms_service",
            provider = "log",
            phone = %mask_phone_number(destination),
            message_id = %message_id,
            count,
            body = %body,
            "SMS not sent, logged instead"
        );

        Ok(message_id)
    }

    fn provider_name(&self) -> &str {
        "log"
    }
}
