//! Shared fixtures for the HTTP tests
#![allow(dead_code)]

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use actix_web::web;
use async_trait::async_trait;

use sphere_api::AppState;
use sphere_core::{DeliveryFailurePolicy, Notifier, OtpService, OtpServiceConfig, OtpStore};
use sphere_infra::InMemoryOtpStore;

/// Notifier that keeps every attempted message
#[derive(Default)]
pub struct RecordingNotifier {
    sent: Mutex<Vec<(String, String)>>,
    fail: AtomicBool,
    delay: Option<Duration>,
}

impl RecordingNotifier {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn failing() -> Self {
        let notifier = Self::default();
        notifier.fail.store(true, Ordering::SeqCst);
        notifier
    }

    pub fn slow(delay: Duration) -> Self {
        Self {
            delay: Some(delay),
            ..Self::default()
        }
    }

    pub fn attempts(&self) -> Vec<(String, String)> {
        self.sent.lock().unwrap().clone()
    }

    /// Code from the most recent message body
    pub fn last_code(&self) -> Option<String> {
        self.sent
            .lock()
            .unwrap()
            .last()
            .and_then(|(_, body)| body.rsplit(' ').next().map(str::to_string))
    }
}

#[async_trait]
impl Notifier for RecordingNotifier {
    async fn send_sms(&self, destination: &str, body: &str) -> Result<String, String> {
        if let Some(delay) = self.delay {
            tokio::time::sleep(delay).await;
        }

        let count = {
            let mut sent = self.sent.lock().unwrap();
            sent.push((destination.to_string(), body.to_string()));
            sent.len()
        };

        if self.fail.load(Ordering::SeqCst) {
            Err("provider unavailable".to_string())
        } else {
            Ok(format!("test_{}", count))
        }
    }

    fn provider_name(&self) -> &str {
        "recording"
    }
}

/// Store whose backend is unreachable
pub struct UnreachableStore;

#[async_trait]
impl OtpStore for UnreachableStore {
    async fn set(&self, _key: &str, _value: &str, _ttl_seconds: u64) -> Result<(), String> {
        Err("connection refused".to_string())
    }

    async fn get(&self, _key: &str) -> Result<Option<String>, String> {
        Err("connection refused".to_string())
    }

    async fn delete(&self, _key: &str) -> Result<bool, String> {
        Err("connection refused".to_string())
    }

    async fn delete_if_equals(&self, _key: &str, _expected: &str) -> Result<bool, String> {
        Err("connection refused".to_string())
    }

    async fn health_check(&self) -> Result<(), String> {
        Err("connection refused".to_string())
    }
}

pub fn state_with(
    store: Arc<dyn OtpStore>,
    notifier: Arc<RecordingNotifier>,
    policy: DeliveryFailurePolicy,
    request_timeout: Duration,
) -> web::Data<AppState> {
    let config = OtpServiceConfig {
        delivery_failure_policy: policy,
        ..OtpServiceConfig::default()
    };
    let service = OtpService::new(store, notifier, config);
    web::Data::new(AppState::new(Arc::new(service), request_timeout))
}

/// In-memory store, fail-fast policy, generous deadline
pub fn default_state(notifier: Arc<RecordingNotifier>) -> web::Data<AppState> {
    state_with(
        Arc::new(InMemoryOtpStore::new()),
        notifier,
        DeliveryFailurePolicy::Fail,
        Duration::from_secs(5),
    )
}

pub fn test_cors() -> actix_cors::Cors {
    sphere_api::middleware::create_cors(
        &sphere_shared::ServerConfig::default(),
        sphere_shared::Environment::Development,
    )
}
