//! In-process OTP store
//!
//! Entries carry a deadline on the tokio clock and are treated as absent
//! once it passes, whether or not they have been swept. An optional reaper
//! task removes expired entries so an idle process does not accumulate them.
//!
//! Limitation: the map lives in this process only. Codes are lost on restart
//! and are not visible to other instances, so this store must not back a
//! deployment with more than one server.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard, Weak};
use std::time::Duration;
use tokio::task::JoinHandle;
use tokio::time::Instant;
use tracing::debug;

use sphere_core::OtpStore;

#[derive(Debug, Clone)]
struct Entry {
    value: String,
    expires_at: Instant,
}

impl Entry {
    fn is_live(&self, now: Instant) -> bool {
        now < self.expires_at
    }
}

type Entries = Mutex<HashMap<String, Entry>>;

/// Map-backed store with passive expiry
#[derive(Clone, Default)]
pub struct InMemoryOtpStore {
    entries: Arc<Entries>,
}

impl InMemoryOtpStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of entries held, including expired ones not yet swept
    pub fn len(&self) -> usize {
        self.lock().map(|entries| entries.len()).unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Remove every expired entry, returning how many were dropped
    pub fn purge_expired(&self) -> usize {
        match self.lock() {
            Ok(mut entries) => purge(&mut entries),
            Err(_) => 0,
        }
    }

    /// Start a background task sweeping expired entries every `interval`
    ///
    /// The task ends on its own once every handle to the store is dropped.
    pub fn spawn_reaper(&self, interval: Duration) -> JoinHandle<()> {
        let entries: Weak<Entries> = Arc::downgrade(&self.entries);

        tokio::spawn(async move {
            let mut ticker = tokio::time::interval(interval);
            // The first tick completes immediately
            ticker.tick().await;

            loop {
                ticker.tick().await;
                let Some(store) = entries.upgrade() else {
                    debug!("OTP store dropped, stopping reaper");
                    break;
                };
                let removed = match store.lock() {
                    Ok(mut guard) => purge(&mut guard),
                    Err(_) => break,
                };
                if removed > 0 {
                    debug!(removed, "Reaped expired OTP entries");
                }
            }
        })
    }

    fn lock(&self) -> Result<MutexGuard<'_, HashMap<String, Entry>>, String> {
        self.entries
            .lock()
            .map_err(|_| "In-memory OTP store lock poisoned".to_string())
    }
}

fn purge(entries: &mut HashMap<String, Entry>) -> usize {
    let now = Instant::now();
    let before = entries.len();
    entries.retain(|_, entry| entry.is_live(now));
    before - entries.len()
}

#[async_trait]
impl OtpStore for InMemoryOtpStore {
    async fn set(&self, key: &str, value: &str, ttl_seconds: u64) -> Result<(), String> {
        let expires_at = Instant::now()
            .checked_add(Duration::from_secs(ttl_seconds))
            .ok_or_else(|| format!("TTL of {}s is out of range", ttl_seconds))?;
        self.lock()?.insert(
            key.to_string(),
            Entry {
                value: value.to_string(),
                expires_at,
            },
        );
        Ok(())
    }

    async fn get(&self, key: &str) -> Result<Option<String>, String> {
        let mut entries = self.lock()?;
        match entries.get(key) {
            Some(entry) if entry.is_live(Instant::now()) => Ok(Some(entry.value.clone())),
            Some(_) => {
                entries.remove(key);
                Ok(None)
            }
            None => Ok(None),
        }
    }

    async fn delete(&self, key: &str) -> Result<bool, String> {
        let removed = self.lock()?.remove(key);
        Ok(removed.is_some_and(|entry| entry.is_live(Instant::now())))
    }

    async fn delete_if_equals(&self, key: &str, expected: &str) -> Result<bool, String> {
        let mut entries = self.lock()?;
        let matches = entries
            .get(key)
            .is_some_and(|entry| entry.is_live(Instant::now()) && entry.value == expected);
        if matches {
            entries.remove(key);
        }
        Ok(matches)
    }
}
