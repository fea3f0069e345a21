//! OTP lifecycle service implementation

use chrono::Utc;
use std::sync::Arc;

use crate::domain::{normalize, OtpCode, PendingOtp, PhoneKey};
use crate::errors::{OtpError, OtpResult};

use super::config::OtpServiceConfig;
use super::traits::{Notifier, OtpStore};
use super::types::{RequestCodeOutcome, VerifyOutcome};
use super::DeliveryFailurePolicy;

/// Issues and verifies one-time codes
///
/// The service keeps no mutable state of its own; the store is the only
/// shared resource. Two concurrent `request_code` calls for the same phone
/// race with last-write-wins semantics, and a notifier call still in flight
/// for the overwritten code may deliver a stale code. Only the most recently
/// stored code verifies.
///
/// Expiry is checked twice: by the store's TTL and against the stored
/// `expires_at` using this host's wall clock. Instances sharing one store are
/// assumed to have synchronized clocks; a host running fast rejects codes
/// early by the amount of its skew.
pub struct OtpService {
    /// Store holding pending codes
    store: Arc<dyn OtpStore>,
    /// Notifier delivering codes
    notifier: Arc<dyn Notifier>,
    /// Service configuration
    config: OtpServiceConfig,
}

impl OtpService {
    /// Create a new OTP service
    ///
    /// # Arguments
    ///
    /// * `store` - Store implementation with native TTL support
    /// * `notifier` - SMS notifier implementation
    /// * `config` - Service configuration
    pub fn new(
        store: Arc<dyn OtpStore>,
        notifier: Arc<dyn Notifier>,
        config: OtpServiceConfig,
    ) -> Self {
        Self {
            store,
            notifier,
            config,
        }
    }

    /// Issue a code using the configured delivery failure policy
    pub async fn request_code(&self, raw_phone: &str) -> OtpResult<RequestCodeOutcome> {
        self.request_code_with_policy(raw_phone, self.config.delivery_failure_policy)
            .await
    }

    /// Issue a code and send it to the phone
    ///
    /// This method:
    /// 1. Normalizes the phone number
    /// 2. Generates a new code and stores it with the configured TTL,
    ///    replacing any earlier code for the same phone
    /// 3. Sends the code through the notifier
    ///
    /// A storage failure aborts before anything is sent. A delivery failure
    /// never removes the stored code; `policy` decides whether the caller
    /// sees [`OtpError::Delivery`] or [`RequestCodeOutcome::DeliveryDegraded`].
    pub async fn request_code_with_policy(
        &self,
        raw_phone: &str,
        policy: DeliveryFailurePolicy,
    ) -> OtpResult<RequestCodeOutcome> {
        let phone = normalize(raw_phone)?;
        let code = OtpCode::generate();

        self.store_code(&phone, &code).await?;

        tracing::info!(
            phone = %phone.masked(),
            ttl_seconds = self.config.ttl_seconds,
            event = "otp_generated",
            "Stored new verification code"
        );

        let body = self.message_body(&code);
        match self.notifier.send_sms(phone.as_str(), &body).await {
            Ok(message_id) => {
                tracing::info!(
                    phone = %phone.masked(),
                    provider = self.notifier.provider_name(),
                    message_id = %message_id,
                    event = "otp_sent",
                    "Verification code sent"
                );
                Ok(RequestCodeOutcome::Delivered { message_id })
            }
            Err(reason) => match policy {
                DeliveryFailurePolicy::Fail => {
                    tracing::error!(
                        phone = %phone.masked(),
                        provider = self.notifier.provider_name(),
                        error = %reason,
                        event = "otp_delivery_failed",
                        "Failed to deliver verification code"
                    );
                    Err(OtpError::delivery(reason))
                }
                DeliveryFailurePolicy::Degrade => {
                    // The log line is the only remaining way to recover the code
                    tracing::warn!(
                        phone = %phone.masked(),
                        provider = self.notifier.provider_name(),
                        error = %reason,
                        code = code.as_str(),
                        event = "otp_delivery_degraded",
                        "SMS delivery failed, code kept for manual recovery"
                    );
                    Ok(RequestCodeOutcome::DeliveryDegraded { reason })
                }
            },
        }
    }

    /// Check a submitted code and consume it on match
    ///
    /// Mismatches leave the stored code in place so the user can retry until
    /// it expires. A match removes the code through the store's atomic
    /// compare-and-delete; if another request consumed it first the result
    /// is [`VerifyOutcome::NoActiveCode`].
    pub async fn verify_code(&self, raw_phone: &str, submitted: &str) -> OtpResult<VerifyOutcome> {
        let phone = normalize(raw_phone)?;
        if submitted.is_empty() {
            return Err(OtpError::invalid_input("code"));
        }

        let key = phone.storage_key(&self.config.key_prefix);
        let stored = self.store.get(&key).await.map_err(|e| {
            tracing::error!(
                phone = %phone.masked(),
                error = %e,
                event = "otp_lookup_failed",
                "Failed to read verification code"
            );
            OtpError::storage(e)
        })?;

        let Some(raw) = stored else {
            tracing::info!(
                phone = %phone.masked(),
                event = "otp_not_found",
                "No active verification code"
            );
            return Ok(VerifyOutcome::NoActiveCode);
        };

        let pending: PendingOtp = serde_json::from_str(&raw).map_err(|e| {
            tracing::error!(
                phone = %phone.masked(),
                error = %e,
                event = "otp_record_corrupt",
                "Stored verification code could not be decoded"
            );
            OtpError::storage(format!("Corrupt verification record: {}", e))
        })?;

        // The store may not have purged it yet
        if pending.is_expired_at(Utc::now()) {
            tracing::info!(
                phone = %phone.masked(),
                event = "otp_expired",
                "Verification code expired"
            );
            return Ok(VerifyOutcome::NoActiveCode);
        }

        if !pending.code.matches(submitted) {
            tracing::warn!(
                phone = %phone.masked(),
                event = "otp_mismatch",
                "Verification code mismatch"
            );
            return Ok(VerifyOutcome::CodeMismatch);
        }

        let consumed = self
            .store
            .delete_if_equals(&key, &raw)
            .await
            .map_err(OtpError::storage)?;

        if consumed {
            tracing::info!(
                phone = %phone.masked(),
                event = "otp_verified",
                "Verification code accepted"
            );
            Ok(VerifyOutcome::Verified)
        } else {
            tracing::info!(
                phone = %phone.masked(),
                event = "otp_consumed_concurrently",
                "Verification code was consumed by another request"
            );
            Ok(VerifyOutcome::NoActiveCode)
        }
    }

    /// Probe the store backing this service
    pub async fn store_health(&self) -> OtpResult<()> {
        self.store.health_check().await.map_err(OtpError::storage)
    }

    /// SMS text carrying the code
    fn message_body(&self, code: &OtpCode) -> String {
        format!(
            "Your {} verification code is: {}",
            self.config.app_name,
            code.as_str()
        )
    }

    async fn store_code(&self, phone: &PhoneKey, code: &OtpCode) -> OtpResult<()> {
        let pending = PendingOtp::new(phone.as_str(), code.clone(), Utc::now(), self.config.ttl_seconds);
        let value = serde_json::to_string(&pending)
            .map_err(|e| OtpError::storage(format!("Failed to encode verification record: {}", e)))?;

        self.store
            .set(
                &phone.storage_key(&self.config.key_prefix),
                &value,
                self.config.ttl_seconds,
            )
            .await
            .map_err(|e| {
                tracing::error!(
                    phone = %phone.masked(),
                    error = %e,
                    event = "otp_storage_failed",
                    "Failed to store verification code in cache"
                );
                OtpError::storage(e)
            })
    }
}
