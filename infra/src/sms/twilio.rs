//! Twilio SMS Service Implementation
//!
//! Sends messages through the Twilio Programmable Messaging REST API
//! (`POST /2010-04-01/Accounts/{sid}/Messages.json`).
//!
//! ## Features
//!
//! - Basic-auth form requests over `reqwest`
//! - Retry with exponential backoff on rate limiting (429), server errors and
//!   connection failures
//! - Immediate failure on other client errors (bad number, unverified sender)
//!   and on timeouts, where the message may already have been created
//!
//! The retry loop is not bounded by its own deadline. The HTTP handler wraps
//! the whole request in `REQUEST_TIMEOUT_SECS`; when that fires the pending
//! send future is dropped and no further attempt is made.
//! - Phone number masking in logs

use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use serde::Deserialize;
use std::time::Duration;
use tracing::{debug, error, info, warn};

use sphere_core::Notifier;
use sphere_shared::config::SmsConfig;
use sphere_shared::utils::mask_phone_number;

use crate::InfrastructureError;

/// Production API endpoint
pub const TWILIO_API_BASE: &str = "https://api.twilio.com";

/// Maximum message body length accepted by Twilio
pub const MAX_BODY_CHARS: usize = 1600;

/// Successful message creation response (subset)
#[derive(Debug, Deserialize)]
struct MessageResponse {
    sid: String,
    #[serde(default)]
    status: Option<String>,
}

/// Error body returned by the API
#[derive(Debug, Deserialize)]
struct ApiErrorResponse {
    #[serde(default)]
    code: Option<i64>,
    #[serde(default)]
    message: Option<String>,
}

/// Outcome of a single attempt
enum Attempt {
    Sent(String),
    Retry(String),
    Fatal(String),
}

/// Twilio SMS service implementation
#[derive(Clone)]
pub struct TwilioSmsService {
    client: Client,
    config: SmsConfig,
    base_url: String,
}

impl TwilioSmsService {
    /// Create a new Twilio SMS service
    pub fn new(config: SmsConfig) -> Result<Self, InfrastructureError> {
        Self::with_base_url(config, TWILIO_API_BASE)
    }

    /// Create a service talking to a different API host (used by tests)
    pub fn with_base_url(
        config: SmsConfig,
        base_url: impl Into<String>,
    ) -> Result<Self, InfrastructureError> {
        if config.account_sid.is_empty() || config.auth_token.is_empty() {
            return Err(InfrastructureError::Config(
                "Twilio account SID and auth token are required".to_string(),
            ));
        }
        if config.from_number.is_empty() {
            return Err(InfrastructureError::Config(
                "Twilio sending number is required".to_string(),
            ));
        }

        let client = Client::builder()
            .timeout(Duration::from_secs(config.request_timeout_secs))
            .build()?;

        info!(
            "Twilio SMS service initialized with from number: {}",
            mask_phone_number(&config.from_number)
        );

        Ok(Self {
            client,
            config,
            base_url: base_url.into().trim_end_matches('/').to_string(),
        })
    }

    fn messages_url(&self) -> String {
        format!(
            "{}/2010-04-01/Accounts/{}/Messages.json",
            self.base_url, self.config.account_sid
        )
    }

    /// Send an SMS, returning the Twilio message SID
    pub async fn send_sms(&self, to: &str, message: &str) -> Result<String, InfrastructureError> {
        if message.chars().count() > MAX_BODY_CHARS {
            return Err(InfrastructureError::Sms(format!(
                "Message exceeds maximum length of {} characters",
                MAX_BODY_CHARS
            )));
        }

        info!(
            "Sending SMS to {} via Twilio (message length: {} chars)",
            mask_phone_number(to),
            message.len()
        );

        self.send_with_retry(to, message).await
    }

    /// Send SMS with retry logic
    async fn send_with_retry(&self, to: &str, message: &str) -> Result<String, InfrastructureError> {
        let max_retries = self.config.max_retries.max(1);
        let mut attempts = 0;
        let mut delay = Duration::from_millis(self.config.retry_delay_ms);

        loop {
            attempts += 1;
            debug!(
                "Sending SMS attempt {}/{} to {}",
                attempts,
                max_retries,
                mask_phone_number(to)
            );

            match self.attempt(to, message).await {
                Attempt::Sent(sid) => {
                    info!(
                        "SMS sent successfully to {} with SID: {}",
                        mask_phone_number(to),
                        sid
                    );
                    return Ok(sid);
                }
                Attempt::Fatal(reason) => {
                    error!("Twilio rejected SMS to {}: {}", mask_phone_number(to), reason);
                    return Err(InfrastructureError::Sms(reason));
                }
                Attempt::Retry(reason) if attempts >= max_retries => {
                    error!(
                        "Failed to send SMS after {} attempts: {}",
                        attempts, reason
                    );
                    return Err(InfrastructureError::Sms(format!(
                        "Failed to send SMS after {} attempts: {}",
                        attempts, reason
                    )));
                }
                Attempt::Retry(reason) => {
                    warn!(
                        "Failed to send SMS (attempt {}/{}): {}. Retrying in {:?}",
                        attempts, max_retries, reason, delay
                    );
                    tokio::time::sleep(delay).await;
                    delay = delay.saturating_mul(2);
                }
            }
        }
    }

    async fn attempt(&self, to: &str, message: &str) -> Attempt {
        let params = [
            ("To", to),
            ("From", self.config.from_number.as_str()),
            ("Body", message),
        ];

        let response = match self
            .client
            .post(self.messages_url())
            .basic_auth(&self.config.account_sid, Some(&self.config.auth_token))
            .form(&params)
            .send()
            .await
        {
            Ok(response) => response,
            // The request never left this host, so resending cannot duplicate the SMS
            Err(e) if e.is_connect() => return Attempt::Retry(format!("connection failed: {}", e)),
            // Twilio may already have created the message; message creation is not idempotent
            Err(e) if e.is_timeout() => {
                return Attempt::Fatal(format!("request timed out, delivery unknown: {}", e))
            }
            Err(e) => return Attempt::Fatal(format!("request failed: {}", e)),
        };

        let status = response.status();
        if status.is_success() {
            return match response.json::<MessageResponse>().await {
                Ok(body) => {
                    debug!(status = ?body.status, "Twilio accepted message");
                    Attempt::Sent(body.sid)
                }
                Err(e) => Attempt::Fatal(format!("unreadable Twilio response: {}", e)),
            };
        }

        let detail = match response.json::<ApiErrorResponse>().await {
            Ok(ApiErrorResponse {
                code: Some(code),
                message: Some(message),
            }) => format!("{} (code {})", message, code),
            Ok(ApiErrorResponse {
                message: Some(message),
                ..
            }) => message,
            _ => "no error details".to_string(),
        };
        let reason = format!("HTTP {}: {}", status.as_u16(), detail);

        if is_retryable_status(status) {
            Attempt::Retry(reason)
        } else {
            Attempt::Fatal(reason)
        }
    }
}

/// Rate limiting and server-side failures are retried; other errors are final
pub(crate) fn is_retryable_status(status: StatusCode) -> bool {
    status == StatusCode::TOO_MANY_REQUESTS || status.is_server_error()
}

#[async_trait]
impl Notifier for TwilioSmsService {
    async fn send_sms(&self, destination: &str, body: &str) -> Result<String, String> {
        TwilioSmsService::send_sms(self, destination, body)
            .await
            .map_err(|e| e.to_string())
    }

    fn provider_name(&self) -> &str {
        "twilio"
    }
}
