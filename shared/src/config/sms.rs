//! SMS provider configuration module
//!
//! Twilio credentials come from `TWILIO_ACCOUNT_SID`, `TWILIO_AUTH_TOKEN` and
//! `TWILIO_PHONE_NUMBER`. In production an incomplete set is fatal. Elsewhere
//! the service warns and falls back to the logging provider so local setups
//! work without an account.

use serde::{Deserialize, Serialize};

use super::{parse_or, Environment};
use crate::errors::{ConfigError, ConfigResult};

/// SMS delivery provider
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum SmsProvider {
    /// Twilio Programmable Messaging
    Twilio,
    /// Write messages to the server log instead of sending them
    Log,
}

impl std::str::FromStr for SmsProvider {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "twilio" => Ok(SmsProvider::Twilio),
            "log" | "mock" | "console" => Ok(SmsProvider::Log),
            other => Err(format!("unknown SMS provider '{}'", other)),
        }
    }
}

/// SMS service configuration
#[derive(Clone, Deserialize, Serialize)]
pub struct SmsConfig {
    /// Selected provider
    pub provider: SmsProvider,
    /// Twilio Account SID
    pub account_sid: String,
    /// Twilio Auth Token
    pub auth_token: String,
    /// Sending address registered with the provider
    pub from_number: String,
    /// Maximum attempts per message
    pub max_retries: u32,
    /// Initial retry delay in milliseconds
    pub retry_delay_ms: u64,
    /// Timeout for a single provider request in seconds
    pub request_timeout_secs: u64,
}

// Hand-written so the auth token never reaches the log.
impl std::fmt::Debug for SmsConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SmsConfig")
            .field("provider", &self.provider)
            .field("account_sid", &redact(&self.account_sid))
            .field("auth_token", &"****")
            .field("from_number", &self.from_number)
            .field("max_retries", &self.max_retries)
            .field("retry_delay_ms", &self.retry_delay_ms)
            .field("request_timeout_secs", &self.request_timeout_secs)
            .finish()
    }
}

fn redact(value: &str) -> String {
    match value.get(..6) {
        Some(prefix) if value.len() > 6 => format!("{}...", prefix),
        _ => "****".to_string(),
    }
}

impl Default for SmsConfig {
    fn default() -> Self {
        Self::log_only()
    }
}

impl SmsConfig {
    /// Configuration for the logging provider
    pub fn log_only() -> Self {
        Self {
            provider: SmsProvider::Log,
            account_sid: String::new(),
            auth_token: String::new(),
            from_number: String::new(),
            max_retries: 3,
            retry_delay_ms: 1000,
            request_timeout_secs: 10,
        }
    }

    pub fn from_lookup<F>(lookup: &F, environment: Environment) -> ConfigResult<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let requested = match lookup("SMS_PROVIDER") {
            Some(value) => value
                .parse()
                .map_err(|reason| ConfigError::invalid("SMS_PROVIDER", reason))?,
            None => SmsProvider::Twilio,
        };

        let mut config = Self::log_only();
        config.max_retries = parse_or(lookup, "TWILIO_MAX_RETRIES", config.max_retries)?;
        config.retry_delay_ms = parse_or(lookup, "TWILIO_RETRY_DELAY_MS", config.retry_delay_ms)?;
        config.request_timeout_secs = parse_or(
            lookup,
            "TWILIO_REQUEST_TIMEOUT_SECS",
            config.request_timeout_secs,
        )?;

        if requested == SmsProvider::Log {
            if environment.is_production() {
                tracing::warn!("SMS_PROVIDER=log in production; codes will only be written to the log");
            }
            return Ok(config);
        }

        match Self::twilio_credentials(lookup) {
            Ok((account_sid, auth_token, from_number)) => {
                config.provider = SmsProvider::Twilio;
                config.account_sid = account_sid;
                config.auth_token = auth_token;
                config.from_number = from_number;
                Ok(config)
            }
            Err(e) if environment.is_production() => Err(e),
            Err(e) => {
                tracing::warn!(
                    error = %e,
                    environment = %environment,
                    "Twilio is not configured, falling back to the logging SMS provider"
                );
                Ok(config)
            }
        }
    }

    fn twilio_credentials<F>(lookup: &F) -> ConfigResult<(String, String, String)>
    where
        F: Fn(&str) -> Option<String>,
    {
        let required = |name: &str| {
            lookup(name)
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty())
                .ok_or_else(|| ConfigError::missing(name))
        };

        let account_sid = required("TWILIO_ACCOUNT_SID")?;
        if !account_sid.starts_with("AC") {
            return Err(ConfigError::invalid(
                "TWILIO_ACCOUNT_SID",
                "account SIDs start with 'AC'",
            ));
        }
        let auth_token = required("TWILIO_AUTH_TOKEN")?;
        let from_number = required("TWILIO_PHONE_NUMBER")?;

        Ok((account_sid, auth_token, from_number))
    }
}
