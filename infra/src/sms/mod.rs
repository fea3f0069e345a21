//! SMS Service Module
//!
//! Notifier implementations for delivering codes:
//!
//! - **Twilio**: production delivery through the REST API
//! - **Log**: writes the message to the server log, for local development
//!   and for deployments without provider credentials

pub mod log_sms;
pub mod twilio;

#[cfg(test)]
mod tests;

use std::sync::Arc;

use sphere_core::Notifier;
use sphere_shared::config::{SmsConfig, SmsProvider};

use crate::InfrastructureError;

pub use log_sms::LogSmsService;
pub use twilio::TwilioSmsService;

/// Create the notifier selected by configuration
///
/// Credential checks already happened while loading `SmsConfig`; a Twilio
/// client that still cannot be built is reported as an error.
pub fn create_notifier(config: &SmsConfig) -> Result<Arc<dyn Notifier>, InfrastructureError> {
    match config.provider {
        SmsProvider::Twilio => Ok(Arc::new(TwilioSmsService::new(config.clone())?)),
        SmsProvider::Log => {
            tracing::warn!("Using the logging SMS provider; codes are written to the log, not sent");
            Ok(Arc::new(LogSmsService::new()))
        }
    }
}
