//! Server configuration module

use serde::{Deserialize, Serialize};

use super::parse_or;
use crate::errors::ConfigResult;

/// HTTP server configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ServerConfig {
    /// Server host address
    pub host: String,

    /// Server port
    pub port: u16,

    /// Upper bound on a single request (store + notifier round-trips), in seconds
    pub request_timeout: u64,

    /// Comma-separated origins allowed by CORS in production
    #[serde(default)]
    pub allowed_origins: Vec<String>,

    /// Max age for preflight cache in seconds
    pub cors_max_age: usize,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: String::from("127.0.0.1"),
            port: 3000,
            request_timeout: 10,
            allowed_origins: Vec::new(),
            cors_max_age: 3600,
        }
    }
}

impl ServerConfig {
    /// Get the bind address
    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    pub fn from_lookup<F>(lookup: &F) -> ConfigResult<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();

        // PORT is what most hosting platforms inject
        let port = match lookup("SERVER_PORT") {
            Some(_) => parse_or(lookup, "SERVER_PORT", defaults.port)?,
            None => parse_or(lookup, "PORT", defaults.port)?,
        };

        let allowed_origins = lookup("ALLOWED_ORIGINS")
            .map(|origins| {
                origins
                    .split(',')
                    .map(|o| o.trim().to_string())
                    .filter(|o| !o.is_empty())
                    .collect()
            })
            .unwrap_or_default();

        Ok(Self {
            host: lookup("SERVER_HOST").unwrap_or(defaults.host),
            port,
            request_timeout: parse_or(lookup, "REQUEST_TIMEOUT_SECS", defaults.request_timeout)?,
            allowed_origins,
            cors_max_age: parse_or(lookup, "CORS_MAX_AGE", defaults.cors_max_age)?,
        })
    }
}
