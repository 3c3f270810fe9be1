//! Configuration management for the contact export engine.
//!
//! This module handles loading and validating configuration from environment
//! variables, reading a `.env` file first when one is present.

use crate::error::{ConfigError, ConfigResult};
use std::env;
use std::time::Duration;

/// Configuration for the contact export engine.
#[derive(Debug, Clone)]
pub struct Config {
    /// REST backend base URL
    pub api_base_url: String,

    /// Optional bearer token for the backend
    pub api_token: Option<String>,

    /// Base URL for public profile links embedded in cards
    pub public_base_url: String,

    /// HTTP request timeout in seconds (default: 10)
    /// Also bounds the server-fallback download as a whole.
    pub request_timeout: u64,

    /// Photos larger than this are not embedded (default: 200 KiB)
    pub max_photo_bytes: usize,

    /// Delay before a temporary object URL is revoked, in milliseconds (default: 100)
    pub revoke_delay_ms: u64,

    /// Log level (default: "error")
    pub log_level: String,
}

impl Config {
    /// Load configuration from environment variables.
    ///
    /// Required environment variables:
    /// - `CARD_API_BASE_URL`: Base URL for the profiles REST API
    ///
    /// Optional environment variables:
    /// - `CARD_API_TOKEN`: Bearer token
    /// - `CARD_PUBLIC_BASE_URL`: Public profile link base (default: API base URL)
    /// - `REQUEST_TIMEOUT`: HTTP timeout in seconds (default: 10)
    /// - `MAX_PHOTO_BYTES`: Largest embeddable photo (default: 204800)
    /// - `OBJECT_URL_REVOKE_DELAY_MS`: Object URL revocation delay (default: 100)
    /// - `LOG_LEVEL`: Logging level (default: "error")
    pub fn from_env() -> ConfigResult<Self> {
        // A missing .env file is fine
        let _ = dotenvy::dotenv();

        let api_base_url = env::var("CARD_API_BASE_URL")
            .map_err(|_| ConfigError::MissingVar("CARD_API_BASE_URL".to_string()))?;
        Self::validate_url("CARD_API_BASE_URL", &api_base_url)?;

        let public_base_url = match env::var("CARD_PUBLIC_BASE_URL") {
            Ok(url) => {
                Self::validate_url("CARD_PUBLIC_BASE_URL", &url)?;
                url
            }
            Err(_) => api_base_url.clone(),
        };

        let api_token = env::var("CARD_API_TOKEN")
            .ok()
            .filter(|token| !token.trim().is_empty());

        let request_timeout = Self::parse_env_u64("REQUEST_TIMEOUT", 10)?;
        if request_timeout == 0 {
            return Err(ConfigError::InvalidValue {
                var: "REQUEST_TIMEOUT".to_string(),
                reason: "Must be at least 1 second".to_string(),
            });
        }

        let max_photo_bytes = Self::parse_env_usize("MAX_PHOTO_BYTES", 200 * 1024)?;
        let revoke_delay_ms = Self::parse_env_u64("OBJECT_URL_REVOKE_DELAY_MS", 100)?;
        let log_level = env::var("LOG_LEVEL").unwrap_or_else(|_| "error".to_string());

        Ok(Config {
            api_base_url,
            api_token,
            public_base_url,
            request_timeout,
            max_photo_bytes,
            revoke_delay_ms,
            log_level,
        })
    }

    /// HTTP and server-fallback timeout.
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout)
    }

    /// Object URL revocation delay.
    pub fn revoke_delay(&self) -> Duration {
        Duration::from_millis(self.revoke_delay_ms)
    }

    /// Public link for a profile id, `None` when no public base is configured.
    pub fn public_profile_url(&self, id: &crate::domain::ProfileId) -> Option<String> {
        let base = self.public_base_url.trim().trim_end_matches('/');
        (!base.is_empty()).then(|| format!("{}/p/{}", base, id.path_segment()))
    }

    fn validate_url(var: &str, url: &str) -> ConfigResult<()> {
        if !url.starts_with("http://") && !url.starts_with("https://") {
            return Err(ConfigError::InvalidValue {
                var: var.to_string(),
                reason: "Must start with http:// or https://".to_string(),
            });
        }
        Ok(())
    }

    /// Parse an environment variable as u64 with a default value.
    fn parse_env_u64(var_name: &str, default: u64) -> ConfigResult<u64> {
        match env::var(var_name) {
            Ok(val) => val.parse::<u64>().map_err(|_| ConfigError::InvalidValue {
                var: var_name.to_string(),
                reason: format!("Must be a positive number, got: {}", val),
            }),
            Err(_) => Ok(default),
        }
    }

    /// Parse an environment variable as usize with a default value.
    fn parse_env_usize(var_name: &str, default: usize) -> ConfigResult<usize> {
        match env::var(var_name) {
            Ok(val) => val.parse::<usize>().map_err(|_| ConfigError::InvalidValue {
                var: var_name.to_string(),
                reason: format!("Must be a positive number, got: {}", val),
            }),
            Err(_) => Ok(default),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Config {
            api_base_url: String::new(),
            api_token: None,
            public_base_url: String::new(),
            request_timeout: 10,
            max_photo_bytes: 200 * 1024,
            revoke_delay_ms: 100,
            log_level: "error".to_string(),
        }
    }
}
