//! Configuration management for the CRM employment sync.
//!
//! Configuration is loaded once at process start from environment variables
//! (optionally seeded from a `.env` file) and passed explicitly to the client.

use crate::error::{ConfigError, ConfigResult};
use std::env;

/// Default HubSpot API base URL.
pub const DEFAULT_API_URL: &str = "https://api.hubapi.com";

/// Configuration for the CRM employment sync.
#[derive(Debug, Clone)]
pub struct Config {
    /// CRM API base URL
    pub api_url: String,

    /// Private app token sent as a bearer credential
    pub api_key: String,

    /// HTTP request timeout in seconds (default: 10)
    pub request_timeout: u64,

    /// Minimum spacing between consecutive requests in milliseconds (default: 200)
    pub call_delay_ms: u64,

    /// How many times a 429 response is retried (default: 3)
    pub max_retries: u32,

    /// Initial backoff when a 429 carries no Retry-After header (default: 500)
    pub retry_backoff_ms: u64,

    /// Look up companies by domain before creating them (default: false)
    pub dedupe_companies: bool,

    /// Log level (default: "info")
    pub log_level: String,
}

impl Config {
    /// Load configuration from environment variables.
    ///
    /// Required environment variables:
    /// - `HUBSPOT_KEY`: API token for authentication
    ///
    /// Optional environment variables:
    /// - `HUBSPOT_API_BASE_URL`: API base URL (default: https://api.hubapi.com)
    /// - `REQUEST_TIMEOUT`: HTTP timeout in seconds (default: 10)
    /// - `API_CALL_DELAY_MS`: Minimum delay between requests (default: 200)
    /// - `MAX_RETRIES`: Retries on 429 responses (default: 3)
    /// - `RETRY_BACKOFF_MS`: Initial backoff for 429 retries (default: 500)
    /// - `HUBSPOT_DEDUPE_COMPANIES`: Reuse companies with the same domain (default: false)
    /// - `LOG_LEVEL`: Logging level (default: "info")
    pub fn from_env() -> ConfigResult<Self> {
        // A missing .env file is fine; real environment variables still apply.
        let _ = dotenvy::dotenv();

        let api_key =
            env::var("HUBSPOT_KEY").map_err(|_| ConfigError::MissingVar("HUBSPOT_KEY".to_string()))?;

        if api_key.trim().is_empty() {
            return Err(ConfigError::InvalidValue {
                var: "HUBSPOT_KEY".to_string(),
                reason: "Cannot be empty".to_string(),
            });
        }

        let api_url =
            env::var("HUBSPOT_API_BASE_URL").unwrap_or_else(|_| DEFAULT_API_URL.to_string());

        if !api_url.starts_with("http://") && !api_url.starts_with("https://") {
            return Err(ConfigError::InvalidValue {
                var: "HUBSPOT_API_BASE_URL".to_string(),
                reason: "Must start with http:// or https://".to_string(),
            });
        }

        let request_timeout = Self::parse_env_u64("REQUEST_TIMEOUT", 10)?;
        if request_timeout == 0 {
            return Err(ConfigError::InvalidValue {
                var: "REQUEST_TIMEOUT".to_string(),
                reason: "Must be greater than zero".to_string(),
            });
        }

        let call_delay_ms = Self::parse_env_u64("API_CALL_DELAY_MS", 200)?;
        let max_retries = Self::parse_env_u32("MAX_RETRIES", 3)?;
        let retry_backoff_ms = Self::parse_env_u64("RETRY_BACKOFF_MS", 500)?;
        let dedupe_companies = Self::parse_env_bool("HUBSPOT_DEDUPE_COMPANIES", false)?;

        let log_level = env::var("LOG_LEVEL").unwrap_or_else(|_| "info".to_string());

        Ok(Config {
            api_url,
            api_key,
            request_timeout,
            call_delay_ms,
            max_retries,
            retry_backoff_ms,
            dedupe_companies,
            log_level,
        })
    }

    /// Build a configuration for a given endpoint with no throttling or retries.
    ///
    /// Useful for tests against a mock server.
    #[doc(hidden)]
    pub fn for_base_url(api_url: impl Into<String>, api_key: impl Into<String>) -> Self {
        Config {
            api_url: api_url.into(),
            api_key: api_key.into(),
            call_delay_ms: 0,
            max_retries: 0,
            retry_backoff_ms: 0,
            ..Config::default()
        }
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

    /// Parse an environment variable as u32 with a default value.
    fn parse_env_u32(var_name: &str, default: u32) -> ConfigResult<u32> {
        match env::var(var_name) {
            Ok(val) => val.parse::<u32>().map_err(|_| ConfigError::InvalidValue {
                var: var_name.to_string(),
                reason: format!("Must be a positive number, got: {}", val),
            }),
            Err(_) => Ok(default),
        }
    }

    /// Parse an environment variable as a boolean flag with a default value.
    fn parse_env_bool(var_name: &str, default: bool) -> ConfigResult<bool> {
        match env::var(var_name) {
            Ok(val) => match val.trim().to_ascii_lowercase().as_str() {
                "1" | "true" | "yes" | "on" => Ok(true),
                "0" | "false" | "no" | "off" => Ok(false),
                _ => Err(ConfigError::InvalidValue {
                    var: var_name.to_string(),
                    reason: format!("Must be true or false, got: {}", val),
                }),
            },
            Err(_) => Ok(default),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Config {
            api_url: DEFAULT_API_URL.to_string(),
            api_key: String::new(),
            request_timeout: 10,
            call_delay_ms: 200,
            max_retries: 3,
            retry_backoff_ms: 500,
            dedupe_companies: false,
            log_level: "info".to_string(),
        }
    }
}
