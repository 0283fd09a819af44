//! Client configuration and its bounds

use std::path::PathBuf;
use std::time::Duration;

use crate::api::jsearch::DEFAULT_API_HOST;
use crate::api::RateLimiter;

/// Placeholder shipped in example `.env` files; never a real key.
pub const API_KEY_PLACEHOLDER: &str = "YOUR_API_KEY_HERE";

/// Default attempts per API call.
pub const DEFAULT_MAX_RETRIES: u32 = 3;

/// Default base backoff in seconds (doubles after each failed attempt).
pub const DEFAULT_RETRY_DELAY_SECS: u64 = 2;

/// Default whole-request timeout in seconds.
pub const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 30;

/// Default minimum interval between requests in seconds.
pub const DEFAULT_RATE_LIMIT_DELAY_SECS: f64 = 1.0;

/// Default export directory.
pub const DEFAULT_OUTPUT_DIR: &str = "output";

/// Configuration errors
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ConfigError {
    /// API key unset, empty or the placeholder
    #[error("API key not configured; set JSEARCH_API_KEY or pass --api-key")]
    MissingApiKey,

    /// API host empty
    #[error("API host must not be empty")]
    EmptyApiHost,

    /// Numeric setting outside its allowed range
    #[error("{name} must be between {min} and {max}, got {value}")]
    OutOfRange {
        /// Setting name
        name: &'static str,
        /// Rejected value
        value: String,
        /// Inclusive lower bound
        min: String,
        /// Inclusive upper bound
        max: String,
    },
}

/// Settings for [`JSearchClient`](crate::api::JSearchClient) and the exporters
#[derive(Debug, Clone, PartialEq)]
pub struct ClientConfig {
    /// OpenWeb Ninja API key
    pub api_key: String,
    /// Host name, or a full base URL including the scheme
    pub api_host: String,
    /// Attempts per call (1-10)
    pub max_retries: u32,
    /// Base backoff in seconds (1-10)
    pub retry_delay_secs: u64,
    /// Request timeout in seconds (10-120)
    pub request_timeout_secs: u64,
    /// Minimum interval between requests in seconds (0.1-5.0)
    pub rate_limit_delay_secs: f64,
    /// Export directory
    pub output_dir: PathBuf,
}

impl ClientConfig {
    /// Configuration with every setting at its default
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            api_host: DEFAULT_API_HOST.to_string(),
            max_retries: DEFAULT_MAX_RETRIES,
            retry_delay_secs: DEFAULT_RETRY_DELAY_SECS,
            request_timeout_secs: DEFAULT_REQUEST_TIMEOUT_SECS,
            rate_limit_delay_secs: DEFAULT_RATE_LIMIT_DELAY_SECS,
            output_dir: PathBuf::from(DEFAULT_OUTPUT_DIR),
        }
    }

    /// Check the API key and every range
    pub fn validate(&self) -> Result<(), ConfigError> {
        let key = self.api_key.trim();
        if key.is_empty() || key == API_KEY_PLACEHOLDER {
            return Err(ConfigError::MissingApiKey);
        }
        if self.api_host.trim().is_empty() {
            return Err(ConfigError::EmptyApiHost);
        }

        check_range("max_retries", self.max_retries, 1, 10)?;
        check_range("retry_delay", self.retry_delay_secs, 1, 10)?;
        check_range("request_timeout", self.request_timeout_secs, 10, 120)?;
        check_range("rate_limit_delay", self.rate_limit_delay_secs, 0.1, 5.0)?;

        Ok(())
    }

    /// `https://{api_host}`, unless the host already carries a scheme
    pub fn base_url(&self) -> String {
        let host = self.api_host.trim().trim_end_matches('/');
        if host.contains("://") {
            host.to_string()
        } else {
            format!("https://{host}")
        }
    }

    /// Whole-request timeout
    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }

    /// Fresh limiter with this configuration's interval and retry settings
    pub fn rate_limiter(&self) -> RateLimiter {
        RateLimiter::new(
            Duration::from_secs_f64(self.rate_limit_delay_secs.max(0.0)),
            self.max_retries,
            Duration::from_secs(self.retry_delay_secs),
        )
    }
}

fn check_range<T>(name: &'static str, value: T, min: T, max: T) -> Result<(), ConfigError>
where
    T: PartialOrd + ToString,
{
    if value < min || value > max {
        return Err(ConfigError::OutOfRange {
            name,
            value: value.to_string(),
            min: min.to_string(),
            max: max.to_string(),
        });
    }
    Ok(())
}
