//! Retry message formatting and error classification for user-facing output.
//!
//! [`RetryContext`] produces the log lines emitted by the retry policies, and
//! [`ErrorCategory`] turns an [`ApiError`] into a short description plus an
//! actionable suggestion for the CLI.

use std::time::Duration;

use super::ApiError;

/// Classification of API failures for user messaging.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    /// Request timed out
    NetworkTimeout,
    /// Connection refused, DNS failure or other offline scenarios
    NetworkOffline,
    /// HTTP 429 rate limit exceeded
    RateLimit,
    /// HTTP 5xx server error
    ServerError(u16),
    /// Logical error reported by the API (HTTP 400 equivalent)
    InvalidRequest,
    /// Authentication failures (401/403)
    AuthFailed(u16),
    /// Requested job does not exist
    NotFound,
    /// Other client errors (4xx)
    ClientError(u16),
    /// Body could not be decoded
    MalformedResponse,
}

impl ErrorCategory {
    /// Classify an API error
    pub fn from_error(error: &ApiError) -> Self {
        match error {
            ApiError::Network(message) if message.starts_with("request timeout") => {
                Self::NetworkTimeout
            }
            ApiError::Network(_) => Self::NetworkOffline,
            ApiError::Decode(_) => Self::MalformedResponse,
            ApiError::InvalidRequest(_) => Self::InvalidRequest,
            other => match other.status_code() {
                Some(400) => Self::InvalidRequest,
                Some(code @ (401 | 403)) => Self::AuthFailed(code),
                Some(404) => Self::NotFound,
                Some(429) => Self::RateLimit,
                Some(code) if code >= 500 => Self::ServerError(code),
                Some(code) => Self::ClientError(code),
                None => Self::MalformedResponse,
            },
        }
    }

    /// User-friendly description
    pub fn description(&self) -> &'static str {
        match self {
            Self::NetworkTimeout => "network timeout",
            Self::NetworkOffline => "connection failed",
            Self::RateLimit => "rate limit exceeded",
            Self::ServerError(code) => match code {
                500 => "internal server error",
                502 => "bad gateway",
                503 => "service unavailable",
                504 => "gateway timeout",
                _ => "server error",
            },
            Self::InvalidRequest => "invalid request",
            Self::AuthFailed(_) => "authentication failed",
            Self::NotFound => "job not found",
            Self::ClientError(_) => "client error",
            Self::MalformedResponse => "malformed response",
        }
    }

    /// Suggested remediation
    pub fn suggestion(&self) -> &'static str {
        match self {
            Self::NetworkTimeout => "Increase --request-timeout or check your network connection",
            Self::NetworkOffline => "Verify internet connectivity and the --api-host value",
            Self::RateLimit => "Wait a moment or raise --rate-limit-delay before retrying",
            Self::ServerError(_) => "The API may be experiencing issues, try again later",
            Self::InvalidRequest => "Check the search parameters for typos",
            Self::AuthFailed(_) => "Verify JSEARCH_API_KEY and your subscription",
            Self::NotFound => "Check the job ID; postings expire quickly",
            Self::ClientError(_) => "Review the request parameters",
            Self::MalformedResponse => "Retry later; the API returned an unexpected body",
        }
    }
}

/// Context for formatting retry log lines.
#[derive(Debug, Clone)]
pub struct RetryContext {
    /// Attempt that just failed (1-based)
    pub attempt: u32,
    /// Maximum number of attempts configured
    pub max_attempts: u32,
    /// Backoff before the next attempt
    pub backoff: Duration,
    /// Display string of the failure
    pub error_message: String,
}

impl RetryContext {
    /// Build a context from the failed attempt
    pub fn new(
        attempt: u32,
        max_attempts: u32,
        backoff: Duration,
        error_message: impl Into<String>,
    ) -> Self {
        Self {
            attempt,
            max_attempts,
            backoff,
            error_message: error_message.into(),
        }
    }

    /// Message logged before sleeping for the next attempt
    pub fn format_retry(&self) -> String {
        format!(
            "Attempt {}/{} failed: {} - retrying in {:.1}s",
            self.attempt,
            self.max_attempts,
            self.error_message,
            self.backoff.as_secs_f64()
        )
    }

    /// Message logged when every attempt failed
    pub fn format_failure(&self) -> String {
        format!(
            "Max retries reached after {} attempts, last error: {}",
            self.max_attempts, self.error_message
        )
    }
}

/// Multi-line failure summary for the CLI
pub fn format_api_failure(error: &ApiError) -> String {
    let category = ErrorCategory::from_error(error);
    let mut lines = vec![format!("[FAILED] {}", category.description())];
    lines.push(format!("  Error: {error}"));
    lines.push(format!("  Suggestion: {}", category.suggestion()));
    lines.join("\n")
}
