//! JSearch API access: transport, rate limiting and the typed client
//!
//! Layering, leaf-first:
//!
//! - [`transport`] - single-attempt HTTP GET/POST returning decoded JSON
//! - [`rate_limit`] - minimum-interval throttle plus retry policies
//! - [`jsearch`] - endpoint bindings and envelope error translation
//! - [`retry_formatter`] - log/console message helpers for retries and failures

pub mod jsearch;
pub mod rate_limit;
pub mod retry_formatter;
pub mod transport;

pub use jsearch::{
    CompanySalaryQuery, JSearchClient, JobDetailsQuery, JobSearchApi, SalaryQuery,
};
pub use rate_limit::{HttpErrorRetry, RateLimiter};
pub use transport::HttpTransport;

/// Errors produced by the API layer
///
/// Variants carrying an HTTP status render as `HTTP {status}: {message}` so the
/// string-matching retry policy can classify them.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    /// Non-success status code from a single request
    #[error("HTTP {status}: {message}")]
    Http {
        /// Status code returned by the server
        status: u16,
        /// Up to 200 characters of the response body
        message: String,
    },

    /// Logical error signalled inside a 200 response (`{"error": ...}`)
    #[error("HTTP 400: {0}")]
    Api(String),

    /// A single entity was expected but the result set was empty
    #[error("HTTP 404: {0}")]
    NotFound(String),

    /// Upstream rate limit still exceeded after retries
    #[error("HTTP 429: {0}")]
    RateLimited(String),

    /// Response body is not valid JSON (or has an unexpected shape)
    #[error("decode error: {0}")]
    Decode(String),

    /// Request did not complete (connect failure, timeout, broken body)
    #[error("connection error: {0}")]
    Network(String),

    /// Request could not be built (bad URL, header or payload)
    #[error("invalid request: {0}")]
    InvalidRequest(String),
}

impl ApiError {
    /// HTTP-equivalent status for this error, if it has one
    pub fn status_code(&self) -> Option<u16> {
        match self {
            Self::Http { status, .. } => Some(*status),
            Self::Api(_) => Some(400),
            Self::NotFound(_) => Some(404),
            Self::RateLimited(_) => Some(429),
            Self::Decode(_) | Self::Network(_) | Self::InvalidRequest(_) => None,
        }
    }

    /// True for any error carrying a 429 status
    pub fn is_rate_limited(&self) -> bool {
        self.status_code() == Some(429)
    }

    /// True for any error carrying a 404 status
    pub fn is_not_found(&self) -> bool {
        self.status_code() == Some(404)
    }
}

/// Result type for API operations
pub type ApiResult<T> = Result<T, ApiError>;
