//! Request throttling and retry policies
//!
//! [`RateLimiter`] enforces a minimum interval between attempt starts and
//! retries failed operations with exponential backoff. [`HttpErrorRetry`] is a
//! separate, coarser policy that retries only errors whose message looks
//! transient, with linear backoff and no throttling.

use std::fmt::Display;
use std::future::Future;
use std::time::Duration;
use tokio::sync::Mutex;
use tokio::time::{sleep, Instant};
use tracing::{debug, error, info, warn};

use super::retry_formatter::RetryContext;
use crate::metrics::{record_rate_limit_wait, record_retry_backoff};

/// Substrings (lower-case) that mark an error as worth retrying
pub const RETRYABLE_MARKERS: [&str; 4] = ["429", "timeout", "connection", "temporary"];

#[derive(Debug, Default)]
struct LimiterState {
    last_request: Option<Instant>,
    request_count: u64,
}

/// Minimum-interval rate limiter with exponential-backoff retries
///
/// State is private to the instance; share it by reference when several
/// callers must respect the same interval.
#[derive(Debug)]
pub struct RateLimiter {
    delay: Duration,
    max_retries: u32,
    retry_delay: Duration,
    state: Mutex<LimiterState>,
}

impl RateLimiter {
    /// Create a rate limiter
    ///
    /// # Arguments
    /// * `delay` - Minimum time between the start of two attempts
    /// * `max_retries` - Total attempts per wrapped call (0 behaves as 1)
    /// * `retry_delay` - Base backoff, doubled after every failed attempt
    pub fn new(delay: Duration, max_retries: u32, retry_delay: Duration) -> Self {
        Self {
            delay,
            max_retries,
            retry_delay,
            state: Mutex::new(LimiterState::default()),
        }
    }

    /// Minimum interval between attempts
    pub fn delay(&self) -> Duration {
        self.delay
    }

    /// Configured attempts per call
    pub fn max_retries(&self) -> u32 {
        self.max_retries
    }

    /// Base backoff
    pub fn retry_delay(&self) -> Duration {
        self.retry_delay
    }

    /// Number of attempts started through [`wait`](Self::wait)
    pub async fn request_count(&self) -> u64 {
        self.state.lock().await.request_count
    }

    /// Block until at least `delay` has passed since the previous attempt start
    ///
    /// The lock is held across the sleep so concurrent callers are serialized.
    pub async fn wait(&self) {
        let mut state = self.state.lock().await;

        if let Some(last) = state.last_request {
            let elapsed = last.elapsed();
            if elapsed < self.delay {
                let pause = self.delay - elapsed;
                debug!("Rate limiting: waiting {:.2}s", pause.as_secs_f64());
                sleep(pause).await;
                record_rate_limit_wait(pause);
            }
        }

        state.last_request = Some(Instant::now());
        state.request_count += 1;
        debug!("Request #{}", state.request_count);
    }

    /// Backoff applied after failed attempt `attempt` (0-based)
    ///
    /// `retry_delay * 2^attempt`, saturating.
    pub fn backoff_delay(&self, attempt: u32) -> Duration {
        self.retry_delay
            .saturating_mul(2u32.saturating_pow(attempt))
    }

    /// Run `operation` with throttling and exponential-backoff retries
    ///
    /// Every attempt first goes through [`wait`](Self::wait). Any error is
    /// retried until `max_retries` attempts were made; the last error is then
    /// returned unchanged.
    pub async fn with_retry<T, E, F, Fut>(&self, mut operation: F) -> Result<T, E>
    where
        F: FnMut() -> Fut,
        Fut: Future<Output = Result<T, E>>,
        E: Display,
    {
        let max_attempts = self.max_retries.max(1);
        let mut attempt: u32 = 0;

        loop {
            self.wait().await;

            match operation().await {
                Ok(value) => {
                    if attempt > 0 {
                        info!("Attempt {}/{} succeeded", attempt + 1, max_attempts);
                    }
                    return Ok(value);
                }
                Err(err) => {
                    if attempt + 1 >= max_attempts {
                        let ctx = RetryContext::new(
                            attempt + 1,
                            max_attempts,
                            Duration::ZERO,
                            err.to_string(),
                        );
                        error!("{}", ctx.format_failure());
                        return Err(err);
                    }

                    let backoff = self.backoff_delay(attempt);
                    let ctx =
                        RetryContext::new(attempt + 1, max_attempts, backoff, err.to_string());
                    warn!("{}", ctx.format_retry());
                    record_retry_backoff(backoff, attempt + 1);

                    sleep(backoff).await;
                    attempt += 1;
                }
            }
        }
    }
}

/// Check whether an error message looks transient
///
/// Case-insensitive match against [`RETRYABLE_MARKERS`].
pub fn is_retryable_message(message: &str) -> bool {
    let lowered = message.to_lowercase();
    RETRYABLE_MARKERS.iter().any(|marker| lowered.contains(marker))
}

/// Retry policy that only retries transient-looking failures
///
/// Independent of [`RateLimiter`]: no throttling, linear backoff
/// `retry_delay * (attempt + 1)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HttpErrorRetry {
    max_retries: u32,
    retry_delay: Duration,
}

impl Default for HttpErrorRetry {
    fn default() -> Self {
        Self::new(3, Duration::from_secs(2))
    }
}

impl HttpErrorRetry {
    /// Create the policy
    pub fn new(max_retries: u32, retry_delay: Duration) -> Self {
        Self {
            max_retries,
            retry_delay,
        }
    }

    /// Configured attempts per call
    pub fn max_retries(&self) -> u32 {
        self.max_retries
    }

    /// Backoff applied after failed attempt `attempt` (0-based)
    pub fn backoff_delay(&self, attempt: u32) -> Duration {
        self.retry_delay.saturating_mul(attempt.saturating_add(1))
    }

    /// Run `operation`, retrying only errors that look transient
    ///
    /// A non-matching error is returned immediately without sleeping.
    pub async fn run<T, E, F, Fut>(&self, mut operation: F) -> Result<T, E>
    where
        F: FnMut() -> Fut,
        Fut: Future<Output = Result<T, E>>,
        E: Display,
    {
        let max_attempts = self.max_retries.max(1);
        let mut attempt: u32 = 0;

        loop {
            match operation().await {
                Ok(value) => return Ok(value),
                Err(err) => {
                    let message = err.to_string();
                    if !is_retryable_message(&message) || attempt + 1 >= max_attempts {
                        return Err(err);
                    }

                    let backoff = self.backoff_delay(attempt);
                    warn!(
                        "Retryable error: {}. Retrying in {:.1}s",
                        message,
                        backoff.as_secs_f64()
                    );
                    record_retry_backoff(backoff, attempt + 1);

                    sleep(backoff).await;
                    attempt += 1;
                }
            }
        }
    }
}
