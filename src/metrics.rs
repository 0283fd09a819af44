//! Observability metrics for JSearch API traffic
//!
//! Request counts by endpoint and status, 429 responses, retry backoffs and
//! time spent in the rate limiter. All macros are no-ops until a recorder is
//! installed, so library users and tests pay nothing unless `init_metrics`
//! has been called.

use metrics::{counter, describe_counter, describe_histogram, histogram, Unit};
use metrics_exporter_prometheus::PrometheusBuilder;
use once_cell::sync::OnceCell;
use std::net::SocketAddr;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::{Duration, Instant};
use tracing::{debug, info, warn};

/// Address of the installed Prometheus listener, set once
static METRICS_ADDR: OnceCell<SocketAddr> = OnceCell::new();

static CORRELATION_COUNTER: AtomicU64 = AtomicU64::new(0);

/// Errors raised while installing the exporter
#[derive(Debug, thiserror::Error)]
pub enum MetricsError {
    /// Exporter could not be installed (port in use, recorder already set)
    #[error("failed to install Prometheus exporter on {addr}: {message}")]
    Install {
        /// Requested listener address
        addr: SocketAddr,
        /// Underlying error
        message: String,
    },
}

/// Install the Prometheus exporter and describe every metric
///
/// Must run inside a tokio runtime. Calling it again is a no-op.
///
/// # Arguments
/// * `addr` - Socket address of the scrape endpoint (e.g., "127.0.0.1:9090")
pub fn init_metrics(addr: SocketAddr) -> Result<(), MetricsError> {
    if let Some(existing) = METRICS_ADDR.get() {
        debug!("Metrics already initialized on {}, skipping", existing);
        return Ok(());
    }

    info!("Initializing metrics system on {}", addr);

    PrometheusBuilder::new()
        .with_http_listener(addr)
        .install()
        .map_err(|e| MetricsError::Install {
            addr,
            message: e.to_string(),
        })?;

    describe_counter!(
        "jsearch_requests_total",
        Unit::Count,
        "Total number of HTTP requests sent to the JSearch API"
    );
    describe_counter!(
        "jsearch_429_responses_total",
        Unit::Count,
        "Total number of 429 rate limit responses received"
    );
    describe_counter!(
        "jsearch_retries_total",
        Unit::Count,
        "Total number of retry attempts"
    );
    describe_histogram!(
        "jsearch_request_duration_seconds",
        Unit::Seconds,
        "HTTP request duration in seconds"
    );
    describe_histogram!(
        "jsearch_retry_backoff_seconds",
        Unit::Seconds,
        "Backoff slept before a retry"
    );
    describe_histogram!(
        "jsearch_rate_limit_wait_seconds",
        Unit::Seconds,
        "Time spent throttled by the rate limiter"
    );

    let _ = METRICS_ADDR.set(addr);
    Ok(())
}

/// Whether `init_metrics` has completed
pub fn is_initialized() -> bool {
    METRICS_ADDR.get().is_some()
}

/// Next correlation ID for request tracing
pub fn generate_correlation_id() -> String {
    let id = CORRELATION_COUNTER.fetch_add(1, Ordering::Relaxed) + 1;
    format!("req-{id:08x}")
}

/// Timing and outcome of one HTTP exchange
pub struct HttpRequestMetrics {
    endpoint: String,
    start_time: Instant,
    correlation_id: String,
}

impl HttpRequestMetrics {
    /// Start recording a request to `endpoint`
    pub fn start(endpoint: impl Into<String>) -> Self {
        let endpoint = endpoint.into();
        let correlation_id = generate_correlation_id();

        debug!(
            correlation_id = %correlation_id,
            endpoint = %endpoint,
            "Starting HTTP request"
        );

        Self {
            endpoint,
            start_time: Instant::now(),
            correlation_id,
        }
    }

    /// Record a response with `status_code`
    pub fn record_complete(&self, status_code: u16) {
        let duration = self.start_time.elapsed();

        counter!(
            "jsearch_requests_total",
            "endpoint" => self.endpoint.clone(),
            "status" => status_code.to_string(),
        )
        .increment(1);

        histogram!(
            "jsearch_request_duration_seconds",
            "endpoint" => self.endpoint.clone(),
        )
        .record(duration.as_secs_f64());

        if status_code == 429 {
            counter!(
                "jsearch_429_responses_total",
                "endpoint" => self.endpoint.clone(),
            )
            .increment(1);

            warn!(
                correlation_id = %self.correlation_id,
                endpoint = %self.endpoint,
                duration_ms = duration.as_millis(),
                "Rate limit response (429) received"
            );
        }

        debug!(
            correlation_id = %self.correlation_id,
            endpoint = %self.endpoint,
            status = status_code,
            duration_ms = duration.as_millis(),
            "HTTP request completed"
        );
    }

    /// Record a request that never produced a status code
    pub fn record_network_error(&self) {
        let duration = self.start_time.elapsed();

        counter!(
            "jsearch_requests_total",
            "endpoint" => self.endpoint.clone(),
            "status" => "network_error",
        )
        .increment(1);

        warn!(
            correlation_id = %self.correlation_id,
            endpoint = %self.endpoint,
            duration_ms = duration.as_millis(),
            "Network error recorded"
        );
    }

    /// Correlation ID of this request
    pub fn correlation_id(&self) -> &str {
        &self.correlation_id
    }
}

/// Record a retry and the backoff slept before it
pub fn record_retry_backoff(duration: Duration, attempt: u32) {
    counter!(
        "jsearch_retries_total",
        "attempt" => attempt.to_string(),
    )
    .increment(1);

    histogram!("jsearch_retry_backoff_seconds").record(duration.as_secs_f64());

    debug!(
        attempt = attempt,
        backoff_ms = duration.as_millis(),
        "Retry backoff recorded"
    );
}

/// Record time spent throttled before an attempt
pub fn record_rate_limit_wait(duration: Duration) {
    histogram!("jsearch_rate_limit_wait_seconds").record(duration.as_secs_f64());
}
