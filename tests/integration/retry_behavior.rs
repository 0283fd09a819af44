//! Integration tests for the message-based retry policy

use jsearch_scraper::api::{ApiError, HttpErrorRetry};
use std::sync::atomic::{AtomicU32, Ordering};
use std::sync::Mutex;
use std::time::Duration;
use tokio::time::Instant;

#[tokio::test(start_paused = true)]
async fn test_transient_errors_retried_with_linear_backoff() {
    let policy = HttpErrorRetry::new(3, Duration::from_secs(1));
    let counter = AtomicU32::new(0);
    let calls = &counter;
    let start = Instant::now();

    let result: Result<(), ApiError> = policy
        .run(move || async move {
            calls.fetch_add(1, Ordering::SeqCst);
            Err(ApiError::Network("connection reset by peer".into()))
        })
        .await;

    assert!(matches!(result, Err(ApiError::Network(_))));
    assert_eq!(counter.load(Ordering::SeqCst), 3);
    // 1s then 2s
    assert!(start.elapsed() >= Duration::from_secs(3));
}

#[tokio::test(start_paused = true)]
async fn test_attempt_schedule_grows_linearly() {
    let policy = HttpErrorRetry::new(4, Duration::from_secs(1));
    let starts = Mutex::new(Vec::new());
    let log = &starts;
    let start = Instant::now();

    let result: Result<(), ApiError> = policy
        .run(move || async move {
            log.lock().unwrap().push(Instant::now());
            Err(ApiError::Network("request timeout".into()))
        })
        .await;
    assert!(result.is_err());

    let offsets: Vec<_> = starts
        .into_inner()
        .unwrap()
        .iter()
        .map(|t| t.duration_since(start))
        .collect();
    let secs = |s| Duration::from_secs(s);
    assert_eq!(offsets, vec![secs(0), secs(1), secs(3), secs(6)]);
}

#[tokio::test(start_paused = true)]
async fn test_rate_limit_status_is_retryable() {
    let policy = HttpErrorRetry::new(2, Duration::from_secs(1));
    let counter = AtomicU32::new(0);
    let calls = &counter;

    let result: Result<u32, ApiError> = policy
        .run(move || async move {
            if calls.fetch_add(1, Ordering::SeqCst) == 0 {
                Err(ApiError::Http {
                    status: 429,
                    message: "slow down".into(),
                })
            } else {
                Ok(7)
            }
        })
        .await;

    assert_eq!(result.unwrap(), 7);
    assert_eq!(counter.load(Ordering::SeqCst), 2);
}

#[tokio::test(start_paused = true)]
async fn test_permanent_error_not_retried() {
    let policy = HttpErrorRetry::default();
    let counter = AtomicU32::new(0);
    let calls = &counter;
    let start = Instant::now();

    let result: Result<(), ApiError> = policy
        .run(move || async move {
            calls.fetch_add(1, Ordering::SeqCst);
            Err(ApiError::Api("invalid job id".into()))
        })
        .await;

    assert!(result.is_err());
    assert_eq!(counter.load(Ordering::SeqCst), 1);
    assert!(start.elapsed() < Duration::from_millis(10));
}

#[test]
fn test_default_policy() {
    let policy = HttpErrorRetry::default();
    assert_eq!(policy.max_retries(), 3);
    assert_eq!(policy.backoff_delay(0), Duration::from_secs(2));
    assert_eq!(policy.backoff_delay(2), Duration::from_secs(6));
}
