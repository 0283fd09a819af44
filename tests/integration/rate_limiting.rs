//! Integration tests for request throttling and exponential backoff

use jsearch_scraper::api::RateLimiter;
use std::sync::atomic::{AtomicU32, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;
use tokio::time::Instant;

#[tokio::test(start_paused = true)]
async fn test_consecutive_waits_are_spaced() {
    let limiter = RateLimiter::new(Duration::from_secs(1), 3, Duration::from_secs(2));
    let start = Instant::now();

    limiter.wait().await;
    assert!(start.elapsed() < Duration::from_millis(10));

    limiter.wait().await;
    assert!(start.elapsed() >= Duration::from_secs(1));

    limiter.wait().await;
    assert!(start.elapsed() >= Duration::from_secs(2));

    assert_eq!(limiter.request_count().await, 3);
}

#[tokio::test(start_paused = true)]
async fn test_no_wait_after_interval_elapsed() {
    let limiter = RateLimiter::new(Duration::from_secs(1), 3, Duration::from_secs(2));

    limiter.wait().await;
    tokio::time::sleep(Duration::from_secs(5)).await;

    let start = Instant::now();
    limiter.wait().await;
    assert!(start.elapsed() < Duration::from_millis(10));
}

#[tokio::test(start_paused = true)]
async fn test_concurrent_callers_serialized() {
    let limiter = Arc::new(RateLimiter::new(
        Duration::from_secs(1),
        1,
        Duration::from_secs(1),
    ));
    let start = Instant::now();

    let a = tokio::spawn({
        let limiter = Arc::clone(&limiter);
        async move { limiter.wait().await }
    });
    let b = tokio::spawn({
        let limiter = Arc::clone(&limiter);
        async move { limiter.wait().await }
    });
    a.await.unwrap();
    b.await.unwrap();

    assert!(start.elapsed() >= Duration::from_secs(1));
    assert_eq!(limiter.request_count().await, 2);
}

#[tokio::test(start_paused = true)]
async fn test_with_retry_exponential_backoff() {
    let limiter = RateLimiter::new(Duration::from_secs(1), 3, Duration::from_secs(2));
    let counter = AtomicU32::new(0);
    let calls = &counter;
    let start = Instant::now();

    let result: Result<u32, String> = limiter
        .with_retry(move || async move {
            let n = calls.fetch_add(1, Ordering::SeqCst) + 1;
            if n < 3 {
                Err(format!("timeout #{n}"))
            } else {
                Ok(n)
            }
        })
        .await;

    assert_eq!(result.unwrap(), 3);
    // 2s after the first failure, 4s after the second
    assert!(start.elapsed() >= Duration::from_secs(6));
    assert_eq!(limiter.request_count().await, 3);
}

#[tokio::test(start_paused = true)]
async fn test_with_retry_returns_last_error() {
    let limiter = RateLimiter::new(Duration::ZERO, 3, Duration::from_millis(10));
    let counter = AtomicU32::new(0);
    let calls = &counter;

    let result: Result<(), String> = limiter
        .with_retry(move || async move {
            let n = calls.fetch_add(1, Ordering::SeqCst) + 1;
            Err(format!("failure {n}"))
        })
        .await;

    assert_eq!(result.unwrap_err(), "failure 3");
    assert_eq!(counter.load(Ordering::SeqCst), 3);
}

#[tokio::test(start_paused = true)]
async fn test_with_retry_success_is_single_attempt() {
    let limiter = RateLimiter::new(Duration::from_secs(1), 5, Duration::from_secs(1));
    let start = Instant::now();

    let result: Result<&str, String> = limiter.with_retry(|| async { Ok("done") }).await;

    assert_eq!(result.unwrap(), "done");
    assert_eq!(limiter.request_count().await, 1);
    assert!(start.elapsed() < Duration::from_millis(10));
}

/// Offsets from `start` at which an always-failing operation was invoked
async fn failing_attempt_offsets(limiter: &RateLimiter) -> Vec<Duration> {
    let starts = Mutex::new(Vec::new());
    let log = &starts;
    let start = Instant::now();

    let result: Result<(), String> = limiter
        .with_retry(move || async move {
            log.lock().unwrap().push(Instant::now());
            Err("timeout".to_string())
        })
        .await;
    assert!(result.is_err());

    let starts = starts.into_inner().unwrap();
    starts.iter().map(|t| t.duration_since(start)).collect()
}

#[tokio::test(start_paused = true)]
async fn test_with_retry_attempt_schedule_doubles() {
    let limiter = RateLimiter::new(Duration::from_millis(100), 4, Duration::from_secs(1));

    let offsets = failing_attempt_offsets(&limiter).await;

    let secs = |s| Duration::from_secs(s);
    assert_eq!(offsets, vec![secs(0), secs(1), secs(3), secs(7)]);
}

#[tokio::test(start_paused = true)]
async fn test_with_retry_schedule_stretched_by_rate_limit() {
    // Each backoff is shorter than the request interval, so the limiter decides
    let limiter = RateLimiter::new(Duration::from_secs(3), 3, Duration::from_secs(1));

    let offsets = failing_attempt_offsets(&limiter).await;

    let secs = |s| Duration::from_secs(s);
    assert_eq!(offsets, vec![secs(0), secs(3), secs(6)]);
}
