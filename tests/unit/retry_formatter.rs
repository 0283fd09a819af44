use jsearch_scraper::api::retry_formatter::{format_api_failure, ErrorCategory, RetryContext};
use jsearch_scraper::api::ApiError;
use std::time::Duration;

#[test]
fn test_retry_message_format() {
    let ctx = RetryContext::new(
        2,
        3,
        Duration::from_millis(4000),
        "HTTP 503: unavailable",
    );

    assert_eq!(
        ctx.format_retry(),
        "Attempt 2/3 failed: HTTP 503: unavailable - retrying in 4.0s"
    );
    assert!(ctx.format_failure().contains("after 3 attempts"));
}

#[test]
fn test_failure_summary_for_rate_limit() {
    let summary = format_api_failure(&ApiError::RateLimited("rate limit exceeded".into()));

    let lines: Vec<_> = summary.lines().collect();
    assert_eq!(lines.len(), 3);
    assert_eq!(lines[0], "[FAILED] rate limit exceeded");
    assert!(lines[1].contains("HTTP 429"));
    assert!(lines[2].starts_with("  Suggestion:"));
}

#[test]
fn test_categories_from_errors() {
    assert_eq!(
        ErrorCategory::from_error(&ApiError::Network("request timeout: slow".into())),
        ErrorCategory::NetworkTimeout
    );
    assert_eq!(
        ErrorCategory::from_error(&ApiError::NotFound("job not found".into())),
        ErrorCategory::NotFound
    );
    assert_eq!(
        ErrorCategory::from_error(&ApiError::Http {
            status: 403,
            message: "forbidden".into()
        }),
        ErrorCategory::AuthFailed(403)
    );
}
