//! Integration tests for logging and tracing

use tracing::{error, info, warn};
use tracing_subscriber::EnvFilter;

#[test]
fn test_tracing_subscriber_initialization() {
    // try_init: another test may already have installed a subscriber
    let _ = tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("jsearch_scraper=debug")),
        )
        .with_test_writer()
        .try_init();

    info!("info message");
    warn!("warning message");
    error!("error message");
}

#[test]
fn test_tracing_json_format() {
    let _ = tracing_subscriber::fmt()
        .json()
        .with_env_filter(EnvFilter::new("jsearch_scraper=info"))
        .with_test_writer()
        .try_init();

    info!(endpoint = "/jsearch/search", "structured field");
}

#[test]
fn test_env_filter_directives() {
    for directive in [
        "info",
        "jsearch_scraper=debug",
        "jsearch=info,jsearch_scraper=info",
        "jsearch_scraper::api=trace,warn",
    ] {
        assert!(
            directive.parse::<EnvFilter>().is_ok(),
            "directive {directive} should parse"
        );
    }
}
