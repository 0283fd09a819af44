//! Main entry point for the jsearch CLI

use clap::Parser;
use jsearch_scraper::api::retry_formatter::format_api_failure;
use jsearch_scraper::cli::{Cli, OutputFormat};
use jsearch_scraper::metrics::init_metrics;
use tracing::error;
use tracing_subscriber::EnvFilter;

/// Initialize tracing subscriber with optional JSON formatting
///
/// Logs go to stderr so JSON results on stdout stay parseable.
fn init_tracing() {
    let json_format = std::env::var("LOG_FORMAT")
        .map(|v| v.to_lowercase() == "json")
        .unwrap_or(false);

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("jsearch=info,jsearch_scraper=info"));

    if json_format {
        tracing_subscriber::fmt()
            .json()
            .with_env_filter(filter)
            .with_writer(std::io::stderr)
            .init();
    } else {
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_writer(std::io::stderr)
            .init();
    }
}

async fn run(cli: &Cli) -> anyhow::Result<()> {
    if let Some(addr) = cli.metrics_addr {
        init_metrics(addr)?;
    }

    if let Err(e) = cli.execute().await {
        if cli.format == OutputFormat::Human {
            if let Some(api_error) = e.api_error() {
                eprintln!("{}", format_api_failure(api_error));
            }
        }
        return Err(e.into());
    }

    Ok(())
}

#[tokio::main]
async fn main() {
    // .env is optional; real environment variables take precedence
    dotenvy::dotenv().ok();

    init_tracing();

    let cli = Cli::parse();

    if let Err(e) = run(&cli).await {
        error!("Command failed: {}", e);
        std::process::exit(1);
    }
}
