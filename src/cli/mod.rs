//! CLI interface for jsearch

use clap::{Parser, Subcommand, ValueEnum};
use std::net::SocketAddr;
use std::path::PathBuf;
use std::sync::Arc;
use tracing::debug;

use crate::api::jsearch::DEFAULT_API_HOST;
use crate::api::JSearchClient;
use crate::config::{
    ClientConfig, ConfigError, DEFAULT_MAX_RETRIES, DEFAULT_OUTPUT_DIR,
    DEFAULT_RATE_LIMIT_DELAY_SECS, DEFAULT_REQUEST_TIMEOUT_SECS, DEFAULT_RETRY_DELAY_SECS,
};
use crate::output::Exporter;
use crate::services::{JobService, SalaryService};

pub mod details;
pub mod display;
pub mod error;
pub mod salary;
pub mod search;

pub use error::CliError;

/// Result rendering on stdout
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Readable listing
    Human,
    /// Pretty-printed JSON
    Json,
}

/// Main CLI structure
#[derive(Parser, Debug)]
#[command(name = "jsearch")]
#[command(
    about = "Search job postings and salary estimates through the JSearch API",
    long_about = None
)]
#[command(version)]
pub struct Cli {
    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Commands,

    /// API key sent in the x-api-key header
    #[arg(long, global = true, env = "JSEARCH_API_KEY", hide_env_values = true)]
    pub api_key: Option<String>,

    /// API host, optionally with a scheme
    #[arg(long, global = true, env = "JSEARCH_API_HOST", default_value = DEFAULT_API_HOST)]
    pub api_host: String,

    /// Maximum attempts per request (1-10)
    #[arg(
        long,
        global = true,
        env = "JSEARCH_MAX_RETRIES",
        default_value_t = DEFAULT_MAX_RETRIES,
        value_parser = clap::value_parser!(u32).range(1..=10)
    )]
    pub max_retries: u32,

    /// Base retry backoff in seconds (1-10)
    #[arg(
        long,
        global = true,
        env = "JSEARCH_RETRY_DELAY",
        default_value_t = DEFAULT_RETRY_DELAY_SECS,
        value_parser = clap::value_parser!(u64).range(1..=10)
    )]
    pub retry_delay: u64,

    /// Request timeout in seconds (10-120)
    #[arg(
        long,
        global = true,
        env = "JSEARCH_REQUEST_TIMEOUT",
        default_value_t = DEFAULT_REQUEST_TIMEOUT_SECS,
        value_parser = clap::value_parser!(u64).range(10..=120)
    )]
    pub request_timeout: u64,

    /// Minimum seconds between requests (0.1-5.0)
    #[arg(
        long,
        global = true,
        env = "JSEARCH_RATE_LIMIT_DELAY",
        default_value_t = DEFAULT_RATE_LIMIT_DELAY_SECS
    )]
    pub rate_limit_delay: f64,

    /// Directory for exported files
    #[arg(long, global = true, env = "JSEARCH_OUTPUT_DIR", default_value = DEFAULT_OUTPUT_DIR)]
    pub output_dir: PathBuf,

    /// Output format for results
    #[arg(long, global = true, value_enum, default_value = "human")]
    pub format: OutputFormat,

    /// Serve Prometheus metrics on this address
    #[arg(long, global = true, env = "JSEARCH_METRICS_ADDR")]
    pub metrics_addr: Option<SocketAddr>,
}

/// Available commands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Search job postings
    Search(search::SearchArgs),
    /// Run or list predefined searches
    Preset(search::PresetArgs),
    /// Show one job posting
    Details(details::DetailsArgs),
    /// Estimated salary for a title in a location
    Salary(salary::SalaryArgs),
    /// Salary for a title at a company
    CompanySalary(salary::CompanySalaryArgs),
    /// Compare a title's salary across locations
    Compare(salary::CompareArgs),
}

/// Services and exporter shared by the command handlers
pub struct AppContext {
    /// Job search service
    pub jobs: JobService<JSearchClient>,
    /// Salary service
    pub salaries: SalaryService<JSearchClient>,
    /// Export writer
    pub exporter: Exporter,
    /// Result rendering
    pub format: OutputFormat,
}

impl Cli {
    /// Client configuration from the global flags
    pub fn client_config(&self) -> Result<ClientConfig, CliError> {
        let api_key = self
            .api_key
            .clone()
            .ok_or(CliError::ConfigurationError(ConfigError::MissingApiKey))?;

        let config = ClientConfig {
            api_key,
            api_host: self.api_host.clone(),
            max_retries: self.max_retries,
            retry_delay_secs: self.retry_delay,
            request_timeout_secs: self.request_timeout,
            rate_limit_delay_secs: self.rate_limit_delay,
            output_dir: self.output_dir.clone(),
        };
        config.validate()?;

        Ok(config)
    }

    /// Build the client, services and exporter
    pub fn context(&self) -> Result<AppContext, CliError> {
        let config = self.client_config()?;
        debug!(
            "Using API host {} (retries: {}, delay: {}s)",
            config.api_host, config.max_retries, config.rate_limit_delay_secs
        );

        let client = Arc::new(JSearchClient::new(&config)?);
        Ok(AppContext {
            jobs: JobService::new(Arc::clone(&client)),
            salaries: SalaryService::new(client),
            exporter: Exporter::new(&config.output_dir),
            format: self.format,
        })
    }

    /// Dispatch to the selected subcommand
    pub async fn execute(&self) -> Result<(), CliError> {
        match &self.command {
            Commands::Search(args) => args.execute(self).await,
            Commands::Preset(args) => args.execute(self).await,
            Commands::Details(args) => args.execute(self).await,
            Commands::Salary(args) => args.execute(self).await,
            Commands::CompanySalary(args) => args.execute(self).await,
            Commands::Compare(args) => args.execute(self).await,
        }
    }
}
