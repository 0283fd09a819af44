//! # JSearch Scraper Library
//!
//! A client for the JSearch job-search API: job postings, job details,
//! estimated salaries and company salaries, with export to CSV and JSON.
//!
//! ## Features
//!
//! - **Rate Limiting**: A minimum interval between requests, shared by every call of a client
//! - **Retries**: Exponential backoff for transient failures such as timeouts and 5xx responses
//! - **Partial Failures**: Malformed records are logged and skipped instead of failing a batch
//! - **Export**: Timestamped CSV and JSON files, written atomically
//! - **Presets**: Ready-made searches for common tech roles
//!
//! ## Quick Start
//!
//! ```no_run
//! use std::sync::Arc;
//! use jsearch_scraper::{ClientConfig, JSearchClient, JobService, SearchParameters};
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let config = ClientConfig::new("my-api-key");
//! let client = Arc::new(JSearchClient::new(&config)?);
//! let jobs = JobService::new(client);
//!
//! let params = SearchParameters::builder("rust developer", "us")
//!     .date_posted("week")
//!     .build()?;
//!
//! for job in jobs.search_jobs(&params).await? {
//!     println!("{}", job.location());
//! }
//! # Ok(())
//! # }
//! ```
//!
//! ## Architecture
//!
//! - [`api`] - HTTP transport, rate limiter, retry policies and the JSearch client
//! - [`models`] - Search parameters, jobs and salary records
//! - [`validation`] - Record-by-record parsing of API batches
//! - [`services`] - Search, filtering, sorting and salary comparison
//! - [`output`] - CSV and JSON export
//! - [`presets`] - Predefined searches
//! - [`config`] - Client configuration and its ranges

#![warn(missing_docs)]
#![warn(clippy::all)]

/// JSearch API client, transport and retry policies
pub mod api;

/// CLI command implementations
pub mod cli;

/// Client configuration
pub mod config;

/// Prometheus metrics
pub mod metrics;

/// Data models
pub mod models;

/// Export writers
pub mod output;

/// Predefined searches
pub mod presets;

/// Search and salary services
pub mod services;

/// Partial-failure parsing of API records
pub mod validation;

// Re-export commonly used types
pub use api::{ApiError, JSearchClient, JobSearchApi};
pub use config::ClientConfig;
pub use models::{Job, SalaryInfo, SearchParameters, YearsOfExperience};
pub use services::{JobService, SalaryService};
