//! CLI error types and conversions

use crate::api::ApiError;
use crate::config::ConfigError;
use crate::metrics::MetricsError;
use crate::models::ValidationError;
use crate::output::OutputError;
use crate::services::ServiceError;

/// CLI errors
#[derive(Debug, thiserror::Error)]
pub enum CliError {
    /// Configuration error
    #[error("configuration error: {0}")]
    ConfigurationError(#[from] ConfigError),

    /// Invalid search parameters
    #[error("invalid parameters: {0}")]
    ValidationError(#[from] ValidationError),

    /// API client error outside a service call
    #[error("API error: {0}")]
    ApiError(#[from] ApiError),

    /// Service error
    #[error("{0}")]
    ServiceError(#[from] ServiceError),

    /// Export error
    #[error("output error: {0}")]
    OutputError(#[from] OutputError),

    /// Metrics exporter error
    #[error("metrics error: {0}")]
    MetricsError(#[from] MetricsError),

    /// Result serialization error
    #[error("serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    /// Invalid argument
    #[error("invalid argument: {0}")]
    InvalidArgument(String),
}

impl CliError {
    /// API error behind this failure, if there is one
    pub fn api_error(&self) -> Option<&ApiError> {
        match self {
            CliError::ApiError(error) => Some(error),
            CliError::ServiceError(error) => error.api_error(),
            _ => None,
        }
    }
}
