//! Job and salary services
//!
//! Services sit between the CLI and the API client: they call a
//! [`JobSearchApi`](crate::api::JobSearchApi), turn raw records into typed
//! models with partial-failure parsing, and provide filtering, sorting and
//! comparison helpers.

pub mod job_service;
pub mod salary_service;

pub use job_service::JobService;
pub use salary_service::{LocationComparison, SalaryService};

use crate::api::ApiError;
use crate::validation::RecordError;

/// Service errors
#[derive(Debug, thiserror::Error)]
pub enum ServiceError {
    /// The API call failed
    #[error(transparent)]
    Api(#[from] ApiError),

    /// A single expected record did not validate
    #[error("invalid job data: {0}")]
    InvalidRecord(#[from] RecordError),
}

impl ServiceError {
    /// Underlying API error, if any
    pub fn api_error(&self) -> Option<&ApiError> {
        match self {
            ServiceError::Api(error) => Some(error),
            ServiceError::InvalidRecord(_) => None,
        }
    }
}

/// Result type for service operations
pub type ServiceResult<T> = Result<T, ServiceError>;
