//! JSearch endpoint bindings
//!
//! [`JSearchClient`] owns one [`HttpTransport`] and one [`RateLimiter`]. Every
//! call goes through [`RateLimiter::with_retry`], and the response envelope is
//! inspected inside the retried operation, so logical errors are retried too.

use async_trait::async_trait;
use serde_json::Value;
use std::time::Duration;
use tracing::{error, info};

use super::rate_limit::RateLimiter;
use super::transport::HttpTransport;
use super::{ApiError, ApiResult};
use crate::config::ClientConfig;
use crate::models::{LocationType, SearchParameters, YearsOfExperience};

/// Default API host
pub const DEFAULT_API_HOST: &str = "api.openwebninja.com";

/// Job search endpoint
pub const SEARCH_ENDPOINT: &str = "/jsearch/search";
/// Job details endpoint
pub const JOB_DETAILS_ENDPOINT: &str = "/jsearch/job-details";
/// Estimated salary endpoint
pub const ESTIMATED_SALARY_ENDPOINT: &str = "/jsearch/estimated-salary";
/// Company salary endpoint
pub const COMPANY_SALARY_ENDPOINT: &str = "/jsearch/company-job-salary";

const RATE_LIMIT_MESSAGE: &str = "rate limit exceeded, try again later";

/// Raw JSearch operations returning undecoded records
///
/// The services depend on this trait rather than on [`JSearchClient`].
#[async_trait]
pub trait JobSearchApi: Send + Sync {
    /// Search job postings
    async fn search_jobs(&self, params: &SearchParameters) -> ApiResult<Vec<Value>>;

    /// Fetch a single posting
    ///
    /// # Errors
    /// [`ApiError::NotFound`] when the API returns no record for the ID
    async fn job_details(&self, query: &JobDetailsQuery) -> ApiResult<Value>;

    /// Salary estimates for a title in a location
    async fn estimated_salary(&self, query: &SalaryQuery) -> ApiResult<Vec<Value>>;

    /// Salary estimates for a title at one company
    async fn company_salary(&self, query: &CompanySalaryQuery) -> ApiResult<Vec<Value>>;
}

/// Parameters for the job details endpoint
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct JobDetailsQuery {
    /// Posting ID
    pub job_id: String,
    /// Country code, defaults to "us"
    pub country: String,
    /// Result language
    pub language: Option<String>,
    /// Comma-separated fields to return
    pub fields: Option<String>,
}

impl JobDetailsQuery {
    /// Query for `job_id` in the US
    pub fn new(job_id: impl Into<String>) -> Self {
        Self {
            job_id: job_id.into(),
            country: "us".to_string(),
            language: None,
            fields: None,
        }
    }

    /// Override the country
    pub fn country(mut self, country: impl Into<String>) -> Self {
        self.country = country.into();
        self
    }

    /// Query parameters; absent options are omitted
    pub fn to_api_params(&self) -> Vec<(&'static str, String)> {
        let mut params = vec![
            ("job_id", self.job_id.clone()),
            ("country", self.country.clone()),
        ];
        push_optional(&mut params, "language", &self.language);
        push_optional(&mut params, "fields", &self.fields);
        params
    }
}

/// Parameters for the estimated salary endpoint
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SalaryQuery {
    /// Job title
    pub job_title: String,
    /// Free-text location
    pub location: String,
    /// How to interpret `location`
    pub location_type: LocationType,
    /// Experience bucket
    pub years_of_experience: YearsOfExperience,
    /// Comma-separated fields to return
    pub fields: Option<String>,
}

impl SalaryQuery {
    /// Query with ANY location type and ALL experience
    pub fn new(job_title: impl Into<String>, location: impl Into<String>) -> Self {
        Self {
            job_title: job_title.into(),
            location: location.into(),
            location_type: LocationType::default(),
            years_of_experience: YearsOfExperience::default(),
            fields: None,
        }
    }

    /// Set the experience bucket
    pub fn experience(mut self, years: YearsOfExperience) -> Self {
        self.years_of_experience = years;
        self
    }

    /// Query parameters; absent options are omitted
    pub fn to_api_params(&self) -> Vec<(&'static str, String)> {
        let mut params = vec![
            ("job_title", self.job_title.clone()),
            ("location", self.location.clone()),
            ("location_type", self.location_type.to_string()),
            ("years_of_experience", self.years_of_experience.to_string()),
        ];
        push_optional(&mut params, "fields", &self.fields);
        params
    }
}

/// Parameters for the company salary endpoint
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompanySalaryQuery {
    /// Company name
    pub company: String,
    /// Job title
    pub job_title: String,
    /// Optional location filter
    pub location: Option<String>,
    /// How to interpret `location`
    pub location_type: LocationType,
    /// Experience bucket
    pub years_of_experience: YearsOfExperience,
}

impl CompanySalaryQuery {
    /// Query with no location, ANY location type and ALL experience
    pub fn new(company: impl Into<String>, job_title: impl Into<String>) -> Self {
        Self {
            company: company.into(),
            job_title: job_title.into(),
            location: None,
            location_type: LocationType::default(),
            years_of_experience: YearsOfExperience::default(),
        }
    }

    /// Restrict to a location
    pub fn location(mut self, location: impl Into<String>) -> Self {
        self.location = Some(location.into());
        self
    }

    /// Set the experience bucket
    pub fn experience(mut self, years: YearsOfExperience) -> Self {
        self.years_of_experience = years;
        self
    }

    /// Query parameters; absent options are omitted
    pub fn to_api_params(&self) -> Vec<(&'static str, String)> {
        let mut params = vec![
            ("company", self.company.clone()),
            ("job_title", self.job_title.clone()),
            ("location_type", self.location_type.to_string()),
            ("years_of_experience", self.years_of_experience.to_string()),
        ];
        push_optional(&mut params, "location", &self.location);
        params
    }
}

fn push_optional(
    params: &mut Vec<(&'static str, String)>,
    name: &'static str,
    value: &Option<String>,
) {
    if let Some(value) = value.as_ref().filter(|v| !v.is_empty()) {
        params.push((name, value.clone()));
    }
}

/// JSearch API client
pub struct JSearchClient {
    transport: HttpTransport,
    rate_limiter: RateLimiter,
}

impl JSearchClient {
    /// Build a client from validated configuration
    pub fn new(config: &ClientConfig) -> ApiResult<Self> {
        let transport = HttpTransport::with_api_key(
            config.base_url(),
            &config.api_key,
            config.request_timeout(),
        )?;
        info!("JSearchClient initialized for {}", config.api_host);
        Ok(Self::from_parts(transport, config.rate_limiter()))
    }

    /// Build a client against an explicit base URL (mock servers, proxies)
    pub fn with_base_url(
        base_url: impl Into<String>,
        api_key: &str,
        timeout: Duration,
        rate_limiter: RateLimiter,
    ) -> ApiResult<Self> {
        let transport = HttpTransport::with_api_key(base_url, api_key, timeout)?;
        Ok(Self::from_parts(transport, rate_limiter))
    }

    /// Assemble a client from an existing transport and limiter
    pub fn from_parts(transport: HttpTransport, rate_limiter: RateLimiter) -> Self {
        Self {
            transport,
            rate_limiter,
        }
    }

    /// Rate limiter used by this client
    pub fn rate_limiter(&self) -> &RateLimiter {
        &self.rate_limiter
    }

    /// GET `endpoint` under the retry policy and return its `data` records
    async fn fetch_records(
        &self,
        endpoint: &'static str,
        params: &[(&'static str, String)],
    ) -> ApiResult<Vec<Value>> {
        let transport = &self.transport;
        self.rate_limiter
            .with_retry(move || async move {
                let body = transport.get(endpoint, params).await?;
                extract_data(body)
            })
            .await
    }
}

#[async_trait]
impl JobSearchApi for JSearchClient {
    async fn search_jobs(&self, params: &SearchParameters) -> ApiResult<Vec<Value>> {
        info!("Searching jobs: {} in {}", params.query(), params.country());

        let jobs = self
            .fetch_records(SEARCH_ENDPOINT, &params.to_api_params())
            .await
            .map_err(clarify_rate_limit)?;

        info!("Found {} jobs", jobs.len());
        Ok(jobs)
    }

    async fn job_details(&self, query: &JobDetailsQuery) -> ApiResult<Value> {
        info!("Fetching job details: {}", query.job_id);

        let api_params = query.to_api_params();
        let params = api_params.as_slice();
        let transport = &self.transport;

        self.rate_limiter
            .with_retry(move || async move {
                let body = transport.get(JOB_DETAILS_ENDPOINT, params).await?;
                let mut data = extract_data(body)?;
                if data.is_empty() {
                    return Err(ApiError::NotFound("job not found".to_string()));
                }
                Ok(data.swap_remove(0))
            })
            .await
            .map_err(clarify_rate_limit)
    }

    async fn estimated_salary(&self, query: &SalaryQuery) -> ApiResult<Vec<Value>> {
        info!(
            "Fetching salary estimate: {} in {}",
            query.job_title, query.location
        );

        self.fetch_records(ESTIMATED_SALARY_ENDPOINT, &query.to_api_params())
            .await
            .map_err(clarify_rate_limit)
    }

    async fn company_salary(&self, query: &CompanySalaryQuery) -> ApiResult<Vec<Value>> {
        info!(
            "Fetching company salaries: {} for {}",
            query.company, query.job_title
        );

        self.fetch_records(COMPANY_SALARY_ENDPOINT, &query.to_api_params())
            .await
            .map_err(clarify_rate_limit)
    }
}

/// Unwrap the `{"data": [...]}` envelope
///
/// - `"error"` key: [`ApiError::Api`] carrying the error value
/// - missing or null `data`: empty list
/// - non-array `data`: [`ApiError::Decode`]
pub fn extract_data(body: Value) -> ApiResult<Vec<Value>> {
    let Value::Object(mut envelope) = body else {
        return Err(ApiError::Decode("response body is not a JSON object".to_string()));
    };

    if let Some(error) = envelope.get("error") {
        let message = match error {
            Value::String(message) => message.clone(),
            other => other.to_string(),
        };
        return Err(ApiError::Api(message));
    }

    match envelope.remove("data") {
        None | Some(Value::Null) => Ok(Vec::new()),
        Some(Value::Array(records)) => Ok(records),
        Some(_) => Err(ApiError::Decode("'data' is not an array".to_string())),
    }
}

/// Replace any 429 leaving the retry loop with a user-facing message
fn clarify_rate_limit(error: ApiError) -> ApiError {
    if error.is_rate_limited() {
        error!("Rate limit exceeded");
        ApiError::RateLimited(RATE_LIMIT_MESSAGE.to_string())
    } else {
        error
    }
}
