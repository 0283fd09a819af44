//! Job search, details and in-memory filtering

use std::cmp::Ordering;
use std::sync::Arc;
use tracing::{debug, error, info};

use super::ServiceResult;
use crate::api::{JobDetailsQuery, JobSearchApi};
use crate::models::{Job, SearchParameters};
use crate::validation::{parse_job_batch, parse_record};

/// Job search service
pub struct JobService<A: JobSearchApi + ?Sized> {
    api: Arc<A>,
}

impl<A: JobSearchApi + ?Sized> JobService<A> {
    /// Create a service over `api`
    pub fn new(api: Arc<A>) -> Self {
        debug!("JobService initialized");
        Self { api }
    }

    /// Search and parse jobs; malformed records are logged and skipped
    pub async fn search_jobs(&self, params: &SearchParameters) -> ServiceResult<Vec<Job>> {
        info!(
            "Searching for jobs: '{}' in {}",
            params.query(),
            params.country()
        );

        let raw = self.api.search_jobs(params).await.map_err(|e| {
            error!("Search error: {}", e);
            e
        })?;

        let outcome = parse_job_batch(&raw);
        outcome.log_failures("job");
        info!("Parsed {} jobs from {} results", outcome.parsed.len(), raw.len());

        Ok(outcome.parsed)
    }

    /// Fetch and parse a single job
    ///
    /// A record that fails validation is an error here, not a skip.
    pub async fn job_details(&self, job_id: &str, country: &str) -> ServiceResult<Job> {
        info!("Getting job details: {}", job_id);

        let query = JobDetailsQuery::new(job_id).country(country);
        let raw = self.api.job_details(&query).await.map_err(|e| {
            error!("Error getting details: {}", e);
            e
        })?;

        let job: Job = parse_record(&raw).map_err(|e| {
            error!("Error parsing job details: {}", e);
            e
        })?;

        info!(
            "Details obtained: {}",
            job.title.as_deref().unwrap_or("untitled")
        );
        Ok(job)
    }

    /// Remote jobs only
    pub fn filter_remote(&self, jobs: &[Job]) -> Vec<Job> {
        let remote: Vec<Job> = jobs.iter().filter(|job| job.is_remote).cloned().collect();
        debug!("Filtered {} remote jobs from {}", remote.len(), jobs.len());
        remote
    }

    /// Jobs whose non-zero minimum salary in `currency` is at least `min_salary`
    pub fn filter_by_salary(&self, jobs: &[Job], min_salary: f64, currency: &str) -> Vec<Job> {
        let filtered: Vec<Job> = jobs
            .iter()
            .filter(|job| {
                job.salary_currency.as_deref() == Some(currency)
                    && job
                        .min_salary
                        .is_some_and(|min| min != 0.0 && min >= min_salary)
            })
            .cloned()
            .collect();

        debug!(
            "Filtered {} jobs with salary >= {} {}",
            filtered.len(),
            min_salary,
            currency
        );
        filtered
    }

    /// Sort by max salary, else min salary, else 0
    ///
    /// Stable: jobs with equal keys keep their input order.
    pub fn sort_by_salary(&self, mut jobs: Vec<Job>, descending: bool) -> Vec<Job> {
        jobs.sort_by(|a, b| {
            let ordering = a
                .salary_sort_key()
                .partial_cmp(&b.salary_sort_key())
                .unwrap_or(Ordering::Equal);
            if descending {
                ordering.reverse()
            } else {
                ordering
            }
        });
        debug!("Sorted {} jobs by salary", jobs.len());
        jobs
    }
}
