//! Salary estimates, company salaries and location comparison

use serde::Serialize;
use std::sync::Arc;
use tracing::{debug, error, info, warn};

use super::ServiceResult;
use crate::api::{CompanySalaryQuery, JobSearchApi, SalaryQuery};
use crate::models::{SalaryInfo, YearsOfExperience};
use crate::validation::parse_salary_batch;

/// Salary figures for one location
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LocationComparison {
    /// Location as given by the caller
    pub location: String,
    /// Number of records with salary data
    pub count: usize,
    /// Mean of the non-zero medians, if there are any
    pub average_median: Option<f64>,
    /// The records themselves
    pub salaries: Vec<SalaryInfo>,
}

impl LocationComparison {
    fn from_salaries(location: &str, salaries: Vec<SalaryInfo>) -> Self {
        let medians: Vec<f64> = salaries
            .iter()
            .filter_map(|s| s.median_salary)
            .filter(|m| *m != 0.0)
            .collect();

        let average_median = if medians.is_empty() {
            None
        } else {
            Some(medians.iter().sum::<f64>() / medians.len() as f64)
        };

        Self {
            location: location.to_string(),
            count: salaries.len(),
            average_median,
            salaries,
        }
    }
}

/// Salary query service
pub struct SalaryService<A: JobSearchApi + ?Sized> {
    api: Arc<A>,
}

impl<A: JobSearchApi + ?Sized> SalaryService<A> {
    /// Create a service over `api`
    pub fn new(api: Arc<A>) -> Self {
        debug!("SalaryService initialized");
        Self { api }
    }

    /// Salary estimates for `job_title` in `location`
    ///
    /// Records without any salary figure are dropped.
    pub async fn estimated_salary(
        &self,
        job_title: &str,
        location: &str,
        experience: YearsOfExperience,
    ) -> ServiceResult<Vec<SalaryInfo>> {
        info!(
            "Querying salaries: {} in {} ({})",
            job_title, location, experience
        );

        let query = SalaryQuery::new(job_title, location).experience(experience);
        let raw = self.api.estimated_salary(&query).await.map_err(|e| {
            error!("Error querying salaries: {}", e);
            e
        })?;

        let outcome = parse_salary_batch(&raw);
        outcome.log_failures("salary");
        info!("Obtained {} salary records", outcome.parsed.len());

        Ok(outcome.parsed)
    }

    /// Salary estimates for `job_title` at `company`
    pub async fn company_salary(
        &self,
        company: &str,
        job_title: &str,
        location: Option<&str>,
        experience: YearsOfExperience,
    ) -> ServiceResult<Vec<SalaryInfo>> {
        info!("Querying salaries of {} for {}", company, job_title);

        let mut query = CompanySalaryQuery::new(company, job_title).experience(experience);
        if let Some(location) = location {
            query = query.location(location);
        }

        let raw = self.api.company_salary(&query).await.map_err(|e| {
            error!("Error querying company salaries: {}", e);
            e
        })?;

        let outcome = parse_salary_batch(&raw);
        outcome.log_failures("company salary");
        info!(
            "Obtained {} salary records from {}",
            outcome.parsed.len(),
            company
        );

        Ok(outcome.parsed)
    }

    /// Compare `job_title` across `locations`, in input order
    ///
    /// Locations that fail or return no salary data are logged and left out.
    pub async fn compare_locations(
        &self,
        job_title: &str,
        locations: &[String],
        experience: YearsOfExperience,
    ) -> Vec<LocationComparison> {
        info!(
            "Comparing salaries for {} in {} locations",
            job_title,
            locations.len()
        );

        let mut comparison = Vec::with_capacity(locations.len());
        for location in locations {
            match self.estimated_salary(job_title, location, experience).await {
                Ok(salaries) if salaries.is_empty() => {
                    debug!("No salary data for {}", location);
                }
                Ok(salaries) => {
                    comparison.push(LocationComparison::from_salaries(location, salaries));
                }
                Err(e) => {
                    warn!("Error comparing {}: {}", location, e);
                }
            }
        }

        comparison
    }
}
