//! Integration tests for the job and salary services over a canned API

use async_trait::async_trait;
use jsearch_scraper::api::{
    ApiError, CompanySalaryQuery, JobDetailsQuery, JobSearchApi, SalaryQuery,
};
use jsearch_scraper::models::{SearchParameters, YearsOfExperience};
use jsearch_scraper::services::{JobService, SalaryService, ServiceError};
use serde_json::{json, Value};
use std::sync::{Arc, Mutex};

/// Serves fixed records and remembers the salary locations it was asked for
#[derive(Default)]
struct CannedApi {
    jobs: Vec<Value>,
    details: Option<Value>,
    salaries: Vec<Value>,
    failing_location: Option<String>,
    salary_calls: Mutex<Vec<String>>,
}

#[async_trait]
impl JobSearchApi for CannedApi {
    async fn search_jobs(&self, _params: &SearchParameters) -> Result<Vec<Value>, ApiError> {
        Ok(self.jobs.clone())
    }

    async fn job_details(&self, query: &JobDetailsQuery) -> Result<Value, ApiError> {
        self.details
            .clone()
            .ok_or_else(|| ApiError::NotFound(format!("job {} not found", query.job_id)))
    }

    async fn estimated_salary(&self, query: &SalaryQuery) -> Result<Vec<Value>, ApiError> {
        self.salary_calls
            .lock()
            .unwrap()
            .push(query.location.clone());
        if self.failing_location.as_deref() == Some(query.location.as_str()) {
            return Err(ApiError::Http {
                status: 500,
                message: "boom".into(),
            });
        }
        if query.location == "Nowhere" {
            return Ok(Vec::new());
        }
        Ok(self.salaries.clone())
    }

    async fn company_salary(&self, _query: &CompanySalaryQuery) -> Result<Vec<Value>, ApiError> {
        Ok(self.salaries.clone())
    }
}

fn params() -> SearchParameters {
    SearchParameters::new("rust", "us").unwrap()
}

#[tokio::test]
async fn test_search_skips_malformed_records() {
    let api = CannedApi {
        jobs: vec![
            json!({"job_id": "1", "job_title": "Backend", "job_is_remote": null}),
            json!("not a job"),
            json!({"job_title": "missing id"}),
            json!({"job_id": "4", "job_is_remote": true, "job_required_skills": "Rust"}),
        ],
        ..CannedApi::default()
    };
    let service = JobService::new(Arc::new(api));

    let jobs = service.search_jobs(&params()).await.unwrap();

    assert_eq!(jobs.len(), 2);
    assert_eq!(jobs[0].title.as_deref(), Some("Backend"));
    assert!(!jobs[0].is_remote);
    assert!(jobs[1].is_remote);
    assert_eq!(jobs[1].required_skills, vec!["Rust".to_string()]);
}

#[tokio::test]
async fn test_filter_and_sort_pipeline() {
    let api = CannedApi {
        jobs: vec![
            json!({"job_id": "low", "job_is_remote": true, "job_min_salary": 50000.0,
                   "job_max_salary": 60000.0, "job_salary_currency": "USD"}),
            json!({"job_id": "eur", "job_is_remote": true, "job_min_salary": 90000.0,
                   "job_salary_currency": "EUR"}),
            json!({"job_id": "high", "job_is_remote": true, "job_min_salary": 100000.0,
                   "job_max_salary": 150000.0, "job_salary_currency": "USD"}),
            json!({"job_id": "onsite", "job_is_remote": false, "job_min_salary": 200000.0,
                   "job_salary_currency": "USD"}),
        ],
        ..CannedApi::default()
    };
    let service = JobService::new(Arc::new(api));

    let jobs = service.search_jobs(&params()).await.unwrap();
    let remote = service.filter_remote(&jobs);
    assert_eq!(remote.len(), 3);

    let usd = service.filter_by_salary(&remote, 55000.0, "USD");
    let ids: Vec<_> = usd.iter().map(|j| j.job_id.as_str()).collect();
    assert_eq!(ids, vec!["high"]);

    let sorted = service.sort_by_salary(remote, true);
    let ids: Vec<_> = sorted.iter().map(|j| j.job_id.as_str()).collect();
    assert_eq!(ids, vec!["high", "eur", "low"]);
}

#[tokio::test]
async fn test_job_details_parsed() {
    let api = CannedApi {
        details: Some(json!({
            "job_id": "abc",
            "job_title": "Platform Engineer",
            "job_benefits": ["health_insurance", "dental_coverage"],
            "job_highlights": {"Qualifications": ["Rust"]}
        })),
        ..CannedApi::default()
    };
    let service = JobService::new(Arc::new(api));

    let job = service.job_details("abc", "us").await.unwrap();
    assert_eq!(job.title.as_deref(), Some("Platform Engineer"));
    assert_eq!(job.benefits.as_ref().map(Vec::len), Some(2));
    assert!(job.highlights.is_some());
}

#[tokio::test]
async fn test_job_details_invalid_record_is_error() {
    let api = CannedApi {
        details: Some(json!({"job_title": "no id"})),
        ..CannedApi::default()
    };
    let service = JobService::new(Arc::new(api));

    let err = service.job_details("abc", "us").await.unwrap_err();
    assert!(matches!(err, ServiceError::InvalidRecord(_)));
    assert!(err.api_error().is_none());
}

#[tokio::test]
async fn test_job_details_not_found_propagates() {
    let service = JobService::new(Arc::new(CannedApi::default()));

    let err = service.job_details("gone", "us").await.unwrap_err();
    assert!(err.api_error().is_some_and(ApiError::is_not_found));
}

#[tokio::test]
async fn test_estimated_salary_drops_empty_records() {
    let api = CannedApi {
        salaries: vec![
            json!({"job_title": "nurse", "location": "Chicago", "median_salary": 80000.0,
                   "salary_currency": null}),
            json!({"job_title": "nurse", "location": "Chicago"}),
        ],
        ..CannedApi::default()
    };
    let service = SalaryService::new(Arc::new(api));

    let salaries = service
        .estimated_salary("nurse", "Chicago", YearsOfExperience::All)
        .await
        .unwrap();

    assert_eq!(salaries.len(), 1);
    assert_eq!(salaries[0].salary_currency, "USD");
    assert_eq!(salaries[0].salary_period, "YEAR");
}

#[tokio::test]
async fn test_compare_locations_skips_failures_and_empties() {
    let api = Arc::new(CannedApi {
        salaries: vec![
            json!({"median_salary": 100000.0}),
            json!({"median_salary": 0.0, "min_salary": 50000.0}),
            json!({"median_salary": 50000.0}),
        ],
        failing_location: Some("Broken".into()),
        ..CannedApi::default()
    });
    let service = SalaryService::new(Arc::clone(&api));
    let locations: Vec<String> = ["Austin", "Broken", "Nowhere", "Denver"]
        .iter()
        .map(|s| s.to_string())
        .collect();

    let comparison = service
        .compare_locations("engineer", &locations, YearsOfExperience::All)
        .await;

    let names: Vec<_> = comparison.iter().map(|c| c.location.as_str()).collect();
    assert_eq!(names, vec!["Austin", "Denver"]);
    assert_eq!(comparison[0].count, 3);
    assert_eq!(comparison[0].average_median, Some(75000.0));
    assert_eq!(*api.salary_calls.lock().unwrap(), locations);
}

#[tokio::test]
async fn test_company_salary() {
    let api = CannedApi {
        salaries: vec![json!({"job_title": "engineer", "min_salary": 90000.0,
                              "max_salary": 130000.0, "salary_period": "YEAR"})],
        ..CannedApi::default()
    };
    let service = SalaryService::new(Arc::new(api));

    let salaries = service
        .company_salary("Acme", "engineer", Some("Austin"), YearsOfExperience::FourToSix)
        .await
        .unwrap();

    assert_eq!(salaries.len(), 1);
    assert_eq!(salaries[0].max_salary, Some(130000.0));
}
