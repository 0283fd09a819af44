//! Integration tests for CSV and JSON export

use jsearch_scraper::models::{Job, SalaryInfo};
use jsearch_scraper::output::Exporter;
use std::fs;

fn sample_job() -> Job {
    let mut job = Job::new("job-1");
    job.title = Some("Rust Engineer, Platform".into());
    job.employer_name = Some("Acme".into());
    job.city = Some("Madrid".into());
    job.country = Some("ES".into());
    job.is_remote = true;
    job.min_salary = Some(50000.0);
    job.max_salary = Some(70000.0);
    job.salary_currency = Some("EUR".into());
    job.salary_period = Some("YEAR".into());
    job.description = Some("d".repeat(800));
    job.required_skills = vec!["Rust".into(), "Tokio".into()];
    job
}

#[test]
fn test_jobs_csv_header_and_quoting() {
    let dir = tempfile::tempdir().unwrap();
    let exporter = Exporter::new(dir.path());

    let path = exporter.jobs_to_csv(&[sample_job()], "rust jobs!").unwrap();
    let name = path.file_name().unwrap().to_string_lossy().to_string();
    assert!(name.starts_with("rust_jobs_"), "unexpected name {name}");

    let mut reader = csv::Reader::from_path(&path).unwrap();
    let headers = reader.headers().unwrap().clone();
    assert_eq!(&headers[0], "job_id");

    let rows: Vec<csv::StringRecord> = reader.records().map(Result::unwrap).collect();
    assert_eq!(rows.len(), 1);
    let row = &rows[0];
    assert_eq!(row.len(), headers.len());

    let column = |name: &str| {
        let idx = headers.iter().position(|h| h == name).unwrap();
        row[idx].to_string()
    };
    assert_eq!(column("title"), "Rust Engineer, Platform");
    assert_eq!(column("required_skills"), "Rust, Tokio");
    assert!(column("description").chars().count() <= 503);
}

#[test]
fn test_empty_export_still_has_header() {
    let dir = tempfile::tempdir().unwrap();
    let exporter = Exporter::new(dir.path());

    let path = exporter.salaries_to_csv(&[], "salaries").unwrap();
    let content = fs::read_to_string(&path).unwrap();
    assert_eq!(content.lines().count(), 1);
    assert!(content.starts_with("job_title"));
}

#[test]
fn test_json_export_round_trips_fields() {
    let dir = tempfile::tempdir().unwrap();
    let exporter = Exporter::new(dir.path().join("out"));

    let salary = SalaryInfo {
        job_title: Some("Nurse".into()),
        median_salary: Some(80000.0),
        ..SalaryInfo::default()
    };
    let path = exporter.salaries_to_json(&[salary], "salary nurse").unwrap();
    assert!(path.starts_with(dir.path().join("out")));

    let value: serde_json::Value =
        serde_json::from_str(&fs::read_to_string(&path).unwrap()).unwrap();
    assert_eq!(value[0]["job_title"], "Nurse");
    assert_eq!(value[0]["salary_currency"], "USD");

    let jobs_path = exporter.jobs_to_json(&[sample_job()], "jobs").unwrap();
    let jobs: Vec<Job> = serde_json::from_str(&fs::read_to_string(&jobs_path).unwrap()).unwrap();
    assert_eq!(jobs, vec![sample_job()]);
}
