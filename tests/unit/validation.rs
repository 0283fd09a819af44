use jsearch_scraper::models::{Job, SalaryInfo};
use jsearch_scraper::validation::{parse_batch, parse_job_batch, parse_record, RecordError};
use serde_json::json;

#[test]
fn test_job_batch_reports_failure_positions() {
    let records = vec![
        json!({"job_id": "1"}),
        json!(42),
        json!({"job_id": "3", "job_latitude": "north"}),
        json!({"job_id": "4"}),
    ];

    let outcome = parse_job_batch(&records);

    let ids: Vec<_> = outcome.parsed.iter().map(|j| j.job_id.as_str()).collect();
    assert_eq!(ids, vec!["1", "4"]);
    let positions: Vec<_> = outcome.failures.iter().map(|(i, _)| *i).collect();
    assert_eq!(positions, vec![1, 2]);
    assert!(matches!(outcome.failures[0].1, RecordError::NotAnObject(_)));
}

#[test]
fn test_parse_record_single() {
    let job: Job = parse_record(&json!({"job_id": "x", "job_title": "Dev"})).unwrap();
    assert_eq!(job.title.as_deref(), Some("Dev"));

    let err = parse_record::<Job>(&json!([])).unwrap_err();
    assert!(matches!(err, RecordError::NotAnObject(_)));
}

#[test]
fn test_salary_batch_with_parse_batch() {
    let records = vec![
        json!({"job_title": "nurse", "median_salary": 70000.0}),
        json!({"job_title": "nurse", "median_salary": "high"}),
    ];

    let outcome = parse_batch(&records, parse_record::<SalaryInfo>);

    assert_eq!(outcome.parsed.len(), 1);
    assert_eq!(outcome.failures.len(), 1);
    assert!(matches!(outcome.failures[0].1, RecordError::Invalid(_)));
}
