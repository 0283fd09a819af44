//! Record-level validation of raw API results
//!
//! Batches are parsed record by record: a malformed record is collected as a
//! failure with its index and never aborts the batch. Callers decide how to
//! report failures (the services log them as warnings).

use serde::de::DeserializeOwned;
use serde_json::Value;
use tracing::warn;

use crate::models::{Job, SalaryInfo};

/// Why a single record was rejected
#[derive(Debug, thiserror::Error)]
pub enum RecordError {
    /// Record is not a JSON object
    #[error("expected a JSON object, got {0}")]
    NotAnObject(&'static str),

    /// Record is an object but its fields do not match the model
    #[error("invalid record: {0}")]
    Invalid(#[from] serde_json::Error),
}

/// Parsed records plus the failures that were skipped
#[derive(Debug)]
pub struct BatchOutcome<T> {
    /// Successfully parsed records, in input order
    pub parsed: Vec<T>,
    /// `(index, error)` for every rejected record, index 0-based
    pub failures: Vec<(usize, RecordError)>,
}

impl<T> BatchOutcome<T> {
    /// Whether every record parsed
    pub fn is_complete(&self) -> bool {
        self.failures.is_empty()
    }

    /// Log each failure as a warning with its 1-based position
    pub fn log_failures(&self, kind: &str) {
        for (index, error) in &self.failures {
            warn!("Error parsing {} #{}: {}", kind, index + 1, error);
        }
    }
}

/// Parse one record into `T`
pub fn parse_record<T: DeserializeOwned>(value: &Value) -> Result<T, RecordError> {
    if !value.is_object() {
        return Err(RecordError::NotAnObject(json_kind(value)));
    }
    Ok(T::deserialize(value)?)
}

/// Parse every record independently with `parser`
pub fn parse_batch<T, F>(records: &[Value], mut parser: F) -> BatchOutcome<T>
where
    F: FnMut(&Value) -> Result<T, RecordError>,
{
    let mut parsed = Vec::with_capacity(records.len());
    let mut failures = Vec::new();

    for (index, record) in records.iter().enumerate() {
        match parser(record) {
            Ok(value) => parsed.push(value),
            Err(error) => failures.push((index, error)),
        }
    }

    BatchOutcome { parsed, failures }
}

/// Parse job records
pub fn parse_job_batch(records: &[Value]) -> BatchOutcome<Job> {
    parse_batch(records, parse_record::<Job>)
}

/// Parse salary records, dropping those without any salary figure
///
/// Dropped records are not failures.
pub fn parse_salary_batch(records: &[Value]) -> BatchOutcome<SalaryInfo> {
    let mut outcome = parse_batch(records, parse_record::<SalaryInfo>);
    outcome.parsed.retain(SalaryInfo::has_salary_data);
    outcome
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}
