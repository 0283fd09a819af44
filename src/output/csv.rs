//! CSV serialization of jobs and salaries
//!
//! The header row is written explicitly so empty exports still carry it.

use csv::WriterBuilder;
use serde::Serialize;
use std::io::Write;

use super::{OutputError, OutputResult};
use crate::models::{Job, SalaryInfo};

/// Column order of job exports
pub const JOB_COLUMNS: [&str; 22] = [
    "job_id",
    "title",
    "employer_name",
    "city",
    "state",
    "country",
    "is_remote",
    "employment_type",
    "min_salary",
    "max_salary",
    "salary_currency",
    "salary_period",
    "description",
    "apply_link",
    "posted_at_datetime",
    "job_publisher",
    "required_experience",
    "required_skills",
    "required_education",
    "benefits",
    "google_link",
    "expiration_datetime",
];

/// Column order of salary exports
pub const SALARY_COLUMNS: [&str; 9] = [
    "job_title",
    "location",
    "publisher_name",
    "min_salary",
    "max_salary",
    "median_salary",
    "salary_currency",
    "salary_period",
    "additional_pay",
];

/// Maximum description length in job exports
const DESCRIPTION_LENGTH: usize = 500;

/// CSV row for a job
#[derive(Debug, Serialize)]
struct JobRecord<'a> {
    job_id: &'a str,
    title: Option<&'a str>,
    employer_name: Option<&'a str>,
    city: Option<&'a str>,
    state: Option<&'a str>,
    country: Option<&'a str>,
    is_remote: bool,
    employment_type: Option<&'a str>,
    min_salary: Option<f64>,
    max_salary: Option<f64>,
    salary_currency: Option<&'a str>,
    salary_period: Option<&'a str>,
    description: Option<String>,
    apply_link: Option<&'a str>,
    posted_at_datetime: Option<&'a str>,
    job_publisher: Option<&'a str>,
    required_experience: Option<&'a str>,
    required_skills: String,
    required_education: Option<&'a str>,
    benefits: Option<String>,
    google_link: Option<&'a str>,
    expiration_datetime: Option<&'a str>,
}

impl<'a> From<&'a Job> for JobRecord<'a> {
    fn from(job: &'a Job) -> Self {
        Self {
            job_id: &job.job_id,
            title: job.title.as_deref(),
            employer_name: job.employer_name.as_deref(),
            city: job.city.as_deref(),
            state: job.state.as_deref(),
            country: job.country.as_deref(),
            is_remote: job.is_remote,
            employment_type: job.employment_type.as_deref(),
            min_salary: job.min_salary,
            max_salary: job.max_salary,
            salary_currency: job.salary_currency.as_deref(),
            salary_period: job.salary_period.as_deref(),
            description: job
                .description
                .as_deref()
                .filter(|d| !d.is_empty())
                .map(|_| job.short_description(DESCRIPTION_LENGTH)),
            apply_link: job.apply_link.as_deref(),
            posted_at_datetime: job.posted_at_datetime.as_deref(),
            job_publisher: job.job_publisher.as_deref(),
            required_experience: job.required_experience.as_deref(),
            required_skills: job.required_skills.join(", "),
            required_education: job.required_education.as_deref(),
            benefits: job.benefits.as_ref().map(|b| b.join(", ")),
            google_link: job.google_link.as_deref(),
            expiration_datetime: job.expiration_datetime.as_deref(),
        }
    }
}

/// CSV row for a salary record
#[derive(Debug, Serialize)]
struct SalaryRecord<'a> {
    job_title: Option<&'a str>,
    location: Option<&'a str>,
    publisher_name: Option<&'a str>,
    min_salary: Option<f64>,
    max_salary: Option<f64>,
    median_salary: Option<f64>,
    salary_currency: &'a str,
    salary_period: &'a str,
    additional_pay: Option<&'a str>,
}

impl<'a> From<&'a SalaryInfo> for SalaryRecord<'a> {
    fn from(salary: &'a SalaryInfo) -> Self {
        Self {
            job_title: salary.job_title.as_deref(),
            location: salary.location.as_deref(),
            publisher_name: salary.publisher_name.as_deref(),
            min_salary: salary.min_salary,
            max_salary: salary.max_salary,
            median_salary: salary.median_salary,
            salary_currency: &salary.salary_currency,
            salary_period: &salary.salary_period,
            additional_pay: salary.additional_pay.as_deref(),
        }
    }
}

/// Write a header row plus one row per job
pub fn write_jobs<W: Write>(writer: W, jobs: &[Job]) -> OutputResult<usize> {
    write_rows(writer, &JOB_COLUMNS, jobs.iter().map(JobRecord::from))
}

/// Write a header row plus one row per salary record
pub fn write_salaries<W: Write>(writer: W, salaries: &[SalaryInfo]) -> OutputResult<usize> {
    write_rows(writer, &SALARY_COLUMNS, salaries.iter().map(SalaryRecord::from))
}

fn write_rows<W, R, I>(writer: W, header: &[&str], rows: I) -> OutputResult<usize>
where
    W: Write,
    R: Serialize,
    I: IntoIterator<Item = R>,
{
    let mut csv_writer = WriterBuilder::new().has_headers(false).from_writer(writer);

    csv_writer
        .write_record(header)
        .map_err(|e| OutputError::CsvError(format!("Failed to write header: {e}")))?;

    let mut written = 0;
    for row in rows {
        csv_writer
            .serialize(row)
            .map_err(|e| OutputError::CsvError(format!("Failed to write row: {e}")))?;
        written += 1;
    }

    csv_writer
        .flush()
        .map_err(|e| OutputError::FlushError(format!("Failed to flush: {e}")))?;

    Ok(written)
}
