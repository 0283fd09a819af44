//! Console rendering of results

use indicatif::{ProgressBar, ProgressStyle};
use serde::Serialize;
use serde_json::json;
use std::future::Future;
use std::time::Duration;

use super::{CliError, OutputFormat};
use crate::models::{Job, SalaryInfo};
use crate::presets::PRESETS;
use crate::services::LocationComparison;

/// Description length in job listings
const LISTING_DESCRIPTION_LENGTH: usize = 200;

/// Description length on the details page
const DETAILS_DESCRIPTION_LENGTH: usize = 1000;

/// Run `future` behind a spinner in human mode
pub async fn with_spinner<T, F>(format: OutputFormat, message: &str, future: F) -> T
where
    F: Future<Output = T>,
{
    if format != OutputFormat::Human {
        return future.await;
    }

    let spinner = ProgressBar::new_spinner();
    spinner.set_style(
        ProgressStyle::default_spinner()
            .template("{spinner:.green} {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_spinner()),
    );
    spinner.set_message(message.to_string());
    spinner.enable_steady_tick(Duration::from_millis(100));

    let result = future.await;
    spinner.finish_and_clear();
    result
}

/// Pretty-print `value` as JSON on stdout
pub fn print_json<T: Serialize + ?Sized>(value: &T) -> Result<(), CliError> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

/// Job listing
pub fn print_jobs(jobs: &[Job], format: OutputFormat) -> Result<(), CliError> {
    if format == OutputFormat::Json {
        return print_json(jobs);
    }

    if jobs.is_empty() {
        println!("No jobs found.");
        return Ok(());
    }

    println!("Found {} jobs:\n", jobs.len());
    for (i, job) in jobs.iter().enumerate() {
        println!(
            "{:>3}. {} | {}",
            i + 1,
            job.title.as_deref().unwrap_or("Untitled"),
            job.employer_name.as_deref().unwrap_or("Unknown employer")
        );
        println!(
            "     Location: {} | Remote: {} | Type: {}",
            job.location(),
            if job.is_remote { "yes" } else { "no" },
            job.employment_type.as_deref().unwrap_or("N/A")
        );
        println!(
            "     Salary: {}",
            job.salary_range().unwrap_or_else(|| "Not specified".to_string())
        );
        println!(
            "     Posted: {} | ID: {}",
            job.posted_at_datetime.as_deref().unwrap_or("N/A"),
            job.job_id
        );
        if let Some(link) = &job.apply_link {
            println!("     Apply: {link}");
        }
        println!("     {}\n", job.short_description(LISTING_DESCRIPTION_LENGTH));
    }

    Ok(())
}

/// Single job with requirements and benefits
pub fn print_job_details(job: &Job, format: OutputFormat) -> Result<(), CliError> {
    if format == OutputFormat::Json {
        return print_json(job);
    }

    println!("{}", job.title.as_deref().unwrap_or("Untitled"));
    println!("  Employer:   {}", job.employer_name.as_deref().unwrap_or("N/A"));
    println!("  Location:   {}", job.location());
    println!("  Remote:     {}", if job.is_remote { "yes" } else { "no" });
    println!(
        "  Salary:     {}",
        job.salary_range().unwrap_or_else(|| "Not specified".to_string())
    );
    println!("  Publisher:  {}", job.job_publisher.as_deref().unwrap_or("N/A"));
    println!("  Posted:     {}", job.posted_at_datetime.as_deref().unwrap_or("N/A"));
    println!("  Expires:    {}", job.expiration_datetime.as_deref().unwrap_or("N/A"));
    if !job.required_skills.is_empty() {
        println!("  Skills:     {}", job.required_skills.join(", "));
    }
    if let Some(benefits) = job.benefits.as_ref().filter(|b| !b.is_empty()) {
        println!("  Benefits:   {}", benefits.join(", "));
    }
    if let Some(link) = &job.apply_link {
        println!("  Apply:      {link}");
    }
    println!("\n{}", job.short_description(DETAILS_DESCRIPTION_LENGTH));

    Ok(())
}

/// Salary records
pub fn print_salaries(salaries: &[SalaryInfo], format: OutputFormat) -> Result<(), CliError> {
    if format == OutputFormat::Json {
        return print_json(salaries);
    }

    if salaries.is_empty() {
        println!("No salary data found.");
        return Ok(());
    }

    for salary in salaries {
        println!(
            "{} ({})",
            salary.job_title.as_deref().unwrap_or("N/A"),
            salary.location.as_deref().unwrap_or("N/A")
        );
        println!("  Median: {}", salary.formatted_median());
        println!("  Range:  {}", salary.formatted_range());
        if let Some(publisher) = &salary.publisher_name {
            println!("  Source: {publisher}");
        }
        if let Some(extra) = &salary.additional_pay {
            println!("  Additional pay: {extra}");
        }
        println!();
    }

    Ok(())
}

/// Per-location comparison
pub fn print_comparison(
    comparison: &[LocationComparison],
    format: OutputFormat,
) -> Result<(), CliError> {
    if format == OutputFormat::Json {
        return print_json(comparison);
    }

    if comparison.is_empty() {
        println!("No salary data for any location.");
        return Ok(());
    }

    println!("{:<30} {:>8} {:>16}", "Location", "Records", "Avg. median");
    for entry in comparison {
        let median = entry
            .average_median
            .map(crate::models::format_amount)
            .unwrap_or_else(|| "N/A".to_string());
        println!("{:<30} {:>8} {:>16}", entry.location, entry.count, median);
    }

    Ok(())
}

/// Available presets
pub fn print_presets(format: OutputFormat) -> Result<(), CliError> {
    if format == OutputFormat::Json {
        let presets: Vec<_> = PRESETS
            .iter()
            .map(|p| {
                json!({
                    "key": p.key,
                    "title": p.title,
                    "query": p.query,
                    "country": p.country,
                    "date_posted": p.date_posted.as_str(),
                    "work_from_home": p.work_from_home,
                })
            })
            .collect();
        return print_json(&presets);
    }

    println!("Available presets:\n");
    for preset in &PRESETS {
        println!("  {:<22} {}", preset.key, preset.title);
    }

    Ok(())
}
