//! Typed records and search parameters
//!
//! Value objects decoded from (or sent to) the JSearch API, plus the shared
//! money formatting used by their display helpers.

pub mod job;
pub mod salary;
pub mod search_params;

pub use job::Job;
pub use salary::{LocationType, SalaryInfo, YearsOfExperience};
pub use search_params::{DatePosted, SearchParameters, SearchParametersBuilder};

/// Invalid input rejected when building parameters
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    /// Query is empty after trimming
    #[error("query must not be empty")]
    EmptyQuery,

    /// Country is not a two-letter ISO 3166-1 alpha-2 code
    #[error("country must be a 2-letter ISO 3166-1 alpha-2 code, got '{0}'")]
    InvalidCountry(String),

    /// Page number below 1
    #[error("page must be >= 1, got {0}")]
    InvalidPage(u32),

    /// Page count outside 1..=10
    #[error("num_pages must be between 1 and 10, got {0}")]
    InvalidNumPages(u32),

    /// Unknown posting period
    #[error("date_posted must be one of: all, today, 3days, week, month (got '{0}')")]
    InvalidDatePosted(String),

    /// Unknown experience bucket
    #[error("unknown years of experience '{0}'")]
    InvalidExperience(String),

    /// Unknown location type
    #[error("unknown location type '{0}'")]
    InvalidLocationType(String),
}

/// `Some(v)` only for present, non-zero amounts
pub(crate) fn nonzero(value: Option<f64>) -> Option<f64> {
    value.filter(|v| *v != 0.0)
}

/// Render an amount rounded to whole units with thousands separators
///
/// `85000.4` becomes `"85,000"`.
pub fn format_amount(value: f64) -> String {
    let rounded = value.round();
    let digits = format!("{:.0}", rounded.abs());

    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }

    if rounded < 0.0 {
        format!("-{grouped}")
    } else {
        grouped
    }
}

/// Format a salary range, `None` when neither bound is a non-zero amount
///
/// - both bounds: `"50,000 - 80,000 USD/YEAR"`
/// - min only: `"50,000+ USD/YEAR"`
/// - max only: `"Up to 80,000 USD/YEAR"`
pub fn format_salary_range(
    min: Option<f64>,
    max: Option<f64>,
    currency: &str,
    period: &str,
) -> Option<String> {
    match (nonzero(min), nonzero(max)) {
        (Some(min), Some(max)) => Some(format!(
            "{} - {} {currency}/{period}",
            format_amount(min),
            format_amount(max)
        )),
        (Some(min), None) => Some(format!("{}+ {currency}/{period}", format_amount(min))),
        (None, Some(max)) => Some(format!("Up to {} {currency}/{period}", format_amount(max))),
        (None, None) => None,
    }
}
