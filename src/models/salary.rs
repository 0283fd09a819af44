//! Salary estimate record and salary query enums

use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;
use std::str::FromStr;

use super::{format_amount, format_salary_range, nonzero, ValidationError};

/// One salary estimate from the estimated-salary or company-salary endpoints
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SalaryInfo {
    /// Job title the estimate applies to
    #[serde(default)]
    pub job_title: Option<String>,
    /// Location the estimate applies to
    #[serde(default)]
    pub location: Option<String>,
    /// Source of the estimate
    #[serde(default)]
    pub publisher_name: Option<String>,
    /// Lower bound
    #[serde(default)]
    pub min_salary: Option<f64>,
    /// Upper bound
    #[serde(default)]
    pub max_salary: Option<f64>,
    /// Median
    #[serde(default)]
    pub median_salary: Option<f64>,
    /// Currency code (defaults to USD)
    #[serde(default = "default_currency", deserialize_with = "currency_or_default")]
    pub salary_currency: String,
    /// YEAR, MONTH or HOUR (defaults to YEAR)
    #[serde(default = "default_period", deserialize_with = "period_or_default")]
    pub salary_period: String,
    /// Bonus, equity or other pay, free text
    #[serde(default)]
    pub additional_pay: Option<String>,
}

fn default_currency() -> String {
    "USD".to_string()
}

fn default_period() -> String {
    "YEAR".to_string()
}

fn currency_or_default<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<String>::deserialize(deserializer)?.unwrap_or_else(default_currency))
}

fn period_or_default<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<String>::deserialize(deserializer)?.unwrap_or_else(default_period))
}

impl Default for SalaryInfo {
    fn default() -> Self {
        Self {
            job_title: None,
            location: None,
            publisher_name: None,
            min_salary: None,
            max_salary: None,
            median_salary: None,
            salary_currency: default_currency(),
            salary_period: default_period(),
            additional_pay: None,
        }
    }
}

impl SalaryInfo {
    /// At least one of min, max or median is a non-zero amount
    pub fn has_salary_data(&self) -> bool {
        nonzero(self.min_salary).is_some()
            || nonzero(self.max_salary).is_some()
            || nonzero(self.median_salary).is_some()
    }

    /// Median as "85,000 USD/YEAR", or "N/A"
    pub fn formatted_median(&self) -> String {
        match nonzero(self.median_salary) {
            Some(median) => format!(
                "{} {}/{}",
                format_amount(median),
                self.salary_currency,
                self.salary_period
            ),
            None => "N/A".to_string(),
        }
    }

    /// Min/max range, or "N/A"
    pub fn formatted_range(&self) -> String {
        format_salary_range(
            self.min_salary,
            self.max_salary,
            &self.salary_currency,
            &self.salary_period,
        )
        .unwrap_or_else(|| "N/A".to_string())
    }
}

/// Experience buckets accepted by the salary endpoints
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum YearsOfExperience {
    /// Any experience
    #[default]
    All,
    /// Under one year
    LessThanOne,
    /// One to three years
    OneToThree,
    /// Four to six years
    FourToSix,
    /// Seven to nine years
    SevenToNine,
    /// Ten to fourteen years
    TenToFourteen,
    /// Fifteen years or more
    AboveFifteen,
}

impl YearsOfExperience {
    /// Every bucket in ascending order
    pub const ALL_VALUES: [YearsOfExperience; 7] = [
        YearsOfExperience::All,
        YearsOfExperience::LessThanOne,
        YearsOfExperience::OneToThree,
        YearsOfExperience::FourToSix,
        YearsOfExperience::SevenToNine,
        YearsOfExperience::TenToFourteen,
        YearsOfExperience::AboveFifteen,
    ];

    /// Wire value
    pub fn as_str(&self) -> &'static str {
        match self {
            YearsOfExperience::All => "ALL",
            YearsOfExperience::LessThanOne => "LESS_THAN_ONE",
            YearsOfExperience::OneToThree => "ONE_TO_THREE",
            YearsOfExperience::FourToSix => "FOUR_TO_SIX",
            YearsOfExperience::SevenToNine => "SEVEN_TO_NINE",
            YearsOfExperience::TenToFourteen => "TEN_TO_FOURTEEN",
            YearsOfExperience::AboveFifteen => "ABOVE_FIFTEEN",
        }
    }
}

impl fmt::Display for YearsOfExperience {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for YearsOfExperience {
    type Err = ValidationError;

    /// Case-insensitive; `-` and `_` are interchangeable
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().to_uppercase().replace('-', "_");
        Self::ALL_VALUES
            .into_iter()
            .find(|value| value.as_str() == normalized)
            .ok_or_else(|| ValidationError::InvalidExperience(s.to_string()))
    }
}

/// Granularity of the `location` argument of salary queries
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LocationType {
    /// Let the API decide
    #[default]
    Any,
    /// City
    City,
    /// State or region
    State,
    /// Whole country
    Country,
}

impl LocationType {
    /// Wire value
    pub fn as_str(&self) -> &'static str {
        match self {
            LocationType::Any => "ANY",
            LocationType::City => "CITY",
            LocationType::State => "STATE",
            LocationType::Country => "COUNTRY",
        }
    }
}

impl fmt::Display for LocationType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for LocationType {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_uppercase().as_str() {
            "ANY" => Ok(LocationType::Any),
            "CITY" => Ok(LocationType::City),
            "STATE" => Ok(LocationType::State),
            "COUNTRY" => Ok(LocationType::Country),
            _ => Err(ValidationError::InvalidLocationType(s.to_string())),
        }
    }
}
