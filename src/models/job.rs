//! Job posting record

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};

use super::{format_salary_range, nonzero};

/// A job posting as returned by the search and details endpoints
///
/// Every field except `job_id` is optional. Fields accept the API's
/// `job_`-prefixed names as well as their own.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Job {
    /// Unique posting ID
    pub job_id: String,
    /// Job title
    #[serde(default, alias = "job_title")]
    pub title: Option<String>,
    /// Hiring company
    #[serde(default)]
    pub employer_name: Option<String>,
    /// Company logo URL
    #[serde(default)]
    pub employer_logo: Option<String>,
    /// Site the posting was found on
    #[serde(default)]
    pub job_publisher: Option<String>,

    /// City
    #[serde(default, alias = "job_city")]
    pub city: Option<String>,
    /// State or region
    #[serde(default, alias = "job_state")]
    pub state: Option<String>,
    /// Country code
    #[serde(default, alias = "job_country")]
    pub country: Option<String>,
    /// Latitude
    #[serde(default, alias = "job_latitude")]
    pub latitude: Option<f64>,
    /// Longitude
    #[serde(default, alias = "job_longitude")]
    pub longitude: Option<f64>,

    /// Remote position (null counts as false)
    #[serde(default, alias = "job_is_remote", deserialize_with = "null_as_false")]
    pub is_remote: bool,
    /// e.g. "Full-time"
    #[serde(default, alias = "job_employment_type")]
    pub employment_type: Option<String>,
    /// Full description text
    #[serde(default, alias = "job_description")]
    pub description: Option<String>,
    /// Application URL
    #[serde(default, alias = "job_apply_link")]
    pub apply_link: Option<String>,
    /// Google for Jobs URL
    #[serde(default, alias = "job_google_link")]
    pub google_link: Option<String>,

    /// Lower salary bound
    #[serde(default, alias = "job_min_salary")]
    pub min_salary: Option<f64>,
    /// Upper salary bound
    #[serde(default, alias = "job_max_salary")]
    pub max_salary: Option<f64>,
    /// Salary currency code
    #[serde(default, alias = "job_salary_currency")]
    pub salary_currency: Option<String>,
    /// YEAR, MONTH, HOUR...
    #[serde(default, alias = "job_salary_period")]
    pub salary_period: Option<String>,

    /// Posting time (Unix seconds)
    #[serde(default, alias = "job_posted_at_timestamp")]
    pub posted_at_timestamp: Option<i64>,
    /// Posting time (UTC, ISO 8601)
    #[serde(default, alias = "job_posted_at_datetime_utc")]
    pub posted_at_datetime: Option<String>,
    /// Expiry time (Unix seconds)
    #[serde(default, alias = "job_offer_expiration_timestamp")]
    pub expiration_timestamp: Option<i64>,
    /// Expiry time (UTC, ISO 8601)
    #[serde(default, alias = "job_offer_expiration_datetime_utc")]
    pub expiration_datetime: Option<String>,

    /// Experience requirement summary
    #[serde(default, alias = "job_required_experience")]
    pub required_experience: Option<String>,
    /// Required skills, always a list
    #[serde(default, alias = "job_required_skills", deserialize_with = "string_or_list")]
    pub required_skills: Vec<String>,
    /// Education requirement summary
    #[serde(default, alias = "job_required_education")]
    pub required_education: Option<String>,
    /// Experience accepted instead of education
    #[serde(default, alias = "job_experience_in_place_of_education")]
    pub experience_in_place_of_education: Option<bool>,

    /// Benefits, when reported
    #[serde(default, alias = "job_benefits", deserialize_with = "optional_string_or_list")]
    pub benefits: Option<Vec<String>>,
    /// Highlight sections (Qualifications, Responsibilities...)
    #[serde(default, alias = "job_highlights")]
    pub highlights: Option<Map<String, Value>>,
}

#[derive(Deserialize)]
#[serde(untagged)]
enum OneOrMany {
    One(String),
    Many(Vec<String>),
}

fn null_as_false<'de, D>(deserializer: D) -> Result<bool, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<bool>::deserialize(deserializer)?.unwrap_or(false))
}

fn string_or_list<'de, D>(deserializer: D) -> Result<Vec<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(optional_string_or_list(deserializer)?.unwrap_or_default())
}

fn optional_string_or_list<'de, D>(deserializer: D) -> Result<Option<Vec<String>>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Option::<OneOrMany>::deserialize(deserializer)? {
        None => None,
        Some(OneOrMany::One(single)) => Some(vec![single]),
        Some(OneOrMany::Many(list)) => Some(list),
    })
}

impl Job {
    /// Minimal job with only an ID
    pub fn new(job_id: impl Into<String>) -> Self {
        Self {
            job_id: job_id.into(),
            title: None,
            employer_name: None,
            employer_logo: None,
            job_publisher: None,
            city: None,
            state: None,
            country: None,
            latitude: None,
            longitude: None,
            is_remote: false,
            employment_type: None,
            description: None,
            apply_link: None,
            google_link: None,
            min_salary: None,
            max_salary: None,
            salary_currency: None,
            salary_period: None,
            posted_at_timestamp: None,
            posted_at_datetime: None,
            expiration_timestamp: None,
            expiration_datetime: None,
            required_experience: None,
            required_skills: Vec::new(),
            required_education: None,
            experience_in_place_of_education: None,
            benefits: None,
            highlights: None,
        }
    }

    /// "city, state, country" from the parts that are set, or "N/A"
    pub fn location(&self) -> String {
        let parts: Vec<&str> = [&self.city, &self.state, &self.country]
            .into_iter()
            .filter_map(|part| part.as_deref())
            .filter(|part| !part.is_empty())
            .collect();

        if parts.is_empty() {
            "N/A".to_string()
        } else {
            parts.join(", ")
        }
    }

    /// Formatted salary range; currency defaults to USD and period to YEAR
    pub fn salary_range(&self) -> Option<String> {
        format_salary_range(
            self.min_salary,
            self.max_salary,
            self.salary_currency.as_deref().unwrap_or("USD"),
            self.salary_period.as_deref().unwrap_or("YEAR"),
        )
    }

    /// Description with whitespace collapsed, cut to `max_length` characters
    pub fn short_description(&self, max_length: usize) -> String {
        let Some(description) = self.description.as_deref().filter(|d| !d.is_empty()) else {
            return "No description available".to_string();
        };

        let collapsed = description.split_whitespace().collect::<Vec<_>>().join(" ");
        if collapsed.chars().count() <= max_length {
            return collapsed;
        }

        let truncated: String = collapsed.chars().take(max_length).collect();
        format!("{truncated}...")
    }

    /// Sort key: max salary, else min salary, else 0
    pub fn salary_sort_key(&self) -> f64 {
        nonzero(self.max_salary)
            .or(nonzero(self.min_salary))
            .unwrap_or(0.0)
    }
}
