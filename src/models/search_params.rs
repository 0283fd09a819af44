//! Validated job search parameters

use std::fmt;
use std::str::FromStr;

use super::ValidationError;

/// Posting age filter accepted by the search endpoint
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DatePosted {
    /// No filter
    #[default]
    All,
    /// Posted today
    Today,
    /// Posted within the last three days
    ThreeDays,
    /// Posted within the last week
    Week,
    /// Posted within the last month
    Month,
}

impl DatePosted {
    /// Wire value
    pub fn as_str(&self) -> &'static str {
        match self {
            DatePosted::All => "all",
            DatePosted::Today => "today",
            DatePosted::ThreeDays => "3days",
            DatePosted::Week => "week",
            DatePosted::Month => "month",
        }
    }
}

impl fmt::Display for DatePosted {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for DatePosted {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "all" => Ok(DatePosted::All),
            "today" => Ok(DatePosted::Today),
            "3days" => Ok(DatePosted::ThreeDays),
            "week" => Ok(DatePosted::Week),
            "month" => Ok(DatePosted::Month),
            other => Err(ValidationError::InvalidDatePosted(other.to_string())),
        }
    }
}

/// Parameters for `/jsearch/search`
///
/// Only obtainable through [`SearchParametersBuilder::build`], so every
/// instance holds normalized, validated values.
#[derive(Debug, Clone, PartialEq)]
pub struct SearchParameters {
    query: String,
    country: String,
    page: u32,
    num_pages: u32,
    date_posted: DatePosted,
    work_from_home: bool,
    employment_types: Option<String>,
    job_requirements: Option<String>,
    radius: Option<u32>,
    exclude_job_publishers: Option<String>,
    language: Option<String>,
}

impl SearchParameters {
    /// Start building parameters for `query` in `country`
    pub fn builder(
        query: impl Into<String>,
        country: impl Into<String>,
    ) -> SearchParametersBuilder {
        SearchParametersBuilder::new(query, country)
    }

    /// Validate `query` and `country` with every other field at its default
    pub fn new(
        query: impl Into<String>,
        country: impl Into<String>,
    ) -> Result<Self, ValidationError> {
        Self::builder(query, country).build()
    }

    /// Trimmed search query
    pub fn query(&self) -> &str {
        &self.query
    }

    /// Lower-case country code
    pub fn country(&self) -> &str {
        &self.country
    }

    /// First page to fetch
    pub fn page(&self) -> u32 {
        self.page
    }

    /// Number of pages to fetch
    pub fn num_pages(&self) -> u32 {
        self.num_pages
    }

    /// Posting age filter
    pub fn date_posted(&self) -> DatePosted {
        self.date_posted
    }

    /// Remote-only flag
    pub fn work_from_home(&self) -> bool {
        self.work_from_home
    }

    /// Comma-separated employment types
    pub fn employment_types(&self) -> Option<&str> {
        self.employment_types.as_deref()
    }

    /// Search radius in km
    pub fn radius(&self) -> Option<u32> {
        self.radius
    }

    /// Query parameters in wire order
    ///
    /// `query`, `page`, `num_pages`, `country` and `date_posted` are always
    /// present; optional fields appear only when set.
    pub fn to_api_params(&self) -> Vec<(&'static str, String)> {
        let mut params = vec![
            ("query", self.query.clone()),
            ("page", self.page.to_string()),
            ("num_pages", self.num_pages.to_string()),
            ("country", self.country.clone()),
            ("date_posted", self.date_posted.to_string()),
        ];

        if let Some(language) = &self.language {
            params.push(("language", language.clone()));
        }
        if self.work_from_home {
            params.push(("work_from_home", "true".to_string()));
        }
        if let Some(types) = &self.employment_types {
            params.push(("employment_types", types.clone()));
        }
        if let Some(requirements) = &self.job_requirements {
            params.push(("job_requirements", requirements.clone()));
        }
        if let Some(radius) = self.radius {
            params.push(("radius", radius.to_string()));
        }
        if let Some(publishers) = &self.exclude_job_publishers {
            params.push(("exclude_job_publishers", publishers.clone()));
        }

        params
    }
}

/// Builder for [`SearchParameters`]
#[derive(Debug, Clone)]
pub struct SearchParametersBuilder {
    query: String,
    country: String,
    page: u32,
    num_pages: u32,
    date_posted: String,
    work_from_home: bool,
    employment_types: Option<String>,
    job_requirements: Option<String>,
    radius: Option<u32>,
    exclude_job_publishers: Option<String>,
    language: Option<String>,
}

impl SearchParametersBuilder {
    /// Builder with defaults: page 1, one page, any posting date, on-site allowed
    pub fn new(query: impl Into<String>, country: impl Into<String>) -> Self {
        Self {
            query: query.into(),
            country: country.into(),
            page: 1,
            num_pages: 1,
            date_posted: DatePosted::All.as_str().to_string(),
            work_from_home: false,
            employment_types: None,
            job_requirements: None,
            radius: None,
            exclude_job_publishers: None,
            language: None,
        }
    }

    /// First page to fetch (>= 1)
    pub fn page(mut self, page: u32) -> Self {
        self.page = page;
        self
    }

    /// Number of pages (1..=10)
    pub fn num_pages(mut self, num_pages: u32) -> Self {
        self.num_pages = num_pages;
        self
    }

    /// Posting age filter: all, today, 3days, week or month
    pub fn date_posted(mut self, date_posted: impl Into<String>) -> Self {
        self.date_posted = date_posted.into();
        self
    }

    /// Remote jobs only
    pub fn work_from_home(mut self, work_from_home: bool) -> Self {
        self.work_from_home = work_from_home;
        self
    }

    /// Comma-separated types, e.g. "FULLTIME,CONTRACTOR"
    pub fn employment_types(mut self, types: impl Into<String>) -> Self {
        self.employment_types = Some(types.into());
        self
    }

    /// Comma-separated requirement filters, e.g. "under_3_years_experience"
    pub fn job_requirements(mut self, requirements: impl Into<String>) -> Self {
        self.job_requirements = Some(requirements.into());
        self
    }

    /// Search radius in km
    pub fn radius(mut self, radius: u32) -> Self {
        self.radius = Some(radius);
        self
    }

    /// Comma-separated publishers to exclude
    pub fn exclude_job_publishers(mut self, publishers: impl Into<String>) -> Self {
        self.exclude_job_publishers = Some(publishers.into());
        self
    }

    /// Result language code
    pub fn language(mut self, language: impl Into<String>) -> Self {
        self.language = Some(language.into());
        self
    }

    /// Validate and normalize
    ///
    /// Query is trimmed; country is trimmed and lower-cased. Empty optional
    /// strings are treated as absent.
    pub fn build(self) -> Result<SearchParameters, ValidationError> {
        let query = self.query.trim().to_string();
        if query.is_empty() {
            return Err(ValidationError::EmptyQuery);
        }

        let country = self.country.trim().to_lowercase();
        if country.chars().count() != 2 || !country.chars().all(|c| c.is_ascii_alphabetic()) {
            return Err(ValidationError::InvalidCountry(self.country));
        }

        if self.page < 1 {
            return Err(ValidationError::InvalidPage(self.page));
        }
        if !(1..=10).contains(&self.num_pages) {
            return Err(ValidationError::InvalidNumPages(self.num_pages));
        }

        let date_posted = self.date_posted.parse::<DatePosted>()?;

        Ok(SearchParameters {
            query,
            country,
            page: self.page,
            num_pages: self.num_pages,
            date_posted,
            work_from_home: self.work_from_home,
            employment_types: non_empty(self.employment_types),
            job_requirements: non_empty(self.job_requirements),
            radius: self.radius,
            exclude_job_publishers: non_empty(self.exclude_job_publishers),
            language: non_empty(self.language),
        })
    }
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.is_empty())
}
