//! Predefined searches for common tech roles

use crate::models::{DatePosted, SearchParameters, ValidationError};

/// A named, ready-to-run search
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Preset {
    /// Lookup key used on the command line
    pub key: &'static str,
    /// Human-readable title
    pub title: &'static str,
    /// Search query
    pub query: &'static str,
    /// Country code
    pub country: &'static str,
    /// Posting age filter
    pub date_posted: DatePosted,
    /// Remote-only
    pub work_from_home: bool,
}

const FULLTIME: &str = "FULLTIME";

/// All presets in listing order
pub const PRESETS: [Preset; 9] = [
    Preset {
        key: "project-manager-es",
        title: "Project Manager in Spain",
        query: "project manager scrum agile",
        country: "es",
        date_posted: DatePosted::Week,
        work_from_home: false,
    },
    Preset {
        key: "software-engineer-es",
        title: "Software Engineer in Spain",
        query: "software engineer",
        country: "es",
        date_posted: DatePosted::Week,
        work_from_home: false,
    },
    Preset {
        key: "data-scientist-es",
        title: "Data Scientist in Spain",
        query: "data scientist python machine learning",
        country: "es",
        date_posted: DatePosted::Week,
        work_from_home: false,
    },
    Preset {
        key: "frontend-es",
        title: "Frontend Developer in Spain",
        query: "frontend developer react javascript",
        country: "es",
        date_posted: DatePosted::Week,
        work_from_home: false,
    },
    Preset {
        key: "backend-us",
        title: "Backend Developer in the United States",
        query: "backend developer python java",
        country: "us",
        date_posted: DatePosted::Week,
        work_from_home: false,
    },
    Preset {
        key: "ml-engineer-us",
        title: "Machine Learning Engineer in the United States",
        query: "machine learning engineer tensorflow pytorch",
        country: "us",
        date_posted: DatePosted::ThreeDays,
        work_from_home: false,
    },
    Preset {
        key: "fullstack-us",
        title: "Full Stack Developer in the United States",
        query: "full stack developer node react python",
        country: "us",
        date_posted: DatePosted::Week,
        work_from_home: false,
    },
    Preset {
        key: "devops-gb",
        title: "DevOps Engineer in the United Kingdom",
        query: "devops engineer kubernetes docker aws",
        country: "gb",
        date_posted: DatePosted::Week,
        work_from_home: false,
    },
    Preset {
        key: "senior-remote-us",
        title: "Senior Software Engineer - Remote",
        query: "senior software engineer remote",
        country: "us",
        date_posted: DatePosted::Week,
        work_from_home: true,
    },
];

impl Preset {
    /// Full-time search parameters for this preset
    pub fn to_parameters(&self) -> Result<SearchParameters, ValidationError> {
        SearchParameters::builder(self.query, self.country)
            .employment_types(FULLTIME)
            .date_posted(self.date_posted.as_str())
            .work_from_home(self.work_from_home)
            .build()
    }
}

/// Look up a preset by key (case-insensitive)
pub fn find_preset(key: &str) -> Option<&'static Preset> {
    PRESETS.iter().find(|p| p.key.eq_ignore_ascii_case(key.trim()))
}
