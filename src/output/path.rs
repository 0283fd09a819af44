//! Export file naming
//!
//! Names are derived from a free-text base (usually the search query),
//! sanitized for the filesystem and suffixed with a local timestamp:
//! `{clean_base}_{YYYYmmdd_HHMMSS}.{ext}`.

use chrono::{DateTime, Local, TimeZone};

/// Base used when sanitizing leaves nothing
pub const FALLBACK_BASE: &str = "export";

/// Sanitize `name` for use as a file name
///
/// Keeps letters, digits, `_`, whitespace and `-`; every run of whitespace
/// and `-` becomes a single `_`; leading and trailing `_`/`-` are trimmed.
pub fn clean_filename(name: &str) -> String {
    let mut cleaned = String::with_capacity(name.len());
    let mut in_separator_run = false;

    for ch in name.chars() {
        if ch.is_whitespace() || ch == '-' {
            if !in_separator_run {
                cleaned.push('_');
                in_separator_run = true;
            }
        } else if ch.is_alphanumeric() || ch == '_' {
            cleaned.push(ch);
            in_separator_run = false;
        }
    }

    cleaned.trim_matches(|c| c == '_' || c == '-').to_string()
}

/// `{clean_base}_{YYYYmmdd_HHMMSS}.{extension}`
///
/// # Arguments
/// * `base_name` - Free text, sanitized with [`clean_filename`]
/// * `extension` - Extension without the dot
/// * `timestamp` - Time embedded in the name
pub fn generate_filename<Tz>(base_name: &str, extension: &str, timestamp: &DateTime<Tz>) -> String
where
    Tz: TimeZone,
    Tz::Offset: std::fmt::Display,
{
    let mut base = clean_filename(base_name);
    if base.is_empty() {
        base = FALLBACK_BASE.to_string();
    }
    format!("{}_{}.{}", base, timestamp.format("%Y%m%d_%H%M%S"), extension)
}

/// [`generate_filename`] stamped with the current local time
pub fn timestamped_filename(base_name: &str, extension: &str) -> String {
    generate_filename(base_name, extension, &Local::now())
}
