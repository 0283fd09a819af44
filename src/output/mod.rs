//! Export of jobs and salaries to CSV and JSON files
//!
//! Every export is written to a temporary file inside the output directory
//! and renamed into place, so a crash never leaves a half-written file under
//! the final name.

use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};
use tempfile::NamedTempFile;
use tracing::{debug, error, info};

use crate::models::{Job, SalaryInfo};

pub mod csv;
pub mod json;
pub mod path;

pub use path::{clean_filename, generate_filename, timestamped_filename};

/// Output errors
#[derive(Debug, thiserror::Error)]
pub enum OutputError {
    /// IO error
    #[error("IO error: {0}")]
    IoError(String),

    /// CSV write error
    #[error("CSV error: {0}")]
    CsvError(String),

    /// Serialization error
    #[error("serialization error: {0}")]
    SerializationError(String),

    /// Buffer flush error
    #[error("flush error: {0}")]
    FlushError(String),
}

/// Result type for output operations
pub type OutputResult<T> = Result<T, OutputError>;

/// Writes timestamped export files into one directory
#[derive(Debug, Clone)]
pub struct Exporter {
    output_dir: PathBuf,
}

impl Exporter {
    /// Exporter for `output_dir`; the directory is created on first write
    pub fn new(output_dir: impl Into<PathBuf>) -> Self {
        let output_dir = output_dir.into();
        debug!("Exporter initialized: {}", output_dir.display());
        Self { output_dir }
    }

    /// Target directory
    pub fn output_dir(&self) -> &Path {
        &self.output_dir
    }

    /// Export jobs to `{base}_{timestamp}.csv`
    pub fn jobs_to_csv(&self, jobs: &[Job], base_name: &str) -> OutputResult<PathBuf> {
        let filename = timestamped_filename(base_name, "csv");
        info!("Exporting {} jobs to CSV: {}", jobs.len(), filename);
        self.write_atomic(&filename, |file| csv::write_jobs(file, jobs))
    }

    /// Export jobs to `{base}_{timestamp}.json`
    pub fn jobs_to_json(&self, jobs: &[Job], base_name: &str) -> OutputResult<PathBuf> {
        let filename = timestamped_filename(base_name, "json");
        info!("Exporting {} jobs to JSON: {}", jobs.len(), filename);
        self.write_atomic(&filename, |file| json::write_records(file, jobs))
    }

    /// Export salary records to `{base}_{timestamp}.csv`
    pub fn salaries_to_csv(
        &self,
        salaries: &[SalaryInfo],
        base_name: &str,
    ) -> OutputResult<PathBuf> {
        let filename = timestamped_filename(base_name, "csv");
        info!(
            "Exporting {} salary records to CSV: {}",
            salaries.len(),
            filename
        );
        self.write_atomic(&filename, |file| csv::write_salaries(file, salaries))
    }

    /// Export salary records to `{base}_{timestamp}.json`
    pub fn salaries_to_json(
        &self,
        salaries: &[SalaryInfo],
        base_name: &str,
    ) -> OutputResult<PathBuf> {
        let filename = timestamped_filename(base_name, "json");
        info!(
            "Exporting {} salary records to JSON: {}",
            salaries.len(),
            filename
        );
        self.write_atomic(&filename, |file| json::write_records(file, salaries))
    }

    /// Write through a temp file in the output directory, then rename
    fn write_atomic<F>(&self, filename: &str, write: F) -> OutputResult<PathBuf>
    where
        F: FnOnce(&mut NamedTempFile) -> OutputResult<usize>,
    {
        fs::create_dir_all(&self.output_dir).map_err(|e| {
            OutputError::IoError(format!(
                "Failed to create directory {}: {e}",
                self.output_dir.display()
            ))
        })?;

        let path = self.output_dir.join(filename);
        let mut temp_file = NamedTempFile::new_in(&self.output_dir)
            .map_err(|e| OutputError::IoError(format!("Failed to create temp file: {e}")))?;

        let written = write(&mut temp_file).map_err(|e| {
            error!("Error exporting to {}: {}", path.display(), e);
            e
        })?;

        temp_file
            .flush()
            .map_err(|e| OutputError::FlushError(format!("Failed to flush temp file: {e}")))?;
        temp_file
            .as_file()
            .sync_all()
            .map_err(|e| OutputError::IoError(format!("Failed to sync temp file: {e}")))?;
        temp_file
            .persist(&path)
            .map_err(|e| OutputError::IoError(format!("Failed to persist temp file: {e}")))?;

        info!("Wrote {} records to {}", written, path.display());
        Ok(path)
    }
}
