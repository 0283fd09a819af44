//! Job search and preset subcommands

use clap::{Args, ValueEnum};
use tracing::info;

use super::display::{print_jobs, print_presets, with_spinner};
use super::{AppContext, Cli, CliError, OutputFormat};
use crate::models::{Job, SearchParameters};
use crate::presets::find_preset;

/// Export target for result sets
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum, Default)]
pub enum ExportFormat {
    /// CSV file
    Csv,
    /// JSON file
    Json,
    /// CSV and JSON files
    Both,
    /// No export
    #[default]
    #[value(name = "none")]
    Skip,
}

impl ExportFormat {
    /// Whether a CSV file is written
    pub fn csv(self) -> bool {
        matches!(self, ExportFormat::Csv | ExportFormat::Both)
    }

    /// Whether a JSON file is written
    pub fn json(self) -> bool {
        matches!(self, ExportFormat::Json | ExportFormat::Both)
    }
}

/// Post-processing applied to search results
#[derive(Args, Debug, Clone)]
pub struct JobFilterArgs {
    /// Keep only remote jobs
    #[arg(long)]
    pub remote_only: bool,

    /// Keep only jobs whose minimum salary reaches this amount
    #[arg(long)]
    pub min_salary: Option<f64>,

    /// Currency for --min-salary
    #[arg(long, default_value = "USD")]
    pub currency: String,

    /// Sort by salary, highest first
    #[arg(long)]
    pub sort_salary: bool,

    /// Export the results
    #[arg(long, value_enum, default_value = "none")]
    pub export: ExportFormat,
}

/// Arguments for `jsearch search`
#[derive(Args, Debug)]
pub struct SearchArgs {
    /// Search query, e.g. "rust developer in Berlin"
    pub query: String,

    /// Two-letter country code
    #[arg(long, default_value = "us")]
    pub country: String,

    /// First page to return
    #[arg(long, default_value_t = 1)]
    pub page: u32,

    /// Number of pages to return (1-10)
    #[arg(long, default_value_t = 1)]
    pub num_pages: u32,

    /// Posting age: all, today, 3days, week or month
    #[arg(long, default_value = "all")]
    pub date_posted: String,

    /// Ask the API for remote jobs only
    #[arg(long = "remote")]
    pub work_from_home: bool,

    /// Comma-separated employment types, e.g. FULLTIME,CONTRACTOR
    #[arg(long)]
    pub employment_types: Option<String>,

    /// Comma-separated experience requirements
    #[arg(long)]
    pub job_requirements: Option<String>,

    /// Search radius in kilometers
    #[arg(long)]
    pub radius: Option<u32>,

    /// Comma-separated publishers to exclude
    #[arg(long = "exclude-publishers")]
    pub exclude_job_publishers: Option<String>,

    /// Result language code
    #[arg(long)]
    pub language: Option<String>,

    /// Result filters and export
    #[command(flatten)]
    pub filters: JobFilterArgs,
}

impl SearchArgs {
    /// Validated search parameters
    pub fn parameters(&self) -> Result<SearchParameters, CliError> {
        let mut builder = SearchParameters::builder(&self.query, &self.country)
            .page(self.page)
            .num_pages(self.num_pages)
            .date_posted(&self.date_posted)
            .work_from_home(self.work_from_home);

        if let Some(types) = &self.employment_types {
            builder = builder.employment_types(types);
        }
        if let Some(requirements) = &self.job_requirements {
            builder = builder.job_requirements(requirements);
        }
        if let Some(radius) = self.radius {
            builder = builder.radius(radius);
        }
        if let Some(publishers) = &self.exclude_job_publishers {
            builder = builder.exclude_job_publishers(publishers);
        }
        if let Some(language) = &self.language {
            builder = builder.language(language);
        }

        Ok(builder.build()?)
    }

    /// Execute the search
    pub async fn execute(&self, cli: &Cli) -> Result<(), CliError> {
        let params = self.parameters()?;
        let ctx = cli.context()?;
        run_search(&ctx, &params, &self.filters, params.query()).await
    }
}

/// Arguments for `jsearch preset`
#[derive(Args, Debug)]
pub struct PresetArgs {
    /// Preset key, see --list
    #[arg(required_unless_present = "list")]
    pub key: Option<String>,

    /// List the available presets
    #[arg(long)]
    pub list: bool,

    /// Result filters and export
    #[command(flatten)]
    pub filters: JobFilterArgs,
}

impl PresetArgs {
    /// Execute the preset search, or list presets
    pub async fn execute(&self, cli: &Cli) -> Result<(), CliError> {
        if self.list {
            return print_presets(cli.format);
        }

        let key = self.key.as_deref().unwrap_or_default();
        let preset = find_preset(key).ok_or_else(|| {
            CliError::InvalidArgument(format!(
                "unknown preset '{key}', run `jsearch preset --list`"
            ))
        })?;
        info!("Running preset {}: {}", preset.key, preset.title);

        let params = preset.to_parameters()?;
        let ctx = cli.context()?;
        run_search(&ctx, &params, &self.filters, preset.key).await
    }
}

/// Search, filter, print and optionally export
async fn run_search(
    ctx: &AppContext,
    params: &SearchParameters,
    filters: &JobFilterArgs,
    export_name: &str,
) -> Result<(), CliError> {
    let jobs = with_spinner(
        ctx.format,
        &format!("Searching for \"{}\"...", params.query()),
        ctx.jobs.search_jobs(params),
    )
    .await?;

    let jobs = apply_filters(ctx, jobs, filters);
    print_jobs(&jobs, ctx.format)?;
    export_jobs(ctx, &jobs, filters.export, export_name)
}

fn apply_filters(ctx: &AppContext, mut jobs: Vec<Job>, filters: &JobFilterArgs) -> Vec<Job> {
    if filters.remote_only {
        jobs = ctx.jobs.filter_remote(&jobs);
    }
    if let Some(min) = filters.min_salary {
        jobs = ctx.jobs.filter_by_salary(&jobs, min, &filters.currency);
    }
    if filters.sort_salary {
        jobs = ctx.jobs.sort_by_salary(jobs, true);
    }
    jobs
}

/// Write the requested export files for `jobs`
pub(crate) fn export_jobs(
    ctx: &AppContext,
    jobs: &[Job],
    export: ExportFormat,
    base_name: &str,
) -> Result<(), CliError> {
    if export.csv() {
        let path = ctx.exporter.jobs_to_csv(jobs, base_name)?;
        report_export(ctx.format, &path);
    }
    if export.json() {
        let path = ctx.exporter.jobs_to_json(jobs, base_name)?;
        report_export(ctx.format, &path);
    }
    Ok(())
}

/// Announce an export without disturbing JSON on stdout
pub(crate) fn report_export(format: OutputFormat, path: &std::path::Path) {
    match format {
        OutputFormat::Human => println!("Exported to {}", path.display()),
        OutputFormat::Json => eprintln!("Exported to {}", path.display()),
    }
}
