//! Salary subcommands

use clap::Args;

use super::display::{print_comparison, print_salaries, with_spinner};
use super::search::{report_export, ExportFormat};
use super::{AppContext, Cli, CliError};
use crate::models::{SalaryInfo, YearsOfExperience};

/// Arguments for `jsearch salary`
#[derive(Args, Debug)]
pub struct SalaryArgs {
    /// Job title
    pub job_title: String,

    /// City, state or country
    pub location: String,

    /// Experience bracket, e.g. ALL, ONE_TO_THREE, ABOVE_FIFTEEN
    #[arg(long, default_value = "ALL")]
    pub experience: YearsOfExperience,

    /// Export the salary records
    #[arg(long, value_enum, default_value = "none")]
    pub export: ExportFormat,
}

impl SalaryArgs {
    /// Query and print salary estimates
    pub async fn execute(&self, cli: &Cli) -> Result<(), CliError> {
        let ctx = cli.context()?;
        let salaries = with_spinner(
            ctx.format,
            "Querying salary estimates...",
            ctx.salaries
                .estimated_salary(&self.job_title, &self.location, self.experience),
        )
        .await?;

        print_salaries(&salaries, ctx.format)?;
        export_salaries(
            &ctx,
            &salaries,
            self.export,
            &format!("salary_{}_{}", self.job_title, self.location),
        )
    }
}

/// Arguments for `jsearch company-salary`
#[derive(Args, Debug)]
pub struct CompanySalaryArgs {
    /// Company name
    pub company: String,

    /// Job title
    pub job_title: String,

    /// Restrict to a location
    #[arg(long)]
    pub location: Option<String>,

    /// Experience bracket
    #[arg(long, default_value = "ALL")]
    pub experience: YearsOfExperience,

    /// Export the salary records
    #[arg(long, value_enum, default_value = "none")]
    pub export: ExportFormat,
}

impl CompanySalaryArgs {
    /// Query and print company salaries
    pub async fn execute(&self, cli: &Cli) -> Result<(), CliError> {
        let ctx = cli.context()?;
        let salaries = with_spinner(
            ctx.format,
            "Querying company salaries...",
            ctx.salaries.company_salary(
                &self.company,
                &self.job_title,
                self.location.as_deref(),
                self.experience,
            ),
        )
        .await?;

        print_salaries(&salaries, ctx.format)?;
        export_salaries(
            &ctx,
            &salaries,
            self.export,
            &format!("company_salary_{}_{}", self.company, self.job_title),
        )
    }
}

/// Arguments for `jsearch compare`
#[derive(Args, Debug)]
pub struct CompareArgs {
    /// Job title
    pub job_title: String,

    /// Locations to compare
    #[arg(required = true, num_args = 1..)]
    pub locations: Vec<String>,

    /// Experience bracket
    #[arg(long, default_value = "ALL")]
    pub experience: YearsOfExperience,
}

impl CompareArgs {
    /// Compare salaries across locations
    pub async fn execute(&self, cli: &Cli) -> Result<(), CliError> {
        let locations: Vec<String> = self
            .locations
            .iter()
            .map(|l| l.trim().to_string())
            .filter(|l| !l.is_empty())
            .collect();
        if locations.is_empty() {
            return Err(CliError::InvalidArgument(
                "at least one location is required".into(),
            ));
        }

        let ctx = cli.context()?;
        let comparison = with_spinner(
            ctx.format,
            &format!("Comparing {} locations...", locations.len()),
            ctx.salaries
                .compare_locations(&self.job_title, &locations, self.experience),
        )
        .await;

        print_comparison(&comparison, ctx.format)
    }
}

fn export_salaries(
    ctx: &AppContext,
    salaries: &[SalaryInfo],
    export: ExportFormat,
    base_name: &str,
) -> Result<(), CliError> {
    if export.csv() {
        let path = ctx.exporter.salaries_to_csv(salaries, base_name)?;
        report_export(ctx.format, &path);
    }
    if export.json() {
        let path = ctx.exporter.salaries_to_json(salaries, base_name)?;
        report_export(ctx.format, &path);
    }
    Ok(())
}
