//! Job details subcommand

use clap::Args;

use super::display::{print_job_details, with_spinner};
use super::search::{export_jobs, ExportFormat};
use super::{Cli, CliError};

/// Arguments for `jsearch details`
#[derive(Args, Debug)]
pub struct DetailsArgs {
    /// Job identifier from a search result
    pub job_id: String,

    /// Two-letter country code
    #[arg(long, default_value = "us")]
    pub country: String,

    /// Export the job
    #[arg(long, value_enum, default_value = "none")]
    pub export: ExportFormat,
}

impl DetailsArgs {
    /// Fetch and print one job
    pub async fn execute(&self, cli: &Cli) -> Result<(), CliError> {
        let job_id = self.job_id.trim();
        if job_id.is_empty() {
            return Err(CliError::InvalidArgument("job id must not be empty".into()));
        }

        let ctx = cli.context()?;
        let job = with_spinner(
            ctx.format,
            "Fetching job details...",
            ctx.jobs.job_details(job_id, &self.country),
        )
        .await?;

        print_job_details(&job, ctx.format)?;
        export_jobs(&ctx, std::slice::from_ref(&job), self.export, "job_details")
    }
}
