//! `deckhand status`: one poll of a deployment request.

use deckhand_core::domain::DeploymentStatus;
use tracing::instrument;

use crate::{
    catalog, cli::StatusArgs, config::AppConfig, error::CliResult, output::OutputManager,
};

#[instrument(skip_all, fields(request_id = %args.request))]
pub async fn execute(args: StatusArgs, config: AppConfig, output: OutputManager) -> CliResult<()> {
    let service = catalog::service(&config)?;
    let reported = service.poll_status(&args.request).await?;

    if output.is_json() {
        output.json(&reported)?;
        return Ok(());
    }

    let line = format!("{}: {}", args.request, reported.status);
    match reported.status {
        DeploymentStatus::Pending => output.info(&line)?,
        DeploymentStatus::Succeeded => output.success(&line)?,
        DeploymentStatus::Failed => output.error(&line)?,
    }
    if let Some(error) = &reported.error {
        output.print(&format!("  reason: {error}"))?;
    }
    if output.is_quiet() {
        output.data(reported.status.as_str())?;
    }

    Ok(())
}
