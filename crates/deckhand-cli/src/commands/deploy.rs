//! `deckhand deploy`: submit a deployment and optionally follow it.

use std::time::Duration;

use deckhand_core::{
    application::{CatalogService, WaitPolicy},
    domain::{DeploymentRequest, DeploymentStatus, Template},
};
use tracing::{info, instrument};

use crate::{
    catalog,
    cli::DeployArgs,
    config::{AppConfig, CatalogSource},
    error::{CliError, CliResult},
    output::OutputManager,
};

#[instrument(skip_all, fields(template_id = %args.template))]
pub async fn execute(args: DeployArgs, config: AppConfig, output: OutputManager) -> CliResult<()> {
    let service = catalog::service(&config)?;

    // Deploys are checked against the catalog as it is right now.
    service.list_templates().await?;

    if let Some(template) = lookup(&service, &args) {
        if !args.yes && !output.is_json() {
            confirm(&template)?;
        }
        output.info(&format!("Deploying {template}"))?;
    }

    let mut request = service.deploy(args.template).await?;
    info!(request_id = %request.request_id, "Submitted");

    if !args.wait {
        return report_submitted(&request, &config, &output);
    }

    let policy = wait_policy(&args, &config);
    let spinner = output.spinner(format!(
        "Waiting for {} (polling every {}s)",
        request.request_id,
        policy.interval().as_secs()
    ));
    let waited = service.wait_for_outcome(&mut request, policy).await;
    spinner.finish_and_clear();
    waited?;

    report_outcome(request, &output)
}

fn lookup(service: &CatalogService, args: &DeployArgs) -> Option<Template> {
    service
        .snapshot()
        .and_then(|snapshot| snapshot.get(args.template).cloned())
}

fn wait_policy(args: &DeployArgs, config: &AppConfig) -> WaitPolicy {
    WaitPolicy::new(
        Duration::from_secs(args.interval.unwrap_or(config.deploy.poll_interval_secs)),
        Duration::from_secs(args.timeout.unwrap_or(config.deploy.wait_timeout_secs)),
    )
}

fn report_submitted(
    request: &DeploymentRequest,
    config: &AppConfig,
    output: &OutputManager,
) -> CliResult<()> {
    if output.is_json() {
        output.json(request)?;
        return Ok(());
    }

    output.success(&format!("Deployment submitted: {}", request.request_id))?;
    output.print(&format!(
        "  status:    {}\n  submitted: {}",
        request.status(),
        request.submitted_at.format("%Y-%m-%d %H:%M:%S UTC")
    ))?;
    if output.is_quiet() {
        output.data(request.request_id.as_str())?;
    }
    // The built-in catalog is gone once this process exits.
    if config.catalog.source == CatalogSource::Builtin {
        output.info("Offline deployments cannot be queried later; use --wait to follow one")?;
    } else {
        output.info(&format!(
            "Follow it with: deckhand status {}",
            request.request_id
        ))?;
    }
    Ok(())
}

fn report_outcome(request: DeploymentRequest, output: &OutputManager) -> CliResult<()> {
    if output.is_json() {
        output.json(&request)?;
    }

    match request.status() {
        DeploymentStatus::Succeeded => {
            output.success(&format!("Deployment {} succeeded", request.request_id))?;
            Ok(())
        }
        _ => Err(CliError::DeploymentFailed {
            reason: request
                .error()
                .unwrap_or("the backend gave no reason")
                .to_string(),
            request_id: request.request_id.to_string(),
        }),
    }
}

/// Ask before provisioning; skipped when stdin is not a terminal.
#[cfg(feature = "interactive")]
fn confirm(template: &Template) -> CliResult<()> {
    use std::io::IsTerminal;

    if !std::io::stdin().is_terminal() {
        return Ok(());
    }

    let proceed = dialoguer::Confirm::new()
        .with_prompt(format!("Deploy {template}?"))
        .default(false)
        .interact()
        .map_err(|e| CliError::InvalidInput {
            message: format!("confirmation prompt failed: {e}"),
        })?;

    if proceed { Ok(()) } else { Err(CliError::Cancelled) }
}

#[cfg(not(feature = "interactive"))]
fn confirm(_template: &Template) -> CliResult<()> {
    Ok(())
}
