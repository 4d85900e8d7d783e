//! Implementation of the `deckhand list` command.

use std::io;

use deckhand_core::domain::Template;
use tracing::instrument;

use crate::{
    catalog,
    cli::{ListArgs, ListFormat},
    config::AppConfig,
    error::CliResult,
    output::OutputManager,
};

#[instrument(skip_all)]
pub async fn execute(args: ListArgs, config: AppConfig, output: OutputManager) -> CliResult<()> {
    let service = catalog::service(&config)?;
    let templates = service.list_templates().await?;

    let format = args.format.unwrap_or(if output.is_json() {
        ListFormat::Json
    } else {
        ListFormat::Table
    });

    match format {
        ListFormat::Table => {
            if templates.is_empty() {
                output.warning("The catalog is empty")?;
                return Ok(());
            }
            output.header("Available Templates:")?;
            let width = templates.iter().map(|t| t.name.len()).max().unwrap_or(0);
            for template in &templates {
                output.data(&format!(
                    "  {:>3}  {:<width$}  {}",
                    template.id.get(),
                    template.name,
                    template.description
                ))?;
            }
        }

        // JSON must stay parseable in pipes, so it bypasses quiet mode.
        ListFormat::Json => output.json(&templates)?,

        ListFormat::List => {
            for template in &templates {
                output.data(&template.name)?;
            }
        }

        ListFormat::Csv => {
            let document = csv_document(&templates)?;
            output.data(document.trim_end_matches('\n'))?;
        }
    }

    Ok(())
}

/// Header row plus one RFC 4180 record per template.
fn csv_document(templates: &[Template]) -> io::Result<String> {
    let mut writer = csv::Writer::from_writer(Vec::new());
    for template in templates {
        writer.serialize(template)?;
    }
    if templates.is_empty() {
        writer.write_record(["id", "name", "description"])?;
    }
    let bytes = writer.into_inner().map_err(|e| e.into_error())?;
    String::from_utf8(bytes).map_err(io::Error::other)
}
