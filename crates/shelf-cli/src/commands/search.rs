//! Full-text search CLI command.

use clap::Args;

use super::ResourceRow;
use crate::output::{self, OutputFormat};
use shelf_core::error::AppError;

/// Arguments for the search command
#[derive(Debug, Args)]
pub struct SearchArgs {
    /// Search query
    pub query: String,
}

/// Execute the search command
pub async fn execute(
    args: &SearchArgs,
    config_path: &str,
    env: &str,
    format: OutputFormat,
) -> Result<(), AppError> {
    let services = super::open_library(config_path, env).await?;
    let results = services.search.run(&args.query).await?;

    let rows: Vec<ResourceRow> = results.iter().map(ResourceRow::from).collect();
    output::print_list(&rows, format, "No matching documents.");
    Ok(())
}
