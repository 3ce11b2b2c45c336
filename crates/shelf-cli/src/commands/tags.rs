//! Tag index CLI command.

use clap::Args;
use serde::Serialize;
use tabled::Tabled;

use super::ResourceRow;
use crate::output::{self, OutputFormat};
use shelf_core::error::AppError;

/// Arguments for the tags command
#[derive(Debug, Args)]
pub struct TagsArgs {
    /// Tag to list resources for (omit for every tag)
    pub tag: Option<String>,
}

/// Tag display row
#[derive(Debug, Serialize, Tabled)]
struct TagRow {
    /// Tag
    tag: String,
    /// Number of tagged resources
    count: usize,
}

/// Execute the tags command
pub async fn execute(
    args: &TagsArgs,
    config_path: &str,
    env: &str,
    format: OutputFormat,
) -> Result<(), AppError> {
    let services = super::open_library(config_path, env).await?;
    let library = &services.library;

    match &args.tag {
        Some(tag) => {
            let rows: Vec<ResourceRow> = library
                .get_tagged(&tag.to_lowercase())
                .iter()
                .filter_map(|id| library.get_meta(id))
                .map(|r| ResourceRow::from(&r))
                .collect();
            output::print_list(&rows, format, "No resources carry this tag.");
        }
        None => {
            let rows: Vec<TagRow> = library
                .tag_index()
                .iter()
                .map(|(tag, ids)| TagRow {
                    tag: tag.clone(),
                    count: ids.len(),
                })
                .collect();
            output::print_list(&rows, format, "No tags.");
        }
    }

    Ok(())
}
