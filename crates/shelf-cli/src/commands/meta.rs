//! Resource metadata CLI command.

use clap::Args;

use crate::output::{self, OutputFormat};
use shelf_core::error::AppError;

/// Arguments for the meta command
#[derive(Debug, Args)]
pub struct MetaArgs {
    /// Resource ID
    pub id: String,
}

/// Execute the meta command
pub async fn execute(
    args: &MetaArgs,
    config_path: &str,
    env: &str,
    format: OutputFormat,
) -> Result<(), AppError> {
    let services = super::open_library(config_path, env).await?;
    let resource = services
        .library
        .get_meta(&args.id)
        .ok_or_else(|| AppError::not_found(format!("Resource '{}' not found", args.id)))?;

    match format {
        OutputFormat::Json => output::print_json(&resource),
        OutputFormat::Table => {
            let path = resource.path.as_deref().unwrap_or("-");
            let folder = resource
                .folder
                .as_ref()
                .map(|f| f.pretty_name.as_str())
                .unwrap_or("-");
            let modified = resource
                .modified_time
                .map(|t| t.format("%Y-%m-%d %H:%M").to_string())
                .unwrap_or_else(|| "-".to_string());

            output::print_kv("ID", &resource.id);
            output::print_kv("Name", &resource.pretty_name);
            output::print_kv("Slug", &resource.slug);
            output::print_kv("Type", resource.resource_type.as_str());
            output::print_kv("Path", path);
            output::print_kv("Folder", folder);
            output::print_kv("Tags", &resource.tags.join(", "));
            output::print_kv("Home", &resource.is_home.to_string());
            output::print_kv("In trash", &resource.in_trash.to_string());
            output::print_kv("Modified", &modified);
        }
    }

    Ok(())
}
