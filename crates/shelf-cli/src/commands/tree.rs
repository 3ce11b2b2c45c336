//! Navigation tree CLI command.

use clap::Args;

use crate::output::{self, OutputFormat};
use shelf_core::error::AppError;
use shelf_entity::snapshot::Snapshot;
use shelf_entity::tree::TreeNode;

/// Arguments for the tree command
#[derive(Debug, Args)]
pub struct TreeArgs {
    /// Org drive slug (defaults to the first tree)
    #[arg(short, long)]
    pub drive: Option<String>,
    /// Max depth
    #[arg(long, default_value = "3")]
    pub depth: usize,
}

/// Execute the tree command
pub async fn execute(
    args: &TreeArgs,
    config_path: &str,
    env: &str,
    format: OutputFormat,
) -> Result<(), AppError> {
    let services = super::open_library(config_path, env).await?;
    let library = &services.library;

    let tree = match &args.drive {
        Some(slug) => library
            .get_tree_for_drive_slug(slug)
            .await?
            .ok_or_else(|| AppError::not_found(format!("No drive with slug '{slug}'")))?,
        None => library
            .get_tree()
            .await?
            .ok_or_else(|| AppError::not_found("The library has no trees"))?,
    };

    match format {
        OutputFormat::Json => output::print_json(&tree),
        OutputFormat::Table => {
            let snapshot = library.ready().await?;
            println!("/");
            print_children(&tree, &snapshot, 1, args.depth);
        }
    }

    Ok(())
}

fn print_children(node: &TreeNode, snapshot: &Snapshot, depth: usize, max_depth: usize) {
    if depth > max_depth {
        return;
    }
    let indent = "  ".repeat(depth);
    for (slug, child) in node.sorted_children() {
        let name = snapshot
            .get(&child.id)
            .map(|r| r.pretty_name.as_str())
            .unwrap_or_default();
        let marker = if child.is_branch() { "/" } else { "" };
        let home = if child.home.is_some() { " [home]" } else { "" };
        println!("{indent}├── {slug}{marker}  {name}{home}");
        print_children(child, snapshot, depth + 1, max_depth);
    }
}
