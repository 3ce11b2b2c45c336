//! Site route listing CLI command.

use serde::Serialize;
use tabled::Tabled;

use crate::output::{self, OutputFormat};
use shelf_core::error::AppError;

/// Route display row
#[derive(Debug, Serialize, Tabled)]
struct RouteRow {
    /// Site path
    path: String,
}

/// Execute the routes command
pub async fn execute(config_path: &str, env: &str, format: OutputFormat) -> Result<(), AppError> {
    let services = super::open_library(config_path, env).await?;

    let rows: Vec<RouteRow> = services
        .library
        .get_all_routes()
        .into_iter()
        .map(|path| RouteRow { path })
        .collect();

    output::print_list(&rows, format, "No routes.");
    Ok(())
}
