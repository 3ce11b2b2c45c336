//! CLI command definitions and dispatch.

pub mod config;
pub mod meta;
pub mod routes;
pub mod search;
pub mod tags;
pub mod tree;

use clap::{Parser, Subcommand};
use serde::Serialize;
use tabled::Tabled;

use crate::output::OutputFormat;
use shelf_core::config::AppConfig;
use shelf_core::error::AppError;
use shelf_entity::resource::Resource;
use shelf_service::AppServices;

/// Shelf: documentation mirrored from a cloud drive
#[derive(Debug, Parser)]
#[command(name = "shelf", version, about, long_about = None)]
pub struct Cli {
    /// Path to configuration file
    #[arg(short, long, default_value = "config/default.toml")]
    pub config: String,

    /// Configuration overlay to apply (config/<env>.toml)
    #[arg(short, long, default_value = "development")]
    pub env: String,

    /// Output format
    #[arg(short, long, value_enum, default_value = "table")]
    pub format: OutputFormat,

    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Commands,
}

/// Top-level commands
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Print the navigation tree
    Tree(tree::TreeArgs),
    /// List every site path
    Routes,
    /// List tags, or the resources carrying one tag
    Tags(tags::TagsArgs),
    /// Show one resource
    Meta(meta::MetaArgs),
    /// Full-text search
    Search(search::SearchArgs),
    /// Configuration management
    Config(config::ConfigArgs),
}

impl Cli {
    /// Execute the CLI command
    pub async fn execute(&self) -> Result<(), AppError> {
        match &self.command {
            Commands::Tree(args) => tree::execute(args, &self.config, &self.env, self.format).await,
            Commands::Routes => routes::execute(&self.config, &self.env, self.format).await,
            Commands::Tags(args) => tags::execute(args, &self.config, &self.env, self.format).await,
            Commands::Meta(args) => meta::execute(args, &self.config, &self.env, self.format).await,
            Commands::Search(args) => {
                search::execute(args, &self.config, &self.env, self.format).await
            }
            Commands::Config(args) => {
                config::execute(args, &self.config, &self.env, self.format).await
            }
        }
    }
}

/// Helper: load configuration from file and environment
pub fn load_config(config_path: &str, env: &str) -> Result<AppConfig, AppError> {
    AppConfig::load(config_path, env)
}

/// Helper: build services and wait for the first snapshot
pub async fn open_library(config_path: &str, env: &str) -> Result<AppServices, AppError> {
    let config = load_config(config_path, env)?;
    let services = AppServices::build(&config).await?;
    services.library.ready().await?;
    Ok(services)
}

/// Resource display row
#[derive(Debug, Serialize, Tabled)]
pub struct ResourceRow {
    /// Resource ID
    pub id: String,
    /// Display name
    pub name: String,
    /// Resource type
    #[tabled(rename = "type")]
    #[serde(rename = "type")]
    pub resource_type: String,
    /// Site path or external link
    pub path: String,
    /// Tags
    pub tags: String,
}

impl From<&Resource> for ResourceRow {
    fn from(resource: &Resource) -> Self {
        Self {
            id: resource.id.clone(),
            name: resource.pretty_name.clone(),
            resource_type: resource.resource_type.to_string(),
            path: resource.path.clone().unwrap_or_else(|| "-".to_string()),
            tags: resource.tags.join(", "),
        }
    }
}
