//! Shelf Server: documentation mirrored from a cloud drive
//!
//! Main entry point that wires all crates together and keeps the library
//! snapshot fresh until shutdown.

use std::sync::Arc;

use tokio::sync::watch;
use tracing_subscriber::{EnvFilter, fmt};

use shelf_core::config::{AppConfig, LogFormat};
use shelf_core::error::AppError;
use shelf_service::AppServices;
use shelf_worker::RefreshRunner;

#[tokio::main]
async fn main() {
    let config = match load_configuration() {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Failed to load configuration: {e}");
            std::process::exit(1);
        }
    };

    init_logging(&config);

    if let Err(e) = run(config).await {
        tracing::error!("Server error: {e}");
        std::process::exit(1);
    }
}

/// Load configuration from file and environment
fn load_configuration() -> Result<AppConfig, AppError> {
    let config_path =
        std::env::var("SHELF_CONFIG").unwrap_or_else(|_| "config/default.toml".to_string());
    let env = std::env::var("SHELF_ENV").unwrap_or_else(|_| "development".to_string());

    AppConfig::load(&config_path, &env)
}

/// Initialize tracing/logging
fn init_logging(config: &AppConfig) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.logging.level));

    match config.logging.format {
        LogFormat::Json => {
            fmt()
                .json()
                .with_env_filter(filter)
                .with_target(true)
                .with_thread_ids(true)
                .init();
        }
        LogFormat::Pretty => {
            fmt()
                .pretty()
                .with_env_filter(filter)
                .with_target(true)
                .init();
        }
    }
}

/// Main server run function
async fn run(config: AppConfig) -> Result<(), AppError> {
    tracing::info!("Starting Shelf v{}", env!("CARGO_PKG_VERSION"));

    // ── Step 1: Listing source, edge cache, services ─────────────
    let services = AppServices::build(&config).await?;

    // ── Step 2: Refresh loop ─────────────────────────────────────
    let (shutdown_tx, shutdown_rx) = watch::channel(false);
    let runner = Arc::new(RefreshRunner::new(
        Arc::clone(&services.library),
        config.refresh.clone(),
    ));
    let runner_handle = {
        let runner = Arc::clone(&runner);
        tokio::spawn(async move { runner.run(shutdown_rx).await })
    };

    // ── Step 3: Wait for shutdown ────────────────────────────────
    tokio::signal::ctrl_c()
        .await
        .map_err(|e| AppError::internal(format!("Failed to listen for shutdown signal: {e}")))?;
    tracing::info!("Shutdown signal received");

    let _ = shutdown_tx.send(true);
    if let Err(e) = runner_handle.await {
        tracing::warn!("Refresh runner ended abnormally: {e}");
    }

    tracing::info!("Shelf stopped");
    Ok(())
}
