//! Refresh runner: the loop that rebuilds the library on a fixed delay.

use std::sync::Arc;
use std::time::{Duration, Instant};

use tokio::sync::watch;
use tokio::time;

use shelf_core::config::RefreshConfig;
use shelf_service::LibraryService;

/// Periodically refreshes the library snapshot
#[derive(Debug)]
pub struct RefreshRunner {
    /// Snapshot owner
    library: Arc<LibraryService>,
    /// Refresh configuration
    config: RefreshConfig,
}

impl RefreshRunner {
    /// Create a new refresh runner
    pub fn new(library: Arc<LibraryService>, config: RefreshConfig) -> Self {
        Self { library, config }
    }

    /// Delay between the end of one rebuild and the start of the next
    pub fn interval(&self) -> Duration {
        Duration::from_secs(self.config.interval_seconds)
    }

    /// Start the runner; runs until the cancel signal is received
    ///
    /// The first rebuild starts immediately. With the periodic loop
    /// disabled, the runner returns after that first rebuild.
    pub async fn run(&self, mut cancel: watch::Receiver<bool>) {
        let interval = self.interval();
        tracing::info!(
            enabled = self.config.enabled,
            interval_secs = interval.as_secs(),
            "Refresh runner started"
        );

        loop {
            self.tick().await;

            if !self.config.enabled {
                tracing::info!("Periodic refresh disabled, runner exiting");
                return;
            }

            tokio::select! {
                _ = cancel.changed() => {
                    if *cancel.borrow() {
                        tracing::info!("Refresh runner received shutdown signal");
                        break;
                    }
                }
                _ = time::sleep(interval) => {}
            }
        }

        tracing::info!("Refresh runner shut down complete");
    }

    /// Run one rebuild and log its outcome; returns whether it succeeded
    pub async fn tick(&self) -> bool {
        tracing::debug!("Updating library...");
        let started = Instant::now();

        match self.library.refresh().await {
            Ok(snapshot) => {
                tracing::debug!(
                    resources = snapshot.catalog.len(),
                    elapsed_ms = started.elapsed().as_millis() as u64,
                    "Library updated"
                );
                true
            }
            Err(e) => {
                tracing::warn!(
                    error = %e,
                    transient = e.is_transient(),
                    "Failed updating library"
                );
                false
            }
        }
    }
}
