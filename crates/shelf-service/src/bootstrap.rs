//! Service wiring shared by the server and the CLI.

use std::sync::Arc;

use tracing::info;

use shelf_cache::EdgeCacheManager;
use shelf_core::config::AppConfig;
use shelf_core::result::AppResult;
use shelf_core::traits::{EdgeCache, ResourceSource};
use shelf_drive::SourceManager;

use crate::library::LibraryService;
use crate::library::notifier::CacheNotifier;
use crate::search::SearchService;

/// Every long-lived service, built once per process.
#[derive(Debug, Clone)]
pub struct AppServices {
    /// Snapshot owner and query surface.
    pub library: Arc<LibraryService>,
    /// Full-text search.
    pub search: SearchService,
}

impl AppServices {
    /// Build the listing source and edge cache from `config` and wire them up.
    pub async fn build(config: &AppConfig) -> AppResult<Self> {
        let source: Arc<dyn ResourceSource> = Arc::new(SourceManager::new(&config.drive).await?);
        let cache: Arc<dyn EdgeCache> = Arc::new(EdgeCacheManager::new(&config.edge_cache)?);
        info!(
            source = source.provider_type(),
            edge_cache = cache.provider_type(),
            drive_type = %config.drive.drive_type,
            "Services initialized"
        );
        Ok(Self::from_parts(source, cache, config))
    }

    /// Wire already constructed collaborators.
    pub fn from_parts(
        source: Arc<dyn ResourceSource>,
        cache: Arc<dyn EdgeCache>,
        config: &AppConfig,
    ) -> Self {
        let library = Arc::new(LibraryService::new(
            Arc::clone(&source),
            CacheNotifier::new(cache),
            config.drive.clone(),
        ));
        let search = SearchService::new(source, Arc::clone(&library));
        Self { library, search }
    }
}
