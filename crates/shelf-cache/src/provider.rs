//! Edge cache manager that dispatches to the configured client.

use std::sync::Arc;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use tracing::info;

use shelf_core::config::EdgeCacheConfig;
use shelf_core::error::AppError;
use shelf_core::result::AppResult;
use shelf_core::traits::{EdgeCache, PurgeError, PurgeRequest};

/// Edge cache manager that wraps the configured client.
///
/// The client is selected at construction time based on configuration.
#[derive(Debug, Clone)]
pub struct EdgeCacheManager {
    /// The inner edge cache client.
    inner: Arc<dyn EdgeCache>,
}

impl EdgeCacheManager {
    /// Create a new edge cache manager from configuration.
    pub fn new(config: &EdgeCacheConfig) -> AppResult<Self> {
        let inner: Arc<dyn EdgeCache> = match config.provider.as_str() {
            #[cfg(feature = "http")]
            "http" => {
                info!(base_url = ?config.base_url, "Initializing HTTP edge cache");
                Arc::new(crate::http::HttpEdgeCache::new(config)?)
            }
            #[cfg(feature = "memory")]
            "memory" => {
                info!("Initializing in-memory edge cache");
                Arc::new(crate::memory::MemoryEdgeCache::new(&config.memory))
            }
            other => {
                return Err(AppError::configuration(format!(
                    "Unknown edge cache provider: '{other}'. Supported: memory, http"
                )));
            }
        };

        Ok(Self { inner })
    }

    /// Create an edge cache manager from an existing client (for testing).
    pub fn from_cache(cache: Arc<dyn EdgeCache>) -> Self {
        Self { inner: cache }
    }

    /// Get a reference to the inner client.
    pub fn cache(&self) -> &dyn EdgeCache {
        self.inner.as_ref()
    }
}

#[async_trait]
impl EdgeCache for EdgeCacheManager {
    fn provider_type(&self) -> &str {
        self.inner.provider_type()
    }

    async fn purge(&self, request: &PurgeRequest) -> Result<(), PurgeError> {
        self.inner.purge(request).await
    }

    async fn redirect(
        &self,
        from: &str,
        to: &str,
        modified: Option<DateTime<Utc>>,
    ) -> Result<(), PurgeError> {
        self.inner.redirect(from, to, modified).await
    }
}
