//! In-memory edge cache implementation using the moka crate.

use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use dashmap::DashMap;
use moka::future::Cache;
use tracing::debug;

use shelf_core::config::cache::MemoryEdgeCacheConfig;
use shelf_core::traits::{EdgeCache, PurgeError, PurgeIgnore, PurgeRequest};
use shelf_entity::change::CacheInstruction;

use crate::keys;

/// A page the site has rendered and the edge is holding.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CachedPage {
    /// Modification time of the content the page was rendered from.
    pub modified: Option<DateTime<Utc>>,
}

/// In-memory edge cache using moka.
///
/// Tracks rendered pages, the last purge applied to each path and the
/// redirects in force. Every accepted instruction is appended to a journal.
#[derive(Debug, Clone)]
pub struct MemoryEdgeCache {
    /// Rendered pages keyed by [`keys::page`].
    pages: Cache<String, CachedPage>,
    /// Last purge id applied per path.
    purge_ids: Arc<DashMap<String, String>>,
    /// Redirect targets keyed by [`keys::redirect`].
    redirects: Arc<DashMap<String, String>>,
    /// Accepted instructions, in order.
    journal: Arc<Mutex<Vec<CacheInstruction>>>,
}

impl MemoryEdgeCache {
    /// Create a new in-memory edge cache from configuration.
    pub fn new(config: &MemoryEdgeCacheConfig) -> Self {
        let pages = Cache::builder()
            .max_capacity(config.max_capacity)
            .time_to_live(Duration::from_secs(config.time_to_live_seconds))
            .build();

        Self {
            pages,
            purge_ids: Arc::new(DashMap::new()),
            redirects: Arc::new(DashMap::new()),
            journal: Arc::new(Mutex::new(Vec::new())),
        }
    }

    /// Record that `url` was rendered from content modified at `modified`.
    pub async fn record_render(&self, url: &str, modified: Option<DateTime<Utc>>) {
        self.pages
            .insert(keys::page(url), CachedPage { modified })
            .await;
    }

    /// Check whether a page is cached at `url`.
    pub async fn is_cached(&self, url: &str) -> bool {
        self.pages.get(&keys::page(url)).await.is_some()
    }

    /// Current redirect target for `url`.
    pub fn redirect_target(&self, url: &str) -> Option<String> {
        self.redirects
            .get(&keys::redirect(url))
            .map(|entry| entry.value().clone())
    }

    /// Every accepted instruction so far.
    pub fn journal(&self) -> Vec<CacheInstruction> {
        self.journal
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .clone()
    }

    /// Drain the journal.
    pub fn take_journal(&self) -> Vec<CacheInstruction> {
        std::mem::take(&mut *self.journal.lock().unwrap_or_else(|e| e.into_inner()))
    }

    fn record(&self, instruction: CacheInstruction) {
        self.journal
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .push(instruction);
    }
}

#[async_trait]
impl EdgeCache for MemoryEdgeCache {
    fn provider_type(&self) -> &str {
        "memory"
    }

    async fn purge(&self, request: &PurgeRequest) -> Result<(), PurgeError> {
        let key = keys::page(&request.url);
        let cached = self.pages.get(&key).await;

        if cached.is_none() && !request.ignores(PurgeIgnore::Missing) {
            return Err(PurgeError::NotFound(request.url.clone()));
        }

        let purge_id = keys::purge_id(request.modified, request.edit_email.as_deref());
        if self
            .purge_ids
            .get(&request.url)
            .is_some_and(|last| *last == purge_id)
        {
            return Err(PurgeError::Duplicate(request.url.clone()));
        }

        if let Some(page) = &cached {
            let fresh = match (page.modified, request.modified) {
                (Some(cached_at), Some(requested)) => cached_at >= requested,
                _ => false,
            };
            if fresh && !request.ignores(PurgeIgnore::Modified) {
                return Err(PurgeError::NoFreshContent(request.url.clone()));
            }
        }

        self.pages.invalidate(&key).await;
        self.purge_ids.insert(request.url.clone(), purge_id);
        self.record(CacheInstruction::Purge(request.clone()));
        debug!(url = %request.url, "Purged page");
        Ok(())
    }

    async fn redirect(
        &self,
        from: &str,
        to: &str,
        modified: Option<DateTime<Utc>>,
    ) -> Result<(), PurgeError> {
        self.redirects
            .insert(keys::redirect(from), to.to_string());
        self.redirects.remove(&keys::redirect(to));
        self.pages.invalidate(&keys::page(from)).await;
        self.record(CacheInstruction::Redirect {
            from: from.to_string(),
            to: to.to_string(),
            modified,
        });
        debug!(from, to, "Recorded redirect");
        Ok(())
    }
}
