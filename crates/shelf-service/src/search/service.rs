//! Search over the listing service, resolved against the current snapshot.

use std::sync::Arc;

use tracing::{debug, error};

use shelf_core::config::DriveType;
use shelf_core::error::AppError;
use shelf_core::result::AppResult;
use shelf_core::traits::ResourceSource;
use shelf_core::types::{ListScope, RawResource};
use shelf_drive::fetch_all_folders;
use shelf_entity::resource::{HIDDEN_TAG, Resource};

use crate::library::LibraryService;

/// Runs full-text searches and maps hits to catalogued resources.
#[derive(Debug, Clone)]
pub struct SearchService {
    /// Listing collaborator.
    source: Arc<dyn ResourceSource>,
    /// Snapshot owner used to resolve hits.
    library: Arc<LibraryService>,
}

impl SearchService {
    /// Creates a new search service.
    pub fn new(source: Arc<dyn ResourceSource>, library: Arc<LibraryService>) -> Self {
        Self { source, library }
    }

    /// Search for `query` within the configured drive scope.
    ///
    /// Hits that are unknown to the current snapshot, trashed, or tagged
    /// `hidden` are dropped.
    pub async fn run(&self, query: &str) -> AppResult<Vec<Resource>> {
        let query = query.trim();
        if query.is_empty() {
            return Err(AppError::validation("Search query is required"));
        }

        let hits = self.search_scope(query).await.inspect_err(|e| {
            error!(query, error = %e, "Error when searching");
        })?;
        debug!(query, hits = hits.len(), "Search finished");

        Ok(hits
            .iter()
            .filter_map(|hit| self.library.get_meta(&hit.id))
            .filter(|r| !r.in_trash && !r.has_tag(HIDDEN_TAG))
            .collect())
    }

    async fn search_scope(&self, query: &str) -> AppResult<Vec<RawResource>> {
        let config = self.library.config();
        match config.drive_type {
            DriveType::Team => {
                let drive_id = config.require_drive_id()?;
                self.search_all(query, &ListScope::drive(drive_id)).await
            }
            DriveType::Org => {
                let snapshot = self.library.ready().await?;
                let mut hits = Vec::new();
                for drive in &snapshot.drives {
                    hits.extend(self.search_all(query, &ListScope::drive(&drive.id)).await?);
                }
                Ok(hits)
            }
            DriveType::Folder => {
                let root_id = config.require_drive_id()?;
                let mut parents = vec![root_id.to_string()];
                parents.extend(fetch_all_folders(self.source.as_ref(), root_id).await?);
                self.search_all(query, &ListScope::parents(parents)).await
            }
        }
    }

    async fn search_all(&self, query: &str, scope: &ListScope) -> AppResult<Vec<RawResource>> {
        let mut results = Vec::new();
        let mut page_token: Option<String> = None;
        loop {
            let page = self
                .source
                .search(query, scope, page_token.as_deref())
                .await?;
            results.extend(page.resources);
            match page.next_page_token {
                Some(token) => page_token = Some(token),
                None => break,
            }
        }
        Ok(results)
    }
}
