//! Source manager that dispatches to the configured listing source.

use std::sync::Arc;

use async_trait::async_trait;
use tracing::info;

use shelf_core::config::{DriveConfig, SourceProvider};
use shelf_core::error::AppError;
use shelf_core::result::AppResult;
use shelf_core::traits::ResourceSource;
use shelf_core::types::{DriveInfo, ListScope, ResourcePage};

use crate::providers::{GoogleDriveSource, MemoryResourceSource};

/// Source manager that wraps the configured listing source.
///
/// The source is selected at construction time based on configuration.
#[derive(Debug, Clone)]
pub struct SourceManager {
    /// The inner listing source.
    inner: Arc<dyn ResourceSource>,
}

impl SourceManager {
    /// Create a new source manager from configuration.
    pub async fn new(config: &DriveConfig) -> AppResult<Self> {
        let inner: Arc<dyn ResourceSource> = match config.provider {
            SourceProvider::Google => {
                info!(api = %config.api_base_url, "Initializing Drive API source");
                Arc::new(GoogleDriveSource::new(config)?)
            }
            SourceProvider::Fixture => {
                let path = config.fixture_path.as_deref().ok_or_else(|| {
                    AppError::configuration("drive.fixture_path is required for the fixture provider")
                })?;
                info!(path, "Initializing fixture source");
                let source = MemoryResourceSource::from_file(path)
                    .await?
                    .with_page_size(config.page_size as usize);
                Arc::new(source)
            }
        };

        Ok(Self { inner })
    }

    /// Create a source manager from an existing source (for testing).
    pub fn from_source(source: Arc<dyn ResourceSource>) -> Self {
        Self { inner: source }
    }

    /// Get a reference to the inner source.
    pub fn source(&self) -> &dyn ResourceSource {
        self.inner.as_ref()
    }
}

#[async_trait]
impl ResourceSource for SourceManager {
    fn provider_type(&self) -> &str {
        self.inner.provider_type()
    }

    async fn list_drives(&self) -> AppResult<Vec<DriveInfo>> {
        self.inner.list_drives().await
    }

    async fn list_children(
        &self,
        scope: &ListScope,
        page_token: Option<&str>,
    ) -> AppResult<ResourcePage> {
        self.inner.list_children(scope, page_token).await
    }

    async fn search(
        &self,
        query: &str,
        scope: &ListScope,
        page_token: Option<&str>,
    ) -> AppResult<ResourcePage> {
        self.inner.search(query, scope, page_token).await
    }

    async fn sheet_values(
        &self,
        spreadsheet_id: &str,
        range: &str,
    ) -> AppResult<Vec<Vec<String>>> {
        self.inner.sheet_values(spreadsheet_id, range).await
    }
}
