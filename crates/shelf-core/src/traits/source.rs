//! Listing service trait for pluggable drive backends.

use async_trait::async_trait;

use crate::result::AppResult;
use crate::types::{DriveInfo, ListScope, ResourcePage};

/// Read-only view of the external drive service.
///
/// Implementations exist for the Drive REST API and for an in-memory
/// fixture. Every call is a single round trip; callers own pagination by
/// passing back `next_page_token` until it comes back empty.
#[async_trait]
pub trait ResourceSource: Send + Sync + std::fmt::Debug + 'static {
    /// Return the provider type name (e.g., "google", "fixture").
    fn provider_type(&self) -> &str;

    /// List every team drive visible to the account.
    async fn list_drives(&self) -> AppResult<Vec<DriveInfo>>;

    /// List one page of the items covered by `scope`.
    async fn list_children(
        &self,
        scope: &ListScope,
        page_token: Option<&str>,
    ) -> AppResult<ResourcePage>;

    /// Full-text search for non-folder, non-trashed items within `scope`.
    async fn search(
        &self,
        query: &str,
        scope: &ListScope,
        page_token: Option<&str>,
    ) -> AppResult<ResourcePage>;

    /// Read a rectangular range of cell values from a spreadsheet.
    async fn sheet_values(&self, spreadsheet_id: &str, range: &str)
        -> AppResult<Vec<Vec<String>>>;
}
