//! In-memory listing source, optionally loaded from a JSON fixture.

use std::collections::{HashMap, HashSet, VecDeque};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, RwLock};
use std::time::Duration;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tracing::debug;

use shelf_core::error::{AppError, ErrorKind};
use shelf_core::result::AppResult;
use shelf_core::traits::ResourceSource;
use shelf_core::types::{DriveInfo, ListScope, RawResource, ResourcePage};

/// Everything the in-memory source serves.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct LibraryFixture {
    /// Team drives returned by `list_drives`.
    #[serde(default)]
    pub drives: Vec<DriveInfo>,
    /// Files and folders, in listing order.
    #[serde(default)]
    pub files: Vec<RawResource>,
    /// Spreadsheet cell values by spreadsheet ID.
    #[serde(default)]
    pub sheets: HashMap<String, Vec<Vec<String>>>,
    /// Searchable body text by file ID.
    #[serde(default)]
    pub texts: HashMap<String, String>,
}

/// Listing source that serves a [`LibraryFixture`] from memory.
///
/// Pages are cut at `page_size` records and continuation tokens are plain
/// offsets. The fixture can be mutated between calls to simulate edits on
/// the drive.
#[derive(Debug, Clone)]
pub struct MemoryResourceSource {
    state: Arc<RwLock<LibraryFixture>>,
    page_size: usize,
    latency: Option<Duration>,
    listing_calls: Arc<AtomicUsize>,
}

impl MemoryResourceSource {
    /// Create a source serving `fixture`.
    pub fn new(fixture: LibraryFixture) -> Self {
        Self {
            state: Arc::new(RwLock::new(fixture)),
            page_size: 1000,
            latency: None,
            listing_calls: Arc::new(AtomicUsize::new(0)),
        }
    }

    /// Load a fixture from a JSON file.
    pub async fn from_file(path: &str) -> AppResult<Self> {
        let raw = tokio::fs::read_to_string(path).await.map_err(|e| {
            AppError::with_source(
                ErrorKind::Configuration,
                format!("Failed to read fixture: {path}"),
                e,
            )
        })?;
        let fixture: LibraryFixture = serde_json::from_str(&raw)?;
        debug!(
            path,
            drives = fixture.drives.len(),
            files = fixture.files.len(),
            "Loaded library fixture"
        );
        Ok(Self::new(fixture))
    }

    /// Cut listing pages at `page_size` records.
    pub fn with_page_size(mut self, page_size: usize) -> Self {
        self.page_size = page_size.max(1);
        self
    }

    /// Delay every listing call by `latency`.
    pub fn with_latency(mut self, latency: Duration) -> Self {
        self.latency = Some(latency);
        self
    }

    /// Number of `list_drives` and `list_children` calls served so far.
    pub fn listing_calls(&self) -> usize {
        self.listing_calls.load(Ordering::SeqCst)
    }

    /// Insert a record, or replace the record with the same ID in place.
    pub fn upsert(&self, resource: RawResource) {
        let mut state = self.write();
        match state.files.iter_mut().find(|f| f.id == resource.id) {
            Some(existing) => *existing = resource,
            None => state.files.push(resource),
        }
    }

    /// Remove a record.
    pub fn remove(&self, id: &str) {
        self.write().files.retain(|f| f.id != id);
    }

    /// Replace the parents of a record.
    pub fn set_parents(&self, id: &str, parents: Vec<String>) {
        if let Some(file) = self.write().files.iter_mut().find(|f| f.id == id) {
            file.parents = Some(parents);
        }
    }

    /// Rename a record.
    pub fn rename(&self, id: &str, name: &str) {
        if let Some(file) = self.write().files.iter_mut().find(|f| f.id == id) {
            file.name = Some(name.to_string());
        }
    }

    fn read(&self) -> std::sync::RwLockReadGuard<'_, LibraryFixture> {
        self.state.read().unwrap_or_else(|e| e.into_inner())
    }

    fn write(&self) -> std::sync::RwLockWriteGuard<'_, LibraryFixture> {
        self.state.write().unwrap_or_else(|e| e.into_inner())
    }

    async fn simulate_latency(&self) {
        if let Some(latency) = self.latency {
            tokio::time::sleep(latency).await;
        }
    }

    /// Records covered by `scope`, in listing order.
    fn select(&self, scope: &ListScope) -> Vec<RawResource> {
        let state = self.read();
        match scope {
            ListScope::Drive { drive_id } => {
                let by_id: HashMap<&str, &RawResource> =
                    state.files.iter().map(|f| (f.id.as_str(), f)).collect();
                state
                    .files
                    .iter()
                    .filter(|f| descends_from(f, drive_id, &by_id))
                    .cloned()
                    .collect()
            }
            ListScope::Parents {
                parent_ids,
                folders_only,
            } => state
                .files
                .iter()
                .filter(|f| !folders_only || f.is_folder())
                .filter(|f| {
                    f.parents
                        .iter()
                        .flatten()
                        .any(|p| parent_ids.contains(p))
                })
                .cloned()
                .collect(),
        }
    }

    fn page(&self, records: Vec<RawResource>, page_token: Option<&str>) -> AppResult<ResourcePage> {
        let offset = match page_token {
            Some(token) => token
                .parse::<usize>()
                .map_err(|_| AppError::validation(format!("Invalid page token: '{token}'")))?,
            None => 0,
        };
        let end = (offset + self.page_size).min(records.len());
        let next_page_token = (end < records.len()).then(|| end.to_string());
        let resources = records.into_iter().skip(offset).take(end.saturating_sub(offset)).collect();
        Ok(ResourcePage {
            resources,
            next_page_token,
        })
    }
}

/// Whether any parent chain of `file` reaches `root_id`.
fn descends_from(file: &RawResource, root_id: &str, by_id: &HashMap<&str, &RawResource>) -> bool {
    let mut queue: VecDeque<&str> = file.parents.iter().flatten().map(String::as_str).collect();
    let mut seen = HashSet::new();

    while let Some(parent) = queue.pop_front() {
        if parent == root_id {
            return true;
        }
        if !seen.insert(parent) {
            continue;
        }
        if let Some(record) = by_id.get(parent) {
            queue.extend(record.parents.iter().flatten().map(String::as_str));
        }
    }
    false
}

#[async_trait]
impl ResourceSource for MemoryResourceSource {
    fn provider_type(&self) -> &str {
        "fixture"
    }

    async fn list_drives(&self) -> AppResult<Vec<DriveInfo>> {
        self.listing_calls.fetch_add(1, Ordering::SeqCst);
        self.simulate_latency().await;
        Ok(self.read().drives.clone())
    }

    async fn list_children(
        &self,
        scope: &ListScope,
        page_token: Option<&str>,
    ) -> AppResult<ResourcePage> {
        self.listing_calls.fetch_add(1, Ordering::SeqCst);
        self.simulate_latency().await;
        let records = self.select(scope);
        self.page(records, page_token)
    }

    async fn search(
        &self,
        query: &str,
        scope: &ListScope,
        page_token: Option<&str>,
    ) -> AppResult<ResourcePage> {
        self.simulate_latency().await;
        let needle = query.to_lowercase();
        let candidates = self.select(scope);
        let matches: Vec<RawResource> = {
            let state = self.read();
            candidates
                .into_iter()
                .filter(|f| !f.is_folder())
                .filter(|f| {
                    let in_name = f
                        .name
                        .as_deref()
                        .is_some_and(|n| n.to_lowercase().contains(&needle));
                    let in_text = state
                        .texts
                        .get(&f.id)
                        .is_some_and(|t| t.to_lowercase().contains(&needle));
                    in_name || in_text
                })
                .collect()
        };
        self.page(matches, page_token)
    }

    async fn sheet_values(
        &self,
        spreadsheet_id: &str,
        _range: &str,
    ) -> AppResult<Vec<Vec<String>>> {
        self.simulate_latency().await;
        self.read()
            .sheets
            .get(spreadsheet_id)
            .cloned()
            .ok_or_else(|| AppError::not_found(format!("Spreadsheet {spreadsheet_id} not found")))
    }
}
