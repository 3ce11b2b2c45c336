//! Complete listings assembled from paginated source calls.

use std::collections::HashSet;

use tracing::debug;

use shelf_core::config::{DriveConfig, DriveType};
use shelf_core::result::AppResult;
use shelf_core::traits::ResourceSource;
use shelf_core::types::{DriveInfo, ListScope, RawResource};

/// Every record found beneath one drive root.
#[derive(Debug, Clone, PartialEq)]
pub struct RootListing {
    /// Team drive or shared folder ID.
    pub root_id: String,
    /// Records in listing order.
    pub resources: Vec<RawResource>,
}

/// The full listing a rebuild works from.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct LibraryListing {
    /// Team drives of the organisation (org mode only).
    pub drives: Vec<DriveInfo>,
    /// One listing per root, in drive order.
    pub roots: Vec<RootListing>,
}

impl LibraryListing {
    /// IDs of every root.
    pub fn root_ids(&self) -> Vec<String> {
        self.roots.iter().map(|r| r.root_id.clone()).collect()
    }

    /// Total number of records across all roots.
    pub fn len(&self) -> usize {
        self.roots.iter().map(|r| r.resources.len()).sum()
    }

    /// Check if no records were listed.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// List everything the configured drive scope covers.
pub async fn fetch_library(
    source: &dyn ResourceSource,
    config: &DriveConfig,
) -> AppResult<LibraryListing> {
    match config.drive_type {
        DriveType::Org => {
            let drives = source.list_drives().await?;
            let mut roots = Vec::with_capacity(drives.len());
            for drive in &drives {
                let resources = fetch_all_files(source, config.drive_type, &drive.id).await?;
                roots.push(RootListing {
                    root_id: drive.id.clone(),
                    resources,
                });
            }
            Ok(LibraryListing { drives, roots })
        }
        DriveType::Team | DriveType::Folder => {
            let root_id = config.require_drive_id()?;
            let resources = fetch_all_files(source, config.drive_type, root_id).await?;
            Ok(LibraryListing {
                drives: Vec::new(),
                roots: vec![RootListing {
                    root_id: root_id.to_string(),
                    resources,
                }],
            })
        }
    }
}

/// List every record beneath `root_id`.
///
/// Team drives come back in one flat paginated listing. Shared folders only
/// report immediate children, so folder mode re-queries each newly found
/// level of folders until no new folders turn up.
pub async fn fetch_all_files(
    source: &dyn ResourceSource,
    drive_type: DriveType,
    root_id: &str,
) -> AppResult<Vec<RawResource>> {
    if drive_type != DriveType::Folder {
        return collect_pages(source, &ListScope::drive(root_id), 0).await;
    }

    let mut combined = Vec::new();
    let mut searched: HashSet<String> = HashSet::from([root_id.to_string()]);
    let mut parent_ids = vec![root_id.to_string()];

    while !parent_ids.is_empty() {
        let level =
            collect_pages(source, &ListScope::parents(parent_ids.clone()), combined.len()).await?;

        let next: Vec<String> = level
            .iter()
            .filter(|r| r.is_folder())
            .filter(|r| r.primary_parent().is_some_and(|p| parent_ids.iter().any(|id| id == p)))
            .filter_map(|r| searched.insert(r.id.clone()).then(|| r.id.clone()))
            .collect();

        combined.extend(level);
        parent_ids = next;
    }

    Ok(combined)
}

/// IDs of every folder beneath `root_id`, excluding the root itself.
pub async fn fetch_all_folders(
    source: &dyn ResourceSource,
    root_id: &str,
) -> AppResult<Vec<String>> {
    let mut folders = Vec::new();
    let mut searched: HashSet<String> = HashSet::from([root_id.to_string()]);
    let mut parent_ids = vec![root_id.to_string()];

    while !parent_ids.is_empty() {
        let level =
            collect_pages(source, &ListScope::child_folders(parent_ids.clone()), folders.len())
                .await?;

        let next: Vec<String> = level
            .into_iter()
            .filter(|r| r.primary_parent().is_some_and(|p| parent_ids.iter().any(|id| id == p)))
            .filter_map(|r| searched.insert(r.id.clone()).then_some(r.id))
            .collect();
        folders.extend(next.iter().cloned());
        parent_ids = next;
    }

    Ok(folders)
}

/// Follow continuation tokens until the listing is exhausted.
async fn collect_pages(
    source: &dyn ResourceSource,
    scope: &ListScope,
    so_far: usize,
) -> AppResult<Vec<RawResource>> {
    let mut resources = Vec::new();
    let mut page_token: Option<String> = None;

    loop {
        debug!(found = so_far + resources.len(), "Listing files");
        let page = source.list_children(scope, page_token.as_deref()).await?;
        resources.extend(page.resources);

        match page.next_page_token {
            Some(token) => page_token = Some(token),
            None => break,
        }
    }

    Ok(resources)
}
