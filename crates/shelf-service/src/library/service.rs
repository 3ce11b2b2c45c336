//! Owner of the current library snapshot.

use std::collections::BTreeSet;
use std::sync::{Arc, Mutex};
use std::time::Instant;

use dashmap::DashMap;
use futures::FutureExt;
use futures::future::{BoxFuture, Shared};
use tokio::sync::watch;
use tracing::{debug, info};

use shelf_core::config::DriveConfig;
use shelf_core::error::AppError;
use shelf_core::result::AppResult;
use shelf_core::traits::ResourceSource;
use shelf_core::types::DriveInfo;
use shelf_drive::fetch_library;
use shelf_entity::resource::Resource;
use shelf_entity::snapshot::{Catalog, Snapshot, TagIndex};
use shelf_entity::tree::{AdjacencyEntry, TreeNode};

use super::notifier::CacheNotifier;
use super::playlist::{PLAYLIST_RANGE, parse_playlist};
use super::rebuild::{Rebuild, rebuild};
use crate::naming::drive_slug;

type RefreshFuture = Shared<BoxFuture<'static, AppResult<Arc<Snapshot>>>>;

/// Serves queries from the current snapshot and replaces it on refresh.
///
/// Snapshots are immutable once published; a refresh swaps the whole
/// `Arc`. Concurrent [`refresh`](Self::refresh) calls share one rebuild.
pub struct LibraryService {
    /// Listing collaborator.
    source: Arc<dyn ResourceSource>,
    /// Edge cache delivery.
    notifier: CacheNotifier,
    /// Drive scope.
    config: DriveConfig,
    /// Current snapshot, `None` until the first rebuild succeeds.
    current: watch::Sender<Option<Arc<Snapshot>>>,
    /// Rebuild in progress, if any.
    inflight: Mutex<Option<RefreshFuture>>,
    /// Playlist contents by spreadsheet id.
    playlists: DashMap<String, Vec<String>>,
}

impl std::fmt::Debug for LibraryService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LibraryService")
            .field("source", &self.source.provider_type())
            .field("drive_type", &self.config.drive_type)
            .field("ready", &self.current.borrow().is_some())
            .finish_non_exhaustive()
    }
}

impl LibraryService {
    /// Creates a new library service with no snapshot.
    pub fn new(
        source: Arc<dyn ResourceSource>,
        notifier: CacheNotifier,
        config: DriveConfig,
    ) -> Self {
        let (current, _) = watch::channel(None);
        Self {
            source,
            notifier,
            config,
            current,
            inflight: Mutex::new(None),
            playlists: DashMap::new(),
        }
    }

    /// Drive scope this service mirrors.
    pub fn config(&self) -> &DriveConfig {
        &self.config
    }

    /// Listing collaborator.
    pub fn source(&self) -> &Arc<dyn ResourceSource> {
        &self.source
    }

    /// Rebuild the snapshot, or join the rebuild already running.
    ///
    /// On failure the previous snapshot stays current. The rebuild runs on
    /// its own task, so a panic inside it surfaces as an `Internal` error
    /// and the next call starts afresh.
    pub async fn refresh(self: &Arc<Self>) -> AppResult<Arc<Snapshot>> {
        let pending = {
            let mut slot = self.inflight.lock().unwrap_or_else(|e| e.into_inner());
            match slot.as_ref() {
                Some(pending) => {
                    debug!("Joining rebuild in progress");
                    pending.clone()
                }
                None => {
                    let this = Arc::clone(self);
                    let task = {
                        let this = Arc::clone(self);
                        tokio::spawn(async move { this.rebuild_once().await })
                    };
                    let pending = async move {
                        let result = task.await.unwrap_or_else(|e| {
                            Err(AppError::internal(format!("Library rebuild aborted: {e}")))
                        });
                        this.inflight
                            .lock()
                            .unwrap_or_else(|e| e.into_inner())
                            .take();
                        result
                    }
                    .boxed()
                    .shared();
                    *slot = Some(pending.clone());
                    pending
                }
            }
        };
        pending.await
    }

    async fn rebuild_once(&self) -> AppResult<Arc<Snapshot>> {
        let started = Instant::now();
        let listing = fetch_library(self.source.as_ref(), &self.config).await?;

        let previous = self.current.borrow().clone();
        let Rebuild {
            snapshot,
            instructions,
        } = rebuild(&listing, &self.config, previous.as_deref())?;

        let snapshot = Arc::new(snapshot);
        self.current.send_replace(Some(Arc::clone(&snapshot)));
        if previous.is_none() {
            info!(
                resources = snapshot.catalog.len(),
                trees = snapshot.trees.len(),
                "Library ready"
            );
        }
        debug!(
            files = snapshot.file_count(),
            elapsed_ms = started.elapsed().as_millis() as u64,
            "Library snapshot published"
        );

        self.notifier.dispatch(&instructions).await;
        Ok(snapshot)
    }

    /// The current snapshot, building the first one if needed.
    pub async fn ready(self: &Arc<Self>) -> AppResult<Arc<Snapshot>> {
        match self.snapshot() {
            Some(snapshot) => Ok(snapshot),
            None => self.refresh().await,
        }
    }

    /// The current snapshot without waiting.
    pub fn snapshot(&self) -> Option<Arc<Snapshot>> {
        self.current.borrow().clone()
    }

    /// Watch snapshot publications.
    pub fn subscribe(&self) -> watch::Receiver<Option<Arc<Snapshot>>> {
        self.current.subscribe()
    }

    /// First tree.
    pub async fn get_tree(self: &Arc<Self>) -> AppResult<Option<TreeNode>> {
        Ok(self.ready().await?.trees.first().cloned())
    }

    /// Every tree, in drive order.
    pub async fn get_all_trees(self: &Arc<Self>) -> AppResult<Vec<TreeNode>> {
        Ok(self.ready().await?.trees.clone())
    }

    /// Tree of the org drive whose cleaned slug is `slug`.
    pub async fn get_tree_for_drive_slug(
        self: &Arc<Self>,
        slug: &str,
    ) -> AppResult<Option<TreeNode>> {
        let snapshot = self.ready().await?;
        let tree = find_drive(&snapshot.drives, slug)
            .and_then(|drive| snapshot.trees.iter().find(|t| t.id == drive.id))
            .cloned();
        Ok(tree)
    }

    /// Whether an org drive has the cleaned slug `slug`.
    pub fn has_drive(&self, slug: &str) -> bool {
        self.snapshot()
            .is_some_and(|s| find_drive(&s.drives, slug).is_some())
    }

    /// Enriched resource by id.
    pub fn get_meta(&self, id: &str) -> Option<Resource> {
        self.snapshot().and_then(|s| s.get(id).cloned())
    }

    /// Ids tagged `tag`, in first-seen order.
    pub fn get_tagged(&self, tag: &str) -> Vec<String> {
        self.snapshot()
            .and_then(|s| s.tag_index.get(tag).map(<[String]>::to_vec))
            .unwrap_or_default()
    }

    /// The whole tag index.
    pub fn tag_index(&self) -> TagIndex {
        self.snapshot()
            .map(|s| s.tag_index.clone())
            .unwrap_or_default()
    }

    /// Adjacency entry of `id`.
    pub fn get_children(&self, id: &str) -> Option<AdjacencyEntry> {
        self.snapshot().and_then(|s| s.children_of(id).cloned())
    }

    /// Every site path.
    pub fn get_all_routes(&self) -> BTreeSet<String> {
        self.snapshot().map(|s| s.routes()).unwrap_or_default()
    }

    /// Drives of the organisation.
    pub fn get_org_drives(&self) -> Vec<DriveInfo> {
        self.snapshot().map(|s| s.drives.clone()).unwrap_or_default()
    }

    /// The whole catalog.
    pub fn get_docs_info(&self) -> Catalog {
        self.snapshot()
            .map(|s| s.catalog.clone())
            .unwrap_or_default()
    }

    /// Document ids listed in playlist spreadsheet `id`.
    ///
    /// Successful reads are kept for the lifetime of the service.
    pub async fn get_playlist(&self, id: &str) -> AppResult<Vec<String>> {
        if let Some(known) = self.playlists.get(id) {
            return Ok(known.clone());
        }

        let rows = self.source.sheet_values(id, PLAYLIST_RANGE).await?;
        let items = parse_playlist(&rows);
        debug!(playlist = id, items = items.len(), "Loaded playlist");
        self.playlists.insert(id.to_string(), items.clone());
        Ok(items)
    }
}

fn find_drive<'a>(drives: &'a [DriveInfo], slug: &str) -> Option<&'a DriveInfo> {
    drives.iter().find(|d| drive_slug(&d.name) == slug)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;
    use std::sync::atomic::{AtomicBool, Ordering};
    use std::time::Duration;

    use async_trait::async_trait;

    use shelf_cache::memory::MemoryEdgeCache;
    use shelf_core::config::DriveType;
    use shelf_core::config::cache::MemoryEdgeCacheConfig;
    use shelf_core::error::ErrorKind;
    use shelf_core::types::{FOLDER_MIME_TYPE, ListScope, RawResource, ResourcePage};
    use shelf_drive::providers::{LibraryFixture, MemoryResourceSource};

    const DOC: &str = "application/vnd.google-apps.document";

    fn raw(id: &str, name: &str, mime: &str, parents: &[&str]) -> RawResource {
        RawResource {
            id: id.into(),
            name: Some(name.into()),
            mime_type: mime.into(),
            parents: Some(parents.iter().map(|p| p.to_string()).collect()),
            ..RawResource::default()
        }
    }

    fn fixture() -> LibraryFixture {
        LibraryFixture {
            drives: vec![DriveInfo {
                id: "root".into(),
                name: "02 Engineering".into(),
            }],
            files: vec![
                raw("a", "A", FOLDER_MIME_TYPE, &["root"]),
                raw("b", "B | numbers", DOC, &["a"]),
                raw("c", "2-c home", DOC, &["a"]),
                raw("pl", "Reading | playlist", "application/vnd.google-apps.spreadsheet", &["a"]),
            ],
            sheets: HashMap::from([(
                "pl".to_string(),
                vec![
                    vec!["Link".to_string()],
                    vec!["https://docs.google.com/document/d/b/edit".to_string()],
                ],
            )]),
            texts: HashMap::new(),
        }
    }

    fn service(source: MemoryResourceSource, config: DriveConfig) -> Arc<LibraryService> {
        let cache = MemoryEdgeCache::new(&MemoryEdgeCacheConfig::default());
        Arc::new(LibraryService::new(
            Arc::new(source),
            CacheNotifier::new(Arc::new(cache)),
            config,
        ))
    }

    fn team_config() -> DriveConfig {
        DriveConfig {
            drive_id: Some("root".into()),
            ..DriveConfig::default()
        }
    }

    /// Source whose first listing call panics.
    #[derive(Debug)]
    struct PanicOnce {
        inner: MemoryResourceSource,
        tripped: AtomicBool,
    }

    #[async_trait]
    impl ResourceSource for PanicOnce {
        fn provider_type(&self) -> &str {
            "panic-once"
        }

        async fn list_drives(&self) -> AppResult<Vec<DriveInfo>> {
            self.inner.list_drives().await
        }

        async fn list_children(
            &self,
            scope: &ListScope,
            page_token: Option<&str>,
        ) -> AppResult<ResourcePage> {
            if !self.tripped.swap(true, Ordering::SeqCst) {
                panic!("listing blew up");
            }
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

    #[tokio::test]
    async fn test_queries_wait_for_first_rebuild() {
        let library = service(MemoryResourceSource::new(fixture()), team_config());
        assert!(library.snapshot().is_none());
        assert!(library.get_meta("b").is_none());

        let tree = library.get_tree().await.unwrap().unwrap();
        assert_eq!(tree.id, "root");
        assert!(library.snapshot().is_some());

        assert_eq!(library.get_meta("b").unwrap().path.as_deref(), Some("/a/b"));
        assert_eq!(library.get_tagged("numbers"), vec!["b"]);
        assert!(library.get_tagged("missing").is_empty());
        assert_eq!(library.tag_index().len(), 2);
        assert_eq!(library.get_children("a").unwrap().home.as_deref(), Some("c"));
        assert!(library.get_all_routes().contains("/a/reading"));
        assert_eq!(library.get_docs_info().len(), 4);
    }

    #[tokio::test(start_paused = true)]
    async fn test_concurrent_refreshes_share_one_rebuild() {
        let source = MemoryResourceSource::new(fixture()).with_latency(Duration::from_millis(50));
        let drive = source.clone();
        let library = service(source, team_config());

        let (first, second, third) =
            tokio::join!(library.refresh(), library.refresh(), library.refresh());
        let first = first.unwrap();
        assert!(Arc::ptr_eq(&first, &second.unwrap()));
        assert!(Arc::ptr_eq(&first, &third.unwrap()));
        assert_eq!(drive.listing_calls(), 1);

        // the slot is released once the rebuild finishes
        let next = library.refresh().await.unwrap();
        assert!(!Arc::ptr_eq(&first, &next));
        assert_eq!(drive.listing_calls(), 2);
    }

    #[tokio::test]
    async fn test_failed_rebuild_keeps_previous_snapshot() {
        let source = MemoryResourceSource::new(fixture());
        let drive = source.clone();
        let library = service(source, team_config());
        let first = library.refresh().await.unwrap();

        let mut broken = raw("x", "X", DOC, &["a"]);
        broken.name = None;
        drive.upsert(broken);

        let err = library.refresh().await.unwrap_err();
        assert_eq!(err.kind, ErrorKind::ContractViolation);
        assert!(Arc::ptr_eq(&first, &library.snapshot().unwrap()));
    }

    #[tokio::test]
    async fn test_panicking_rebuild_releases_the_slot() {
        let source = PanicOnce {
            inner: MemoryResourceSource::new(fixture()),
            tripped: AtomicBool::new(false),
        };
        let cache = MemoryEdgeCache::new(&MemoryEdgeCacheConfig::default());
        let library = Arc::new(LibraryService::new(
            Arc::new(source),
            CacheNotifier::new(Arc::new(cache)),
            team_config(),
        ));

        let err = library.refresh().await.unwrap_err();
        assert_eq!(err.kind, ErrorKind::Internal);
        assert!(library.snapshot().is_none());

        let snapshot = library.refresh().await.unwrap();
        assert_eq!(snapshot.get("b").and_then(|r| r.path.as_deref()), Some("/a/b"));
    }

    #[tokio::test]
    async fn test_refresh_picks_up_moves() {
        let source = MemoryResourceSource::new(fixture());
        let drive = source.clone();
        let library = service(source, team_config());
        library.refresh().await.unwrap();

        drive.upsert(raw("d", "D", FOLDER_MIME_TYPE, &["root"]));
        drive.set_parents("b", vec!["d".into()]);
        library.refresh().await.unwrap();

        assert_eq!(library.get_meta("b").unwrap().path.as_deref(), Some("/d/b"));
        assert!(!library.get_all_routes().contains("/a/b"));
    }

    #[tokio::test]
    async fn test_org_drive_lookup() {
        let mut fixture = fixture();
        fixture.drives.push(DriveInfo {
            id: "other".into(),
            name: "Sales".into(),
        });
        fixture.files.push(raw("p", "Pricing", DOC, &["other"]));
        let config = DriveConfig {
            drive_type: DriveType::Org,
            org_name: Some("acme".into()),
            ..DriveConfig::default()
        };
        let library = service(MemoryResourceSource::new(fixture), config);

        let sales = library.get_tree_for_drive_slug("sales").await.unwrap().unwrap();
        assert_eq!(sales.id, "other");
        assert!(library.has_drive("engineering"));
        assert!(!library.has_drive("02-engineering"));
        assert!(library.get_tree_for_drive_slug("nope").await.unwrap().is_none());
        assert_eq!(library.get_all_trees().await.unwrap().len(), 2);
        assert_eq!(library.get_org_drives().len(), 2);
    }

    #[tokio::test]
    async fn test_playlist_lookup() {
        let library = service(MemoryResourceSource::new(fixture()), team_config());
        assert_eq!(library.get_playlist("pl").await.unwrap(), vec!["b"]);
        assert_eq!(library.get_playlist("pl").await.unwrap(), vec!["b"]);

        let err = library.get_playlist("missing").await.unwrap_err();
        assert_eq!(err.kind, ErrorKind::NotFound);
    }
}
