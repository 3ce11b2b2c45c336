//! Shared test helpers for integration tests.

#![allow(dead_code)]

use std::sync::Arc;

use chrono::{DateTime, TimeZone, Utc};

use shelf_cache::memory::MemoryEdgeCache;
use shelf_core::config::cache::MemoryEdgeCacheConfig;
use shelf_core::config::{AppConfig, DriveConfig, DriveType};
use shelf_core::types::{FOLDER_MIME_TYPE, RawResource};
use shelf_drive::providers::{LibraryFixture, MemoryResourceSource};
use shelf_service::AppServices;

/// Fixture shared by the integration tests.
pub const FIXTURE_PATH: &str = "tests/fixtures/library.json";

/// Document MIME type.
pub const DOC: &str = "application/vnd.google-apps.document";

/// A library wired to in-memory collaborators
pub struct TestLibrary {
    /// Listing source; shares state with the one the services use
    pub source: MemoryResourceSource,
    /// Edge cache; shares state with the one the services use
    pub cache: Arc<MemoryEdgeCache>,
    /// The services under test
    pub services: AppServices,
}

impl TestLibrary {
    /// Serve `fixture` with the given drive scope
    pub fn new(fixture: LibraryFixture, drive: DriveConfig) -> Self {
        let source = MemoryResourceSource::new(fixture).with_page_size(3);
        let cache = Arc::new(MemoryEdgeCache::new(&MemoryEdgeCacheConfig::default()));
        let config = AppConfig {
            drive,
            ..AppConfig::default()
        };
        let services = AppServices::from_parts(
            Arc::new(source.clone()),
            Arc::clone(&cache) as Arc<dyn shelf_core::traits::EdgeCache>,
            &config,
        );
        Self {
            source,
            cache,
            services,
        }
    }

    /// Serve the shared JSON fixture with the given drive scope
    pub fn from_fixture_file(drive: DriveConfig) -> Self {
        Self::new(load_fixture(), drive)
    }

    /// Rebuild and return the published snapshot
    pub async fn refresh(&self) -> Arc<shelf_entity::snapshot::Snapshot> {
        self.services
            .library
            .refresh()
            .await
            .expect("Rebuild failed")
    }

    /// Site path of `id` in the current snapshot
    pub fn path_of(&self, id: &str) -> Option<String> {
        self.services.library.get_meta(id).and_then(|r| r.path)
    }
}

/// Parse the shared JSON fixture
pub fn load_fixture() -> LibraryFixture {
    let raw = std::fs::read_to_string(FIXTURE_PATH).expect("Failed to read fixture");
    serde_json::from_str(&raw).expect("Failed to parse fixture")
}

/// Team mode scoped to `drive_id`
pub fn team(drive_id: &str) -> DriveConfig {
    DriveConfig {
        drive_type: DriveType::Team,
        drive_id: Some(drive_id.to_string()),
        ..DriveConfig::default()
    }
}

/// Folder mode scoped to `folder_id`
pub fn folder(folder_id: &str) -> DriveConfig {
    DriveConfig {
        drive_type: DriveType::Folder,
        drive_id: Some(folder_id.to_string()),
        ..DriveConfig::default()
    }
}

/// Org mode with the virtual root `org_name`
pub fn org(org_name: &str) -> DriveConfig {
    DriveConfig {
        drive_type: DriveType::Org,
        org_name: Some(org_name.to_string()),
        ..DriveConfig::default()
    }
}

/// A record as the listing service returns it
pub fn raw(id: &str, name: &str, mime: &str, parents: &[&str]) -> RawResource {
    RawResource {
        id: id.into(),
        name: Some(name.into()),
        mime_type: mime.into(),
        parents: Some(parents.iter().map(|p| p.to_string()).collect()),
        modified_time: at(1),
        ..RawResource::default()
    }
}

/// A folder record
pub fn folder_record(id: &str, name: &str, parents: &[&str]) -> RawResource {
    raw(id, name, FOLDER_MIME_TYPE, parents)
}

/// A fixed timestamp on 2024-05-01 at `hour`
pub fn at(hour: u32) -> Option<DateTime<Utc>> {
    Utc.with_ymd_and_hms(2024, 5, 1, hour, 0, 0).single()
}
