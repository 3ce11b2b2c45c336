//! End-to-end wiring from the shipped configuration file.

mod helpers;

use helpers::FIXTURE_PATH;
use shelf_core::config::{AppConfig, DriveType, SourceProvider};
use shelf_core::traits::ResourceSource;
use shelf_drive::SourceManager;
use shelf_service::AppServices;

fn default_config() -> AppConfig {
    AppConfig::load("config/default.toml", "test").expect("default config loads")
}

#[test]
fn test_default_config_points_at_fixture() {
    let config = default_config();
    assert_eq!(config.drive.drive_type, DriveType::Team);
    assert_eq!(config.drive.drive_id.as_deref(), Some("drive-eng"));
    assert_eq!(config.drive.provider, SourceProvider::Fixture);
    assert_eq!(config.drive.fixture_path.as_deref(), Some(FIXTURE_PATH));
    assert_eq!(config.edge_cache.provider, "memory");
    assert!(config.refresh.enabled);
}

#[tokio::test]
async fn test_source_manager_serves_fixture() {
    let config = default_config();
    let manager = SourceManager::new(&config.drive).await.unwrap();
    assert_eq!(manager.source().provider_type(), "fixture");

    let drives = manager.source().list_drives().await.unwrap();
    assert_eq!(drives.len(), 2);
}

#[tokio::test]
async fn test_services_build_from_config() {
    let config = default_config();
    let services = AppServices::build(&config).await.unwrap();

    let snapshot = services.library.ready().await.unwrap();
    assert_eq!(snapshot.root_ids, vec!["drive-eng"]);
    assert!(services.library.get_all_routes().contains("/guides/local-setup"));

    let results = services.search.run("deploying").await.unwrap();
    assert_eq!(results.len(), 1);
    assert_eq!(results[0].id, "d-deploys");
}
