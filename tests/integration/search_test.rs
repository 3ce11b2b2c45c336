//! Search integration tests.

mod helpers;

use helpers::*;
use shelf_core::error::ErrorKind;
use shelf_entity::resource::Resource;

fn ids(results: &[Resource]) -> Vec<&str> {
    results.iter().map(|r| r.id.as_str()).collect()
}

#[tokio::test]
async fn test_team_search_drops_trashed_and_hidden() {
    let lib = TestLibrary::from_fixture_file(team("drive-eng"));
    lib.refresh().await;

    let results = lib.services.search.run("setup").await.unwrap();
    assert_eq!(ids(&results), vec!["d-setup", "d-deploys"]);
    assert_eq!(results[0].path.as_deref(), Some("/guides/local-setup"));
}

#[tokio::test]
async fn test_org_search_covers_every_drive() {
    let lib = TestLibrary::from_fixture_file(org("acme"));

    // Org searches wait for the first snapshot on their own.
    let results = lib.services.search.run("  setup ").await.unwrap();
    assert_eq!(ids(&results), vec!["d-setup", "d-deploys", "d-pricing"]);
}

#[tokio::test]
async fn test_folder_search_stays_inside_folder() {
    let lib = TestLibrary::from_fixture_file(folder("f-guides"));
    lib.refresh().await;

    let results = lib.services.search.run("setup").await.unwrap();
    assert_eq!(ids(&results), vec!["d-setup", "d-deploys"]);
}

#[tokio::test]
async fn test_search_matches_names() {
    let lib = TestLibrary::from_fixture_file(team("drive-eng"));
    lib.refresh().await;

    let results = lib.services.search.run("reading").await.unwrap();
    assert_eq!(ids(&results), vec!["s-reading"]);
    assert!(lib.services.search.run("nothing-matches").await.unwrap().is_empty());
}

#[tokio::test]
async fn test_blank_query_is_rejected() {
    let lib = TestLibrary::from_fixture_file(team("drive-eng"));
    let err = lib.services.search.run("   ").await.unwrap_err();
    assert_eq!(err.kind, ErrorKind::Validation);
}
