//! Edge cache notifications across rebuilds.

mod helpers;

use chrono::{DateTime, Utc};
use helpers::*;
use shelf_entity::change::CacheInstruction;

fn modified(lib: &TestLibrary, id: &str) -> Option<DateTime<Utc>> {
    lib.services.library.get_meta(id).and_then(|r| r.modified_time)
}

fn purges_of<'a>(journal: &'a [CacheInstruction], url: &str) -> Vec<&'a CacheInstruction> {
    journal
        .iter()
        .filter(|i| matches!(i, CacheInstruction::Purge(request) if request.url == url))
        .collect()
}

#[tokio::test]
async fn test_first_rebuild_sends_no_trash_purges() {
    let lib = TestLibrary::from_fixture_file(team("drive-eng"));
    lib.cache.record_render("/trash/old-setup", at(1)).await;
    lib.refresh().await;

    assert!(lib.cache.journal().iter().all(|i| !i.is_trash_purge()));
    assert!(lib.cache.is_cached("/trash/old-setup").await);
}

#[tokio::test]
async fn test_move_redirects_old_path() {
    let lib = TestLibrary::from_fixture_file(team("drive-eng"));
    lib.refresh().await;
    lib.cache.record_render("/guides/local-setup", modified(&lib, "d-setup")).await;
    lib.cache.take_journal();

    lib.source.set_parents("d-setup", vec!["drive-eng".into()]);
    lib.refresh().await;

    assert_eq!(lib.path_of("d-setup").as_deref(), Some("/local-setup"));
    assert_eq!(
        lib.cache.redirect_target("/guides/local-setup").as_deref(),
        Some("/local-setup")
    );
    assert!(!lib.cache.is_cached("/guides/local-setup").await);

    let journal = lib.cache.take_journal();
    let redirects: Vec<_> = journal
        .iter()
        .filter(|i| matches!(i, CacheInstruction::Redirect { .. }))
        .collect();
    assert_eq!(redirects.len(), 1);
    assert_eq!(redirects[0].path(), "/local-setup");
}

#[tokio::test]
async fn test_trashing_purges_old_path() {
    let lib = TestLibrary::from_fixture_file(team("drive-eng"));
    lib.refresh().await;
    lib.cache.record_render("/guides/deploying", modified(&lib, "d-deploys")).await;
    lib.cache.take_journal();

    lib.source.set_parents("d-deploys", vec!["f-trash".into()]);
    lib.refresh().await;

    assert!(lib.services.library.get_meta("d-deploys").is_some_and(|r| r.in_trash));
    assert!(!lib.cache.is_cached("/guides/deploying").await);

    let journal = lib.cache.take_journal();
    let purges = purges_of(&journal, "/guides/deploying");
    assert_eq!(purges.len(), 1);
    let CacheInstruction::Purge(request) = purges[0] else {
        unreachable!();
    };
    assert_eq!(request.edit_email.as_deref(), Some("itemRemoved"));
    assert!(
        journal
            .iter()
            .all(|i| !matches!(i, CacheInstruction::Redirect { .. }))
    );
}

#[tokio::test]
async fn test_restoring_from_trash_purges_new_path() {
    let lib = TestLibrary::from_fixture_file(team("drive-eng"));
    lib.refresh().await;
    lib.cache.take_journal();

    lib.source.set_parents("d-old-setup", vec!["f-guides".into()]);
    lib.refresh().await;

    assert_eq!(lib.path_of("d-old-setup").as_deref(), Some("/guides/old-setup"));
    let journal = lib.cache.take_journal();
    let purges = purges_of(&journal, "/guides/old-setup");
    assert_eq!(purges.len(), 1);
    assert!(purges[0].is_trash_purge());
}

#[tokio::test]
async fn test_deleting_purges_old_path() {
    let lib = TestLibrary::from_fixture_file(team("drive-eng"));
    lib.refresh().await;
    lib.cache.take_journal();

    lib.source.remove("d-draft");
    lib.refresh().await;

    assert!(lib.services.library.get_meta("d-draft").is_none());
    let journal = lib.cache.take_journal();
    let purges = purges_of(&journal, "/guides/secret-draft");
    assert_eq!(purges.len(), 1);
    let CacheInstruction::Purge(request) = purges[0] else {
        unreachable!();
    };
    assert_eq!(request.edit_email.as_deref(), Some("itemRemoved"));
}

#[tokio::test]
async fn test_content_update_purges_stale_page() {
    let lib = TestLibrary::from_fixture_file(team("drive-eng"));
    lib.refresh().await;
    lib.cache.record_render("/guides/local-setup", modified(&lib, "d-setup")).await;

    // Nothing changed: the cached copy is fresh and survives.
    lib.refresh().await;
    assert!(lib.cache.is_cached("/guides/local-setup").await);
    assert!(purges_of(&lib.cache.take_journal(), "/guides/local-setup").is_empty());

    let mut edited = load_fixture()
        .files
        .into_iter()
        .find(|f| f.id == "d-setup")
        .expect("fixture has d-setup");
    edited.modified_time = at(12);
    lib.source.upsert(edited);
    lib.refresh().await;

    assert!(!lib.cache.is_cached("/guides/local-setup").await);
    let journal = lib.cache.take_journal();
    assert_eq!(purges_of(&journal, "/guides/local-setup").len(), 1);
}
