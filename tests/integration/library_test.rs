//! Library rebuild and query integration tests.

mod helpers;

use helpers::*;
use shelf_entity::resource::ResourceType;

#[tokio::test]
async fn test_team_routes_and_paths() {
    let lib = TestLibrary::from_fixture_file(team("drive-eng"));
    lib.refresh().await;

    let routes: Vec<String> = lib.services.library.get_all_routes().into_iter().collect();
    assert_eq!(
        routes,
        vec![
            "/guides",
            "/guides/deploying",
            "/guides/local-setup",
            "/guides/reading-list",
            "/guides/secret-draft",
            "/trash",
            "/trash/old-setup",
        ]
    );

    assert_eq!(lib.path_of("d-guides-home").as_deref(), Some("/guides"));
    assert_eq!(lib.path_of("d-pricing"), None);
    assert_eq!(lib.services.library.get_docs_info().len(), 9);
}

#[tokio::test]
async fn test_unsupported_type_links_out() {
    let lib = TestLibrary::from_fixture_file(team("drive-eng"));
    lib.refresh().await;

    let slides = lib.services.library.get_meta("p-arch").expect("slides catalogued");
    assert_eq!(slides.resource_type, ResourceType::Presentation);
    assert!(!slides.render_in_library);
    assert_eq!(
        slides.path.as_deref(),
        Some("https://docs.google.com/presentation/d/p-arch/edit")
    );
    assert_eq!(
        slides.library_path.as_deref(),
        Some("/guides/architecture-overview")
    );

    let sheet = lib.services.library.get_meta("s-reading").expect("sheet catalogued");
    assert!(sheet.render_in_library);
    assert_eq!(sheet.path.as_deref(), Some("/guides/reading-list"));
}

#[tokio::test]
async fn test_resource_metadata() {
    let lib = TestLibrary::from_fixture_file(team("drive-eng"));
    lib.refresh().await;

    let setup = lib.services.library.get_meta("d-setup").expect("doc catalogued");
    assert_eq!(setup.pretty_name, "Local Setup");
    assert_eq!(setup.slug, "local-setup");
    assert_eq!(setup.sort, "2");
    assert_eq!(setup.tags, vec!["onboarding", "tooling"]);
    assert_eq!(setup.folder.as_ref().map(|f| f.id.as_str()), Some("f-guides"));
    assert_eq!(
        setup.top_level_folder.as_ref().map(|f| f.id.as_str()),
        Some("f-guides")
    );

    let home = lib.services.library.get_meta("d-guides-home").expect("home catalogued");
    assert!(home.is_home);
    assert_eq!(
        lib.services
            .library
            .get_children("f-guides")
            .and_then(|entry| entry.home)
            .as_deref(),
        Some("d-guides-home")
    );

    let trashed = lib.services.library.get_meta("d-old-setup").expect("trashed catalogued");
    assert!(trashed.in_trash);
    assert!(lib.services.library.get_meta("f-trash").is_some_and(|r| r.is_trash_can));
}

#[tokio::test]
async fn test_tree_shape() {
    let lib = TestLibrary::from_fixture_file(team("drive-eng"));
    lib.refresh().await;

    let tree = lib
        .services
        .library
        .get_tree()
        .await
        .unwrap()
        .expect("one tree in team mode");
    assert_eq!(tree.id, "drive-eng");
    assert!(tree.is_branch());

    let guides = tree.children.get("guides").expect("guides folder");
    assert_eq!(guides.home.as_deref(), Some("d-guides-home"));
    assert_eq!(guides.sort.as_deref(), Some("1"));

    let setup = tree.descend(["guides", "local-setup"]).expect("nested doc");
    assert!(!setup.is_branch());
    let crumbs: Vec<&str> = setup.breadcrumb.iter().map(|c| c.id.as_str()).collect();
    assert_eq!(crumbs, vec!["drive-eng", "drive-eng", "f-guides"]);
    assert!(!guides.children.contains_key("guides"));

    assert!(tree.children.contains_key("trash"));
}

#[tokio::test]
async fn test_tag_index() {
    let lib = TestLibrary::from_fixture_file(team("drive-eng"));
    lib.refresh().await;

    let library = &lib.services.library;
    assert_eq!(library.get_tagged("onboarding"), vec!["d-setup", "d-deploys"]);
    assert_eq!(library.get_tagged("tooling"), vec!["d-setup"]);
    assert_eq!(library.get_tagged("playlist"), vec!["s-reading"]);
    assert!(library.get_tagged("missing").is_empty());
    assert_eq!(library.tag_index().len(), 4);
}

#[tokio::test]
async fn test_playlist_lists_documents() {
    let lib = TestLibrary::from_fixture_file(team("drive-eng"));
    lib.refresh().await;

    let items = lib.services.library.get_playlist("s-reading").await.unwrap();
    assert_eq!(items, vec!["d-setup", "d-deploys"]);
}

#[tokio::test]
async fn test_org_mode_prefixes_drive_slugs() {
    let lib = TestLibrary::from_fixture_file(org("acme"));
    lib.refresh().await;

    let library = &lib.services.library;
    assert_eq!(lib.path_of("d-setup").as_deref(), Some("/engineering/guides/local-setup"));
    assert_eq!(lib.path_of("d-pricing").as_deref(), Some("/sales-team/pricing"));

    let drives: Vec<String> = library.get_org_drives().into_iter().map(|d| d.id).collect();
    assert_eq!(drives, vec!["drive-eng", "drive-sales"]);
    assert!(library.has_drive("engineering"));
    assert!(library.has_drive("sales-team"));
    assert!(!library.has_drive("marketing"));

    assert_eq!(library.get_all_trees().await.unwrap().len(), 2);
    let sales = library
        .get_tree_for_drive_slug("sales-team")
        .await
        .unwrap()
        .expect("sales tree");
    assert_eq!(sales.id, "drive-sales");
    assert!(sales.children.contains_key("pricing"));
    assert!(
        library
            .get_tree_for_drive_slug("marketing")
            .await
            .unwrap()
            .is_none()
    );
}

#[tokio::test]
async fn test_folder_mode_scopes_to_subtree() {
    let lib = TestLibrary::from_fixture_file(folder("f-guides"));
    lib.refresh().await;

    assert_eq!(lib.path_of("d-setup").as_deref(), Some("/local-setup"));
    assert!(lib.services.library.get_meta("d-pricing").is_none());
    assert!(lib.services.library.get_meta("d-old-setup").is_none());
}

#[tokio::test]
async fn test_snapshot_subscription_sees_rebuilds() {
    let lib = TestLibrary::from_fixture_file(team("drive-eng"));
    let mut updates = lib.services.library.subscribe();
    assert!(updates.borrow().is_none());

    lib.refresh().await;
    updates.changed().await.unwrap();
    let first = updates.borrow_and_update().clone().expect("published");

    lib.source.rename("d-setup", "2 - Workstation Setup | onboarding");
    lib.refresh().await;
    updates.changed().await.unwrap();
    let second = updates.borrow_and_update().clone().expect("published");

    assert!(second.built_at >= first.built_at);
    assert_eq!(
        second.get("d-setup").and_then(|r| r.path.as_deref()),
        Some("/guides/workstation-setup")
    );
}
