//! Site path derivation.
//!
//! A resource's path is its canonical parent's path joined with its own
//! slug, except that a home file takes its parent's path unchanged.
//! Resources directly under a drive root start from `/`, or from
//! `/<drive-slug>/` in org mode. Types the site cannot render get their
//! external view link as `path`, but keep a `library_path` so that their
//! children still chain correctly.

use std::collections::{HashMap, HashSet};

use tracing::warn;

use shelf_core::config::DriveType;
use shelf_core::types::DriveInfo;
use shelf_entity::resource::{FolderRef, PLAYLIST_TAG, Resource};
use shelf_entity::snapshot::Catalog;

use crate::naming::drive_slug;

/// Everything path derivation needs to know about the drive scope.
#[derive(Debug, Clone, Copy)]
pub struct PathContext<'a> {
    /// Scope mode.
    pub drive_type: DriveType,
    /// Ids of the drive roots.
    pub root_ids: &'a [String],
    /// Name of the virtual organisation root (org mode).
    pub org_name: Option<&'a str>,
    /// Team drives of the organisation (org mode).
    pub drives: &'a [DriveInfo],
}

/// Derived location of one resource.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PathInfo {
    /// Public path, or the external link for unsupported types.
    pub path: Option<String>,
    /// Site path used for chaining.
    pub library_path: Option<String>,
    /// Whether the site renders this resource.
    pub render_in_library: bool,
    /// Canonical parent.
    pub folder: Option<FolderRef>,
    /// Canonical ancestors, outermost first.
    pub ancestors: Vec<FolderRef>,
    /// Outermost ancestor below the drive root.
    pub top_level_folder: Option<FolderRef>,
    /// Trash can or beneath one.
    pub in_trash: bool,
}

/// Memoizing resolver for one rebuild.
///
/// `None` in the memo marks a resource whose parent chain loops.
#[derive(Debug)]
pub struct PathResolver<'a> {
    catalog: &'a Catalog,
    context: PathContext<'a>,
    memo: HashMap<String, Option<PathInfo>>,
    visiting: HashSet<String>,
}

impl<'a> PathResolver<'a> {
    /// Create a resolver over `catalog`.
    pub fn new(catalog: &'a Catalog, context: PathContext<'a>) -> Self {
        Self {
            catalog,
            context,
            memo: HashMap::new(),
            visiting: HashSet::new(),
        }
    }

    /// Resolve `id`, returning `None` if its parent chain loops.
    pub fn resolve(&mut self, id: &str) -> Option<PathInfo> {
        if let Some(known) = self.memo.get(id) {
            return known.clone();
        }
        let catalog = self.catalog;
        let resource = catalog.get(id)?;

        if !self.visiting.insert(id.to_string()) {
            warn!(id, name = %resource.name, "Parent chain loops back to item, leaving it without a path");
            return None;
        }
        let info = self.derive(resource);
        self.visiting.remove(id);

        self.memo.insert(id.to_string(), info.clone());
        info
    }

    fn derive(&mut self, resource: &'a Resource) -> Option<PathInfo> {
        let catalog = self.catalog;
        let parent_id = resource.primary_parent();
        let has_parent = parent_id.is_some_and(|p| !self.context.root_ids.iter().any(|r| r == p));

        let (parent, parent_info) = match parent_id {
            Some(parent_id) if has_parent => {
                let Some(parent) = catalog.get(parent_id) else {
                    warn!(
                        id = %resource.id,
                        name = %resource.name,
                        parent = parent_id,
                        "Found item with parent but no parent info"
                    );
                    return Some(PathInfo::default());
                };
                (Some(parent), self.resolve(parent_id)?)
            }
            _ => (None, self.root_info(parent_id)),
        };

        let library_path = if resource.is_home {
            parent_info.library_path.clone()
        } else {
            let base = parent_info
                .library_path
                .clone()
                .unwrap_or_else(|| format!("/{}", resource.slug));
            Some(join(&base, &resource.slug))
        };

        let render_in_library =
            resource.resource_type.is_supported() || resource.has_tag(PLAYLIST_TAG);
        let path = if render_in_library {
            library_path.clone()
        } else {
            resource.web_view_link.clone()
        };

        let own_ref = FolderRef {
            id: resource.id.clone(),
            slug: resource.slug.clone(),
            pretty_name: resource.pretty_name.clone(),
            path: library_path.clone(),
        };

        let (folder, ancestors, top_level_folder) = match parent {
            Some(parent) => {
                let parent_ref = FolderRef {
                    id: parent.id.clone(),
                    slug: parent.slug.clone(),
                    pretty_name: parent.pretty_name.clone(),
                    path: parent_info.library_path.clone(),
                };
                let mut ancestors = parent_info.ancestors.clone();
                ancestors.push(parent_ref.clone());
                let top = parent_info.top_level_folder.clone().or(Some(parent_ref.clone()));
                (Some(parent_ref), ancestors, top)
            }
            None => (None, Vec::new(), Some(own_ref)),
        };

        Some(PathInfo {
            path,
            library_path,
            render_in_library,
            folder,
            ancestors,
            top_level_folder,
            in_trash: resource.is_trash_can || parent_info.in_trash,
        })
    }

    /// Starting point for a resource that sits directly under a root.
    fn root_info(&self, parent_id: Option<&str>) -> PathInfo {
        let base = match (self.context.drive_type, self.context.org_name) {
            (DriveType::Org, Some(org_name)) => {
                let owner = parent_id.unwrap_or(org_name);
                if owner == org_name {
                    "/".to_string()
                } else {
                    self.context
                        .drives
                        .iter()
                        .find(|d| d.id == owner)
                        .map(|d| format!("/{}/", drive_slug(&d.name)))
                        .unwrap_or_else(|| "/".to_string())
                }
            }
            _ => "/".to_string(),
        };

        PathInfo {
            library_path: Some(base),
            ..PathInfo::default()
        }
    }
}

/// Join a base path and a slug with exactly one separator.
fn join(base: &str, slug: &str) -> String {
    let base = base.trim_end_matches('/');
    if slug.is_empty() {
        return if base.is_empty() { "/".to_string() } else { base.to_string() };
    }
    format!("{base}/{slug}")
}

/// Resolve every resource in `catalog` and write the results back.
pub fn resolve_paths(catalog: &mut Catalog, context: PathContext<'_>) {
    let resolved: Vec<(String, PathInfo)> = {
        let mut resolver = PathResolver::new(catalog, context);
        let ids: Vec<String> = catalog.keys().cloned().collect();
        ids.into_iter()
            .map(|id| {
                let info = resolver.resolve(&id).unwrap_or_default();
                (id, info)
            })
            .collect()
    };

    for (id, info) in resolved {
        if let Some(resource) = catalog.get_mut(&id) {
            apply(resource, info);
        }
    }
}

fn apply(resource: &mut Resource, info: PathInfo) {
    resource.path = info.path;
    resource.library_path = info.library_path;
    resource.render_in_library = info.render_in_library;
    resource.folder = info.folder;
    resource.ancestors = info.ancestors;
    resource.top_level_folder = info.top_level_folder;
    resource.in_trash = info.in_trash;
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::library::adjacency::{build_adjacency, synthesize_org};
    use crate::library::catalog::build_catalog;
    use shelf_core::types::{FOLDER_MIME_TYPE, RawResource};
    use shelf_drive::{LibraryListing, RootListing};

    const DOC: &str = "application/vnd.google-apps.document";

    fn raw(id: &str, name: &str, mime: &str, parents: &[&str]) -> RawResource {
        RawResource {
            id: id.into(),
            name: Some(name.into()),
            mime_type: mime.into(),
            parents: Some(parents.iter().map(|p| p.to_string()).collect()),
            web_view_link: Some(format!("https://drive.example.com/{id}")),
            ..RawResource::default()
        }
    }

    fn resolved(resources: Vec<RawResource>) -> Catalog {
        let listing = LibraryListing {
            drives: Vec::new(),
            roots: vec![RootListing {
                root_id: "root".into(),
                resources,
            }],
        };
        let root_ids = listing.root_ids();
        let mut build = build_catalog(&listing).unwrap();
        build_adjacency(&mut build.catalog, &build.order);
        resolve_paths(
            &mut build.catalog,
            PathContext {
                drive_type: DriveType::Team,
                root_ids: &root_ids,
                org_name: None,
                drives: &[],
            },
        );
        build.catalog
    }

    fn path<'c>(catalog: &'c Catalog, id: &str) -> Option<&'c str> {
        catalog[id].path.as_deref()
    }

    #[test]
    fn test_paths_follow_tree() {
        let catalog = resolved(vec![
            raw("a", "A", FOLDER_MIME_TYPE, &["root"]),
            raw("b", "B | numbers", DOC, &["a"]),
            raw("c", "2-c home", DOC, &["a"]),
            raw("n", "1 Nested", FOLDER_MIME_TYPE, &["a"]),
            raw("d", "Deep Dive", DOC, &["n"]),
        ]);

        assert_eq!(path(&catalog, "a"), Some("/a"));
        assert_eq!(path(&catalog, "b"), Some("/a/b"));
        assert_eq!(path(&catalog, "c"), Some("/a"));
        assert_eq!(path(&catalog, "d"), Some("/a/nested/deep-dive"));

        let deep = &catalog["d"];
        assert_eq!(deep.folder.as_ref().map(|f| f.id.as_str()), Some("n"));
        let ancestry: Vec<&str> = deep.ancestors.iter().map(|f| f.id.as_str()).collect();
        assert_eq!(ancestry, vec!["a", "n"]);
        assert_eq!(deep.top_level_folder.as_ref().map(|f| f.id.as_str()), Some("a"));
        assert_eq!(catalog["a"].top_level_folder.as_ref().map(|f| f.id.as_str()), Some("a"));
    }

    #[test]
    fn test_unsupported_types_link_out_but_chain() {
        let catalog = resolved(vec![
            raw("deck", "Deck", "application/vnd.google-apps.presentation", &["root"]),
            raw("pdf", "Spec.pdf", "application/pdf", &["root"]),
            raw("list", "Reading | playlist", "application/vnd.google-apps.presentation", &["root"]),
        ]);

        assert_eq!(path(&catalog, "deck"), Some("https://drive.example.com/deck"));
        assert_eq!(catalog["deck"].library_path.as_deref(), Some("/deck"));
        assert!(!catalog["pdf"].render_in_library);
        assert_eq!(path(&catalog, "list"), Some("/reading"));
    }

    #[test]
    fn test_dangling_parent_leaves_path_empty() {
        let catalog = resolved(vec![
            raw("orphan", "Orphan", FOLDER_MIME_TYPE, &["ghost"]),
            raw("kid", "Kid", DOC, &["orphan"]),
        ]);

        assert_eq!(path(&catalog, "orphan"), None);
        assert_eq!(path(&catalog, "kid"), Some("/kid/kid"));
    }

    #[test]
    fn test_cycle_leaves_chain_unresolved() {
        let catalog = resolved(vec![
            raw("x", "X", FOLDER_MIME_TYPE, &["y"]),
            raw("y", "Y", FOLDER_MIME_TYPE, &["x"]),
            raw("z", "Z", DOC, &["x"]),
            raw("ok", "Ok", DOC, &["root"]),
        ]);

        assert_eq!(path(&catalog, "x"), None);
        assert_eq!(path(&catalog, "y"), None);
        assert_eq!(path(&catalog, "z"), None);
        assert_eq!(path(&catalog, "ok"), Some("/ok"));
    }

    #[test]
    fn test_trash_propagates() {
        let catalog = resolved(vec![
            raw("t", "Trash", FOLDER_MIME_TYPE, &["root"]),
            raw("old", "Old", FOLDER_MIME_TYPE, &["t"]),
            raw("doc", "Doc", DOC, &["old"]),
        ]);

        assert!(catalog["t"].in_trash);
        assert!(catalog["doc"].in_trash);
        assert_eq!(path(&catalog, "doc"), Some("/trash/old/doc"));
    }

    #[test]
    fn test_org_paths_are_prefixed_with_drive() {
        let listing = LibraryListing {
            drives: vec![DriveInfo {
                id: "d1".into(),
                name: "Engineering Docs".into(),
            }],
            roots: vec![RootListing {
                root_id: "d1".into(),
                resources: vec![
                    raw("g", "Guides", FOLDER_MIME_TYPE, &["d1"]),
                    raw("s", "Setup", DOC, &["g"]),
                ],
            }],
        };
        let root_ids = listing.root_ids();
        let mut build = build_catalog(&listing).unwrap();
        let mut adjacency = build_adjacency(&mut build.catalog, &build.order);
        synthesize_org(&mut build.catalog, &mut adjacency, "acme", &listing.drives);
        resolve_paths(
            &mut build.catalog,
            PathContext {
                drive_type: DriveType::Org,
                root_ids: &root_ids,
                org_name: Some("acme"),
                drives: &listing.drives,
            },
        );

        let catalog = build.catalog;
        assert_eq!(path(&catalog, "g"), Some("/engineering-docs/guides"));
        assert_eq!(path(&catalog, "s"), Some("/engineering-docs/guides/setup"));
        assert_eq!(path(&catalog, "acme"), None);
        assert_eq!(path(&catalog, "d1"), None);
    }

    #[test]
    fn test_join() {
        assert_eq!(join("/", "a"), "/a");
        assert_eq!(join("/a/", "b"), "/a/b");
        assert_eq!(join("/a", ""), "/a");
        assert_eq!(join("/", ""), "/");
    }
}
