//! Snapshot entity.

use std::collections::{BTreeSet, HashMap};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use shelf_core::types::DriveInfo;

use super::tags::TagIndex;
use crate::resource::Resource;
use crate::tree::{Adjacency, AdjacencyEntry, TreeNode};

/// Resources keyed by id.
pub type Catalog = HashMap<String, Resource>;

/// The complete derived state of one rebuild.
///
/// A snapshot is never mutated after it is published; the next rebuild
/// produces a new one.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Snapshot {
    /// Every resource, enriched with paths.
    pub catalog: Catalog,
    /// Parent id to children.
    pub adjacency: Adjacency,
    /// One tree per drive root, in listing order.
    pub trees: Vec<TreeNode>,
    /// Tag to resource ids.
    pub tag_index: TagIndex,
    /// Drives of the organisation (org mode only).
    pub drives: Vec<DriveInfo>,
    /// Ids treated as drive roots.
    pub root_ids: Vec<String>,
    /// When the rebuild finished.
    pub built_at: DateTime<Utc>,
}

impl Snapshot {
    /// Look up a resource.
    pub fn get(&self, id: &str) -> Option<&Resource> {
        self.catalog.get(id)
    }

    /// Adjacency entry of a parent.
    pub fn children_of(&self, id: &str) -> Option<&AdjacencyEntry> {
        self.adjacency.get(id)
    }

    /// Every site path, sorted.
    pub fn routes(&self) -> BTreeSet<String> {
        self.catalog
            .values()
            .filter_map(|resource| resource.path.as_deref())
            .filter(|path| path.starts_with('/'))
            .map(str::to_string)
            .collect()
    }

    /// Number of catalogued non-folder resources.
    pub fn file_count(&self) -> usize {
        self.catalog.values().filter(|r| !r.is_folder()).count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::resource::ResourceType;

    fn resource(id: &str, kind: ResourceType, path: Option<&str>) -> Resource {
        Resource {
            id: id.into(),
            name: id.into(),
            parents: vec!["root".into()],
            mime_type: String::new(),
            resource_type: kind,
            pretty_name: id.into(),
            slug: id.into(),
            tags: Vec::new(),
            sort: id.into(),
            is_home: false,
            is_trash_can: false,
            in_trash: false,
            render_in_library: true,
            path: path.map(str::to_string),
            library_path: path.map(str::to_string),
            web_view_link: None,
            created_time: None,
            modified_time: None,
            last_modifying_user: None,
            folder: None,
            ancestors: Vec::new(),
            top_level_folder: None,
        }
    }

    #[test]
    fn test_routes_only_include_site_paths() {
        let mut snapshot = Snapshot::default();
        for r in [
            resource("a", ResourceType::Folder, Some("/a")),
            resource("b", ResourceType::Document, Some("/a/b")),
            resource("c", ResourceType::Other("application/pdf".into()), Some("https://x/c")),
            resource("d", ResourceType::Document, None),
        ] {
            snapshot.catalog.insert(r.id.clone(), r);
        }

        let routes: Vec<String> = snapshot.routes().into_iter().collect();
        assert_eq!(routes, vec!["/a".to_string(), "/a/b".to_string()]);
        assert_eq!(snapshot.file_count(), 3);
    }
}
