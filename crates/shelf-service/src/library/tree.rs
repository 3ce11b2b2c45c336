//! Breadcrumbed tree assembly.

use std::collections::BTreeMap;

use tracing::{debug, warn};

use shelf_core::types::DriveInfo;
use shelf_entity::snapshot::Catalog;
use shelf_entity::tree::{Adjacency, Crumb, NodeType, TreeNode};

use super::changes::ChangeDetector;
use crate::naming::drive_slug;

/// Builds one tree per root, reporting every visited node to the detector.
///
/// Every node's breadcrumb is its parent's breadcrumb plus the parent's own
/// crumb. Roots are seeded with a crumb whose slug is the drive slug in org
/// mode and empty otherwise, so direct children of a root carry two crumbs
/// for it.
#[derive(Debug)]
pub struct TreeBuilder<'a, 'd> {
    catalog: &'a Catalog,
    adjacency: &'a Adjacency,
    drives: &'a [DriveInfo],
    detector: &'d mut ChangeDetector<'a>,
}

impl<'a, 'd> TreeBuilder<'a, 'd> {
    /// Create a builder over the current catalog and adjacency.
    pub fn new(
        catalog: &'a Catalog,
        adjacency: &'a Adjacency,
        drives: &'a [DriveInfo],
        detector: &'d mut ChangeDetector<'a>,
    ) -> Self {
        Self {
            catalog,
            adjacency,
            drives,
            detector,
        }
    }

    /// Build the tree rooted at `root_id`.
    pub fn build_root(&mut self, root_id: &str) -> TreeNode {
        debug!(root = root_id, "Building tree");
        let seed = self.seed_crumb(root_id);
        let mut branch = vec![root_id.to_string()];
        self.build_node(root_id, vec![seed], &mut branch)
    }

    fn seed_crumb(&self, root_id: &str) -> Crumb {
        Crumb {
            id: root_id.to_string(),
            slug: self
                .drives
                .iter()
                .find(|d| d.id == root_id)
                .map(|d| drive_slug(&d.name))
                .unwrap_or_default(),
        }
    }

    fn crumb(&self, id: &str) -> Crumb {
        Crumb {
            id: id.to_string(),
            slug: self
                .catalog
                .get(id)
                .map(|r| r.slug.clone())
                .unwrap_or_default(),
        }
    }

    fn build_node(
        &mut self,
        id: &str,
        breadcrumb: Vec<Crumb>,
        branch: &mut Vec<String>,
    ) -> TreeNode {
        let entry = self.adjacency.get(id);
        let info = self.catalog.get(id);

        if !info.is_some_and(|r| r.is_trash_can) {
            self.detector.visit(id);
        }

        let mut node = TreeNode {
            node_type: if entry.is_some() {
                NodeType::Branch
            } else {
                NodeType::Leaf
            },
            id: id.to_string(),
            home: entry.and_then(|e| e.home.clone()),
            breadcrumb,
            sort: info.map(|r| r.sort.clone()),
            children: BTreeMap::new(),
        };

        let Some(entry) = entry else {
            return node;
        };

        let mut child_crumbs = node.breadcrumb.clone();
        child_crumbs.push(self.crumb(id));

        for child_id in &entry.children {
            if branch.iter().any(|ancestor| ancestor == child_id) {
                warn!(parent = id, child = %child_id, "Skipping child that is its own ancestor");
                continue;
            }
            let Some(child) = self.catalog.get(child_id) else {
                continue;
            };

            branch.push(child_id.clone());
            let child_node = self.build_node(child_id, child_crumbs.clone(), branch);
            branch.pop();

            if let Some(replaced) = node.children.insert(child.slug.clone(), child_node) {
                warn!(
                    parent = id,
                    slug = %child.slug,
                    replaced = %replaced.id,
                    kept = %child_id,
                    "Duplicate slug among siblings"
                );
            }
        }

        node
    }
}
