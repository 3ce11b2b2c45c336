//! Breadcrumbed tree nodes.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Whether a node has children.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NodeType {
    /// A node with an adjacency entry.
    Branch,
    /// A node without children.
    Leaf,
}

/// One step of a breadcrumb trail.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Crumb {
    /// Resource id.
    pub id: String,
    /// Resource slug.
    pub slug: String,
}

/// A node in a navigation tree.
///
/// Children are keyed by slug, so a node's children can be addressed
/// directly by the next URL segment.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TreeNode {
    /// Branch or leaf.
    pub node_type: NodeType,
    /// Resource id.
    pub id: String,
    /// Home file id of this node.
    pub home: Option<String>,
    /// Ancestors from the root down to the parent.
    pub breadcrumb: Vec<Crumb>,
    /// Sort key of the resource.
    pub sort: Option<String>,
    /// Children keyed by slug.
    pub children: BTreeMap<String, TreeNode>,
}

impl TreeNode {
    /// Check if this node has children.
    pub fn is_branch(&self) -> bool {
        self.node_type == NodeType::Branch
    }

    /// Follow a sequence of slugs down from this node.
    pub fn descend<'a, I>(&self, slugs: I) -> Option<&TreeNode>
    where
        I: IntoIterator<Item = &'a str>,
    {
        let mut node = self;
        for slug in slugs {
            node = node.children.get(slug)?;
        }
        Some(node)
    }

    /// Number of nodes in this subtree, including this one.
    pub fn node_count(&self) -> usize {
        1 + self.children.values().map(TreeNode::node_count).sum::<usize>()
    }

    /// Children ordered by sort key, then slug.
    pub fn sorted_children(&self) -> Vec<(&String, &TreeNode)> {
        let mut children: Vec<_> = self.children.iter().collect();
        children.sort_by(|(a_slug, a), (b_slug, b)| {
            a.sort.cmp(&b.sort).then_with(|| a_slug.cmp(b_slug))
        });
        children
    }
}
