//! Parent to children adjacency.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

/// Adjacency map keyed by parent id.
pub type Adjacency = HashMap<String, AdjacencyEntry>;

/// Children of one parent, in listing order, plus its home file.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AdjacencyEntry {
    /// Ordinary children.
    pub children: Vec<String>,
    /// The child rendered at the parent's own path.
    pub home: Option<String>,
}

impl AdjacencyEntry {
    /// Ordinary children followed by the home file, if any.
    pub fn members(&self) -> impl Iterator<Item = &str> {
        self.children
            .iter()
            .map(String::as_str)
            .chain(self.home.as_deref())
    }
}
