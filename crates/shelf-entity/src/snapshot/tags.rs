//! Inverted tag index.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Tag to resource ids, each bucket in first-seen order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TagIndex(BTreeMap<String, Vec<String>>);

impl TagIndex {
    /// Create an empty index.
    pub fn new() -> Self {
        Self::default()
    }

    /// Record `id` under `tag`.
    pub fn insert(&mut self, tag: &str, id: &str) {
        let bucket = self.0.entry(tag.to_string()).or_default();
        if !bucket.iter().any(|existing| existing == id) {
            bucket.push(id.to_string());
        }
    }

    /// Ids tagged with `tag`.
    pub fn get(&self, tag: &str) -> Option<&[String]> {
        self.0.get(tag).map(Vec::as_slice)
    }

    /// Iterate over every tag and its ids.
    pub fn iter(&self) -> impl Iterator<Item = (&String, &Vec<String>)> {
        self.0.iter()
    }

    /// Number of distinct tags.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Check if no tags are recorded.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}
