//! # shelf-entity
//!
//! Derived domain entities for Shelf. Every struct in this crate is a value
//! computed from a drive listing during a rebuild: enriched resources,
//! adjacency entries, navigation tree nodes, the immutable snapshot that
//! bundles them, and the cache instructions produced by diffing two
//! snapshots. All entities derive `Debug`, `Clone`, `Serialize`, and
//! `Deserialize`.

pub mod change;
pub mod resource;
pub mod snapshot;
pub mod tree;
