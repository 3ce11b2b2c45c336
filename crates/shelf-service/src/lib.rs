//! # shelf-service
//!
//! Library service layer for Shelf. Turns a flat drive listing into the
//! published [`Snapshot`](shelf_entity::snapshot::Snapshot): names are
//! parsed into slugs, tags and sort keys, resources are arranged into
//! adjacency lists and breadcrumbed trees, every resource gets a site path,
//! and the difference to the previous snapshot is sent to the edge cache.
//!
//! Services follow constructor injection: all dependencies are provided
//! at construction time via `Arc` references.

pub mod bootstrap;
pub mod library;
pub mod naming;
pub mod search;

pub use bootstrap::AppServices;
pub use library::LibraryService;
pub use search::SearchService;
