//! In-memory edge cache.

mod store;

pub use store::{CachedPage, MemoryEdgeCache};
