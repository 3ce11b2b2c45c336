//! Core traits defined in `shelf-core` and implemented by other crates.

pub mod edge_cache;
pub mod source;

pub use edge_cache::{EdgeCache, PurgeError, PurgeIgnore, PurgeRequest};
pub use source::ResourceSource;
