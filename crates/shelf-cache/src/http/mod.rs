//! Client for an external purge/redirect service.

mod client;

pub use client::HttpEdgeCache;
