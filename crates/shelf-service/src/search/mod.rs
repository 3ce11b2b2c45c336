//! Full-text search across the configured drive scope.

pub mod service;

pub use service::SearchService;
