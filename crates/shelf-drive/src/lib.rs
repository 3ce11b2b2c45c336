//! # shelf-drive
//!
//! Listing sources for Shelf. Supports the Drive v3 REST API and an
//! in-memory source loaded from a JSON fixture, plus the traversal that
//! turns paginated listings into complete per-root file lists.

pub mod listing;
pub mod manager;
pub mod providers;

pub use listing::{LibraryListing, RootListing, fetch_all_files, fetch_all_folders, fetch_library};
pub use manager::SourceManager;
