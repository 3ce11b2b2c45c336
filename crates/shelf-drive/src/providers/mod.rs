//! Listing source implementations.

pub mod google;
pub mod memory;

pub use google::GoogleDriveSource;
pub use memory::{LibraryFixture, MemoryResourceSource};
