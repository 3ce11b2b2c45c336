//! # shelf-cache
//!
//! Edge cache clients for Shelf. Supports two modes:
//!
//! - **memory**: In-process page cache using [moka](https://crates.io/crates/moka),
//!   used when no purge service is deployed and by the test-suite
//! - **http**: Client for an external purge/redirect service
//!
//! The client is selected at runtime based on configuration.

#[cfg(feature = "http")]
pub mod http;
pub mod keys;
#[cfg(feature = "memory")]
pub mod memory;
pub mod provider;

pub use provider::EdgeCacheManager;
