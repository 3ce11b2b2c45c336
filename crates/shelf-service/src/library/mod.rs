//! Library snapshot construction and the service that owns it.
//!
//! A rebuild runs in stages, each in its own module:
//!
//! 1. [`catalog`]: raw records to [`Resource`](shelf_entity::resource::Resource)s plus the tag index
//! 2. [`adjacency`]: parent to children lists, home selection, org synthesis
//! 3. [`paths`]: site paths and ancestry
//! 4. [`tree`]: breadcrumbed trees, feeding the [`changes`] detector
//! 5. [`notifier`]: cache instructions sent after publication

pub mod adjacency;
pub mod catalog;
pub mod changes;
pub mod notifier;
pub mod paths;
pub mod playlist;
pub mod rebuild;
pub mod service;
pub mod tree;

pub use rebuild::{Rebuild, rebuild};
pub use service::LibraryService;
