//! Published library state.

pub mod model;
pub mod tags;

pub use model::{Catalog, Snapshot};
pub use tags::TagIndex;
