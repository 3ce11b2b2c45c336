//! Resource domain entities.

pub mod kind;
pub mod model;

pub use kind::ResourceType;
pub use model::{FolderRef, HIDDEN_TAG, PLAYLIST_TAG, Resource};
