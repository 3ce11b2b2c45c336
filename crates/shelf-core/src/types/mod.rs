//! Wire types exchanged with the drive listing service.

pub mod page;
pub mod resource;

pub use page::{ListScope, ResourcePage};
pub use resource::{DriveInfo, DriveUser, FOLDER_MIME_TYPE, RawResource};
