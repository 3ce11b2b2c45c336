//! Catalogued resource entity.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use shelf_core::types::DriveUser;

use super::kind::ResourceType;

/// Tag that makes any resource render inside the site.
pub const PLAYLIST_TAG: &str = "playlist";

/// Tag that removes a resource from search results.
pub const HIDDEN_TAG: &str = "hidden";

/// A file or folder after normalization and path resolution.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Resource {
    /// Stable identifier from the drive.
    pub id: String,
    /// Raw display name, including any sort prefix, tags or home marker.
    pub name: String,
    /// Ordered parent ids. The first one is canonical for paths.
    pub parents: Vec<String>,
    /// Original MIME type.
    pub mime_type: String,
    /// Normalized type tag.
    pub resource_type: ResourceType,
    /// Name with the sort prefix, tag segment, home suffix and extension removed.
    pub pretty_name: String,
    /// URL-safe token.
    pub slug: String,
    /// Lowercase tags from the trailing `| a, b` segment.
    pub tags: Vec<String>,
    /// Leading digits of the name, or the pretty name.
    pub sort: String,
    /// Selected as its parent's home file.
    pub is_home: bool,
    /// A `trash` folder directly under a drive root.
    pub is_trash_can: bool,
    /// A trash can or anything beneath one.
    pub in_trash: bool,
    /// Whether the site renders this resource itself.
    pub render_in_library: bool,
    /// Public site path, or the external view link for unsupported types.
    pub path: Option<String>,
    /// Site path used when chaining children, even for linked-out resources.
    pub library_path: Option<String>,
    /// Link to the item in the drive's own UI.
    pub web_view_link: Option<String>,
    /// Creation time.
    pub created_time: Option<DateTime<Utc>>,
    /// Last modification time.
    pub modified_time: Option<DateTime<Utc>>,
    /// Last editor.
    pub last_modifying_user: Option<DriveUser>,
    /// Canonical parent, with its resolved path.
    pub folder: Option<FolderRef>,
    /// Canonical ancestor chain, outermost first.
    pub ancestors: Vec<FolderRef>,
    /// Outermost ancestor below the drive root.
    pub top_level_folder: Option<FolderRef>,
}

impl Resource {
    /// Primary parent id.
    pub fn primary_parent(&self) -> Option<&str> {
        self.parents.first().map(String::as_str)
    }

    /// Check whether the resource carries `tag`.
    pub fn has_tag(&self, tag: &str) -> bool {
        self.tags.iter().any(|t| t == tag)
    }

    /// Check if this is a folder.
    pub fn is_folder(&self) -> bool {
        self.resource_type == ResourceType::Folder
    }

    /// Whether this is a site path rather than an external link.
    pub fn has_site_path(&self) -> bool {
        self.path.as_deref().is_some_and(|p| p.starts_with('/'))
    }

    /// Lightweight reference to this resource.
    pub fn to_folder_ref(&self) -> FolderRef {
        FolderRef {
            id: self.id.clone(),
            slug: self.slug.clone(),
            pretty_name: self.pretty_name.clone(),
            path: self.library_path.clone(),
        }
    }
}

/// Reference to a folder in a resource's ancestry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FolderRef {
    /// Folder id.
    pub id: String,
    /// Folder slug.
    pub slug: String,
    /// Display name.
    pub pretty_name: String,
    /// Resolved site path of the folder.
    pub path: Option<String>,
}
