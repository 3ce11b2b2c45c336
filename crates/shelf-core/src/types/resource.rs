//! Raw file and drive records as returned by the listing service.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// MIME type the listing service uses for folders.
pub const FOLDER_MIME_TYPE: &str = "application/vnd.google-apps.folder";

/// The user who last modified a file.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DriveUser {
    /// Display name.
    #[serde(default)]
    pub display_name: Option<String>,
    /// Email address.
    #[serde(default)]
    pub email_address: Option<String>,
    /// Avatar URL.
    #[serde(default)]
    pub photo_link: Option<String>,
}

/// One file or folder exactly as the listing service reports it.
///
/// `name` and `parents` are optional on the wire so that a record missing
/// them can be reported as a contract violation instead of failing the
/// whole page at deserialization time.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawResource {
    /// Stable identifier, unique within a drive.
    pub id: String,
    /// Display name, possibly carrying sort prefix, tags and home marker.
    #[serde(default)]
    pub name: Option<String>,
    /// External MIME type.
    #[serde(default)]
    pub mime_type: String,
    /// Ordered parent IDs.
    #[serde(default)]
    pub parents: Option<Vec<String>>,
    /// Link to the item in the drive UI.
    #[serde(default)]
    pub web_view_link: Option<String>,
    /// Creation timestamp.
    #[serde(default)]
    pub created_time: Option<DateTime<Utc>>,
    /// Last modification timestamp.
    #[serde(default)]
    pub modified_time: Option<DateTime<Utc>>,
    /// Last modifying user.
    #[serde(default)]
    pub last_modifying_user: Option<DriveUser>,
}

impl RawResource {
    /// Whether the record describes a folder.
    pub fn is_folder(&self) -> bool {
        self.mime_type == FOLDER_MIME_TYPE
    }

    /// The first (canonical) parent, if any.
    pub fn primary_parent(&self) -> Option<&str> {
        self.parents
            .as_ref()
            .and_then(|parents| parents.first())
            .map(String::as_str)
    }
}

/// A team drive visible to the account.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DriveInfo {
    /// Drive ID.
    pub id: String,
    /// Drive display name.
    pub name: String,
}
