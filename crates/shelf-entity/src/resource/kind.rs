//! Normalized resource type tags.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Vendor prefix stripped from native document MIME types.
const VENDOR_PREFIX: &str = "application/vnd.google-apps.";

/// Short resource type derived from an external MIME type.
///
/// Native document types lose their vendor prefix (`folder`, `document`, ...);
/// every other MIME type passes through unchanged as [`ResourceType::Other`].
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum ResourceType {
    /// A folder.
    Folder,
    /// A text document.
    Document,
    /// A spreadsheet.
    Spreadsheet,
    /// A slide deck.
    Presentation,
    /// An uploaded HTML file.
    Html,
    /// The virtual organisation root (org mode).
    Org,
    /// A team drive under the organisation root.
    TeamDrive,
    /// Anything else, carrying the normalized type string.
    Other(String),
}

impl ResourceType {
    /// Normalize an external MIME type.
    pub fn from_mime_type(mime_type: &str) -> Self {
        let short = mime_type.strip_prefix(VENDOR_PREFIX).unwrap_or(mime_type);
        Self::from(short.to_string())
    }

    /// Return the type as its short string form.
    pub fn as_str(&self) -> &str {
        match self {
            Self::Folder => "folder",
            Self::Document => "document",
            Self::Spreadsheet => "spreadsheet",
            Self::Presentation => "presentation",
            Self::Html => "text/html",
            Self::Org => "org",
            Self::TeamDrive => "teamDrive",
            Self::Other(other) => other,
        }
    }

    /// Whether the site renders this type itself instead of linking out.
    pub fn is_supported(&self) -> bool {
        matches!(
            self,
            Self::Folder | Self::Document | Self::Spreadsheet | Self::Html
        )
    }
}

impl From<String> for ResourceType {
    fn from(value: String) -> Self {
        match value.as_str() {
            "folder" => Self::Folder,
            "document" => Self::Document,
            "spreadsheet" => Self::Spreadsheet,
            "presentation" => Self::Presentation,
            "text/html" => Self::Html,
            "org" => Self::Org,
            "teamDrive" => Self::TeamDrive,
            _ => Self::Other(value),
        }
    }
}

impl From<ResourceType> for String {
    fn from(value: ResourceType) -> Self {
        value.as_str().to_string()
    }
}

impl fmt::Display for ResourceType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
