//! Paginated listing types.

use serde::{Deserialize, Serialize};

use super::resource::RawResource;

/// What a listing or search call should cover.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ListScope {
    /// Every non-trashed item of a team drive, in one flat listing.
    Drive {
        /// Team drive ID.
        drive_id: String,
    },
    /// Only the immediate children of the given parents.
    Parents {
        /// Parent folder IDs.
        parent_ids: Vec<String>,
        /// Restrict results to folders.
        #[serde(default)]
        folders_only: bool,
    },
}

impl ListScope {
    /// Scope covering a whole team drive.
    pub fn drive(drive_id: impl Into<String>) -> Self {
        Self::Drive {
            drive_id: drive_id.into(),
        }
    }

    /// Scope covering the immediate children of `parent_ids`.
    pub fn parents(parent_ids: Vec<String>) -> Self {
        Self::Parents {
            parent_ids,
            folders_only: false,
        }
    }

    /// Scope covering the immediate child folders of `parent_ids`.
    pub fn child_folders(parent_ids: Vec<String>) -> Self {
        Self::Parents {
            parent_ids,
            folders_only: true,
        }
    }
}

/// One page of a listing or search response.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ResourcePage {
    /// Records on this page, in service order.
    pub resources: Vec<RawResource>,
    /// Continuation token; `None` on the last page.
    pub next_page_token: Option<String>,
}

impl ResourcePage {
    /// Whether another page follows this one.
    pub fn has_more(&self) -> bool {
        self.next_page_token.is_some()
    }
}
