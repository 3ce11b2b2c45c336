//! Cache instructions produced by comparing two snapshots.

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use shelf_core::traits::PurgeRequest;

/// Direction of a trash transition.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum TrashEvent {
    /// The resource left the trash, or is new.
    ItemAdded,
    /// The resource went into the trash, or disappeared.
    ItemRemoved,
}

impl TrashEvent {
    /// Marker sent as the purge's edit attribution.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::ItemAdded => "itemAdded",
            Self::ItemRemoved => "itemRemoved",
        }
    }
}

impl fmt::Display for TrashEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Instruction for the edge cache.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "action", rename_all = "camelCase")]
pub enum CacheInstruction {
    /// Invalidate one path.
    Purge(PurgeRequest),
    /// Route an old path to a new one.
    Redirect {
        /// Previous path.
        from: String,
        /// Current path.
        to: String,
        /// Modification time of the moved resource.
        modified: Option<DateTime<Utc>>,
    },
}

impl CacheInstruction {
    /// Whether this purge comes from a trash transition.
    pub fn is_trash_purge(&self) -> bool {
        match self {
            Self::Purge(request) => matches!(
                request.edit_email.as_deref(),
                Some("itemAdded") | Some("itemRemoved")
            ),
            Self::Redirect { .. } => false,
        }
    }

    /// Path the instruction acts on.
    pub fn path(&self) -> &str {
        match self {
            Self::Purge(request) => &request.url,
            Self::Redirect { to, .. } => to,
        }
    }
}
