//! Edge cache trait for the downstream purge/redirect service.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::error::AppError;

/// Purge failures the caller may choose to tolerate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PurgeIgnore {
    /// The path is not cached at the edge.
    Missing,
    /// The cached copy is not older than the given modification time.
    Modified,
}

/// A request to invalidate the cached page at `url`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PurgeRequest {
    /// Site path to invalidate.
    pub url: String,
    /// Modification time of the content now living at `url`.
    pub modified: Option<DateTime<Utc>>,
    /// Editor attribution, or a synthetic marker such as `itemAdded`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub edit_email: Option<String>,
    /// Failures to treat as success.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub ignore: Vec<PurgeIgnore>,
}

impl PurgeRequest {
    /// Plain purge for `url` at `modified`.
    pub fn new(url: impl Into<String>, modified: Option<DateTime<Utc>>) -> Self {
        Self {
            url: url.into(),
            modified,
            edit_email: None,
            ignore: Vec::new(),
        }
    }

    /// Attach an editor attribution.
    pub fn with_edit_email(mut self, edit_email: impl Into<String>) -> Self {
        self.edit_email = Some(edit_email.into());
        self
    }

    /// Tolerate the given failures.
    pub fn ignoring(mut self, ignore: &[PurgeIgnore]) -> Self {
        self.ignore = ignore.to_vec();
        self
    }

    /// Whether `kind` failures should be treated as success.
    pub fn ignores(&self, kind: PurgeIgnore) -> bool {
        self.ignore.contains(&kind)
    }
}

/// Failure reported by the edge cache.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PurgeError {
    /// The same purge id was already applied.
    #[error("same purge id as previous for {0}")]
    Duplicate(String),
    /// Nothing is cached at the path.
    #[error("not found: {0}")]
    NotFound(String),
    /// The cached copy is already fresh.
    #[error("no purge of fresh content for {0}")]
    NoFreshContent(String),
    /// Any other failure (transport, server error).
    #[error("{0}")]
    Other(String),
}

impl From<PurgeError> for AppError {
    fn from(err: PurgeError) -> Self {
        AppError::with_source(
            crate::error::ErrorKind::Cache,
            format!("Edge cache error: {err}"),
            err,
        )
    }
}

/// Trait for the edge cache sitting in front of the rendered site.
#[async_trait]
pub trait EdgeCache: Send + Sync + std::fmt::Debug + 'static {
    /// Return the provider type name (e.g., "memory", "http").
    fn provider_type(&self) -> &str;

    /// Invalidate the cached page described by `request`.
    async fn purge(&self, request: &PurgeRequest) -> Result<(), PurgeError>;

    /// Route requests for `from` to `to` from now on.
    async fn redirect(
        &self,
        from: &str,
        to: &str,
        modified: Option<DateTime<Utc>>,
    ) -> Result<(), PurgeError>;
}
