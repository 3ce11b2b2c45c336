//! Delivery of cache instructions to the edge cache.

use std::sync::Arc;

use tracing::{debug, warn};

use shelf_core::traits::{EdgeCache, PurgeError};
use shelf_entity::change::CacheInstruction;

/// Outcome counts of one dispatch.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct NotifySummary {
    /// Instructions the cache accepted.
    pub applied: usize,
    /// Failures that were expected and dropped.
    pub ignored: usize,
    /// Failures logged as warnings.
    pub failed: usize,
}

/// Sends instructions one at a time and never fails.
#[derive(Debug, Clone)]
pub struct CacheNotifier {
    cache: Arc<dyn EdgeCache>,
}

impl CacheNotifier {
    /// Create a notifier for `cache`.
    pub fn new(cache: Arc<dyn EdgeCache>) -> Self {
        Self { cache }
    }

    /// The underlying cache.
    pub fn cache(&self) -> &Arc<dyn EdgeCache> {
        &self.cache
    }

    /// Deliver every instruction in order.
    pub async fn dispatch(&self, instructions: &[CacheInstruction]) -> NotifySummary {
        let mut summary = NotifySummary::default();

        for instruction in instructions {
            let result = match instruction {
                CacheInstruction::Purge(request) => self.cache.purge(request).await,
                CacheInstruction::Redirect { from, to, modified } => {
                    self.cache.redirect(from, to, *modified).await
                }
            };

            match result {
                Ok(()) => summary.applied += 1,
                Err(err) if instruction.is_trash_purge() => {
                    debug!(path = instruction.path(), error = %err, "Trash purge not applied");
                    summary.ignored += 1;
                }
                Err(PurgeError::Duplicate(_)) => {
                    debug!(path = instruction.path(), "Skipping duplicate purge");
                    summary.ignored += 1;
                }
                Err(PurgeError::NotFound(_) | PurgeError::NoFreshContent(_)) => {
                    summary.ignored += 1;
                }
                Err(err) => {
                    warn!(path = instruction.path(), error = %err, "Edge cache notification failed");
                    summary.failed += 1;
                }
            }
        }

        debug!(
            applied = summary.applied,
            ignored = summary.ignored,
            failed = summary.failed,
            "Cache notifications dispatched"
        );
        summary
    }
}
