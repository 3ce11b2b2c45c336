//! Refresh scheduler configuration.

use serde::{Deserialize, Serialize};

/// Periodic library rebuild configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RefreshConfig {
    /// Whether the periodic rebuild loop runs.
    #[serde(default = "default_true")]
    pub enabled: bool,
    /// Delay in seconds between the end of one rebuild and the start of the next.
    #[serde(default = "default_interval")]
    pub interval_seconds: u64,
}

impl Default for RefreshConfig {
    fn default() -> Self {
        Self {
            enabled: default_true(),
            interval_seconds: default_interval(),
        }
    }
}

fn default_true() -> bool {
    true
}

fn default_interval() -> u64 {
    15
}
