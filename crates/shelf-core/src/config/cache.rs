//! Edge cache configuration.

use serde::{Deserialize, Serialize};

use crate::error::AppError;

/// Top-level edge cache configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EdgeCacheConfig {
    /// Edge cache provider type: `"memory"` or `"http"`.
    #[serde(default = "default_provider")]
    pub provider: String,
    /// Base URL of the purge/redirect service (http provider).
    #[serde(default)]
    pub base_url: Option<String>,
    /// HTTP request timeout in seconds.
    #[serde(default = "default_request_timeout")]
    pub request_timeout_seconds: u64,
    /// In-memory edge cache configuration.
    #[serde(default)]
    pub memory: MemoryEdgeCacheConfig,
}

impl Default for EdgeCacheConfig {
    fn default() -> Self {
        Self {
            provider: default_provider(),
            base_url: None,
            request_timeout_seconds: default_request_timeout(),
            memory: MemoryEdgeCacheConfig::default(),
        }
    }
}

impl EdgeCacheConfig {
    pub(crate) fn validate(&self) -> Result<(), AppError> {
        if self.provider == "http" && self.base_url.is_none() {
            return Err(AppError::configuration(
                "edge_cache.base_url is required for the http provider",
            ));
        }
        Ok(())
    }
}

/// In-memory edge cache configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MemoryEdgeCacheConfig {
    /// Maximum number of cached pages tracked.
    #[serde(default = "default_max_capacity")]
    pub max_capacity: u64,
    /// TTL for cached pages in seconds.
    #[serde(default = "default_memory_ttl")]
    pub time_to_live_seconds: u64,
}

impl Default for MemoryEdgeCacheConfig {
    fn default() -> Self {
        Self {
            max_capacity: default_max_capacity(),
            time_to_live_seconds: default_memory_ttl(),
        }
    }
}

fn default_provider() -> String {
    "memory".to_string()
}

fn default_request_timeout() -> u64 {
    10
}

fn default_max_capacity() -> u64 {
    10000
}

fn default_memory_ttl() -> u64 {
    3600
}
