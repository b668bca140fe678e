use serde::{Deserialize, Serialize};

use super::defaults;

/// Embedding cache and query memo configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct CacheConfig {
    /// Snapshot backend: "sqlite", "file", or "memory".
    pub snapshot_backend: String,
    /// Database or JSON file path for persistent backends.
    pub snapshot_path: String,
    /// Query memo max entries.
    pub memo_capacity: u64,
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            snapshot_backend: defaults::DEFAULT_SNAPSHOT_BACKEND.to_string(),
            snapshot_path: defaults::DEFAULT_SNAPSHOT_PATH.to_string(),
            memo_capacity: defaults::DEFAULT_MEMO_CAPACITY,
        }
    }
}
