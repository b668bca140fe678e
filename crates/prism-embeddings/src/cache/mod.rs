//! Descriptor embedding cache, its snapshot stores, and the query memo.

mod embedding_cache;
mod file_store;
mod memory_store;
mod query_memo;
mod sqlite_store;

use std::sync::Arc;

use prism_core::config::CacheConfig;
use prism_core::errors::{PrismError, PrismResult};
use prism_core::traits::ISnapshotStore;

pub use embedding_cache::EmbeddingCache;
pub use file_store::FileSnapshotStore;
pub use memory_store::MemorySnapshotStore;
pub use query_memo::QueryMemo;
pub use sqlite_store::SqliteSnapshotStore;

/// Build the snapshot store selected by `cache.snapshot_backend`.
pub fn create_store(config: &CacheConfig) -> PrismResult<Arc<dyn ISnapshotStore>> {
    match config.snapshot_backend.as_str() {
        "sqlite" => Ok(Arc::new(SqliteSnapshotStore::open(&config.snapshot_path)?)),
        "file" => Ok(Arc::new(FileSnapshotStore::new(&config.snapshot_path))),
        "memory" => Ok(Arc::new(MemorySnapshotStore::new())),
        other => Err(PrismError::ConfigError {
            reason: format!("unknown snapshot backend {other:?}"),
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builds_each_backend() {
        let dir = tempfile::tempdir().unwrap();
        for (backend, file) in [("sqlite", "snap.db"), ("file", "snap.json"), ("memory", "")] {
            let config = CacheConfig {
                snapshot_backend: backend.to_string(),
                snapshot_path: dir.path().join(file).display().to_string(),
                ..Default::default()
            };
            assert_eq!(create_store(&config).unwrap().name(), backend);
        }
    }

    #[test]
    fn rejects_unknown_backend() {
        let config = CacheConfig {
            snapshot_backend: "redis".to_string(),
            ..Default::default()
        };
        assert!(matches!(
            create_store(&config),
            Err(PrismError::ConfigError { .. })
        ));
    }
}
