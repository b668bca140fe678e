//! Process-local snapshot store.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{PoisonError, RwLock};

use prism_core::errors::PrismResult;
use prism_core::models::CacheSnapshot;
use prism_core::traits::ISnapshotStore;

/// Holds the snapshot in memory. Nothing survives the process.
#[derive(Default)]
pub struct MemorySnapshotStore {
    slot: RwLock<Option<CacheSnapshot>>,
    saves: AtomicUsize,
}

impl MemorySnapshotStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start with a snapshot already stored.
    pub fn with_snapshot(snapshot: CacheSnapshot) -> Self {
        Self {
            slot: RwLock::new(Some(snapshot)),
            saves: AtomicUsize::new(0),
        }
    }

    /// How many times `save` has been called.
    pub fn save_count(&self) -> usize {
        self.saves.load(Ordering::SeqCst)
    }
}

impl ISnapshotStore for MemorySnapshotStore {
    fn load(&self) -> PrismResult<Option<CacheSnapshot>> {
        Ok(self
            .slot
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone())
    }

    fn save(&self, snapshot: &CacheSnapshot) -> PrismResult<()> {
        *self.slot.write().unwrap_or_else(PoisonError::into_inner) = Some(snapshot.clone());
        self.saves.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }

    fn clear(&self) -> PrismResult<()> {
        *self.slot.write().unwrap_or_else(PoisonError::into_inner) = None;
        Ok(())
    }

    fn name(&self) -> &str {
        "memory"
    }
}
