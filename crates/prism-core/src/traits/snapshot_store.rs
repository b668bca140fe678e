use crate::errors::PrismResult;
use crate::models::CacheSnapshot;

/// Durable home of the embedding cache snapshot.
///
/// `save` must replace the previous snapshot atomically: a concurrent or
/// later `load` sees either the old snapshot or the new one, never a mix.
pub trait ISnapshotStore: Send + Sync {
    /// Read the persisted snapshot, if any.
    fn load(&self) -> PrismResult<Option<CacheSnapshot>>;

    /// Replace the persisted snapshot.
    fn save(&self, snapshot: &CacheSnapshot) -> PrismResult<()>;

    /// Remove any persisted snapshot.
    fn clear(&self) -> PrismResult<()>;

    /// Backend name for logging.
    fn name(&self) -> &str;
}
