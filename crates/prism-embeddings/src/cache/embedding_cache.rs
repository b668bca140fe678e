//! Catalog embedding cache.
//!
//! Resolution order: in-memory snapshot → persisted snapshot → regenerate.
//! A snapshot is reused only while its fingerprint, model and dimensions
//! match the catalog and provider. Any mismatch regenerates every
//! descriptor; the old snapshot stays visible until the new one is saved.

use std::sync::{Arc, Mutex, PoisonError, RwLock};

use chrono::Utc;
use prism_core::catalog::Catalog;
use prism_core::errors::{PrismResult, ProviderError};
use prism_core::models::{CacheSnapshot, EmbeddingRecord};
use prism_core::traits::{ISnapshotStore, IVectorProvider};
use tracing::{debug, info, warn};

/// Shared, lazily regenerated cache of descriptor embeddings.
///
/// Readers take a cheap `Arc` clone of the current snapshot. Regeneration is
/// single-flight: concurrent callers that find the cache stale wait on one
/// lock, and all but the first find a fresh snapshot on re-check.
pub struct EmbeddingCache {
    provider: Arc<dyn IVectorProvider>,
    store: Arc<dyn ISnapshotStore>,
    current: RwLock<Option<Arc<CacheSnapshot>>>,
    regen: Mutex<()>,
}

impl EmbeddingCache {
    pub fn new(provider: Arc<dyn IVectorProvider>, store: Arc<dyn ISnapshotStore>) -> Self {
        Self {
            provider,
            store,
            current: RwLock::new(None),
            regen: Mutex::new(()),
        }
    }

    /// A snapshot valid for `catalog`, regenerating it if necessary.
    ///
    /// # Errors
    /// Provider failures during regeneration and store write failures. On
    /// error the previously visible snapshot (if any) is left untouched.
    pub fn resolve(&self, catalog: &Catalog) -> PrismResult<Arc<CacheSnapshot>> {
        if let Some(snapshot) = self.fresh_current(catalog) {
            return Ok(snapshot);
        }

        let _guard = self.regen.lock().unwrap_or_else(PoisonError::into_inner);

        // Another caller may have finished regenerating while we waited.
        if let Some(snapshot) = self.fresh_current(catalog) {
            debug!("embedding cache refreshed by concurrent caller");
            return Ok(snapshot);
        }

        if let Some(snapshot) = self.load_persisted(catalog) {
            let snapshot = Arc::new(snapshot);
            self.publish(snapshot.clone());
            info!(
                event = "cache_loaded",
                store = self.store.name(),
                records = snapshot.len(),
                "embedding cache loaded from store"
            );
            return Ok(snapshot);
        }

        let snapshot = Arc::new(self.regenerate(catalog)?);
        self.store.save(&snapshot)?;
        self.publish(snapshot.clone());
        info!(
            event = "cache_regenerated",
            store = self.store.name(),
            model = self.provider.name(),
            records = snapshot.len(),
            fingerprint = %snapshot.catalog_fingerprint,
            "embedding cache regenerated"
        );
        Ok(snapshot)
    }

    /// The snapshot currently held in memory, whatever catalog it is for.
    pub fn current(&self) -> Option<Arc<CacheSnapshot>> {
        self.current
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// Drop the in-memory snapshot so the next `resolve` re-checks the store.
    pub fn invalidate(&self) {
        let _guard = self.regen.lock().unwrap_or_else(PoisonError::into_inner);
        *self.current.write().unwrap_or_else(PoisonError::into_inner) = None;
        debug!(event = "cache_invalidated", "in-memory snapshot dropped");
    }

    /// Drop both the in-memory and the persisted snapshot, forcing the next
    /// `resolve` to regenerate.
    pub fn purge(&self) -> PrismResult<()> {
        let _guard = self.regen.lock().unwrap_or_else(PoisonError::into_inner);
        *self.current.write().unwrap_or_else(PoisonError::into_inner) = None;
        self.store.clear()?;
        info!(event = "cache_purged", store = self.store.name(), "embedding cache purged");
        Ok(())
    }

    pub fn provider(&self) -> &Arc<dyn IVectorProvider> {
        &self.provider
    }

    fn is_fresh(&self, snapshot: &CacheSnapshot, catalog: &Catalog) -> bool {
        snapshot.is_valid_for(catalog, self.provider.name(), self.provider.dimensions())
    }

    fn fresh_current(&self, catalog: &Catalog) -> Option<Arc<CacheSnapshot>> {
        self.current().filter(|s| self.is_fresh(s, catalog))
    }

    fn publish(&self, snapshot: Arc<CacheSnapshot>) {
        *self.current.write().unwrap_or_else(PoisonError::into_inner) = Some(snapshot);
    }

    fn load_persisted(&self, catalog: &Catalog) -> Option<CacheSnapshot> {
        match self.store.load() {
            Ok(Some(snapshot)) if self.is_fresh(&snapshot, catalog) => Some(snapshot),
            Ok(Some(snapshot)) => {
                debug!(
                    stored = %snapshot.catalog_fingerprint,
                    wanted = %catalog.fingerprint(),
                    stored_model = %snapshot.model,
                    "persisted snapshot is stale"
                );
                None
            }
            Ok(None) => None,
            Err(e) => {
                warn!(store = self.store.name(), error = %e, "unreadable snapshot, regenerating");
                None
            }
        }
    }

    fn regenerate(&self, catalog: &Catalog) -> PrismResult<CacheSnapshot> {
        let dimensions = self.provider.dimensions();
        let mut records = Vec::with_capacity(catalog.len());

        for descriptor in catalog {
            let vector = self.provider.embed(&descriptor.description)?;
            if vector.is_empty() || vector.len() != dimensions {
                return Err(ProviderError::DimensionMismatch {
                    provider: self.provider.name().to_string(),
                    expected: dimensions,
                    actual: vector.len(),
                }
                .into());
            }
            if vector.iter().any(|v| !v.is_finite()) {
                return Err(ProviderError::MalformedResponse {
                    provider: self.provider.name().to_string(),
                    reason: format!("non-finite embedding for {}", descriptor.id),
                }
                .into());
            }
            records.push(EmbeddingRecord {
                id: descriptor.id.clone(),
                vector,
            });
        }

        Ok(CacheSnapshot {
            catalog_fingerprint: catalog.fingerprint(),
            model: self.provider.name().to_string(),
            dimensions,
            created_at: Utc::now(),
            records,
        })
    }
}
