//! Embedding cache behavior against real snapshot stores.
//!
//! Each test targets one way a stale or half-written cache would serve wrong
//! vectors: edited catalogs, model swaps, mid-batch failures, racing
//! regenerations, and process restarts.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Barrier};
use std::thread;
use std::time::Duration;

use prism_core::errors::{PrismResult, StorageError};
use prism_core::models::{CacheSnapshot, EffectDescriptor};
use prism_core::traits::ISnapshotStore;
use prism_core::{Catalog, PrismError};
use prism_embeddings::{EmbeddingCache, MemorySnapshotStore, SqliteSnapshotStore};
use test_fixtures::{effects_catalog, ConceptVectorProvider, FlakyVectorProvider};

fn edited_water_color(catalog: &Catalog) -> Catalog {
    let descriptors = catalog
        .iter()
        .map(|d| {
            if d.id == "water_color" {
                EffectDescriptor::new(&d.id, "Soft brush strokes, like a watercolor painting.")
            } else {
                d.clone()
            }
        })
        .collect();
    Catalog::new(descriptors).unwrap()
}

/// Memory store whose writes can be made to fail, like a full disk.
#[derive(Default)]
struct SwitchableStore {
    inner: MemorySnapshotStore,
    fail_saves: AtomicBool,
}

impl SwitchableStore {
    fn fail_saves(&self, fail: bool) {
        self.fail_saves.store(fail, Ordering::SeqCst);
    }
}

impl ISnapshotStore for SwitchableStore {
    fn load(&self) -> PrismResult<Option<CacheSnapshot>> {
        self.inner.load()
    }

    fn save(&self, snapshot: &CacheSnapshot) -> PrismResult<()> {
        if self.fail_saves.load(Ordering::SeqCst) {
            return Err(StorageError::IoError {
                path: "snapshot".to_string(),
                reason: "no space left on device".to_string(),
            }
            .into());
        }
        self.inner.save(snapshot)
    }

    fn clear(&self) -> PrismResult<()> {
        self.inner.clear()
    }

    fn name(&self) -> &str {
        "switchable"
    }
}

#[test]
fn second_resolve_makes_no_provider_calls() {
    let provider = Arc::new(ConceptVectorProvider::new());
    let cache = EmbeddingCache::new(provider.clone(), Arc::new(MemorySnapshotStore::new()));
    let catalog = effects_catalog();

    let first = cache.resolve(&catalog).unwrap();
    provider.reset_calls();
    let second = cache.resolve(&catalog).unwrap();

    assert_eq!(provider.calls(), 0);
    assert_eq!(first.records, second.records);
}

#[test]
fn editing_one_description_regenerates_everything() {
    let provider = Arc::new(ConceptVectorProvider::new());
    let cache = EmbeddingCache::new(provider.clone(), Arc::new(MemorySnapshotStore::new()));
    let original = effects_catalog();
    let before = cache.resolve(&original).unwrap();

    provider.reset_calls();
    let edited = edited_water_color(&original);
    let after = cache.resolve(&edited).unwrap();

    assert_ne!(before.catalog_fingerprint, after.catalog_fingerprint);
    assert_eq!(provider.calls(), 4);
    assert_eq!(after.len(), 4);
    assert_eq!(after.catalog_fingerprint, edited.fingerprint());
}

#[test]
fn failed_regeneration_keeps_previous_snapshot() {
    let good = Arc::new(ConceptVectorProvider::new());
    let store = Arc::new(MemorySnapshotStore::new());
    let original = effects_catalog();
    EmbeddingCache::new(good, store.clone())
        .resolve(&original)
        .unwrap();

    // Third descriptor of the edited catalog fails.
    let flaky = Arc::new(FlakyVectorProvider::failing_at(3));
    let cache = EmbeddingCache::new(flaky.clone(), store.clone());
    let before = cache.resolve(&original).unwrap();
    assert_eq!(flaky.calls(), 0, "persisted snapshot should be adopted");

    let err = cache.resolve(&edited_water_color(&original)).unwrap_err();
    assert!(matches!(err, PrismError::ProviderError(_)));
    assert_eq!(flaky.calls(), 3, "batch should stop at the failure");

    let current = cache.current().unwrap();
    assert!(Arc::ptr_eq(&current, &before));
    assert_eq!(store.save_count(), 1);
    assert_eq!(
        store.load().unwrap().unwrap().catalog_fingerprint,
        original.fingerprint()
    );
}

#[test]
fn concurrent_stale_resolves_regenerate_once() {
    let provider = Arc::new(ConceptVectorProvider::new().with_delay(Duration::from_millis(20)));
    let cache = Arc::new(EmbeddingCache::new(
        provider.clone(),
        Arc::new(MemorySnapshotStore::new()),
    ));
    let catalog = Arc::new(effects_catalog());
    let barrier = Arc::new(Barrier::new(8));

    let handles: Vec<_> = (0..8)
        .map(|_| {
            let cache = cache.clone();
            let catalog = catalog.clone();
            let barrier = barrier.clone();
            thread::spawn(move || {
                barrier.wait();
                cache.resolve(&catalog).unwrap()
            })
        })
        .collect();

    let snapshots: Vec<_> = handles.into_iter().map(|h| h.join().unwrap()).collect();
    assert_eq!(provider.calls(), catalog.len());
    for s in &snapshots[1..] {
        assert!(Arc::ptr_eq(s, &snapshots[0]));
    }
}

#[test]
fn persisted_snapshot_survives_restart() {
    let dir = tempfile::tempdir().unwrap();
    let db = dir.path().join("prism-embeddings.db");
    let catalog = effects_catalog();

    let first_provider = Arc::new(ConceptVectorProvider::new());
    let first = EmbeddingCache::new(
        first_provider.clone(),
        Arc::new(SqliteSnapshotStore::open(&db).unwrap()),
    );
    let original = first.resolve(&catalog).unwrap();
    assert_eq!(first_provider.calls(), 4);
    drop(first);

    let second_provider = Arc::new(ConceptVectorProvider::new());
    let second = EmbeddingCache::new(
        second_provider.clone(),
        Arc::new(SqliteSnapshotStore::open(&db).unwrap()),
    );
    let reloaded = second.resolve(&catalog).unwrap();

    assert_eq!(second_provider.calls(), 0);
    assert_eq!(reloaded.records, original.records);
}

#[test]
fn model_change_invalidates_persisted_snapshot() {
    let store = Arc::new(MemorySnapshotStore::new());
    let catalog = effects_catalog();
    EmbeddingCache::new(Arc::new(ConceptVectorProvider::new()), store.clone())
        .resolve(&catalog)
        .unwrap();

    let upgraded = Arc::new(ConceptVectorProvider::new().with_name("concept-axes-v2"));
    let cache = EmbeddingCache::new(upgraded.clone(), store.clone());
    let snapshot = cache.resolve(&catalog).unwrap();

    assert_eq!(upgraded.calls(), 4);
    assert_eq!(snapshot.model, "concept-axes-v2");
}

#[test]
fn corrupt_store_is_regenerated() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("snapshot.json");
    std::fs::write(&path, "not a snapshot").unwrap();

    let provider = Arc::new(ConceptVectorProvider::new());
    let store = Arc::new(prism_embeddings::FileSnapshotStore::new(&path));
    let cache = EmbeddingCache::new(provider.clone(), store.clone());
    let snapshot = cache.resolve(&effects_catalog()).unwrap();

    assert_eq!(provider.calls(), 4);
    assert_eq!(store.load().unwrap().unwrap(), *snapshot);
}

#[test]
fn records_follow_catalog_order() {
    let cache = EmbeddingCache::new(
        Arc::new(ConceptVectorProvider::new()),
        Arc::new(MemorySnapshotStore::new()),
    );
    let catalog = effects_catalog();
    let snapshot = cache.resolve(&catalog).unwrap();
    let ids: Vec<_> = snapshot.records().iter().map(|r| r.id.as_str()).collect();
    assert_eq!(ids, catalog.ids());
}

#[test]
fn failed_save_keeps_previous_snapshot() {
    let provider = Arc::new(ConceptVectorProvider::new());
    let store = Arc::new(SwitchableStore::default());
    let cache = EmbeddingCache::new(provider.clone(), store.clone());
    let original = effects_catalog();
    let edited = edited_water_color(&original);
    let before = cache.resolve(&original).unwrap();

    store.fail_saves(true);
    let err = cache.resolve(&edited).unwrap_err();
    assert!(matches!(err, PrismError::StorageError(_)));
    let current = cache.current().unwrap();
    assert!(Arc::ptr_eq(&current, &before));
    let persisted = store.load().unwrap().unwrap();
    assert_eq!(persisted.catalog_fingerprint, original.fingerprint());

    store.fail_saves(false);
    let after = cache.resolve(&edited).unwrap();
    assert_eq!(after.catalog_fingerprint, edited.fingerprint());
    assert!(Arc::ptr_eq(&cache.current().unwrap(), &after));
    assert_eq!(
        store.load().unwrap().unwrap().catalog_fingerprint,
        edited.fingerprint()
    );
}
