//! Bounded text → vector memo for ad hoc queries, backed by moka.
//!
//! LRU eviction, exact-text keys, process lifetime only. Failed provider
//! calls are never memoized.

use std::sync::Arc;

use moka::policy::EvictionPolicy;
use moka::sync::Cache;
use prism_core::errors::{PrismResult, ProviderError};
use prism_core::traits::IVectorProvider;
use tracing::debug;

/// Memoizing front for a vector provider.
///
/// `moka::sync::Cache` is internally synchronized, so one memo can be shared
/// across request threads behind an `Arc`.
pub struct QueryMemo {
    provider: Arc<dyn IVectorProvider>,
    cache: Cache<String, Vec<f32>>,
    capacity: u64,
}

impl QueryMemo {
    /// Create a memo holding at most `capacity` query vectors.
    pub fn new(provider: Arc<dyn IVectorProvider>, capacity: u64) -> Self {
        let cache = Cache::builder()
            .max_capacity(capacity)
            .eviction_policy(EvictionPolicy::lru())
            .build();

        Self {
            provider,
            cache,
            capacity,
        }
    }

    /// Vector for `text`, calling the provider only on a miss.
    ///
    /// Concurrent misses on the same text share one provider call.
    pub fn embed(&self, text: &str) -> PrismResult<Vec<f32>> {
        let mut missed = false;
        let result = self.cache.try_get_with_by_ref(text, || {
            missed = true;
            self.provider.embed(text)
        });

        match result {
            Ok(vec) => {
                if missed {
                    debug!(chars = text.len(), "query memo miss, stored");
                } else {
                    debug!(chars = text.len(), "query memo hit");
                }
                Ok(vec)
            }
            // Waiters on the same key share the error; only the last owner
            // gets the original back.
            Err(shared) => Err(Arc::try_unwrap(shared).unwrap_or_else(|shared| {
                ProviderError::Unavailable {
                    provider: self.provider.name().to_string(),
                    reason: shared.to_string(),
                }
                .into()
            })),
        }
    }

    /// Whether `text` is currently memoized.
    pub fn contains(&self, text: &str) -> bool {
        self.cache.contains_key(text)
    }

    /// Number of memoized queries after pending evictions are applied.
    pub fn len(&self) -> u64 {
        self.cache.run_pending_tasks();
        self.cache.entry_count()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn capacity(&self) -> u64 {
        self.capacity
    }

    /// Drop every memoized query.
    pub fn clear(&self) {
        self.cache.invalidate_all();
    }
}
