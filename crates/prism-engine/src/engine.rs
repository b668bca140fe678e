//! The top-level entry point that ties the catalog, embeddings, and selection crates together.

use std::sync::{Arc, PoisonError, RwLock};

use prism_core::catalog::Catalog;
use prism_core::config::PrismConfig;
use prism_core::errors::PrismResult;
use prism_core::models::{CacheSnapshot, SelectionResult, SimilarityResult};
use prism_core::traits::{IGenerativeProvider, ISnapshotStore, IVectorProvider};
use prism_embeddings::{create_provider, create_store, rank, rank_all, EmbeddingCache, QueryMemo};
use prism_selection::providers::{create_generator, create_storyteller};
use prism_selection::{explain_similarity, SelectionPipeline};
use tracing::info;

use crate::tracing_setup::events;

/// Effect selection engine.
///
/// Shareable across threads behind an `Arc`. The catalog can be swapped at
/// runtime with [`reload_catalog`](Self::reload_catalog); the embedding
/// cache notices the new fingerprint on the next lookup.
pub struct EffectEngine {
    catalog: RwLock<Arc<Catalog>>,
    cache: EmbeddingCache,
    memo: QueryMemo,
    pipeline: SelectionPipeline,
}

impl EffectEngine {
    pub fn new(
        catalog: Catalog,
        vectors: Arc<dyn IVectorProvider>,
        generator: Arc<dyn IGenerativeProvider>,
        store: Arc<dyn ISnapshotStore>,
        memo_capacity: u64,
    ) -> Self {
        Self {
            catalog: RwLock::new(Arc::new(catalog)),
            cache: EmbeddingCache::new(vectors.clone(), store),
            memo: QueryMemo::new(vectors, memo_capacity),
            pipeline: SelectionPipeline::new(generator),
        }
    }

    /// Route [`tell_story`](Self::tell_story) to a separately tuned provider.
    pub fn with_storyteller(mut self, storyteller: Arc<dyn IGenerativeProvider>) -> Self {
        self.pipeline = self.pipeline.with_storyteller(storyteller);
        self
    }

    /// Build every component from configuration.
    ///
    /// # Errors
    /// Catalog load failures, unknown provider or backend names, and store
    /// open failures.
    pub fn from_config(config: &PrismConfig) -> PrismResult<Self> {
        config.validate()?;
        let catalog = Catalog::from_path(&config.catalog.path)?;
        let vectors = create_provider(&config.embedding)?;
        let store = create_store(&config.cache)?;
        let generator = create_generator(&config.generation)?;
        let storyteller = create_storyteller(&config.generation)?;

        info!(
            effects = catalog.len(),
            fingerprint = %catalog.fingerprint(),
            store = store.name(),
            generator = generator.name(),
            "effect engine configured"
        );
        Ok(Self::new(
            catalog,
            vectors,
            generator,
            store,
            config.cache.memo_capacity,
        )
        .with_storyteller(storyteller))
    }

    /// The catalog currently in use.
    pub fn catalog(&self) -> Arc<Catalog> {
        self.catalog
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// Replace the catalog. Embeddings regenerate lazily on the next lookup.
    pub fn reload_catalog(&self, catalog: Catalog) {
        let previous = {
            let mut slot = self.catalog.write().unwrap_or_else(PoisonError::into_inner);
            std::mem::replace(&mut *slot, Arc::new(catalog))
        };
        let current = self.catalog();
        events::catalog_reloaded(
            previous.fingerprint().as_str(),
            current.fingerprint().as_str(),
            current.len(),
        );
    }

    /// Resolve the embedding snapshot for the current catalog ahead of the
    /// first request.
    pub fn warm(&self) -> PrismResult<Arc<CacheSnapshot>> {
        self.cache.resolve(&self.catalog())
    }

    /// Generative select → explain → evaluate for `request`.
    pub fn select_effect(&self, request: &str) -> PrismResult<SelectionResult> {
        let _span = crate::selection_span!(request).entered();
        self.pipeline.run(request, &self.catalog())
    }

    /// Most similar catalog effect to `request` by cosine similarity.
    pub fn find_nearest(&self, request: &str) -> PrismResult<SimilarityResult> {
        let (snapshot, query) = self.embed_request(request)?;
        let best = rank(&query, snapshot.records())?;
        events::nearest_found(&best.id, best.score);
        Ok(best)
    }

    /// Up to `k` catalog effects ranked by similarity to `request`.
    pub fn top_matches(&self, request: &str, k: usize) -> PrismResult<Vec<SimilarityResult>> {
        let (snapshot, query) = self.embed_request(request)?;
        let mut ranked = rank_all(&query, snapshot.records())?;
        ranked.truncate(k);
        Ok(ranked)
    }

    /// Nearest effect plus a templated explanation, with no generative call.
    pub fn explain_nearest(&self, request: &str) -> PrismResult<(SimilarityResult, String)> {
        let best = self.find_nearest(request)?;
        let explanation = explain_similarity(request, &best, &self.catalog());
        Ok((best, explanation))
    }

    /// Short story about detected objects.
    pub fn tell_story(&self, objects: &[String]) -> PrismResult<String> {
        let story = self.pipeline.tell_story(objects)?;
        events::story_generated(objects.len(), story.len());
        Ok(story)
    }

    /// Snapshot for the current catalog, then the request's vector.
    fn embed_request(&self, request: &str) -> PrismResult<(Arc<CacheSnapshot>, Vec<f32>)> {
        let provider = self.cache.provider();
        let _span = crate::embedding_span!(provider.name(), provider.dimensions()).entered();
        let snapshot = self.cache.resolve(&self.catalog())?;
        let query = self.memo.embed(request)?;
        Ok((snapshot, query))
    }
}
