use crate::errors::PrismResult;

/// Text-to-embedding provider.
pub trait IVectorProvider: Send + Sync {
    /// Embed a single text, returning a vector of floats.
    fn embed(&self, text: &str) -> PrismResult<Vec<f32>>;

    /// The dimensionality of embeddings produced by this provider.
    fn dimensions(&self) -> usize;

    /// Model or provider name. Recorded in cache snapshots so a model change
    /// invalidates persisted vectors.
    fn name(&self) -> &str;
}
