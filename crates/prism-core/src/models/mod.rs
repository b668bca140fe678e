mod cache_snapshot;
mod effect_descriptor;
mod selection_result;
mod similarity_result;

pub use cache_snapshot::{CacheSnapshot, EmbeddingRecord};
pub use effect_descriptor::EffectDescriptor;
pub use selection_result::{SelectionResult, Verdict};
pub use similarity_result::SimilarityResult;
