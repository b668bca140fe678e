//! # prism-core
//!
//! Foundation crate for the Prism effect selector.
//! Defines the catalog, models, traits, errors, config, and constants.
//! Every other crate in the workspace depends on this.

pub mod catalog;
pub mod config;
pub mod constants;
pub mod errors;
pub mod models;
pub mod traits;

// Re-export the most commonly used types at the crate root.
pub use catalog::{Catalog, CatalogFingerprint};
pub use config::PrismConfig;
pub use errors::{PrismError, PrismResult};
pub use models::{
    CacheSnapshot, EffectDescriptor, EmbeddingRecord, SelectionResult, SimilarityResult, Verdict,
};
