use serde::{Deserialize, Serialize};

/// Best (or ranked) match of a query against the catalog.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SimilarityResult {
    pub id: String,
    /// Cosine similarity in `[-1, 1]`.
    pub score: f64,
}
