/// Similarity search errors.
#[derive(Debug, thiserror::Error)]
pub enum SearchError {
    #[error("dimension mismatch for record {id}: query has {expected}, record has {actual}")]
    DimensionMismatch {
        id: String,
        expected: usize,
        actual: usize,
    },
}
