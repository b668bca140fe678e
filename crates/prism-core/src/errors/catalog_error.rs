/// Catalog loading and validation errors.
#[derive(Debug, thiserror::Error)]
pub enum CatalogError {
    #[error("catalog contains no effects")]
    Empty,

    #[error("duplicate effect id: {id}")]
    DuplicateId { id: String },

    #[error("effect at position {position} has a blank id")]
    BlankId { position: usize },

    #[error("catalog unreadable: {path}: {reason}")]
    Unreadable { path: String, reason: String },

    #[error("catalog parse failed ({format}): {reason}")]
    Parse { format: String, reason: String },
}
