mod catalog_error;
mod provider_error;
mod search_error;
mod storage_error;

pub use catalog_error::CatalogError;
pub use provider_error::ProviderError;
pub use search_error::SearchError;
pub use storage_error::StorageError;

/// Top-level error for every fallible Prism operation.
#[derive(Debug, thiserror::Error)]
pub enum PrismError {
    #[error("catalog error: {0}")]
    CatalogError(#[from] CatalogError),

    #[error("provider error: {0}")]
    ProviderError(#[from] ProviderError),

    #[error("similarity search invoked with an empty record set")]
    EmptyCatalog,

    #[error("malformed verdict: expected a leading YES or NO, got {response:?}")]
    MalformedVerdict { response: String },

    #[error("search error: {0}")]
    SearchError(#[from] SearchError),

    #[error("storage error: {0}")]
    StorageError(#[from] StorageError),

    #[error("config error: {reason}")]
    ConfigError { reason: String },

    #[error("serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),
}

impl PrismError {
    /// Whether retrying the whole request could succeed.
    ///
    /// Provider failures are transient from the engine's point of view.
    /// Catalog, config, and verdict-format failures are not.
    pub fn is_retryable(&self) -> bool {
        matches!(self, Self::ProviderError(_) | Self::StorageError(_))
    }
}

pub type PrismResult<T> = Result<T, PrismError>;
