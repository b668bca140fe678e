use serde::{Deserialize, Serialize};

use super::defaults;
use super::ApiFlavor;

/// Vector provider configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct EmbeddingConfig {
    /// Vector provider: "api" or "local".
    pub provider: String,
    pub api_type: ApiFlavor,
    pub api_base: String,
    pub api_key: Option<String>,
    /// Only used by Azure endpoints.
    pub api_version: String,
    /// Model name, or deployment name for Azure.
    pub model: String,
    /// Embedding dimensions.
    pub dimensions: usize,
    /// Provider-side retries after the first attempt.
    pub max_retries: u32,
    pub timeout_secs: u64,
}

impl Default for EmbeddingConfig {
    fn default() -> Self {
        Self {
            provider: defaults::DEFAULT_EMBEDDING_PROVIDER.to_string(),
            api_type: ApiFlavor::default(),
            api_base: defaults::DEFAULT_OPENAI_API_BASE.to_string(),
            api_key: None,
            api_version: defaults::DEFAULT_AZURE_API_VERSION.to_string(),
            model: defaults::DEFAULT_EMBEDDING_MODEL.to_string(),
            dimensions: defaults::DEFAULT_EMBEDDING_DIMENSIONS,
            max_retries: defaults::DEFAULT_PROVIDER_MAX_RETRIES,
            timeout_secs: defaults::DEFAULT_PROVIDER_TIMEOUT_SECS,
        }
    }
}
