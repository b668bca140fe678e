use serde::{Deserialize, Serialize};

/// Wire dialect of an OpenAI-style HTTP endpoint.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum ApiFlavor {
    /// `{api_base}/embeddings`, `{api_base}/chat/completions`, bearer auth.
    #[default]
    #[serde(rename = "openai")]
    OpenAi,
    /// `{api_base}/openai/deployments/{model}/...?api-version=`, `api-key` header.
    #[serde(rename = "azure")]
    Azure,
}
