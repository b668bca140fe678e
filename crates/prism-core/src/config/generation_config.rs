use serde::{Deserialize, Serialize};

use super::defaults;
use super::ApiFlavor;

/// Generative provider configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GenerationConfig {
    pub api_type: ApiFlavor,
    pub api_base: String,
    pub api_key: Option<String>,
    pub api_version: String,
    /// Model name, or deployment name for Azure.
    pub model: String,
    /// Sampling temperature for the select/explain/evaluate stages.
    pub temperature: f32,
    pub max_tokens: u32,
    /// Story generation runs warmer than the pipeline stages.
    pub story_temperature: f32,
    pub story_max_tokens: u32,
    pub max_retries: u32,
    pub timeout_secs: u64,
}

impl Default for GenerationConfig {
    fn default() -> Self {
        Self {
            api_type: ApiFlavor::default(),
            api_base: defaults::DEFAULT_OPENAI_API_BASE.to_string(),
            api_key: None,
            api_version: defaults::DEFAULT_AZURE_API_VERSION.to_string(),
            model: defaults::DEFAULT_GENERATION_MODEL.to_string(),
            temperature: defaults::DEFAULT_GENERATION_TEMPERATURE,
            max_tokens: defaults::DEFAULT_GENERATION_MAX_TOKENS,
            story_temperature: defaults::DEFAULT_STORY_TEMPERATURE,
            story_max_tokens: defaults::DEFAULT_STORY_MAX_TOKENS,
            max_retries: defaults::DEFAULT_PROVIDER_MAX_RETRIES,
            timeout_secs: defaults::DEFAULT_PROVIDER_TIMEOUT_SECS,
        }
    }
}
