//! Generative provider implementations.

mod chat_provider;

use std::sync::Arc;

use prism_core::config::GenerationConfig;
use prism_core::errors::PrismResult;
use prism_core::traits::IGenerativeProvider;

pub use chat_provider::{chat_completions_url, ApiChatProvider, Sampling};

/// Chat provider for the select, explain, and evaluate stages.
pub fn create_generator(config: &GenerationConfig) -> PrismResult<Arc<dyn IGenerativeProvider>> {
    let sampling = Sampling {
        temperature: config.temperature,
        max_tokens: config.max_tokens,
    };
    Ok(Arc::new(ApiChatProvider::from_config(config, sampling)?))
}

/// Chat provider tuned for story generation.
pub fn create_storyteller(config: &GenerationConfig) -> PrismResult<Arc<dyn IGenerativeProvider>> {
    let sampling = Sampling {
        temperature: config.story_temperature,
        max_tokens: config.story_max_tokens,
    };
    Ok(Arc::new(ApiChatProvider::from_config(config, sampling)?))
}
