//! Vector provider implementations and selection from configuration.

pub mod api_provider;
pub mod local_provider;

use std::sync::Arc;

pub use api_provider::ApiVectorProvider;
pub use local_provider::LocalVectorProvider;

use prism_core::config::EmbeddingConfig;
use prism_core::errors::{PrismError, PrismResult};
use prism_core::traits::IVectorProvider;
use tracing::info;

/// Build the configured vector provider.
///
/// # Errors
/// `PrismError::ConfigError` for an unknown provider kind; provider
/// construction errors otherwise.
pub fn create_provider(config: &EmbeddingConfig) -> PrismResult<Arc<dyn IVectorProvider>> {
    match config.provider.as_str() {
        "api" => {
            let provider = ApiVectorProvider::from_config(config)?;
            info!(
                provider = "api",
                model = %config.model,
                endpoint = provider.endpoint(),
                dims = config.dimensions,
                "vector provider ready"
            );
            Ok(Arc::new(provider))
        }
        "local" => {
            info!(provider = "local", dims = config.dimensions, "vector provider ready");
            Ok(Arc::new(LocalVectorProvider::new(config.dimensions)))
        }
        other => Err(PrismError::ConfigError {
            reason: format!("unknown embedding provider: {other}"),
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn local_provider_from_config() {
        let provider = create_provider(&EmbeddingConfig {
            provider: "local".to_string(),
            dimensions: 32,
            ..Default::default()
        })
        .unwrap();
        assert_eq!(provider.dimensions(), 32);
        assert_eq!(provider.name(), "local-hashed-bow");
    }

    #[test]
    fn unknown_provider_is_config_error() {
        let result = create_provider(&EmbeddingConfig {
            provider: "onnx".to_string(),
            ..Default::default()
        });
        assert!(matches!(result, Err(PrismError::ConfigError { .. })));
    }
}
