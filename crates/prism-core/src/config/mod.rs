pub mod defaults;

mod api_flavor;
mod cache_config;
mod catalog_config;
mod embedding_config;
mod generation_config;
mod observability_config;

use std::path::Path;

use serde::{Deserialize, Serialize};

pub use api_flavor::ApiFlavor;
pub use cache_config::CacheConfig;
pub use catalog_config::CatalogConfig;
pub use embedding_config::EmbeddingConfig;
pub use generation_config::GenerationConfig;
pub use observability_config::ObservabilityConfig;

use crate::constants::MAX_PROVIDER_RETRIES;
use crate::errors::{PrismError, PrismResult};

/// Environment variables consulted by [`PrismConfig::apply_env_overrides`].
pub mod env_keys {
    pub const API_KEY: &str = "PRISM_API_KEY";
    pub const API_BASE: &str = "PRISM_API_BASE";
    pub const EMBEDDING_API_KEY: &str = "PRISM_EMBEDDING_API_KEY";
    pub const EMBEDDING_API_BASE: &str = "PRISM_EMBEDDING_API_BASE";
}

/// Complete Prism configuration. Every section falls back to defaults.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct PrismConfig {
    pub catalog: CatalogConfig,
    pub embedding: EmbeddingConfig,
    pub generation: GenerationConfig,
    pub cache: CacheConfig,
    pub observability: ObservabilityConfig,
}

impl PrismConfig {
    /// Parse a TOML document. Missing sections and keys take defaults.
    pub fn from_toml(content: &str) -> PrismResult<Self> {
        let config: Self = toml::from_str(content).map_err(|e| PrismError::ConfigError {
            reason: e.to_string(),
        })?;
        config.validate()?;
        Ok(config)
    }

    /// Read and parse a TOML file.
    pub fn from_file(path: impl AsRef<Path>) -> PrismResult<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|e| PrismError::ConfigError {
            reason: format!("{}: {e}", path.display()),
        })?;
        Self::from_toml(&content)
    }

    /// Overlay secrets and endpoints from the process environment.
    pub fn apply_env_overrides(&mut self) {
        self.apply_overrides_from(|key| std::env::var(key).ok());
    }

    /// Overlay values from an arbitrary lookup (the environment in
    /// production, a map in tests).
    ///
    /// `PRISM_API_KEY`/`PRISM_API_BASE` apply to generation and, unless the
    /// embedding-specific variables are set, to embeddings as well.
    pub fn apply_overrides_from<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        let non_empty = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        if let Some(key) = non_empty(env_keys::API_KEY) {
            self.generation.api_key = Some(key.clone());
            if self.embedding.api_key.is_none() {
                self.embedding.api_key = Some(key);
            }
        }
        if let Some(base) = non_empty(env_keys::API_BASE) {
            self.generation.api_base = base.clone();
            self.embedding.api_base = base;
        }
        if let Some(key) = non_empty(env_keys::EMBEDDING_API_KEY) {
            self.embedding.api_key = Some(key);
        }
        if let Some(base) = non_empty(env_keys::EMBEDDING_API_BASE) {
            self.embedding.api_base = base;
        }
    }

    /// Reject values no component can run with.
    pub fn validate(&self) -> PrismResult<()> {
        let fail = |reason: String| -> PrismResult<()> {
            Err(PrismError::ConfigError { reason })
        };

        if !matches!(self.embedding.provider.as_str(), "api" | "local") {
            return fail(format!(
                "embedding.provider must be \"api\" or \"local\", got {:?}",
                self.embedding.provider
            ));
        }
        if self.embedding.dimensions == 0 {
            return fail("embedding.dimensions must be greater than zero".to_string());
        }
        if !matches!(
            self.cache.snapshot_backend.as_str(),
            "sqlite" | "file" | "memory"
        ) {
            return fail(format!(
                "cache.snapshot_backend must be \"sqlite\", \"file\", or \"memory\", got {:?}",
                self.cache.snapshot_backend
            ));
        }
        if self.cache.memo_capacity == 0 {
            return fail("cache.memo_capacity must be greater than zero".to_string());
        }
        for (name, retries) in [
            ("embedding.max_retries", self.embedding.max_retries),
            ("generation.max_retries", self.generation.max_retries),
        ] {
            if retries > MAX_PROVIDER_RETRIES {
                return fail(format!(
                    "{name} must be at most {MAX_PROVIDER_RETRIES}, got {retries}"
                ));
            }
        }
        for (name, value) in [
            ("generation.temperature", self.generation.temperature),
            ("generation.story_temperature", self.generation.story_temperature),
        ] {
            if !(0.0..=2.0).contains(&value) {
                return fail(format!("{name} must be within 0.0..=2.0, got {value}"));
            }
        }
        Ok(())
    }
}
