//! HTTP embedding provider for OpenAI-compatible and Azure OpenAI endpoints.
//!
//! One request per text. Retries and authentication live in `prism-http`;
//! this module shapes the request and checks the returned vector.

use std::time::Duration;

use prism_core::config::{ApiFlavor, EmbeddingConfig};
use prism_core::errors::{PrismResult, ProviderError};
use prism_core::traits::IVectorProvider;
use prism_http::{endpoint_url, ApiClient};
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Cloud embedding provider over the shared [`ApiClient`] transport.
///
/// Must not be called from inside another tokio runtime.
pub struct ApiVectorProvider {
    client: ApiClient,
    endpoint: String,
    model: String,
    dimensions: usize,
}

#[derive(Serialize)]
struct EmbedRequest<'a> {
    #[serde(skip_serializing_if = "Option::is_none")]
    model: Option<&'a str>,
    input: &'a str,
}

#[derive(Deserialize)]
struct EmbedResponse {
    data: Vec<EmbedData>,
}

#[derive(Deserialize)]
struct EmbedData {
    embedding: Vec<f32>,
}

/// Build the embeddings URL for the configured API flavor.
pub fn embeddings_url(flavor: ApiFlavor, api_base: &str, model: &str, api_version: &str) -> String {
    endpoint_url(flavor, api_base, model, api_version, "embeddings")
}

impl ApiVectorProvider {
    /// Create a provider from configuration.
    ///
    /// # Errors
    /// `ProviderError::Unavailable` when the HTTP client or runtime cannot
    /// be built.
    pub fn from_config(config: &EmbeddingConfig) -> PrismResult<Self> {
        let client = ApiClient::new(
            config.model.clone(),
            config.api_type,
            config.api_key.clone(),
            Duration::from_secs(config.timeout_secs),
            config.max_retries,
        )?;

        Ok(Self {
            client,
            endpoint: embeddings_url(
                config.api_type,
                &config.api_base,
                &config.model,
                &config.api_version,
            ),
            model: config.model.clone(),
            dimensions: config.dimensions,
        })
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    fn request_embedding(&self, text: &str) -> PrismResult<Vec<f32>> {
        let body = EmbedRequest {
            model: self.client.body_model(&self.model),
            input: text,
        };

        let parsed: EmbedResponse = self.client.post_json(&self.endpoint, &body)?;
        debug!(model = %self.model, items = parsed.data.len(), "embedding response");
        let embedding = parsed
            .data
            .into_iter()
            .next()
            .map(|d| d.embedding)
            .ok_or_else(|| ProviderError::MalformedResponse {
                provider: self.model.clone(),
                reason: "response contained no embeddings".to_string(),
            })?;
        self.validate(embedding)
    }

    fn validate(&self, embedding: Vec<f32>) -> PrismResult<Vec<f32>> {
        if embedding.len() != self.dimensions {
            return Err(ProviderError::DimensionMismatch {
                provider: self.model.clone(),
                expected: self.dimensions,
                actual: embedding.len(),
            }
            .into());
        }
        if embedding.iter().any(|v| !v.is_finite()) {
            return Err(ProviderError::MalformedResponse {
                provider: self.model.clone(),
                reason: "embedding contains non-finite values".to_string(),
            }
            .into());
        }
        Ok(embedding)
    }
}

impl IVectorProvider for ApiVectorProvider {
    fn embed(&self, text: &str) -> PrismResult<Vec<f32>> {
        self.request_embedding(text)
    }

    fn dimensions(&self) -> usize {
        self.dimensions
    }

    fn name(&self) -> &str {
        &self.model
    }
}
