//! Blocking JSON transport shared by the embedding and chat providers.
//!
//! One [`ApiClient`] per provider. It owns a current-thread tokio runtime
//! that drives the async reqwest client, authenticates by API flavor, and
//! retries transient failures (connection errors, 429, 5xx) with capped
//! exponential backoff.

use std::time::Duration;

use prism_core::config::ApiFlavor;
use prism_core::errors::{PrismError, PrismResult, ProviderError};
use serde::de::DeserializeOwned;
use serde::Serialize;
use tracing::{debug, warn};

const BASE_BACKOFF_MS: u64 = 100;

/// Longest wait between two attempts.
pub const MAX_BACKOFF: Duration = Duration::from_secs(10);

/// Delay before retry number `attempt` (1-based): 100ms, 200ms, 400ms, ...
/// up to [`MAX_BACKOFF`].
pub fn backoff_delay(attempt: u32) -> Duration {
    let factor = 2u64.saturating_pow(attempt.saturating_sub(1));
    Duration::from_millis(BASE_BACKOFF_MS.saturating_mul(factor)).min(MAX_BACKOFF)
}

/// Whether a failed attempt is worth repeating.
pub fn is_transient(err: &PrismError) -> bool {
    matches!(err, PrismError::ProviderError(e) if e.is_transient())
}

/// URL for `route` (e.g. `embeddings`, `chat/completions`) under the
/// configured API flavor. Azure routes by deployment name.
pub fn endpoint_url(
    flavor: ApiFlavor,
    api_base: &str,
    deployment: &str,
    api_version: &str,
    route: &str,
) -> String {
    let base = api_base.trim_end_matches('/');
    match flavor {
        ApiFlavor::OpenAi => format!("{base}/{route}"),
        ApiFlavor::Azure => {
            format!("{base}/openai/deployments/{deployment}/{route}?api-version={api_version}")
        }
    }
}

/// HTTP client plus the runtime that drives it.
///
/// Must not be called from inside another tokio runtime.
pub struct ApiClient {
    client: reqwest::Client,
    runtime: tokio::runtime::Runtime,
    flavor: ApiFlavor,
    api_key: Option<String>,
    provider: String,
    max_retries: u32,
}

impl ApiClient {
    /// # Errors
    /// `ProviderError::Unavailable` when the HTTP client or runtime cannot
    /// be built.
    pub fn new(
        provider: impl Into<String>,
        flavor: ApiFlavor,
        api_key: Option<String>,
        timeout: Duration,
        max_retries: u32,
    ) -> PrismResult<Self> {
        let provider = provider.into();
        let unavailable = |reason: String| ProviderError::Unavailable {
            provider: provider.clone(),
            reason,
        };

        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| unavailable(format!("HTTP client error: {e}")))?;

        let runtime = tokio::runtime::Builder::new_current_thread()
            .enable_all()
            .build()
            .map_err(|e| unavailable(format!("runtime error: {e}")))?;

        Ok(Self {
            client,
            runtime,
            flavor,
            api_key,
            provider,
            max_retries,
        })
    }

    pub fn flavor(&self) -> ApiFlavor {
        self.flavor
    }

    pub fn provider(&self) -> &str {
        &self.provider
    }

    /// The `model` body field: named for OpenAI, omitted for Azure, which
    /// takes the deployment from the URL.
    pub fn body_model<'a>(&self, model: &'a str) -> Option<&'a str> {
        match self.flavor {
            ApiFlavor::OpenAi => Some(model),
            ApiFlavor::Azure => None,
        }
    }

    /// POST `body` as JSON and decode the reply, retrying transient failures
    /// up to `max_retries` times.
    pub fn post_json<B, R>(&self, url: &str, body: &B) -> PrismResult<R>
    where
        B: Serialize + ?Sized,
        R: DeserializeOwned,
    {
        let mut attempt = 0;
        loop {
            match self.send(url, body) {
                Ok(reply) => return Ok(reply),
                Err(e) if attempt < self.max_retries && is_transient(&e) => {
                    attempt += 1;
                    let delay = backoff_delay(attempt);
                    warn!(
                        provider = %self.provider,
                        attempt,
                        delay_ms = delay.as_millis() as u64,
                        error = %e,
                        "request failed, retrying"
                    );
                    std::thread::sleep(delay);
                }
                Err(e) => return Err(e),
            }
        }
    }

    fn send<B, R>(&self, url: &str, body: &B) -> PrismResult<R>
    where
        B: Serialize + ?Sized,
        R: DeserializeOwned,
    {
        let http_err = |e: reqwest::Error| ProviderError::Http {
            provider: self.provider.clone(),
            reason: e.to_string(),
        };

        self.runtime.block_on(async {
            let mut request = self.client.post(url).json(body);
            if let Some(key) = &self.api_key {
                request = match self.flavor {
                    ApiFlavor::OpenAi => request.bearer_auth(key),
                    ApiFlavor::Azure => request.header("api-key", key),
                };
            }

            let response = request.send().await.map_err(http_err)?;
            let status = response.status();
            if !status.is_success() {
                let body = response.text().await.unwrap_or_default();
                return Err(ProviderError::Status {
                    provider: self.provider.clone(),
                    status: status.as_u16(),
                    body,
                }
                .into());
            }

            debug!(provider = %self.provider, status = status.as_u16(), "response received");
            response.json().await.map_err(|e| {
                ProviderError::MalformedResponse {
                    provider: self.provider.clone(),
                    reason: format!("JSON parse error: {e}"),
                }
                .into()
            })
        })
    }
}
