//! Chat-completions provider for OpenAI-compatible and Azure OpenAI endpoints.

use std::time::Duration;

use prism_core::config::{ApiFlavor, GenerationConfig};
use prism_core::errors::{PrismResult, ProviderError};
use prism_core::traits::IGenerativeProvider;
use prism_http::{endpoint_url, ApiClient};
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Sampling parameters sent with every request.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Sampling {
    pub temperature: f32,
    pub max_tokens: u32,
}

/// Cloud chat provider over the shared [`ApiClient`] transport.
///
/// Must not be called from inside another tokio runtime.
pub struct ApiChatProvider {
    client: ApiClient,
    endpoint: String,
    model: String,
    sampling: Sampling,
}

#[derive(Serialize)]
struct ChatMessage<'a> {
    role: &'static str,
    content: &'a str,
}

#[derive(Serialize)]
struct ChatRequest<'a> {
    #[serde(skip_serializing_if = "Option::is_none")]
    model: Option<&'a str>,
    messages: [ChatMessage<'a>; 2],
    temperature: f32,
    max_tokens: u32,
}

#[derive(Deserialize)]
struct ChatResponse {
    choices: Vec<ChatChoice>,
}

#[derive(Deserialize)]
struct ChatChoice {
    message: ChatReply,
}

#[derive(Deserialize)]
struct ChatReply {
    #[serde(default)]
    content: Option<String>,
}

pub fn chat_completions_url(
    flavor: ApiFlavor,
    api_base: &str,
    model: &str,
    api_version: &str,
) -> String {
    endpoint_url(flavor, api_base, model, api_version, "chat/completions")
}

impl ApiChatProvider {
    pub fn from_config(config: &GenerationConfig, sampling: Sampling) -> PrismResult<Self> {
        let client = ApiClient::new(
            config.model.clone(),
            config.api_type,
            config.api_key.clone(),
            Duration::from_secs(config.timeout_secs),
            config.max_retries,
        )?;

        Ok(Self {
            client,
            endpoint: chat_completions_url(
                config.api_type,
                &config.api_base,
                &config.model,
                &config.api_version,
            ),
            model: config.model.clone(),
            sampling,
        })
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    pub fn sampling(&self) -> Sampling {
        self.sampling
    }

    fn request<'a>(&'a self, system_prompt: &'a str, user_content: &'a str) -> ChatRequest<'a> {
        ChatRequest {
            model: self.client.body_model(&self.model),
            messages: [
                ChatMessage {
                    role: "system",
                    content: system_prompt,
                },
                ChatMessage {
                    role: "user",
                    content: user_content,
                },
            ],
            temperature: self.sampling.temperature,
            max_tokens: self.sampling.max_tokens,
        }
    }
}

impl IGenerativeProvider for ApiChatProvider {
    fn complete(&self, system_prompt: &str, user_content: &str) -> PrismResult<String> {
        let body = self.request(system_prompt, user_content);
        let parsed: ChatResponse = self.client.post_json(&self.endpoint, &body)?;
        debug!(model = %self.model, choices = parsed.choices.len(), "chat response");
        parsed
            .choices
            .into_iter()
            .next()
            .and_then(|c| c.message.content)
            .ok_or_else(|| {
                ProviderError::MalformedResponse {
                    provider: self.model.clone(),
                    reason: "response contained no message content".to_string(),
                }
                .into()
            })
    }

    fn name(&self) -> &str {
        &self.model
    }
}
