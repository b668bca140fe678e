use crate::errors::PrismResult;

/// Prompt-to-text provider.
pub trait IGenerativeProvider: Send + Sync {
    /// Complete `user_content` under `system_prompt`, returning the raw text.
    fn complete(&self, system_prompt: &str, user_content: &str) -> PrismResult<String>;

    /// Human-readable provider name.
    fn name(&self) -> &str;
}
