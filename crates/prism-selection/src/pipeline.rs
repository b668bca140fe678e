//! Three-stage generative selection: select → explain → evaluate.

use std::sync::Arc;

use prism_core::catalog::Catalog;
use prism_core::constants::NORMAL_EFFECT_ID;
use prism_core::errors::{PrismResult, ProviderError};
use prism_core::models::{SelectionResult, Verdict};
use prism_core::traits::IGenerativeProvider;
use tracing::{debug, info};

use crate::prompts;
use crate::verdict::parse_verdict;

/// Runs the selection stages against one generative provider.
///
/// No retries happen here; HTTP providers retry transient failures
/// themselves. Any stage error aborts the run.
pub struct SelectionPipeline {
    generator: Arc<dyn IGenerativeProvider>,
    storyteller: Arc<dyn IGenerativeProvider>,
}

impl SelectionPipeline {
    pub fn new(generator: Arc<dyn IGenerativeProvider>) -> Self {
        Self {
            storyteller: generator.clone(),
            generator,
        }
    }

    /// Use a separately tuned provider for [`tell_story`](Self::tell_story).
    pub fn with_storyteller(mut self, storyteller: Arc<dyn IGenerativeProvider>) -> Self {
        self.storyteller = storyteller;
        self
    }

    /// Ask the model for a catalog id.
    ///
    /// The reply is trimmed and lower-cased; anything that is not a catalog
    /// id becomes `"normal"`. Provider errors propagate.
    pub fn select(&self, request: &str, catalog: &Catalog) -> PrismResult<String> {
        let raw = self.generator.complete(
            prompts::SELECT_SYSTEM_PROMPT,
            &prompts::select_content(request, catalog),
        )?;
        let candidate = raw.trim().to_lowercase();

        match catalog.find_normalized(&candidate) {
            Some(descriptor) => {
                debug!(effect = %descriptor.id, "selection matched catalog");
                Ok(descriptor.id.clone())
            }
            None => {
                info!(
                    event = "selection_fallback",
                    response = %candidate,
                    fallback = NORMAL_EFFECT_ID,
                    "selection not in catalog, using fallback"
                );
                Ok(NORMAL_EFFECT_ID.to_string())
            }
        }
    }

    /// Free-text justification for `effect_id`, trimmed.
    ///
    /// # Errors
    /// `ProviderError::EmptyResponse` when the reply is blank.
    pub fn explain(&self, effect_id: &str, request: &str, catalog: &Catalog) -> PrismResult<String> {
        let raw = self.generator.complete(
            prompts::EXPLAIN_SYSTEM_PROMPT,
            &prompts::explain_content(effect_id, request, catalog),
        )?;
        non_empty(raw, self.generator.name(), "explain")
    }

    /// Judge whether `effect_id` fits the request.
    ///
    /// # Errors
    /// `PrismError::MalformedVerdict` when the reply does not lead with
    /// `YES` or `NO`.
    pub fn evaluate(
        &self,
        effect_id: &str,
        explanation: &str,
        request: &str,
        catalog: &Catalog,
    ) -> PrismResult<Verdict> {
        let raw = self.generator.complete(
            prompts::EVALUATE_SYSTEM_PROMPT,
            &prompts::evaluate_content(effect_id, explanation, request, catalog),
        )?;
        parse_verdict(&raw)
    }

    /// All three stages in order.
    pub fn run(&self, request: &str, catalog: &Catalog) -> PrismResult<SelectionResult> {
        let effect_id = self.select(request, catalog)?;
        let explanation = self.explain(&effect_id, request, catalog)?;
        let verdict = self.evaluate(&effect_id, &explanation, request, catalog)?;

        info!(
            event = "selection_completed",
            effect = %effect_id,
            accepted = verdict.accepted,
            "selection pipeline completed"
        );
        Ok(SelectionResult {
            effect_id,
            explanation,
            verdict,
        })
    }

    /// Short story about detected objects.
    ///
    /// # Errors
    /// `ProviderError::InvalidRequest` for an empty object list, before any
    /// provider call; `ProviderError::EmptyResponse` for a blank reply.
    pub fn tell_story(&self, objects: &[String]) -> PrismResult<String> {
        if objects.iter().all(|o| o.trim().is_empty()) {
            return Err(ProviderError::InvalidRequest {
                reason: "story needs at least one object".to_string(),
            }
            .into());
        }
        let raw = self.storyteller.complete(
            prompts::STORY_SYSTEM_PROMPT,
            &prompts::story_content(objects),
        )?;
        non_empty(raw, self.storyteller.name(), "story")
    }
}

fn non_empty(raw: String, provider: &str, stage: &str) -> PrismResult<String> {
    let text = raw.trim();
    if text.is_empty() {
        return Err(ProviderError::EmptyResponse {
            provider: provider.to_string(),
            stage: stage.to_string(),
        }
        .into());
    }
    Ok(text.to_string())
}
