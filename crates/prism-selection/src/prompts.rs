//! System prompts and user-content builders for each generative stage.
//!
//! Every pipeline stage ends its user content with the full catalog context
//! so the model only ever reasons about effects that exist.

use prism_core::catalog::Catalog;
use prism_core::constants::NORMAL_EFFECT_ID;

pub const SELECT_SYSTEM_PROMPT: &str = "\
You choose a visual effect for a video based on a user's request.
You are given the request and a list of available effects, one per line, as `- id: description`.
Reply with the id of the single best matching effect and nothing else.
If no effect fits the request, reply with `normal`.";

pub const EXPLAIN_SYSTEM_PROMPT: &str = "\
You explain why a visual effect was chosen for a user's request.
You are given the chosen effect id, the request, and the list of available effects.
In two or three sentences, describe what the effect does and how it satisfies the request.";

pub const EVALUATE_SYSTEM_PROMPT: &str = "\
You review whether a chosen visual effect satisfies a user's request.
You are given the chosen effect id, an explanation of the choice, the request, and the list of available effects.
Begin your reply with YES if the effect fits the request or NO if it does not, then a colon and one sentence of reasoning.";

pub const STORY_SYSTEM_PROMPT: &str = "\
You are a storyteller.
You are given a list of objects detected in a video.
Write a short story about the objects, 100 words or less and five sentences at most.
Keep it safe for work and feel free to be funny. A short poem is fine too.
Make up names if needed.";

pub fn select_content(request: &str, catalog: &Catalog) -> String {
    format!(
        "Request: {request}\n\nAvailable effects (reply `{NORMAL_EFFECT_ID}` if none fit):\n{}",
        catalog.context()
    )
}

pub fn explain_content(effect_id: &str, request: &str, catalog: &Catalog) -> String {
    format!(
        "Chosen effect: {effect_id}\nRequest: {request}\n\nAvailable effects:\n{}",
        catalog.context()
    )
}

pub fn evaluate_content(
    effect_id: &str,
    explanation: &str,
    request: &str,
    catalog: &Catalog,
) -> String {
    format!(
        "Chosen effect: {effect_id}\nExplanation: {explanation}\nRequest: {request}\n\nAvailable effects:\n{}",
        catalog.context()
    )
}

pub fn story_content(objects: &[String]) -> String {
    format!("Objects: {}", objects.join(", "))
}
