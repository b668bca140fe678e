//! Selection pipeline stage ordering, normalization, and error propagation.

use std::sync::Arc;

use prism_core::errors::ProviderError;
use prism_core::PrismError;
use prism_selection::prompts;
use prism_selection::SelectionPipeline;
use proptest::prelude::*;
use test_fixtures::{effects_catalog, ScriptedGenerator};

fn pipeline(generator: &Arc<ScriptedGenerator>) -> SelectionPipeline {
    SelectionPipeline::new(generator.clone())
}

#[test]
fn run_returns_all_three_stages() {
    let generator = Arc::new(ScriptedGenerator::sequence([
        "object_detection",
        "  Object detection labels every object in the scene.  ",
        "YES: the request asks to find objects.",
    ]));
    let result = pipeline(&generator)
        .run("detect objects in the scene", &effects_catalog())
        .unwrap();

    assert_eq!(result.effect_id, "object_detection");
    assert_eq!(
        result.explanation,
        "Object detection labels every object in the scene."
    );
    assert!(result.verdict.accepted);
    assert_eq!(result.verdict.reasoning, "the request asks to find objects.");
    assert!(!result.is_fallback());
}

#[test]
fn stages_run_in_order_with_catalog_context() {
    let generator = Arc::new(ScriptedGenerator::sequence(["grayscale", "Because.", "NO: nope"]));
    let catalog = effects_catalog();
    pipeline(&generator).run("make it pop", &catalog).unwrap();

    let calls = generator.calls();
    assert_eq!(calls.len(), 3);
    assert_eq!(calls[0].system_prompt, prompts::SELECT_SYSTEM_PROMPT);
    assert_eq!(calls[1].system_prompt, prompts::EXPLAIN_SYSTEM_PROMPT);
    assert_eq!(calls[2].system_prompt, prompts::EVALUATE_SYSTEM_PROMPT);
    for call in &calls {
        assert!(call.user_content.ends_with(&catalog.context()));
        assert!(call.user_content.contains("make it pop"));
    }
    assert!(calls[1].user_content.contains("Chosen effect: grayscale"));
    assert!(calls[2].user_content.contains("Explanation: Because."));
}

#[test]
fn selection_is_normalized() {
    let generator = Arc::new(ScriptedGenerator::sequence(["  Heat_Map\n"]));
    let id = pipeline(&generator)
        .select("show me how hot it is", &effects_catalog())
        .unwrap();
    assert_eq!(id, "heat_map");
}

#[test]
fn unknown_selection_falls_back_to_normal() {
    let generator = Arc::new(ScriptedGenerator::sequence([
        "sepia",
        "Nothing matched.",
        "NO: no sepia effect exists.",
    ]));
    let result = pipeline(&generator)
        .run("make it sepia", &effects_catalog())
        .unwrap();
    assert_eq!(result.effect_id, "normal");
    assert!(result.is_fallback());
    assert!(!result.verdict.accepted);
    assert!(generator.calls()[1].user_content.contains("Chosen effect: normal"));
}

#[test]
fn select_provider_error_propagates() {
    let generator = Arc::new(ScriptedGenerator::failing());
    let err = pipeline(&generator)
        .run("make it black and white", &effects_catalog())
        .unwrap_err();
    assert!(matches!(err, PrismError::ProviderError(ProviderError::Http { .. })));
    assert_eq!(generator.call_count(), 1);
}

#[test]
fn blank_explanation_is_an_error() {
    let generator = Arc::new(ScriptedGenerator::sequence(["grayscale", "   \n"]));
    let err = pipeline(&generator)
        .run("black and white", &effects_catalog())
        .unwrap_err();
    assert!(matches!(
        err,
        PrismError::ProviderError(ProviderError::EmptyResponse { .. })
    ));
    assert_eq!(generator.call_count(), 2);
}

#[test]
fn malformed_verdict_aborts_run() {
    let generator = Arc::new(ScriptedGenerator::sequence([
        "grayscale",
        "It removes color.",
        "Probably fine.",
    ]));
    let err = pipeline(&generator)
        .run("black and white", &effects_catalog())
        .unwrap_err();
    assert!(matches!(err, PrismError::MalformedVerdict { .. }));
}

#[test]
fn empty_story_request_makes_no_call() {
    let generator = Arc::new(ScriptedGenerator::sequence(["unused"]));
    let err = pipeline(&generator).tell_story(&[]).unwrap_err();
    assert!(matches!(
        err,
        PrismError::ProviderError(ProviderError::InvalidRequest { .. })
    ));
    assert_eq!(generator.call_count(), 0);
}

#[test]
fn story_uses_storyteller() {
    let generator = Arc::new(ScriptedGenerator::sequence(Vec::<String>::new()));
    let storyteller = Arc::new(ScriptedGenerator::sequence(["Once upon a time, a cat.\n"]));
    let story = SelectionPipeline::new(generator.clone())
        .with_storyteller(storyteller.clone())
        .tell_story(&["cat".to_string(), "chair".to_string()])
        .unwrap();

    assert_eq!(story, "Once upon a time, a cat.");
    assert_eq!(generator.call_count(), 0);
    assert_eq!(storyteller.calls()[0].user_content, "Objects: cat, chair");
    assert_eq!(storyteller.calls()[0].system_prompt, prompts::STORY_SYSTEM_PROMPT);
}

proptest! {
    #[test]
    fn non_catalog_replies_always_fall_back(reply in "[a-z ]{0,20}") {
        let catalog = effects_catalog();
        prop_assume!(catalog.find_normalized(&reply).is_none());
        let generator = Arc::new(ScriptedGenerator::sequence([reply]));
        let id = pipeline(&generator).select("anything", &catalog).unwrap();
        prop_assert_eq!(id, "normal");
    }
}
