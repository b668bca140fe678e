//! Deterministic provider doubles.
//!
//! `ConceptVectorProvider` maps text onto a handful of concept axes
//! (monochrome, painting, thermal, objects) plus a constant bias axis, so
//! cosine similarity behaves like a real semantic model on the effects
//! catalog. `ScriptedGenerator` answers generative calls from a closure or a
//! fixed sequence and records every prompt it receives.

use std::collections::VecDeque;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;
use std::time::Duration;

use prism_core::errors::{PrismResult, ProviderError};
use prism_core::traits::{IGenerativeProvider, IVectorProvider};

const CONCEPTS: &[&[&str]] = &[
    &["black", "white", "gray", "grey", "grayscale", "monochrome"],
    &[
        "paint", "painted", "painting", "watercolor", "artistic", "artwork", "artist", "brush",
    ],
    &["heat", "hot", "temperature", "thermal", "infrared", "warm"],
    &[
        "object",
        "objects",
        "detect",
        "detected",
        "detection",
        "identifies",
        "identify",
        "label",
        "labels",
    ],
];

const BIAS: f32 = 0.2;

/// Concept-axis vector provider that counts its calls.
pub struct ConceptVectorProvider {
    calls: AtomicUsize,
    fail_on: Mutex<Option<String>>,
    delay: Option<Duration>,
    name: String,
}

impl Default for ConceptVectorProvider {
    fn default() -> Self {
        Self::new()
    }
}

impl ConceptVectorProvider {
    pub fn new() -> Self {
        Self {
            calls: AtomicUsize::new(0),
            fail_on: Mutex::new(None),
            delay: None,
            name: "concept-axes".to_string(),
        }
    }

    /// Sleep on every call, widening race windows in concurrency tests.
    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = Some(delay);
        self
    }

    /// Report a different model name (simulates a model upgrade).
    pub fn with_name(mut self, name: &str) -> Self {
        self.name = name.to_string();
        self
    }

    /// Fail every call whose text contains `needle` until cleared.
    pub fn fail_on(&self, needle: &str) {
        *self.fail_on.lock().unwrap() = Some(needle.to_string());
    }

    pub fn clear_failure(&self) {
        *self.fail_on.lock().unwrap() = None;
    }

    /// Number of `embed` calls so far, including failed ones.
    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    pub fn reset_calls(&self) {
        self.calls.store(0, Ordering::SeqCst);
    }

    fn vectorize(text: &str) -> Vec<f32> {
        let mut v = vec![0.0f32; CONCEPTS.len() + 1];
        for token in text
            .split(|c: char| !c.is_alphanumeric())
            .filter(|t| !t.is_empty())
            .map(str::to_lowercase)
        {
            for (axis, words) in CONCEPTS.iter().enumerate() {
                if words.contains(&token.as_str()) {
                    v[axis] += 1.0;
                }
            }
        }
        v[CONCEPTS.len()] = BIAS;
        v
    }
}

impl IVectorProvider for ConceptVectorProvider {
    fn embed(&self, text: &str) -> PrismResult<Vec<f32>> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if let Some(delay) = self.delay {
            std::thread::sleep(delay);
        }
        if let Some(needle) = self.fail_on.lock().unwrap().as_deref() {
            if text.contains(needle) {
                return Err(ProviderError::Unavailable {
                    provider: self.name.clone(),
                    reason: format!("injected failure for {needle:?}"),
                }
                .into());
            }
        }
        Ok(Self::vectorize(text))
    }

    fn dimensions(&self) -> usize {
        CONCEPTS.len() + 1
    }

    fn name(&self) -> &str {
        &self.name
    }
}

/// Concept-axis provider that fails exactly one call, by 1-based index.
///
/// Models a provider dropping out halfway through a regeneration batch.
pub struct FlakyVectorProvider {
    inner: ConceptVectorProvider,
    fail_at: usize,
}

impl FlakyVectorProvider {
    pub fn failing_at(call: usize) -> Self {
        Self {
            inner: ConceptVectorProvider::new(),
            fail_at: call,
        }
    }

    pub fn calls(&self) -> usize {
        self.inner.calls()
    }
}

impl IVectorProvider for FlakyVectorProvider {
    fn embed(&self, text: &str) -> PrismResult<Vec<f32>> {
        let result = self.inner.embed(text);
        if self.inner.calls() == self.fail_at {
            return Err(ProviderError::Http {
                provider: self.inner.name().to_string(),
                reason: format!("dropped call {}", self.fail_at),
            }
            .into());
        }
        result
    }

    fn dimensions(&self) -> usize {
        self.inner.dimensions()
    }

    fn name(&self) -> &str {
        self.inner.name()
    }
}

type Responder = Box<dyn Fn(&str, &str) -> PrismResult<String> + Send + Sync>;

/// A recorded generative call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecordedCall {
    pub system_prompt: String,
    pub user_content: String,
}

/// Generative provider double driven by a closure or a response queue.
pub struct ScriptedGenerator {
    responder: Responder,
    calls: Mutex<Vec<RecordedCall>>,
}

impl ScriptedGenerator {
    /// Answer every call with `responder(system_prompt, user_content)`.
    pub fn new<F>(responder: F) -> Self
    where
        F: Fn(&str, &str) -> PrismResult<String> + Send + Sync + 'static,
    {
        Self {
            responder: Box::new(responder),
            calls: Mutex::new(Vec::new()),
        }
    }

    /// Answer calls with `responses` in order; further calls fail.
    pub fn sequence<I, S>(responses: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let queue: Mutex<VecDeque<String>> =
            Mutex::new(responses.into_iter().map(Into::into).collect());
        Self::new(move |_, _| {
            queue.lock().unwrap().pop_front().ok_or_else(|| {
                ProviderError::Unavailable {
                    provider: "scripted".to_string(),
                    reason: "script exhausted".to_string(),
                }
                .into()
            })
        })
    }

    /// Fail every call with a provider error.
    pub fn failing() -> Self {
        Self::new(|_, _| {
            Err(ProviderError::Http {
                provider: "scripted".to_string(),
                reason: "connection refused".to_string(),
            }
            .into())
        })
    }

    pub fn calls(&self) -> Vec<RecordedCall> {
        self.calls.lock().unwrap().clone()
    }

    pub fn call_count(&self) -> usize {
        self.calls.lock().unwrap().len()
    }
}

impl IGenerativeProvider for ScriptedGenerator {
    fn complete(&self, system_prompt: &str, user_content: &str) -> PrismResult<String> {
        self.calls.lock().unwrap().push(RecordedCall {
            system_prompt: system_prompt.to_string(),
            user_content: user_content.to_string(),
        });
        (self.responder)(system_prompt, user_content)
    }

    fn name(&self) -> &str {
        "scripted"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cosine(a: &[f32], b: &[f32]) -> f32 {
        let dot: f32 = a.iter().zip(b).map(|(x, y)| x * y).sum();
        let na: f32 = a.iter().map(|x| x * x).sum::<f32>().sqrt();
        let nb: f32 = b.iter().map(|x| x * x).sum::<f32>().sqrt();
        dot / (na * nb)
    }

    #[test]
    fn related_texts_align() {
        let p = ConceptVectorProvider::new();
        let q = p.embed("make it black and white").unwrap();
        let d = p.embed("Converts the video to black and white").unwrap();
        let other = p.embed("Shows a thermal visualization").unwrap();
        assert!(cosine(&q, &d) > 0.9);
        assert!(cosine(&q, &other) < 0.2);
        assert_eq!(p.calls(), 3);
    }

    #[test]
    fn injected_failure_is_reported_and_counted() {
        let p = ConceptVectorProvider::new();
        p.fail_on("boom");
        assert!(p.embed("boom here").is_err());
        p.clear_failure();
        assert!(p.embed("boom here").is_ok());
        assert_eq!(p.calls(), 2);
    }

    #[test]
    fn flaky_fails_only_the_chosen_call() {
        let p = FlakyVectorProvider::failing_at(2);
        assert!(p.embed("a").is_ok());
        assert!(p.embed("b").is_err());
        assert!(p.embed("c").is_ok());
    }

    #[test]
    fn sequence_replays_in_order_then_fails() {
        let g = ScriptedGenerator::sequence(["one", "two"]);
        assert_eq!(g.complete("s", "u").unwrap(), "one");
        assert_eq!(g.complete("s", "u").unwrap(), "two");
        assert!(g.complete("s", "u").is_err());
        assert_eq!(g.call_count(), 3);
    }
}
