use serde::{Deserialize, Serialize};

/// Judgement on whether a selected effect fits the request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Verdict {
    pub accepted: bool,
    pub reasoning: String,
}

/// Output of the full select → explain → evaluate pipeline.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SelectionResult {
    /// A catalog id, or `"normal"` when the selection fell back.
    pub effect_id: String,
    pub explanation: String,
    pub verdict: Verdict,
}

impl SelectionResult {
    pub fn is_fallback(&self) -> bool {
        self.effect_id == crate::constants::NORMAL_EFFECT_ID
    }
}
