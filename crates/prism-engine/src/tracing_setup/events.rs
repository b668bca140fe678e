//! Structured log events emitted by the engine.

pub fn nearest_found(effect_id: &str, score: f64) {
    tracing::info!(
        event = "nearest_found",
        effect = %effect_id,
        score = score,
        "nearest effect found"
    );
}

pub fn catalog_reloaded(previous: &str, current: &str, effects: usize) {
    tracing::info!(
        event = "catalog_reloaded",
        previous = %previous,
        current = %current,
        effects = effects,
        "catalog reloaded"
    );
}

pub fn story_generated(objects: usize, chars: usize) {
    tracing::info!(
        event = "story_generated",
        objects = objects,
        chars = chars,
        "story generated"
    );
}
