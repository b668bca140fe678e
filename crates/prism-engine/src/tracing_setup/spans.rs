//! Span definitions for the engine's two request paths.

/// Span around a generative selection run.
#[macro_export]
macro_rules! selection_span {
    ($request:expr) => {
        tracing::info_span!("prism.selection", request_chars = $request.len())
    };
}

/// Span around a similarity lookup.
#[macro_export]
macro_rules! embedding_span {
    ($provider:expr, $dimension:expr) => {
        tracing::info_span!("prism.embedding", provider = %$provider, dimension = $dimension)
    };
}

pub mod names {
    pub const SELECTION: &str = "prism.selection";
    pub const EMBEDDING: &str = "prism.embedding";
}
