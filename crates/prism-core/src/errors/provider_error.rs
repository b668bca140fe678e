/// Errors raised by vector and generative providers.
#[derive(Debug, thiserror::Error)]
pub enum ProviderError {
    #[error("provider unavailable: {provider}: {reason}")]
    Unavailable { provider: String, reason: String },

    #[error("HTTP error from {provider}: {reason}")]
    Http { provider: String, reason: String },

    #[error("{provider} returned status {status}: {body}")]
    Status {
        provider: String,
        status: u16,
        body: String,
    },

    #[error("malformed response from {provider}: {reason}")]
    MalformedResponse { provider: String, reason: String },

    #[error("dimension mismatch from {provider}: expected {expected}, got {actual}")]
    DimensionMismatch {
        provider: String,
        expected: usize,
        actual: usize,
    },

    #[error("empty response from {provider} during {stage}")]
    EmptyResponse { provider: String, stage: String },

    #[error("invalid request: {reason}")]
    InvalidRequest { reason: String },
}

impl ProviderError {
    /// Whether repeating the same call could succeed: connection failures,
    /// rate limiting, and server-side errors.
    pub fn is_transient(&self) -> bool {
        match self {
            Self::Http { .. } => true,
            Self::Status { status, .. } => *status == 429 || *status >= 500,
            _ => false,
        }
    }
}
