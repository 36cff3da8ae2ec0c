//! Provider error types.
//!
//! Failures when talking to the LLM backend. Kept structured so callers can
//! classify without string matching; the core maps any of these to
//! `JudgeUnavailable` when they surface during freeform judging.

use thiserror::Error;

/// Errors that can occur when interacting with an LLM backend.
#[derive(Debug, Error)]
pub enum ProviderError {
    /// The API returned a 429 rate limit response.
    #[error("rate limited, retry after {retry_after_ms}ms")]
    RateLimited { retry_after_ms: u64 },

    /// Authentication failed (invalid or missing API key).
    #[error("authentication failed: {0}")]
    AuthenticationFailed(String),

    /// The requested model was not found.
    #[error("model not found: {0}")]
    ModelNotFound(String),

    /// The API returned an error response.
    #[error("API error (HTTP {status}): {message}")]
    ApiError { status: u16, message: String },

    /// The request timed out.
    #[error("request timed out after {0}s")]
    Timeout(u64),

    /// A network error occurred.
    #[error("network error: {0}")]
    NetworkError(String),

    /// The model returned no content.
    #[error("no content returned by the model")]
    EmptyResponse,

    /// The model's output was not the expected JSON object.
    #[error("malformed model output: {message}")]
    MalformedResponse { message: String, raw: String },
}

impl ProviderError {
    /// Returns the retry-after delay in milliseconds, if applicable.
    pub fn retry_after_ms(&self) -> Option<u64> {
        match self {
            ProviderError::RateLimited { retry_after_ms } => Some(*retry_after_ms),
            _ => None,
        }
    }
}
