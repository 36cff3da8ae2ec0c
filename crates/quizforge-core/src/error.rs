//! Core error taxonomy.
//!
//! Every failure mode the store, selector, evaluator, and session runners
//! can surface. Callers match on variants to decide whether to continue the
//! session or abort the current operation.

use thiserror::Error;

/// Errors produced by the quizforge core.
#[derive(Debug, Error)]
pub enum QuizError {
    /// An operation referenced a question id absent from the store.
    #[error("question {0} not found")]
    NotFound(u64),

    /// A question record failed validation and was rejected before persisting.
    #[error("invalid question: {0}")]
    Validation(String),

    /// A selection was requested but no active questions exist.
    #[error("no active questions available")]
    EmptyPool,

    /// A test requested more distinct questions than the active pool holds.
    #[error("requested {requested} questions but only {available} are active")]
    InsufficientPool { requested: usize, available: usize },

    /// External judging failed or no credential is configured.
    #[error("answer judging unavailable: {0}")]
    JudgeUnavailable(String),

    /// Reading or writing persisted state failed.
    #[error("failed to persist state: {0}")]
    Persistence(String),
}

impl QuizError {
    /// Returns `true` if the session or menu can continue after this error.
    ///
    /// Persistence failures abort the current operation; everything else is
    /// reported inline.
    pub fn is_recoverable(&self) -> bool {
        !matches!(self, QuizError::Persistence(_))
    }
}

impl From<std::io::Error> for QuizError {
    fn from(e: std::io::Error) -> Self {
        QuizError::Persistence(e.to_string())
    }
}

impl From<serde_json::Error> for QuizError {
    fn from(e: serde_json::Error) -> Self {
        QuizError::Persistence(e.to_string())
    }
}

pub type Result<T> = std::result::Result<T, QuizError>;
