//! Capability traits for the external LLM collaborators.
//!
//! These async traits are implemented by the `quizforge-providers` crate.
//! The core only defines the contracts: generation returns unvalidated
//! drafts, judging returns a verdict with optional rationale.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::model::DraftQuestion;

/// Request to generate a batch of draft questions.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GenerateRequest {
    /// Subject area, non-empty.
    pub topic: String,
    /// Number of multiple-choice questions to produce.
    pub num_mcq: u32,
    /// Number of freeform questions to produce.
    pub num_freeform: u32,
}

/// Trait for backends that generate draft questions for a topic.
///
/// Drafts are unvalidated; the store enforces the MCQ invariants before
/// accepting them.
#[async_trait]
pub trait QuestionGenerator: Send + Sync {
    /// Human-readable backend name (e.g. "openai").
    fn name(&self) -> &str;

    /// Generate draft questions for a topic.
    async fn generate(&self, request: &GenerateRequest) -> anyhow::Result<Vec<DraftQuestion>>;
}

/// Verdict from the external judging capability.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Judgement {
    /// Whether the submitted answer was judged correct.
    pub correct: bool,
    /// Optional human-readable rationale.
    #[serde(default)]
    pub rationale: Option<String>,
}

/// Trait for backends that grade a freeform answer against a reference.
#[async_trait]
pub trait AnswerJudge: Send + Sync {
    /// Human-readable backend name (e.g. "openai").
    fn name(&self) -> &str;

    /// Judge a submitted answer against the question and reference answer.
    async fn judge(
        &self,
        question: &str,
        reference_answer: &str,
        submitted_answer: &str,
    ) -> anyhow::Result<Judgement>;
}

/// Judge used when no credential is configured.
///
/// Always fails, so freeform items surface as `JudgeUnavailable` and are
/// skipped for scoring while the session continues.
pub struct UnconfiguredJudge;

#[async_trait]
impl AnswerJudge for UnconfiguredJudge {
    fn name(&self) -> &str {
        "unconfigured"
    }

    async fn judge(&self, _: &str, _: &str, _: &str) -> anyhow::Result<Judgement> {
        anyhow::bail!("no API credential configured")
    }
}
