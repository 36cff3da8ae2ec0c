//! Answer evaluation.
//!
//! MCQ answers are checked locally with no external call. Freeform answers
//! are delegated to the [`AnswerJudge`] capability; a judging failure maps
//! to `JudgeUnavailable` so the session runner can skip scoring the item
//! instead of crashing.

use crate::error::QuizError;
use crate::model::{Question, QuestionKind};
use crate::traits::AnswerJudge;

/// Explanation used when a freeform answer is empty and judging is skipped.
const UNANSWERED: &str = "The question was not answered";

/// Outcome of evaluating one submitted answer.
#[derive(Debug, Clone, PartialEq)]
pub struct Verdict {
    pub correct: bool,
    /// Stored MCQ explanation, or the judge's rationale.
    pub explanation: Option<String>,
}

/// Produce a correct/incorrect verdict for a submitted answer.
///
/// Empty or whitespace-only freeform answers short-circuit to incorrect
/// without calling the judge.
pub async fn evaluate(
    question: &Question,
    answer: &str,
    judge: &dyn AnswerJudge,
) -> Result<Verdict, QuizError> {
    match &question.kind {
        QuestionKind::Mcq { explanation, .. } => {
            // check_local is always Some for MCQ
            let correct = question.check_local(answer).unwrap_or(false);
            Ok(Verdict {
                correct,
                explanation: explanation.clone(),
            })
        }
        QuestionKind::Freeform { reference_answer } => {
            if answer.trim().is_empty() {
                return Ok(Verdict {
                    correct: false,
                    explanation: Some(UNANSWERED.to_string()),
                });
            }
            let judgement = judge
                .judge(&question.text, reference_answer, answer)
                .await
                .map_err(|e| QuizError::JudgeUnavailable(format!("{e:#}")))?;
            Ok(Verdict {
                correct: judgement.correct,
                explanation: judgement.rationale,
            })
        }
    }
}
