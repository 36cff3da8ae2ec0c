//! Bank statistics for the stats view.

use serde::{Deserialize, Serialize};

use crate::model::{KindTag, Question, QuestionSource};

/// One row of the per-question statistics table.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QuestionRow {
    pub id: u64,
    pub active: bool,
    pub source: QuestionSource,
    pub topic: String,
    pub kind: KindTag,
    pub times_shown: u32,
    /// Percentage of correct answers; `None` when never shown.
    pub accuracy_percent: Option<f64>,
    pub text: String,
}

/// Build table rows in insertion order.
pub fn question_rows(questions: &[&Question]) -> Vec<QuestionRow> {
    questions
        .iter()
        .map(|q| QuestionRow {
            id: q.id,
            active: q.active,
            source: q.source,
            topic: q.topic.clone(),
            kind: q.kind.tag(),
            times_shown: q.times_shown,
            accuracy_percent: q.accuracy().map(|a| a * 100.0),
            text: q.text.clone(),
        })
        .collect()
}

/// Aggregate statistics across the whole bank.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BankSummary {
    pub total: usize,
    pub active: usize,
    pub total_attempts: u64,
    /// Overall correct fraction across all attempts; `None` with no attempts.
    pub overall_accuracy: Option<f64>,
}

/// Compute aggregate statistics across all questions.
pub fn bank_summary(questions: &[&Question]) -> BankSummary {
    let total_attempts: u64 = questions.iter().map(|q| u64::from(q.times_shown)).sum();
    let total_correct: u64 = questions.iter().map(|q| u64::from(q.times_correct)).sum();
    BankSummary {
        total: questions.len(),
        active: questions.iter().filter(|q| q.active).count(),
        total_attempts,
        overall_accuracy: if total_attempts == 0 {
            None
        } else {
            Some(total_correct as f64 / total_attempts as f64)
        },
    }
}
