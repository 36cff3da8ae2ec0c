//! Practice and test session runners.
//!
//! Thin orchestration over selector + evaluator + store. User interaction is
//! abstracted behind [`AnswerSource`] and [`SessionReporter`] so the CLI and
//! tests share the same loop.

use chrono::Utc;
use rand::Rng;

use crate::error::{QuizError, Result};
use crate::evaluator::evaluate;
use crate::model::{Question, ResultRecord};
use crate::selector;
use crate::store::Store;
use crate::traits::AnswerJudge;

/// A user's reply to a presented question.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Reply {
    Answer(String),
    /// The user asked to leave the session.
    Exit,
}

/// Supplies the user's reply to a presented question.
pub trait AnswerSource {
    fn read_answer(&mut self, question: &Question) -> Reply;
}

/// Result of one answered item, as reported to the user.
#[derive(Debug, Clone, PartialEq)]
pub enum AttemptOutcome {
    Scored {
        correct: bool,
        explanation: Option<String>,
    },
    /// Judging was unavailable; exposure was recorded but no verdict.
    Skipped { reason: String },
}

/// Presentation callbacks for a running session.
pub trait SessionReporter {
    /// A question is about to be answered. `progress` is `(number, total)`
    /// for tests, `None` for open-ended practice.
    fn on_question(&self, question: &Question, progress: Option<(usize, usize)>);
    fn on_outcome(&self, outcome: &AttemptOutcome);
    fn on_test_complete(&self, record: &ResultRecord);
}

/// No-op reporter.
pub struct NoopReporter;

impl SessionReporter for NoopReporter {
    fn on_question(&self, _: &Question, _: Option<(usize, usize)>) {}
    fn on_outcome(&self, _: &AttemptOutcome) {}
    fn on_test_complete(&self, _: &ResultRecord) {}
}

/// Evaluate one answer and update the question's counters.
///
/// Exposure always increments; correctness only on a confirmed verdict, so
/// a judging failure records `times_shown` without `times_correct` and the
/// session continues.
async fn score_attempt(
    store: &mut Store,
    question: &Question,
    answer: &str,
    judge: &dyn AnswerJudge,
) -> Result<AttemptOutcome> {
    let outcome = match evaluate(question, answer, judge).await {
        Ok(verdict) => AttemptOutcome::Scored {
            correct: verdict.correct,
            explanation: verdict.explanation,
        },
        Err(QuizError::JudgeUnavailable(reason)) => {
            tracing::warn!(id = question.id, %reason, "judging unavailable, skipping verdict");
            AttemptOutcome::Skipped { reason }
        }
        Err(e) => return Err(e),
    };
    let correct = matches!(outcome, AttemptOutcome::Scored { correct: true, .. });
    store.record_attempt(question.id, correct)?;
    Ok(outcome)
}

/// Run a practice session: weighted draws until the user exits (or `limit`
/// items, when given).
///
/// Weights are recomputed from current counts before every draw, so a miss
/// immediately raises a question's odds for the next draw. Fails with
/// `EmptyPool` before presenting anything when no active questions exist.
pub async fn run_practice<R: Rng>(
    store: &mut Store,
    judge: &dyn AnswerJudge,
    source: &mut dyn AnswerSource,
    reporter: &dyn SessionReporter,
    rng: &mut R,
    limit: Option<usize>,
) -> Result<()> {
    let mut answered = 0usize;
    loop {
        if limit.is_some_and(|n| answered >= n) {
            return Ok(());
        }
        let id = {
            let pool = store.active_questions();
            selector::weighted_choice(&pool, rng)?
        };
        let question = store.get(id).ok_or(QuizError::NotFound(id))?.clone();

        reporter.on_question(&question, None);
        let answer = match source.read_answer(&question) {
            Reply::Exit => return Ok(()),
            Reply::Answer(a) => a,
        };

        let outcome = score_attempt(store, &question, &answer, judge).await?;
        reporter.on_outcome(&outcome);
        answered += 1;
    }
}

/// Run a fixed-length test: `count` unique questions, uniform draw,
/// randomized order.
///
/// Selection happens up front, so `InsufficientPool` surfaces before any
/// question is presented. An early exit abandons the session without a
/// result record; a completed test appends one and returns it.
pub async fn run_test<R: Rng>(
    store: &mut Store,
    judge: &dyn AnswerJudge,
    source: &mut dyn AnswerSource,
    reporter: &dyn SessionReporter,
    rng: &mut R,
    count: usize,
) -> Result<Option<ResultRecord>> {
    let ids = {
        let pool = store.active_questions();
        selector::sample_unique(&pool, count, rng)?
    };
    let total = ids.len();
    let mut correct_total = 0u32;

    for (i, id) in ids.iter().enumerate() {
        let question = store.get(*id).ok_or(QuizError::NotFound(*id))?.clone();

        reporter.on_question(&question, Some((i + 1, total)));
        let answer = match source.read_answer(&question) {
            Reply::Exit => return Ok(None),
            Reply::Answer(a) => a,
        };

        let outcome = score_attempt(store, &question, &answer, judge).await?;
        if matches!(outcome, AttemptOutcome::Scored { correct: true, .. }) {
            correct_total += 1;
        }
        reporter.on_outcome(&outcome);
    }

    let record = ResultRecord::new(Utc::now(), total as u32, correct_total);
    store.append_result(&record)?;
    reporter.on_test_complete(&record);
    Ok(Some(record))
}
