//! Question bank data model.
//!
//! These are the fundamental types the entire quizforge system uses to
//! represent questions, drafts awaiting acceptance, and test results.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::QuizError;

/// How many options an MCQ shows, labeled A through D.
pub const MAX_DISPLAYED_OPTIONS: usize = 4;

/// A single question in the bank.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Question {
    /// Unique identifier, assigned by the store at creation. Immutable.
    pub id: u64,
    /// Subject area, lowercased at creation (e.g. "rust ownership").
    #[serde(default)]
    pub topic: String,
    /// The prompt text shown to the user.
    pub text: String,
    /// Where the question came from.
    #[serde(default)]
    pub source: QuestionSource,
    /// Inactive questions are excluded from practice, test, and default views.
    #[serde(default = "default_true")]
    pub active: bool,
    /// Number of times the question has been presented.
    #[serde(default)]
    pub times_shown: u32,
    /// Number of times it was answered correctly. Never exceeds `times_shown`.
    #[serde(default)]
    pub times_correct: u32,
    /// Variant-specific payload.
    #[serde(flatten)]
    pub kind: QuestionKind,
}

fn default_true() -> bool {
    true
}

/// The question variant and its payload.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum QuestionKind {
    /// Multiple-choice with a fixed option set and one correct option.
    Mcq {
        options: Vec<String>,
        correct_answer: String,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        explanation: Option<String>,
    },
    /// Open-ended, graded against a reference answer by an external judge.
    Freeform { reference_answer: String },
}

impl QuestionKind {
    pub fn tag(&self) -> KindTag {
        match self {
            QuestionKind::Mcq { .. } => KindTag::Mcq,
            QuestionKind::Freeform { .. } => KindTag::Freeform,
        }
    }
}

/// Variant tag, used for filtering and display.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum KindTag {
    Mcq,
    Freeform,
}

impl fmt::Display for KindTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            KindTag::Mcq => write!(f, "mcq"),
            KindTag::Freeform => write!(f, "freeform"),
        }
    }
}

impl FromStr for KindTag {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "mcq" | "multiple-choice" => Ok(KindTag::Mcq),
            "freeform" | "freeform-text" => Ok(KindTag::Freeform),
            other => Err(format!("unknown question type: {other}")),
        }
    }
}

/// Where a question originated.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum QuestionSource {
    #[default]
    Llm,
    Manual,
}

impl fmt::Display for QuestionSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            QuestionSource::Llm => write!(f, "llm"),
            QuestionSource::Manual => write!(f, "manual"),
        }
    }
}

/// Normalize an answer for comparison: trim, lowercase, collapse whitespace.
pub fn normalize_answer(s: &str) -> String {
    s.split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
        .to_lowercase()
}

impl Question {
    /// Render the question for display: the prompt plus, for MCQ, its
    /// labeled options (first four). No side effects.
    pub fn present(&self) -> String {
        let mut out = format!("[{}] Topic: {}\n{}", self.kind.tag(), self.topic, self.text);
        if let QuestionKind::Mcq { options, .. } = &self.kind {
            for (i, option) in options.iter().take(MAX_DISPLAYED_OPTIONS).enumerate() {
                out.push_str(&format!("\n  {}. {}", (b'A' + i as u8) as char, option));
            }
        }
        out
    }

    /// Check a candidate answer locally.
    ///
    /// Returns `Some(verdict)` for MCQ (case/whitespace-normalized exact
    /// match against the correct option) and `None` for freeform, which
    /// requires external judging.
    pub fn check_local(&self, answer: &str) -> Option<bool> {
        match &self.kind {
            QuestionKind::Mcq { correct_answer, .. } => {
                Some(normalize_answer(answer) == normalize_answer(correct_answer))
            }
            QuestionKind::Freeform { .. } => None,
        }
    }

    /// `times_shown - times_correct`, saturating. Drives practice weighting.
    pub fn miss_count(&self) -> u32 {
        self.times_shown.saturating_sub(self.times_correct)
    }

    /// Fraction of attempts answered correctly, or `None` if never shown.
    pub fn accuracy(&self) -> Option<f64> {
        if self.times_shown == 0 {
            None
        } else {
            Some(f64::from(self.times_correct) / f64::from(self.times_shown))
        }
    }
}

/// An unvalidated question record, as produced by generation or manual entry.
///
/// The store validates a draft and assigns its id in [`crate::store::Store::add`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DraftQuestion {
    #[serde(default)]
    pub topic: String,
    pub text: String,
    #[serde(default)]
    pub source: QuestionSource,
    #[serde(flatten)]
    pub kind: QuestionKind,
}

impl DraftQuestion {
    /// Enforce the creation-time invariants.
    ///
    /// MCQ: at least two options, and exactly one option matching the
    /// designated correct answer under normalization.
    pub fn validate(&self) -> Result<(), QuizError> {
        if self.text.trim().is_empty() {
            return Err(QuizError::Validation("question text is empty".into()));
        }
        match &self.kind {
            QuestionKind::Mcq {
                options,
                correct_answer,
                ..
            } => {
                if options.len() < 2 {
                    return Err(QuizError::Validation(format!(
                        "mcq needs at least 2 options, got {}",
                        options.len()
                    )));
                }
                let normalized = normalize_answer(correct_answer);
                if normalized.is_empty() {
                    return Err(QuizError::Validation(
                        "mcq has no designated correct answer".into(),
                    ));
                }
                let matching = options
                    .iter()
                    .filter(|o| normalize_answer(o) == normalized)
                    .count();
                match matching {
                    0 => Err(QuizError::Validation(
                        "correct answer does not appear among the options".into(),
                    )),
                    1 => Ok(()),
                    n => Err(QuizError::Validation(format!(
                        "correct answer matches {n} options, expected exactly one"
                    ))),
                }
            }
            QuestionKind::Freeform { reference_answer } => {
                if reference_answer.trim().is_empty() {
                    return Err(QuizError::Validation(
                        "freeform question has no reference answer".into(),
                    ));
                }
                Ok(())
            }
        }
    }
}

/// One completed test session, appended to the result log.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResultRecord {
    /// When the test finished (UTC).
    pub timestamp: DateTime<Utc>,
    /// Number of questions asked.
    pub asked: u32,
    /// Number answered correctly.
    pub correct: u32,
}

impl ResultRecord {
    pub fn new(timestamp: DateTime<Utc>, asked: u32, correct: u32) -> Self {
        Self {
            timestamp,
            asked,
            correct,
        }
    }

    /// Score as a percentage; 0.0 for an empty test.
    pub fn score_percent(&self) -> f64 {
        if self.asked == 0 {
            0.0
        } else {
            f64::from(self.correct) / f64::from(self.asked) * 100.0
        }
    }

    /// Render as one log line: `<rfc3339>\t<asked>\t<correct>\t<pct>%`.
    pub fn to_line(&self) -> String {
        format!(
            "{}\t{}\t{}\t{:.1}%",
            self.timestamp.to_rfc3339(),
            self.asked,
            self.correct,
            self.score_percent()
        )
    }

    /// Parse a log line written by [`ResultRecord::to_line`].
    pub fn from_line(line: &str) -> Option<Self> {
        let mut parts = line.trim_end().split('\t');
        let timestamp = DateTime::parse_from_rfc3339(parts.next()?)
            .ok()?
            .with_timezone(&Utc);
        let asked = parts.next()?.parse().ok()?;
        let correct = parts.next()?.parse().ok()?;
        Some(Self {
            timestamp,
            asked,
            correct,
        })
    }
}
