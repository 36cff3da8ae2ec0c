//! Flat-file question store.
//!
//! Single authoritative in-memory collection of questions plus the
//! append-only result log, synchronized to a data directory. Every mutating
//! operation persists before returning, so a crash loses at most the
//! in-flight operation. Single-process by design; concurrent writers are
//! last-writer-wins.

use std::fs::{self, OpenOptions};
use std::io::Write;
use std::path::{Path, PathBuf};

use tempfile::NamedTempFile;

use crate::error::{QuizError, Result};
use crate::model::{DraftQuestion, KindTag, Question, ResultRecord};

const QUESTIONS_FILE: &str = "questions.json";
const RESULTS_FILE: &str = "results.log";

/// Predicate for [`Store::list`].
#[derive(Debug, Clone, Copy, Default)]
pub struct QuestionFilter {
    /// Only questions with `active = true`.
    pub active_only: bool,
    /// Only questions of this variant.
    pub kind: Option<KindTag>,
}

impl QuestionFilter {
    /// Everything, active or not.
    pub fn all() -> Self {
        Self::default()
    }

    /// Active questions only.
    pub fn active() -> Self {
        Self {
            active_only: true,
            kind: None,
        }
    }

    fn matches(&self, question: &Question) -> bool {
        if self.active_only && !question.active {
            return false;
        }
        match self.kind {
            Some(tag) => question.kind.tag() == tag,
            None => true,
        }
    }
}

/// In-memory question collection backed by `questions.json` and `results.log`.
#[derive(Debug)]
pub struct Store {
    questions: Vec<Question>,
    questions_path: PathBuf,
    results_path: PathBuf,
}

impl Store {
    /// Load persisted state from `data_dir`, creating the directory if
    /// needed. A missing questions file yields an empty collection, not an
    /// error; an unreadable or corrupt file is a `Persistence` error.
    pub fn open(data_dir: &Path) -> Result<Self> {
        fs::create_dir_all(data_dir)?;
        let questions_path = data_dir.join(QUESTIONS_FILE);
        let results_path = data_dir.join(RESULTS_FILE);

        let questions: Vec<Question> = if questions_path.exists() {
            let content = fs::read_to_string(&questions_path)?;
            serde_json::from_str(&content).map_err(|e| {
                QuizError::Persistence(format!(
                    "corrupt question file {}: {e}",
                    questions_path.display()
                ))
            })?
        } else {
            Vec::new()
        };

        tracing::debug!(
            count = questions.len(),
            path = %questions_path.display(),
            "loaded question bank"
        );

        Ok(Self {
            questions,
            questions_path,
            results_path,
        })
    }

    /// Atomically rewrite the full collection: write to a temp file in the
    /// same directory, then rename over the target. On failure the error is
    /// surfaced and the in-memory state stays authoritative so a retry can
    /// succeed.
    pub fn save(&self) -> Result<()> {
        let json = serde_json::to_string_pretty(&self.questions)?;
        let dir = self
            .questions_path
            .parent()
            .ok_or_else(|| QuizError::Persistence("question path has no parent".into()))?;

        let mut tmp = NamedTempFile::new_in(dir)?;
        tmp.write_all(json.as_bytes())?;
        tmp.persist(&self.questions_path)
            .map_err(|e| QuizError::Persistence(e.to_string()))?;
        Ok(())
    }

    /// Validate a draft, assign the next free id, append, and persist.
    /// Returns the assigned id.
    pub fn add(&mut self, draft: DraftQuestion) -> Result<u64> {
        draft.validate()?;
        let id = self.next_id();
        self.questions.push(Question {
            id,
            topic: draft.topic.trim().to_lowercase(),
            text: draft.text,
            source: draft.source,
            active: true,
            times_shown: 0,
            times_correct: 0,
            kind: draft.kind,
        });
        self.save()?;
        Ok(id)
    }

    /// Toggle a question's eligibility flag and persist.
    pub fn set_active(&mut self, id: u64, active: bool) -> Result<()> {
        let question = self
            .questions
            .iter_mut()
            .find(|q| q.id == id)
            .ok_or(QuizError::NotFound(id))?;
        question.active = active;
        self.save()
    }

    /// Record one exposure: `times_shown` always increments, `times_correct`
    /// only when the verdict was confirmed correct. Persists.
    pub fn record_attempt(&mut self, id: u64, was_correct: bool) -> Result<()> {
        let question = self
            .questions
            .iter_mut()
            .find(|q| q.id == id)
            .ok_or(QuizError::NotFound(id))?;
        question.times_shown += 1;
        if was_correct {
            question.times_correct += 1;
        }
        self.save()
    }

    /// Append one record to the result log. The log is never rewritten.
    pub fn append_result(&self, record: &ResultRecord) -> Result<()> {
        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.results_path)?;
        writeln!(file, "{}", record.to_line())?;
        Ok(())
    }

    /// Parse the result log for the history view. Lines that don't parse are
    /// skipped with a warning so foreign or older formats don't break stats.
    pub fn result_history(&self) -> Result<Vec<ResultRecord>> {
        if !self.results_path.exists() {
            return Ok(Vec::new());
        }
        let content = fs::read_to_string(&self.results_path)?;
        let mut records = Vec::new();
        for line in content.lines() {
            if line.trim().is_empty() {
                continue;
            }
            match ResultRecord::from_line(line) {
                Some(record) => records.push(record),
                None => tracing::warn!(line, "skipping unparseable result line"),
            }
        }
        Ok(records)
    }

    /// Questions matching `filter`, in insertion order.
    pub fn list(&self, filter: &QuestionFilter) -> Vec<&Question> {
        self.questions.iter().filter(|q| filter.matches(q)).collect()
    }

    /// The practice/test selection pool.
    pub fn active_questions(&self) -> Vec<&Question> {
        self.list(&QuestionFilter::active())
    }

    pub fn get(&self, id: u64) -> Option<&Question> {
        self.questions.iter().find(|q| q.id == id)
    }

    pub fn len(&self) -> usize {
        self.questions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.questions.is_empty()
    }

    fn next_id(&self) -> u64 {
        self.questions.iter().map(|q| q.id).max().unwrap_or(0) + 1
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{QuestionKind, QuestionSource};
    use chrono::Utc;
    use tempfile::TempDir;

    fn mcq_draft(text: &str, correct: &str) -> DraftQuestion {
        DraftQuestion {
            topic: "Rust".into(),
            text: text.into(),
            source: QuestionSource::Llm,
            kind: QuestionKind::Mcq {
                options: vec![correct.into(), "wrong".into(), "also wrong".into()],
                correct_answer: correct.into(),
                explanation: Some("because".into()),
            },
        }
    }

    fn freeform_draft(text: &str) -> DraftQuestion {
        DraftQuestion {
            topic: "rust".into(),
            text: text.into(),
            source: QuestionSource::Manual,
            kind: QuestionKind::Freeform {
                reference_answer: "the reference".into(),
            },
        }
    }

    #[test]
    fn open_missing_file_is_empty() {
        let dir = TempDir::new().unwrap();
        let store = Store::open(dir.path()).unwrap();
        assert!(store.is_empty());
    }

    #[test]
    fn add_assigns_sequential_ids_and_lowercases_topic() {
        let dir = TempDir::new().unwrap();
        let mut store = Store::open(dir.path()).unwrap();
        let a = store.add(mcq_draft("q1", "x")).unwrap();
        let b = store.add(freeform_draft("q2")).unwrap();
        assert_eq!(a, 1);
        assert_eq!(b, 2);
        assert_eq!(store.get(a).unwrap().topic, "rust");
    }

    #[test]
    fn add_rejects_invalid_draft_without_persisting() {
        let dir = TempDir::new().unwrap();
        let mut store = Store::open(dir.path()).unwrap();
        let bad = DraftQuestion {
            topic: "rust".into(),
            text: "q".into(),
            source: QuestionSource::Llm,
            kind: QuestionKind::Mcq {
                options: vec!["only one".into()],
                correct_answer: "only one".into(),
                explanation: None,
            },
        };
        assert!(matches!(
            store.add(bad).unwrap_err(),
            QuizError::Validation(_)
        ));
        assert!(store.is_empty());
        assert!(!dir.path().join(QUESTIONS_FILE).exists());
    }

    #[test]
    fn save_reload_roundtrip_five_mixed_questions() {
        let dir = TempDir::new().unwrap();
        let mut store = Store::open(dir.path()).unwrap();
        for i in 0..3 {
            store.add(mcq_draft(&format!("mcq {i}"), "right")).unwrap();
        }
        for i in 0..2 {
            store.add(freeform_draft(&format!("free {i}"))).unwrap();
        }
        store.record_attempt(1, true).unwrap();
        store.record_attempt(1, false).unwrap();
        store.set_active(4, false).unwrap();

        let original: Vec<Question> =
            store.list(&QuestionFilter::all()).into_iter().cloned().collect();
        let reloaded = Store::open(dir.path()).unwrap();
        let loaded: Vec<Question> =
            reloaded.list(&QuestionFilter::all()).into_iter().cloned().collect();
        assert_eq!(loaded, original);
    }

    #[test]
    fn record_attempt_increments_as_specified() {
        let dir = TempDir::new().unwrap();
        let mut store = Store::open(dir.path()).unwrap();
        let id = store.add(freeform_draft("q")).unwrap();

        store.record_attempt(id, false).unwrap();
        let q = store.get(id).unwrap();
        assert_eq!((q.times_shown, q.times_correct), (1, 0));

        store.record_attempt(id, true).unwrap();
        let q = store.get(id).unwrap();
        assert_eq!((q.times_shown, q.times_correct), (2, 1));
        assert!(q.times_correct <= q.times_shown);
    }

    #[test]
    fn record_attempt_unknown_id_is_not_found() {
        let dir = TempDir::new().unwrap();
        let mut store = Store::open(dir.path()).unwrap();
        assert!(matches!(
            store.record_attempt(99, true).unwrap_err(),
            QuizError::NotFound(99)
        ));
    }

    #[test]
    fn set_active_filters_selection_pool() {
        let dir = TempDir::new().unwrap();
        let mut store = Store::open(dir.path()).unwrap();
        let id = store.add(freeform_draft("q")).unwrap();
        assert_eq!(store.active_questions().len(), 1);
        store.set_active(id, false).unwrap();
        assert!(store.active_questions().is_empty());
        // still listed when not filtering
        assert_eq!(store.list(&QuestionFilter::all()).len(), 1);
    }

    #[test]
    fn set_active_unknown_id_is_not_found() {
        let dir = TempDir::new().unwrap();
        let mut store = Store::open(dir.path()).unwrap();
        assert!(matches!(
            store.set_active(5, false).unwrap_err(),
            QuizError::NotFound(5)
        ));
    }

    #[test]
    fn list_filters_by_kind_preserving_insertion_order() {
        let dir = TempDir::new().unwrap();
        let mut store = Store::open(dir.path()).unwrap();
        store.add(mcq_draft("m1", "x")).unwrap();
        store.add(freeform_draft("f1")).unwrap();
        store.add(mcq_draft("m2", "y")).unwrap();

        let filter = QuestionFilter {
            active_only: false,
            kind: Some(KindTag::Mcq),
        };
        let mcqs = store.list(&filter);
        assert_eq!(
            mcqs.iter().map(|q| q.id).collect::<Vec<_>>(),
            vec![1, 3]
        );
    }

    #[test]
    fn result_log_appends_and_parses_back() {
        let dir = TempDir::new().unwrap();
        let store = Store::open(dir.path()).unwrap();
        store
            .append_result(&ResultRecord::new(Utc::now(), 5, 3))
            .unwrap();
        store
            .append_result(&ResultRecord::new(Utc::now(), 4, 4))
            .unwrap();

        let history = store.result_history().unwrap();
        assert_eq!(history.len(), 2);
        assert_eq!(history[0].asked, 5);
        assert_eq!(history[1].correct, 4);
    }

    #[test]
    fn result_history_skips_foreign_lines() {
        let dir = TempDir::new().unwrap();
        let store = Store::open(dir.path()).unwrap();
        store
            .append_result(&ResultRecord::new(Utc::now(), 2, 1))
            .unwrap();
        let mut file = OpenOptions::new()
            .append(true)
            .open(dir.path().join(RESULTS_FILE))
            .unwrap();
        writeln!(file, "some old hand-written line").unwrap();

        let history = store.result_history().unwrap();
        assert_eq!(history.len(), 1);
    }

    #[test]
    fn corrupt_question_file_is_persistence_error() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join(QUESTIONS_FILE), "{not json").unwrap();
        assert!(matches!(
            Store::open(dir.path()).unwrap_err(),
            QuizError::Persistence(_)
        ));
    }

    #[test]
    fn ids_do_not_collide_after_reload() {
        let dir = TempDir::new().unwrap();
        {
            let mut store = Store::open(dir.path()).unwrap();
            store.add(freeform_draft("a")).unwrap();
            store.add(freeform_draft("b")).unwrap();
        }
        let mut store = Store::open(dir.path()).unwrap();
        let id = store.add(freeform_draft("c")).unwrap();
        assert_eq!(id, 3);
    }
}
