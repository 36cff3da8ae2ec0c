//! Mock generator and judge for testing.

use std::sync::atomic::{AtomicU32, Ordering};
use std::sync::Mutex;

use async_trait::async_trait;

use quizforge_core::model::{DraftQuestion, QuestionKind, QuestionSource};
use quizforge_core::traits::{AnswerJudge, GenerateRequest, Judgement, QuestionGenerator};

/// A scripted judge for exercising sessions without real API calls.
pub struct MockJudge {
    verdict: bool,
    rationale: Option<String>,
    fail: bool,
    call_count: AtomicU32,
    last_answer: Mutex<Option<String>>,
}

impl MockJudge {
    /// A judge that always returns the given verdict.
    pub fn with_verdict(correct: bool) -> Self {
        Self {
            verdict: correct,
            rationale: None,
            fail: false,
            call_count: AtomicU32::new(0),
            last_answer: Mutex::new(None),
        }
    }

    /// A judge whose every call fails, simulating an unreachable backend.
    pub fn failing() -> Self {
        Self {
            verdict: false,
            rationale: None,
            fail: true,
            call_count: AtomicU32::new(0),
            last_answer: Mutex::new(None),
        }
    }

    pub fn with_rationale(mut self, rationale: &str) -> Self {
        self.rationale = Some(rationale.to_string());
        self
    }

    /// Number of judge calls made.
    pub fn call_count(&self) -> u32 {
        self.call_count.load(Ordering::Relaxed)
    }

    /// The most recently submitted answer, if any.
    pub fn last_answer(&self) -> Option<String> {
        self.last_answer.lock().unwrap().clone()
    }
}

#[async_trait]
impl AnswerJudge for MockJudge {
    fn name(&self) -> &str {
        "mock"
    }

    async fn judge(
        &self,
        _question: &str,
        _reference_answer: &str,
        submitted_answer: &str,
    ) -> anyhow::Result<Judgement> {
        self.call_count.fetch_add(1, Ordering::Relaxed);
        *self.last_answer.lock().unwrap() = Some(submitted_answer.to_string());

        if self.fail {
            anyhow::bail!("mock judge unavailable");
        }
        Ok(Judgement {
            correct: self.verdict,
            rationale: self.rationale.clone(),
        })
    }
}

/// A generator that returns a fixed set of drafts.
pub struct MockGenerator {
    drafts: Vec<DraftQuestion>,
    fail: bool,
    call_count: AtomicU32,
    last_request: Mutex<Option<GenerateRequest>>,
}

impl MockGenerator {
    pub fn with_drafts(drafts: Vec<DraftQuestion>) -> Self {
        Self {
            drafts,
            fail: false,
            call_count: AtomicU32::new(0),
            last_request: Mutex::new(None),
        }
    }

    /// A generator sized by the request, emitting placeholder questions.
    pub fn echoing() -> Self {
        Self {
            drafts: Vec::new(),
            fail: false,
            call_count: AtomicU32::new(0),
            last_request: Mutex::new(None),
        }
    }

    pub fn failing() -> Self {
        Self {
            drafts: Vec::new(),
            fail: true,
            call_count: AtomicU32::new(0),
            last_request: Mutex::new(None),
        }
    }

    pub fn call_count(&self) -> u32 {
        self.call_count.load(Ordering::Relaxed)
    }

    pub fn last_request(&self) -> Option<GenerateRequest> {
        self.last_request.lock().unwrap().clone()
    }

    fn placeholder_batch(request: &GenerateRequest) -> Vec<DraftQuestion> {
        let mut drafts = Vec::new();
        for i in 0..request.num_mcq {
            drafts.push(DraftQuestion {
                topic: request.topic.clone(),
                text: format!("Placeholder choice question {}?", i + 1),
                source: QuestionSource::Llm,
                kind: QuestionKind::Mcq {
                    options: vec![
                        "alpha".into(),
                        "beta".into(),
                        "gamma".into(),
                        "delta".into(),
                    ],
                    correct_answer: "alpha".into(),
                    explanation: None,
                },
            });
        }
        for i in 0..request.num_freeform {
            drafts.push(DraftQuestion {
                topic: request.topic.clone(),
                text: format!("Placeholder open question {}?", i + 1),
                source: QuestionSource::Llm,
                kind: QuestionKind::Freeform {
                    reference_answer: "a placeholder reference answer".into(),
                },
            });
        }
        drafts
    }
}

#[async_trait]
impl QuestionGenerator for MockGenerator {
    fn name(&self) -> &str {
        "mock"
    }

    async fn generate(&self, request: &GenerateRequest) -> anyhow::Result<Vec<DraftQuestion>> {
        self.call_count.fetch_add(1, Ordering::Relaxed);
        *self.last_request.lock().unwrap() = Some(request.clone());

        if self.fail {
            anyhow::bail!("mock generator unavailable");
        }
        if self.drafts.is_empty() {
            Ok(Self::placeholder_batch(request))
        } else {
            Ok(self.drafts.clone())
        }
    }
}
