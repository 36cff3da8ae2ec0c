//! End-to-end session flows with mock providers.

use rand::rngs::StdRng;
use rand::SeedableRng;
use tempfile::TempDir;

use quizforge_core::model::{DraftQuestion, Question, QuestionKind, QuestionSource};
use quizforge_core::session::{run_practice, run_test, AnswerSource, NoopReporter, Reply};
use quizforge_core::store::Store;
use quizforge_core::traits::{GenerateRequest, QuestionGenerator};
use quizforge_providers::mock::{MockGenerator, MockJudge};

struct ScriptedSource {
    replies: Vec<Reply>,
}

impl ScriptedSource {
    fn answers(answers: &[&str]) -> Self {
        Self {
            replies: answers
                .iter()
                .rev()
                .map(|a| Reply::Answer(a.to_string()))
                .collect(),
        }
    }
}

impl AnswerSource for ScriptedSource {
    fn read_answer(&mut self, _: &Question) -> Reply {
        self.replies.pop().unwrap_or(Reply::Exit)
    }
}

fn freeform(topic: &str, text: &str) -> DraftQuestion {
    DraftQuestion {
        topic: topic.into(),
        text: text.into(),
        source: QuestionSource::Llm,
        kind: QuestionKind::Freeform {
            reference_answer: "a reference answer".into(),
        },
    }
}

#[tokio::test]
async fn generated_bank_supports_a_full_test_session() {
    let dir = TempDir::new().unwrap();
    let mut store = Store::open(dir.path()).unwrap();

    // Generate a batch and accept everything into the bank.
    let generator = MockGenerator::echoing();
    let drafts = generator
        .generate(&GenerateRequest {
            topic: "networking".into(),
            num_mcq: 2,
            num_freeform: 1,
        })
        .await
        .unwrap();
    for draft in drafts {
        store.add(draft).unwrap();
    }
    assert_eq!(store.len(), 3);

    let judge = MockJudge::with_verdict(true);
    let mut source = ScriptedSource::answers(&["alpha", "alpha", "anything goes"]);
    let mut rng = StdRng::seed_from_u64(7);

    let record = run_test(&mut store, &judge, &mut source, &NoopReporter, &mut rng, 3)
        .await
        .unwrap()
        .expect("completed test yields a record");

    assert_eq!(record.asked, 3);
    // MCQ items are graded locally, only the freeform one reaches the judge.
    assert_eq!(judge.call_count(), 1);
    assert_eq!(store.result_history().unwrap().len(), 1);
}

#[tokio::test]
async fn incorrect_verdicts_raise_practice_weight() {
    let dir = TempDir::new().unwrap();
    let mut store = Store::open(dir.path()).unwrap();
    store.add(freeform("rust", "What is a borrow?")).unwrap();

    let judge = MockJudge::with_verdict(false).with_rationale("not quite");
    let mut source = ScriptedSource::answers(&["wrong", "wrong"]);
    let mut rng = StdRng::seed_from_u64(7);

    run_practice(
        &mut store,
        &judge,
        &mut source,
        &NoopReporter,
        &mut rng,
        Some(2),
    )
    .await
    .unwrap();

    let q = store.get(1).unwrap();
    assert_eq!(q.times_shown, 2);
    assert_eq!(q.times_correct, 0);
    assert_eq!(quizforge_core::selector::practice_weight(q), 3);
    assert_eq!(judge.last_answer().as_deref(), Some("wrong"));
}

#[tokio::test]
async fn judge_outage_degrades_to_exposure_only() {
    let dir = TempDir::new().unwrap();
    let mut store = Store::open(dir.path()).unwrap();
    store.add(freeform("rust", "What is a lifetime?")).unwrap();

    let judge = MockJudge::failing();
    let mut source = ScriptedSource::answers(&["an attempt"]);
    let mut rng = StdRng::seed_from_u64(7);

    run_practice(
        &mut store,
        &judge,
        &mut source,
        &NoopReporter,
        &mut rng,
        Some(1),
    )
    .await
    .unwrap();

    let q = store.get(1).unwrap();
    assert_eq!(q.times_shown, 1);
    assert_eq!(q.times_correct, 0);
    assert_eq!(judge.call_count(), 1);
}
