//! The `quizforge add` command.

use anyhow::Result;

use quizforge_core::model::{DraftQuestion, KindTag, QuestionKind, QuestionSource};
use quizforge_core::store::Store;
use quizforge_providers::QuizforgeConfig;

#[allow(clippy::too_many_arguments)]
pub fn execute(
    config: &QuizforgeConfig,
    topic: String,
    kind: KindTag,
    text: String,
    options: Vec<String>,
    answer: Option<String>,
    explanation: Option<String>,
    reference: Option<String>,
) -> Result<()> {
    let kind = match kind {
        KindTag::Mcq => {
            let correct_answer =
                answer.ok_or_else(|| anyhow::anyhow!("--answer is required for mcq questions"))?;
            QuestionKind::Mcq {
                options,
                correct_answer,
                explanation,
            }
        }
        KindTag::Freeform => {
            let reference_answer = reference
                .ok_or_else(|| anyhow::anyhow!("--reference is required for freeform questions"))?;
            QuestionKind::Freeform { reference_answer }
        }
    };

    let mut store = Store::open(&config.data_dir)?;
    let id = store.add(DraftQuestion {
        topic,
        text,
        source: QuestionSource::Manual,
        kind,
    })?;

    println!("Added question {id}.");
    Ok(())
}
