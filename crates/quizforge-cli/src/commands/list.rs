//! The `quizforge list` command.

use anyhow::Result;
use comfy_table::{Cell, Table};

use quizforge_core::model::KindTag;
use quizforge_core::stats::question_rows;
use quizforge_core::store::{QuestionFilter, Store};
use quizforge_providers::QuizforgeConfig;

const TEXT_PREVIEW_CHARS: usize = 60;

pub fn execute(config: &QuizforgeConfig, all: bool, kind: Option<KindTag>) -> Result<()> {
    let store = Store::open(&config.data_dir)?;
    let filter = QuestionFilter {
        active_only: !all,
        kind,
    };
    let questions = store.list(&filter);

    if questions.is_empty() {
        println!("No questions match. Run `quizforge generate <topic>` or `quizforge add` to create some.");
        return Ok(());
    }

    let mut table = Table::new();
    table.set_header(vec![
        "ID", "Active", "Source", "Topic", "Type", "Shown", "Correct %", "Question",
    ]);
    for row in question_rows(&questions) {
        table.add_row(vec![
            Cell::new(row.id),
            Cell::new(if row.active { "yes" } else { "no" }),
            Cell::new(row.source),
            Cell::new(row.topic),
            Cell::new(row.kind),
            Cell::new(row.times_shown),
            Cell::new(
                row.accuracy_percent
                    .map(|p| format!("{p:.1}"))
                    .unwrap_or_else(|| "-".into()),
            ),
            Cell::new(preview(&row.text)),
        ]);
    }
    println!("{table}");
    Ok(())
}

fn preview(text: &str) -> String {
    if text.chars().count() <= TEXT_PREVIEW_CHARS {
        text.to_string()
    } else {
        let truncated: String = text.chars().take(TEXT_PREVIEW_CHARS).collect();
        format!("{truncated}…")
    }
}
