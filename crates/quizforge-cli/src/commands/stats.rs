//! The `quizforge stats` command.

use anyhow::Result;
use comfy_table::{Cell, Table};

use quizforge_core::stats::{bank_summary, question_rows};
use quizforge_core::store::{QuestionFilter, Store};
use quizforge_providers::QuizforgeConfig;

const RECENT_RESULTS: usize = 10;

pub fn execute(config: &QuizforgeConfig) -> Result<()> {
    let store = Store::open(&config.data_dir)?;
    let questions = store.list(&QuestionFilter::all());

    let summary = bank_summary(&questions);
    println!(
        "Bank: {} questions ({} active), {} attempts recorded.",
        summary.total, summary.active, summary.total_attempts
    );
    if let Some(accuracy) = summary.overall_accuracy {
        println!("Overall accuracy: {:.1}%", accuracy * 100.0);
    }

    if !questions.is_empty() {
        let mut table = Table::new();
        table.set_header(vec!["ID", "Active", "Topic", "Type", "Shown", "Correct %"]);
        for row in question_rows(&questions) {
            table.add_row(vec![
                Cell::new(row.id),
                Cell::new(if row.active { "yes" } else { "no" }),
                Cell::new(row.topic),
                Cell::new(row.kind),
                Cell::new(row.times_shown),
                Cell::new(
                    row.accuracy_percent
                        .map(|p| format!("{p:.1}"))
                        .unwrap_or_else(|| "-".into()),
                ),
            ]);
        }
        println!("\n{table}");
    }

    let history = store.result_history()?;
    if history.is_empty() {
        println!("\nNo test results yet. Run `quizforge test <count>` to record one.");
    } else {
        println!("\nRecent tests:");
        let start = history.len().saturating_sub(RECENT_RESULTS);
        for record in &history[start..] {
            println!(
                "  {}  {}/{} ({:.1}%)",
                record.timestamp.format("%Y-%m-%d %H:%M"),
                record.correct,
                record.asked,
                record.score_percent()
            );
        }
    }
    Ok(())
}
