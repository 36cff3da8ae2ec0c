//! Terminal interaction for sessions.

use std::io::{BufRead, Write};

use quizforge_core::model::{Question, QuestionKind, ResultRecord, MAX_DISPLAYED_OPTIONS};
use quizforge_core::session::{AnswerSource, AttemptOutcome, Reply, SessionReporter};

/// Resolve a single-letter MCQ reply (a-d, any case) to the option text it
/// labels. Returns `None` for anything else, including letters past the
/// displayed range and non-MCQ questions.
pub fn resolve_mcq_letter(question: &Question, input: &str) -> Option<String> {
    let trimmed = input.trim();
    let mut chars = trimmed.chars();
    let letter = chars.next()?.to_ascii_uppercase();
    if chars.next().is_some() || !('A'..='D').contains(&letter) {
        return None;
    }
    let index = (letter as u8 - b'A') as usize;
    match &question.kind {
        QuestionKind::Mcq { options, .. } => {
            options.iter().take(MAX_DISPLAYED_OPTIONS).nth(index).cloned()
        }
        QuestionKind::Freeform { .. } => None,
    }
}

/// Reads answers from standard input. `exit` (any case) or end-of-input
/// leaves the session; an MCQ letter is expanded to its option text.
pub struct StdinAnswerSource;

impl AnswerSource for StdinAnswerSource {
    fn read_answer(&mut self, question: &Question) -> Reply {
        print!("\nYour answer ('exit' to quit): ");
        let _ = std::io::stdout().flush();

        let mut line = String::new();
        match std::io::stdin().lock().read_line(&mut line) {
            Ok(0) | Err(_) => return Reply::Exit,
            Ok(_) => {}
        }
        let trimmed = line.trim();
        if trimmed.eq_ignore_ascii_case("exit") {
            return Reply::Exit;
        }
        if let Some(option) = resolve_mcq_letter(question, trimmed) {
            return Reply::Answer(option);
        }
        Reply::Answer(trimmed.to_string())
    }
}

/// Prints session progress to the terminal.
pub struct ConsoleReporter;

impl SessionReporter for ConsoleReporter {
    fn on_question(&self, question: &Question, progress: Option<(usize, usize)>) {
        println!("\n{}", "-".repeat(60));
        if let Some((number, total)) = progress {
            println!("Question {number}/{total}");
        }
        println!("{}", question.present());
    }

    fn on_outcome(&self, outcome: &AttemptOutcome) {
        match outcome {
            AttemptOutcome::Scored {
                correct,
                explanation,
            } => {
                println!("{}", if *correct { "Correct!" } else { "Incorrect." });
                if let Some(note) = explanation {
                    println!("Note: {note}");
                }
            }
            AttemptOutcome::Skipped { reason } => {
                println!("Could not grade this answer ({reason}). It will not count toward your score.");
            }
        }
    }

    fn on_test_complete(&self, record: &ResultRecord) {
        println!("\n{}", "-".repeat(60));
        println!(
            "Test complete: {}/{} correct ({:.1}%)",
            record.correct,
            record.asked,
            record.score_percent()
        );
    }
}

/// Prompt for one line on stdout/stdin. Returns `None` on end-of-input.
pub fn prompt_line(prompt: &str) -> Option<String> {
    print!("{prompt}");
    let _ = std::io::stdout().flush();
    let mut line = String::new();
    match std::io::stdin().lock().read_line(&mut line) {
        Ok(0) | Err(_) => None,
        Ok(_) => Some(line.trim().to_string()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use quizforge_core::model::QuestionSource;

    fn mcq(options: &[&str]) -> Question {
        Question {
            id: 1,
            topic: "rust".into(),
            text: "pick one".into(),
            source: QuestionSource::Manual,
            active: true,
            times_shown: 0,
            times_correct: 0,
            kind: QuestionKind::Mcq {
                options: options.iter().map(|s| s.to_string()).collect(),
                correct_answer: options[0].into(),
                explanation: None,
            },
        }
    }

    #[test]
    fn letters_map_to_options_case_insensitively() {
        let q = mcq(&["let", "mut", "const"]);
        assert_eq!(resolve_mcq_letter(&q, "a").as_deref(), Some("let"));
        assert_eq!(resolve_mcq_letter(&q, " B ").as_deref(), Some("mut"));
        assert_eq!(resolve_mcq_letter(&q, "c").as_deref(), Some("const"));
    }

    #[test]
    fn out_of_range_letters_do_not_resolve() {
        let q = mcq(&["let", "mut"]);
        assert_eq!(resolve_mcq_letter(&q, "c"), None);
        assert_eq!(resolve_mcq_letter(&q, "e"), None);
        assert_eq!(resolve_mcq_letter(&q, "z"), None);
    }

    #[test]
    fn full_words_pass_through() {
        let q = mcq(&["let", "mut"]);
        assert_eq!(resolve_mcq_letter(&q, "ab"), None);
        assert_eq!(resolve_mcq_letter(&q, "let"), None);
    }

    #[test]
    fn freeform_questions_take_letters_literally() {
        let q = Question {
            kind: QuestionKind::Freeform {
                reference_answer: "r".into(),
            },
            ..mcq(&["x", "y"])
        };
        assert_eq!(resolve_mcq_letter(&q, "a"), None);
    }
}
