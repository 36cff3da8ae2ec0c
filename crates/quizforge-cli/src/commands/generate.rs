//! The `quizforge generate` command.

use anyhow::Result;

use quizforge_core::model::{
    normalize_answer, DraftQuestion, QuestionKind, QuestionSource, MAX_DISPLAYED_OPTIONS,
};
use quizforge_core::store::Store;
use quizforge_core::traits::{GenerateRequest, QuestionGenerator};
use quizforge_providers::QuizforgeConfig;

use crate::io::prompt_line;

pub async fn execute(
    config: &QuizforgeConfig,
    topic: String,
    num_mcq: Option<u32>,
    num_freeform: Option<u32>,
    accept_all: bool,
) -> Result<()> {
    let generator = config.create_generator()?;
    let mut store = Store::open(&config.data_dir)?;

    let request = GenerateRequest {
        topic,
        num_mcq: num_mcq.unwrap_or(config.default_num_mcq),
        num_freeform: num_freeform.unwrap_or(config.default_num_freeform),
    };

    println!(
        "Generating {} multiple-choice and {} freeform questions about \"{}\" via {}...",
        request.num_mcq,
        request.num_freeform,
        request.topic,
        generator.name()
    );
    let drafts = generator.generate(&request).await?;
    if drafts.is_empty() {
        println!("The model produced no usable questions. Try a more specific topic.");
        return Ok(());
    }

    let mut read = |prompt: &str| prompt_line(prompt);
    let accepted = review_drafts(&mut store, drafts, accept_all, &mut read)?;

    println!(
        "\n{accepted} question(s) added. The bank now holds {}.",
        store.len()
    );
    Ok(())
}

/// Walk the drafts one by one, letting the user accept, edit in place, or
/// reject each before it reaches the bank. `exit` or end-of-input stops the
/// review; already-accepted drafts stay saved. Returns the accepted count.
fn review_drafts(
    store: &mut Store,
    drafts: Vec<DraftQuestion>,
    accept_all: bool,
    read: &mut dyn FnMut(&str) -> Option<String>,
) -> Result<usize> {
    let mut accepted = 0usize;
    'drafts: for (i, mut draft) in drafts.into_iter().enumerate() {
        loop {
            println!("\n--- Draft {} ---", i + 1);
            println!("{}", draft_preview(&draft));

            if accept_all {
                match draft.validate() {
                    Ok(()) => {
                        let id = store.add(draft)?;
                        println!("Added as question {id}.");
                        accepted += 1;
                    }
                    Err(e) => println!("Rejected (invalid): {e}"),
                }
                continue 'drafts;
            }

            let Some(reply) = read("[a]ccept / [e]dit / [r]eject (default a): ") else {
                break 'drafts;
            };
            match reply.to_lowercase().as_str() {
                "" | "a" => match draft.validate() {
                    Ok(()) => {
                        let id = store.add(draft)?;
                        println!("Added as question {id}.");
                        accepted += 1;
                        continue 'drafts;
                    }
                    Err(e) => println!("Cannot accept: {e}. Edit it or reject."),
                },
                "e" => {
                    if edit_draft(&mut draft, read) {
                        draft.source = QuestionSource::Manual;
                    }
                    println!("Updated draft:");
                }
                "r" => {
                    println!("Rejected.");
                    continue 'drafts;
                }
                "exit" => break 'drafts,
                _ => println!("Choose a, e, r, or 'exit'."),
            }
        }
    }
    Ok(accepted)
}

/// Edit the draft's fields in place. Blank input keeps a field; end-of-input
/// stops editing early. Returns whether anything changed.
fn edit_draft(draft: &mut DraftQuestion, read: &mut dyn FnMut(&str) -> Option<String>) -> bool {
    let mut changed = false;

    let Some(text) = read("Question text (blank keeps): ") else {
        return changed;
    };
    if !text.is_empty() && text != draft.text {
        draft.text = text;
        changed = true;
    }

    match &mut draft.kind {
        QuestionKind::Mcq {
            options,
            correct_answer,
            ..
        } => {
            let Some(opts_input) = read("Options, separated by ';' (blank keeps): ") else {
                return changed;
            };
            if !opts_input.is_empty() {
                let new_opts: Vec<String> = opts_input
                    .split(';')
                    .map(str::trim)
                    .filter(|o| !o.is_empty())
                    .map(String::from)
                    .collect();
                if !new_opts.is_empty() && new_opts != *options {
                    *options = new_opts;
                    changed = true;
                }
            }

            let Some(answer_input) = read("Correct answer (blank keeps): ") else {
                return changed;
            };
            if !answer_input.is_empty() {
                if answer_input != *correct_answer {
                    *correct_answer = answer_input;
                    changed = true;
                }
                let normalized = normalize_answer(correct_answer);
                if !options.iter().any(|o| normalize_answer(o) == normalized) {
                    options.push(correct_answer.clone());
                    println!("Correct answer was not among the options; it has been added.");
                    changed = true;
                }
            }
        }
        QuestionKind::Freeform { reference_answer } => {
            let Some(ref_input) = read("Reference answer (blank keeps): ") else {
                return changed;
            };
            if !ref_input.is_empty() && ref_input != *reference_answer {
                *reference_answer = ref_input;
                changed = true;
            }
        }
    }
    changed
}

fn draft_preview(draft: &DraftQuestion) -> String {
    let mut out = format!("[{}] Topic: {}\n{}", draft.kind.tag(), draft.topic, draft.text);
    match &draft.kind {
        QuestionKind::Mcq {
            options,
            correct_answer,
            explanation,
        } => {
            for (i, option) in options.iter().take(MAX_DISPLAYED_OPTIONS).enumerate() {
                out.push_str(&format!("\n  {}. {}", (b'A' + i as u8) as char, option));
            }
            out.push_str(&format!("\nCorrect: {correct_answer}"));
            if let Some(note) = explanation {
                out.push_str(&format!("\nExplanation: {note}"));
            }
        }
        QuestionKind::Freeform { reference_answer } => {
            out.push_str(&format!("\nReference answer: {reference_answer}"));
        }
    }
    out
}
