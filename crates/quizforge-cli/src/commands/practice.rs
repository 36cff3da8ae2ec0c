//! The `quizforge practice` command.

use anyhow::Result;
use rand::rngs::StdRng;
use rand::SeedableRng;

use quizforge_core::session::run_practice;
use quizforge_core::store::Store;
use quizforge_providers::QuizforgeConfig;

use crate::io::{ConsoleReporter, StdinAnswerSource};

pub async fn execute(config: &QuizforgeConfig, limit: Option<usize>, seed: Option<u64>) -> Result<()> {
    let mut store = Store::open(&config.data_dir)?;
    let judge = config.create_judge();
    let mut rng = match seed {
        Some(s) => StdRng::seed_from_u64(s),
        None => StdRng::from_entropy(),
    };

    println!("Practice session. Missed questions come up more often.");
    if !config.has_credential() {
        println!("No API key configured: freeform answers will not be graded.");
    }

    run_practice(
        &mut store,
        judge.as_ref(),
        &mut StdinAnswerSource,
        &ConsoleReporter,
        &mut rng,
        limit,
    )
    .await?;

    println!("\nSession ended.");
    Ok(())
}
