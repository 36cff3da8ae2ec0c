//! The `quizforge test` command.

use anyhow::Result;
use rand::rngs::StdRng;
use rand::SeedableRng;

use quizforge_core::session::run_test;
use quizforge_core::store::Store;
use quizforge_providers::QuizforgeConfig;

use crate::io::{ConsoleReporter, StdinAnswerSource};

pub async fn execute(config: &QuizforgeConfig, count: usize, seed: Option<u64>) -> Result<()> {
    let mut store = Store::open(&config.data_dir)?;
    let judge = config.create_judge();
    let mut rng = match seed {
        Some(s) => StdRng::seed_from_u64(s),
        None => StdRng::from_entropy(),
    };

    println!("Test: {count} questions, no repeats.");
    if !config.has_credential() {
        println!("No API key configured: freeform answers will not be graded.");
    }

    let record = run_test(
        &mut store,
        judge.as_ref(),
        &mut StdinAnswerSource,
        &ConsoleReporter,
        &mut rng,
        count,
    )
    .await?;

    if record.is_none() {
        println!("\nTest abandoned. No result was recorded.");
    }
    Ok(())
}
