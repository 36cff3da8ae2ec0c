//! The `quizforge enable` and `quizforge disable` commands.

use anyhow::Result;

use quizforge_core::store::Store;
use quizforge_providers::QuizforgeConfig;

pub fn execute(config: &QuizforgeConfig, id: u64, active: bool) -> Result<()> {
    let mut store = Store::open(&config.data_dir)?;
    store.set_active(id, active)?;
    if active {
        println!("Question {id} enabled.");
    } else {
        println!("Question {id} disabled. It will be skipped by practice and tests.");
    }
    Ok(())
}
