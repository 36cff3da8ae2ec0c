//! quizforge CLI — the user-facing command-line interface.

use std::path::PathBuf;
use std::process;

use clap::{Parser, Subcommand};

use quizforge_core::model::KindTag;

mod commands;
mod io;

#[derive(Parser)]
#[command(name = "quizforge", version, about = "Personal study-question manager")]
struct Cli {
    /// Config file path
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Data directory (overrides config and QUIZFORGE_DATA_DIR)
    #[arg(long, global = true)]
    data_dir: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Open-ended practice session with miss-weighted question selection
    Practice {
        /// Stop after this many questions instead of running until 'exit'
        #[arg(long)]
        limit: Option<usize>,

        /// RNG seed for reproducible selection
        #[arg(long)]
        seed: Option<u64>,
    },

    /// Fixed-length test over unique questions, with a recorded score
    Test {
        /// Number of questions to ask
        #[arg(value_parser = clap::value_parser!(u64).range(1..))]
        count: u64,

        /// RNG seed for reproducible selection
        #[arg(long)]
        seed: Option<u64>,
    },

    /// Generate draft questions for a topic and review them into the bank
    Generate {
        /// Subject area, e.g. "rust ownership"
        topic: String,

        /// Multiple-choice questions to request
        #[arg(long)]
        num_mcq: Option<u32>,

        /// Freeform questions to request
        #[arg(long)]
        num_freeform: Option<u32>,

        /// Accept every valid draft without prompting
        #[arg(long)]
        yes: bool,
    },

    /// Add one question by hand
    Add {
        /// Subject area
        #[arg(long)]
        topic: String,

        /// Question type: mcq or freeform
        #[arg(long)]
        kind: KindTag,

        /// The question prompt
        #[arg(long)]
        text: String,

        /// MCQ option (repeat per option)
        #[arg(long = "option")]
        options: Vec<String>,

        /// The correct MCQ option
        #[arg(long)]
        answer: Option<String>,

        /// Explanation shown after an MCQ is answered
        #[arg(long)]
        explanation: Option<String>,

        /// Reference answer for freeform grading
        #[arg(long)]
        reference: Option<String>,
    },

    /// List questions in the bank
    List {
        /// Include disabled questions
        #[arg(long)]
        all: bool,

        /// Only questions of this type: mcq or freeform
        #[arg(long)]
        kind: Option<KindTag>,
    },

    /// Re-enable a disabled question
    Enable {
        /// Question id
        id: u64,
    },

    /// Exclude a question from practice and tests
    Disable {
        /// Question id
        id: u64,
    },

    /// Bank statistics and recent test results
    Stats,
}

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("quizforge=info".parse().unwrap()),
        )
        .init();

    let cli = Cli::parse();

    let config = match quizforge_providers::load_config_from(cli.config.as_deref()) {
        Ok(mut config) => {
            if let Some(dir) = cli.data_dir {
                config.data_dir = dir;
            }
            tracing::debug!(data_dir = %config.data_dir.display(), "configuration loaded");
            config
        }
        Err(e) => {
            eprintln!("Error: {e:#}");
            process::exit(1);
        }
    };

    let result = match cli.command {
        Commands::Practice { limit, seed } => commands::practice::execute(&config, limit, seed).await,
        Commands::Test { count, seed } => {
            commands::test::execute(&config, count as usize, seed).await
        }
        Commands::Generate {
            topic,
            num_mcq,
            num_freeform,
            yes,
        } => commands::generate::execute(&config, topic, num_mcq, num_freeform, yes).await,
        Commands::Add {
            topic,
            kind,
            text,
            options,
            answer,
            explanation,
            reference,
        } => commands::add::execute(&config, topic, kind, text, options, answer, explanation, reference),
        Commands::List { all, kind } => commands::list::execute(&config, all, kind),
        Commands::Enable { id } => commands::manage::execute(&config, id, true),
        Commands::Disable { id } => commands::manage::execute(&config, id, false),
        Commands::Stats => commands::stats::execute(&config),
    };

    if let Err(e) = result {
        eprintln!("Error: {e:#}");
        process::exit(1);
    }
}
