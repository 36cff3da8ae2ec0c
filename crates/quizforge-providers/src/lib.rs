//! quizforge-providers — LLM-backed generation and judging.
//!
//! Implements the `QuestionGenerator` and `AnswerJudge` traits over the
//! OpenAI Chat Completions API, plus a scripted mock for tests, and the
//! configuration layer that gates LLM-backed operations on a credential.

pub mod config;
pub mod error;
pub mod mock;
pub mod openai;

pub use config::{load_config, load_config_from, OpenAiConfig, QuizforgeConfig};
pub use error::ProviderError;
pub use openai::OpenAiClient;
