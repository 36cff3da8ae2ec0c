//! Configuration loading and provider factory.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use quizforge_core::traits::{AnswerJudge, QuestionGenerator, UnconfiguredJudge};

use crate::openai::OpenAiClient;

/// OpenAI backend configuration.
///
/// Note: Custom Debug impl masks the API key to prevent accidental exposure
/// in logs.
#[derive(Clone, Serialize, Deserialize)]
pub struct OpenAiConfig {
    pub api_key: String,
    #[serde(default = "default_model")]
    pub model: String,
    #[serde(default)]
    pub base_url: Option<String>,
}

impl std::fmt::Debug for OpenAiConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("OpenAiConfig")
            .field("api_key", &"***")
            .field("model", &self.model)
            .field("base_url", &self.base_url)
            .finish()
    }
}

fn default_model() -> String {
    "gpt-4o".to_string()
}

/// Top-level quizforge configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QuizforgeConfig {
    /// OpenAI backend settings. Absent means LLM-backed operations are
    /// unavailable unless `OPENAI_API_KEY` is set.
    #[serde(default)]
    pub openai: Option<OpenAiConfig>,
    /// Directory holding the question bank and result history.
    #[serde(default = "default_data_dir")]
    pub data_dir: PathBuf,
    /// Multiple-choice questions per generation batch.
    #[serde(default = "default_num_mcq")]
    pub default_num_mcq: u32,
    /// Freeform questions per generation batch.
    #[serde(default = "default_num_freeform")]
    pub default_num_freeform: u32,
}

fn default_data_dir() -> PathBuf {
    PathBuf::from("./quizforge-data")
}
fn default_num_mcq() -> u32 {
    3
}
fn default_num_freeform() -> u32 {
    1
}

impl Default for QuizforgeConfig {
    fn default() -> Self {
        Self {
            openai: None,
            data_dir: default_data_dir(),
            default_num_mcq: default_num_mcq(),
            default_num_freeform: default_num_freeform(),
        }
    }
}

impl QuizforgeConfig {
    /// Whether an API credential is available for LLM-backed operations.
    pub fn has_credential(&self) -> bool {
        self.openai
            .as_ref()
            .map(|c| !c.api_key.trim().is_empty())
            .unwrap_or(false)
    }

    /// Build the judge for freeform grading. Falls back to a judge that
    /// always fails when no credential is configured, so freeform attempts
    /// degrade to exposure-only recording instead of aborting the session.
    pub fn create_judge(&self) -> Box<dyn AnswerJudge> {
        match &self.openai {
            Some(c) if !c.api_key.trim().is_empty() => {
                Box::new(OpenAiClient::new(&c.api_key, &c.model, c.base_url.clone()))
            }
            _ => Box::new(UnconfiguredJudge),
        }
    }

    /// Build the question generator. Unlike judging, generation has no
    /// degraded mode, so a missing credential is an error.
    pub fn create_generator(&self) -> Result<Box<dyn QuestionGenerator>> {
        match &self.openai {
            Some(c) if !c.api_key.trim().is_empty() => Ok(Box::new(OpenAiClient::new(
                &c.api_key,
                &c.model,
                c.base_url.clone(),
            ))),
            _ => anyhow::bail!(
                "no OpenAI API key configured; set OPENAI_API_KEY or add an [openai] section to quizforge.toml"
            ),
        }
    }
}

/// Resolve environment variable references like `${VAR_NAME}` in a string.
fn resolve_env_vars(s: &str) -> String {
    let mut result = s.to_string();
    while let Some(start) = result.find("${") {
        if let Some(end) = result[start..].find('}') {
            let var_name = &result[start + 2..start + end];
            let value = std::env::var(var_name).unwrap_or_default();
            result = format!(
                "{}{}{}",
                &result[..start],
                value,
                &result[start + end + 1..]
            );
        } else {
            break;
        }
    }
    result
}

/// Load configuration from well-known paths.
///
/// Search order:
/// 1. `quizforge.toml` in the current directory
/// 2. `~/.config/quizforge/config.toml`
///
/// Environment variable overrides: `OPENAI_API_KEY`, `QUIZFORGE_MODEL`,
/// `QUIZFORGE_DATA_DIR`.
pub fn load_config() -> Result<QuizforgeConfig> {
    load_config_from(None)
}

/// Load config from an explicit path, or search the default locations.
pub fn load_config_from(path: Option<&Path>) -> Result<QuizforgeConfig> {
    let config_path = if let Some(p) = path {
        if p.exists() {
            Some(p.to_path_buf())
        } else {
            anyhow::bail!("config file not found: {}", p.display());
        }
    } else {
        let local = PathBuf::from("quizforge.toml");
        if local.exists() {
            Some(local)
        } else if let Some(home) = dirs_path() {
            let global = home.join("config.toml");
            if global.exists() {
                Some(global)
            } else {
                None
            }
        } else {
            None
        }
    };

    let mut config = match config_path {
        Some(path) => {
            let content = std::fs::read_to_string(&path)
                .with_context(|| format!("failed to read config: {}", path.display()))?;
            toml::from_str::<QuizforgeConfig>(&content)
                .with_context(|| format!("failed to parse config: {}", path.display()))?
        }
        None => QuizforgeConfig::default(),
    };

    // Apply env var overrides
    if let Ok(key) = std::env::var("OPENAI_API_KEY") {
        if !key.trim().is_empty() {
            match &mut config.openai {
                Some(openai) => openai.api_key = key,
                None => {
                    config.openai = Some(OpenAiConfig {
                        api_key: key,
                        model: default_model(),
                        base_url: None,
                    });
                }
            }
        }
    }
    if let Ok(model) = std::env::var("QUIZFORGE_MODEL") {
        if let Some(openai) = &mut config.openai {
            openai.model = model;
        }
    }
    if let Ok(dir) = std::env::var("QUIZFORGE_DATA_DIR") {
        config.data_dir = PathBuf::from(dir);
    }

    // Resolve env vars in the credential fields
    if let Some(openai) = &mut config.openai {
        openai.api_key = resolve_env_vars(&openai.api_key);
        openai.base_url = openai.base_url.as_deref().map(resolve_env_vars);
    }

    Ok(config)
}

fn dirs_path() -> Option<PathBuf> {
    std::env::var("HOME")
        .ok()
        .map(|h| PathBuf::from(h).join(".config").join("quizforge"))
}
