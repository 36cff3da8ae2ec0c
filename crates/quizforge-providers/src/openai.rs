//! OpenAI-backed question generation and answer judging.
//!
//! One client implements both capability traits over the Chat Completions
//! API, requesting structured JSON object responses so the model output can
//! be parsed without scraping.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tracing::instrument;

use quizforge_core::model::{DraftQuestion, KindTag, QuestionKind, QuestionSource};
use quizforge_core::traits::{AnswerJudge, GenerateRequest, Judgement, QuestionGenerator};

use crate::error::ProviderError;

const DEFAULT_BASE_URL: &str = "https://api.openai.com";
const DEFAULT_TIMEOUT_SECS: u64 = 120;

const GENERATE_PROMPT: &str = r#"You are a quiz author. Produce study questions for the given topic.

Respond with a single JSON object of the form:
{"questions": [
  {"type": "multiple-choice", "topic": "...", "question": "...",
   "options": ["...", "...", "...", "..."], "correct_answer": "...",
   "explanation": "..."},
  {"type": "freeform", "topic": "...", "question": "...",
   "reference_answer": "..."}
]}

Rules:
- Every multiple-choice question has exactly 4 options and exactly one of
  them equals correct_answer verbatim.
- reference_answer is a complete model answer, 1-3 sentences.
- Questions must be self-contained and factually accurate.
- Output only the JSON object, nothing else."#;

const JUDGE_PROMPT: &str = r#"You are grading a student's answer to a study question.

Respond with a single JSON object of the form:
{"judgment": "Correct", "explanation": "..."}
or
{"judgment": "Incorrect", "explanation": "..."}

Judge on meaning, not wording: the answer is Correct when it conveys the
substance of the reference answer. Keep the explanation to one or two
sentences. Output only the JSON object, nothing else."#;

/// OpenAI Chat Completions client.
pub struct OpenAiClient {
    api_key: String,
    model: String,
    base_url: String,
    client: reqwest::Client,
}

impl OpenAiClient {
    pub fn new(api_key: &str, model: &str, base_url: Option<String>) -> Self {
        let client = reqwest::Client::builder()
            .timeout(std::time::Duration::from_secs(DEFAULT_TIMEOUT_SECS))
            .build()
            .expect("failed to build HTTP client");

        Self {
            api_key: api_key.to_string(),
            model: model.to_string(),
            base_url: base_url.unwrap_or_else(|| DEFAULT_BASE_URL.to_string()),
            client,
        }
    }

    /// Send a system+user message pair expecting a JSON object back, and
    /// parse the model's content as JSON.
    async fn complete(
        &self,
        system: &str,
        user: &str,
    ) -> Result<serde_json::Value, ProviderError> {
        let body = ChatRequest {
            model: self.model.clone(),
            messages: vec![
                ChatMessage {
                    role: "system",
                    content: system.to_string(),
                },
                ChatMessage {
                    role: "user",
                    content: user.to_string(),
                },
            ],
            response_format: ResponseFormat {
                format_type: "json_object",
            },
        };

        let response = self
            .client
            .post(format!("{}/v1/chat/completions", self.base_url))
            .header("Authorization", format!("Bearer {}", self.api_key))
            .header("content-type", "application/json")
            .json(&body)
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    ProviderError::Timeout(DEFAULT_TIMEOUT_SECS)
                } else {
                    ProviderError::NetworkError(e.to_string())
                }
            })?;

        let status = response.status().as_u16();
        if status == 429 {
            let retry_after = response
                .headers()
                .get("retry-after")
                .and_then(|v| v.to_str().ok())
                .and_then(|v| v.parse::<u64>().ok())
                .unwrap_or(5)
                * 1000;
            return Err(ProviderError::RateLimited {
                retry_after_ms: retry_after,
            });
        }
        if status == 401 {
            let body = response.text().await.unwrap_or_default();
            return Err(ProviderError::AuthenticationFailed(body));
        }
        if status == 404 {
            return Err(ProviderError::ModelNotFound(self.model.clone()));
        }
        if status >= 400 {
            let body = response.text().await.unwrap_or_default();
            return Err(ProviderError::ApiError {
                status,
                message: body,
            });
        }

        let api_response: ChatResponse =
            response.json().await.map_err(|e| ProviderError::ApiError {
                status: 0,
                message: format!("failed to parse response: {e}"),
            })?;

        let content = api_response
            .choices
            .first()
            .map(|c| c.message.content.clone())
            .filter(|c| !c.trim().is_empty())
            .ok_or(ProviderError::EmptyResponse)?;

        serde_json::from_str(&content).map_err(|e| ProviderError::MalformedResponse {
            message: format!("model output is not valid JSON: {e}"),
            raw: content,
        })
    }
}

#[derive(Serialize)]
struct ChatRequest {
    model: String,
    messages: Vec<ChatMessage>,
    response_format: ResponseFormat,
}

#[derive(Serialize)]
struct ChatMessage {
    role: &'static str,
    content: String,
}

#[derive(Serialize)]
struct ResponseFormat {
    #[serde(rename = "type")]
    format_type: &'static str,
}

#[derive(Deserialize)]
struct ChatResponse {
    choices: Vec<ChatChoice>,
}

#[derive(Deserialize)]
struct ChatChoice {
    message: ChatChoiceMessage,
}

#[derive(Deserialize)]
struct ChatChoiceMessage {
    content: String,
}

/// Question shape as the model emits it.
#[derive(Deserialize)]
struct WireQuestion {
    #[serde(rename = "type")]
    kind: String,
    #[serde(default)]
    topic: String,
    question: String,
    #[serde(default)]
    options: Vec<String>,
    #[serde(default)]
    correct_answer: String,
    #[serde(default)]
    explanation: Option<String>,
    #[serde(default)]
    reference_answer: String,
}

impl WireQuestion {
    /// Convert into an unvalidated draft; the store validates on accept.
    fn into_draft(self) -> Option<DraftQuestion> {
        let tag: KindTag = self.kind.parse().ok()?;
        let kind = match tag {
            KindTag::Mcq => QuestionKind::Mcq {
                options: self.options,
                correct_answer: self.correct_answer,
                explanation: self.explanation,
            },
            KindTag::Freeform => QuestionKind::Freeform {
                reference_answer: self.reference_answer,
            },
        };
        Some(DraftQuestion {
            topic: self.topic,
            text: self.question,
            source: QuestionSource::Llm,
            kind,
        })
    }
}

#[async_trait]
impl QuestionGenerator for OpenAiClient {
    fn name(&self) -> &str {
        "openai"
    }

    #[instrument(skip(self, request), fields(topic = %request.topic))]
    async fn generate(&self, request: &GenerateRequest) -> anyhow::Result<Vec<DraftQuestion>> {
        anyhow::ensure!(!request.topic.trim().is_empty(), "topic must be non-empty");

        let user = format!(
            "Topic: {}\nGenerate {} multiple-choice and {} freeform questions.",
            request.topic.trim(),
            request.num_mcq,
            request.num_freeform
        );
        let value = self.complete(GENERATE_PROMPT, &user).await?;

        let entries = value
            .get("questions")
            .and_then(|q| q.as_array())
            .cloned()
            .ok_or_else(|| ProviderError::MalformedResponse {
                message: "missing \"questions\" array".into(),
                raw: value.to_string(),
            })?;

        let mut drafts = Vec::with_capacity(entries.len());
        for entry in entries {
            match serde_json::from_value::<WireQuestion>(entry.clone()) {
                Ok(wire) => match wire.into_draft() {
                    Some(draft) => drafts.push(draft),
                    None => tracing::warn!(%entry, "skipping question with unknown type"),
                },
                Err(e) => tracing::warn!(%entry, error = %e, "skipping malformed question"),
            }
        }
        Ok(drafts)
    }
}

#[async_trait]
impl AnswerJudge for OpenAiClient {
    fn name(&self) -> &str {
        "openai"
    }

    #[instrument(skip_all)]
    async fn judge(
        &self,
        question: &str,
        reference_answer: &str,
        submitted_answer: &str,
    ) -> anyhow::Result<Judgement> {
        let user = format!(
            "Question: {question}\nReference answer: {reference_answer}\nStudent answer: {submitted_answer}"
        );
        let value = self.complete(JUDGE_PROMPT, &user).await?;

        let judgment = value
            .get("judgment")
            .and_then(|j| j.as_str())
            .ok_or_else(|| ProviderError::MalformedResponse {
                message: "missing \"judgment\" field".into(),
                raw: value.to_string(),
            })?;

        let rationale = value
            .get("explanation")
            .and_then(|e| e.as_str())
            .map(str::trim)
            .filter(|e| !e.is_empty())
            .map(String::from);

        Ok(Judgement {
            correct: judgment.trim().eq_ignore_ascii_case("correct"),
            rationale,
        })
    }
}
