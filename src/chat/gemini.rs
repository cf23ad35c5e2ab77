//! Generative-language API client
//!
//! Sends a single-turn prompt to the `generateContent` endpoint and interprets the
//! reply, including prompt and response safety blocks.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors talking to the language model
#[derive(Debug, Error)]
pub enum ChatError {
    #[error("AI service unreachable: {0}")]
    Http(#[from] reqwest::Error),

    /// Non-success status, carrying the API's own message when it sent one
    #[error("{0}")]
    Api(String),

    #[error("AI service returned an empty or invalid response.")]
    EmptyResponse,

    #[error("Could not process the content from the AI response structure.")]
    MissingText,
}

/// Outcome of a generation request
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Generation {
    /// Reply text, trimmed
    Text(String),
    /// The prompt itself was blocked; carries the block reason
    PromptBlocked(String),
    /// A response was produced but withheld; carries the finish reason
    ResponseBlocked(String),
}

/// A text-generation backend
#[async_trait]
pub trait LanguageModel: Send + Sync {
    async fn generate(&self, prompt: &str) -> Result<Generation, ChatError>;
}

// ============================================================================
// Wire Types
// ============================================================================

const HARM_CATEGORIES: [&str; 4] = [
    "HARM_CATEGORY_HARASSMENT",
    "HARM_CATEGORY_HATE_SPEECH",
    "HARM_CATEGORY_SEXUALLY_EXPLICIT",
    "HARM_CATEGORY_DANGEROUS_CONTENT",
];

const BLOCK_THRESHOLD: &str = "BLOCK_MEDIUM_AND_ABOVE";
const TEMPERATURE: f64 = 0.6;
const MAX_OUTPUT_TOKENS: u32 = 800;

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerateContentRequest {
    contents: Vec<RequestContent>,
    generation_config: GenerationConfig,
    safety_settings: Vec<SafetySetting>,
}

#[derive(Debug, Serialize)]
struct RequestContent {
    role: &'static str,
    parts: Vec<RequestPart>,
}

#[derive(Debug, Serialize)]
struct RequestPart {
    text: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerationConfig {
    temperature: f64,
    max_output_tokens: u32,
}

#[derive(Debug, Serialize)]
struct SafetySetting {
    category: &'static str,
    threshold: &'static str,
}

impl GenerateContentRequest {
    pub fn new(prompt: &str) -> Self {
        Self {
            contents: vec![RequestContent {
                role: "user",
                parts: vec![RequestPart {
                    text: prompt.to_string(),
                }],
            }],
            generation_config: GenerationConfig {
                temperature: TEMPERATURE,
                max_output_tokens: MAX_OUTPUT_TOKENS,
            },
            safety_settings: HARM_CATEGORIES
                .iter()
                .map(|&category| SafetySetting {
                    category,
                    threshold: BLOCK_THRESHOLD,
                })
                .collect(),
        }
    }
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerateContentResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
    prompt_feedback: Option<PromptFeedback>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct Candidate {
    content: Option<CandidateContent>,
    finish_reason: Option<String>,
}

#[derive(Debug, Deserialize)]
struct CandidateContent {
    #[serde(default)]
    parts: Vec<ResponsePart>,
}

#[derive(Debug, Deserialize)]
struct ResponsePart {
    text: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct PromptFeedback {
    block_reason: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ApiErrorEnvelope {
    error: ApiErrorBody,
}

#[derive(Debug, Deserialize)]
struct ApiErrorBody {
    message: Option<String>,
}

/// Decide what a successful `generateContent` response means
pub fn interpret_response(response: GenerateContentResponse) -> Result<Generation, ChatError> {
    let Some(candidate) = response.candidates.into_iter().next() else {
        return match response.prompt_feedback.and_then(|f| f.block_reason) {
            Some(reason) => {
                tracing::warn!("Prompt blocked by safety settings: {}", reason);
                Ok(Generation::PromptBlocked(reason))
            }
            None => {
                tracing::error!("Language model returned no candidates");
                Err(ChatError::EmptyResponse)
            }
        };
    };

    if let Some(reason) = candidate.finish_reason.as_deref() {
        if reason != "STOP" && reason != "MAX_TOKENS" {
            tracing::warn!("Response finished with reason: {}", reason);
            if reason == "SAFETY" {
                return Ok(Generation::ResponseBlocked(reason.to_string()));
            }
        }
    }

    candidate
        .content
        .and_then(|c| c.parts.into_iter().next())
        .and_then(|p| p.text)
        .filter(|text| !text.is_empty())
        .map(|text| Generation::Text(text.trim().to_string()))
        .ok_or(ChatError::MissingText)
}

/// Message for a non-success HTTP status, preferring the API's own error text
pub fn api_error_message(status: u16, body: &str) -> String {
    serde_json::from_str::<ApiErrorEnvelope>(body)
        .ok()
        .and_then(|envelope| envelope.error.message)
        .filter(|m| !m.is_empty())
        .unwrap_or_else(|| format!("AI service request failed with status {}.", status))
}

// ============================================================================
// HTTP Client
// ============================================================================

/// `LanguageModel` backed by the Gemini `generateContent` REST endpoint
pub struct GeminiClient {
    http: reqwest::Client,
    endpoint: String,
    api_key: String,
}

impl GeminiClient {
    pub fn new(base_url: &str, model: &str, api_key: String) -> Self {
        Self {
            http: reqwest::Client::new(),
            endpoint: format!(
                "{}/models/{}:generateContent",
                base_url.trim_end_matches('/'),
                model
            ),
            api_key,
        }
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }
}

#[async_trait]
impl LanguageModel for GeminiClient {
    async fn generate(&self, prompt: &str) -> Result<Generation, ChatError> {
        tracing::info!("Sending request to language model");

        let response = self
            .http
            .post(&self.endpoint)
            .query(&[("key", self.api_key.as_str())])
            .json(&GenerateContentRequest::new(prompt))
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            tracing::error!("Language model API error: {} {}", status, body);
            return Err(ChatError::Api(api_error_message(status.as_u16(), &body)));
        }

        let parsed: GenerateContentResponse = response.json().await?;
        tracing::info!("Received response from language model");
        interpret_response(parsed)
    }
}
