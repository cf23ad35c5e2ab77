//! Chat relay
//!
//! Accepts a user question plus the client's current profile, builds the prompt and
//! maps the model outcome onto the `{reply}` / `{error}` wire shapes.

use std::sync::Arc;

use serde::{Deserialize, Serialize};

use super::gemini::{Generation, LanguageModel};
use super::prompt::build_prompt;
use crate::models::UserProfile;

pub const EMPTY_MESSAGE_ERROR: &str = "Message is required and must be a non-empty string.";
pub const MISSING_KEY_ERROR: &str = "Server configuration error. API key missing.";

/// Chat request body
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatRequest {
    pub message: String,
    #[serde(default)]
    pub metrics: Option<UserProfile>,
}

/// Chat response body: exactly one of `reply` or `error`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ChatResponse {
    Reply { reply: String },
    Error { error: String },
}

impl ChatResponse {
    pub fn reply(text: impl Into<String>) -> Self {
        Self::Reply { reply: text.into() }
    }

    pub fn error(text: impl Into<String>) -> Self {
        Self::Error { error: text.into() }
    }

    pub fn is_error(&self) -> bool {
        matches!(self, Self::Error { .. })
    }
}

/// Forwards questions to the configured language model
pub struct ChatRelay {
    model: Option<Arc<dyn LanguageModel>>,
}

impl ChatRelay {
    pub fn new(model: Option<Arc<dyn LanguageModel>>) -> Self {
        Self { model }
    }

    /// Relay without a backend; every valid request reports the missing key
    pub fn unconfigured() -> Self {
        Self { model: None }
    }

    pub fn is_configured(&self) -> bool {
        self.model.is_some()
    }

    pub async fn handle(&self, request: &ChatRequest) -> ChatResponse {
        let message = request.message.trim();
        if message.is_empty() {
            return ChatResponse::error(EMPTY_MESSAGE_ERROR);
        }

        let Some(model) = &self.model else {
            tracing::error!("Chat requested but no language model API key is configured");
            return ChatResponse::error(MISSING_KEY_ERROR);
        };

        let prompt = build_prompt(&request.message, request.metrics.as_ref());
        tracing::debug!(
            has_profile = request.metrics.is_some(),
            prompt_len = prompt.len(),
            "Relaying chat message"
        );

        match model.generate(&prompt).await {
            Ok(Generation::Text(text)) => ChatResponse::reply(text),
            Ok(Generation::PromptBlocked(reason)) => ChatResponse::reply(format!(
                "I cannot process that request due to safety guidelines ({}). Please rephrase your question.",
                reason
            )),
            Ok(Generation::ResponseBlocked(reason)) => ChatResponse::reply(format!(
                "I generated a response, but it was blocked due to safety guidelines ({}). Please try asking differently.",
                reason
            )),
            Err(e) => {
                tracing::error!("Chat relay failed: {}", e);
                ChatResponse::error(format!(
                    "Failed to get response from the health assistant. {}",
                    e
                ))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::chat::gemini::ChatError;
    use async_trait::async_trait;
    use std::sync::Mutex;

    struct StubModel {
        outcome: fn() -> Result<Generation, ChatError>,
        prompts: Mutex<Vec<String>>,
    }

    impl StubModel {
        fn new(outcome: fn() -> Result<Generation, ChatError>) -> Arc<Self> {
            Arc::new(Self {
                outcome,
                prompts: Mutex::new(Vec::new()),
            })
        }
    }

    #[async_trait]
    impl LanguageModel for StubModel {
        async fn generate(&self, prompt: &str) -> Result<Generation, ChatError> {
            self.prompts.lock().unwrap().push(prompt.to_string());
            (self.outcome)()
        }
    }

    fn request(message: &str) -> ChatRequest {
        ChatRequest {
            message: message.to_string(),
            metrics: None,
        }
    }

    #[tokio::test]
    async fn test_empty_message_rejected() {
        let stub = StubModel::new(|| Ok(Generation::Text("unused".into())));
        let relay = ChatRelay::new(Some(stub.clone()));
        assert_eq!(
            relay.handle(&request("   ")).await,
            ChatResponse::error(EMPTY_MESSAGE_ERROR)
        );
        assert!(stub.prompts.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_missing_key() {
        let relay = ChatRelay::unconfigured();
        assert!(!relay.is_configured());
        assert_eq!(
            relay.handle(&request("Hi")).await,
            ChatResponse::error(MISSING_KEY_ERROR)
        );
    }

    #[tokio::test]
    async fn test_reply_passthrough() {
        let stub = StubModel::new(|| Ok(Generation::Text("Stay hydrated.".into())));
        let relay = ChatRelay::new(Some(stub.clone()));
        assert_eq!(
            relay.handle(&request("Tips?")).await,
            ChatResponse::reply("Stay hydrated.")
        );
        let prompts = stub.prompts.lock().unwrap();
        assert_eq!(prompts.len(), 1);
        assert!(prompts[0].contains("has not provided their biometric data yet"));
        assert!(prompts[0].ends_with("Tips?"));
    }

    #[tokio::test]
    async fn test_safety_blocks_become_replies() {
        let relay = ChatRelay::new(Some(StubModel::new(|| {
            Ok(Generation::PromptBlocked("SAFETY".into()))
        })));
        let response = relay.handle(&request("x")).await;
        assert_eq!(
            response,
            ChatResponse::reply(
                "I cannot process that request due to safety guidelines (SAFETY). Please rephrase your question."
            )
        );

        let relay = ChatRelay::new(Some(StubModel::new(|| {
            Ok(Generation::ResponseBlocked("SAFETY".into()))
        })));
        let response = relay.handle(&request("x")).await;
        assert!(!response.is_error());
    }

    #[tokio::test]
    async fn test_model_failure_is_error() {
        let relay = ChatRelay::new(Some(StubModel::new(|| Err(ChatError::EmptyResponse))));
        assert_eq!(
            relay.handle(&request("x")).await,
            ChatResponse::error(
                "Failed to get response from the health assistant. AI service returned an empty or invalid response."
            )
        );
    }

    #[test]
    fn test_wire_shapes() {
        let json = serde_json::to_value(ChatResponse::reply("ok")).unwrap();
        assert_eq!(json, serde_json::json!({"reply": "ok"}));
        let json = serde_json::to_value(ChatResponse::error("bad")).unwrap();
        assert_eq!(json, serde_json::json!({"error": "bad"}));

        let request: ChatRequest = serde_json::from_str(r#"{"message":"hello"}"#).unwrap();
        assert!(request.metrics.is_none());
    }
}
