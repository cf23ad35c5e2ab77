//! Health assistant chat
//!
//! Prompt assembly, the language-model client and the request relay.

pub mod gemini;
pub mod prompt;
pub mod relay;

pub use gemini::{ChatError, GeminiClient, Generation, LanguageModel};
pub use prompt::{build_prompt, format_user_context};
pub use relay::{ChatRelay, ChatRequest, ChatResponse};
