//! Language-model capability.
//!
//! The pipeline only depends on [`TextGenerator`]; [`GeminiClient`] is the
//! production implementation, constructed once at startup and injected.

mod gemini;

pub use gemini::{
    GeminiClient, GeminiConfig, DEFAULT_GEMINI_ENDPOINT, DEFAULT_GEMINI_MODEL, PROMPT_PREAMBLE,
};

use async_trait::async_trait;

use crate::error::LlmError;

/// Something that turns a prompt into generated text.
#[async_trait]
pub trait TextGenerator: Send + Sync {
    /// Generate a completion for `prompt`.
    ///
    /// Implementations return [`LlmError::EmptyResponse`] rather than an
    /// empty string when the service produces no text.
    async fn generate(&self, prompt: &str) -> Result<String, LlmError>;
}
