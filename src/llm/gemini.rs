//! Gemini `generateContent` REST client.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use super::TextGenerator;
use crate::error::LlmError;

/// Default model identifier.
pub const DEFAULT_GEMINI_MODEL: &str = "gemini-2.5-pro-preview-05-06";

/// Default API base URL.
pub const DEFAULT_GEMINI_ENDPOINT: &str = "https://generativelanguage.googleapis.com";

/// Instruction prepended to every user prompt.
pub const PROMPT_PREAMBLE: &str =
    "You are a helpful AI assistant. Please provide a detailed and thoughtful response to the following:";

const API_KEY_HEADER: &str = "x-goog-api-key";

// =============================================================================
// Configuration
// =============================================================================

/// Connection and sampling settings for [`GeminiClient`].
#[derive(Debug, Clone)]
pub struct GeminiConfig {
    pub api_key: String,
    pub model: String,

    /// Base URL, e.g. `https://generativelanguage.googleapis.com`
    pub endpoint: String,

    pub temperature: f32,
    pub top_k: u32,
    pub top_p: f32,
    pub max_output_tokens: u32,

    /// Overall request timeout; `None` waits indefinitely
    pub timeout: Option<Duration>,
}

impl GeminiConfig {
    /// Default sampling settings for the given key.
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            model: DEFAULT_GEMINI_MODEL.to_string(),
            endpoint: DEFAULT_GEMINI_ENDPOINT.to_string(),
            temperature: 0.7,
            top_k: 40,
            top_p: 0.95,
            max_output_tokens: 2048,
            timeout: None,
        }
    }

    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }

    pub fn with_endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.endpoint = endpoint.into();
        self
    }

    pub fn with_timeout(mut self, timeout: Option<Duration>) -> Self {
        self.timeout = timeout;
        self
    }

    fn generate_url(&self) -> String {
        format!(
            "{}/v1beta/models/{}:generateContent",
            self.endpoint.trim_end_matches('/'),
            self.model
        )
    }
}

// =============================================================================
// Wire Types
// =============================================================================

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerateContentRequest<'a> {
    contents: Vec<RequestContent<'a>>,
    generation_config: GenerationConfig,
}

#[derive(Debug, Serialize)]
struct RequestContent<'a> {
    role: &'a str,
    parts: Vec<RequestPart>,
}

#[derive(Debug, Serialize)]
struct RequestPart {
    text: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerationConfig {
    temperature: f32,
    top_k: u32,
    top_p: f32,
    max_output_tokens: u32,
}

#[derive(Debug, Default, Deserialize)]
struct GenerateContentResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Debug, Deserialize)]
struct Candidate {
    #[serde(default)]
    content: Option<ResponseContent>,
}

#[derive(Debug, Deserialize)]
struct ResponseContent {
    #[serde(default)]
    parts: Vec<ResponsePart>,
}

#[derive(Debug, Deserialize)]
struct ResponsePart {
    #[serde(default)]
    text: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ApiErrorBody {
    error: ApiErrorDetail,
}

#[derive(Debug, Deserialize)]
struct ApiErrorDetail {
    #[serde(default)]
    message: String,
    #[serde(default)]
    status: Option<String>,
}

// =============================================================================
// Client
// =============================================================================

/// [`TextGenerator`] backed by the Gemini REST API.
#[derive(Debug, Clone)]
pub struct GeminiClient {
    http: Client,
    config: GeminiConfig,
}

impl GeminiClient {
    pub fn new(config: GeminiConfig) -> Result<Self, LlmError> {
        let mut builder = Client::builder();
        if let Some(timeout) = config.timeout {
            builder = builder.timeout(timeout);
        }
        let http = builder
            .build()
            .map_err(|e| LlmError::Unreachable(format!("failed to build HTTP client: {}", e)))?;

        Ok(Self { http, config })
    }

    pub fn config(&self) -> &GeminiConfig {
        &self.config
    }

    fn request_body(&self, prompt: &str) -> GenerateContentRequest<'static> {
        GenerateContentRequest {
            contents: vec![RequestContent {
                role: "user",
                parts: vec![RequestPart {
                    text: format!("{} {}", PROMPT_PREAMBLE, prompt),
                }],
            }],
            generation_config: GenerationConfig {
                temperature: self.config.temperature,
                top_k: self.config.top_k,
                top_p: self.config.top_p,
                max_output_tokens: self.config.max_output_tokens,
            },
        }
    }

    /// Map a non-success response to a typed error.
    fn classify_error(&self, status: StatusCode, body: &str) -> LlmError {
        let (message, api_status) = match serde_json::from_str::<ApiErrorBody>(body) {
            Ok(parsed) => (parsed.error.message, parsed.error.status),
            Err(_) if body.trim().is_empty() => (status.to_string(), None),
            Err(_) => (body.trim().to_string(), None),
        };

        if message.contains("API key not valid")
            || body.contains("API_KEY_INVALID")
            || status == StatusCode::UNAUTHORIZED
            || status == StatusCode::FORBIDDEN
        {
            return LlmError::InvalidCredentials(message);
        }

        if status == StatusCode::NOT_FOUND
            || message.contains("not found for API version")
            || api_status.as_deref() == Some("NOT_FOUND")
        {
            return LlmError::UnsupportedModel {
                model: self.config.model.clone(),
                message,
            };
        }

        LlmError::Api {
            status: status.as_u16(),
            message,
        }
    }
}

#[async_trait]
impl TextGenerator for GeminiClient {
    async fn generate(&self, prompt: &str) -> Result<String, LlmError> {
        let url = self.config.generate_url();
        debug!(model = %self.config.model, prompt_len = prompt.len(), "Calling Gemini");

        let response = self
            .http
            .post(&url)
            .header(API_KEY_HEADER, &self.config.api_key)
            .json(&self.request_body(prompt))
            .send()
            .await
            .map_err(|e| LlmError::Unreachable(e.to_string()))?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| LlmError::Unreachable(e.to_string()))?;

        if !status.is_success() {
            let err = self.classify_error(status, &body);
            warn!(status = status.as_u16(), error = %err, "Gemini request failed");
            return Err(err);
        }

        let parsed: GenerateContentResponse =
            serde_json::from_str(&body).map_err(|e| LlmError::MalformedResponse(e.to_string()))?;

        let text: String = parsed
            .candidates
            .into_iter()
            .next()
            .and_then(|candidate| candidate.content)
            .map(|content| {
                content
                    .parts
                    .into_iter()
                    .filter_map(|part| part.text)
                    .collect()
            })
            .unwrap_or_default();

        if text.trim().is_empty() {
            return Err(LlmError::EmptyResponse);
        }

        debug!(response_len = text.len(), "Gemini response received");
        Ok(text)
    }
}
