//! HTTP request handlers for the chat API.
//!
//! # Endpoints
//!
//! - `POST /api/chat` - Generate a presentation from a prompt
//! - `GET /api/chat/history` - Recent generations, newest first
//! - `GET /health` - Health check endpoint

use std::path::PathBuf;
use std::sync::Arc;

use axum::{
    extract::{
        rejection::{JsonRejection, QueryRejection},
        Query, State,
    },
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};
use tracing::{debug, error, warn};

use crate::deck::GenerationResult;
use crate::error::{ErrorKind, GenerateError};
use crate::history::{ChatRecord, HistoryStore};
use crate::llm::TextGenerator;
use crate::pipeline::GenerationService;

/// Message returned with every successful generation.
pub const SUCCESS_MESSAGE: &str = "PPT generated successfully";

// =============================================================================
// Application State
// =============================================================================

/// Shared application state containing the generation service.
pub struct AppState<G: TextGenerator, H: HistoryStore> {
    pub service: Arc<GenerationService<G, H>>,
}

impl<G: TextGenerator, H: HistoryStore> AppState<G, H> {
    pub fn new(service: GenerationService<G, H>) -> Self {
        Self {
            service: Arc::new(service),
        }
    }
}

impl<G: TextGenerator, H: HistoryStore> Clone for AppState<G, H> {
    fn clone(&self) -> Self {
        Self {
            service: Arc::clone(&self.service),
        }
    }
}

// =============================================================================
// Request Parameters
// =============================================================================

/// Body of `POST /api/chat`.
///
/// `message` is accepted as an alias of `prompt` for older clients.
#[derive(Debug, Deserialize)]
pub struct ChatRequest {
    #[serde(default)]
    pub prompt: Option<String>,

    #[serde(default)]
    pub message: Option<String>,
}

impl ChatRequest {
    /// The prompt text, preferring a non-blank `prompt` over `message`.
    pub fn prompt_text(&self) -> &str {
        self.prompt
            .as_deref()
            .filter(|p| !p.trim().is_empty())
            .or(self.message.as_deref())
            .unwrap_or_default()
    }
}

/// Query parameters for the history endpoint.
#[derive(Debug, Deserialize)]
pub struct HistoryQueryParams {
    /// Maximum number of records (default: 20, clamped to 1-100)
    #[serde(default)]
    pub limit: Option<usize>,
}

// =============================================================================
// Response Types
// =============================================================================

/// JSON error response returned for all error conditions.
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    /// Always `false`
    pub success: bool,

    /// Short description of what failed
    pub error: String,

    /// Underlying cause
    pub details: String,

    /// Error class identifier (e.g., "invalid_input", "upstream_failure")
    pub code: String,
}

/// Successful `POST /api/chat` response.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ChatResponse {
    pub success: bool,
    pub message: String,
    pub ppt_path: PathBuf,
    pub slide_data: GenerationResult,
    pub chat_id: String,
    pub response: String,
}

/// Successful `GET /api/chat/history` response.
#[derive(Debug, Serialize)]
pub struct HistoryResponse {
    pub success: bool,
    pub data: Vec<ChatRecord>,
    pub count: usize,
}

/// Health check response.
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    /// Service status
    pub status: String,

    /// Service version
    pub version: String,
}

// =============================================================================
// Error Mapping
// =============================================================================

/// Convert GenerateError to HTTP response.
///
/// - 4xx errors are logged at WARN level (client errors)
/// - 5xx errors are logged at ERROR level (server errors)
impl IntoResponse for GenerateError {
    fn into_response(self) -> Response {
        let kind = self.kind();
        let (status, summary) = match kind {
            ErrorKind::InvalidInput => (StatusCode::BAD_REQUEST, "Invalid request"),
            ErrorKind::UpstreamFailure => (
                StatusCode::INTERNAL_SERVER_ERROR,
                "Failed to generate response",
            ),
            ErrorKind::IoFailure => (
                StatusCode::INTERNAL_SERVER_ERROR,
                "Failed to process chat request",
            ),
        };
        let details = self.to_string();

        if status.is_server_error() {
            error!(
                error_type = kind.as_str(),
                status = status.as_u16(),
                "Server error: {}",
                details
            );
        } else {
            warn!(
                error_type = kind.as_str(),
                status = status.as_u16(),
                "Client error: {}",
                details
            );
        }

        let body = ErrorResponse {
            success: false,
            error: summary.to_string(),
            details,
            code: kind.as_str().to_string(),
        };

        (status, Json(body)).into_response()
    }
}

// =============================================================================
// Handlers
// =============================================================================

/// Handle chat requests.
///
/// # Endpoint
///
/// `POST /api/chat`
///
/// # Request
///
/// ```json
/// { "prompt": "explain recursion" }
/// ```
///
/// # Response
///
/// - `200 OK`: `{success, message, pptPath, slideData, chatId, response}`
/// - `400 Bad Request`: Missing prompt or malformed body
/// - `500 Internal Server Error`: Model, rendering or history failure
pub async fn chat_handler<G, H>(
    State(state): State<AppState<G, H>>,
    body: Result<Json<ChatRequest>, JsonRejection>,
) -> Result<Json<ChatResponse>, GenerateError>
where
    G: TextGenerator + 'static,
    H: HistoryStore + 'static,
{
    let Json(request) = body.map_err(|rejection| {
        GenerateError::invalid_input(format!("Invalid request body: {}", rejection.body_text()))
    })?;

    let outcome = state.service.generate(request.prompt_text()).await?;

    Ok(Json(ChatResponse {
        success: true,
        message: SUCCESS_MESSAGE.to_string(),
        ppt_path: outcome.ppt_path,
        slide_data: outcome.slide_data,
        chat_id: outcome.record_id,
        response: outcome.response,
    }))
}

/// Handle history requests.
///
/// # Endpoint
///
/// `GET /api/chat/history?limit=20`
pub async fn history_handler<G, H>(
    State(state): State<AppState<G, H>>,
    query: Result<Query<HistoryQueryParams>, QueryRejection>,
) -> Result<Json<HistoryResponse>, GenerateError>
where
    G: TextGenerator + 'static,
    H: HistoryStore + 'static,
{
    let Query(params) = query.map_err(|rejection| {
        GenerateError::invalid_input(format!("Invalid query: {}", rejection.body_text()))
    })?;

    let records = state.service.history(params.limit).await?;
    debug!(count = records.len(), "History listed");

    Ok(Json(HistoryResponse {
        success: true,
        count: records.len(),
        data: records,
    }))
}

/// Handle health check requests.
///
/// # Endpoint
///
/// `GET /health`
///
/// # Response
///
/// `200 OK` with JSON body:
/// ```json
/// {
///   "status": "healthy",
///   "version": "0.1.0"
/// }
/// ```
pub async fn health_handler() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "healthy".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
    })
}
