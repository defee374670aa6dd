//! HTTP server layer.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────┐
//! │                         HTTP Layer                              │
//! │        POST /api/chat     GET /api/chat/history                 │
//! │                                                                 │
//! │  ┌──────────────────────────┐  ┌─────────────────────────────┐  │
//! │  │        handlers          │  │          routes             │  │
//! │  │ (requests, error bodies) │  │  (router, CORS, tracing)    │  │
//! │  └──────────────────────────┘  └─────────────────────────────┘  │
//! └─────────────────────────────────────────────────────────────────┘
//! ```

pub mod handlers;
pub mod routes;

pub use handlers::{
    chat_handler, health_handler, history_handler, AppState, ChatRequest, ChatResponse,
    ErrorResponse, HealthResponse, HistoryQueryParams, HistoryResponse, SUCCESS_MESSAGE,
};
pub use routes::{create_router, RouterConfig};
