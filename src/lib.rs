//! # promptdeck
//!
//! Turns language-model answers into PowerPoint slide decks.
//!
//! A prompt goes to a language model; the generated text is laid out into a
//! deck (a title slide plus content slides with positioned bullet lines),
//! written as a `.pptx` file, and recorded in an append-only history log.
//!
//! ## Architecture
//!
//! The library is organized into several modules:
//!
//! - [`deck`] - Slide model, layout defaults and the text-to-deck compiler
//! - [`pptx`] - Office Open XML rendering and file output
//! - [`llm`] - Language-model capability and the Gemini client
//! - [`history`] - History record stores
//! - [`pipeline`] - Request orchestration
//! - [`server`] - Axum-based HTTP server and routes
//! - [`config`] - CLI and configuration types
//!
//! ## Example
//!
//! ```rust,no_run
//! use promptdeck::{DeckCompiler, GenerationResult};
//!
//! #[tokio::main]
//! async fn main() {
//!     let result = GenerationResult::from_response_text("First\nSecond", "AI Response");
//!     let deck = DeckCompiler::default().compile(&result);
//!
//!     let path = promptdeck::pptx::serialize(deck, std::path::Path::new("uploads"), None)
//!         .await
//!         .unwrap();
//!     println!("wrote {}", path.display());
//! }
//! ```

pub mod config;
pub mod deck;
pub mod error;
pub mod history;
pub mod llm;
pub mod pipeline;
pub mod pptx;
pub mod server;

// Re-export commonly used types
pub use config::{Cli, Command, HistoryConfig, RenderConfig, ServeConfig};
pub use deck::{
    Deck, DeckCompiler, GenerationResult, LayoutDefaults, Section, Slide, SlideRole, TextBlock,
    TextRole, DEFAULT_RESPONSE_HEADING,
};
pub use error::{DeckError, ErrorKind, GenerateError, LlmError, StoreError};
pub use history::{ChatRecord, HistoryStore, JsonlHistoryStore, MemoryHistoryStore, NewChatRecord};
pub use llm::{GeminiClient, GeminiConfig, TextGenerator};
pub use pipeline::{
    clamp_history_limit, parse_input, FileNaming, GenerationOutcome, GenerationService,
};
pub use pptx::{render_deck, serialize, DeckWriter};
pub use server::{create_router, AppState, RouterConfig};
