//! Generation service orchestrating one prompt-to-presentation request.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────┐
//! │                      GenerationService                          │
//! │  ┌─────────────────────────────────────────────────────────┐    │
//! │  │                     generate()                          │    │
//! │  │  1. Validate prompt    4. Compile deck                  │    │
//! │  │  2. Call generator     5. Write .pptx                   │    │
//! │  │  3. Build result       6. Append history record         │    │
//! │  └─────────────────────────────────────────────────────────┘    │
//! │        │                  │                  │                  │
//! │        ▼                  ▼                  ▼                  │
//! │  ┌─────────────┐   ┌──────────────┐   ┌──────────────┐          │
//! │  │TextGenerator│   │ DeckCompiler │   │ HistoryStore │          │
//! │  └─────────────┘   │  DeckWriter  │   └──────────────┘          │
//! │                    └──────────────┘                             │
//! └─────────────────────────────────────────────────────────────────┘
//! ```

use std::path::PathBuf;

use chrono::Utc;
use tracing::{debug, info};

use super::naming::FileNaming;
use crate::deck::{DeckCompiler, GenerationResult};
use crate::error::{GenerateError, LlmError};
use crate::history::{
    ChatRecord, HistoryStore, NewChatRecord, DEFAULT_HISTORY_LIMIT, MAX_HISTORY_LIMIT,
};
use crate::llm::TextGenerator;
use crate::pptx::DeckWriter;

// =============================================================================
// Generation Outcome
// =============================================================================

/// Result of a successful generation request.
#[derive(Debug, Clone)]
pub struct GenerationOutcome {
    /// Absolute path of the written presentation
    pub ppt_path: PathBuf,

    /// The structured result the deck was compiled from
    pub slide_data: GenerationResult,

    /// Id of the appended history record
    pub record_id: String,

    /// Raw generated text
    pub response: String,
}

// =============================================================================
// Generation Service
// =============================================================================

/// Runs the prompt → text → deck → file → record pipeline.
///
/// Generic over its two collaborators so tests can inject doubles.
pub struct GenerationService<G: TextGenerator, H: HistoryStore> {
    generator: G,
    history: H,
    compiler: DeckCompiler,
    writer: DeckWriter,
    naming: FileNaming,
}

impl<G: TextGenerator, H: HistoryStore> GenerationService<G, H> {
    /// Create a service with default layout and fixed file naming.
    pub fn new(generator: G, history: H, writer: DeckWriter) -> Self {
        let naming = FileNaming::Fixed(writer.default_file_name().to_string());
        Self {
            generator,
            history,
            compiler: DeckCompiler::default(),
            writer,
            naming,
        }
    }

    pub fn with_compiler(mut self, compiler: DeckCompiler) -> Self {
        self.compiler = compiler;
        self
    }

    pub fn with_naming(mut self, naming: FileNaming) -> Self {
        self.naming = naming;
        self
    }

    pub fn generator(&self) -> &G {
        &self.generator
    }

    pub fn history_store(&self) -> &H {
        &self.history
    }

    pub fn writer(&self) -> &DeckWriter {
        &self.writer
    }

    /// Turn a prompt into a written presentation and a history record.
    ///
    /// A blank prompt fails with `InvalidInput` before the generator is
    /// called. A file written before a failed history append is left on disk.
    pub async fn generate(&self, prompt: &str) -> Result<GenerationOutcome, GenerateError> {
        if prompt.trim().is_empty() {
            return Err(GenerateError::invalid_input("Prompt is required"));
        }

        let response = self.generator.generate(prompt).await?;
        if response.trim().is_empty() {
            return Err(LlmError::EmptyResponse.into());
        }
        debug!(response_len = response.len(), "Generated response");

        let created_at = Utc::now();
        let slide_data = GenerationResult::from_response_text(
            &response,
            &self.compiler.layout().fallback_heading,
        )
        .with_timestamp(created_at);

        let deck = self.compiler.compile(&slide_data);
        let slide_count = deck.slide_count();

        let file_name = self.naming.next_file_name();
        let ppt_path = self.writer.write(deck, Some(&file_name)).await?;

        let record_id = self
            .history
            .append(NewChatRecord {
                prompt: prompt.to_string(),
                response: response.clone(),
                ppt_path: ppt_path.clone(),
                slide_data: slide_data.clone(),
                created_at,
            })
            .await?;

        info!(
            record_id = %record_id,
            slides = slide_count,
            path = %ppt_path.display(),
            "Presentation generated"
        );

        Ok(GenerationOutcome {
            ppt_path,
            slide_data,
            record_id,
            response,
        })
    }

    /// Most recent history records, newest first.
    pub async fn history(&self, limit: Option<usize>) -> Result<Vec<ChatRecord>, GenerateError> {
        let limit = clamp_history_limit(limit);
        Ok(self.history.list_recent(limit).await?)
    }
}

/// Clamp a requested history size to `1..=MAX_HISTORY_LIMIT`.
pub fn clamp_history_limit(limit: Option<usize>) -> usize {
    limit
        .unwrap_or(DEFAULT_HISTORY_LIMIT)
        .clamp(1, MAX_HISTORY_LIMIT)
}
