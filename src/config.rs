//! Configuration management for promptdeck.
//!
//! This module provides a configuration system that supports:
//! - Command-line arguments via clap
//! - Environment variables with `PROMPTDECK_` (and `GEMINI_`) prefixes
//! - Sensible defaults for all optional settings
//!
//! # Subcommands
//!
//! - `serve` - Run the HTTP API
//! - `render` - Compile a local text or JSON file into a `.pptx` offline
//! - `history` - Print recent records from the history file
//!
//! # Environment Variables
//!
//! - `PROMPTDECK_HOST` - Server bind address (default: 0.0.0.0)
//! - `PROMPTDECK_PORT` - Server port (default: 5000)
//! - `PROMPTDECK_UPLOADS_DIR` - Directory for generated files (default: uploads)
//! - `PROMPTDECK_FILE_NAME` - Presentation file name (default: presentation.pptx)
//! - `PROMPTDECK_FIXED_FILE_NAME` - Overwrite one file instead of unique names
//! - `PROMPTDECK_HISTORY_FILE` - JSON Lines history log (default: data/chat_history.jsonl)
//! - `PROMPTDECK_MAX_LINES_PER_SLIDE` - Split long sections across slides
//! - `PROMPTDECK_CORS_ORIGINS` - Allowed origins, comma-separated
//! - `GEMINI_API_KEY` - Gemini API key (required for `serve`)
//! - `GEMINI_MODEL` - Model identifier
//! - `GEMINI_ENDPOINT` - API base URL
//! - `GEMINI_TIMEOUT_SECS` - Request timeout in seconds

use std::path::PathBuf;
use std::time::Duration;

use clap::{Args, Parser, Subcommand};
use url::Url;

use crate::deck::{DeckCompiler, LayoutDefaults};
use crate::llm::{GeminiConfig, DEFAULT_GEMINI_ENDPOINT, DEFAULT_GEMINI_MODEL};
use crate::pipeline::FileNaming;
use crate::pptx::{validate_file_name, DEFAULT_FILE_NAME};

// =============================================================================
// Default Values
// =============================================================================

/// Default server host.
pub const DEFAULT_HOST: &str = "0.0.0.0";

/// Default server port.
pub const DEFAULT_PORT: u16 = 5000;

/// Default directory for generated presentations.
pub const DEFAULT_UPLOADS_DIR: &str = "uploads";

/// Default history log location.
pub const DEFAULT_HISTORY_FILE: &str = "data/chat_history.jsonl";

/// Default allowed CORS origin (local frontend dev server).
pub const DEFAULT_CORS_ORIGIN: &str = "http://localhost:5173";

// =============================================================================
// CLI Arguments
// =============================================================================

/// promptdeck - Turn language-model answers into PowerPoint decks.
#[derive(Parser, Debug, Clone)]
#[command(name = "promptdeck")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

impl Cli {
    pub fn into_command(self) -> Command {
        self.command
    }
}

#[derive(Subcommand, Debug, Clone)]
pub enum Command {
    /// Run the HTTP API server
    Serve(ServeConfig),

    /// Compile a local text or JSON file into a presentation
    Render(RenderConfig),

    /// Print recent generation history
    History(HistoryConfig),
}

// =============================================================================
// Serve Command
// =============================================================================

#[derive(Args, Debug, Clone)]
pub struct ServeConfig {
    // =========================================================================
    // Server Configuration
    // =========================================================================
    /// Host address to bind the server to.
    #[arg(long, default_value = DEFAULT_HOST, env = "PROMPTDECK_HOST")]
    pub host: String,

    /// Port to listen on.
    #[arg(short, long, default_value_t = DEFAULT_PORT, env = "PROMPTDECK_PORT")]
    pub port: u16,

    // =========================================================================
    // Output Configuration
    // =========================================================================
    /// Directory where presentations are written (created if missing).
    #[arg(long, default_value = DEFAULT_UPLOADS_DIR, env = "PROMPTDECK_UPLOADS_DIR")]
    pub uploads_dir: PathBuf,

    /// Presentation file name; with unique naming this is the stem.
    #[arg(long, default_value = DEFAULT_FILE_NAME, env = "PROMPTDECK_FILE_NAME")]
    pub file_name: String,

    /// Write every request to the same file instead of a unique one.
    #[arg(long, default_value_t = false, env = "PROMPTDECK_FIXED_FILE_NAME")]
    pub fixed_file_name: bool,

    /// JSON Lines file recording every generation.
    #[arg(long, default_value = DEFAULT_HISTORY_FILE, env = "PROMPTDECK_HISTORY_FILE")]
    pub history_file: PathBuf,

    /// Split sections longer than this many lines across slides.
    #[arg(long, env = "PROMPTDECK_MAX_LINES_PER_SLIDE")]
    pub max_lines_per_slide: Option<usize>,

    // =========================================================================
    // Language Model Configuration
    // =========================================================================
    /// Gemini API key.
    #[arg(long, env = "GEMINI_API_KEY", hide_env_values = true)]
    pub gemini_api_key: String,

    /// Gemini model identifier.
    #[arg(long, default_value = DEFAULT_GEMINI_MODEL, env = "GEMINI_MODEL")]
    pub gemini_model: String,

    /// Gemini API base URL.
    #[arg(long, default_value = DEFAULT_GEMINI_ENDPOINT, env = "GEMINI_ENDPOINT")]
    pub gemini_endpoint: String,

    /// Sampling temperature (0.0-2.0).
    #[arg(long, default_value_t = 0.7)]
    pub temperature: f32,

    /// Top-k sampling.
    #[arg(long, default_value_t = 40)]
    pub top_k: u32,

    /// Nucleus sampling probability (0.0-1.0).
    #[arg(long, default_value_t = 0.95)]
    pub top_p: f32,

    /// Maximum tokens in a generated response.
    #[arg(long, default_value_t = 2048)]
    pub max_output_tokens: u32,

    /// Timeout for the language-model call in seconds (no timeout if unset).
    #[arg(long, env = "GEMINI_TIMEOUT_SECS")]
    pub llm_timeout_secs: Option<u64>,

    // =========================================================================
    // CORS Configuration
    // =========================================================================
    /// Allowed CORS origins (comma-separated). Use `*` to allow any origin.
    #[arg(
        long,
        env = "PROMPTDECK_CORS_ORIGINS",
        value_delimiter = ',',
        default_value = DEFAULT_CORS_ORIGIN
    )]
    pub cors_origins: Vec<String>,

    // =========================================================================
    // Logging Configuration
    // =========================================================================
    /// Enable verbose logging (debug level).
    #[arg(short, long, default_value_t = false)]
    pub verbose: bool,

    /// Disable request tracing.
    #[arg(long, default_value_t = false)]
    pub no_tracing: bool,
}

impl ServeConfig {
    /// Validate the configuration and return an error message if invalid.
    pub fn validate(&self) -> Result<(), String> {
        if self.gemini_api_key.trim().is_empty() {
            return Err(
                "Gemini API key is required. Set --gemini-api-key or GEMINI_API_KEY".to_string(),
            );
        }

        if self.gemini_model.trim().is_empty() {
            return Err("gemini_model must not be empty".to_string());
        }

        Url::parse(&self.gemini_endpoint)
            .map_err(|e| format!("Invalid Gemini endpoint '{}': {}", self.gemini_endpoint, e))?;

        validate_file_name(&self.file_name).map_err(|e| e.to_string())?;

        if !(0.0..=2.0).contains(&self.temperature) {
            return Err("temperature must be between 0.0 and 2.0".to_string());
        }
        if !(0.0..=1.0).contains(&self.top_p) {
            return Err("top_p must be between 0.0 and 1.0".to_string());
        }
        if self.top_k == 0 {
            return Err("top_k must be greater than 0".to_string());
        }
        if self.max_output_tokens == 0 {
            return Err("max_output_tokens must be greater than 0".to_string());
        }
        if self.llm_timeout_secs == Some(0) {
            return Err("llm_timeout_secs must be greater than 0".to_string());
        }
        if self.max_lines_per_slide == Some(0) {
            return Err("max_lines_per_slide must be greater than 0".to_string());
        }

        Ok(())
    }

    /// Get the server bind address as "host:port".
    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    /// Gemini client settings.
    pub fn gemini_config(&self) -> GeminiConfig {
        GeminiConfig {
            temperature: self.temperature,
            top_k: self.top_k,
            top_p: self.top_p,
            max_output_tokens: self.max_output_tokens,
            ..GeminiConfig::new(&self.gemini_api_key)
                .with_model(&self.gemini_model)
                .with_endpoint(&self.gemini_endpoint)
                .with_timeout(self.llm_timeout_secs.map(Duration::from_secs))
        }
    }

    pub fn compiler(&self) -> DeckCompiler {
        let layout = LayoutDefaults::default().with_max_lines_per_slide(self.max_lines_per_slide);
        DeckCompiler::new(layout)
    }

    pub fn file_naming(&self) -> FileNaming {
        if self.fixed_file_name {
            FileNaming::Fixed(self.file_name.clone())
        } else {
            FileNaming::unique_from(&self.file_name)
        }
    }

    /// CORS origins for the router; `None` allows any origin.
    pub fn cors_origins(&self) -> Option<Vec<String>> {
        if self.cors_origins.iter().any(|o| o.trim() == "*") {
            None
        } else {
            Some(
                self.cors_origins
                    .iter()
                    .map(|o| o.trim().to_string())
                    .filter(|o| !o.is_empty())
                    .collect(),
            )
        }
    }
}

// =============================================================================
// Render Command
// =============================================================================

#[derive(Args, Debug, Clone)]
pub struct RenderConfig {
    /// Input file: plain generated text, or a JSON generation result.
    pub input: PathBuf,

    /// Output directory (created if missing).
    #[arg(short, long, default_value = ".")]
    pub output_dir: PathBuf,

    /// Output file name.
    #[arg(long, default_value = DEFAULT_FILE_NAME)]
    pub file_name: String,

    /// Deck title (overrides any title in the input).
    #[arg(long)]
    pub title: Option<String>,

    /// Split sections longer than this many lines across slides.
    #[arg(long)]
    pub max_lines_per_slide: Option<usize>,

    /// Enable verbose logging (debug level).
    #[arg(short, long, default_value_t = false)]
    pub verbose: bool,
}

impl RenderConfig {
    pub fn validate(&self) -> Result<(), String> {
        validate_file_name(&self.file_name).map_err(|e| e.to_string())?;
        if self.max_lines_per_slide == Some(0) {
            return Err("max_lines_per_slide must be greater than 0".to_string());
        }
        Ok(())
    }

    pub fn compiler(&self) -> DeckCompiler {
        let layout = LayoutDefaults::default().with_max_lines_per_slide(self.max_lines_per_slide);
        DeckCompiler::new(layout)
    }
}

// =============================================================================
// History Command
// =============================================================================

#[derive(Args, Debug, Clone)]
pub struct HistoryConfig {
    /// JSON Lines history file.
    #[arg(long, default_value = DEFAULT_HISTORY_FILE, env = "PROMPTDECK_HISTORY_FILE")]
    pub history_file: PathBuf,

    /// Number of records to show (1-100).
    #[arg(short, long, default_value_t = 20)]
    pub limit: usize,

    /// Print records as JSON.
    #[arg(long, default_value_t = false)]
    pub json: bool,
}

// =============================================================================
// Tests
// =============================================================================
