//! Durable log of prompts, responses, and generated presentations.
//!
//! Two stores implement [`HistoryStore`]:
//!
//! - [`JsonlHistoryStore`]: one JSON document per line in an append-only file
//! - [`MemoryHistoryStore`]: a process-local vector, used in tests and for
//!   running without persistence

mod jsonl;
mod memory;

pub use jsonl::JsonlHistoryStore;
pub use memory::MemoryHistoryStore;

use std::path::PathBuf;
use std::sync::atomic::{AtomicU64, Ordering};

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::deck::GenerationResult;
use crate::error::StoreError;

/// Default number of records returned by a history query.
pub const DEFAULT_HISTORY_LIMIT: usize = 20;

/// Upper bound on a single history query.
pub const MAX_HISTORY_LIMIT: usize = 100;

// =============================================================================
// Records
// =============================================================================

/// A record ready to be appended; the store assigns the id.
#[derive(Debug, Clone, PartialEq)]
pub struct NewChatRecord {
    pub prompt: String,
    pub response: String,
    pub ppt_path: PathBuf,
    pub slide_data: GenerationResult,
    pub created_at: DateTime<Utc>,
}

/// A persisted history entry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChatRecord {
    pub id: String,
    pub prompt: String,
    pub response: String,
    pub ppt_path: PathBuf,
    pub slide_data: GenerationResult,
    pub created_at: DateTime<Utc>,
}

impl ChatRecord {
    pub fn from_new(id: String, record: NewChatRecord) -> Self {
        Self {
            id,
            prompt: record.prompt,
            response: record.response,
            ppt_path: record.ppt_path,
            slide_data: record.slide_data,
            created_at: record.created_at,
        }
    }
}

// =============================================================================
// HistoryStore Trait
// =============================================================================

/// Append-only record log.
#[async_trait]
pub trait HistoryStore: Send + Sync {
    /// Append a record and return its assigned id.
    async fn append(&self, record: NewChatRecord) -> Result<String, StoreError>;

    /// Up to `limit` records, most recent first.
    async fn list_recent(&self, limit: usize) -> Result<Vec<ChatRecord>, StoreError>;
}

static ID_COUNTER: AtomicU64 = AtomicU64::new(0);

/// Process-unique identifier: a millisecond timestamp plus a counter.
///
/// Sorts by creation time across restarts; the counter disambiguates ids
/// minted within the same millisecond.
pub fn next_id() -> String {
    let seq = ID_COUNTER.fetch_add(1, Ordering::Relaxed) % 10_000;
    format!("{}-{:04}", Utc::now().format("%Y%m%d%H%M%S%3f"), seq)
}
