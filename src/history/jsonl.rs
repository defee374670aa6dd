//! Append-only JSON Lines history file.

use std::io::SeekFrom;
use std::path::{Path, PathBuf};

use async_trait::async_trait;
use tokio::io::{AsyncReadExt, AsyncSeekExt, AsyncWriteExt};
use tokio::sync::Mutex;
use tracing::{debug, warn};

use super::{next_id, ChatRecord, HistoryStore, NewChatRecord};
use crate::error::StoreError;

/// Bytes read per step when scanning the log from its end.
const READ_CHUNK_SIZE: u64 = 64 * 1024;

/// History stored as one JSON document per line.
///
/// Appends are serialized through a mutex so concurrent requests never
/// interleave partial lines. Lines that fail to parse are skipped on read.
#[derive(Debug)]
pub struct JsonlHistoryStore {
    path: PathBuf,
    write_lock: Mutex<()>,
}

impl JsonlHistoryStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            write_lock: Mutex::new(()),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Read up to `limit` records, newest first.
    ///
    /// The file is scanned backwards in fixed-size chunks and stops once
    /// `limit` records are parsed, so the cost follows the page size rather
    /// than the length of the log.
    async fn read_recent(&self, limit: usize) -> Result<Vec<ChatRecord>, StoreError> {
        let mut file = match tokio::fs::File::open(&self.path).await {
            Ok(file) => file,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(Vec::new()),
            Err(e) => return Err(e.into()),
        };

        // `pending` holds the bytes from file offset `pos` up to the last
        // line not yet consumed.
        let mut pos = file.metadata().await?.len();
        let mut pending: Vec<u8> = Vec::new();
        let mut records = Vec::new();

        while records.len() < limit {
            if let Some(newline) = pending.iter().rposition(|&b| b == b'\n') {
                let line = pending.split_off(newline + 1);
                pending.truncate(newline);
                self.push_line(&line, pos + newline as u64 + 1, &mut records);
                continue;
            }
            if pos == 0 {
                self.push_line(&pending, 0, &mut records);
                break;
            }

            let start = pos.saturating_sub(READ_CHUNK_SIZE);
            let mut chunk = vec![0u8; (pos - start) as usize];
            file.seek(SeekFrom::Start(start)).await?;
            file.read_exact(&mut chunk).await?;
            chunk.extend_from_slice(&pending);
            pending = chunk;
            pos = start;
        }

        Ok(records)
    }

    fn push_line(&self, line: &[u8], offset: u64, records: &mut Vec<ChatRecord>) {
        if line.iter().all(u8::is_ascii_whitespace) {
            return;
        }
        match serde_json::from_slice::<ChatRecord>(line) {
            Ok(record) => records.push(record),
            Err(e) => warn!(
                path = %self.path.display(),
                offset,
                error = %e,
                "Skipping corrupt history line"
            ),
        }
    }
}

#[async_trait]
impl HistoryStore for JsonlHistoryStore {
    async fn append(&self, record: NewChatRecord) -> Result<String, StoreError> {
        let id = next_id();
        let mut line = serde_json::to_string(&ChatRecord::from_new(id.clone(), record))?;
        line.push('\n');

        let _guard = self.write_lock.lock().await;

        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                tokio::fs::create_dir_all(parent).await?;
            }
        }

        let mut file = tokio::fs::OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)
            .await?;
        file.write_all(line.as_bytes()).await?;
        file.flush().await?;

        debug!(id = %id, path = %self.path.display(), "History record appended");
        Ok(id)
    }

    async fn list_recent(&self, limit: usize) -> Result<Vec<ChatRecord>, StoreError> {
        self.read_recent(limit).await
    }
}
