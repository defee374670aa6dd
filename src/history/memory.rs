use async_trait::async_trait;
use tokio::sync::RwLock;

use super::{next_id, ChatRecord, HistoryStore, NewChatRecord};
use crate::error::StoreError;

/// History kept in memory for the lifetime of the process.
#[derive(Debug, Default)]
pub struct MemoryHistoryStore {
    records: RwLock<Vec<ChatRecord>>,
}

impl MemoryHistoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn len(&self) -> usize {
        self.records.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.records.read().await.is_empty()
    }
}

#[async_trait]
impl HistoryStore for MemoryHistoryStore {
    async fn append(&self, record: NewChatRecord) -> Result<String, StoreError> {
        let id = next_id();
        self.records
            .write()
            .await
            .push(ChatRecord::from_new(id.clone(), record));
        Ok(id)
    }

    async fn list_recent(&self, limit: usize) -> Result<Vec<ChatRecord>, StoreError> {
        let records = self.records.read().await;
        Ok(records.iter().rev().take(limit).cloned().collect())
    }
}
