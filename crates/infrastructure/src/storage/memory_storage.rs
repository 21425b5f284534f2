use async_trait::async_trait;
use bytes::Bytes;
use domain::{DomainError, RecordStorage};
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;

/// Process-local backend. Clones share the same map.
#[derive(Clone, Default)]
pub struct InMemoryRecordStorage {
    records: Arc<RwLock<HashMap<String, Bytes>>>,
}

impl InMemoryRecordStorage {
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
impl RecordStorage for InMemoryRecordStorage {
    async fn get(&self, key: &str) -> Result<Option<Bytes>, DomainError> {
        Ok(self.records.read().await.get(key).cloned())
    }

    async fn put(&self, key: &str, value: Bytes) -> Result<(), DomainError> {
        self.records.write().await.insert(key.to_string(), value);
        Ok(())
    }

    async fn list(&self) -> Result<Vec<String>, DomainError> {
        Ok(self.records.read().await.keys().cloned().collect())
    }
}
