pub mod file_key;
mod file_storage;
mod memory_storage;
mod sqlite_storage;

pub use file_storage::FileRecordStorage;
pub use memory_storage::InMemoryRecordStorage;
pub use sqlite_storage::SqliteRecordStorage;

use crate::config::{StorageBackend, StorageConfig};
use anyhow::Result;
use domain::RecordStorage;
use std::sync::Arc;
use tracing::{info, warn};

/// Factory for creating the configured storage backend
pub struct StorageFactory;

impl StorageFactory {
    pub async fn create(config: &StorageConfig) -> Result<Arc<dyn RecordStorage>> {
        match config.backend {
            StorageBackend::File => {
                let storage = FileRecordStorage::new(&config.data_dir).await?;
                Ok(Arc::new(storage) as Arc<dyn RecordStorage>)
            }
            StorageBackend::Sqlite => {
                info!("💾 Connecting to Storage: {}", config.sqlite_url);
                let storage = SqliteRecordStorage::new(&config.sqlite_url).await?;
                Ok(Arc::new(storage) as Arc<dyn RecordStorage>)
            }
            StorageBackend::Memory => {
                warn!("In-memory storage selected; device records are lost on shutdown");
                Ok(Arc::new(InMemoryRecordStorage::new()) as Arc<dyn RecordStorage>)
            }
        }
    }
}
