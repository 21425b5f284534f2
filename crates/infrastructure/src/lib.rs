//! Infrastructure layer - Storage backends and configuration

pub mod config;
pub mod storage;

pub use config::{HttpConfig, ServerConfig, StorageBackend, StorageConfig};
pub use storage::{FileRecordStorage, InMemoryRecordStorage, SqliteRecordStorage, StorageFactory};
