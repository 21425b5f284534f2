use anyhow::Result;
use async_trait::async_trait;
use bytes::Bytes;
use domain::{DomainError, RecordStorage};
use sqlx::{Pool, Sqlite, sqlite::SqlitePoolOptions};
use tracing::error;

/// Device records as rows of a single key-value table
#[derive(Clone)]
pub struct SqliteRecordStorage {
    pool: Pool<Sqlite>,
}

impl SqliteRecordStorage {
    pub async fn new(connection_string: &str) -> Result<Self> {
        let pool = SqlitePoolOptions::new()
            .max_connections(1) // SQLite is single-writer
            .connect(connection_string)
            .await?;

        // Initialize table
        sqlx::query(
            "CREATE TABLE IF NOT EXISTS device_records (
                id TEXT PRIMARY KEY NOT NULL,
                message BLOB NOT NULL
            )",
        )
        .execute(&pool)
        .await?;

        Ok(Self { pool })
    }
}

fn db_error(context: &str, e: sqlx::Error) -> DomainError {
    error!("{}: {}", context, e);
    DomainError::storage(context, e)
}

#[async_trait]
impl RecordStorage for SqliteRecordStorage {
    async fn get(&self, key: &str) -> Result<Option<Bytes>, DomainError> {
        let row: Option<Vec<u8>> =
            sqlx::query_scalar("SELECT message FROM device_records WHERE id = ?")
                .bind(key)
                .fetch_optional(&self.pool)
                .await
                .map_err(|e| db_error(&format!("Failed to read {key}"), e))?;

        Ok(row.map(Bytes::from))
    }

    async fn put(&self, key: &str, value: Bytes) -> Result<(), DomainError> {
        sqlx::query(
            "INSERT INTO device_records (id, message) VALUES (?, ?)
             ON CONFLICT(id) DO UPDATE SET message = excluded.message",
        )
        .bind(key)
        .bind(value.as_ref())
        .execute(&self.pool)
        .await
        .map_err(|e| db_error(&format!("Failed to write {key}"), e))?;
        Ok(())
    }

    async fn list(&self) -> Result<Vec<String>, DomainError> {
        sqlx::query_scalar("SELECT id FROM device_records ORDER BY id ASC")
            .fetch_all(&self.pool)
            .await
            .map_err(|e| db_error("Failed to list records", e))
    }
}
