use async_trait::async_trait;
use bytes::Bytes;
use domain::{DomainError, RecordStorage};
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicU64, Ordering};
use tokio::fs;
use tracing::{debug, error, info};

use super::file_key;

const EXTENSION: &str = ".txt";

/// One `<encoded-id>.txt` file per device, holding only the message.
///
/// Writes land in a dot-prefixed temp file first and are renamed over the
/// target, so readers see either the old or the new value.
pub struct FileRecordStorage {
    dir: PathBuf,
    tmp_counter: AtomicU64,
}

impl FileRecordStorage {
    /// Open (creating if needed) the data directory
    pub async fn new(dir: impl Into<PathBuf>) -> Result<Self, DomainError> {
        let dir = dir.into();
        fs::create_dir_all(&dir).await.map_err(|e| {
            error!("Failed to create data directory {:?}: {}", dir, e);
            DomainError::storage(format!("Failed to create {}", dir.display()), e)
        })?;
        info!("📂 Device records stored in {:?}", dir);

        Ok(Self {
            dir,
            tmp_counter: AtomicU64::new(0),
        })
    }

    pub fn data_dir(&self) -> &Path {
        &self.dir
    }

    fn path_for(&self, key: &str) -> PathBuf {
        self.dir.join(format!("{}{}", file_key::encode(key), EXTENSION))
    }

    fn temp_path(&self) -> PathBuf {
        let n = self.tmp_counter.fetch_add(1, Ordering::Relaxed);
        self.dir.join(format!(".tmp-{}-{}", std::process::id(), n))
    }
}

#[async_trait]
impl RecordStorage for FileRecordStorage {
    async fn get(&self, key: &str) -> Result<Option<Bytes>, DomainError> {
        let path = self.path_for(key);
        match fs::read(&path).await {
            Ok(data) => Ok(Some(Bytes::from(data))),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(e) => {
                error!("Failed to read record file {:?}: {}", path, e);
                Err(DomainError::storage(format!("Failed to read {key}"), e))
            }
        }
    }

    async fn put(&self, key: &str, value: Bytes) -> Result<(), DomainError> {
        let path = self.path_for(key);
        let tmp = self.temp_path();

        if let Err(e) = fs::write(&tmp, &value).await {
            error!("Failed to write record file {:?}: {}", tmp, e);
            let _ = fs::remove_file(&tmp).await;
            return Err(DomainError::storage(format!("Failed to write {key}"), e));
        }

        if let Err(e) = fs::rename(&tmp, &path).await {
            error!("Failed to move {:?} into place at {:?}: {}", tmp, path, e);
            let _ = fs::remove_file(&tmp).await;
            return Err(DomainError::storage(format!("Failed to write {key}"), e));
        }

        debug!(path = ?path, bytes = value.len(), "Record file replaced");
        Ok(())
    }

    async fn list(&self) -> Result<Vec<String>, DomainError> {
        let mut entries = match fs::read_dir(&self.dir).await {
            Ok(entries) => entries,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(Vec::new()),
            Err(e) => {
                error!("Failed to list data directory {:?}: {}", self.dir, e);
                return Err(DomainError::storage("Failed to list records", e));
            }
        };

        let mut keys = Vec::new();
        loop {
            let entry = match entries.next_entry().await {
                Ok(Some(entry)) => entry,
                Ok(None) => break,
                Err(e) => return Err(DomainError::storage("Failed to list records", e)),
            };

            let is_file = entry
                .file_type()
                .await
                .map(|t| t.is_file())
                .unwrap_or(false);
            if !is_file {
                continue;
            }

            let file_name = entry.file_name();
            let Some(name) = file_name.to_str() else {
                continue;
            };
            if name.starts_with('.') {
                continue;
            }
            let Some(stem) = name.strip_suffix(EXTENSION) else {
                continue;
            };

            match file_key::decode(stem) {
                Some(key) if !key.is_empty() => keys.push(key),
                _ => debug!(file = %name, "Skipping file that is not a device record"),
            }
        }

        Ok(keys)
    }
}
