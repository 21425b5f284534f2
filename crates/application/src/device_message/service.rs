use bytes::Bytes;
use dashmap::DashMap;
use std::sync::Arc;
use tokio::sync::{Mutex, OwnedMutexGuard};
use tracing::{debug, info};

use domain::{DeviceId, DeviceRecord, DomainError, Message, RecordState, RecordStorage};

/// Get / Set / ListIds over a [`RecordStorage`] backend.
///
/// Every operation on an id runs under that id's async mutex, so the
/// read-then-create of a first `get_message` cannot interleave with a
/// concurrent `set_message` for the same device. Different ids never contend.
pub struct DeviceMessageService {
    storage: Arc<dyn RecordStorage>,
    // Map device_id -> lock serialising access to its record
    locks: DashMap<DeviceId, Arc<Mutex<()>>>,
}

/// Holds an id's lock; the map entry goes away with the last holder.
struct RecordGuard<'a> {
    locks: &'a DashMap<DeviceId, Arc<Mutex<()>>>,
    id: DeviceId,
    guard: Option<OwnedMutexGuard<()>>,
}

impl Drop for RecordGuard<'_> {
    fn drop(&mut self) {
        self.guard.take();
        // Entry lookups and this check share the shard lock, so a waiter
        // always keeps the count above one.
        self.locks.remove_if(&self.id, |_, lock| Arc::strong_count(lock) == 1);
    }
}

impl DeviceMessageService {
    pub fn new(storage: Arc<dyn RecordStorage>) -> Self {
        Self {
            storage,
            locks: DashMap::new(),
        }
    }

    async fn lock_record(&self, id: &DeviceId) -> RecordGuard<'_> {
        let lock = self
            .locks
            .entry(id.clone())
            .or_insert_with(|| Arc::new(Mutex::new(())))
            .clone();

        // Built before waiting so a cancelled wait still prunes the entry
        let mut record_guard = RecordGuard {
            locks: &self.locks,
            id: id.clone(),
            guard: None,
        };
        record_guard.guard = Some(lock.lock_owned().await);
        record_guard
    }

    /// Current message for `id`, creating the record with the sentinel
    /// default on first access.
    pub async fn get_message(&self, id: &DeviceId) -> Result<Message, DomainError> {
        let _guard = self.lock_record(id).await;

        let stored = self.storage.get(id.as_str()).await?;
        let (record, created) = RecordState::resolve(id.clone(), stored.as_deref()).initialize();

        if created {
            self.storage
                .put(id.as_str(), Bytes::copy_from_slice(record.message.as_bytes()))
                .await?;
            info!(device_id = %id, "🆕 Record created with default message");
        }

        debug!(device_id = %id, message = %record.message, "Record read");
        Ok(record.message)
    }

    /// Validate and store `message` as the complete new value for `id`.
    ///
    /// Both inputs are trimmed first; blank input is rejected before the
    /// backend is touched. Returns the accepted record so callers can echo it.
    pub async fn set_message(&self, id: &str, message: &str) -> Result<DeviceRecord, DomainError> {
        let id = DeviceId::new(id)?;
        let message = Message::new(message)?;

        let _guard = self.lock_record(&id).await;

        self.storage
            .put(id.as_str(), Bytes::copy_from_slice(message.as_bytes()))
            .await?;

        info!(device_id = %id, message = %message, "✅ Record updated");
        Ok(DeviceRecord::new(id, message))
    }

    /// Every id with a persisted record, sorted
    pub async fn list_ids(&self) -> Result<Vec<String>, DomainError> {
        let mut ids = self.storage.list().await?;
        ids.sort();
        Ok(ids)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use domain::MockRecordStorage;

    fn id(raw: &str) -> DeviceId {
        DeviceId::new(raw).unwrap()
    }

    #[tokio::test]
    async fn test_get_missing_record_persists_sentinel_once() {
        let mut storage = MockRecordStorage::new();
        storage
            .expect_get()
            .withf(|key| key == "device1")
            .times(1)
            .returning(|_| Ok(None));
        storage
            .expect_put()
            .withf(|key, value| {
                key == "device1" && value == &Bytes::from_static(b"0000000000 000")
            })
            .times(1)
            .returning(|_, _| Ok(()));

        let service = DeviceMessageService::new(Arc::new(storage));
        let message = service.get_message(&id("device1")).await.unwrap();

        assert_eq!(message.as_str(), "0000000000 000");
    }

    #[tokio::test]
    async fn test_get_existing_record_does_not_write() {
        let mut storage = MockRecordStorage::new();
        storage
            .expect_get()
            .returning(|_| Ok(Some(Bytes::from_static(b" 0741842196 100\n"))));
        storage.expect_put().never();

        let service = DeviceMessageService::new(Arc::new(storage));
        let message = service.get_message(&id("device1")).await.unwrap();

        assert_eq!(message.as_str(), "0741842196 100");
    }

    #[tokio::test]
    async fn test_get_read_failure_propagates() {
        let mut storage = MockRecordStorage::new();
        storage
            .expect_get()
            .returning(|_| Err(DomainError::StorageUnavailable("disk gone".to_string())));
        storage.expect_put().never();

        let service = DeviceMessageService::new(Arc::new(storage));
        let err = service.get_message(&id("device1")).await.unwrap_err();

        assert_eq!(err, DomainError::StorageUnavailable("disk gone".to_string()));
    }

    #[tokio::test]
    async fn test_get_initialization_write_failure_propagates() {
        let mut storage = MockRecordStorage::new();
        storage.expect_get().returning(|_| Ok(None));
        storage
            .expect_put()
            .returning(|_, _| Err(DomainError::StorageUnavailable("read-only".to_string())));

        let service = DeviceMessageService::new(Arc::new(storage));
        let err = service.get_message(&id("device1")).await.unwrap_err();

        assert!(matches!(err, DomainError::StorageUnavailable(_)));
    }

    #[tokio::test]
    async fn test_set_trims_before_storing() {
        let mut storage = MockRecordStorage::new();
        storage
            .expect_put()
            .withf(|key, value| {
                key == "device1" && value == &Bytes::from_static(b"0741842196 100")
            })
            .times(1)
            .returning(|_, _| Ok(()));

        let service = DeviceMessageService::new(Arc::new(storage));
        let record = service
            .set_message(" device1 ", " 0741842196 100 ")
            .await
            .unwrap();

        assert_eq!(record.id.as_str(), "device1");
        assert_eq!(record.message.as_str(), "0741842196 100");
    }

    #[tokio::test]
    async fn test_set_invalid_input_never_touches_storage() {
        let mut storage = MockRecordStorage::new();
        storage.expect_get().never();
        storage.expect_put().never();
        let service = DeviceMessageService::new(Arc::new(storage));

        let cases = [
            ("", "hello"),
            ("  ", "hello"),
            ("device1", ""),
            ("device1", " \t "),
        ];
        for (raw_id, raw_message) in cases {
            let err = service.set_message(raw_id, raw_message).await.unwrap_err();
            assert!(
                matches!(err, DomainError::InvalidInput(_)),
                "expected InvalidInput for ({raw_id:?}, {raw_message:?}), got {err:?}"
            );
        }
    }

    #[tokio::test]
    async fn test_set_write_failure_propagates() {
        let mut storage = MockRecordStorage::new();
        storage
            .expect_put()
            .returning(|_, _| Err(DomainError::StorageUnavailable("disk full".to_string())));

        let service = DeviceMessageService::new(Arc::new(storage));
        let err = service.set_message("device1", "hi").await.unwrap_err();

        assert_eq!(err, DomainError::StorageUnavailable("disk full".to_string()));
    }

    #[tokio::test]
    async fn test_locks_released_after_success_and_failure() {
        let mut storage = MockRecordStorage::new();
        storage
            .expect_get()
            .withf(|key| key == "device1")
            .returning(|_| Ok(Some(Bytes::from_static(b"0741842196 100"))));
        storage
            .expect_get()
            .withf(|key| key == "broken")
            .returning(|_| Err(DomainError::StorageUnavailable("disk gone".to_string())));
        storage
            .expect_put()
            .returning(|_, _| Err(DomainError::StorageUnavailable("disk full".to_string())));

        let service = DeviceMessageService::new(Arc::new(storage));

        service.get_message(&id("device1")).await.unwrap();
        assert!(service.get_message(&id("broken")).await.is_err());
        assert!(service.set_message("device2", "hi").await.is_err());

        assert!(service.locks.is_empty());
    }

    #[tokio::test]
    async fn test_list_ids_sorted() {
        let mut storage = MockRecordStorage::new();
        storage.expect_list().returning(|| {
            Ok(vec![
                "device2".to_string(),
                "alpha".to_string(),
                "device1".to_string(),
            ])
        });

        let service = DeviceMessageService::new(Arc::new(storage));

        assert_eq!(
            service.list_ids().await.unwrap(),
            vec!["alpha", "device1", "device2"]
        );
    }
}
