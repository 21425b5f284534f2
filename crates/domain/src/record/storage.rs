use crate::DomainError;
use async_trait::async_trait;
use bytes::Bytes;

/// Storage capability for device records
///
/// Keys are device ids exactly as validated by [`super::DeviceId`]; values are
/// the raw message bytes with no framing. Implementations live in the
/// infrastructure layer and must report every medium failure as
/// [`DomainError::StorageUnavailable`].
#[cfg_attr(any(test, feature = "mocks"), mockall::automock)]
#[async_trait]
pub trait RecordStorage: Send + Sync {
    /// Fetch the value stored under `key`, `None` if nothing was ever stored
    async fn get(&self, key: &str) -> Result<Option<Bytes>, DomainError>;

    /// Store `value` under `key`, replacing any previous value
    async fn put(&self, key: &str, value: Bytes) -> Result<(), DomainError>;

    /// Every key that currently holds a value, in backend order
    async fn list(&self) -> Result<Vec<String>, DomainError>;
}
