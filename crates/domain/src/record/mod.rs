mod device_id;
mod entity;
mod message;
mod state;
mod storage;

pub use device_id::DeviceId;
pub use entity::DeviceRecord;
pub use message::Message;
pub use state::RecordState;
pub use storage::RecordStorage;

#[cfg(any(test, feature = "mocks"))]
pub use storage::MockRecordStorage;
