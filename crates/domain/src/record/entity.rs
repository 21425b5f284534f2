use super::{DeviceId, Message};
use serde::{Deserialize, Serialize};

/// The persisted `(id, message)` pair for one device.
///
/// Records carry no metadata and no history; every write replaces the
/// message wholesale.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeviceRecord {
    pub id: DeviceId,
    pub message: Message,
}

impl DeviceRecord {
    pub fn new(id: DeviceId, message: Message) -> Self {
        Self { id, message }
    }

    /// Record assigned on first read of an unknown device
    pub fn with_default(id: DeviceId) -> Self {
        Self::new(id, Message::sentinel())
    }
}
