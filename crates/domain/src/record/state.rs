use super::{DeviceId, DeviceRecord, Message};

/// Lifecycle of a device record
///
/// `Uninitialized --initialize()--> Initialized`. Writes keep a record in
/// `Initialized`; there is no way back.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RecordState {
    /// Nothing persisted for this id yet
    Uninitialized(DeviceId),
    /// A record exists with some message
    Initialized(DeviceRecord),
}

impl RecordState {
    /// Derive the state from what a backend returned for `id`
    pub fn resolve(id: DeviceId, stored: Option<&[u8]>) -> Self {
        match stored {
            Some(bytes) => Self::Initialized(DeviceRecord::new(id, Message::from_stored(bytes))),
            None => Self::Uninitialized(id),
        }
    }

    /// Transition to `Initialized`, assigning the sentinel default when the
    /// record did not exist. Returns the record and whether it was created,
    /// in which case the caller must persist it.
    pub fn initialize(self) -> (DeviceRecord, bool) {
        match self {
            Self::Uninitialized(id) => (DeviceRecord::with_default(id), true),
            Self::Initialized(record) => (record, false),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn id() -> DeviceId {
        DeviceId::new("device1").unwrap()
    }

    #[test]
    fn test_resolve_missing_record() {
        let state = RecordState::resolve(id(), None);
        assert_eq!(state, RecordState::Uninitialized(id()));
    }

    #[test]
    fn test_resolve_existing_record_trims() {
        let state = RecordState::resolve(id(), Some(b"  0741842196 100\n".as_slice()));
        match state {
            RecordState::Initialized(record) => {
                assert_eq!(record.message.as_str(), "0741842196 100")
            }
            other => panic!("expected Initialized, got {:?}", other),
        }
    }

    #[test]
    fn test_initialize_creates_default_once() {
        let (record, created) = RecordState::resolve(id(), None).initialize();
        assert!(created);
        assert_eq!(record.message, Message::sentinel());

        let (again, created) = RecordState::Initialized(record.clone()).initialize();
        assert!(!created);
        assert_eq!(again, record);
    }
}
