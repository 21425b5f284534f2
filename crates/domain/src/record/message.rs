use crate::error::{DomainError, Result};
use serde::{Deserialize, Serialize};

/// Free-form payload stored for a device.
///
/// The sentinel default is treated as an opaque string; nothing here assumes
/// it has any inner structure.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Message(String);

impl Message {
    /// Value assigned to a record the first time it is read
    pub const SENTINEL: &'static str = "0000000000 000";

    /// Validate a message supplied by a writer. Trims, rejects blank input.
    pub fn new(message: impl AsRef<str>) -> Result<Self> {
        let message = message.as_ref().trim();

        if message.is_empty() {
            return Err(DomainError::InvalidInput(
                "Message cannot be empty".to_string(),
            ));
        }

        Ok(Self(message.to_string()))
    }

    pub fn sentinel() -> Self {
        Self(Self::SENTINEL.to_string())
    }

    /// Decode whatever the backend holds. Invalid UTF-8 is replaced rather
    /// than rejected, and a record emptied outside the service reads back
    /// as an empty message.
    pub fn from_stored(bytes: &[u8]) -> Self {
        Self(String::from_utf8_lossy(bytes).trim().to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn as_bytes(&self) -> &[u8] {
        self.0.as_bytes()
    }

    pub fn into_inner(self) -> String {
        self.0
    }
}

impl std::fmt::Display for Message {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_message_is_trimmed() {
        let msg = Message::new(" 0741842196 100 ").unwrap();
        assert_eq!(msg.as_str(), "0741842196 100");
    }

    #[test]
    fn test_blank_message_rejected() {
        assert_eq!(
            Message::new(" \r\n ").unwrap_err(),
            DomainError::InvalidInput("Message cannot be empty".to_string())
        );
    }

    #[test]
    fn test_sentinel() {
        assert_eq!(Message::sentinel().as_str(), "0000000000 000");
    }

    #[test]
    fn test_from_stored_trims() {
        let msg = Message::from_stored(b"0741842196 100\n");
        assert_eq!(msg.as_str(), "0741842196 100");
    }

    #[test]
    fn test_from_stored_invalid_utf8_is_lossy() {
        let msg = Message::from_stored(&[b'o', b'k', 0xFF]);
        assert_eq!(msg.as_str(), "ok\u{FFFD}");
    }
}
