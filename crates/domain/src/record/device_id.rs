use crate::error::{DomainError, Result};
use serde::{Deserialize, Serialize};

/// Value object representing a device identifier
///
/// Rules:
/// - Surrounding whitespace is trimmed
/// - Must be non-empty after trimming
///
/// Anything else is accepted verbatim; backends that need a filesystem-safe
/// name encode it themselves.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DeviceId(String);

impl DeviceId {
    /// Id used when a read request does not name a device
    pub const DEFAULT: &'static str = "default";

    /// Create a new DeviceId with validation
    pub fn new(id: impl AsRef<str>) -> Result<Self> {
        let id = id.as_ref().trim();

        if id.is_empty() {
            return Err(DomainError::InvalidInput(
                "Device ID cannot be empty".to_string(),
            ));
        }

        Ok(Self(id.to_string()))
    }

    /// Resolve an optional request id, falling back to [`DeviceId::DEFAULT`]
    /// when it is absent or blank.
    ///
    /// The id is trimmed like in [`DeviceId::new`] on purpose, so a read and
    /// a write with the same padded id reach the same record.
    pub fn or_default(id: Option<&str>) -> Self {
        id.and_then(|raw| Self::new(raw).ok())
            .unwrap_or_else(|| Self(Self::DEFAULT.to_string()))
    }

    /// Get the inner string value
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for DeviceId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl AsRef<str> for DeviceId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_valid_device_id() {
        let id = DeviceId::new("device1").unwrap();
        assert_eq!(id.as_str(), "device1");
    }

    #[test]
    fn test_device_id_is_trimmed() {
        let id = DeviceId::new("  esp8266-kitchen \n").unwrap();
        assert_eq!(id.as_str(), "esp8266-kitchen");
    }

    #[test]
    fn test_device_id_keeps_unusual_characters() {
        let id = DeviceId::new("plant/line 2/ünit.7").unwrap();
        assert_eq!(id.as_str(), "plant/line 2/ünit.7");
    }

    #[test]
    fn test_empty_device_id() {
        let result = DeviceId::new("");
        assert_eq!(
            result.unwrap_err(),
            DomainError::InvalidInput("Device ID cannot be empty".to_string())
        );
    }

    #[test]
    fn test_whitespace_device_id() {
        assert!(DeviceId::new("   \t").is_err());
    }

    #[test]
    fn test_or_default() {
        assert_eq!(DeviceId::or_default(None).as_str(), "default");
        assert_eq!(DeviceId::or_default(Some("")).as_str(), "default");
        assert_eq!(DeviceId::or_default(Some("  ")).as_str(), "default");
        assert_eq!(DeviceId::or_default(Some(" device9 ")).as_str(), "device9");
    }

    #[test]
    fn test_device_id_serializes_as_string() {
        let id = DeviceId::new("device1").unwrap();
        assert_eq!(serde_json::to_string(&id).unwrap(), "\"device1\"");
    }
}
