//! Domain layer - Pure business logic with no external dependencies
//!
//! This crate contains:
//! - Value Objects (DeviceId, Message)
//! - Entities (DeviceRecord) and their lifecycle (RecordState)
//! - Storage interface (RecordStorage trait)
//!
//! Principles:
//! - No dependencies on infrastructure
//! - Business rules enforced at domain level
//! - Testable in isolation

pub mod error;
pub mod record;

// Re-export commonly used types
pub use error::DomainError;
pub use record::{DeviceId, DeviceRecord, Message, RecordState, RecordStorage};

#[cfg(any(test, feature = "mocks"))]
pub use record::MockRecordStorage;
