use thiserror::Error;

/// Domain-level errors
#[derive(Error, Debug, Clone, PartialEq)]
pub enum DomainError {
    /// Missing or empty id/message. Client-side rejection, never retried.
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// The backing medium failed to read or write.
    #[error("Storage unavailable: {0}")]
    StorageUnavailable(String),
}

impl DomainError {
    pub fn storage(context: impl std::fmt::Display, err: impl std::fmt::Display) -> Self {
        DomainError::StorageUnavailable(format!("{context}: {err}"))
    }
}

pub type Result<T> = std::result::Result<T, DomainError>;
