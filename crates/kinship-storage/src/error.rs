//! Storage error types

use thiserror::Error;

/// Result type alias for storage operations
pub type StorageResult<T> = std::result::Result<T, StorageError>;

/// Storage-specific error types
#[derive(Error, Debug)]
pub enum StorageError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Lock error: {0}")]
    Lock(String),

    #[error("Duplicate member: {0}")]
    DuplicateMember(String),

    #[error("Member not found: {0}")]
    MemberNotFound(String),
}

impl From<StorageError> for kinship_core::Error {
    fn from(err: StorageError) -> Self {
        match err {
            StorageError::Serialization(e) => kinship_core::Error::Serialization(e),
            StorageError::MemberNotFound(id) => kinship_core::Error::MemberNotFound(id),
            other => kinship_core::Error::Source(other.to_string()),
        }
    }
}
