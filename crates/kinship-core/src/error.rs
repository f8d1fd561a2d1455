//! Error types for Kinship Core

use thiserror::Error;

/// Result type alias using Kinship's Error
pub type Result<T> = std::result::Result<T, Error>;

/// Kinship error types
///
/// The graph algorithms themselves never fail; these cover the seams where
/// records are fetched from a [`crate::FamilySource`].
#[derive(Error, Debug)]
pub enum Error {
    #[error("Member not found: {0}")]
    MemberNotFound(String),

    #[error("Source error: {0}")]
    Source(String),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}
