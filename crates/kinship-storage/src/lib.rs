//! Kinship Storage - Record sources for the family graph
//!
//! This crate provides [`kinship_core::FamilySource`] implementations: an
//! in-memory store and a read-only JSON snapshot file.

pub mod error;
pub mod json;
pub mod memory;

pub use error::{StorageError, StorageResult};
pub use json::JsonFileStore;
pub use memory::MemoryStore;
