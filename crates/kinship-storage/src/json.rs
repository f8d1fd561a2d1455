//! Read-only family snapshot stored as a JSON file

use crate::error::StorageResult;
use async_trait::async_trait;
use kinship_core::{FamilyMember, FamilySnapshot, FamilySource, Relationship};
use std::path::{Path, PathBuf};

/// Family source backed by a JSON file of the form
/// `{ "members": [...], "relationships": [...] }`
///
/// The file is re-read on every call so edits show up on the next
/// recompute.
#[derive(Debug, Clone)]
pub struct JsonFileStore {
    path: PathBuf,
}

impl JsonFileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Read and parse the whole file
    pub async fn load(&self) -> StorageResult<FamilySnapshot> {
        tracing::debug!("Reading family snapshot from {:?}", self.path);
        let content = tokio::fs::read_to_string(&self.path).await?;
        let snapshot: FamilySnapshot = serde_json::from_str(&content)?;
        tracing::debug!(
            "Loaded {} members and {} relationships",
            snapshot.members.len(),
            snapshot.relationships.len()
        );
        Ok(snapshot)
    }
}

#[async_trait]
impl FamilySource for JsonFileStore {
    async fn list_members(&self) -> kinship_core::Result<Vec<FamilyMember>> {
        Ok(self.load().await?.members)
    }

    async fn list_relationships(&self) -> kinship_core::Result<Vec<Relationship>> {
        Ok(self.load().await?.relationships)
    }

    async fn snapshot(&self) -> kinship_core::Result<FamilySnapshot> {
        Ok(self.load().await?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::StorageError;
    use std::io::Write;
    use tempfile::NamedTempFile;

    const FAMILY: &str = r#"{
        "members": [
            {"id": "a", "firstName": "Root", "lastName": "Person"},
            {"id": "b", "firstName": "Parent", "lastName": "of A", "isLiving": false}
        ],
        "relationships": [
            {"id": "r1", "fromId": "b", "toId": "a", "relationshipType": "parent", "specificLabel": "Mother"}
        ]
    }"#;

    #[tokio::test]
    async fn test_load_snapshot() {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(FAMILY.as_bytes()).unwrap();

        let store = JsonFileStore::new(file.path());
        let snapshot = store.snapshot().await.unwrap();

        assert_eq!(snapshot.members.len(), 2);
        assert!(!snapshot.members[1].is_living);
        assert_eq!(
            snapshot.relationships[0].specific_label.as_deref(),
            Some("Mother")
        );
        assert_eq!(store.list_members().await.unwrap().len(), 2);
    }

    #[tokio::test]
    async fn test_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let store = JsonFileStore::new(dir.path().join("missing.json"));

        assert!(matches!(store.load().await, Err(StorageError::Io(_))));
        assert!(matches!(
            store.snapshot().await,
            Err(kinship_core::Error::Source(_))
        ));
    }

    #[tokio::test]
    async fn test_malformed_file() {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(b"{ not json").unwrap();

        let store = JsonFileStore::new(file.path());
        assert!(matches!(
            store.snapshot().await,
            Err(kinship_core::Error::Serialization(_))
        ));
    }
}
