//! In-memory family store

use crate::error::{StorageError, StorageResult};
use async_trait::async_trait;
use kinship_core::{FamilyMember, FamilySnapshot, FamilySource, MemberId, Relationship};
use std::sync::RwLock;

/// In-memory family store
///
/// Useful for tests and for hosts that already hold the records locally.
/// Insertion order is preserved, since it decides tie-breaking in the
/// engine.
pub struct MemoryStore {
    members: RwLock<Vec<FamilyMember>>,
    relationships: RwLock<Vec<Relationship>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self {
            members: RwLock::new(Vec::new()),
            relationships: RwLock::new(Vec::new()),
        }
    }

    /// Create a store seeded with a snapshot
    pub fn from_snapshot(snapshot: FamilySnapshot) -> Self {
        Self {
            members: RwLock::new(snapshot.members),
            relationships: RwLock::new(snapshot.relationships),
        }
    }

    /// Add a member; fails if the id is already taken
    pub fn insert_member(&self, member: FamilyMember) -> StorageResult<()> {
        let mut members = self
            .members
            .write()
            .map_err(|e| StorageError::Lock(e.to_string()))?;

        if members.iter().any(|m| m.id == member.id) {
            return Err(StorageError::DuplicateMember(member.id.to_string()));
        }

        tracing::debug!("Inserted member {}", member.id);
        members.push(member);
        Ok(())
    }

    /// Add a relationship record
    pub fn insert_relationship(&self, relationship: Relationship) -> StorageResult<()> {
        let mut relationships = self
            .relationships
            .write()
            .map_err(|e| StorageError::Lock(e.to_string()))?;

        tracing::debug!(
            "Inserted relationship {} -[{}]-> {}",
            relationship.from_id,
            relationship.relationship_type,
            relationship.to_id
        );
        relationships.push(relationship);
        Ok(())
    }

    /// Remove a member together with every relationship that names it
    pub fn remove_member(&self, id: &MemberId) -> StorageResult<()> {
        let mut members = self
            .members
            .write()
            .map_err(|e| StorageError::Lock(e.to_string()))?;

        let before = members.len();
        members.retain(|m| &m.id != id);
        if members.len() == before {
            return Err(StorageError::MemberNotFound(id.to_string()));
        }

        let mut relationships = self
            .relationships
            .write()
            .map_err(|e| StorageError::Lock(e.to_string()))?;
        relationships.retain(|r| !r.involves(id));

        tracing::debug!("Removed member {} and its relationships", id);
        Ok(())
    }
}

impl Default for MemoryStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl FamilySource for MemoryStore {
    async fn list_members(&self) -> kinship_core::Result<Vec<FamilyMember>> {
        let members = self
            .members
            .read()
            .map_err(|e| StorageError::Lock(e.to_string()))?;
        Ok(members.clone())
    }

    async fn list_relationships(&self) -> kinship_core::Result<Vec<Relationship>> {
        let relationships = self
            .relationships
            .read()
            .map_err(|e| StorageError::Lock(e.to_string()))?;
        Ok(relationships.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_insert_and_list() {
        let store = MemoryStore::new();
        store
            .insert_member(FamilyMember::new("a", "Ann", "Lee"))
            .unwrap();
        store
            .insert_member(FamilyMember::new("b", "Ben", "Lee"))
            .unwrap();
        store
            .insert_relationship(Relationship::new("r1", "a", "b", "sibling"))
            .unwrap();

        let snapshot = store.snapshot().await.unwrap();
        assert_eq!(snapshot.members.len(), 2);
        assert_eq!(snapshot.members[0].id.as_str(), "a");
        assert_eq!(snapshot.relationships.len(), 1);
    }

    #[tokio::test]
    async fn test_duplicate_member_rejected() {
        let store = MemoryStore::new();
        store.insert_member(FamilyMember::new("a", "A", "A")).unwrap();

        let err = store
            .insert_member(FamilyMember::new("a", "Other", "A"))
            .unwrap_err();
        assert!(matches!(err, StorageError::DuplicateMember(_)));
        assert_eq!(store.list_members().await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_remove_member_drops_relationships() {
        let store = MemoryStore::from_snapshot(
            FamilySnapshot::new()
                .with_members(vec![
                    FamilyMember::new("a", "A", "A"),
                    FamilyMember::new("b", "B", "B"),
                    FamilyMember::new("c", "C", "C"),
                ])
                .with_relationships(vec![
                    Relationship::new("r1", "a", "b", "parent"),
                    Relationship::new("r2", "b", "c", "parent"),
                ]),
        );

        store.remove_member(&MemberId::from("a")).unwrap();

        let relationships = store.list_relationships().await.unwrap();
        assert_eq!(relationships.len(), 1);
        assert_eq!(relationships[0].id.0, "r2");

        let missing = store.remove_member(&MemberId::from("a")).unwrap_err();
        assert!(matches!(missing, StorageError::MemberNotFound(_)));
    }
}
