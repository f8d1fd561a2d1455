//! Member/relationship snapshots and the trait for fetching them

use crate::error::Result;
use crate::member::{FamilyMember, MemberId};
use crate::relationship::Relationship;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};

/// Every member and relationship of one family, as fetched together
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FamilySnapshot {
    #[serde(default)]
    pub members: Vec<FamilyMember>,
    #[serde(default)]
    pub relationships: Vec<Relationship>,
}

impl FamilySnapshot {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_members(mut self, members: Vec<FamilyMember>) -> Self {
        self.members = members;
        self
    }

    pub fn with_relationships(mut self, relationships: Vec<Relationship>) -> Self {
        self.relationships = relationships;
        self
    }

    pub fn member(&self, id: &MemberId) -> Option<&FamilyMember> {
        self.members.iter().find(|m| &m.id == id)
    }

    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }
}

/// Source of member and relationship records
///
/// The engine never fetches on its own; callers load a snapshot through this
/// trait and hand the lists to the pure operations.
#[async_trait]
pub trait FamilySource: Send + Sync {
    /// List every family member
    async fn list_members(&self) -> Result<Vec<FamilyMember>>;

    /// List every relationship record
    async fn list_relationships(&self) -> Result<Vec<Relationship>>;

    /// Fetch members and relationships together
    async fn snapshot(&self) -> Result<FamilySnapshot> {
        let members = self.list_members().await?;
        let relationships = self.list_relationships().await?;
        Ok(FamilySnapshot {
            members,
            relationships,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Fixed(FamilySnapshot);

    #[async_trait]
    impl FamilySource for Fixed {
        async fn list_members(&self) -> Result<Vec<FamilyMember>> {
            Ok(self.0.members.clone())
        }

        async fn list_relationships(&self) -> Result<Vec<Relationship>> {
            Ok(self.0.relationships.clone())
        }
    }

    #[test]
    fn test_snapshot_builder() {
        let snapshot = FamilySnapshot::new()
            .with_members(vec![FamilyMember::new("a", "A", "A")])
            .with_relationships(vec![]);

        assert!(!snapshot.is_empty());
        assert!(snapshot.member(&MemberId::from("a")).is_some());
        assert!(snapshot.member(&MemberId::from("b")).is_none());
    }

    #[test]
    fn test_snapshot_json_defaults() {
        let snapshot: FamilySnapshot = serde_json::from_str("{}").unwrap();
        assert!(snapshot.is_empty());
        assert!(snapshot.relationships.is_empty());
    }

    #[tokio::test]
    async fn test_default_snapshot_combines_lists() {
        let expected = FamilySnapshot::new()
            .with_members(vec![FamilyMember::new("a", "A", "A"), FamilyMember::new("b", "B", "B")])
            .with_relationships(vec![Relationship::new("r1", "a", "b", "sibling")]);
        let source = Fixed(expected.clone());

        assert_eq!(source.snapshot().await.unwrap(), expected);
    }
}
