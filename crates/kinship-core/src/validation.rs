//! Consistency checks for member/relationship snapshots
//!
//! The engine tolerates every issue reported here (it skips or overrides the
//! offending records), so these are diagnostics, not rejections.

use crate::member::MemberId;
use crate::relationship::{RelationshipId, RelationshipType};
use crate::snapshot::FamilySnapshot;
use std::collections::{HashMap, HashSet};

/// A problem found in a snapshot
#[derive(Debug, Clone, PartialEq)]
pub enum ValidationIssue {
    DuplicateMember { id: MemberId },
    DuplicateRelationship { id: RelationshipId },
    UnknownMember { relationship: RelationshipId, member: MemberId },
    SelfRelationship { relationship: RelationshipId, member: MemberId },
    MultipleSpouses { member: MemberId, count: usize },
}

impl std::fmt::Display for ValidationIssue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::DuplicateMember { id } => {
                write!(f, "Duplicate member id: {} (first record is used)", id)
            }
            Self::DuplicateRelationship { id } => write!(f, "Duplicate relationship id: {}", id),
            Self::UnknownMember {
                relationship,
                member,
            } => write!(
                f,
                "Relationship {} references unknown member {}",
                relationship, member
            ),
            Self::SelfRelationship {
                relationship,
                member,
            } => write!(
                f,
                "Relationship {} links member {} to itself",
                relationship, member
            ),
            Self::MultipleSpouses { member, count } => write!(
                f,
                "Member {} has {} different spouses (last one is used)",
                member, count
            ),
        }
    }
}

impl std::error::Error for ValidationIssue {}

/// Report every issue in `snapshot`, in input order
pub fn validate(snapshot: &FamilySnapshot) -> Vec<ValidationIssue> {
    let mut issues = Vec::new();

    let mut members: HashSet<&MemberId> = HashSet::new();
    for member in &snapshot.members {
        if !members.insert(&member.id) {
            issues.push(ValidationIssue::DuplicateMember {
                id: member.id.clone(),
            });
        }
    }

    let mut relationship_ids: HashSet<&RelationshipId> = HashSet::new();
    let mut partners: HashMap<&MemberId, HashSet<&MemberId>> = HashMap::new();
    let mut spouse_order: Vec<&MemberId> = Vec::new();

    for rel in &snapshot.relationships {
        if !relationship_ids.insert(&rel.id) {
            issues.push(ValidationIssue::DuplicateRelationship { id: rel.id.clone() });
        }

        for end in [&rel.from_id, &rel.to_id] {
            if !members.contains(end) {
                issues.push(ValidationIssue::UnknownMember {
                    relationship: rel.id.clone(),
                    member: end.clone(),
                });
            }
        }

        if rel.from_id == rel.to_id {
            issues.push(ValidationIssue::SelfRelationship {
                relationship: rel.id.clone(),
                member: rel.from_id.clone(),
            });
            continue;
        }

        if rel.relationship_type == RelationshipType::Spouse {
            // Mirrored records for one couple count once
            for (end, other) in [(&rel.from_id, &rel.to_id), (&rel.to_id, &rel.from_id)] {
                let set = partners.entry(end).or_default();
                if set.is_empty() {
                    spouse_order.push(end);
                }
                set.insert(other);
            }
        }
    }

    for member in spouse_order {
        let count = partners[member].len();
        if count > 1 {
            issues.push(ValidationIssue::MultipleSpouses {
                member: member.clone(),
                count,
            });
        }
    }

    if !issues.is_empty() {
        tracing::debug!("Snapshot has {} validation issues", issues.len());
    }

    issues
}
