//! Bidirectional adjacency built from relationship records

use crate::member::MemberId;
use crate::relationship::{Relationship, RelationshipType};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Which way an edge runs relative to the record it came from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EdgeDirection {
    /// Stored in the `from_id` member's list, as authored
    Forward,
    /// Synthesized in the `to_id` member's list with the inverse type
    Reverse,
}

/// One entry in a member's adjacency list
///
/// `relationship_type` reads from the owner of the list: an edge
/// `(B, Parent)` in A's list means A is the parent of B.
/// `neighbor_role` is the type stored on the paired edge, i.e. what the
/// neighbor is to the owner.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Edge {
    pub neighbor: MemberId,
    pub relationship_type: RelationshipType,
    pub neighbor_role: RelationshipType,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub specific_label: Option<String>,
    pub direction: EdgeDirection,
}

/// Undirected multigraph stored as directed edge pairs
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Adjacency {
    edges: HashMap<MemberId, Vec<Edge>>,
}

impl Adjacency {
    /// Build the adjacency for a set of relationships
    ///
    /// Every record yields a forward edge and a reverse edge carrying the
    /// inverse type. Neighbor order follows input order.
    pub fn build(relationships: &[Relationship]) -> Self {
        let mut edges: HashMap<MemberId, Vec<Edge>> = HashMap::new();

        for rel in relationships {
            let inverse = rel.relationship_type.inverse();
            edges.entry(rel.from_id.clone()).or_default().push(Edge {
                neighbor: rel.to_id.clone(),
                relationship_type: rel.relationship_type.clone(),
                neighbor_role: inverse.clone(),
                specific_label: rel.specific_label.clone(),
                direction: EdgeDirection::Forward,
            });
            edges.entry(rel.to_id.clone()).or_default().push(Edge {
                neighbor: rel.from_id.clone(),
                relationship_type: inverse,
                neighbor_role: rel.relationship_type.clone(),
                specific_label: rel.specific_label.clone(),
                direction: EdgeDirection::Reverse,
            });
        }

        tracing::debug!(
            "Built adjacency for {} members from {} relationships",
            edges.len(),
            relationships.len()
        );

        Self { edges }
    }

    /// Edges leaving `id`; empty when the member has no known relationships
    pub fn edges(&self, id: &MemberId) -> &[Edge] {
        self.edges.get(id).map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn contains(&self, id: &MemberId) -> bool {
        self.edges.contains_key(id)
    }

    /// Number of members with at least one edge
    pub fn len(&self) -> usize {
        self.edges.len()
    }

    pub fn is_empty(&self) -> bool {
        self.edges.is_empty()
    }
}

/// Convenience wrapper around [`Adjacency::build`]
pub fn build_adjacency(relationships: &[Relationship]) -> Adjacency {
    Adjacency::build(relationships)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn id(s: &str) -> MemberId {
        MemberId::from(s)
    }

    #[test]
    fn test_empty_input() {
        let adjacency = Adjacency::build(&[]);
        assert!(adjacency.is_empty());
        assert!(adjacency.edges(&id("nobody")).is_empty());
        assert!(!adjacency.contains(&id("nobody")));
    }

    #[test]
    fn test_every_edge_has_inverse() {
        let relationships = vec![
            Relationship::new("r1", "b", "a", "parent"),
            Relationship::new("r2", "a", "s", "spouse"),
            Relationship::new("r3", "a", "x", "sibling"),
            Relationship::new("r4", "g", "a", "grandparent"),
            Relationship::new("r5", "u", "a", "uncle"),
            Relationship::new("r6", "a", "c", "cousin"),
            Relationship::new("r7", "a", "f", "best friend"),
        ];
        let adjacency = Adjacency::build(&relationships);

        for rel in &relationships {
            let forward = adjacency
                .edges(&rel.from_id)
                .iter()
                .find(|e| e.neighbor == rel.to_id && e.direction == EdgeDirection::Forward)
                .expect("forward edge");
            assert_eq!(forward.relationship_type, rel.relationship_type);

            let reverse = adjacency
                .edges(&rel.to_id)
                .iter()
                .find(|e| e.neighbor == rel.from_id && e.direction == EdgeDirection::Reverse)
                .expect("reverse edge");
            assert_eq!(reverse.relationship_type, rel.relationship_type.inverse());
        }
    }

    #[test]
    fn test_reverse_edge_types() {
        let relationships = vec![
            Relationship::new("r1", "b", "a", "parent"),
            Relationship::new("r2", "u", "a", "aunt"),
        ];
        let adjacency = Adjacency::build(&relationships);

        let types: Vec<_> = adjacency
            .edges(&id("a"))
            .iter()
            .map(|e| e.relationship_type.clone())
            .collect();
        assert_eq!(
            types,
            vec![RelationshipType::Child, RelationshipType::NephewNiece]
        );
    }

    #[test]
    fn test_neighbor_role_mirrors_paired_edge() {
        let relationships = vec![Relationship::new("r1", "u", "a", "aunt")];
        let adjacency = Adjacency::build(&relationships);

        let from_aunt = &adjacency.edges(&id("u"))[0];
        assert_eq!(from_aunt.neighbor_role, RelationshipType::NephewNiece);

        // Reverse edge carries the inverse, the role keeps the authored type
        let from_nephew = &adjacency.edges(&id("a"))[0];
        assert_eq!(from_nephew.relationship_type, RelationshipType::NephewNiece);
        assert_eq!(from_nephew.neighbor_role, RelationshipType::Aunt);
    }

    #[test]
    fn test_labels_copied_to_both_edges() {
        let relationships = vec![Relationship::new("r1", "b", "a", "parent").with_label("Mother")];
        let adjacency = Adjacency::build(&relationships);

        assert_eq!(
            adjacency.edges(&id("b"))[0].specific_label.as_deref(),
            Some("Mother")
        );
        assert_eq!(
            adjacency.edges(&id("a"))[0].specific_label.as_deref(),
            Some("Mother")
        );
    }

    #[test]
    fn test_neighbor_order_follows_input() {
        let relationships = vec![
            Relationship::new("r1", "a", "c1", "parent"),
            Relationship::new("r2", "a", "c2", "parent"),
            Relationship::new("r3", "p", "a", "parent"),
        ];
        let adjacency = Adjacency::build(&relationships);

        let neighbors: Vec<_> = adjacency
            .edges(&id("a"))
            .iter()
            .map(|e| e.neighbor.as_str())
            .collect();
        assert_eq!(neighbors, vec!["c1", "c2", "p"]);
        assert_eq!(adjacency.len(), 4);
    }
}
