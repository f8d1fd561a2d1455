//! Shortest relationship path between two members

use crate::adjacency::{Adjacency, Edge};
use crate::member::{FamilyMember, MemberId};
use crate::relationship::Relationship;
use serde::Serialize;
use std::collections::{HashMap, HashSet, VecDeque};

/// Description used when start and target are the same member
pub const SAME_PERSON: &str = "Same person";

/// Description used when no chain of relationships connects two members
pub const NOT_CONNECTED: &str = "Not connected";

/// Separator between hops in a path description
pub const HOP_SEPARATOR: &str = " → ";

/// One hop of a relationship path
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PathStep {
    /// Member reached by this hop
    pub member: FamilyMember,

    /// Specific label of the traversed record, or `member`'s role in the
    /// chain, e.g. "Father" or "Sibling"
    pub relationship_label: String,
}

/// Result of a path search
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RelationshipPath {
    /// Member the search started from
    pub start: MemberId,

    /// Hops after the start member
    pub path: Vec<PathStep>,

    /// Human-readable chain, e.g. "Jane Doe (Mother) → John Doe (Sibling)"
    pub description: String,

    pub connected: bool,
}

impl RelationshipPath {
    fn same_person(start: &MemberId) -> Self {
        Self {
            start: start.clone(),
            path: Vec::new(),
            description: SAME_PERSON.to_string(),
            connected: true,
        }
    }

    fn not_connected(start: &MemberId) -> Self {
        Self {
            start: start.clone(),
            path: Vec::new(),
            description: NOT_CONNECTED.to_string(),
            connected: false,
        }
    }

    fn from_steps(start: &MemberId, path: Vec<PathStep>) -> Self {
        let description = path
            .iter()
            .map(|step| format!("{} ({})", step.member.full_name(), step.relationship_label))
            .collect::<Vec<_>>()
            .join(HOP_SEPARATOR);

        Self {
            start: start.clone(),
            path,
            description,
            connected: true,
        }
    }

    /// Number of hops
    pub fn len(&self) -> usize {
        self.path.len()
    }

    pub fn is_empty(&self) -> bool {
        self.path.is_empty()
    }

    /// Labels of each hop, in order
    pub fn labels(&self) -> Vec<&str> {
        self.path
            .iter()
            .map(|step| step.relationship_label.as_str())
            .collect()
    }

    /// Bare id chain from start to target; empty when not connected
    pub fn member_ids(&self) -> Vec<MemberId> {
        if !self.connected {
            return Vec::new();
        }
        std::iter::once(self.start.clone())
            .chain(self.path.iter().map(|step| step.member.id.clone()))
            .collect()
    }
}

/// Label for hop `i` of a chain of traversed edges
///
/// The relationship's specific label wins when one was supplied. Otherwise
/// the reached member is named by its role toward the next member of the
/// chain, or toward the previous member on the final hop.
fn hop_label(edges: &[&Edge], i: usize) -> String {
    let edge = edges[i];
    if let Some(label) = &edge.specific_label {
        return label.clone();
    }
    match edges.get(i + 1) {
        Some(next) => next.relationship_type.label(),
        None => edge.neighbor_role.label(),
    }
}

/// Breadth-first path finder over a prebuilt adjacency
#[derive(Debug, Clone)]
pub struct PathFinder {
    adjacency: Adjacency,
    members: HashMap<MemberId, FamilyMember>,
}

impl PathFinder {
    pub fn new(relationships: &[Relationship], members: &[FamilyMember]) -> Self {
        let mut by_id = HashMap::with_capacity(members.len());
        for member in members {
            by_id
                .entry(member.id.clone())
                .or_insert_with(|| member.clone());
        }

        Self {
            adjacency: Adjacency::build(relationships),
            members: by_id,
        }
    }

    pub fn adjacency(&self) -> &Adjacency {
        &self.adjacency
    }

    /// Shortest chain of relationships from `start` to `target`
    ///
    /// Among equally short chains the first one discovered wins, which
    /// follows relationship input order.
    pub fn find(&self, start: &MemberId, target: &MemberId) -> RelationshipPath {
        if start == target {
            return RelationshipPath::same_person(start);
        }

        let mut visited: HashSet<&MemberId> = HashSet::new();
        let mut parent: HashMap<&MemberId, (&MemberId, &Edge)> = HashMap::new();
        let mut queue: VecDeque<&MemberId> = VecDeque::new();
        let mut nodes_visited = 0usize;
        let mut found = false;

        queue.push_back(start);
        visited.insert(start);

        while let Some(current) = queue.pop_front() {
            nodes_visited += 1;

            if current == target {
                found = true;
                break;
            }

            for edge in self.adjacency.edges(current) {
                if visited.insert(&edge.neighbor) {
                    parent.insert(&edge.neighbor, (current, edge));
                    queue.push_back(&edge.neighbor);
                }
            }
        }

        if !found {
            tracing::debug!(
                "No path from {} to {} after visiting {} members",
                start,
                target,
                nodes_visited
            );
            return RelationshipPath::not_connected(start);
        }

        let path = self.reconstruct(start, target, &parent);
        tracing::debug!(
            "Found {}-hop path from {} to {} after visiting {} members",
            path.len(),
            start,
            target,
            nodes_visited
        );
        RelationshipPath::from_steps(start, path)
    }

    fn reconstruct(
        &self,
        start: &MemberId,
        target: &MemberId,
        parent: &HashMap<&MemberId, (&MemberId, &Edge)>,
    ) -> Vec<PathStep> {
        let mut hops: Vec<(&MemberId, &Edge)> = Vec::new();
        let mut current = target;

        while current != start {
            let Some(&(prev, edge)) = parent.get(current) else {
                break;
            };
            hops.push((current, edge));
            current = prev;
        }
        hops.reverse();

        let edges: Vec<&Edge> = hops.iter().map(|&(_, edge)| edge).collect();
        hops.iter()
            .enumerate()
            .map(|(i, &(id, _))| PathStep {
                member: self.member_or_placeholder(id),
                relationship_label: hop_label(&edges, i),
            })
            .collect()
    }

    fn member_or_placeholder(&self, id: &MemberId) -> FamilyMember {
        self.members
            .get(id)
            .cloned()
            .unwrap_or_else(|| FamilyMember::new(id.clone(), id.as_str(), ""))
    }
}

/// Find the shortest relationship path between two members
pub fn find_path(
    start: &MemberId,
    target: &MemberId,
    relationships: &[Relationship],
    members: &[FamilyMember],
) -> RelationshipPath {
    PathFinder::new(relationships, members).find(start, target)
}
