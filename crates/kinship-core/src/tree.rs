//! Rooted family tree over an arena of nodes
//!
//! Parent, child, spouse and sibling links form cycles (two spouses point at
//! each other, a child lists the parent that lists it), so nodes live in a
//! flat arena and links are [`NodeIndex`] handles. Links express
//! reachability only; the arena owns every node.
//!
//! Generation levels are assigned by a depth-first walk from the root that
//! visits parents, then children, then the spouse, claiming each node the
//! first time it is reached. A member reachable along two different paths
//! keeps the level of whichever path the walk reaches first, so levels depend
//! on the order relationships were supplied.

use crate::layout::{Layout, Position};
use crate::member::{FamilyMember, MemberId};
use crate::relationship::{Relationship, RelationshipType};
use serde::Serialize;
use std::collections::{BTreeMap, HashMap, HashSet};

/// Handle to a node in a [`FamilyTree`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(transparent)]
pub struct NodeIndex(pub usize);

/// Per-member view of the tree
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TreeNode {
    pub member: FamilyMember,
    pub parents: Vec<NodeIndex>,
    pub children: Vec<NodeIndex>,
    pub spouse: Option<NodeIndex>,
    pub siblings: Vec<NodeIndex>,
    /// Generation offset from the root; `None` when unreachable from it
    pub level: Option<i32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub position: Option<Position>,
}

impl TreeNode {
    fn new(member: FamilyMember) -> Self {
        Self {
            member,
            parents: Vec::new(),
            children: Vec::new(),
            spouse: None,
            siblings: Vec::new(),
            level: None,
            position: None,
        }
    }

    pub fn id(&self) -> &MemberId {
        &self.member.id
    }
}

fn push_unique(list: &mut Vec<NodeIndex>, idx: NodeIndex) {
    if !list.contains(&idx) {
        list.push(idx);
    }
}

/// Family tree rooted at one member
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FamilyTree {
    nodes: Vec<TreeNode>,
    root: NodeIndex,
    #[serde(skip)]
    index: HashMap<MemberId, NodeIndex>,
}

impl FamilyTree {
    /// Build the tree for `members` and `relationships`, rooted at `root_id`
    ///
    /// Returns `None` when there are no members or the root is not one of them.
    pub fn build(
        members: &[FamilyMember],
        relationships: &[Relationship],
        root_id: &MemberId,
    ) -> Option<Self> {
        if members.is_empty() {
            tracing::debug!("No members, nothing to build");
            return None;
        }

        let mut nodes = Vec::with_capacity(members.len());
        let mut index = HashMap::with_capacity(members.len());
        for member in members {
            if index.contains_key(&member.id) {
                tracing::warn!("Duplicate member id {}, keeping first record", member.id);
                continue;
            }
            index.insert(member.id.clone(), NodeIndex(nodes.len()));
            nodes.push(TreeNode::new(member.clone()));
        }

        let Some(&root) = index.get(root_id) else {
            tracing::debug!("Root {} is not a known member", root_id);
            return None;
        };

        let mut tree = Self { nodes, root, index };
        for rel in relationships {
            tree.link(rel);
        }
        tree.assign_levels();

        tracing::debug!(
            "Built tree rooted at {} with {} nodes",
            root_id,
            tree.nodes.len()
        );

        Some(tree)
    }

    fn link(&mut self, rel: &Relationship) {
        let (Some(&from), Some(&to)) = (self.index.get(&rel.from_id), self.index.get(&rel.to_id))
        else {
            tracing::debug!(
                "Skipping relationship {}: unknown member {} or {}",
                rel.id,
                rel.from_id,
                rel.to_id
            );
            return;
        };
        if from == to {
            tracing::debug!("Skipping self relationship {}", rel.id);
            return;
        }

        match rel.relationship_type {
            RelationshipType::Parent => self.link_parent(from, to),
            RelationshipType::Child => self.link_parent(to, from),
            RelationshipType::Spouse => {
                // Last write wins
                self.nodes[from.0].spouse = Some(to);
                self.nodes[to.0].spouse = Some(from);
            }
            RelationshipType::Sibling => {
                push_unique(&mut self.nodes[from.0].siblings, to);
                push_unique(&mut self.nodes[to.0].siblings, from);
            }
            _ => {}
        }
    }

    fn link_parent(&mut self, parent: NodeIndex, child: NodeIndex) {
        push_unique(&mut self.nodes[child.0].parents, parent);
        push_unique(&mut self.nodes[parent.0].children, child);
    }

    fn assign_levels(&mut self) {
        for (idx, level) in self.walk() {
            self.nodes[idx.0].level = Some(level);
        }
    }

    /// Depth-first walk from the root, yielding `(node, level)` in visit order
    ///
    /// Parents are visited at level - 1, children at level + 1 and the
    /// spouse at the same level, each node once. The explicit stack
    /// reproduces the pre-order of the equivalent recursion.
    pub fn walk(&self) -> Vec<(NodeIndex, i32)> {
        let mut visited: HashSet<NodeIndex> = HashSet::new();
        let mut order = Vec::new();
        let mut stack = vec![(self.root, 0)];

        while let Some((idx, level)) = stack.pop() {
            if !visited.insert(idx) {
                continue;
            }
            order.push((idx, level));

            let node = &self.nodes[idx.0];
            if let Some(spouse) = node.spouse {
                stack.push((spouse, level));
            }
            for &child in node.children.iter().rev() {
                stack.push((child, level + 1));
            }
            for &parent in node.parents.iter().rev() {
                stack.push((parent, level - 1));
            }
        }

        order
    }

    /// Reachable nodes grouped by level, each group in walk order
    pub fn generations(&self) -> BTreeMap<i32, Vec<NodeIndex>> {
        let mut levels: BTreeMap<i32, Vec<NodeIndex>> = BTreeMap::new();
        for (idx, level) in self.walk() {
            levels.entry(level).or_default().push(idx);
        }
        levels
    }

    /// Store the positions of `layout` on the matching nodes
    pub fn apply_layout(&mut self, layout: &Layout) {
        for node in &mut self.nodes {
            node.position = layout.get(&node.member.id).copied();
        }
    }

    pub fn root(&self) -> &TreeNode {
        &self.nodes[self.root.0]
    }

    pub fn root_index(&self) -> NodeIndex {
        self.root
    }

    pub fn node(&self, idx: NodeIndex) -> &TreeNode {
        &self.nodes[idx.0]
    }

    pub fn nodes(&self) -> &[TreeNode] {
        &self.nodes
    }

    pub fn index_of(&self, id: &MemberId) -> Option<NodeIndex> {
        self.index.get(id).copied()
    }

    pub fn get(&self, id: &MemberId) -> Option<&TreeNode> {
        self.index_of(id).map(|idx| self.node(idx))
    }

    pub fn level_of(&self, id: &MemberId) -> Option<i32> {
        self.get(id).and_then(|node| node.level)
    }

    pub fn children_of(&self, idx: NodeIndex) -> impl Iterator<Item = &TreeNode> {
        self.nodes[idx.0].children.iter().map(|&c| self.node(c))
    }

    pub fn siblings_of(&self, idx: NodeIndex) -> impl Iterator<Item = &TreeNode> {
        self.nodes[idx.0].siblings.iter().map(|&s| self.node(s))
    }

    pub fn spouse_of(&self, idx: NodeIndex) -> Option<&TreeNode> {
        self.nodes[idx.0].spouse.map(|s| self.node(s))
    }

    /// Number of members in the arena, reachable or not
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }
}

/// Convenience wrapper around [`FamilyTree::build`]
pub fn build_tree(
    members: &[FamilyMember],
    relationships: &[Relationship],
    root_id: &MemberId,
) -> Option<FamilyTree> {
    FamilyTree::build(members, relationships, root_id)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn member(id: &str) -> FamilyMember {
        FamilyMember::new(id, id.to_uppercase(), "Test")
    }

    fn rel(id: &str, from: &str, to: &str, kind: &str) -> Relationship {
        Relationship::new(id, from, to, kind)
    }

    fn id(s: &str) -> MemberId {
        MemberId::from(s)
    }

    #[test]
    fn test_empty_members() {
        assert!(build_tree(&[], &[], &id("a")).is_none());
    }

    #[test]
    fn test_unknown_root() {
        let members = vec![member("a")];
        assert!(build_tree(&members, &[], &id("zz")).is_none());
    }

    #[test]
    fn test_isolated_root() {
        let members = vec![member("a"), member("b")];
        let tree = build_tree(&members, &[], &id("a")).unwrap();

        assert_eq!(tree.root().id(), &id("a"));
        assert_eq!(tree.level_of(&id("a")), Some(0));
        assert_eq!(tree.level_of(&id("b")), None);
        assert_eq!(tree.len(), 2);
    }

    #[test]
    fn test_scenario_levels() {
        let members = vec![
            FamilyMember::new("a", "Root", "Person"),
            FamilyMember::new("b", "Parent", "of A"),
            FamilyMember::new("c", "Child", "of A"),
        ];
        let relationships = vec![rel("r1", "b", "a", "parent"), rel("r2", "a", "c", "parent")];
        let tree = build_tree(&members, &relationships, &id("a")).unwrap();

        assert_eq!(tree.level_of(&id("a")), Some(0));
        assert_eq!(tree.level_of(&id("b")), Some(-1));
        assert_eq!(tree.level_of(&id("c")), Some(1));
    }

    #[test]
    fn test_linear_chain() {
        let members = vec![member("p1"), member("p2"), member("p3")];
        let relationships = vec![
            rel("r1", "p1", "p2", "parent"),
            rel("r2", "p2", "p3", "parent"),
        ];
        let tree = build_tree(&members, &relationships, &id("p1")).unwrap();

        assert_eq!(tree.level_of(&id("p1")), Some(0));
        assert_eq!(tree.level_of(&id("p3")), Some(2));
    }

    #[test]
    fn test_links_share_nodes() {
        let members = vec![member("mom"), member("kid")];
        let relationships = vec![rel("r1", "mom", "kid", "parent")];
        let tree = build_tree(&members, &relationships, &id("kid")).unwrap();

        let mom = tree.index_of(&id("mom")).unwrap();
        let kid = tree.index_of(&id("kid")).unwrap();
        assert_eq!(tree.node(kid).parents, vec![mom]);
        assert_eq!(tree.node(mom).children, vec![kid]);
        assert_eq!(
            tree.children_of(mom).map(|n| n.id().as_str()).collect::<Vec<_>>(),
            vec!["kid"]
        );
    }

    #[test]
    fn test_child_mirrors_parent() {
        let members = vec![member("mom"), member("kid")];
        let relationships = vec![rel("r1", "kid", "mom", "child")];
        let tree = build_tree(&members, &relationships, &id("kid")).unwrap();

        let mom = tree.index_of(&id("mom")).unwrap();
        let kid = tree.index_of(&id("kid")).unwrap();
        assert_eq!(tree.node(kid).parents, vec![mom]);
        assert_eq!(tree.node(mom).children, vec![kid]);
        assert_eq!(tree.level_of(&id("mom")), Some(-1));
    }

    #[test]
    fn test_duplicate_links_are_not_repeated() {
        let members = vec![member("mom"), member("kid"), member("sis")];
        let relationships = vec![
            rel("r1", "mom", "kid", "parent"),
            rel("r2", "kid", "mom", "child"),
            rel("r3", "kid", "sis", "sibling"),
            rel("r4", "sis", "kid", "sibling"),
        ];
        let tree = build_tree(&members, &relationships, &id("kid")).unwrap();

        let kid = tree.index_of(&id("kid")).unwrap();
        let mom = tree.index_of(&id("mom")).unwrap();
        assert_eq!(tree.node(kid).parents.len(), 1);
        assert_eq!(tree.node(mom).children.len(), 1);
        assert_eq!(tree.node(kid).siblings.len(), 1);
        assert_eq!(tree.siblings_of(kid).count(), 1);
    }

    #[test]
    fn test_spouse_shares_level_and_last_write_wins() {
        let members = vec![member("a"), member("b"), member("c")];
        let relationships = vec![rel("r1", "a", "b", "spouse"), rel("r2", "a", "c", "spouse")];
        let tree = build_tree(&members, &relationships, &id("a")).unwrap();

        let a = tree.index_of(&id("a")).unwrap();
        assert_eq!(tree.spouse_of(a).map(|n| n.id().as_str()), Some("c"));
        assert_eq!(tree.level_of(&id("c")), Some(0));
        // b still points at a, but a no longer points back
        assert_eq!(tree.level_of(&id("b")), None);
    }

    #[test]
    fn test_siblings_do_not_propagate_levels() {
        let members = vec![member("a"), member("s")];
        let relationships = vec![rel("r1", "a", "s", "sibling")];
        let tree = build_tree(&members, &relationships, &id("a")).unwrap();

        assert_eq!(tree.level_of(&id("s")), None);
    }

    #[test]
    fn test_cycles_terminate() {
        // A modeled error: p is both parent and child of q
        let members = vec![member("p"), member("q"), member("s")];
        let relationships = vec![
            rel("r1", "p", "q", "parent"),
            rel("r2", "q", "p", "parent"),
            rel("r3", "p", "s", "spouse"),
        ];
        let tree = build_tree(&members, &relationships, &id("p")).unwrap();

        assert_eq!(tree.walk().len(), 3);
        assert_eq!(tree.level_of(&id("p")), Some(0));
        // Parents are visited before children
        assert_eq!(tree.level_of(&id("q")), Some(-1));
        assert_eq!(tree.level_of(&id("s")), Some(0));
    }

    #[test]
    fn test_first_reachable_path_claims_level() {
        // b is r's child, and also the spouse of r's grandchild z
        let members = vec![member("r"), member("a"), member("b"), member("z")];
        let a_first = vec![
            rel("r1", "r", "a", "parent"),
            rel("r2", "r", "b", "parent"),
            rel("r3", "a", "z", "parent"),
            rel("r4", "z", "b", "spouse"),
        ];
        let tree = build_tree(&members, &a_first, &id("r")).unwrap();
        assert_eq!(tree.level_of(&id("z")), Some(2));
        assert_eq!(tree.level_of(&id("b")), Some(2));

        let b_first = vec![
            rel("r2", "r", "b", "parent"),
            rel("r1", "r", "a", "parent"),
            rel("r3", "a", "z", "parent"),
            rel("r4", "z", "b", "spouse"),
        ];
        let tree = build_tree(&members, &b_first, &id("r")).unwrap();
        assert_eq!(tree.level_of(&id("b")), Some(1));
        assert_eq!(tree.level_of(&id("z")), Some(1));
        assert_eq!(tree.level_of(&id("a")), Some(0));
    }

    #[test]
    fn test_unknown_members_and_self_links_are_skipped() {
        let members = vec![member("a")];
        let relationships = vec![rel("r1", "ghost", "a", "parent"), rel("r2", "a", "a", "parent")];
        let tree = build_tree(&members, &relationships, &id("a")).unwrap();

        assert!(tree.root().parents.is_empty());
        assert!(tree.root().children.is_empty());
    }

    #[test]
    fn test_duplicate_member_keeps_first() {
        let members = vec![
            FamilyMember::new("a", "First", "Record"),
            FamilyMember::new("a", "Second", "Record"),
        ];
        let tree = build_tree(&members, &[], &id("a")).unwrap();

        assert_eq!(tree.len(), 1);
        assert_eq!(tree.root().member.first_name, "First");
    }

    #[test]
    fn test_generations_group_in_walk_order() {
        let members = vec![member("r"), member("c1"), member("c2"), member("p")];
        let relationships = vec![
            rel("r1", "r", "c1", "parent"),
            rel("r2", "r", "c2", "parent"),
            rel("r3", "p", "r", "parent"),
        ];
        let tree = build_tree(&members, &relationships, &id("r")).unwrap();
        let generations = tree.generations();

        let ids = |level: i32| -> Vec<&str> {
            generations[&level]
                .iter()
                .map(|&idx| tree.node(idx).id().as_str())
                .collect()
        };
        assert_eq!(generations.keys().copied().collect::<Vec<_>>(), vec![-1, 0, 1]);
        assert_eq!(ids(1), vec!["c1", "c2"]);
        assert_eq!(ids(-1), vec!["p"]);
    }

    #[test]
    fn test_build_is_deterministic() {
        let members = vec![member("a"), member("b"), member("c"), member("d")];
        let relationships = vec![
            rel("r1", "a", "b", "parent"),
            rel("r2", "a", "c", "spouse"),
            rel("r3", "d", "a", "parent"),
        ];
        let first = build_tree(&members, &relationships, &id("a")).unwrap();
        let second = build_tree(&members, &relationships, &id("a")).unwrap();

        assert_eq!(first, second);
        assert_eq!(first.walk(), second.walk());
    }

    #[test]
    fn test_deep_chain_does_not_overflow() {
        let members: Vec<_> = (0..20_000).map(|i| member(&format!("m{i}"))).collect();
        let relationships: Vec<_> = (1..20_000)
            .map(|i| rel(&format!("r{i}"), &format!("m{}", i - 1), &format!("m{i}"), "parent"))
            .collect();
        let tree = build_tree(&members, &relationships, &id("m0")).unwrap();

        assert_eq!(tree.level_of(&id("m19999")), Some(19_999));
    }
}
