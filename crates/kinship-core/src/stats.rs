//! Summary numbers for the statistics widget

use crate::member::FamilyMember;
use crate::tree::FamilyTree;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// Tree statistics
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TreeStatistics {
    /// Every supplied member, connected or not
    pub member_count: usize,
    /// Distinct generation levels reachable from the root
    pub generation_count: usize,
    pub living_count: usize,
    /// Members reachable from the root
    pub connected_count: usize,
}

/// Compute statistics for `members` and the tree built from them
pub fn statistics(members: &[FamilyMember], tree: Option<&FamilyTree>) -> TreeStatistics {
    let living_count = members.iter().filter(|m| m.is_living).count();

    let Some(tree) = tree else {
        return TreeStatistics {
            member_count: members.len(),
            living_count,
            ..Default::default()
        };
    };

    let walk = tree.walk();
    let levels: HashSet<i32> = walk.iter().map(|&(_, level)| level).collect();

    TreeStatistics {
        member_count: members.len(),
        generation_count: levels.len(),
        living_count,
        connected_count: walk.len(),
    }
}
