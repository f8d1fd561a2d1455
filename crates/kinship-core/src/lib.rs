//! Kinship Core - Family relationship graph and tree-layout engine
//!
//! This crate turns flat member and relationship records into a rooted,
//! multi-generational tree, lays it out in generation rows, and finds the
//! shortest relationship chain between two people. Every operation is a pure
//! function of its input snapshot.

pub mod adjacency;
pub mod error;
pub mod layout;
pub mod member;
pub mod path;
pub mod relationship;
pub mod snapshot;
pub mod stats;
pub mod tree;
pub mod validation;

pub use adjacency::{build_adjacency, Adjacency, Edge, EdgeDirection};
pub use error::{Error, Result};
pub use layout::{layout, Bounds, Layout, LayoutConfig, Position};
pub use member::{FamilyMember, Gender, MemberId};
pub use path::{find_path, PathFinder, PathStep, RelationshipPath};
pub use relationship::{Relationship, RelationshipId, RelationshipType};
pub use snapshot::{FamilySnapshot, FamilySource};
pub use stats::{statistics, TreeStatistics};
pub use tree::{build_tree, FamilyTree, NodeIndex, TreeNode};
pub use validation::{validate, ValidationIssue};
