//! CLI command implementations

pub mod check;
pub mod completions;
pub mod config;
pub mod layout;
pub mod path;
pub mod stats;
pub mod tree;
