#![forbid(unsafe_code)]

//! Cluster (dendrogram) layout over collapsible field trees.
//!
//! Design goals:
//! - faithful port of d3-hierarchy's `cluster` layout (upstream behavior is
//!   normative, including the default sibling separation)
//! - arena-backed trees: parents and children are indices, not references
//! - collapse/expand without losing the full child list

pub mod cluster;
pub mod tree;

pub use cluster::layout;
pub use tree::{ClusterNode, ClusterTree, NodeId};
