#![forbid(unsafe_code)]

//! Core data model for the remora mapping editor (headless).
//!
//! Design goals:
//! - normalize arbitrary JSON records into ordered, typed field trees
//! - keep mapping records serializable and session-owned (no global state)
//! - deterministic, testable outputs

pub mod geom;
pub mod mapping;
pub mod tree;

pub use mapping::{FieldRef, Mapping, MappingSession, SidedField};
pub use tree::{DataNode, NodeValue, ScalarKind, convert, to_value};
