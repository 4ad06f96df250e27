//! Common primitives and shared types for the CIS workspace.
//!
//! This crate provides the undirected graph primitive every other crate
//! builds on, the search configuration, and the named graph fixtures used
//! across the test suites.

mod config;
mod graph;
mod node_idx;
mod test_cases;

pub use crate::config::*;
pub use crate::graph::*;
pub use crate::node_idx::NodeIdx;
pub use crate::test_cases::*;
