//! Base types for genealogy representation.
//!
//! This module provides the foundational types shared by the simulator and
//! the tree-sequence query layer: node identifiers, the node table, and
//! half-open genomic intervals.

mod interval;
mod node;

pub use interval::Interval;
pub use node::{Node, NodeId, NodeTable, NULL_NODE};
