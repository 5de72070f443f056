//! Node identifiers and the dense node table.
//!
//! Nodes are addressed by dense integer ids. Samples occupy ids
//! `0..sample_size` at time zero; ancestral nodes are appended in the order
//! coalescence events create them, so ids are also ordered by creation.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::errors::OutOfRangeError;

/// Identifier of a node in a tree sequence.
///
/// A thin wrapper over `i32` so the reserved sentinel [`NULL_NODE`] stays
/// distinct from every valid id.
#[repr(transparent)]
#[derive(
    Copy, Clone, Debug, Eq, PartialEq, Ord, PartialOrd, Hash, Serialize, Deserialize,
)]
pub struct NodeId(i32);

/// Sentinel id returned where no node exists, e.g. for the parent of a root.
pub const NULL_NODE: NodeId = NodeId(-1);

impl NodeId {
    /// Create an id from a raw value. Negative values other than the
    /// sentinel are never produced by this crate.
    pub fn new(value: i32) -> Self {
        Self(value)
    }

    /// The raw id value.
    pub fn value(self) -> i32 {
        self.0
    }

    /// Whether this id is the [`NULL_NODE`] sentinel.
    pub fn is_null(self) -> bool {
        self.0 < 0
    }

    pub(crate) fn index(self) -> usize {
        debug_assert!(self.0 >= 0);
        self.0 as usize
    }
}

impl From<usize> for NodeId {
    fn from(value: usize) -> Self {
        Self(value as i32)
    }
}

impl From<i32> for NodeId {
    fn from(value: i32) -> Self {
        Self(value)
    }
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// One row of the node table.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Node {
    /// Time of the node in generations before present.
    pub time: f64,
    /// Population label; a single panmictic population uses 0.
    pub population: i32,
}

/// Dense, append-only table of nodes.
///
/// Immutable once the ancestry process completes; queries after that point
/// are read-only.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct NodeTable {
    nodes: Vec<Node>,
    sample_count: usize,
}

impl NodeTable {
    /// Create a table pre-populated with `sample_count` sample nodes at
    /// time zero.
    pub fn with_samples(sample_count: usize) -> Self {
        let nodes = (0..sample_count)
            .map(|_| Node {
                time: 0.0,
                population: 0,
            })
            .collect();
        Self {
            nodes,
            sample_count,
        }
    }

    /// Append an ancestral node and return its id.
    pub fn add_ancestral(&mut self, time: f64, population: i32) -> NodeId {
        let id = NodeId::from(self.nodes.len());
        self.nodes.push(Node { time, population });
        id
    }

    /// Number of nodes in the table.
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Whether the table holds no nodes.
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Number of sample nodes (ids `0..sample_count`).
    pub fn sample_count(&self) -> usize {
        self.sample_count
    }

    /// Whether `id` addresses a row of this table.
    pub fn contains(&self, id: NodeId) -> bool {
        !id.is_null() && id.index() < self.nodes.len()
    }

    /// The node row for `id`.
    pub fn get(&self, id: NodeId) -> Result<&Node, OutOfRangeError> {
        if self.contains(id) {
            Ok(&self.nodes[id.index()])
        } else {
            Err(OutOfRangeError::NodeId {
                id,
                node_count: self.nodes.len(),
            })
        }
    }

    /// The time of node `id` in generations.
    pub fn time(&self, id: NodeId) -> Result<f64, OutOfRangeError> {
        self.get(id).map(|n| n.time)
    }

    /// Iterator over sample node ids.
    pub fn samples(&self) -> impl Iterator<Item = NodeId> + '_ {
        (0..self.sample_count).map(NodeId::from)
    }

    /// Iterator over all node rows in id order.
    pub fn iter(&self) -> impl Iterator<Item = &Node> {
        self.nodes.iter()
    }

    /// Times of all nodes, indexed by id.
    pub fn times(&self) -> Vec<f64> {
        self.nodes.iter().map(|n| n.time).collect()
    }
}
