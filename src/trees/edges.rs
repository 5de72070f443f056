//! Edge records and their compact, sorted store.
//!
//! Edges are the persistent representation of the genealogy: each one states
//! that `parent` is the immediate ancestor of `child` over the half-open
//! genomic interval `[left, right)`. The store is append-only during
//! simulation and read-only afterwards; `finalize` freezes it and builds the
//! index orders the sweep reconstruction depends on.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::base::{Interval, NodeId, NodeTable};
use crate::errors::{InvariantViolation, OutOfRangeError, SimulationError};

/// One ancestry edge: `parent` is the immediate ancestor of `child` over
/// `[left, right)`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Edge {
    pub parent: NodeId,
    pub child: NodeId,
    /// Left coordinate of the interval, inclusive.
    pub left: f64,
    /// Right coordinate of the interval, exclusive.
    pub right: f64,
}

impl Edge {
    /// Create an edge record.
    pub fn new(parent: NodeId, child: NodeId, left: f64, right: f64) -> Self {
        Self {
            parent,
            child,
            left,
            right,
        }
    }

    /// The genomic interval this edge covers.
    pub fn interval(&self) -> Interval {
        Interval::new(self.left, self.right)
    }

    /// Width of the covered interval.
    pub fn span(&self) -> f64 {
        self.right - self.left
    }
}

impl fmt::Display for Edge {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "({}, {}) over [{}, {})",
            self.parent, self.child, self.left, self.right
        )
    }
}

/// Append-then-finalize storage of edges.
///
/// `append` validates the time-ordering invariant against the node table;
/// `finalize` freezes the store and computes the insertion order (by `left`,
/// then parent time ascending, then insertion order) and the removal order
/// (by `right`, then parent time descending) used by the sweep.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EdgeStore {
    edges: Vec<Edge>,
    parent_times: Vec<f64>,
    sequence_length: f64,
    node_count: usize,
    insertion_order: Vec<usize>,
    removal_order: Vec<usize>,
    finalized: bool,
}

impl EdgeStore {
    /// Create an empty store for a genome of the given length.
    pub fn new(sequence_length: f64) -> Self {
        Self {
            edges: Vec::new(),
            parent_times: Vec::new(),
            sequence_length,
            node_count: 0,
            insertion_order: Vec::new(),
            removal_order: Vec::new(),
            finalized: false,
        }
    }

    /// Append an edge.
    ///
    /// # Errors
    ///
    /// [`InvariantViolation::AppendAfterFinalize`] once the store is
    /// finalized; [`OutOfRangeError`] for unknown node ids or an interval
    /// outside `[0, length)`; [`InvariantViolation::EdgeTimeOrder`] if the
    /// parent is not strictly older than the child.
    pub fn append(&mut self, edge: Edge, nodes: &NodeTable) -> Result<(), SimulationError> {
        if self.finalized {
            return Err(InvariantViolation::AppendAfterFinalize.into());
        }
        if !(edge.left >= 0.0 && edge.left < edge.right && edge.right <= self.sequence_length) {
            return Err(OutOfRangeError::Interval {
                left: edge.left,
                right: edge.right,
                length: self.sequence_length,
            }
            .into());
        }
        let parent_time = nodes.time(edge.parent)?;
        let child_time = nodes.time(edge.child)?;
        if parent_time <= child_time {
            return Err(InvariantViolation::EdgeTimeOrder {
                parent: edge.parent,
                child: edge.child,
                parent_time,
                child_time,
            }
            .into());
        }
        self.node_count = self
            .node_count
            .max(edge.parent.index() + 1)
            .max(edge.child.index() + 1);
        self.edges.push(edge);
        self.parent_times.push(parent_time);
        Ok(())
    }

    /// Freeze the store and build the sweep index orders. Idempotent.
    pub fn finalize(&mut self) {
        if self.finalized {
            return;
        }
        let mut insertion: Vec<usize> = (0..self.edges.len()).collect();
        insertion.sort_by(|&a, &b| {
            self.edges[a]
                .left
                .total_cmp(&self.edges[b].left)
                .then(self.parent_times[a].total_cmp(&self.parent_times[b]))
                .then(a.cmp(&b))
        });
        let mut removal: Vec<usize> = (0..self.edges.len()).collect();
        removal.sort_by(|&a, &b| {
            self.edges[a]
                .right
                .total_cmp(&self.edges[b].right)
                .then(self.parent_times[b].total_cmp(&self.parent_times[a]))
                .then(a.cmp(&b))
        });
        self.insertion_order = insertion;
        self.removal_order = removal;
        self.finalized = true;
    }

    /// Whether `finalize` has been called.
    pub fn is_finalized(&self) -> bool {
        self.finalized
    }

    /// Number of stored edges.
    pub fn edge_count(&self) -> usize {
        self.edges.len()
    }

    /// One past the largest node id referenced by any edge.
    pub fn node_count(&self) -> usize {
        self.node_count
    }

    /// Length of the genome the edges live on.
    pub fn sequence_length(&self) -> f64 {
        self.sequence_length
    }

    /// Iterator over edges in insertion (event-time) order.
    pub fn iter(&self) -> impl Iterator<Item = &Edge> {
        self.edges.iter()
    }

    /// Restartable iterator over edges ordered by `left`, ties broken by
    /// parent time ascending, then insertion order.
    ///
    /// # Panics
    ///
    /// If the store has not been finalized; building a view over a store
    /// that is still being appended to is a programming error.
    pub fn iter_sorted_by_left(&self) -> impl Iterator<Item = &Edge> {
        assert!(
            self.finalized,
            "edge store must be finalized before sorted iteration"
        );
        self.insertion_order.iter().map(|&i| &self.edges[i])
    }

    pub(crate) fn edge_slice(&self) -> &[Edge] {
        &self.edges
    }

    pub(crate) fn insertion_order(&self) -> &[usize] {
        &self.insertion_order
    }

    pub(crate) fn removal_order(&self) -> &[usize] {
        &self.removal_order
    }
}
