//! Sweep-line reconstruction of successive local trees.
//!
//! The reconstructor advances a position pointer across the genome,
//! maintaining a mutable parent/children adjacency. At each breakpoint it
//! removes the edges whose interval ends there, inserts the edges whose
//! interval starts there, and emits an owned [`LocalTree`] snapshot for the
//! stretch up to the next breakpoint. The emitted intervals exactly
//! partition `[0, length)`.

use std::sync::Arc;

use crate::base::{Interval, NodeId, NULL_NODE};
use crate::trees::{EdgeStore, LocalTree, TreeSequence};

/// Lazy, pull-based iterator over `(interval, tree)` snapshots.
///
/// Single-pass; restart by asking the tree sequence for a new iterator.
pub struct TreeIterator<'ts> {
    edges: &'ts EdgeStore,
    times: Arc<Vec<f64>>,
    num_samples: usize,
    parent: Vec<NodeId>,
    children: Vec<Vec<NodeId>>,
    insertion_idx: usize,
    removal_idx: usize,
    position: f64,
}

impl<'ts> TreeIterator<'ts> {
    pub(crate) fn new(tree_sequence: &'ts TreeSequence) -> Self {
        let node_count = tree_sequence.num_nodes();
        Self {
            edges: tree_sequence.edge_store(),
            times: tree_sequence.times_arc(),
            num_samples: tree_sequence.num_samples(),
            parent: vec![NULL_NODE; node_count],
            children: vec![Vec::new(); node_count],
            insertion_idx: 0,
            removal_idx: 0,
            position: 0.0,
        }
    }
}

impl Iterator for TreeIterator<'_> {
    type Item = LocalTree;

    fn next(&mut self) -> Option<LocalTree> {
        let length = self.edges.sequence_length();
        if self.position >= length {
            return None;
        }
        let x = self.position;
        let edges = self.edges.edge_slice();
        let removal_order = self.edges.removal_order();
        let insertion_order = self.edges.insertion_order();

        // Deactivate edges ending at the current breakpoint.
        while self.removal_idx < removal_order.len() {
            let edge = &edges[removal_order[self.removal_idx]];
            if edge.right != x {
                break;
            }
            self.parent[edge.child.index()] = NULL_NODE;
            self.children[edge.parent.index()].retain(|&c| c != edge.child);
            self.removal_idx += 1;
        }
        // Activate edges starting here.
        while self.insertion_idx < insertion_order.len() {
            let edge = &edges[insertion_order[self.insertion_idx]];
            if edge.left != x {
                break;
            }
            self.parent[edge.child.index()] = edge.parent;
            self.children[edge.parent.index()].push(edge.child);
            self.insertion_idx += 1;
        }

        // The snapshot holds until the nearest upcoming boundary.
        let mut right = length;
        if self.insertion_idx < insertion_order.len() {
            right = right.min(edges[insertion_order[self.insertion_idx]].left);
        }
        if self.removal_idx < removal_order.len() {
            right = right.min(edges[removal_order[self.removal_idx]].right);
        }
        self.position = right;

        Some(LocalTree::from_state(
            Interval::new(x, right),
            self.parent.clone(),
            self.children.clone(),
            Arc::clone(&self.times),
            self.num_samples,
        ))
    }
}
