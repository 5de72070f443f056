//! The tree sequence: nodes, edges, and mutations bundled for queries.
//!
//! A `TreeSequence` is the read-only product of one simulation run. It
//! stores the genealogy compactly as an edge list and reconstructs any of
//! its local trees on demand, without materializing them all.

use std::sync::Arc;

use crate::base::{NodeId, NodeTable};
use crate::errors::{InvariantViolation, OutOfRangeError, SimulationError};
use crate::trees::{Edge, EdgeStore, Mutation, TreeIterator};

/// A complete genealogical history: node table, finalized edge store, and
/// position-sorted mutations.
#[derive(Debug, Clone)]
pub struct TreeSequence {
    nodes: NodeTable,
    edges: EdgeStore,
    mutations: Vec<Mutation>,
    times: Arc<Vec<f64>>,
    num_trees: usize,
}

impl TreeSequence {
    /// Bundle finalized tables into a tree sequence.
    ///
    /// Mutations are sorted by position; their positions must lie within
    /// `[0, length)`.
    ///
    /// # Errors
    ///
    /// [`InvariantViolation::UnfinalizedEdges`] if the edge store still
    /// accepts appends; [`OutOfRangeError::Position`] for a mutation
    /// outside the genome.
    pub fn new(
        nodes: NodeTable,
        edges: EdgeStore,
        mut mutations: Vec<Mutation>,
    ) -> Result<Self, SimulationError> {
        if !edges.is_finalized() {
            return Err(InvariantViolation::UnfinalizedEdges.into());
        }
        let length = edges.sequence_length();
        for m in &mutations {
            if !(m.position >= 0.0 && m.position < length) {
                return Err(OutOfRangeError::Position {
                    position: m.position,
                    length,
                }
                .into());
            }
        }
        mutations.sort_by(|a, b| a.position.total_cmp(&b.position));
        let num_trees = count_trees(&edges);
        let times = Arc::new(nodes.times());
        Ok(Self {
            nodes,
            edges,
            mutations,
            times,
            num_trees,
        })
    }

    /// Lazy iterator over the local trees, left to right. The intervals of
    /// the yielded trees exactly partition `[0, length)`.
    pub fn trees(&self) -> TreeIterator<'_> {
        TreeIterator::new(self)
    }

    /// Iterator over edges in the stable documented order: by `left`, then
    /// parent time ascending, then insertion order.
    pub fn edges(&self) -> impl Iterator<Item = &Edge> {
        self.edges.iter_sorted_by_left()
    }

    /// The edge records, in the same order as [`TreeSequence::edges`].
    ///
    /// External collaborators that dump or encode the genealogy consume
    /// this enumeration.
    pub fn records(&self) -> impl Iterator<Item = &Edge> {
        self.edges.iter_sorted_by_left()
    }

    /// Number of distinct local trees along the genome.
    pub fn num_trees(&self) -> usize {
        self.num_trees
    }

    /// Number of edges.
    pub fn num_edges(&self) -> usize {
        self.edges.edge_count()
    }

    /// Number of nodes, samples included.
    pub fn num_nodes(&self) -> usize {
        self.nodes.len()
    }

    /// Number of sample nodes.
    pub fn num_samples(&self) -> usize {
        self.nodes.sample_count()
    }

    /// Length of the simulated region.
    pub fn sequence_length(&self) -> f64 {
        self.edges.sequence_length()
    }

    /// The time of node `u` in generations.
    pub fn node_time(&self, u: NodeId) -> Result<f64, OutOfRangeError> {
        self.nodes.time(u)
    }

    /// Iterator over the sample node ids.
    pub fn samples(&self) -> impl Iterator<Item = NodeId> + '_ {
        self.nodes.samples()
    }

    /// The node table.
    pub fn node_table(&self) -> &NodeTable {
        &self.nodes
    }

    /// The finalized edge store.
    pub fn edge_store(&self) -> &EdgeStore {
        &self.edges
    }

    /// All mutations, sorted by position ascending.
    pub fn mutations(&self) -> &[Mutation] {
        &self.mutations
    }

    /// Number of mutations.
    pub fn num_mutations(&self) -> usize {
        self.mutations.len()
    }

    /// The mutations whose positions fall in `[left, right)`, as a
    /// sub-slice of the position-sorted list.
    ///
    /// # Errors
    ///
    /// [`OutOfRangeError::Interval`] if the query interval does not lie
    /// within `[0, length)`.
    pub fn mutations_between(
        &self,
        left: f64,
        right: f64,
    ) -> Result<&[Mutation], OutOfRangeError> {
        let length = self.sequence_length();
        if !(left >= 0.0 && left <= right && right <= length) {
            return Err(OutOfRangeError::Interval {
                left,
                right,
                length,
            });
        }
        let start = self.mutations.partition_point(|m| m.position < left);
        let end = self.mutations.partition_point(|m| m.position < right);
        Ok(&self.mutations[start..end])
    }

    pub(crate) fn times_arc(&self) -> Arc<Vec<f64>> {
        Arc::clone(&self.times)
    }
}

/// Distinct interior edge boundaries + 1. The sweep emits exactly one tree
/// per boundary gap, so this matches the number of trees it yields.
fn count_trees(edges: &EdgeStore) -> usize {
    let length = edges.sequence_length();
    let mut coords: Vec<f64> = edges
        .iter()
        .flat_map(|e| [e.left, e.right])
        .filter(|&c| c > 0.0 && c < length)
        .collect();
    coords.sort_by(f64::total_cmp);
    coords.dedup();
    coords.len() + 1
}

#[cfg(test)]
mod tests {
    use super::*;

    fn simple_sequence(mutations: Vec<Mutation>) -> Result<TreeSequence, SimulationError> {
        let mut nodes = NodeTable::with_samples(2);
        let parent = nodes.add_ancestral(3.0, 0);
        let mut store = EdgeStore::new(10.0);
        store
            .append(Edge::new(parent, NodeId::from(0usize), 0.0, 10.0), &nodes)
            .unwrap();
        store
            .append(Edge::new(parent, NodeId::from(1usize), 0.0, 10.0), &nodes)
            .unwrap();
        store.finalize();
        TreeSequence::new(nodes, store, mutations)
    }

    #[test]
    fn test_rejects_unfinalized_edges() {
        let nodes = NodeTable::with_samples(2);
        let store = EdgeStore::new(1.0);
        let err = TreeSequence::new(nodes, store, Vec::new()).unwrap_err();
        assert!(matches!(
            err,
            SimulationError::Invariant(InvariantViolation::UnfinalizedEdges)
        ));
    }

    #[test]
    fn test_rejects_mutation_outside_genome() {
        let err = simple_sequence(vec![Mutation {
            position: 10.0,
            node: NodeId::from(0usize),
        }])
        .unwrap_err();
        assert!(matches!(err, SimulationError::OutOfRange(_)));
    }

    #[test]
    fn test_mutations_are_sorted_on_construction() {
        let ts = simple_sequence(vec![
            Mutation {
                position: 7.5,
                node: NodeId::from(1usize),
            },
            Mutation {
                position: 2.5,
                node: NodeId::from(0usize),
            },
        ])
        .unwrap();
        let positions: Vec<f64> = ts.mutations().iter().map(|m| m.position).collect();
        assert_eq!(positions, vec![2.5, 7.5]);
    }

    #[test]
    fn test_counts_and_length() {
        let ts = simple_sequence(Vec::new()).unwrap();
        assert_eq!(ts.num_trees(), 1);
        assert_eq!(ts.num_edges(), 2);
        assert_eq!(ts.num_nodes(), 3);
        assert_eq!(ts.num_samples(), 2);
        assert_eq!(ts.sequence_length(), 10.0);
        assert_eq!(ts.num_mutations(), 0);
    }

    #[test]
    fn test_mutations_between() {
        let ts = simple_sequence(vec![
            Mutation {
                position: 1.0,
                node: NodeId::from(0usize),
            },
            Mutation {
                position: 4.0,
                node: NodeId::from(1usize),
            },
            Mutation {
                position: 8.0,
                node: NodeId::from(0usize),
            },
        ])
        .unwrap();
        let window = ts.mutations_between(1.0, 8.0).unwrap();
        assert_eq!(window.len(), 2);
        assert_eq!(window[0].position, 1.0);
        assert_eq!(window[1].position, 4.0);
        assert!(ts.mutations_between(0.0, 10.0).unwrap().len() == 3);
        assert!(ts.mutations_between(-1.0, 5.0).is_err());
        assert!(ts.mutations_between(5.0, 11.0).is_err());
    }

    #[test]
    fn test_records_match_edges() {
        let ts = simple_sequence(Vec::new()).unwrap();
        let via_edges: Vec<Edge> = ts.edges().copied().collect();
        let via_records: Vec<Edge> = ts.records().copied().collect();
        assert_eq!(via_edges, via_records);
    }
}
