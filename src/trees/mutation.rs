//! Infinite-sites mutation placement.
//!
//! Mutations are thrown down on the branches of the genealogy after the
//! ancestry process has finished: for each edge, the number of mutations is
//! Poisson with mean `rate × span × branch length`, and each mutation gets a
//! uniform position within the edge's interval. Under the infinite-sites
//! model every mutation occupies a distinct position; a collision is a
//! probability-zero event and is not separately enforced.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::base::{NodeId, NodeTable};
use crate::errors::{InvariantViolation, SimulationError};
use crate::simulation::RandomStream;
use crate::trees::EdgeStore;

/// One point mutation: its genomic position and the node above which it
/// falls (the child side of the carrying edge).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Mutation {
    pub position: f64,
    pub node: NodeId,
}

impl fmt::Display for Mutation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.6} over node {}", self.position, self.node)
    }
}

/// Generate infinite-sites mutations over a finalized edge store.
///
/// Edges are visited in insertion order so that a fixed seed reproduces the
/// same mutation set; the result is sorted by position ascending.
///
/// # Errors
///
/// [`InvariantViolation::UnfinalizedEdges`] if the store is still
/// accepting appends; node lookups propagate [`crate::errors::OutOfRangeError`].
pub fn generate_mutations(
    nodes: &NodeTable,
    edges: &EdgeStore,
    mutation_rate: f64,
    rng: &mut RandomStream,
) -> Result<Vec<Mutation>, SimulationError> {
    if !edges.is_finalized() {
        return Err(InvariantViolation::UnfinalizedEdges.into());
    }
    let mut mutations = Vec::new();
    for edge in edges.iter() {
        let branch_length = nodes.time(edge.parent)? - nodes.time(edge.child)?;
        let mean = mutation_rate * edge.span() * branch_length;
        let count = rng.poisson(mean);
        for _ in 0..count {
            mutations.push(Mutation {
                position: rng.uniform(edge.left, edge.right),
                node: edge.child,
            });
        }
    }
    mutations.sort_by(|a, b| a.position.total_cmp(&b.position));
    Ok(mutations)
}
