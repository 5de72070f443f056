//! # Ancestree
//!
//! Coalescent simulation with recombination and tree-sequence genealogy
//! queries. Given a sample of genomes, an effective population size, a
//! genome length, and rates of recombination and mutation, the crate
//! simulates the ancestral process backwards in time (Hudson's algorithm),
//! stores the resulting genealogy compactly as an edge list, reconstructs
//! the local tree for any genomic interval on demand, and overlays point
//! mutations under the infinite-sites model.
//!
//! ```
//! use ancestree::prelude::*;
//!
//! let params = SimulationParameters::single_locus(5, 1000.0, 10).unwrap();
//! let ts = simulate(&params).unwrap();
//! assert_eq!(ts.num_trees(), 1);
//!
//! let tree = ts.trees().next().unwrap();
//! let root = tree.root().unwrap();
//! assert_eq!(tree.num_leaves(root).unwrap(), 5);
//! ```

pub mod base;
pub mod errors;
pub mod prelude;
pub mod simulation;
pub mod trees;

pub use base::{NodeId, NULL_NODE};
pub use simulation::{simulate, SimulationParameters};
pub use trees::TreeSequence;
