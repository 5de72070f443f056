//! Tree-sequence storage, reconstruction, and queries.
//!
//! This module provides the persistent edge representation of a simulated
//! genealogy, the sweep that reconstructs its local trees, the query surface
//! over each tree, and the infinite-sites mutation overlay.

pub mod edges;
pub mod local;
pub mod mutation;
pub mod sequence;
pub mod sweep;

pub use edges::{Edge, EdgeStore};
pub use local::{Ancestors, LocalTree};
pub use mutation::{generate_mutations, Mutation};
pub use sequence::TreeSequence;
pub use sweep::TreeIterator;
