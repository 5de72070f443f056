//! Commonly used imports for convenience.
//!
//! # Example
//!
//! ```
//! use ancestree::prelude::*;
//!
//! let params = SimulationParameters::single_locus(2, 100.0, 1).unwrap();
//! let ts = simulate(&params).unwrap();
//! assert_eq!(ts.num_samples(), 2);
//! ```

pub use crate::base::{Interval, Node, NodeId, NodeTable, NULL_NODE};
pub use crate::errors::{
    ConfigurationError, InternalError, InvariantViolation, OutOfRangeError, SimulationError,
};
pub use crate::simulation::{
    run_replicates, simulate, RandomStream, SimulationBuilder, SimulationParameters,
};
pub use crate::trees::{Edge, EdgeStore, LocalTree, Mutation, TreeSequence};
