//! Simulation engine and configuration.
//!
//! This module provides the validated parameter set, the seeded random
//! stream, and the coalescent-with-recombination ancestry process that
//! together produce a tree sequence.

pub mod builder;
pub mod engine;
pub mod parameters;
pub mod random;

pub use builder::SimulationBuilder;
pub use engine::{run_replicates, simulate, AncestryProcess};
pub use parameters::SimulationParameters;
pub use random::RandomStream;
