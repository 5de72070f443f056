//! Simulation parameters.
//!
//! This module provides the validated parameter set for a single coalescent
//! simulation run. Validation is eager and exhaustive: an invalid field is
//! rejected at construction, before any event loop starts.

use serde::{Deserialize, Serialize};

use crate::errors::ConfigurationError;
use crate::simulation::SimulationBuilder;

/// Immutable input to one simulation run.
///
/// Construct with [`SimulationParameters::new`] or via the fluent
/// [`SimulationBuilder`]. Defaults follow the classical single-locus setup:
/// unit sequence length, no recombination, no mutation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SimulationParameters {
    /// Number of sampled genomes (at least 2).
    sample_size: usize,
    /// Effective (diploid) population size.
    ne: f64,
    /// Length of the simulated region in bases.
    length: f64,
    /// Recombination rate per base per generation.
    recombination_rate: f64,
    /// Mutation rate per base per generation.
    mutation_rate: f64,
    /// Seed for the reproducible random stream.
    random_seed: u64,
}

impl SimulationParameters {
    /// Create a fully specified parameter set.
    ///
    /// # Errors
    ///
    /// Returns a [`ConfigurationError`] if `sample_size < 2`, `ne <= 0`,
    /// `length <= 0`, or either rate is negative.
    pub fn new(
        sample_size: usize,
        ne: f64,
        length: f64,
        recombination_rate: f64,
        mutation_rate: f64,
        random_seed: u64,
    ) -> Result<Self, ConfigurationError> {
        if sample_size < 2 {
            return Err(ConfigurationError::SampleSizeTooSmall(sample_size));
        }
        if !(ne > 0.0) {
            return Err(ConfigurationError::NonPositivePopulationSize(ne));
        }
        if !(length > 0.0) {
            return Err(ConfigurationError::NonPositiveLength(length));
        }
        if !(recombination_rate >= 0.0) {
            return Err(ConfigurationError::NegativeRecombinationRate(
                recombination_rate,
            ));
        }
        if !(mutation_rate >= 0.0) {
            return Err(ConfigurationError::NegativeMutationRate(mutation_rate));
        }
        Ok(Self {
            sample_size,
            ne,
            length,
            recombination_rate,
            mutation_rate,
            random_seed,
        })
    }

    /// Single-locus parameters: unit length, no recombination, no mutation.
    pub fn single_locus(
        sample_size: usize,
        ne: f64,
        random_seed: u64,
    ) -> Result<Self, ConfigurationError> {
        Self::new(sample_size, ne, 1.0, 0.0, 0.0, random_seed)
    }

    /// Start a fluent builder.
    pub fn builder() -> SimulationBuilder {
        SimulationBuilder::new()
    }

    /// Number of sampled genomes.
    pub fn sample_size(&self) -> usize {
        self.sample_size
    }

    /// Effective (diploid) population size.
    pub fn ne(&self) -> f64 {
        self.ne
    }

    /// Length of the simulated region.
    pub fn length(&self) -> f64 {
        self.length
    }

    /// Recombination rate per base per generation.
    pub fn recombination_rate(&self) -> f64 {
        self.recombination_rate
    }

    /// Mutation rate per base per generation.
    pub fn mutation_rate(&self) -> f64 {
        self.mutation_rate
    }

    /// Random seed.
    pub fn random_seed(&self) -> u64 {
        self.random_seed
    }

    /// A copy of these parameters with a different seed.
    ///
    /// Used by the replicate runner to fan one configuration out over
    /// independently seeded runs.
    pub fn with_seed(&self, random_seed: u64) -> Self {
        Self {
            random_seed,
            ..self.clone()
        }
    }
}
