//! Builder pattern for simulation parameters.
//!
//! Provides a fluent API for assembling a [`SimulationParameters`] with
//! sensible defaults and build-time validation.

use crate::errors::ConfigurationError;
use crate::simulation::SimulationParameters;

/// Builder for [`SimulationParameters`] with a fluent API.
///
/// `sample_size` and `ne` are required; everything else defaults to the
/// single-locus setup (`length = 1.0`, no recombination, no mutation,
/// seed 0).
///
/// # Examples
///
/// ```
/// use ancestree::simulation::SimulationBuilder;
///
/// let params = SimulationBuilder::new()
///     .sample_size(5)
///     .ne(1000.0)
///     .length(1e4)
///     .recombination_rate(2e-8)
///     .mutation_rate(2e-8)
///     .random_seed(10)
///     .build()
///     .unwrap();
/// assert_eq!(params.sample_size(), 5);
/// ```
#[derive(Debug, Clone, Default)]
pub struct SimulationBuilder {
    sample_size: Option<usize>,
    ne: Option<f64>,
    length: f64,
    recombination_rate: f64,
    mutation_rate: f64,
    random_seed: u64,
}

impl SimulationBuilder {
    /// Create a builder with default optional values.
    pub fn new() -> Self {
        Self {
            sample_size: None,
            ne: None,
            length: 1.0,
            recombination_rate: 0.0,
            mutation_rate: 0.0,
            random_seed: 0,
        }
    }

    /// Set the number of sampled genomes (required).
    pub fn sample_size(mut self, sample_size: usize) -> Self {
        self.sample_size = Some(sample_size);
        self
    }

    /// Set the effective (diploid) population size (required).
    pub fn ne(mut self, ne: f64) -> Self {
        self.ne = Some(ne);
        self
    }

    /// Set the sequence length in bases (default: 1.0).
    pub fn length(mut self, length: f64) -> Self {
        self.length = length;
        self
    }

    /// Set the recombination rate per base per generation (default: 0.0).
    pub fn recombination_rate(mut self, rate: f64) -> Self {
        self.recombination_rate = rate;
        self
    }

    /// Set the mutation rate per base per generation (default: 0.0).
    pub fn mutation_rate(mut self, rate: f64) -> Self {
        self.mutation_rate = rate;
        self
    }

    /// Set the random seed (default: 0).
    pub fn random_seed(mut self, seed: u64) -> Self {
        self.random_seed = seed;
        self
    }

    /// Validate and build the parameter set.
    ///
    /// # Errors
    ///
    /// Returns a [`ConfigurationError`] if a required field is missing or
    /// any field is invalid. A missing `sample_size` reports as a sample
    /// size of zero; a missing `ne` reports as a non-positive size.
    pub fn build(self) -> Result<SimulationParameters, ConfigurationError> {
        let sample_size = self.sample_size.unwrap_or(0);
        let ne = self.ne.unwrap_or(0.0);
        SimulationParameters::new(
            sample_size,
            ne,
            self.length,
            self.recombination_rate,
            self.mutation_rate,
            self.random_seed,
        )
    }
}
