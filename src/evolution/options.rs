//! # GaOptions
//!
//! The `GaOptions` struct holds the configuration of the evolutionary driver:
//! population size, variation probabilities, elite count, the diversity
//! emphasis used by survivor selection and the threshold above which
//! offspring evaluation runs in parallel.
//!
//! Degenerate configurations are rejected at construction, never at run time.
//!
//! ## Example
//!
//! ```rust
//! use evoperm::evolution::GaOptions;
//!
//! let options = GaOptions::builder()
//!     .population_size(50)
//!     .mutation_probability(1.0)
//!     .crossover_probability(80.0)
//!     .elite_count(2)
//!     .build()
//!     .unwrap();
//!
//! assert_eq!(options.population_size(), 50);
//! ```

use crate::error::{EvoError, Result};

/// Configuration options for [`GeneticAlgorithm`](super::GeneticAlgorithm).
///
/// Probabilities use percentage semantics (0–100).
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone)]
pub struct GaOptions {
    population_size: usize,
    mutation_probability: f64,
    crossover_probability: f64,
    elite_count: usize,
    /// Minimum number of offspring to evaluate in parallel.
    parallel_threshold: usize,
    /// Initial weight of the diversity objective in survivor selection.
    /// Decays toward zero as the run approaches its time budget.
    initial_diversity_weight: f64,
}

impl GaOptions {
    /// Creates a new `GaOptions` with the given core parameters.
    ///
    /// # Errors
    ///
    /// Returns [`EvoError::Configuration`] if:
    /// - `population_size` is smaller than 2
    /// - `elite_count` is not smaller than `population_size`
    /// - either probability lies outside `0.0..=100.0`
    pub fn new(
        population_size: usize,
        mutation_probability: f64,
        crossover_probability: f64,
        elite_count: usize,
    ) -> Result<Self> {
        Self::validate(
            population_size,
            mutation_probability,
            crossover_probability,
            elite_count,
        )?;
        Ok(Self {
            population_size,
            mutation_probability,
            crossover_probability,
            elite_count,
            parallel_threshold: 1000,
            initial_diversity_weight: 1.0,
        })
    }

    fn validate(
        population_size: usize,
        mutation_probability: f64,
        crossover_probability: f64,
        elite_count: usize,
    ) -> Result<()> {
        if population_size < 2 {
            return Err(EvoError::Configuration(
                "Population size must be at least 2".to_string(),
            ));
        }
        if elite_count >= population_size {
            return Err(EvoError::Configuration(format!(
                "Elite count ({}) must be smaller than the population size ({})",
                elite_count, population_size
            )));
        }
        if !(0.0..=100.0).contains(&mutation_probability) {
            return Err(EvoError::Configuration(
                "Mutation probability must be a percentage between 0 and 100".to_string(),
            ));
        }
        if !(0.0..=100.0).contains(&crossover_probability) {
            return Err(EvoError::Configuration(
                "Crossover probability must be a percentage between 0 and 100".to_string(),
            ));
        }
        Ok(())
    }

    pub fn population_size(&self) -> usize {
        self.population_size
    }

    pub fn mutation_probability(&self) -> f64 {
        self.mutation_probability
    }

    pub fn crossover_probability(&self) -> f64 {
        self.crossover_probability
    }

    pub fn elite_count(&self) -> usize {
        self.elite_count
    }

    /// Returns the minimum number of offspring to evaluate in parallel.
    pub fn parallel_threshold(&self) -> usize {
        self.parallel_threshold
    }

    /// Returns the initial weight of the diversity objective.
    pub fn initial_diversity_weight(&self) -> f64 {
        self.initial_diversity_weight
    }

    /// Returns a builder for creating a `GaOptions` instance.
    pub fn builder() -> GaOptionsBuilder {
        GaOptionsBuilder::default()
    }
}

/// Builder for [`GaOptions`].
///
/// Provides a fluent interface; unset fields fall back to the defaults of a
/// 50-individual population with 1% mutation, 80% crossover and no elites.
#[derive(Debug, Clone, Default)]
pub struct GaOptionsBuilder {
    population_size: Option<usize>,
    mutation_probability: Option<f64>,
    crossover_probability: Option<f64>,
    elite_count: Option<usize>,
    parallel_threshold: Option<usize>,
    initial_diversity_weight: Option<f64>,
}

impl GaOptionsBuilder {
    /// Sets the population size.
    pub fn population_size(mut self, value: usize) -> Self {
        self.population_size = Some(value);
        self
    }

    /// Sets the mutation probability (percentage, 0–100).
    pub fn mutation_probability(mut self, value: f64) -> Self {
        self.mutation_probability = Some(value);
        self
    }

    /// Sets the crossover probability (percentage, 0–100).
    pub fn crossover_probability(mut self, value: f64) -> Self {
        self.crossover_probability = Some(value);
        self
    }

    /// Sets the number of top individuals preserved verbatim each generation.
    pub fn elite_count(mut self, value: usize) -> Self {
        self.elite_count = Some(value);
        self
    }

    /// Sets the parallel evaluation threshold.
    pub fn parallel_threshold(mut self, value: usize) -> Self {
        self.parallel_threshold = Some(value);
        self
    }

    /// Sets the initial weight of the diversity objective.
    pub fn initial_diversity_weight(mut self, value: f64) -> Self {
        self.initial_diversity_weight = Some(value);
        self
    }

    /// Builds the `GaOptions` instance.
    ///
    /// # Errors
    ///
    /// Returns [`EvoError::Configuration`] under the same conditions as
    /// [`GaOptions::new`].
    pub fn build(self) -> Result<GaOptions> {
        let mut options = GaOptions::new(
            self.population_size.unwrap_or(50),
            self.mutation_probability.unwrap_or(1.0),
            self.crossover_probability.unwrap_or(80.0),
            self.elite_count.unwrap_or(0),
        )?;
        if let Some(threshold) = self.parallel_threshold {
            options.parallel_threshold = threshold;
        }
        if let Some(weight) = self.initial_diversity_weight {
            if weight < 0.0 {
                return Err(EvoError::Configuration(
                    "Diversity weight must not be negative".to_string(),
                ));
            }
            options.initial_diversity_weight = weight;
        }
        Ok(options)
    }
}
