//! # Function-Minimization Subsystem
//!
//! The second [`Individual`] representation: a bit-string genotype decoded
//! into a point of a continuous domain and scored by an objective function.
//! Loci are single bits, so mutation is independent bit-flips and crossover
//! copies the partner's tail bits.
//!
//! The [`benchmarks`] module ships the classic test objectives the optimizer
//! is calibrated against.
//!
//! ## Example
//!
//! ```rust
//! use evoperm::function::{benchmarks, FunctionIndividual};
//! use evoperm::individual::Individual;
//! use evoperm::rng::RandomNumberGenerator;
//!
//! let mut rng = RandomNumberGenerator::from_seed(1);
//! let mut individual =
//!     FunctionIndividual::new(benchmarks::sphere, -5.0, 5.0, 16, 3).unwrap();
//! individual.init_random(&mut rng);
//! assert!(individual.fitness() >= 0.0);
//! ```

pub mod benchmarks;

use crate::error::{EvoError, Result};
use crate::individual::Individual;
use crate::rng::RandomNumberGenerator;

/// A bit-string candidate solution for continuous-function minimization.
///
/// The genotype holds `bits * dimensions` booleans. Each `bits`-wide group
/// decodes to an integer that is mapped linearly onto the domain
/// `[min_domain, max_domain]`, quantized into `2^bits - 1` steps.
#[derive(Debug, Clone)]
pub struct FunctionIndividual {
    objective: fn(&[f64]) -> f64,
    min_domain: f64,
    step: f64,
    bits: usize,
    dimensions: usize,
    genotype: Vec<bool>,
    fitness: f64,
    diversity: f64,
}

impl FunctionIndividual {
    /// Creates an all-zero individual over `objective` with the given domain
    /// and encoding.
    ///
    /// # Errors
    ///
    /// Returns [`EvoError::Configuration`] if `bits` or `dimensions` is zero
    /// or the domain is empty.
    pub fn new(
        objective: fn(&[f64]) -> f64,
        min_domain: f64,
        max_domain: f64,
        bits: usize,
        dimensions: usize,
    ) -> Result<Self> {
        if bits == 0 || dimensions == 0 {
            return Err(EvoError::Configuration(
                "Bits and dimensions must both be greater than 0".to_string(),
            ));
        }
        if max_domain <= min_domain {
            return Err(EvoError::Configuration(format!(
                "Empty domain: [{}, {}]",
                min_domain, max_domain
            )));
        }
        let step = (max_domain - min_domain) / (2f64.powi(bits as i32) - 1.0);
        let mut individual = Self {
            objective,
            min_domain,
            step,
            bits,
            dimensions,
            genotype: vec![false; bits * dimensions],
            fitness: 0.0,
            diversity: 0.0,
        };
        individual.evaluate();
        Ok(individual)
    }

    /// Decodes the genotype into a point of the objective's domain.
    /// Bit `j` of a dimension's group is its binary digit of weight `2^j`.
    pub fn phenotype(&self) -> Vec<f64> {
        (0..self.dimensions)
            .map(|i| {
                let raw: f64 = (0..self.bits)
                    .filter(|&j| self.genotype[i * self.bits + j])
                    .map(|j| 2f64.powi(j as i32))
                    .sum();
                self.min_domain + raw * self.step
            })
            .collect()
    }

    /// The raw bit genotype.
    pub fn genotype(&self) -> &[bool] {
        &self.genotype
    }
}

impl Individual for FunctionIndividual {
    fn init_random(&mut self, rng: &mut RandomNumberGenerator) {
        for bit in self.genotype.iter_mut() {
            *bit = rng.gen_probability() < 0.5;
        }
        self.evaluate();
    }

    fn evaluate(&mut self) {
        self.fitness = (self.objective)(&self.phenotype());
    }

    fn fitness(&self) -> f64 {
        self.fitness
    }

    /// Flips each bit independently with probability `probability / 100`.
    fn mutate(&mut self, probability: f64, rng: &mut RandomNumberGenerator) {
        for bit in self.genotype.iter_mut() {
            if rng.gen_percent() < probability {
                *bit = !*bit;
            }
        }
    }

    fn cross(&mut self, partner: &Self, pos: usize) {
        self.genotype[pos..].copy_from_slice(&partner.genotype[pos..]);
    }

    fn genotype_length(&self) -> usize {
        self.genotype.len()
    }

    fn distance(&self, other: &Self) -> f64 {
        self.genotype
            .iter()
            .zip(other.genotype.iter())
            .filter(|(a, b)| a != b)
            .count() as f64
    }

    fn diversity(&self) -> f64 {
        self.diversity
    }

    fn set_diversity(&mut self, diversity: f64) {
        self.diversity = diversity;
    }
}
