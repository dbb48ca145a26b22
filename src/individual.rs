//! # Individual Trait
//!
//! The `Individual` trait is the capability contract every solution
//! representation must satisfy to be driven by
//! [`GeneticAlgorithm`](crate::evolution::GeneticAlgorithm). It covers random
//! initialization, fitness evaluation, mutation, single-point crossover and
//! the diversity (DCN) bookkeeping used by survivor selection.
//!
//! Two representations ship with the crate: the Sudoku board
//! ([`Sudoku`](crate::sudoku::Sudoku)), whose loci are blocks, and the
//! bit-string [`FunctionIndividual`](crate::function::FunctionIndividual),
//! whose loci are bits.
//!
//! ## Example
//!
//! ```rust
//! use evoperm::individual::Individual;
//! use evoperm::rng::RandomNumberGenerator;
//!
//! #[derive(Clone, Debug)]
//! struct Coin {
//!     heads: Vec<bool>,
//!     fitness: f64,
//!     diversity: f64,
//! }
//!
//! impl Individual for Coin {
//!     fn init_random(&mut self, rng: &mut RandomNumberGenerator) {
//!         for h in self.heads.iter_mut() {
//!             *h = rng.gen_probability() < 0.5;
//!         }
//!         self.evaluate();
//!     }
//!
//!     fn evaluate(&mut self) {
//!         self.fitness = self.heads.iter().filter(|h| !**h).count() as f64;
//!     }
//!
//!     fn fitness(&self) -> f64 {
//!         self.fitness
//!     }
//!
//!     fn mutate(&mut self, probability: f64, rng: &mut RandomNumberGenerator) {
//!         for h in self.heads.iter_mut() {
//!             if rng.gen_percent() < probability {
//!                 *h = !*h;
//!             }
//!         }
//!     }
//!
//!     fn cross(&mut self, partner: &Self, pos: usize) {
//!         self.heads[pos..].clone_from_slice(&partner.heads[pos..]);
//!     }
//!
//!     fn genotype_length(&self) -> usize {
//!         self.heads.len()
//!     }
//!
//!     fn distance(&self, other: &Self) -> f64 {
//!         self.heads
//!             .iter()
//!             .zip(other.heads.iter())
//!             .filter(|(a, b)| a != b)
//!             .count() as f64
//!     }
//!
//!     fn diversity(&self) -> f64 {
//!         self.diversity
//!     }
//!
//!     fn set_diversity(&mut self, diversity: f64) {
//!         self.diversity = diversity;
//!     }
//! }
//! ```

use std::cmp::Ordering;
use std::fmt::Debug;

use crate::rng::RandomNumberGenerator;

/// Capability contract for candidate solutions.
///
/// Fitness is a real number where lower is better (0 is optimal for Sudoku).
/// The contract deliberately keeps fitness explicit: no operation recomputes
/// it implicitly, so after [`mutate`](Individual::mutate) or
/// [`cross`](Individual::cross) the stored fitness is stale until the caller
/// invokes [`evaluate`](Individual::evaluate).
///
/// Types implementing this trait must also implement `Clone`, `Debug`, `Send`
/// and `Sync` to enable parallel fitness evaluation.
pub trait Individual: Clone + Debug + Send + Sync {
    /// Fills the genotype with a valid random instance for the representation
    /// and sets the fitness accordingly.
    fn init_random(&mut self, rng: &mut RandomNumberGenerator);

    /// Recomputes the fitness from the current genotype state.
    fn evaluate(&mut self);

    /// Returns the stored fitness. Lower is better.
    fn fitness(&self) -> f64;

    /// Perturbs the genotype. `probability` uses percentage semantics
    /// (0–100): each locus group is perturbed with probability
    /// `probability / 100`.
    ///
    /// The stored fitness is left untouched; callers must re-evaluate.
    fn mutate(&mut self, probability: f64, rng: &mut RandomNumberGenerator);

    /// Single-point crossover: replaces the receiver's genotype content at
    /// and after locus `pos` with the partner's. `pos` must lie in
    /// `0..genotype_length()`. The genotype length is unchanged.
    fn cross(&mut self, partner: &Self, pos: usize);

    /// Number of independently variable loci (bits, or blocks for Sudoku).
    /// Bounds the random locus choice for crossover.
    fn genotype_length(&self) -> usize;

    /// Hamming-like distance to another individual: the count of differing
    /// loci.
    fn distance(&self, other: &Self) -> f64;

    /// Returns the stored diversity (DCN: distance to the nearest survivor).
    fn diversity(&self) -> f64;

    /// Stores a diversity value.
    fn set_diversity(&mut self, diversity: f64);

    /// Sets diversity to the minimum distance from `self` to any of the
    /// `survivors` (the DCN metric). An empty survivor set yields infinity,
    /// which ranks the individual as maximally diverse.
    fn update_diversity(&mut self, survivors: &[Self]) {
        let dcn = survivors
            .iter()
            .map(|s| self.distance(s))
            .fold(f64::INFINITY, f64::min);
        self.set_diversity(dcn);
    }

    /// The fitness value known to be optimal for this representation, if
    /// any. The driver stops early once the best fitness reaches it.
    fn known_optimum(&self) -> Option<f64> {
        None
    }
}

/// Total order on fitness values for sorting populations.
///
/// Individuals compare by fitness only, ascending (lower is better). NaN is
/// ranked worse than any other value so a single bad evaluation cannot poison
/// a sort.
pub fn compare_fitness<T: Individual>(a: &T, b: &T) -> Ordering {
    match a.fitness().partial_cmp(&b.fitness()) {
        Some(ordering) => ordering,
        None => {
            if a.fitness().is_nan() {
                Ordering::Greater
            } else {
                Ordering::Less
            }
        }
    }
}
