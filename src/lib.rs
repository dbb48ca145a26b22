//! # evoperm
//!
//! An evolutionary optimization engine for permutation and
//! constraint-satisfaction problems, demonstrated on Sudoku solving and
//! continuous-function minimization.
//!
//! The [`evolution::GeneticAlgorithm`] driver composes binary tournament
//! selection, single-point crossover, mutation, elitism and a
//! diversity-aware survivor selection over any [`individual::Individual`]
//! implementation. The [`sudoku`] module adds block-wise permutation search,
//! weighted conflict scoring, stochastic local search and simulated
//! annealing; the [`function`] module adds a bit-string genotype over classic
//! benchmark objectives.

pub mod error;
pub mod evolution;
pub mod function;
pub mod individual;
pub mod rng;
pub mod sudoku;

// Re-export commonly used types for convenience
pub use error::{EvoError, OptionExt, Result, ResultExt};
pub use evolution::{GaOptions, GeneticAlgorithm};
pub use individual::Individual;
pub use rng::RandomNumberGenerator;
pub use sudoku::Sudoku;
