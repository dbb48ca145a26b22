//! # Evolution Module
//!
//! This module contains the generic evolutionary driver and its configuration:
//!
//! - [`GeneticAlgorithm`]: the time-bounded generation loop composing
//!   selection, variation, elitism and diversity-aware survivor selection.
//! - [`GaOptions`]: validated driver configuration with a builder.

pub mod driver;
pub mod options;

pub use driver::GeneticAlgorithm;
pub use options::{GaOptions, GaOptionsBuilder};
