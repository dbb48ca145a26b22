//! # Error Types
//!
//! This module defines the error types used across the optimizer. It provides
//! specific variants for the failure scenarios that can occur while building
//! boards, configuring the driver, or running the evolution loop.
//!
//! All failures in this crate are configuration-time failures: once a driver
//! and its individuals are constructed successfully, the run loop itself is
//! not expected to fail.
//!
//! ## Examples
//!
//! Using the `Result` type:
//!
//! ```rust
//! use evoperm::error::{EvoError, Result};
//!
//! fn some_function() -> Result<()> {
//!     // Function implementation
//!     Ok(())
//! }
//!
//! fn caller() {
//!     match some_function() {
//!         Ok(_) => println!("Success!"),
//!         Err(e) => println!("Error: {}", e),
//!     }
//! }
//! ```
//!
//! Using the `ResultExt` trait to add context to errors:
//!
//! ```rust
//! use evoperm::error::{Result, ResultExt};
//! use std::fs::File;
//!
//! fn read_board_file(path: &str) -> Result<()> {
//!     File::open(path).context("Failed to open board file")
//!         .and_then(|_file| Ok(()))
//! }
//! ```

use std::error::Error as StdError;
use std::fmt;
use thiserror::Error;

/// Represents errors that can occur in the optimizer.
#[derive(Error, Debug)]
pub enum EvoError {
    /// Error that occurs when an invalid configuration is provided, including
    /// malformed board input and degenerate driver parameters.
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// Error that occurs when an empty population is encountered.
    #[error("Empty population error: Cannot operate on an empty population")]
    EmptyPopulation,

    /// Error that occurs when a fitness calculation produces an unusable value.
    #[error("Fitness calculation error: {0}")]
    FitnessCalculation(String),

    /// A generic error with a custom message.
    #[error("{0}")]
    Other(String),
}

/// A specialized Result type for optimizer operations.
///
/// This type is a convenience wrapper around `std::result::Result` with the
/// error type fixed to `EvoError`.
pub type Result<T> = std::result::Result<T, EvoError>;

/// Extension trait for Result to add context to errors.
///
/// ## Examples
///
/// ```rust
/// use evoperm::error::ResultExt;
/// use std::fs::File;
///
/// fn read_file(path: &str) -> evoperm::error::Result<()> {
///     File::open(path).context("Failed to open file")?;
///     Ok(())
/// }
/// ```
pub trait ResultExt<T, E> {
    /// Adds context to an error, converting it to an [`EvoError`].
    fn context<C>(self, context: C) -> Result<T>
    where
        C: fmt::Display + Send + Sync + 'static;
}

impl<T, E> ResultExt<T, E> for std::result::Result<T, E>
where
    E: StdError + Send + Sync + 'static,
{
    fn context<C>(self, context: C) -> Result<T>
    where
        C: fmt::Display + Send + Sync + 'static,
    {
        self.map_err(|e| EvoError::Other(format!("{}: {}", context, e)))
    }
}

/// Extension trait for Option to convert to Result with a custom error.
///
/// ## Examples
///
/// ```rust
/// use evoperm::error::{EvoError, OptionExt};
///
/// fn best_candidate(candidates: &[i32]) -> evoperm::error::Result<i32> {
///     candidates.iter().min().cloned().ok_or_else_evo(||
///         EvoError::EmptyPopulation
///     )
/// }
/// ```
pub trait OptionExt<T> {
    /// Converts an Option to a Result using a closure to build the error.
    fn ok_or_else_evo<F>(self, err_fn: F) -> Result<T>
    where
        F: FnOnce() -> EvoError;
}

impl<T> OptionExt<T> for Option<T> {
    fn ok_or_else_evo<F>(self, err_fn: F) -> Result<T>
    where
        F: FnOnce() -> EvoError,
    {
        self.ok_or_else(err_fn)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_every_variant_has_a_display_message() {
        let variants: Vec<EvoError> = vec![
            EvoError::Configuration("bad board".to_string()),
            EvoError::EmptyPopulation,
            EvoError::FitnessCalculation("NaN".to_string()),
            EvoError::Other("misc".to_string()),
        ];
        for error in variants {
            assert!(!error.to_string().is_empty());
        }
    }

    #[test]
    fn test_context_wraps_the_source_error() {
        let result: Result<()> = "nope"
            .parse::<i32>()
            .map(|_| ())
            .context("Failed to parse count");
        match result {
            Err(EvoError::Other(msg)) => assert!(msg.starts_with("Failed to parse count")),
            other => panic!("unexpected result: {:?}", other),
        }
    }
}
