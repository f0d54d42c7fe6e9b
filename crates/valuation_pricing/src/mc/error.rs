//! Error types for the Monte Carlo sampler.
//!
//! Configuration errors surface at build time; sampling errors surface when
//! the retained price sample cannot support a distribution summary.

use thiserror::Error;
use valuation_core::ValuationError;

/// Monte Carlo configuration and sampling errors.
#[derive(Error, Clone, Debug, PartialEq)]
pub enum SimulationError {
    /// Iteration count outside `[1, MAX_ITERATIONS]`.
    #[error("Invalid iteration count {0}: must be in range [1, 1_000_000]")]
    InvalidIterations(usize),

    /// Invalid parameter value with name and description.
    #[error("Invalid parameter '{name}': {value}")]
    InvalidParameter {
        /// Parameter name.
        name: &'static str,
        /// Description of the invalid value.
        value: String,
    },

    /// Every trial produced a non-positive share price.
    #[error("No valid samples: all {iterations} trials produced non-positive prices")]
    NoValidSamples {
        /// Trials attempted.
        iterations: usize,
    },

    /// Histogram requested over an empty sample.
    #[error("Cannot build a histogram from an empty sample")]
    EmptySample,

    /// All retained prices are identical, so bucket width would be zero.
    #[error("Degenerate histogram range: every sample equals {value}")]
    DegenerateRange {
        /// The single observed price.
        value: f64,
    },

    /// A trial valuation failed.
    #[error(transparent)]
    Valuation(#[from] ValuationError),
}
