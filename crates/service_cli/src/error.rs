//! CLI error types.

use std::path::PathBuf;

use thiserror::Error;
use valuation_core::ValuationError;
use valuation_pricing::{DdmError, SimulationError};

use crate::config::ConfigError;

/// Errors surfaced by the `valuer` commands.
#[derive(Debug, Error)]
pub enum CliError {
    /// Configuration could not be assembled
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// Dataset file could not be read
    #[error("Failed to read {}: {source}", path.display())]
    Io {
        /// Offending path
        path: PathBuf,
        /// Underlying I/O error
        #[source]
        source: std::io::Error,
    },

    /// Dataset or report JSON could not be (de)serialised
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Valuation engine rejected its inputs
    #[error(transparent)]
    Valuation(#[from] ValuationError),

    /// Dividend discount model rejected its inputs
    #[error(transparent)]
    Dividend(#[from] DdmError),

    /// Monte Carlo sampler failed
    #[error(transparent)]
    Simulation(#[from] SimulationError),

    /// Command-line argument outside its domain
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),
}

/// Result alias for CLI operations.
pub type Result<T> = std::result::Result<T, CliError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = CliError::InvalidArgument("year 9".to_string());
        assert_eq!(err.to_string(), "Invalid argument: year 9");

        let err: CliError = ValuationError::EmptyHistory.into();
        assert_eq!(err.to_string(), "Dataset contains no fiscal years");

        let err = CliError::Io {
            path: PathBuf::from("missing.json"),
            source: std::io::Error::new(std::io::ErrorKind::NotFound, "not found"),
        };
        assert!(err.to_string().starts_with("Failed to read missing.json"));

        let err: CliError = DdmError::GrowthNotBelowDiscount {
            cost_of_equity: 0.02,
            growth: 0.03,
        }
        .into();
        assert_eq!(err.to_string(), "Cost of equity 0.02 must exceed growth 0.03");
    }
}
