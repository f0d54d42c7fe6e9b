//! Relative valuation errors.

use thiserror::Error;
use valuation_core::ValuationError;

use super::Multiple;

/// Reasons a multiple cannot produce a target price.
///
/// # Examples
/// ```
/// use valuation_fundamentals::relative::{Multiple, RelativeError};
///
/// let err = RelativeError::NoTargetMultiple(Multiple::PriceBook);
/// assert_eq!(format!("{}", err), "No target P/B available");
/// ```
#[derive(Error, Clone, Debug, PartialEq)]
pub enum RelativeError {
    /// EPS, book value per share or EBITDA not strictly positive
    #[error("{multiple} base must be positive, got {value}")]
    NonPositiveBase {
        /// Multiple being applied
        multiple: Multiple,
        /// Offending base value
        value: f64,
    },

    /// Neither a fixed multiple nor a usable peer value
    #[error("No target {0} available")]
    NoTargetMultiple(Multiple),

    /// Fixed multiple that is not positive and finite
    #[error("Target {multiple} must be positive and finite, got {value}")]
    InvalidMultiple {
        /// Multiple being applied
        multiple: Multiple,
        /// Offending multiple
        value: f64,
    },

    /// Dataset-level failure
    #[error(transparent)]
    Valuation(#[from] ValuationError),
}
