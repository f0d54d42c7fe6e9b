//! Error types for the dividend discount models.

use thiserror::Error;
use valuation_core::ValuationError;

/// Dividend discount model errors.
#[derive(Error, Clone, Debug, PartialEq)]
pub enum DdmError {
    /// Perpetual growth is not below the cost of equity, so the Gordon
    /// price is undefined.
    #[error("Cost of equity {cost_of_equity} must exceed growth {growth}")]
    GrowthNotBelowDiscount {
        /// Discount rate
        cost_of_equity: f64,
        /// Perpetual growth rate
        growth: f64,
    },

    /// Invalid parameter value with name and description.
    #[error("Invalid parameter '{name}': {value}")]
    InvalidParameter {
        /// Parameter name.
        name: &'static str,
        /// Offending value.
        value: String,
    },

    /// The dataset could not supply a dividend history.
    #[error(transparent)]
    Valuation(#[from] ValuationError),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ddm_error_display() {
        let err = DdmError::GrowthNotBelowDiscount {
            cost_of_equity: 0.1,
            growth: 0.12,
        };
        assert_eq!(err.to_string(), "Cost of equity 0.1 must exceed growth 0.12");

        let err = DdmError::InvalidParameter {
            name: "d0",
            value: "NaN".to_string(),
        };
        assert_eq!(err.to_string(), "Invalid parameter 'd0': NaN");

        let err: DdmError = ValuationError::EmptyHistory.into();
        assert_eq!(err.to_string(), "Dataset contains no fiscal years");
    }
}
