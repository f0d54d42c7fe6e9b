//! Error types for structured error handling.
//!
//! Every engine in the workspace reports input problems through
//! [`ValuationError`]. Division by zero inside ratio computations is not an
//! error (see [`crate::math::safe_div`]); only inputs that would make a
//! valuation meaningless are rejected.

use thiserror::Error;

/// Categorised valuation errors.
///
/// # Variants
/// - `UnknownAssumption`: Override key that names no assumption
/// - `NonFiniteAssumption`: NaN or infinite assumption after merging
/// - `InvalidSharesOutstanding`: Share count that cannot divide equity value
/// - `EmptyHistory`: Dataset without any fiscal year
/// - `YearOutOfRange`: Year index past the end of the history
/// - `NonMonotonicYears`: Fiscal years not strictly ascending
/// - `NonFiniteLineItem`: NaN or infinite statement line item
/// - `InvalidOverride`: Override value outside its admissible domain
///
/// # Examples
/// ```
/// use valuation_core::types::ValuationError;
///
/// let err = ValuationError::UnknownAssumption("discount".to_string());
/// assert_eq!(format!("{}", err), "Unknown assumption: discount");
/// ```
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ValuationError {
    /// Override key that names no known assumption.
    #[error("Unknown assumption: {0}")]
    UnknownAssumption(String),

    /// Assumption is NaN or infinite.
    #[error("Assumption '{field}' must be finite, got {value}")]
    NonFiniteAssumption {
        /// Assumption name
        field: &'static str,
        /// Offending value
        value: f64,
    },

    /// Shares outstanding is zero, negative or non-finite.
    #[error("Invalid shares outstanding: {0} (must be positive and finite)")]
    InvalidSharesOutstanding(f64),

    /// Dataset contains no fiscal years.
    #[error("Dataset contains no fiscal years")]
    EmptyHistory,

    /// Requested year index does not exist.
    #[error("Year index {index} out of range for {len} fiscal years")]
    YearOutOfRange {
        /// Requested index
        index: usize,
        /// Number of fiscal years available
        len: usize,
    },

    /// Fiscal years are not strictly ascending.
    #[error("Fiscal years not strictly ascending at index {index}")]
    NonMonotonicYears {
        /// Index of the first out-of-order year
        index: usize,
    },

    /// Statement line item is NaN or infinite.
    #[error("Line item '{field}' for {year} must be finite")]
    NonFiniteLineItem {
        /// Fiscal year of the line item
        year: i32,
        /// Line item name
        field: &'static str,
    },

    /// Override value outside its admissible domain.
    #[error("Invalid override: {0}")]
    InvalidOverride(String),
}
