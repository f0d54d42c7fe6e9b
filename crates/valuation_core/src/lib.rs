//! # valuation_core: Foundation for Equity Valuation
//!
//! ## Layer 1 (Foundation) Role
//!
//! valuation_core serves as the bottom layer of the valuation workspace, providing:
//! - Valuation assumptions and partial overrides (`types::assumptions`)
//! - The immutable historical dataset (`types::dataset`)
//! - CAPM cost-of-capital helpers (`types::wacc`)
//! - Fair-value ranges across valuation methods (`types::range`)
//! - Error types: `ValuationError` (`types::error`)
//! - Guarded arithmetic: `safe_div` (`math`)
//!
//! ## Zero Dependency Principle
//!
//! Layer 1 has no dependencies on other valuation_* crates and performs no I/O.
//! Datasets are handed in fully formed by the caller; nothing in this crate
//! reads files, environment variables or global state.
//!
//! ## Usage Examples
//!
//! ```rust
//! use valuation_core::math::safe_div;
//! use valuation_core::types::{AssumptionOverrides, Assumptions};
//!
//! let base = Assumptions {
//!     rev_growth: 0.05,
//!     ebitda_margin: 0.29,
//!     tax_rate: 0.20,
//!     wacc: 0.11,
//!     terminal_growth: 0.03,
//!     capex_pct: 0.022,
//!     nwc_pct: 0.04,
//! };
//!
//! // Overrides are merged per field; the base is never modified
//! let merged = base.merge(&AssumptionOverrides::new().wacc(0.10));
//! assert_eq!(merged.wacc, 0.10);
//! assert_eq!(base.wacc, 0.11);
//!
//! // Division by zero falls back to the supplied default
//! assert_eq!(safe_div(1.0, 0.0, 0.0), 0.0);
//! ```
//!
//! ## Feature Flags
//!
//! - `serde` (default): Enable serialisation for all value records
//! - `fixtures`: Expose a sample dataset for downstream test suites

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![deny(rustdoc::private_intra_doc_links)]

pub mod math;
pub mod types;

#[cfg(any(test, feature = "fixtures"))]
pub mod fixtures;

pub use types::{
    AssumptionField, AssumptionOverrides, Assumptions, CapmInputs, FairValueRange,
    FinancialDataset, FiscalYear, HistoricalAverages, ValuationError, WaccBreakdown, WaccInputs,
};
