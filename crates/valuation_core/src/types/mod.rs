//! Value types shared across the valuation engines.
//!
//! - [`assumptions`]: `Assumptions`, `AssumptionOverrides`, `AssumptionField`
//! - [`dataset`]: `FinancialDataset`, `FiscalYear`, `HistoricalAverages`
//! - [`wacc`]: `CapmInputs`, `WaccInputs`, `WaccBreakdown`
//! - [`range`]: `FairValueRange`
//! - [`error`]: `ValuationError`

pub mod assumptions;
pub mod dataset;
pub mod error;
pub mod range;
pub mod wacc;

pub use assumptions::{AssumptionField, AssumptionOverrides, Assumptions};
pub use dataset::{FinancialDataset, FiscalYear, HistoricalAverages, PRICE_UNIT_SCALE};
pub use error::ValuationError;
pub use range::FairValueRange;
pub use wacc::{CapmInputs, WaccBreakdown, WaccInputs};
