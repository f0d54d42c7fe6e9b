//! # Valuation Engine (Layer 3)
//!
//! ## Layer 3 Role
//!
//! valuation_pricing is the numeric kernel of the workspace:
//! - Five-year discounted cash flow projection (`dcf`)
//! - Injectable uniform random sources and the Box-Muller transform (`rng`)
//! - Monte Carlo valuation-uncertainty sampling (`mc`)
//!
//! Every entry point is a pure function of its arguments. The only state is
//! the random source handed to the sampler by the caller.
//!
//! ## Usage Example
//!
//! ```rust,ignore
//! use valuation_core::AssumptionOverrides;
//! use valuation_pricing::dcf::project;
//! use valuation_pricing::mc::simulate;
//! use valuation_pricing::rng::ValuationRng;
//!
//! let dataset = load_dataset();
//! let base = project(&dataset, &AssumptionOverrides::new())?;
//! println!("intrinsic price: {:.2}", base.share_price);
//!
//! let mut rng = ValuationRng::from_seed(42);
//! let distribution = simulate(&dataset, 1000, &mut rng)?;
//! println!("mean {:.2} in [{:.2}, {:.2}]", distribution.mean, distribution.min, distribution.max);
//! ```

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![deny(rustdoc::private_intra_doc_links)]

pub mod dcf;
pub mod ddm;
pub mod fcfe;
pub mod mc;
pub mod rate_grid;
pub mod rng;

#[cfg(test)]
mod test_logging;

pub use dcf::{project, project_assumptions, ProjectionYear, ValuationResult, PROJECTION_YEARS};
pub use ddm::{
    dividend_history, gordon_growth, gordon_sensitivity, h_model, two_stage, value_dividends,
    DdmError, DdmInputs, DdmSummary, DividendHistory,
};
pub use fcfe::{fcfe_sensitivity, historical_fcfe, value_equity, FcfeAssumptions, FcfeValuation};
pub use mc::{simulate, MonteCarloResult, MonteCarloSampler, SimulationConfig, SimulationError};
pub use rate_grid::RateGrid;
pub use rng::{ReplaySource, UniformSource, ValuationRng};
