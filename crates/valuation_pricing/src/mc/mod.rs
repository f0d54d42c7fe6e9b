//! Monte Carlo simulation of the DCF share price.
//!
//! Each trial draws three standard normals and shocks revenue growth,
//! EBITDA margin and WACC around the base assumptions:
//!
//! | Field           | Shock         |
//! |-----------------|---------------|
//! | `rev_growth`    | `z1 * 0.015`  |
//! | `ebitda_margin` | `z2 * 0.015`  |
//! | `wacc`          | `z3 * 0.005`  |
//!
//! Trials whose share price is not strictly positive are discarded, as are
//! trials whose shocked WACC reaches -100% and cannot discount. The
//! retained prices are summarised by mean, min, max and a 25-bucket
//! equal-width histogram.
//!
//! # Reproducibility
//!
//! The uniform source is injected. With [`crate::rng::ValuationRng::from_seed`]
//! or [`crate::rng::ReplaySource`] the result is identical between runs and
//! between sequential and parallel execution.

mod config;
mod error;
mod histogram;
mod sampler;

pub use config::{
    SimulationConfig, SimulationConfigBuilder, DEFAULT_ITERATIONS, DEFAULT_PARALLEL_THRESHOLD,
    EBITDA_MARGIN_SD, HISTOGRAM_BINS, MAX_ITERATIONS, REV_GROWTH_SD, WACC_SD,
};
pub use error::SimulationError;
pub use histogram::Histogram;
pub use sampler::{simulate, MonteCarloResult, MonteCarloSampler};
