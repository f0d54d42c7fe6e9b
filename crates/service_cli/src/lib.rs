//! Command-line front end for the valuation engines.
//!
//! The `valuer` binary loads a [`FinancialDataset`](valuation_core::FinancialDataset)
//! from JSON and runs one engine per subcommand:
//!
//! | Command       | Engine                                        |
//! |---------------|-----------------------------------------------|
//! | `value`       | five-year DCF projection                      |
//! | `sensitivity` | 5x5 WACC by terminal-growth sweep             |
//! | `simulate`    | Monte Carlo price distribution                |
//! | `health`      | ratios, interpretations and health score      |
//! | `fcfe`        | free cash flow to equity with a Ke by g grid  |
//! | `ddm`         | Gordon, two-stage and H-model dividend prices |
//! | `relative`    | P/E, P/B and EV/EBITDA peer multiples         |
//! | `wacc`        | CAPM cost of capital                          |
//!
//! Commands return their rendered output as a `String` so they can be
//! exercised without a terminal.

#![deny(missing_docs)]

pub mod commands;
pub mod config;
pub mod error;
pub mod loader;
pub mod output;

pub use error::{CliError, Result};

/// CLI version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
