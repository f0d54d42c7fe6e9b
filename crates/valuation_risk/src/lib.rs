//! # Valuation Risk (L4: Application)
//!
//! What-if analysis built on top of the DCF projector.
//!
//! This crate provides:
//! - A 5×5 WACC × terminal-growth sensitivity grid with delta buckets
//! - Rayon-based parallelisation helpers with a size threshold
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────┐
//! │          valuation_risk (L4)            │
//! ├─────────────────────────────────────────┤
//! │  sensitivity/ - SensitivityGrid,        │
//! │                 DeltaBucket             │
//! │  parallel/    - Rayon utilities         │
//! └─────────────────────────────────────────┘
//!          ↓
//! ┌─────────────────────────────────────────┐
//! │         valuation_pricing (L3)          │
//! │  DCF projector and Monte Carlo sampler  │
//! └─────────────────────────────────────────┘
//! ```
//!
//! ## Example
//!
//! ```rust,ignore
//! use valuation_core::AssumptionOverrides;
//! use valuation_pricing::dcf::project;
//! use valuation_risk::sensitivity::sweep;
//!
//! let base = project(&dataset, &AssumptionOverrides::new())?;
//! let grid = sweep(&dataset, &base)?;
//! for row in &grid.cells {
//!     for cell in row {
//!         print!("{:>8.1} ", cell.price);
//!     }
//!     println!();
//! }
//! ```

#![deny(missing_docs)]

pub mod parallel;
pub mod sensitivity;

pub use parallel::ParallelConfig;
pub use sensitivity::{sweep, DeltaBucket, SensitivityCell, SensitivityGrid};
