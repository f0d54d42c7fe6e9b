//! # Valuation Fundamentals (L4: Application)
//!
//! Accounting-ratio analysis of the historical statements.
//!
//! This crate provides:
//! - Per-year ratio sets grouped into profitability, liquidity, leverage,
//!   efficiency and valuation (`ratios`)
//! - Benchmark interpretation of individual ratios (`health::interpret`)
//! - Weighted 0–100 health scores and radar views (`health::score_health`)
//! - DuPont decomposition of return on equity (`health::dupont`)
//! - P/E, P/B and EV/EBITDA target prices from peer multiples (`relative`)
//!
//! Every division is guarded by [`valuation_core::math::safe_div`]; a zero
//! denominator yields a zero ratio, never an error.
//!
//! ## Example
//!
//! ```rust,ignore
//! use valuation_fundamentals::health::{radar_scores, score_health};
//! use valuation_fundamentals::ratios::compute_all_years;
//!
//! for ratios in compute_all_years(&dataset) {
//!     let score = score_health(&ratios);
//!     println!("{}: {} {:?}", ratios.year, score.total, radar_scores(&ratios));
//! }
//! ```

#![deny(missing_docs)]

pub mod health;
pub mod ratios;
pub mod relative;

pub use health::{
    dupont, interpret, radar_scores, score_health, Category, ColorTag, DuPont, HealthScore,
    Interpretation, Rating,
};
pub use ratios::{compute_all_years, compute_year, RatioName, RatioSet, UnknownRatio};
pub use relative::{
    peer_mean, peer_median, relative_valuation, value_by_multiple, CompanyMetrics, Multiple,
    MultipleValuation, PeerMultiples, PeerStatistic, RelativeError, RelativeSummary,
    RelativeTargets, TargetMultiple,
};
