//! Benchmark interpretation and health scoring.
//!
//! Each benchmarked ratio is rated against four ordered thresholds. Ratings
//! map to fixed scores, which are averaged per category and combined with
//! fixed category weights into a 0–100 total:
//!
//! | Category      | Weight | Ratios                                          |
//! |---------------|--------|-------------------------------------------------|
//! | Profitability | 0.30   | ROE, ROA, gross / operating / net margin        |
//! | Liquidity     | 0.25   | current, quick, cash ratio                      |
//! | Leverage      | 0.20   | debt to equity                                  |
//! | Efficiency    | 0.15   | asset, inventory, receivables turnover          |
//! | Valuation     | 0.10   | P/E                                             |

mod benchmarks;
mod dupont;
mod rating;
mod scorer;

pub use benchmarks::{benchmark_for, Benchmark, Direction, PeBands, PE_BANDS};
pub use dupont::{dupont, DuPont};
pub use rating::{ColorTag, Interpretation, Rating};
pub use scorer::{
    interpret, radar_scores, score_health, Category, CategoryScores, HealthScore,
};
