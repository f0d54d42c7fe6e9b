//! Benchmark thresholds per ratio.
//!
//! Thresholds are fractions for margins and returns and plain multiples for
//! everything else.

use crate::ratios::RatioName;

/// Which side of a threshold is favourable.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Direction {
    /// Compared with `>=` against descending thresholds
    HigherIsBetter,
    /// Compared with `<=` against ascending thresholds
    LowerIsBetter,
}

/// Four ordered thresholds for a quality-rated ratio.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Benchmark {
    /// Excellent threshold
    pub excellent: f64,
    /// Good threshold
    pub good: f64,
    /// Acceptable threshold
    pub acceptable: f64,
    /// Poor threshold; quoted in messages, below `acceptable` is already poor
    pub poor: f64,
    /// Comparison direction
    pub direction: Direction,
}

impl Benchmark {
    const fn higher(excellent: f64, good: f64, acceptable: f64, poor: f64) -> Self {
        Self {
            excellent,
            good,
            acceptable,
            poor,
            direction: Direction::HigherIsBetter,
        }
    }

    const fn lower(excellent: f64, good: f64, acceptable: f64, poor: f64) -> Self {
        Self {
            excellent,
            good,
            acceptable,
            poor,
            direction: Direction::LowerIsBetter,
        }
    }
}

/// Upper edges of the P/E valuation bands.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PeBands {
    /// Below this is undervalued
    pub undervalued: f64,
    /// Below this is fair value
    pub fair: f64,
    /// Below this is growth; at or above is expensive
    pub growth: f64,
}

/// P/E valuation bands.
pub const PE_BANDS: PeBands = PeBands {
    undervalued: 10.0,
    fair: 15.0,
    growth: 25.0,
};

/// Benchmark for a quality-rated ratio.
///
/// Returns `None` for P/E, which uses [`PE_BANDS`], and for ratios with no
/// benchmark (equity multiplier, P/B, EV/EBITDA).
pub fn benchmark_for(name: RatioName) -> Option<Benchmark> {
    let benchmark = match name {
        RatioName::Roe => Benchmark::higher(0.20, 0.15, 0.10, 0.05),
        RatioName::Roa => Benchmark::higher(0.10, 0.07, 0.05, 0.02),
        RatioName::GrossMargin => Benchmark::higher(0.40, 0.30, 0.20, 0.10),
        RatioName::OperatingMargin => Benchmark::higher(0.20, 0.15, 0.10, 0.05),
        RatioName::NetMargin => Benchmark::higher(0.15, 0.10, 0.05, 0.02),
        RatioName::CurrentRatio => Benchmark::higher(2.0, 1.5, 1.0, 0.8),
        RatioName::QuickRatio => Benchmark::higher(1.5, 1.0, 0.8, 0.5),
        RatioName::CashRatio => Benchmark::higher(1.0, 0.5, 0.2, 0.1),
        RatioName::DebtToEquity => Benchmark::lower(0.5, 1.0, 1.5, 2.0),
        RatioName::AssetTurnover => Benchmark::higher(1.5, 1.0, 0.7, 0.4),
        RatioName::InventoryTurnover => Benchmark::higher(8.0, 6.0, 4.0, 2.0),
        RatioName::ReceivablesTurnover => Benchmark::higher(10.0, 8.0, 6.0, 4.0),
        RatioName::EquityMultiplier
        | RatioName::PeRatio
        | RatioName::PbRatio
        | RatioName::EvEbitda => return None,
    };
    Some(benchmark)
}
