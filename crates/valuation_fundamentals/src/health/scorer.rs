//! Ratio interpretation and weighted health scores.

use std::fmt;

use super::benchmarks::{benchmark_for, Benchmark, Direction, PE_BANDS};
use super::rating::{Interpretation, Rating};
use crate::ratios::{RatioName, RatioSet};

/// Health category with a fixed weight and ratio membership.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum Category {
    /// Returns and margins
    Profitability,
    /// Short-term solvency
    Liquidity,
    /// Capital structure
    Leverage,
    /// Asset utilisation
    Efficiency,
    /// Market multiple
    Valuation,
}

impl Category {
    /// All categories in radar order.
    pub const ALL: [Category; 5] = [
        Category::Profitability,
        Category::Liquidity,
        Category::Leverage,
        Category::Efficiency,
        Category::Valuation,
    ];

    /// Weight in the total score; the five weights sum to one.
    pub fn weight(&self) -> f64 {
        match self {
            Category::Profitability => 0.30,
            Category::Liquidity => 0.25,
            Category::Leverage => 0.20,
            Category::Efficiency => 0.15,
            Category::Valuation => 0.10,
        }
    }

    /// Ratios averaged into this category.
    pub fn members(&self) -> &'static [RatioName] {
        match self {
            Category::Profitability => &[
                RatioName::Roe,
                RatioName::Roa,
                RatioName::GrossMargin,
                RatioName::OperatingMargin,
                RatioName::NetMargin,
            ],
            Category::Liquidity => &[
                RatioName::CurrentRatio,
                RatioName::QuickRatio,
                RatioName::CashRatio,
            ],
            Category::Leverage => &[RatioName::DebtToEquity],
            Category::Efficiency => &[
                RatioName::AssetTurnover,
                RatioName::InventoryTurnover,
                RatioName::ReceivablesTurnover,
            ],
            Category::Valuation => &[RatioName::PeRatio],
        }
    }

    /// Lowercase name.
    pub fn as_str(&self) -> &'static str {
        match self {
            Category::Profitability => "profitability",
            Category::Liquidity => "liquidity",
            Category::Leverage => "leverage",
            Category::Efficiency => "efficiency",
            Category::Valuation => "valuation",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Unrounded per-category averages, each in `[25, 100]`.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CategoryScores {
    /// Profitability average
    pub profitability: f64,
    /// Liquidity average
    pub liquidity: f64,
    /// Leverage average
    pub leverage: f64,
    /// Efficiency average
    pub efficiency: f64,
    /// Valuation average
    pub valuation: f64,
}

impl CategoryScores {
    /// Score of one category.
    pub fn get(&self, category: Category) -> f64 {
        match category {
            Category::Profitability => self.profitability,
            Category::Liquidity => self.liquidity,
            Category::Leverage => self.leverage,
            Category::Efficiency => self.efficiency,
            Category::Valuation => self.valuation,
        }
    }

    /// Scores in [`Category::ALL`] order.
    pub fn as_array(&self) -> [f64; 5] {
        Category::ALL.map(|c| self.get(c))
    }
}

/// Weighted health score for one fiscal year.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct HealthScore {
    /// Fiscal year scored
    pub year: i32,
    /// Weighted total, rounded, in `[0, 100]`
    pub total: u8,
    /// Category averages
    pub categories: CategoryScores,
}

/// Rates a single ratio value against its benchmark.
///
/// # Examples
///
/// ```
/// use valuation_fundamentals::{interpret, RatioName, Rating};
///
/// assert_eq!(interpret(RatioName::Roe, 0.25).rating, Rating::Excellent);
/// assert_eq!(interpret(RatioName::DebtToEquity, 1.2).rating, Rating::Acceptable);
/// assert_eq!(interpret(RatioName::PeRatio, -4.0).rating, Rating::NotApplicable);
/// ```
pub fn interpret(name: RatioName, value: f64) -> Interpretation {
    let shown = name.format_value(value);

    if name == RatioName::PeRatio {
        return interpret_pe(shown, value);
    }

    let Some(benchmark) = benchmark_for(name) else {
        return Interpretation::new(
            Rating::NotApplicable,
            format!("{} of {}: no benchmark defined", name.label(), shown),
        );
    };

    let rating = rate(&benchmark, value);
    let message = match (rating, benchmark.direction) {
        (Rating::Excellent, _) => format!(
            "{} of {} meets the excellent benchmark of {}",
            name.label(),
            shown,
            name.format_value(benchmark.excellent)
        ),
        (Rating::Good, _) => format!(
            "{} of {} meets the good benchmark of {}",
            name.label(),
            shown,
            name.format_value(benchmark.good)
        ),
        (Rating::Acceptable, _) => format!(
            "{} of {} is acceptable (benchmark {})",
            name.label(),
            shown,
            name.format_value(benchmark.acceptable)
        ),
        (_, Direction::HigherIsBetter) if value < benchmark.poor => format!(
            "{} of {} is below the poor threshold of {}",
            name.label(),
            shown,
            name.format_value(benchmark.poor)
        ),
        (_, Direction::LowerIsBetter) if value > benchmark.poor => format!(
            "{} of {} is above the poor threshold of {}",
            name.label(),
            shown,
            name.format_value(benchmark.poor)
        ),
        _ => format!(
            "{} of {} falls short of the acceptable benchmark of {}",
            name.label(),
            shown,
            name.format_value(benchmark.acceptable)
        ),
    };
    Interpretation::new(rating, message)
}

fn rate(benchmark: &Benchmark, value: f64) -> Rating {
    match benchmark.direction {
        Direction::HigherIsBetter => {
            if value >= benchmark.excellent {
                Rating::Excellent
            } else if value >= benchmark.good {
                Rating::Good
            } else if value >= benchmark.acceptable {
                Rating::Acceptable
            } else {
                Rating::Poor
            }
        }
        Direction::LowerIsBetter => {
            if value <= benchmark.excellent {
                Rating::Excellent
            } else if value <= benchmark.good {
                Rating::Good
            } else if value <= benchmark.acceptable {
                Rating::Acceptable
            } else {
                Rating::Poor
            }
        }
    }
}

fn interpret_pe(shown: String, value: f64) -> Interpretation {
    if value <= 0.0 {
        return Interpretation::new(
            Rating::NotApplicable,
            "P/E not meaningful: earnings are zero or negative".to_string(),
        );
    }
    let (rating, band) = if value < PE_BANDS.undervalued {
        (Rating::Undervalued, "below the fair band")
    } else if value < PE_BANDS.fair {
        (Rating::FairValue, "within the fair band")
    } else if value < PE_BANDS.growth {
        (Rating::Growth, "priced for growth")
    } else {
        (Rating::Expensive, "above the growth band")
    };
    Interpretation::new(rating, format!("P/E of {} is {}", shown, band))
}

/// Scores one ratio set.
///
/// Each category is the mean score of its members; the total is the
/// weighted sum of the unrounded category means, rounded to the nearest
/// integer.
pub fn score_health(ratios: &RatioSet) -> HealthScore {
    let average = |category: Category| -> f64 {
        let members = category.members();
        let sum: f64 = members
            .iter()
            .map(|&name| f64::from(interpret(name, ratios.value(name)).rating.score()))
            .sum();
        sum / members.len() as f64
    };

    let categories = CategoryScores {
        profitability: average(Category::Profitability),
        liquidity: average(Category::Liquidity),
        leverage: average(Category::Leverage),
        efficiency: average(Category::Efficiency),
        valuation: average(Category::Valuation),
    };

    let weighted: f64 = Category::ALL
        .iter()
        .map(|&c| categories.get(c) * c.weight())
        .sum();

    HealthScore {
        year: ratios.year,
        total: weighted.round().clamp(0.0, 100.0) as u8,
        categories,
    }
}

/// Category scores rounded to integers, in [`Category::ALL`] order.
pub fn radar_scores(ratios: &RatioSet) -> [u8; 5] {
    score_health(ratios)
        .categories
        .as_array()
        .map(|s| s.round().clamp(0.0, 100.0) as u8)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ratios::compute_year;
    use valuation_core::fixtures::sample_dataset;

    #[test]
    fn test_higher_is_better_boundaries() {
        assert_eq!(interpret(RatioName::CurrentRatio, 2.0).rating, Rating::Excellent);
        assert_eq!(interpret(RatioName::CurrentRatio, 1.99).rating, Rating::Good);
        assert_eq!(interpret(RatioName::CurrentRatio, 1.5).rating, Rating::Good);
        assert_eq!(interpret(RatioName::CurrentRatio, 1.0).rating, Rating::Acceptable);
        assert_eq!(interpret(RatioName::CurrentRatio, 0.9).rating, Rating::Poor);
        assert_eq!(interpret(RatioName::CurrentRatio, 0.1).rating, Rating::Poor);
    }

    #[test]
    fn test_debt_to_equity_lower_is_better() {
        assert_eq!(interpret(RatioName::DebtToEquity, 0.0).rating, Rating::Excellent);
        assert_eq!(interpret(RatioName::DebtToEquity, 0.5).rating, Rating::Excellent);
        assert_eq!(interpret(RatioName::DebtToEquity, 1.0).rating, Rating::Good);
        assert_eq!(interpret(RatioName::DebtToEquity, 1.5).rating, Rating::Acceptable);
        assert_eq!(interpret(RatioName::DebtToEquity, 1.8).rating, Rating::Poor);
        assert_eq!(interpret(RatioName::DebtToEquity, 3.0).rating, Rating::Poor);
    }

    #[test]
    fn test_pe_bands() {
        assert_eq!(interpret(RatioName::PeRatio, 0.0).rating, Rating::NotApplicable);
        assert_eq!(interpret(RatioName::PeRatio, -12.0).rating, Rating::NotApplicable);
        assert_eq!(interpret(RatioName::PeRatio, 8.0).rating, Rating::Undervalued);
        assert_eq!(interpret(RatioName::PeRatio, 10.0).rating, Rating::FairValue);
        assert_eq!(interpret(RatioName::PeRatio, 15.0).rating, Rating::Growth);
        assert_eq!(interpret(RatioName::PeRatio, 25.0).rating, Rating::Expensive);
    }

    #[test]
    fn test_unbenchmarked_ratio() {
        let i = interpret(RatioName::EvEbitda, 7.5);
        assert_eq!(i.rating, Rating::NotApplicable);
        assert!(i.message.contains("no benchmark"));
    }

    #[test]
    fn test_messages_quote_thresholds() {
        assert!(interpret(RatioName::Roe, 0.25).message.contains("20.0%"));
        assert!(interpret(RatioName::Roe, 0.01).message.contains("below the poor threshold"));
        assert!(interpret(RatioName::DebtToEquity, 2.5)
            .message
            .contains("above the poor threshold"));
        assert!(interpret(RatioName::Roe, 0.07).message.contains("falls short"));
    }

    #[test]
    fn test_latest_year_health() {
        let ratios = compute_year(&sample_dataset(), 4).unwrap();
        let score = score_health(&ratios);

        assert_eq!(score.year, 2025);
        assert_eq!(score.categories.profitability, 95.0);
        assert_eq!(score.categories.liquidity, 100.0);
        assert_eq!(score.categories.leverage, 100.0);
        assert_eq!(score.categories.efficiency, 75.0);
        assert_eq!(score.categories.valuation, 75.0);
        assert_eq!(score.total, 92);
        assert_eq!(radar_scores(&ratios), [95, 100, 100, 75, 75]);
    }

    #[test]
    fn test_earliest_year_health() {
        let ratios = compute_year(&sample_dataset(), 0).unwrap();
        let score = score_health(&ratios);

        assert_eq!(score.categories.profitability, 35.0);
        assert_eq!(score.categories.valuation, 25.0);
        assert_eq!(score.total, 66);
        assert_eq!(radar_scores(&ratios), [35, 92, 100, 67, 25]);
    }

    #[test]
    fn test_weights_sum_to_one() {
        let sum: f64 = Category::ALL.iter().map(Category::weight).sum();
        assert!((sum - 1.0).abs() < 1e-12);
    }

    #[test]
    fn test_zeroed_ratio_set() {
        // Every ratio zero: P/E is N/A (50), D/E is excellent, the rest poor
        let score = score_health(&RatioSet::default());
        assert_eq!(score.categories.profitability, 25.0);
        assert_eq!(score.categories.leverage, 100.0);
        assert_eq!(score.categories.valuation, 50.0);
        // 7.5 + 6.25 + 20 + 3.75 + 5
        assert_eq!(score.total, 43);
    }
}
