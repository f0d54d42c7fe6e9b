//! Dividend discount models.
//!
//! Three variants price one share from the last dividend per share `d0`:
//!
//! | Model     | Price                                                            |
//! |-----------|------------------------------------------------------------------|
//! | Gordon    | `d0 (1 + g) / (ke - g)`                                          |
//! | Two-stage | PV of `n` dividends at `g_high` + PV of a Gordon price at year `n` |
//! | H-model   | `d0 (1 + g_s) / (ke - g_s) + d0 H (g_high - g_s) / (ke - g_s)`   |
//!
//! where `H` is half the years over which growth declines linearly from
//! `g_high` to the stable rate `g_s`. Every variant requires the cost of
//! equity to exceed its perpetual growth rate.
//!
//! Dividends per share are in the market price unit (statement-scale
//! dividends over shares, see [`FinancialDataset::per_share`]).

mod error;

pub use error::DdmError;

use tracing::{debug, warn};
use valuation_core::math::{mean, safe_div};
use valuation_core::{FairValueRange, FinancialDataset, ValuationError};

use crate::rate_grid::RateGrid;

/// High growth rate used when none is given.
pub const DEFAULT_HIGH_GROWTH: f64 = 0.08;

/// Stable perpetual growth rate used when none is given.
pub const DEFAULT_STABLE_GROWTH: f64 = 0.03;

/// Length of the two-stage high-growth period.
pub const DEFAULT_HIGH_GROWTH_YEARS: u32 = 5;

/// Years over which H-model growth declines to the stable rate.
pub const DEFAULT_DECLINE_YEARS: f64 = 6.0;

/// Dividend record of one historical year.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct DividendYear {
    /// Fiscal year
    pub year: i32,
    /// Dividend per share
    pub dps: f64,
    /// Dividends paid / net income (zero when net income is zero)
    pub payout_ratio: f64,
}

/// Historical dividends per share and their growth.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct DividendHistory {
    /// One entry per fiscal year, oldest first
    pub years: Vec<DividendYear>,
    /// Year-on-year DPS growth; zero after a year without dividends
    pub dps_growth: Vec<f64>,
    /// Mean payout ratio
    pub average_payout: f64,
    /// Mean dividend per share
    pub average_dps: f64,
    /// Mean of `dps_growth` (zero with a single year)
    pub average_dps_growth: f64,
}

impl DividendHistory {
    /// Most recent dividend per share.
    pub fn latest_dps(&self) -> Option<f64> {
        self.years.last().map(|y| y.dps)
    }
}

/// Builds the dividend history of a dataset.
///
/// # Errors
///
/// - `InvalidSharesOutstanding` if the share count is not positive and finite
/// - `EmptyHistory` if there are no fiscal years
pub fn dividend_history(dataset: &FinancialDataset) -> Result<DividendHistory, ValuationError> {
    if dataset.is_empty() {
        return Err(ValuationError::EmptyHistory);
    }
    let years = dataset
        .years
        .iter()
        .map(|fy| {
            Ok(DividendYear {
                year: fy.year,
                dps: dataset.per_share(fy.dividends_paid)?,
                payout_ratio: safe_div(fy.dividends_paid, fy.net_income, 0.0),
            })
        })
        .collect::<Result<Vec<_>, ValuationError>>()?;

    let dps_growth: Vec<f64> = years
        .windows(2)
        .map(|w| {
            if w[0].dps > 0.0 {
                w[1].dps / w[0].dps - 1.0
            } else {
                0.0
            }
        })
        .collect();
    let payouts: Vec<f64> = years.iter().map(|y| y.payout_ratio).collect();
    let dps: Vec<f64> = years.iter().map(|y| y.dps).collect();

    Ok(DividendHistory {
        average_payout: mean(&payouts).unwrap_or_default(),
        average_dps: mean(&dps).unwrap_or_default(),
        average_dps_growth: mean(&dps_growth).unwrap_or_default(),
        years,
        dps_growth,
    })
}

/// Inputs shared by the three models.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct DdmInputs {
    /// Last dividend per share
    pub d0: f64,
    /// Discount rate
    pub cost_of_equity: f64,
    /// Initial growth rate (two-stage and H-model)
    pub high_growth: f64,
    /// Perpetual growth rate (all models)
    pub stable_growth: f64,
    /// Length of the two-stage high-growth period
    pub high_growth_years: u32,
    /// H-model decline period; `H` is half of it
    pub decline_years: f64,
}

impl DdmInputs {
    /// Inputs with the default growth profile.
    pub fn new(d0: f64, cost_of_equity: f64) -> Self {
        Self {
            d0,
            cost_of_equity,
            high_growth: DEFAULT_HIGH_GROWTH,
            stable_growth: DEFAULT_STABLE_GROWTH,
            high_growth_years: DEFAULT_HIGH_GROWTH_YEARS,
            decline_years: DEFAULT_DECLINE_YEARS,
        }
    }

    /// Default inputs seeded with the dataset's latest dividend per share.
    ///
    /// # Errors
    ///
    /// Returns `Valuation` when the dataset has no usable dividend history.
    pub fn from_dataset(dataset: &FinancialDataset, cost_of_equity: f64) -> Result<Self, DdmError> {
        let d0 = dividend_history(dataset)?
            .latest_dps()
            .ok_or(ValuationError::EmptyHistory)?;
        Ok(Self::new(d0, cost_of_equity))
    }

    fn validate(&self) -> Result<(), DdmError> {
        let fields = [
            ("d0", self.d0),
            ("cost_of_equity", self.cost_of_equity),
            ("high_growth", self.high_growth),
            ("stable_growth", self.stable_growth),
            ("decline_years", self.decline_years),
        ];
        if let Some((name, value)) = fields.iter().find(|(_, v)| !v.is_finite()) {
            return Err(DdmError::InvalidParameter {
                name: *name,
                value: value.to_string(),
            });
        }
        if self.decline_years < 0.0 {
            return Err(DdmError::InvalidParameter {
                name: "decline_years",
                value: self.decline_years.to_string(),
            });
        }
        Ok(())
    }
}

fn require_spread(cost_of_equity: f64, growth: f64) -> Result<f64, DdmError> {
    if cost_of_equity > growth {
        Ok(cost_of_equity - growth)
    } else {
        Err(DdmError::GrowthNotBelowDiscount {
            cost_of_equity,
            growth,
        })
    }
}

/// Single-stage constant-growth price.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct GordonValuation {
    /// Last dividend per share
    pub d0: f64,
    /// Next dividend, `d0 (1 + g)`
    pub d1: f64,
    /// Perpetual growth
    pub growth: f64,
    /// Discount rate
    pub cost_of_equity: f64,
    /// Price per share
    pub target_price: f64,
    /// `d1 / target_price` (zero for a non-positive price)
    pub dividend_yield: f64,
}

/// Prices a share with the Gordon growth model.
///
/// # Errors
///
/// - `InvalidParameter` for a non-finite input
/// - `GrowthNotBelowDiscount` when `cost_of_equity <= growth`
///
/// # Examples
///
/// ```rust
/// use valuation_pricing::ddm::gordon_growth;
///
/// let v = gordon_growth(1000.0, 0.03, 0.11).unwrap();
/// assert!((v.target_price - 12875.0).abs() < 1e-6);
/// assert!(gordon_growth(1000.0, 0.11, 0.11).is_err());
/// ```
pub fn gordon_growth(
    d0: f64,
    growth: f64,
    cost_of_equity: f64,
) -> Result<GordonValuation, DdmError> {
    DdmInputs {
        stable_growth: growth,
        ..DdmInputs::new(d0, cost_of_equity)
    }
    .validate()?;
    let spread = require_spread(cost_of_equity, growth)?;
    let d1 = d0 * (1.0 + growth);
    let target_price = d1 / spread;
    Ok(GordonValuation {
        d0,
        d1,
        growth,
        cost_of_equity,
        target_price,
        dividend_yield: if target_price > 0.0 { d1 / target_price } else { 0.0 },
    })
}

/// Dividend paid in one year of the high-growth stage.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct StageDividend {
    /// Years from today
    pub year: u32,
    /// Dividend per share
    pub dividend: f64,
    /// Discounted dividend
    pub present_value: f64,
}

/// High growth for a fixed period, then stable growth forever.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TwoStageValuation {
    /// Inputs used
    pub inputs: DdmInputs,
    /// Dividends of the high-growth stage
    pub stage_one: Vec<StageDividend>,
    /// Sum of discounted stage-one dividends
    pub pv_stage_one: f64,
    /// Gordon price at the end of stage one
    pub terminal_price: f64,
    /// Discounted terminal price
    pub pv_terminal: f64,
    /// Price per share
    pub target_price: f64,
}

impl TwoStageValuation {
    /// Share of the price contributed by the terminal price.
    pub fn terminal_weight(&self) -> f64 {
        safe_div(self.pv_terminal, self.target_price, 0.0)
    }
}

/// Prices a share with the two-stage dividend discount model.
///
/// # Errors
///
/// - `InvalidParameter` for a non-finite input
/// - `GrowthNotBelowDiscount` when `cost_of_equity <= stable_growth`
pub fn two_stage(inputs: &DdmInputs) -> Result<TwoStageValuation, DdmError> {
    inputs.validate()?;
    let spread = require_spread(inputs.cost_of_equity, inputs.stable_growth)?;
    let discount = 1.0 + inputs.cost_of_equity;

    let mut dividend = inputs.d0;
    let stage_one: Vec<StageDividend> = (1..=inputs.high_growth_years)
        .map(|year| {
            dividend *= 1.0 + inputs.high_growth;
            StageDividend {
                year,
                dividend,
                present_value: dividend / discount.powi(year as i32),
            }
        })
        .collect();
    let pv_stage_one: f64 = stage_one.iter().map(|d| d.present_value).sum();

    let terminal_price = dividend * (1.0 + inputs.stable_growth) / spread;
    let pv_terminal = terminal_price / discount.powi(inputs.high_growth_years as i32);

    Ok(TwoStageValuation {
        inputs: *inputs,
        stage_one,
        pv_stage_one,
        terminal_price,
        pv_terminal,
        target_price: pv_stage_one + pv_terminal,
    })
}

/// Linearly declining growth.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct HModelValuation {
    /// Inputs used
    pub inputs: DdmInputs,
    /// Half the decline period
    pub h: f64,
    /// Gordon price at the stable rate
    pub stable_component: f64,
    /// Premium for the above-stable growth period
    pub extra_growth_component: f64,
    /// Price per share
    pub target_price: f64,
}

/// Prices a share with the H-model.
///
/// # Errors
///
/// - `InvalidParameter` for a non-finite input or a negative decline period
/// - `GrowthNotBelowDiscount` when `cost_of_equity <= stable_growth`
pub fn h_model(inputs: &DdmInputs) -> Result<HModelValuation, DdmError> {
    inputs.validate()?;
    let spread = require_spread(inputs.cost_of_equity, inputs.stable_growth)?;
    let h = inputs.decline_years / 2.0;
    let stable_component = inputs.d0 * (1.0 + inputs.stable_growth) / spread;
    let extra_growth_component =
        inputs.d0 * h * (inputs.high_growth - inputs.stable_growth) / spread;

    Ok(HModelValuation {
        inputs: *inputs,
        h,
        stable_component,
        extra_growth_component,
        target_price: stable_component + extra_growth_component,
    })
}

/// A model that produced no price, with the reason.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SkippedModel {
    /// Model name
    pub model: String,
    /// Why it was skipped
    pub reason: String,
}

/// All three models run on the same inputs.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct DdmSummary {
    /// Gordon model at the stable growth rate
    pub gordon: Option<GordonValuation>,
    /// Two-stage model
    pub two_stage: Option<TwoStageValuation>,
    /// H-model
    pub h_model: Option<HModelValuation>,
    /// Models that could not price the share
    pub skipped: Vec<SkippedModel>,
    /// Range of the positive target prices
    pub fair_value: Option<FairValueRange>,
}

/// Runs the Gordon (at the stable rate), two-stage and H-models.
///
/// A model whose inputs it cannot price is listed in `skipped` instead of
/// failing the whole run.
pub fn value_dividends(inputs: &DdmInputs) -> DdmSummary {
    let mut skipped = Vec::new();
    let mut keep = |model: &str, err: DdmError| {
        warn!(model, error = %err, "dividend model skipped");
        skipped.push(SkippedModel {
            model: model.to_string(),
            reason: err.to_string(),
        });
    };

    let gordon = gordon_growth(inputs.d0, inputs.stable_growth, inputs.cost_of_equity)
        .map_err(|e| keep("gordon", e))
        .ok();
    let two_stage = two_stage(inputs).map_err(|e| keep("two_stage", e)).ok();
    let h_model = h_model(inputs).map_err(|e| keep("h_model", e)).ok();

    let fair_value = FairValueRange::from_prices(
        gordon
            .map(|v| v.target_price)
            .into_iter()
            .chain(two_stage.as_ref().map(|v| v.target_price))
            .chain(h_model.map(|v| v.target_price)),
    );
    debug!(d0 = inputs.d0, fair_value = ?fair_value, "dividend models complete");

    DdmSummary {
        gordon,
        two_stage,
        h_model,
        skipped,
        fair_value,
    }
}

/// Gordon prices over a cost-of-equity by growth grid; cells where growth
/// reaches the cost of equity are `None`.
///
/// # Errors
///
/// Returns `InvalidParameter` for a non-finite `d0` or axis value.
pub fn gordon_sensitivity(
    d0: f64,
    cost_of_equity: &[f64],
    growth: &[f64],
) -> Result<RateGrid, DdmError> {
    RateGrid::build(cost_of_equity, growth, |ke, g| {
        match gordon_growth(d0, g, ke) {
            Ok(v) => Ok(Some(v.target_price)),
            Err(DdmError::GrowthNotBelowDiscount { .. }) => Ok(None),
            Err(e) => Err(e),
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rate_grid::{DEFAULT_COST_OF_EQUITY_STEPS, DEFAULT_GROWTH_STEPS};
    use approx::assert_relative_eq;
    use valuation_core::fixtures::sample_dataset;

    #[test]
    fn test_dividend_history() {
        let history = dividend_history(&sample_dataset()).unwrap();
        assert_eq!(history.years.len(), 5);
        assert_eq!(history.dps_growth.len(), 4);
        assert_relative_eq!(history.latest_dps().unwrap(), 982.0 / 81.86 * 1000.0);
        assert_relative_eq!(history.years[0].payout_ratio, 327.0 / 262.0);
        // Share count is constant, so DPS growth equals dividend growth
        assert_relative_eq!(history.dps_growth[0], 409.0 / 327.0 - 1.0, max_relative = 1e-12);
        assert!(history.average_dps_growth > 0.0);
    }

    #[test]
    fn test_growth_after_zero_dividend_is_zero() {
        let mut dataset = sample_dataset();
        dataset.years[1].dividends_paid = 0.0;
        let history = dividend_history(&dataset).unwrap();
        assert_eq!(history.dps_growth[1], 0.0);
        assert_eq!(history.dps_growth[0], -1.0);
    }

    #[test]
    fn test_history_errors() {
        let mut dataset = sample_dataset();
        dataset.shares_outstanding = 0.0;
        assert_eq!(
            dividend_history(&dataset).unwrap_err(),
            ValuationError::InvalidSharesOutstanding(0.0)
        );
        dataset.years.clear();
        assert_eq!(
            dividend_history(&dataset).unwrap_err(),
            ValuationError::EmptyHistory
        );
    }

    #[test]
    fn test_inputs_from_dataset() {
        let inputs = DdmInputs::from_dataset(&sample_dataset(), 0.11).unwrap();
        assert_relative_eq!(inputs.d0, 982.0 / 81.86 * 1000.0);
        assert_eq!(inputs.high_growth, DEFAULT_HIGH_GROWTH);
        assert_eq!(inputs.decline_years, DEFAULT_DECLINE_YEARS);

        let mut empty = sample_dataset();
        empty.years.clear();
        assert_eq!(
            DdmInputs::from_dataset(&empty, 0.11).unwrap_err(),
            DdmError::Valuation(ValuationError::EmptyHistory)
        );
    }

    #[test]
    fn test_gordon() {
        let v = gordon_growth(2000.0, 0.03, 0.11).unwrap();
        assert_relative_eq!(v.d1, 2060.0);
        assert_relative_eq!(v.target_price, 25750.0, epsilon = 1e-9);
        assert_relative_eq!(v.dividend_yield, 0.08, epsilon = 1e-12);
    }

    #[test]
    fn test_gordon_rejects_growth_at_discount() {
        assert_eq!(
            gordon_growth(2000.0, 0.11, 0.11).unwrap_err(),
            DdmError::GrowthNotBelowDiscount {
                cost_of_equity: 0.11,
                growth: 0.11
            }
        );
        assert!(matches!(
            gordon_growth(f64::NAN, 0.03, 0.11),
            Err(DdmError::InvalidParameter { name: "d0", .. })
        ));
    }

    #[test]
    fn test_two_stage() {
        let inputs = DdmInputs::new(1000.0, 0.11);
        let v = two_stage(&inputs).unwrap();
        assert_eq!(v.stage_one.len(), 5);
        assert_relative_eq!(v.stage_one[0].dividend, 1080.0, epsilon = 1e-9);
        assert_relative_eq!(v.stage_one[0].present_value, 1080.0 / 1.11, epsilon = 1e-9);

        let d5 = 1000.0 * 1.08f64.powi(5);
        assert_relative_eq!(v.terminal_price, d5 * 1.03 / 0.08, max_relative = 1e-12);
        assert_relative_eq!(v.target_price, v.pv_stage_one + v.pv_terminal);
        assert_relative_eq!(v.target_price, REFERENCE_TWO_STAGE, max_relative = 1e-10);
        assert!(v.terminal_weight() > 0.5 && v.terminal_weight() < 1.0);
    }

    #[test]
    fn test_two_stage_without_high_growth_is_gordon() {
        let inputs = DdmInputs {
            high_growth_years: 0,
            ..DdmInputs::new(1000.0, 0.11)
        };
        let v = two_stage(&inputs).unwrap();
        let gordon = gordon_growth(1000.0, 0.03, 0.11).unwrap();
        assert!(v.stage_one.is_empty());
        assert_relative_eq!(v.target_price, gordon.target_price, max_relative = 1e-12);
    }

    #[test]
    fn test_h_model() {
        let v = h_model(&DdmInputs::new(1000.0, 0.11)).unwrap();
        assert_eq!(v.h, 3.0);
        assert_relative_eq!(v.stable_component, 12875.0, epsilon = 1e-9);
        // 1000 * 3 * 0.05 / 0.08
        assert_relative_eq!(v.extra_growth_component, 1875.0, epsilon = 1e-9);
        assert_relative_eq!(v.target_price, 14750.0, epsilon = 1e-9);
    }

    #[test]
    fn test_h_model_rejects_negative_decline() {
        let inputs = DdmInputs {
            decline_years: -1.0,
            ..DdmInputs::new(1000.0, 0.11)
        };
        assert!(matches!(
            h_model(&inputs),
            Err(DdmError::InvalidParameter { name: "decline_years", .. })
        ));
    }

    #[test]
    fn test_value_dividends_range() {
        let summary = value_dividends(&DdmInputs::new(1000.0, 0.11));
        assert!(summary.skipped.is_empty());
        let range = summary.fair_value.unwrap();
        assert_eq!(range.methods, 3);
        assert_relative_eq!(range.low, 12875.0, epsilon = 1e-9);
        assert_relative_eq!(range.high, REFERENCE_TWO_STAGE, max_relative = 1e-10);
    }

    #[test]
    fn test_value_dividends_skips_unpriceable_models() {
        let inputs = DdmInputs {
            stable_growth: 0.12,
            ..DdmInputs::new(1000.0, 0.11)
        };
        let summary = value_dividends(&inputs);
        assert!(summary.gordon.is_none());
        assert!(summary.two_stage.is_none());
        assert!(summary.h_model.is_none());
        assert_eq!(summary.skipped.len(), 3);
        assert_eq!(summary.skipped[0].model, "gordon");
        assert!(summary.fair_value.is_none());
    }

    #[test]
    fn test_gordon_sensitivity_marks_undefined_cells() {
        let grid = gordon_sensitivity(1000.0, &[0.03, 0.10], &DEFAULT_GROWTH_STEPS).unwrap();
        assert_relative_eq!(grid.get(0, 0).unwrap(), 102_000.0, max_relative = 1e-9);
        assert_eq!(grid.get(0, 1), None);
        assert_eq!(grid.get(0, 2), None);
        assert!(grid.get(1, 2).unwrap() > grid.get(1, 0).unwrap());

        let full = gordon_sensitivity(1000.0, &DEFAULT_COST_OF_EQUITY_STEPS, &DEFAULT_GROWTH_STEPS)
            .unwrap();
        assert!(full.prices.iter().flatten().all(Option::is_some));
        assert!(gordon_sensitivity(f64::INFINITY, &[0.1], &[0.02]).is_err());
    }

    const REFERENCE_TWO_STAGE: f64 = 15835.585096477835;
}
