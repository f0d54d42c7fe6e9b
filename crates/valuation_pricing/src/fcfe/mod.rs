//! Free cash flow to equity (FCFE) valuation.
//!
//! `FCFE = net income + depreciation - capex - ΔNWC + net borrowing`, discounted
//! at the CAPM cost of equity. Because the cash flows already belong to
//! shareholders, the discounted sum is the equity value directly; there is no
//! cash or debt bridge as in [`crate::dcf`].
//!
//! # Model conventions
//!
//! - Net income and revenue grow independently; depreciation, capex and the
//!   NWC level are fixed fractions of projected revenue.
//! - The first projected ΔNWC is measured against the last reported NWC
//!   level, not against a revenue-scaled one.
//! - Net borrowing is a flat amount per projected year.
//! - When `cost_of_equity <= terminal_growth` the terminal value is zero,
//!   mirroring the DCF projector.
//! - `share_price` is equity value over shares, on the same scale as the
//!   DCF share price.
//!
//! # Examples
//!
//! ```rust,ignore
//! use valuation_core::CapmInputs;
//! use valuation_pricing::fcfe::{value_equity, FcfeAssumptions};
//!
//! let ke = CapmInputs { risk_free: 0.03, beta: 0.8, market_premium: 0.10 }.cost_of_equity()?;
//! let assumptions = FcfeAssumptions::from_history(&dataset, ke)?;
//! let result = value_equity(&dataset, &assumptions)?;
//! println!("{:.2} per share", result.share_price);
//! ```

use tracing::debug;
use valuation_core::math::{mean, safe_div};
use valuation_core::{FinancialDataset, FiscalYear, ValuationError};

use crate::dcf::PROJECTION_YEARS;
use crate::rate_grid::RateGrid;

/// Growth applied to revenue and net income when projecting from history.
pub const DEFAULT_FCFE_GROWTH: f64 = 0.05;

/// Perpetual growth used when projecting from history.
pub const DEFAULT_FCFE_TERMINAL_GROWTH: f64 = 0.03;

/// Projection drivers for the FCFE model.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct FcfeAssumptions {
    /// Annual revenue growth
    pub revenue_growth: f64,
    /// Annual net income growth
    pub net_income_growth: f64,
    /// Depreciation / revenue
    pub depreciation_pct: f64,
    /// Capex / revenue
    pub capex_pct: f64,
    /// NWC level / revenue
    pub nwc_pct: f64,
    /// Net borrowing per projected year
    pub net_borrowing: f64,
    /// Perpetual growth after the horizon
    pub terminal_growth: f64,
    /// Discount rate for equity cash flows
    pub cost_of_equity: f64,
}

impl FcfeAssumptions {
    /// Drivers taken from historical averages: depreciation, capex and NWC
    /// as mean fractions of revenue, 5% growth, no net borrowing and 3%
    /// terminal growth.
    ///
    /// # Errors
    ///
    /// Returns `EmptyHistory` when the dataset has no fiscal years.
    pub fn from_history(
        dataset: &FinancialDataset,
        cost_of_equity: f64,
    ) -> Result<Self, ValuationError> {
        let averages = dataset.historical_averages()?;
        let depreciation: Vec<f64> = dataset
            .years
            .iter()
            .map(|y| safe_div(y.depreciation, y.revenue, 0.0))
            .collect();
        let depreciation_pct = mean(&depreciation).ok_or(ValuationError::EmptyHistory)?;

        Ok(Self {
            revenue_growth: DEFAULT_FCFE_GROWTH,
            net_income_growth: DEFAULT_FCFE_GROWTH,
            depreciation_pct,
            capex_pct: averages.capex_pct,
            nwc_pct: averages.nwc_pct,
            net_borrowing: 0.0,
            terminal_growth: DEFAULT_FCFE_TERMINAL_GROWTH,
            cost_of_equity,
        })
    }

    /// Copy with a different discount rate and terminal growth.
    #[inline]
    pub fn with_rates(&self, cost_of_equity: f64, terminal_growth: f64) -> Self {
        Self {
            cost_of_equity,
            terminal_growth,
            ..*self
        }
    }

    /// Whether the Gordon-growth terminal value is defined.
    #[inline]
    pub fn has_terminal_value(&self) -> bool {
        self.cost_of_equity > self.terminal_growth
    }

    /// Checks every driver is finite and the discount rate exceeds -100%.
    ///
    /// # Errors
    ///
    /// - `NonFiniteAssumption` naming the first NaN or infinite driver
    /// - `InvalidOverride` if `cost_of_equity <= -100%`
    pub fn validate(&self) -> Result<(), ValuationError> {
        let fields = [
            ("revenue_growth", self.revenue_growth),
            ("net_income_growth", self.net_income_growth),
            ("depreciation_pct", self.depreciation_pct),
            ("capex_pct", self.capex_pct),
            ("nwc_pct", self.nwc_pct),
            ("net_borrowing", self.net_borrowing),
            ("terminal_growth", self.terminal_growth),
            ("cost_of_equity", self.cost_of_equity),
        ];
        if let Some((field, value)) = fields.iter().find(|(_, v)| !v.is_finite()) {
            return Err(ValuationError::NonFiniteAssumption {
                field: *field,
                value: *value,
            });
        }
        if 1.0 + self.cost_of_equity <= 0.0 {
            return Err(ValuationError::InvalidOverride(format!(
                "cost_of_equity must exceed -100%, got {}",
                self.cost_of_equity
            )));
        }
        Ok(())
    }
}

/// Reported FCFE for one historical year.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct HistoricalFcfe {
    /// Fiscal year
    pub year: i32,
    /// Change in NWC from the prior year (zero for the first year)
    pub nwc_change: f64,
    /// Free cash flow to equity
    pub fcfe: f64,
    /// Dividends paid / net income (zero when net income is zero)
    pub payout_ratio: f64,
}

/// FCFE of each reported year.
pub fn historical_fcfe(dataset: &FinancialDataset) -> Vec<HistoricalFcfe> {
    let mut prev_nwc: Option<f64> = None;
    dataset
        .years
        .iter()
        .map(|fy| {
            let nwc_change = prev_nwc.map_or(0.0, |prev| fy.net_working_capital - prev);
            prev_nwc = Some(fy.net_working_capital);
            HistoricalFcfe {
                year: fy.year,
                nwc_change,
                fcfe: equity_cash_flow(fy, nwc_change),
                payout_ratio: safe_div(fy.dividends_paid, fy.net_income, 0.0),
            }
        })
        .collect()
}

#[inline]
fn equity_cash_flow(fy: &FiscalYear, nwc_change: f64) -> f64 {
    fy.net_income + fy.depreciation - fy.capex - nwc_change + fy.net_borrowing
}

/// One projected year of the FCFE model.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct FcfeProjectionYear {
    /// Calendar year
    pub year: i32,
    /// Projected revenue
    pub revenue: f64,
    /// Projected net income
    pub net_income: f64,
    /// Depreciation and amortisation
    pub depreciation: f64,
    /// Capital expenditure
    pub capex: f64,
    /// NWC level
    pub nwc: f64,
    /// Increase in NWC
    pub nwc_change: f64,
    /// Net borrowing
    pub net_borrowing: f64,
    /// Free cash flow to equity
    pub fcfe: f64,
}

/// Output of an FCFE valuation.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct FcfeValuation {
    /// Drivers used
    pub assumptions: FcfeAssumptions,
    /// Forecast years in chronological order
    pub projections: Vec<FcfeProjectionYear>,
    /// Sum of discounted FCFE
    pub pv_fcfe: f64,
    /// Undiscounted terminal value (zero when undefined)
    pub terminal_value: f64,
    /// Discounted terminal value
    pub pv_terminal: f64,
    /// `pv_fcfe + pv_terminal`
    pub equity_value: f64,
    /// Equity value per share
    pub share_price: f64,
}

impl FcfeValuation {
    /// Share of equity value contributed by the terminal value.
    pub fn terminal_weight(&self) -> f64 {
        safe_div(self.pv_terminal, self.equity_value, 0.0)
    }

    /// Whether the terminal value was undefined.
    #[inline]
    pub fn is_terminal_degenerate(&self) -> bool {
        !self.assumptions.has_terminal_value()
    }
}

/// Projects FCFE from the latest reported year and discounts it at the cost
/// of equity.
///
/// # Errors
///
/// - `NonFiniteAssumption` or `InvalidOverride` from
///   [`FcfeAssumptions::validate`]
/// - `InvalidSharesOutstanding` if the share count is not positive and finite
/// - `EmptyHistory` if the dataset has no base year
pub fn value_equity(
    dataset: &FinancialDataset,
    assumptions: &FcfeAssumptions,
) -> Result<FcfeValuation, ValuationError> {
    assumptions.validate()?;
    let shares = dataset.checked_shares()?;
    let base = dataset.latest().ok_or(ValuationError::EmptyHistory)?;

    let projections = project_years(base, assumptions);

    let discount = 1.0 + assumptions.cost_of_equity;
    let pv_fcfe: f64 = projections
        .iter()
        .zip(1..)
        .map(|(p, i)| p.fcfe / discount.powi(i))
        .sum();

    let last_fcfe = projections.last().map(|p| p.fcfe).unwrap_or_default();
    let terminal_value = if assumptions.has_terminal_value() {
        last_fcfe * (1.0 + assumptions.terminal_growth)
            / (assumptions.cost_of_equity - assumptions.terminal_growth)
    } else {
        debug!(
            cost_of_equity = assumptions.cost_of_equity,
            terminal_growth = assumptions.terminal_growth,
            "terminal value undefined; cost of equity does not exceed terminal growth"
        );
        0.0
    };
    let pv_terminal = terminal_value / discount.powi(PROJECTION_YEARS as i32);
    let equity_value = pv_fcfe + pv_terminal;
    let share_price = equity_value / shares;

    debug!(
        company = %dataset.company,
        equity_value,
        share_price,
        "fcfe valuation complete"
    );

    Ok(FcfeValuation {
        assumptions: *assumptions,
        projections,
        pv_fcfe,
        terminal_value,
        pv_terminal,
        equity_value,
        share_price,
    })
}

fn project_years(base: &FiscalYear, a: &FcfeAssumptions) -> Vec<FcfeProjectionYear> {
    let mut prev_revenue = base.revenue;
    let mut prev_net_income = base.net_income;
    let mut prev_nwc = base.net_working_capital;
    (1..=PROJECTION_YEARS as i32)
        .map(|offset| {
            let revenue = prev_revenue * (1.0 + a.revenue_growth);
            let net_income = prev_net_income * (1.0 + a.net_income_growth);
            let depreciation = revenue * a.depreciation_pct;
            let capex = revenue * a.capex_pct;
            let nwc = revenue * a.nwc_pct;
            let nwc_change = nwc - prev_nwc;
            let fcfe = net_income + depreciation - capex - nwc_change + a.net_borrowing;
            prev_revenue = revenue;
            prev_net_income = net_income;
            prev_nwc = nwc;

            FcfeProjectionYear {
                year: base.year + offset,
                revenue,
                net_income,
                depreciation,
                capex,
                nwc,
                nwc_change,
                net_borrowing: a.net_borrowing,
                fcfe,
            }
        })
        .collect()
}

/// Re-values the FCFE model at every cost-of-equity and terminal-growth pair.
///
/// Every cell holds a price; pairs without a terminal value are priced on
/// the explicit horizon alone.
///
/// # Errors
///
/// Returns the first error from [`value_equity`].
pub fn fcfe_sensitivity(
    dataset: &FinancialDataset,
    base: &FcfeAssumptions,
    cost_of_equity: &[f64],
    terminal_growth: &[f64],
) -> Result<RateGrid, ValuationError> {
    RateGrid::build(cost_of_equity, terminal_growth, |ke, g| {
        value_equity(dataset, &base.with_rates(ke, g)).map(|v| Some(v.share_price))
    })
}
