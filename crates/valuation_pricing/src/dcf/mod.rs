//! Five-year discounted cash flow projector.
//!
//! Starting from the most recent historical revenue, the projector grows
//! revenue for [`PROJECTION_YEARS`] years, derives unlevered free cash flow,
//! adds a Gordon-growth terminal value and bridges enterprise value to a
//! per-share equity value.
//!
//! # Model conventions
//!
//! - Depreciation equals capex (`revenue * capex_pct`); the two cancel in
//!   free cash flow and only affect EBIT and therefore tax.
//! - Tax is `ebit * tax_rate` with no floor: a negative EBIT produces a tax
//!   credit.
//! - The opening NWC level of each year is `prev_revenue * nwc_pct`, so the
//!   first-year NWC change is driven by growth alone.
//! - When `wacc <= terminal_growth` the terminal value is set to zero and no
//!   error is raised; callers should treat a collapsed enterprise value as a
//!   signal to revisit the inputs. The event is logged at `debug` only, as
//!   the sweep and the sampler may hit it on many trials per run; use
//!   [`ValuationResult::is_terminal_degenerate`] to surface it.
//!
//! # Examples
//!
//! ```rust,ignore
//! use valuation_core::AssumptionOverrides;
//! use valuation_pricing::dcf::project;
//!
//! let result = project(&dataset, &AssumptionOverrides::new().wacc(0.10))?;
//! assert_eq!(result.projections.len(), 5);
//! ```

use tracing::debug;
use valuation_core::{AssumptionOverrides, Assumptions, FinancialDataset, ValuationError};

/// Fixed forecast horizon in years.
pub const PROJECTION_YEARS: usize = 5;

/// One projected fiscal year.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ProjectionYear {
    /// Calendar year (base year + offset)
    pub year: i32,
    /// Projected revenue
    pub revenue: f64,
    /// Projected EBITDA
    pub ebitda: f64,
    /// EBITDA less depreciation
    pub ebit: f64,
    /// Tax on EBIT (negative for a loss)
    pub tax: f64,
    /// Net operating profit after tax
    pub nopat: f64,
    /// Capital expenditure
    pub capex: f64,
    /// Increase in net working capital
    pub nwc_change: f64,
    /// Unlevered free cash flow
    pub free_cash_flow: f64,
}

/// Output of a single projection run.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ValuationResult {
    /// Assumptions after merging overrides
    pub assumptions: Assumptions,
    /// Forecast years in chronological order
    pub projections: Vec<ProjectionYear>,
    /// Sum of discounted free cash flows
    pub pv_fcf: f64,
    /// Undiscounted terminal value (zero when undefined)
    pub terminal_value: f64,
    /// Discounted terminal value
    pub pv_terminal: f64,
    /// `pv_fcf + pv_terminal`
    pub enterprise_value: f64,
    /// Enterprise value plus cash less debt
    pub equity_value: f64,
    /// Equity value per share
    pub share_price: f64,
}

impl ValuationResult {
    /// Whether the terminal value was undefined (`wacc <= terminal_growth`).
    #[inline]
    pub fn is_terminal_degenerate(&self) -> bool {
        !self.assumptions.has_terminal_value()
    }

    /// Share of enterprise value contributed by the terminal value.
    pub fn terminal_weight(&self) -> f64 {
        valuation_core::math::safe_div(self.pv_terminal, self.enterprise_value, 0.0)
    }
}

/// Values the dataset with `overrides` merged over its default assumptions.
///
/// # Errors
///
/// See [`project_assumptions`].
pub fn project(
    dataset: &FinancialDataset,
    overrides: &AssumptionOverrides,
) -> Result<ValuationResult, ValuationError> {
    let assumptions = dataset.assumptions.merge(overrides);
    project_assumptions(dataset, &assumptions)
}

/// Values the dataset under a complete assumption set.
///
/// This is the entry point used by the sensitivity sweep and the Monte Carlo
/// sampler, which construct assumption sets directly.
///
/// # Errors
///
/// - `NonFiniteAssumption` if any assumption is NaN or infinite
/// - `InvalidOverride` if `wacc <= -100%` (discount factors undefined)
/// - `InvalidSharesOutstanding` if the share count is not positive and finite
/// - `EmptyHistory` if the dataset has no base year
pub fn project_assumptions(
    dataset: &FinancialDataset,
    assumptions: &Assumptions,
) -> Result<ValuationResult, ValuationError> {
    assumptions.validate()?;
    if 1.0 + assumptions.wacc <= 0.0 {
        return Err(ValuationError::InvalidOverride(format!(
            "wacc must exceed -100%, got {}",
            assumptions.wacc
        )));
    }
    let shares = dataset.checked_shares()?;
    let base = dataset.latest().ok_or(ValuationError::EmptyHistory)?;

    let projections = project_years(base.year, base.revenue, assumptions);

    let discount = 1.0 + assumptions.wacc;
    let pv_fcf: f64 = projections
        .iter()
        .zip(1..)
        .map(|(p, i)| p.free_cash_flow / discount.powi(i))
        .sum();

    let last_fcf = projections
        .last()
        .map(|p| p.free_cash_flow)
        .unwrap_or_default();
    let terminal_value = if assumptions.has_terminal_value() {
        last_fcf * (1.0 + assumptions.terminal_growth)
            / (assumptions.wacc - assumptions.terminal_growth)
    } else {
        debug!(
            wacc = assumptions.wacc,
            terminal_growth = assumptions.terminal_growth,
            "terminal value undefined; wacc does not exceed terminal growth"
        );
        0.0
    };
    let pv_terminal = terminal_value / discount.powi(PROJECTION_YEARS as i32);

    let enterprise_value = pv_fcf + pv_terminal;
    let equity_value = enterprise_value + dataset.cash_equivalents - dataset.debt;
    let share_price = equity_value / shares;

    debug!(
        company = %dataset.company,
        enterprise_value,
        equity_value,
        share_price,
        "dcf valuation complete"
    );

    Ok(ValuationResult {
        assumptions: *assumptions,
        projections,
        pv_fcf,
        terminal_value,
        pv_terminal,
        enterprise_value,
        equity_value,
        share_price,
    })
}

fn project_years(base_year: i32, base_revenue: f64, a: &Assumptions) -> Vec<ProjectionYear> {
    let mut prev_revenue = base_revenue;
    (1..=PROJECTION_YEARS as i32)
        .map(|offset| {
            let revenue = prev_revenue * (1.0 + a.rev_growth);
            let ebitda = revenue * a.ebitda_margin;
            let depreciation = revenue * a.capex_pct;
            let ebit = ebitda - depreciation;
            let tax = ebit * a.tax_rate;
            let nopat = ebit - tax;
            let capex = revenue * a.capex_pct;
            let nwc_change = revenue * a.nwc_pct - prev_revenue * a.nwc_pct;
            let free_cash_flow = nopat + depreciation - capex - nwc_change;
            prev_revenue = revenue;

            ProjectionYear {
                year: base_year + offset,
                revenue,
                ebitda,
                ebit,
                tax,
                nopat,
                capex,
                nwc_change,
                free_cash_flow,
            }
        })
        .collect()
}
