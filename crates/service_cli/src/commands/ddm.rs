//! Dividend discount command.

use serde::Serialize;
use tracing::info;
use valuation_core::{CapmInputs, FinancialDataset};
use valuation_pricing::ddm::{
    DEFAULT_DECLINE_YEARS, DEFAULT_HIGH_GROWTH, DEFAULT_HIGH_GROWTH_YEARS, DEFAULT_STABLE_GROWTH,
};
use valuation_pricing::rate_grid::{DEFAULT_COST_OF_EQUITY_STEPS, DEFAULT_GROWTH_STEPS};
use valuation_pricing::{
    dividend_history, gordon_sensitivity, value_dividends, DdmInputs, DdmSummary,
    DividendHistory, RateGrid,
};

use crate::config::OutputFormat;
use crate::output::{pct, rate_grid_table, signed_pct, to_json, Table};
use crate::Result;

/// Growth profile shared by the two-stage and H-models.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct GrowthProfile {
    /// Initial growth rate
    pub high_growth: f64,
    /// Perpetual growth rate
    pub stable_growth: f64,
    /// Years of high growth in the two-stage model
    pub high_growth_years: u32,
    /// Years over which the H-model growth declines
    pub decline_years: f64,
}

impl Default for GrowthProfile {
    fn default() -> Self {
        Self {
            high_growth: DEFAULT_HIGH_GROWTH,
            stable_growth: DEFAULT_STABLE_GROWTH,
            high_growth_years: DEFAULT_HIGH_GROWTH_YEARS,
            decline_years: DEFAULT_DECLINE_YEARS,
        }
    }
}

#[derive(Serialize)]
struct DdmReport<'a> {
    company: &'a str,
    market_price: f64,
    capm: &'a CapmInputs,
    history: DividendHistory,
    inputs: DdmInputs,
    summary: DdmSummary,
    gordon_sensitivity: RateGrid,
}

/// Prices a share with the Gordon, two-stage and H-models from the latest
/// dividend per share.
///
/// # Errors
///
/// - `Valuation` for non-finite CAPM inputs, an empty history or a
///   non-positive share count
/// - `Dividend` when the Gordon grid cannot be built
pub fn run(
    dataset: &FinancialDataset,
    capm: &CapmInputs,
    profile: &GrowthProfile,
    format: OutputFormat,
) -> Result<String> {
    let cost_of_equity = capm.cost_of_equity()?;
    let history = dividend_history(dataset)?;
    let inputs = DdmInputs {
        high_growth: profile.high_growth,
        stable_growth: profile.stable_growth,
        high_growth_years: profile.high_growth_years,
        decline_years: profile.decline_years,
        ..DdmInputs::from_dataset(dataset, cost_of_equity)?
    };
    let summary = value_dividends(&inputs);
    let grid = gordon_sensitivity(inputs.d0, &DEFAULT_COST_OF_EQUITY_STEPS, &DEFAULT_GROWTH_STEPS)?;
    info!(
        company = %dataset.company,
        d0 = inputs.d0,
        models = 3 - summary.skipped.len(),
        "dividend valuation complete"
    );

    let report = DdmReport {
        company: &dataset.company,
        market_price: dataset.market_price,
        capm,
        history,
        inputs,
        summary,
        gordon_sensitivity: grid,
    };
    match format {
        OutputFormat::Json => to_json(&report),
        OutputFormat::Table => Ok(render(&report)),
    }
}

fn render(report: &DdmReport<'_>) -> String {
    let i = &report.inputs;
    let mut inputs = Table::new(["Input", "Value"])
        .title(format!("{} - dividend discount models", report.company));
    inputs
        .row(["Cost of equity".to_string(), pct(i.cost_of_equity, 2)])
        .row(["Last DPS".to_string(), format!("{:.0}", i.d0)])
        .row(["High growth".to_string(), pct(i.high_growth, 2)])
        .row(["Stable growth".to_string(), pct(i.stable_growth, 2)])
        .row(["High-growth years".to_string(), i.high_growth_years.to_string()])
        .row(["Decline years".to_string(), format!("{:.1}", i.decline_years)]);

    let mut history = Table::new(["Year", "DPS", "Payout", "DPS growth"]);
    let growth = std::iter::once(None).chain(report.history.dps_growth.iter().map(Some));
    for (y, g) in report.history.years.iter().zip(growth) {
        history.row([
            y.year.to_string(),
            format!("{:.0}", y.dps),
            pct(y.payout_ratio, 1),
            g.map(|g| signed_pct(*g)).unwrap_or_default(),
        ]);
    }

    let s = &report.summary;
    let upside = |price: f64| {
        if report.market_price > 0.0 {
            signed_pct(price / report.market_price - 1.0)
        } else {
            String::new()
        }
    };
    let mut models = Table::new(["Model", "Target price", "Upside"]);
    let prices = [
        ("Gordon", s.gordon.map(|v| v.target_price)),
        ("Two-stage", s.two_stage.as_ref().map(|v| v.target_price)),
        ("H-model", s.h_model.map(|v| v.target_price)),
    ];
    for (model, price) in prices {
        match price {
            Some(p) => models.row([model.to_string(), format!("{:.0}", p), upside(p)]),
            None => models.row([model, "n/a", ""]),
        };
    }

    let grid = rate_grid_table(&report.gordon_sensitivity, "Gordon price by Ke and g", 0);

    let mut out = [inputs.render(), history.render(), models.render()].join("\n");
    for skipped in &s.skipped {
        out.push_str(&format!("Skipped {}: {}\n", skipped.model, skipped.reason));
    }
    match &s.fair_value {
        Some(range) => out.push_str(&format!(
            "Fair value {:.0} to {:.0}, average {:.0} across {} models\n",
            range.low, range.high, range.average, range.methods
        )),
        None => out.push_str("No dividend model produced a price\n"),
    }
    out.push('\n');
    out.push_str(&grid.render());
    out
}
