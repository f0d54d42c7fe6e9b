//! Free cash flow to equity command.

use serde::Serialize;
use tracing::info;
use valuation_core::{CapmInputs, FinancialDataset};
use valuation_pricing::fcfe::{
    fcfe_sensitivity, historical_fcfe, value_equity, FcfeAssumptions, FcfeValuation,
    HistoricalFcfe,
};
use valuation_pricing::rate_grid::{DEFAULT_COST_OF_EQUITY_STEPS, DEFAULT_GROWTH_STEPS};
use valuation_pricing::RateGrid;

use crate::config::OutputFormat;
use crate::output::{pct, rate_grid_table, to_json, Table};
use crate::Result;

#[derive(Serialize)]
struct FcfeReport<'a> {
    company: &'a str,
    capm: &'a CapmInputs,
    history: Vec<HistoricalFcfe>,
    valuation: FcfeValuation,
    sensitivity: RateGrid,
}

/// Values equity by discounting projected FCFE at the CAPM cost of equity.
///
/// # Errors
///
/// Returns `Valuation` for non-finite CAPM inputs, an empty history or a
/// non-positive share count.
pub fn run(dataset: &FinancialDataset, capm: &CapmInputs, format: OutputFormat) -> Result<String> {
    let cost_of_equity = capm.cost_of_equity()?;
    let assumptions = FcfeAssumptions::from_history(dataset, cost_of_equity)?;
    let valuation = value_equity(dataset, &assumptions)?;
    let sensitivity = fcfe_sensitivity(
        dataset,
        &assumptions,
        &DEFAULT_COST_OF_EQUITY_STEPS,
        &DEFAULT_GROWTH_STEPS,
    )?;
    info!(
        company = %dataset.company,
        cost_of_equity,
        share_price = valuation.share_price,
        "fcfe valuation complete"
    );

    let report = FcfeReport {
        company: &dataset.company,
        capm,
        history: historical_fcfe(dataset),
        valuation,
        sensitivity,
    };
    match format {
        OutputFormat::Json => to_json(&report),
        OutputFormat::Table => Ok(render(&report)),
    }
}

fn render(report: &FcfeReport<'_>) -> String {
    let v = &report.valuation;
    let a = &v.assumptions;
    let mut assumptions = Table::new(["Assumption", "Value"])
        .title(format!("{} - free cash flow to equity", report.company));
    assumptions
        .row(["Risk-free rate".to_string(), pct(report.capm.risk_free, 2)])
        .row(["Beta".to_string(), format!("{:.2}", report.capm.beta)])
        .row(["Market premium".to_string(), pct(report.capm.market_premium, 2)])
        .row(["Cost of equity".to_string(), pct(a.cost_of_equity, 2)])
        .row(["Revenue growth".to_string(), pct(a.revenue_growth, 2)])
        .row(["Net income growth".to_string(), pct(a.net_income_growth, 2)])
        .row(["D&A / revenue".to_string(), pct(a.depreciation_pct, 2)])
        .row(["Capex / revenue".to_string(), pct(a.capex_pct, 2)])
        .row(["NWC / revenue".to_string(), pct(a.nwc_pct, 2)])
        .row(["Terminal growth".to_string(), pct(a.terminal_growth, 2)]);

    let mut history = Table::new(["Reported", "dNWC", "FCFE", "Payout"]);
    for h in &report.history {
        history.row([
            h.year.to_string(),
            format!("{:.1}", h.nwc_change),
            format!("{:.1}", h.fcfe),
            pct(h.payout_ratio, 1),
        ]);
    }

    let mut projections = Table::new([
        "Year", "Revenue", "Net income", "D&A", "Capex", "dNWC", "Borrowing", "FCFE",
    ]);
    for p in &v.projections {
        projections.row([
            p.year.to_string(),
            format!("{:.1}", p.revenue),
            format!("{:.1}", p.net_income),
            format!("{:.1}", p.depreciation),
            format!("{:.1}", p.capex),
            format!("{:.1}", p.nwc_change),
            format!("{:.1}", p.net_borrowing),
            format!("{:.1}", p.fcfe),
        ]);
    }

    let mut bridge = Table::new(["Bridge", "Value"]);
    bridge
        .row(["PV of FCFE".to_string(), format!("{:.1}", v.pv_fcfe)])
        .row(["Terminal value".to_string(), format!("{:.1}", v.terminal_value)])
        .row(["PV of terminal value".to_string(), format!("{:.1}", v.pv_terminal)])
        .row(["Equity value".to_string(), format!("{:.1}", v.equity_value)])
        .row(["Value per share".to_string(), format!("{:.2}", v.share_price)])
        .row(["Terminal weight".to_string(), pct(v.terminal_weight(), 1)]);

    let grid = rate_grid_table(&report.sensitivity, "Value per share by Ke and g", 2);

    let mut out = [
        assumptions.render(),
        history.render(),
        projections.render(),
        bridge.render(),
        grid.render(),
    ]
    .join("\n");
    if v.is_terminal_degenerate() {
        out.push_str(
            "\nWarning: cost of equity does not exceed terminal growth; \
             terminal value set to zero\n",
        );
    }
    out
}
