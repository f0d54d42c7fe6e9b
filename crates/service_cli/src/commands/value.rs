//! DCF valuation command.

use tracing::info;
use valuation_core::{AssumptionOverrides, FinancialDataset};
use valuation_pricing::dcf::{project, ValuationResult};

use crate::config::OutputFormat;
use crate::output::{pct, to_json, Table};
use crate::Result;

/// Values the dataset with `overrides` applied and renders the projection.
///
/// # Errors
///
/// Returns `Valuation` when the merged assumptions cannot be valued.
pub fn run(
    dataset: &FinancialDataset,
    overrides: &AssumptionOverrides,
    format: OutputFormat,
) -> Result<String> {
    let result = project(dataset, overrides)?;
    info!(
        company = %dataset.company,
        share_price = result.share_price,
        market_price = dataset.market_price,
        "valuation complete"
    );

    match format {
        OutputFormat::Json => to_json(&result),
        OutputFormat::Table => Ok(render(dataset, &result)),
    }
}

fn render(dataset: &FinancialDataset, result: &ValuationResult) -> String {
    let a = &result.assumptions;
    let mut assumptions = Table::new(["Assumption", "Value"]).title(format!(
        "{} - discounted cash flow",
        dataset.company
    ));
    assumptions
        .row(["Revenue growth".to_string(), pct(a.rev_growth, 2)])
        .row(["EBITDA margin".to_string(), pct(a.ebitda_margin, 2)])
        .row(["Tax rate".to_string(), pct(a.tax_rate, 2)])
        .row(["WACC".to_string(), pct(a.wacc, 2)])
        .row(["Terminal growth".to_string(), pct(a.terminal_growth, 2)])
        .row(["Capex / revenue".to_string(), pct(a.capex_pct, 2)])
        .row(["NWC / revenue".to_string(), pct(a.nwc_pct, 2)]);

    let mut projections = Table::new([
        "Year", "Revenue", "EBITDA", "EBIT", "Tax", "NOPAT", "Capex", "dNWC", "FCF",
    ]);
    for p in &result.projections {
        projections.row([
            p.year.to_string(),
            format!("{:.1}", p.revenue),
            format!("{:.1}", p.ebitda),
            format!("{:.1}", p.ebit),
            format!("{:.1}", p.tax),
            format!("{:.1}", p.nopat),
            format!("{:.1}", p.capex),
            format!("{:.1}", p.nwc_change),
            format!("{:.1}", p.free_cash_flow),
        ]);
    }

    let mut summary = Table::new(["Bridge", "Value"]);
    summary
        .row(["PV of free cash flows".to_string(), format!("{:.1}", result.pv_fcf)])
        .row(["Terminal value".to_string(), format!("{:.1}", result.terminal_value)])
        .row(["PV of terminal value".to_string(), format!("{:.1}", result.pv_terminal)])
        .row(["Enterprise value".to_string(), format!("{:.1}", result.enterprise_value)])
        .row(["Equity value".to_string(), format!("{:.1}", result.equity_value)])
        .row(["Value per share".to_string(), format!("{:.2}", result.share_price)])
        .row(["Terminal weight".to_string(), pct(result.terminal_weight(), 1)]);

    let mut out = [assumptions.render(), projections.render(), summary.render()].join("\n");
    if result.is_terminal_degenerate() {
        out.push_str(
            "\nWarning: WACC does not exceed terminal growth; terminal value set to zero\n",
        );
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use valuation_core::fixtures::sample_dataset;

    #[test]
    fn test_table_output() {
        let out = run(&sample_dataset(), &AssumptionOverrides::new(), OutputFormat::Table).unwrap();
        assert!(out.starts_with("Binh Minh Plastics - discounted cash flow"));
        assert!(out.contains("│ Value per share       │  226.46 │"));
        assert!(out.contains("│ 2030 │"));
        assert!(!out.contains("Warning"));
    }

    #[test]
    fn test_json_output_round_trips() {
        let out = run(&sample_dataset(), &AssumptionOverrides::new(), OutputFormat::Json).unwrap();
        let parsed: ValuationResult = serde_json::from_str(&out).unwrap();
        assert_eq!(parsed.projections.len(), 5);
        assert!((parsed.share_price - 226.46396149938144).abs() < 1e-9);
    }

    #[test]
    fn test_degenerate_terminal_warning() {
        let overrides = AssumptionOverrides::new().wacc(0.03).terminal_growth(0.03);
        let out = run(&sample_dataset(), &overrides, OutputFormat::Table).unwrap();
        assert!(out.contains("terminal value set to zero"));
    }
}
