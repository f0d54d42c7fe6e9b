//! Cost of capital command.

use serde::Serialize;
use valuation_core::{WaccBreakdown, WaccInputs};

use crate::config::OutputFormat;
use crate::output::{pct, to_json, Table};
use crate::Result;

#[derive(Serialize)]
struct WaccReport<'a> {
    inputs: &'a WaccInputs,
    breakdown: WaccBreakdown,
}

/// Computes and renders the WACC for `inputs`.
///
/// # Errors
///
/// Returns `Valuation` for a negative debt-to-equity ratio or non-finite
/// inputs.
pub fn run(inputs: &WaccInputs, format: OutputFormat) -> Result<String> {
    let breakdown = inputs.compute()?;
    match format {
        OutputFormat::Json => to_json(&WaccReport { inputs, breakdown }),
        OutputFormat::Table => {
            let mut table =
                Table::new(["Component", "Value"]).title("Weighted average cost of capital");
            table
                .row(["Risk-free rate".to_string(), pct(inputs.risk_free, 2)])
                .row(["Beta".to_string(), format!("{:.2}", inputs.beta)])
                .row(["Market premium".to_string(), pct(inputs.market_premium, 2)])
                .row(["Cost of equity".to_string(), pct(breakdown.cost_of_equity, 2)])
                .row([
                    "After-tax cost of debt".to_string(),
                    pct(breakdown.after_tax_cost_of_debt, 2),
                ])
                .row(["Equity weight".to_string(), pct(breakdown.equity_weight, 1)])
                .row(["Debt weight".to_string(), pct(breakdown.debt_weight, 1)])
                .row(["WACC".to_string(), pct(breakdown.wacc, 2)]);
            Ok(table.render())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn inputs(debt_to_equity: f64) -> WaccInputs {
        WaccInputs {
            risk_free: 0.03,
            beta: 1.0,
            market_premium: 0.06,
            cost_of_debt: 0.05,
            debt_to_equity,
            tax_rate: 0.20,
        }
    }

    #[test]
    fn test_table_output() {
        // ke = 9%, kd after tax = 4%, weights 50/50
        let out = run(&inputs(1.0), OutputFormat::Table).unwrap();
        assert!(out.contains("│ Cost of equity         │ 9.00% │"));
        assert!(out.contains("│ WACC                   │ 6.50% │"));
        assert!(out.contains("│ Debt weight            │ 50.0% │"));
    }

    #[test]
    fn test_json_output() {
        let out = run(&inputs(0.0), OutputFormat::Json).unwrap();
        let value: serde_json::Value = serde_json::from_str(&out).unwrap();
        assert_eq!(value["inputs"]["beta"], 1.0);
        let wacc = value["breakdown"]["wacc"].as_f64().unwrap();
        assert_relative_eq!(wacc, 0.09, epsilon = 1e-12);
    }

    #[test]
    fn test_negative_leverage_rejected() {
        assert!(run(&inputs(-0.5), OutputFormat::Table).is_err());
    }
}
