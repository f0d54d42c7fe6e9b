//! Integration tests for module exports and dataset deserialisation.

use valuation_core::math::safe_div;
use valuation_core::types::{AssumptionField, AssumptionOverrides, FinancialDataset};
use valuation_core::ValuationError;

const DATASET_JSON: &str = r#"{
    "company": "Example Co",
    "years": [
        { "year": 2024, "revenue": 1000.0, "net_income": 80.0, "total_assets": 900.0, "equity": 500.0 },
        { "year": 2025, "revenue": 1100.0, "net_income": 95.0, "total_assets": 950.0, "equity": 540.0 }
    ],
    "shares_outstanding": 50.0,
    "cash_equivalents": 120.0,
    "debt": 40.0,
    "market_price": 30000.0,
    "assumptions": {
        "rev_growth": 0.04,
        "ebitda_margin": 0.18,
        "tax_rate": 0.2,
        "wacc": 0.1,
        "terminal_growth": 0.025,
        "capex_pct": 0.03,
        "nwc_pct": 0.05
    }
}"#;

#[test]
fn test_dataset_from_json_with_missing_line_items() {
    let dataset: FinancialDataset = serde_json::from_str(DATASET_JSON).unwrap();

    assert!(dataset.validate().is_ok());
    assert_eq!(dataset.len(), 2);
    // Absent line items default to zero
    assert_eq!(dataset.years[0].inventory, 0.0);
    assert_eq!(dataset.latest().unwrap().revenue, 1100.0);
    assert_eq!(dataset.market_cap(), 1500.0);
}

#[test]
fn test_overrides_from_json_merge_into_dataset_assumptions() {
    let dataset: FinancialDataset = serde_json::from_str(DATASET_JSON).unwrap();
    let overrides: AssumptionOverrides =
        serde_json::from_str(r#"{ "wacc": 0.12, "rev_growth": 0.06 }"#).unwrap();

    let merged = dataset.assumptions.merge(&overrides);
    assert_eq!(merged.get(AssumptionField::Wacc), 0.12);
    assert_eq!(merged.get(AssumptionField::RevGrowth), 0.06);
    assert_eq!(merged.get(AssumptionField::TaxRate), 0.2);
    // The dataset itself is untouched
    assert_eq!(dataset.assumptions.wacc, 0.1);
}

#[test]
fn test_named_override_errors_are_exported() {
    let mut overrides = AssumptionOverrides::new();
    let err = overrides.set_named("cost_of_equity", 0.1).unwrap_err();
    assert_eq!(
        err,
        ValuationError::UnknownAssumption("cost_of_equity".to_string())
    );
    assert_eq!(safe_div(3.0, 0.0, 0.0), 0.0);
}
