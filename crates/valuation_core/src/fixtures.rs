//! Sample dataset for tests and benchmarks.
//!
//! Five fiscal years of a mid-cap plastics manufacturer, statements in
//! billions, shares in millions, market price per share in the base unit.

use crate::types::{Assumptions, FinancialDataset, FiscalYear};

/// Default assumptions paired with [`sample_dataset`].
pub fn sample_assumptions() -> Assumptions {
    Assumptions {
        rev_growth: 0.05,
        ebitda_margin: 0.29,
        tax_rate: 0.20,
        wacc: 0.11,
        terminal_growth: 0.03,
        capex_pct: 0.022,
        nwc_pct: 0.04,
    }
}

#[allow(clippy::too_many_arguments)]
fn fiscal(
    year: i32,
    revenue: f64,
    cost_of_goods_sold: f64,
    operating_income: f64,
    ebitda: f64,
    net_income: f64,
    eps: f64,
    total_assets: f64,
    total_liabilities: f64,
    current_assets: f64,
    current_liabilities: f64,
    inventory: f64,
    receivables: f64,
    cash: f64,
    capex: f64,
) -> FiscalYear {
    FiscalYear {
        year,
        revenue,
        cost_of_goods_sold,
        gross_profit: revenue - cost_of_goods_sold,
        operating_income,
        ebitda,
        net_income,
        eps,
        total_assets,
        total_liabilities,
        equity: total_assets - total_liabilities,
        current_assets,
        current_liabilities,
        inventory,
        receivables,
        cash,
        capex,
        net_working_capital: current_assets - cash - current_liabilities,
        ..FiscalYear::default()
    }
}

fn with_distributions(
    mut fiscal: FiscalYear,
    depreciation: f64,
    dividends_paid: f64,
    net_borrowing: f64,
) -> FiscalYear {
    fiscal.depreciation = depreciation;
    fiscal.dividends_paid = dividends_paid;
    fiscal.net_borrowing = net_borrowing;
    fiscal
}

/// Five-year sample dataset ending in 2025 with revenue 5510.
pub fn sample_dataset() -> FinancialDataset {
    FinancialDataset {
        company: "Binh Minh Plastics".to_string(),
        years: vec![
            with_distributions(
                fiscal(
                    2021, 4465.0, 3650.0, 330.0, 420.0, 262.0, 3201.0, 4050.0, 900.0, 2300.0, 820.0,
                    980.0, 410.0, 640.0, 85.0,
                ),
                90.0,
                327.0,
                0.0,
            ),
            with_distributions(
                fiscal(
                    2022, 5808.0, 4590.0, 640.0, 760.0, 510.0, 6230.0, 4320.0, 960.0, 2550.0, 880.0,
                    1010.0, 450.0, 820.0, 110.0,
                ),
                120.0,
                409.0,
                0.0,
            ),
            with_distributions(
                fiscal(
                    2023, 5169.0, 3720.0, 980.0, 1120.0, 835.0, 10200.0, 4650.0, 940.0, 2820.0,
                    860.0, 900.0, 420.0, 1150.0, 95.0,
                ),
                140.0,
                638.0,
                0.0,
            ),
            with_distributions(
                fiscal(
                    2024, 4600.0, 3150.0, 1010.0, 1150.0, 860.0, 10506.0, 4890.0, 960.0, 3000.0,
                    900.0, 850.0, 390.0, 1380.0, 100.0,
                ),
                140.0,
                900.0,
                0.0,
            ),
            with_distributions(
                fiscal(
                    2025, 5510.0, 3800.0, 1230.0, 1380.0, 1020.0, 12460.0, 5240.0, 1040.0, 3330.0,
                    980.0, 940.0, 430.0, 1560.0, 121.0,
                ),
                150.0,
                982.0,
                0.0,
            ),
        ],
        shares_outstanding: 81.86,
        cash_equivalents: 2150.0,
        debt: 0.0,
        market_price: 135_000.0,
        assumptions: sample_assumptions(),
    }
}
