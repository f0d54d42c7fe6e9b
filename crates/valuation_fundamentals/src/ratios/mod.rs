//! Per-year financial ratios.
//!
//! All ratios are plain fractions (a 24% ROE is `0.24`). Valuation ratios use
//! the dataset's single market price for every year, with market cap
//! normalised to statement units as `price * shares / 1000`.

mod name;

pub use name::{RatioName, UnknownRatio};

use valuation_core::math::safe_div;
use valuation_core::{FinancialDataset, FiscalYear, ValuationError};

/// Return ratios and margins.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Profitability {
    /// Return on equity
    pub roe: f64,
    /// Return on assets
    pub roa: f64,
    /// Gross margin
    pub gross_margin: f64,
    /// Operating margin
    pub operating_margin: f64,
    /// Net margin
    pub net_margin: f64,
}

/// Short-term solvency ratios.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Liquidity {
    /// Current ratio
    pub current_ratio: f64,
    /// Quick (acid-test) ratio
    pub quick_ratio: f64,
    /// Cash ratio
    pub cash_ratio: f64,
}

/// Capital-structure ratios.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Leverage {
    /// Total liabilities over equity
    pub debt_to_equity: f64,
    /// Total assets over equity
    pub equity_multiplier: f64,
}

/// Asset-utilisation ratios.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Efficiency {
    /// Revenue over total assets
    pub asset_turnover: f64,
    /// Cost of goods sold over inventory
    pub inventory_turnover: f64,
    /// Revenue over receivables
    pub receivables_turnover: f64,
}

/// Market multiples.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ValuationRatios {
    /// Price over earnings per share
    pub pe_ratio: f64,
    /// Market cap over equity
    pub pb_ratio: f64,
    /// Enterprise value over EBITDA
    pub ev_ebitda: f64,
    /// Market cap in statement units
    pub market_cap: f64,
    /// Market cap plus total liabilities less cash
    pub enterprise_value: f64,
}

/// Raw statement values kept for DuPont decomposition.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct DuPontComponents {
    /// Net income
    pub net_income: f64,
    /// Revenue
    pub revenue: f64,
    /// Total assets
    pub total_assets: f64,
    /// Shareholders' equity
    pub equity: f64,
}

/// One fiscal year's ratios.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct RatioSet {
    /// Fiscal year
    pub year: i32,
    /// Profitability group
    pub profitability: Profitability,
    /// Liquidity group
    pub liquidity: Liquidity,
    /// Leverage group
    pub leverage: Leverage,
    /// Efficiency group
    pub efficiency: Efficiency,
    /// Valuation group
    pub valuation: ValuationRatios,
    /// Statement values behind the DuPont identity
    pub components: DuPontComponents,
}

impl RatioSet {
    /// Computes every ratio for one fiscal year.
    ///
    /// `market_price` and `shares_outstanding` feed the valuation group.
    pub fn from_fiscal_year(fy: &FiscalYear, market_price: f64, shares_outstanding: f64) -> Self {
        let market_cap = market_price * shares_outstanding / 1000.0;
        let enterprise_value = market_cap + fy.total_liabilities - fy.cash;

        Self {
            year: fy.year,
            profitability: Profitability {
                roe: safe_div(fy.net_income, fy.equity, 0.0),
                roa: safe_div(fy.net_income, fy.total_assets, 0.0),
                gross_margin: safe_div(fy.gross_profit, fy.revenue, 0.0),
                operating_margin: safe_div(fy.operating_income, fy.revenue, 0.0),
                net_margin: safe_div(fy.net_income, fy.revenue, 0.0),
            },
            liquidity: Liquidity {
                current_ratio: safe_div(fy.current_assets, fy.current_liabilities, 0.0),
                quick_ratio: safe_div(
                    fy.current_assets - fy.inventory,
                    fy.current_liabilities,
                    0.0,
                ),
                cash_ratio: safe_div(fy.cash, fy.current_liabilities, 0.0),
            },
            leverage: Leverage {
                debt_to_equity: safe_div(fy.total_liabilities, fy.equity, 0.0),
                equity_multiplier: safe_div(fy.total_assets, fy.equity, 0.0),
            },
            efficiency: Efficiency {
                asset_turnover: safe_div(fy.revenue, fy.total_assets, 0.0),
                inventory_turnover: safe_div(fy.cost_of_goods_sold, fy.inventory, 0.0),
                receivables_turnover: safe_div(fy.revenue, fy.receivables, 0.0),
            },
            valuation: ValuationRatios {
                pe_ratio: safe_div(market_price, fy.eps, 0.0),
                pb_ratio: safe_div(market_cap, fy.equity, 0.0),
                ev_ebitda: safe_div(enterprise_value, fy.ebitda, 0.0),
                market_cap,
                enterprise_value,
            },
            components: DuPontComponents {
                net_income: fy.net_income,
                revenue: fy.revenue,
                total_assets: fy.total_assets,
                equity: fy.equity,
            },
        }
    }

    /// Looks up a ratio by name.
    pub fn value(&self, name: RatioName) -> f64 {
        match name {
            RatioName::Roe => self.profitability.roe,
            RatioName::Roa => self.profitability.roa,
            RatioName::GrossMargin => self.profitability.gross_margin,
            RatioName::OperatingMargin => self.profitability.operating_margin,
            RatioName::NetMargin => self.profitability.net_margin,
            RatioName::CurrentRatio => self.liquidity.current_ratio,
            RatioName::QuickRatio => self.liquidity.quick_ratio,
            RatioName::CashRatio => self.liquidity.cash_ratio,
            RatioName::DebtToEquity => self.leverage.debt_to_equity,
            RatioName::EquityMultiplier => self.leverage.equity_multiplier,
            RatioName::AssetTurnover => self.efficiency.asset_turnover,
            RatioName::InventoryTurnover => self.efficiency.inventory_turnover,
            RatioName::ReceivablesTurnover => self.efficiency.receivables_turnover,
            RatioName::PeRatio => self.valuation.pe_ratio,
            RatioName::PbRatio => self.valuation.pb_ratio,
            RatioName::EvEbitda => self.valuation.ev_ebitda,
        }
    }
}

/// Computes the ratio set for the year at `index`.
///
/// # Errors
///
/// Returns `YearOutOfRange` if `index` is past the last fiscal year.
pub fn compute_year(dataset: &FinancialDataset, index: usize) -> Result<RatioSet, ValuationError> {
    let fy = dataset.year(index)?;
    Ok(RatioSet::from_fiscal_year(
        fy,
        dataset.market_price,
        dataset.shares_outstanding,
    ))
}

/// Computes one ratio set per fiscal year, in dataset order.
pub fn compute_all_years(dataset: &FinancialDataset) -> Vec<RatioSet> {
    dataset
        .years
        .iter()
        .map(|fy| RatioSet::from_fiscal_year(fy, dataset.market_price, dataset.shares_outstanding))
        .collect()
}
