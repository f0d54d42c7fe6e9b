//! Historical financial statements and static valuation inputs.
//!
//! A [`FinancialDataset`] is constructed once by the caller (ingestion is not
//! part of this crate) and only ever borrowed by the engines. Line items are
//! unit-less scalars in a single reporting currency and scale; the share
//! count is expressed in millions and the market price per share in the
//! currency's base unit, hence the `/ 1000` normalisation in
//! [`FinancialDataset::market_cap`].

use super::assumptions::Assumptions;
use super::error::ValuationError;
use crate::math::{mean, safe_div};

/// Statement units per share times this factor gives the market price unit.
pub const PRICE_UNIT_SCALE: f64 = 1000.0;

/// One fiscal year of income-statement, balance-sheet and cash-flow items.
#[derive(Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct FiscalYear {
    /// Calendar year label
    pub year: i32,
    /// Net revenue
    pub revenue: f64,
    /// Cost of goods sold
    pub cost_of_goods_sold: f64,
    /// Gross profit
    pub gross_profit: f64,
    /// Operating income (EBIT)
    pub operating_income: f64,
    /// EBITDA
    pub ebitda: f64,
    /// Net income after tax
    pub net_income: f64,
    /// Basic earnings per share, in the market price unit
    pub eps: f64,
    /// Total assets
    pub total_assets: f64,
    /// Total liabilities
    pub total_liabilities: f64,
    /// Shareholders' equity
    pub equity: f64,
    /// Current assets
    pub current_assets: f64,
    /// Current liabilities
    pub current_liabilities: f64,
    /// Inventory
    pub inventory: f64,
    /// Trade receivables
    pub receivables: f64,
    /// Cash and cash equivalents
    pub cash: f64,
    /// Capital expenditure (positive outflow)
    pub capex: f64,
    /// Operating net working capital
    pub net_working_capital: f64,
    /// Depreciation and amortisation
    pub depreciation: f64,
    /// Cash dividends paid to shareholders (positive outflow)
    pub dividends_paid: f64,
    /// New borrowing less debt repaid
    pub net_borrowing: f64,
}

impl FiscalYear {
    /// Named line items, for validation and reporting.
    pub fn line_items(&self) -> [(&'static str, f64); 20] {
        [
            ("revenue", self.revenue),
            ("cost_of_goods_sold", self.cost_of_goods_sold),
            ("gross_profit", self.gross_profit),
            ("operating_income", self.operating_income),
            ("ebitda", self.ebitda),
            ("net_income", self.net_income),
            ("eps", self.eps),
            ("total_assets", self.total_assets),
            ("total_liabilities", self.total_liabilities),
            ("equity", self.equity),
            ("current_assets", self.current_assets),
            ("current_liabilities", self.current_liabilities),
            ("inventory", self.inventory),
            ("receivables", self.receivables),
            ("cash", self.cash),
            ("capex", self.capex),
            ("net_working_capital", self.net_working_capital),
            ("depreciation", self.depreciation),
            ("dividends_paid", self.dividends_paid),
            ("net_borrowing", self.net_borrowing),
        ]
    }
}

/// Immutable dataset: ordered fiscal history plus static valuation inputs.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct FinancialDataset {
    /// Company display name
    pub company: String,
    /// Fiscal years in strictly ascending order
    pub years: Vec<FiscalYear>,
    /// Shares outstanding, millions
    pub shares_outstanding: f64,
    /// Cash and equivalents at the most recent balance date
    pub cash_equivalents: f64,
    /// Interest-bearing debt at the most recent balance date
    pub debt: f64,
    /// Current market price per share
    pub market_price: f64,
    /// Default valuation assumptions
    pub assumptions: Assumptions,
}

/// Averages of historical operating ratios.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct HistoricalAverages {
    /// Mean EBITDA / revenue
    pub ebitda_margin: f64,
    /// Mean capex / revenue
    pub capex_pct: f64,
    /// Mean NWC / revenue
    pub nwc_pct: f64,
}

impl FinancialDataset {
    /// Number of fiscal years.
    #[inline]
    pub fn len(&self) -> usize {
        self.years.len()
    }

    /// Whether the history is empty.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.years.is_empty()
    }

    /// Most recent fiscal year.
    pub fn latest(&self) -> Option<&FiscalYear> {
        self.years.last()
    }

    /// Fiscal year at `index`.
    ///
    /// # Errors
    ///
    /// Returns `YearOutOfRange` when `index >= len()`.
    pub fn year(&self, index: usize) -> Result<&FiscalYear, ValuationError> {
        self.years.get(index).ok_or(ValuationError::YearOutOfRange {
            index,
            len: self.years.len(),
        })
    }

    /// Market capitalisation in statement units.
    #[inline]
    pub fn market_cap(&self) -> f64 {
        self.market_price * self.shares_outstanding / PRICE_UNIT_SCALE
    }

    /// Share count, checked to be positive and finite.
    ///
    /// # Errors
    ///
    /// Returns `InvalidSharesOutstanding` otherwise.
    pub fn checked_shares(&self) -> Result<f64, ValuationError> {
        let shares = self.shares_outstanding;
        if shares.is_finite() && shares > 0.0 {
            Ok(shares)
        } else {
            Err(ValuationError::InvalidSharesOutstanding(shares))
        }
    }

    /// Converts a statement-scale amount to a per-share amount in the
    /// market price unit, the inverse of [`FinancialDataset::market_cap`].
    ///
    /// # Errors
    ///
    /// Returns `InvalidSharesOutstanding` for a non-positive share count.
    pub fn per_share(&self, amount: f64) -> Result<f64, ValuationError> {
        Ok(amount / self.checked_shares()? * PRICE_UNIT_SCALE)
    }

    /// Averages EBITDA margin, capex % and NWC % across the history.
    ///
    /// Years with zero revenue contribute zero ratios.
    ///
    /// # Errors
    ///
    /// Returns `EmptyHistory` when there are no fiscal years.
    pub fn historical_averages(&self) -> Result<HistoricalAverages, ValuationError> {
        let ratio = |f: fn(&FiscalYear) -> f64| -> Option<f64> {
            let values: Vec<f64> = self
                .years
                .iter()
                .map(|y| safe_div(f(y), y.revenue, 0.0))
                .collect();
            mean(&values)
        };

        match (
            ratio(|y| y.ebitda),
            ratio(|y| y.capex),
            ratio(|y| y.net_working_capital),
        ) {
            (Some(ebitda_margin), Some(capex_pct), Some(nwc_pct)) => Ok(HistoricalAverages {
                ebitda_margin,
                capex_pct,
                nwc_pct,
            }),
            _ => Err(ValuationError::EmptyHistory),
        }
    }

    /// Validates structural invariants.
    ///
    /// # Errors
    ///
    /// - `EmptyHistory` when there are no fiscal years
    /// - `NonMonotonicYears` when years are not strictly ascending
    /// - `NonFiniteLineItem` for NaN or infinite statement values and scalars
    /// - `NonFiniteAssumption` for NaN or infinite default assumptions
    pub fn validate(&self) -> Result<(), ValuationError> {
        let latest = self.latest().ok_or(ValuationError::EmptyHistory)?;

        for (index, pair) in self.years.windows(2).enumerate() {
            if pair[1].year <= pair[0].year {
                return Err(ValuationError::NonMonotonicYears { index: index + 1 });
            }
        }

        for fiscal in &self.years {
            if let Some((field, _)) = fiscal.line_items().iter().find(|(_, v)| !v.is_finite()) {
                return Err(ValuationError::NonFiniteLineItem {
                    year: fiscal.year,
                    field: *field,
                });
            }
        }

        let scalars = [
            ("shares_outstanding", self.shares_outstanding),
            ("cash_equivalents", self.cash_equivalents),
            ("debt", self.debt),
            ("market_price", self.market_price),
        ];
        if let Some((field, _)) = scalars.iter().find(|(_, v)| !v.is_finite()) {
            return Err(ValuationError::NonFiniteLineItem {
                year: latest.year,
                field: *field,
            });
        }

        self.assumptions.validate()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fixtures::sample_dataset;
    use approx::assert_relative_eq;

    #[test]
    fn test_sample_dataset_is_valid() {
        let dataset = sample_dataset();
        assert!(dataset.validate().is_ok());
        assert_eq!(dataset.len(), 5);
        assert_eq!(dataset.latest().unwrap().year, 2025);
    }

    #[test]
    fn test_year_out_of_range() {
        let dataset = sample_dataset();
        assert_eq!(
            dataset.year(5).unwrap_err(),
            ValuationError::YearOutOfRange { index: 5, len: 5 }
        );
        assert_eq!(dataset.year(0).unwrap().year, 2021);
    }

    #[test]
    fn test_market_cap_normalises_units() {
        let mut dataset = sample_dataset();
        dataset.market_price = 100_000.0;
        dataset.shares_outstanding = 80.0;
        assert_relative_eq!(dataset.market_cap(), 8_000.0);
    }

    #[test]
    fn test_per_share_inverts_market_cap() {
        let dataset = sample_dataset();
        assert_relative_eq!(
            dataset.per_share(dataset.market_cap()).unwrap(),
            dataset.market_price,
            max_relative = 1e-12
        );
        // 982 of dividends over 81.86m shares
        assert_relative_eq!(
            dataset.per_share(982.0).unwrap(),
            11996.090886880038,
            max_relative = 1e-12
        );
    }

    #[test]
    fn test_per_share_rejects_bad_share_count() {
        let mut dataset = sample_dataset();
        for shares in [0.0, -1.0, f64::NAN] {
            dataset.shares_outstanding = shares;
            assert!(matches!(
                dataset.per_share(1.0),
                Err(ValuationError::InvalidSharesOutstanding(_))
            ));
        }
    }

    #[test]
    fn test_validate_empty_history() {
        let mut dataset = sample_dataset();
        dataset.years.clear();
        assert_eq!(dataset.validate(), Err(ValuationError::EmptyHistory));
        assert_eq!(
            dataset.historical_averages(),
            Err(ValuationError::EmptyHistory)
        );
    }

    #[test]
    fn test_validate_non_monotonic_years() {
        let mut dataset = sample_dataset();
        dataset.years[3].year = 2022;
        assert_eq!(
            dataset.validate(),
            Err(ValuationError::NonMonotonicYears { index: 3 })
        );
    }

    #[test]
    fn test_validate_non_finite_line_item() {
        let mut dataset = sample_dataset();
        dataset.years[1].inventory = f64::INFINITY;
        assert_eq!(
            dataset.validate(),
            Err(ValuationError::NonFiniteLineItem {
                year: 2022,
                field: "inventory"
            })
        );
    }

    #[test]
    fn test_historical_averages() {
        let mut dataset = sample_dataset();
        for fiscal in dataset.years.iter_mut() {
            fiscal.ebitda = fiscal.revenue * 0.25;
            fiscal.capex = fiscal.revenue * 0.03;
            fiscal.net_working_capital = fiscal.revenue * 0.10;
        }
        dataset.years[0].revenue = 0.0;

        let averages = dataset.historical_averages().unwrap();
        // Zero-revenue year contributes zero to each mean
        assert_relative_eq!(averages.ebitda_margin, 0.25 * 4.0 / 5.0, epsilon = 1e-12);
        assert_relative_eq!(averages.capex_pct, 0.03 * 4.0 / 5.0, epsilon = 1e-12);
        assert_relative_eq!(averages.nwc_pct, 0.10 * 4.0 / 5.0, epsilon = 1e-12);
    }

    #[test]
    fn test_assumptions_from_history() {
        let averages = HistoricalAverages {
            ebitda_margin: 0.3,
            capex_pct: 0.02,
            nwc_pct: 0.05,
        };
        let assumptions = Assumptions::from_history(&averages, 0.05, 0.2, 0.11, 0.03);
        assert_eq!(assumptions.ebitda_margin, 0.3);
        assert_eq!(assumptions.capex_pct, 0.02);
        assert_eq!(assumptions.nwc_pct, 0.05);
        assert_eq!(assumptions.wacc, 0.11);
    }
}
