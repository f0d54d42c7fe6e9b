//! Ratio identifiers.

use std::fmt;
use std::str::FromStr;

use thiserror::Error;

/// Ratio name not recognised by [`RatioName::from_str`].
#[derive(Error, Clone, Debug, PartialEq, Eq)]
#[error("Unknown ratio: {0}")]
pub struct UnknownRatio(pub String);

/// Every ratio the engine computes.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum RatioName {
    /// Net income / equity
    Roe,
    /// Net income / total assets
    Roa,
    /// Gross profit / revenue
    GrossMargin,
    /// Operating income / revenue
    OperatingMargin,
    /// Net income / revenue
    NetMargin,
    /// Current assets / current liabilities
    CurrentRatio,
    /// (Current assets - inventory) / current liabilities
    QuickRatio,
    /// Cash / current liabilities
    CashRatio,
    /// Total liabilities / equity
    DebtToEquity,
    /// Total assets / equity
    EquityMultiplier,
    /// Revenue / total assets
    AssetTurnover,
    /// Cost of goods sold / inventory
    InventoryTurnover,
    /// Revenue / receivables
    ReceivablesTurnover,
    /// Market price / EPS
    PeRatio,
    /// Market cap / equity
    PbRatio,
    /// Enterprise value / EBITDA
    EvEbitda,
}

impl RatioName {
    /// All ratios in group order.
    pub const ALL: [RatioName; 16] = [
        RatioName::Roe,
        RatioName::Roa,
        RatioName::GrossMargin,
        RatioName::OperatingMargin,
        RatioName::NetMargin,
        RatioName::CurrentRatio,
        RatioName::QuickRatio,
        RatioName::CashRatio,
        RatioName::DebtToEquity,
        RatioName::EquityMultiplier,
        RatioName::AssetTurnover,
        RatioName::InventoryTurnover,
        RatioName::ReceivablesTurnover,
        RatioName::PeRatio,
        RatioName::PbRatio,
        RatioName::EvEbitda,
    ];

    /// Snake_case identifier.
    pub fn as_str(&self) -> &'static str {
        match self {
            RatioName::Roe => "roe",
            RatioName::Roa => "roa",
            RatioName::GrossMargin => "gross_margin",
            RatioName::OperatingMargin => "operating_margin",
            RatioName::NetMargin => "net_margin",
            RatioName::CurrentRatio => "current_ratio",
            RatioName::QuickRatio => "quick_ratio",
            RatioName::CashRatio => "cash_ratio",
            RatioName::DebtToEquity => "debt_to_equity",
            RatioName::EquityMultiplier => "equity_multiplier",
            RatioName::AssetTurnover => "asset_turnover",
            RatioName::InventoryTurnover => "inventory_turnover",
            RatioName::ReceivablesTurnover => "receivables_turnover",
            RatioName::PeRatio => "pe_ratio",
            RatioName::PbRatio => "pb_ratio",
            RatioName::EvEbitda => "ev_ebitda",
        }
    }

    /// Human-readable label.
    pub fn label(&self) -> &'static str {
        match self {
            RatioName::Roe => "Return on equity",
            RatioName::Roa => "Return on assets",
            RatioName::GrossMargin => "Gross margin",
            RatioName::OperatingMargin => "Operating margin",
            RatioName::NetMargin => "Net margin",
            RatioName::CurrentRatio => "Current ratio",
            RatioName::QuickRatio => "Quick ratio",
            RatioName::CashRatio => "Cash ratio",
            RatioName::DebtToEquity => "Debt to equity",
            RatioName::EquityMultiplier => "Equity multiplier",
            RatioName::AssetTurnover => "Asset turnover",
            RatioName::InventoryTurnover => "Inventory turnover",
            RatioName::ReceivablesTurnover => "Receivables turnover",
            RatioName::PeRatio => "P/E",
            RatioName::PbRatio => "P/B",
            RatioName::EvEbitda => "EV/EBITDA",
        }
    }

    /// Whether the ratio is a fraction best shown as a percentage.
    pub fn is_percentage(&self) -> bool {
        matches!(
            self,
            RatioName::Roe
                | RatioName::Roa
                | RatioName::GrossMargin
                | RatioName::OperatingMargin
                | RatioName::NetMargin
        )
    }

    /// Formats `value` for display: percentages to one decimal, multiples
    /// to two decimals with an `x` suffix.
    pub fn format_value(&self, value: f64) -> String {
        if self.is_percentage() {
            format!("{:.1}%", value * 100.0)
        } else {
            format!("{:.2}x", value)
        }
    }
}

impl FromStr for RatioName {
    type Err = UnknownRatio;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let key = s.trim();
        RatioName::ALL
            .into_iter()
            .find(|name| name.as_str() == key)
            .ok_or_else(|| UnknownRatio(key.to_string()))
    }
}

impl fmt::Display for RatioName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_every_name() {
        for name in RatioName::ALL {
            assert_eq!(name.as_str().parse::<RatioName>(), Ok(name));
        }
    }

    #[test]
    fn test_unknown_name() {
        assert_eq!(
            "altman_z".parse::<RatioName>(),
            Err(UnknownRatio("altman_z".to_string()))
        );
    }

    #[test]
    fn test_format_value() {
        assert_eq!(RatioName::Roe.format_value(0.2428), "24.3%");
        assert_eq!(RatioName::CurrentRatio.format_value(3.398), "3.40x");
    }
}
