//! DuPont decomposition of return on equity.

use valuation_core::math::safe_div;

use crate::ratios::RatioSet;

/// ROE split into margin, turnover and leverage.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct DuPont {
    /// Net income / revenue
    pub net_margin: f64,
    /// Revenue / total assets
    pub asset_turnover: f64,
    /// Total assets / equity
    pub equity_multiplier: f64,
    /// Product of the three factors
    pub implied_roe: f64,
    /// Net income / equity
    pub actual_roe: f64,
}

impl DuPont {
    /// Absolute gap between implied and actual ROE.
    ///
    /// A material gap points at inconsistent statement data rather than at
    /// the decomposition.
    pub fn divergence(&self) -> f64 {
        (self.implied_roe - self.actual_roe).abs()
    }
}

/// Decomposes ROE from the raw components kept on `ratios`.
pub fn dupont(ratios: &RatioSet) -> DuPont {
    let c = &ratios.components;
    let net_margin = safe_div(c.net_income, c.revenue, 0.0);
    let asset_turnover = safe_div(c.revenue, c.total_assets, 0.0);
    let equity_multiplier = safe_div(c.total_assets, c.equity, 0.0);

    DuPont {
        net_margin,
        asset_turnover,
        equity_multiplier,
        implied_roe: net_margin * asset_turnover * equity_multiplier,
        actual_roe: safe_div(c.net_income, c.equity, 0.0),
    }
}
