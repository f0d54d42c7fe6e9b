//! Cost of capital from CAPM and a target capital structure.

use super::error::ValuationError;

/// CAPM inputs for a cost of equity, `ke = rf + beta * premium`.
///
/// # Examples
/// ```
/// use valuation_core::types::CapmInputs;
///
/// let capm = CapmInputs { risk_free: 0.03, beta: 0.8, market_premium: 0.10 };
/// assert!((capm.cost_of_equity().unwrap() - 0.11).abs() < 1e-12);
/// ```
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CapmInputs {
    /// Risk-free rate
    pub risk_free: f64,
    /// Equity beta
    pub beta: f64,
    /// Equity market risk premium (already net of the risk-free rate)
    pub market_premium: f64,
}

impl CapmInputs {
    /// Computes the CAPM cost of equity.
    ///
    /// # Errors
    ///
    /// Returns `NonFiniteAssumption` naming the first NaN or infinite input.
    pub fn cost_of_equity(&self) -> Result<f64, ValuationError> {
        let inputs = [
            ("risk_free", self.risk_free),
            ("beta", self.beta),
            ("market_premium", self.market_premium),
        ];
        if let Some((field, value)) = inputs.iter().find(|(_, v)| !v.is_finite()) {
            return Err(ValuationError::NonFiniteAssumption {
                field: *field,
                value: *value,
            });
        }
        Ok(self.risk_free + self.beta * self.market_premium)
    }
}

/// Inputs for a CAPM-based WACC.
///
/// # Examples
/// ```
/// use valuation_core::types::WaccInputs;
///
/// let inputs = WaccInputs {
///     risk_free: 0.03,
///     beta: 0.8,
///     market_premium: 0.10,
///     cost_of_debt: 0.06,
///     debt_to_equity: 0.0,
///     tax_rate: 0.20,
/// };
/// let breakdown = inputs.compute().unwrap();
/// assert!((breakdown.wacc - 0.11).abs() < 1e-12);
/// ```
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct WaccInputs {
    /// Risk-free rate
    pub risk_free: f64,
    /// Equity beta
    pub beta: f64,
    /// Equity market risk premium
    pub market_premium: f64,
    /// Pre-tax cost of debt
    pub cost_of_debt: f64,
    /// Target debt-to-equity ratio
    pub debt_to_equity: f64,
    /// Marginal tax rate for the debt shield
    pub tax_rate: f64,
}

/// WACC together with its components.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct WaccBreakdown {
    /// Weighted average cost of capital
    pub wacc: f64,
    /// CAPM cost of equity
    pub cost_of_equity: f64,
    /// Cost of debt net of tax shield
    pub after_tax_cost_of_debt: f64,
    /// Equity share of capital
    pub equity_weight: f64,
    /// Debt share of capital
    pub debt_weight: f64,
}

impl WaccInputs {
    /// The equity leg of the inputs.
    #[inline]
    pub fn capm(&self) -> CapmInputs {
        CapmInputs {
            risk_free: self.risk_free,
            beta: self.beta,
            market_premium: self.market_premium,
        }
    }

    /// Computes the WACC breakdown.
    ///
    /// `ke = rf + beta * premium`, weights `E/V = 1 / (1 + D/E)` and
    /// `D/V = (D/E) / (1 + D/E)`.
    ///
    /// # Errors
    ///
    /// Returns `InvalidOverride` for a negative or non-finite debt-to-equity
    /// ratio and `NonFiniteAssumption` for other non-finite inputs.
    pub fn compute(&self) -> Result<WaccBreakdown, ValuationError> {
        if !self.debt_to_equity.is_finite() || self.debt_to_equity < 0.0 {
            return Err(ValuationError::InvalidOverride(format!(
                "debt_to_equity must be non-negative, got {}",
                self.debt_to_equity
            )));
        }
        let cost_of_equity = self.capm().cost_of_equity()?;
        let inputs = [("cost_of_debt", self.cost_of_debt), ("tax_rate", self.tax_rate)];
        if let Some((field, value)) = inputs.iter().find(|(_, v)| !v.is_finite()) {
            return Err(ValuationError::NonFiniteAssumption {
                field: *field,
                value: *value,
            });
        }

        let equity_weight = 1.0 / (1.0 + self.debt_to_equity);
        let debt_weight = self.debt_to_equity / (1.0 + self.debt_to_equity);
        let after_tax_cost_of_debt = self.cost_of_debt * (1.0 - self.tax_rate);

        Ok(WaccBreakdown {
            wacc: equity_weight * cost_of_equity + debt_weight * after_tax_cost_of_debt,
            cost_of_equity,
            after_tax_cost_of_debt,
            equity_weight,
            debt_weight,
        })
    }
}
