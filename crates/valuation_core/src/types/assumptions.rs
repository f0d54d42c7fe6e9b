//! Valuation assumptions and per-field overrides.
//!
//! [`Assumptions`] is an immutable value threaded through every engine call.
//! Callers express what-if scenarios as [`AssumptionOverrides`], which are
//! merged on top of a base set and never written back to it.

use std::fmt;
use std::str::FromStr;

use super::dataset::HistoricalAverages;
use super::error::ValuationError;

/// Name of a single assumption field.
///
/// Parsing accepts the snake_case names used in datasets and overrides.
///
/// # Examples
/// ```
/// use valuation_core::types::AssumptionField;
///
/// let field: AssumptionField = "terminal_growth".parse().unwrap();
/// assert_eq!(field, AssumptionField::TerminalGrowth);
/// assert!("discount_rate".parse::<AssumptionField>().is_err());
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum AssumptionField {
    /// Annual revenue growth rate
    RevGrowth,
    /// EBITDA as a fraction of revenue
    EbitdaMargin,
    /// Corporate tax rate applied to EBIT
    TaxRate,
    /// Weighted average cost of capital
    Wacc,
    /// Perpetual growth rate beyond the forecast horizon
    TerminalGrowth,
    /// Capital expenditure as a fraction of revenue
    CapexPct,
    /// Net working capital as a fraction of revenue
    NwcPct,
}

impl AssumptionField {
    /// All fields in declaration order.
    pub const ALL: [AssumptionField; 7] = [
        AssumptionField::RevGrowth,
        AssumptionField::EbitdaMargin,
        AssumptionField::TaxRate,
        AssumptionField::Wacc,
        AssumptionField::TerminalGrowth,
        AssumptionField::CapexPct,
        AssumptionField::NwcPct,
    ];

    /// Snake_case field name.
    pub fn name(&self) -> &'static str {
        match self {
            AssumptionField::RevGrowth => "rev_growth",
            AssumptionField::EbitdaMargin => "ebitda_margin",
            AssumptionField::TaxRate => "tax_rate",
            AssumptionField::Wacc => "wacc",
            AssumptionField::TerminalGrowth => "terminal_growth",
            AssumptionField::CapexPct => "capex_pct",
            AssumptionField::NwcPct => "nwc_pct",
        }
    }
}

impl FromStr for AssumptionField {
    type Err = ValuationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let key = s.trim();
        AssumptionField::ALL
            .into_iter()
            .find(|field| field.name() == key)
            .ok_or_else(|| ValuationError::UnknownAssumption(key.to_string()))
    }
}

impl fmt::Display for AssumptionField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Complete set of valuation assumptions, all fractional rates.
///
/// Terminal value is only defined when `wacc > terminal_growth`; no ordering
/// is enforced here so that sweeps may cross the boundary.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Assumptions {
    /// Annual revenue growth rate
    pub rev_growth: f64,
    /// EBITDA margin
    pub ebitda_margin: f64,
    /// Tax rate on EBIT
    pub tax_rate: f64,
    /// Discount rate
    pub wacc: f64,
    /// Perpetual growth rate
    pub terminal_growth: f64,
    /// Capex (and depreciation) as a fraction of revenue
    pub capex_pct: f64,
    /// Net working capital as a fraction of revenue
    pub nwc_pct: f64,
}

impl Assumptions {
    /// Derives assumptions from historical averages.
    ///
    /// Margin, capex and NWC ratios come from the history; growth, tax and
    /// discount rates are policy inputs supplied by the caller.
    pub fn from_history(
        averages: &HistoricalAverages,
        rev_growth: f64,
        tax_rate: f64,
        wacc: f64,
        terminal_growth: f64,
    ) -> Self {
        Self {
            rev_growth,
            ebitda_margin: averages.ebitda_margin,
            tax_rate,
            wacc,
            terminal_growth,
            capex_pct: averages.capex_pct,
            nwc_pct: averages.nwc_pct,
        }
    }

    /// Returns the value of a single field.
    pub fn get(&self, field: AssumptionField) -> f64 {
        match field {
            AssumptionField::RevGrowth => self.rev_growth,
            AssumptionField::EbitdaMargin => self.ebitda_margin,
            AssumptionField::TaxRate => self.tax_rate,
            AssumptionField::Wacc => self.wacc,
            AssumptionField::TerminalGrowth => self.terminal_growth,
            AssumptionField::CapexPct => self.capex_pct,
            AssumptionField::NwcPct => self.nwc_pct,
        }
    }

    /// Returns a copy with one field replaced.
    pub fn with(mut self, field: AssumptionField, value: f64) -> Self {
        match field {
            AssumptionField::RevGrowth => self.rev_growth = value,
            AssumptionField::EbitdaMargin => self.ebitda_margin = value,
            AssumptionField::TaxRate => self.tax_rate = value,
            AssumptionField::Wacc => self.wacc = value,
            AssumptionField::TerminalGrowth => self.terminal_growth = value,
            AssumptionField::CapexPct => self.capex_pct = value,
            AssumptionField::NwcPct => self.nwc_pct = value,
        }
        self
    }

    /// Merges overrides on top of `self`; the override wins per field.
    pub fn merge(&self, overrides: &AssumptionOverrides) -> Self {
        AssumptionField::ALL
            .into_iter()
            .fold(*self, |acc, field| match overrides.get(field) {
                Some(value) => acc.with(field, value),
                None => acc,
            })
    }

    /// Checks that every field is finite.
    ///
    /// # Errors
    ///
    /// Returns `NonFiniteAssumption` naming the first NaN or infinite field.
    pub fn validate(&self) -> Result<(), ValuationError> {
        for field in AssumptionField::ALL {
            let value = self.get(field);
            if !value.is_finite() {
                return Err(ValuationError::NonFiniteAssumption {
                    field: field.name(),
                    value,
                });
            }
        }
        Ok(())
    }

    /// Whether the Gordon-growth terminal value is defined.
    #[inline]
    pub fn has_terminal_value(&self) -> bool {
        self.wacc > self.terminal_growth
    }
}

/// Partial assumption record; absent fields keep the base value.
///
/// Deserialisation rejects unknown keys, so a misspelt override is a
/// configuration error rather than a silent no-op.
///
/// # Examples
/// ```
/// use valuation_core::types::AssumptionOverrides;
///
/// let mut overrides = AssumptionOverrides::new().wacc(0.10);
/// overrides.set_named("rev_growth", 0.07).unwrap();
/// assert_eq!(overrides.len(), 2);
/// assert!(overrides.set_named("beta", 1.2).is_err());
/// ```
#[derive(Clone, Copy, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default, deny_unknown_fields))]
pub struct AssumptionOverrides {
    /// Revenue growth override
    #[cfg_attr(feature = "serde", serde(skip_serializing_if = "Option::is_none"))]
    pub rev_growth: Option<f64>,
    /// EBITDA margin override
    #[cfg_attr(feature = "serde", serde(skip_serializing_if = "Option::is_none"))]
    pub ebitda_margin: Option<f64>,
    /// Tax rate override
    #[cfg_attr(feature = "serde", serde(skip_serializing_if = "Option::is_none"))]
    pub tax_rate: Option<f64>,
    /// WACC override
    #[cfg_attr(feature = "serde", serde(skip_serializing_if = "Option::is_none"))]
    pub wacc: Option<f64>,
    /// Terminal growth override
    #[cfg_attr(feature = "serde", serde(skip_serializing_if = "Option::is_none"))]
    pub terminal_growth: Option<f64>,
    /// Capex percentage override
    #[cfg_attr(feature = "serde", serde(skip_serializing_if = "Option::is_none"))]
    pub capex_pct: Option<f64>,
    /// NWC percentage override
    #[cfg_attr(feature = "serde", serde(skip_serializing_if = "Option::is_none"))]
    pub nwc_pct: Option<f64>,
}

impl AssumptionOverrides {
    /// Creates an empty override set.
    #[inline]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the revenue growth override.
    pub fn rev_growth(mut self, value: f64) -> Self {
        self.rev_growth = Some(value);
        self
    }

    /// Sets the EBITDA margin override.
    pub fn ebitda_margin(mut self, value: f64) -> Self {
        self.ebitda_margin = Some(value);
        self
    }

    /// Sets the tax rate override.
    pub fn tax_rate(mut self, value: f64) -> Self {
        self.tax_rate = Some(value);
        self
    }

    /// Sets the WACC override.
    pub fn wacc(mut self, value: f64) -> Self {
        self.wacc = Some(value);
        self
    }

    /// Sets the terminal growth override.
    pub fn terminal_growth(mut self, value: f64) -> Self {
        self.terminal_growth = Some(value);
        self
    }

    /// Sets the capex percentage override.
    pub fn capex_pct(mut self, value: f64) -> Self {
        self.capex_pct = Some(value);
        self
    }

    /// Sets the NWC percentage override.
    pub fn nwc_pct(mut self, value: f64) -> Self {
        self.nwc_pct = Some(value);
        self
    }

    /// Returns the override for a field, if any.
    pub fn get(&self, field: AssumptionField) -> Option<f64> {
        match field {
            AssumptionField::RevGrowth => self.rev_growth,
            AssumptionField::EbitdaMargin => self.ebitda_margin,
            AssumptionField::TaxRate => self.tax_rate,
            AssumptionField::Wacc => self.wacc,
            AssumptionField::TerminalGrowth => self.terminal_growth,
            AssumptionField::CapexPct => self.capex_pct,
            AssumptionField::NwcPct => self.nwc_pct,
        }
    }

    /// Sets the override for a field.
    pub fn set(&mut self, field: AssumptionField, value: f64) {
        let slot = match field {
            AssumptionField::RevGrowth => &mut self.rev_growth,
            AssumptionField::EbitdaMargin => &mut self.ebitda_margin,
            AssumptionField::TaxRate => &mut self.tax_rate,
            AssumptionField::Wacc => &mut self.wacc,
            AssumptionField::TerminalGrowth => &mut self.terminal_growth,
            AssumptionField::CapexPct => &mut self.capex_pct,
            AssumptionField::NwcPct => &mut self.nwc_pct,
        };
        *slot = Some(value);
    }

    /// Sets an override by field name.
    ///
    /// # Errors
    ///
    /// Returns `UnknownAssumption` when `name` is not an assumption field.
    pub fn set_named(&mut self, name: &str, value: f64) -> Result<(), ValuationError> {
        let field = name.parse::<AssumptionField>()?;
        self.set(field, value);
        Ok(())
    }

    /// Parses a `key=value` assignment and applies it.
    ///
    /// # Errors
    ///
    /// Returns `InvalidOverride` for malformed assignments and
    /// `UnknownAssumption` for unknown keys.
    pub fn apply_assignment(&mut self, assignment: &str) -> Result<(), ValuationError> {
        let (key, raw) = assignment.split_once('=').ok_or_else(|| {
            ValuationError::InvalidOverride(format!("expected key=value, got '{}'", assignment))
        })?;
        let value: f64 = raw.trim().parse().map_err(|_| {
            ValuationError::InvalidOverride(format!("'{}' is not a number", raw.trim()))
        })?;
        self.set_named(key, value)
    }

    /// Number of fields overridden.
    pub fn len(&self) -> usize {
        AssumptionField::ALL
            .into_iter()
            .filter(|field| self.get(*field).is_some())
            .count()
    }

    /// Whether no field is overridden.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
