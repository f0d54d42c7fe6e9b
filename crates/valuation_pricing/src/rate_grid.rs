//! Cost-of-equity by growth grids for the equity-cash-flow models.
//!
//! Rows follow the cost-of-equity axis and columns the growth axis. A cell
//! is `None` where the model has no price for that pair (the Gordon model
//! when growth reaches the cost of equity).

/// Cost-of-equity axis used when the caller supplies none.
pub const DEFAULT_COST_OF_EQUITY_STEPS: [f64; 5] = [0.09, 0.10, 0.11, 0.12, 0.13];

/// Growth axis used when the caller supplies none.
pub const DEFAULT_GROWTH_STEPS: [f64; 3] = [0.02, 0.03, 0.04];

/// Two-way table of per-share prices.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct RateGrid {
    /// Row axis
    pub cost_of_equity: Vec<f64>,
    /// Column axis
    pub growth: Vec<f64>,
    /// `prices[row][col]`
    pub prices: Vec<Vec<Option<f64>>>,
}

impl RateGrid {
    /// Evaluates `price` at every axis pair, row by row.
    pub(crate) fn build<F, E>(
        cost_of_equity: &[f64],
        growth: &[f64],
        mut price: F,
    ) -> Result<Self, E>
    where
        F: FnMut(f64, f64) -> Result<Option<f64>, E>,
    {
        let prices = cost_of_equity
            .iter()
            .map(|&ke| growth.iter().map(|&g| price(ke, g)).collect::<Result<Vec<_>, E>>())
            .collect::<Result<Vec<Vec<_>>, E>>()?;
        Ok(Self {
            cost_of_equity: cost_of_equity.to_vec(),
            growth: growth.to_vec(),
            prices,
        })
    }

    /// Price at (`row`, `col`), `None` when out of range or undefined.
    #[inline]
    pub fn get(&self, row: usize, col: usize) -> Option<f64> {
        self.prices.get(row)?.get(col).copied().flatten()
    }

    /// Grid dimensions as `(rows, columns)`.
    #[inline]
    pub fn shape(&self) -> (usize, usize) {
        (self.cost_of_equity.len(), self.growth.len())
    }
}
