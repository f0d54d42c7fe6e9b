//! The 5×5 sensitivity grid.

use tracing::debug;
use valuation_core::math::safe_div;
use valuation_core::{FinancialDataset, ValuationError};
use valuation_pricing::dcf::{project_assumptions, ValuationResult};

use super::bucket::DeltaBucket;
use crate::parallel::ParallelConfig;

/// Number of offsets along each axis.
pub const GRID_SIZE: usize = 5;

/// Row and column index of the zero-offset cell.
pub const BASE_INDEX: usize = 2;

/// WACC offsets, one per row.
pub const WACC_OFFSETS: [f64; GRID_SIZE] = [-0.01, -0.005, 0.0, 0.005, 0.01];

/// Terminal-growth offsets, one per column.
pub const GROWTH_OFFSETS: [f64; GRID_SIZE] = [-0.01, -0.005, 0.0, 0.005, 0.01];

/// One re-valuation on the grid.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SensitivityCell {
    /// Offset added to the anchor WACC
    pub wacc_offset: f64,
    /// Offset added to the anchor terminal growth
    pub growth_offset: f64,
    /// WACC used for this cell
    pub wacc: f64,
    /// Terminal growth used for this cell
    pub terminal_growth: f64,
    /// Share price under the shifted assumptions
    pub price: f64,
    /// Fractional change from the anchor price
    pub percent_delta: f64,
    /// Classification of `percent_delta`
    pub bucket: DeltaBucket,
    /// True only for the zero-offset cell
    pub is_base_case: bool,
}

/// Share prices over WACC (rows) × terminal growth (columns).
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SensitivityGrid {
    /// `cells[row][col]`, rows follow [`WACC_OFFSETS`], columns [`GROWTH_OFFSETS`]
    pub cells: Vec<Vec<SensitivityCell>>,
    /// Anchor WACC
    pub base_wacc: f64,
    /// Anchor terminal growth
    pub base_growth: f64,
    /// Anchor share price
    pub base_price: f64,
}

impl SensitivityGrid {
    /// Cell at `(row, col)`, if in range.
    pub fn cell(&self, row: usize, col: usize) -> Option<&SensitivityCell> {
        self.cells.get(row).and_then(|r| r.get(col))
    }

    /// The zero-offset cell.
    pub fn base_cell(&self) -> Option<&SensitivityCell> {
        self.cell(BASE_INDEX, BASE_INDEX)
    }

    /// Iterates over all cells in row-major order.
    pub fn iter(&self) -> impl Iterator<Item = &SensitivityCell> {
        self.cells.iter().flatten()
    }

    /// Lowest and highest cell prices.
    pub fn price_range(&self) -> (f64, f64) {
        self.iter().fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), c| {
            (lo.min(c.price), hi.max(c.price))
        })
    }
}

/// Sweeps the grid around `base` on the calling thread.
///
/// # Errors
///
/// See [`sweep_with`].
pub fn sweep(
    dataset: &FinancialDataset,
    base: &ValuationResult,
) -> Result<SensitivityGrid, ValuationError> {
    sweep_with(dataset, base, &ParallelConfig::default())
}

/// Sweeps the grid around `base`, valuing cells on the rayon pool when
/// `config` allows it.
///
/// Every cell starts from `base.assumptions` with only WACC and terminal
/// growth shifted. The zero-offset cell carries the anchor price unchanged,
/// so its delta is exactly zero. A zero anchor price gives every cell a zero
/// delta.
///
/// # Errors
///
/// Any [`ValuationError`] raised while valuing a shifted cell, for example
/// `InvalidOverride` when a shifted WACC reaches -100%.
pub fn sweep_with(
    dataset: &FinancialDataset,
    base: &ValuationResult,
    config: &ParallelConfig,
) -> Result<SensitivityGrid, ValuationError> {
    let anchor = base.assumptions;
    let base_price = base.share_price;

    let coordinates: Vec<(usize, usize)> = (0..GRID_SIZE)
        .flat_map(|row| (0..GRID_SIZE).map(move |col| (row, col)))
        .collect();

    let value_cell = |&(row, col): &(usize, usize)| -> Result<SensitivityCell, ValuationError> {
        let wacc_offset = WACC_OFFSETS[row];
        let growth_offset = GROWTH_OFFSETS[col];
        let is_base_case = row == BASE_INDEX && col == BASE_INDEX;

        let mut shifted = anchor;
        shifted.wacc += wacc_offset;
        shifted.terminal_growth += growth_offset;

        let price = if is_base_case {
            base_price
        } else {
            project_assumptions(dataset, &shifted)?.share_price
        };
        let percent_delta = safe_div(price - base_price, base_price, 0.0);

        Ok(SensitivityCell {
            wacc_offset,
            growth_offset,
            wacc: shifted.wacc,
            terminal_growth: shifted.terminal_growth,
            price,
            percent_delta,
            bucket: DeltaBucket::classify(percent_delta),
            is_base_case,
        })
    };

    let flat = config
        .map(&coordinates, value_cell)
        .into_iter()
        .collect::<Result<Vec<_>, _>>()?;

    let cells: Vec<Vec<SensitivityCell>> = flat
        .chunks(GRID_SIZE)
        .map(|row| row.to_vec())
        .collect();

    debug!(
        base_wacc = anchor.wacc,
        base_growth = anchor.terminal_growth,
        base_price,
        "sensitivity sweep complete"
    );

    Ok(SensitivityGrid {
        cells,
        base_wacc: anchor.wacc,
        base_growth: anchor.terminal_growth,
        base_price,
    })
}
