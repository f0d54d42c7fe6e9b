//! WACC × terminal-growth sensitivity analysis.
//!
//! [`sweep`] re-values the dataset on a fixed 5×5 grid of offsets around an
//! anchor valuation and classifies each cell by its change from the anchor
//! price:
//!
//! | Change from anchor | Bucket        |
//! |--------------------|---------------|
//! | `> +8%`            | `StrongUp`    |
//! | `> +3%`            | `Up`          |
//! | `< -8%`            | `StrongDown`  |
//! | `< -3%`            | `Down`        |
//! | otherwise          | `Neutral`     |

mod bucket;
mod grid;

pub use bucket::{
    DeltaBucket, DOWN_THRESHOLD, STRONG_DOWN_THRESHOLD, STRONG_UP_THRESHOLD, UP_THRESHOLD,
};
pub use grid::{
    sweep, sweep_with, SensitivityCell, SensitivityGrid, BASE_INDEX, GROWTH_OFFSETS, GRID_SIZE,
    WACC_OFFSETS,
};
