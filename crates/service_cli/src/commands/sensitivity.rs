//! WACC by terminal-growth sensitivity command.

use valuation_core::{AssumptionOverrides, FinancialDataset};
use valuation_pricing::dcf::project;
use valuation_risk::sensitivity::{sweep_with, DeltaBucket, SensitivityGrid};
use valuation_risk::ParallelConfig;

use crate::config::OutputFormat;
use crate::output::{pct, signed_pct, to_json, Table};
use crate::Result;

/// Sweeps the grid around the valuation under `overrides`.
///
/// # Errors
///
/// Returns `Valuation` when the anchor or any shifted cell cannot be valued.
pub fn run(
    dataset: &FinancialDataset,
    overrides: &AssumptionOverrides,
    parallel: &ParallelConfig,
    format: OutputFormat,
) -> Result<String> {
    let base = project(dataset, overrides)?;
    let grid = sweep_with(dataset, &base, parallel)?;

    match format {
        OutputFormat::Json => to_json(&grid),
        OutputFormat::Table => Ok(render(dataset, &grid)),
    }
}

fn marker(bucket: DeltaBucket) -> &'static str {
    match bucket {
        DeltaBucket::StrongUp => "++",
        DeltaBucket::Up => "+",
        DeltaBucket::Neutral => "",
        DeltaBucket::Down => "-",
        DeltaBucket::StrongDown => "--",
    }
}

fn render(dataset: &FinancialDataset, grid: &SensitivityGrid) -> String {
    let growth_headers = grid
        .cells
        .first()
        .map(|row| {
            row.iter()
                .map(|c| format!("g {}", pct(c.terminal_growth, 2)))
                .collect::<Vec<_>>()
        })
        .unwrap_or_default();
    let headers = std::iter::once("WACC".to_string()).chain(growth_headers);

    let mut table = Table::new(headers).title(format!(
        "{} - value per share, anchor {:.2} (WACC {}, g {})",
        dataset.company,
        grid.base_price,
        pct(grid.base_wacc, 2),
        pct(grid.base_growth, 2)
    ));
    for row in &grid.cells {
        let label = row.first().map(|c| pct(c.wacc, 2)).unwrap_or_default();
        let cells = row.iter().map(|c| {
            if c.is_base_case {
                format!("[{:.2}]", c.price)
            } else {
                format!("{:.2} {} {}", c.price, signed_pct(c.percent_delta), marker(c.bucket))
                    .trim_end()
                    .to_string()
            }
        });
        table.row(std::iter::once(label).chain(cells));
    }

    let (low, high) = grid.price_range();
    format!(
        "{}Range {:.2} to {:.2}. Markers: ++ above +8%, + above +3%, - below -3%, -- below -8%\n",
        table.render(),
        low,
        high
    )
}
