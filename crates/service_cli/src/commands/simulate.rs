//! Monte Carlo simulation command.

use serde::Serialize;
use valuation_core::{AssumptionOverrides, FinancialDataset};
use valuation_pricing::mc::{Histogram, MonteCarloResult, MonteCarloSampler, SimulationConfig};
use valuation_pricing::rng::ValuationRng;

use crate::config::OutputFormat;
use crate::output::{to_json, Table};
use crate::Result;

/// Widest histogram bar, in characters.
const BAR_WIDTH: usize = 40;

/// Distribution summary rendered by the `simulate` command.
#[derive(Clone, Debug, Serialize)]
pub struct SimulationReport {
    /// Company display name
    pub company: String,
    /// Seed used, absent when drawn from entropy
    pub seed: Option<u64>,
    /// Trials attempted
    pub iterations: usize,
    /// Trials with a positive price
    pub retained: usize,
    /// Trials dropped for a non-positive price or unvaluable shocks
    pub discarded: usize,
    /// Mean retained price
    pub mean: f64,
    /// Median retained price
    pub median: Option<f64>,
    /// 5th percentile
    pub p5: Option<f64>,
    /// 95th percentile
    pub p95: Option<f64>,
    /// Smallest retained price
    pub min: f64,
    /// Largest retained price
    pub max: f64,
    /// Price histogram
    pub histogram: Histogram,
}

impl SimulationReport {
    fn new(company: &str, seed: Option<u64>, result: MonteCarloResult) -> Self {
        Self {
            company: company.to_string(),
            seed,
            iterations: result.iterations,
            retained: result.retained(),
            discarded: result.discarded,
            mean: result.mean,
            median: result.median(),
            p5: result.percentile(0.05),
            p95: result.percentile(0.95),
            min: result.min,
            max: result.max,
            histogram: result.histogram,
        }
    }
}

/// Samples the price distribution around the assumptions under `overrides`.
///
/// A `seed` makes the run reproducible; without one the generator is
/// seeded from operating-system entropy.
///
/// # Errors
///
/// Returns `Simulation` when no trial yields a positive price or the
/// retained prices coincide, and `Valuation` for unvaluable inputs.
pub fn run(
    dataset: &FinancialDataset,
    overrides: &AssumptionOverrides,
    config: SimulationConfig,
    seed: Option<u64>,
    format: OutputFormat,
) -> Result<String> {
    let base = dataset.assumptions.merge(overrides);
    base.validate()?;
    let mut rng = match seed {
        Some(seed) => ValuationRng::from_seed(seed),
        None => ValuationRng::from_entropy(),
    };

    let result = MonteCarloSampler::new(config).simulate_from(dataset, &base, &mut rng)?;
    let report = SimulationReport::new(&dataset.company, rng.seed(), result);

    match format {
        OutputFormat::Json => to_json(&report),
        OutputFormat::Table => Ok(render(&report)),
    }
}

fn render(report: &SimulationReport) -> String {
    let seed = report
        .seed
        .map(|s| s.to_string())
        .unwrap_or_else(|| "entropy".to_string());
    let mut summary = Table::new(["Statistic", "Value"]).title(format!(
        "{} - Monte Carlo value per share",
        report.company
    ));
    summary
        .row(["Seed".to_string(), seed])
        .row(["Trials".to_string(), report.iterations.to_string()])
        .row(["Retained".to_string(), report.retained.to_string()])
        .row(["Discarded".to_string(), report.discarded.to_string()])
        .row(["Mean".to_string(), format!("{:.2}", report.mean)])
        .row(["Median".to_string(), price(report.median)])
        .row(["5th percentile".to_string(), price(report.p5)])
        .row(["95th percentile".to_string(), price(report.p95)])
        .row(["Min".to_string(), format!("{:.2}", report.min)])
        .row(["Max".to_string(), format!("{:.2}", report.max)]);

    let peak = report.histogram.counts.iter().copied().max().unwrap_or(0);
    let mut histogram = Table::new(["From", "Count", "Distribution"]);
    for (label, &count) in report.histogram.labels.iter().zip(&report.histogram.counts) {
        let bar = if peak == 0 {
            0
        } else {
            (count * BAR_WIDTH).div_ceil(peak)
        };
        histogram.row([label.clone(), count.to_string(), "█".repeat(bar)]);
    }

    format!("{}\n{}", summary.render(), histogram.render())
}

fn price(value: Option<f64>) -> String {
    value.map_or_else(|| "n/a".to_string(), |v| format!("{:.2}", v))
}

#[cfg(test)]
mod tests {
    use super::*;
    use valuation_core::fixtures::sample_dataset;
    use valuation_pricing::mc::HISTOGRAM_BINS;

    fn config(iterations: usize) -> SimulationConfig {
        SimulationConfig::builder()
            .iterations(iterations)
            .build()
            .unwrap()
    }

    #[test]
    fn test_seeded_runs_are_reproducible() {
        let dataset = sample_dataset();
        let overrides = AssumptionOverrides::new();
        let first = run(&dataset, &overrides, config(500), Some(42), OutputFormat::Json).unwrap();
        let second = run(&dataset, &overrides, config(500), Some(42), OutputFormat::Json).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn test_json_report() {
        let out = run(
            &sample_dataset(),
            &AssumptionOverrides::new(),
            config(1000),
            Some(7),
            OutputFormat::Json,
        )
        .unwrap();
        let value: serde_json::Value = serde_json::from_str(&out).unwrap();

        assert_eq!(value["seed"], 7);
        assert_eq!(value["iterations"], 1000);
        let retained = value["retained"].as_u64().unwrap();
        let discarded = value["discarded"].as_u64().unwrap();
        assert_eq!(retained + discarded, 1000);

        let counts = value["histogram"]["counts"].as_array().unwrap();
        assert_eq!(counts.len(), HISTOGRAM_BINS);
        let total: u64 = counts.iter().map(|c| c.as_u64().unwrap()).sum();
        assert_eq!(total, retained);

        let min = value["min"].as_f64().unwrap();
        let max = value["max"].as_f64().unwrap();
        let mean = value["mean"].as_f64().unwrap();
        assert!(min <= mean && mean <= max);
        assert!(min < 226.46 && 226.46 < max);
        let median = value["median"].as_f64().unwrap();
        assert!(min <= median && median <= max);
    }

    #[test]
    fn test_missing_percentile_renders_placeholder() {
        assert_eq!(price(None), "n/a");
        assert_eq!(price(Some(226.464)), "226.46");
    }

    #[test]
    fn test_table_report() {
        let out = run(
            &sample_dataset(),
            &AssumptionOverrides::new(),
            config(200),
            Some(1),
            OutputFormat::Table,
        )
        .unwrap();
        assert!(out.contains("Monte Carlo value per share"));
        assert!(out.contains("│ Seed            │"));
        assert!(out.contains("│ Trials          │"));
        assert!(out.contains('█'));
    }

    #[test]
    fn test_invalid_overrides_rejected() {
        let overrides = AssumptionOverrides::new().wacc(f64::NAN);
        let result = run(&sample_dataset(), &overrides, config(10), Some(1), OutputFormat::Json);
        assert!(result.is_err());
    }
}
