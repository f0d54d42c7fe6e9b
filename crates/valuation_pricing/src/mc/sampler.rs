//! Monte Carlo share-price sampler.

use rayon::prelude::*;
use tracing::{debug, info, warn};
use valuation_core::{Assumptions, FinancialDataset};

use super::config::{
    SimulationConfig, EBITDA_MARGIN_SD, HISTOGRAM_BINS, REV_GROWTH_SD, WACC_SD,
};
use super::error::SimulationError;
use super::histogram::Histogram;
use crate::dcf::project_assumptions;
use crate::rng::{standard_normal_triple, UniformSource};

/// Distribution summary of retained trial prices.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct MonteCarloResult {
    /// Retained prices in ascending order
    pub sorted_prices: Vec<f64>,
    /// 25-bucket histogram of retained prices
    pub histogram: Histogram,
    /// Mean retained price
    pub mean: f64,
    /// Smallest retained price
    pub min: f64,
    /// Largest retained price
    pub max: f64,
    /// Trials attempted
    pub iterations: usize,
    /// Trials dropped for a non-positive price or unvaluable shocked assumptions
    pub discarded: usize,
}

impl MonteCarloResult {
    /// Number of retained trials.
    #[inline]
    pub fn retained(&self) -> usize {
        self.sorted_prices.len()
    }

    /// Nearest-rank percentile for `p` in `[0, 1]`; values outside are clamped.
    ///
    /// Returns `None` when no prices are retained.
    ///
    /// # Examples
    ///
    /// ```rust,ignore
    /// let p95 = result.percentile(0.95).unwrap_or(result.max);
    /// assert!(p95 <= result.max);
    /// ```
    pub fn percentile(&self, p: f64) -> Option<f64> {
        let n = self.sorted_prices.len();
        if n == 0 {
            return None;
        }
        let rank = (p.clamp(0.0, 1.0) * n as f64).ceil() as usize;
        self.sorted_prices.get(rank.clamp(1, n) - 1).copied()
    }

    /// Median retained price (50th percentile), `None` when empty.
    #[inline]
    pub fn median(&self) -> Option<f64> {
        self.percentile(0.5)
    }
}

/// Perturbs revenue growth, EBITDA margin and WACC around a base set.
#[inline]
pub(crate) fn perturb(base: &Assumptions, z: [f64; 3]) -> Assumptions {
    Assumptions {
        rev_growth: base.rev_growth + z[0] * REV_GROWTH_SD,
        ebitda_margin: base.ebitda_margin + z[1] * EBITDA_MARGIN_SD,
        wacc: base.wacc + z[2] * WACC_SD,
        ..*base
    }
}

/// Share-price sampler driven by an injected uniform source.
///
/// Normals for every trial are drawn sequentially before any valuation runs,
/// so the result depends only on the uniform stream and not on whether
/// trials are valued on the rayon pool.
///
/// # Examples
///
/// ```rust,ignore
/// use valuation_pricing::mc::{MonteCarloSampler, SimulationConfig};
/// use valuation_pricing::rng::ValuationRng;
///
/// let sampler = MonteCarloSampler::new(SimulationConfig::default());
/// let mut rng = ValuationRng::from_seed(42);
/// let result = sampler.simulate(&dataset, &mut rng)?;
/// println!("mean {:.2} over {} trials", result.mean, result.retained());
/// ```
#[derive(Clone, Copy, Debug, Default)]
pub struct MonteCarloSampler {
    config: SimulationConfig,
}

impl MonteCarloSampler {
    /// Creates a sampler from a validated configuration.
    pub fn new(config: SimulationConfig) -> Self {
        Self { config }
    }

    /// Returns the configuration.
    #[inline]
    pub fn config(&self) -> &SimulationConfig {
        &self.config
    }

    /// Samples around the dataset's default assumptions.
    ///
    /// # Errors
    ///
    /// See [`MonteCarloSampler::simulate_from`].
    pub fn simulate<R: UniformSource + ?Sized>(
        &self,
        dataset: &FinancialDataset,
        rng: &mut R,
    ) -> Result<MonteCarloResult, SimulationError> {
        self.simulate_from(dataset, &dataset.assumptions, rng)
    }

    /// Samples around an explicit base assumption set.
    ///
    /// The base set is valued once before sampling, so dataset-level faults
    /// fail fast. A trial whose shocked assumptions cannot be valued (WACC
    /// pushed to -100% or below) is discarded like a non-positive price.
    ///
    /// # Errors
    ///
    /// - `Valuation` if the base set cannot be valued (invalid shares, empty
    ///   history, non-finite assumptions)
    /// - `NoValidSamples` if no trial yields a positive price
    /// - `DegenerateRange` if all retained prices coincide
    pub fn simulate_from<R: UniformSource + ?Sized>(
        &self,
        dataset: &FinancialDataset,
        base: &Assumptions,
        rng: &mut R,
    ) -> Result<MonteCarloResult, SimulationError> {
        let reference = project_assumptions(dataset, base)?;
        debug!(
            company = %dataset.company,
            share_price = reference.share_price,
            "base valuation accepted for sampling"
        );

        let iterations = self.config.iterations();
        let trials: Vec<Assumptions> = (0..iterations)
            .map(|_| perturb(base, standard_normal_triple(rng)))
            .collect();

        let value = |a: &Assumptions| -> Option<Trial> {
            project_assumptions(dataset, a).ok().map(|r| Trial {
                share_price: r.share_price,
                degenerate_terminal: r.is_terminal_degenerate(),
            })
        };
        let outcomes: Vec<Option<Trial>> = if self.config.runs_parallel() {
            trials.par_iter().map(value).collect()
        } else {
            trials.iter().map(value).collect()
        };

        let valued: Vec<Trial> = outcomes.into_iter().flatten().collect();
        let unvaluable = iterations - valued.len();
        let degenerate_terminal = valued.iter().filter(|t| t.degenerate_terminal).count();
        if unvaluable > 0 {
            warn!(
                unvaluable,
                iterations,
                "trials discarded; shocked assumptions could not be valued"
            );
        }
        if degenerate_terminal > 0 {
            warn!(
                degenerate_terminal,
                iterations,
                "trials valued without a terminal value; wacc did not exceed terminal growth"
            );
        }

        let mut sorted_prices: Vec<f64> = valued
            .into_iter()
            .map(|t| t.share_price)
            .filter(|&p| p > 0.0)
            .collect();
        if sorted_prices.is_empty() {
            return Err(SimulationError::NoValidSamples { iterations });
        }
        sorted_prices.sort_by(f64::total_cmp);

        let histogram = Histogram::build(&sorted_prices, HISTOGRAM_BINS)?;
        let retained = sorted_prices.len();
        let mean = sorted_prices.iter().sum::<f64>() / retained as f64;
        let min = sorted_prices[0];
        let max = sorted_prices[retained - 1];

        info!(
            iterations,
            retained,
            discarded = iterations - retained,
            mean,
            min,
            max,
            "monte carlo simulation complete"
        );

        Ok(MonteCarloResult {
            sorted_prices,
            histogram,
            mean,
            min,
            max,
            iterations,
            discarded: iterations - retained,
        })
    }
}

/// Outcome of one valued trial.
#[derive(Clone, Copy, Debug)]
struct Trial {
    share_price: f64,
    degenerate_terminal: bool,
}

/// Runs `iterations` trials with the default parallelisation threshold.
///
/// # Errors
///
/// - `InvalidIterations` if `iterations` is 0 or above the maximum
/// - any error from [`MonteCarloSampler::simulate`]
pub fn simulate<R: UniformSource + ?Sized>(
    dataset: &FinancialDataset,
    iterations: usize,
    rng: &mut R,
) -> Result<MonteCarloResult, SimulationError> {
    let config = SimulationConfig::builder().iterations(iterations).build()?;
    MonteCarloSampler::new(config).simulate(dataset, rng)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rng::{ReplaySource, ValuationRng};
    use crate::test_logging::count_events;
    use approx::assert_relative_eq;
    use valuation_core::fixtures::sample_dataset;
    use valuation_core::ValuationError;

    fn sequential(iterations: usize) -> MonteCarloSampler {
        MonteCarloSampler::new(
            SimulationConfig::builder()
                .iterations(iterations)
                .parallel_threshold(usize::MAX)
                .build()
                .unwrap(),
        )
    }

    #[test]
    fn test_perturb_touches_three_fields() {
        let base = sample_dataset().assumptions;
        let shocked = perturb(&base, [1.0, -2.0, 3.0]);
        assert_relative_eq!(shocked.rev_growth, base.rev_growth + 0.015);
        assert_relative_eq!(shocked.ebitda_margin, base.ebitda_margin - 0.03);
        assert_relative_eq!(shocked.wacc, base.wacc + 0.015);
        assert_eq!(shocked.tax_rate, base.tax_rate);
        assert_eq!(shocked.terminal_growth, base.terminal_growth);
        assert_eq!(shocked.capex_pct, base.capex_pct);
        assert_eq!(shocked.nwc_pct, base.nwc_pct);
    }

    #[test]
    fn test_summary_invariants() {
        let dataset = sample_dataset();
        let mut rng = ValuationRng::from_seed(7);
        let result = simulate(&dataset, 1000, &mut rng).unwrap();

        assert_eq!(result.iterations, 1000);
        assert_eq!(result.retained() + result.discarded, 1000);
        assert_eq!(result.histogram.counts.len(), HISTOGRAM_BINS);
        assert_eq!(result.histogram.labels.len(), HISTOGRAM_BINS);
        assert_eq!(result.histogram.total(), result.retained());
        assert!(result.min <= result.mean && result.mean <= result.max);
        assert!(result.sorted_prices.windows(2).all(|w| w[0] <= w[1]));
        assert!(result.sorted_prices.iter().all(|&p| p > 0.0));
    }

    #[test]
    fn test_mean_near_base_price() {
        let dataset = sample_dataset();
        let mut rng = ValuationRng::from_seed(11);
        let result = simulate(&dataset, 5000, &mut rng).unwrap();
        // Base price is about 226; shocks are small and roughly symmetric
        assert!(result.mean > 200.0 && result.mean < 260.0, "mean {}", result.mean);
    }

    #[test]
    fn test_same_seed_same_result() {
        let dataset = sample_dataset();
        let a = simulate(&dataset, 500, &mut ValuationRng::from_seed(99)).unwrap();
        let b = simulate(&dataset, 500, &mut ValuationRng::from_seed(99)).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn test_parallel_matches_sequential() {
        let dataset = sample_dataset();
        let parallel = MonteCarloSampler::new(
            SimulationConfig::builder()
                .iterations(600)
                .parallel_threshold(1)
                .build()
                .unwrap(),
        );
        let a = parallel
            .simulate(&dataset, &mut ValuationRng::from_seed(5))
            .unwrap();
        let b = sequential(600)
            .simulate(&dataset, &mut ValuationRng::from_seed(5))
            .unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn test_replay_source_trials() {
        // Two distinct uniform pairs give two distinct trial prices
        let dataset = sample_dataset();
        let mut source = ReplaySource::new(vec![0.2, 0.1, 0.7, 0.3, 0.5, 0.9, 0.6, 0.45]);
        let result = sequential(4).simulate(&dataset, &mut source).unwrap();
        assert_eq!(source.draws(), 24);
        assert_eq!(result.retained(), 4);
        assert_relative_eq!(result.min, 209.64002634898512, max_relative = 1e-9);
        assert_relative_eq!(result.max, 247.35388800104332, max_relative = 1e-9);
        let occupied: Vec<usize> = (0..HISTOGRAM_BINS)
            .filter(|&i| result.histogram.counts[i] > 0)
            .collect();
        assert_eq!(occupied, vec![0, 12, 16, 24]);
    }

    #[test]
    fn test_all_negative_prices_rejected() {
        let mut dataset = sample_dataset();
        dataset.debt = 1.0e9;
        let err = simulate(&dataset, 50, &mut ValuationRng::from_seed(1)).unwrap_err();
        assert_eq!(err, SimulationError::NoValidSamples { iterations: 50 });
    }

    #[test]
    fn test_identical_prices_are_degenerate() {
        // A constant replay stream produces the same shock every trial
        let dataset = sample_dataset();
        let mut source = ReplaySource::new(vec![0.5]);
        let err = sequential(10).simulate(&dataset, &mut source).unwrap_err();
        assert!(matches!(err, SimulationError::DegenerateRange { .. }));
    }

    #[test]
    fn test_invalid_shares_propagates() {
        let mut dataset = sample_dataset();
        dataset.shares_outstanding = 0.0;
        let err = simulate(&dataset, 10, &mut ValuationRng::from_seed(1)).unwrap_err();
        assert_eq!(
            err,
            SimulationError::Valuation(ValuationError::InvalidSharesOutstanding(0.0))
        );
    }

    #[test]
    fn test_zero_iterations_rejected() {
        let err = simulate(&sample_dataset(), 0, &mut ValuationRng::from_seed(1)).unwrap_err();
        assert_eq!(err, SimulationError::InvalidIterations(0));
    }

    #[test]
    fn test_percentiles() {
        let dataset = sample_dataset();
        let result = simulate(&dataset, 1000, &mut ValuationRng::from_seed(3)).unwrap();
        assert_eq!(result.percentile(0.0), Some(result.min));
        assert_eq!(result.percentile(1.0), Some(result.max));
        assert_eq!(result.percentile(2.0), Some(result.max));
        assert!(result.percentile(0.05) <= result.median());
        assert!(result.median() <= result.percentile(0.95));
    }

    #[test]
    fn test_percentiles_of_empty_result() {
        let empty = MonteCarloResult {
            sorted_prices: Vec::new(),
            histogram: Histogram {
                labels: Vec::new(),
                counts: Vec::new(),
                lower: 0.0,
                bin_width: 0.0,
            },
            mean: 0.0,
            min: 0.0,
            max: 0.0,
            iterations: 0,
            discarded: 0,
        };
        assert_eq!(empty.retained(), 0);
        assert_eq!(empty.median(), None);
        assert_eq!(empty.percentile(0.0), None);
        assert_eq!(empty.percentile(1.0), None);
    }

    #[test]
    fn test_single_price_percentiles() {
        let mut result = simulate(&sample_dataset(), 50, &mut ValuationRng::from_seed(9)).unwrap();
        result.sorted_prices.truncate(1);
        let only = result.sorted_prices[0];
        assert_eq!(result.median(), Some(only));
        assert_eq!(result.percentile(0.0), Some(only));
        assert_eq!(result.percentile(0.99), Some(only));
    }

    /// Uniforms for one trial with `z1 = z2 = 0` and the given WACC shock draw.
    fn trial_uniforms(u3: f64, v3: f64) -> [f64; 6] {
        // v = 0.25 gives cos(pi / 2) = 0
        [0.5, 0.25, 0.5, 0.25, u3, v3]
    }

    fn near_total_loss_base() -> Assumptions {
        Assumptions {
            wacc: -0.97,
            ..sample_dataset().assumptions
        }
    }

    #[test]
    fn test_unvaluable_trial_is_discarded() {
        let dataset = sample_dataset();
        let mut stream = Vec::new();
        // z3 = -8 takes wacc from -97% to -101%
        stream.extend(trial_uniforms((-32.0f64).exp(), 0.5));
        // z3 = -1 and z3 = 0 stay above -100%
        stream.extend(trial_uniforms((-0.5f64).exp(), 0.5));
        stream.extend(trial_uniforms(0.5, 0.25));
        let mut source = ReplaySource::new(stream);

        let result = sequential(3)
            .simulate_from(&dataset, &near_total_loss_base(), &mut source)
            .unwrap();

        assert_eq!(result.iterations, 3);
        assert_eq!(result.retained(), 2);
        assert_eq!(result.discarded, 1);
        assert_eq!(result.histogram.total(), 2);
        assert!(result.min < result.max);
    }

    #[test]
    fn test_unvaluable_trials_in_parallel() {
        let dataset = sample_dataset();
        let mut stream = Vec::new();
        stream.extend(trial_uniforms((-32.0f64).exp(), 0.5));
        stream.extend(trial_uniforms((-0.5f64).exp(), 0.5));
        stream.extend(trial_uniforms(0.5, 0.25));
        let parallel = MonteCarloSampler::new(
            SimulationConfig::builder()
                .iterations(30)
                .parallel_threshold(1)
                .build()
                .unwrap(),
        );

        let result = parallel
            .simulate_from(&dataset, &near_total_loss_base(), &mut ReplaySource::new(stream))
            .unwrap();
        assert_eq!(result.retained(), 20);
        assert_eq!(result.discarded, 10);
    }

    #[test]
    fn test_every_trial_unvaluable() {
        let dataset = sample_dataset();
        let source = trial_uniforms((-32.0f64).exp(), 0.5).to_vec();
        let err = sequential(5)
            .simulate_from(&dataset, &near_total_loss_base(), &mut ReplaySource::new(source))
            .unwrap_err();
        assert_eq!(err, SimulationError::NoValidSamples { iterations: 5 });
    }

    #[test]
    fn test_degenerate_terminal_trials_warn_once_per_run() {
        // Base wacc equals terminal growth, so shocks land on both sides
        let dataset = sample_dataset();
        let base = Assumptions {
            wacc: 0.03,
            ..dataset.assumptions
        };
        let (result, counts) = count_events(|| {
            sequential(200).simulate_from(&dataset, &base, &mut ValuationRng::from_seed(17))
        });
        let result = result.unwrap();
        assert_eq!(result.iterations, 200);
        assert_eq!(counts.warnings(), 1);
        assert!(counts.debugs() > 1);
    }

    #[test]
    fn test_empty_history_fails_before_sampling() {
        let mut dataset = sample_dataset();
        dataset.years.clear();
        let mut source = ReplaySource::new(vec![0.3, 0.6]);
        let err = sequential(10).simulate(&dataset, &mut source).unwrap_err();
        assert_eq!(err, SimulationError::Valuation(ValuationError::EmptyHistory));
        assert_eq!(source.draws(), 0);
    }
}
