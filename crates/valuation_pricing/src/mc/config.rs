//! Monte Carlo simulation configuration.
//!
//! Perturbation scales and the histogram resolution are design constants of
//! the model. Only the iteration budget and the parallelisation threshold
//! are caller-supplied.

use super::error::SimulationError;

/// Default number of trials.
pub const DEFAULT_ITERATIONS: usize = 1000;

/// Maximum number of trials allowed.
pub const MAX_ITERATIONS: usize = 1_000_000;

/// Default trial count from which trials are valued on the rayon pool.
pub const DEFAULT_PARALLEL_THRESHOLD: usize = 256;

/// Number of equal-width histogram buckets.
pub const HISTOGRAM_BINS: usize = 25;

/// Standard deviation of the revenue growth shock.
pub const REV_GROWTH_SD: f64 = 0.015;

/// Standard deviation of the EBITDA margin shock.
pub const EBITDA_MARGIN_SD: f64 = 0.015;

/// Standard deviation of the WACC shock.
pub const WACC_SD: f64 = 0.005;

/// Monte Carlo simulation configuration.
///
/// Use [`SimulationConfig::builder`] to construct validated instances.
///
/// # Examples
///
/// ```rust
/// use valuation_pricing::mc::SimulationConfig;
///
/// let config = SimulationConfig::builder()
///     .iterations(5_000)
///     .parallel_threshold(1_000)
///     .build()
///     .expect("valid configuration");
///
/// assert_eq!(config.iterations(), 5_000);
/// assert!(config.runs_parallel());
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SimulationConfig {
    iterations: usize,
    parallel_threshold: usize,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            iterations: DEFAULT_ITERATIONS,
            parallel_threshold: DEFAULT_PARALLEL_THRESHOLD,
        }
    }
}

impl SimulationConfig {
    /// Creates a new configuration builder.
    #[inline]
    pub fn builder() -> SimulationConfigBuilder {
        SimulationConfigBuilder::default()
    }

    /// Number of trials.
    #[inline]
    pub fn iterations(&self) -> usize {
        self.iterations
    }

    /// Trial count from which valuation runs on the rayon pool.
    #[inline]
    pub fn parallel_threshold(&self) -> usize {
        self.parallel_threshold
    }

    /// Whether this configuration values trials in parallel.
    #[inline]
    pub fn runs_parallel(&self) -> bool {
        self.iterations >= self.parallel_threshold
    }

    /// Validates the configuration.
    ///
    /// # Errors
    ///
    /// - `InvalidIterations` if `iterations` is 0 or above [`MAX_ITERATIONS`]
    /// - `InvalidParameter` if `parallel_threshold` is 0
    pub fn validate(&self) -> Result<(), SimulationError> {
        if self.iterations == 0 || self.iterations > MAX_ITERATIONS {
            return Err(SimulationError::InvalidIterations(self.iterations));
        }
        if self.parallel_threshold == 0 {
            return Err(SimulationError::InvalidParameter {
                name: "parallel_threshold",
                value: "must be at least 1".to_string(),
            });
        }
        Ok(())
    }
}

/// Builder for [`SimulationConfig`].
#[derive(Clone, Debug, Default)]
pub struct SimulationConfigBuilder {
    iterations: Option<usize>,
    parallel_threshold: Option<usize>,
}

impl SimulationConfigBuilder {
    /// Sets the number of trials, in `[1, MAX_ITERATIONS]`.
    #[inline]
    pub fn iterations(mut self, iterations: usize) -> Self {
        self.iterations = Some(iterations);
        self
    }

    /// Sets the parallelisation threshold.
    ///
    /// Use `usize::MAX` to force sequential execution.
    #[inline]
    pub fn parallel_threshold(mut self, threshold: usize) -> Self {
        self.parallel_threshold = Some(threshold);
        self
    }

    /// Builds and validates the configuration.
    ///
    /// # Errors
    ///
    /// See [`SimulationConfig::validate`].
    pub fn build(self) -> Result<SimulationConfig, SimulationError> {
        let config = SimulationConfig {
            iterations: self.iterations.unwrap_or(DEFAULT_ITERATIONS),
            parallel_threshold: self
                .parallel_threshold
                .unwrap_or(DEFAULT_PARALLEL_THRESHOLD),
        };
        config.validate()?;
        Ok(config)
    }
}
