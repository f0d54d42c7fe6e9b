//! Equal-width histogram over a sorted price sample.

use super::error::SimulationError;

/// Bucketed price distribution.
///
/// `labels[i]` is the rounded lower edge of bucket `i`.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Histogram {
    /// Rounded lower edge of each bucket
    pub labels: Vec<String>,
    /// Sample count per bucket
    pub counts: Vec<usize>,
    /// Lower edge of the first bucket (sample minimum)
    pub lower: f64,
    /// Width of every bucket
    pub bin_width: f64,
}

impl Histogram {
    /// Buckets `sorted` into `bins` equal-width buckets spanning
    /// `[sorted[0], sorted[last]]`. The maximum lands in the last bucket.
    ///
    /// # Errors
    ///
    /// - `InvalidParameter` if `bins` is 0
    /// - `EmptySample` if `sorted` is empty
    /// - `DegenerateRange` if the first and last samples are equal
    ///
    /// # Examples
    ///
    /// ```rust
    /// use valuation_pricing::mc::Histogram;
    ///
    /// let h = Histogram::build(&[0.0, 1.0, 2.0, 3.0, 4.0], 4).unwrap();
    /// assert_eq!(h.counts, vec![1, 1, 1, 2]);
    /// assert_eq!(h.labels, vec!["0", "1", "2", "3"]);
    /// ```
    pub fn build(sorted: &[f64], bins: usize) -> Result<Self, SimulationError> {
        if bins == 0 {
            return Err(SimulationError::InvalidParameter {
                name: "bins",
                value: "must be at least 1".to_string(),
            });
        }
        let (min, max) = match (sorted.first(), sorted.last()) {
            (Some(&min), Some(&max)) => (min, max),
            _ => return Err(SimulationError::EmptySample),
        };
        let range = max - min;
        if range <= 0.0 {
            return Err(SimulationError::DegenerateRange { value: min });
        }
        let bin_width = range / bins as f64;

        let mut counts = vec![0usize; bins];
        for &price in sorted {
            let index = ((price - min) / bin_width).floor() as usize;
            counts[index.min(bins - 1)] += 1;
        }

        let labels = (0..bins)
            .map(|i| format!("{:.0}", min + i as f64 * bin_width))
            .collect();

        Ok(Self {
            labels,
            counts,
            lower: min,
            bin_width,
        })
    }

    /// Total number of samples across buckets.
    pub fn total(&self) -> usize {
        self.counts.iter().sum()
    }

    /// Index of the most populated bucket (first one on ties).
    pub fn mode_bucket(&self) -> Option<usize> {
        self.counts
            .iter()
            .enumerate()
            .max_by(|(ia, a), (ib, b)| a.cmp(b).then(ib.cmp(ia)))
            .map(|(i, _)| i)
    }
}
