//! Deterministic uniform source replaying a fixed sequence.

use super::UniformSource;

/// Cycles through a fixed, non-empty list of uniforms.
///
/// # Examples
///
/// ```rust
/// use valuation_pricing::rng::{ReplaySource, UniformSource};
///
/// let mut source = ReplaySource::new(vec![0.25, 0.75]);
/// assert_eq!(source.next_uniform(), 0.25);
/// assert_eq!(source.next_uniform(), 0.75);
/// assert_eq!(source.next_uniform(), 0.25);
/// ```
#[derive(Clone, Debug)]
pub struct ReplaySource {
    values: Vec<f64>,
    position: usize,
}

impl ReplaySource {
    /// Creates a source from a list of uniforms in `[0, 1)`.
    ///
    /// # Panics
    ///
    /// Panics if `values` is empty.
    pub fn new(values: Vec<f64>) -> Self {
        assert!(!values.is_empty(), "replay sequence must not be empty");
        Self {
            values,
            position: 0,
        }
    }

    /// Number of draws served so far.
    #[inline]
    pub fn draws(&self) -> usize {
        self.position
    }
}

impl UniformSource for ReplaySource {
    #[inline]
    fn next_uniform(&mut self) -> f64 {
        let value = self.values[self.position % self.values.len()];
        self.position += 1;
        value
    }
}
