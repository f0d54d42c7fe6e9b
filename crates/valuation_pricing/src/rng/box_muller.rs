//! Box-Muller transform.

use std::f64::consts::PI;

use super::UniformSource;

/// Draws a uniform in the open interval `(0, 1)`, redrawing exact zeros.
#[inline]
fn open_uniform<R: UniformSource + ?Sized>(rng: &mut R) -> f64 {
    loop {
        let u = rng.next_uniform();
        if u != 0.0 {
            return u;
        }
    }
}

/// Draws one standard normal variate, `z = sqrt(-2 ln u) * cos(2 pi v)`.
///
/// Consumes two non-zero uniforms (`u` then `v`).
///
/// # Examples
///
/// ```rust
/// use valuation_pricing::rng::{standard_normal, ReplaySource};
///
/// // u = e^-0.5 gives sqrt(-2 ln u) = 1; v = 0.5 gives cos(pi) = -1
/// let mut source = ReplaySource::new(vec![(-0.5f64).exp(), 0.5]);
/// assert!((standard_normal(&mut source) + 1.0).abs() < 1e-12);
/// ```
#[inline]
pub fn standard_normal<R: UniformSource + ?Sized>(rng: &mut R) -> f64 {
    let u = open_uniform(rng);
    let v = open_uniform(rng);
    (-2.0 * u.ln()).sqrt() * (2.0 * PI * v).cos()
}

/// Draws three independent standard normal variates in order.
#[inline]
pub fn standard_normal_triple<R: UniformSource + ?Sized>(rng: &mut R) -> [f64; 3] {
    let z1 = standard_normal(rng);
    let z2 = standard_normal(rng);
    let z3 = standard_normal(rng);
    [z1, z2, z3]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rng::{ReplaySource, ValuationRng};
    use approx::assert_abs_diff_eq;

    #[test]
    fn test_zero_draws_are_skipped() {
        // Zeros are skipped for both u and v
        let mut source = ReplaySource::new(vec![0.0, (-0.5f64).exp(), 0.0, 0.25]);
        let z = standard_normal(&mut source);
        // cos(pi / 2) = 0
        assert_abs_diff_eq!(z, 0.0, epsilon = 1e-12);
        assert_eq!(source.draws(), 4);
    }

    #[test]
    fn test_known_value() {
        let u: f64 = 0.3;
        let v: f64 = 0.1;
        let mut source = ReplaySource::new(vec![u, v]);
        let expected = (-2.0 * u.ln()).sqrt() * (2.0 * PI * v).cos();
        assert_eq!(standard_normal(&mut source), expected);
    }

    #[test]
    fn test_triple_consumes_six_uniforms() {
        let mut source = ReplaySource::new(vec![0.5, 0.5, 0.4, 0.4, 0.3, 0.3]);
        let triple = standard_normal_triple(&mut source);
        assert_eq!(source.draws(), 6);
        assert!(triple.iter().all(|z| z.is_finite()));
    }

    #[test]
    fn test_sample_moments() {
        let mut rng = ValuationRng::from_seed(2024);
        let n = 200_000;
        let samples: Vec<f64> = (0..n).map(|_| standard_normal(&mut rng)).collect();
        let mean = samples.iter().sum::<f64>() / n as f64;
        let var = samples.iter().map(|z| (z - mean).powi(2)).sum::<f64>() / (n - 1) as f64;

        assert_abs_diff_eq!(mean, 0.0, epsilon = 0.01);
        assert_abs_diff_eq!(var, 1.0, epsilon = 0.02);
    }
}
