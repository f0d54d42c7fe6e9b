//! Guarded arithmetic shared by every engine.
//!
//! Historical statements routinely contain zero denominators (no debt, no
//! interest expense, no inventory), so every ratio goes through [`safe_div`]
//! rather than raw `/`.

/// Divides `numerator` by `denominator`, returning `default` when the
/// denominator is exactly zero.
///
/// # Examples
///
/// ```rust
/// use valuation_core::math::safe_div;
///
/// assert_eq!(safe_div(10.0, 4.0, 0.0), 2.5);
/// assert_eq!(safe_div(10.0, 0.0, 0.0), 0.0);
/// assert_eq!(safe_div(10.0, 0.0, -1.0), -1.0);
/// ```
#[inline]
pub fn safe_div(numerator: f64, denominator: f64, default: f64) -> f64 {
    if denominator == 0.0 {
        default
    } else {
        numerator / denominator
    }
}

/// Arithmetic mean of a slice, `None` when empty.
#[inline]
pub fn mean(values: &[f64]) -> Option<f64> {
    if values.is_empty() {
        None
    } else {
        Some(values.iter().sum::<f64>() / values.len() as f64)
    }
}
