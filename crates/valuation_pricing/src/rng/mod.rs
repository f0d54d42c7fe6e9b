//! # Random Number Generation Infrastructure
//!
//! The Monte Carlo sampler never creates its own randomness. Callers hand it
//! a [`UniformSource`], which makes every simulation reproducible on demand:
//!
//! - [`ValuationRng`]: seeded (or entropy-seeded) wrapper around `rand::StdRng`
//! - [`ReplaySource`]: cycles through a fixed list of uniforms, for tests that
//!   assert exact histogram output
//!
//! Standard normal variates are produced with the Box-Muller transform in
//! [`standard_normal`].
//!
//! ## Usage Example
//!
//! ```rust
//! use valuation_pricing::rng::{standard_normal, UniformSource, ValuationRng};
//!
//! let mut rng = ValuationRng::from_seed(12345);
//! let u = rng.next_uniform();
//! assert!(u >= 0.0 && u < 1.0);
//!
//! let z = standard_normal(&mut rng);
//! assert!(z.is_finite());
//! ```

mod box_muller;
mod prng;
mod replay;

pub use box_muller::{standard_normal, standard_normal_triple};
pub use prng::ValuationRng;
pub use replay::ReplaySource;

/// Source of uniform variates in `[0, 1)`.
///
/// Implementations may return exactly `0.0`; consumers that cannot accept a
/// zero (such as the Box-Muller transform) redraw.
pub trait UniformSource {
    /// Draws the next uniform variate in `[0, 1)`.
    fn next_uniform(&mut self) -> f64;
}

impl<S: UniformSource + ?Sized> UniformSource for &mut S {
    #[inline]
    fn next_uniform(&mut self) -> f64 {
        (**self).next_uniform()
    }
}
