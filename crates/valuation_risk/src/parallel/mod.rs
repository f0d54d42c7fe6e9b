//! Rayon-based parallelisation utilities.
//!
//! Valuation runs are independent and side-effect free, so any batch of
//! them can be mapped across the rayon pool. Small batches stay on the
//! calling thread; the cut-over is controlled by [`ParallelConfig`].

use rayon::prelude::*;

/// Default minimum item count before work moves to the rayon pool.
pub const DEFAULT_PARALLEL_THRESHOLD: usize = 100;

/// Maps `items` on the rayon pool, keeping input order.
pub fn parallel_map<T, R, F>(items: &[T], mapper: F) -> Vec<R>
where
    T: Sync,
    R: Send,
    F: Fn(&T) -> R + Sync + Send,
{
    items.par_iter().map(mapper).collect()
}

/// Cut-over between sequential and rayon execution.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ParallelConfig {
    /// Batch size from which valuations move to the rayon pool
    pub parallel_threshold: usize,
}

impl Default for ParallelConfig {
    fn default() -> Self {
        Self {
            parallel_threshold: DEFAULT_PARALLEL_THRESHOLD,
        }
    }
}

impl ParallelConfig {
    /// Configuration with an explicit threshold.
    pub fn new(parallel_threshold: usize) -> Self {
        Self { parallel_threshold }
    }

    /// Configuration that never leaves the calling thread.
    pub fn sequential() -> Self {
        Self {
            parallel_threshold: usize::MAX,
        }
    }

    /// Whether a batch of `n_items` runs on the rayon pool.
    #[inline]
    pub fn should_parallelize(&self, n_items: usize) -> bool {
        n_items >= self.parallel_threshold
    }

    /// Maps `items` through `mapper`, in parallel when the batch is large
    /// enough. Output order always matches input order.
    pub fn map<T, R, F>(&self, items: &[T], mapper: F) -> Vec<R>
    where
        T: Sync,
        R: Send,
        F: Fn(&T) -> R + Sync + Send,
    {
        if self.should_parallelize(items.len()) {
            parallel_map(items, mapper)
        } else {
            items.iter().map(mapper).collect()
        }
    }
}
