//! Rayon-based parallelisation utilities.
//!
//! Scenario batches are small (tens of items) but each item is a full Monte
//! Carlo run, so parallelism pays off from a handful of scenarios onwards.

use rayon::prelude::*;

/// Batches shorter than this run on the calling thread.
pub const DEFAULT_PARALLEL_THRESHOLD: usize = 2;

/// Maps `(position, item)` on the rayon pool; results come back in input
/// order, so position `i` can key a per-scenario random stream.
pub fn parallel_map_indexed<T, R, F>(items: &[T], mapper: F) -> Vec<R>
where
    T: Sync,
    R: Send,
    F: Fn(usize, &T) -> R + Sync + Send,
{
    items
        .par_iter()
        .enumerate()
        .map(|(index, item)| mapper(index, item))
        .collect()
}

/// When a scenario batch is worth spreading over threads.
#[derive(Clone, Debug)]
pub struct ParallelConfig {
    /// Smallest batch that goes to the pool
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
    /// Uses a custom threshold.
    pub fn new(parallel_threshold: usize) -> Self {
        Self { parallel_threshold }
    }

    /// `true` when `n_items` scenarios should run in parallel.
    #[inline]
    pub fn should_parallelize(&self, n_items: usize) -> bool {
        n_items >= self.parallel_threshold
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parallel_map_indexed_keeps_order() {
        let items: Vec<i32> = (0..100).collect();
        let tagged: Vec<(usize, i32)> = parallel_map_indexed(&items, |i, &x| (i, x * 2));

        assert_eq!(tagged.len(), 100);
        assert_eq!(tagged[50], (50, 100));
        assert!(tagged.iter().enumerate().all(|(i, &(j, _))| i == j));
    }

    #[test]
    fn test_should_parallelize() {
        let config = ParallelConfig::default();
        assert!(!config.should_parallelize(1));
        assert!(config.should_parallelize(2));
        assert!(!ParallelConfig::new(10).should_parallelize(9));
    }
}
