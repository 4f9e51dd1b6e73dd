//! Rayon-based parallelisation utilities.
//!
//! The sensitivity grid (parameters × levels) is embarrassingly parallel:
//! every cell reads the shared baseline and builds its own perturbed copy.
//! These helpers fan the grid out over Rayon while keeping results in grid
//! order, so a parallel run is indistinguishable from a sequential one.

use rayon::prelude::*;

/// Minimum number of grid cells handed to one Rayon task.
pub const DEFAULT_BATCH_SIZE: usize = 4;

/// Fallible map that runs in parallel when the item count warrants it.
///
/// Results come back in input order. When several items fail, the error of
/// the first failing item (in input order) is returned, matching a
/// sequential `collect`.
pub fn try_parallel_map<T, R, E, F>(items: &[T], config: &ParallelConfig, mapper: F) -> Result<Vec<R>, E>
where
    T: Sync,
    R: Send,
    E: Send,
    F: Fn(&T) -> Result<R, E> + Sync + Send,
{
    if config.should_parallelize(items.len()) {
        let results: Vec<Result<R, E>> = items
            .par_iter()
            .with_min_len(config.batch_size)
            .map(mapper)
            .collect();
        results.into_iter().collect()
    } else {
        items.iter().map(mapper).collect()
    }
}

/// Configuration for parallel execution.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ParallelConfig {
    /// Minimum grid cells per Rayon task
    pub batch_size: usize,
    /// Minimum grid cells before using parallelism
    pub parallel_threshold: usize,
}

impl Default for ParallelConfig {
    fn default() -> Self {
        Self {
            batch_size: DEFAULT_BATCH_SIZE,
            parallel_threshold: 32,
        }
    }
}

impl ParallelConfig {
    /// Creates a new parallel configuration.
    pub fn new(batch_size: usize, parallel_threshold: usize) -> Self {
        Self {
            batch_size: batch_size.max(1),
            parallel_threshold,
        }
    }

    /// Configuration that always fans out, whatever the grid size.
    pub fn always() -> Self {
        Self::new(1, 0)
    }

    /// Returns whether to use parallel processing for the given item count.
    #[inline]
    pub fn should_parallelize(&self, n_items: usize) -> bool {
        n_items >= self.parallel_threshold
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parallel_config_default() {
        let config = ParallelConfig::default();
        assert_eq!(config.batch_size, DEFAULT_BATCH_SIZE);
        assert_eq!(config.parallel_threshold, 32);
    }

    #[test]
    fn test_should_parallelize() {
        let config = ParallelConfig::default();
        assert!(!config.should_parallelize(10));
        assert!(config.should_parallelize(32));
        assert!(ParallelConfig::always().should_parallelize(0));
    }

    #[test]
    fn test_batch_size_is_at_least_one() {
        assert_eq!(ParallelConfig::new(0, 10).batch_size, 1);
    }

    #[test]
    fn test_try_parallel_map_keeps_order() {
        let items: Vec<i32> = (0..200).collect();
        let doubled: Result<Vec<i32>, String> =
            try_parallel_map(&items, &ParallelConfig::always(), |&x| Ok(x * 2));
        let doubled = doubled.unwrap();
        assert_eq!(doubled.len(), 200);
        assert_eq!(doubled[150], 300);
    }

    #[test]
    fn test_try_parallel_map_reports_first_error() {
        let items: Vec<i32> = (0..200).collect();
        let result: Result<Vec<i32>, i32> = try_parallel_map(&items, &ParallelConfig::always(), |&x| {
            if x % 50 == 49 {
                Err(x)
            } else {
                Ok(x)
            }
        });
        assert_eq!(result, Err(49));
    }
}
