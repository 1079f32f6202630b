//! Aggregation of per-trial samples into summary statistics.
//!
//! [`PercolationStats`] owns the ordered samples recorded by the most recent
//! run. Every statistic is a symmetric function of the samples, so the order in
//! which parallel workers deliver their batches does not matter.

use std::{fmt, num::NonZeroUsize};

use tracing::{info, instrument};

use crate::{
    Result,
    disjoint_set::UnionFindStrategy,
    error::PercolationError,
    experiment::{Plan, collect_parallel, collect_sequential},
};

/// z-score of the two-sided 95% Gaussian confidence interval.
const CONFIDENCE_95: f64 = 1.96;

/// Samples recorded by a Monte-Carlo percolation experiment.
///
/// # Examples
/// ```
/// use percolation_core::{PercolationStats, UnionFindStrategy};
///
/// let mut stats = PercolationStats::new();
/// stats.run(1, 5, UnionFindStrategy::QuickUnion)?;
/// assert_eq!(stats.samples(), &[1.0; 5]);
/// assert_eq!(stats.mean()?, 1.0);
/// # Ok::<(), percolation_core::PercolationError>(())
/// ```
#[derive(Clone, Debug, Default, PartialEq)]
pub struct PercolationStats {
    samples: Vec<f64>,
}

impl PercolationStats {
    /// Creates an empty set of statistics.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Wraps previously collected samples.
    ///
    /// # Examples
    /// ```
    /// use percolation_core::PercolationStats;
    ///
    /// let stats = PercolationStats::from_samples(vec![0.5, 0.6, 0.7]);
    /// assert!((stats.mean()? - 0.6).abs() < 1e-12);
    /// assert!((stats.stddev()? - 0.1).abs() < 1e-12);
    /// # Ok::<(), percolation_core::PercolationError>(())
    /// ```
    #[must_use]
    pub fn from_samples(samples: Vec<f64>) -> Self {
        Self { samples }
    }

    /// Returns the recorded samples.
    #[must_use]
    pub fn samples(&self) -> &[f64] {
        &self.samples
    }

    /// Returns the number of recorded samples.
    #[must_use]
    pub fn sample_count(&self) -> usize {
        self.samples.len()
    }

    /// Runs `trials` sequential trials on a `grid_size × grid_size` grid,
    /// replacing any previously recorded samples.
    ///
    /// # Errors
    /// Returns [`PercolationError::InvalidGridSize`] or
    /// [`PercolationError::InvalidTrialCount`] for zero arguments. No samples
    /// are kept when a run fails.
    #[instrument(
        name = "stats.run",
        err,
        skip(self),
        fields(strategy = %strategy),
    )]
    pub fn run(
        &mut self,
        grid_size: usize,
        trials: usize,
        strategy: UnionFindStrategy,
    ) -> Result<()> {
        self.samples.clear();
        let plan = Plan::validate(grid_size, trials, strategy, None)?;
        self.samples = collect_sequential(plan)?;
        self.log_completion();
        Ok(())
    }

    /// Runs `trials` trials split across `workers` parallel workers, replacing
    /// any previously recorded samples.
    ///
    /// Worker `k < workers - 1` runs `trials / workers` trials and the last
    /// worker also takes the remainder.
    ///
    /// # Errors
    /// Returns [`PercolationError::InvalidGridSize`],
    /// [`PercolationError::InvalidTrialCount`] or
    /// [`PercolationError::InvalidWorkerCount`] for zero arguments, and
    /// [`PercolationError::WorkerPool`] when the workers cannot be started.
    /// A failing worker fails the whole run and no samples are kept.
    #[instrument(
        name = "stats.run_parallel",
        err,
        skip(self),
        fields(strategy = %strategy),
    )]
    pub fn run_parallel(
        &mut self,
        grid_size: usize,
        trials: usize,
        workers: usize,
        strategy: UnionFindStrategy,
    ) -> Result<()> {
        self.samples.clear();
        let plan = Plan::validate(grid_size, trials, strategy, None)?;
        let workers =
            NonZeroUsize::new(workers).ok_or(PercolationError::InvalidWorkerCount { got: workers })?;
        self.samples = collect_parallel(plan, workers)?;
        self.log_completion();
        Ok(())
    }

    /// Returns the sample mean.
    ///
    /// # Errors
    /// Returns [`PercolationError::InsufficientSamples`] when no samples are
    /// recorded.
    pub fn mean(&self) -> Result<f64> {
        self.require(1)?;
        Ok(self.samples.iter().sum::<f64>() / self.samples.len() as f64)
    }

    /// Returns the sample standard deviation (denominator `count - 1`).
    ///
    /// # Errors
    /// Returns [`PercolationError::InsufficientSamples`] when fewer than two
    /// samples are recorded.
    pub fn stddev(&self) -> Result<f64> {
        self.require(2)?;
        let mean = self.mean()?;
        let squares: f64 = self
            .samples
            .iter()
            .map(|sample| (sample - mean).powi(2))
            .sum();
        Ok((squares / (self.samples.len() - 1) as f64).sqrt())
    }

    /// Returns the 95% confidence interval `mean ± 1.96·stddev/√count` as
    /// `(low, high)`.
    ///
    /// # Errors
    /// Returns [`PercolationError::InsufficientSamples`] when fewer than two
    /// samples are recorded.
    pub fn confidence_interval(&self) -> Result<(f64, f64)> {
        let mean = self.mean()?;
        let stddev = self.stddev()?;
        let margin = CONFIDENCE_95 * stddev / (self.samples.len() as f64).sqrt();
        Ok((mean - margin, mean + margin))
    }

    /// Computes every statistic at once for rendering.
    ///
    /// # Errors
    /// Returns [`PercolationError::InsufficientSamples`] when fewer than two
    /// samples are recorded.
    ///
    /// # Examples
    /// ```
    /// use percolation_core::PercolationStats;
    ///
    /// let summary = PercolationStats::from_samples(vec![0.5, 0.5]).summary()?;
    /// assert_eq!(
    ///     summary.to_string(),
    ///     "mean = 0.5\nstddev = 0\n95% confidence interval = 0.5, 0.5\n",
    /// );
    /// # Ok::<(), percolation_core::PercolationError>(())
    /// ```
    pub fn summary(&self) -> Result<Summary> {
        let (low, high) = self.confidence_interval()?;
        Ok(Summary {
            mean: self.mean()?,
            stddev: self.stddev()?,
            low,
            high,
        })
    }

    fn require(&self, required: usize) -> Result<()> {
        if self.samples.len() < required {
            return Err(PercolationError::InsufficientSamples {
                required,
                available: self.samples.len(),
            });
        }
        Ok(())
    }

    fn log_completion(&self) {
        match self.mean() {
            Ok(mean) => info!(samples = self.samples.len(), mean, "experiment completed"),
            Err(_) => info!(samples = self.samples.len(), "experiment completed"),
        }
    }
}

/// Snapshot of the statistics of one experiment.
///
/// Its [`fmt::Display`] output is three lines consumed by downstream tooling:
///
/// ```text
/// mean = <float>
/// stddev = <float>
/// 95% confidence interval = <low>, <high>
/// ```
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Summary {
    /// Sample mean.
    pub mean: f64,
    /// Sample standard deviation.
    pub stddev: f64,
    /// Lower bound of the 95% confidence interval.
    pub low: f64,
    /// Upper bound of the 95% confidence interval.
    pub high: f64,
}

impl fmt::Display for Summary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "mean = {}", self.mean)?;
        writeln!(f, "stddev = {}", self.stddev)?;
        writeln!(f, "95% confidence interval = {}, {}", self.low, self.high)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use rstest::rstest;

    const TOLERANCE: f64 = 1e-12;

    #[test]
    fn known_samples_yield_expected_statistics() {
        let stats = PercolationStats::from_samples(vec![0.5, 0.6, 0.7]);
        assert!((stats.mean().expect("one sample suffices") - 0.6).abs() < TOLERANCE);
        assert!((stats.stddev().expect("three samples suffice") - 0.1).abs() < TOLERANCE);

        let (low, high) = stats.confidence_interval().expect("three samples suffice");
        let margin = 1.96 * 0.1 / 3f64.sqrt();
        assert!((low - (0.6 - margin)).abs() < TOLERANCE);
        assert!((high - (0.6 + margin)).abs() < TOLERANCE);
    }

    #[test]
    fn statistics_ignore_sample_order() {
        let forward = PercolationStats::from_samples(vec![0.1, 0.4, 0.9, 0.2]);
        let reversed = PercolationStats::from_samples(vec![0.2, 0.9, 0.4, 0.1]);
        let (left, right) = (
            forward.summary().expect("enough samples"),
            reversed.summary().expect("enough samples"),
        );
        assert!((left.mean - right.mean).abs() < TOLERANCE);
        assert!((left.stddev - right.stddev).abs() < TOLERANCE);
    }

    #[test]
    fn empty_samples_have_no_statistics() {
        let stats = PercolationStats::new();
        let expected = PercolationError::InsufficientSamples {
            required: 1,
            available: 0,
        };
        assert_eq!(stats.mean(), Err(expected));
        assert!(matches!(
            stats.stddev(),
            Err(PercolationError::InsufficientSamples { available: 0, .. })
        ));
        assert!(stats.confidence_interval().is_err());
    }

    #[test]
    fn single_sample_has_mean_but_no_spread() {
        let stats = PercolationStats::from_samples(vec![0.42]);
        assert!((stats.mean().expect("one sample suffices") - 0.42).abs() < TOLERANCE);
        let expected = PercolationError::InsufficientSamples {
            required: 2,
            available: 1,
        };
        assert_eq!(stats.stddev(), Err(expected.clone()));
        assert_eq!(stats.confidence_interval(), Err(expected.clone()));
        assert_eq!(stats.summary(), Err(expected));
    }

    #[test]
    fn summary_renders_three_lines() {
        let summary = Summary {
            mean: 0.59,
            stddev: 0.01,
            low: 0.58,
            high: 0.6,
        };
        assert_eq!(
            summary.to_string(),
            "mean = 0.59\nstddev = 0.01\n95% confidence interval = 0.58, 0.6\n"
        );
    }

    #[rstest]
    #[case::quick_find(UnionFindStrategy::QuickFind)]
    #[case::quick_union(UnionFindStrategy::QuickUnion)]
    fn single_cell_runs_always_fill_the_grid(#[case] strategy: UnionFindStrategy) {
        let mut stats = PercolationStats::new();
        stats.run(1, 5, strategy).expect("run must succeed");
        assert_eq!(stats.samples(), &[1.0; 5]);

        stats.run_parallel(1, 5, 2, strategy).expect("run must succeed");
        assert_eq!(stats.samples(), &[1.0; 5]);
    }

    #[rstest]
    #[case(0, 5, 2, PercolationError::InvalidGridSize { got: 0 })]
    #[case(5, 0, 2, PercolationError::InvalidTrialCount { got: 0 })]
    #[case(5, 5, 0, PercolationError::InvalidWorkerCount { got: 0 })]
    fn parallel_run_rejects_zero_arguments(
        #[case] grid_size: usize,
        #[case] trials: usize,
        #[case] workers: usize,
        #[case] expected: PercolationError,
    ) {
        let mut stats = PercolationStats::from_samples(vec![0.5, 0.6]);
        let err = stats
            .run_parallel(grid_size, trials, workers, UnionFindStrategy::QuickUnion)
            .expect_err("zero arguments must fail");
        assert_eq!(err, expected);
        assert_eq!(stats.sample_count(), 0);
    }

    #[test]
    fn run_replaces_previous_samples() {
        let mut stats = PercolationStats::from_samples(vec![0.1; 7]);
        stats
            .run(3, 4, UnionFindStrategy::QuickFind)
            .expect("run must succeed");
        assert_eq!(stats.sample_count(), 4);
        assert!(stats.samples().iter().all(|&sample| sample > 0.0 && sample <= 1.0));
    }

    #[test]
    fn parallel_run_collects_every_trial() {
        let mut stats = PercolationStats::new();
        stats
            .run_parallel(4, 10, 3, UnionFindStrategy::QuickUnion)
            .expect("run must succeed");
        assert_eq!(stats.sample_count(), 10);
    }
}
