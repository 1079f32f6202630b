//! Builder utilities for configuring percolation experiments.
//!
//! Exposes the execution strategy selection surface and the validation run
//! before constructing [`Experiment`] instances.

use std::num::NonZeroUsize;

use tracing::instrument;

use crate::{
    Result,
    disjoint_set::UnionFindStrategy,
    error::PercolationError,
    experiment::{Plan, collect_parallel, collect_sequential},
    stats::PercolationStats,
};

const DEFAULT_GRID_SIZE: usize = 20;
const DEFAULT_TRIALS: usize = 100;

/// Indicates how an [`Experiment`] schedules its trials.
///
/// # Examples
/// ```
/// use percolation_core::ExecutionStrategy;
///
/// let strategy = ExecutionStrategy::Parallel { workers: 4 };
/// assert_eq!(strategy.workers(), 4);
/// assert_eq!(ExecutionStrategy::Sequential.workers(), 1);
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ExecutionStrategy {
    /// Run every trial on the calling thread.
    #[default]
    Sequential,
    /// Split trials across a fixed number of independent workers.
    Parallel {
        /// Number of workers; must be at least one.
        workers: usize,
    },
}

impl ExecutionStrategy {
    /// Returns the number of workers the strategy uses.
    #[must_use]
    pub const fn workers(self) -> usize {
        match self {
            Self::Sequential => 1,
            Self::Parallel { workers } => workers,
        }
    }
}

/// Configures and constructs [`Experiment`] instances.
///
/// # Examples
/// ```
/// use percolation_core::{ExecutionStrategy, ExperimentBuilder, UnionFindStrategy};
///
/// let experiment = ExperimentBuilder::new()
///     .with_grid_size(8)
///     .with_trials(12)
///     .with_union_find(UnionFindStrategy::QuickFind)
///     .with_execution(ExecutionStrategy::Parallel { workers: 3 })
///     .with_seed(Some(5))
///     .build()
///     .expect("builder configuration is valid");
/// assert_eq!(experiment.grid_size().get(), 8);
/// assert_eq!(experiment.trials().get(), 12);
/// ```
#[derive(Debug, Clone)]
pub struct ExperimentBuilder {
    grid_size: usize,
    trials: usize,
    union_find: UnionFindStrategy,
    execution: ExecutionStrategy,
    seed: Option<u64>,
}

impl Default for ExperimentBuilder {
    fn default() -> Self {
        Self {
            grid_size: DEFAULT_GRID_SIZE,
            trials: DEFAULT_TRIALS,
            union_find: UnionFindStrategy::default(),
            execution: ExecutionStrategy::default(),
            seed: None,
        }
    }
}

impl ExperimentBuilder {
    /// Creates a builder populated with default parameters.
    ///
    /// # Examples
    /// ```
    /// use percolation_core::{ExecutionStrategy, ExperimentBuilder, UnionFindStrategy};
    ///
    /// let builder = ExperimentBuilder::new();
    /// assert_eq!(builder.grid_size(), 20);
    /// assert_eq!(builder.trials(), 100);
    /// assert_eq!(builder.union_find(), UnionFindStrategy::QuickUnion);
    /// assert_eq!(builder.execution(), ExecutionStrategy::Sequential);
    /// assert_eq!(builder.seed(), None);
    /// ```
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Overrides the grid side length.
    #[must_use]
    pub fn with_grid_size(mut self, size: usize) -> Self {
        self.grid_size = size;
        self
    }

    /// Returns the configured grid side length.
    #[must_use]
    pub fn grid_size(&self) -> usize {
        self.grid_size
    }

    /// Overrides the number of trials.
    #[must_use]
    pub fn with_trials(mut self, trials: usize) -> Self {
        self.trials = trials;
        self
    }

    /// Returns the configured number of trials.
    #[must_use]
    pub fn trials(&self) -> usize {
        self.trials
    }

    /// Selects the disjoint-set engine backing every trial.
    #[must_use]
    pub fn with_union_find(mut self, strategy: UnionFindStrategy) -> Self {
        self.union_find = strategy;
        self
    }

    /// Returns the configured disjoint-set engine.
    #[must_use]
    pub fn union_find(&self) -> UnionFindStrategy {
        self.union_find
    }

    /// Sets how trials are scheduled.
    #[must_use]
    pub fn with_execution(mut self, execution: ExecutionStrategy) -> Self {
        self.execution = execution;
        self
    }

    /// Returns the configured execution strategy.
    #[must_use]
    pub fn execution(&self) -> ExecutionStrategy {
        self.execution
    }

    /// Fixes the base RNG seed; `None` draws fresh entropy for every run.
    #[must_use]
    pub fn with_seed(mut self, seed: Option<u64>) -> Self {
        self.seed = seed;
        self
    }

    /// Returns the configured base seed.
    #[must_use]
    pub fn seed(&self) -> Option<u64> {
        self.seed
    }

    /// Validates the configuration and constructs an [`Experiment`].
    ///
    /// # Errors
    /// Returns [`PercolationError::InvalidGridSize`],
    /// [`PercolationError::InvalidTrialCount`] or
    /// [`PercolationError::InvalidWorkerCount`] when the corresponding value is
    /// zero.
    ///
    /// # Examples
    /// ```
    /// use percolation_core::{ExperimentBuilder, PercolationError};
    ///
    /// let err = ExperimentBuilder::new().with_trials(0).build().unwrap_err();
    /// assert_eq!(err, PercolationError::InvalidTrialCount { got: 0 });
    /// ```
    pub fn build(self) -> Result<Experiment> {
        let plan = Plan::validate(self.grid_size, self.trials, self.union_find, self.seed)?;
        let workers = match self.execution {
            ExecutionStrategy::Sequential => None,
            ExecutionStrategy::Parallel { workers } => Some(
                NonZeroUsize::new(workers)
                    .ok_or(PercolationError::InvalidWorkerCount { got: workers })?,
            ),
        };
        Ok(Experiment { plan, workers })
    }
}

/// Validated experiment configuration ready to run.
#[derive(Debug, Clone)]
pub struct Experiment {
    plan: Plan,
    workers: Option<NonZeroUsize>,
}

impl Experiment {
    /// Returns the grid side length.
    #[must_use]
    pub fn grid_size(&self) -> NonZeroUsize {
        self.plan.grid_size
    }

    /// Returns the number of trials.
    #[must_use]
    pub fn trials(&self) -> NonZeroUsize {
        self.plan.trials
    }

    /// Returns the disjoint-set engine used by every trial.
    #[must_use]
    pub fn union_find(&self) -> UnionFindStrategy {
        self.plan.strategy
    }

    /// Returns how trials are scheduled.
    #[must_use]
    pub fn execution(&self) -> ExecutionStrategy {
        self.workers
            .map_or(ExecutionStrategy::Sequential, |workers| {
                ExecutionStrategy::Parallel {
                    workers: workers.get(),
                }
            })
    }

    /// Returns the base seed, if any.
    #[must_use]
    pub fn seed(&self) -> Option<u64> {
        self.plan.seed
    }

    /// Runs every trial and returns the collected statistics.
    ///
    /// With a seed, the samples are reproducible for a fixed configuration.
    ///
    /// # Errors
    /// Returns [`PercolationError::WorkerPool`] when parallel workers cannot
    /// be started.
    ///
    /// # Examples
    /// ```
    /// use percolation_core::ExperimentBuilder;
    ///
    /// let experiment = ExperimentBuilder::new()
    ///     .with_grid_size(5)
    ///     .with_trials(4)
    ///     .with_seed(Some(1))
    ///     .build()?;
    /// let first = experiment.run()?;
    /// let second = experiment.run()?;
    /// assert_eq!(first.samples(), second.samples());
    /// # Ok::<(), percolation_core::PercolationError>(())
    /// ```
    #[instrument(
        name = "experiment.run",
        err,
        skip(self),
        fields(
            grid_size = self.plan.grid_size.get(),
            trials = self.plan.trials.get(),
            workers = self.execution().workers(),
            strategy = %self.plan.strategy,
        ),
    )]
    pub fn run(&self) -> Result<PercolationStats> {
        let samples = match self.workers {
            None => collect_sequential(self.plan)?,
            Some(workers) => collect_parallel(self.plan, workers)?,
        };
        Ok(PercolationStats::from_samples(samples))
    }
}
