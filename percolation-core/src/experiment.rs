//! Sample collection for sequential and parallel experiments.
//!
//! Parallel runs split the trials statically across a dedicated Rayon pool.
//! Each worker owns its grid, engine and RNG and hands back its whole batch
//! once; the batches are concatenated after every worker has finished.

use std::num::NonZeroUsize;

use rand::{SeedableRng, rngs::SmallRng};
use rayon::{ThreadPoolBuilder, prelude::*};
use tracing::debug;

use crate::{Result, disjoint_set::UnionFindStrategy, error::PercolationError, trial::run_trial};

/// SplitMix64 increment (the 64-bit golden ratio) used for per-worker seed
/// derivation.
const WORKER_SEED_SPACING: u64 = 0x9E37_79B9_7F4A_7C15;
const SPLITMIX_MULT_A: u64 = 0xBF58_476D_1CE4_E5B9;
const SPLITMIX_MULT_B: u64 = 0x94D0_49BB_1331_11EB;

/// Shape of one experiment after validation.
#[derive(Clone, Copy, Debug)]
pub(crate) struct Plan {
    pub(crate) grid_size: NonZeroUsize,
    pub(crate) trials: NonZeroUsize,
    pub(crate) strategy: UnionFindStrategy,
    pub(crate) seed: Option<u64>,
}

impl Plan {
    pub(crate) fn validate(
        grid_size: usize,
        trials: usize,
        strategy: UnionFindStrategy,
        seed: Option<u64>,
    ) -> Result<Self> {
        let grid_size = NonZeroUsize::new(grid_size)
            .ok_or(PercolationError::InvalidGridSize { got: grid_size })?;
        let trials =
            NonZeroUsize::new(trials).ok_or(PercolationError::InvalidTrialCount { got: trials })?;
        Ok(Self {
            grid_size,
            trials,
            strategy,
            seed,
        })
    }
}

/// Splits `trials` into `workers` batch sizes.
///
/// Every worker receives `trials / workers` trials and the last worker also
/// takes the remainder, so `partition_trials(10, 3)` yields `[3, 3, 4]`.
/// Returns an empty vector when `workers` is zero.
///
/// # Examples
/// ```
/// use percolation_core::partition_trials;
///
/// assert_eq!(partition_trials(10, 3), vec![3, 3, 4]);
/// assert_eq!(partition_trials(2, 4), vec![0, 0, 0, 2]);
/// ```
#[must_use]
pub fn partition_trials(trials: usize, workers: usize) -> Vec<usize> {
    let Some(last) = workers.checked_sub(1) else {
        return Vec::new();
    };
    let share = trials / workers;
    let mut batches = vec![share; workers];
    batches[last] = trials - share * last;
    batches
}

pub(crate) fn collect_sequential(plan: Plan) -> Result<Vec<f64>> {
    run_batch(plan, 0, plan.trials.get())
}

pub(crate) fn collect_parallel(plan: Plan, workers: NonZeroUsize) -> Result<Vec<f64>> {
    let batches = partition_trials(plan.trials.get(), workers.get());
    let pool = ThreadPoolBuilder::new()
        .num_threads(workers.get())
        .thread_name(|index| format!("percolation-worker-{index}"))
        .build()
        .map_err(|error| PercolationError::WorkerPool {
            message: error.to_string(),
        })?;

    let results: Vec<Vec<f64>> = pool.install(|| {
        batches
            .par_iter()
            .enumerate()
            .map(|(worker, &count)| run_batch(plan, worker, count))
            .collect::<Result<_>>()
    })?;
    Ok(results.concat())
}

fn run_batch(plan: Plan, worker: usize, count: usize) -> Result<Vec<f64>> {
    let mut rng = worker_rng(plan.seed, worker);
    let samples = (0..count)
        .map(|_| run_trial(plan.grid_size.get(), plan.strategy, &mut rng))
        .collect::<Result<Vec<_>>>()?;
    debug!(worker, trials = count, "worker batch completed");
    Ok(samples)
}

fn worker_rng(seed: Option<u64>, worker: usize) -> SmallRng {
    match seed {
        Some(seed) => SmallRng::seed_from_u64(mix_worker_seed(seed, worker)),
        None => SmallRng::from_entropy(),
    }
}

#[inline]
fn mix_worker_seed(base_seed: u64, worker_index: usize) -> u64 {
    splitmix64(base_seed ^ ((worker_index as u64 + 1).wrapping_mul(WORKER_SEED_SPACING)))
}

#[inline]
fn splitmix64(mut state: u64) -> u64 {
    state = state.wrapping_add(WORKER_SEED_SPACING);
    state = (state ^ (state >> 30)).wrapping_mul(SPLITMIX_MULT_A);
    state = (state ^ (state >> 27)).wrapping_mul(SPLITMIX_MULT_B);
    state ^ (state >> 31)
}
