//! Benchmark support crate for the percolation estimator.
//!
//! Provides the grid-size ladder, seeded random sources and parameter types
//! shared by the Criterion benchmarks for single trials and full experiments.

pub mod error;
pub mod params;

use percolation_core::UnionFindStrategy;
use rand::{SeedableRng, rngs::SmallRng};

use crate::error::BenchSetupError;

/// Seed used by every benchmark so runs compare like with like.
pub const SEED: u64 = 42;

/// Smallest grid side length in the ladder.
pub const BASE_GRID_SIZE: usize = 5;

/// Both disjoint-set engines, in reporting order.
pub const STRATEGIES: [UnionFindStrategy; 2] =
    [UnionFindStrategy::QuickFind, UnionFindStrategy::QuickUnion];

/// Returns `steps` grid sizes doubling from [`BASE_GRID_SIZE`]: `5, 10, 20, …`.
///
/// # Errors
/// Returns [`BenchSetupError::ZeroValue`] when `steps` is zero and
/// [`BenchSetupError::GridTooLarge`] when a size would overflow `usize`.
///
/// # Examples
/// ```
/// use percolation_benches::grid_sizes;
///
/// assert_eq!(grid_sizes(4)?, vec![5, 10, 20, 40]);
/// # Ok::<(), percolation_benches::error::BenchSetupError>(())
/// ```
pub fn grid_sizes(steps: usize) -> Result<Vec<usize>, BenchSetupError> {
    if steps == 0 {
        return Err(BenchSetupError::ZeroValue {
            context: "grid size steps",
        });
    }
    let mut sizes = Vec::with_capacity(steps);
    let mut size = BASE_GRID_SIZE;
    for step in 0..steps {
        sizes.push(size);
        if step.saturating_add(1) < steps {
            size = size
                .checked_mul(2)
                .ok_or(BenchSetupError::GridTooLarge { step })?;
        }
    }
    Ok(sizes)
}

/// Returns a fresh generator seeded with [`SEED`].
#[must_use]
pub fn seeded_rng() -> SmallRng {
    SmallRng::seed_from_u64(SEED)
}
