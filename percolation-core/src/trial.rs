//! Single Monte-Carlo trial: open random cells until the grid percolates.

use rand::Rng;

use crate::{Percolation, Result, disjoint_set::UnionFindStrategy};

/// Final state of one trial.
#[derive(Clone, Debug)]
pub struct TrialOutcome {
    grid: Percolation,
    fraction: f64,
}

impl TrialOutcome {
    /// Fraction of cells that were open when the grid first percolated.
    #[must_use]
    pub fn fraction(&self) -> f64 {
        self.fraction
    }

    /// Grid as it stood when the trial finished.
    #[must_use]
    pub fn grid(&self) -> &Percolation {
        &self.grid
    }

    /// Consumes the outcome and returns the final grid.
    #[must_use]
    pub fn into_grid(self) -> Percolation {
        self.grid
    }
}

/// Runs one trial and returns the open-cell fraction at first percolation.
///
/// # Errors
/// Returns [`crate::PercolationError::InvalidGridSize`] when `size` is zero.
///
/// # Examples
/// ```
/// use percolation_core::{UnionFindStrategy, run_trial};
/// use rand::{SeedableRng, rngs::SmallRng};
///
/// let mut rng = SmallRng::seed_from_u64(7);
/// let fraction = run_trial(8, UnionFindStrategy::QuickUnion, &mut rng)?;
/// assert!(fraction > 0.0 && fraction <= 1.0);
/// # Ok::<(), percolation_core::PercolationError>(())
/// ```
pub fn run_trial<R: Rng>(
    size: usize,
    strategy: UnionFindStrategy,
    rng: &mut R,
) -> Result<f64> {
    run_trial_with_grid(size, strategy, rng).map(|outcome| outcome.fraction)
}

/// Runs one trial and keeps the final grid alongside the open fraction.
///
/// Cells are drawn uniformly with replacement; drawing an already open cell
/// simply repeats a no-op. There is no iteration cap.
///
/// # Errors
/// Returns [`crate::PercolationError::InvalidGridSize`] when `size` is zero.
pub fn run_trial_with_grid<R: Rng>(
    size: usize,
    strategy: UnionFindStrategy,
    rng: &mut R,
) -> Result<TrialOutcome> {
    let mut grid = Percolation::new(size, strategy)?;
    while !grid.percolates()? {
        let row = rng.gen_range(0..size);
        let col = rng.gen_range(0..size);
        grid.open(row, col)?;
    }

    let fraction = grid.open_count() as f64 / (size * size) as f64;
    Ok(TrialOutcome { grid, fraction })
}

#[cfg(test)]
mod tests {
    use super::*;

    use rand::{SeedableRng, rngs::SmallRng};
    use rstest::rstest;

    use crate::PercolationError;

    #[rstest]
    #[case::quick_find(UnionFindStrategy::QuickFind)]
    #[case::quick_union(UnionFindStrategy::QuickUnion)]
    fn single_cell_trial_opens_everything(#[case] strategy: UnionFindStrategy) {
        let mut rng = SmallRng::seed_from_u64(1);
        let fraction = run_trial(1, strategy, &mut rng).expect("trial must succeed");
        assert!((fraction - 1.0).abs() < f64::EPSILON);
    }

    #[rstest]
    #[case(2)]
    #[case(5)]
    #[case(12)]
    fn trial_stops_at_first_percolation(#[case] size: usize) {
        let mut rng = SmallRng::seed_from_u64(size as u64);
        let outcome = run_trial_with_grid(size, UnionFindStrategy::QuickUnion, &mut rng)
            .expect("trial must succeed");
        let mut grid = outcome.grid().clone();
        assert!(grid.percolates().expect("virtual nodes in range"));
        // A path needs at least one open cell per row.
        assert!(grid.open_count() >= size);
        let expected = grid.open_count() as f64 / (size * size) as f64;
        assert!((outcome.fraction() - expected).abs() < f64::EPSILON);
    }

    #[test]
    fn seeded_trials_are_reproducible_across_strategies() {
        let mut left = SmallRng::seed_from_u64(99);
        let mut right = SmallRng::seed_from_u64(99);
        let quick_find = run_trial_with_grid(10, UnionFindStrategy::QuickFind, &mut left)
            .expect("trial must succeed");
        let quick_union = run_trial_with_grid(10, UnionFindStrategy::QuickUnion, &mut right)
            .expect("trial must succeed");
        assert!((quick_find.fraction() - quick_union.fraction()).abs() < f64::EPSILON);
        assert_eq!(
            quick_find.into_grid().to_string(),
            quick_union.into_grid().to_string()
        );
    }

    #[test]
    fn zero_size_trial_is_rejected() {
        let mut rng = SmallRng::seed_from_u64(0);
        let err = run_trial(0, UnionFindStrategy::QuickUnion, &mut rng)
            .expect_err("zero size must fail");
        assert_eq!(err, PercolationError::InvalidGridSize { got: 0 });
    }
}
