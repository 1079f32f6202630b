//! Single-trial benchmarks.
//!
//! Opens random cells until the grid percolates, comparing the quick-find and
//! quick-union engines across a doubling ladder of grid sizes.
#![expect(
    missing_docs,
    reason = "Criterion macros generate items without doc comments"
)]
#![expect(
    clippy::shadow_reuse,
    reason = "Criterion bench_with_input closures rebind parameter names"
)]
use criterion::{BenchmarkId, Criterion, criterion_group, criterion_main};

use percolation_benches::{
    STRATEGIES, error::BenchSetupError, grid_sizes, params::TrialBenchParams, seeded_rng,
};
use percolation_core::run_trial;

/// Grid sizes 5, 10, 20 and 40.
const LADDER_STEPS: usize = 4;

fn trial_impl(c: &mut Criterion) -> Result<(), BenchSetupError> {
    let mut group = c.benchmark_group("trial");
    group.sample_size(30);

    for grid_size in grid_sizes(LADDER_STEPS)? {
        for strategy in STRATEGIES {
            // Fail fast on setup errors instead of inside the timed loop.
            run_trial(grid_size, strategy, &mut seeded_rng())?;

            let params = TrialBenchParams {
                grid_size,
                strategy,
            };
            group.bench_with_input(BenchmarkId::from_parameter(params), &params, |b, params| {
                let mut rng = seeded_rng();
                b.iter(|| run_trial(params.grid_size, params.strategy, &mut rng));
            });
        }
    }

    group.finish();
    Ok(())
}

fn trial(c: &mut Criterion) {
    if let Err(err) = trial_impl(c) {
        panic!("trial benchmark setup failed: {err}");
    }
}

criterion_group!(benches, trial);
criterion_main!(benches);
