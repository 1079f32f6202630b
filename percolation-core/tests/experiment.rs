//! Tests for the experiment orchestration API.

use percolation_core::{
    ExecutionStrategy, ExperimentBuilder, PercolationError, PercolationStats, UnionFindStrategy,
};
use rstest::{fixture, rstest};
use tracing::Level;

use percolation_test_support::tracing::capture;

#[fixture]
fn seeded() -> ExperimentBuilder {
    ExperimentBuilder::new()
        .with_grid_size(6)
        .with_trials(10)
        .with_seed(Some(2024))
}

#[rstest]
fn builder_defaults() {
    let builder = ExperimentBuilder::new();
    let experiment = builder.clone().build().expect("defaults valid");
    assert_eq!(experiment.grid_size().get(), builder.grid_size());
    assert_eq!(experiment.trials().get(), builder.trials());
    assert_eq!(experiment.union_find(), UnionFindStrategy::QuickUnion);
    assert_eq!(experiment.execution(), ExecutionStrategy::Sequential);
    assert_eq!(experiment.seed(), None);
}

#[rstest]
#[case(ExperimentBuilder::new().with_grid_size(0), PercolationError::InvalidGridSize { got: 0 })]
#[case(ExperimentBuilder::new().with_trials(0), PercolationError::InvalidTrialCount { got: 0 })]
#[case(
    ExperimentBuilder::new().with_execution(ExecutionStrategy::Parallel { workers: 0 }),
    PercolationError::InvalidWorkerCount { got: 0 },
)]
fn builder_rejects_zero_values(
    #[case] builder: ExperimentBuilder,
    #[case] expected: PercolationError,
) {
    let err = builder.build().expect_err("zero values must be rejected");
    assert_eq!(err, expected);
}

#[rstest]
#[case::sequential(ExecutionStrategy::Sequential)]
#[case::parallel(ExecutionStrategy::Parallel { workers: 3 })]
fn seeded_runs_are_reproducible(seeded: ExperimentBuilder, #[case] execution: ExecutionStrategy) {
    let experiment = seeded
        .with_execution(execution)
        .build()
        .expect("configuration must be valid");
    let first = experiment.run().expect("run must succeed");
    let second = experiment.run().expect("run must succeed");
    assert_eq!(first.sample_count(), 10);
    assert_eq!(first, second);
}

#[rstest]
fn strategies_sample_identically_under_a_seed(seeded: ExperimentBuilder) {
    let quick_find = seeded
        .clone()
        .with_union_find(UnionFindStrategy::QuickFind)
        .build()
        .and_then(|experiment| experiment.run())
        .expect("run must succeed");
    let quick_union = seeded
        .with_union_find(UnionFindStrategy::QuickUnion)
        .build()
        .and_then(|experiment| experiment.run())
        .expect("run must succeed");
    assert_eq!(quick_find.samples(), quick_union.samples());
}

#[rstest]
fn parallel_run_splits_trials_across_workers() {
    let mut stats = PercolationStats::new();
    stats
        .run_parallel(5, 10, 3, UnionFindStrategy::QuickUnion)
        .expect("run must succeed");
    assert_eq!(stats.sample_count(), 10);
    assert_eq!(percolation_core::partition_trials(10, 3), vec![3, 3, 4]);

    let (low, high) = stats.confidence_interval().expect("ten samples suffice");
    let mean = stats.mean().expect("ten samples suffice");
    assert!(low <= mean && mean <= high);
}

#[rstest]
fn single_cell_experiment_samples_one() {
    let mut stats = PercolationStats::new();
    stats
        .run(1, 5, UnionFindStrategy::QuickUnion)
        .expect("run must succeed");
    assert_eq!(stats.samples(), &[1.0; 5]);
    let summary = stats.summary().expect("five samples suffice");
    assert_eq!(
        summary.to_string(),
        "mean = 1\nstddev = 0\n95% confidence interval = 1, 1\n"
    );
}

#[rstest]
fn mean_threshold_is_plausible() {
    let stats = ExperimentBuilder::new()
        .with_grid_size(20)
        .with_trials(60)
        .with_execution(ExecutionStrategy::Parallel { workers: 4 })
        .with_seed(Some(7))
        .build()
        .and_then(|experiment| experiment.run())
        .expect("run must succeed");
    let mean = stats.mean().expect("samples recorded");
    assert!((0.5..0.7).contains(&mean), "mean {mean} far from 0.593");
}

#[rstest]
fn run_emits_structured_span_and_completion_event() {
    let mut stats = PercolationStats::new();
    let (result, layer) = capture(|| stats.run(3, 4, UnionFindStrategy::QuickFind));
    result.expect("run must succeed");

    let run_span = layer.span("stats.run").expect("stats.run span must exist");
    assert_eq!(run_span.field("grid_size"), Some("3"));
    assert_eq!(run_span.field("trials"), Some("4"));
    assert_eq!(run_span.field("strategy"), Some("quick-find"));

    assert!(layer.events().iter().any(|event| {
        event.level == Level::INFO
            && event.field("message") == Some("experiment completed")
            && event.field("samples") == Some("4")
    }));
}

#[rstest]
fn failing_run_records_error() {
    let mut stats = PercolationStats::new();
    let (result, layer) =
        capture(|| stats.run_parallel(4, 4, 0, UnionFindStrategy::QuickUnion));
    let err = result.expect_err("zero workers must fail");
    assert_eq!(err, PercolationError::InvalidWorkerCount { got: 0 });

    assert!(layer.span("stats.run_parallel").is_some());
    assert!(layer.events().iter().any(|event| event.level == Level::ERROR));
}

#[rstest]
fn experiment_span_records_configuration(seeded: ExperimentBuilder) {
    let experiment = seeded
        .with_execution(ExecutionStrategy::Parallel { workers: 2 })
        .build()
        .expect("configuration must be valid");

    let (result, layer) = capture(|| experiment.run());
    result.expect("run must succeed");

    let span = layer
        .span("experiment.run")
        .expect("experiment.run span must exist");
    assert_eq!(span.field("workers"), Some("2"));
    assert_eq!(span.field("grid_size"), Some("6"));
    assert_eq!(span.field("strategy"), Some("quick-union"));
}
