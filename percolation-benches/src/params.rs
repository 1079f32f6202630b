//! Benchmark parameter types.
//!
//! Each struct renders as a compact Criterion parameter label.

use std::fmt;

use percolation_core::UnionFindStrategy;

/// Parameters for a single-trial benchmark.
#[derive(Clone, Copy, Debug)]
pub struct TrialBenchParams {
    /// Grid side length.
    pub grid_size: usize,
    /// Disjoint-set engine.
    pub strategy: UnionFindStrategy,
}

impl fmt::Display for TrialBenchParams {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/n={}", self.strategy, self.grid_size)
    }
}

/// Parameters for a full experiment benchmark.
#[derive(Clone, Copy, Debug)]
pub struct ExperimentBenchParams {
    /// Grid side length.
    pub grid_size: usize,
    /// Trials per experiment.
    pub trials: usize,
    /// Worker threads; `1` means sequential.
    pub workers: usize,
}

impl fmt::Display for ExperimentBenchParams {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "n={},t={},w={}",
            self.grid_size, self.trials, self.workers
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn trial_params_label_names_strategy_and_size() {
        let params = TrialBenchParams {
            grid_size: 20,
            strategy: UnionFindStrategy::QuickFind,
        };
        assert_eq!(params.to_string(), "quick-find/n=20");
    }

    #[test]
    fn experiment_params_label_lists_every_knob() {
        let params = ExperimentBenchParams {
            grid_size: 10,
            trials: 200,
            workers: 4,
        };
        assert_eq!(params.to_string(), "n=10,t=200,w=4");
    }
}
