//! Benchmark setup error type.
//!
//! Lets setup helpers propagate failures with `?`; the Criterion entry points
//! turn them into a single panic with context.

use percolation_core::PercolationError;

/// Errors that may occur during benchmark setup.
#[derive(Debug, thiserror::Error)]
pub enum BenchSetupError {
    /// Building or running an experiment failed.
    #[error("percolation setup failed: {0}")]
    Percolation(#[from] PercolationError),
    /// A zero value was passed where a non-zero integer was required.
    #[error("expected a non-zero value for {context}")]
    ZeroValue {
        /// The parameter that was unexpectedly zero.
        context: &'static str,
    },
    /// Doubling the grid size overflowed.
    #[error("grid size overflowed after {step} doublings")]
    GridTooLarge {
        /// Doubling step that overflowed.
        step: usize,
    },
}
