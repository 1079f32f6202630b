//! Command-line interface orchestration for the percolation estimator.
//!
//! `run` executes a Monte-Carlo experiment and prints its statistics; `trial`
//! executes a single trial and prints the grid at first percolation.

mod commands;

pub use commands::{
    Cli, CliError, Command, ExecutionSummary, RunCommand, TrialCommand, UnionFindChoice,
    render_summary, run_cli,
};
