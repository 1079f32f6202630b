//! Command implementations and argument parsing for the percolation CLI.

use std::io::{self, Write};
use std::time::Instant;

use clap::{Args, Parser, Subcommand, ValueEnum};
use percolation_core::{
    ExecutionStrategy, ExperimentBuilder, Percolation, PercolationError, Summary,
    UnionFindStrategy, run_trial_with_grid,
};
use rand::{SeedableRng, rngs::SmallRng};
use thiserror::Error;
use tracing::{Span, field, info, instrument};

const DEFAULT_GRID_SIZE: usize = 20;
const DEFAULT_TRIALS: usize = 100;
const DEFAULT_WORKERS: usize = 1;

/// Top-level CLI options parsed by [`clap`].
#[derive(Debug, Parser, Clone)]
#[command(
    name = "percolation",
    about = "Estimate the percolation threshold with Monte-Carlo trials."
)]
pub struct Cli {
    /// Command to execute.
    #[command(subcommand)]
    pub command: Command,
}

/// Supported CLI commands.
#[derive(Debug, Subcommand, Clone)]
pub enum Command {
    /// Run many trials and print the threshold statistics.
    Run(RunCommand),
    /// Run a single trial and print the final grid.
    Trial(TrialCommand),
}

/// Options accepted by the `run` command.
#[derive(Debug, Args, Clone)]
pub struct RunCommand {
    /// Side length of the square grid.
    #[arg(long, default_value_t = DEFAULT_GRID_SIZE)]
    pub size: usize,

    /// Number of independent trials.
    #[arg(long, default_value_t = DEFAULT_TRIALS)]
    pub trials: usize,

    /// Number of parallel workers; `1` runs sequentially.
    #[arg(long, default_value_t = DEFAULT_WORKERS)]
    pub workers: usize,

    /// Disjoint-set engine backing every grid.
    #[arg(long = "union-find", value_enum, default_value_t = UnionFindChoice::QuickUnion)]
    pub union_find: UnionFindChoice,

    /// Base seed for reproducible runs.
    #[arg(long)]
    pub seed: Option<u64>,
}

/// Options accepted by the `trial` command.
#[derive(Debug, Args, Clone)]
pub struct TrialCommand {
    /// Side length of the square grid.
    #[arg(long, default_value_t = DEFAULT_GRID_SIZE)]
    pub size: usize,

    /// Disjoint-set engine backing the grid.
    #[arg(long = "union-find", value_enum, default_value_t = UnionFindChoice::QuickUnion)]
    pub union_find: UnionFindChoice,

    /// Seed for a reproducible trial.
    #[arg(long)]
    pub seed: Option<u64>,
}

/// Disjoint-set engines selectable from the command line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum UnionFindChoice {
    /// Direct set labels.
    QuickFind,
    /// Union by rank with path compression.
    QuickUnion,
}

impl From<UnionFindChoice> for UnionFindStrategy {
    fn from(choice: UnionFindChoice) -> Self {
        match choice {
            UnionFindChoice::QuickFind => Self::QuickFind,
            UnionFindChoice::QuickUnion => Self::QuickUnion,
        }
    }
}

/// Errors surfaced while executing CLI commands.
#[derive(Debug, Error)]
pub enum CliError {
    /// Core experiment failed.
    #[error(transparent)]
    Core(#[from] PercolationError),
}

/// Outcome of executing a CLI command.
#[derive(Debug, Clone)]
pub enum ExecutionSummary {
    /// Statistics gathered by the `run` command.
    Experiment {
        /// Number of samples behind the statistics.
        samples: usize,
        /// Threshold statistics.
        summary: Summary,
    },
    /// Final state of the `trial` command.
    Trial {
        /// Open fraction at first percolation.
        fraction: f64,
        /// Grid at first percolation.
        grid: Percolation,
    },
}

/// Executes the CLI command represented by `cli`.
///
/// # Errors
/// Returns [`CliError`] when the configuration is invalid or the experiment
/// fails.
///
/// # Examples
/// ```
/// # use std::error::Error;
/// # use percolation_cli::cli::{Cli, Command, ExecutionSummary, RunCommand, UnionFindChoice, run_cli};
/// #
/// # fn main() -> Result<(), Box<dyn Error>> {
/// let cli = Cli {
///     command: Command::Run(RunCommand {
///         size: 1,
///         trials: 3,
///         workers: 1,
///         union_find: UnionFindChoice::QuickFind,
///         seed: None,
///     }),
/// };
/// let ExecutionSummary::Experiment { samples, summary } = run_cli(cli)? else {
///     panic!("run yields statistics");
/// };
/// assert_eq!(samples, 3);
/// assert_eq!(summary.mean, 1.0);
/// # Ok(())
/// # }
/// ```
#[instrument(
    name = "cli.run",
    err,
    skip(cli),
    fields(command = field::Empty),
)]
pub fn run_cli(cli: Cli) -> Result<ExecutionSummary, CliError> {
    let started = Instant::now();
    let summary = match cli.command {
        Command::Run(run) => {
            Span::current().record("command", field::display("run"));
            run_command(&run)?
        }
        Command::Trial(trial) => {
            Span::current().record("command", field::display("trial"));
            trial_command(&trial)?
        }
    };
    let elapsed = started.elapsed();
    info!(elapsed_ms = elapsed.as_secs_f64() * 1_000.0, "command completed");
    Ok(summary)
}

#[instrument(
    name = "cli.execute",
    err,
    skip(command),
    fields(size = command.size, trials = command.trials, workers = command.workers),
)]
pub(super) fn run_command(command: &RunCommand) -> Result<ExecutionSummary, CliError> {
    let experiment = ExperimentBuilder::new()
        .with_grid_size(command.size)
        .with_trials(command.trials)
        .with_union_find(command.union_find.into())
        .with_execution(execution_for(command.workers))
        .with_seed(command.seed)
        .build()?;

    let stats = experiment.run()?;
    let summary = stats.summary()?;
    Ok(ExecutionSummary::Experiment {
        samples: stats.sample_count(),
        summary,
    })
}

#[instrument(
    name = "cli.trial",
    err,
    skip(command),
    fields(size = command.size),
)]
pub(super) fn trial_command(command: &TrialCommand) -> Result<ExecutionSummary, CliError> {
    let mut rng = match command.seed {
        Some(seed) => SmallRng::seed_from_u64(seed),
        None => SmallRng::from_entropy(),
    };
    let outcome = run_trial_with_grid(command.size, command.union_find.into(), &mut rng)?;
    Ok(ExecutionSummary::Trial {
        fraction: outcome.fraction(),
        grid: outcome.into_grid(),
    })
}

pub(super) fn execution_for(workers: usize) -> ExecutionStrategy {
    if workers == 1 {
        ExecutionStrategy::Sequential
    } else {
        ExecutionStrategy::Parallel { workers }
    }
}

/// Renders `summary` to `writer`.
///
/// Experiment statistics use the three-line `mean`/`stddev`/`95% confidence
/// interval` format; trials print the open fraction followed by the grid.
///
/// # Errors
/// Returns [`io::Error`] if writing to the supplied writer fails.
///
/// # Examples
/// ```
/// # use std::error::Error;
/// # use percolation_cli::cli::{ExecutionSummary, render_summary};
/// # use percolation_core::Summary;
/// #
/// # fn main() -> Result<(), Box<dyn Error>> {
/// let summary = ExecutionSummary::Experiment {
///     samples: 2,
///     summary: Summary { mean: 0.5, stddev: 0.25, low: 0.25, high: 0.75 },
/// };
/// let mut buffer = Vec::new();
/// render_summary(&summary, &mut buffer)?;
/// assert_eq!(
///     String::from_utf8(buffer)?,
///     "mean = 0.5\nstddev = 0.25\n95% confidence interval = 0.25, 0.75\n",
/// );
/// # Ok(())
/// # }
/// ```
pub fn render_summary(summary: &ExecutionSummary, mut writer: impl Write) -> io::Result<()> {
    match summary {
        ExecutionSummary::Experiment { summary, .. } => write!(writer, "{summary}"),
        ExecutionSummary::Trial { fraction, grid } => {
            writeln!(writer, "open fraction = {fraction}")?;
            write!(writer, "{grid}")
        }
    }
}
