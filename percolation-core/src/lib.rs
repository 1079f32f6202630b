//! Percolation threshold estimation core library.
//!
//! Builds an `n × n` grid on top of a disjoint-set engine, opens random cells
//! until the top row connects to the bottom row, and aggregates the open
//! fractions of many independent trials into a mean, a standard deviation and
//! a 95% confidence interval.
#![cfg_attr(docsrs, feature(doc_cfg))]

mod builder;
mod disjoint_set;
mod error;
mod experiment;
mod percolation;
mod stats;
mod trial;

pub use crate::{
    builder::{ExecutionStrategy, Experiment, ExperimentBuilder},
    disjoint_set::{DisjointSet, QuickFind, QuickUnion, UnionFind, UnionFindStrategy},
    error::{
        DisjointSetError, DisjointSetErrorCode, PercolationError, PercolationErrorCode, Result,
    },
    experiment::partition_trials,
    percolation::Percolation,
    stats::{PercolationStats, Summary},
    trial::{TrialOutcome, run_trial, run_trial_with_grid},
};
