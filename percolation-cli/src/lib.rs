//! Support library for the `percolation` binary.
//!
//! Exposes the command pipeline and logging setup so doctests and unit tests
//! can drive experiments without spawning a subprocess.

pub mod cli;
pub mod logging;
