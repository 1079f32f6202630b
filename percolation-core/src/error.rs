//! Error types for the percolation core library.
//!
//! Defines error enums exposed by the public API and a convenient result alias.

use std::fmt;

use thiserror::Error;

macro_rules! define_error_codes {
    (
        $(#[$enum_meta:meta])*
        enum $CodeTy:ident for $ErrTy:ident {
            $(
                $(#[$variant_meta:meta])*
                $CodeVariant:ident => $ErrVariant:ident $( { $($pattern:tt)* } )? $( ( $($tuple:tt)* ) )? => $code:expr
            ),+ $(,)?
        }
    ) => {
        $(#[$enum_meta])*
        #[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
        #[non_exhaustive]
        pub enum $CodeTy {
            $(
                $(#[$variant_meta])*
                $CodeVariant,
            )+
        }

        impl $CodeTy {
            /// Return the stable machine-readable representation of this error code.
            #[must_use]
            pub const fn as_str(self) -> &'static str {
                match self {
                    $(Self::$CodeVariant => $code,)+
                }
            }
        }

        impl fmt::Display for $CodeTy {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.as_str())
            }
        }

        impl $ErrTy {
            #[doc = concat!(
                "Retrieve the stable [`",
                stringify!($CodeTy),
                "`] for this error."
            )]
            #[must_use]
            pub const fn code(&self) -> $CodeTy {
                match self {
                    $(Self::$ErrVariant $( { $($pattern)* } )? $( ( $($tuple)* ) )? => $CodeTy::$CodeVariant,)+
                }
            }
        }
    };
}

/// An error produced by [`crate::DisjointSet`] operations.
///
/// The percolation model only ever computes in-range indices, so seeing this
/// error surface from a [`crate::Percolation`] indicates a defect rather than
/// bad input.
#[non_exhaustive]
#[derive(Clone, Debug, Eq, Error, PartialEq)]
pub enum DisjointSetError {
    /// Requested element was outside `[0, len)`.
    #[error("element {index} is out of range for a disjoint set of {len} elements")]
    OutOfRange {
        /// The requested element.
        index: usize,
        /// Number of elements tracked by the structure.
        len: usize,
    },
}

define_error_codes! {
    /// Stable codes describing [`DisjointSetError`] variants.
    enum DisjointSetErrorCode for DisjointSetError {
        /// Requested element was outside the structure's range.
        OutOfRange => OutOfRange { .. } => "DISJOINT_SET_OUT_OF_RANGE",
    }
}

/// Error type produced when building or running percolation experiments.
#[non_exhaustive]
#[derive(Clone, Debug, Eq, Error, PartialEq)]
pub enum PercolationError {
    /// Grid size must be greater than zero.
    #[error("grid size must be at least 1 (got {got})")]
    InvalidGridSize {
        /// The invalid grid size supplied by the caller.
        got: usize,
    },
    /// Trial count must be greater than zero.
    #[error("trial count must be at least 1 (got {got})")]
    InvalidTrialCount {
        /// The invalid trial count supplied by the caller.
        got: usize,
    },
    /// Worker count must be greater than zero.
    #[error("worker count must be at least 1 (got {got})")]
    InvalidWorkerCount {
        /// The invalid worker count supplied by the caller.
        got: usize,
    },
    /// A cell coordinate fell outside the grid.
    #[error("cell ({row}, {col}) is outside a {size}x{size} grid")]
    CellOutOfRange {
        /// Requested row.
        row: usize,
        /// Requested column.
        col: usize,
        /// Side length of the grid.
        size: usize,
    },
    /// Statistics were requested without enough samples.
    #[error("statistic requires at least {required} samples but {available} are recorded")]
    InsufficientSamples {
        /// Minimum number of samples the statistic needs.
        required: usize,
        /// Number of samples currently recorded.
        available: usize,
    },
    /// The parallel worker pool could not be created.
    #[error("failed to start worker pool: {message}")]
    WorkerPool {
        /// Description of the pool failure.
        message: String,
    },
    /// The disjoint-set engine rejected an operation.
    #[error("disjoint set failed: {0}")]
    DisjointSet(#[from] DisjointSetError),
}

define_error_codes! {
    /// Stable codes describing [`PercolationError`] variants.
    enum PercolationErrorCode for PercolationError {
        /// Grid size must be greater than zero.
        InvalidGridSize => InvalidGridSize { .. } => "PERCOLATION_INVALID_GRID_SIZE",
        /// Trial count must be greater than zero.
        InvalidTrialCount => InvalidTrialCount { .. } => "PERCOLATION_INVALID_TRIAL_COUNT",
        /// Worker count must be greater than zero.
        InvalidWorkerCount => InvalidWorkerCount { .. } => "PERCOLATION_INVALID_WORKER_COUNT",
        /// A cell coordinate fell outside the grid.
        CellOutOfRange => CellOutOfRange { .. } => "PERCOLATION_CELL_OUT_OF_RANGE",
        /// Statistics were requested without enough samples.
        InsufficientSamples => InsufficientSamples { .. } => "PERCOLATION_INSUFFICIENT_SAMPLES",
        /// The parallel worker pool could not be created.
        WorkerPoolFailure => WorkerPool { .. } => "PERCOLATION_WORKER_POOL_FAILURE",
        /// The disjoint-set engine rejected an operation.
        DisjointSetFailure => DisjointSet(..) => "PERCOLATION_DISJOINT_SET_FAILURE",
    }
}

impl PercolationError {
    /// Retrieve the inner [`DisjointSetErrorCode`] when the error originated in
    /// the disjoint-set engine.
    #[must_use]
    pub const fn disjoint_set_code(&self) -> Option<DisjointSetErrorCode> {
        match self {
            Self::DisjointSet(error) => Some(error.code()),
            _ => None,
        }
    }
}

/// Convenient alias for results returned by the core API.
pub type Result<T> = core::result::Result<T, PercolationError>;
