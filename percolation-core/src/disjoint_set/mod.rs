//! Disjoint-set (union-find) engines backing the percolation grid.
//!
//! Two strategies implement the same [`DisjointSet`] contract:
//!
//! - [`QuickFind`] stores the set label of every element directly, so lookups
//!   are constant time and unions rewrite the whole label table.
//! - [`QuickUnion`] keeps a forest with union by rank and path compression,
//!   giving amortised near-constant time for both operations.
//!
//! [`UnionFind`] is the tagged variant used by [`crate::Percolation`] so the
//! grid model is written once and parameterised by [`UnionFindStrategy`].

mod quick_find;
mod quick_union;

use std::fmt;

use crate::error::DisjointSetError;

pub use self::{quick_find::QuickFind, quick_union::QuickUnion};

/// Capability contract shared by every disjoint-set strategy.
///
/// Representatives returned by [`DisjointSet::find`] are only meaningful for
/// equality comparisons made before the next mutation; their numeric value
/// differs between strategies.
///
/// # Examples
/// ```
/// use percolation_core::{DisjointSet, QuickUnion};
///
/// let mut sets = QuickUnion::new(4);
/// sets.union(0, 1)?;
/// assert!(sets.connected(1, 0)?);
/// assert!(!sets.connected(1, 2)?);
/// assert_eq!(sets.set_count(), 3);
/// # Ok::<(), percolation_core::DisjointSetError>(())
/// ```
pub trait DisjointSet {
    /// Returns the number of elements tracked by the structure.
    fn len(&self) -> usize;

    /// Returns `true` when the structure tracks no elements.
    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Returns the number of disjoint sets currently present.
    fn set_count(&self) -> usize;

    /// Returns the representative of the set containing `element`.
    ///
    /// # Errors
    /// Returns [`DisjointSetError::OutOfRange`] when `element` is not below
    /// [`DisjointSet::len`].
    fn find(&mut self, element: usize) -> Result<usize, DisjointSetError>;

    /// Merges the sets containing `left` and `right`.
    ///
    /// Merging elements that already share a set leaves the structure
    /// untouched.
    ///
    /// # Errors
    /// Returns [`DisjointSetError::OutOfRange`] when either element is not
    /// below [`DisjointSet::len`].
    fn union(&mut self, left: usize, right: usize) -> Result<(), DisjointSetError>;

    /// Reports whether `left` and `right` belong to the same set.
    ///
    /// # Errors
    /// Returns [`DisjointSetError::OutOfRange`] when either element is not
    /// below [`DisjointSet::len`].
    fn connected(&mut self, left: usize, right: usize) -> Result<bool, DisjointSetError> {
        Ok(self.find(left)? == self.find(right)?)
    }
}

/// Selects the disjoint-set engine used by a [`crate::Percolation`] grid.
///
/// # Examples
/// ```
/// use percolation_core::UnionFindStrategy;
///
/// assert_eq!(UnionFindStrategy::default(), UnionFindStrategy::QuickUnion);
/// assert_eq!(UnionFindStrategy::QuickFind.to_string(), "quick-find");
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum UnionFindStrategy {
    /// Direct set labels; linear-time unions.
    QuickFind,
    /// Union by rank with path compression.
    #[default]
    QuickUnion,
}

impl UnionFindStrategy {
    /// Returns the stable kebab-case name of the strategy.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::QuickFind => "quick-find",
            Self::QuickUnion => "quick-union",
        }
    }
}

impl fmt::Display for UnionFindStrategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Disjoint-set engine selected at runtime by [`UnionFindStrategy`].
///
/// # Examples
/// ```
/// use percolation_core::{DisjointSet, UnionFind, UnionFindStrategy};
///
/// let mut sets = UnionFind::new(UnionFindStrategy::QuickFind, 3);
/// sets.union(2, 0)?;
/// assert!(sets.connected(0, 2)?);
/// assert_eq!(sets.strategy(), UnionFindStrategy::QuickFind);
/// # Ok::<(), percolation_core::DisjointSetError>(())
/// ```
#[derive(Debug, Clone)]
pub enum UnionFind {
    /// Engine backed by [`QuickFind`].
    QuickFind(QuickFind),
    /// Engine backed by [`QuickUnion`].
    QuickUnion(QuickUnion),
}

impl UnionFind {
    /// Creates `size` singleton sets using the requested strategy.
    #[must_use]
    pub fn new(strategy: UnionFindStrategy, size: usize) -> Self {
        match strategy {
            UnionFindStrategy::QuickFind => Self::QuickFind(QuickFind::new(size)),
            UnionFindStrategy::QuickUnion => Self::QuickUnion(QuickUnion::new(size)),
        }
    }

    /// Returns the strategy backing this engine.
    #[must_use]
    pub const fn strategy(&self) -> UnionFindStrategy {
        match self {
            Self::QuickFind(_) => UnionFindStrategy::QuickFind,
            Self::QuickUnion(_) => UnionFindStrategy::QuickUnion,
        }
    }
}

impl DisjointSet for UnionFind {
    fn len(&self) -> usize {
        match self {
            Self::QuickFind(sets) => sets.len(),
            Self::QuickUnion(sets) => sets.len(),
        }
    }

    fn set_count(&self) -> usize {
        match self {
            Self::QuickFind(sets) => sets.set_count(),
            Self::QuickUnion(sets) => sets.set_count(),
        }
    }

    fn find(&mut self, element: usize) -> Result<usize, DisjointSetError> {
        match self {
            Self::QuickFind(sets) => sets.find(element),
            Self::QuickUnion(sets) => sets.find(element),
        }
    }

    fn union(&mut self, left: usize, right: usize) -> Result<(), DisjointSetError> {
        match self {
            Self::QuickFind(sets) => sets.union(left, right),
            Self::QuickUnion(sets) => sets.union(left, right),
        }
    }

    fn connected(&mut self, left: usize, right: usize) -> Result<bool, DisjointSetError> {
        match self {
            Self::QuickFind(sets) => sets.connected(left, right),
            Self::QuickUnion(sets) => sets.connected(left, right),
        }
    }
}

fn ensure_in_range(index: usize, len: usize) -> Result<(), DisjointSetError> {
    if index < len {
        Ok(())
    } else {
        Err(DisjointSetError::OutOfRange { index, len })
    }
}
