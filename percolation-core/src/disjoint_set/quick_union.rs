//! Weighted quick-union with path compression.
//!
//! Roots satisfy `parent[root] == root` and `rank[root]` bounds the height of
//! the root's tree. Lookups compress the walked path onto the root in a second
//! pass, so repeated queries on the same elements stay near constant time.

use crate::error::DisjointSetError;

use super::{DisjointSet, ensure_in_range};

/// Forest-backed disjoint set using union by rank and path compression.
#[derive(Clone, Debug)]
pub struct QuickUnion {
    parent: Vec<usize>,
    rank: Vec<u8>,
    sets: usize,
}

impl QuickUnion {
    /// Creates `size` singleton trees.
    #[must_use]
    pub fn new(size: usize) -> Self {
        Self {
            parent: (0..size).collect(),
            rank: vec![0; size],
            sets: size,
        }
    }

    fn root(&mut self, mut node: usize) -> usize {
        let mut root = node;
        while self.parent[root] != root {
            root = self.parent[root];
        }

        while self.parent[node] != node {
            let parent = self.parent[node];
            self.parent[node] = root;
            node = parent;
        }

        root
    }
}

impl DisjointSet for QuickUnion {
    fn len(&self) -> usize {
        self.parent.len()
    }

    fn set_count(&self) -> usize {
        self.sets
    }

    fn find(&mut self, element: usize) -> Result<usize, DisjointSetError> {
        ensure_in_range(element, self.parent.len())?;
        Ok(self.root(element))
    }

    /// Attaches the lower-rank root below the higher-rank one. On a tie the
    /// root of `left` wins and its rank grows by one.
    fn union(&mut self, left: usize, right: usize) -> Result<(), DisjointSetError> {
        ensure_in_range(left, self.parent.len())?;
        ensure_in_range(right, self.parent.len())?;
        let mut parent = self.root(left);
        let mut child = self.root(right);
        if parent == child {
            return Ok(());
        }

        let parent_rank = self.rank[parent];
        let child_rank = self.rank[child];
        if parent_rank < child_rank {
            std::mem::swap(&mut parent, &mut child);
        }
        self.parent[child] = parent;
        if parent_rank == child_rank {
            self.rank[parent] = parent_rank.saturating_add(1);
        }
        self.sets -= 1;
        Ok(())
    }
}

#[cfg(test)]
impl QuickUnion {
    pub(super) fn rank_of(&self, node: usize) -> u8 {
        self.rank[node]
    }

    pub(super) fn parent_of(&self, node: usize) -> usize {
        self.parent[node]
    }
}
