//! Quick-find disjoint set: every element stores its set label directly.

use crate::error::DisjointSetError;

use super::{DisjointSet, ensure_in_range};

/// Disjoint set where `labels[i] == labels[j]` iff `i` and `j` share a set.
///
/// Lookups are O(1); each effective union scans every element.
#[derive(Clone, Debug)]
pub struct QuickFind {
    labels: Vec<usize>,
    sets: usize,
}

impl QuickFind {
    /// Creates `size` singleton sets labelled by their own index.
    #[must_use]
    pub fn new(size: usize) -> Self {
        Self {
            labels: (0..size).collect(),
            sets: size,
        }
    }
}

impl DisjointSet for QuickFind {
    fn len(&self) -> usize {
        self.labels.len()
    }

    fn set_count(&self) -> usize {
        self.sets
    }

    fn find(&mut self, element: usize) -> Result<usize, DisjointSetError> {
        self.labels
            .get(element)
            .copied()
            .ok_or(DisjointSetError::OutOfRange {
                index: element,
                len: self.labels.len(),
            })
    }

    /// Relabels every member of `right`'s set with `left`'s label.
    fn union(&mut self, left: usize, right: usize) -> Result<(), DisjointSetError> {
        ensure_in_range(left, self.labels.len())?;
        ensure_in_range(right, self.labels.len())?;
        let target = self.labels[left];
        let absorbed = self.labels[right];
        if target == absorbed {
            return Ok(());
        }

        for label in &mut self.labels {
            if *label == absorbed {
                *label = target;
            }
        }
        self.sets -= 1;
        Ok(())
    }
}
