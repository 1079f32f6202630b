//! Percolation grid model backed by a disjoint-set engine.
//!
//! Cells of an `n × n` grid map to engine elements `row * n + col`. Two
//! virtual elements follow the cells: the top node at `n²`, unioned with every
//! cell of row `0`, and the bottom node at `n² + 1`, unioned with every cell of
//! row `n − 1`. Both are wired when the grid is created, so percolation reduces
//! to a single connectivity query between the virtual nodes.

use std::fmt;

use crate::{
    Result,
    disjoint_set::{DisjointSet, UnionFind, UnionFindStrategy},
    error::PercolationError,
};

/// An `n × n` grid of open or closed cells.
///
/// Cells only ever transition from closed to open, so once the grid
/// percolates it keeps percolating.
///
/// # Examples
/// ```
/// use percolation_core::{Percolation, UnionFindStrategy};
///
/// let mut grid = Percolation::new(3, UnionFindStrategy::QuickUnion)?;
/// assert!(!grid.percolates()?);
/// for row in 0..3 {
///     grid.open(row, 1)?;
/// }
/// assert!(grid.percolates()?);
/// assert!(grid.is_full(2, 1)?);
/// assert!(!grid.is_full(2, 0)?);
/// # Ok::<(), percolation_core::PercolationError>(())
/// ```
#[derive(Clone, Debug)]
pub struct Percolation {
    size: usize,
    open: Vec<bool>,
    open_sites: usize,
    sites: UnionFind,
    top: usize,
    bottom: usize,
}

impl Percolation {
    /// Creates an all-closed `size × size` grid using the requested engine.
    ///
    /// # Errors
    /// Returns [`PercolationError::InvalidGridSize`] when `size` is zero or
    /// the grid cannot be indexed on this platform.
    pub fn new(size: usize, strategy: UnionFindStrategy) -> Result<Self> {
        let cells = size
            .checked_mul(size)
            .filter(|&cells| cells > 0 && cells <= usize::MAX - 2)
            .ok_or(PercolationError::InvalidGridSize { got: size })?;
        let top = cells;
        let bottom = cells + 1;
        let mut sites = UnionFind::new(strategy, cells + 2);

        let last_row = cells - size;
        for col in 0..size {
            sites.union(top, col)?;
            sites.union(bottom, last_row + col)?;
        }

        Ok(Self {
            size,
            open: vec![false; cells],
            open_sites: 0,
            sites,
            top,
            bottom,
        })
    }

    /// Returns the side length of the grid.
    #[must_use]
    pub fn size(&self) -> usize {
        self.size
    }

    /// Returns the engine strategy backing the grid.
    #[must_use]
    pub fn strategy(&self) -> UnionFindStrategy {
        self.sites.strategy()
    }

    /// Returns the number of open cells.
    #[must_use]
    pub fn open_count(&self) -> usize {
        self.open_sites
    }

    /// Opens the cell at (`row`, `col`) and joins it with its open neighbours.
    ///
    /// Opening an already open cell changes nothing observable.
    ///
    /// # Errors
    /// Returns [`PercolationError::CellOutOfRange`] when the coordinates fall
    /// outside the grid.
    pub fn open(&mut self, row: usize, col: usize) -> Result<()> {
        let index = self.cell_index(row, col)?;
        if !self.open[index] {
            self.open[index] = true;
            self.open_sites += 1;
        }

        for neighbour in self.neighbours(row, col).into_iter().flatten() {
            if self.open[neighbour] {
                self.sites.union(index, neighbour)?;
            }
        }
        Ok(())
    }

    /// Reports whether the cell at (`row`, `col`) is open.
    ///
    /// # Errors
    /// Returns [`PercolationError::CellOutOfRange`] when the coordinates fall
    /// outside the grid.
    pub fn is_open(&self, row: usize, col: usize) -> Result<bool> {
        let index = self.cell_index(row, col)?;
        Ok(self.open[index])
    }

    /// Reports whether the cell at (`row`, `col`) is open and connected to the
    /// top row.
    ///
    /// Takes `&mut self` only because lookups may compress engine paths; the
    /// grid's connectivity is unchanged.
    ///
    /// # Errors
    /// Returns [`PercolationError::CellOutOfRange`] when the coordinates fall
    /// outside the grid.
    pub fn is_full(&mut self, row: usize, col: usize) -> Result<bool> {
        let index = self.cell_index(row, col)?;
        if !self.open[index] {
            return Ok(false);
        }
        Ok(self.sites.connected(self.top, index)?)
    }

    /// Reports whether the open cells connect the top row to the bottom row.
    ///
    /// # Errors
    /// Only returns an error if the engine rejects the virtual node indices,
    /// which indicates a defect.
    pub fn percolates(&mut self) -> Result<bool> {
        // A 1x1 grid links top and bottom through its single cell before it opens.
        if self.open_sites == 0 {
            return Ok(false);
        }
        Ok(self.sites.connected(self.top, self.bottom)?)
    }

    fn cell_index(&self, row: usize, col: usize) -> Result<usize> {
        if row >= self.size || col >= self.size {
            return Err(PercolationError::CellOutOfRange {
                row,
                col,
                size: self.size,
            });
        }
        Ok(row * self.size + col)
    }

    fn neighbours(&self, row: usize, col: usize) -> [Option<usize>; 4] {
        let size = self.size;
        let index = row * size + col;
        [
            (row > 0).then(|| index - size),
            (row + 1 < size).then(|| index + size),
            (col > 0).then(|| index - 1),
            (col + 1 < size).then(|| index + 1),
        ]
    }
}

/// Renders one line per row with `1` for open cells and `0` for closed ones.
impl fmt::Display for Percolation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in self.open.chunks(self.size) {
            let mut cells = row.iter();
            if let Some(&first) = cells.next() {
                write!(f, "{}", u8::from(first))?;
            }
            for &cell in cells {
                write!(f, " {}", u8::from(cell))?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}
