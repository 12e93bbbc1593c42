use super::{Coord, cell::Cell};
use crate::error::{MazeError, Result};

/// Row-major occupancy grid of wall and open cells, addressed by `(row, col)`.
///
/// Mutation is crate-private: once a [`Grid`] leaves the generator it is read-only.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Grid {
    data: Box<[Cell]>,
    rows: u16,
    cols: u16,
}

impl Grid {
    /// Allocates a `rows x cols` grid with every cell set to `cell`.
    /// Fails if either dimension is 0.
    pub(crate) fn new(rows: u16, cols: u16, cell: Cell) -> Result<Self> {
        if rows == 0 || cols == 0 {
            return Err(MazeError::InvalidDimensions { rows, cols });
        }
        let data = vec![cell; rows as usize * cols as usize].into_boxed_slice();
        Ok(Grid { data, rows, cols })
    }

    pub fn rows(&self) -> u16 {
        self.rows
    }

    pub fn cols(&self) -> u16 {
        self.cols
    }

    /// Checks if the given coordinate is within the bounds of the grid.
    pub fn is_in_bounds(&self, coord: Coord) -> bool {
        coord.0 < self.rows && coord.1 < self.cols
    }

    /// Returns `true` if `coord` is inside the grid and open. Never panics.
    pub fn is_open(&self, coord: Coord) -> bool {
        self.is_in_bounds(coord) && self[coord].is_open()
    }

    /// Number of open cells in the whole grid.
    pub fn open_count(&self) -> usize {
        self.data.iter().filter(|c| c.is_open()).count()
    }

    /// Iterates over the rows of the grid, top to bottom.
    pub fn iter_rows(&self) -> impl Iterator<Item = &[Cell]> {
        self.data.chunks(self.cols as usize)
    }

    fn ravel_index(&self, row: u16, col: u16) -> usize {
        // Overflow-safe since rows and cols are u16 (assuming usize is at least 32 bits)
        row as usize * self.cols as usize + col as usize
    }

    pub(crate) fn set(&mut self, coord: Coord, cell: Cell) {
        let idx = self.ravel_index(coord.0, coord.1);
        self.data[idx] = cell;
    }
}

impl std::ops::Index<Coord> for Grid {
    type Output = Cell;

    fn index(&self, index: Coord) -> &Self::Output {
        &self.data[self.ravel_index(index.0, index.1)]
    }
}
