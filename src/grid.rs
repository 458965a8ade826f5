use std::fmt;

use crate::Offset;
use crate::cell::Cell;

/// Relative positions of the eight cells in a Moore neighbourhood.
///
///   (-1, -1) (-1, 0) (-1, 1)
///   ( 0, -1)         ( 0, 1)
///   ( 1, -1) ( 1, 0) ( 1, 1)
///
const NEIGHBORHOOD: [(Offset, Offset); 8] = [
    (-1, -1),
    (-1, 0),
    (-1, 1),
    (0, -1),
    (0, 1),
    (1, -1),
    (1, 0),
    (1, 1),
];

/// The cells of one generation.
///
/// Cells are stored row-major in a single allocation of `rows * cols` entries. The dimensions
/// are fixed when the grid is created.
///
/// Everything outside `[0, rows) x [0, cols)` reads as [`Cell::Dead`]: the grid does not wrap, it
/// behaves as if it were embedded in an infinite dead field.
#[derive(Clone, PartialEq, Eq)]
pub struct Grid {
    cells: Vec<Cell>,
    rows: usize,
    cols: usize,
}

impl Grid {
    /// Create an all-dead grid.
    pub fn new(rows: usize, cols: usize) -> Self {
        assert!(rows > 0 && cols > 0, "grid dimensions must be positive");

        Self {
            cells: vec![Cell::Dead; rows * cols],
            rows,
            cols,
        }
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn cols(&self) -> usize {
        self.cols
    }

    /// `(rows, cols)`
    pub fn dimensions(&self) -> (usize, usize) {
        (self.rows, self.cols)
    }

    /// Read the cell at `(row, col)`. Any coordinate outside the grid is dead.
    pub fn get(&self, row: Offset, col: Offset) -> Cell {
        if row < 0 || col < 0 {
            return Cell::Dead;
        }

        let (row, col) = (row as usize, col as usize);
        if row >= self.rows || col >= self.cols {
            return Cell::Dead;
        }

        self.cells[self.index(row, col)]
    }

    /// Write the cell at `(row, col)`.
    ///
    /// Writing outside the grid is a bug in the caller and panics.
    pub fn set(&mut self, row: usize, col: usize, cell: Cell) {
        assert!(row < self.rows, "row {row} is out of bounds");
        assert!(col < self.cols, "col {col} is out of bounds");

        let i = self.index(row, col);
        self.cells[i] = cell;
    }

    /// Number of live cells among the eight neighbours of `(row, col)`, in `0..=8`.
    pub fn count_alive_neighbors(&self, row: Offset, col: Offset) -> u8 {
        // A wrapped offset lands far outside the grid and reads dead
        NEIGHBORHOOD
            .iter()
            .map(|&(dr, dc)| u8::from(self.get(row.wrapping_add(dr), col.wrapping_add(dc))))
            .sum()
    }

    /// Set every cell to `cell`.
    pub fn fill(&mut self, cell: Cell) {
        self.cells.fill(cell);
    }

    /// Number of live cells.
    pub fn population(&self) -> usize {
        self.cells.iter().filter(|c| c.is_alive()).count()
    }

    /// Coordinates of every live cell, row by row.
    pub fn iter_alive(&self) -> impl Iterator<Item = (usize, usize)> + '_ {
        self.cells
            .iter()
            .enumerate()
            .filter(|(_, c)| c.is_alive())
            .map(|(i, _)| (i / self.cols, i % self.cols))
    }

    /// The row-major cell storage.
    pub fn cells(&self) -> &[Cell] {
        &self.cells
    }

    fn index(&self, row: usize, col: usize) -> usize {
        row * self.cols + col
    }
}

/// `.` for dead cells, `#` for live ones, one line per row.
impl fmt::Display for Grid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (r, row) in self.cells.chunks(self.cols).enumerate() {
            if r > 0 {
                f.write_str("\n")?;
            }

            for &cell in row {
                f.write_str(if cell.is_alive() { "#" } else { "." })?;
            }
        }

        Ok(())
    }
}

impl fmt::Debug for Grid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Grid {}x{}", self.rows, self.cols)?;
        fmt::Display::fmt(self, f)
    }
}
