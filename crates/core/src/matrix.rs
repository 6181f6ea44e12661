//! Matrix module - the grid of locked cells
//!
//! 10 columns x 40 rows stored as one flat array, row-major with row 0 at the
//! bottom (`y * WIDTH + x`). The top 20 rows are the buffer zone pieces spawn
//! into.
//!
//! Collision treats the walls and the floor as solid and everything above the
//! top row as open air.

use arrayvec::ArrayVec;

use crate::catalog::Minos;
use crate::geometry::Vec2;
use crate::types::{Cell, PieceKind, MATRIX_HEIGHT, MATRIX_WIDTH};

/// Total number of cells in the matrix
const MATRIX_SIZE: usize = MATRIX_WIDTH * MATRIX_HEIGHT;

/// Row indices, bottom to top.
pub type RowList = ArrayVec<usize, MATRIX_HEIGHT>;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Matrix {
    cells: [Cell; MATRIX_SIZE],
}

impl Matrix {
    /// Create a new empty matrix
    pub fn new() -> Self {
        Self {
            cells: [None; MATRIX_SIZE],
        }
    }

    #[inline(always)]
    fn index(x: i32, y: i32) -> Option<usize> {
        if x < 0 || x >= MATRIX_WIDTH as i32 || y < 0 || y >= MATRIX_HEIGHT as i32 {
            return None;
        }
        Some((y as usize) * MATRIX_WIDTH + (x as usize))
    }

    pub fn width(&self) -> usize {
        MATRIX_WIDTH
    }

    pub fn height(&self) -> usize {
        MATRIX_HEIGHT
    }

    /// Get cell at position (x, y)
    /// Returns None if out of bounds
    pub fn get(&self, x: i32, y: i32) -> Option<Cell> {
        Self::index(x, y).map(|idx| self.cells[idx])
    }

    /// Set cell at position (x, y)
    /// Returns false if out of bounds
    pub fn set(&mut self, x: i32, y: i32, cell: Cell) -> bool {
        match Self::index(x, y) {
            Some(idx) => {
                self.cells[idx] = cell;
                true
            }
            None => false,
        }
    }

    /// Whether a piece cell may not be at `p`.
    ///
    /// Left/right walls and the floor are solid; rows at or above the top of
    /// the matrix are free.
    #[inline(always)]
    pub fn is_occupied(&self, p: Vec2) -> bool {
        if p.x < 0 || p.x >= MATRIX_WIDTH as i32 || p.y < 0 {
            return true;
        }
        matches!(self.get(p.x, p.y), Some(Some(_)))
    }

    /// Whether any of the cells collides.
    #[inline(always)]
    pub fn collides(&self, minos: &Minos) -> bool {
        minos.iter().any(|p| self.is_occupied(p))
    }

    /// Write a piece into the matrix. Cells outside the matrix are dropped.
    pub fn place(&mut self, minos: &Minos, kind: PieceKind) {
        for p in minos.iter() {
            self.set(p.x, p.y, Some(kind));
        }
    }

    /// Check if a row is completely filled
    pub fn is_row_full(&self, y: usize) -> bool {
        if y >= MATRIX_HEIGHT {
            return false;
        }
        self.row(y).iter().all(|cell| cell.is_some())
    }

    pub fn row(&self, y: usize) -> &[Cell] {
        let start = y * MATRIX_WIDTH;
        &self.cells[start..start + MATRIX_WIDTH]
    }

    /// Rows that would be full if `minos` were written into the matrix.
    pub fn full_rows_with(&self, minos: &Minos) -> RowList {
        let mut rows = RowList::new();
        for y in 0..MATRIX_HEIGHT {
            let full = (0..MATRIX_WIDTH).all(|x| {
                self.cells[y * MATRIX_WIDTH + x].is_some()
                    || minos.contains(Vec2::new(x as i32, y as i32))
            });
            if full {
                rows.push(y);
            }
        }
        rows
    }

    /// Remove every full row and drop the rows above it.
    ///
    /// Two-pointer compaction from the floor up; freed rows at the top come
    /// back empty. Returns the removed row indices, bottom to top.
    pub fn clear_full_rows(&mut self) -> RowList {
        let mut cleared = RowList::new();
        let mut write_y = 0usize;

        for read_y in 0..MATRIX_HEIGHT {
            if self.is_row_full(read_y) {
                cleared.push(read_y);
            } else {
                if write_y != read_y {
                    let src = read_y * MATRIX_WIDTH;
                    self.cells
                        .copy_within(src..src + MATRIX_WIDTH, write_y * MATRIX_WIDTH);
                }
                write_y += 1;
            }
        }

        for cell in &mut self.cells[write_y * MATRIX_WIDTH..] {
            *cell = None;
        }

        cleared
    }

    pub fn is_empty(&self) -> bool {
        self.cells.iter().all(|cell| cell.is_none())
    }

    /// All cells, row-major from the bottom row.
    pub fn cells(&self) -> &[Cell] {
        &self.cells
    }

    /// Clear the entire matrix
    pub fn clear(&mut self) {
        self.cells = [None; MATRIX_SIZE];
    }

    /// Build a matrix from text rows, top row first, for tests and puzzle
    /// setups. `.` is empty, a piece letter fills the cell, and the last line
    /// lands on row 0.
    pub fn from_rows(rows: &[&str]) -> Self {
        let mut matrix = Self::new();
        for (i, line) in rows.iter().rev().enumerate() {
            for (x, ch) in line.chars().enumerate() {
                let cell = PieceKind::from_str(&ch.to_string());
                matrix.set(x as i32, i as i32, cell);
            }
        }
        matrix
    }
}

impl Default for Matrix {
    fn default() -> Self {
        Self::new()
    }
}
