//! Board module - manages the game grid
//!
//! The board is a 10x20 grid where each cell can be empty or filled with a piece kind.
//! Uses a flat array for better cache locality and zero-allocation.
//! Coordinates: (x, y) where x ranges 0..9 (left to right), y ranges 0..19 (top to bottom)

use crate::shape::CellOffset;
use crate::types::{Cell, PieceKind, BOARD_HEIGHT, BOARD_WIDTH};

/// Total number of cells on the board
const BOARD_SIZE: usize = (BOARD_WIDTH * BOARD_HEIGHT) as usize;

/// The game board - 10 columns x 20 rows using flat array storage
#[derive(Debug, Clone, PartialEq)]
pub struct Board {
    /// Flat array of cells, row-major order (y * WIDTH + x)
    cells: [Cell; BOARD_SIZE],
}

impl Board {
    /// Create a new empty board
    pub fn new() -> Self {
        Self {
            cells: [None; BOARD_SIZE],
        }
    }

    /// Calculate flat index from (x, y) coordinates
    #[inline(always)]
    fn index(x: i8, y: i8) -> Option<usize> {
        if x < 0 || x >= BOARD_WIDTH as i8 || y < 0 || y >= BOARD_HEIGHT as i8 {
            return None;
        }
        Some((y as usize) * (BOARD_WIDTH as usize) + (x as usize))
    }

    /// Get cell at position (x, y)
    /// Returns None if out of bounds
    pub fn get(&self, x: i8, y: i8) -> Option<Cell> {
        Self::index(x, y).map(|idx| self.cells[idx])
    }

    /// Set cell at position (x, y)
    /// Returns false if out of bounds
    pub fn set(&mut self, x: i8, y: i8, cell: Cell) -> bool {
        match Self::index(x, y) {
            Some(idx) => {
                self.cells[idx] = cell;
                true
            }
            None => false,
        }
    }

    /// Check if position is occupied (within bounds and filled)
    pub fn is_occupied(&self, x: i8, y: i8) -> bool {
        matches!(self.get(x, y), Some(Some(_)))
    }

    /// Whether a set of piece cells placed at (x, y) collides with the board.
    ///
    /// A cell collides when it lies outside the horizontal bounds, at or
    /// below the floor, or on a filled cell. Cells above the top edge
    /// (y < 0) do not collide as long as they stay within the columns;
    /// a freshly spawned piece may overhang the ceiling.
    pub fn collides(&self, offsets: &[CellOffset], x: i8, y: i8) -> bool {
        for &(dx, dy) in offsets {
            let px = x + dx;
            let py = y + dy;
            if px < 0 || px >= BOARD_WIDTH as i8 || py >= BOARD_HEIGHT as i8 {
                return true;
            }
            if py >= 0 && self.is_occupied(px, py) {
                return true;
            }
        }
        false
    }

    /// Check if a row is completely filled
    pub fn is_row_full(&self, y: usize) -> bool {
        if y >= BOARD_HEIGHT as usize {
            return false;
        }
        let start = y * BOARD_WIDTH as usize;
        let end = start + BOARD_WIDTH as usize;
        self.cells[start..end].iter().all(|cell| cell.is_some())
    }

    /// Remove a row, shifting everything above it down and leaving an
    /// empty row at the top.
    ///
    /// Uses copy_within for efficient memory movement (handles overlap).
    pub fn remove_row(&mut self, y: usize) {
        if y >= BOARD_HEIGHT as usize {
            return;
        }

        let width = BOARD_WIDTH as usize;
        for row in (1..=y).rev() {
            let src_start = (row - 1) * width;
            let dst_start = row * width;
            self.cells
                .copy_within(src_start..src_start + width, dst_start);
        }
        for cell in &mut self.cells[0..width] {
            *cell = None;
        }
    }

    /// Clear all full rows and return how many were removed.
    ///
    /// Scans bottom to top. After removing a row the same index is
    /// examined again: the shift pulled a new row down into it, and that
    /// row may also be full.
    pub fn clear_full_rows(&mut self) -> u32 {
        let mut cleared = 0;
        let mut y = BOARD_HEIGHT as usize;
        while y > 0 {
            let row = y - 1;
            if self.is_row_full(row) {
                self.remove_row(row);
                cleared += 1;
                // Re-examine the same index after the shift.
                continue;
            }
            y -= 1;
        }
        cleared
    }

    /// Write piece cells onto the board at given position.
    ///
    /// Cells above the top edge are dropped silently; everything else is
    /// assumed to be collision-checked by the caller.
    pub fn merge(&mut self, offsets: &[CellOffset], x: i8, y: i8, kind: PieceKind) {
        for &(dx, dy) in offsets {
            self.set(x + dx, y + dy, Some(kind));
        }
    }

    /// Get a reference to the internal cells array
    pub fn cells(&self) -> &[Cell] {
        &self.cells
    }

    /// Fill a row-major u8 grid: 0 for empty, piece cell id otherwise.
    pub fn write_u8_grid(&self, grid: &mut [[u8; BOARD_WIDTH as usize]; BOARD_HEIGHT as usize]) {
        for y in 0..BOARD_HEIGHT as usize {
            for x in 0..BOARD_WIDTH as usize {
                grid[y][x] = match self.cells[y * BOARD_WIDTH as usize + x] {
                    Some(kind) => kind.cell_id(),
                    None => 0,
                };
            }
        }
    }

    /// Clear the entire board
    pub fn clear(&mut self) {
        for cell in &mut self.cells {
            *cell = None;
        }
    }

    /// Fill an entire row, mainly for test setup
    pub fn fill_row(&mut self, y: usize, kind: PieceKind) {
        let start = y * BOARD_WIDTH as usize;
        let end = start + BOARD_WIDTH as usize;
        for cell in &mut self.cells[start..end] {
            *cell = Some(kind);
        }
    }
}

impl Default for Board {
    fn default() -> Self {
        Self::new()
    }
}
