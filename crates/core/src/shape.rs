//! Shape module - tetromino bitmaps and rotation
//!
//! Shapes are small square bitmaps (2x2 for O, 3x3 for T/S/Z/J/L, 4x4 for I)
//! stored in a fixed 4x4 array with an explicit side length. Rotation is a
//! clockwise transpose-and-reverse of the bitmap, not a rotation-system
//! lookup: the rotated cell (row i, col j) equals the original cell
//! (row side-1-j, col i).

use arrayvec::ArrayVec;

use crate::types::PieceKind;

/// Maximum bitmap side length (the I piece)
pub const MAX_SHAPE_SIZE: usize = 4;

/// Offset of a filled sub-cell relative to the piece anchor, as (dx, dy)
pub type CellOffset = (i8, i8);

/// An oriented tetromino bitmap.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Shape {
    /// Side length of the square bitmap (2..=4)
    size: u8,
    /// Row-major filled flags; only the top-left `size` x `size` block is used
    cells: [[bool; MAX_SHAPE_SIZE]; MAX_SHAPE_SIZE],
}

impl Shape {
    /// The spawn-orientation bitmap for a piece kind.
    pub fn of(kind: PieceKind) -> Self {
        let (size, rows): (u8, &[&[u8]]) = match kind {
            PieceKind::I => (
                4,
                &[
                    &[0, 0, 0, 0],
                    &[1, 1, 1, 1],
                    &[0, 0, 0, 0],
                    &[0, 0, 0, 0],
                ],
            ),
            PieceKind::O => (2, &[&[1, 1], &[1, 1]]),
            PieceKind::T => (3, &[&[0, 1, 0], &[1, 1, 1], &[0, 0, 0]]),
            PieceKind::S => (3, &[&[0, 1, 1], &[1, 1, 0], &[0, 0, 0]]),
            PieceKind::Z => (3, &[&[1, 1, 0], &[0, 1, 1], &[0, 0, 0]]),
            PieceKind::J => (3, &[&[1, 0, 0], &[1, 1, 1], &[0, 0, 0]]),
            PieceKind::L => (3, &[&[0, 0, 1], &[1, 1, 1], &[0, 0, 0]]),
        };

        let mut cells = [[false; MAX_SHAPE_SIZE]; MAX_SHAPE_SIZE];
        for (y, row) in rows.iter().enumerate() {
            for (x, &v) in row.iter().enumerate() {
                cells[y][x] = v != 0;
            }
        }
        Self { size, cells }
    }

    /// Side length of the bitmap.
    pub fn size(&self) -> u8 {
        self.size
    }

    /// Width of the bitmap in columns.
    ///
    /// The bitmap is square, so this equals [`Shape::size`]; it exists as the
    /// named bound for the wall-kick search.
    pub fn width(&self) -> u8 {
        self.size
    }

    /// Whether the sub-cell at (col x, row y) is filled.
    pub fn filled(&self, x: u8, y: u8) -> bool {
        x < self.size && y < self.size && self.cells[y as usize][x as usize]
    }

    /// The bitmap rotated 90 degrees clockwise.
    pub fn rotated_cw(&self) -> Self {
        let n = self.size as usize;
        let mut cells = [[false; MAX_SHAPE_SIZE]; MAX_SHAPE_SIZE];
        for i in 0..n {
            for j in 0..n {
                cells[i][j] = self.cells[n - 1 - j][i];
            }
        }
        Self {
            size: self.size,
            cells,
        }
    }

    /// Offsets of all filled sub-cells, as (dx, dy) from the anchor.
    ///
    /// Every tetromino fills exactly four sub-cells, so this never allocates.
    pub fn offsets(&self) -> ArrayVec<CellOffset, 4> {
        let mut out = ArrayVec::new();
        for y in 0..self.size {
            for x in 0..self.size {
                if self.cells[y as usize][x as usize] {
                    out.push((x as i8, y as i8));
                }
            }
        }
        out
    }
}
