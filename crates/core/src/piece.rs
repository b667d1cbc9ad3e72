//! Piece module - an active tetromino on the board
//!
//! A piece is a kind, an oriented bitmap, and an anchor position. The
//! anchor is the top-left corner of the bitmap in board coordinates and
//! may sit above the top edge right after a rotation near the ceiling.

use crate::board::Board;
use crate::shape::Shape;
use crate::types::{PieceKind, BOARD_WIDTH};

/// Active falling piece.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Piece {
    pub kind: PieceKind,
    pub shape: Shape,
    /// Anchor column (top-left of bitmap)
    pub x: i8,
    /// Anchor row (top-left of bitmap)
    pub y: i8,
}

impl Piece {
    /// Spawn a piece of the given kind centered at the top of the board.
    ///
    /// Spawn column is floor(COLS / 2) - floor(bitmap_width / 2), spawn
    /// row is 0.
    pub fn spawn(kind: PieceKind) -> Self {
        let shape = Shape::of(kind);
        let x = (BOARD_WIDTH / 2) as i8 - (shape.width() / 2) as i8;
        Self { kind, shape, x, y: 0 }
    }

    /// Whether this piece collides with walls, floor, or filled cells.
    pub fn collides(&self, board: &Board) -> bool {
        board.collides(&self.shape.offsets(), self.x, self.y)
    }

    /// The piece translated by (dx, dy).
    pub fn moved(&self, dx: i8, dy: i8) -> Self {
        Self {
            x: self.x + dx,
            y: self.y + dy,
            ..*self
        }
    }

    /// The piece rotated 90 degrees clockwise in place.
    pub fn rotated_cw(&self) -> Self {
        Self {
            shape: self.shape.rotated_cw(),
            ..*self
        }
    }
}
