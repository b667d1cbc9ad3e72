//! Board behavior through the public API: collision rules and line clears.

use block_drop::core::{Board, Piece};
use block_drop::types::{PieceKind, BOARD_HEIGHT, BOARD_WIDTH};

fn fill_row_except(board: &mut Board, y: i8, gap: std::ops::RangeInclusive<i8>) {
    for x in 0..BOARD_WIDTH as i8 {
        if !gap.contains(&x) {
            board.set(x, y, Some(PieceKind::J));
        }
    }
}

#[test]
fn empty_board_has_no_collisions_inside() {
    let board = Board::new();
    for y in 0..BOARD_HEIGHT as i8 {
        for x in 0..BOARD_WIDTH as i8 {
            assert!(!board.collides(&[(0, 0)], x, y));
        }
    }
}

#[test]
fn walls_and_floor_collide_but_ceiling_does_not() {
    let board = Board::new();
    assert!(board.collides(&[(0, 0)], -1, 5));
    assert!(board.collides(&[(0, 0)], BOARD_WIDTH as i8, 5));
    assert!(board.collides(&[(0, 0)], 5, BOARD_HEIGHT as i8));
    assert!(!board.collides(&[(0, 0)], 5, -3));
}

#[test]
fn piece_collides_with_stack() {
    let mut board = Board::new();
    board.set(4, 10, Some(PieceKind::S));
    let piece = Piece::spawn(PieceKind::O);
    // O at anchor (3, 9) covers (3..5, 9..11) and overlaps the stack cell.
    assert!(board.collides(&piece.shape.offsets(), 3, 9));
    assert!(!board.collides(&piece.shape.offsets(), 5, 9));
}

#[test]
fn single_full_row_is_cleared_and_stack_falls() {
    let mut board = Board::new();
    board.fill_row(19, PieceKind::I);
    board.set(3, 18, Some(PieceKind::T));
    assert_eq!(board.clear_full_rows(), 1);
    assert_eq!(board.get(3, 19), Some(Some(PieceKind::T)));
    assert_eq!(board.get(3, 18), Some(None));
}

#[test]
fn partially_filled_rows_are_kept() {
    let mut board = Board::new();
    fill_row_except(&mut board, 19, 4..=4);
    assert_eq!(board.clear_full_rows(), 0);
    assert_eq!(board.get(0, 19), Some(Some(PieceKind::J)));
}

#[test]
fn four_stacked_rows_clear_together() {
    let mut board = Board::new();
    for y in 16..20 {
        board.fill_row(y, PieceKind::I);
    }
    board.set(7, 14, Some(PieceKind::L));
    assert_eq!(board.clear_full_rows(), 4);
    assert_eq!(board.get(7, 18), Some(Some(PieceKind::L)));
    assert!(board.cells().iter().filter(|c| c.is_some()).count() == 1);
}

#[test]
fn separated_full_rows_both_clear() {
    let mut board = Board::new();
    board.fill_row(19, PieceKind::Z);
    fill_row_except(&mut board, 18, 0..=0);
    board.fill_row(17, PieceKind::Z);
    assert_eq!(board.clear_full_rows(), 2);
    // The partial row slid to the bottom.
    assert_eq!(board.get(0, 19), Some(None));
    assert_eq!(board.get(1, 19), Some(Some(PieceKind::J)));
}
