//! Board rules through the public facade: collision, clears, scoring, hold.

use stacker::core::{Board, Catalog, Matrix, Vec2};
use stacker::types::{Orientation, PieceKind, RotateDirection, MATRIX_HEIGHT, MATRIX_WIDTH};

fn filled(board: &Board) -> usize {
    board.matrix().cells().iter().filter(|c| c.is_some()).count()
}

/// Hard-drop pieces into an emptied matrix until `kind` is active. The bag
/// guarantees it within 13 draws.
fn bring_up(board: &mut Board, kind: PieceKind) {
    for _ in 0..14 {
        if board.active_kind() == kind {
            return;
        }
        board.hard_drop_piece();
        board.load_matrix(Matrix::new());
    }
    panic!("{kind:?} never came up");
}

#[test]
fn spawn_states_have_four_distinct_cells() {
    let catalog = Catalog::standard();
    for kind in PieceKind::ALL {
        let cells = catalog.spawn_state(kind);
        for (i, a) in cells.iter().enumerate() {
            for b in cells.iter().skip(i + 1) {
                assert_ne!(a, b, "{kind:?} repeats a cell");
            }
        }
    }
}

#[test]
fn walls_and_floor_block_but_the_sky_does_not() {
    let matrix = Matrix::new();
    for y in 0..MATRIX_HEIGHT as i32 + 10 {
        assert!(matrix.is_occupied(Vec2::new(-1, y)));
        assert!(matrix.is_occupied(Vec2::new(MATRIX_WIDTH as i32, y)));
        assert!(!matrix.is_occupied(Vec2::new(0, y)));
    }
    assert!(matrix.is_occupied(Vec2::new(3, -1)));
}

#[test]
fn four_rotations_return_home() {
    let mut board = Board::with_seed(2);
    board.soft_drop_piece(5);
    for direction in RotateDirection::ALL {
        let start = *board.active_minos();
        for _ in 0..4 {
            assert!(board.rotate_piece(direction));
        }
        assert_eq!(board.orientation(), Orientation::North);
        assert_eq!(*board.active_minos(), start);
    }
}

#[test]
fn o_piece_lock_without_clear() {
    let mut board = Board::with_seed(6);
    bring_up(&mut board, PieceKind::O);
    let base = board.score();
    let rows = board.hard_drop_piece();

    assert_eq!(filled(&board), 4);
    assert_eq!(board.feedback().lines_cleared, 0);
    assert_eq!(board.feedback().combo, -1);
    assert_eq!(board.score(), base + u64::from(rows) * 2);
}

#[test]
fn i_piece_completes_a_single() {
    let mut board = Board::with_seed(6);
    bring_up(&mut board, PieceKind::I);
    board.load_matrix(Matrix::from_rows(&["JJJ....JJJ"]));
    let base = board.score();
    let rows = board.hard_drop_piece();

    assert_eq!(board.feedback().lines_cleared, 1);
    assert_eq!(board.feedback().combo, 0);
    assert!(board.feedback().all_clear);
    assert_eq!(board.last_lock().clear_points, 100);
    assert_eq!(board.last_lock().total, 100 + 3500);
    assert_eq!(board.score(), base + 3600 + u64::from(rows) * 2);
    assert!(board.matrix().is_empty());
}

#[test]
fn clearing_shifts_the_rows_above() {
    let mut board = Board::with_seed(6);
    bring_up(&mut board, PieceKind::O);
    board.load_matrix(Matrix::from_rows(&[
        ".......S..",
        "LLLL..LLLL",
        "ZZZZ..ZZZZ",
    ]));
    board.hard_drop_piece();

    assert_eq!(board.feedback().lines_cleared, 2);
    assert_eq!(board.matrix().get(7, 0), Some(Some(PieceKind::S)));
    assert_eq!(filled(&board), 1);
    assert_eq!(board.last_lock().total, 300);
}

#[test]
fn back_to_back_quads() {
    let rows = [".IIIIIIIII"; 4];
    let mut board = Board::with_seed(6);
    bring_up(&mut board, PieceKind::I);
    board.load_matrix(Matrix::from_rows(&rows));
    board.rotate_piece(RotateDirection::Counterclockwise);
    assert_eq!(board.move_piece(-10), -4);
    board.hard_drop_piece();
    assert_eq!(board.feedback().b2b, 0);
    assert_eq!(board.last_lock().clear_points, 800);

    bring_up(&mut board, PieceKind::I);
    board.load_matrix(Matrix::from_rows(&rows));
    board.rotate_piece(RotateDirection::Counterclockwise);
    board.move_piece(-10);
    board.hard_drop_piece();
    assert_eq!(board.feedback().b2b, 1);
    assert_eq!(board.last_lock().clear_points, 1200);
    assert!(board.last_lock().b2b_applied);
}

#[test]
fn hold_twice_swaps_back() {
    let mut board = Board::with_seed(13);
    let a = board.active_kind();
    board.hold_piece();
    let b = board.active_kind();
    board.hold_piece();
    assert_eq!(board.active_kind(), a);
    assert_eq!(board.hold(), Some(b));
}

#[test]
fn same_seed_same_game() {
    let mut a = Board::with_seed(31337);
    let mut b = Board::with_seed(31337);
    for _ in 0..30 {
        assert_eq!(a.active_kind(), b.active_kind());
        assert_eq!(a.next_queue(), b.next_queue());
        a.hard_drop_piece();
        b.hard_drop_piece();
    }
    assert_eq!(a.matrix(), b.matrix());
    assert_eq!(a.score(), b.score());
}
