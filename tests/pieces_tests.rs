//! Piece catalog and active-piece rotation tests

use tui_blocks::core::{frame_count, occupied_cells, ActivePiece, FRAME_SIZE};
use tui_blocks::types::{ShapeId, Turn, DEFAULT_COLS};

#[test]
fn test_frame_counts() {
    assert_eq!(frame_count(ShapeId::O), 1);
    assert_eq!(frame_count(ShapeId::I), 2);
    assert_eq!(frame_count(ShapeId::S), 2);
    assert_eq!(frame_count(ShapeId::Z), 2);
    assert_eq!(frame_count(ShapeId::L), 4);
    assert_eq!(frame_count(ShapeId::J), 4);
    assert_eq!(frame_count(ShapeId::T), 4);
}

#[test]
fn test_every_frame_is_a_tetromino_inside_the_mask() {
    for shape in ShapeId::ALL {
        for rotation in 0..frame_count(shape) {
            let cells = occupied_cells(shape, rotation);
            assert_eq!(cells.len(), 4, "{shape:?}/{rotation}");
            for c in &cells {
                assert!((0..FRAME_SIZE as i16).contains(&c.col));
                assert!((0..FRAME_SIZE as i16).contains(&c.row));
            }
        }
    }
}

#[test]
fn test_frames_within_a_shape_are_distinct() {
    for shape in ShapeId::ALL {
        let count = frame_count(shape);
        for a in 0..count {
            for b in a + 1..count {
                assert_ne!(occupied_cells(shape, a), occupied_cells(shape, b));
            }
        }
    }
}

#[test]
fn test_four_clockwise_turns_return_to_start() {
    for shape in [ShapeId::L, ShapeId::J, ShapeId::T] {
        let mut piece = ActivePiece::spawn(shape, 1, DEFAULT_COLS, 0);
        assert_eq!(piece.anchor.col, i16::from(DEFAULT_COLS) / 2 - 2);
        let start = piece.occupied_cells();

        for turn in 1..=4 {
            piece.rotate(Turn::Cw);
            if turn < 4 {
                assert_ne!(piece.occupied_cells(), start);
            }
        }
        assert_eq!(piece.rotation, 0);
        assert_eq!(piece.occupied_cells(), start);
    }
}

#[test]
fn test_counter_clockwise_undoes_clockwise() {
    for shape in ShapeId::ALL {
        let mut piece = ActivePiece::spawn(shape, 1, DEFAULT_COLS, 0);
        for _ in 0..frame_count(shape) {
            let before = piece;
            piece.rotate(Turn::Cw);
            piece.rotate(Turn::Ccw);
            assert_eq!(piece, before);
            piece.rotate(Turn::Cw);
        }
    }
}

#[test]
fn test_translate_moves_every_cell() {
    let mut piece = ActivePiece::spawn(ShapeId::S, 2, DEFAULT_COLS, 0);
    let before = piece.occupied_cells();
    piece.translate(-2, 3);
    for (a, b) in before.iter().zip(piece.occupied_cells().iter()) {
        assert_eq!((b.col - a.col, b.row - a.row), (-2, 3));
    }
}
