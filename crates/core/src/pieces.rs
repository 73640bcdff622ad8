//! Pieces module - the static shape catalog
//!
//! Each shape is a cyclic list of hand-authored rotation frames. A frame is a
//! 5x5 mask; `#` marks an occupied cell. Column offsets run left to right and row
//! offsets top to bottom, both relative to the piece anchor.

use arrayvec::ArrayVec;

pub use crate::types::FRAME_SIZE;

use crate::types::{Coord, ShapeId};

/// Upper bound on occupied cells in one frame
pub const MAX_FRAME_CELLS: usize = FRAME_SIZE * FRAME_SIZE;

/// One rotation state
pub type Frame = [&'static [u8; FRAME_SIZE]; FRAME_SIZE];

/// Local (anchor-relative) offsets of a frame's occupied cells
pub type FrameCells = ArrayVec<Coord, MAX_FRAME_CELLS>;

const FILLED: u8 = b'#';

const I_FRAMES: &[Frame] = &[
    [b".....", b"..#..", b"..#..", b"..#..", b"..#.."],
    [b".....", b"####.", b".....", b".....", b"....."],
];

const O_FRAMES: &[Frame] = &[[b".....", b".....", b".##..", b".##..", b"....."]];

const S_FRAMES: &[Frame] = &[
    [b".....", b".....", b"..##.", b".##..", b"....."],
    [b".....", b"..#..", b"..##.", b"...#.", b"....."],
];

const Z_FRAMES: &[Frame] = &[
    [b".....", b".....", b".##..", b"..##.", b"....."],
    [b".....", b"..#..", b".##..", b".#...", b"....."],
];

const L_FRAMES: &[Frame] = &[
    [b".....", b"...#.", b".###.", b".....", b"....."],
    [b".....", b"..#..", b"..#..", b"..##.", b"....."],
    [b".....", b".....", b".###.", b".#...", b"....."],
    [b".....", b".##..", b"..#..", b"..#..", b"....."],
];

const J_FRAMES: &[Frame] = &[
    [b".....", b".#...", b".###.", b".....", b"....."],
    [b".....", b"..##.", b"..#..", b"..#..", b"....."],
    [b".....", b".....", b".###.", b"...#.", b"....."],
    [b".....", b"..#..", b"..#..", b".##..", b"....."],
];

const T_FRAMES: &[Frame] = &[
    [b".....", b"..#..", b".###.", b".....", b"....."],
    [b".....", b"..#..", b"..##.", b"..#..", b"....."],
    [b".....", b".....", b".###.", b"..#..", b"....."],
    [b".....", b"..#..", b".##..", b"..#..", b"....."],
];

/// All rotation frames of a shape, in clockwise order
pub fn frames(shape: ShapeId) -> &'static [Frame] {
    match shape {
        ShapeId::I => I_FRAMES,
        ShapeId::O => O_FRAMES,
        ShapeId::S => S_FRAMES,
        ShapeId::Z => Z_FRAMES,
        ShapeId::L => L_FRAMES,
        ShapeId::J => J_FRAMES,
        ShapeId::T => T_FRAMES,
    }
}

pub fn frame_count(shape: ShapeId) -> usize {
    frames(shape).len()
}

/// Occupied local offsets of `shape` at `rotation`.
///
/// The rotation index wraps, so any index names a frame.
pub fn occupied_cells(shape: ShapeId, rotation: usize) -> FrameCells {
    let table = frames(shape);
    let frame = &table[rotation % table.len()];

    let mut cells = FrameCells::new();
    for (row, line) in frame.iter().enumerate() {
        for (col, &mark) in line.iter().enumerate() {
            if mark == FILLED {
                cells.push(Coord::new(col as i16, row as i16));
            }
        }
    }
    cells
}
