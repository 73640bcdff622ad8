//! The piece currently in play.

use arrayvec::ArrayVec;

use crate::pieces::{frame_count, occupied_cells, FRAME_SIZE, MAX_FRAME_CELLS};
use crate::types::{ColorId, Coord, ShapeId, Turn};

/// Absolute grid cells covered by a piece
pub type PieceCells = ArrayVec<Coord, MAX_FRAME_CELLS>;

/// Active falling piece
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ActivePiece {
    pub shape: ShapeId,
    /// Always in `0..frame_count(shape)`
    pub rotation: usize,
    pub anchor: Coord,
    pub color: ColorId,
}

impl ActivePiece {
    /// A piece at the spawn position: horizontally centered, anchor row `spawn_row`.
    pub fn spawn(shape: ShapeId, color: ColorId, cols: u8, spawn_row: i16) -> Self {
        let col = i16::from(cols) / 2 - (FRAME_SIZE as i16) / 2;
        Self {
            shape,
            rotation: 0,
            anchor: Coord::new(col, spawn_row),
            color,
        }
    }

    pub fn frame_count(&self) -> usize {
        frame_count(self.shape)
    }

    /// Move the anchor. Callers validate afterwards and undo with the opposite move.
    pub fn translate(&mut self, dcol: i16, drow: i16) {
        self.anchor = self.anchor.offset(dcol, drow);
    }

    /// Step to the neighbouring frame, wrapping in both directions.
    pub fn rotate(&mut self, turn: Turn) {
        let count = self.frame_count() as isize;
        self.rotation = (self.rotation as isize + turn.step()).rem_euclid(count) as usize;
    }

    /// Grid coordinates covered at the current rotation and anchor
    pub fn occupied_cells(&self) -> PieceCells {
        occupied_cells(self.shape, self.rotation)
            .iter()
            .map(|local| self.anchor.offset(local.col, local.row))
            .collect()
    }
}
