use serde::Serialize;

use crate::game_state::Phase;
use crate::piece::ActivePiece;
use crate::types::{ColorId, Coord, ShapeId, BACKGROUND};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct PieceSnapshot {
    pub shape: ShapeId,
    pub rotation: usize,
    pub anchor: Coord,
    pub color: ColorId,
}

impl From<ActivePiece> for PieceSnapshot {
    fn from(value: ActivePiece) -> Self {
        Self {
            shape: value.shape,
            rotation: value.rotation,
            anchor: value.anchor,
            color: value.color,
        }
    }
}

/// Read-only view of a session for renderers.
///
/// `grid` is row-major with the active piece's visible cells drawn over the locked
/// ones; empty cells hold `BACKGROUND`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GameSnapshot {
    pub cols: u8,
    pub rows: u8,
    pub grid: Vec<ColorId>,
    pub active: Option<PieceSnapshot>,
    pub active_cells: Vec<Coord>,
    pub next: Option<PieceSnapshot>,
    pub score: u32,
    pub terminal: bool,
    pub ceiling_reached: bool,
    pub phase: Phase,
    pub seed: u64,
    pub pieces_spawned: u32,
}

impl GameSnapshot {
    /// Color at (col, row); `BACKGROUND` outside the grid
    pub fn cell(&self, col: u16, row: u16) -> ColorId {
        if col >= u16::from(self.cols) || row >= u16::from(self.rows) {
            return BACKGROUND;
        }
        let idx = usize::from(row) * usize::from(self.cols) + usize::from(col);
        self.grid.get(idx).copied().unwrap_or(BACKGROUND)
    }
}

impl Default for GameSnapshot {
    fn default() -> Self {
        Self {
            cols: 0,
            rows: 0,
            grid: Vec::new(),
            active: None,
            active_cells: Vec::new(),
            next: None,
            score: 0,
            terminal: false,
            ceiling_reached: false,
            phase: Phase::Falling,
            seed: 0,
            pieces_spawned: 0,
        }
    }
}
