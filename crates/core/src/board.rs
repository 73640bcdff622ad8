//! Board module - locked cells and the collision/clear rules
//!
//! The board is a map from visible grid coordinate to the color of the piece that
//! locked there. Only rows `0..rows` are ever stored; the spawn buffer above row 0
//! exists for active pieces but never holds locked cells.
//!
//! Coordinates: (col, row) with col in `0..cols` left to right and row in `0..rows`
//! top to bottom.

use std::collections::HashMap;

use crate::piece::ActivePiece;
use crate::types::{ColorId, Coord, GameConfig, BACKGROUND};

/// The game board
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Board {
    cols: u8,
    rows: u8,
    locked: HashMap<Coord, ColorId>,
}

impl Board {
    /// Create a new empty board
    pub fn new(cols: u8, rows: u8) -> Self {
        Self {
            cols,
            rows,
            locked: HashMap::new(),
        }
    }

    pub fn from_config(config: &GameConfig) -> Self {
        Self::new(config.cols, config.rows)
    }

    pub fn cols(&self) -> u8 {
        self.cols
    }

    pub fn rows(&self) -> u8 {
        self.rows
    }

    /// Whether `coord` lies on the visible board
    #[inline]
    pub fn in_bounds(&self, coord: Coord) -> bool {
        self.col_in_bounds(coord.col) && coord.row >= 0 && coord.row < i16::from(self.rows)
    }

    #[inline]
    fn col_in_bounds(&self, col: i16) -> bool {
        col >= 0 && col < i16::from(self.cols)
    }

    /// True unless a locked cell occupies `coord`. Does not check bounds.
    pub fn is_cell_empty(&self, coord: Coord) -> bool {
        !self.locked.contains_key(&coord)
    }

    /// Locked color at `coord`, if any
    pub fn get(&self, coord: Coord) -> Option<ColorId> {
        self.locked.get(&coord).copied()
    }

    /// Store a locked cell. Out-of-bounds coordinates are ignored; returns whether
    /// the cell was stored.
    pub fn set(&mut self, coord: Coord, color: ColorId) -> bool {
        if !self.in_bounds(coord) {
            return false;
        }
        self.locked.insert(coord, color);
        true
    }

    /// Whether the piece fits where it currently is.
    ///
    /// Every cell must sit in a valid column. Cells above row 0 pass otherwise;
    /// cells at row 0 or below must be on the board and unoccupied.
    pub fn is_placement_valid(&self, piece: &ActivePiece) -> bool {
        piece.occupied_cells().iter().all(|&cell| {
            if !self.col_in_bounds(cell.col) {
                return false;
            }
            if cell.row < 0 {
                return true;
            }
            cell.row < i16::from(self.rows) && self.is_cell_empty(cell)
        })
    }

    /// Lock the piece's visible cells into the board. Spawn-buffer cells are dropped.
    pub fn lock(&mut self, piece: &ActivePiece) {
        for cell in piece.occupied_cells() {
            if cell.row >= 0 {
                self.set(cell, piece.color);
            }
        }
    }

    /// Check if a row is completely filled
    pub fn is_row_full(&self, row: i16) -> bool {
        (0..i16::from(self.cols)).all(|col| self.locked.contains_key(&Coord::new(col, row)))
    }

    /// Remove every full row and compact what lies above the topmost one.
    ///
    /// Rows are scanned bottom to top. Each full row is emptied and counted; the last
    /// one found (smallest index) becomes the threshold. Entries strictly above the
    /// threshold then move down by the number of rows cleared; entries at or below it
    /// stay put. Returns the number of rows cleared.
    pub fn clear_full_rows(&mut self) -> usize {
        let mut cleared = 0usize;
        let mut threshold = None;

        for row in (0..i16::from(self.rows)).rev() {
            if self.is_row_full(row) {
                for col in 0..i16::from(self.cols) {
                    self.locked.remove(&Coord::new(col, row));
                }
                cleared += 1;
                threshold = Some(row);
            }
        }

        let Some(threshold) = threshold else {
            return 0;
        };

        let shift = cleared as i16;
        let moving: Vec<(Coord, ColorId)> = self
            .locked
            .iter()
            .filter(|(coord, _)| coord.row < threshold)
            .map(|(&coord, &color)| (coord, color))
            .collect();
        for (coord, _) in &moving {
            self.locked.remove(coord);
        }
        // Shifted cells replace any survivor already at the target key.
        for (coord, color) in moving {
            self.locked.insert(coord.offset(0, shift), color);
        }

        cleared
    }

    /// True once any locked cell sits in row 0 (or, defensively, above it)
    pub fn is_game_lost(&self) -> bool {
        self.locked.keys().any(|coord| coord.row < 1)
    }

    /// Locked cells keyed by coordinate
    pub fn locked(&self) -> &HashMap<Coord, ColorId> {
        &self.locked
    }

    pub fn locked_count(&self) -> usize {
        self.locked.len()
    }

    pub fn is_empty(&self) -> bool {
        self.locked.is_empty()
    }

    /// Write the dense row-major grid (`BACKGROUND` for empty cells) into `out`.
    pub fn write_grid(&self, out: &mut Vec<ColorId>) {
        let cols = usize::from(self.cols);
        out.clear();
        out.resize(cols * usize::from(self.rows), BACKGROUND);
        for (coord, &color) in &self.locked {
            out[coord.row as usize * cols + coord.col as usize] = color;
        }
    }
}
