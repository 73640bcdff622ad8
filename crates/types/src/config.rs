//! Game configuration - board geometry, palette, scoring and gravity timing.
//!
//! Every field has a default, so a JSON file only needs to name what it overrides:
//!
//! ```json
//! { "cols": 12, "fall_interval_normal_ms": 200 }
//! ```

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::{
    ColorId, DEFAULT_COLS, FRAME_SIZE, DEFAULT_FALL_INTERVAL_NORMAL_MS, DEFAULT_FALL_INTERVAL_SOFT_MS,
    DEFAULT_ROWS, DEFAULT_ROW_SCORE,
};

/// 24-bit RGB color.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }
}

/// Background first, then the piece colors.
pub const DEFAULT_PALETTE: [Rgb; 7] = [
    Rgb::new(0, 0, 0),
    Rgb::new(255, 0, 0),
    Rgb::new(0, 255, 0),
    Rgb::new(0, 0, 255),
    Rgb::new(255, 255, 0),
    Rgb::new(255, 165, 0),
    Rgb::new(128, 0, 128),
];

/// Fewest piece colors the spawner can work with: consecutive pieces must differ.
pub const MIN_PIECE_COLORS: usize = 2;

/// Widest board cell, in terminal columns.
pub const MAX_CELL_SIZE: u16 = 8;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("board must have at least one column and one row (got {cols}x{rows})")]
    EmptyBoard { cols: u8, rows: u8 },

    #[error("palette needs a background and at least two piece colors (got {0} entries)")]
    PaletteTooSmall(usize),

    #[error("palette has {0} entries; color ids only address 256")]
    PaletteTooLarge(usize),

    #[error("fall interval `{0}` must be greater than zero")]
    ZeroFallInterval(&'static str),

    #[error("cell size must be between 1 and 8 terminal columns (got {0})")]
    CellSizeOutOfRange(u16),

    #[error("spawn row {spawn_row} must be at least {min} and below the board height {rows}")]
    SpawnRowOutOfRange { spawn_row: i16, min: i16, rows: u8 },

    #[error("failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("invalid config JSON: {0}")]
    Parse(#[from] serde_json::Error),
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    pub cols: u8,
    pub rows: u8,
    /// Terminal columns used to draw one board cell.
    pub cell_size: u16,
    /// Index 0 is the background; the rest are piece colors.
    pub palette: Vec<Rgb>,
    pub row_score: u32,
    pub fall_interval_normal_ms: u32,
    pub fall_interval_soft_ms: u32,
    /// Anchor row of freshly spawned pieces. Negative values start in the spawn buffer.
    pub spawn_row: i16,
    /// End the session once any locked cell sits in row 0.
    pub ceiling_loss: bool,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            cols: DEFAULT_COLS,
            rows: DEFAULT_ROWS,
            cell_size: 2,
            palette: DEFAULT_PALETTE.to_vec(),
            row_score: DEFAULT_ROW_SCORE,
            fall_interval_normal_ms: DEFAULT_FALL_INTERVAL_NORMAL_MS,
            fall_interval_soft_ms: DEFAULT_FALL_INTERVAL_SOFT_MS,
            spawn_row: 0,
            ceiling_loss: false,
        }
    }
}

impl GameConfig {
    /// Parse and validate a JSON document.
    pub fn from_json_str(json: &str) -> Result<Self, ConfigError> {
        let config: GameConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Read, parse and validate a JSON config file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let text = fs::read_to_string(path)?;
        Self::from_json_str(&text)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.cols == 0 || self.rows == 0 {
            return Err(ConfigError::EmptyBoard {
                cols: self.cols,
                rows: self.rows,
            });
        }
        if self.palette.len() < MIN_PIECE_COLORS + 1 {
            return Err(ConfigError::PaletteTooSmall(self.palette.len()));
        }
        if self.palette.len() > usize::from(ColorId::MAX) + 1 {
            return Err(ConfigError::PaletteTooLarge(self.palette.len()));
        }
        if self.fall_interval_normal_ms == 0 {
            return Err(ConfigError::ZeroFallInterval("fall_interval_normal_ms"));
        }
        if self.fall_interval_soft_ms == 0 {
            return Err(ConfigError::ZeroFallInterval("fall_interval_soft_ms"));
        }
        if !(1..=MAX_CELL_SIZE).contains(&self.cell_size) {
            return Err(ConfigError::CellSizeOutOfRange(self.cell_size));
        }
        // Anchors range from one frame above the board down to its last row.
        let min = -(FRAME_SIZE as i16);
        if self.spawn_row < min || self.spawn_row >= i16::from(self.rows) {
            return Err(ConfigError::SpawnRowOutOfRange {
                spawn_row: self.spawn_row,
                min,
                rows: self.rows,
            });
        }
        Ok(())
    }

    /// Number of palette entries pieces can be drawn in.
    pub fn piece_color_count(&self) -> usize {
        self.palette.len().saturating_sub(1)
    }

    /// Palette lookup; unknown ids fall back to the background.
    pub fn color(&self, id: ColorId) -> Rgb {
        self.palette
            .get(usize::from(id))
            .or_else(|| self.palette.first())
            .copied()
            .unwrap_or_default()
    }
}
