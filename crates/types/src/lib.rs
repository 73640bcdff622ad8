//! Shared types - coordinates, piece identities, player intents and configuration
//!
//! Everything here is plain data: the simulation core, the input mapping and the
//! terminal renderer all speak in these types.
//!
//! # Coordinates
//!
//! - **Columns** grow to the right, `0..cols`
//! - **Rows** grow downward, `0..rows`
//! - **Negative rows** form the spawn buffer above the visible board
//!
//! # Default Configuration
//!
//! | Setting | Default | Description |
//! |---------|---------|-------------|
//! | `cols` | 10 | Board width in cells |
//! | `rows` | 20 | Board height in cells |
//! | `cell_size` | 2 | Terminal columns per board cell |
//! | `palette` | 7 entries | Background plus six piece colors |
//! | `row_score` | 10 | Points per cleared row |
//! | `fall_interval_normal_ms` | 270 | Gravity interval |
//! | `fall_interval_soft_ms` | 50 | Gravity interval while soft drop is held |
//!
//! # Examples
//!
//! ```
//! use tui_blocks_types::{GameConfig, Intent, ShapeId};
//!
//! let shape = ShapeId::from_str("t").unwrap();
//! assert_eq!(shape, ShapeId::T);
//!
//! // Unknown intent names are simply not recognized.
//! assert_eq!(Intent::from_str("rotateCw"), Some(Intent::RotateCw));
//! assert_eq!(Intent::from_str("hardDrop"), None);
//!
//! let config = GameConfig::default();
//! assert!(config.validate().is_ok());
//! assert_eq!(config.piece_color_count(), 6);
//! ```

pub mod config;

use serde::{Deserialize, Serialize};

pub use config::{
    ConfigError, GameConfig, Rgb, DEFAULT_PALETTE, MAX_CELL_SIZE, MIN_PIECE_COLORS,
};

/// Default board width in cells
pub const DEFAULT_COLS: u8 = 10;

/// Default board height in cells
pub const DEFAULT_ROWS: u8 = 20;

/// Default points awarded per cleared row
pub const DEFAULT_ROW_SCORE: u32 = 10;

/// Default gravity interval (milliseconds)
pub const DEFAULT_FALL_INTERVAL_NORMAL_MS: u32 = 270;

/// Default gravity interval while soft drop is held (milliseconds)
pub const DEFAULT_FALL_INTERVAL_SOFT_MS: u32 = 50;

/// Fixed timestep used by the terminal runner (~60 FPS)
pub const TICK_MS: u32 = 16;

/// Side length of every piece frame mask
pub const FRAME_SIZE: usize = 5;

/// Soft drop is released automatically after this long without a repeat,
/// for terminals that never report key release
pub const SOFT_DROP_GRACE_MS: u32 = 150;

/// Index into the configured palette.
pub type ColorId = u8;

/// Palette index reserved for empty cells.
pub const BACKGROUND: ColorId = 0;

/// A grid coordinate. Rows below zero are the spawn buffer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Coord {
    pub col: i16,
    pub row: i16,
}

impl Coord {
    pub const fn new(col: i16, row: i16) -> Self {
        Self { col, row }
    }

    /// This coordinate moved by (dcol, drow)
    pub const fn offset(self, dcol: i16, drow: i16) -> Self {
        Self {
            col: self.col + dcol,
            row: self.row + drow,
        }
    }
}

/// The seven tetromino shapes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ShapeId {
    I,
    O,
    S,
    Z,
    L,
    J,
    T,
}

impl ShapeId {
    pub const ALL: [ShapeId; 7] = [
        ShapeId::I,
        ShapeId::O,
        ShapeId::S,
        ShapeId::Z,
        ShapeId::L,
        ShapeId::J,
        ShapeId::T,
    ];

    /// Parse shape from string (case-insensitive)
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "i" => Some(ShapeId::I),
            "o" => Some(ShapeId::O),
            "s" => Some(ShapeId::S),
            "z" => Some(ShapeId::Z),
            "l" => Some(ShapeId::L),
            "j" => Some(ShapeId::J),
            "t" => Some(ShapeId::T),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            ShapeId::I => "i",
            ShapeId::O => "o",
            ShapeId::S => "s",
            ShapeId::Z => "z",
            ShapeId::L => "l",
            ShapeId::J => "j",
            ShapeId::T => "t",
        }
    }
}

/// Rotation direction
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Turn {
    Cw,
    Ccw,
}

impl Turn {
    pub fn reversed(self) -> Self {
        match self {
            Turn::Cw => Turn::Ccw,
            Turn::Ccw => Turn::Cw,
        }
    }

    /// Frame index step: +1 clockwise, -1 counter-clockwise
    pub fn step(self) -> isize {
        match self {
            Turn::Cw => 1,
            Turn::Ccw => -1,
        }
    }
}

/// A discrete player intent, applied at the start of a tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Intent {
    MoveLeft,
    MoveRight,
    RotateCw,
    SoftDropOn,
    SoftDropOff,
}

impl Intent {
    /// Parse an intent name. Unrecognized names yield `None` and are meant to be dropped.
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "moveleft" | "move_left" => Some(Intent::MoveLeft),
            "moveright" | "move_right" => Some(Intent::MoveRight),
            "rotatecw" | "rotate_cw" => Some(Intent::RotateCw),
            "softdropon" | "soft_drop_on" => Some(Intent::SoftDropOn),
            "softdropoff" | "soft_drop_off" => Some(Intent::SoftDropOff),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Intent::MoveLeft => "moveLeft",
            Intent::MoveRight => "moveRight",
            Intent::RotateCw => "rotateCw",
            Intent::SoftDropOn => "softDropOn",
            Intent::SoftDropOff => "softDropOff",
        }
    }
}
