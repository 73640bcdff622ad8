//! Terminal "game renderer" module.
//!
//! Renders session snapshots into a plain framebuffer of styled characters and
//! flushes that to a `crossterm` backend. No widget or layout library is
//! involved, which keeps the board's aspect ratio under direct control (two
//! terminal columns per cell by default).

pub mod fb;
pub mod game_view;
pub mod renderer;

pub use tui_blocks_core as core;
pub use tui_blocks_types as types;

pub use fb::{Cell, CellStyle, FrameBuffer};
pub use game_view::{AnchorY, GameView, Viewport};
pub use renderer::{encode_diff_into, encode_full_into, TerminalRenderer};
