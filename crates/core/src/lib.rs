//! Core simulation - pure, deterministic, and testable
//!
//! This crate contains the board rules, the piece catalog and the session state
//! machine. It has no dependency on terminals, input devices or files: callers feed
//! intents and elapsed time in, and read snapshots and events out.
//!
//! # Module Structure
//!
//! - [`pieces`]: the seven shapes and their hand-authored rotation frames
//! - [`piece`]: the active piece (shape, rotation, anchor, color)
//! - [`board`]: locked cells, placement validity, row clearing, loss test
//! - [`rng`]: seeded shape/color generation with the distinct-color rule
//! - [`scoring`]: points per cleared row
//! - [`game_state`]: the [`Session`] driver
//! - [`snapshot`]: read-only views for renderers
//!
//! # Example
//!
//! ```
//! use tui_blocks_core::Session;
//! use tui_blocks_types::{GameConfig, Intent};
//!
//! let mut session = Session::new(GameConfig::default(), 12345).unwrap();
//!
//! // Intents are applied first, then gravity.
//! let outcome = session.tick(270, [Intent::MoveLeft, Intent::RotateCw]);
//! assert!(!outcome.terminal);
//! assert_eq!(session.score(), 0);
//!
//! let snapshot = session.snapshot();
//! assert_eq!(snapshot.grid.len(), 10 * 20);
//! ```

pub mod board;
pub mod game_state;
pub mod piece;
pub mod pieces;
pub mod rng;
pub mod scoring;
pub mod snapshot;

pub use tui_blocks_types as types;

pub use board::Board;
pub use game_state::{GameOverReason, Phase, Session, SessionEvent, TickOutcome};
pub use piece::{ActivePiece, PieceCells};
pub use pieces::{frame_count, occupied_cells, FrameCells, FRAME_SIZE};
pub use rng::PieceGenerator;
pub use scoring::clear_score;
pub use snapshot::{GameSnapshot, PieceSnapshot};
