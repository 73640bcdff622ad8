//! Terminal input module (engine-facing).
//!
//! Maps `crossterm` key events into [`crate::types::Intent`]s. Keys with no
//! meaning for the game map to `None` and are dropped before they reach the
//! session. [`SoftDropLatch`] releases soft drop on terminals that never send
//! key-release events.

pub mod latch;
pub mod map;

pub use tui_blocks_types as types;

pub use latch::SoftDropLatch;
pub use map::{is_decline, is_restart, key_to_intent, should_quit};
