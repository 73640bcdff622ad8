//! TUI Blocks (workspace facade crate).
//!
//! Re-exports the workspace crates under `tui_blocks::{core,input,term,types}` and
//! holds the pieces the binary needs around them: run settings from the
//! environment and the optional JSON-lines event log.

pub use tui_blocks_core as core;
pub use tui_blocks_input as input;
pub use tui_blocks_term as term;
pub use tui_blocks_types as types;

pub mod event_log;
pub mod run_config;

pub use event_log::EventLog;
pub use run_config::RunConfig;
