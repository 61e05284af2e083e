//! Terminal input module (engine-facing).
//!
//! Maps `crossterm` key events into discrete [`crate::types::Command`]s and
//! provides the [`EventSource`] seam the engine polls once per frame.

pub mod map;
pub mod source;

pub use grid_arcade_types as types;

pub use map::{map_key, should_quit};
pub use source::{CommandBatch, CrosstermSource, EventSource, ScriptedSource, MAX_COMMANDS_PER_POLL};
