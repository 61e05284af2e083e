//! Grid Arcade (workspace facade crate).
//!
//! Re-exports the member crates under one roof as
//! `grid_arcade::{core,engine,input,term,types}` and ships the built-in game
//! scripts that drive the engine.

pub mod script;

pub use grid_arcade_core as core;
pub use grid_arcade_engine as engine;
pub use grid_arcade_input as input;
pub use grid_arcade_term as term;
pub use grid_arcade_types as types;
