//! Terminal presentation layer.
//!
//! A small, game-oriented rendering layer: snapshots of the world are drawn
//! into a framebuffer of styled cells, which is then flushed to the terminal.
//! It never mutates the world.
//!
//! - [`game_view`]: snapshot to framebuffer (board, entities, score, overlay)
//! - [`segments`]: seven-segment numeral strip for the score
//! - [`renderer`]: crossterm output rewriting only changed row spans

pub mod fb;
pub mod game_view;
pub mod renderer;
pub mod segments;

pub use grid_arcade_core as core;
pub use grid_arcade_types as types;

pub use fb::{Cell, CellStyle, FrameBuffer, Rgb};
pub use game_view::{GameView, Viewport};
pub use renderer::{write_changes, write_frame, TerminalRenderer};
