//! Core simulation - pure, deterministic, and testable
//!
//! This crate holds the shared grid world and both rulesets that run on it.
//! It has **no dependencies** on rendering, input, or wall-clock time:
//!
//! - **Deterministic**: the same seed produces identical spawns and food placement
//! - **Testable**: time is passed in as elapsed milliseconds, nothing sleeps
//! - **Fail-quiet**: bad ids and illegal moves are logged no-ops, never panics
//!
//! # Module Structure
//!
//! - [`board`]: 10x20 grid of settled markers with the clear-shift-recheck line clear
//! - [`shapes`]: the seven-shape catalog and on-demand rotation
//! - [`entity`]: entity records and the id-keyed store
//! - [`session`]: score, terminal flag, id allocator, selected mode
//! - [`tetris`]: spawn, collision, auto-drop and fixing of the active piece
//! - [`snake`]: heading, wrap-around advance, growth and food placement
//! - [`world`]: the context object owning all of the above
//!
//! # Game Rules
//!
//! - **Tetris**: one active piece at a time, no wall kicks, no lock delay. A blocked
//!   downward move fixes the piece; 1/2/3/4+ cleared rows score 100/300/500/800.
//! - **Snake**: one snake, turns only across the current axis, wrap-around edges,
//!   +1 point and one extra segment per food eaten.
//!
//! The first spawn picks which ruleset the session plays.
//!
//! # Example
//!
//! ```
//! use grid_arcade_core::World;
//!
//! let mut world = World::new(12345);
//! let piece = world.spawn_block("I", 0, 0).unwrap();
//!
//! world.move_entity(piece, 1, 0);
//! world.rotate_entity(piece);
//! world.drop_entity(piece);
//!
//! assert_eq!(world.board().occupied_count(), 4);
//! assert!(world.active_piece().is_some()); // the next piece spawned
//! ```

pub mod board;
pub mod entity;
pub mod rng;
pub mod scoring;
pub mod session;
pub mod shapes;
pub mod snake;
pub mod snapshot;
pub mod tetris;
pub mod world;

pub use grid_arcade_types as types;

// Re-export commonly used types for convenience
pub use board::{Board, ClearedRows, MarkerGrid};
pub use entity::{Entity, EntityId, EntityStore};
pub use rng::SimpleRng;
pub use scoring::line_clear_score;
pub use session::Session;
pub use shapes::{rotate, Shape, SHAPES};
pub use snake::{wrap_cell, Snake};
pub use snapshot::WorldSnapshot;
pub use tetris::{DropTimer, SPAWN_X, SPAWN_Y};
pub use world::World;
