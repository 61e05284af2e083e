//! Snapshot - what a presenter sees of the world
//!
//! A plain copy of the settled grid, the live entities and the session flags.
//! `World::snapshot_into` refills one in place each frame, so presenting never
//! borrows the world and never writes back into it.

use crate::board::MarkerGrid;
use crate::entity::Entity;
use crate::types::{Direction, GameMode, BOARD_HEIGHT, BOARD_WIDTH};

/// Read-only copy of everything the presentation layer draws.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WorldSnapshot {
    pub board: MarkerGrid,
    pub entities: Vec<Entity>,
    pub score: i64,
    pub ended: bool,
    pub mode: Option<GameMode>,
    pub heading: Direction,
}

impl Default for WorldSnapshot {
    fn default() -> Self {
        Self {
            board: [[0u8; BOARD_WIDTH as usize]; BOARD_HEIGHT as usize],
            entities: Vec::new(),
            score: 0,
            ended: false,
            mode: None,
            heading: Direction::Right,
        }
    }
}
