//! Tetris subsystem - spawn, collision, auto-drop and fixing
//!
//! A piece goes `Spawned -> Falling -> (Locked | GameOver)`. There is no lock
//! delay: a blocked downward move fixes the piece at once, and fixing spawns the
//! next piece in the same call.

use tracing::{debug, info, warn};

use crate::entity::{Entity, EntityId};
use crate::scoring::line_clear_score;
use crate::shapes::{self, rotate, SHAPES};
use crate::types::{ShapeKind, BOARD_WIDTH, TETRIS_GAME_OVER};
use crate::world::World;

/// Spawn column of every new piece
pub const SPAWN_X: i32 = BOARD_WIDTH as i32 / 2 - 1;

/// Spawn row of every new piece
pub const SPAWN_Y: i32 = 0;

/// Polled auto-drop timer.
///
/// Time is fed in by the caller, so the timer only moves when the world is ticked.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DropTimer {
    elapsed_ms: u32,
    interval_ms: u32,
}

impl DropTimer {
    pub fn new(interval_ms: u32) -> Self {
        Self {
            elapsed_ms: 0,
            interval_ms,
        }
    }

    pub fn accumulate(&mut self, elapsed_ms: u32) {
        self.elapsed_ms = self.elapsed_ms.saturating_add(elapsed_ms);
    }

    /// The interval has been reached since the last reset.
    pub fn is_due(&self) -> bool {
        self.elapsed_ms >= self.interval_ms
    }

    pub fn reset(&mut self) {
        self.elapsed_ms = 0;
    }

    pub fn elapsed_ms(&self) -> u32 {
        self.elapsed_ms
    }

    pub fn interval_ms(&self) -> u32 {
        self.interval_ms
    }
}

impl World {
    /// True if the shape at catalog `shape_index`, placed at (x, y) with the
    /// given rotation, leaves the board or lands on a settled cell.
    ///
    /// An unknown shape index always collides.
    pub fn collides(&self, x: i32, y: i32, shape_index: usize, rotation: u8) -> bool {
        let Some(shape) = shapes::shape(shape_index) else {
            debug!(shape_index, "collision check with unknown shape");
            return true;
        };

        rotate(&shape.cells, rotation).iter().any(|&(dx, dy)| {
            match (x.checked_add(dx), y.checked_add(dy)) {
                (Some(cx), Some(cy)) => !self.board.is_valid(cx, cy),
                _ => true,
            }
        })
    }

    /// Collision of `piece` offset by (dx, dy); an offset past the `i32` range collides.
    fn piece_collides(&self, piece: &Entity, dx: i32, dy: i32, rotation: u8) -> bool {
        let (Some(kind), Some(x), Some(y)) =
            (piece.shape, piece.x.checked_add(dx), piece.y.checked_add(dy))
        else {
            return true;
        };
        self.collides(x, y, kind.index(), rotation)
    }

    fn random_shape(&mut self) -> ShapeKind {
        let index = self.rng.next_range(SHAPES.len() as u32) as usize;
        ShapeKind::from_index(index).unwrap_or(ShapeKind::I)
    }

    /// Create the active piece at the spawn cell, random shape when `shape` is None.
    ///
    /// A blocked spawn ends the session and creates nothing.
    pub(crate) fn spawn_piece(&mut self, shape: Option<ShapeKind>) -> Option<EntityId> {
        let kind = match shape {
            Some(kind) => kind,
            None => self.random_shape(),
        };

        if self.collides(SPAWN_X, SPAWN_Y, kind.index(), 0) {
            warn!(shape = kind.as_str(), "spawn position blocked");
            self.session.end_game(TETRIS_GAME_OVER);
            return None;
        }

        let id = self.session.alloc_id();
        self.entities
            .insert(Entity::piece(id, kind, SPAWN_X, SPAWN_Y));
        self.active_piece = Some(id);
        self.drop_timer.reset();

        info!(%id, shape = kind.as_str(), x = SPAWN_X, y = SPAWN_Y, "piece spawned");
        Some(id)
    }

    /// Move a piece by (dx, dy). Returns true if it moved.
    ///
    /// Sideways moves into a collision are ignored; a blocked downward move fixes the piece.
    pub(crate) fn shift_piece(&mut self, id: EntityId, dx: i32, dy: i32) -> bool {
        let Some(piece) = self.entities.get(id).copied() else {
            return false;
        };

        if !self.piece_collides(&piece, dx, dy, piece.rotation) {
            if let Some(piece) = self.entities.get_mut(id) {
                piece.x += dx;
                piece.y += dy;
            }
            return true;
        }

        if dy > 0 {
            self.fix_piece(id);
        }
        false
    }

    /// Player soft drop: one row down with a timer reset, or fix when blocked.
    pub(crate) fn soft_drop(&mut self) -> bool {
        let Some(id) = self.active_piece else {
            return false;
        };
        let moved = self.shift_piece(id, 0, 1);
        if moved {
            self.drop_timer.reset();
        }
        moved
    }

    /// One clockwise quarter turn in place; no-op when the result collides.
    pub(crate) fn rotate_piece(&mut self, id: EntityId) -> bool {
        let Some(piece) = self.entities.get(id).copied() else {
            return false;
        };

        let rotation = (piece.rotation + 1) % 4;
        if self.piece_collides(&piece, 0, 0, rotation) {
            return false;
        }

        if let Some(piece) = self.entities.get_mut(id) {
            piece.rotation = rotation;
        }
        debug!(%id, rotation, "piece rotated");
        true
    }

    /// Drop to the lowest legal row and fix. Returns the rows travelled.
    pub(crate) fn hard_drop(&mut self, id: EntityId) -> u32 {
        let Some(piece) = self.entities.get(id).copied() else {
            return 0;
        };

        let mut distance: i32 = 0;
        while !self.piece_collides(&piece, 0, distance + 1, piece.rotation) {
            distance += 1;
        }

        if let Some(piece) = self.entities.get_mut(id) {
            piece.y += distance;
        }
        debug!(%id, distance, "piece hard dropped");

        self.fix_piece(id);
        distance as u32
    }

    /// Fold a piece into the board, clear full rows, score them, spawn the next piece.
    ///
    /// Returns the number of rows cleared.
    pub(crate) fn fix_piece(&mut self, id: EntityId) -> usize {
        let Some(piece) = self.entities.remove(id) else {
            return 0;
        };
        if self.active_piece == Some(id) {
            self.active_piece = None;
        }

        let (Some(kind), Some(cells)) = (piece.shape, piece.piece_cells()) else {
            warn!(%id, kind = piece.kind.as_str(), "fix on entity without a shape");
            return 0;
        };

        let overlapped = self.board.settle(&cells, kind.marker());
        if overlapped > 0 {
            warn!(%id, overlapped, "piece settled over occupied cells");
        }
        info!(%id, shape = kind.as_str(), x = piece.x, y = piece.y, "piece fixed");

        let cleared = self.board.clear_full_rows();
        let lines = cleared.len();
        if lines > 0 {
            let points = line_clear_score(lines);
            info!(lines, rows = ?cleared.as_slice(), points, "rows cleared");
            self.session.add_score(points);
        }

        self.spawn_piece(None);
        lines
    }

    /// Add wall time to the auto-drop timer.
    ///
    /// Runs before the frame's commands, so a reset they cause (soft drop,
    /// next spawn) counts from the end of the frame.
    pub fn advance_clock(&mut self, elapsed_ms: u32) {
        if self.session.ended() || self.active_piece.is_none() {
            return;
        }
        self.drop_timer.accumulate(elapsed_ms);
    }

    /// One auto-drop step if the interval is due: the active piece moves down
    /// a row, or is fixed if it cannot. Returns true if a step happened.
    pub fn apply_gravity(&mut self) -> bool {
        if self.session.ended() || !self.drop_timer.is_due() {
            return false;
        }
        let Some(id) = self.active_piece else {
            return false;
        };

        self.drop_timer.reset();
        self.shift_piece(id, 0, 1);
        true
    }

    /// `advance_clock` then `apply_gravity`, for callers with no commands in between.
    pub fn tick(&mut self, elapsed_ms: u32) -> bool {
        self.advance_clock(elapsed_ms);
        self.apply_gravity()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{EntityKind, BOARD_HEIGHT};

    fn tetris_world() -> (World, EntityId) {
        let mut world = World::new(42);
        let id = world.spawn_block("I", 0, 0).expect("piece");
        (world, id)
    }

    #[test]
    fn test_drop_timer_accumulates() {
        let mut timer = DropTimer::new(1000);
        timer.accumulate(400);
        timer.accumulate(599);
        assert!(!timer.is_due());
        timer.accumulate(1);
        assert!(timer.is_due());
        timer.reset();
        assert_eq!(timer.elapsed_ms(), 0);
    }

    #[test]
    fn test_unknown_shape_always_collides() {
        let world = World::new(1);
        assert!(world.collides(4, 5, 7, 0));
        assert!(world.collides(4, 5, usize::MAX, 0));
        assert!(!world.collides(4, 5, 0, 0));
    }

    #[test]
    fn test_collision_at_walls() {
        let world = World::new(1);
        // I piece horizontal spans x..x+3
        assert!(!world.collides(6, 0, 0, 0));
        assert!(world.collides(7, 0, 0, 0));
        assert!(world.collides(-1, 0, 0, 0));
        // Rotation 1 spans y-3..y
        assert!(world.collides(0, 2, 0, 1));
        assert!(!world.collides(0, 3, 0, 1));
        assert!(world.collides(0, BOARD_HEIGHT as i32, 0, 1));
    }

    #[test]
    fn test_spawn_at_spawn_cell() {
        let (world, id) = tetris_world();
        let piece = world.entity(id).expect("entity");
        assert_eq!((piece.x, piece.y), (SPAWN_X, SPAWN_Y));
        assert_eq!(piece.rotation, 0);
        assert_eq!(piece.kind, EntityKind::ActivePiece);
        assert_eq!(world.active_piece(), Some(id));
    }

    #[test]
    fn test_sideways_collision_is_noop() {
        let (mut world, id) = tetris_world();
        for _ in 0..10 {
            world.shift_piece(id, -1, 0);
        }
        assert_eq!(world.entity(id).map(|e| e.x), Some(0));
        assert!(!world.shift_piece(id, -1, 0));
        assert_eq!(world.active_piece(), Some(id));
    }

    #[test]
    fn test_blocked_down_move_fixes_and_respawns() {
        let (mut world, id) = tetris_world();
        for _ in 0..19 {
            assert!(world.shift_piece(id, 0, 1));
        }
        assert!(!world.shift_piece(id, 0, 1));

        assert!(world.entity(id).is_none());
        assert_eq!(world.board().occupied_count(), 4);
        let next = world.active_piece().expect("next piece");
        assert_ne!(next, id);
    }

    #[test]
    fn test_rotation_blocked_by_floor_is_noop() {
        let (mut world, id) = tetris_world();
        // Rotation 1 of the I piece reaches three rows up from the origin.
        assert!(!world.rotate_piece(id));
        assert_eq!(world.entity(id).map(|e| e.rotation), Some(0));

        world.shift_piece(id, 0, 3);
        assert!(world.rotate_piece(id));
        assert_eq!(world.entity(id).map(|e| e.rotation), Some(1));
    }

    #[test]
    fn test_blocked_spawn_ends_game_without_entity() {
        let mut world = World::new(3);
        for x in 0..BOARD_WIDTH as i32 {
            world.board_mut().set(x, 0, 1);
            world.board_mut().set(x, 1, 1);
        }
        // Leave a gap so no row clears on the first fix.
        world.board_mut().set(0, 1, 0);

        assert_eq!(world.spawn_block("O", 0, 0), None);
        assert!(world.is_game_ended());
        assert_eq!(world.end_reason(), Some(TETRIS_GAME_OVER));
        assert!(world.entities().is_empty());
    }

    #[test]
    fn test_out_of_range_offsets_collide() {
        let (mut world, id) = tetris_world();

        assert!(world.collides(i32::MAX, 0, 0, 0));
        assert!(world.collides(0, i32::MIN, 0, 1));
        assert!(!world.shift_piece(id, i32::MAX, 0));
        assert!(!world.shift_piece(id, i32::MIN, 0));
        assert_eq!(world.entity(id).map(|e| e.position()), Some((SPAWN_X, SPAWN_Y)));
    }

    #[test]
    fn test_soft_drop_restarts_the_interval() {
        let (mut world, id) = tetris_world();

        world.advance_clock(600);
        assert!(world.soft_drop());
        assert!(!world.apply_gravity());

        assert!(!world.tick(999));
        assert_eq!(world.entity(id).map(|e| e.y), Some(1));
        assert!(world.tick(1));
        assert_eq!(world.entity(id).map(|e| e.y), Some(2));
    }

    #[test]
    fn test_tick_drops_after_interval() {
        let (mut world, id) = tetris_world();
        assert!(!world.tick(999));
        assert_eq!(world.entity(id).map(|e| e.y), Some(0));
        assert!(world.tick(1));
        assert_eq!(world.entity(id).map(|e| e.y), Some(1));
        assert_eq!(world.drop_timer().elapsed_ms(), 0);
    }
}
