//! World - the single mutable context shared by both rulesets
//!
//! `World` owns the Board, the Entity Store, the Session and the RNG, and is
//! the only way to mutate them. Every operation is synchronous and fails quiet:
//! unknown ids, kind mismatches and calls after the game ended return
//! `false`/`None` and log instead of panicking.

use tracing::{debug, warn};

use crate::board::Board;
use crate::entity::{Entity, EntityId, EntityStore};
use crate::rng::SimpleRng;
use crate::session::Session;
use crate::snake::Snake;
use crate::snapshot::WorldSnapshot;
use crate::tetris::DropTimer;
use crate::types::{Command, EntityKind, GameMode, SpawnRequest, AUTO_DROP_MS};

#[derive(Debug, Clone)]
pub struct World {
    pub(crate) board: Board,
    pub(crate) entities: EntityStore,
    pub(crate) session: Session,
    pub(crate) rng: SimpleRng,
    pub(crate) active_piece: Option<EntityId>,
    pub(crate) snake: Snake,
    pub(crate) drop_timer: DropTimer,
}

impl World {
    /// Empty world with the default auto-drop interval
    pub fn new(seed: u32) -> Self {
        Self::with_auto_drop(seed, AUTO_DROP_MS)
    }

    pub fn with_auto_drop(seed: u32, auto_drop_ms: u32) -> Self {
        Self {
            board: Board::new(),
            entities: EntityStore::new(),
            session: Session::new(),
            rng: SimpleRng::new(seed),
            active_piece: None,
            snake: Snake::new(),
            drop_timer: DropTimer::new(auto_drop_ms),
        }
    }

    /// Back to the initial state: empty board, no entities, score 0, not ended.
    ///
    /// The RNG keeps running so a reset session does not replay the previous one.
    pub fn reset(&mut self) {
        self.board.clear();
        self.entities.clear();
        self.session = Session::new();
        self.active_piece = None;
        self.snake = Snake::new();
        self.drop_timer.reset();
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    /// Direct board access for scenario setup in tests and benchmarks.
    #[doc(hidden)]
    pub fn board_mut(&mut self) -> &mut Board {
        &mut self.board
    }

    pub fn entities(&self) -> &EntityStore {
        &self.entities
    }

    pub fn entity(&self, id: EntityId) -> Option<&Entity> {
        self.entities.get(id)
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    pub fn score(&self) -> i64 {
        self.session.score()
    }

    pub fn is_game_ended(&self) -> bool {
        self.session.ended()
    }

    pub fn end_reason(&self) -> Option<&str> {
        self.session.end_reason()
    }

    pub fn mode(&self) -> Option<GameMode> {
        self.session.mode()
    }

    pub fn active_piece(&self) -> Option<EntityId> {
        self.active_piece
    }

    pub fn snake(&self) -> &Snake {
        &self.snake
    }

    pub fn drop_timer(&self) -> &DropTimer {
        &self.drop_timer
    }

    /// Spawn by kind string.
    ///
    /// Shape names and the aliases `Tetris`/`Block` create the active piece, or
    /// return the current one if a piece is already falling. Any other kind
    /// creates the snake head at (x, y) when there is no snake, and food after that.
    /// The first successful call locks the session to its game mode.
    pub fn spawn_block(&mut self, kind: &str, x: i32, y: i32) -> Option<EntityId> {
        if self.session.ended() {
            debug!(kind, "spawn ignored after game end");
            return None;
        }

        let request = SpawnRequest::parse(kind);
        if !self.session.select_mode(request.mode()) {
            return None;
        }

        match request {
            SpawnRequest::Piece(shape) => {
                if let Some(id) = self.active_piece {
                    debug!(%id, kind, "piece already active");
                    return Some(id);
                }
                self.spawn_piece(shape)
            }
            SpawnRequest::Snake if self.snake.is_empty() => Some(self.spawn_snake_head(x, y)),
            SpawnRequest::Snake => Some(self.spawn_food()),
        }
    }

    /// Per-entity move, dispatched on the entity kind.
    ///
    /// - active piece: shift by (dx, dy); a blocked downward move fixes it
    /// - snake head: advance one cell along the heading, (dx, dy) ignored
    /// - food: shift by (dx, dy) clamped into the board
    pub fn move_entity(&mut self, id: EntityId, dx: i32, dy: i32) -> bool {
        let Some(kind) = self.live_entity_kind(id, "move") else {
            return false;
        };

        match kind {
            EntityKind::ActivePiece => self.shift_piece(id, dx, dy),
            EntityKind::SnakeHead => self.advance_snake(),
            EntityKind::Food => self.move_clamped(id, dx, dy),
            EntityKind::SnakeBody | EntityKind::Settled => {
                debug!(%id, kind = kind.as_str(), "entity cannot be moved directly");
                false
            }
        }
    }

    /// Rotate the active piece one quarter turn clockwise.
    pub fn rotate_entity(&mut self, id: EntityId) -> bool {
        match self.live_entity_kind(id, "rotate") {
            Some(EntityKind::ActivePiece) => self.rotate_piece(id),
            Some(kind) => {
                debug!(%id, kind = kind.as_str(), "entity cannot rotate");
                false
            }
            None => false,
        }
    }

    /// Hard drop the active piece: lowest legal row, then fix.
    pub fn drop_entity(&mut self, id: EntityId) -> bool {
        match self.live_entity_kind(id, "drop") {
            Some(EntityKind::ActivePiece) => {
                self.hard_drop(id);
                true
            }
            Some(kind) => {
                debug!(%id, kind = kind.as_str(), "entity cannot drop");
                false
            }
            None => false,
        }
    }

    fn live_entity_kind(&self, id: EntityId, op: &'static str) -> Option<EntityKind> {
        if self.session.ended() {
            debug!(%id, op, "ignored after game end");
            return None;
        }
        match self.entities.get(id) {
            Some(entity) => Some(entity.kind),
            None => {
                warn!(%id, op, "unknown entity");
                None
            }
        }
    }

    /// Apply a discrete input command. Returns true if the world changed.
    pub fn apply_command(&mut self, command: Command) -> bool {
        if self.session.ended() {
            return false;
        }

        match command {
            Command::PieceLeft => self
                .active_piece
                .is_some_and(|id| self.shift_piece(id, -1, 0)),
            Command::PieceRight => self
                .active_piece
                .is_some_and(|id| self.shift_piece(id, 1, 0)),
            Command::PieceDown => self.soft_drop(),
            Command::PieceRotate => self.active_piece.is_some_and(|id| self.rotate_piece(id)),
            Command::PieceHardDrop => self.active_piece.is_some_and(|id| {
                self.hard_drop(id);
                true
            }),
            Command::Steer(direction) => self.steer_snake(direction),
            Command::Quit => false,
        }
    }

    pub fn add_score(&mut self, delta: i64) -> i64 {
        self.session.add_score(delta)
    }

    pub fn set_score(&mut self, value: i64) {
        self.session.set_score(value);
    }

    pub fn end_game(&mut self, reason: &str) -> bool {
        self.session.end_game(reason)
    }

    /// Fill a snapshot, reusing its buffers.
    pub fn snapshot_into(&self, out: &mut WorldSnapshot) {
        self.board.write_marker_grid(&mut out.board);
        out.entities.clear();
        out.entities.extend(self.entities.iter().copied());
        out.score = self.session.score();
        out.ended = self.session.ended();
        out.mode = self.session.mode();
        out.heading = self.snake.heading();
    }

    pub fn snapshot(&self) -> WorldSnapshot {
        let mut snap = WorldSnapshot::default();
        self.snapshot_into(&mut snap);
        snap
    }
}
