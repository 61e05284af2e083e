//! The imperative engine API driven by game scripts.
//!
//! One call per logical action; every call is synchronous and returns at once.
//! A frame is `poll_events` -> script calls -> `present_frame`.

use std::time::{Duration, Instant};

use tracing::{info, warn};

use crate::core::{EntityId, World, WorldSnapshot};
use crate::error::EngineError;
use crate::input::{CommandBatch, CrosstermSource, EventSource};
use crate::presenter::{Presenter, TerminalPresenter};
use crate::types::{Command, AUTO_DROP_MS};

/// Knobs for a new engine session
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EngineConfig {
    /// Seed for piece selection and food placement
    pub seed: u32,
    /// Auto-drop interval of the active piece
    pub auto_drop_ms: u32,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            seed: 1,
            auto_drop_ms: AUTO_DROP_MS,
        }
    }
}

/// The calls a game script may make.
///
/// Object safe, so scripts can be chosen at run time and driven through
/// `&mut dyn GameApi` whatever the engine's input and output types are.
pub trait GameApi {
    fn spawn_block(&mut self, kind: &str, x: i32, y: i32) -> Option<EntityId>;
    fn move_entity(&mut self, id: EntityId, dx: i32, dy: i32) -> bool;
    fn rotate_entity(&mut self, id: EntityId) -> bool;
    fn drop_entity(&mut self, id: EntityId) -> bool;
    fn is_game_ended(&self) -> bool;
    fn set_score(&mut self, value: i64);
    fn add_score(&mut self, delta: i64) -> i64;
    fn end_game(&mut self, reason: &str);
    fn draw_text(&self, text: &str, x: i32, y: i32);
}

pub struct Engine<E = CrosstermSource, P = TerminalPresenter> {
    world: World,
    events: E,
    presenter: P,
    batch: CommandBatch,
    snapshot: WorldSnapshot,
    last_poll: Option<Instant>,
}

impl<E: EventSource, P: Presenter> Engine<E, P> {
    /// Acquire the presentation surface and start from a clean world.
    pub fn init(config: EngineConfig, events: E, mut presenter: P) -> Result<Self, EngineError> {
        presenter.begin().map_err(EngineError::Init)?;
        info!(
            seed = config.seed,
            auto_drop_ms = config.auto_drop_ms,
            "engine initialized"
        );

        Ok(Self {
            world: World::with_auto_drop(config.seed, config.auto_drop_ms),
            events,
            presenter,
            batch: CommandBatch::new(),
            snapshot: WorldSnapshot::default(),
            last_poll: None,
        })
    }

    /// Release the presentation surface. The world is discarded with the engine.
    pub fn shutdown(mut self) -> Result<(), EngineError> {
        info!(
            score = self.world.score(),
            ended = self.world.is_game_ended(),
            "engine shutdown"
        );
        self.world.reset();
        self.presenter.end().map_err(EngineError::Shutdown)
    }

    /// Drain input, apply it, advance the auto-drop timer by the wall-clock
    /// time since the previous poll. Returns false on quit or when the game ended.
    pub fn poll_events(&mut self) -> bool {
        let now = Instant::now();
        let elapsed = self
            .last_poll
            .map(|last| now.duration_since(last))
            .unwrap_or_default();
        self.last_poll = Some(now);
        self.poll_events_after(elapsed)
    }

    /// `poll_events` with an explicit elapsed time.
    ///
    /// The elapsed time is credited to the auto-drop timer before any command
    /// runs, so a soft drop or a fresh spawn this frame restarts the interval.
    pub fn poll_events_after(&mut self, elapsed: Duration) -> bool {
        let elapsed_ms = u32::try_from(elapsed.as_millis()).unwrap_or(u32::MAX);
        self.world.advance_clock(elapsed_ms);

        self.batch.clear();
        if let Err(err) = self.events.drain(&mut self.batch) {
            warn!(?err, "input poll failed");
        }

        for &command in self.batch.iter() {
            if command == Command::Quit {
                info!("quit requested");
                return false;
            }
            self.world.apply_command(command);
        }

        self.world.apply_gravity();

        !self.world.is_game_ended()
    }

    pub fn spawn_block(&mut self, kind: &str, x: i32, y: i32) -> Option<EntityId> {
        self.world.spawn_block(kind, x, y)
    }

    pub fn move_entity(&mut self, id: EntityId, dx: i32, dy: i32) -> bool {
        self.world.move_entity(id, dx, dy)
    }

    pub fn rotate_entity(&mut self, id: EntityId) -> bool {
        self.world.rotate_entity(id)
    }

    pub fn drop_entity(&mut self, id: EntityId) -> bool {
        self.world.drop_entity(id)
    }

    pub fn is_game_ended(&self) -> bool {
        self.world.is_game_ended()
    }

    pub fn set_score(&mut self, value: i64) {
        self.world.set_score(value);
    }

    pub fn add_score(&mut self, delta: i64) -> i64 {
        self.world.add_score(delta)
    }

    pub fn end_game(&mut self, reason: &str) {
        self.world.end_game(reason);
    }

    /// Hand the current state to the presenter. Never mutates the world.
    pub fn present_frame(&mut self) -> Result<(), EngineError> {
        self.world.snapshot_into(&mut self.snapshot);
        self.presenter
            .present(&self.snapshot)
            .map_err(EngineError::Present)
    }

    /// Diagnostic text; logged only.
    pub fn draw_text(&self, text: &str, x: i32, y: i32) {
        info!(text, x, y, "draw text");
    }

    pub fn score(&self) -> i64 {
        self.world.score()
    }

    pub fn world(&self) -> &World {
        &self.world
    }

    pub fn presenter(&self) -> &P {
        &self.presenter
    }
}

impl<E: EventSource, P: Presenter> GameApi for Engine<E, P> {
    fn spawn_block(&mut self, kind: &str, x: i32, y: i32) -> Option<EntityId> {
        Engine::spawn_block(self, kind, x, y)
    }

    fn move_entity(&mut self, id: EntityId, dx: i32, dy: i32) -> bool {
        Engine::move_entity(self, id, dx, dy)
    }

    fn rotate_entity(&mut self, id: EntityId) -> bool {
        Engine::rotate_entity(self, id)
    }

    fn drop_entity(&mut self, id: EntityId) -> bool {
        Engine::drop_entity(self, id)
    }

    fn is_game_ended(&self) -> bool {
        Engine::is_game_ended(self)
    }

    fn set_score(&mut self, value: i64) {
        Engine::set_score(self, value);
    }

    fn add_score(&mut self, delta: i64) -> i64 {
        Engine::add_score(self, delta)
    }

    fn end_game(&mut self, reason: &str) {
        Engine::end_game(self, reason);
    }

    fn draw_text(&self, text: &str, x: i32, y: i32) {
        Engine::draw_text(self, text, x, y);
    }
}
