//! Built-in game scripts.
//!
//! A script owns the high-level flow of a game (`init`, `update` once per frame,
//! `end`) and talks to the engine only through [`GameApi`]. It holds no grid
//! logic of its own.

use tracing::debug;

use crate::core::EntityId;
use crate::engine::GameApi;
use crate::types::GameMode;

/// Where the snake script places the head
pub const SNAKE_START: (i32, i32) = (5, 10);

pub trait GameScript {
    fn name(&self) -> &'static str;

    /// Called once after the engine is initialized.
    fn init(&mut self, api: &mut dyn GameApi);

    /// Called once per frame, after input was polled.
    fn update(&mut self, api: &mut dyn GameApi);

    /// Called when the frame loop stops without the game having ended.
    fn end(&mut self, api: &mut dyn GameApi);
}

/// Script for the given mode
pub fn script_for(mode: GameMode) -> Box<dyn GameScript> {
    match mode {
        GameMode::Tetris => Box::new(TetrisScript::default()),
        GameMode::Snake => Box::new(SnakeScript::default()),
    }
}

/// Spawns the first piece; input and auto-drop do the rest.
#[derive(Debug, Default)]
pub struct TetrisScript {
    piece: Option<EntityId>,
}

impl GameScript for TetrisScript {
    fn name(&self) -> &'static str {
        "tetris"
    }

    fn init(&mut self, api: &mut dyn GameApi) {
        api.set_score(0);
        self.piece = api.spawn_block("Tetris", 0, 0);
        api.draw_text("TETRIS", 0, 0);
    }

    fn update(&mut self, api: &mut dyn GameApi) {
        // Fixing spawns the next piece inside the engine; ask for the current one.
        if !api.is_game_ended() {
            self.piece = api.spawn_block("Tetris", 0, 0);
        }
    }

    fn end(&mut self, api: &mut dyn GameApi) {
        debug!(piece = ?self.piece, "tetris script finished");
        api.draw_text("Bye", 0, 0);
    }
}

/// Spawns the snake and advances it one cell per frame.
#[derive(Debug, Default)]
pub struct SnakeScript {
    head: Option<EntityId>,
}

impl SnakeScript {
    pub fn head(&self) -> Option<EntityId> {
        self.head
    }
}

impl GameScript for SnakeScript {
    fn name(&self) -> &'static str {
        "snake"
    }

    fn init(&mut self, api: &mut dyn GameApi) {
        api.set_score(0);
        let (x, y) = SNAKE_START;
        self.head = api.spawn_block("Snake", x, y);
        api.draw_text("SNAKE", 0, 0);
    }

    fn update(&mut self, api: &mut dyn GameApi) {
        if let Some(head) = self.head {
            api.move_entity(head, 0, 0);
        }
    }

    fn end(&mut self, api: &mut dyn GameApi) {
        debug!(head = ?self.head, "snake script finished");
        api.draw_text("Bye", 0, 0);
    }
}
