//! Session state - score, terminal flag, id allocator, selected mode

use tracing::{info, warn};

use crate::entity::EntityId;
use crate::types::GameMode;

#[derive(Debug, Clone)]
pub struct Session {
    score: i64,
    ended: bool,
    end_reason: Option<String>,
    next_id: u32,
    mode: Option<GameMode>,
}

impl Session {
    pub fn new() -> Self {
        Self {
            score: 0,
            ended: false,
            end_reason: None,
            next_id: 1,
            mode: None,
        }
    }

    pub fn score(&self) -> i64 {
        self.score
    }

    pub fn ended(&self) -> bool {
        self.ended
    }

    /// Reason recorded by the first `end_game` call
    pub fn end_reason(&self) -> Option<&str> {
        self.end_reason.as_deref()
    }

    pub fn mode(&self) -> Option<GameMode> {
        self.mode
    }

    /// Unconditional; negative deltas are allowed.
    pub fn add_score(&mut self, delta: i64) -> i64 {
        self.score = self.score.saturating_add(delta);
        info!(delta, score = self.score, "score added");
        self.score
    }

    pub fn set_score(&mut self, value: i64) {
        self.score = value;
        info!(score = self.score, "score set");
    }

    /// Flip the terminal flag. Returns true only for the call that ended the session.
    pub fn end_game(&mut self, reason: &str) -> bool {
        info!(reason, "game ended");
        if self.ended {
            return false;
        }
        self.ended = true;
        self.end_reason = Some(reason.to_owned());
        true
    }

    /// Hand out the next entity id
    pub fn alloc_id(&mut self) -> EntityId {
        let id = EntityId(self.next_id);
        self.next_id = self.next_id.wrapping_add(1);
        id
    }

    /// The first call picks the mode; later calls succeed only for the same mode.
    pub fn select_mode(&mut self, mode: GameMode) -> bool {
        match self.mode {
            None => {
                info!(mode = mode.as_str(), "game mode selected");
                self.mode = Some(mode);
                true
            }
            Some(current) if current == mode => true,
            Some(current) => {
                warn!(
                    requested = mode.as_str(),
                    current = current.as_str(),
                    "session already plays another mode"
                );
                false
            }
        }
    }
}

impl Default for Session {
    fn default() -> Self {
        Self::new()
    }
}
