//! Event sources: where the engine's discrete commands come from.

use std::collections::VecDeque;
use std::io;
use std::time::Duration;

use arrayvec::ArrayVec;
use crossterm::event::{self, Event, KeyEventKind};

use crate::map::map_key;
use crate::types::Command;

/// Most commands handed out by a single drain.
///
/// Anything beyond stays queued (scripted) or in the terminal buffer (crossterm)
/// until the next frame.
pub const MAX_COMMANDS_PER_POLL: usize = 32;

pub type CommandBatch = ArrayVec<Command, MAX_COMMANDS_PER_POLL>;

/// A non-blocking supplier of input commands.
pub trait EventSource {
    /// Drain whatever is pending right now into `out`.
    fn drain(&mut self, out: &mut CommandBatch) -> io::Result<()>;
}

/// Keyboard input from the controlling terminal.
///
/// Only key presses count; terminal auto-repeat and releases are ignored.
#[derive(Debug, Default)]
pub struct CrosstermSource;

impl CrosstermSource {
    pub fn new() -> Self {
        Self
    }
}

impl EventSource for CrosstermSource {
    fn drain(&mut self, out: &mut CommandBatch) -> io::Result<()> {
        while !out.is_full() && event::poll(Duration::ZERO)? {
            if let Event::Key(key) = event::read()? {
                if key.kind != KeyEventKind::Press {
                    continue;
                }
                if let Some(command) = map_key(key) {
                    out.push(command);
                }
            }
        }
        Ok(())
    }
}

/// Pre-recorded commands, one batch per poll.
///
/// Used for headless runs and tests.
#[derive(Debug, Default, Clone)]
pub struct ScriptedSource {
    frames: VecDeque<Vec<Command>>,
}

impl ScriptedSource {
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue the commands delivered by the next poll not yet scripted.
    pub fn push_frame(&mut self, commands: impl IntoIterator<Item = Command>) -> &mut Self {
        self.frames.push_back(commands.into_iter().collect());
        self
    }

    /// Frames left to deliver
    pub fn remaining(&self) -> usize {
        self.frames.len()
    }
}

impl EventSource for ScriptedSource {
    fn drain(&mut self, out: &mut CommandBatch) -> io::Result<()> {
        let Some(frame) = self.frames.front_mut() else {
            return Ok(());
        };

        let take = frame.len().min(out.remaining_capacity());
        out.extend(frame.drain(..take));
        if frame.is_empty() {
            self.frames.pop_front();
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Direction;

    #[test]
    fn scripted_source_delivers_one_frame_per_drain() {
        let mut source = ScriptedSource::new();
        source
            .push_frame([Command::PieceLeft, Command::PieceRotate])
            .push_frame([Command::Steer(Direction::Up)]);

        let mut batch = CommandBatch::new();
        source.drain(&mut batch).unwrap();
        assert_eq!(
            batch.as_slice(),
            &[Command::PieceLeft, Command::PieceRotate]
        );

        batch.clear();
        source.drain(&mut batch).unwrap();
        assert_eq!(batch.as_slice(), &[Command::Steer(Direction::Up)]);

        batch.clear();
        source.drain(&mut batch).unwrap();
        assert!(batch.is_empty());
        assert_eq!(source.remaining(), 0);
    }

    #[test]
    fn oversized_frame_spills_into_next_drain() {
        let mut source = ScriptedSource::new();
        source.push_frame(std::iter::repeat(Command::PieceDown).take(MAX_COMMANDS_PER_POLL + 3));

        let mut batch = CommandBatch::new();
        source.drain(&mut batch).unwrap();
        assert!(batch.is_full());

        batch.clear();
        source.drain(&mut batch).unwrap();
        assert_eq!(batch.len(), 3);
    }
}
