//! Key mapping from terminal events to discrete commands.

use crate::types::{Command, Direction};
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

/// Map a key press to a command.
///
/// Arrows and space drive the active piece, `w`/`a`/`s`/`d` steer the snake,
/// Escape, `q` and Ctrl-C quit.
pub fn map_key(key: KeyEvent) -> Option<Command> {
    if should_quit(key) {
        return Some(Command::Quit);
    }

    match key.code {
        // Piece
        KeyCode::Left => Some(Command::PieceLeft),
        KeyCode::Right => Some(Command::PieceRight),
        KeyCode::Down => Some(Command::PieceDown),
        KeyCode::Up => Some(Command::PieceRotate),
        KeyCode::Char(' ') => Some(Command::PieceHardDrop),

        // Snake
        KeyCode::Char('w') | KeyCode::Char('W') => Some(Command::Steer(Direction::Up)),
        KeyCode::Char('s') | KeyCode::Char('S') => Some(Command::Steer(Direction::Down)),
        KeyCode::Char('a') | KeyCode::Char('A') => Some(Command::Steer(Direction::Left)),
        KeyCode::Char('d') | KeyCode::Char('D') => Some(Command::Steer(Direction::Right)),

        _ => None,
    }
}

/// Check if key should end the session.
pub fn should_quit(key: KeyEvent) -> bool {
    matches!(
        key.code,
        KeyCode::Esc | KeyCode::Char('q') | KeyCode::Char('Q')
    ) || (key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL))
}
