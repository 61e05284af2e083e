use std::io;

use thiserror::Error;

/// Environment failures of the engine.
///
/// Game logic never produces these: bad ids and illegal moves are logged
/// no-ops, and the end of a game is a state, not an error.
#[derive(Debug, Error)]
pub enum EngineError {
    #[error("failed to acquire the presentation surface: {0}")]
    Init(#[source] io::Error),
    #[error("failed to present frame: {0}")]
    Present(#[source] io::Error),
    #[error("failed to release the presentation surface: {0}")]
    Shutdown(#[source] io::Error),
}
