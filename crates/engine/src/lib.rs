//! Engine facade: the call surface game scripts use.
//!
//! [`Engine`] ties a [`World`](crate::core::World) to an input
//! [`EventSource`](crate::input::EventSource) and a [`Presenter`].
//!
//! ```
//! use grid_arcade_engine::{Engine, EngineConfig, NullPresenter};
//! use grid_arcade_engine::input::ScriptedSource;
//!
//! let mut engine = Engine::init(EngineConfig::default(), ScriptedSource::new(), NullPresenter::new())?;
//! let piece = engine.spawn_block("Tetris", 0, 0).unwrap();
//! engine.drop_entity(piece);
//! assert!(engine.poll_events());
//! engine.present_frame()?;
//! engine.shutdown()?;
//! # Ok::<(), grid_arcade_engine::EngineError>(())
//! ```

pub mod api;
pub mod error;
pub mod presenter;

pub use grid_arcade_core as core;
pub use grid_arcade_input as input;
pub use grid_arcade_term as term;
pub use grid_arcade_types as types;

pub use api::{Engine, EngineConfig, GameApi};
pub use error::EngineError;
pub use presenter::{NullPresenter, Presenter, TerminalPresenter};
