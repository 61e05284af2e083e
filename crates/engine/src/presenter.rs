//! Presenters: read-only consumers of the world snapshot.

use std::io;

use tracing::{error, trace};

use crate::core::WorldSnapshot;
use crate::term::{FrameBuffer, GameView, TerminalRenderer, Viewport};

/// Fallback size when the terminal cannot report one
const FALLBACK_VIEWPORT: (u16, u16) = (80, 24);

/// Turns snapshots into output. Must not feed anything back into the world.
pub trait Presenter {
    /// Acquire the output surface.
    fn begin(&mut self) -> io::Result<()> {
        Ok(())
    }

    fn present(&mut self, snap: &WorldSnapshot) -> io::Result<()>;

    /// Release the output surface.
    fn end(&mut self) -> io::Result<()> {
        Ok(())
    }
}

/// Full-screen terminal output (alternate screen, raw mode).
pub struct TerminalPresenter {
    renderer: TerminalRenderer,
    view: GameView,
    fb: FrameBuffer,
    active: bool,
}

impl TerminalPresenter {
    pub fn new() -> Self {
        Self {
            renderer: TerminalRenderer::new(),
            view: GameView::default(),
            fb: FrameBuffer::new(0, 0),
            active: false,
        }
    }
}

impl Default for TerminalPresenter {
    fn default() -> Self {
        Self::new()
    }
}

impl Presenter for TerminalPresenter {
    fn begin(&mut self) -> io::Result<()> {
        self.renderer.enter()?;
        self.active = true;
        Ok(())
    }

    fn present(&mut self, snap: &WorldSnapshot) -> io::Result<()> {
        let (w, h) = self.renderer.size().unwrap_or(FALLBACK_VIEWPORT);
        self.view.render_into(snap, Viewport::new(w, h), &mut self.fb);
        self.renderer.present(&self.fb)
    }

    fn end(&mut self) -> io::Result<()> {
        if !self.active {
            return Ok(());
        }
        self.active = false;
        self.renderer.leave()
    }
}

impl Drop for TerminalPresenter {
    fn drop(&mut self) {
        if let Err(err) = self.end() {
            error!(?err, "failed to restore terminal");
        }
    }
}

/// Discards frames; keeps only counters. For headless runs and tests.
#[derive(Debug, Default, Clone)]
pub struct NullPresenter {
    frames: u64,
    last_score: Option<i64>,
}

impl NullPresenter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn frames(&self) -> u64 {
        self.frames
    }

    pub fn last_score(&self) -> Option<i64> {
        self.last_score
    }
}

impl Presenter for NullPresenter {
    fn present(&mut self, snap: &WorldSnapshot) -> io::Result<()> {
        self.frames += 1;
        self.last_score = Some(snap.score);
        trace!(
            frame = self.frames,
            score = snap.score,
            entities = snap.entities.len(),
            "frame"
        );
        Ok(())
    }
}
