//! Terminal output: owns raw mode and the alternate screen, and writes frames.
//!
//! The terminal keeps what it last showed. After the first frame only the
//! changed span of each row is rewritten, so a moving piece costs a handful of
//! cells instead of the whole screen.

use std::io::{self, Result, Write};

use crossterm::cursor::{Hide, MoveTo, Show};
use crossterm::style::{
    Attribute, Color, Print, ResetColor, SetAttribute, SetBackgroundColor, SetForegroundColor,
};
use crossterm::terminal::{self, ClearType};
use crossterm::queue;

use crate::fb::{Cell, CellStyle, FrameBuffer, Rgb};

pub struct TerminalRenderer {
    stdout: io::Stdout,
    /// What the terminal currently shows
    shown: FrameBuffer,
    /// Next frame must be written in full
    stale: bool,
    scratch: Vec<u8>,
}

impl TerminalRenderer {
    pub fn new() -> Self {
        Self {
            stdout: io::stdout(),
            shown: FrameBuffer::new(0, 0),
            stale: true,
            scratch: Vec::with_capacity(16 * 1024),
        }
    }

    /// Terminal size in columns and rows.
    pub fn size(&self) -> Result<(u16, u16)> {
        terminal::size()
    }

    /// Raw mode, alternate screen, hidden cursor.
    pub fn enter(&mut self) -> Result<()> {
        terminal::enable_raw_mode()?;
        self.scratch.clear();
        queue!(
            self.scratch,
            terminal::EnterAlternateScreen,
            Hide,
            terminal::DisableLineWrap
        )?;
        self.stale = true;
        self.flush_scratch()
    }

    /// Undo everything `enter` did.
    pub fn leave(&mut self) -> Result<()> {
        self.scratch.clear();
        queue!(
            self.scratch,
            ResetColor,
            SetAttribute(Attribute::Reset),
            terminal::EnableLineWrap,
            Show,
            terminal::LeaveAlternateScreen
        )?;
        self.flush_scratch()?;
        terminal::disable_raw_mode()
    }

    /// Show `frame`. A size change forces a full write.
    pub fn present(&mut self, frame: &FrameBuffer) -> Result<()> {
        self.scratch.clear();
        let resized = frame.width() != self.shown.width() || frame.height() != self.shown.height();
        if self.stale || resized {
            write_frame(frame, &mut self.scratch)?;
            self.stale = false;
        } else {
            write_changes(&self.shown, frame, &mut self.scratch)?;
        }

        if !self.scratch.is_empty() {
            self.flush_scratch()?;
        }
        self.shown.copy_from(frame);
        Ok(())
    }

    fn flush_scratch(&mut self) -> Result<()> {
        self.stdout.write_all(&self.scratch)?;
        self.stdout.flush()
    }
}

impl Default for TerminalRenderer {
    fn default() -> Self {
        Self::new()
    }
}

/// Clear the screen and write every cell of `frame`.
pub fn write_frame(frame: &FrameBuffer, out: &mut Vec<u8>) -> Result<()> {
    queue!(out, terminal::Clear(ClearType::All))?;
    let mut pen = Pen::default();
    for y in 0..frame.height() {
        queue!(out, MoveTo(0, y))?;
        pen.cells(out, frame.row(y))?;
    }
    pen.finish(out)
}

/// Write only what differs between `shown` and `next` (same size).
///
/// Writes nothing at all when the frames are equal.
pub fn write_changes(shown: &FrameBuffer, next: &FrameBuffer, out: &mut Vec<u8>) -> Result<()> {
    let mut pen = Pen::default();
    for y in 0..next.height() {
        let row = next.row(y);
        let Some((start, end)) = changed_span(shown.row(y), row) else {
            continue;
        };
        queue!(out, MoveTo(start as u16, y))?;
        pen.cells(out, &row[start..=end])?;
    }
    pen.finish(out)
}

/// First and last column where the rows differ
fn changed_span(old: &[Cell], new: &[Cell]) -> Option<(usize, usize)> {
    let differs = |i: &usize| old.get(*i) != new.get(*i);
    let first = (0..new.len()).find(differs)?;
    let last = (first..new.len()).rev().find(differs).unwrap_or(first);
    Some((first, last))
}

/// Tracks the active SGR state so runs of one style cost one set of escapes.
#[derive(Default)]
struct Pen {
    style: Option<CellStyle>,
}

impl Pen {
    fn cells(&mut self, out: &mut Vec<u8>, cells: &[Cell]) -> Result<()> {
        for cell in cells {
            if self.style != Some(cell.style) {
                let CellStyle { fg, bg, bold } = cell.style;
                queue!(
                    out,
                    SetAttribute(Attribute::Reset),
                    SetForegroundColor(color(fg)),
                    SetBackgroundColor(color(bg))
                )?;
                if bold {
                    queue!(out, SetAttribute(Attribute::Bold))?;
                }
                self.style = Some(cell.style);
            }
            queue!(out, Print(cell.ch))?;
        }
        Ok(())
    }

    fn finish(self, out: &mut Vec<u8>) -> Result<()> {
        if self.style.is_some() {
            queue!(out, ResetColor, SetAttribute(Attribute::Reset))?;
        }
        Ok(())
    }
}

fn color(rgb: Rgb) -> Color {
    Color::Rgb {
        r: rgb.r,
        g: rgb.g,
        b: rgb.b,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn text(bytes: &[u8]) -> String {
        String::from_utf8_lossy(bytes).into_owned()
    }

    #[test]
    fn full_frame_writes_every_glyph() {
        let mut fb = FrameBuffer::new(2, 2);
        fb.put_str(0, 0, "AB", CellStyle::default());
        fb.put_str(0, 1, "CD", CellStyle::default());

        let mut out = Vec::new();
        write_frame(&fb, &mut out).unwrap();

        let text = text(&out);
        for ch in ['A', 'B', 'C', 'D'] {
            assert!(text.contains(ch));
        }
    }

    #[test]
    fn equal_frames_write_nothing() {
        let mut fb = FrameBuffer::new(3, 2);
        fb.put_str(0, 0, "xyz", CellStyle::default());

        let mut out = Vec::new();
        write_changes(&fb, &fb.clone(), &mut out).unwrap();
        assert!(out.is_empty());
    }

    #[test]
    fn changes_cover_only_the_changed_span() {
        let old = FrameBuffer::new(6, 1);
        let mut new = old.clone();
        new.put_char(1, 0, 'p', CellStyle::default());
        new.put_char(3, 0, 'q', CellStyle::default());

        assert_eq!(changed_span(old.row(0), new.row(0)), Some((1, 3)));

        let mut out = Vec::new();
        write_changes(&old, &new, &mut out).unwrap();
        let text = text(&out);
        assert!(text.contains('p') && text.contains('q'));
    }

    #[test]
    fn pen_sets_style_once_per_run() {
        let style = CellStyle::new(Rgb::new(1, 2, 3), Rgb::new(0, 0, 0)).bold();
        let cells = [style.into_cell('a'), style.into_cell('b'), style.into_cell('c')];

        let mut once = Vec::new();
        Pen::default().cells(&mut once, &cells[..1]).unwrap();
        let mut all = Vec::new();
        Pen::default().cells(&mut all, &cells).unwrap();

        // Two extra glyphs, no extra escapes.
        assert_eq!(all.len(), once.len() + 2);
    }
}
