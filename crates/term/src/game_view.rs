//! GameView: maps a `core::WorldSnapshot` into a terminal framebuffer.
//!
//! This module is pure (no I/O). It can be unit-tested.

use crate::core::shapes::{marker_color, placed_cells, shape_of};
use crate::core::WorldSnapshot;
use crate::fb::{CellStyle, FrameBuffer, Rgb};
use crate::segments::{self, GLYPH_H};
use crate::types::{EntityKind, BOARD_HEIGHT, BOARD_WIDTH};

/// Fixed colors of the snake ruleset
pub const SNAKE_HEAD_COLOR: Rgb = Rgb::new(0, 200, 0);
pub const SNAKE_BODY_COLOR: Rgb = Rgb::new(0, 150, 0);
pub const FOOD_COLOR: Rgb = Rgb::new(255, 0, 0);
const FALLBACK_COLOR: Rgb = Rgb::new(128, 128, 128);

const PLAY_BG: Rgb = Rgb::new(30, 30, 40);

/// Terminal viewport dimensions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Viewport {
    pub width: u16,
    pub height: u16,
}

impl Viewport {
    pub fn new(width: u16, height: u16) -> Self {
        Self { width, height }
    }
}

/// Terminal view of the shared grid
pub struct GameView {
    /// Board cell width in terminal columns.
    cell_w: u16,
    /// Board cell height in terminal rows.
    cell_h: u16,
}

impl Default for GameView {
    fn default() -> Self {
        // 2x1 compensates for the usual terminal glyph aspect ratio.
        Self {
            cell_w: 2,
            cell_h: 1,
        }
    }
}

impl GameView {
    pub fn new(cell_w: u16, cell_h: u16) -> Self {
        Self {
            cell_w: cell_w.max(1),
            cell_h: cell_h.max(1),
        }
    }

    /// Render a snapshot into an existing framebuffer.
    ///
    /// Layout, top to bottom: the score strip, one blank row, the bordered board.
    pub fn render_into(&self, snap: &WorldSnapshot, viewport: Viewport, fb: &mut FrameBuffer) {
        fb.resize(viewport.width, viewport.height);
        fb.clear(CellStyle::default().into_cell(' '));

        let board_px_w = (BOARD_WIDTH as u16) * self.cell_w;
        let board_px_h = (BOARD_HEIGHT as u16) * self.cell_h;
        let frame_w = board_px_w + 2;
        let frame_h = board_px_h + 2;
        let score_h = GLYPH_H + 1;

        let start_x = viewport.width.saturating_sub(frame_w) / 2;
        let top = viewport.height.saturating_sub(frame_h + score_h) / 2;
        let start_y = top + score_h;

        let score_style = CellStyle::new(Rgb::new(255, 255, 255), Rgb::new(0, 0, 0));
        segments::draw_number(fb, start_x + 1, top, snap.score, score_style);

        let bg = CellStyle::new(Rgb::new(90, 90, 100), PLAY_BG);
        fb.fill_rect(start_x + 1, start_y + 1, board_px_w, board_px_h, ' ', bg);
        self.draw_border(fb, start_x, start_y, frame_w, frame_h);

        // Settled cells, colored by the shape that left them.
        for (y, row) in snap.board.iter().enumerate() {
            for (x, &marker) in row.iter().enumerate() {
                match marker_color(marker) {
                    Some(color) => self.draw_block(fb, start_x, start_y, x as i32, y as i32, color),
                    None => {
                        self.fill_cell_rect(fb, start_x, start_y, x as u16, y as u16, '·', bg)
                    }
                }
            }
        }

        for entity in &snap.entities {
            match (entity.kind, entity.shape) {
                (EntityKind::ActivePiece, Some(kind)) => {
                    let color = shape_of(kind).color;
                    for (x, y) in placed_cells(kind, entity.rotation, entity.x, entity.y) {
                        self.draw_block(fb, start_x, start_y, x, y, color);
                    }
                }
                // Settled pieces are already part of the board.
                (EntityKind::ActivePiece | EntityKind::Settled, _) => {}
                (kind, _) => {
                    let color = match kind {
                        EntityKind::SnakeHead => SNAKE_HEAD_COLOR,
                        EntityKind::SnakeBody => SNAKE_BODY_COLOR,
                        EntityKind::Food => FOOD_COLOR,
                        _ => FALLBACK_COLOR,
                    };
                    for dy in 0..entity.height.max(1) {
                        for dx in 0..entity.width.max(1) {
                            self.draw_block(
                                fb,
                                start_x,
                                start_y,
                                entity.x + dx,
                                entity.y + dy,
                                color,
                            );
                        }
                    }
                }
            }
        }

        if snap.ended {
            self.draw_overlay_text(fb, start_x, start_y, frame_w, frame_h, "GAME OVER");
        }
    }

    /// Convenience helper that allocates a new framebuffer.
    pub fn render(&self, snap: &WorldSnapshot, viewport: Viewport) -> FrameBuffer {
        let mut fb = FrameBuffer::new(viewport.width, viewport.height);
        self.render_into(snap, viewport, &mut fb);
        fb
    }

    /// Terminal position of board cell (x, y) given the frame origin
    pub fn cell_origin(&self, start_x: u16, start_y: u16, x: u16, y: u16) -> (u16, u16) {
        (
            start_x + 1 + x * self.cell_w,
            start_y + 1 + y * self.cell_h,
        )
    }

    fn draw_border(&self, fb: &mut FrameBuffer, x: u16, y: u16, w: u16, h: u16) {
        if w < 2 || h < 2 {
            return;
        }
        let style = CellStyle::new(Rgb::new(200, 200, 200), Rgb::new(0, 0, 0));

        fb.put_char(x, y, '┌', style);
        fb.put_char(x + w - 1, y, '┐', style);
        fb.put_char(x, y + h - 1, '└', style);
        fb.put_char(x + w - 1, y + h - 1, '┘', style);

        for dx in 1..w - 1 {
            fb.put_char(x + dx, y, '─', style);
            fb.put_char(x + dx, y + h - 1, '─', style);
        }
        for dy in 1..h - 1 {
            fb.put_char(x, y + dy, '│', style);
            fb.put_char(x + w - 1, y + dy, '│', style);
        }
    }

    /// Solid block at board cell (x, y); cells off the board are skipped.
    fn draw_block(&self, fb: &mut FrameBuffer, start_x: u16, start_y: u16, x: i32, y: i32, color: Rgb) {
        if x < 0 || x >= BOARD_WIDTH as i32 || y < 0 || y >= BOARD_HEIGHT as i32 {
            return;
        }
        let style = CellStyle::new(color, PLAY_BG).bold();
        self.fill_cell_rect(fb, start_x, start_y, x as u16, y as u16, '█', style);
    }

    fn fill_cell_rect(
        &self,
        fb: &mut FrameBuffer,
        start_x: u16,
        start_y: u16,
        cell_x: u16,
        cell_y: u16,
        ch: char,
        style: CellStyle,
    ) {
        let (px, py) = self.cell_origin(start_x, start_y, cell_x, cell_y);
        fb.fill_rect(px, py, self.cell_w, self.cell_h, ch, style);
    }

    fn draw_overlay_text(
        &self,
        fb: &mut FrameBuffer,
        start_x: u16,
        start_y: u16,
        frame_w: u16,
        frame_h: u16,
        text: &str,
    ) {
        let mid_y = start_y.saturating_add(frame_h / 2);
        let text_w = text.chars().count() as u16;
        let x = start_x.saturating_add(frame_w.saturating_sub(text_w) / 2);
        let style = CellStyle::new(Rgb::new(255, 255, 255), Rgb::new(0, 0, 0)).bold();
        fb.put_str(x, mid_y, text, style);
    }
}
