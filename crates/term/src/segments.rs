//! Seven-segment numeral strip for the score readout.
//!
//! Each glyph is `GLYPH_W x GLYPH_H` terminal cells:
//!
//! ```text
//!  aaa
//!  f b
//!  ggg
//!  e c
//!  ddd
//! ```

use crate::fb::{CellStyle, FrameBuffer};

pub const GLYPH_W: u16 = 3;
pub const GLYPH_H: u16 = 5;

/// Blank columns between glyphs
pub const GLYPH_GAP: u16 = 1;

const SEG_A: u8 = 1 << 0;
const SEG_B: u8 = 1 << 1;
const SEG_C: u8 = 1 << 2;
const SEG_D: u8 = 1 << 3;
const SEG_E: u8 = 1 << 4;
const SEG_F: u8 = 1 << 5;
const SEG_G: u8 = 1 << 6;

const DIGITS: [u8; 10] = [
    SEG_A | SEG_B | SEG_C | SEG_D | SEG_E | SEG_F,
    SEG_B | SEG_C,
    SEG_A | SEG_B | SEG_D | SEG_E | SEG_G,
    SEG_A | SEG_B | SEG_C | SEG_D | SEG_G,
    SEG_B | SEG_C | SEG_F | SEG_G,
    SEG_A | SEG_C | SEG_D | SEG_F | SEG_G,
    SEG_A | SEG_C | SEG_D | SEG_E | SEG_F | SEG_G,
    SEG_A | SEG_B | SEG_C,
    SEG_A | SEG_B | SEG_C | SEG_D | SEG_E | SEG_F | SEG_G,
    SEG_A | SEG_B | SEG_C | SEG_D | SEG_F | SEG_G,
];

const MINUS: u8 = SEG_G;

/// Segment mask for a strip character; `None` for anything but digits and `-`.
pub fn segments_for(ch: char) -> Option<u8> {
    match ch {
        '-' => Some(MINUS),
        _ => ch.to_digit(10).map(|d| DIGITS[d as usize]),
    }
}

/// Is the glyph cell (gx, gy) lit for the given mask?
fn lit(mask: u8, gx: u16, gy: u16) -> bool {
    let on = |seg: u8| mask & seg != 0;
    let left = gx == 0;
    let right = gx == GLYPH_W - 1;
    match gy {
        0 => on(SEG_A) || (left && on(SEG_F)) || (right && on(SEG_B)),
        1 => (left && on(SEG_F)) || (right && on(SEG_B)),
        2 => on(SEG_G) || (left && (on(SEG_F) || on(SEG_E))) || (right && (on(SEG_B) || on(SEG_C))),
        3 => (left && on(SEG_E)) || (right && on(SEG_C)),
        4 => on(SEG_D) || (left && on(SEG_E)) || (right && on(SEG_C)),
        _ => false,
    }
}

/// Width in cells of a strip showing `value`
pub fn strip_width(value: i64) -> u16 {
    let chars = value.to_string().chars().count() as u16;
    chars * GLYPH_W + chars.saturating_sub(1) * GLYPH_GAP
}

/// Draw `value` as a seven-segment strip with its top-left corner at (x, y).
///
/// Negative values get a leading minus glyph.
pub fn draw_number(fb: &mut FrameBuffer, x: u16, y: u16, value: i64, style: CellStyle) {
    let mut gx0 = x;
    for ch in value.to_string().chars() {
        if let Some(mask) = segments_for(ch) {
            draw_glyph(fb, gx0, y, mask, style);
        }
        gx0 = gx0.saturating_add(GLYPH_W + GLYPH_GAP);
    }
}

fn draw_glyph(fb: &mut FrameBuffer, x: u16, y: u16, mask: u8, style: CellStyle) {
    for gy in 0..GLYPH_H {
        for gx in 0..GLYPH_W {
            if lit(mask, gx, gy) {
                fb.put_char(x.saturating_add(gx), y.saturating_add(gy), '█', style);
            }
        }
    }
}
