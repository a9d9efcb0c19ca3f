//! Built-in 5x7 block font
//!
//! A native stand-in for the browser canvas: glyphs are nearest-neighbor
//! upscaled so that one glyph unit is `font_px / 8` pixels (at least 1).
//! Lowercase letters reuse the uppercase shapes; anything outside the table
//! draws as a hollow box.

use super::layout::parse_font_px;
use super::surface::{AlphaBitmap, RenderJob, TextSurface};
use super::MAX_BITMAP_SIDE;

const GLYPH_WIDTH: usize = 5;
const GLYPH_HEIGHT: usize = 7;
/// Glyph plus one unit of spacing.
const ADVANCE_UNITS: u32 = 6;
const UNITS_PER_EM: f32 = 8.0;

type Glyph = [u8; GLYPH_HEIGHT];

const BLANK: Glyph = [0; GLYPH_HEIGHT];
const MISSING: Glyph = [0b11111, 0b10001, 0b10001, 0b10001, 0b10001, 0b10001, 0b11111];

fn glyph(c: char) -> Glyph {
    match c.to_ascii_uppercase() {
        ' ' => BLANK,
        'A' => [0b01110, 0b10001, 0b10001, 0b11111, 0b10001, 0b10001, 0b10001],
        'B' => [0b11110, 0b10001, 0b10001, 0b11110, 0b10001, 0b10001, 0b11110],
        'C' => [0b01110, 0b10001, 0b10000, 0b10000, 0b10000, 0b10001, 0b01110],
        'D' => [0b11110, 0b10001, 0b10001, 0b10001, 0b10001, 0b10001, 0b11110],
        'E' => [0b11111, 0b10000, 0b10000, 0b11110, 0b10000, 0b10000, 0b11111],
        'F' => [0b11111, 0b10000, 0b10000, 0b11110, 0b10000, 0b10000, 0b10000],
        'G' => [0b01110, 0b10001, 0b10000, 0b10111, 0b10001, 0b10001, 0b01111],
        'H' => [0b10001, 0b10001, 0b10001, 0b11111, 0b10001, 0b10001, 0b10001],
        'I' => [0b01110, 0b00100, 0b00100, 0b00100, 0b00100, 0b00100, 0b01110],
        'J' => [0b00111, 0b00010, 0b00010, 0b00010, 0b00010, 0b10010, 0b01100],
        'K' => [0b10001, 0b10010, 0b10100, 0b11000, 0b10100, 0b10010, 0b10001],
        'L' => [0b10000, 0b10000, 0b10000, 0b10000, 0b10000, 0b10000, 0b11111],
        'M' => [0b10001, 0b11011, 0b10101, 0b10101, 0b10001, 0b10001, 0b10001],
        'N' => [0b10001, 0b10001, 0b11001, 0b10101, 0b10011, 0b10001, 0b10001],
        'O' => [0b01110, 0b10001, 0b10001, 0b10001, 0b10001, 0b10001, 0b01110],
        'P' => [0b11110, 0b10001, 0b10001, 0b11110, 0b10000, 0b10000, 0b10000],
        'Q' => [0b01110, 0b10001, 0b10001, 0b10001, 0b10101, 0b10010, 0b01101],
        'R' => [0b11110, 0b10001, 0b10001, 0b11110, 0b10100, 0b10010, 0b10001],
        'S' => [0b01111, 0b10000, 0b10000, 0b01110, 0b00001, 0b00001, 0b11110],
        'T' => [0b11111, 0b00100, 0b00100, 0b00100, 0b00100, 0b00100, 0b00100],
        'U' => [0b10001, 0b10001, 0b10001, 0b10001, 0b10001, 0b10001, 0b01110],
        'V' => [0b10001, 0b10001, 0b10001, 0b10001, 0b10001, 0b01010, 0b00100],
        'W' => [0b10001, 0b10001, 0b10001, 0b10101, 0b10101, 0b10101, 0b01010],
        'X' => [0b10001, 0b10001, 0b01010, 0b00100, 0b01010, 0b10001, 0b10001],
        'Y' => [0b10001, 0b10001, 0b01010, 0b00100, 0b00100, 0b00100, 0b00100],
        'Z' => [0b11111, 0b00001, 0b00010, 0b00100, 0b01000, 0b10000, 0b11111],
        '0' => [0b01110, 0b10001, 0b10011, 0b10101, 0b11001, 0b10001, 0b01110],
        '1' => [0b00100, 0b01100, 0b00100, 0b00100, 0b00100, 0b00100, 0b01110],
        '2' => [0b01110, 0b10001, 0b00001, 0b00010, 0b00100, 0b01000, 0b11111],
        '3' => [0b11111, 0b00010, 0b00100, 0b00010, 0b00001, 0b10001, 0b01110],
        '4' => [0b00010, 0b00110, 0b01010, 0b10010, 0b11111, 0b00010, 0b00010],
        '5' => [0b11111, 0b10000, 0b11110, 0b00001, 0b00001, 0b10001, 0b01110],
        '6' => [0b00110, 0b01000, 0b10000, 0b11110, 0b10001, 0b10001, 0b01110],
        '7' => [0b11111, 0b00001, 0b00010, 0b00100, 0b01000, 0b01000, 0b01000],
        '8' => [0b01110, 0b10001, 0b10001, 0b01110, 0b10001, 0b10001, 0b01110],
        '9' => [0b01110, 0b10001, 0b10001, 0b01111, 0b00001, 0b00010, 0b01100],
        '.' => [0, 0, 0, 0, 0, 0b01100, 0b01100],
        ',' => [0, 0, 0, 0, 0b01100, 0b00100, 0b01000],
        '!' => [0b00100, 0b00100, 0b00100, 0b00100, 0b00100, 0, 0b00100],
        '?' => [0b01110, 0b10001, 0b00001, 0b00010, 0b00100, 0, 0b00100],
        '-' => [0, 0, 0, 0b11111, 0, 0, 0],
        '\'' => [0b00100, 0b00100, 0b01000, 0, 0, 0, 0],
        ':' => [0, 0b01100, 0b01100, 0, 0b01100, 0b01100, 0],
        c if c.is_whitespace() => BLANK,
        _ => MISSING,
    }
}

/// Pixels per glyph unit for a font size, capped at one bitmap side so
/// `unit * ADVANCE_UNITS` cannot overflow.
fn unit_px(font_px: f32) -> u32 {
    ((font_px / UNITS_PER_EM).round() as u32).clamp(1, MAX_BITMAP_SIDE)
}

#[derive(Clone, Copy, Debug, Default)]
pub struct BlockFontSurface;

impl BlockFontSurface {
    pub fn new() -> Self {
        Self
    }

    fn draw_glyph(bitmap: &mut AlphaBitmap, x: i64, y: i64, unit: u32, glyph: &Glyph) {
        let (w, h) = (bitmap.width as i64, bitmap.height as i64);
        let unit = unit as i64;
        for (row, bits) in glyph.iter().enumerate() {
            if *bits == 0 {
                continue;
            }
            for col in 0..GLYPH_WIDTH {
                if (bits >> (GLYPH_WIDTH - 1 - col)) & 1 == 0 {
                    continue;
                }
                let base_x = x + col as i64 * unit;
                let base_y = y + row as i64 * unit;
                for py in base_y.max(0)..(base_y + unit).min(h) {
                    for px in base_x.max(0)..(base_x + unit).min(w) {
                        bitmap.alpha[(py * w + px) as usize] = 255;
                    }
                }
            }
        }
    }
}

impl TextSurface for BlockFontSurface {
    fn measure(&mut self, text: &str, font: &str, letter_spacing: f32) -> Option<f32> {
        let advance = (unit_px(parse_font_px(font)) * ADVANCE_UNITS) as f32 + letter_spacing;
        Some(text.chars().count() as f32 * advance)
    }

    fn render(&mut self, job: &RenderJob<'_>) -> Option<AlphaBitmap> {
        let mut bitmap = AlphaBitmap::new(job.width, job.height);
        let unit = unit_px(parse_font_px(job.font));
        let advance = (unit * ADVANCE_UNITS) as f32 + job.letter_spacing;

        for (i, line) in job.lines.iter().enumerate() {
            let y = (job.padding + i as f32 * job.line_height).floor() as i64;
            let mut pen_x = job.padding;
            for c in line.chars() {
                let g = glyph(c);
                if g != BLANK {
                    Self::draw_glyph(&mut bitmap, pen_x.floor() as i64, y, unit, &g);
                }
                pen_x += advance;
            }
        }
        Some(bitmap)
    }
}
