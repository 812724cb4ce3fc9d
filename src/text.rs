//! Fixed-pitch text rendering with a pixel cursor.
//!
//! [`TextEngine`] owns the cursor and a reference to the active [`Font`].
//! Glyphs are painted opaquely (clear glyph bits turn pixels off) through
//! the framebuffer's clipped pixel writes.

use crate::font::Font;
use crate::framebuffer::Framebuffer;
use crate::numfmt::{format_float, format_int, FLOAT_BUF_LEN, INT_BUF_LEN};
use crate::size::DisplaySize;

/// Vertical advance applied by `'\n'`, independent of the font height.
pub const LINE_ADVANCE: i16 = 8;

/// Largest decimal count accepted by [`TextEngine::write_float`].
pub const MAX_DECIMALS: u8 = 20;

/// Text position in pixel coordinates (top-left of the next glyph).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Cursor {
    pub x: i16,
    pub y: i16,
}

/// Cursor and font state for text output.
#[derive(Debug, Clone, Copy)]
pub struct TextEngine {
    cursor: Cursor,
    font: &'static Font,
}

impl TextEngine {
    /// Engine with the cursor at the origin.
    pub fn new(font: &'static Font) -> Self {
        Self {
            cursor: Cursor::default(),
            font,
        }
    }

    /// Replace the active font. Pixels already drawn are unaffected.
    pub fn set_font(&mut self, font: &'static Font) {
        self.font = font;
    }

    pub fn font(&self) -> &'static Font {
        self.font
    }

    /// Move the cursor to pixel `(x, y)`.
    pub fn set_cursor(&mut self, x: i16, y: i16) {
        self.cursor = Cursor { x, y };
    }

    pub fn cursor(&self) -> Cursor {
        self.cursor
    }

    /// Draw one glyph at the cursor and advance it.
    ///
    /// Characters outside printable ASCII render as `'?'`. The cursor moves
    /// right by `width + 1`; if the next glyph would reach the right edge it
    /// wraps to `x = 0` and moves down by `height + 1`. The row saturates
    /// at `i16::MAX`.
    pub fn write_char<SIZE: DisplaySize>(&mut self, fb: &mut Framebuffer<SIZE>, c: char) {
        let font = self.font;
        let glyph = font.glyph(c);
        let width = i32::from(font.width);
        let height = i32::from(font.height);
        let bytes_per_column = font.bytes_per_column();
        let (x, y) = (i32::from(self.cursor.x), i32::from(self.cursor.y));

        for col in 0..width {
            for row in 0..height {
                let index = col as usize * bytes_per_column + row as usize / 8;
                let byte = glyph.get(index).copied().unwrap_or(0);
                let on = (byte >> (row & 7)) & 1 != 0;
                fb.set_pixel(x + col, y + row, on);
            }
        }

        let next = x + width + 1;
        if next + width >= Framebuffer::<SIZE>::WIDTH {
            self.cursor.x = 0;
            self.cursor.y = self.cursor.y.saturating_add(i16::from(font.height) + 1);
        } else {
            // Below the panel width here, so it fits.
            self.cursor.x = next as i16;
        }
    }

    /// Draw a string. `'\n'` returns to `x = 0` and moves down by
    /// [`LINE_ADVANCE`] without drawing anything.
    pub fn write_str<SIZE: DisplaySize>(&mut self, fb: &mut Framebuffer<SIZE>, s: &str) {
        for c in s.chars() {
            if c == '\n' {
                self.cursor.x = 0;
                self.cursor.y = self.cursor.y.saturating_add(LINE_ADVANCE);
                continue;
            }
            self.write_char(fb, c);
        }
    }

    /// Draw the decimal form of `value`.
    pub fn write_int<SIZE: DisplaySize>(&mut self, fb: &mut Framebuffer<SIZE>, value: i32) {
        let mut buf = [0u8; INT_BUF_LEN];
        let text = format_int(&mut buf, value);
        self.write_str(fb, text);
    }

    /// Draw `value` with `decimals` fractional digits (clamped to
    /// [`MAX_DECIMALS`]).
    pub fn write_float<SIZE: DisplaySize>(
        &mut self,
        fb: &mut Framebuffer<SIZE>,
        value: f32,
        decimals: u8,
    ) {
        let mut buf = [0u8; FLOAT_BUF_LEN];
        let text = format_float(&mut buf, value, decimals.min(MAX_DECIMALS));
        self.write_str(fb, text);
    }
}

// ── Tests ────────────────────────────────────────────────────────────────
