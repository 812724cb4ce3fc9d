//! Integer rasterization of lines, rectangles, circles and bitmaps.
//!
//! Every primitive is built from individual clipped pixel writes, so shapes
//! may extend past the panel edges and redrawing a shape with the same
//! colour leaves the buffer unchanged.
//!
//! Coordinates are `i16` and all intermediate arithmetic is done in `i32`,
//! so no input can overflow. Filled sweeps are limited to the visible part
//! of the panel.

use core::ops::Range;

use crate::framebuffer::Framebuffer;
use crate::size::DisplaySize;

impl<SIZE: DisplaySize> Framebuffer<SIZE> {
    /// Set or clear one pixel, clipped to the panel.
    pub fn draw_pixel(&mut self, x: i16, y: i16, on: bool) {
        self.set_pixel(x.into(), y.into(), on);
    }

    /// Bresenham line from `(x0, y0)` to `(x1, y1)`, both endpoints included.
    pub fn draw_line(&mut self, x0: i16, y0: i16, x1: i16, y1: i16, on: bool) {
        self.line(x0.into(), y0.into(), x1.into(), y1.into(), on);
    }

    /// Bresenham over `i32` endpoints derived from `i16` inputs.
    fn line(&mut self, mut x0: i32, mut y0: i32, x1: i32, y1: i32, on: bool) {
        let dx = (x1 - x0).abs();
        let sx = if x0 < x1 { 1 } else { -1 };
        let dy = -(y1 - y0).abs();
        let sy = if y0 < y1 { 1 } else { -1 };
        let mut err = dx + dy;

        loop {
            self.set_pixel(x0, y0, on);
            if x0 == x1 && y0 == y1 {
                break;
            }
            let e2 = 2 * err;
            if e2 >= dy {
                err += dy;
                x0 += sx;
            }
            if e2 <= dx {
                err += dx;
                y0 += sy;
            }
        }
    }

    /// One-pixel outline of the `w`×`h` rectangle at `(x, y)`.
    pub fn draw_rect(&mut self, x: i16, y: i16, w: i16, h: i16, on: bool) {
        let (x, y) = (i32::from(x), i32::from(y));
        let right = x + i32::from(w) - 1;
        let bottom = y + i32::from(h) - 1;
        self.line(x, y, right, y, on);
        self.line(x, bottom, right, bottom, on);
        self.line(x, y, x, bottom, on);
        self.line(right, y, right, bottom, on);
    }

    /// Solid `w`×`h` rectangle at `(x, y)`. Nothing is drawn for
    /// non-positive `w` or `h`.
    pub fn fill_rect(&mut self, x: i16, y: i16, w: i16, h: i16, on: bool) {
        let columns = Self::visible(x.into(), w.into(), Self::WIDTH);
        let rows = Self::visible(y.into(), h.into(), Self::HEIGHT);
        for i in columns {
            for j in rows.clone() {
                self.set_pixel(i, j, on);
            }
        }
    }

    /// Part of `start..start + len` that lies inside `0..limit`.
    fn visible(start: i32, len: i32, limit: i32) -> Range<i32> {
        start.max(0)..(start + len).min(limit)
    }

    /// Midpoint circle outline of radius `r` centred on `(x0, y0)`.
    pub fn draw_circle(&mut self, x0: i16, y0: i16, r: i16, on: bool) {
        let (x0, y0, r) = (i32::from(x0), i32::from(y0), i32::from(r));
        let mut f = 1 - r;
        let mut ddf_x = 1;
        let mut ddf_y = -2 * r;
        let mut x = 0;
        let mut y = r;

        self.set_pixel(x0, y0 + r, on);
        self.set_pixel(x0, y0 - r, on);
        self.set_pixel(x0 + r, y0, on);
        self.set_pixel(x0 - r, y0, on);

        while x < y {
            if f >= 0 {
                y -= 1;
                ddf_y += 2;
                f += ddf_y;
            }
            x += 1;
            ddf_x += 2;
            f += ddf_x;

            self.set_pixel(x0 + x, y0 + y, on);
            self.set_pixel(x0 - x, y0 + y, on);
            self.set_pixel(x0 + x, y0 - y, on);
            self.set_pixel(x0 - x, y0 - y, on);
            self.set_pixel(x0 + y, y0 + x, on);
            self.set_pixel(x0 - y, y0 + x, on);
            self.set_pixel(x0 + y, y0 - x, on);
            self.set_pixel(x0 - y, y0 - x, on);
        }
    }

    /// Opaque blit of a `w`×`h` monochrome bitmap with its top-left corner
    /// at `(x, y)`.
    ///
    /// The source uses the glyph layout: byte `i + (j / 8) * w` holds bit
    /// `j & 7` for column `i`, row `j`. Set source bits paint `on`, clear
    /// bits paint `!on`, so the whole destination rectangle is repainted.
    /// Bytes missing from a short `bitmap` slice read as clear.
    pub fn draw_bitmap(&mut self, x: i16, y: i16, bitmap: &[u8], w: i16, h: i16, on: bool) {
        let (x, y, w) = (i32::from(x), i32::from(y), i32::from(w));
        let columns = Self::visible(x, w, Self::WIDTH);
        let rows = Self::visible(y, h.into(), Self::HEIGHT);

        for py in rows {
            let j = py - y;
            for px in columns.clone() {
                let i = px - x;
                let index = (i + (j / 8) * w) as usize;
                let byte = bitmap.get(index).copied().unwrap_or(0);
                let set = byte & (1 << (j & 7)) != 0;
                self.set_pixel(px, py, if set { on } else { !on });
            }
        }
    }
}

// ── Tests ────────────────────────────────────────────────────────────────
