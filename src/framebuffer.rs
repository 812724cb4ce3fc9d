//! Bit-packed, page-major pixel store.
//!
//! The panel is split into `HEIGHT / 8` horizontal pages of 8 rows. Byte
//! `x + page * WIDTH` holds column `x` of that page, with bit `b` mapping to
//! row `page * 8 + b`. This is exactly the layout the controller expects in
//! horizontal addressing mode, so a flush streams the buffer unchanged.

use core::convert::Infallible;
use core::marker::PhantomData;

use embedded_graphics::{pixelcolor::BinaryColor, prelude::*};

use crate::size::DisplaySize;

/// Software framebuffer for one panel of geometry `SIZE`.
#[derive(Clone)]
pub struct Framebuffer<SIZE: DisplaySize> {
    buffer: SIZE::Buffer,
    /// Set by every pixel write or clear; reset by [`mark_clean`](Self::mark_clean).
    dirty: bool,
    _size: PhantomData<SIZE>,
}

impl<SIZE: DisplaySize> Default for Framebuffer<SIZE> {
    fn default() -> Self {
        Self::new()
    }
}

impl<SIZE: DisplaySize> Framebuffer<SIZE> {
    /// Panel width in pixels.
    pub const WIDTH: i32 = SIZE::WIDTH as i32;
    /// Panel height in pixels.
    pub const HEIGHT: i32 = SIZE::HEIGHT as i32;

    /// A framebuffer with every pixel off.
    pub fn new() -> Self {
        Self {
            buffer: SIZE::new_buffer(),
            dirty: false,
            _size: PhantomData,
        }
    }

    /// Turn every pixel off.
    pub fn clear(&mut self) {
        self.buffer.as_mut().fill(0);
        self.dirty = true;
    }

    /// Byte index and bit mask of `(x, y)`, or `None` when off-panel.
    fn locate(x: i32, y: i32) -> Option<(usize, u8)> {
        if x < 0 || x >= Self::WIDTH || y < 0 || y >= Self::HEIGHT {
            return None;
        }
        let index = x as usize + (y as usize / 8) * SIZE::WIDTH as usize;
        Some((index, 1 << (y & 7)))
    }

    /// Set or clear one pixel. Off-panel coordinates are ignored.
    pub fn set_pixel(&mut self, x: i32, y: i32, on: bool) {
        let Some((index, mask)) = Self::locate(x, y) else {
            return;
        };
        let byte = &mut self.buffer.as_mut()[index];
        if on {
            *byte |= mask;
        } else {
            *byte &= !mask;
        }
        self.dirty = true;
    }

    /// Read one pixel. Off-panel coordinates read as off.
    pub fn get_pixel(&self, x: i32, y: i32) -> bool {
        match Self::locate(x, y) {
            Some((index, mask)) => self.buffer.as_ref()[index] & mask != 0,
            None => false,
        }
    }

    /// Raw page-major bytes, as streamed to the controller.
    pub fn as_bytes(&self) -> &[u8] {
        self.buffer.as_ref()
    }

    /// `true` if any pixel write or clear happened since the last
    /// [`mark_clean`](Self::mark_clean).
    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    pub(crate) fn mark_clean(&mut self) {
        self.dirty = false;
    }
}

// ── embedded-graphics ────────────────────────────────────────────────────

impl<SIZE: DisplaySize> OriginDimensions for Framebuffer<SIZE> {
    fn size(&self) -> Size {
        Size::new(SIZE::WIDTH as u32, SIZE::HEIGHT as u32)
    }
}

impl<SIZE: DisplaySize> DrawTarget for Framebuffer<SIZE> {
    type Color = BinaryColor;
    type Error = Infallible;

    fn draw_iter<I>(&mut self, pixels: I) -> Result<(), Self::Error>
    where
        I: IntoIterator<Item = Pixel<Self::Color>>,
    {
        for Pixel(Point { x, y }, color) in pixels {
            self.set_pixel(x, y, color.is_on());
        }
        Ok(())
    }
}

// ── Tests ────────────────────────────────────────────────────────────────
