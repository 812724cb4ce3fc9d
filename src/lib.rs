//! Framebuffered driver for SSD1306 monochrome OLED panels.
//!
//! This crate provides [`OledDriver`], which owns a bit-packed
//! [`Framebuffer`], draws lines, rectangles, circles, bitmaps and
//! fixed-pitch text into it, and pushes the whole frame to the controller
//! over any blocking [`embedded_hal::i2c::I2c`] bus in bounded
//! transactions.
//!
//! # Quick Start
//!
//! ```ignore
//! use mono_oled_rs::{OledDriver, DisplaySize128x32, DEFAULT_ADDRESS};
//!
//! let mut oled: OledDriver<_, DisplaySize128x32> = OledDriver::new(i2c, DEFAULT_ADDRESS);
//! oled.init()?;
//!
//! oled.draw_rect(0, 0, 128, 32, true);
//! oled.set_cursor(4, 4);
//! oled.write_str("Temp: ");
//! oled.write_float(21.456, 1);
//! oled.flush()?;
//! ```
//!
//! # Architecture
//!
//! - **`bus`**: control-byte framing and 32-byte chunking over [`Bus`].
//! - **`framebuffer`** / **`raster`**: pixel store and primitives; pure,
//!   no bus traffic, off-panel pixels are clipped.
//! - **`text`** / **`font`** / **`numfmt`**: cursor-driven bitmap text and
//!   allocation-free number formatting.
//! - **`command`** / **`driver`**: controller command set and the session
//!   tying it all together.
//!
//! # Crate Features
//!
//! - **`defmt`**: logging and [`defmt::Format`] impls via `defmt`.
//! - **`task`**: [`display_refresh_task`], a periodic flush loop for a
//!   driver shared behind an Embassy mutex.

#![no_std]

#[cfg(test)]
extern crate std;

pub mod bus;
pub mod command;
pub mod config;
pub mod driver;
pub mod error;
pub mod font;
pub mod framebuffer;
pub mod numfmt;
mod raster;
#[cfg(feature = "task")]
pub mod refresh_task;
pub mod size;
pub mod text;

#[cfg(test)]
mod testing;

// ── Re-exports for convenience ───────────────────────────────────────────

pub use bus::{Bus, CHUNK_SIZE};
pub use config::{DisplayConfig, DEFAULT_ADDRESS};
pub use driver::{DriverState, OledDriver};
pub use error::OledError;
pub use font::{Font, FONT_6X8};
pub use framebuffer::Framebuffer;
#[cfg(feature = "task")]
pub use refresh_task::{display_refresh_task, SharedDisplay};
pub use size::{DisplaySize, DisplaySize128x32, DisplaySize128x64};
pub use text::Cursor;
