//! Panel geometry, fixed at build time.
//!
//! Each supported panel is a zero-sized type implementing [`DisplaySize`];
//! the framebuffer storage is an array sized for that panel, so no buffer is
//! ever reallocated.

/// Geometry and storage for one panel variant.
pub trait DisplaySize {
    /// Width in pixels.
    const WIDTH: u8;
    /// Height in pixels, always a multiple of 8.
    const HEIGHT: u8;
    /// Argument of the COM pins hardware configuration command (`0xDA`).
    const COM_PINS: u8;

    /// Backing storage of `WIDTH * HEIGHT / 8` bytes.
    type Buffer: AsRef<[u8]> + AsMut<[u8]> + Clone;

    /// A zeroed (all pixels off) buffer.
    fn new_buffer() -> Self::Buffer;

    /// Number of 8-row pages.
    fn pages() -> u8 {
        Self::HEIGHT / 8
    }
}

/// 128×32 panel, the reference module size.
#[derive(Debug, Clone, Copy, Default)]
pub struct DisplaySize128x32;

impl DisplaySize for DisplaySize128x32 {
    const WIDTH: u8 = 128;
    const HEIGHT: u8 = 32;
    const COM_PINS: u8 = 0x02;
    type Buffer = [u8; 128 * 32 / 8];

    fn new_buffer() -> Self::Buffer {
        [0; 128 * 32 / 8]
    }
}

/// 128×64 panel.
#[derive(Debug, Clone, Copy, Default)]
pub struct DisplaySize128x64;

impl DisplaySize for DisplaySize128x64 {
    const WIDTH: u8 = 128;
    const HEIGHT: u8 = 64;
    const COM_PINS: u8 = 0x12;
    type Buffer = [u8; 128 * 64 / 8];

    fn new_buffer() -> Self::Buffer {
        [0; 128 * 64 / 8]
    }
}
