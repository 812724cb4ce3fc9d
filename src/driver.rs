//! Display session: bus, framebuffer, text state and controller protocol.
//!
//! [`OledDriver`] owns everything needed to draw and to push frames to the
//! panel. Drawing only touches the in-memory framebuffer; bus traffic
//! happens in [`init()`](OledDriver::init), [`flush()`](OledDriver::flush)
//! and the single-command setters.

use core::convert::Infallible;

use embedded_graphics::{pixelcolor::BinaryColor, prelude::*};

use crate::bus::{send_commands, send_data, Bus};
use crate::command;
use crate::config::DisplayConfig;
use crate::error::OledError;
use crate::font::{Font, FONT_6X8};
use crate::framebuffer::Framebuffer;
use crate::size::{DisplaySize, DisplaySize128x32};
use crate::text::{Cursor, TextEngine};

/// Controller protocol state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum DriverState {
    /// Constructed, init sequence not sent yet.
    Uninitialized,
    /// Initialised and ready for commands.
    Idle,
    /// A frame is being streamed to the controller.
    Flushing,
}

/// Framebuffered driver for an SSD1306 panel of geometry `SIZE`.
///
/// # Lifecycle
///
/// 1. [`OledDriver::new()`]: constructs the driver without any bus traffic.
/// 2. [`OledDriver::init()`]: sends the controller bring-up sequence.
/// 3. Draw with the primitive and text methods (or any embedded-graphics
///    drawable, since the driver is a [`DrawTarget`]).
/// 4. [`OledDriver::flush()`]: transfers the framebuffer to the panel.
///
/// # Example
///
/// ```no_run
/// use mono_oled_rs::{OledDriver, DisplaySize128x32};
///
/// # fn example(i2c: impl embedded_hal::i2c::I2c) {
/// let mut oled: OledDriver<_, DisplaySize128x32> = OledDriver::new(i2c, 0x3C);
/// oled.init().unwrap();
/// oled.write_str("Hello");
/// oled.flush().unwrap();
/// # }
/// ```
pub struct OledDriver<B, SIZE: DisplaySize = DisplaySize128x32> {
    bus: B,
    address: u8,
    /// Contrast re-applied by every `init()`; tracks `set_contrast()`.
    contrast: u8,
    framebuffer: Framebuffer<SIZE>,
    text: TextEngine,
    state: DriverState,
}

impl<B, SIZE> OledDriver<B, SIZE>
where
    B: Bus,
    SIZE: DisplaySize,
{
    /// Construct an uninitialised driver with default contrast.
    ///
    /// No bus traffic is generated. You **must** call [`init()`](Self::init)
    /// before flushing or sending commands.
    ///
    /// # Arguments
    /// * `bus`: bus capability (takes ownership for exclusive access).
    /// * `address`: 7-bit device address (typically `0x3C` or `0x3D`).
    pub fn new(bus: B, address: u8) -> Self {
        Self::with_config(
            bus,
            &DisplayConfig {
                address,
                ..DisplayConfig::default()
            },
        )
    }

    /// Construct an uninitialised driver from a [`DisplayConfig`].
    pub fn with_config(bus: B, config: &DisplayConfig) -> Self {
        Self {
            bus,
            address: config.address,
            contrast: config.contrast,
            framebuffer: Framebuffer::new(),
            text: TextEngine::new(&FONT_6X8),
            state: DriverState::Uninitialized,
        }
    }

    // -----------------------------------------------------------------------
    // Controller protocol
    // -----------------------------------------------------------------------

    /// Initialise the controller.
    ///
    /// Clears the framebuffer, homes the text cursor and sends the bring-up
    /// command sequence. Calling it again re-runs the whole sequence.
    ///
    /// # Errors
    ///
    /// Returns [`OledError::Bus`] on a bus failure; the driver is then
    /// left uninitialised.
    pub fn init(&mut self) -> Result<(), OledError<B::Error>> {
        self.state = DriverState::Uninitialized;
        self.framebuffer.clear();
        self.text.set_cursor(0, 0);

        let sequence = command::init_sequence::<SIZE>(self.contrast);
        send_commands(&mut self.bus, self.address, &sequence)?;

        self.state = DriverState::Idle;

        #[cfg(feature = "defmt")]
        defmt::debug!("OLED initialised at {=u8:#x}", self.address);

        Ok(())
    }

    /// Transfer the whole framebuffer to the panel.
    ///
    /// Sends the full column and page windows, then streams the buffer in
    /// bounded data chunks.
    ///
    /// # Errors
    ///
    /// Returns [`OledError::NotInitialized`] if [`init()`](Self::init) has
    /// not succeeded, or [`OledError::Bus`] from the first failing chunk.
    /// The framebuffer is never modified by a flush, so a failed one can
    /// simply be retried.
    pub fn flush(&mut self) -> Result<(), OledError<B::Error>> {
        self.ensure_initialized()?;

        self.state = DriverState::Flushing;
        let result = self.write_frame();
        self.state = DriverState::Idle;

        match result {
            Ok(()) => {
                self.framebuffer.mark_clean();
                #[cfg(feature = "defmt")]
                defmt::debug!("OLED frame flushed");
                Ok(())
            }
            Err(e) => {
                #[cfg(feature = "defmt")]
                defmt::warn!("OLED flush failed");
                Err(OledError::Bus(e))
            }
        }
    }

    /// Flush only if the framebuffer changed since the last good flush.
    ///
    /// Returns `Ok(true)` when a frame was sent and `Ok(false)` when the
    /// buffer was clean and nothing went on the bus. A failed flush leaves
    /// the buffer dirty, so the next call sends the whole frame again.
    pub fn flush_if_dirty(&mut self) -> Result<bool, OledError<B::Error>> {
        if !self.is_dirty() {
            return Ok(false);
        }
        self.flush()?;
        Ok(true)
    }

    fn write_frame(&mut self) -> Result<(), B::Error> {
        send_commands(
            &mut self.bus,
            self.address,
            &command::full_column_window::<SIZE>(),
        )?;
        send_commands(
            &mut self.bus,
            self.address,
            &command::full_page_window::<SIZE>(),
        )?;
        send_data(&mut self.bus, self.address, self.framebuffer.as_bytes())
    }

    /// Turn every pixel off and flush.
    pub fn clear(&mut self) -> Result<(), OledError<B::Error>> {
        self.framebuffer.clear();
        self.flush()
    }

    /// Set the panel contrast (`0x81, value`). Also used by later re-inits.
    pub fn set_contrast(&mut self, value: u8) -> Result<(), OledError<B::Error>> {
        self.send_command(&command::contrast(value))?;
        self.contrast = value;
        Ok(())
    }

    /// Switch between normal (`0xA6`) and inverted (`0xA7`) polarity.
    pub fn set_invert(&mut self, inverted: bool) -> Result<(), OledError<B::Error>> {
        self.send_command(&[command::invert(inverted)])
    }

    /// Wake (`0xAF`) or sleep (`0xAE`) the panel. RAM content is kept.
    pub fn display_on(&mut self, on: bool) -> Result<(), OledError<B::Error>> {
        self.send_command(&[command::display_on(on)])
    }

    fn send_command(&mut self, bytes: &[u8]) -> Result<(), OledError<B::Error>> {
        self.ensure_initialized()?;
        send_commands(&mut self.bus, self.address, bytes)?;
        Ok(())
    }

    fn ensure_initialized(&self) -> Result<(), OledError<B::Error>> {
        match self.state {
            DriverState::Uninitialized => Err(OledError::NotInitialized),
            DriverState::Idle | DriverState::Flushing => Ok(()),
        }
    }

    // -----------------------------------------------------------------------
    // Drawing (framebuffer only, no bus traffic)
    // -----------------------------------------------------------------------

    /// Turn every pixel off without flushing.
    pub fn clear_buffer(&mut self) {
        self.framebuffer.clear();
    }

    pub fn draw_pixel(&mut self, x: i16, y: i16, on: bool) {
        self.framebuffer.draw_pixel(x, y, on);
    }

    pub fn draw_line(&mut self, x0: i16, y0: i16, x1: i16, y1: i16, on: bool) {
        self.framebuffer.draw_line(x0, y0, x1, y1, on);
    }

    pub fn draw_rect(&mut self, x: i16, y: i16, w: i16, h: i16, on: bool) {
        self.framebuffer.draw_rect(x, y, w, h, on);
    }

    pub fn fill_rect(&mut self, x: i16, y: i16, w: i16, h: i16, on: bool) {
        self.framebuffer.fill_rect(x, y, w, h, on);
    }

    pub fn draw_circle(&mut self, x0: i16, y0: i16, r: i16, on: bool) {
        self.framebuffer.draw_circle(x0, y0, r, on);
    }

    /// Opaque bitmap blit; see [`Framebuffer::draw_bitmap`].
    pub fn draw_bitmap(&mut self, x: i16, y: i16, bitmap: &[u8], w: i16, h: i16, on: bool) {
        self.framebuffer.draw_bitmap(x, y, bitmap, w, h, on);
    }

    // -----------------------------------------------------------------------
    // Text
    // -----------------------------------------------------------------------

    pub fn set_font(&mut self, font: &'static Font) {
        self.text.set_font(font);
    }

    pub fn font(&self) -> &'static Font {
        self.text.font()
    }

    /// Move the text cursor to pixel `(x, y)`.
    pub fn set_cursor(&mut self, x: i16, y: i16) {
        self.text.set_cursor(x, y);
    }

    pub fn cursor(&self) -> Cursor {
        self.text.cursor()
    }

    pub fn write_char(&mut self, c: char) {
        self.text.write_char(&mut self.framebuffer, c);
    }

    pub fn write_str(&mut self, s: &str) {
        self.text.write_str(&mut self.framebuffer, s);
    }

    pub fn write_int(&mut self, value: i32) {
        self.text.write_int(&mut self.framebuffer, value);
    }

    pub fn write_float(&mut self, value: f32, decimals: u8) {
        self.text.write_float(&mut self.framebuffer, value, decimals);
    }

    // -----------------------------------------------------------------------
    // Introspection
    // -----------------------------------------------------------------------

    pub fn state(&self) -> DriverState {
        self.state
    }

    /// Check whether the controller has been successfully initialised.
    ///
    /// No bus traffic is generated.
    pub fn is_initialized(&self) -> bool {
        self.state != DriverState::Uninitialized
    }

    /// `true` if the framebuffer changed since the last successful flush.
    pub fn is_dirty(&self) -> bool {
        self.framebuffer.is_dirty()
    }

    pub fn framebuffer(&self) -> &Framebuffer<SIZE> {
        &self.framebuffer
    }

    /// Raw page-major framebuffer bytes, exactly as [`flush()`](Self::flush)
    /// streams them.
    pub fn buffer(&self) -> &[u8] {
        self.framebuffer.as_bytes()
    }

    pub fn address(&self) -> u8 {
        self.address
    }

    /// Consume the driver and hand back the bus.
    pub fn release(self) -> B {
        self.bus
    }
}

// ── embedded-graphics ────────────────────────────────────────────────────

impl<B, SIZE: DisplaySize> OriginDimensions for OledDriver<B, SIZE> {
    fn size(&self) -> Size {
        self.framebuffer.size()
    }
}

impl<B, SIZE: DisplaySize> DrawTarget for OledDriver<B, SIZE> {
    type Color = BinaryColor;
    type Error = Infallible;

    fn draw_iter<I>(&mut self, pixels: I) -> Result<(), Self::Error>
    where
        I: IntoIterator<Item = Pixel<Self::Color>>,
    {
        self.framebuffer.draw_iter(pixels)
    }
}

// ── Tests ────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bus::{CONTROL_COMMAND, CONTROL_DATA};
    use crate::size::DisplaySize128x64;
    use crate::testing::FakeI2c;
    use embedded_graphics::primitives::{Circle, PrimitiveStyle};
    use embedded_hal::i2c::ErrorKind;

    type Driver = OledDriver<FakeI2c, DisplaySize128x32>;

    fn initialised(bus: FakeI2c) -> Driver {
        let mut oled = Driver::new(bus, 0x3C);
        oled.init().unwrap();
        oled
    }

    #[test]
    fn construction_is_silent() {
        let oled = Driver::new(FakeI2c::new(), 0x3D);
        assert_eq!(oled.state(), DriverState::Uninitialized);
        assert!(!oled.is_initialized());
        assert_eq!(oled.address(), 0x3D);
        assert!(oled.release().writes.is_empty());
    }

    #[test]
    fn commands_before_init_are_rejected() {
        let mut oled = Driver::new(FakeI2c::new(), 0x3C);
        assert_eq!(oled.flush(), Err(OledError::NotInitialized));
        assert_eq!(oled.set_contrast(0x10), Err(OledError::NotInitialized));
        assert_eq!(oled.set_invert(true), Err(OledError::NotInitialized));
        assert_eq!(oled.display_on(false), Err(OledError::NotInitialized));
        assert_eq!(oled.clear(), Err(OledError::NotInitialized));
        assert!(oled.release().writes.is_empty());
    }

    #[test]
    fn init_sends_bring_up_sequence_in_one_transaction() {
        let oled = initialised(FakeI2c::new());
        assert_eq!(oled.state(), DriverState::Idle);

        let bus = oled.release();
        assert_eq!(bus.writes.len(), 1);
        assert_eq!(bus.writes[0].address, 0x3C);
        assert_eq!(bus.writes[0].bytes[0], CONTROL_COMMAND);
        assert_eq!(
            &bus.writes[0].bytes[1..],
            &command::init_sequence::<DisplaySize128x32>(0xCF)[..]
        );
    }

    #[test]
    fn init_uses_configured_contrast_and_size() {
        let config = DisplayConfig {
            address: 0x3D,
            contrast: 0x42,
            ..DisplayConfig::default()
        };
        let mut oled: OledDriver<FakeI2c, DisplaySize128x64> =
            OledDriver::with_config(FakeI2c::new(), &config);
        oled.init().unwrap();

        let bus = oled.release();
        assert_eq!(bus.writes[0].address, 0x3D);
        assert_eq!(bus.writes[0].bytes[1 + 4], 0x3F);
        assert_eq!(bus.writes[0].bytes[1 + 17], 0x42);
    }

    #[test]
    fn init_failure_leaves_driver_uninitialised() {
        let mut oled = Driver::new(FakeI2c::failing_at(0), 0x3C);
        assert_eq!(oled.init(), Err(OledError::Bus(ErrorKind::Bus)));
        assert!(!oled.is_initialized());

        // The fake only fails once; a retry succeeds.
        oled.init().unwrap();
        assert!(oled.is_initialized());
    }

    #[test]
    fn init_resets_buffer_and_cursor() {
        let mut oled = initialised(FakeI2c::new());
        oled.write_str("xyz");
        oled.init().unwrap();

        assert_eq!(oled.cursor(), Cursor::default());
        assert!(oled.framebuffer().as_bytes().iter().all(|&b| b == 0));
        assert_eq!(oled.release().writes.len(), 2);
    }

    #[test]
    fn flush_sets_windows_then_streams_buffer() {
        let mut oled = initialised(FakeI2c::new());
        oled.draw_line(0, 0, 127, 31, true);
        let frame = oled.buffer().to_vec();

        oled.flush().unwrap();
        assert_eq!(oled.state(), DriverState::Idle);
        assert!(!oled.is_dirty());

        let bus = oled.release();
        // init + column window + page window + 512 / 32 data chunks
        assert_eq!(bus.writes.len(), 1 + 2 + 16);
        assert_eq!(bus.writes[1].bytes, [0x00, 0x21, 0, 127]);
        assert_eq!(bus.writes[2].bytes, [0x00, 0x22, 0, 3]);
        assert!(bus.writes[3..].iter().all(|w| w.bytes.len() == 33));
        assert_eq!(bus.payload(CONTROL_DATA), frame);
    }

    #[test]
    fn failed_flush_reports_bus_error_and_keeps_buffer() {
        // Attempt 0 is init, 1 and 2 the windows, 3.. the data chunks.
        let mut oled = initialised(FakeI2c::failing_at(5));
        oled.fill_rect(0, 0, 40, 20, true);
        let frame = oled.framebuffer().as_bytes().to_vec();

        assert_eq!(oled.flush(), Err(OledError::Bus(ErrorKind::Bus)));
        assert_eq!(oled.framebuffer().as_bytes(), &frame[..]);
        assert_eq!(oled.state(), DriverState::Idle);
        assert!(oled.is_dirty());

        // Whole-frame retry goes through.
        oled.flush().unwrap();
        assert!(!oled.is_dirty());
        let bus = oled.release();
        assert_eq!(bus.writes.len(), 1 + 4 + 2 + 16);
    }

    #[test]
    fn clear_zeroes_and_flushes() {
        let mut oled = initialised(FakeI2c::new());
        oled.fill_rect(0, 0, 128, 32, true);
        oled.clear().unwrap();

        let bus = oled.release();
        let data = bus.payload(CONTROL_DATA);
        assert_eq!(data.len(), 512);
        assert!(data.iter().all(|&b| b == 0));
    }

    #[test]
    fn contrast_invert_and_power_commands() {
        let mut oled = initialised(FakeI2c::new());
        oled.set_contrast(0x20).unwrap();
        oled.set_invert(true).unwrap();
        oled.set_invert(false).unwrap();
        oled.display_on(false).unwrap();

        // Contrast is remembered for the next init.
        oled.init().unwrap();

        let bus = oled.release();
        assert_eq!(bus.writes[1].bytes, [0x00, 0x81, 0x20]);
        assert_eq!(bus.writes[2].bytes, [0x00, 0xA7]);
        assert_eq!(bus.writes[3].bytes, [0x00, 0xA6]);
        assert_eq!(bus.writes[4].bytes, [0x00, 0xAE]);
        assert_eq!(bus.writes[5].bytes[1 + 17], 0x20);
    }

    #[test]
    fn drawing_does_not_touch_the_bus() {
        let mut oled = initialised(FakeI2c::new());
        oled.draw_pixel(1, 1, true);
        oled.draw_rect(0, 0, 10, 10, true);
        oled.draw_circle(64, 16, 10, true);
        oled.draw_bitmap(100, 0, &[0xAA; 8], 8, 8, true);
        oled.set_cursor(20, 20);
        oled.write_float(-2.5, 1);
        oled.write_int(17);
        oled.write_char('!');

        assert!(oled.is_dirty());
        assert!(oled.framebuffer().get_pixel(1, 1));
        assert!(oled.framebuffer().get_pixel(9, 9));
        assert_eq!(oled.release().writes.len(), 1);
    }

    #[test]
    fn text_goes_through_session() {
        let mut oled = initialised(FakeI2c::new());
        oled.set_cursor(0, 0);
        oled.write_str("AB\nC");
        assert_eq!(oled.cursor(), Cursor { x: 7, y: 8 });
        assert_eq!(oled.font(), &FONT_6X8);
    }

    #[test]
    fn embedded_graphics_draws_into_session() {
        let mut oled = initialised(FakeI2c::new());
        Circle::new(Point::new(0, 0), 9)
            .into_styled(PrimitiveStyle::with_fill(BinaryColor::On))
            .draw(&mut oled)
            .unwrap();

        assert!(oled.framebuffer().get_pixel(4, 4));
        assert_eq!(oled.size(), Size::new(128, 32));
    }

    #[test]
    fn flush_if_dirty_skips_clean_frames() {
        let mut oled = initialised(FakeI2c::new());
        assert_eq!(oled.flush_if_dirty(), Ok(false));

        oled.draw_pixel(3, 3, true);
        assert_eq!(oled.flush_if_dirty(), Ok(true));
        assert_eq!(oled.flush_if_dirty(), Ok(false));

        // init + one full frame (2 windows + 16 data chunks)
        assert_eq!(oled.release().writes.len(), 1 + 2 + 16);
    }

    #[test]
    fn flush_if_dirty_retries_after_failure() {
        let mut oled = initialised(FakeI2c::failing_at(2));
        oled.draw_pixel(3, 3, true);

        assert_eq!(oled.flush_if_dirty(), Err(OledError::Bus(ErrorKind::Bus)));
        assert!(oled.is_dirty());
        assert_eq!(oled.flush_if_dirty(), Ok(true));
        assert!(!oled.is_dirty());
        assert!(oled.buffer()[3] & 0x08 != 0);
    }

    #[test]
    fn flush_if_dirty_requires_init() {
        let mut oled = Driver::new(FakeI2c::new(), 0x3C);
        assert_eq!(oled.flush_if_dirty(), Ok(false));

        oled.draw_pixel(0, 0, true);
        assert_eq!(oled.flush_if_dirty(), Err(OledError::NotInitialized));
        assert!(oled.release().writes.is_empty());
    }

    #[test]
    fn primitives_accept_extreme_coordinates() {
        let mut oled = initialised(FakeI2c::new());
        oled.draw_line(i16::MIN, 0, 0, 0, true);
        oled.draw_rect(i16::MAX, 0, 4, 4, true);
        oled.draw_circle(0, 0, i16::MAX, true);
        oled.fill_rect(i16::MIN, i16::MIN, i16::MAX, i16::MAX, true);
        oled.set_cursor(i16::MAX - 3, 0);
        oled.write_char('A');

        assert!(oled.framebuffer().get_pixel(0, 0));
        assert_eq!(oled.buffer().iter().filter(|&&b| b != 0).count(), 1);
        assert_eq!(oled.cursor(), Cursor { x: 0, y: 9 });
    }
}
