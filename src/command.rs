//! SSD1306 command bytes and the command payloads built from them.
//!
//! Commands are sent through the command path of the bus encoder (control
//! byte `0x00`). Multi-byte commands are a command byte followed by its
//! arguments in the same payload.

use crate::size::DisplaySize;

// ---------------------------------------------------------------------------
// Fundamental commands
// ---------------------------------------------------------------------------

/// Set contrast; one argument byte (0x00–0xFF).
pub const SET_CONTRAST: u8 = 0x81;

/// Display follows RAM content.
pub const RESUME_RAM: u8 = 0xA4;

/// Normal polarity (a set RAM bit lights the pixel).
pub const NORMAL_DISPLAY: u8 = 0xA6;

/// Inverted polarity.
pub const INVERT_DISPLAY: u8 = 0xA7;

/// Panel off (sleep).
pub const DISPLAY_OFF: u8 = 0xAE;

/// Panel on.
pub const DISPLAY_ON: u8 = 0xAF;

/// Stop any running scroll.
pub const DEACTIVATE_SCROLL: u8 = 0x2E;

// ---------------------------------------------------------------------------
// Addressing
// ---------------------------------------------------------------------------

/// Memory addressing mode; one argument byte.
pub const MEMORY_MODE: u8 = 0x20;

/// Argument of [`MEMORY_MODE`] selecting horizontal addressing.
pub const MEMORY_MODE_HORIZONTAL: u8 = 0x00;

/// Column window; arguments are first and last column.
pub const COLUMN_ADDR: u8 = 0x21;

/// Page window; arguments are first and last page.
pub const PAGE_ADDR: u8 = 0x22;

// ---------------------------------------------------------------------------
// Hardware configuration
// ---------------------------------------------------------------------------

/// Display start line 0 (the line number is OR'd into the low 6 bits).
pub const SET_START_LINE: u8 = 0x40;

/// Column 127 mapped to SEG0.
pub const SEGMENT_REMAP: u8 = 0xA1;

/// Multiplex ratio; argument is `height - 1`.
pub const SET_MULTIPLEX: u8 = 0xA8;

/// COM outputs scanned from COM[N-1] to COM0.
pub const COM_SCAN_DEC: u8 = 0xC8;

/// Vertical display offset; one argument byte.
pub const SET_DISPLAY_OFFSET: u8 = 0xD3;

/// COM pins hardware configuration; argument from [`DisplaySize::COM_PINS`].
pub const SET_COM_PINS: u8 = 0xDA;

// ---------------------------------------------------------------------------
// Timing and driving
// ---------------------------------------------------------------------------

/// Clock divide ratio / oscillator frequency; one argument byte.
pub const SET_CLOCK_DIV: u8 = 0xD5;

/// Reset-default divide ratio and oscillator setting.
pub const CLOCK_DIV_DEFAULT: u8 = 0x80;

/// Pre-charge period; one argument byte.
pub const SET_PRECHARGE: u8 = 0xD9;

/// Pre-charge setting for the internal charge pump.
pub const PRECHARGE_DEFAULT: u8 = 0xF1;

/// VCOMH deselect level; one argument byte.
pub const SET_VCOM_DETECT: u8 = 0xDB;

/// VCOMH deselect level argument.
pub const VCOM_DEFAULT: u8 = 0x40;

/// Charge pump setting; one argument byte.
pub const CHARGE_PUMP: u8 = 0x8D;

/// Argument of [`CHARGE_PUMP`] enabling the internal pump.
pub const CHARGE_PUMP_ENABLE: u8 = 0x14;

// ---------------------------------------------------------------------------
// Payload builders
// ---------------------------------------------------------------------------

/// Length of the bring-up sequence returned by [`init_sequence`].
pub const INIT_SEQUENCE_LEN: usize = 26;

/// Full controller bring-up sequence for panel `SIZE`, ending with the
/// panel switched on.
pub fn init_sequence<SIZE: DisplaySize>(contrast: u8) -> [u8; INIT_SEQUENCE_LEN] {
    [
        DISPLAY_OFF,
        SET_CLOCK_DIV,
        CLOCK_DIV_DEFAULT,
        SET_MULTIPLEX,
        SIZE::HEIGHT - 1,
        SET_DISPLAY_OFFSET,
        0x00,
        SET_START_LINE,
        CHARGE_PUMP,
        CHARGE_PUMP_ENABLE,
        MEMORY_MODE,
        MEMORY_MODE_HORIZONTAL,
        SEGMENT_REMAP,
        COM_SCAN_DEC,
        SET_COM_PINS,
        SIZE::COM_PINS,
        SET_CONTRAST,
        contrast,
        SET_PRECHARGE,
        PRECHARGE_DEFAULT,
        SET_VCOM_DETECT,
        VCOM_DEFAULT,
        RESUME_RAM,
        NORMAL_DISPLAY,
        DEACTIVATE_SCROLL,
        DISPLAY_ON,
    ]
}

/// Column window spanning the whole panel width.
pub fn full_column_window<SIZE: DisplaySize>() -> [u8; 3] {
    [COLUMN_ADDR, 0, SIZE::WIDTH - 1]
}

/// Page window spanning every page.
pub fn full_page_window<SIZE: DisplaySize>() -> [u8; 3] {
    [PAGE_ADDR, 0, SIZE::pages() - 1]
}

/// Contrast command pair: `0x81` followed by `value`.
pub fn contrast(value: u8) -> [u8; 2] {
    [SET_CONTRAST, value]
}

/// `0xA7` for inverted polarity, `0xA6` for normal.
pub fn invert(inverted: bool) -> u8 {
    if inverted {
        INVERT_DISPLAY
    } else {
        NORMAL_DISPLAY
    }
}

/// `0xAF` to wake the panel, `0xAE` to put it to sleep.
pub fn display_on(on: bool) -> u8 {
    if on {
        DISPLAY_ON
    } else {
        DISPLAY_OFF
    }
}
