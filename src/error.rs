//! Error types for the OLED display driver.

use core::fmt;

/// Errors that can occur during OLED display operations.
///
/// Generic over the bus error so the transport's own error type reaches the
/// caller unchanged. Off-screen drawing is never an error; it is clipped.
#[derive(Debug, PartialEq, Eq)]
pub enum OledError<E> {
    /// Underlying bus transaction failed. Not retried by the driver.
    Bus(E),
    /// A controller command was attempted before
    /// [`OledDriver::init()`](crate::OledDriver::init) succeeded.
    NotInitialized,
}

// Allow ergonomic `?` propagation from raw bus errors.
impl<E> From<E> for OledError<E> {
    fn from(error: E) -> Self {
        OledError::Bus(error)
    }
}

impl<E: fmt::Debug> fmt::Display for OledError<E> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            OledError::Bus(e) => write!(f, "Bus error: {:?}", e),
            OledError::NotInitialized => write!(f, "Display not initialized"),
        }
    }
}

#[cfg(feature = "defmt")]
impl<E: defmt::Format> defmt::Format for OledError<E> {
    fn format(&self, f: defmt::Formatter) {
        match self {
            OledError::Bus(e) => defmt::write!(f, "Bus error: {}", e),
            OledError::NotInitialized => defmt::write!(f, "Not initialized"),
        }
    }
}
