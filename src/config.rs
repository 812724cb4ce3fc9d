//! Runtime configuration for the driver and refresh task.

/// Default 7-bit I2C address of SSD1306 modules (`0x3D` when SA0 is high).
pub const DEFAULT_ADDRESS: u8 = 0x3C;

/// Contrast programmed by the init sequence.
pub const DEFAULT_CONTRAST: u8 = 0xCF;

/// Configuration for [`OledDriver`](crate::OledDriver) and the refresh task.
///
/// Panel geometry is not configured here; it is the driver's
/// [`DisplaySize`](crate::DisplaySize) type parameter.
///
/// [`DisplayConfig::default()`] gives address `0x3C`, contrast `0xCF` and a
/// 30 Hz refresh.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DisplayConfig {
    /// 7-bit bus address of the controller. Default: `0x3C`.
    pub address: u8,
    /// Contrast sent during `init()`. Default: `0xCF`.
    pub contrast: u8,
    /// Refresh task polling rate in Hz. Default: 30.
    pub update_frequency_hz: u32,
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self {
            address: DEFAULT_ADDRESS,
            contrast: DEFAULT_CONTRAST,
            update_frequency_hz: 30,
        }
    }
}

impl DisplayConfig {
    /// Convert the configured frequency to a timer period in milliseconds.
    ///
    /// Formula: `1000 / update_frequency_hz`, with 0 Hz treated as 1 Hz.
    pub fn update_period_ms(&self) -> u64 {
        1000 / self.update_frequency_hz.max(1) as u64
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_values() {
        let c = DisplayConfig::default();
        assert_eq!(c.address, 0x3C);
        assert_eq!(c.contrast, 0xCF);
        assert_eq!(c.update_frequency_hz, 30);
    }

    #[test]
    fn update_period_30hz() {
        assert_eq!(DisplayConfig::default().update_period_ms(), 33);
    }

    #[test]
    fn update_period_60hz() {
        let c = DisplayConfig {
            update_frequency_hz: 60,
            ..DisplayConfig::default()
        };
        assert_eq!(c.update_period_ms(), 16);
    }

    #[test]
    fn update_period_zero_hz_does_not_divide_by_zero() {
        let c = DisplayConfig {
            update_frequency_hz: 0,
            ..DisplayConfig::default()
        };
        assert_eq!(c.update_period_ms(), 1000);
    }
}
