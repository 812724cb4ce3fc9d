//! Periodic refresh of a driver shared between Embassy tasks.
//!
//! The driver is not designed for concurrent mutation, so every task that
//! draws or flushes goes through one async [`Mutex`]. Drawing tasks lock it,
//! render into the framebuffer and release it; [`display_refresh_task`]
//! pushes the result to the panel whenever the framebuffer changed.

use embassy_sync::blocking_mutex::raw::CriticalSectionRawMutex;
use embassy_sync::mutex::Mutex;
use embassy_time::{Duration, Timer};

use crate::bus::Bus;
use crate::config::DisplayConfig;
use crate::driver::OledDriver;
use crate::size::DisplaySize;

/// Driver behind the single-writer guard used by the refresh task.
pub type SharedDisplay<B, SIZE> = Mutex<CriticalSectionRawMutex, OledDriver<B, SIZE>>;

/// Periodic flush loop.
///
/// This is a regular `async fn`, **not** an Embassy `#[task]`. Callers
/// should create a thin, concrete task wrapper that calls this function,
/// since Embassy tasks cannot be generic:
///
/// ```ignore
/// #[embassy_executor::task]
/// async fn oled_task(
///     display: &'static SharedDisplay<MyConcreteI2cType, DisplaySize128x32>,
///     config: DisplayConfig,
/// ) {
///     display_refresh_task(display, config).await;
/// }
/// ```
///
/// Only `config.update_frequency_hz` is read here. Address and contrast
/// belong to the driver and were fixed when it was constructed.
///
/// # Control flow
///
/// 1. Initialise the controller.
/// 2. Loop at `config.update_frequency_hz`:
///    - Lock the driver.
///    - [`OledDriver::flush_if_dirty()`]: skip if the framebuffer is
///      unchanged since the last good flush, otherwise send the frame
///      (blocking bus writes while the lock is held).
///
/// # Errors
///
/// * Initialisation failure: logs the error and **returns** (task exits).
/// * Flush failure: logs the error; the framebuffer stays dirty and the
///   whole frame is retried next period.
#[allow(clippy::needless_pass_by_value)] // config is small and consumed
pub async fn display_refresh_task<B, SIZE>(
    display: &'static SharedDisplay<B, SIZE>,
    config: DisplayConfig,
) where
    B: Bus,
    SIZE: DisplaySize,
{
    // ── Initialisation ───────────────────────────────────────────────
    {
        let mut driver = display.lock().await;
        if driver.init().is_err() {
            #[cfg(feature = "defmt")]
            defmt::error!("OLED init failed");
            return;
        }
    }

    #[cfg(feature = "defmt")]
    defmt::info!("OLED refresh task running");

    let period = Duration::from_millis(config.update_period_ms());

    // ── Main loop ────────────────────────────────────────────────────
    loop {
        Timer::after(period).await;

        let mut driver = display.lock().await;
        if driver.flush_if_dirty().is_err() {
            #[cfg(feature = "defmt")]
            defmt::error!("OLED flush failed");
        }
    }
}
