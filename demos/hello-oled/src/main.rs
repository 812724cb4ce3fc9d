//! Hello OLED example
//!
//! Standalone hardware demonstration that exercises [`OledDriver`] on a
//! 128×32 SSD1306 module: a text banner, a live float counter, and a small
//! set of primitives redrawn every frame.
//!
//! # Wiring
//!
//! | Signal    | Pico 2 Pin | Notes           |
//! |-----------|------------|-----------------|
//! | I2C0 SDA  | GP20       |                 |
//! | I2C0 SCL  | GP21       |                 |
//! | OLED VCC  | 3V3        |                 |
//! | OLED GND  | GND        |                 |
//!
//! # Screen Layout
//!
//! | Row (px) | Content                                  |
//! |----------|------------------------------------------|
//! | 0–7      | `Hello RP2350!`                          |
//! | 8–15     | `t=` elapsed seconds, 2 decimals         |
//! | 16–31    | bouncing circle inside a frame           |

#![no_std]
#![no_main]

use defmt::*;
use embassy_executor::Spawner;
use embassy_rp as hal;
use embassy_rp::block::ImageDef;
use embassy_rp::i2c::{self, I2c};
use embassy_time::{Duration, Timer};
use {defmt_rtt as _, panic_probe as _};

use mono_oled_rs::{DisplaySize128x32, OledDriver, DEFAULT_ADDRESS};

/// Tell the Boot ROM about our application.
#[link_section = ".start_block"]
#[used]
pub static IMAGE_DEF: ImageDef = hal::block::ImageDef::secure_exe();

const FRAME_MS: u64 = 50;

#[embassy_executor::main]
async fn main(_spawner: Spawner) {
    let p = embassy_rp::init(Default::default());
    info!("Hello OLED example starting");

    // --- I2C bus (GP20 = SDA, GP21 = SCL), blocking mode ---
    let mut config = i2c::Config::default();
    config.frequency = 400_000;
    let i2c = I2c::new_blocking(p.I2C0, p.PIN_21, p.PIN_20, config);

    let mut oled: OledDriver<_, DisplaySize128x32> = OledDriver::new(i2c, DEFAULT_ADDRESS);

    if let Err(e) = oled.init() {
        error!("OLED init failed: {}", Debug2Format(&e));
        return;
    }
    oled.clear().ok();
    info!("OLED initialised");

    let mut frame: u32 = 0;
    let mut ball_x: i16 = 8;
    let mut dx: i16 = 2;

    loop {
        oled.clear_buffer();

        oled.set_cursor(0, 0);
        oled.write_str("Hello RP2350!\nt=");
        oled.write_float(frame as f32 * FRAME_MS as f32 / 1000.0, 2);

        oled.draw_rect(0, 16, 128, 16, true);
        oled.draw_circle(ball_x, 23, 5, true);

        if let Err(e) = oled.flush() {
            warn!("flush failed: {}", Debug2Format(&e));
        }

        ball_x += dx;
        if ball_x <= 7 || ball_x >= 120 {
            dx = -dx;
        }
        frame = frame.wrapping_add(1);

        Timer::after(Duration::from_millis(FRAME_MS)).await;
    }
}
