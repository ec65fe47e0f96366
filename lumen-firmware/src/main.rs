//! Lumen bridge firmware
//!
//! Bring-up for an RP2040 panel board: backlight PWM at 30%, ILI9341
//! display init and clear, FT6x06 touch probe with a degraded touchless
//! fallback, a one-shot test card streamed through the image block sink,
//! then the cooperative 5 ms tick loop that polls touch and pushes dirty
//! regions through the flush adapter.

#![no_std]
#![no_main]

mod testcard;

use defmt::{error, info};
use embassy_executor::Spawner;
use embassy_rp::gpio::{Level, Output};
use embassy_rp::i2c::{self, I2c};
use embassy_rp::pwm::{self, Pwm};
use embassy_rp::spi::{self, Spi};
use embassy_time::{Delay, Duration, Ticker};
use embedded_hal_bus::spi::ExclusiveDevice;
use {defmt_rtt as _, panic_probe as _};

use lumen_core::flush::{FlushAdapter, PixelOrder};
use lumen_core::geometry::{Rect, Size};
use lumen_core::rotation::Rotation;
use lumen_core::touch::TouchInput;
use lumen_core::traits::backlight::Backlight;
use lumen_core::traits::display::DisplayLink;
use lumen_drivers::backlight::PwmBacklight;
use lumen_drivers::display::ili9341::{self, Ili9341};
use lumen_drivers::touch::ft6x06::{self, Ft6x06};

/// Panel rotation for this board
const ROTATION: Rotation = Rotation::Deg90;

/// Touch sensor native frame; the sensor is bonded along the panel's
/// native axes
const TOUCH_EXTENTS: Size = ili9341::NATIVE_SIZE;

/// GUI tick period in milliseconds
const TICK_MS: u64 = 5;

/// Side of the marker square flushed under the finger
const MARKER: u16 = 8;

#[embassy_executor::main]
async fn main(_spawner: Spawner) {
    info!("Lumen firmware starting...");
    let p = embassy_rp::init(Default::default());

    // Backlight first, held at 30%, so init garbage never shows at full
    // glare
    let pwm = Pwm::new_output_a(p.PWM_SLICE3, p.PIN_22, pwm::Config::default());
    let (backlight_out, _) = pwm.split();
    let mut backlight = PwmBacklight::new(backlight_out.unwrap());
    backlight.set_brightness(77);

    // Display on SPI0
    let mut spi_config = spi::Config::default();
    spi_config.frequency = 40_000_000;
    let spi = Spi::new_blocking_txonly(p.SPI0, p.PIN_18, p.PIN_19, spi_config);
    let cs = Output::new(p.PIN_17, Level::High);
    let dc = Output::new(p.PIN_20, Level::Low);
    let rst = Output::new(p.PIN_21, Level::Low);
    let spi_device = ExclusiveDevice::new(spi, cs, Delay).unwrap();

    let mut display = Ili9341::new(spi_device, dc, rst, ROTATION);
    let mut delay = Delay;
    if let Err(e) = display.init(&mut delay) {
        error!("Display init failed: {:?}", e);
    }
    if let Err(e) = display.fill_screen(0x0000) {
        error!("Screen clear failed: {:?}", e);
    }

    // Touch on I2C1; a failed probe degrades to a touchless panel rather
    // than stalling the bring-up
    let i2c = I2c::new_blocking(p.I2C1, p.PIN_3, p.PIN_2, i2c::Config::default());
    let mut controller = Ft6x06::new(i2c);
    let mut touch = match controller.begin(ft6x06::DEFAULT_THRESHOLD) {
        Ok(()) => TouchInput::new(controller, ROTATION, TOUCH_EXTENTS),
        Err(e) => {
            error!("Unable to start touchscreen: {:?}", e);
            TouchInput::offline(ROTATION, TOUCH_EXTENTS)
        }
    };

    // One-shot image mode: stream the test card through the block sink
    // the way a decoder would
    if let Some(e) = testcard::draw(&mut display) {
        error!("Test card blit failed: {:?}", e);
    }

    info!("Setup done");

    let mut flusher = FlushAdapter::new(display, PixelOrder::Native);
    let marker = [0xFFFFu16; (MARKER * MARKER) as usize];
    let mut ticker = Ticker::every(Duration::from_millis(TICK_MS));
    let mut was_pressed = false;

    loop {
        ticker.next().await;

        let sample = touch.poll();
        if sample.pressed != was_pressed {
            if sample.pressed {
                info!("touch down at {},{}", sample.x, sample.y);
            } else {
                info!("touch up at {},{}", sample.x, sample.y);
            }
            was_pressed = sample.pressed;
        }

        if sample.pressed {
            // Drop a marker under the finger, standing in for the GUI
            // runtime that would normally produce dirty regions
            let size = flusher.link().size();
            let region = Rect::new(
                sample.x.min(size.width - MARKER),
                sample.y.min(size.height - MARKER),
                MARKER,
                MARKER,
            );
            flusher.flush(region, &marker, || {});
            if let Some(e) = flusher.take_error() {
                error!("Flush failed: {:?}", e);
            }
        }
    }
}
