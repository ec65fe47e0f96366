//! PWM backlight driver

use embedded_hal::pwm::SetDutyCycle;

use lumen_core::traits::backlight::Backlight;

/// Panel backlight on a PWM channel
///
/// Maps the bridge's 0-255 brightness scale onto whatever duty range the
/// channel supports. A duty-cycle write cannot meaningfully fail mid-run
/// on the supported hardware, and the panel keeps working unlit, so
/// failures are swallowed rather than surfaced.
pub struct PwmBacklight<P> {
    channel: P,
}

impl<P: SetDutyCycle> PwmBacklight<P> {
    /// Wrap a PWM channel; brightness is whatever the channel was left at
    pub fn new(channel: P) -> Self {
        Self { channel }
    }

    /// Release the PWM channel
    pub fn release(self) -> P {
        self.channel
    }
}

impl<P: SetDutyCycle> Backlight for PwmBacklight<P> {
    fn set_brightness(&mut self, level: u8) {
        let _ = self.channel.set_duty_cycle_fraction(u16::from(level), 255);
    }
}
