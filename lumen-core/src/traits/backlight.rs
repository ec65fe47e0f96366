//! Backlight control abstraction

/// Panel backlight brightness control
///
/// Brightness is linear in `level`; how that maps onto PWM duty or a
/// current DAC is the driver's business. Setting brightness cannot fail
/// from the bridge's point of view.
pub trait Backlight {
    /// Set brightness, 0 (off) to 255 (full)
    fn set_brightness(&mut self, level: u8);
}
