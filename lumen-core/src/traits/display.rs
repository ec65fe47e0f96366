//! Display controller abstraction

use crate::geometry::{Rect, Size};

/// Errors that can occur on the display write path
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum DisplayError {
    /// Bus-level communication failure
    Bus,
    /// Controller did not respond in time
    Timeout,
    /// Window rectangle outside the addressable area
    BadRegion,
    /// Pixel buffer length does not match the window area
    BufferMismatch,
}

/// Write path of a display controller
///
/// Models the transaction discipline of TFT controllers: open a write
/// transaction, program the addressable window, stream pixels into it in
/// row-major order, close the transaction. There is exactly one caller at
/// a time (the bridge runs single-threaded), so the transaction is a
/// scoped resource rather than a lock.
pub trait DisplayLink {
    /// Logical screen size (post-rotation)
    fn size(&self) -> Size;

    /// Open a write transaction
    fn begin_write(&mut self);

    /// Program the addressable window
    ///
    /// Subsequent pixel writes fill `region` left-to-right, top-to-bottom.
    fn set_window(&mut self, region: Rect) -> Result<(), DisplayError>;

    /// Stream pixels into the current window
    ///
    /// `pixels` are logical RGB565 values; the implementation owns the
    /// wire byte order. May be called repeatedly within one window.
    fn write_pixels(&mut self, pixels: &[u16]) -> Result<(), DisplayError>;

    /// Close the write transaction
    fn end_write(&mut self);
}
