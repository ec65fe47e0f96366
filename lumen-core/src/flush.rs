//! Display flush adapter
//!
//! Carries one dirty region per call from the GUI runtime to the display
//! controller. The runtime busy-waits on the completion callback before it
//! reuses the pixel buffer, so the one non-negotiable rule here is that
//! every accepted flush acknowledges exactly once, on every path - a
//! hardware error that skipped the callback would deadlock the whole
//! render pipeline. The acknowledgment is therefore held in a scoped
//! guard that resolves on drop instead of being called by hand on each
//! return path.

use crate::geometry::Rect;
use crate::traits::display::{DisplayError, DisplayLink};

/// In-memory byte order of the GUI runtime's pixel buffers
///
/// The runtime renders RGB565 in whatever byte order its configuration
/// picked; the display wire order is the driver's concern. `Swapped`
/// makes the adapter swap each pixel's bytes while streaming.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum PixelOrder {
    /// Buffer pixels are logical RGB565 values
    Native,
    /// Buffer pixels are byte-swapped RGB565
    Swapped,
}

/// Completion handle for one flush call
///
/// The GUI runtime supplies one per flush; consuming it tells the runtime
/// the pixel buffer may be reused. Implemented for any `FnOnce()`.
pub trait FlushDone {
    /// Signal the runtime that the buffer is released
    fn done(self);
}

impl<F: FnOnce()> FlushDone for F {
    fn done(self) {
        self()
    }
}

/// Resolves the completion when dropped, so early returns and error paths
/// cannot skip it
struct Acknowledge<T: FlushDone>(Option<T>);

impl<T: FlushDone> Drop for Acknowledge<T> {
    fn drop(&mut self) {
        if let Some(done) = self.0.take() {
            done.done();
        }
    }
}

/// Bridges GUI runtime flushes onto a [`DisplayLink`]
///
/// Failures never propagate to the caller (the runtime has no error
/// path); they are recorded on a side channel and drained with
/// [`take_error`](Self::take_error).
pub struct FlushAdapter<D: DisplayLink> {
    link: D,
    order: PixelOrder,
    last_error: Option<DisplayError>,
}

/// Pixels converted per chunk when byte-swapping
const SWAP_CHUNK: usize = 64;

impl<D: DisplayLink> FlushAdapter<D> {
    /// Create an adapter over a display link
    pub fn new(link: D, order: PixelOrder) -> Self {
        Self {
            link,
            order,
            last_error: None,
        }
    }

    /// Access the underlying link
    pub fn link(&self) -> &D {
        &self.link
    }

    /// Mutable access to the underlying link
    pub fn link_mut(&mut self) -> &mut D {
        &mut self.link
    }

    /// Release the underlying link
    pub fn release(self) -> D {
        self.link
    }

    /// Take the most recent recorded failure, if any
    pub fn take_error(&mut self) -> Option<DisplayError> {
        self.last_error.take()
    }

    /// Push one dirty region to the display
    ///
    /// `pixels` must cover exactly `region.area()` pixels in row-major
    /// order and is only borrowed for the duration of this call. `done`
    /// is resolved exactly once before this function returns, regardless
    /// of hardware outcome.
    pub fn flush(&mut self, region: Rect, pixels: &[u16], done: impl FlushDone) {
        // Guard constructed first: from here on, every exit acknowledges.
        let _ack = Acknowledge(Some(done));

        if pixels.len() as u32 != region.area() {
            self.last_error = Some(DisplayError::BufferMismatch);
            return;
        }
        if !self.link.size().contains(&region) {
            self.last_error = Some(DisplayError::BadRegion);
            return;
        }
        if region.is_empty() {
            return;
        }

        self.link.begin_write();
        let result = self.write_region(region, pixels);
        self.link.end_write();

        if let Err(e) = result {
            self.last_error = Some(e);
        }
    }

    fn write_region(&mut self, region: Rect, pixels: &[u16]) -> Result<(), DisplayError> {
        self.link.set_window(region)?;

        match self.order {
            PixelOrder::Native => self.link.write_pixels(pixels)?,
            PixelOrder::Swapped => {
                let mut chunk = [0u16; SWAP_CHUNK];
                for part in pixels.chunks(SWAP_CHUNK) {
                    for (dst, src) in chunk.iter_mut().zip(part) {
                        *dst = src.swap_bytes();
                    }
                    self.link.write_pixels(&chunk[..part.len()])?;
                }
            }
        }

        Ok(())
    }
}
