//! Image block sink
//!
//! Target of a block-producing image decoder: the decoder calls
//! [`BlockSink::on_block`] once per rectangular block of a single image,
//! top to bottom, and stops as soon as the sink returns false. The sink
//! blits each block straight to the display; once a block starts at or
//! below the bottom edge the remainder of the image cannot be visible, so
//! decoding is halted early. Pixels arrive already byte-order-normalized
//! by the decoder's own swap-bytes setting.

use crate::geometry::Rect;
use crate::traits::display::{DisplayError, DisplayLink};

/// Blits decoded image blocks to a display
///
/// Holds no state between images; one instance is typically created per
/// decode call. Hardware failures cannot stop the decoder (the callback
/// contract has no error channel), so they are recorded for the caller to
/// drain afterwards.
pub struct BlockSink<'a, D: DisplayLink> {
    link: &'a mut D,
    last_error: Option<DisplayError>,
}

impl<'a, D: DisplayLink> BlockSink<'a, D> {
    /// Create a sink over a display link
    pub fn new(link: &'a mut D) -> Self {
        Self {
            link,
            last_error: None,
        }
    }

    /// Take the most recent recorded blit failure, if any
    pub fn take_error(&mut self) -> Option<DisplayError> {
        self.last_error.take()
    }

    /// Accept one decoded block at `(x, y)`
    ///
    /// Returns true to request the next block, false to halt the decode.
    /// Blocks straddling the right or bottom edge are clipped to the
    /// visible area; blocks starting past the right edge are skipped but
    /// do not halt the decode (blocks further left on a lower row may
    /// still be visible).
    pub fn on_block(&mut self, x: u16, y: u16, w: u16, h: u16, pixels: &[u16]) -> bool {
        let size = self.link.size();

        // Image has run off the bottom of the screen: stop decoding.
        if y >= size.height {
            return false;
        }
        if w == 0 || h == 0 || x >= size.width {
            return true;
        }
        if (pixels.len() as u32) < w as u32 * h as u32 {
            self.last_error = Some(DisplayError::BufferMismatch);
            return true;
        }

        let clipped_w = w.min(size.width - x);
        let clipped_h = h.min(size.height - y);

        self.link.begin_write();
        let result = blit(self.link, x, y, w, clipped_w, clipped_h, pixels);
        self.link.end_write();

        if let Err(e) = result {
            self.last_error = Some(e);
        }
        true
    }
}

/// Write the visible part of a block whose rows are `stride` pixels wide
fn blit<D: DisplayLink>(
    link: &mut D,
    x: u16,
    y: u16,
    stride: u16,
    w: u16,
    h: u16,
    pixels: &[u16],
) -> Result<(), DisplayError> {
    link.set_window(Rect::new(x, y, w, h))?;

    if w == stride {
        // No horizontal clipping: the visible rows are contiguous.
        link.write_pixels(&pixels[..w as usize * h as usize])
    } else {
        for row in 0..h as usize {
            let start = row * stride as usize;
            link.write_pixels(&pixels[start..start + w as usize])?;
        }
        Ok(())
    }
}
