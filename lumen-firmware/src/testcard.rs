//! Synthesized RGB565 test card
//!
//! Stands in for an image decoder: produces 16x16 blocks top-to-bottom
//! and feeds them through the block sink exactly the way a decoder's
//! block callback would, stopping as soon as the sink declines one.

use lumen_core::image::BlockSink;
use lumen_core::traits::display::{DisplayError, DisplayLink};

/// Block edge length, matching a JPEG MCU
const BLOCK: u16 = 16;

/// Color bars, left to right
const BARS: [u16; 8] = [
    0xFFFF, // white
    0xFFE0, // yellow
    0x07FF, // cyan
    0x07E0, // green
    0xF81F, // magenta
    0xF800, // red
    0x001F, // blue
    0x0000, // black
];

/// Draw the test card; returns the last recorded blit failure, if any
pub fn draw<D: DisplayLink>(link: &mut D) -> Option<DisplayError> {
    let size = link.size();
    let mut sink = BlockSink::new(link);
    let mut block = [0u16; (BLOCK * BLOCK) as usize];

    let mut y = 0;
    while y < size.height {
        let mut x = 0;
        while x < size.width {
            let bar = (x as u32 * BARS.len() as u32 / size.width as u32) as usize;
            block.fill(BARS[bar.min(BARS.len() - 1)]);
            if !sink.on_block(x, y, BLOCK, BLOCK, &block) {
                return sink.take_error();
            }
            x += BLOCK;
        }
        y += BLOCK;
    }
    sink.take_error()
}
