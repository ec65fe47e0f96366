//! Screen-space geometry shared by the adapters

/// Logical screen dimensions in pixels
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Size {
    /// Width in pixels
    pub width: u16,
    /// Height in pixels
    pub height: u16,
}

impl Size {
    /// Create a new size
    pub const fn new(width: u16, height: u16) -> Self {
        Self { width, height }
    }

    /// Check whether a rectangle lies entirely within this size
    pub const fn contains(&self, rect: &Rect) -> bool {
        rect.x as u32 + rect.w as u32 <= self.width as u32
            && rect.y as u32 + rect.h as u32 <= self.height as u32
    }

    /// Swap width and height
    pub const fn transposed(&self) -> Self {
        Self {
            width: self.height,
            height: self.width,
        }
    }
}

/// A rectangle in screen coordinates
///
/// Used for dirty regions handed down by the GUI runtime and for the
/// addressable window programmed into the display controller.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Rect {
    /// Left edge
    pub x: u16,
    /// Top edge
    pub y: u16,
    /// Width in pixels
    pub w: u16,
    /// Height in pixels
    pub h: u16,
}

impl Rect {
    /// Create a rectangle from origin and size
    pub const fn new(x: u16, y: u16, w: u16, h: u16) -> Self {
        Self { x, y, w, h }
    }

    /// Create a rectangle from inclusive corners, the convention GUI
    /// runtimes use for dirty regions (`x2`/`y2` are the last pixel,
    /// not one past it)
    pub const fn from_corners(x1: u16, y1: u16, x2: u16, y2: u16) -> Self {
        Self {
            x: x1,
            y: y1,
            w: x2 - x1 + 1,
            h: y2 - y1 + 1,
        }
    }

    /// Number of pixels covered by this rectangle
    pub const fn area(&self) -> u32 {
        self.w as u32 * self.h as u32
    }

    /// True when the rectangle covers no pixels
    pub const fn is_empty(&self) -> bool {
        self.w == 0 || self.h == 0
    }
}
