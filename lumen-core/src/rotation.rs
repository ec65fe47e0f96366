//! Screen orientation and the raw-touch coordinate transform
//!
//! The touch sensor reports points in its native frame, which is fixed by
//! how the sensor is bonded to the panel. When the panel is rotated the
//! GUI runtime works in a rotated coordinate space, so raw points have to
//! be remapped. The mapping is kept as data ([`AxisMap`]) rather than a
//! branch per rotation: boards with a different sensor mounting supply
//! their own map instead of patching control flow.

use crate::geometry::Size;
use crate::traits::touch::RawPoint;

/// Panel orientation, fixed at initialization
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Rotation {
    /// Native orientation
    Deg0,
    /// Rotated 90 degrees clockwise
    Deg90,
    /// Upside down
    Deg180,
    /// Rotated 270 degrees clockwise
    Deg270,
}

impl Rotation {
    /// Logical screen size for a panel with the given native size
    ///
    /// 90 and 270 degree rotations swap width and height.
    pub const fn logical_size(self, native: Size) -> Size {
        match self {
            Rotation::Deg0 | Rotation::Deg180 => native,
            Rotation::Deg90 | Rotation::Deg270 => native.transposed(),
        }
    }

    /// The raw-touch transform for a sensor mounted along the panel's
    /// native axes
    pub const fn axis_map(self) -> AxisMap {
        match self {
            Rotation::Deg0 => AxisMap::IDENTITY,
            Rotation::Deg90 => AxisMap {
                invert_x: true,
                invert_y: false,
                swap_axes: true,
            },
            Rotation::Deg180 => AxisMap {
                invert_x: true,
                invert_y: true,
                swap_axes: false,
            },
            Rotation::Deg270 => AxisMap {
                invert_x: false,
                invert_y: true,
                swap_axes: true,
            },
        }
    }
}

/// Sensor-to-screen coordinate transform
///
/// Inversions happen first, in the sensor's native frame (an inverted
/// coordinate `c` over extent `E` becomes `E - c`), then the axes are
/// optionally swapped. The four standard rotations are instances of this;
/// hardware revisions with a mirrored or transposed sensor bonding can
/// construct their own.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct AxisMap {
    /// Mirror the native x axis
    pub invert_x: bool,
    /// Mirror the native y axis
    pub invert_y: bool,
    /// Exchange the axes after mirroring
    pub swap_axes: bool,
}

impl AxisMap {
    /// The pass-through map
    pub const IDENTITY: Self = Self {
        invert_x: false,
        invert_y: false,
        swap_axes: false,
    };

    /// Map a raw sensor point into screen space
    ///
    /// `extents` is the sensor's native frame size. Raw coordinates past
    /// the extents are clamped by the saturating subtraction; the sensor
    /// never reports them in practice.
    pub fn apply(&self, raw: RawPoint, extents: Size) -> (u16, u16) {
        let x = if self.invert_x {
            extents.width.saturating_sub(raw.x)
        } else {
            raw.x
        };
        let y = if self.invert_y {
            extents.height.saturating_sub(raw.y)
        } else {
            raw.y
        };

        if self.swap_axes {
            (y, x)
        } else {
            (x, y)
        }
    }
}
