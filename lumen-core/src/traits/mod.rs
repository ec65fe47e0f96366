//! Hardware abstraction traits
//!
//! These are the seams between the board-agnostic adapters in this crate
//! and the concrete drivers in `lumen-drivers`. Anything that talks to
//! silicon implements one of these; the adapters only ever see the trait.

pub mod backlight;
pub mod display;
pub mod touch;

// Re-export key traits at crate root for convenience
pub use backlight::Backlight;
pub use display::{DisplayError, DisplayLink};
pub use touch::{RawPoint, TouchController, TouchError};
