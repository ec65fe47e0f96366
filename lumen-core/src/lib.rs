//! Board-agnostic core of the Lumen display/touch bridge
//!
//! This crate contains everything that does not depend on specific
//! hardware:
//!
//! - Hardware abstraction traits (display link, touch controller,
//!   backlight)
//! - Display flush adapter with exactly-once completion
//! - Touch input adapter with rotation mapping and sticky release
//! - Image block sink for decoder callbacks
//! - Screen geometry and orientation types

#![cfg_attr(not(test), no_std)]
#![deny(unsafe_code)]

pub mod flush;
pub mod geometry;
pub mod image;
pub mod rotation;
pub mod touch;
pub mod traits;
