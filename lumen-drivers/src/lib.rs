//! Hardware driver implementations
//!
//! This crate provides concrete implementations of the traits defined
//! in lumen-core for the panel hardware:
//!
//! - Display controller (ILI9341 over SPI)
//! - Touch controller (FT6x06 over I2C)
//! - Backlight (PWM duty cycle)
//!
//! All drivers are generic over the `embedded-hal` 1.0 traits, so they
//! compile and test on the host against mock buses.

#![cfg_attr(not(test), no_std)]
#![deny(unsafe_code)]

pub mod backlight;
pub mod display;
pub mod touch;
