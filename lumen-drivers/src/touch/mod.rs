//! Touch controller drivers

pub mod ft6x06;

pub use ft6x06::Ft6x06;
