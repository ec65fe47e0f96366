//! Touch controller abstraction

/// Errors that can occur when talking to the touch controller
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum TouchError {
    /// Bus-level communication failure
    Bus,
    /// Controller absent or failed its identification probe
    NotReady,
}

/// A touch point in the sensor's native coordinate frame, pre-rotation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct RawPoint {
    /// Native x coordinate
    pub x: u16,
    /// Native y coordinate
    pub y: u16,
}

/// A polled capacitive touch controller
///
/// Polled cooperatively, never interrupt-driven: both methods must return
/// within the bus's own I/O latency and perform no retries.
pub trait TouchController {
    /// Whether a finger is currently down
    fn is_touched(&mut self) -> Result<bool, TouchError>;

    /// Read the primary touch point in the sensor's native frame
    ///
    /// Only meaningful when [`is_touched`](Self::is_touched) reported true
    /// on the same tick.
    fn read_point(&mut self) -> Result<RawPoint, TouchError>;
}
