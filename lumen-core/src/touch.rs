//! Touch input adapter
//!
//! Polled once per GUI tick. Two behaviors matter to the widgets
//! upstream: a released sample must carry the last touched position (the
//! runtime resolves drag-release against it, not against (0,0)), and a
//! poll must never block the tick loop - controller I/O failures count as
//! "not touched" for that tick and get retried naturally on the next one.

use crate::geometry::Size;
use crate::rotation::{AxisMap, Rotation};
use crate::traits::touch::TouchController;

/// Pointer state reported to the GUI runtime, in screen coordinates
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct TouchSample {
    /// Whether the pointer is down
    pub pressed: bool,
    /// Screen-space x, post-rotation
    pub x: u16,
    /// Screen-space y, post-rotation
    pub y: u16,
}

/// Polls a touch controller and reports screen-space pointer state
///
/// Owns the last known position; nothing else reads or writes it. When
/// constructed [`offline`](Self::offline) (controller failed to start)
/// every poll reports not-touched, keeping the rest of the bridge alive
/// in degraded mode.
pub struct TouchInput<C> {
    controller: Option<C>,
    map: AxisMap,
    extents: Size,
    /// Last touched position; (0, 0) until the first touch ever lands
    last: (u16, u16),
}

impl<C: TouchController> TouchInput<C> {
    /// Adapter for a sensor mounted along the panel's native axes
    pub fn new(controller: C, rotation: Rotation, extents: Size) -> Self {
        Self::with_map(controller, rotation.axis_map(), extents)
    }

    /// Adapter with a board-specific sensor mapping
    pub fn with_map(controller: C, map: AxisMap, extents: Size) -> Self {
        Self {
            controller: Some(controller),
            map,
            extents,
            last: (0, 0),
        }
    }

    /// Degraded-mode adapter with no controller behind it
    pub fn offline(rotation: Rotation, extents: Size) -> Self {
        Self {
            controller: None,
            map: rotation.axis_map(),
            extents,
            last: (0, 0),
        }
    }

    /// Whether a controller is attached
    pub fn is_online(&self) -> bool {
        self.controller.is_some()
    }

    /// Sample the pointer state for this tick
    pub fn poll(&mut self) -> TouchSample {
        let Some(controller) = self.controller.as_mut() else {
            return self.released();
        };

        match controller.is_touched() {
            Ok(true) => {}
            // Not touched, or a transient bus error: report released and
            // let the next tick retry.
            Ok(false) | Err(_) => return self.released(),
        }

        let raw = match controller.read_point() {
            Ok(point) => point,
            Err(_) => return self.released(),
        };

        let (x, y) = self.map.apply(raw, self.extents);
        self.last = (x, y);
        TouchSample {
            pressed: true,
            x,
            y,
        }
    }

    fn released(&self) -> TouchSample {
        TouchSample {
            pressed: false,
            x: self.last.0,
            y: self.last.1,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::traits::touch::{RawPoint, TouchError};
    use heapless::Deque;

    /// Scripted controller: each poll consumes one step
    #[derive(Debug, Clone, Copy)]
    enum Step {
        Up,
        Down(u16, u16),
        BusError,
        ReadError,
    }

    struct ScriptedController {
        steps: Deque<Step, 16>,
        current: Option<Step>,
    }

    impl ScriptedController {
        fn new(steps: &[Step]) -> Self {
            let mut queue = Deque::new();
            for &s in steps {
                queue.push_back(s).unwrap();
            }
            Self {
                steps: queue,
                current: None,
            }
        }
    }

    impl TouchController for ScriptedController {
        fn is_touched(&mut self) -> Result<bool, TouchError> {
            self.current = self.steps.pop_front();
            match self.current {
                Some(Step::Up) | None => Ok(false),
                Some(Step::Down(_, _)) | Some(Step::ReadError) => Ok(true),
                Some(Step::BusError) => Err(TouchError::Bus),
            }
        }

        fn read_point(&mut self) -> Result<RawPoint, TouchError> {
            match self.current {
                Some(Step::Down(x, y)) => Ok(RawPoint { x, y }),
                _ => Err(TouchError::Bus),
            }
        }
    }

    const EXTENTS: Size = Size::new(320, 480);

    fn input(steps: &[Step], rotation: Rotation) -> TouchInput<ScriptedController> {
        TouchInput::new(ScriptedController::new(steps), rotation, EXTENTS)
    }

    #[test]
    fn test_first_poll_untouched_reports_origin() {
        let mut touch = input(&[Step::Up], Rotation::Deg0);
        let sample = touch.poll();
        assert_eq!(
            sample,
            TouchSample {
                pressed: false,
                x: 0,
                y: 0
            }
        );
    }

    #[test]
    fn test_press_applies_rotation_mapping() {
        let mut touch = input(&[Step::Down(100, 50)], Rotation::Deg270);
        let sample = touch.poll();
        assert_eq!(
            sample,
            TouchSample {
                pressed: true,
                x: 430,
                y: 100
            }
        );
    }

    #[test]
    fn test_release_is_sticky_at_last_position() {
        let mut touch = input(
            &[Step::Down(100, 50), Step::Up, Step::Up, Step::Up],
            Rotation::Deg0,
        );
        assert!(touch.poll().pressed);

        // Repeated untouched polls keep returning the same point
        for _ in 0..3 {
            let sample = touch.poll();
            assert_eq!(
                sample,
                TouchSample {
                    pressed: false,
                    x: 100,
                    y: 50
                }
            );
        }
    }

    #[test]
    fn test_bus_error_reads_as_released_and_recovers() {
        let mut touch = input(
            &[Step::Down(10, 20), Step::BusError, Step::Down(30, 40)],
            Rotation::Deg0,
        );
        assert!(touch.poll().pressed);

        // Transient failure: released at the sticky position
        let sample = touch.poll();
        assert_eq!(
            sample,
            TouchSample {
                pressed: false,
                x: 10,
                y: 20
            }
        );

        // Next tick works again
        let sample = touch.poll();
        assert_eq!(
            sample,
            TouchSample {
                pressed: true,
                x: 30,
                y: 40
            }
        );
    }

    #[test]
    fn test_read_point_failure_does_not_move_last() {
        let mut touch = input(&[Step::Down(10, 20), Step::ReadError], Rotation::Deg0);
        assert!(touch.poll().pressed);

        let sample = touch.poll();
        assert_eq!(
            sample,
            TouchSample {
                pressed: false,
                x: 10,
                y: 20
            }
        );
    }

    #[test]
    fn test_offline_adapter_always_reports_released() {
        let mut touch: TouchInput<ScriptedController> =
            TouchInput::offline(Rotation::Deg90, EXTENTS);
        assert!(!touch.is_online());

        for _ in 0..3 {
            let sample = touch.poll();
            assert_eq!(
                sample,
                TouchSample {
                    pressed: false,
                    x: 0,
                    y: 0
                }
            );
        }
    }
}
