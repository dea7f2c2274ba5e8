//! Two-phase hand-position sampling.
//!
//! `current` positions are overwritten on every frame that carries a
//! focused body; `last` positions move only when the gesture clock
//! snapshots them. The split decouples the gesture-sampling interval
//! from the faster, irregular frame-arrival rate.

use serde::{Deserialize, Serialize};

use kinetrack_core::ScreenPoint;

/// One hand's sampled window: the previous snapshot and the latest
/// frame-driven reading
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct HandWindow {
    pub last: ScreenPoint,
    pub current: ScreenPoint,
}

impl HandWindow {
    pub fn displacement(&self) -> (f32, f32) {
        (
            self.current.x - self.last.x,
            self.current.y - self.last.y,
        )
    }
}

/// Both hands' windows, copied out under one lock acquisition
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct HandWindows {
    pub right: HandWindow,
    pub left: HandWindow,
}

/// Sampled hand positions for the body in focus. All zero at startup.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct MotionState {
    right_last: ScreenPoint,
    right_current: ScreenPoint,
    left_last: ScreenPoint,
    left_current: ScreenPoint,
}

impl MotionState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Frame-phase update: overwrite the current readings only.
    /// Called once per frame that carries a focused body.
    pub fn record(&mut self, left: ScreenPoint, right: ScreenPoint) {
        self.left_current = left;
        self.right_current = right;
    }

    /// Tick-phase update: copy out both windows and advance `last` to
    /// `current` for both hands. The snapshot is unconditional; it
    /// happens whether or not the tick classifies a gesture.
    pub fn snapshot(&mut self) -> HandWindows {
        let windows = HandWindows {
            right: HandWindow {
                last: self.right_last,
                current: self.right_current,
            },
            left: HandWindow {
                last: self.left_last,
                current: self.left_current,
            },
        };

        self.right_last = self.right_current;
        self.left_last = self.left_current;

        windows
    }

    /// Latest frame-driven readings, for display
    pub fn current(&self) -> (ScreenPoint, ScreenPoint) {
        (self.left_current, self.right_current)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_starts_all_zero() {
        let state = MotionState::new();
        let (left, right) = state.current();
        assert_eq!(left, ScreenPoint::origin());
        assert_eq!(right, ScreenPoint::origin());
    }

    #[test]
    fn test_record_touches_current_only() {
        let mut state = MotionState::new();
        state.record(ScreenPoint::new(10.0, 20.0), ScreenPoint::new(30.0, 40.0));
        state.record(ScreenPoint::new(11.0, 21.0), ScreenPoint::new(31.0, 41.0));

        let windows = state.snapshot();
        // `last` never moved between frames
        assert_eq!(windows.left.last, ScreenPoint::origin());
        assert_eq!(windows.right.last, ScreenPoint::origin());
        assert_eq!(windows.left.current, ScreenPoint::new(11.0, 21.0));
        assert_eq!(windows.right.current, ScreenPoint::new(31.0, 41.0));
    }

    #[test]
    fn test_snapshot_advances_last_to_current() {
        let mut state = MotionState::new();
        state.record(ScreenPoint::new(5.0, 6.0), ScreenPoint::new(7.0, 8.0));
        state.snapshot();

        // next window's `last` equals the previous tick's `current`,
        // gesture or not
        let windows = state.snapshot();
        assert_eq!(windows.left.last, ScreenPoint::new(5.0, 6.0));
        assert_eq!(windows.right.last, ScreenPoint::new(7.0, 8.0));
        assert_eq!(windows.left.displacement(), (0.0, 0.0));
        assert_eq!(windows.right.displacement(), (0.0, 0.0));
    }

    #[test]
    fn test_displacement_is_current_minus_last() {
        let mut state = MotionState::new();
        state.record(ScreenPoint::origin(), ScreenPoint::new(100.0, 400.0));
        state.snapshot();
        state.record(ScreenPoint::origin(), ScreenPoint::new(450.0, 380.0));

        let windows = state.snapshot();
        let (dx, dy) = windows.right.displacement();
        assert_eq!(dx, 350.0);
        assert_eq!(dy, -20.0);
    }
}
