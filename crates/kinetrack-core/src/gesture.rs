//! Gesture data model: classified swipes, velocity, and the
//! append-only gesture log.

use serde::{Deserialize, Serialize};

use crate::types::{HandSide, ScreenPoint, Timestamp};

/// Swipe direction tag.
///
/// The label is assigned by the sign of the `(start - end) / elapsed`
/// velocity formula, not by the on-screen motion direction. Positive
/// x-velocity under that formula means the hand moved toward smaller
/// x, and is labeled "Swipe Left". Downstream consumers depend on the
/// literal formula output, so it is preserved as-is.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SwipeDirection {
    Left,
    Right,
}

impl SwipeDirection {
    pub fn text(&self) -> &'static str {
        match self {
            SwipeDirection::Left => "Swipe Left",
            SwipeDirection::Right => "Swipe Right",
        }
    }
}

/// Per-axis velocity in pixels per millisecond
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Velocity2 {
    pub vx: f32,
    pub vy: f32,
}

impl Velocity2 {
    pub fn new(vx: f32, vy: f32) -> Self {
        Self { vx, vy }
    }

    pub fn zero() -> Self {
        Self::new(0.0, 0.0)
    }

    pub fn magnitude(&self) -> f32 {
        (self.vx * self.vx + self.vy * self.vy).sqrt()
    }
}

/// One classified swipe. Immutable after construction.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SwipeGesture {
    pub hand: HandSide,
    pub start: ScreenPoint,
    pub end: ScreenPoint,
    pub velocity: Velocity2,
    pub direction: SwipeDirection,
    pub at: Timestamp,
}

impl SwipeGesture {
    /// Classify a swipe from the sampled window.
    ///
    /// `velocity = (start - end) / elapsed_ms` per axis; direction is
    /// `Left` when `velocity.vx > 0`, `Right` otherwise (including a
    /// pure-vertical displacement with `vx == 0`).
    pub fn classify(
        hand: HandSide,
        start: ScreenPoint,
        end: ScreenPoint,
        elapsed_ms: f32,
    ) -> Self {
        let velocity = Velocity2::new(
            (start.x - end.x) / elapsed_ms,
            (start.y - end.y) / elapsed_ms,
        );
        let direction = if velocity.vx > 0.0 {
            SwipeDirection::Left
        } else {
            SwipeDirection::Right
        };

        Self {
            hand,
            start,
            end,
            velocity,
            direction,
            at: Timestamp::now(),
        }
    }
}

/// A gesture reading: either the "nothing yet" sentinel or a swipe
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum Gesture {
    None,
    Swipe(SwipeGesture),
}

impl Gesture {
    pub fn is_none(&self) -> bool {
        matches!(self, Gesture::None)
    }

    pub fn as_swipe(&self) -> Option<&SwipeGesture> {
        match self {
            Gesture::None => None,
            Gesture::Swipe(g) => Some(g),
        }
    }
}

/// Ordered, append-only sequence of classified gestures.
///
/// Initialized with one `Gesture::None` sentinel so `latest` always
/// has a value before the first real swipe. Never truncated or
/// reordered.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GestureLog {
    entries: Vec<Gesture>,
}

impl GestureLog {
    pub fn new() -> Self {
        Self {
            entries: vec![Gesture::None],
        }
    }

    pub fn append(&mut self, gesture: SwipeGesture) {
        self.entries.push(Gesture::Swipe(gesture));
    }

    /// Most recent gesture; the sentinel until a swipe is recorded
    pub fn latest(&self) -> &Gesture {
        self.entries.last().unwrap_or(&Gesture::None)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Number of real swipes recorded (excludes the sentinel)
    pub fn swipe_count(&self) -> usize {
        self.entries.iter().filter(|g| !g.is_none()).count()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Gesture> {
        self.entries.iter()
    }
}

impl Default for GestureLog {
    fn default() -> Self {
        Self::new()
    }
}
