//! Fundamental types for the Kinetrack system.

use std::collections::HashMap;

use chrono::{DateTime, Utc};
use nalgebra::{Point2, Point3};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Sensor-assigned tracking identifier for a body.
///
/// The sensor hands out stable 64-bit ids for as long as it keeps a
/// body tracked; identity is not persisted across sessions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct BodyId(pub u64);

/// Session identifier for one engine run
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SessionId(pub Uuid);

impl SessionId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for SessionId {
    fn default() -> Self {
        Self::new()
    }
}

/// Timestamp wrapper with nanosecond precision
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Timestamp(pub i64);

impl Timestamp {
    pub fn now() -> Self {
        Self(Utc::now().timestamp_nanos_opt().unwrap_or(0))
    }

    pub fn from_nanos(nanos: i64) -> Self {
        Self(nanos)
    }

    pub fn as_nanos(&self) -> i64 {
        self.0
    }

    pub fn as_secs_f64(&self) -> f64 {
        self.0 as f64 / 1_000_000_000.0
    }

    pub fn to_datetime(&self) -> DateTime<Utc> {
        DateTime::from_timestamp_nanos(self.0)
    }
}

/// Skeletal joint labels consumed by the engine
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum JointLabel {
    LeftHand,
    RightHand,
    LeftThumb,
    RightThumb,
    SpineBase,
}

/// Per-joint tracking confidence reported by the sensor
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TrackingState {
    Tracked,
    Inferred,
    NotTracked,
}

/// Hand laterality
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum HandSide {
    Left,
    Right,
}

/// Hand pose classification reported by the sensor
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum HandState {
    Open,
    Closed,
    Lasso,
    NotTracked,
    Unknown,
}

impl HandState {
    /// Display text for a hand state reading
    pub fn text(&self) -> &'static str {
        match self {
            HandState::Open => "Open",
            HandState::Closed => "Closed",
            HandState::Lasso => "Lasso",
            HandState::NotTracked => "Not Tracked",
            HandState::Unknown => "Unknown",
        }
    }

    /// Display text for an optional reading; `"-"` when absent
    pub fn text_or_default(state: Option<HandState>) -> &'static str {
        state.map(|s| s.text()).unwrap_or("-")
    }
}

/// 3D position in camera space (meters)
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct CameraPoint {
    pub x: f32,
    pub y: f32,
    pub z: f32,
}

impl CameraPoint {
    pub fn new(x: f32, y: f32, z: f32) -> Self {
        Self { x, y, z }
    }

    pub fn origin() -> Self {
        Self::new(0.0, 0.0, 0.0)
    }

    pub fn to_nalgebra(&self) -> Point3<f32> {
        Point3::new(self.x, self.y, self.z)
    }

    pub fn from_nalgebra(p: Point3<f32>) -> Self {
        Self::new(p.x, p.y, p.z)
    }
}

/// 2D display-space coordinate produced by projection
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct ScreenPoint {
    pub x: f32,
    pub y: f32,
}

impl ScreenPoint {
    pub fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    /// Degenerate "no reading" value
    pub fn origin() -> Self {
        Self::new(0.0, 0.0)
    }

    /// Build a screen point from a raw projection result.
    ///
    /// The projection collaborator signals "unprojectable" with an
    /// infinite coordinate; that axis is clamped to zero while the
    /// other axis is preserved. Only infinity is tested.
    pub fn from_projection(x: f32, y: f32) -> Self {
        Self {
            x: if x.is_infinite() { 0.0 } else { x },
            y: if y.is_infinite() { 0.0 } else { y },
        }
    }

    pub fn to_point2(&self) -> Point2<f32> {
        Point2::new(self.x, self.y)
    }
}

/// One joint observation at one instant
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct JointSample {
    pub label: JointLabel,
    pub position: CameraPoint,
    pub tracking: TrackingState,
}

impl JointSample {
    pub fn new(label: JointLabel, position: CameraPoint, tracking: TrackingState) -> Self {
        Self {
            label,
            position,
            tracking,
        }
    }
}

/// One candidate body as reported by the sensor.
///
/// Read-only input to the engine; the sensor owns the tracking
/// algorithm that populates it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TrackedBody {
    pub id: BodyId,
    pub is_tracked: bool,
    pub joints: HashMap<JointLabel, JointSample>,
    pub left_hand_state: HandState,
    pub right_hand_state: HandState,
}

impl TrackedBody {
    pub fn new(id: BodyId) -> Self {
        Self {
            id,
            is_tracked: true,
            joints: HashMap::new(),
            left_hand_state: HandState::Unknown,
            right_hand_state: HandState::Unknown,
        }
    }

    pub fn untracked(id: BodyId) -> Self {
        Self {
            is_tracked: false,
            ..Self::new(id)
        }
    }

    pub fn with_joint(
        mut self,
        label: JointLabel,
        position: CameraPoint,
        tracking: TrackingState,
    ) -> Self {
        self.joints
            .insert(label, JointSample::new(label, position, tracking));
        self
    }

    pub fn with_hand_states(mut self, left: HandState, right: HandState) -> Self {
        self.left_hand_state = left;
        self.right_hand_state = right;
        self
    }

    pub fn joint(&self, label: JointLabel) -> Option<&JointSample> {
        self.joints.get(&label)
    }

    pub fn hand_state(&self, side: HandSide) -> HandState {
        match side {
            HandSide::Left => self.left_hand_state,
            HandSide::Right => self.right_hand_state,
        }
    }
}

/// One delivery of tracked-body data from the sensor.
///
/// Body order is significant: the focus tie-break keeps the first
/// body encountered at the minimum depth.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BodyFrame {
    pub timestamp: Timestamp,
    pub bodies: Vec<TrackedBody>,
}

impl BodyFrame {
    pub fn new(timestamp: Timestamp, bodies: Vec<TrackedBody>) -> Self {
        Self { timestamp, bodies }
    }

    /// A frame with no candidate bodies (the sensor delivers these)
    pub fn empty(timestamp: Timestamp) -> Self {
        Self::new(timestamp, Vec::new())
    }
}

/// The body currently selected as primary subject
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FocusTarget {
    pub body_id: BodyId,
    /// SpineBase depth used for the selection (meters)
    pub depth_m: f32,
}

/// Focus selection result for one frame.
///
/// Recomputed from scratch every frame; "no body" is structurally
/// distinct from "a body at default depth".
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FocusState {
    pub focus: Option<FocusTarget>,
    pub other_tracked: usize,
}

impl FocusState {
    pub fn none() -> Self {
        Self {
            focus: None,
            other_tracked: 0,
        }
    }

    pub fn body_id(&self) -> Option<BodyId> {
        self.focus.map(|t| t.body_id)
    }
}

impl Default for FocusState {
    fn default() -> Self {
        Self::none()
    }
}

/// Projected screen positions of the four display joints
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct HandPoints {
    pub left_hand: ScreenPoint,
    pub right_hand: ScreenPoint,
    pub left_thumb: ScreenPoint,
    pub right_thumb: ScreenPoint,
}
