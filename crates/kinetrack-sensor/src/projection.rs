//! 3D-to-screen projection boundary.
//!
//! The projection itself is a vendor concern; the engine only depends
//! on the `CoordinateMapper` contract and on the degradation rules at
//! the seam: an infinite coordinate means "unprojectable" and clamps
//! that axis to zero, and an untracked joint yields the degenerate
//! origin point without being projected at all.

use kinetrack_core::{CameraPoint, JointSample, ScreenPoint, TrackingState};

/// Contract with the projection collaborator.
///
/// Either returned coordinate may be ±infinity to signal that the
/// position cannot be mapped onto the display on that axis.
pub trait CoordinateMapper: Send + Sync {
    fn project(&self, position: CameraPoint) -> (f32, f32);
}

/// Screen position of one joint observation.
///
/// A `NotTracked` joint is never projected: it degrades to the origin,
/// and that degenerate value flows onward into sampling like any other
/// reading. When a hand re-enters tracking this can produce one large
/// spurious displacement; consumers depend on that inherited behavior.
pub fn joint_to_screen<M: CoordinateMapper + ?Sized>(
    mapper: &M,
    joint: &JointSample,
) -> ScreenPoint {
    if joint.tracking == TrackingState::NotTracked {
        return ScreenPoint::origin();
    }

    let (x, y) = mapper.project(joint.position);
    ScreenPoint::from_projection(x, y)
}

/// Pinhole projection onto a color frame, for simulation and tests.
///
/// Defaults match a 1920x1080 color space. A point at zero depth
/// divides to a non-finite coordinate, which exercises the same
/// clamping path the vendor mapper triggers.
#[derive(Debug, Clone, Copy)]
pub struct LinearMapper {
    pub focal_px: f32,
    pub principal_x: f32,
    pub principal_y: f32,
}

impl LinearMapper {
    pub fn new(focal_px: f32, principal_x: f32, principal_y: f32) -> Self {
        Self {
            focal_px,
            principal_x,
            principal_y,
        }
    }
}

impl Default for LinearMapper {
    fn default() -> Self {
        Self::new(1050.0, 960.0, 540.0)
    }
}

impl CoordinateMapper for LinearMapper {
    fn project(&self, p: CameraPoint) -> (f32, f32) {
        let x = self.principal_x + self.focal_px * p.x / p.z;
        let y = self.principal_y - self.focal_px * p.y / p.z;
        (x, y)
    }
}
