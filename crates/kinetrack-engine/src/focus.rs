//! Focus selection over the bodies reported in one frame.

use kinetrack_core::{FocusState, FocusTarget, JointLabel, TrackedBody};

/// Select the body in focus for this frame.
///
/// Iterates bodies in input order and picks the tracked body whose
/// SpineBase joint has the smallest depth as closest to the sensor.
/// The comparison is strict, so the first body encountered wins a
/// tie. A tracked body with no SpineBase sample is skipped for
/// selection but still counts toward `other_tracked` when some body
/// is selected.
///
/// Focus is recomputed from scratch every frame with no hysteresis;
/// the selected identity may change between consecutive frames.
pub fn select_focus(bodies: &[TrackedBody]) -> FocusState {
    let mut selected: Option<FocusTarget> = None;
    let mut tracked_total = 0usize;

    for body in bodies {
        if !body.is_tracked {
            continue;
        }
        tracked_total += 1;

        let Some(spine) = body.joint(JointLabel::SpineBase) else {
            continue;
        };
        let depth_m = spine.position.z;

        let closer = match &selected {
            Some(target) => depth_m < target.depth_m,
            None => true,
        };
        if closer {
            selected = Some(FocusTarget {
                body_id: body.id,
                depth_m,
            });
        }
    }

    match selected {
        Some(target) => FocusState {
            focus: Some(target),
            other_tracked: tracked_total - 1,
        },
        None => FocusState::none(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use kinetrack_core::{BodyId, CameraPoint, TrackingState};

    fn body_at_depth(id: u64, depth: f32) -> TrackedBody {
        TrackedBody::new(BodyId(id)).with_joint(
            JointLabel::SpineBase,
            CameraPoint::new(0.0, 0.0, depth),
            TrackingState::Tracked,
        )
    }

    #[test]
    fn test_selects_minimum_depth() {
        let bodies = vec![
            body_at_depth(1, 2.5),
            body_at_depth(2, 1.2),
            body_at_depth(3, 3.0),
        ];
        let focus = select_focus(&bodies);

        assert_eq!(focus.body_id(), Some(BodyId(2)));
        assert_eq!(focus.focus.unwrap().depth_m, 1.2);
        assert_eq!(focus.other_tracked, 2);
    }

    #[test]
    fn test_tie_goes_to_first_encountered() {
        let bodies = vec![body_at_depth(1, 2.0), body_at_depth(2, 2.0)];
        let focus = select_focus(&bodies);
        assert_eq!(focus.body_id(), Some(BodyId(1)));
    }

    #[test]
    fn test_empty_frame_yields_none() {
        let focus = select_focus(&[]);
        assert!(focus.body_id().is_none());
        assert_eq!(focus.other_tracked, 0);
    }

    #[test]
    fn test_all_untracked_yields_none() {
        let bodies = vec![
            TrackedBody::untracked(BodyId(1)),
            TrackedBody::untracked(BodyId(2)),
        ];
        let focus = select_focus(&bodies);
        assert!(focus.body_id().is_none());
        assert_eq!(focus.other_tracked, 0);
    }

    #[test]
    fn test_untracked_bodies_are_ignored() {
        let bodies = vec![
            TrackedBody::untracked(BodyId(1)),
            body_at_depth(2, 4.0),
        ];
        let focus = select_focus(&bodies);
        assert_eq!(focus.body_id(), Some(BodyId(2)));
        assert_eq!(focus.other_tracked, 0);
    }

    #[test]
    fn test_missing_spine_base_skips_selection_but_counts() {
        let bodies = vec![
            TrackedBody::new(BodyId(1)), // tracked, no SpineBase
            body_at_depth(2, 1.0),
        ];
        let focus = select_focus(&bodies);
        assert_eq!(focus.body_id(), Some(BodyId(2)));
        assert_eq!(focus.other_tracked, 1);
    }

    #[test]
    fn test_only_spineless_tracked_bodies_yields_none() {
        let bodies = vec![TrackedBody::new(BodyId(1)), TrackedBody::new(BodyId(2))];
        let focus = select_focus(&bodies);
        assert!(focus.body_id().is_none());
        assert_eq!(focus.other_tracked, 0);
    }
}
