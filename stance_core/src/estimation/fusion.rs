// stance_core/src/estimation/fusion.rs

//! Fusion of the floating-base pose implied by each maintained contact.

use crate::contacts::{Anchored, ContactRegistry, OrientationSource};
use crate::context::KinematicContext;
use crate::error::NotFoundError;
use crate::estimation::orientation::OrientationCandidates;
use crate::estimation::reference::contact_pose_world;
use crate::types::{ContactId, Pose};
use crate::utils::rotations::{geodesic_interpolation, merge_tilt_with_yaw};
use nalgebra::{UnitQuaternion, Vector3};

// --- Per-Contact Candidates ---

/// Floating-base position that puts the contact back on its anchor, the posture
/// of the robot being unchanged.
pub fn position_candidate(reference: &Pose, current: &Pose, base: &Pose) -> Vector3<f64> {
    reference.translation.vector + (base.translation.vector - current.translation.vector)
}

/// Floating-base orientation that puts the contact back on its anchor orientation.
pub fn orientation_candidate(
    reference: &Pose,
    current: &Pose,
    base: &Pose,
) -> UnitQuaternion<f64> {
    reference.rotation * current.rotation.inverse() * base.rotation
}

/// Force-weighted mean of position candidates.
#[derive(Debug, Clone, Default)]
pub struct PositionAccumulator {
    weighted_sum: Vector3<f64>,
    total_force: f64,
    sum: Vector3<f64>,
    count: usize,
}

impl PositionAccumulator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, candidate: Vector3<f64>, force: f64) {
        self.weighted_sum += candidate * force;
        self.total_force += force;
        self.sum += candidate;
        self.count += 1;
    }

    pub fn count(&self) -> usize {
        self.count
    }

    /// `None` without any candidate. Falls back to the plain mean when no force was measured.
    pub fn mean(&self) -> Option<Vector3<f64>> {
        if self.count == 0 {
            None
        } else if self.total_force > 0.0 {
            Some(self.weighted_sum / self.total_force)
        } else {
            Some(self.sum / self.count as f64)
        }
    }
}

/// Weighted geodesic mean of two orientations: `R1 · exp((1 − u) · log(R1ᵀ R2))`
/// with `u = f1 / (f1 + f2)`. Equal forces give the geodesic midpoint.
pub fn blend_orientations(
    r1: &UnitQuaternion<f64>,
    f1: f64,
    r2: &UnitQuaternion<f64>,
    f2: f64,
) -> UnitQuaternion<f64> {
    let total = f1 + f2;
    let u = if total > 0.0 { f1 / total } else { 0.5 };
    geodesic_interpolation(r1, r2, 1.0 - u)
}

// --- Fusion Over All Maintained Contacts ---

/// What the maintained contacts tell about the floating base on this cycle.
/// A `None` field means that part of the estimate could not be updated.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct FusedPose {
    pub position: Option<Vector3<f64>>,
    pub orientation: Option<UnitQuaternion<f64>>,
}

/// Runs the fusion on the live model.
///
/// The position comes from every maintained contact. When `estimate_yaw` is set,
/// the orientation comes from the orientation candidates: their yaw is merged with
/// the tilt of `tilt`, which is trusted. Each candidate contact keeps its own
/// orientation candidate for inspection.
pub fn fuse_pose<C: Anchored + OrientationSource>(
    context: &KinematicContext,
    registry: &mut ContactRegistry<C>,
    maintained: &[ContactId],
    candidates: &OrientationCandidates,
    estimate_yaw: bool,
    tilt: &UnitQuaternion<f64>,
) -> Result<FusedPose, NotFoundError> {
    let base = *context.base_pose();
    let mut positions = PositionAccumulator::new();

    for &id in maintained {
        let contact = registry.get_mut(id)?;
        // A maintained contact was anchored when it got set.
        let Some(reference) = contact.reference().copied() else {
            continue;
        };
        let current = contact_pose_world(context, &*contact)?;
        positions.add(
            position_candidate(&reference, &current, &base),
            contact.force_norm(),
        );

        if estimate_yaw && candidates.contains(id) {
            contact.set_orientation_candidate(Some(orientation_candidate(
                &reference, &current, &base,
            )));
        }
    }

    let orientation = if estimate_yaw {
        let candidate_of = |id: ContactId| -> Result<Option<(UnitQuaternion<f64>, f64)>, NotFoundError> {
            let contact = registry.get(id)?;
            Ok(contact
                .orientation_candidate()
                .map(|r| (*r, contact.force_norm())))
        };
        let yaw_source = match *candidates {
            OrientationCandidates::None => None,
            OrientationCandidates::One(id) => candidate_of(id)?.map(|(r, _)| r),
            OrientationCandidates::Two { weaker, stronger } => {
                match (candidate_of(weaker)?, candidate_of(stronger)?) {
                    (Some((r1, f1)), Some((r2, f2))) => Some(blend_orientations(&r1, f1, &r2, f2)),
                    (Some((r, _)), None) | (None, Some((r, _))) => Some(r),
                    (None, None) => None,
                }
            }
        };
        yaw_source.map(|yaw| merge_tilt_with_yaw(tilt, &yaw))
    } else {
        None
    };

    Ok(FusedPose {
        position: positions.mean(),
        orientation,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::utils::rotations::heading;
    use approx::{assert_abs_diff_eq, assert_relative_eq};
    use nalgebra::Translation3;

    #[test]
    fn equal_forces_give_the_midpoint() {
        let mut acc = PositionAccumulator::new();
        acc.add(Vector3::new(0.0, 0.0, 1.0), 200.0);
        acc.add(Vector3::new(2.0, 0.0, 1.0), 200.0);
        assert_relative_eq!(acc.mean().unwrap(), Vector3::new(1.0, 0.0, 1.0), epsilon = 1e-12);
    }

    #[test]
    fn dominant_force_wins() {
        let mut acc = PositionAccumulator::new();
        acc.add(Vector3::new(0.0, 0.0, 0.0), 1e9);
        acc.add(Vector3::new(2.0, 0.0, 0.0), 1e-3);
        assert_relative_eq!(acc.mean().unwrap(), Vector3::zeros(), epsilon = 1e-9);
    }

    #[test]
    fn zero_forces_give_the_plain_mean() {
        let mut acc = PositionAccumulator::new();
        assert_eq!(acc.mean(), None);
        acc.add(Vector3::new(1.0, 0.0, 0.0), 0.0);
        acc.add(Vector3::new(3.0, 0.0, 0.0), 0.0);
        assert_relative_eq!(acc.mean().unwrap(), Vector3::new(2.0, 0.0, 0.0), epsilon = 1e-12);
        assert_eq!(acc.count(), 2);
    }

    #[test]
    fn blend_follows_the_force_split() {
        let r1 = UnitQuaternion::from_euler_angles(0.0, 0.0, 0.0);
        let r2 = UnitQuaternion::from_euler_angles(0.0, 0.0, 0.8);

        let midpoint = blend_orientations(&r1, 100.0, &r2, 100.0);
        assert_abs_diff_eq!(heading(&midpoint), 0.4, epsilon = 1e-12);

        // u -> 1: all the weight on the first contact.
        let near_r1 = blend_orientations(&r1, 1e9, &r2, 1e-6);
        assert!(near_r1.angle_to(&r1) < 1e-6);

        // 100 N against 300 N: three quarters of the way toward the second one.
        let weighted = blend_orientations(&r1, 100.0, &r2, 300.0);
        assert_abs_diff_eq!(heading(&weighted), 0.6, epsilon = 1e-12);
    }

    #[test]
    fn candidates_put_the_contact_back_on_its_anchor() {
        let reference = Pose::from_parts(
            Translation3::new(1.0, 1.0, 0.0),
            UnitQuaternion::from_euler_angles(0.0, 0.0, 0.3),
        );
        // The base drifted: same posture, wrong place and heading.
        let base = Pose::from_parts(
            Translation3::new(0.2, -0.4, 0.8),
            UnitQuaternion::from_euler_angles(0.0, 0.0, -0.2),
        );
        let base_to_contact = Pose::from_parts(
            Translation3::new(0.0, 0.1, -0.8),
            UnitQuaternion::from_euler_angles(0.0, 0.0, 0.1),
        );
        let current = base * base_to_contact;

        let rotation = orientation_candidate(&reference, &current, &base);
        let corrected_base = Pose::from_parts(Translation3::identity(), rotation);
        // With the corrected orientation, the contact orientation matches its anchor.
        assert!((corrected_base * base_to_contact).rotation.angle_to(&reference.rotation) < 1e-6);

        let position = position_candidate(&reference, &current, &base);
        assert_relative_eq!(
            position - base.translation.vector,
            reference.translation.vector - current.translation.vector,
            epsilon = 1e-12
        );
    }
}
