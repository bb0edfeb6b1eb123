// stance_core/src/estimation/reference.rs

use crate::contacts::Contact;
use crate::context::KinematicContext;
use crate::error::NotFoundError;
use crate::types::Pose;

/// World pose of a contact frame on the live model.
///
/// A contact detected through a surface lives in the surface frame. Otherwise the
/// force sensor frame is used as the contact frame, carried through its parent body.
pub fn contact_pose_world<C: Contact>(
    context: &KinematicContext,
    contact: &C,
) -> Result<Pose, NotFoundError> {
    match contact.surface() {
        Some(surface) => context.surface_pose_world(surface),
        None => {
            let sensor = context.snapshot().force_sensor(contact.name())?;
            context.sensor_pose_world(sensor)
        }
    }
}

/// The anchor of a contact that just got set.
///
/// Must be called on the live model once the fused floating-base pose has been
/// written back. In flat odometry the anchor is put on the ground (`z = 0`).
pub fn reference_kinematics<C: Contact>(
    context: &KinematicContext,
    contact: &C,
    odometry6d: bool,
) -> Result<Pose, NotFoundError> {
    let mut reference = contact_pose_world(context, contact)?;
    if !odometry6d {
        reference.translation.vector.z = 0.0;
    }
    Ok(reference)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::contacts::OdometryContact;
    use crate::testing::biped_snapshot;
    use crate::types::ContactId;
    use approx::assert_relative_eq;
    use nalgebra::Vector3;

    #[test]
    fn sensor_contact_uses_the_sensor_frame() {
        let snapshot = biped_snapshot();
        let context = KinematicContext::new(&snapshot);
        let contact = OdometryContact::create(ContactId(0), "LeftFootForceSensor", None);

        let reference = reference_kinematics(&context, &contact, true).unwrap();
        // base 0.8, foot -0.75, sensor -0.02
        assert_relative_eq!(
            reference.translation.vector,
            Vector3::new(0.0, 0.1, 0.03),
            epsilon = 1e-12
        );
    }

    #[test]
    fn surface_contact_uses_the_surface_frame() {
        let snapshot = biped_snapshot();
        let context = KinematicContext::new(&snapshot);
        let contact = OdometryContact::create(
            ContactId(0),
            "RightFootForceSensor",
            Some("RightFootCenter"),
        );

        let reference = reference_kinematics(&context, &contact, true).unwrap();
        assert_relative_eq!(
            reference.translation.vector,
            Vector3::new(0.0, -0.1, 0.0),
            epsilon = 1e-12
        );
    }

    #[test]
    fn flat_odometry_puts_the_anchor_on_the_ground() {
        let snapshot = biped_snapshot();
        let mut context = KinematicContext::new(&snapshot);
        context.set_base_pose(Pose::translation(1.0, 2.0, 3.5));
        let contact = OdometryContact::create(ContactId(0), "LeftFootForceSensor", None);

        let reference = reference_kinematics(&context, &contact, false).unwrap();
        assert_eq!(reference.translation.vector.z, 0.0);
        assert_relative_eq!(reference.translation.vector.x, 1.0, epsilon = 1e-12);
        assert_relative_eq!(reference.translation.vector.y, 2.1, epsilon = 1e-12);

        // The same contact keeps its height in 6D.
        let reference = reference_kinematics(&context, &contact, true).unwrap();
        assert_relative_eq!(reference.translation.vector.z, 2.73, epsilon = 1e-12);
    }

    #[test]
    fn unknown_sensor_is_reported() {
        let snapshot = biped_snapshot();
        let context = KinematicContext::new(&snapshot);
        let contact = OdometryContact::create(ContactId(0), "RightHandForceSensor", None);
        assert_eq!(
            reference_kinematics(&context, &contact, true),
            Err(NotFoundError::ForceSensor("RightHandForceSensor".to_string()))
        );
    }
}
