// stance_core/src/frames.rs

use crate::types::Pose;
use nalgebra::{UnitQuaternion, Vector3};

/// The full kinematic state of the floating base in the world frame.
/// Velocities and accelerations are expressed in world coordinates.
#[derive(Debug, Clone, PartialEq)]
pub struct FloatingBaseState {
    pub pose: Pose,
    pub linear_velocity: Vector3<f64>,
    pub angular_velocity: Vector3<f64>,
    pub linear_acceleration: Vector3<f64>,
    pub angular_acceleration: Vector3<f64>,
}

impl Default for FloatingBaseState {
    fn default() -> Self {
        Self::at_rest(Pose::identity())
    }
}

impl FloatingBaseState {
    /// A motionless base at the given pose.
    pub fn at_rest(pose: Pose) -> Self {
        Self {
            pose,
            linear_velocity: Vector3::zeros(),
            angular_velocity: Vector3::zeros(),
            linear_acceleration: Vector3::zeros(),
            angular_acceleration: Vector3::zeros(),
        }
    }

    pub fn orientation(&self) -> &UnitQuaternion<f64> {
        &self.pose.rotation
    }

    pub fn position(&self) -> Vector3<f64> {
        self.pose.translation.vector
    }

    /// Moves this state onto `pose`, carrying the motion along.
    ///
    /// Velocities and accelerations are first expressed in the current body frame,
    /// then expressed back in the world through the orientation of `pose`. This is a
    /// change of frame only: the local motion is unchanged.
    pub fn reexpressed_at(&self, pose: Pose) -> Self {
        let to_local = self.pose.rotation.inverse();
        let to_world = pose.rotation;
        let carry = |v: &Vector3<f64>| to_world * (to_local * v);
        Self {
            pose,
            linear_velocity: carry(&self.linear_velocity),
            angular_velocity: carry(&self.angular_velocity),
            linear_acceleration: carry(&self.linear_acceleration),
            angular_acceleration: carry(&self.angular_acceleration),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use nalgebra::Translation3;
    use std::f64::consts::FRAC_PI_2;

    #[test]
    fn reexpression_keeps_local_motion() {
        let upstream = FloatingBaseState {
            pose: Pose::from_parts(
                Translation3::new(1.0, 0.0, 0.8),
                UnitQuaternion::from_euler_angles(0.0, 0.0, FRAC_PI_2),
            ),
            linear_velocity: Vector3::new(0.0, 1.0, 0.0),
            angular_velocity: Vector3::new(0.0, 0.0, 0.2),
            linear_acceleration: Vector3::new(-0.5, 0.0, 0.0),
            angular_acceleration: Vector3::zeros(),
        };
        let fused = Pose::from_parts(Translation3::new(3.0, 2.0, 0.8), UnitQuaternion::identity());

        let out = upstream.reexpressed_at(fused);

        // Moving forward along the upstream heading (+y) means +x once the yaw is zero.
        assert_relative_eq!(out.linear_velocity, Vector3::new(1.0, 0.0, 0.0), epsilon = 1e-12);
        assert_relative_eq!(out.angular_velocity, Vector3::new(0.0, 0.0, 0.2), epsilon = 1e-12);
        assert_relative_eq!(out.linear_acceleration, Vector3::new(0.0, 0.5, 0.0), epsilon = 1e-12);
        assert_eq!(out.pose, fused);
    }
}
