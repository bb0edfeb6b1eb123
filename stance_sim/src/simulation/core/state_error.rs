// stance_sim/src/simulation/core/state_error.rs

use nalgebra::Isometry3;
use stance_core::utils::rotations::{heading, wrap_angle};

/// The error between the ground truth and an estimated pose.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct StateError {
    /// Euclidean distance between the two positions, in m.
    pub position: f64,
    /// Angle of the rotation taking the estimate to the truth, in rad.
    pub attitude: f64,
    /// Signed heading difference (truth minus estimate), in rad.
    pub yaw: f64,
}

impl StateError {
    pub fn between(truth: &Isometry3<f64>, estimate: &Isometry3<f64>) -> Self {
        // --- 1. Position Error ---
        let position = (truth.translation.vector - estimate.translation.vector).norm();

        // --- 2. Attitude Error ---
        // The error rotation that transforms the estimate to the truth is:
        // error_rot = true_rot * estimated_rot_inverse
        let error_rotation = truth.rotation * estimate.rotation.inverse();

        Self {
            position,
            attitude: error_rotation.angle(),
            yaw: wrap_angle(heading(&truth.rotation) - heading(&estimate.rotation)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;
    use nalgebra::{Translation3, UnitQuaternion};

    #[test]
    fn error_is_measured_from_estimate_to_truth() {
        let truth = Isometry3::from_parts(
            Translation3::new(1.0, 0.0, 0.8),
            UnitQuaternion::from_euler_angles(0.0, 0.0, 3.1),
        );
        let estimate = Isometry3::from_parts(
            Translation3::new(1.0, 0.3, 0.4),
            UnitQuaternion::from_euler_angles(0.0, 0.0, -3.1),
        );

        let error = StateError::between(&truth, &estimate);
        assert_abs_diff_eq!(error.position, 0.5, epsilon = 1e-12);
        // The headings are close across the ±π boundary.
        assert_abs_diff_eq!(error.yaw, 6.2 - 2.0 * std::f64::consts::PI, epsilon = 1e-9);
        assert_abs_diff_eq!(error.attitude, error.yaw.abs(), epsilon = 1e-9);
    }
}
