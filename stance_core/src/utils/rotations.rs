// stance_core/src/utils/rotations.rs

//! Rotation helpers shared by the pose fusion and the log entries.
//!
//! All rotations map local (body) coordinates to world coordinates, with a z-up world.

use nalgebra::{Matrix3, Rotation3, UnitQuaternion, Vector3};

/// Above this |cos|, a local axis is treated as vertical and cannot carry a heading.
const NEAR_VERTICAL_COS: f64 = 0.9;

const DEGENERATE_NORM: f64 = 1e-9;

/// Builds the rotation that has the tilt of `tilt` and the yaw of `yaw`.
///
/// The result expresses the world vertical in the local frame exactly like `tilt`
/// does, and turns a local reference axis toward the same horizontal heading as
/// `yaw` does. The reference axis is local x, or local y when x is close to the
/// vertical for either input. When neither axis works for both inputs, `tilt` is
/// returned unchanged.
pub fn merge_tilt_with_yaw(
    tilt: &UnitQuaternion<f64>,
    yaw: &UnitQuaternion<f64>,
) -> UnitQuaternion<f64> {
    let ez = Vector3::z();
    // The world vertical, seen from the local frame.
    let v1 = tilt.inverse_transform_vector(&ez);

    let reference_axis = [Vector3::x(), Vector3::y()]
        .into_iter()
        .find(|a| {
            a.dot(&v1).abs() < NEAR_VERTICAL_COS
                && yaw.transform_vector(a).z.abs() < NEAR_VERTICAL_COS
        })
        // Both x and y can't be close to the same vertical direction.
        .unwrap_or_else(Vector3::y);

    let heading = yaw.transform_vector(&reference_axis);
    let h = Vector3::new(heading.x, heading.y, 0.0);
    let a_perp = reference_axis - v1 * reference_axis.dot(&v1);
    // The fallback axis may still be vertical for one of the rotations.
    // It then carries no heading, and the tilt source is kept as is.
    if h.norm() < DEGENERATE_NORM || a_perp.norm() < DEGENERATE_NORM {
        return *tilt;
    }
    let h = h.normalize();
    let a_perp = a_perp.normalize();

    let world_basis = Matrix3::from_columns(&[h, ez.cross(&h), ez]);
    let local_basis = Matrix3::from_columns(&[a_perp, v1.cross(&a_perp), v1]);
    let rotation = Rotation3::from_matrix_unchecked(world_basis * local_basis.transpose());
    UnitQuaternion::from_rotation_matrix(&rotation)
}

/// Walks from `from` toward `to` along the geodesic, by a fraction `t` of the way.
///
/// `t = 0` gives `from`, `t = 1` gives `to`. The step is taken in the local frame of
/// `from`: `from · exp(t · log(fromᵀ · to))`.
pub fn geodesic_interpolation(
    from: &UnitQuaternion<f64>,
    to: &UnitQuaternion<f64>,
    t: f64,
) -> UnitQuaternion<f64> {
    let diff = from.inverse() * to;
    from * UnitQuaternion::from_scaled_axis(diff.scaled_axis() * t)
}

/// Roll, pitch, yaw (radians) of the rotation, in the `Rz(yaw)·Ry(pitch)·Rx(roll)` convention.
pub fn roll_pitch_yaw(rotation: &UnitQuaternion<f64>) -> Vector3<f64> {
    let (roll, pitch, yaw) = rotation.euler_angles();
    Vector3::new(roll, pitch, yaw)
}

/// Heading (radians) of the horizontal projection of the local x axis.
pub fn heading(rotation: &UnitQuaternion<f64>) -> f64 {
    let x = rotation.transform_vector(&Vector3::x());
    x.y.atan2(x.x)
}

/// Wraps an angle into `(-π, π]`.
pub fn wrap_angle(angle: f64) -> f64 {
    let wrapped = angle.sin().atan2(angle.cos());
    if wrapped <= -std::f64::consts::PI {
        wrapped + 2.0 * std::f64::consts::PI
    } else {
        wrapped
    }
}
