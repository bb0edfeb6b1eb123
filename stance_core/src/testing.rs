// stance_core/src/testing.rs

//! Snapshot fixtures shared by the unit tests of the crate.

use crate::frames::FloatingBaseState;
use crate::messages::{ForceSensorReading, RobotSnapshot, SurfacePlacement};
use crate::types::{Pose, Wrench};
use nalgebra::Vector3;

pub(crate) const BASE_HEIGHT: f64 = 0.8;

/// A robot standing with its base at `(0, 0, BASE_HEIGHT)`: two feet and one hand,
/// each with a force sensor and a contact surface. Every sensor reads a zero force.
pub(crate) fn biped_snapshot() -> RobotSnapshot {
    let mut snapshot = RobotSnapshot {
        upstream: FloatingBaseState::at_rest(Pose::translation(0.0, 0.0, BASE_HEIGHT)),
        ..Default::default()
    };

    let limbs = [
        ("LeftFoot", Vector3::new(0.0, 0.1, -0.75)),
        ("RightFoot", Vector3::new(0.0, -0.1, -0.75)),
        ("LeftHand", Vector3::new(0.3, 0.3, 0.0)),
    ];
    for (body, offset) in limbs {
        snapshot
            .body_poses
            .insert(body.to_string(), Pose::translation(offset.x, offset.y, offset.z));
        snapshot.force_sensors.push(ForceSensorReading {
            name: format!("{}ForceSensor", body),
            parent_body: body.to_string(),
            pose_in_parent: Pose::translation(0.0, 0.0, -0.02),
            wrench: Wrench::default(),
        });
        snapshot.surfaces.push(SurfacePlacement {
            name: format!("{}Center", body),
            parent_body: body.to_string(),
            pose_in_parent: Pose::translation(0.0, 0.0, -0.05),
            force_sensor: format!("{}ForceSensor", body),
        });
    }
    snapshot
}

/// Sets a purely vertical force on a sensor of the fixture.
pub(crate) fn set_force(snapshot: &mut RobotSnapshot, sensor: &str, force: f64) {
    if let Some(fs) = snapshot.force_sensors.iter_mut().find(|fs| fs.name == sensor) {
        fs.wrench = Wrench::from_force(Vector3::new(0.0, 0.0, force));
    }
}
