use crate::error::NotFoundError;
use crate::frames::FloatingBaseState;
use crate::types::{Pose, Wrench};
use std::collections::HashMap;

// =========================================================================
// == Sensor and Surface Descriptions ==
// =========================================================================

/// A 6-axis force sensor reading, as published by the host robot model.
#[derive(Debug, Clone)]
pub struct ForceSensorReading {
    /// Unique name of the sensor. Contacts are named after their sensor.
    pub name: String,
    /// The body the sensor is rigidly attached to.
    pub parent_body: String,
    /// Placement of the sensor frame in its parent body frame.
    pub pose_in_parent: Pose,
    /// The measured wrench, in the sensor frame, already compensated for gravity.
    pub wrench: Wrench,
}

/// A contact surface of the robot model.
#[derive(Debug, Clone)]
pub struct SurfacePlacement {
    pub name: String,
    pub parent_body: String,
    /// Placement of the surface frame in its parent body frame.
    pub pose_in_parent: Pose,
    /// The force sensor measuring the wrench applied on this surface.
    pub force_sensor: String,
}

// =========================================================================
// == The Per-Cycle Input ==
// =========================================================================

/// Everything the odometry reads from the host on a given control cycle.
///
/// The host is responsible for forward kinematics: `body_poses` holds the pose of
/// every body relative to the floating base for the current joint configuration.
#[derive(Debug, Clone, Default)]
pub struct RobotSnapshot {
    /// Floating-base state estimated by the upstream observer.
    /// Its orientation carries the tilt the odometry trusts.
    pub upstream: FloatingBaseState,
    /// Pose of each body relative to the floating base, keyed by body name.
    pub body_poses: HashMap<String, Pose>,
    pub force_sensors: Vec<ForceSensorReading>,
    pub surfaces: Vec<SurfacePlacement>,
    /// Surfaces the host solver keeps in contact with the fixed environment.
    pub solver_contacts: Vec<String>,
}

impl RobotSnapshot {
    pub fn force_sensor(&self, name: &str) -> Result<&ForceSensorReading, NotFoundError> {
        self.force_sensors
            .iter()
            .find(|fs| fs.name == name)
            .ok_or_else(|| NotFoundError::ForceSensor(name.to_string()))
    }

    pub fn surface(&self, name: &str) -> Result<&SurfacePlacement, NotFoundError> {
        self.surfaces
            .iter()
            .find(|s| s.name == name)
            .ok_or_else(|| NotFoundError::Surface(name.to_string()))
    }

    /// Pose of a body relative to the floating base.
    pub fn body_pose(&self, name: &str) -> Result<&Pose, NotFoundError> {
        self.body_poses
            .get(name)
            .ok_or_else(|| NotFoundError::Body(name.to_string()))
    }

    /// The force sensor measuring the given surface.
    pub fn surface_force_sensor(&self, surface: &str) -> Result<&ForceSensorReading, NotFoundError> {
        let surface = self.surface(surface)?;
        self.force_sensor(&surface.force_sensor)
    }
}
