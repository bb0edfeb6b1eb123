// stance_core/src/context.rs

use crate::error::NotFoundError;
use crate::messages::{ForceSensorReading, RobotSnapshot};
use crate::types::Pose;

/// The live kinematic model the odometry works on during one cycle.
///
/// It borrows the host's snapshot (joint configuration already turned into body
/// poses relative to the floating base) and owns a writable floating-base pose.
/// Every world-frame pose it returns is recomputed from that floating-base pose,
/// so writing a new base pose is the equivalent of running forward kinematics again.
pub struct KinematicContext<'a> {
    snapshot: &'a RobotSnapshot,
    base_pose: Pose,
}

impl<'a> KinematicContext<'a> {
    /// Starts from the host's own floating-base pose, as the host copies its whole
    /// configuration (free-flyer included) into the model every cycle.
    pub fn new(snapshot: &'a RobotSnapshot) -> Self {
        Self {
            snapshot,
            base_pose: snapshot.upstream.pose,
        }
    }

    pub fn snapshot(&self) -> &'a RobotSnapshot {
        self.snapshot
    }

    pub fn base_pose(&self) -> &Pose {
        &self.base_pose
    }

    pub fn set_base_pose(&mut self, pose: Pose) {
        self.base_pose = pose;
    }

    pub fn body_pose_world(&self, body: &str) -> Result<Pose, NotFoundError> {
        Ok(self.base_pose * self.snapshot.body_pose(body)?)
    }

    /// World pose of a force sensor frame, transported through its parent body.
    pub fn sensor_pose_world(&self, sensor: &ForceSensorReading) -> Result<Pose, NotFoundError> {
        Ok(self.body_pose_world(&sensor.parent_body)? * sensor.pose_in_parent)
    }

    pub fn surface_pose_world(&self, surface: &str) -> Result<Pose, NotFoundError> {
        let surface = self.snapshot.surface(surface)?;
        Ok(self.body_pose_world(&surface.parent_body)? * surface.pose_in_parent)
    }
}
