// stance_sim/src/simulation/robot/measurements.rs

use nalgebra::{Isometry3, Translation3, UnitQuaternion, Vector3};
use rand_distr::{Distribution, Normal};
use stance_core::messages::{ForceSensorReading, RobotSnapshot, SurfacePlacement};
use stance_core::types::{Pose, Wrench};
use std::collections::HashMap;

use super::biped::{Foot, GroundTruth};
use crate::error::Result;
use crate::simulation::config::structs::{NoiseConfig, RobotConfig};
use crate::simulation::core::prng::SimulationRng;

/// Turns the ground truth into what the robot publishes on a control cycle:
/// joint kinematics, force sensor readings, solver contacts and the estimate of
/// the upstream observer.
#[derive(Debug, Clone)]
pub struct MeasurementModel {
    sensor_in_foot: Pose,
    surface_in_foot: Pose,
    force_noise: Normal<f64>,
    tilt_noise: Normal<f64>,
    /// rad/s
    yaw_drift: f64,
}

impl MeasurementModel {
    pub fn new(robot: &RobotConfig, noise: &NoiseConfig) -> Result<Self> {
        // Both frames lie on the sole, below the ankle.
        let sensor_in_foot = Isometry3::from_parts(
            Translation3::new(0.0, 0.0, -robot.ankle_height),
            UnitQuaternion::identity(),
        );
        let surface_in_foot = Isometry3::from_parts(
            Translation3::new(robot.foot_length / 4.0, 0.0, -robot.ankle_height),
            UnitQuaternion::identity(),
        );
        Ok(Self {
            sensor_in_foot,
            surface_in_foot,
            force_noise: Normal::new(0.0, noise.force_std)?,
            tilt_noise: Normal::new(0.0, noise.tilt_std_deg.to_radians())?,
            yaw_drift: noise.yaw_drift_deg_per_s.to_radians(),
        })
    }

    /// The frames of the robot model. They do not depend on the motion.
    pub fn surfaces(&self) -> Vec<SurfacePlacement> {
        Foot::BOTH
            .iter()
            .map(|foot| SurfacePlacement {
                name: foot.surface().to_string(),
                parent_body: foot.body().to_string(),
                pose_in_parent: self.surface_in_foot,
                force_sensor: foot.force_sensor().to_string(),
            })
            .collect()
    }

    pub fn snapshot(&self, truth: &GroundTruth, rng: &mut SimulationRng) -> RobotSnapshot {
        let base = &truth.base.pose;

        // --- 1. Upstream Observer ---
        // Right position, noisy tilt and a yaw that drifts away.
        let (roll, pitch, yaw) = base.rotation.euler_angles();
        let upstream_rotation = UnitQuaternion::from_euler_angles(
            roll + self.tilt_noise.sample(&mut rng.0),
            pitch + self.tilt_noise.sample(&mut rng.0),
            yaw + self.yaw_drift * truth.time,
        );
        let upstream = truth
            .base
            .reexpressed_at(Isometry3::from_parts(base.translation, upstream_rotation));

        // --- 2. Kinematics, Forces and Solver Contacts ---
        let mut body_poses = HashMap::new();
        let mut force_sensors = Vec::with_capacity(2);
        let mut solver_contacts = Vec::new();
        for foot in Foot::BOTH {
            let state = truth.foot(foot);
            body_poses.insert(foot.body().to_string(), base.inverse() * state.pose);

            let force = Vector3::new(
                self.force_noise.sample(&mut rng.0),
                self.force_noise.sample(&mut rng.0),
                state.normal_force + self.force_noise.sample(&mut rng.0),
            );
            force_sensors.push(ForceSensorReading {
                name: foot.force_sensor().to_string(),
                parent_body: foot.body().to_string(),
                pose_in_parent: self.sensor_in_foot,
                wrench: Wrench::from_force(force),
            });

            if state.on_ground {
                solver_contacts.push(foot.surface().to_string());
            }
        }

        RobotSnapshot {
            upstream,
            body_poses,
            force_sensors,
            surfaces: self.surfaces(),
            solver_contacts,
        }
    }
}
