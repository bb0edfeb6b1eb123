// stance_sim/src/simulation/config/structs.rs

use nalgebra::{UnitQuaternion, Vector3};
use serde::{Deserialize, Serialize};
use stance_core::config::OdometryConfig;

use crate::error::{Result, SimError};
use crate::simulation::utils::serde_helpers;

// =========================================================================
// == Top-Level Scenario ==
// =========================================================================

/// # ScenarioConfig
/// The root of the data parsed from a `scenario.toml` file.
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
#[serde(deny_unknown_fields)] // Fail if the TOML has fields not in our struct
pub struct ScenarioConfig {
    #[serde(default)] // Use default if the [simulation] section is missing
    pub simulation: SimulationConfig,

    #[serde(default)]
    pub robot: RobotConfig,

    #[serde(default)]
    pub gait: GaitConfig,

    #[serde(default)]
    pub noise: NoiseConfig,

    /// Passed as is to the odometry under test.
    #[serde(default)]
    pub odometry: OdometryConfig,
}

impl ScenarioConfig {
    /// Checks the values serde can't check. The odometry section is validated by
    /// the odometry itself.
    pub fn validate(&self) -> Result<()> {
        let positive = [
            ("simulation.dt", self.simulation.dt),
            ("simulation.duration_seconds", self.simulation.duration_seconds),
            ("robot.mass", self.robot.mass),
            ("robot.base_height", self.robot.base_height),
            ("gait.step_period", self.gait.step_period),
        ];
        for (key, value) in positive {
            if !(value.is_finite() && value > 0.0) {
                return Err(SimError::InvalidScenario(format!(
                    "{} must be positive, got {}",
                    key, value
                )));
            }
        }
        let std_devs = [
            ("noise.force_std", self.noise.force_std),
            ("noise.tilt_std_deg", self.noise.tilt_std_deg),
        ];
        for (key, value) in std_devs {
            if !(value.is_finite() && value >= 0.0) {
                return Err(SimError::InvalidScenario(format!(
                    "{} must be a non-negative standard deviation, got {}",
                    key, value
                )));
            }
        }
        // The drift is signed.
        if !self.noise.yaw_drift_deg_per_s.is_finite() {
            return Err(SimError::InvalidScenario(format!(
                "noise.yaw_drift_deg_per_s must be finite, got {}",
                self.noise.yaw_drift_deg_per_s
            )));
        }

        let ratio = self.gait.double_support_ratio;
        if !(ratio > 0.0 && ratio < 1.0) {
            return Err(SimError::InvalidScenario(format!(
                "gait.double_support_ratio must be in (0, 1), got {}",
                ratio
            )));
        }
        Ok(())
    }

    /// Number of control cycles covering the scenario duration.
    pub fn cycles(&self) -> usize {
        (self.simulation.duration_seconds / self.simulation.dt).round() as usize
    }
}

// =========================================================================
// == Scenario Sections ==
// =========================================================================

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct SimulationConfig {
    /// Optional seed for the pseudo-random number generator for determinism.
    pub seed: Option<u64>,
    /// Control period in seconds.
    #[serde(default = "default_dt")]
    pub dt: f64,
    #[serde(default = "default_duration")]
    pub duration_seconds: f64,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            seed: None,
            dt: default_dt(),
            duration_seconds: default_duration(),
        }
    }
}

fn default_dt() -> f64 {
    0.005
}

fn default_duration() -> f64 {
    10.0
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(deny_unknown_fields, default)]
pub struct RobotConfig {
    /// Total mass in kg. The feet carry the whole weight.
    pub mass: f64,
    /// Height of the floating base above the ground.
    pub base_height: f64,
    /// Lateral distance between the floating base and each foot.
    pub hip_half_width: f64,
    /// Height of the ankle (origin of the foot body) above the sole.
    pub ankle_height: f64,
    /// The sole surface is centered half a foot ahead of the heel.
    pub foot_length: f64,
    /// Where the walk starts. Only the position and the heading are used.
    pub start_pose: StartPose,
}

impl Default for RobotConfig {
    fn default() -> Self {
        Self {
            mass: 40.0,
            base_height: 0.8,
            hip_half_width: 0.1,
            ankle_height: 0.08,
            foot_length: 0.2,
            start_pose: StartPose::default(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(deny_unknown_fields, default)]
pub struct GaitConfig {
    /// Distance covered by the floating base during one step.
    pub step_length: f64,
    /// Duration of one step (double support, then single support), in seconds.
    pub step_period: f64,
    /// Fraction of the step spent on both feet.
    pub double_support_ratio: f64,
    /// Peak height of the swing foot.
    pub step_height: f64,
    /// Heading rate of the walk, in deg/s. Zero walks straight.
    pub turn_rate_deg: f64,
}

impl Default for GaitConfig {
    fn default() -> Self {
        Self {
            step_length: 0.2,
            step_period: 0.8,
            double_support_ratio: 0.2,
            step_height: 0.05,
            turn_rate_deg: 0.0,
        }
    }
}

/// Imperfections of the measurements fed to the odometry. All zero by default.
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
#[serde(deny_unknown_fields, default)]
pub struct NoiseConfig {
    /// Standard deviation of each force component, in N.
    pub force_std: f64,
    /// Standard deviation of the upstream roll and pitch, in degrees.
    pub tilt_std_deg: f64,
    /// Drift of the upstream yaw, in deg/s.
    pub yaw_drift_deg_per_s: f64,
}

// =========================================================================
// == Helper Structs for Nested Configuration ==
// =========================================================================

#[derive(Deserialize, Serialize, Debug, Clone, Copy, PartialEq)]
#[serde(deny_unknown_fields, default)]
pub struct StartPose {
    #[serde(with = "serde_helpers::vec3_from_array")]
    pub translation: Vector3<f64>,

    /// Roll, pitch, yaw in degrees.
    #[serde(with = "serde_helpers::quat_from_euler_deg")]
    pub rotation: UnitQuaternion<f64>,
}

impl Default for StartPose {
    fn default() -> Self {
        Self {
            translation: Vector3::zeros(),
            rotation: UnitQuaternion::identity(),
        }
    }
}
