// stance_sim/src/simulation/robot/biped.rs

use nalgebra::{Isometry3, Translation3, UnitQuaternion, Vector3};
use std::f64::consts::PI;
use stance_core::frames::FloatingBaseState;
use stance_core::types::Pose;

use crate::simulation::config::structs::{GaitConfig, RobotConfig};

pub const GRAVITY: f64 = 9.81;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Foot {
    Left,
    Right,
}

impl Foot {
    pub const BOTH: [Foot; 2] = [Foot::Left, Foot::Right];

    /// Name of the foot body in the robot model.
    pub fn body(self) -> &'static str {
        match self {
            Foot::Left => "LeftFootLink",
            Foot::Right => "RightFootLink",
        }
    }

    /// Name of the sole surface.
    pub fn surface(self) -> &'static str {
        match self {
            Foot::Left => "LeftFoot",
            Foot::Right => "RightFoot",
        }
    }

    pub fn force_sensor(self) -> &'static str {
        match self {
            Foot::Left => "LeftFootForceSensor",
            Foot::Right => "RightFootForceSensor",
        }
    }

    fn lateral_sign(self) -> f64 {
        match self {
            Foot::Left => 1.0,
            Foot::Right => -1.0,
        }
    }
}

/// The state of one foot at a given time.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FootState {
    /// World pose of the foot body (the ankle).
    pub pose: Pose,
    /// Vertical ground reaction force, in N. Zero while swinging.
    pub normal_force: f64,
    /// True when the sole rests on the ground.
    pub on_ground: bool,
}

/// Everything the simulator knows for sure at a given time.
#[derive(Debug, Clone, PartialEq)]
pub struct GroundTruth {
    pub time: f64,
    pub base: FloatingBaseState,
    pub left: FootState,
    pub right: FootState,
}

impl GroundTruth {
    pub fn foot(&self, foot: Foot) -> &FootState {
        match foot {
            Foot::Left => &self.left,
            Foot::Right => &self.right,
        }
    }
}

/// A biped walking on flat ground along a circular arc (or a straight line).
///
/// Each step starts with a double support phase, during which the weight moves
/// from the foot about to swing to the other one, followed by a single support
/// phase during which the swing foot travels to its next foothold. The right foot
/// swings on even steps and the left foot on odd ones.
#[derive(Debug, Clone)]
pub struct WalkingBiped {
    robot: RobotConfig,
    gait: GaitConfig,
    start_position: Vector3<f64>,
    start_heading: f64,
    /// Forward speed of the floating base.
    speed: f64,
    /// Heading rate, in rad/s.
    turn_rate: f64,
}

impl WalkingBiped {
    pub fn new(robot: &RobotConfig, gait: &GaitConfig) -> Self {
        let start = robot.start_pose;
        Self {
            robot: robot.clone(),
            gait: gait.clone(),
            start_position: start.translation,
            start_heading: start.rotation.euler_angles().2,
            speed: gait.step_length / gait.step_period,
            turn_rate: gait.turn_rate_deg.to_radians(),
        }
    }

    pub fn weight(&self) -> f64 {
        self.robot.mass * GRAVITY
    }

    /// Height of the ground, taken at the start position.
    pub fn ground_height(&self) -> f64 {
        self.start_position.z
    }

    // --- Floating Base Path ---

    pub fn heading(&self, t: f64) -> f64 {
        self.start_heading + self.turn_rate * t
    }

    /// Ground projection of the floating base.
    fn planar_position(&self, t: f64) -> Vector3<f64> {
        let (forward, left) = if self.turn_rate.abs() < 1e-9 {
            (self.speed * t, 0.0)
        } else {
            let radius = self.speed / self.turn_rate;
            let angle = self.turn_rate * t;
            (radius * angle.sin(), radius * (1.0 - angle.cos()))
        };
        let (s, c) = self.start_heading.sin_cos();
        Vector3::new(
            self.start_position.x + c * forward - s * left,
            self.start_position.y + s * forward + c * left,
            self.ground_height(),
        )
    }

    pub fn base_pose(&self, t: f64) -> Pose {
        let mut position = self.planar_position(t);
        position.z += self.robot.base_height;
        Isometry3::from_parts(
            Translation3::from(position),
            UnitQuaternion::from_euler_angles(0.0, 0.0, self.heading(t)),
        )
    }

    pub fn base_state(&self, t: f64) -> FloatingBaseState {
        let heading = self.heading(t);
        let mut state = FloatingBaseState::at_rest(self.base_pose(t));
        state.linear_velocity = Vector3::new(heading.cos(), heading.sin(), 0.0) * self.speed;
        state.angular_velocity = Vector3::new(0.0, 0.0, self.turn_rate);
        state.linear_acceleration = Vector3::new(-heading.sin(), heading.cos(), 0.0)
            * (self.speed * self.turn_rate);
        state
    }

    // --- Footholds ---

    fn swing_foot(step: usize) -> Foot {
        if step % 2 == 0 {
            Foot::Right
        } else {
            Foot::Left
        }
    }

    /// World pose of a foot body resting at the foothold placed around time `t`.
    fn foothold(&self, foot: Foot, t: f64) -> (Vector3<f64>, f64) {
        let heading = self.heading(t);
        let lateral = foot.lateral_sign() * self.robot.hip_half_width;
        let mut position = self.planar_position(t);
        position.x -= heading.sin() * lateral;
        position.y += heading.cos() * lateral;
        position.z += self.robot.ankle_height;
        (position, heading)
    }

    /// The foothold a foot lands on at the end of `step`.
    fn landing(&self, foot: Foot, step: usize) -> (Vector3<f64>, f64) {
        self.foothold(foot, (step as f64 + 1.5) * self.gait.step_period)
    }

    /// The foothold a foot rests on before `step`.
    fn last_landing(&self, foot: Foot, step: usize) -> (Vector3<f64>, f64) {
        // Steps at which `foot` swings have the parity of its first one.
        let first = match foot {
            Foot::Right => 0,
            Foot::Left => 1,
        };
        if step <= first {
            self.foothold(foot, 0.0)
        } else {
            let previous = first + 2 * ((step - first - 1) / 2);
            self.landing(foot, previous)
        }
    }

    // --- Full State ---

    pub fn foot_state(&self, foot: Foot, t: f64) -> FootState {
        let period = self.gait.step_period;
        let ratio = self.gait.double_support_ratio;
        let weight = self.weight();
        let step = (t.max(0.0) / period).floor() as usize;
        let phase = t.max(0.0) / period - step as f64;

        let place = |(position, heading): (Vector3<f64>, f64)| {
            Isometry3::from_parts(
                Translation3::from(position),
                UnitQuaternion::from_euler_angles(0.0, 0.0, heading),
            )
        };

        let swinging = Self::swing_foot(step) == foot;
        if phase < ratio {
            // 1. Double support: the swing foot hands its weight over.
            let unload = phase / ratio;
            let normal_force = if swinging {
                weight * (1.0 - unload)
            } else {
                weight * unload
            };
            return FootState {
                pose: place(self.last_landing(foot, step)),
                normal_force,
                on_ground: true,
            };
        }

        if !swinging {
            // 2. Single support.
            return FootState {
                pose: place(self.last_landing(foot, step)),
                normal_force: weight,
                on_ground: true,
            };
        }

        // 3. Swing: lift-off to touch-down along a half sine.
        let progress = (phase - ratio) / (1.0 - ratio);
        let (from, from_heading) = self.last_landing(foot, step);
        let (to, to_heading) = self.landing(foot, step);
        let mut position = from.lerp(&to, progress);
        position.z += self.gait.step_height * (PI * progress).sin();
        let heading = from_heading + (to_heading - from_heading) * progress;
        FootState {
            pose: place((position, heading)),
            normal_force: 0.0,
            on_ground: false,
        }
    }

    pub fn ground_truth(&self, t: f64) -> GroundTruth {
        GroundTruth {
            time: t,
            base: self.base_state(t),
            left: self.foot_state(Foot::Left, t),
            right: self.foot_state(Foot::Right, t),
        }
    }
}
