// stance_sim/src/simulation/runner.rs

use stance_core::error::OdometryError;
use stance_core::estimation::legged_odometry::LeggedOdometryManager;
use stance_core::logging::InMemoryLog;
use tracing::{debug, info};

use crate::error::Result;
use crate::simulation::config::ScenarioConfig;
use crate::simulation::core::prng::SimulationRng;
use crate::simulation::core::state_error::StateError;
use crate::simulation::robot::{MeasurementModel, WalkingBiped};

/// Aggregated results of a run.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RunSummary {
    pub cycles: usize,
    /// Cycles on which no maintained contact was available.
    pub held_cycles: usize,
    pub final_error: StateError,
    pub max_position_error: f64,
    /// Largest absolute heading error, in rad.
    pub max_yaw_error: f64,
}

impl RunSummary {
    fn record(&mut self, error: StateError, held: bool) {
        self.cycles += 1;
        if held {
            self.held_cycles += 1;
        }
        self.final_error = error;
        self.max_position_error = self.max_position_error.max(error.position);
        self.max_yaw_error = self.max_yaw_error.max(error.yaw.abs());
    }
}

/// Drives the odometry with the measurements of a simulated walk and compares
/// its estimate with the ground truth.
pub struct Runner {
    scenario: ScenarioConfig,
    biped: WalkingBiped,
    measurements: MeasurementModel,
    rng: SimulationRng,
    odometry: LeggedOdometryManager,
    log: InMemoryLog,
    cycle: usize,
    summary: RunSummary,
}

impl Runner {
    /// Builds the robot and the odometry. The odometry starts at the true pose.
    pub fn new(scenario: ScenarioConfig) -> Result<Self> {
        scenario.validate()?;
        let biped = WalkingBiped::new(&scenario.robot, &scenario.gait);
        let measurements = MeasurementModel::new(&scenario.robot, &scenario.noise)?;
        let odometry = LeggedOdometryManager::new(scenario.odometry.clone(), biped.base_pose(0.0))
            .map_err(OdometryError::from)?;

        Ok(Self {
            rng: SimulationRng::new(scenario.simulation.seed),
            scenario,
            biped,
            measurements,
            odometry,
            log: InMemoryLog::new(),
            cycle: 0,
            summary: RunSummary::default(),
        })
    }

    pub fn odometry(&self) -> &LeggedOdometryManager {
        &self.odometry
    }

    pub fn log(&self) -> &InMemoryLog {
        &self.log
    }

    pub fn summary(&self) -> &RunSummary {
        &self.summary
    }

    pub fn time(&self) -> f64 {
        self.cycle as f64 * self.scenario.simulation.dt
    }

    /// Runs one control cycle and returns the estimation error.
    pub fn step(&mut self) -> Result<StateError> {
        // 1. Move the robot and measure.
        let truth = self.biped.ground_truth(self.time());
        let snapshot = self.measurements.snapshot(&truth, &mut self.rng);

        // 2. Estimate.
        let estimate = self.odometry.run(&snapshot, &mut self.log)?.pose;

        // 3. Compare.
        let error = StateError::between(&truth.base.pose, &estimate);
        self.summary.record(error, self.odometry.report().is_held());

        let cycles_per_second = (1.0 / self.scenario.simulation.dt).round().max(1.0) as usize;
        if self.cycle % cycles_per_second == 0 {
            debug!(
                "t={:.2}s | Pos Err: {:.4} m | Yaw Err: {:.3} deg | contacts: {}",
                truth.time,
                error.position,
                error.yaw.to_degrees(),
                self.odometry.report().contacts_found.len()
            );
        }
        self.cycle += 1;
        Ok(error)
    }

    /// Runs `cycles` cycles, or the whole scenario duration.
    pub fn run(&mut self, cycles: Option<usize>) -> Result<RunSummary> {
        let cycles = cycles.unwrap_or_else(|| self.scenario.cycles());
        for _ in 0..cycles {
            self.step()?;
        }

        let summary = &self.summary;
        info!(
            "{} cycles | held: {} | final Pos Err: {:.4} m | Att Err: {:.3} deg | max Pos Err: {:.4} m | max Yaw Err: {:.3} deg",
            summary.cycles,
            summary.held_cycles,
            summary.final_error.position,
            summary.final_error.attitude.to_degrees(),
            summary.max_position_error,
            summary.max_yaw_error.to_degrees()
        );
        Ok(self.summary.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::simulation::config::structs::NoiseConfig;

    fn scenario(detection: &str, turn_rate_deg: f64, odometry6d: bool) -> ScenarioConfig {
        let mut scenario = ScenarioConfig::default();
        scenario.simulation.seed = Some(42);
        scenario.simulation.duration_seconds = 6.0;
        scenario.gait.turn_rate_deg = turn_rate_deg;
        scenario.odometry.contacts_detection_mode = detection.to_string();
        scenario.odometry.odometry6d = odometry6d;
        if detection == "Surfaces" {
            scenario.odometry.surfaces_for_contact_detection =
                vec!["LeftFoot".to_string(), "RightFoot".to_string()];
        }
        scenario
    }

    #[test]
    fn noiseless_walks_do_not_drift() {
        for (detection, turn_rate, odometry6d) in [
            ("Sensors", 0.0, false),
            ("Sensors", 12.0, true),
            ("Surfaces", 12.0, false),
            ("Solver", -8.0, true),
        ] {
            let mut runner = Runner::new(scenario(detection, turn_rate, odometry6d)).unwrap();
            let summary = runner.run(None).unwrap();

            assert_eq!(summary.cycles, 1200);
            assert!(
                summary.max_position_error < 1e-6,
                "{} drifted by {} m",
                detection,
                summary.max_position_error
            );
            assert!(summary.max_yaw_error < 1e-6);
            // Only the very first cycle has nothing to anchor on.
            assert_eq!(summary.held_cycles, 1, "{}", detection);
        }
    }

    #[test]
    fn contact_yaw_removes_the_upstream_yaw_drift() {
        let mut scenario = scenario("Sensors", 5.0, false);
        scenario.noise = NoiseConfig {
            yaw_drift_deg_per_s: 3.0,
            ..NoiseConfig::default()
        };

        let with_yaw = Runner::new(scenario.clone()).unwrap().run(None).unwrap();
        scenario.odometry.with_naive_yaw_estimation = false;
        let without_yaw = Runner::new(scenario).unwrap().run(None).unwrap();

        assert!(with_yaw.max_yaw_error < 1e-6);
        // 3 deg/s over 6 s.
        assert!(without_yaw.final_error.yaw.abs() > 17f64.to_radians());
    }

    #[test]
    fn seeded_runs_are_reproducible() {
        let mut scenario = scenario("Sensors", 10.0, true);
        scenario.noise = NoiseConfig {
            force_std: 3.0,
            tilt_std_deg: 0.5,
            yaw_drift_deg_per_s: 0.5,
        };

        let first = Runner::new(scenario.clone()).unwrap().run(Some(400)).unwrap();
        let second = Runner::new(scenario).unwrap().run(Some(400)).unwrap();
        assert_eq!(first, second);
        assert!(first.final_error.position > 0.0);
    }

    #[test]
    fn contact_references_are_published() {
        let mut runner = Runner::new(scenario("Sensors", 0.0, false)).unwrap();
        runner.run(Some(10)).unwrap();

        assert!(runner
            .log()
            .contains("LeggedOdometry_LeftFootForceSensor_ref_position"));
        assert_eq!(runner.odometry().contacts().len(), 2);
    }
}
