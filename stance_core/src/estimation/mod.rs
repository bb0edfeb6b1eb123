// stance_core/src/estimation/mod.rs

use crate::error::OdometryError;
use crate::frames::FloatingBaseState;
use crate::logging::LogSink;
use crate::messages::RobotSnapshot;
use std::any::Any;

/// The contract for any algorithm that performs the "State Estimator" role.
/// Its sole responsibility is to estimate the state of the floating base.
pub trait StateEstimator: Send + Sync {
    /// Processes the data of one control cycle.
    /// Log entries the estimator publishes are added to, or removed from, `log`.
    fn process(
        &mut self,
        snapshot: &RobotSnapshot,
        log: &mut dyn LogSink,
    ) -> Result<(), OdometryError>;

    /// Returns a reference to the current best estimate of the state.
    fn get_state(&self) -> &FloatingBaseState;

    /// Allows for dynamic downcasting to access algorithm-specific methods if needed.
    fn as_any_mut(&mut self) -> &mut dyn Any;
}

pub mod fusion;
pub mod legged_odometry;
pub mod orientation;
pub mod reference;
