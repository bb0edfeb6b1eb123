// stance_sim/src/prelude.rs

// Re-export the entire stance_core prelude so you can easily access
// pure types like `RobotSnapshot`, `OdometryConfig`, `LeggedOdometryManager`, etc.
pub use stance_core::prelude::*;

// Re-export common simulation-specific types.
pub use crate::cli::Cli;
pub use crate::error::{Result, SimError};
pub use crate::simulation::config::structs::*;
pub use crate::simulation::config::{discover_scenarios, dump_scenario, load_scenario};
pub use crate::simulation::core::prng::SimulationRng;
pub use crate::simulation::core::state_error::StateError;
pub use crate::simulation::robot::{Foot, GroundTruth, MeasurementModel, WalkingBiped};
pub use crate::simulation::runner::{RunSummary, Runner};
