// stance_sim/src/simulation/robot/mod.rs

//! The simulated robot: a kinematic walking biped and the measurements it publishes.

pub mod biped;
pub mod measurements;

pub use biped::{Foot, FootState, GroundTruth, WalkingBiped};
pub use measurements::MeasurementModel;
