// stance_sim/src/lib.rs

//! Simulation harness for the `stance_core` legged odometry.
//!
//! A kinematic biped walks according to a scenario file. Every control cycle, its
//! (optionally noisy) measurements are fed to the odometry, whose estimate is
//! compared with the ground truth.

// This prelude is for convenience for other files WITHIN the stance_sim crate.
pub mod prelude;

pub mod cli;
pub mod error;
pub mod simulation;
