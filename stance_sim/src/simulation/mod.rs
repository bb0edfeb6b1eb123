// stance_sim/src/simulation/mod.rs

pub mod config;
pub mod core;
pub mod robot;
pub mod runner;
pub mod utils;
