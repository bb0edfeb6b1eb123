// stance_sim/src/error.rs

//! Error types of the simulation harness.

use stance_core::error::OdometryError;
use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum SimError {
    #[error("scenario file not found at {0}")]
    ScenarioNotFound(PathBuf),

    #[error("failed to load scenario: {0}")]
    Config(#[from] figment::Error),

    #[error("invalid scenario: {0}")]
    InvalidScenario(String),

    #[error("invalid noise model: {0}")]
    InvalidNoise(String),

    #[error("failed to list scenarios: {0}")]
    Discovery(#[from] walkdir::Error),

    #[error("failed to serialize scenario: {0}")]
    Serialize(#[from] toml::ser::Error),

    #[error("odometry error: {0}")]
    Odometry(#[from] OdometryError),
}

impl From<rand_distr::NormalError> for SimError {
    fn from(e: rand_distr::NormalError) -> Self {
        SimError::InvalidNoise(e.to_string())
    }
}

pub type Result<T> = std::result::Result<T, SimError>;
