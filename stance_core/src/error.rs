// stance_core/src/error.rs

use crate::types::ContactId;
use thiserror::Error;

/// Invalid odometry configuration. Raised when the manager is built, never during a cycle.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ConfigurationError {
    #[error(
        "contacts detection mode '{0}' not allowed, pick among [Solver, Surfaces, Sensors]"
    )]
    UnknownDetectionMode(String),

    #[error("the Surfaces contacts detection requires a non-empty surfacesForContactDetection list")]
    MissingSurfaces,

    #[error("contact detection threshold must be a finite, non-negative force, got {0}")]
    InvalidThreshold(f64),
}

/// A lookup into the registry or the robot snapshot failed.
/// This points at an integration mistake between the host model and the odometry.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum NotFoundError {
    #[error("no contact named '{0}'")]
    ContactName(String),

    #[error("no contact with id {0}")]
    ContactId(ContactId),

    #[error("no force sensor named '{0}' in the robot snapshot")]
    ForceSensor(String),

    #[error("no surface named '{0}' in the robot snapshot")]
    Surface(String),

    #[error("no body named '{0}' in the robot snapshot")]
    Body(String),
}

#[derive(Debug, Clone, PartialEq, Error)]
pub enum OdometryError {
    #[error("configuration error: {0}")]
    Configuration(#[from] ConfigurationError),

    #[error("lookup failed: {0}")]
    NotFound(#[from] NotFoundError),
}
