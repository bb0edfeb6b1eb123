// stance_core/src/types.rs

use nalgebra::{Isometry3, Vector3};
use std::fmt;

// --- Core Type Aliases ---
pub type Pose = Isometry3<f64>;

// --- Core Identifier ---
/// Stable index of a contact inside a `ContactRegistry`.
/// Ids are handed out in insertion order, starting at zero, and never reused.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct ContactId(pub usize);

impl ContactId {
    pub fn index(self) -> usize {
        self.0
    }
}

impl fmt::Display for ContactId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// A force/couple pair measured by a 6-axis force sensor, expressed in the sensor frame.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Wrench {
    pub force: Vector3<f64>,
    pub couple: Vector3<f64>,
}

impl Wrench {
    pub fn from_force(force: Vector3<f64>) -> Self {
        Self {
            force,
            couple: Vector3::zeros(),
        }
    }
}
