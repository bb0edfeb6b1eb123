// stance_core/src/detection/mod.rs

//! Contact detection. Each cycle, exactly one strategy decides which contacts are set.

use crate::config::OdometryConfig;
use crate::contacts::{Contact, ContactRegistry, ForceBearing, OdometryContact};
use crate::error::{ConfigurationError, NotFoundError};
use crate::messages::RobotSnapshot;
use crate::types::ContactId;
use dyn_clone::DynClone;
use std::collections::{BTreeSet, HashSet};
use std::fmt::{self, Debug};
use std::str::FromStr;
use tracing::debug;

/// The contacts set on a cycle, ordered by id (which is registry insertion order).
pub type ActiveSet = BTreeSet<ContactId>;

/// The allowed contact detection methods.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ContactsDetection {
    /// Contacts are the ones the host solver resolved.
    Solver,
    /// Contacts are thresholded on the force measured at a list of candidate surfaces.
    Surfaces,
    /// Contacts are thresholded on every force sensor of the robot.
    Sensors,
}

impl FromStr for ContactsDetection {
    type Err = ConfigurationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "Solver" => Ok(ContactsDetection::Solver),
            "Surfaces" => Ok(ContactsDetection::Surfaces),
            "Sensors" => Ok(ContactsDetection::Sensors),
            other => Err(ConfigurationError::UnknownDetectionMode(other.to_string())),
        }
    }
}

impl fmt::Display for ContactsDetection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            ContactsDetection::Solver => "Solver",
            ContactsDetection::Surfaces => "Surfaces",
            ContactsDetection::Sensors => "Sensors",
        };
        f.write_str(s)
    }
}

// --- CONTACT DETECTOR TRAIT ---
pub trait ContactDetector: DynClone + Debug + Send + Sync {
    fn method(&self) -> ContactsDetection;

    /// Returns the contacts set on this cycle.
    ///
    /// Newly seen contacts are inserted in the registry, and the force norm of every
    /// returned contact is refreshed from the snapshot. Contacts whose sensor is
    /// disabled are never returned. The result only depends on the snapshot and on
    /// the registry content, so two identical inputs give the same set.
    fn find_active_contacts(
        &self,
        snapshot: &RobotSnapshot,
        registry: &mut ContactRegistry<OdometryContact>,
    ) -> Result<ActiveSet, NotFoundError>;
}

// This macro automatically generates the implementation of `Clone` for `Box<dyn ContactDetector>`.
dyn_clone::clone_trait_object!(ContactDetector);

/// Builds the detector selected by the configuration.
pub fn detector_from_config(
    config: &OdometryConfig,
) -> Result<Box<dyn ContactDetector>, ConfigurationError> {
    let threshold = config.contact_detection_threshold;
    if !threshold.is_finite() || threshold < 0.0 {
        return Err(ConfigurationError::InvalidThreshold(threshold));
    }

    let disabled_at_init: HashSet<String> = config
        .contacts_sensor_disabled_at_init
        .iter()
        .cloned()
        .collect();

    let method: ContactsDetection = config.contacts_detection_mode.parse()?;
    let detector: Box<dyn ContactDetector> = match method {
        ContactsDetection::Solver => Box::new(SolverDetector::new(disabled_at_init)),
        ContactsDetection::Surfaces => {
            if config.surfaces_for_contact_detection.is_empty() {
                return Err(ConfigurationError::MissingSurfaces);
            }
            Box::new(SurfacesDetector::new(
                config.surfaces_for_contact_detection.clone(),
                threshold,
                disabled_at_init,
            ))
        }
        ContactsDetection::Sensors => Box::new(SensorsDetector::new(threshold, disabled_at_init)),
    };
    Ok(detector)
}

/// Registers a detected contact and refreshes its force.
///
/// A contact listed in `disabled_at_init` starts with its sensor disabled when it is
/// first inserted. Returns `None` while the contact sensor is disabled.
fn register_detection(
    registry: &mut ContactRegistry<OdometryContact>,
    disabled_at_init: &HashSet<String>,
    name: &str,
    surface: Option<&str>,
    force_norm: f64,
) -> Option<ContactId> {
    let is_new = !registry.contains(name);
    let contact = registry.add_contact(name, surface);
    if is_new && disabled_at_init.contains(name) {
        debug!("Contact '{}' registered with its sensor disabled.", name);
        contact.set_sensor_enabled(false);
    }
    if !contact.sensor_enabled() {
        return None;
    }
    contact.set_force_norm(force_norm);
    Some(contact.id())
}

mod sensors;
mod solver;
mod surfaces;

pub use sensors::SensorsDetector;
pub use solver::SolverDetector;
pub use surfaces::SurfacesDetector;
