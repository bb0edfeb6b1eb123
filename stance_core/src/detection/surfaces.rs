use crate::contacts::{ContactRegistry, OdometryContact};
use crate::detection::{register_detection, ActiveSet, ContactDetector, ContactsDetection};
use crate::error::NotFoundError;
use crate::messages::RobotSnapshot;
use std::collections::HashSet;

/// Thresholds the force measured at a fixed list of candidate surfaces.
#[derive(Debug, Clone)]
pub struct SurfacesDetector {
    surfaces: Vec<String>,
    threshold: f64,
    disabled_at_init: HashSet<String>,
}

impl SurfacesDetector {
    pub fn new(surfaces: Vec<String>, threshold: f64, disabled_at_init: HashSet<String>) -> Self {
        Self {
            surfaces,
            threshold,
            disabled_at_init,
        }
    }

    pub fn surfaces(&self) -> &[String] {
        &self.surfaces
    }
}

impl ContactDetector for SurfacesDetector {
    fn method(&self) -> ContactsDetection {
        ContactsDetection::Surfaces
    }

    fn find_active_contacts(
        &self,
        snapshot: &RobotSnapshot,
        registry: &mut ContactRegistry<OdometryContact>,
    ) -> Result<ActiveSet, NotFoundError> {
        let mut found = ActiveSet::new();
        for surface in &self.surfaces {
            let sensor = snapshot.surface_force_sensor(surface)?;
            let force_norm = sensor.wrench.force.norm();
            if force_norm <= self.threshold {
                continue;
            }
            if let Some(id) = register_detection(
                registry,
                &self.disabled_at_init,
                &sensor.name,
                Some(surface),
                force_norm,
            ) {
                found.insert(id);
            }
        }
        Ok(found)
    }
}
