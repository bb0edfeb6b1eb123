use crate::contacts::{ContactRegistry, OdometryContact};
use crate::detection::{register_detection, ActiveSet, ContactDetector, ContactsDetection};
use crate::error::NotFoundError;
use crate::messages::RobotSnapshot;
use std::collections::HashSet;

/// Takes the contacts the host solver already resolved.
///
/// Each surface in contact maps to one contact, named after the force sensor that
/// measures the surface. No thresholding: the host decided.
#[derive(Debug, Clone, Default)]
pub struct SolverDetector {
    disabled_at_init: HashSet<String>,
}

impl SolverDetector {
    pub fn new(disabled_at_init: HashSet<String>) -> Self {
        Self { disabled_at_init }
    }
}

impl ContactDetector for SolverDetector {
    fn method(&self) -> ContactsDetection {
        ContactsDetection::Solver
    }

    fn find_active_contacts(
        &self,
        snapshot: &RobotSnapshot,
        registry: &mut ContactRegistry<OdometryContact>,
    ) -> Result<ActiveSet, NotFoundError> {
        let mut found = ActiveSet::new();
        for surface in &snapshot.solver_contacts {
            let sensor = snapshot.surface_force_sensor(surface)?;
            if let Some(id) = register_detection(
                registry,
                &self.disabled_at_init,
                &sensor.name,
                Some(surface),
                sensor.wrench.force.norm(),
            ) {
                found.insert(id);
            }
        }
        Ok(found)
    }
}
