use crate::contacts::{ContactRegistry, OdometryContact};
use crate::detection::{register_detection, ActiveSet, ContactDetector, ContactsDetection};
use crate::error::NotFoundError;
use crate::messages::RobotSnapshot;
use std::collections::HashSet;

/// Thresholds the force measured by every force sensor of the robot.
/// The contact frame is the sensor frame, there is no surface.
#[derive(Debug, Clone)]
pub struct SensorsDetector {
    threshold: f64,
    disabled_at_init: HashSet<String>,
}

impl SensorsDetector {
    pub fn new(threshold: f64, disabled_at_init: HashSet<String>) -> Self {
        Self {
            threshold,
            disabled_at_init,
        }
    }
}

impl ContactDetector for SensorsDetector {
    fn method(&self) -> ContactsDetection {
        ContactsDetection::Sensors
    }

    fn find_active_contacts(
        &self,
        snapshot: &RobotSnapshot,
        registry: &mut ContactRegistry<OdometryContact>,
    ) -> Result<ActiveSet, NotFoundError> {
        let mut found = ActiveSet::new();
        for sensor in &snapshot.force_sensors {
            let force_norm = sensor.wrench.force.norm();
            if force_norm <= self.threshold {
                continue;
            }
            if let Some(id) = register_detection(
                registry,
                &self.disabled_at_init,
                &sensor.name,
                None,
                force_norm,
            ) {
                found.insert(id);
            }
        }
        Ok(found)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::contacts::{Contact, ForceBearing};
    use crate::testing::{biped_snapshot, set_force};

    #[test]
    fn every_loaded_sensor_is_a_contact() {
        let mut snapshot = biped_snapshot();
        set_force(&mut snapshot, "LeftFootForceSensor", 250.0);
        set_force(&mut snapshot, "LeftHandForceSensor", 40.0);
        set_force(&mut snapshot, "RightFootForceSensor", 30.0);

        let mut registry = ContactRegistry::new();
        let found = SensorsDetector::new(30.0, HashSet::new())
            .find_active_contacts(&snapshot, &mut registry)
            .unwrap();

        let names: Vec<&str> = found
            .iter()
            .map(|id| registry.name_of(*id).unwrap())
            .collect();
        // The threshold is strict.
        assert_eq!(names, vec!["LeftFootForceSensor", "LeftHandForceSensor"]);

        let hand = registry.get_by_name("LeftHandForceSensor").unwrap();
        assert_eq!(hand.surface(), None);
        assert_eq!(hand.force_norm(), 40.0);
    }
}
