// stance_core/src/logging.rs

//! Log entries published by the odometry for the host's data logger.

use crate::types::Pose;
use crate::utils::rotations::roll_pitch_yaw;
use nalgebra::{UnitQuaternion, Vector3};
use std::collections::BTreeMap;

/// A value recorded under a log entry.
#[derive(Debug, Clone, PartialEq)]
pub enum LogValue {
    Vector3(Vector3<f64>),
    Quaternion(UnitQuaternion<f64>),
}

/// The host's data logger, as seen by the odometry.
pub trait LogSink {
    /// Adds an entry, replacing any entry with the same name.
    fn add_log_entry(&mut self, name: &str, value: LogValue);
    /// Removes an entry. Removing an unknown entry does nothing.
    fn remove_log_entry(&mut self, name: &str);
}

/// A `LogSink` keeping every live entry in memory, sorted by name.
#[derive(Debug, Clone, Default)]
pub struct InMemoryLog {
    entries: BTreeMap<String, LogValue>,
}

impl InMemoryLog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, name: &str) -> Option<&LogValue> {
        self.entries.get(name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.entries.contains_key(name)
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl LogSink for InMemoryLog {
    fn add_log_entry(&mut self, name: &str, value: LogValue) {
        self.entries.insert(name.to_string(), value);
    }

    fn remove_log_entry(&mut self, name: &str) {
        self.entries.remove(name);
    }
}

/// Discards everything. For hosts that don't log.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoLog;

impl LogSink for NoLog {
    fn add_log_entry(&mut self, _name: &str, _value: LogValue) {}
    fn remove_log_entry(&mut self, _name: &str) {}
}

// --- Reference Kinematics Entries ---

/// Names of the three entries published for a contact's reference kinematics.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReferenceEntryNames {
    pub position: String,
    pub orientation: String,
    pub roll_pitch_yaw: String,
}

impl ReferenceEntryNames {
    pub fn new(odometry_name: &str, contact_name: &str) -> Self {
        let prefix = format!("{}_{}_ref", odometry_name, contact_name);
        Self {
            position: format!("{}_position", prefix),
            orientation: format!("{}_orientation", prefix),
            roll_pitch_yaw: format!("{}_orientation_RollPitchYaw", prefix),
        }
    }

    /// Publishes the reference pose. It is captured now, as it stays constant while
    /// the contact is set.
    pub fn register(&self, sink: &mut dyn LogSink, reference: &Pose) {
        sink.add_log_entry(
            &self.position,
            LogValue::Vector3(reference.translation.vector),
        );
        sink.add_log_entry(&self.orientation, LogValue::Quaternion(reference.rotation));
        sink.add_log_entry(
            &self.roll_pitch_yaw,
            LogValue::Vector3(roll_pitch_yaw(&reference.rotation)),
        );
    }

    pub fn remove(&self, sink: &mut dyn LogSink) {
        sink.remove_log_entry(&self.position);
        sink.remove_log_entry(&self.orientation);
        sink.remove_log_entry(&self.roll_pitch_yaw);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use nalgebra::Translation3;

    #[test]
    fn reference_entries_are_added_then_removed() {
        let names = ReferenceEntryNames::new("LeggedOdometry", "LeftFootForceSensor");
        assert_eq!(names.position, "LeggedOdometry_LeftFootForceSensor_ref_position");
        assert_eq!(
            names.roll_pitch_yaw,
            "LeggedOdometry_LeftFootForceSensor_ref_orientation_RollPitchYaw"
        );

        let reference = Pose::from_parts(
            Translation3::new(1.0, 2.0, 0.0),
            UnitQuaternion::from_euler_angles(0.0, 0.0, 0.5),
        );
        let mut log = InMemoryLog::new();
        names.register(&mut log, &reference);

        assert_eq!(log.len(), 3);
        assert_eq!(
            log.get(&names.position),
            Some(&LogValue::Vector3(Vector3::new(1.0, 2.0, 0.0)))
        );
        assert_eq!(
            log.get(&names.orientation),
            Some(&LogValue::Quaternion(reference.rotation))
        );

        names.remove(&mut log);
        assert!(log.is_empty());
    }
}
