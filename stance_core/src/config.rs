// stance_core/src/config.rs

use serde::{Deserialize, Serialize};

/// # OdometryConfig
/// All the options recognised by the legged odometry. Keys follow the host
/// configuration conventions (`odometryName`, `contactsDetectionMode`, ...).
///
/// The detection mode is kept as a string here; it is validated when the
/// `LeggedOdometryManager` is built, so a typo fails at startup and not mid-run.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct OdometryConfig {
    /// Prefix of every log entry produced by the odometry.
    #[serde(default = "default_odometry_name")]
    pub odometry_name: String,

    /// 6D odometry if true. Otherwise the robot is assumed to walk on flat ground
    /// and the height of the contacts is reset to zero, which removes vertical drift.
    #[serde(default)]
    pub odometry6d: bool,

    /// Whether the yaw of the floating base is estimated from the contacts.
    #[serde(default = "default_true")]
    pub with_naive_yaw_estimation: bool,

    /// One of `Solver`, `Surfaces`, `Sensors`.
    #[serde(default = "default_detection_mode")]
    pub contacts_detection_mode: String,

    /// Candidate surfaces. Required by, and only used by, the `Surfaces` detection.
    #[serde(default)]
    pub surfaces_for_contact_detection: Vec<String>,

    /// Contacts (named after their force sensor) that must not be used from the
    /// start, a faulty sensor for example.
    #[serde(default)]
    pub contacts_sensor_disabled_at_init: Vec<String>,

    /// Force norm (N) above which a contact is considered set.
    #[serde(default = "default_threshold")]
    pub contact_detection_threshold: f64,

    /// Contacts whose name contains one of these patterns are never used for the
    /// yaw estimation. Hands give a poor orientation reference.
    #[serde(default = "default_excluded_bodies")]
    pub orientation_excluded_bodies: Vec<String>,
}

impl Default for OdometryConfig {
    fn default() -> Self {
        Self {
            odometry_name: default_odometry_name(),
            odometry6d: false,
            with_naive_yaw_estimation: true,
            contacts_detection_mode: default_detection_mode(),
            surfaces_for_contact_detection: Vec::new(),
            contacts_sensor_disabled_at_init: Vec::new(),
            contact_detection_threshold: default_threshold(),
            orientation_excluded_bodies: default_excluded_bodies(),
        }
    }
}

fn default_odometry_name() -> String {
    "LeggedOdometry".to_string()
}

fn default_true() -> bool {
    true
}

fn default_detection_mode() -> String {
    "Sensors".to_string()
}

fn default_threshold() -> f64 {
    30.0
}

fn default_excluded_bodies() -> Vec<String> {
    vec!["Hand".to_string()]
}
