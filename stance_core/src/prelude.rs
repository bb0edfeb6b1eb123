// stance_core/src/prelude.rs

// --- Core Abstractions (The main contracts of the library) ---
pub use crate::contacts::{Anchored, Contact, ForceBearing, OrientationSource};
pub use crate::detection::ContactDetector;
pub use crate::estimation::StateEstimator;
pub use crate::logging::LogSink;

// --- Core Data Structures (The "nouns" of the library) ---
pub use crate::config::OdometryConfig;
pub use crate::contacts::{ContactRegistry, OdometryContact};
pub use crate::context::KinematicContext;
pub use crate::detection::{ActiveSet, ContactsDetection};
pub use crate::frames::FloatingBaseState;
pub use crate::messages::{ForceSensorReading, RobotSnapshot, SurfacePlacement};
pub use crate::types::{ContactId, Pose, Wrench};

// --- Errors ---
pub use crate::error::{ConfigurationError, NotFoundError, OdometryError};

// --- Estimation ---
pub use crate::estimation::legged_odometry::{CycleReport, LeggedOdometryManager};
pub use crate::estimation::orientation::OrientationCandidates;
pub use crate::logging::{InMemoryLog, LogValue, NoLog};
