// stance_core/src/contacts/mod.rs

//! Contacts between the robot and its environment, and the registry that owns them.

use crate::types::{ContactId, Pose};
use nalgebra::UnitQuaternion;

// --- CONTACT CAPABILITY TRAITS ---
// A registry and the policies built on top of it only ask for the capabilities
// they need, so other estimators can bring their own contact type.

/// Identity and activity of a contact. Every registry entry implements this.
pub trait Contact {
    /// Builds a fresh, inactive contact. Called once by the registry on first insertion.
    fn create(id: ContactId, name: &str, surface: Option<&str>) -> Self
    where
        Self: Sized;

    fn id(&self) -> ContactId;
    fn name(&self) -> &str;
    /// The contact surface associated with the contact, if detection goes through surfaces.
    fn surface(&self) -> Option<&str>;

    /// Whether the contact was already active on the previous cycle.
    fn was_already_set(&self) -> bool;
    /// Whether the contact is active on the current cycle.
    fn is_set(&self) -> bool;

    /// Records the outcome of a cycle. Called once the whole cycle has been processed.
    fn commit(&mut self, active: bool);
}

/// A contact whose measured force magnitude weights its contribution.
pub trait ForceBearing: Contact {
    fn force_norm(&self) -> f64;
    fn set_force_norm(&mut self, force_norm: f64);
}

/// A contact anchored in the world while it is active.
pub trait Anchored: Contact {
    /// The world pose frozen at activation. `None` while the contact is inactive.
    fn reference(&self) -> Option<&Pose>;
    fn set_reference(&mut self, reference: Pose);
}

/// A contact that may be used for yaw estimation.
pub trait OrientationSource: ForceBearing {
    fn use_for_orientation(&self) -> bool;
    fn set_use_for_orientation(&mut self, use_it: bool);

    /// Floating-base orientation implied by this contact on the current cycle.
    fn orientation_candidate(&self) -> Option<&UnitQuaternion<f64>>;
    fn set_orientation_candidate(&mut self, candidate: Option<UnitQuaternion<f64>>);
}

mod odometry_contact;
mod registry;

pub use odometry_contact::OdometryContact;
pub use registry::ContactRegistry;
