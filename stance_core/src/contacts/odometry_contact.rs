use crate::contacts::{Anchored, Contact, ForceBearing, OrientationSource};
use crate::types::{ContactId, Pose};
use nalgebra::UnitQuaternion;

/// The contact type tracked by the legged odometry.
#[derive(Debug, Clone)]
pub struct OdometryContact {
    id: ContactId,
    name: String,
    surface: Option<String>,
    was_already_set: bool,
    is_set: bool,
    /// Contacts with a disabled sensor are never detected.
    sensor_enabled: bool,
    /// Pose of the contact in the world, frozen when the contact got set.
    reference: Option<Pose>,
    force_norm: f64,
    use_for_orientation: bool,
    orientation_candidate: Option<UnitQuaternion<f64>>,
}

impl OdometryContact {
    pub fn sensor_enabled(&self) -> bool {
        self.sensor_enabled
    }

    pub fn set_sensor_enabled(&mut self, enabled: bool) {
        self.sensor_enabled = enabled;
    }
}

impl Contact for OdometryContact {
    fn create(id: ContactId, name: &str, surface: Option<&str>) -> Self {
        Self {
            id,
            name: name.to_string(),
            surface: surface.map(str::to_string),
            was_already_set: false,
            is_set: false,
            sensor_enabled: true,
            reference: None,
            force_norm: 0.0,
            use_for_orientation: false,
            orientation_candidate: None,
        }
    }

    fn id(&self) -> ContactId {
        self.id
    }

    fn name(&self) -> &str {
        &self.name
    }

    fn surface(&self) -> Option<&str> {
        self.surface.as_deref()
    }

    fn was_already_set(&self) -> bool {
        self.was_already_set
    }

    fn is_set(&self) -> bool {
        self.is_set
    }

    fn commit(&mut self, active: bool) {
        self.was_already_set = active;
        self.is_set = active;
        if !active {
            self.reference = None;
            self.use_for_orientation = false;
            self.orientation_candidate = None;
        }
    }
}

impl ForceBearing for OdometryContact {
    fn force_norm(&self) -> f64 {
        self.force_norm
    }

    fn set_force_norm(&mut self, force_norm: f64) {
        self.force_norm = force_norm;
    }
}

impl Anchored for OdometryContact {
    fn reference(&self) -> Option<&Pose> {
        self.reference.as_ref()
    }

    fn set_reference(&mut self, reference: Pose) {
        self.reference = Some(reference);
        self.is_set = true;
    }
}

impl OrientationSource for OdometryContact {
    fn use_for_orientation(&self) -> bool {
        self.use_for_orientation
    }

    fn set_use_for_orientation(&mut self, use_it: bool) {
        self.use_for_orientation = use_it;
    }

    fn orientation_candidate(&self) -> Option<&UnitQuaternion<f64>> {
        self.orientation_candidate.as_ref()
    }

    fn set_orientation_candidate(&mut self, candidate: Option<UnitQuaternion<f64>>) {
        self.orientation_candidate = candidate;
    }
}
