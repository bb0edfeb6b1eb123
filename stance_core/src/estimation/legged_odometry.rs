// stance_core/src/estimation/legged_odometry.rs

use std::any::Any;

use crate::classification::{classify, commit, previously_set};
use crate::config::OdometryConfig;
use crate::contacts::{Anchored, Contact, ContactRegistry, OdometryContact};
use crate::context::KinematicContext;
use crate::detection::{detector_from_config, ActiveSet, ContactDetector, ContactsDetection};
use crate::error::{ConfigurationError, NotFoundError, OdometryError};
use crate::estimation::fusion::fuse_pose;
use crate::estimation::orientation::{OrientationCandidates, OrientationSelection};
use crate::estimation::reference::reference_kinematics;
use crate::estimation::StateEstimator;
use crate::frames::FloatingBaseState;
use crate::logging::{LogSink, ReferenceEntryNames};
use crate::messages::RobotSnapshot;
use crate::types::{ContactId, Pose};
use tracing::{debug, info};

/// What happened on the last cycle.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CycleReport {
    pub contacts_found: ActiveSet,
    pub new: Vec<ContactId>,
    pub maintained: Vec<ContactId>,
    pub removed: Vec<ContactId>,
    pub orientation_contacts: OrientationCandidates,
    /// False when no maintained contact was available: the position was held.
    pub position_updated: bool,
    /// True when the yaw came from the contacts on this cycle.
    pub orientation_updated: bool,
}

impl CycleReport {
    pub fn is_held(&self) -> bool {
        !self.position_updated
    }
}

/// Estimates the floating-base pose of a legged robot from its contacts.
///
/// Every active contact is assumed stationary in the world. When a contact gets
/// set, its world pose is frozen as a reference. On the next cycles, the pose
/// the floating base must have to put the contact back on its reference is a
/// measurement of the floating-base pose. These measurements are fused with
/// weights given by the measured contact forces. The tilt of the estimate is
/// always the one of the upstream observer.
pub struct LeggedOdometryManager {
    config: OdometryConfig,
    detector: Box<dyn ContactDetector>,
    orientation_selection: OrientationSelection,
    contacts: ContactRegistry<OdometryContact>,
    /// The current estimate.
    state: FloatingBaseState,
    report: CycleReport,
    /// Log entries of contacts deactivated by a reset, removed on the next cycle.
    stale_log_entries: Vec<ReferenceEntryNames>,
}

impl LeggedOdometryManager {
    /// Creates a new odometry with the floating base at `initial_pose`.
    /// Fails if the configuration is invalid.
    pub fn new(config: OdometryConfig, initial_pose: Pose) -> Result<Self, ConfigurationError> {
        let detector = detector_from_config(&config)?;
        info!(
            "Legged odometry '{}' initialized: {} contacts detection, {} odometry, yaw estimation {}.",
            config.odometry_name,
            detector.method(),
            if config.odometry6d { "6D" } else { "flat" },
            if config.with_naive_yaw_estimation { "on" } else { "off" },
        );

        Ok(Self {
            orientation_selection: OrientationSelection::new(
                config.orientation_excluded_bodies.clone(),
            ),
            config,
            detector,
            contacts: ContactRegistry::new(),
            state: FloatingBaseState::at_rest(initial_pose),
            report: CycleReport::default(),
            stale_log_entries: Vec::new(),
        })
    }

    // --- Accessors ---

    pub fn config(&self) -> &OdometryConfig {
        &self.config
    }

    pub fn detection_method(&self) -> ContactsDetection {
        self.detector.method()
    }

    pub fn contacts(&self) -> &ContactRegistry<OdometryContact> {
        &self.contacts
    }

    pub fn state(&self) -> &FloatingBaseState {
        &self.state
    }

    /// The report of the last cycle.
    pub fn report(&self) -> &CycleReport {
        &self.report
    }

    /// Enables or disables the force sensor of a known contact.
    /// A contact with a disabled sensor is never detected, so disabling an active
    /// contact removes it on the next cycle.
    pub fn set_contact_sensor_enabled(
        &mut self,
        contact_name: &str,
        enabled: bool,
    ) -> Result<(), NotFoundError> {
        let contact = self.contacts.get_by_name_mut(contact_name)?;
        if contact.sensor_enabled() != enabled {
            debug!(
                "Sensor of contact '{}' {}.",
                contact_name,
                if enabled { "enabled" } else { "disabled" }
            );
        }
        contact.set_sensor_enabled(enabled);
        Ok(())
    }

    /// Moves the estimate to `pose` and forgets every active contact.
    /// Contacts still active on the next cycle are anchored again, from `pose`.
    pub fn reset(&mut self, pose: Pose) {
        for contact in self.contacts.iter().filter(|c| c.was_already_set()) {
            self.stale_log_entries
                .push(ReferenceEntryNames::new(&self.config.odometry_name, contact.name()));
        }
        commit(&mut self.contacts, &ActiveSet::new());
        self.state = FloatingBaseState::at_rest(pose);
        self.report = CycleReport::default();
        info!("Legged odometry '{}' reset.", self.config.odometry_name);
    }

    // --- The Odometry Cycle ---

    /// Runs one cycle of the odometry and returns the new floating-base state.
    pub fn run(
        &mut self,
        snapshot: &RobotSnapshot,
        log: &mut dyn LogSink,
    ) -> Result<&FloatingBaseState, OdometryError> {
        // The live model starts from the host's own floating-base pose.
        let mut context = KinematicContext::new(snapshot);

        // 1. Find the contacts set on this cycle and compare with the previous one.
        let previous = previously_set(&self.contacts);
        let found = self
            .detector
            .find_active_contacts(snapshot, &mut self.contacts)?;
        let classification = classify(&previous, &found);

        // 2. Select the contacts trusted for the yaw.
        let orientation_contacts = self
            .orientation_selection
            .select(&mut self.contacts, &classification.maintained)?;

        // 3. Fuse the floating-base pose implied by each maintained contact.
        let upstream_orientation = *snapshot.upstream.orientation();
        let fused = fuse_pose(
            &context,
            &mut self.contacts,
            &classification.maintained,
            &orientation_contacts,
            self.config.with_naive_yaw_estimation,
            &upstream_orientation,
        )?;

        let position = match fused.position {
            Some(position) => position,
            None => {
                debug!(
                    "{}: no maintained contact, floating-base pose held.",
                    self.config.odometry_name
                );
                self.state.position()
            }
        };
        // A held cycle keeps the whole pose, orientation included.
        let orientation = match (fused.position, self.config.with_naive_yaw_estimation) {
            (None, _) => *self.state.orientation(),
            (Some(_), true) => fused.orientation.unwrap_or(*self.state.orientation()),
            (Some(_), false) => upstream_orientation,
        };
        let pose = Pose::from_parts(position.into(), orientation);

        // 4. Write the estimate back into the live model, then anchor the new contacts.
        context.set_base_pose(pose);

        for stale in self.stale_log_entries.drain(..) {
            stale.remove(log);
        }
        for &id in &classification.new {
            let contact = self.contacts.get_mut(id)?;
            let reference = reference_kinematics(&context, &*contact, self.config.odometry6d)?;
            contact.set_reference(reference);
            debug!("Contact '{}' set.", contact.name());
            ReferenceEntryNames::new(&self.config.odometry_name, contact.name())
                .register(log, &reference);
        }
        for &id in &classification.removed {
            let name = self.contacts.name_of(id)?;
            debug!("Contact '{}' removed.", name);
            ReferenceEntryNames::new(&self.config.odometry_name, name).remove(log);
        }

        commit(&mut self.contacts, &found);

        // 5. The velocities of the upstream observer, expressed in the new frame.
        self.state = snapshot.upstream.reexpressed_at(pose);
        self.report = CycleReport {
            contacts_found: found,
            new: classification.new,
            maintained: classification.maintained,
            removed: classification.removed,
            orientation_contacts,
            position_updated: fused.position.is_some(),
            orientation_updated: fused.orientation.is_some(),
        };

        Ok(&self.state)
    }
}

impl StateEstimator for LeggedOdometryManager {
    fn process(
        &mut self,
        snapshot: &RobotSnapshot,
        log: &mut dyn LogSink,
    ) -> Result<(), OdometryError> {
        self.run(snapshot, log).map(|_| ())
    }

    fn get_state(&self) -> &FloatingBaseState {
        &self.state
    }

    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }
}
