// stance_core/src/classification.rs

use crate::contacts::{Contact, ContactRegistry};
use crate::detection::ActiveSet;
use crate::types::ContactId;

/// The outcome of comparing two consecutive active sets.
/// Every list is in registry insertion order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ContactClassification {
    /// Set now, not set on the previous cycle.
    pub new: Vec<ContactId>,
    /// Set on both cycles.
    pub maintained: Vec<ContactId>,
    /// Set on the previous cycle only.
    pub removed: Vec<ContactId>,
}

impl ContactClassification {
    pub fn is_empty(&self) -> bool {
        self.new.is_empty() && self.maintained.is_empty() && self.removed.is_empty()
    }
}

/// Splits `previous ∪ current` into new, maintained and removed contacts.
pub fn classify(previous: &ActiveSet, current: &ActiveSet) -> ContactClassification {
    ContactClassification {
        new: current.difference(previous).copied().collect(),
        maintained: current.intersection(previous).copied().collect(),
        removed: previous.difference(current).copied().collect(),
    }
}

/// The contacts flagged as set on the previous cycle.
pub fn previously_set<C: Contact>(registry: &ContactRegistry<C>) -> ActiveSet {
    registry
        .iter()
        .filter(|c| c.was_already_set())
        .map(|c| c.id())
        .collect()
}

/// Records the outcome of the cycle on every contact of the registry.
pub fn commit<C: Contact>(registry: &mut ContactRegistry<C>, current: &ActiveSet) {
    for contact in registry.iter_mut() {
        let active = current.contains(&contact.id());
        contact.commit(active);
    }
}
