// stance_core/src/estimation/orientation.rs

use crate::contacts::{ContactRegistry, OrientationSource};
use crate::error::NotFoundError;
use crate::types::ContactId;

/// The contacts driving the yaw estimation on a cycle. At most two.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OrientationCandidates {
    #[default]
    None,
    One(ContactId),
    /// Ordered by measured force.
    Two {
        weaker: ContactId,
        stronger: ContactId,
    },
}

impl OrientationCandidates {
    pub fn len(&self) -> usize {
        match self {
            OrientationCandidates::None => 0,
            OrientationCandidates::One(_) => 1,
            OrientationCandidates::Two { .. } => 2,
        }
    }

    pub fn is_empty(&self) -> bool {
        matches!(self, OrientationCandidates::None)
    }

    /// The candidates in ascending force order.
    pub fn ids(&self) -> Vec<ContactId> {
        match *self {
            OrientationCandidates::None => Vec::new(),
            OrientationCandidates::One(id) => vec![id],
            OrientationCandidates::Two { weaker, stronger } => vec![weaker, stronger],
        }
    }

    pub fn contains(&self, id: ContactId) -> bool {
        self.ids().contains(&id)
    }
}

/// Picks the maintained contacts trusted for the yaw estimation.
#[derive(Debug, Clone)]
pub struct OrientationSelection {
    /// Contacts whose name contains one of these patterns are never used.
    excluded_bodies: Vec<String>,
}

impl OrientationSelection {
    pub fn new(excluded_bodies: Vec<String>) -> Self {
        Self { excluded_bodies }
    }

    pub fn is_excluded(&self, contact_name: &str) -> bool {
        self.excluded_bodies
            .iter()
            .any(|pattern| contact_name.contains(pattern.as_str()))
    }

    /// Flags the (at most two) most loaded eligible contacts among `maintained`
    /// and clears the flag of every other maintained contact.
    ///
    /// Equal forces are ordered by id, so the older contact is evicted first.
    pub fn select<C: OrientationSource>(
        &self,
        registry: &mut ContactRegistry<C>,
        maintained: &[ContactId],
    ) -> Result<OrientationCandidates, NotFoundError> {
        let mut eligible: Vec<(f64, ContactId)> = Vec::with_capacity(maintained.len());
        for &id in maintained {
            let contact = registry.get_mut(id)?;
            contact.set_use_for_orientation(false);
            if !self.is_excluded(contact.name()) {
                eligible.push((contact.force_norm(), id));
            }
        }

        eligible.sort_by(|a, b| a.0.total_cmp(&b.0).then(a.1.cmp(&b.1)));
        let kept = &eligible[eligible.len().saturating_sub(2)..];
        for &(_, id) in kept {
            registry.get_mut(id)?.set_use_for_orientation(true);
        }

        Ok(match *kept {
            [] => OrientationCandidates::None,
            [(_, id)] => OrientationCandidates::One(id),
            [(_, weaker), (_, stronger)] => OrientationCandidates::Two { weaker, stronger },
            // `kept` holds at most two contacts.
            _ => OrientationCandidates::None,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::contacts::{Contact, ForceBearing, OdometryContact};

    fn registry_with(forces: &[(&str, f64)]) -> ContactRegistry<OdometryContact> {
        let mut registry = ContactRegistry::<OdometryContact>::new();
        for (name, force) in forces {
            registry.add_contact(name, None).set_force_norm(*force);
        }
        registry
    }

    fn all_ids(registry: &ContactRegistry<OdometryContact>) -> Vec<ContactId> {
        registry.iter().map(|c| c.id()).collect()
    }

    #[test]
    fn only_the_two_most_loaded_contacts_remain() {
        let mut registry = registry_with(&[
            ("a", 10.0),
            ("b", 50.0),
            ("c", 30.0),
            ("d", 40.0),
            ("e", 20.0),
        ]);
        let maintained = all_ids(&registry);

        let candidates = OrientationSelection::new(vec![])
            .select(&mut registry, &maintained)
            .unwrap();

        assert_eq!(
            candidates,
            OrientationCandidates::Two {
                weaker: registry.id_of("d").unwrap(),
                stronger: registry.id_of("b").unwrap(),
            }
        );
        let flagged: Vec<&str> = registry
            .iter()
            .filter(|c| c.use_for_orientation())
            .map(|c| c.name())
            .collect();
        assert_eq!(flagged, vec!["b", "d"]);
    }

    #[test]
    fn excluded_bodies_are_never_selected() {
        let mut registry = registry_with(&[
            ("LeftHandForceSensor", 500.0),
            ("LeftFootForceSensor", 100.0),
        ]);
        let maintained = all_ids(&registry);

        let candidates = OrientationSelection::new(vec!["Hand".to_string()])
            .select(&mut registry, &maintained)
            .unwrap();

        assert_eq!(candidates, OrientationCandidates::One(ContactId(1)));
        assert!(!registry
            .get_by_name("LeftHandForceSensor")
            .unwrap()
            .use_for_orientation());
    }

    #[test]
    fn equal_forces_evict_the_oldest_contact() {
        let mut registry = registry_with(&[("a", 10.0), ("b", 10.0), ("c", 10.0)]);
        let maintained = all_ids(&registry);

        let candidates = OrientationSelection::new(vec![])
            .select(&mut registry, &maintained)
            .unwrap();

        assert_eq!(
            candidates,
            OrientationCandidates::Two {
                weaker: ContactId(1),
                stronger: ContactId(2),
            }
        );
        assert_eq!(candidates.len(), 2);
    }

    #[test]
    fn contacts_not_maintained_are_left_alone() {
        let mut registry = registry_with(&[("a", 10.0), ("b", 20.0)]);

        let candidates = OrientationSelection::new(vec![])
            .select(&mut registry, &[ContactId(0)])
            .unwrap();
        assert_eq!(candidates, OrientationCandidates::One(ContactId(0)));
        assert!(!registry.get(ContactId(1)).unwrap().use_for_orientation());

        let none = OrientationSelection::new(vec![])
            .select(&mut registry, &[])
            .unwrap();
        assert!(none.is_empty());
    }
}
