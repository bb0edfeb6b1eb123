use crate::contacts::Contact;
use crate::error::NotFoundError;
use crate::types::ContactId;
use std::collections::HashMap;

/// Owns every contact ever detected, in insertion order.
///
/// Contacts are never erased: a contact that breaks is only deactivated, and keeps
/// its id for the rest of the run. Since ids are sequential, the id is also the
/// position of the contact in the insertion order.
#[derive(Debug, Clone)]
pub struct ContactRegistry<C: Contact> {
    contacts: Vec<C>,
    ids_by_name: HashMap<String, ContactId>,
}

impl<C: Contact> Default for ContactRegistry<C> {
    fn default() -> Self {
        Self {
            contacts: Vec::new(),
            ids_by_name: HashMap::new(),
        }
    }
}

impl<C: Contact> ContactRegistry<C> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts a contact, or returns the existing one if the name is already known.
    /// The surface is only recorded on first insertion.
    pub fn add_contact(&mut self, name: &str, surface: Option<&str>) -> &mut C {
        let id = match self.ids_by_name.get(name).copied() {
            Some(id) => id,
            None => {
                let id = ContactId(self.contacts.len());
                self.contacts.push(C::create(id, name, surface));
                self.ids_by_name.insert(name.to_string(), id);
                id
            }
        };
        &mut self.contacts[id.index()]
    }

    pub fn get(&self, id: ContactId) -> Result<&C, NotFoundError> {
        self.contacts
            .get(id.index())
            .ok_or(NotFoundError::ContactId(id))
    }

    pub fn get_mut(&mut self, id: ContactId) -> Result<&mut C, NotFoundError> {
        self.contacts
            .get_mut(id.index())
            .ok_or(NotFoundError::ContactId(id))
    }

    pub fn get_by_name(&self, name: &str) -> Result<&C, NotFoundError> {
        let id = self.id_of(name)?;
        self.get(id)
    }

    pub fn get_by_name_mut(&mut self, name: &str) -> Result<&mut C, NotFoundError> {
        let id = self.id_of(name)?;
        self.get_mut(id)
    }

    pub fn id_of(&self, name: &str) -> Result<ContactId, NotFoundError> {
        self.ids_by_name
            .get(name)
            .copied()
            .ok_or_else(|| NotFoundError::ContactName(name.to_string()))
    }

    pub fn name_of(&self, id: ContactId) -> Result<&str, NotFoundError> {
        self.get(id).map(|c| c.name())
    }

    pub fn contains(&self, name: &str) -> bool {
        self.ids_by_name.contains_key(name)
    }

    /// Contacts in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = &C> {
        self.contacts.iter()
    }

    pub fn iter_mut(&mut self) -> impl Iterator<Item = &mut C> {
        self.contacts.iter_mut()
    }

    pub fn len(&self) -> usize {
        self.contacts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.contacts.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::contacts::OdometryContact;

    #[test]
    fn add_contact_is_idempotent() {
        let mut registry = ContactRegistry::<OdometryContact>::new();
        let left = registry.add_contact("LeftFootForceSensor", Some("LeftFoot")).id();
        let right = registry.add_contact("RightFootForceSensor", None).id();

        let again = registry.add_contact("LeftFootForceSensor", Some("Other"));
        assert_eq!(again.id(), left);
        assert_eq!(again.surface(), Some("LeftFoot"));

        assert_eq!(left, ContactId(0));
        assert_eq!(right, ContactId(1));
        assert_eq!(registry.len(), 2);
        let order: Vec<&str> = registry.iter().map(|c| c.name()).collect();
        assert_eq!(order, vec!["LeftFootForceSensor", "RightFootForceSensor"]);
    }

    #[test]
    fn lookups_fail_on_unknown_contacts() {
        let mut registry = ContactRegistry::<OdometryContact>::new();
        registry.add_contact("LeftFootForceSensor", None);

        assert_eq!(registry.name_of(ContactId(0)), Ok("LeftFootForceSensor"));
        assert_eq!(
            registry.get(ContactId(3)).map(|c| c.id()),
            Err(NotFoundError::ContactId(ContactId(3)))
        );
        assert_eq!(
            registry.get_by_name("RightHand").map(|c| c.id()),
            Err(NotFoundError::ContactName("RightHand".to_string()))
        );
    }
}
