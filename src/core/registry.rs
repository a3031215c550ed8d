use crate::domain::model::{Owner, Pet};
use std::rc::Rc;

/// In-memory owners and pets for the current session, in insertion order.
///
/// Names are the only identity. `add_*` does not deduplicate; callers look the
/// name up first.
#[derive(Debug, Default)]
pub struct Registry {
    owners: Vec<Rc<Owner>>,
    pets: Vec<Pet>,
}

impl Registry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn owners(&self) -> &[Rc<Owner>] {
        &self.owners
    }

    pub fn pets(&self) -> &[Pet] {
        &self.pets
    }

    pub fn is_empty(&self) -> bool {
        self.owners.is_empty() && self.pets.is_empty()
    }

    pub fn clear(&mut self) {
        self.pets.clear();
        self.owners.clear();
    }

    pub fn find_owner_by_name(&self, name: &str) -> Option<Rc<Owner>> {
        let needle = name.to_lowercase();
        self.owners
            .iter()
            .find(|owner| owner.name.to_lowercase() == needle)
            .cloned()
    }

    pub fn find_pet_by_name(&self, name: &str) -> Option<&Pet> {
        let needle = name.to_lowercase();
        self.pets.iter().find(|pet| pet.name.to_lowercase() == needle)
    }

    pub fn find_pet_by_name_mut(&mut self, name: &str) -> Option<&mut Pet> {
        let needle = name.to_lowercase();
        self.pets
            .iter_mut()
            .find(|pet| pet.name.to_lowercase() == needle)
    }

    pub fn add_owner(&mut self, owner: Owner) -> Rc<Owner> {
        let owner = Rc::new(owner);
        self.owners.push(Rc::clone(&owner));
        owner
    }

    pub fn add_pet(&mut self, pet: Pet) {
        self.pets.push(pet);
    }
}
