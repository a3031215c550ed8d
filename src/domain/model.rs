use serde::{Deserialize, Serialize};
use std::fmt;
use std::rc::Rc;

/// A clinic client. Identified by name, compared case-insensitively.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Owner {
    pub name: String,
    pub phone: String,
    pub address: String,
}

impl Owner {
    pub fn new(name: impl Into<String>, phone: impl Into<String>, address: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            phone: phone.into(),
            address: address.into(),
        }
    }
}

impl fmt::Display for Owner {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Owner: {}, Phone: {}, Address: {}",
            self.name, self.phone, self.address
        )
    }
}

/// A dated visit. `pet_name` is the back-reference to the pet whose history holds it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Consultation {
    pub date: String,
    pub reason: String,
    pub diagnosis: String,
    pub pet_name: String,
}

impl Consultation {
    pub fn new(
        date: impl Into<String>,
        reason: impl Into<String>,
        diagnosis: impl Into<String>,
        pet: &Pet,
    ) -> Self {
        Self {
            date: date.into(),
            reason: reason.into(),
            diagnosis: diagnosis.into(),
            pet_name: pet.name.clone(),
        }
    }

    pub fn matches(&self, date: &str, reason: &str, diagnosis: &str) -> bool {
        self.date == date && self.reason == reason && self.diagnosis == diagnosis
    }
}

impl fmt::Display for Consultation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Date: {}, Reason: {}, Diagnosis: {}",
            self.date, self.reason, self.diagnosis
        )
    }
}

#[derive(Debug, Clone)]
pub struct Pet {
    pub name: String,
    pub species: String,
    pub breed: String,
    pub age: u32,
    pub owner: Rc<Owner>,
    consultations: Vec<Consultation>,
}

impl Pet {
    pub fn new(
        name: impl Into<String>,
        species: impl Into<String>,
        breed: impl Into<String>,
        age: u32,
        owner: Rc<Owner>,
    ) -> Self {
        Self {
            name: name.into(),
            species: species.into(),
            breed: breed.into(),
            age,
            owner,
            consultations: Vec::new(),
        }
    }

    pub fn consultations(&self) -> &[Consultation] {
        &self.consultations
    }

    pub fn add_consultation(&mut self, consultation: Consultation) {
        self.consultations.push(consultation);
    }

    pub fn has_consultation(&self, date: &str, reason: &str, diagnosis: &str) -> bool {
        self.consultations
            .iter()
            .any(|c| c.matches(date, reason, diagnosis))
    }

    /// Drops the whole history. Only used to rebuild state from the consultations file.
    pub fn clear_consultations(&mut self) {
        self.consultations.clear();
    }

    pub fn show_consultations(&self) -> String {
        if self.consultations.is_empty() {
            return format!("No consultations registered for {}.", self.name);
        }

        let mut lines = vec![format!("Consultation history for {}:", self.name)];
        for (index, consultation) in self.consultations.iter().enumerate() {
            lines.push(format!("  {}. {}", index + 1, consultation));
        }
        lines.join("\n")
    }
}

impl fmt::Display for Pet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Pet: {}, Species: {}, Breed: {}, Age: {}, Owner: {}",
            self.name, self.species, self.breed, self.age, self.owner.name
        )
    }
}

/// One line of the pets-and-owners CSV file. Field order is the column order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PetRecord {
    pub pet_name: String,
    pub species: String,
    pub breed: String,
    pub age: u32,
    pub owner_name: String,
    pub owner_phone: String,
    pub owner_address: String,
}

impl From<&Pet> for PetRecord {
    fn from(pet: &Pet) -> Self {
        Self {
            pet_name: pet.name.clone(),
            species: pet.species.clone(),
            breed: pet.breed.clone(),
            age: pet.age,
            owner_name: pet.owner.name.clone(),
            owner_phone: pet.owner.phone.clone(),
            owner_address: pet.owner.address.clone(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConsultationRecord {
    pub date: String,
    pub reason: String,
    pub diagnosis: String,
}

impl From<&Consultation> for ConsultationRecord {
    fn from(consultation: &Consultation) -> Self {
        Self {
            date: consultation.date.clone(),
            reason: consultation.reason.clone(),
            diagnosis: consultation.diagnosis.clone(),
        }
    }
}

/// One element of the consultations JSON array.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConsultationEntry {
    pub pet_name: String,
    pub consultations: Vec<ConsultationRecord>,
}

impl From<&Pet> for ConsultationEntry {
    fn from(pet: &Pet) -> Self {
        Self {
            pet_name: pet.name.clone(),
            consultations: pet.consultations().iter().map(ConsultationRecord::from).collect(),
        }
    }
}
