use crate::core::persistence::{Archive, Report};
use crate::core::registry::Registry;
use crate::domain::model::{Consultation, Owner, Pet};
use crate::domain::ports::Storage;
use crate::utils::error::{ClinicError, Result};
use crate::utils::validation;
use std::io::{BufRead, Write};
use std::rc::Rc;

const RULE_WIDTH: usize = 40;

/// Menu-driven session over any line input and text output.
///
/// `Err` from an operation means the terminal itself failed (closed input,
/// broken output). Rejected input is reported to the clerk and never leaves
/// the operation that read it.
pub struct Shell<R: BufRead, W: Write, S: Storage> {
    registry: Registry,
    archive: Archive<S>,
    input: R,
    output: W,
}

impl<R: BufRead, W: Write, S: Storage> Shell<R, W, S> {
    pub fn new(archive: Archive<S>, input: R, output: W) -> Self {
        Self {
            registry: Registry::new(),
            archive,
            input,
            output,
        }
    }

    pub fn registry(&self) -> &Registry {
        &self.registry
    }

    pub fn archive(&self) -> &Archive<S> {
        &self.archive
    }

    pub fn into_output(self) -> W {
        self.output
    }

    /// Loads both files, runs the menu until Exit, and saves both files.
    ///
    /// On a terminal fault the data is still saved before the fault is returned.
    pub fn run(&mut self) -> Result<()> {
        tracing::info!("Application started.");
        let reports = self.archive.import_all(&mut self.registry);
        self.print_reports(&reports)?;

        match self.main_loop() {
            Ok(()) => Ok(()),
            Err(e) => {
                tracing::error!("Unexpected error in main loop: {}", e);
                let _ = writeln!(self.output, "An unexpected error occurred: {}", e);
                let reports = self.archive.export_all(&self.registry);
                let _ = self.print_reports(&reports);
                Err(e)
            }
        }
    }

    fn main_loop(&mut self) -> Result<()> {
        loop {
            self.show_menu()?;
            let option = self.prompt("Select an option: ")?;
            match option.as_str() {
                "1" => self.register_pet()?,
                "2" => self.register_consultation()?,
                "3" => self.list_pets()?,
                "4" => self.view_pet_history()?,
                "5" => self.show_export_import_menu()?,
                "6" => {
                    let reports = self.archive.export_all(&self.registry);
                    self.print_reports(&reports)?;
                    writeln!(self.output, "Goodbye!")?;
                    tracing::info!("Application closed by user.");
                    return Ok(());
                }
                _ => {
                    writeln!(self.output, "Invalid option. Please try again.")?;
                    tracing::warn!("Invalid menu option selected: {}", option);
                }
            }
        }
    }

    fn show_menu(&mut self) -> Result<()> {
        writeln!(self.output)?;
        writeln!(self.output, "=== Veterinary Clinic - Main Menu ===")?;
        writeln!(self.output, "1. Register pet")?;
        writeln!(self.output, "2. Register consultation")?;
        writeln!(self.output, "3. List pets")?;
        writeln!(self.output, "4. View consultation history of a pet")?;
        writeln!(self.output, "5. Import/Export Data")?;
        writeln!(self.output, "6. Exit")?;
        Ok(())
    }

    fn prompt(&mut self, label: &str) -> Result<String> {
        write!(self.output, "{}", label)?;
        self.output.flush()?;

        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            return Err(ClinicError::InputClosed);
        }
        Ok(line.trim().to_string())
    }

    fn print_reports(&mut self, reports: &[Report]) -> Result<()> {
        for report in reports {
            writeln!(self.output, "{}", report)?;
        }
        Ok(())
    }

    /// Turns a rejected field into a message; terminal faults pass through.
    fn absorb_rejection<T>(&mut self, operation: &str, result: Result<T>) -> Result<Option<T>> {
        match result {
            Ok(value) => Ok(Some(value)),
            Err(ClinicError::ValidationError {
                field,
                value,
                reason,
            }) => {
                writeln!(self.output, "Input error: {}", reason)?;
                tracing::warn!(
                    field = %field,
                    value = %value,
                    "Input error in {}: {}",
                    operation,
                    reason
                );
                Ok(None)
            }
            Err(e @ ClinicError::NotFoundError { .. }) => {
                writeln!(self.output, "{}", e.user_friendly_message())?;
                tracing::warn!("Lookup failed in {}: {}", operation, e);
                Ok(None)
            }
            Err(e) => Err(e),
        }
    }

    pub fn register_owner(&mut self) -> Result<Option<Rc<Owner>>> {
        writeln!(self.output, "=== Register Owner ===")?;
        let result = self.read_owner();
        let Some(owner) = self.absorb_rejection("register_owner", result)? else {
            return Ok(None);
        };

        if let Some(existing) = self.registry.find_owner_by_name(&owner.name) {
            writeln!(self.output, "Owner already registered, using the existing record.")?;
            tracing::info!("Owner already registered, reusing: {}", existing);
            return Ok(Some(existing));
        }

        let rendered = owner.to_string();
        let owner = self.registry.add_owner(owner);
        writeln!(self.output, "Owner successfully registered.")?;
        tracing::info!("Owner registered: {}", rendered);
        Ok(Some(owner))
    }

    fn read_owner(&mut self) -> Result<Owner> {
        let name = self.prompt("Owner's name: ")?;
        validation::validate_name("owner_name", "Owner's name", &name)?;

        let phone = self.prompt("Phone: ")?;
        validation::validate_phone(&phone)?;

        let address = self.prompt("Address: ")?;
        validation::validate_address(&address)?;

        Ok(Owner::new(name, phone, address))
    }

    pub fn register_pet(&mut self) -> Result<()> {
        writeln!(self.output, "=== Register Pet ===")?;
        let result = self.read_pet();
        if let Some(pet) = self.absorb_rejection("register_pet", result)?.flatten() {
            let rendered = pet.to_string();
            self.registry.add_pet(pet);
            writeln!(self.output, "Pet successfully registered.")?;
            tracing::info!("Pet registered: {}", rendered);
        }
        Ok(())
    }

    /// `Ok(None)` when the inline owner registration was abandoned.
    fn read_pet(&mut self) -> Result<Option<Pet>> {
        let name = self.prompt("Pet's name: ")?;
        validation::validate_name("pet_name", "Pet's name", &name)?;
        if self.registry.find_pet_by_name(&name).is_some() {
            return Err(ClinicError::validation(
                "pet_name",
                &name,
                "A pet with that name is already registered.",
            ));
        }

        let species = self.prompt("Species: ")?;
        validation::validate_name("species", "Species", &species)?;

        let breed = self.prompt("Breed: ")?;
        validation::validate_name("breed", "Breed", &breed)?;

        let age_input = self.prompt("Age: ")?;
        let age = validation::validate_age(&age_input)?;

        let owner_name = self.prompt("Owner's name: ")?;
        validation::validate_name("owner_name", "Owner's name", &owner_name)?;

        let owner = match self.registry.find_owner_by_name(&owner_name) {
            Some(owner) => owner,
            None => {
                writeln!(self.output, "Owner not found. Please register them first.")?;
                tracing::warn!(
                    "Attempted to register pet for non-existent owner: {}",
                    owner_name
                );
                match self.register_owner()? {
                    Some(owner) => owner,
                    None => {
                        tracing::error!(
                            "Pet registration aborted due to failed owner registration."
                        );
                        return Ok(None);
                    }
                }
            }
        };

        Ok(Some(Pet::new(name, species, breed, age, owner)))
    }

    pub fn register_consultation(&mut self) -> Result<()> {
        writeln!(self.output, "=== Register Consultation ===")?;
        let result = self.read_consultation();
        self.absorb_rejection("register_consultation", result)?;
        Ok(())
    }

    fn read_consultation(&mut self) -> Result<()> {
        let pet_name = self.prompt("Pet's name: ")?;
        validation::validate_name("pet_name", "Pet's name", &pet_name)?;
        if self.registry.find_pet_by_name(&pet_name).is_none() {
            writeln!(self.output, "Pet not found, please register it first.")?;
            tracing::warn!(
                "Attempted to register consultation for non-existent pet: {}",
                pet_name
            );
            return Ok(());
        }

        let date = self.prompt("Date of consultation: ")?;
        validation::validate_date(&date)?;

        let reason = self.prompt("Reason: ")?;
        validation::validate_reason_or_diagnosis("reason", "Reason", &reason)?;

        let diagnosis = self.prompt("Diagnosis: ")?;
        validation::validate_reason_or_diagnosis("diagnosis", "Diagnosis", &diagnosis)?;

        let pet = self
            .registry
            .find_pet_by_name_mut(&pet_name)
            .ok_or_else(|| ClinicError::NotFoundError {
                kind: "Pet",
                name: pet_name.clone(),
            })?;
        let consultation = Consultation::new(date, reason, diagnosis, pet);
        let rendered = consultation.to_string();
        let registered_for = pet.name.clone();
        pet.add_consultation(consultation);

        writeln!(self.output, "Consultation successfully registered.")?;
        tracing::info!(
            "Consultation registered for pet {}: {}",
            registered_for,
            rendered
        );
        Ok(())
    }

    pub fn list_pets(&mut self) -> Result<()> {
        writeln!(self.output, "=== List of Pets ===")?;
        if self.registry.pets().is_empty() {
            writeln!(self.output, "No pets registered.")?;
            tracing::info!("Attempted to list pets but none registered.");
            return Ok(());
        }

        for pet in self.registry.pets() {
            writeln!(self.output, "{}", pet)?;
            writeln!(self.output, "{}", "-".repeat(RULE_WIDTH))?;
        }
        Ok(())
    }

    pub fn view_pet_history(&mut self) -> Result<()> {
        writeln!(self.output, "=== Consultation History ===")?;
        let pet_name = self.prompt("Pet's name: ")?;

        match self.registry.find_pet_by_name(&pet_name) {
            Some(pet) => {
                writeln!(self.output, "{}", pet.show_consultations())?;
                tracing::info!("Consultation history viewed for pet {}", pet_name);
            }
            None => {
                writeln!(self.output, "Pet not found.")?;
                tracing::warn!(
                    "Consultation history requested for non-existent pet: {}",
                    pet_name
                );
            }
        }
        Ok(())
    }

    pub fn show_export_import_menu(&mut self) -> Result<()> {
        writeln!(self.output)?;
        writeln!(self.output, "=== Data Import/Export Menu ===")?;
        writeln!(self.output, "1. Export all data")?;
        writeln!(self.output, "2. Import all data")?;
        writeln!(self.output, "3. Export pets and owners (CSV)")?;
        writeln!(self.output, "4. Import pets and owners (CSV)")?;
        writeln!(self.output, "5. Export consultations (JSON)")?;
        writeln!(self.output, "6. Import consultations (JSON)")?;
        writeln!(self.output, "0. Back to main menu")?;

        let option = self.prompt("Select an option: ")?;
        let reports = match option.as_str() {
            "1" => self.archive.export_all(&self.registry),
            "2" => self.archive.import_all(&mut self.registry),
            "3" => vec![self.archive.export_pets(&self.registry)],
            "4" => vec![self.archive.import_pets(&mut self.registry)],
            "5" => vec![self.archive.export_consultations(&self.registry)],
            "6" => vec![self.archive.import_consultations(&mut self.registry)],
            "0" => Vec::new(),
            _ => {
                writeln!(self.output, "Invalid option.")?;
                tracing::warn!("Invalid import/export menu option selected: {}", option);
                Vec::new()
            }
        };
        self.print_reports(&reports)
    }
}
