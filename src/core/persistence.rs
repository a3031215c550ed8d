use crate::core::registry::Registry;
use crate::domain::model::{Consultation, ConsultationEntry, Owner, Pet, PetRecord};
use crate::domain::ports::{ConfigProvider, Storage};
use crate::utils::error::{ClinicError, Result};
use std::fmt;

pub const PET_CSV_HEADER: [&str; 7] = [
    "pet_name",
    "species",
    "breed",
    "age",
    "owner_name",
    "owner_phone",
    "owner_address",
];

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ImportSummary {
    pub file_missing: bool,
    pub owners_added: usize,
    pub pets_added: usize,
    pub pets_skipped: usize,
    pub consultations_added: usize,
    pub consultations_skipped: usize,
    pub unknown_pets: usize,
}

impl ImportSummary {
    fn missing() -> Self {
        Self {
            file_missing: true,
            ..Self::default()
        }
    }
}

impl fmt::Display for ImportSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.file_missing {
            return write!(f, "file not found, nothing imported");
        }
        write!(
            f,
            "{} owners, {} pets ({} already known), {} consultations ({} duplicates, {} for unknown pets)",
            self.owners_added,
            self.pets_added,
            self.pets_skipped,
            self.consultations_added,
            self.consultations_skipped,
            self.unknown_pets
        )
    }
}

/// Writes one row per pet, owner columns resolved from the pet's owner.
pub fn export_pets_csv<S: Storage + ?Sized>(
    registry: &Registry,
    storage: &S,
    path: &str,
) -> Result<usize> {
    let mut writer = csv::WriterBuilder::new()
        .has_headers(false)
        .from_writer(Vec::new());
    writer.write_record(PET_CSV_HEADER)?;
    for pet in registry.pets() {
        writer.serialize(PetRecord::from(pet))?;
    }
    let data = writer
        .into_inner()
        .map_err(|e| ClinicError::IoError(e.into_error()))?;

    storage.write_file(path, &data)?;
    Ok(registry.pets().len())
}

/// Merges pets and owners from the CSV file into `registry`.
///
/// The whole file is parsed before anything is added, so a bad row leaves the
/// registry untouched. Rows naming a pet that already exists are skipped
/// without comparing their other columns.
pub fn import_pets_csv<S: Storage + ?Sized>(
    registry: &mut Registry,
    storage: &S,
    path: &str,
) -> Result<ImportSummary> {
    if !storage.exists(path) {
        tracing::warn!("File {} does not exist. No pets or owners imported.", path);
        return Ok(ImportSummary::missing());
    }

    let data = storage.read_file(path)?;
    let mut reader = csv::Reader::from_reader(data.as_slice());
    let records = reader
        .deserialize::<PetRecord>()
        .collect::<std::result::Result<Vec<_>, _>>()?;

    let mut summary = ImportSummary::default();
    for record in records {
        let owner = match registry.find_owner_by_name(&record.owner_name) {
            Some(owner) => owner,
            None => {
                summary.owners_added += 1;
                registry.add_owner(Owner::new(
                    record.owner_name,
                    record.owner_phone,
                    record.owner_address,
                ))
            }
        };

        if registry.find_pet_by_name(&record.pet_name).is_some() {
            tracing::debug!("Pet {} already registered, CSV row skipped", record.pet_name);
            summary.pets_skipped += 1;
            continue;
        }

        registry.add_pet(Pet::new(
            record.pet_name,
            record.species,
            record.breed,
            record.age,
            owner,
        ));
        summary.pets_added += 1;
    }

    Ok(summary)
}

pub fn export_consultations_json<S: Storage + ?Sized>(
    registry: &Registry,
    storage: &S,
    path: &str,
) -> Result<usize> {
    let entries: Vec<ConsultationEntry> =
        registry.pets().iter().map(ConsultationEntry::from).collect();
    let data = serde_json::to_vec_pretty(&entries)?;

    storage.write_file(path, &data)?;
    Ok(entries.len())
}

/// Attaches consultations from the JSON file to pets already in `registry`.
///
/// Entries for unknown pets are skipped whole. A record whose date, reason and
/// diagnosis all equal an existing consultation of that pet is not added again.
pub fn import_consultations_json<S: Storage + ?Sized>(
    registry: &mut Registry,
    storage: &S,
    path: &str,
) -> Result<ImportSummary> {
    if !storage.exists(path) {
        tracing::warn!("File {} does not exist. No consultations imported.", path);
        return Ok(ImportSummary::missing());
    }

    let data = storage.read_file(path)?;
    let entries: Vec<ConsultationEntry> = serde_json::from_slice(&data)?;

    let mut summary = ImportSummary::default();
    for entry in entries {
        let Some(pet) = registry.find_pet_by_name_mut(&entry.pet_name) else {
            tracing::warn!(
                "Consultation import found pet not in memory: {}",
                entry.pet_name
            );
            summary.unknown_pets += 1;
            continue;
        };

        for record in entry.consultations {
            if pet.has_consultation(&record.date, &record.reason, &record.diagnosis) {
                summary.consultations_skipped += 1;
                continue;
            }
            let consultation =
                Consultation::new(record.date, record.reason, record.diagnosis, pet);
            pet.add_consultation(consultation);
            summary.consultations_added += 1;
        }
    }

    Ok(summary)
}

/// Result of one archive operation, already phrased for the clerk.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Report {
    Done(String),
    Failed(String),
}

impl Report {
    pub fn message(&self) -> &str {
        match self {
            Report::Done(message) | Report::Failed(message) => message,
        }
    }

    pub fn is_failure(&self) -> bool {
        matches!(self, Report::Failed(_))
    }
}

impl fmt::Display for Report {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.message())
    }
}

/// The two data files behind one storage backend.
///
/// Every operation here absorbs its own failure: it is logged at error level
/// and returned as [`Report::Failed`], never as an `Err`.
pub struct Archive<S: Storage> {
    storage: S,
    pets_file: String,
    consultations_file: String,
}

impl<S: Storage> Archive<S> {
    pub fn new(
        storage: S,
        pets_file: impl Into<String>,
        consultations_file: impl Into<String>,
    ) -> Self {
        Self {
            storage,
            pets_file: pets_file.into(),
            consultations_file: consultations_file.into(),
        }
    }

    pub fn from_config<C: ConfigProvider>(storage: S, config: &C) -> Self {
        Self::new(storage, config.pets_file(), config.consultations_file())
    }

    pub fn storage(&self) -> &S {
        &self.storage
    }

    pub fn pets_file(&self) -> &str {
        &self.pets_file
    }

    pub fn consultations_file(&self) -> &str {
        &self.consultations_file
    }

    pub fn export_pets(&self, registry: &Registry) -> Report {
        match export_pets_csv(registry, &self.storage, &self.pets_file) {
            Ok(count) => {
                tracing::info!("Exported {} pets and owners to CSV: {}", count, self.pets_file);
                Report::Done(format!("Data exported to {}", self.pets_file))
            }
            Err(e) => {
                tracing::error!("Error exporting to CSV {}: {}", self.pets_file, e);
                Report::Failed(format!("Error exporting to CSV: {}", e))
            }
        }
    }

    pub fn import_pets(&self, registry: &mut Registry) -> Report {
        match import_pets_csv(registry, &self.storage, &self.pets_file) {
            Ok(summary) if summary.file_missing => {
                Report::Done(format!("No data found at {}, nothing imported.", self.pets_file))
            }
            Ok(summary) => {
                tracing::info!("Imported pets and owners from CSV {}: {}", self.pets_file, summary);
                Report::Done(format!("Data imported from {} ({})", self.pets_file, summary))
            }
            Err(e) => {
                tracing::error!("Error importing from CSV {}: {}", self.pets_file, e);
                Report::Failed(format!("Error importing from CSV: {}", e))
            }
        }
    }

    pub fn export_consultations(&self, registry: &Registry) -> Report {
        match export_consultations_json(registry, &self.storage, &self.consultations_file) {
            Ok(count) => {
                tracing::info!(
                    "Exported consultations of {} pets to JSON: {}",
                    count,
                    self.consultations_file
                );
                Report::Done(format!("Consultations exported to {}", self.consultations_file))
            }
            Err(e) => {
                tracing::error!(
                    "Error exporting consultations to JSON {}: {}",
                    self.consultations_file,
                    e
                );
                Report::Failed(format!("Error exporting consultations to JSON: {}", e))
            }
        }
    }

    pub fn import_consultations(&self, registry: &mut Registry) -> Report {
        match import_consultations_json(registry, &self.storage, &self.consultations_file) {
            Ok(summary) if summary.file_missing => Report::Done(format!(
                "No consultations found at {}, nothing imported.",
                self.consultations_file
            )),
            Ok(summary) => {
                tracing::info!(
                    "Imported consultations from JSON {}: {}",
                    self.consultations_file,
                    summary
                );
                Report::Done(format!(
                    "Consultations imported from {} ({})",
                    self.consultations_file, summary
                ))
            }
            Err(e) => {
                tracing::error!(
                    "Error importing consultations from JSON {}: {}",
                    self.consultations_file,
                    e
                );
                Report::Failed(format!("Error importing consultations from JSON: {}", e))
            }
        }
    }

    pub fn export_all(&self, registry: &Registry) -> Vec<Report> {
        vec![self.export_pets(registry), self.export_consultations(registry)]
    }

    /// Pets first: consultations can only attach to pets already loaded.
    pub fn import_all(&self, registry: &mut Registry) -> Vec<Report> {
        let pets = self.import_pets(registry);
        let consultations = self.import_consultations(registry);
        vec![pets, consultations]
    }
}
