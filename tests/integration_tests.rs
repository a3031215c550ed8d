use std::rc::Rc;
use tempfile::TempDir;
use vet_records::core::persistence::{
    export_consultations_json, export_pets_csv, import_consultations_json, import_pets_csv,
};
use vet_records::{Archive, Consultation, LocalStorage, Owner, Pet, Registry};

fn local_storage(temp_dir: &TempDir) -> LocalStorage {
    LocalStorage::new(temp_dir.path().to_str().unwrap().to_string())
}

#[test]
fn test_pets_csv_round_trip_through_disk() {
    let temp_dir = TempDir::new().unwrap();
    let storage = local_storage(&temp_dir);

    let mut registry = Registry::new();
    let julia = registry.add_owner(Owner::new("Julia", "456", "Calle 10"));
    registry.add_pet(Pet::new("Linda", "Perro", "Cocker", 4, julia));

    export_pets_csv(&registry, &storage, "pets_and_owners.csv").unwrap();
    assert!(temp_dir.path().join("pets_and_owners.csv").exists());

    registry.clear();
    import_pets_csv(&mut registry, &storage, "pets_and_owners.csv").unwrap();

    assert!(registry.find_owner_by_name("Julia").is_some());
    let linda = registry.find_pet_by_name("Linda").unwrap();
    assert_eq!(linda.age, 4);
    assert_eq!(linda.owner.name, "Julia");
}

#[test]
fn test_consultations_json_round_trip_through_disk() {
    let temp_dir = TempDir::new().unwrap();
    let storage = local_storage(&temp_dir);

    let mut registry = Registry::new();
    let raul = registry.add_owner(Owner::new("Raul", "321", "Boulevard 5"));
    let mut max = Pet::new("Max", "Perro", "Pug", 6, raul);
    let consultation = Consultation::new("15/06/2024", "Cirugía", "Recuperado", &max);
    max.add_consultation(consultation);
    registry.add_pet(max);

    export_consultations_json(&registry, &storage, "consultations.json").unwrap();
    let raw = std::fs::read_to_string(temp_dir.path().join("consultations.json")).unwrap();
    assert!(raw.contains("\"Cirugía\""));

    registry.find_pet_by_name_mut("Max").unwrap().clear_consultations();
    import_consultations_json(&mut registry, &storage, "consultations.json").unwrap();

    let max = registry.find_pet_by_name("Max").unwrap();
    assert_eq!(max.consultations().len(), 1);
    assert_eq!(max.consultations()[0].diagnosis, "Recuperado");
}

#[test]
fn test_full_round_trip_preserves_every_record() {
    let temp_dir = TempDir::new().unwrap();
    let archive = Archive::new(local_storage(&temp_dir), "pets.csv", "consultations.json");

    let mut original = Registry::new();
    let ana = original.add_owner(Owner::new("Ana", "999", "Plaza 2, piso 3"));
    let luz = original.add_owner(Owner::new("Luz", "777", "Av. \"Z\""));
    let mut toby = Pet::new("Toby", "Perro", "Labrador", 5, Rc::clone(&ana));
    for (date, reason, diagnosis) in [
        ("10/05/2024", "Vacunación", "Sin novedad"),
        ("11/06/2024", "Chequeo", "Saludable"),
    ] {
        let consultation = Consultation::new(date, reason, diagnosis, &toby);
        toby.add_consultation(consultation);
    }
    original.add_pet(toby);
    original.add_pet(Pet::new("Nube", "Gato", "Persa", 0, Rc::clone(&ana)));
    original.add_pet(Pet::new("Rocky", "Perro", "Boxer", 2, luz));

    assert!(archive.export_all(&original).iter().all(|r| !r.is_failure()));

    let mut restored = Registry::new();
    assert!(archive.import_all(&mut restored).iter().all(|r| !r.is_failure()));

    assert_eq!(restored.owners().len(), original.owners().len());
    for owner in original.owners() {
        let copy = restored.find_owner_by_name(&owner.name).unwrap();
        assert_eq!(copy.as_ref(), owner.as_ref());
    }
    for pet in original.pets() {
        let copy = restored.find_pet_by_name(&pet.name).unwrap();
        assert_eq!(copy.species, pet.species);
        assert_eq!(copy.breed, pet.breed);
        assert_eq!(copy.age, pet.age);
        assert_eq!(copy.owner.name, pet.owner.name);
        assert_eq!(copy.consultations(), pet.consultations());
    }

    // Both Ana's pets point at the same restored owner.
    let toby = restored.find_pet_by_name("Toby").unwrap();
    let nube = restored.find_pet_by_name("Nube").unwrap();
    assert!(Rc::ptr_eq(&toby.owner, &nube.owner));
}

#[test]
fn test_import_all_twice_adds_nothing_new() {
    let temp_dir = TempDir::new().unwrap();
    let archive = Archive::new(local_storage(&temp_dir), "pets.csv", "consultations.json");

    let mut seed = Registry::new();
    let raul = seed.add_owner(Owner::new("Raul", "321", "Boulevard 5"));
    let mut max = Pet::new("Max", "Perro", "Pug", 6, raul);
    let consultation = Consultation::new("15/06/2024", "Cirugía", "Recuperado", &max);
    max.add_consultation(consultation);
    seed.add_pet(max);
    archive.export_all(&seed);

    let mut registry = Registry::new();
    archive.import_all(&mut registry);
    archive.import_all(&mut registry);

    assert_eq!(registry.owners().len(), 1);
    assert_eq!(registry.pets().len(), 1);
    assert_eq!(registry.pets()[0].consultations().len(), 1);
}

#[test]
fn test_missing_files_import_nothing_without_failing() {
    let temp_dir = TempDir::new().unwrap();
    let archive = Archive::new(local_storage(&temp_dir), "pets.csv", "consultations.json");

    let mut registry = Registry::new();
    let reports = archive.import_all(&mut registry);

    assert_eq!(reports.len(), 2);
    assert!(reports.iter().all(|r| !r.is_failure()));
    assert!(registry.is_empty());
}

#[test]
fn test_corrupt_json_is_reported_and_registry_kept() {
    let temp_dir = TempDir::new().unwrap();
    std::fs::write(temp_dir.path().join("consultations.json"), "{ not json").unwrap();
    let archive = Archive::new(local_storage(&temp_dir), "pets.csv", "consultations.json");

    let mut registry = Registry::new();
    let owner = registry.add_owner(Owner::new("Luz", "777", "Av. Z"));
    registry.add_pet(Pet::new("Rocky", "Perro", "Boxer", 2, owner));

    let report = archive.import_consultations(&mut registry);
    assert!(report.is_failure());
    assert!(report
        .message()
        .starts_with("Error importing consultations from JSON"));
    assert_eq!(registry.pets().len(), 1);
    assert!(registry.pets()[0].consultations().is_empty());
}

#[test]
fn test_failed_export_keeps_previous_file() {
    let temp_dir = TempDir::new().unwrap();
    let archive = Archive::new(local_storage(&temp_dir), "pets.csv", "consultations.json");

    let mut registry = Registry::new();
    let owner = registry.add_owner(Owner::new("Julia", "456", "Calle 10"));
    registry.add_pet(Pet::new("Linda", "Perro", "Cocker", 4, owner));
    archive.export_pets(&registry);
    let before = std::fs::read_to_string(temp_dir.path().join("pets.csv")).unwrap();

    // A directory squatting on the temp name makes the next write fail.
    std::fs::create_dir(temp_dir.path().join("pets.csv.tmp")).unwrap();
    registry.clear();
    let report = archive.export_pets(&registry);

    assert!(report.is_failure());
    let after = std::fs::read_to_string(temp_dir.path().join("pets.csv")).unwrap();
    assert_eq!(before, after);
}
