//! Discovery contract tests
//!
//! Builds plugin locations on disk (directories and zip archives) and
//! checks what the registry discovers from them.

use authorship::error::{DiscoveryError, PluginError};
use authorship::plugins::distances::ManhattanDistance;
use authorship::plugins::{AnyPlugin, Capability, ParameterValue, Plugin, PluginParameters};
use authorship::registry::{RegistrationTable, Registry};
use std::io::Write;
use std::path::Path;
use std::sync::Arc;

fn touch(root: &Path, entry: &str) {
    let path = root.join(entry);
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent).unwrap();
    }
    std::fs::write(path, "").unwrap();
}

fn table_with_broken_unit() -> RegistrationTable {
    let mut table = RegistrationTable::builtin();
    table.register(Capability::DistanceFunction, "broken_distance", |_, _| {
        Err(PluginError::Unavailable("model file missing".into()))
    });
    table
}

fn write_zip(path: &Path, entries: &[&str]) {
    let file = std::fs::File::create(path).unwrap();
    let mut zip = zip::ZipWriter::new(file);
    let options = zip::write::FileOptions::default();
    for entry in entries {
        zip.start_file(*entry, options).unwrap();
        zip.write_all(b"").unwrap();
    }
    zip.finish().unwrap();
}

#[test]
fn test_directory_valid_mismatched_and_broken_units() {
    let dir = tempfile::tempdir().unwrap();
    touch(dir.path(), "distances/soergel_distance.plugin");
    touch(dir.path(), "distances/unify_case.plugin");
    touch(dir.path(), "distances/broken_distance.plugin");

    let registry = Registry::builder()
        .table(table_with_broken_unit())
        .location(dir.path())
        .build()
        .unwrap();
    let catalogue = registry.catalogue();

    assert_eq!(catalogue.distance_functions().len(), 1);
    assert_eq!(catalogue.distance_functions()[0].unit(), "soergel_distance");

    let distance_diagnostics: Vec<_> = catalogue
        .diagnostics()
        .iter()
        .filter(|d| d.capability == Capability::DistanceFunction)
        .collect();
    assert_eq!(distance_diagnostics.len(), 2);
}

#[test]
fn test_missing_capability_paths_do_not_block_others() {
    let dir = tempfile::tempdir().unwrap();
    touch(dir.path(), "canonicizers/unify_case.plugin");
    touch(dir.path(), "canonicizers/strip_punctuation.plugin");

    let registry = Registry::builder().location(dir.path()).build().unwrap();
    let catalogue = registry.catalogue();

    assert_eq!(catalogue.canonicizers().len(), 2);
    assert!(catalogue.event_drivers().is_empty());
    // one diagnostic per missing capability path
    assert_eq!(catalogue.diagnostics().len(), 5);
    assert!(catalogue
        .diagnostics()
        .iter()
        .all(|d| matches!(d.error, DiscoveryError::Unreadable { .. })));
}

#[test]
fn test_directory_listing_is_not_recursive() {
    let dir = tempfile::tempdir().unwrap();
    touch(dir.path(), "event_drivers/words.plugin");
    touch(dir.path(), "event_drivers/nested/characters.plugin");
    touch(dir.path(), "event_drivers/notes.txt");

    let registry = Registry::builder().location(dir.path()).build().unwrap();
    let drivers: Vec<&str> = registry
        .catalogue()
        .event_drivers()
        .iter()
        .map(|d| d.unit())
        .collect();
    assert_eq!(drivers, vec!["words"]);
}

#[test]
fn test_missing_location() {
    let dir = tempfile::tempdir().unwrap();
    let registry = Registry::builder()
        .location(dir.path().join("does-not-exist"))
        .build()
        .unwrap();

    let catalogue = registry.catalogue();
    assert!(catalogue.is_empty());
    assert_eq!(catalogue.diagnostics().len(), Capability::ALL.len());
}

#[test]
fn test_zip_archive_direct_children_only() {
    let dir = tempfile::tempdir().unwrap();
    let archive = dir.path().join("units.zip");
    write_zip(
        &archive,
        &[
            "distances/cosine_distance.plugin",
            "distances/manhattan_distance.plugin",
            "distances/old/soergel_distance.plugin",
            "classifiers/nearest_neighbor.plugin",
        ],
    );

    let registry = Registry::builder().location(&archive).build().unwrap();
    let catalogue = registry.catalogue();

    let names: Vec<&str> = catalogue
        .distance_functions()
        .iter()
        .map(|d| d.display_name())
        .collect();
    assert_eq!(names, vec!["Cosine Distance", "Manhattan Distance"]);
    assert_eq!(catalogue.analysis_drivers().len(), 1);
}

#[test]
fn test_corrupt_archive_is_an_error() {
    let dir = tempfile::tempdir().unwrap();
    let archive = dir.path().join("units.zip");
    std::fs::write(&archive, "not a zip").unwrap();

    assert!(Registry::builder().location(&archive).build().is_err());
}

#[test]
fn test_discovery_is_idempotent() {
    let dir = tempfile::tempdir().unwrap();
    touch(dir.path(), "distances/soergel_distance.plugin");
    touch(dir.path(), "distances/cosine_distance.plugin");

    let registry = Registry::builder().location(dir.path()).build().unwrap();
    let first = registry
        .catalogue()
        .records(Capability::DistanceFunction)
        .to_vec();

    // new units appearing later are not picked up: the catalogue is frozen
    touch(dir.path(), "distances/manhattan_distance.plugin");
    let second = registry
        .catalogue()
        .records(Capability::DistanceFunction)
        .to_vec();

    assert_eq!(first, second);
    assert_eq!(first.len(), 2);
}

#[test]
fn test_parameters_from_builder() {
    let dir = tempfile::tempdir().unwrap();
    touch(dir.path(), "event_drivers/character_ngrams.plugin");

    let registry = Registry::builder()
        .location(dir.path())
        .parameters(
            "character_ngrams",
            PluginParameters::new().with("n", ParameterValue::Integer(4)),
        )
        .build()
        .unwrap();

    let drivers = registry.catalogue().event_drivers();
    assert_eq!(drivers.len(), 1);
    assert_eq!(drivers[0].display_name(), "Character 4-grams");
}

#[test]
fn test_analysis_driver_resolves_caller_registered_distance() {
    let mut table = RegistrationTable::builtin();
    table.register(Capability::DistanceFunction, "taxicab", |_, _| {
        Ok(AnyPlugin::DistanceFunction(Arc::new(ManhattanDistance)))
    });

    let registry = Registry::builder()
        .table(table)
        .parameters(
            "nearest_neighbor",
            PluginParameters::new().with("distance", ParameterValue::String("taxicab".into())),
        )
        .build()
        .unwrap();
    let catalogue = registry.catalogue();

    assert!(catalogue.diagnostics().is_empty());
    let driver = catalogue.find_analysis_driver("nearest_neighbor").unwrap();
    assert_eq!(driver.tooltip(), "Nearest neighbor using Manhattan Distance");
}
