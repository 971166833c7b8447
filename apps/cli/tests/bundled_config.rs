//! Integration tests for the bundled configuration.
//!
//! Validates that the files in the config/ directory load cleanly.

use ambimode_context::{
    default_rules, load_rules, AppCategory, AppClassifier, MappingSource, ProcessCategoryTable,
    WindowObservation,
};
use std::path::{Path, PathBuf};

/// Get the path to the bundled config directory.
fn config_dir() -> PathBuf {
    // From apps/cli/, go up to repo root
    let manifest_dir = env!("CARGO_MANIFEST_DIR");
    Path::new(manifest_dir)
        .parent() // apps/
        .unwrap()
        .parent() // repo root
        .unwrap()
        .join("config")
}

#[test]
fn test_bundled_category_file_loads() {
    let path = config_dir().join("app_category_config.txt");
    let table = ProcessCategoryTable::load(&path)
        .unwrap_or_else(|e| panic!("{} failed to load: {e}", path.display()));

    assert!(!table.is_empty());
    assert_eq!(table.get("steam.exe"), Some(AppCategory::Game));
    assert_eq!(table.get("safari"), Some(AppCategory::Browser));
}

#[test]
fn test_bundled_category_file_every_line_valid() {
    let path = config_dir().join("app_category_config.txt");
    let content = std::fs::read_to_string(&path).unwrap();

    let mut invalid = Vec::new();
    for (index, line) in content.lines().enumerate() {
        let line = line.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }
        let valid = line
            .split_once('=')
            .map(|(name, token)| {
                !name.trim().is_empty() && AppCategory::from_token(token.trim()).is_some()
            })
            .unwrap_or(false);
        if !valid {
            invalid.push(format!("line {}: {line}", index + 1));
        }
    }

    assert!(invalid.is_empty(), "invalid lines: {invalid:#?}");
}

#[test]
fn test_bundled_category_file_replaces_builtin() {
    let path = config_dir().join("app_category_config.txt");
    let mut classifier = AppClassifier::new();
    classifier.initialize_mapping(Some(&path)).unwrap();

    assert_eq!(classifier.source(), &MappingSource::File(path.clone()));
    assert_eq!(
        classifier.classify(&WindowObservation::new("/Applications/Blender.app/Contents/MacOS/Blender", "")),
        AppCategory::Creative
    );
}

#[test]
fn test_bundled_rules_match_builtin() {
    let path = config_dir().join("rules.json");
    let rules = load_rules(&path)
        .unwrap_or_else(|e| panic!("{} failed to load: {e}", path.display()));

    println!("Loaded {} rules from {}", rules.len(), path.display());
    assert_eq!(rules, default_rules());
}
