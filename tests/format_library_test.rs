//! Integration tests for TOML format libraries

use data_cleaner::cleaner::Cleaner;
use data_cleaner::domain::{CleanerError, DynamicRecord, Record, Value};
use data_cleaner::format::FormatRegistry;
use std::io::Write;
use std::path::PathBuf;
use tempfile::NamedTempFile;

fn sample_library() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("formats/people.toml")
}

#[test]
fn test_sample_library_declares_formats() {
    let mut registry = FormatRegistry::new();
    let count = registry.load_format_library(sample_library()).unwrap();

    assert_eq!(count, 2);
    assert_eq!(registry.type_names(), ["Company", "Person"]);
}

#[test]
fn test_clean_with_sample_library() {
    let mut registry = FormatRegistry::new();
    registry.register_default_generators(Some(2025));
    registry.load_format_library(sample_library()).unwrap();

    let person = DynamicRecord::new("Person")
        .with("first_name", "Arthur")
        .with("last_name", "Dent")
        .with("full_name", "Arthur Dent")
        .with("email", "arthur@earth.net")
        .with("age", 42)
        .with("home", "Earth");

    let cleaned = Cleaner::new(&registry).clean(&person).unwrap();

    assert_ne!(cleaned.get("email"), person.get("email"));
    assert!(cleaned.text("email").unwrap().contains('@'));
    assert!(cleaned.text("full_name").unwrap().contains(' '));
    let age = cleaned.get("age").and_then(|v| v.as_i64()).unwrap();
    assert!((18..=90).contains(&age));
    assert_eq!(cleaned.get("home"), Some(Value::from("Earth")));
}

#[test]
fn test_same_seed_same_output() {
    let clean_once = || {
        let mut registry = FormatRegistry::new();
        registry.register_default_generators(Some(99));
        registry.load_format_library(sample_library()).unwrap();
        let company = DynamicRecord::new("Company").with("name", "Sirius Cybernetics");
        Cleaner::new(&registry).clean(&company).unwrap()
    };

    assert_eq!(clean_once(), clean_once());
}

#[test]
fn test_library_file_overrides_code_declaration() {
    let mut registry = FormatRegistry::new();
    registry.register_generator("first_name", |_| Ok(Value::from("Ford")));
    registry.declare_format("Agent", |f| {
        f.literal("codename", "Towel");
    });

    let mut file = NamedTempFile::new().unwrap();
    write!(
        file,
        r#"
[[formats]]
type = "Agent"

[[formats.attributes]]
name = "name"
generator = "first_name"
"#
    )
    .unwrap();
    file.flush().unwrap();

    registry.load_format_library(file.path()).unwrap();
    assert!(registry.attribute_recipe("Agent", "codename").is_none());

    let agent = DynamicRecord::new("Agent").with("name", "Arthur");
    let cleaned = Cleaner::new(&registry).clean(&agent).unwrap();
    assert_eq!(cleaned.get("name"), Some(Value::from("Ford")));
}

#[test]
fn test_invalid_library_leaves_registry_untouched() {
    let mut registry = FormatRegistry::new();
    let toml = r#"
[[formats]]
type = "Good"

[[formats.attributes]]
name = "x"
literal = 1

[[formats]]
type = "Bad"

[[formats.attributes]]
name = "y"
"#;

    let err = registry.load_format_library_str(toml).unwrap_err();
    assert!(matches!(err, CleanerError::Configuration(_)));
    assert!(registry.type_names().is_empty());
}
