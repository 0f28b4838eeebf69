//! End-to-end tests for the spec -> emit -> patch pipeline

use fieldgen_core::{
    CheckOutcome, CodeEmitter, FilePatcher, Generator, GeneratorConfig, SpecLoader,
};
use tempfile::TempDir;

const SPEC: &str = r#"{
    "ArtistName": {
        "comment": "Name of the artist.",
        "type": "String",
        "entities": {"Release": "artist", "Recording": "artist"}
    },
    "Barcode": {
        "comment": "The barcode of a release.",
        "type": "String",
        "entities": {"Release": "barcode"}
    },
    "Duration": {
        "comment": "Duration in milliseconds.",
        "type": "u32",
        "entities": {"Recording": "dur"}
    }
}"#;

const TARGET: &str = "\
//! The fields that can be used in queries.

use crate::search::{ResourceKind, SearchField, SearchFieldError};

// BEGIN CODEGEN(search_fields)
// stale content
// END CODEGEN(search_fields)

fn unrelated() {}
";

fn setup() -> (TempDir, Generator) {
    let temp_dir = TempDir::new().unwrap();
    let spec_path = temp_dir.path().join("search_fields.json");
    let target_path = temp_dir.path().join("fields.rs");
    std::fs::write(&spec_path, SPEC).unwrap();
    std::fs::write(&target_path, TARGET).unwrap();

    let generator = Generator::with_config(GeneratorConfig {
        spec_path,
        target_path,
        section: "search_fields".to_string(),
    });
    (temp_dir, generator)
}

#[test]
fn test_pipeline_generates_expected_code() {
    let (_tmp, generator) = setup();

    let summary = generator.run().unwrap();
    assert_eq!(summary.fields, 3);
    assert_eq!(summary.entities, 2);

    let content = std::fs::read_to_string(&generator.config().target_path).unwrap();

    // declarations and docs, in spec order
    let artist = content.find("pub struct ArtistName(pub String);").unwrap();
    let barcode = content.find("pub struct Barcode(pub String);").unwrap();
    let duration = content.find("pub struct Duration(pub u32);").unwrap();
    assert!(artist < barcode && barcode < duration);
    assert!(content.contains("/// The barcode of a release."));

    // dispatch arms for every mapping entry
    assert!(content.contains("\"Release\" => Ok(\"artist\"),"));
    assert!(content.contains("\"Recording\" => Ok(\"artist\"),"));
    assert!(content.contains("\"Release\" => Ok(\"barcode\"),"));
    assert!(content.contains("\"Recording\" => Ok(\"dur\"),"));

    // unmapped resources fall through to the mismatch error
    assert!(content.contains("other => Err(SearchFieldError::WrongSearchField {"));
    assert!(content.contains("field: \"Duration\","));

    // grouping modules in first-seen order, with exact re-exports
    let release_mod = content.find("pub mod release {").unwrap();
    let recording_mod = content.find("pub mod recording {").unwrap();
    assert!(release_mod < recording_mod);
    let release_body = &content[release_mod..recording_mod];
    assert!(release_body.contains("pub use super::ArtistName;"));
    assert!(release_body.contains("pub use super::Barcode;"));
    assert!(!release_body.contains("pub use super::Duration;"));

    // everything outside the section is untouched
    assert!(content.starts_with("//! The fields that can be used in queries."));
    assert!(content.contains("fn unrelated() {}"));
    assert!(!content.contains("stale content"));
}

#[test]
fn test_pipeline_roundtrip_matches_fresh_emission() {
    let (_tmp, generator) = setup();

    generator.run().unwrap();

    let fields = SpecLoader::new().load_str(SPEC).unwrap();
    let emitted = CodeEmitter::new().emit(&fields);
    let content = std::fs::read_to_string(&generator.config().target_path).unwrap();
    let extracted = FilePatcher::new()
        .extract_section(&content, "search_fields")
        .unwrap();

    assert_eq!(extracted, emitted.text);
}

#[test]
fn test_pipeline_is_idempotent() {
    let (_tmp, generator) = setup();

    generator.run().unwrap();
    let first = std::fs::read_to_string(&generator.config().target_path).unwrap();
    generator.run().unwrap();
    let second = std::fs::read_to_string(&generator.config().target_path).unwrap();

    assert_eq!(first, second);
    assert_eq!(generator.check().unwrap(), CheckOutcome::Clean);
}

#[test]
fn test_cli_execute_runs_pipeline() {
    let (_tmp, generator) = setup();
    let config = generator.config();

    let code = fieldgen_cli::execute(fieldgen_cli::cli::Cli {
        spec: Some(config.spec_path.clone()),
        target: Some(config.target_path.clone()),
        section: None,
        check: false,
        verbose: false,
        quiet: true,
    });

    assert_eq!(code, 0);
    let content = std::fs::read_to_string(&config.target_path).unwrap();
    assert!(content.contains("pub struct ArtistName(pub String);"));
}
