//! CLI layer for fieldgen
//!
//! Thin wrapper over `fieldgen-core`: argument parsing, terminal
//! reporting, and exit codes. All generation semantics live in the core
//! crate; this layer only decides what to run and how to report it.

pub mod cli;
pub mod output;

use anyhow::Context;
use fieldgen_core::{CheckOutcome, Generator, GeneratorConfig};

/// Executes the parsed command and returns the process exit code.
///
/// Exit code 0 means the target was regenerated (or, with `--check`, is
/// already up to date); 1 means a generation error or check drift.
pub fn execute(args: cli::Cli) -> i32 {
    let mut config = GeneratorConfig::default();
    if let Some(spec) = args.spec {
        config.spec_path = spec;
    }
    if let Some(target) = args.target {
        config.target_path = target;
    }
    if let Some(section) = args.section {
        config.section = section;
    }

    let generator = Generator::with_config(config);
    if args.check {
        run_check(&generator)
    } else {
        run_generate(&generator)
    }
}

fn run_generate(generator: &Generator) -> i32 {
    let target = generator.config().target_path.clone();
    let result = generator
        .run()
        .with_context(|| format!("failed to regenerate {}", target.display()));

    match result {
        Ok(summary) => {
            output::print_success(&format!(
                "wrote {} lines for {} fields ({} entities) to {}",
                summary.lines,
                summary.fields,
                summary.entities,
                target.display()
            ));
            0
        }
        Err(e) => {
            output::print_error(&format!("{e:#}"));
            1
        }
    }
}

fn run_check(generator: &Generator) -> i32 {
    let target = generator.config().target_path.clone();
    let result = generator
        .check()
        .with_context(|| format!("failed to check {}", target.display()));

    match result {
        Ok(CheckOutcome::Clean) => {
            output::print_success(&format!("{} is up to date", target.display()));
            0
        }
        Ok(CheckOutcome::Drifted { current, expected }) => {
            output::print_error(&format!(
                "{} is out of date ({} generated lines expected, {} found); run fieldgen",
                target.display(),
                expected.lines().count(),
                current.lines().count()
            ));
            1
        }
        Err(e) => {
            output::print_error(&format!("{e:#}"));
            1
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;
    use tempfile::TempDir;

    const SPEC: &str = r#"{
        "ArtistName": {
            "comment": "Name of the artist.",
            "type": "String",
            "entities": {"Release": "artist"}
        }
    }"#;

    const TARGET: &str = "\
// BEGIN CODEGEN(search_fields)
// END CODEGEN(search_fields)
";

    fn args(spec: &PathBuf, target: &PathBuf, check: bool) -> cli::Cli {
        cli::Cli {
            spec: Some(spec.clone()),
            target: Some(target.clone()),
            section: None,
            check,
            verbose: false,
            quiet: false,
        }
    }

    #[test]
    fn test_execute_generates_and_checks_clean() {
        let temp_dir = TempDir::new().unwrap();
        let spec = temp_dir.path().join("search_fields.json");
        let target = temp_dir.path().join("fields.rs");
        std::fs::write(&spec, SPEC).unwrap();
        std::fs::write(&target, TARGET).unwrap();

        assert_eq!(execute(args(&spec, &target, true)), 1, "drift before generation");
        assert_eq!(execute(args(&spec, &target, false)), 0);
        assert_eq!(execute(args(&spec, &target, true)), 0, "clean after generation");

        let content = std::fs::read_to_string(&target).unwrap();
        assert!(content.contains("pub struct ArtistName(pub String);"));
    }

    #[test]
    fn test_execute_reports_missing_spec() {
        let temp_dir = TempDir::new().unwrap();
        let spec = temp_dir.path().join("missing.json");
        let target = temp_dir.path().join("fields.rs");
        std::fs::write(&target, TARGET).unwrap();

        assert_eq!(execute(args(&spec, &target, false)), 1);
        assert_eq!(std::fs::read_to_string(&target).unwrap(), TARGET);
    }
}
