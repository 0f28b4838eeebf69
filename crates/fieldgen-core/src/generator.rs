//! Generation pipeline orchestration
//!
//! Ties the loader, emitter and patcher together into the single batch
//! pass: load the spec, emit the code, patch the target file. Each run is
//! a fresh, deterministic transformation; nothing is held across
//! invocations.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};
use tracing::info;

use crate::{
    emitter::CodeEmitter, error::FieldgenError, models::EmittedCode, patcher::FilePatcher,
    spec_loader::SpecLoader,
};

/// Configuration for one generation run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GeneratorConfig {
    /// Path to the JSON spec file
    pub spec_path: PathBuf,
    /// Path to the target file containing the marked section
    pub target_path: PathBuf,
    /// Name of the marked section owned by the generator
    pub section: String,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            spec_path: PathBuf::from("search_fields.json"),
            target_path: PathBuf::from("src/search/fields.rs"),
            section: "search_fields".to_string(),
        }
    }
}

/// What one successful run produced.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GenerationSummary {
    /// Number of field specs loaded
    pub fields: usize,
    /// Number of distinct entities across all mappings
    pub entities: usize,
    /// Number of generated lines spliced into the target
    pub lines: usize,
}

/// Outcome of a check run comparing the target against fresh output.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CheckOutcome {
    /// The target section equals freshly emitted code
    Clean,
    /// The target section differs from freshly emitted code
    Drifted {
        /// What the section currently contains
        current: String,
        /// What the generator would emit
        expected: String,
    },
}

/// Runs the load -> emit -> patch pipeline.
pub struct Generator {
    config: GeneratorConfig,
    loader: SpecLoader,
    emitter: CodeEmitter,
    patcher: FilePatcher,
}

impl Generator {
    /// Creates a generator with the default fixed paths.
    pub fn new() -> Self {
        Self::with_config(GeneratorConfig::default())
    }

    /// Creates a generator with custom paths.
    pub fn with_config(config: GeneratorConfig) -> Self {
        Self {
            config,
            loader: SpecLoader::new(),
            emitter: CodeEmitter::new(),
            patcher: FilePatcher::new(),
        }
    }

    /// Gets the current configuration.
    pub fn config(&self) -> &GeneratorConfig {
        &self.config
    }

    /// Loads the spec and emits code without touching the target file.
    ///
    /// # Errors
    ///
    /// Returns spec loading and validation errors.
    pub fn emit(&self) -> Result<EmittedCode, FieldgenError> {
        let fields = self.loader.load_file(&self.config.spec_path)?;
        Ok(self.emitter.emit(&fields))
    }

    /// Runs the whole pipeline: load spec, emit code, patch target.
    ///
    /// The target file is written exactly once, after the full new content
    /// has been computed; any error leaves it untouched.
    ///
    /// # Errors
    ///
    /// Returns spec errors before the target is read, and marker or IO
    /// errors from patching.
    pub fn run(&self) -> Result<GenerationSummary, FieldgenError> {
        let emitted = self.emit()?;
        self.patcher
            .patch_file(&self.config.target_path, &self.config.section, &emitted.text)?;

        let summary = GenerationSummary {
            fields: count_fields(&emitted),
            entities: emitted.index.len(),
            lines: emitted.text.lines().count(),
        };
        info!(
            "generated {} lines for {} fields into {}",
            summary.lines,
            summary.fields,
            self.config.target_path.display()
        );
        Ok(summary)
    }

    /// Compares the target's current section against freshly emitted code
    /// without writing anything.
    ///
    /// # Errors
    ///
    /// Returns spec errors, marker errors, and IO errors from reading the
    /// target.
    pub fn check(&self) -> Result<CheckOutcome, FieldgenError> {
        let emitted = self.emit()?;
        let content = std::fs::read_to_string(&self.config.target_path)?;
        let current = self
            .patcher
            .extract_section(&content, &self.config.section)?;

        if current == emitted.text {
            Ok(CheckOutcome::Clean)
        } else {
            Ok(CheckOutcome::Drifted {
                current,
                expected: emitted.text,
            })
        }
    }
}

impl Default for Generator {
    fn default() -> Self {
        Self::new()
    }
}

/// Number of field blocks in the emitted code.
///
/// The emitter does not report this directly; counting declarations keeps
/// the summary derivable from the emitted text alone.
fn count_fields(emitted: &EmittedCode) -> usize {
    emitted
        .text
        .lines()
        .filter(|line| line.starts_with("pub struct "))
        .count()
}
