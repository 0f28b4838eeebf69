#![warn(missing_docs)]

//! Search-field boilerplate generation for fieldgen
//!
//! Generates the per-entity search-field implementations from a single
//! declarative JSON spec and splices them into a marked region of a target
//! source file. One run is one deterministic batch pass: load and validate
//! the spec, emit the code, patch the file.

pub mod emitter;
pub mod error;
pub mod generator;
pub mod models;
pub mod patcher;
pub mod spec_loader;

// Re-export public API
pub use emitter::CodeEmitter;
pub use error::FieldgenError;
pub use generator::{CheckOutcome, GenerationSummary, Generator, GeneratorConfig};
pub use models::{EmittedCode, EntityFieldIndex, FieldSpec};
pub use patcher::FilePatcher;
pub use spec_loader::SpecLoader;
