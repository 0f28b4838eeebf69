//! Error types for search-field generation

use thiserror::Error;

/// Errors that can occur while loading a spec, emitting code, or patching
/// the target file.
///
/// Every variant is fatal to the run: there is no retry or partial output,
/// and nothing is written to the target file once an error has surfaced.
#[derive(Debug, Error)]
pub enum FieldgenError {
    /// The spec is structurally invalid for one field
    #[error("invalid spec for field `{field}`: {message}")]
    Config {
        /// Name of the offending field entry
        field: String,
        /// What attribute is missing or malformed
        message: String,
    },

    /// The spec document is not valid JSON
    #[error("spec is not valid JSON: {0}")]
    Parse(#[from] serde_json::Error),

    /// A sentinel line for the requested section is absent from the target
    #[error("marker `{marker}` not found in target file")]
    MarkerNotFound {
        /// The exact marker line that was expected
        marker: String,
    },

    /// A sentinel line appears more than once, or the end marker precedes
    /// the begin marker
    #[error("marker `{marker}` is ambiguous in target file: {message}")]
    MarkerAmbiguous {
        /// The offending marker line
        marker: String,
        /// Why the section could not be located
        message: String,
    },

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}
