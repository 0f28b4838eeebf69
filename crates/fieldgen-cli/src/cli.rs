//! Command-line argument definitions

use std::path::PathBuf;

use clap::Parser;

/// Generates search-field boilerplate from a declarative spec and splices
/// it into the marked region of the target file.
#[derive(Debug, Parser)]
#[command(name = "fieldgen")]
#[command(about = "Regenerates the search-field section of the target file from the spec")]
pub struct Cli {
    /// Path to the JSON spec file
    #[arg(long)]
    pub spec: Option<PathBuf>,

    /// Path to the target file containing the marked section
    #[arg(long)]
    pub target: Option<PathBuf>,

    /// Name of the marked section owned by the generator
    #[arg(long)]
    pub section: Option<String>,

    /// Compare the target against fresh output instead of writing; exits
    /// non-zero when the section is out of date
    #[arg(long)]
    pub check: bool,

    /// Enable debug logging
    #[arg(short, long)]
    pub verbose: bool,

    /// Only log errors
    #[arg(short, long, conflicts_with = "verbose")]
    pub quiet: bool,
}
