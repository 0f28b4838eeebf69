//! Marker-delimited file patching
//!
//! Locates a named section between two sentinel lines in the target file
//! and replaces it wholesale, leaving every line outside the section
//! untouched. Section replacement is pure text surgery; the file write
//! happens only after the full new content has been computed in memory, so
//! a failed run leaves the target either fully updated or fully untouched.
//!
//! Missing or duplicated markers are hard errors returned to the caller.
//! They mean the target file's structure no longer matches what the
//! generator expects, and nothing is written.

use std::path::Path;

use tracing::debug;

use crate::error::FieldgenError;

/// Replaces marker-delimited sections in target files.
#[derive(Debug, Clone, Default)]
pub struct FilePatcher;

impl FilePatcher {
    /// Creates a new FilePatcher.
    pub fn new() -> Self {
        Self
    }

    /// The begin sentinel line for `section`.
    pub fn begin_marker(section: &str) -> String {
        format!("// BEGIN CODEGEN({section})")
    }

    /// The end sentinel line for `section`.
    pub fn end_marker(section: &str) -> String {
        format!("// END CODEGEN({section})")
    }

    /// Returns `content` with the named section replaced by the markers
    /// wrapping `new_content`.
    ///
    /// # Errors
    ///
    /// Returns an error if either marker is absent, appears more than
    /// once, or the end marker precedes the begin marker.
    pub fn replace_section(
        &self,
        content: &str,
        section: &str,
        new_content: &str,
    ) -> Result<String, FieldgenError> {
        let begin = Self::begin_marker(section);
        let end = Self::end_marker(section);

        let lines: Vec<&str> = content.lines().collect();
        let begin_idx = locate_marker(&lines, &begin)?;
        let end_idx = locate_marker(&lines, &end)?;
        if end_idx < begin_idx {
            return Err(FieldgenError::MarkerAmbiguous {
                marker: end.clone(),
                message: "end marker precedes begin marker".to_string(),
            });
        }

        let mut out: Vec<&str> = Vec::with_capacity(lines.len());
        out.extend(&lines[..begin_idx]);
        out.push(&begin);
        out.extend(new_content.lines());
        out.push(&end);
        out.extend(&lines[end_idx + 1..]);

        let mut result = out.join("\n");
        result.push('\n');
        Ok(result)
    }

    /// Returns the text strictly between the markers of the named section.
    ///
    /// # Errors
    ///
    /// Same marker errors as [`Self::replace_section`].
    pub fn extract_section(&self, content: &str, section: &str) -> Result<String, FieldgenError> {
        let begin = Self::begin_marker(section);
        let end = Self::end_marker(section);

        let lines: Vec<&str> = content.lines().collect();
        let begin_idx = locate_marker(&lines, &begin)?;
        let end_idx = locate_marker(&lines, &end)?;
        if end_idx < begin_idx {
            return Err(FieldgenError::MarkerAmbiguous {
                marker: end,
                message: "end marker precedes begin marker".to_string(),
            });
        }

        Ok(lines[begin_idx + 1..end_idx].join("\n"))
    }

    /// Patches the named section of the file at `path` with `new_content`.
    ///
    /// The whole updated file content is computed in memory before the
    /// write, then the file is overwritten in one piece.
    ///
    /// # Errors
    ///
    /// Returns marker errors without touching the file, and IO errors from
    /// reading or writing it.
    pub fn patch_file(
        &self,
        path: &Path,
        section: &str,
        new_content: &str,
    ) -> Result<(), FieldgenError> {
        let content = std::fs::read_to_string(path)?;
        let updated = self.replace_section(&content, section, new_content)?;
        std::fs::write(path, updated)?;
        debug!("patched section `{}` in {}", section, path.display());
        Ok(())
    }
}

/// Index of the unique line equal to `marker`.
fn locate_marker(lines: &[&str], marker: &str) -> Result<usize, FieldgenError> {
    let mut positions = lines.iter().enumerate().filter(|(_, line)| **line == marker);

    let first = positions.next().ok_or_else(|| FieldgenError::MarkerNotFound {
        marker: marker.to_string(),
    })?;
    if positions.next().is_some() {
        return Err(FieldgenError::MarkerAmbiguous {
            marker: marker.to_string(),
            message: "marker appears more than once".to_string(),
        });
    }

    Ok(first.0)
}
