//! Code emission for search fields
//!
//! Transforms the ordered field list into generated Rust source: one
//! newtype plus `SearchField` impl per field, followed by one grouping
//! module per entity re-exporting the fields that apply to it.
//!
//! Emission is deterministic: the same field list produces byte-identical
//! text on every run. Field blocks follow spec order, match arms follow
//! mapping order, and grouping modules follow the first-seen order of the
//! [`EntityFieldIndex`].

use std::fmt::Write;

use heck::ToSnakeCase;
use tracing::debug;

use crate::models::{EmittedCode, EntityFieldIndex, FieldSpec};

/// Emits generated search-field source text.
#[derive(Debug, Clone, Default)]
pub struct CodeEmitter;

impl CodeEmitter {
    /// Creates a new CodeEmitter.
    pub fn new() -> Self {
        Self
    }

    /// Generates source text for `fields`, returning it together with the
    /// entity index the grouping modules were derived from.
    pub fn emit(&self, fields: &[FieldSpec]) -> EmittedCode {
        let index = EntityFieldIndex::build(fields);

        let mut blocks: Vec<String> = fields.iter().map(|field| emit_field(field)).collect();
        for (entity, field_names) in index.iter() {
            blocks.push(emit_grouping(entity, field_names));
        }

        debug!(
            "emitted {} fields across {} entities",
            fields.len(),
            index.len()
        );
        EmittedCode {
            text: blocks.join("\n\n"),
            index,
        }
    }
}

/// One field block: doc comment, newtype declaration, `SearchField` impl.
fn emit_field(field: &FieldSpec) -> String {
    let mut out = String::new();

    for line in field.comment.lines() {
        let _ = writeln!(out, "/// {line}");
    }
    let _ = writeln!(out, "pub struct {}(pub {});", field.name, field.value_type);
    out.push('\n');

    let _ = writeln!(out, "impl SearchField for {} {{", field.name);
    let _ = writeln!(out, "    type Value = {};", field.value_type);
    out.push('\n');

    // Dispatch on the resource's static name. Matching is exact and
    // case-sensitive; any resource outside the mapping falls through to
    // the wrong-search-field error.
    out.push_str(
        "    fn name_for(&self, resource: ResourceKind) \
         -> Result<&'static str, SearchFieldError> {\n",
    );
    out.push_str("        match resource.name() {\n");
    for (entity, key) in &field.entity_mapping {
        let _ = writeln!(out, "            {entity:?} => Ok({key:?}),");
    }
    out.push_str("            other => Err(SearchFieldError::WrongSearchField {\n");
    out.push_str("                resource: other.to_string(),\n");
    let _ = writeln!(out, "                field: {:?},", field.name);
    out.push_str("            }),\n");
    out.push_str("        }\n");
    out.push_str("    }\n");
    out.push('\n');

    out.push_str("    fn value(&self) -> String {\n");
    out.push_str("        self.0.to_string()\n");
    out.push_str("    }\n");
    out.push('\n');

    out.push_str(
        "    fn serialize_for(&self, resource: ResourceKind) \
         -> Result<String, SearchFieldError> {\n",
    );
    out.push_str("        Ok(format!(\"{}:{}\", self.name_for(resource)?, self.value()))\n");
    out.push_str("    }\n");
    out.push('}');

    out
}

/// One grouping module re-exporting the fields valid for `entity`.
fn emit_grouping(entity: &str, field_names: &[String]) -> String {
    let mut out = String::new();

    let _ = writeln!(out, "/// Search fields applicable to `{entity}`.");
    let _ = writeln!(out, "pub mod {} {{", entity.to_snake_case());
    for name in field_names {
        let _ = writeln!(out, "    pub use super::{name};");
    }
    out.push('}');

    out
}
