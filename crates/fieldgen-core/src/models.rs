//! Core data models for search-field generation

/// One search-field entry from the spec, in validated form.
///
/// Each entry becomes a generated newtype wrapping `value_type`, with one
/// dispatch arm per `entity_mapping` pair.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldSpec {
    /// Name of the generated type; unique across the whole spec
    pub name: String,
    /// Rust type the generated newtype wraps
    pub value_type: String,
    /// Human-readable description, emitted as the doc comment
    pub comment: String,
    /// Ordered entity name -> search-key pairs; may be empty
    pub entity_mapping: Vec<(String, String)>,
}

/// Which fields apply to which entity, in first-seen order.
///
/// Derived from the spec on every run and discarded after emission: the
/// first field that mentions an entity fixes that entity's position, and
/// later fields mentioning the same entity append to its list.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EntityFieldIndex {
    entries: Vec<(String, Vec<String>)>,
}

impl EntityFieldIndex {
    /// Builds the index from an ordered field list.
    pub fn build(fields: &[FieldSpec]) -> Self {
        let mut index = Self::default();
        for field in fields {
            for (entity, _key) in &field.entity_mapping {
                index.insert(entity, &field.name);
            }
        }
        index
    }

    /// Records that `field` applies to `entity`, appending to the entity's
    /// list or creating it at the end of the index on first sight.
    pub fn insert(&mut self, entity: &str, field: &str) {
        match self.entries.iter_mut().find(|(name, _)| name == entity) {
            Some((_, fields)) => fields.push(field.to_string()),
            None => self
                .entries
                .push((entity.to_string(), vec![field.to_string()])),
        }
    }

    /// Field names recorded for `entity`, if any field mentions it.
    pub fn fields_for(&self, entity: &str) -> Option<&[String]> {
        self.entries
            .iter()
            .find(|(name, _)| name == entity)
            .map(|(_, fields)| fields.as_slice())
    }

    /// Iterates entities with their field lists, in first-seen order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &[String])> {
        self.entries
            .iter()
            .map(|(name, fields)| (name.as_str(), fields.as_slice()))
    }

    /// Number of distinct entities in the index.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// True when no field mentioned any entity.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Result of one emission pass: the generated source text plus the
/// entity index it was derived from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EmittedCode {
    /// Generated source text, ready to splice between the markers
    pub text: String,
    /// Entity -> fields index backing the grouping modules
    pub index: EntityFieldIndex,
}
