//! Spec loading and validation
//!
//! Parses the raw JSON spec into an ordered, validated list of [`FieldSpec`]
//! entries. The document is a mapping from field name to an object with
//! `comment`, `type` and `entities` attributes; the output list preserves
//! the textual order of the document.
//!
//! Parsing goes through hand-written serde visitors instead of collecting
//! into a map: an unordered map would lose the textual order that fixes the
//! generated code layout, and would silently swallow duplicate keys that
//! the loader must reject.

use std::collections::BTreeSet;
use std::fmt;
use std::path::Path;

use serde::de::{self, Deserializer, IgnoredAny, MapAccess, SeqAccess, Visitor};
use serde::Deserialize;
use serde_json::Value;
use tracing::debug;

use crate::error::FieldgenError;
use crate::models::FieldSpec;

/// Loads and validates search-field specs.
#[derive(Debug, Clone, Default)]
pub struct SpecLoader;

impl SpecLoader {
    /// Creates a new SpecLoader.
    pub fn new() -> Self {
        Self
    }

    /// Reads and validates the spec file at `path`.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read, is not valid JSON, or
    /// fails validation.
    pub fn load_file(&self, path: &Path) -> Result<Vec<FieldSpec>, FieldgenError> {
        let text = std::fs::read_to_string(path)?;
        self.load_str(&text)
    }

    /// Parses and validates raw spec text.
    ///
    /// # Errors
    ///
    /// Returns [`FieldgenError::Parse`] when the document is not valid
    /// JSON, and [`FieldgenError::Config`] naming the offending field when
    /// a required attribute is missing or malformed, an entity maps to a
    /// non-string value, or a key is duplicated.
    pub fn load_str(&self, text: &str) -> Result<Vec<FieldSpec>, FieldgenError> {
        let raw: RawDocument = serde_json::from_str(text)?;

        let mut seen = BTreeSet::new();
        let mut fields = Vec::with_capacity(raw.0.len());
        for (name, raw_field) in raw.0 {
            if !seen.insert(name.clone()) {
                return Err(FieldgenError::Config {
                    field: name,
                    message: "duplicate field name".to_string(),
                });
            }
            fields.push(validate_field(name, raw_field)?);
        }

        debug!("loaded {} field specs", fields.len());
        Ok(fields)
    }
}

/// Turns one raw field entry into a validated [`FieldSpec`].
fn validate_field(name: String, raw: RawField) -> Result<FieldSpec, FieldgenError> {
    let config_err = |message: &str| FieldgenError::Config {
        field: name.clone(),
        message: message.to_string(),
    };

    if !raw.shape_ok {
        return Err(config_err("field spec must be an object"));
    }

    let comment = match raw.comment {
        Some(Value::String(s)) => s,
        Some(_) => return Err(config_err("`comment` must be a string")),
        None => return Err(config_err("missing required attribute `comment`")),
    };

    let value_type = match raw.value_type {
        Some(Value::String(s)) => s,
        Some(_) => return Err(config_err("`type` must be a string")),
        None => return Err(config_err("missing required attribute `type`")),
    };

    let pairs = match raw.entities {
        Some(RawEntities::Map(pairs)) => pairs,
        Some(RawEntities::Invalid) => return Err(config_err("`entities` must be a mapping")),
        None => return Err(config_err("missing required attribute `entities`")),
    };

    let mut seen = BTreeSet::new();
    let mut entity_mapping = Vec::with_capacity(pairs.len());
    for (entity, value) in pairs {
        if !seen.insert(entity.clone()) {
            return Err(config_err(&format!("duplicate entity key `{entity}`")));
        }
        match value {
            Value::String(key) => entity_mapping.push((entity, key)),
            _ => {
                return Err(config_err(&format!(
                    "entity `{entity}` must map to a string search key"
                )))
            }
        }
    }

    Ok(FieldSpec {
        name,
        value_type,
        comment,
        entity_mapping,
    })
}

/// The whole spec document, as ordered (field name, raw entry) pairs.
struct RawDocument(Vec<(String, RawField)>);

impl<'de> Deserialize<'de> for RawDocument {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        struct DocVisitor;

        impl<'de> Visitor<'de> for DocVisitor {
            type Value = RawDocument;

            fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "a mapping from field name to field spec")
            }

            fn visit_map<A>(self, mut map: A) -> Result<Self::Value, A::Error>
            where
                A: MapAccess<'de>,
            {
                let mut entries = Vec::new();
                while let Some(name) = map.next_key::<String>()? {
                    let field = map.next_value::<RawField>()?;
                    entries.push((name, field));
                }
                Ok(RawDocument(entries))
            }
        }

        deserializer.deserialize_map(DocVisitor)
    }
}

/// One field entry before validation.
///
/// All attributes are optional and loosely typed here so that missing or
/// malformed ones can be reported as config errors carrying the field name
/// instead of bare parse errors.
struct RawField {
    shape_ok: bool,
    comment: Option<Value>,
    value_type: Option<Value>,
    entities: Option<RawEntities>,
}

impl RawField {
    fn invalid_shape() -> Self {
        Self {
            shape_ok: false,
            comment: None,
            value_type: None,
            entities: None,
        }
    }
}

impl<'de> Deserialize<'de> for RawField {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        struct FieldVisitor;

        impl<'de> Visitor<'de> for FieldVisitor {
            type Value = RawField;

            fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "a field spec object")
            }

            fn visit_map<A>(self, mut map: A) -> Result<Self::Value, A::Error>
            where
                A: MapAccess<'de>,
            {
                let mut raw = RawField {
                    shape_ok: true,
                    comment: None,
                    value_type: None,
                    entities: None,
                };
                while let Some(key) = map.next_key::<String>()? {
                    match key.as_str() {
                        "comment" => raw.comment = Some(map.next_value()?),
                        "type" => raw.value_type = Some(map.next_value()?),
                        "entities" => raw.entities = Some(map.next_value()?),
                        _ => {
                            map.next_value::<IgnoredAny>()?;
                        }
                    }
                }
                Ok(raw)
            }

            fn visit_bool<E>(self, _: bool) -> Result<Self::Value, E>
            where
                E: de::Error,
            {
                Ok(RawField::invalid_shape())
            }

            fn visit_i64<E>(self, _: i64) -> Result<Self::Value, E>
            where
                E: de::Error,
            {
                Ok(RawField::invalid_shape())
            }

            fn visit_u64<E>(self, _: u64) -> Result<Self::Value, E>
            where
                E: de::Error,
            {
                Ok(RawField::invalid_shape())
            }

            fn visit_f64<E>(self, _: f64) -> Result<Self::Value, E>
            where
                E: de::Error,
            {
                Ok(RawField::invalid_shape())
            }

            fn visit_str<E>(self, _: &str) -> Result<Self::Value, E>
            where
                E: de::Error,
            {
                Ok(RawField::invalid_shape())
            }

            fn visit_unit<E>(self) -> Result<Self::Value, E>
            where
                E: de::Error,
            {
                Ok(RawField::invalid_shape())
            }

            fn visit_seq<A>(self, mut seq: A) -> Result<Self::Value, A::Error>
            where
                A: SeqAccess<'de>,
            {
                while seq.next_element::<IgnoredAny>()?.is_some() {}
                Ok(RawField::invalid_shape())
            }
        }

        deserializer.deserialize_any(FieldVisitor)
    }
}

/// The `entities` attribute before validation: either ordered pairs, or a
/// marker that the attribute was not a mapping at all.
enum RawEntities {
    Map(Vec<(String, Value)>),
    Invalid,
}

impl<'de> Deserialize<'de> for RawEntities {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        struct EntitiesVisitor;

        impl<'de> Visitor<'de> for EntitiesVisitor {
            type Value = RawEntities;

            fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "a mapping from entity name to search key")
            }

            fn visit_map<A>(self, mut map: A) -> Result<Self::Value, A::Error>
            where
                A: MapAccess<'de>,
            {
                let mut pairs = Vec::new();
                while let Some(entry) = map.next_entry::<String, Value>()? {
                    pairs.push(entry);
                }
                Ok(RawEntities::Map(pairs))
            }

            fn visit_bool<E>(self, _: bool) -> Result<Self::Value, E>
            where
                E: de::Error,
            {
                Ok(RawEntities::Invalid)
            }

            fn visit_i64<E>(self, _: i64) -> Result<Self::Value, E>
            where
                E: de::Error,
            {
                Ok(RawEntities::Invalid)
            }

            fn visit_u64<E>(self, _: u64) -> Result<Self::Value, E>
            where
                E: de::Error,
            {
                Ok(RawEntities::Invalid)
            }

            fn visit_f64<E>(self, _: f64) -> Result<Self::Value, E>
            where
                E: de::Error,
            {
                Ok(RawEntities::Invalid)
            }

            fn visit_str<E>(self, _: &str) -> Result<Self::Value, E>
            where
                E: de::Error,
            {
                Ok(RawEntities::Invalid)
            }

            fn visit_unit<E>(self) -> Result<Self::Value, E>
            where
                E: de::Error,
            {
                Ok(RawEntities::Invalid)
            }

            fn visit_seq<A>(self, mut seq: A) -> Result<Self::Value, A::Error>
            where
                A: SeqAccess<'de>,
            {
                while seq.next_element::<IgnoredAny>()?.is_some() {}
                Ok(RawEntities::Invalid)
            }
        }

        deserializer.deserialize_any(EntitiesVisitor)
    }
}
