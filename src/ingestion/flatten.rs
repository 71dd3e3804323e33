//! The flattening pass: one nested glossary entry in, one flat record out.

use serde_json::{json, Map, Value};
use thiserror::Error;

use super::glossary::{FieldType, FlattenConfig, GlossaryDocument};

/// Fatal data errors while flattening a glossary file.
///
/// These indicate malformed upstream data and abort the whole file; a
/// dangling instance reference is not an error (see [`DanglingReference`]).
#[derive(Debug, Error, PartialEq, Eq)]
pub enum FlattenError {
    #[error("glossary document is missing top-level field '{field}'")]
    MissingBaseField { field: &'static str },
    #[error("entry {entry} is missing required field '{field}'")]
    MissingField { entry: String, field: &'static str },
    #[error("entry {entry} has a non-integer value for '{field}': {value}")]
    BadCast {
        entry: String,
        field: &'static str,
        value: String,
    },
}

/// A skipped entry: its `xis` reference had no match in the instances map.
///
/// `xis` is empty when the entry carried no usable reference at all.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DanglingReference {
    pub xis: String,
    pub headword: String,
}

/// Result of flattening one document: the flat entries in source order, plus
/// the entries skipped over dangling references.
#[derive(Debug, Default)]
pub struct FlatOutcome {
    pub entries: Vec<Map<String, Value>>,
    pub skipped: Vec<DanglingReference>,
}

enum Flattened {
    Entry(Map<String, Value>),
    Skipped(DanglingReference),
}

/// Flattens every entry of a glossary document.
///
/// Output order matches input order, minus skipped entries. Besides the
/// collected warnings this is a pure function of its input; logging the
/// skips is left to the caller.
pub fn flatten_document(
    doc: &GlossaryDocument,
    config: &FlattenConfig,
) -> Result<FlatOutcome, FlattenError> {
    let base = base_data(doc, config)?;

    let mut outcome = FlatOutcome::default();
    for entry in &doc.entries {
        match flatten_entry(entry, &doc.instances, &base, config)? {
            Flattened::Entry(flat) => outcome.entries.push(flat),
            Flattened::Skipped(reference) => outcome.skipped.push(reference),
        }
    }
    Ok(outcome)
}

/// The attributes shared by all entries in the glossary.
fn base_data(
    doc: &GlossaryDocument,
    config: &FlattenConfig,
) -> Result<Map<String, Value>, FlattenError> {
    let mut base = Map::new();
    for field in config.base_fields {
        let value = doc
            .extra
            .get(*field)
            .ok_or(FlattenError::MissingBaseField { field })?;
        base.insert((*field).to_string(), value.clone());
    }
    Ok(base)
}

fn flatten_entry(
    entry: &Map<String, Value>,
    instances: &Map<String, Value>,
    base: &Map<String, Value>,
    config: &FlattenConfig,
) -> Result<Flattened, FlattenError> {
    let mut flat = Map::new();

    for spec in config.direct_fields {
        let (name, field_type) = spec.name_and_type();
        let raw = entry.get(name).ok_or_else(|| FlattenError::MissingField {
            entry: entry_label(entry),
            field: name,
        })?;
        flat.insert(name.to_string(), cast_value(raw, field_type, name, entry)?);
    }

    for (group, spec) in config.indirect_fields {
        let (name, field_type) = spec.name_and_type();
        let mut values = Vec::new();
        // A missing group is an empty list, not an error.
        if let Some(Value::Array(items)) = entry.get(*group) {
            for item in items {
                if let Some(raw) = item.get(name) {
                    values.push(cast_value(raw, field_type, name, entry)?);
                }
            }
        }
        flat.insert(format!("{}_{}", group, name), Value::Array(values));
    }

    // Link the occurrence data referred to by the entry. For now this is the
    // top-level reference rather than those of individual senses or norms.
    // Every entry should have a matching instance, so an unresolved reference
    // means the glossary is out of step; the entry is skipped and reported.
    let xis = entry.get("xis").and_then(Value::as_str).unwrap_or_default();
    match instances.get(xis) {
        Some(instance) if !xis.is_empty() => {
            flat.insert("instances".to_string(), instance.clone());
        }
        _ => {
            return Ok(Flattened::Skipped(DanglingReference {
                xis: xis.to_string(),
                headword: entry_label(entry),
            }));
        }
    }

    for (key, value) in base {
        flat.insert(key.clone(), value.clone());
    }

    Ok(Flattened::Entry(flat))
}

fn cast_value(
    raw: &Value,
    to: FieldType,
    field: &'static str,
    entry: &Map<String, Value>,
) -> Result<Value, FlattenError> {
    match to {
        FieldType::Str => Ok(match raw {
            Value::String(text) => Value::String(text.clone()),
            other => Value::String(other.to_string()),
        }),
        FieldType::Int => match raw {
            Value::Number(number) if number.is_i64() || number.is_u64() => Ok(raw.clone()),
            Value::String(text) => match text.trim().parse::<i64>() {
                Ok(number) => Ok(json!(number)),
                Err(_) => Err(bad_cast(entry, field, raw)),
            },
            _ => Err(bad_cast(entry, field, raw)),
        },
    }
}

fn bad_cast(entry: &Map<String, Value>, field: &'static str, raw: &Value) -> FlattenError {
    FlattenError::BadCast {
        entry: entry_label(entry),
        field,
        value: raw.to_string(),
    }
}

/// Best identifier available for an entry in errors and warnings.
fn entry_label(entry: &Map<String, Value>) -> String {
    entry
        .get("headword")
        .or_else(|| entry.get("id"))
        .and_then(Value::as_str)
        .unwrap_or("<unnamed>")
        .to_string()
}
