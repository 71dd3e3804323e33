use serde::Deserialize;
use serde_json::{Map, Value};

/// Top-level shape of a glossary source file.
///
/// `entries` and `instances` are pulled out for processing; every other
/// top-level field stays in `extra`, so the base fields (`project`, `lang`)
/// can be copied verbatim onto each flat entry.
#[derive(Debug, Deserialize)]
pub struct GlossaryDocument {
    #[serde(default)]
    pub entries: Vec<Map<String, Value>>,
    #[serde(default)]
    pub instances: Map<String, Value>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Target type for a copied field value.
///
/// Most glossary data is indexed as strings, but some fields (counts) must be
/// converted so the API returns proper numbers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldType {
    Str,
    Int,
}

/// How a single field is pulled out of a source entry.
///
/// A bare name implies string type; `Typed` overrides it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FieldSpec {
    Named(&'static str),
    Typed(&'static str, FieldType),
}

impl FieldSpec {
    pub fn name_and_type(&self) -> (&'static str, FieldType) {
        match self {
            FieldSpec::Named(name) => (name, FieldType::Str),
            FieldSpec::Typed(name, field_type) => (name, *field_type),
        }
    }
}

/// Field tables driving the flattener.
#[derive(Debug, Clone)]
pub struct FlattenConfig {
    /// Top-level document fields copied verbatim onto every flat entry.
    pub base_fields: &'static [&'static str],
    /// Scalar entry fields copied (and cast) directly.
    pub direct_fields: &'static [FieldSpec],
    /// Nested collections, as (group, inner field spec) pairs. Each pair
    /// becomes a `{group}_{field}` list on the flat entry.
    pub indirect_fields: &'static [(&'static str, FieldSpec)],
}

impl Default for FlattenConfig {
    fn default() -> Self {
        Self {
            base_fields: &["project", "lang"],
            direct_fields: &[
                FieldSpec::Named("gw"),
                FieldSpec::Named("headword"),
                FieldSpec::Named("cf"),
                FieldSpec::Typed("icount", FieldType::Int),
                FieldSpec::Named("id"),
            ],
            indirect_fields: &[
                ("senses", FieldSpec::Named("mng")),
                ("forms", FieldSpec::Named("n")),
                ("norms", FieldSpec::Named("n")),
                ("periods", FieldSpec::Named("p")),
            ],
        }
    }
}
