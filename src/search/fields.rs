//! Field Classification Table
//!
//! Entry fields differ in how the engine indexed them, so both searchability
//! and sort-key construction are driven by a static table rather than by
//! inspecting values. Free-text fields sort through their `.keyword`
//! subfield, collated fields through the locale-aware `.sort` subfield, and
//! plain fields (numbers) sort directly.

use super::types::{Direction, QueryError};

/// Static classification of the glossary entry fields.
#[derive(Debug, Clone)]
pub struct FieldTable {
    /// Fields offered to full-text search and term suggesters.
    searchable: &'static [&'static str],
    /// Analyzed text fields, sortable via the `.keyword` subfield.
    free_text: &'static [&'static str],
    /// Fields with non-ASCII content, sortable via the collated `.sort` subfield.
    collated: &'static [&'static str],
    /// Fields sortable as-is.
    plain: &'static [&'static str],
}

impl Default for FieldTable {
    fn default() -> Self {
        Self {
            searchable: &["gw", "cf", "forms_n", "norms_n", "senses_mng"],
            free_text: &["gw", "headword", "id"],
            collated: &["cf"],
            plain: &["icount"],
        }
    }
}

impl FieldTable {
    pub fn searchable(&self) -> &[&'static str] {
        self.searchable
    }

    pub fn is_searchable(&self, field: &str) -> bool {
        self.searchable.contains(&field)
    }

    /// Builds the engine sort key for a field and direction.
    ///
    /// The key is the field name plus the suffix its classification demands,
    /// with a leading `-` marking descending order. Fields outside the table
    /// are rejected; sorting on an unclassified field would fail inside the
    /// engine with a much less helpful error.
    pub fn sort_key(&self, field: &str, direction: Direction) -> Result<String, QueryError> {
        let suffix = if self.collated.contains(&field) {
            ".sort"
        } else if self.free_text.contains(&field) {
            ".keyword"
        } else if self.plain.contains(&field) {
            ""
        } else {
            return Err(QueryError::UnknownSortField(field.to_string()));
        };
        let sign = match direction {
            Direction::Asc => "",
            Direction::Desc => "-",
        };
        Ok(format!("{sign}{field}{suffix}"))
    }
}
