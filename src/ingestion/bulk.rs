//! Rendering and reading of the engine's bulk-load format.
//!
//! Each flat entry becomes two lines: an action line naming the document id,
//! then the document itself. Files written here can be loaded manually with
//! any engine client; the upload body additionally carries the synthesized
//! `completions` field, which only exists in the index and never in the
//! persisted files.

use std::path::Path;

use serde_json::{json, Map, Value};
use thiserror::Error;

/// Fields whose values are merged into the completion suggester input.
pub const COMPLETION_FIELDS: &[&str] = &["cf", "gw"];

#[derive(Debug, Error)]
pub enum BulkError {
    #[error("entry {0} has no 'id' to index under")]
    MissingId(String),
    #[error("malformed bulk file: {0}")]
    Malformed(String),
    #[error(transparent)]
    Io(#[from] std::io::Error),
    #[error(transparent)]
    Json(#[from] serde_json::Error),
}

/// Writes entries to a bulk-load file, one action/document pair per entry.
pub fn write_bulk_file(path: &Path, entries: &[Map<String, Value>]) -> Result<(), BulkError> {
    std::fs::write(path, render_pairs(entries, &[])?)?;
    Ok(())
}

/// Parses a bulk-load file back into (id, document) pairs.
pub fn read_bulk_file(path: &Path) -> Result<Vec<(String, Map<String, Value>)>, BulkError> {
    let text = std::fs::read_to_string(path)?;
    let mut lines = text.lines().filter(|line| !line.trim().is_empty());

    let mut entries = Vec::new();
    while let Some(action_line) = lines.next() {
        let action: Value = serde_json::from_str(action_line)?;
        let id = match action.pointer("/index/_id").and_then(Value::as_str) {
            Some(id) => id.to_string(),
            None => {
                return Err(BulkError::Malformed(
                    "action line without an index _id".to_string(),
                ))
            }
        };
        let document_line = lines.next().ok_or_else(|| {
            BulkError::Malformed(format!("action for '{}' has no document line", id))
        })?;
        let document: Map<String, Value> = serde_json::from_str(document_line)?;
        entries.push((id, document));
    }
    Ok(entries)
}

/// Renders the upload body for a bulk request.
///
/// Every document gains a `completions` field built from the given source
/// fields; the entries themselves are left untouched.
pub fn bulk_body(
    entries: &[Map<String, Value>],
    completion_fields: &[&str],
) -> Result<String, BulkError> {
    render_pairs(entries, completion_fields)
}

fn render_pairs(
    entries: &[Map<String, Value>],
    completion_fields: &[&str],
) -> Result<String, BulkError> {
    let mut body = String::new();
    for entry in entries {
        let id = entry
            .get("id")
            .and_then(Value::as_str)
            .ok_or_else(|| BulkError::MissingId(entry_label(entry)))?;

        let document = if completion_fields.is_empty() {
            serde_json::to_string(entry)?
        } else {
            let mut document = entry.clone();
            let completions: Vec<Value> = completion_fields
                .iter()
                .filter_map(|field| entry.get(*field).cloned())
                .collect();
            document.insert("completions".to_string(), Value::Array(completions));
            serde_json::to_string(&document)?
        };

        body.push_str(&serde_json::to_string(&json!({"index": {"_id": id}}))?);
        body.push('\n');
        body.push_str(&document);
        body.push('\n');
    }
    Ok(body)
}

fn entry_label(entry: &Map<String, Value>) -> String {
    entry
        .get("headword")
        .and_then(Value::as_str)
        .unwrap_or("<unnamed>")
        .to_string()
}
