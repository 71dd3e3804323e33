//! Glossary Ingestion Pipeline
//!
//! Turns nested glossary JSON exports into flat documents the search engine
//! can index one by one.
//!
//! ## Workflow
//! 1. **Flatten**: Extract the direct fields of every entry, flatten the
//!    nested sense/form/norm collections into plain lists, and stamp the
//!    document-wide base fields onto each record.
//! 2. **Link**: Resolve each entry's instance reference against the shared
//!    `instances` map; unresolved references skip the entry and are collected
//!    as warnings rather than aborting the file.
//! 3. **Render**: Emit the engine's bulk action/document line format, either
//!    to a file for manual loading or as an upload body with the synthesized
//!    completion values.
//!
//! ## Submodules
//! - **`glossary`**: Source document model and the field tables.
//! - **`flatten`**: The flattening pass itself.
//! - **`bulk`**: Bulk-file and bulk-request rendering.

pub mod bulk;
pub mod flatten;
pub mod glossary;

#[cfg(test)]
mod tests;
