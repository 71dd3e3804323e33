//! Glossary Search Facade Library
//!
//! This library crate defines the modules behind the two binaries: the REST
//! server (`main.rs`) and the ingestion CLI (`bin/ingest.rs`).
//!
//! ## Architecture Modules
//! The system is composed of four loosely coupled subsystems:
//!
//! - **`ingestion`**: The offline data pipeline. Flattens nested glossary
//!   documents into independently indexable entries, links them to their
//!   corpus instances, and renders the engine's bulk-load format.
//! - **`search`**: The query layer. Builds engine queries against the field
//!   taxonomy, compiles hits into API records with pagination cursors, and
//!   merges spelling suggestions and completions.
//! - **`store`**: The boundary to the external search engine. Defines the
//!   narrow port the search layer talks through and its HTTP implementation,
//!   plus the index settings the ingestion pipeline installs.
//! - **`config`**: Environment-based configuration for the server binary.

pub mod config;
pub mod ingestion;
pub mod search;
pub mod store;
