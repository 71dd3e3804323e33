//! Search Engine Store Module
//!
//! Talks to the external full-text search engine over its REST API.
//!
//! ## Core Concepts
//! - **Protocol**: `types` models the wire shapes we read back (hits, suggesters, health).
//! - **Access**: `StoreClient` executes queries; the `SearchStore` trait is the seam the
//!   search layer depends on, so tests can substitute an in-memory engine.
//! - **Scanning**: Full result sets are drained page by page with `search_after`.
//! - **Administration**: Index lifecycle, bulk uploads, plugin and health checks used by
//!   the ingestion pipeline.

pub mod client;
pub mod index;
pub mod types;
