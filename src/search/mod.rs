//! Glossary Search Module
//!
//! The core component responsible for answering glossary lookups.
//!
//! ## Overview
//! This module implements the read side of the service. It bridges the HTTP
//! API layer with the external full-text search engine: requests become
//! engine query bodies, raw hits become client-facing records.
//!
//! ## Responsibilities
//! - **Field taxonomy**: Declaring which entry fields are searchable and how
//!   each sortable field maps onto an engine sort key.
//! - **Query construction**: Rendering word, field, full-listing, suggestion
//!   and completion requests, including pagination cursors.
//! - **Result compilation**: Attaching instance counts and resume tokens,
//!   then re-ranking each page by corpus frequency.
//! - **Suggestion merging**: Folding per-field suggester output into flat,
//!   ranked, de-duplicated candidate lists.
//!
//! ## Submodules
//! - **`fields`**: Static field classification table.
//! - **`query`**: Engine query body construction.
//! - **`results`**: Hit compilation and in-page re-ranking.
//! - **`suggest`**: Suggestion and completion merging.
//! - **`service`**: Ties queries, store and compilation together.
//! - **`handlers`**: HTTP request handlers for the Axum web server.
//! - **`types`**: Request options and reply shapes.

pub mod fields;
pub mod handlers;
pub mod query;
pub mod results;
pub mod service;
pub mod suggest;
pub mod types;
