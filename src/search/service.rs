//! Glossary Search Service
//!
//! Ties the query builder, the store and the result compiler together. One
//! instance is shared by all HTTP handlers.

use serde_json::{Map, Value};
use thiserror::Error;
use tracing::debug;

use crate::store::client::{SearchStore, StoreError};
use crate::store::types::StoredHit;

use super::fields::FieldTable;
use super::query::{EngineQuery, ExecMode, QueryBuilder};
use super::results::compile_hits;
use super::suggest::{merge_completions, merge_suggestions};
use super::types::{QueryError, SearchOpts, SuggestAllReply};

/// Failure of one lookup: either the request itself was unusable or the
/// engine call failed.
#[derive(Debug, Error)]
pub enum ServiceError {
    #[error(transparent)]
    Query(#[from] QueryError),
    #[error(transparent)]
    Store(#[from] StoreError),
}

/// The read-side service facade.
pub struct GlossarySearch {
    store: Box<dyn SearchStore>,
    queries: QueryBuilder,
}

impl GlossarySearch {
    pub fn new(store: Box<dyn SearchStore>) -> Self {
        Self {
            store,
            queries: QueryBuilder::new(FieldTable::default()),
        }
    }

    /// General search across all searchable fields. Multi-word phrases
    /// return the intersection of the per-word matches.
    pub async fn run(
        &self,
        phrase: &str,
        opts: &SearchOpts,
    ) -> Result<Vec<Map<String, Value>>, ServiceError> {
        debug!("general search for '{phrase}'");
        let query = self.queries.general(phrase, opts)?;
        Ok(compile_hits(self.execute(query).await?))
    }

    /// Exact single-field search, always returning the full result set.
    pub async fn run_field(
        &self,
        field: &str,
        word: &str,
    ) -> Result<Vec<Map<String, Value>>, ServiceError> {
        debug!("field search {field}={word}");
        let query = self.queries.single_field(field, word)?;
        Ok(compile_hits(self.execute(query).await?))
    }

    /// Full glossary listing, paginated through the same options as search.
    pub async fn list_all(
        &self,
        opts: &SearchOpts,
    ) -> Result<Vec<Map<String, Value>>, ServiceError> {
        let query = self.queries.list_all(opts)?;
        Ok(compile_hits(self.execute(query).await?))
    }

    /// Spelling suggestions near the given word, merged across fields.
    pub async fn suggest(&self, word: &str, size: usize) -> Result<Vec<String>, ServiceError> {
        let reply = self.store.suggest(self.queries.suggest(word, size)).await?;
        Ok(merge_suggestions(&reply))
    }

    /// Prefix completions of the given word.
    pub async fn complete(&self, word: &str, size: usize) -> Result<Vec<String>, ServiceError> {
        let reply = self.store.suggest(self.queries.complete(word, size)).await?;
        Ok(merge_completions(&reply))
    }

    /// Completions and suggestions in one reply.
    pub async fn suggest_all(
        &self,
        word: &str,
        size: usize,
    ) -> Result<SuggestAllReply, ServiceError> {
        Ok(SuggestAllReply {
            completions: self.complete(word, size).await?,
            suggestions: self.suggest(word, size).await?,
        })
    }

    async fn execute(&self, query: EngineQuery) -> Result<Vec<StoredHit>, ServiceError> {
        let hits = match query.mode {
            ExecMode::Paged => self.store.search(query.body).await?,
            ExecMode::Scan => self.store.scan(query.body).await?,
        };
        Ok(hits)
    }
}
