//! Engine Query Construction
//!
//! Renders the JSON request bodies sent to the search engine. Each public
//! method covers one lookup style; pagination and sorting are attached
//! uniformly so every entry point pages the same way.

use serde_json::{json, Map, Value};

use super::fields::FieldTable;
use super::types::{QueryError, SearchOpts};

/// Hits per page when a cursor is given without an explicit count.
pub const DEFAULT_PAGE_SIZE: usize = 10;

/// Minimum query length for term suggesters, lowered so three-letter corpus
/// words still produce matches.
pub const MIN_SUGGEST_WORD_LENGTH: usize = 3;

/// Name of the completion suggester in request and reply bodies.
pub const COMPLETION_SUGGESTER: &str = "sug_complete";

/// How a query body must be executed against the store.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExecMode {
    /// Single bounded request; the body carries its own `size`.
    Paged,
    /// Drain every hit, preserving engine order.
    Scan,
}

/// A rendered query body plus its execution mode.
#[derive(Debug, Clone)]
pub struct EngineQuery {
    pub body: Value,
    pub mode: ExecMode,
}

/// Builds engine query bodies against a fixed field classification.
#[derive(Debug, Clone, Default)]
pub struct QueryBuilder {
    fields: FieldTable,
}

impl QueryBuilder {
    pub fn new(fields: FieldTable) -> Self {
        Self { fields }
    }

    pub fn fields(&self) -> &FieldTable {
        &self.fields
    }

    /// Builds the general search for a phrase of space-separated words.
    ///
    /// Flow:
    /// 1. Each word becomes its own prefix-style `multi_match` subquery over
    ///    the searchable fields; the engine's multi-word prefix matching is
    ///    not usable here, so words are matched independently.
    /// 2. The subqueries are combined as `bool`/`must`, so a record has to
    ///    match every word somewhere (intersection semantics).
    /// 3. Sorting and pagination are attached from the request options.
    pub fn general(&self, phrase: &str, opts: &SearchOpts) -> Result<EngineQuery, QueryError> {
        let subqueries: Vec<Value> = phrase
            .split_whitespace()
            .map(|word| {
                json!({
                    "multi_match": {
                        "query": word,
                        "fields": self.fields.searchable(),
                        "type": "phrase_prefix",
                    }
                })
            })
            .collect();

        let mut request = Map::new();
        request.insert("query".to_string(), json!({"bool": {"must": subqueries}}));
        let mode = self.customise(&mut request, opts)?;
        Ok(EngineQuery {
            body: Value::Object(request),
            mode,
        })
    }

    /// Builds an exact match of one word against one searchable field. The
    /// full result set is always drained; this lookup has no pagination.
    pub fn single_field(&self, field: &str, word: &str) -> Result<EngineQuery, QueryError> {
        if !self.fields.is_searchable(field) {
            return Err(QueryError::UnknownField(field.to_string()));
        }
        let mut clause = Map::new();
        clause.insert(field.to_string(), json!(word));

        let mut request = Map::new();
        request.insert("query".to_string(), json!({"match": clause}));
        Ok(EngineQuery {
            body: Value::Object(request),
            mode: ExecMode::Scan,
        })
    }

    /// Builds the full glossary listing.
    pub fn list_all(&self, opts: &SearchOpts) -> Result<EngineQuery, QueryError> {
        let mut request = Map::new();
        request.insert("query".to_string(), json!({"match_all": {}}));
        let mode = self.customise(&mut request, opts)?;
        Ok(EngineQuery {
            body: Value::Object(request),
            mode,
        })
    }

    /// Builds one term suggester per searchable field; the engine does not
    /// accept multiple fields within a single suggester.
    pub fn suggest(&self, word: &str, size: usize) -> Value {
        let mut suggesters = Map::new();
        for field in self.fields.searchable() {
            suggesters.insert(
                format!("sug_{field}"),
                json!({
                    "text": word,
                    "term": {
                        "field": field,
                        "min_word_length": MIN_SUGGEST_WORD_LENGTH,
                        "size": size,
                    }
                }),
            );
        }
        json!({"suggest": suggesters})
    }

    /// Builds the prefix completion lookup on the dedicated completions
    /// field. Duplicate suppression happens engine-side.
    pub fn complete(&self, word: &str, size: usize) -> Value {
        let mut suggesters = Map::new();
        suggesters.insert(
            COMPLETION_SUGGESTER.to_string(),
            json!({
                "prefix": word,
                "completion": {
                    "field": "completions",
                    "skip_duplicates": true,
                    "size": size,
                }
            }),
        );
        json!({"suggest": suggesters})
    }

    /// Attaches sort and pagination to a query body.
    ///
    /// The three retrieval shapes:
    /// 1. Cursor given: resume strictly after it (`search_after`) and return
    ///    one page, `count` or [`DEFAULT_PAGE_SIZE`] hits. Cursors cannot be
    ///    combined with scanning.
    /// 2. Only a count: one page of that many top hits.
    /// 3. Neither: the caller drains everything with a scan.
    fn customise(
        &self,
        request: &mut Map<String, Value>,
        opts: &SearchOpts,
    ) -> Result<ExecMode, QueryError> {
        let key = self.fields.sort_key(&opts.sort_by, opts.dir)?;
        request.insert("sort".to_string(), json!([sort_clause(&key)]));

        match (&opts.after, opts.count) {
            (Some(cursor), count) => {
                request.insert(
                    "search_after".to_string(),
                    Value::Array(parse_cursor(cursor)),
                );
                request.insert("size".to_string(), json!(count.unwrap_or(DEFAULT_PAGE_SIZE)));
                Ok(ExecMode::Paged)
            }
            (None, Some(count)) => {
                request.insert("size".to_string(), json!(count));
                Ok(ExecMode::Paged)
            }
            (None, None) => Ok(ExecMode::Scan),
        }
    }
}

/// Renders a signed sort key as an engine sort clause: `-name` becomes an
/// explicit descending object, anything else is the plain ascending form.
fn sort_clause(key: &str) -> Value {
    match key.strip_prefix('-') {
        Some(name) => {
            let mut clause = Map::new();
            clause.insert(name.to_string(), json!({"order": "desc"}));
            Value::Object(clause)
        }
        None => Value::String(key.to_string()),
    }
}

/// Interprets a resume cursor as the `search_after` key array.
///
/// Result records carry their key serialized as a JSON array, so that form
/// parses back directly. A bare scalar (a hand-written cursor for a
/// single-key sort) is wrapped; anything unparseable is treated as a plain
/// string key.
fn parse_cursor(cursor: &str) -> Vec<Value> {
    match serde_json::from_str(cursor) {
        Ok(Value::Array(values)) => values,
        Ok(value) => vec![value],
        Err(_) => vec![Value::String(cursor.to_string())],
    }
}
