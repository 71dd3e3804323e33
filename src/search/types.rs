use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Sort direction accepted on the `dir` query parameter. Anything except
/// `asc`/`desc` is rejected at extraction time.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    #[default]
    Asc,
    Desc,
}

/// Options shared by the word-search and full-listing endpoints.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct SearchOpts {
    pub sort_by: String,
    pub dir: Direction,
    pub count: Option<usize>,
    pub after: Option<String>,
}

impl Default for SearchOpts {
    fn default() -> Self {
        Self {
            sort_by: "gw".to_string(),
            dir: Direction::Asc,
            count: None,
            after: None,
        }
    }
}

/// Options accepted by the suggestion endpoints.
#[derive(Debug, Clone, Deserialize)]
pub struct SuggestParams {
    #[serde(default = "SuggestParams::default_count")]
    pub count: usize,
}

impl SuggestParams {
    fn default_count() -> usize {
        5
    }
}

impl Default for SuggestParams {
    fn default() -> Self {
        Self {
            count: Self::default_count(),
        }
    }
}

/// Combined reply of the merged suggestion endpoint.
#[derive(Debug, PartialEq, Eq, Serialize)]
pub struct SuggestAllReply {
    pub completions: Vec<String>,
    pub suggestions: Vec<String>,
}

/// A request that cannot be turned into an engine query.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum QueryError {
    #[error("field '{0}' is not searchable")]
    UnknownField(String),
    #[error("field '{0}' is not sortable")]
    UnknownSortField(String),
    #[error("expected exactly one field=word pair")]
    FieldArgCount,
}
