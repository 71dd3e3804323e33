//! Wire Protocol Types
//!
//! Serde models for the slices of the search engine's REST responses that the
//! service reads. Unknown response fields are ignored on purpose; the engine
//! returns far more than we consume.

use std::collections::BTreeMap;

use serde::Deserialize;
use serde_json::{Map, Value};

/// Cluster health endpoint, relative to the engine base URL.
pub const ENDPOINT_HEALTH: &str = "/_cluster/health";

/// Installed-plugins listing, one JSON row per node/plugin pair.
pub const ENDPOINT_PLUGINS: &str = "/_cat/plugins?format=json";

/// One matching document as returned inside the `hits.hits` array.
///
/// `sort` is only present when the query carried a sort; it holds the raw
/// sort key the engine computed for this document and is what a client must
/// echo back as `search_after` to resume below this hit.
#[derive(Debug, Clone, Deserialize)]
pub struct StoredHit {
    /// The indexed document itself.
    #[serde(rename = "_source", default)]
    pub source: Map<String, Value>,
    /// Sort key for cursor pagination, absent on unsorted queries.
    #[serde(default)]
    pub sort: Option<Vec<Value>>,
}

/// The `hits` envelope of a search response.
#[derive(Debug, Default, Deserialize)]
pub struct HitsEnvelope {
    #[serde(default)]
    pub hits: Vec<StoredHit>,
}

/// Top level of a search response; everything except `hits` is dropped.
#[derive(Debug, Default, Deserialize)]
pub struct SearchReply {
    #[serde(default)]
    pub hits: HitsEnvelope,
}

/// A single alternative produced by a suggester.
///
/// Term suggesters score under `score` and report corpus frequency under
/// `freq`; completion suggesters score under `_score` and attach the matching
/// document as `_source`. One model covers both, with the unused side `None`.
#[derive(Debug, Clone, Deserialize)]
pub struct SuggestOption {
    pub text: String,
    #[serde(default, alias = "_score")]
    pub score: Option<f64>,
    #[serde(default)]
    pub freq: Option<u64>,
    #[serde(default, rename = "_source")]
    pub source: Option<Map<String, Value>>,
}

/// One suggester result group: the analyzed input text plus its options.
#[derive(Debug, Clone, Deserialize)]
pub struct SuggestGroup {
    pub text: String,
    #[serde(default)]
    pub options: Vec<SuggestOption>,
}

/// The `suggest` section of a search response, keyed by suggester name.
///
/// An ordered map keeps merge results stable across runs.
#[derive(Debug, Default, Deserialize)]
pub struct SuggestReply {
    #[serde(default)]
    pub suggest: BTreeMap<String, Vec<SuggestGroup>>,
}

/// Reduced view of `/_cluster/health`.
#[derive(Debug, Deserialize)]
pub struct ClusterHealth {
    pub status: String,
}

/// One row of the `/_cat/plugins` listing.
#[derive(Debug, Deserialize)]
pub struct PluginRow {
    #[serde(default)]
    pub component: String,
}

/// Outcome of a `_bulk` upload; `items` keeps the raw per-action reports so
/// a failure can be surfaced verbatim.
#[derive(Debug, Default, Deserialize)]
pub struct BulkReply {
    #[serde(default)]
    pub errors: bool,
    #[serde(default)]
    pub items: Vec<Value>,
}
