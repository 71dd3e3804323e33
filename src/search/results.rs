//! Result Compilation
//!
//! Turns raw engine hits into the records returned to clients.

use std::cmp::Reverse;

use serde_json::{json, Map, Value};

use crate::store::types::StoredHit;

/// Record key carrying the serialized resume cursor.
pub const SORT_TOKEN_KEY: &str = "sort";

/// Record key carrying the number of linked instances.
pub const INSTANCES_COUNT_KEY: &str = "instances_count";

/// Compiles one batch of hits into client records.
///
/// Flow:
/// 1. Every stored field is kept as-is.
/// 2. `instances_count` is added so clients can show corpus frequency
///    without shipping the full instance list logic.
/// 3. When the engine attached a sort key, it is serialized under `sort`;
///    passing that token back as `after` resumes below this record.
/// 4. The batch is re-ranked by descending `instances_count`. This is an
///    in-page presentation order only; the stable sort keeps the engine
///    order within ties, and the cursors remain valid because they encode
///    the engine sort, not this one.
pub fn compile_hits(hits: Vec<StoredHit>) -> Vec<Map<String, Value>> {
    let mut records: Vec<Map<String, Value>> = hits.into_iter().map(compile_hit).collect();
    records.sort_by_key(|record| Reverse(instances_count(record)));
    records
}

fn compile_hit(hit: StoredHit) -> Map<String, Value> {
    let mut record = hit.source;
    let count = record
        .get("instances")
        .and_then(Value::as_array)
        .map(Vec::len)
        .unwrap_or(0);
    record.insert(INSTANCES_COUNT_KEY.to_string(), json!(count));
    if let Some(key) = hit.sort {
        let token = Value::Array(key).to_string();
        record.insert(SORT_TOKEN_KEY.to_string(), Value::String(token));
    }
    record
}

fn instances_count(record: &Map<String, Value>) -> u64 {
    record
        .get(INSTANCES_COUNT_KEY)
        .and_then(Value::as_u64)
        .unwrap_or(0)
}
