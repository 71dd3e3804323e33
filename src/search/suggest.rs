//! Suggestion & Completion Merging
//!
//! The engine answers suggestion lookups per suggester, one group per input
//! term. This module flattens those groups into the single ranked candidate
//! list the API returns.

use std::collections::HashSet;

use serde_json::Value;

use crate::store::types::{SuggestOption, SuggestReply};

/// Merges term-suggester output from all searchable fields.
///
/// Every option from every field suggester joins one candidate pool, which
/// is then ordered by the composite key (score, descending corpus frequency,
/// text length). Score and frequency are engine-supplied and may be absent,
/// in which case they rank as zero. Duplicates keep their first (best
/// ranked) occurrence.
pub fn merge_suggestions(reply: &SuggestReply) -> Vec<String> {
    let mut candidates = collect_options(reply);
    candidates.sort_by(|a, b| {
        a.score
            .unwrap_or(0.0)
            .total_cmp(&b.score.unwrap_or(0.0))
            .then_with(|| b.freq.unwrap_or(0).cmp(&a.freq.unwrap_or(0)))
            .then_with(|| a.text.len().cmp(&b.text.len()))
    });

    let mut seen = HashSet::new();
    candidates
        .into_iter()
        .filter(|option| seen.insert(option.text.clone()))
        .map(|option| option.text.clone())
        .collect()
}

/// Orders completion-suggester output by (score, text length, descending
/// instance count) and returns the texts.
///
/// No de-duplication pass: the lookup runs with duplicate suppression
/// engine-side, so texts are already unique.
pub fn merge_completions(reply: &SuggestReply) -> Vec<String> {
    let mut options = collect_options(reply);
    options.sort_by(|a, b| {
        a.score
            .unwrap_or(0.0)
            .total_cmp(&b.score.unwrap_or(0.0))
            .then_with(|| a.text.len().cmp(&b.text.len()))
            .then_with(|| source_instances(b).cmp(&source_instances(a)))
    });

    options.into_iter().map(|option| option.text.clone()).collect()
}

fn collect_options(reply: &SuggestReply) -> Vec<&SuggestOption> {
    reply
        .suggest
        .values()
        .flatten()
        .flat_map(|group| group.options.iter())
        .collect()
}

fn source_instances(option: &SuggestOption) -> usize {
    option
        .source
        .as_ref()
        .and_then(|source| source.get("instances"))
        .and_then(Value::as_array)
        .map(Vec::len)
        .unwrap_or(0)
}
