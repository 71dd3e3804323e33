//! Index Definition
//!
//! Settings and field mappings applied when the glossary index is created.
//! Transliterated fields run through a custom analyzer so the non-ASCII
//! conventions of the corpus stay searchable from a plain keyboard.

use serde_json::{json, Map, Value};

/// Analyzer applied to transliteration fields.
pub const ANALYZER_NAME: &str = "transliteration_analyzer";

/// Char filter folding transliteration marks onto ASCII sequences.
pub const CHAR_FILTER_NAME: &str = "transliteration_to_ascii";

/// Plugin providing the `icu_collation_keyword` field type used for sorting.
pub const ICU_PLUGIN: &str = "analysis-icu";

/// Character rewrites applied before tokenization. Special consonants fold
/// onto digraphs, accented vowels onto the vowel plus its numeric index, and
/// subscript digits onto plain digits.
const CHAR_MAPPINGS: &[(&str, &str)] = &[
    ("ḫ", "h"),
    ("ŋ", "j"),
    ("ṣ", "s,"),
    ("š", "sz"),
    ("ṭ", "t,"),
    ("á", "a2"),
    ("à", "a3"),
    ("â", "a"),
    ("ā", "a"),
    ("é", "e2"),
    ("è", "e3"),
    ("ê", "e"),
    ("ē", "e"),
    ("í", "i2"),
    ("ì", "i3"),
    ("î", "i"),
    ("ī", "i"),
    ("ú", "u2"),
    ("ù", "u3"),
    ("û", "u"),
    ("ū", "u"),
    ("₀", "0"),
    ("₁", "1"),
    ("₂", "2"),
    ("₃", "3"),
    ("₄", "4"),
    ("₅", "5"),
    ("₆", "6"),
    ("₇", "7"),
    ("₈", "8"),
    ("₉", "9"),
];

/// Builds the creation payload for the glossary index.
///
/// Field mappings:
/// 1. `cf` is analyzed text with a `cf.sort` subfield using locale-aware
///    collation, which the search layer targets for sorted queries.
/// 2. `forms_n` and `norms_n` carry the same analyzer; they hold the same
///    transliteration conventions.
/// 3. `completions` is a completion field fed at upload time.
///
/// Everything else is left to dynamic mapping, which gives plain text fields
/// their `.keyword` subfield.
pub fn glossary_index_settings() -> Value {
    let mappings: Vec<String> = CHAR_MAPPINGS
        .iter()
        .map(|(from, to)| format!("{from} => {to}"))
        .collect();

    let mut char_filter = Map::new();
    char_filter.insert(
        CHAR_FILTER_NAME.to_string(),
        json!({
            "type": "mapping",
            "mappings": mappings,
        }),
    );

    let mut analyzer = Map::new();
    analyzer.insert(
        ANALYZER_NAME.to_string(),
        json!({
            // The standard tokenizer strips the "," and "." that some
            // substitution sequences produce; whitespace keeps them.
            "tokenizer": "whitespace",
            "filter": ["lowercase"],
            "char_filter": [CHAR_FILTER_NAME],
        }),
    );

    let mut properties = Map::new();
    properties.insert(
        "cf".to_string(),
        json!({
            "type": "text",
            "analyzer": ANALYZER_NAME,
            "fields": {
                "sort": {"type": "icu_collation_keyword"}
            }
        }),
    );
    for field in ["forms_n", "norms_n"] {
        properties.insert(
            field.to_string(),
            json!({"type": "text", "analyzer": ANALYZER_NAME}),
        );
    }
    properties.insert("completions".to_string(), json!({"type": "completion"}));

    json!({
        "settings": {
            "analysis": {
                "char_filter": char_filter,
                "analyzer": analyzer,
            }
        },
        "mappings": {
            "properties": properties,
        }
    })
}
