//! Ingestion Module Tests
//!
//! Validates the flattening pass and the bulk-format rendering.
//!
//! ## Test Scopes
//! - **Field specs**: Tagged name/type resolution.
//! - **Flattening**: Direct copies, casts, nested lists, base fields,
//!   dangling-reference skips, and the fatal data errors.
//! - **Bulk format**: File round-trips and upload-body rendering.

#[cfg(test)]
mod tests {
    use serde_json::{json, Map, Value};

    use crate::ingestion::bulk::{
        bulk_body, read_bulk_file, write_bulk_file, BulkError, COMPLETION_FIELDS,
    };
    use crate::ingestion::flatten::{flatten_document, DanglingReference, FlattenError};
    use crate::ingestion::glossary::{FieldSpec, FieldType, FlattenConfig, GlossaryDocument};

    /// A small glossary in the shape of the real exports: four entries and a
    /// shared instances map.
    fn glossary(entries: Value, instances: Value) -> GlossaryDocument {
        serde_json::from_value(json!({
            "project": "test-corpus",
            "lang": "elx",
            "entries": entries,
            "instances": instances,
        }))
        .expect("fixture should deserialize")
    }

    fn sample_glossary() -> GlossaryDocument {
        glossary(
            json!([
                {
                    "id": "e000001",
                    "headword": "apszi[god]N",
                    "cf": "apszi",
                    "gw": "god",
                    "icount": 3,
                    "xis": "x001",
                    "senses": [{"mng": "god"}],
                    "forms": [{"n": "ap-szi"}, {"n": "ap-szi-isz"}],
                    "norms": [{"n": "apszi"}],
                    "periods": [{"p": "Old Elamite"}]
                },
                {
                    "id": "e000002",
                    "headword": "usan[goddess]N",
                    "cf": "usan",
                    "gw": "goddess",
                    "icount": 2,
                    "xis": "x002",
                    "senses": [{"mng": "goddess"}, {"mng": "evening"}],
                    "forms": [{"n": "u-sa-an"}],
                    "norms": [{"n": "usan"}]
                },
                {
                    "id": "e000003",
                    "headword": "kirir[goddess]N",
                    "cf": "kirir",
                    "gw": "goddess",
                    "icount": 5,
                    "xis": "x003",
                    "senses": [{"mng": "goddess"}],
                    "forms": [{"n": "ki-ri-ir"}],
                    "norms": [{"n": "kirir"}],
                    "periods": [{"p": "Middle Elamite"}, {"p": "Neo-Elamite"}]
                },
                {
                    "id": "e000004",
                    "headword": "musz[snake]N",
                    "cf": "musz",
                    "gw": "snake",
                    "icount": 1,
                    "xis": "x004",
                    "senses": [{"mng": "snake"}],
                    "forms": [{"n": "musz"}],
                    "norms": [{"n": "musz"}]
                }
            ]),
            json!({
                "x001": ["P001 o 1", "P002 r 3", "P005 o 2"],
                "x002": ["P003 o 4", "P004 o 1"],
                "x003": ["P001 o 7", "P002 o 2", "P006 r 1", "P007 o 3", "P007 o 9"],
                "x004": ["P008 r 2"]
            }),
        )
    }

    // ============================================================
    // FIELD SPEC TESTS - name_and_type
    // ============================================================

    #[test]
    fn test_named_spec_defaults_to_string() {
        let (name, field_type) = FieldSpec::Named("gw").name_and_type();

        assert_eq!(name, "gw");
        assert_eq!(field_type, FieldType::Str);
    }

    #[test]
    fn test_typed_spec_keeps_its_type() {
        let (name, field_type) = FieldSpec::Typed("icount", FieldType::Int).name_and_type();

        assert_eq!(name, "icount");
        assert_eq!(field_type, FieldType::Int);
    }

    // ============================================================
    // FLATTENING TESTS - happy path
    // ============================================================

    #[test]
    fn test_flatten_preserves_entry_count_and_order() {
        let doc = sample_glossary();

        let outcome = flatten_document(&doc, &FlattenConfig::default()).unwrap();

        assert_eq!(outcome.entries.len(), doc.entries.len());
        assert!(outcome.skipped.is_empty());

        // Output order matches input order
        let ids: Vec<&str> = outcome
            .entries
            .iter()
            .map(|entry| entry["id"].as_str().unwrap())
            .collect();
        assert_eq!(ids, vec!["e000001", "e000002", "e000003", "e000004"]);
    }

    #[test]
    fn test_flatten_copies_base_fields_onto_every_entry() {
        let doc = sample_glossary();

        let outcome = flatten_document(&doc, &FlattenConfig::default()).unwrap();

        for entry in &outcome.entries {
            assert_eq!(entry["project"], json!("test-corpus"));
            assert_eq!(entry["lang"], json!("elx"));
        }
    }

    #[test]
    fn test_flatten_builds_nested_lists_in_source_order() {
        let doc = sample_glossary();

        let outcome = flatten_document(&doc, &FlattenConfig::default()).unwrap();

        let first = &outcome.entries[0];
        assert_eq!(first["senses_mng"], json!(["god"]));
        assert_eq!(first["forms_n"], json!(["ap-szi", "ap-szi-isz"]));
        assert_eq!(first["norms_n"], json!(["apszi"]));
        assert_eq!(first["periods_p"], json!(["Old Elamite"]));

        let second = &outcome.entries[1];
        assert_eq!(second["senses_mng"], json!(["goddess", "evening"]));
    }

    #[test]
    fn test_flatten_missing_group_becomes_empty_list() {
        let doc = sample_glossary();

        let outcome = flatten_document(&doc, &FlattenConfig::default()).unwrap();

        // The second entry has no "periods" group at all.
        assert_eq!(outcome.entries[1]["periods_p"], json!([]));
    }

    #[test]
    fn test_flatten_links_instances_payload() {
        let doc = sample_glossary();

        let outcome = flatten_document(&doc, &FlattenConfig::default()).unwrap();

        assert_eq!(
            outcome.entries[0]["instances"],
            json!(["P001 o 1", "P002 r 3", "P005 o 2"])
        );
        assert_eq!(outcome.entries[3]["instances"], json!(["P008 r 2"]));
    }

    #[test]
    fn test_flatten_casts_count_given_as_string() {
        let doc = glossary(
            json!([{
                "id": "e1", "headword": "a", "cf": "a", "gw": "word",
                "icount": "12", "xis": "x1"
            }]),
            json!({"x1": []}),
        );

        let outcome = flatten_document(&doc, &FlattenConfig::default()).unwrap();

        assert_eq!(outcome.entries[0]["icount"], json!(12));
    }

    // ============================================================
    // FLATTENING TESTS - data errors
    // ============================================================

    #[test]
    fn test_flatten_rejects_non_numeric_count() {
        let doc = glossary(
            json!([{
                "id": "e1", "headword": "bad[word]N", "cf": "bad", "gw": "word",
                "icount": "lots", "xis": "x1"
            }]),
            json!({"x1": []}),
        );

        let error = flatten_document(&doc, &FlattenConfig::default()).unwrap_err();

        assert_eq!(
            error,
            FlattenError::BadCast {
                entry: "bad[word]N".to_string(),
                field: "icount",
                value: "\"lots\"".to_string(),
            }
        );
    }

    #[test]
    fn test_flatten_rejects_missing_direct_field() {
        // No "cf" on this entry.
        let doc = glossary(
            json!([{
                "id": "e1", "headword": "short[word]N", "gw": "word",
                "icount": 1, "xis": "x1"
            }]),
            json!({"x1": []}),
        );

        let error = flatten_document(&doc, &FlattenConfig::default()).unwrap_err();

        assert_eq!(
            error,
            FlattenError::MissingField {
                entry: "short[word]N".to_string(),
                field: "cf",
            }
        );
    }

    #[test]
    fn test_flatten_requires_base_fields() {
        let doc: GlossaryDocument = serde_json::from_value(json!({
            "project": "test-corpus",
            // no "lang"
            "entries": [],
            "instances": {},
        }))
        .unwrap();

        let error = flatten_document(&doc, &FlattenConfig::default()).unwrap_err();

        assert_eq!(error, FlattenError::MissingBaseField { field: "lang" });
    }

    // ============================================================
    // FLATTENING TESTS - dangling references
    // ============================================================

    #[test]
    fn test_flatten_skips_dangling_reference_and_continues() {
        let doc = glossary(
            json!([
                {
                    "id": "e1", "headword": "ok[word]N", "cf": "ok", "gw": "word",
                    "icount": 1, "xis": "x1"
                },
                {
                    "id": "e2", "headword": "lost[word]N", "cf": "lost", "gw": "word",
                    "icount": 1, "xis": "x999"
                },
                {
                    "id": "e3", "headword": "also-ok[word]N", "cf": "also-ok", "gw": "word",
                    "icount": 1, "xis": "x1"
                }
            ]),
            json!({"x1": ["P001 o 1"]}),
        );

        let outcome = flatten_document(&doc, &FlattenConfig::default()).unwrap();

        // Length preserved modulo the dangling entry
        assert_eq!(outcome.entries.len(), 2);
        assert_eq!(outcome.entries[0]["id"], json!("e1"));
        assert_eq!(outcome.entries[1]["id"], json!("e3"));

        assert_eq!(
            outcome.skipped,
            vec![DanglingReference {
                xis: "x999".to_string(),
                headword: "lost[word]N".to_string(),
            }]
        );
    }

    #[test]
    fn test_flatten_skips_entry_without_reference() {
        let doc = glossary(
            json!([{
                "id": "e1", "headword": "dangling[word]N", "cf": "a", "gw": "word",
                "icount": 1
            }]),
            json!({}),
        );

        let outcome = flatten_document(&doc, &FlattenConfig::default()).unwrap();

        assert!(outcome.entries.is_empty());
        assert_eq!(outcome.skipped.len(), 1);
        assert_eq!(outcome.skipped[0].headword, "dangling[word]N");
        assert_eq!(outcome.skipped[0].xis, "");
    }

    // ============================================================
    // BULK FORMAT TESTS
    // ============================================================

    #[test]
    fn test_bulk_file_round_trip() {
        let doc = sample_glossary();
        let outcome = flatten_document(&doc, &FlattenConfig::default()).unwrap();

        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("gloss-elx-entries.json");
        write_bulk_file(&path, &outcome.entries).unwrap();

        let recovered = read_bulk_file(&path).unwrap();

        assert_eq!(recovered.len(), outcome.entries.len());
        for ((id, document), original) in recovered.iter().zip(&outcome.entries) {
            assert_eq!(Some(id.as_str()), original["id"].as_str());
            assert_eq!(document, original);
            // The synthesized upload-time field never reaches the file.
            assert!(!document.contains_key("completions"));
        }
    }

    #[test]
    fn test_bulk_body_injects_completions() {
        let doc = sample_glossary();
        let outcome = flatten_document(&doc, &FlattenConfig::default()).unwrap();

        let body = bulk_body(&outcome.entries, COMPLETION_FIELDS).unwrap();
        let lines: Vec<&str> = body.lines().collect();

        // One action line and one document line per entry
        assert_eq!(lines.len(), 2 * outcome.entries.len());

        let action: Value = serde_json::from_str(lines[0]).unwrap();
        assert_eq!(action, json!({"index": {"_id": "e000001"}}));

        let document: Value = serde_json::from_str(lines[1]).unwrap();
        assert_eq!(document["completions"], json!(["apszi", "god"]));

        // The source entries themselves stay untouched.
        assert!(!outcome.entries[0].contains_key("completions"));
    }

    #[test]
    fn test_bulk_body_requires_an_id() {
        let mut entry = Map::new();
        entry.insert("headword".to_string(), json!("lost[word]N"));

        let error = bulk_body(&[entry], COMPLETION_FIELDS).unwrap_err();

        assert!(matches!(error, BulkError::MissingId(label) if label == "lost[word]N"));
    }

    #[test]
    fn test_bulk_file_with_trailing_action_is_malformed() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("broken.json");
        std::fs::write(&path, "{\"index\":{\"_id\":\"e1\"}}\n").unwrap();

        let error = read_bulk_file(&path).unwrap_err();

        assert!(matches!(error, BulkError::Malformed(_)));
    }
}
