use ccda_core::{DocumentKind, DocumentVersion, ExtractConfig, SectionCatalog};
use ccda_parser::tree::{as_sequence, attr, text};
use ccda_parser::{
    detect_document_type, detect_version, extract_document_value, find_section,
    find_section_by_title, find_section_flexible,
};
use proptest::prelude::*;
use serde_json::{json, Value};

const ALLERGIES_R2: &str = "2.16.840.1.113883.10.20.22.2.6.1";
const ALLERGIES_R1: &str = "2.16.840.1.113883.10.20.22.2.6";

fn body(sections: Vec<Value>) -> Value {
    let components: Vec<Value> = sections
        .into_iter()
        .map(|section| json!({ "section": section }))
        .collect();
    json!({ "component": { "structuredBody": { "component": components } } })
}

#[test]
fn flexible_lookup_prefers_first_candidate() {
    let document = body(vec![
        json!({ "templateId": { "@_root": ALLERGIES_R1 }, "title": "older" }),
        json!({ "templateId": [{ "@_root": "x" }, { "@_root": ALLERGIES_R2 }], "title": "newer" }),
    ]);

    let found = find_section_flexible(&document, &[ALLERGIES_R2, ALLERGIES_R1]);
    assert_eq!(text(found.and_then(|s| s.get("title"))).as_deref(), Some("newer"));

    let found = find_section_flexible(&document, &["missing", ALLERGIES_R1]);
    assert_eq!(text(found.and_then(|s| s.get("title"))).as_deref(), Some("older"));
    assert!(find_section(&document, "missing").is_none());
}

#[test]
fn single_component_body_is_searched() {
    let document = json!({ "component": { "structuredBody": { "component": {
        "section": { "templateId": { "@_root": ALLERGIES_R2 }, "title": "Allergies" }
    } } } });
    assert!(find_section(&document, ALLERGIES_R2).is_some());
    assert!(find_section_by_title(&document, &["ALLERG"]).is_some());
}

#[test]
fn nested_sections_are_not_top_level() {
    let document = body(vec![json!({
        "templateId": { "@_root": "outer" },
        "component": { "section": { "templateId": { "@_root": ALLERGIES_R2 } } }
    })]);
    assert!(find_section(&document, ALLERGIES_R2).is_none());
}

#[test]
fn unrecognized_templates_are_unknown() {
    let document = json!({
        "templateId": [{ "@_root": "1.2.3" }, { "@_root": "4.5.6", "@_extension": "2019-01-01" }]
    });
    assert_eq!(detect_document_type(&document), DocumentKind::Unknown);
    assert_eq!(detect_version(&document), DocumentVersion::Unknown);
}

#[test]
fn release_from_header_pair() {
    let document = json!({
        "templateId": { "@_root": "2.16.840.1.113883.10.20.22.1.1", "@_extension": "2015-08-01" }
    });
    assert_eq!(detect_version(&document), DocumentVersion::R2_1);
}

#[test]
fn singleton_and_list_entries_match() {
    let entry = json!({ "act": { "entryRelationship": { "observation": {
        "participant": { "participantRole": { "playingEntity": {
            "code": { "@_code": "7980", "@_displayName": "Penicillin" }
        } } }
    } } } });
    let tree_with = |entries: Value| {
        let mut root = body(vec![json!({
            "templateId": { "@_root": ALLERGIES_R2 },
            "entry": entries
        })]);
        root["templateId"] = json!({ "@_root": "2.16.840.1.113883.10.20.22.1.2" });
        json!({ "ClinicalDocument": root })
    };

    let catalog = SectionCatalog::standard();
    let config = ExtractConfig::default();
    let single = extract_document_value(&tree_with(entry.clone()), &catalog, &config)
        .expect("Không trích xuất được tài liệu");
    let listed = extract_document_value(&tree_with(json!([entry])), &catalog, &config)
        .expect("Không trích xuất được tài liệu");

    assert_eq!(single.allergies, listed.allergies);
    assert_eq!(single.allergies.len(), 1);
}

fn leaf() -> impl Strategy<Value = Value> {
    prop_oneof![
        Just(Value::Null),
        any::<bool>().prop_map(Value::Bool),
        "[a-z0-9 ]{0,8}".prop_map(Value::String),
        "[a-z]{1,4}".prop_map(|code| json!({ "@_code": code })),
    ]
}

fn node() -> impl Strategy<Value = Value> {
    prop_oneof![leaf(), prop::collection::vec(leaf(), 0..5).prop_map(Value::Array)]
}

proptest! {
    #[test]
    fn as_sequence_is_idempotent(value in node()) {
        let once: Vec<Value> = as_sequence(Some(&value)).into_iter().cloned().collect();
        let wrapped = Value::Array(once.clone());
        let twice: Vec<Value> = as_sequence(Some(&wrapped)).into_iter().cloned().collect();
        prop_assert_eq!(once, twice);
    }

    #[test]
    fn single_object_is_one_element(code in "[A-Z0-9]{1,6}") {
        let value = json!({ "@_code": code.clone() });
        let sequence = as_sequence(Some(&value));
        prop_assert_eq!(sequence.len(), 1);
        prop_assert_eq!(attr(Some(sequence[0]), "code"), Some(code));
    }
}
