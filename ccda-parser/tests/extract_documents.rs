use std::fs;

use ccda_core::{
    DocumentKind, DocumentVersion, ExtractConfig, ExtractionWarning, SectionCatalog, SectionId,
};
use ccda_parser::extract_document_value;
use ccda_xml::xml_to_tree;
use serde_json::Value;

fn fixture_path(name: &str) -> String {
    format!("{}/tests/data/{name}", env!("CARGO_MANIFEST_DIR"))
}

fn load_tree(name: &str) -> Value {
    let xml = fs::read_to_string(fixture_path(name)).expect("Không đọc được tài liệu mẫu");
    xml_to_tree(&xml).expect("XML mẫu không hợp lệ")
}

fn extract(name: &str) -> ccda_core::ClinicalDocument {
    extract_document_value(
        &load_tree(name),
        &SectionCatalog::standard(),
        &ExtractConfig::default(),
    )
    .expect("Không trích xuất được tài liệu")
}

#[test]
fn minimal_ccd_header_and_patient() {
    let document = extract("minimal_ccd.xml");

    assert_eq!(document.metadata.document_kind, DocumentKind::ContinuityOfCare);
    assert_eq!(document.metadata.document_version, DocumentVersion::R2_1);
    assert!(document.metadata.validation.valid);
    assert!(document.metadata.warnings.is_empty());

    let patient = document.patient.as_ref().expect("Thiếu bệnh nhân");
    let name = patient.name.as_ref().expect("Thiếu tên");
    assert_eq!(name.first(), Some("John"));
    assert_eq!(name.family.as_deref(), Some("Doe"));
    assert_eq!(name.full, "John Doe");
    assert_eq!(patient.date_of_birth.as_deref(), Some("19700101"));
    assert_eq!(patient.mrn.as_deref(), Some("12345"));
    assert_eq!(patient.gender.as_deref(), Some("M"));
    assert_eq!(patient.addresses[0].city.as_deref(), Some("Springfield"));

    assert_eq!(document.header.title.as_deref(), Some("Continuity of Care Document"));
    assert_eq!(document.header.custodian.as_deref(), Some("City Clinic"));
    assert_eq!(
        document.header.author.as_ref().and_then(|author| author.display()).as_deref(),
        Some("Ann Lee (City Clinic)")
    );
}

#[test]
fn empty_allergy_section_keeps_narrative() {
    let document = extract("minimal_ccd.xml");

    assert!(document.allergies.is_empty());
    assert_eq!(document.narrative(SectionId::Allergies), Some("No known allergies"));

    let meta = &document.section_metadata[&SectionId::Allergies];
    assert_eq!(meta.template_id.as_deref(), Some("2.16.840.1.113883.10.20.22.2.6.1"));
    assert_eq!(meta.entry_count, 0);
    assert!(!document.section_metadata.contains_key(&SectionId::Medications));
}

#[test]
fn raw_tree_retained_by_default() {
    let tree = load_tree("minimal_ccd.xml");
    let document =
        extract_document_value(&tree, &SectionCatalog::standard(), &ExtractConfig::default())
            .expect("Không trích xuất được tài liệu");
    assert_eq!(document.raw.as_ref(), tree.get("ClinicalDocument"));
}

#[test]
fn full_ccd_sections() {
    let document = extract("full_ccd.xml");

    let allergy = &document.allergies[0];
    assert_eq!(allergy.substance, "Penicillin G");
    assert_eq!(allergy.reaction.as_deref(), Some("Hives"));
    assert_eq!(allergy.severity.as_deref(), Some("Moderate"));
    assert_eq!(allergy.onset_date.as_deref(), Some("20100601"));

    assert_eq!(document.medications.len(), 2);
    assert_eq!(document.medications[0].frequency.as_deref(), Some("every 24 h"));
    assert_eq!(document.medications[0].dosage.as_deref(), Some("10 mg"));
    assert_eq!(document.medications[1].name, "Metformin 500 MG");

    // Problems use the older template without the `.1` suffix.
    assert_eq!(document.problems[0].name, "Type 2 diabetes mellitus");
    assert_eq!(
        document.section_metadata[&SectionId::Problems].template_id.as_deref(),
        Some("2.16.840.1.113883.10.20.22.2.5")
    );

    let vitals = &document.vital_signs[0];
    assert_eq!(vitals.systolic_bp.as_ref().map(|m| m.value.as_str()), Some("128"));
    assert_eq!(vitals.oxygen_saturation.as_ref().map(|m| m.value.as_str()), Some("98"));
    assert_eq!(vitals.reading_count(), 4);

    let panel = &document.lab_results[0];
    assert_eq!(panel.panel.as_deref(), Some("Basic metabolic panel"));
    assert_eq!(panel.results.len(), 2);
    assert_eq!(panel.results[0].interpretation.as_deref(), Some("High"));
    assert_eq!(panel.results[0].reference_range.as_deref(), Some("70-99 mg/dL"));

    assert_eq!(document.immunizations[0].lot_number.as_deref(), Some("FLU-2023-A"));
    assert!(!document.immunizations[0].refused);

    let encounter = &document.encounters[0];
    assert_eq!(encounter.location.as_deref(), Some("City Clinic Main Campus"));
    assert_eq!(encounter.reason.as_deref(), Some("Diabetes follow-up"));

    assert_eq!(document.plan_of_care[0].plan, "Hemoglobin A1c");
    assert_eq!(document.plan_of_care[0].mood_code.as_deref(), Some("RQO"));
}

#[test]
fn section_found_by_code_has_no_template() {
    let document = extract("full_ccd.xml");

    assert_eq!(document.social_history[0].value.as_deref(), Some("Never smoker"));
    let meta = &document.section_metadata[&SectionId::SocialHistory];
    assert!(meta.template_id.is_none());

    let strict = ExtractConfig {
        match_section_codes: false,
        ..ExtractConfig::default()
    };
    let document =
        extract_document_value(&load_tree("full_ccd.xml"), &SectionCatalog::standard(), &strict)
            .expect("Không trích xuất được tài liệu");
    assert!(document.social_history.is_empty());
}

#[test]
fn patient_identifiers_are_typed() {
    let document = extract("full_ccd.xml");
    let patient = document.patient.expect("Thiếu bệnh nhân");

    assert_eq!(patient.identifiers.len(), 2);
    assert_eq!(patient.identifiers[0].id_type.label(), "SSN");
    assert_eq!(patient.mrn.as_deref(), Some("MRN-42"));
    assert_eq!(patient.guardians[0].relationship.as_deref(), Some("Mother"));
    assert_eq!(
        patient.name.map(|name| name.full).as_deref(),
        Some("Eve Marie Everywoman")
    );
}

#[test]
fn care_plan_without_goals_warns() {
    let document = extract("care_plan_missing_goals.xml");

    assert_eq!(document.metadata.document_kind, DocumentKind::CarePlan);
    assert_eq!(document.health_concerns[0].concern, "At risk for falls");
    assert_eq!(document.interventions[0].intervention, "Home safety assessment");

    let missing: Vec<&ExtractionWarning> = document
        .metadata
        .warnings
        .iter()
        .filter(|warning| matches!(warning, ExtractionWarning::MissingRequiredSection { .. }))
        .collect();
    assert_eq!(
        missing,
        vec![&ExtractionWarning::MissingRequiredSection {
            section: SectionId::Goals,
            label: "Goals".to_string(),
        }]
    );
}

#[test]
fn unknown_kind_falls_back_to_ccd_sections() {
    let document = extract("unknown_kind.xml");

    assert_eq!(document.metadata.document_kind, DocumentKind::Unknown);
    assert_eq!(document.metadata.effective_kind, DocumentKind::ContinuityOfCare);
    assert_eq!(document.metadata.document_version, DocumentVersion::Unknown);
    assert!(document.metadata.supported_sections.contains(&SectionId::Encounters));
    assert_eq!(
        document.metadata.warnings,
        vec![
            ExtractionWarning::UnknownDocumentKind {
                fallback: DocumentKind::ContinuityOfCare
            },
            ExtractionWarning::UnknownVersion,
        ]
    );
    assert_eq!(document.allergies[0].substance, "Peanuts");
    assert_eq!(
        document.patient.and_then(|p| p.name).map(|n| n.full).as_deref(),
        Some("Pat Unknown")
    );
}

#[test]
fn extraction_is_deterministic() {
    for name in ["minimal_ccd.xml", "full_ccd.xml", "care_plan_missing_goals.xml"] {
        let first = serde_json::to_value(extract(name)).expect("Không serialize kết quả");
        let second = serde_json::to_value(extract(name)).expect("Không serialize kết quả");
        assert_eq!(first, second, "{name}");
    }
}

#[test]
fn json_text_input_and_bad_json() {
    let tree = load_tree("minimal_ccd.xml");
    let text = serde_json::to_string(&tree).expect("Không serialize cây");
    let catalog = SectionCatalog::standard();
    let config = ExtractConfig::default();

    let from_text = ccda_parser::extract_document_str(&text, &catalog, &config)
        .expect("Không trích xuất được tài liệu");
    assert_eq!(from_text.patient.and_then(|p| p.mrn).as_deref(), Some("12345"));

    let err = ccda_parser::extract_document_str("{ not json", &catalog, &config).unwrap_err();
    assert!(matches!(err, ccda_core::CcdaError::Parse(_)));
}
