use ccda_core::{
    empty_document, DocumentKind, HealthConcern, Intervention, Patient, SectionCatalog, SectionId,
};

fn care_plan_without_goals() -> ccda_core::ClinicalDocument {
    let mut document = empty_document();
    document.patient = Some(Patient::default());
    document.health_concerns.push(HealthConcern {
        id: None,
        concern: "Uncontrolled blood pressure".into(),
        category: None,
        status: Some("active".into()),
        date: None,
        author: None,
        priority: None,
        notes: None,
    });
    document.interventions.push(Intervention {
        id: None,
        intervention: "Low sodium diet education".into(),
        status: Some("active".into()),
        planned_date: None,
        completed_date: None,
        author: None,
        notes: None,
    });
    document
}

#[test]
fn care_plan_missing_goals_reports_only_goals() {
    let catalog = SectionCatalog::standard();
    let missing = catalog.validate(&care_plan_without_goals(), DocumentKind::CarePlan);

    assert_eq!(missing.len(), 1);
    assert_eq!(missing[0].section, SectionId::Goals);
    assert_eq!(missing[0].to_string(), "Missing required section: Goals");
}

#[test]
fn supported_sections_put_required_first_then_label() {
    let catalog = SectionCatalog::standard();
    let sections = catalog.supported_sections(DocumentKind::CarePlan);
    let labels: Vec<&str> = sections.iter().map(|d| d.label).collect();

    assert_eq!(
        labels,
        vec![
            "Document Info",
            "Goals",
            "Health Concerns",
            "Interventions",
            "Patient Info"
        ]
    );
}

#[test]
fn required_and_optional_partition_supported() {
    let catalog = SectionCatalog::standard();
    for kind in DocumentKind::CLASSIFIABLE {
        let stats = catalog.stats(kind);
        assert_eq!(
            stats.total_sections,
            catalog.required_sections(kind).len() + catalog.optional_sections(kind).len()
        );
        assert_eq!(stats.section_ids.len(), stats.total_sections);
    }
}

#[test]
fn lookup_by_template_id_uses_any_candidate() {
    let catalog = SectionCatalog::standard();

    let allergies = catalog
        .section_by_template_id("2.16.840.1.113883.10.20.22.2.6")
        .expect("allergies");
    assert_eq!(allergies.id, SectionId::Allergies);

    // 2.10 vừa là Plan of Care vừa là Plan of Treatment.
    let plans = catalog.sections_by_template_id("2.16.840.1.113883.10.20.22.2.10");
    let ids: Vec<SectionId> = plans.iter().map(|d| d.id).collect();
    assert_eq!(ids, vec![SectionId::PlanOfCare, SectionId::PlanOfTreatment]);

    assert!(catalog.section_by_template_id("1.2.3.4").is_none());
}

#[test]
fn kind_specific_sections_stay_scoped() {
    let catalog = SectionCatalog::standard();

    assert!(catalog.is_section_supported(SectionId::DicomCatalog, DocumentKind::DiagnosticImaging));
    assert!(!catalog.is_section_supported(SectionId::DicomCatalog, DocumentKind::ContinuityOfCare));
    assert!(catalog.is_section_supported(SectionId::ReasonForReferral, DocumentKind::ReferralNote));
    assert!(catalog.is_section_supported(
        SectionId::ReasonForReferral,
        DocumentKind::ConsultationNote
    ));
    assert!(catalog.supported_sections(DocumentKind::Unknown).len() == 2);
}

#[test]
fn empty_required_list_counts_as_missing() {
    let catalog = SectionCatalog::standard();
    let document = empty_document();
    let missing = catalog.validate(&document, DocumentKind::DischargeSummary);
    let ids: Vec<SectionId> = missing.iter().map(|m| m.section).collect();

    assert!(ids.contains(&SectionId::Patient));
    assert!(ids.contains(&SectionId::AdmissionDiagnosis));
    assert!(ids.contains(&SectionId::HospitalCourse));
    assert!(!ids.contains(&SectionId::Header));
}
