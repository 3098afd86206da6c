//! Catalog-driven extraction of a `ClinicalDocument` tree.

use ccda_core::{
    CcdaError, ClinicalDocument, DocumentKind, DocumentMetadata, ExtractConfig, ExtractionWarning,
    SectionCatalog, SectionId, SectionMetadata,
};
use serde_json::Value;
use tracing::{debug, warn};

use crate::classify::detect_document_type;
use crate::locate::{locate, LocatedSection};
use crate::tree::{child, narrative_text, text};
use crate::version::{detect_version, validate_kind_for_version};

mod care_plan;
mod common;
mod coverage;
mod entries;
mod header;
mod narrative;
mod notes;
mod observations;
mod organizers;
mod surgical;

pub use narrative::structured_text;

/// One extractor parameterized by a section catalog.
#[derive(Debug, Clone)]
pub struct ClinicalExtractor<'c> {
    catalog: &'c SectionCatalog,
    config: ExtractConfig,
}

impl<'c> ClinicalExtractor<'c> {
    pub fn new(catalog: &'c SectionCatalog, config: ExtractConfig) -> Self {
        Self { catalog, config }
    }

    pub fn config(&self) -> &ExtractConfig {
        &self.config
    }

    /// Only a missing `ClinicalDocument` root is fatal; everything else ends
    /// up as an empty field or a warning in `metadata`.
    pub fn extract(&self, tree: &Value) -> Result<ClinicalDocument, CcdaError> {
        let document = child(Some(tree), "ClinicalDocument").ok_or_else(|| {
            CcdaError::DocumentFormat("missing ClinicalDocument root element".to_string())
        })?;

        let mut warnings = Vec::new();

        let document_kind = detect_document_type(document);
        let effective_kind = if document_kind == DocumentKind::Unknown {
            let fallback = self.config.unknown_kind_fallback;
            warn!(%fallback, "document kind not recognized, using fallback");
            warnings.push(ExtractionWarning::UnknownDocumentKind { fallback });
            fallback
        } else {
            document_kind
        };

        let document_version = detect_version(document);
        let validation = validate_kind_for_version(document_version, effective_kind);
        if !document_version.is_known() {
            warnings.push(ExtractionWarning::UnknownVersion);
        } else if let Some(message) = validation.message.clone().filter(|_| !validation.valid) {
            warn!(%message, "document kind not supported by detected version");
            warnings.push(ExtractionWarning::UnsupportedKindForVersion { message });
        }

        let mut output = ClinicalDocument {
            header: header::document_header(document),
            patient: header::patient(document),
            ..ClinicalDocument::default()
        };

        let supported = self.catalog.supported_sections(effective_kind);
        for descriptor in &supported {
            if descriptor.id.is_header_based() {
                continue;
            }
            let Some(located) = locate(
                document,
                descriptor,
                self.config.match_section_codes,
                self.config.match_section_titles,
            ) else {
                continue;
            };
            debug!(section = %descriptor.id, matched_by = ?located.matched_by, "section located");
            fill_section(&mut output, descriptor.id, located.node);
            output
                .section_metadata
                .insert(descriptor.id, section_metadata(&located));
        }

        for missing in self.catalog.validate(&output, effective_kind) {
            warn!(section = %missing.section, "{missing}");
            warnings.push(ExtractionWarning::MissingRequiredSection {
                section: missing.section,
                label: missing.label,
            });
        }

        output.metadata = DocumentMetadata {
            document_kind,
            effective_kind,
            document_version,
            validation,
            supported_sections: supported.iter().map(|descriptor| descriptor.id).collect(),
            warnings,
        };
        if self.config.retain_raw {
            output.raw = Some(document.clone());
        }

        Ok(output)
    }
}

fn section_metadata(located: &LocatedSection<'_>) -> SectionMetadata {
    let node = Some(located.node);
    SectionMetadata {
        template_id: located.template_id().map(str::to_string),
        title: text(child(node, "title")),
        code: common::coded_value(child(node, "code")),
        narrative: narrative_text(child(node, "text")),
        entry_count: common::section_entries(located.node).len(),
    }
}

fn fill_section(output: &mut ClinicalDocument, id: SectionId, section: &Value) {
    use narrative::{diagnosis_section, narrative_section};

    match id {
        SectionId::Header | SectionId::Patient => {}
        SectionId::Allergies => output.allergies = entries::allergies(section),
        SectionId::Medications => output.medications = entries::medications(section),
        SectionId::Problems => output.problems = entries::problems(section),
        SectionId::Procedures => output.procedures = entries::procedures(section),
        SectionId::Encounters => output.encounters = entries::encounters(section),
        SectionId::Immunizations => output.immunizations = entries::immunizations(section),
        SectionId::VitalSigns => output.vital_signs = organizers::vital_signs(section),
        SectionId::LabResults => output.lab_results = organizers::lab_results(section),
        SectionId::SocialHistory => output.social_history = observations::social_history(section),
        SectionId::FunctionalStatus => {
            output.functional_status = observations::functional_status(section)
        }
        SectionId::PlanOfCare => output.plan_of_care = care_plan::plan_of_care(section),
        SectionId::Notes => output.notes = notes::notes(section),
        SectionId::AdvanceDirectives => {
            output.advance_directives = observations::advance_directives(section)
        }
        SectionId::Assessment => output.assessment = notes::assessment(section),
        SectionId::ChiefComplaint => output.chief_complaint = notes::chief_complaint(section),
        SectionId::FamilyHistory => output.family_history = organizers::family_history(section),
        SectionId::Goals => output.goals = care_plan::goals(section),
        SectionId::HealthConcerns => output.health_concerns = care_plan::health_concerns(section),
        SectionId::Interventions => output.interventions = care_plan::interventions(section),
        SectionId::Instructions => output.instructions = care_plan::instructions(section),
        SectionId::MedicalEquipment => {
            output.medical_equipment = coverage::medical_equipment(section)
        }
        SectionId::MentalStatus => output.mental_status = observations::mental_status(section),
        SectionId::Nutrition => output.nutrition = observations::nutrition(section),
        SectionId::Payers => output.payers = coverage::payers(section),
        SectionId::PhysicalExam => output.physical_exam = observations::physical_exam(section),
        SectionId::ReasonForVisit => output.reason_for_visit = notes::reason_for_visit(section),
        SectionId::ReviewOfSystems => {
            output.review_of_systems = observations::review_of_systems(section)
        }
        SectionId::PresentIllness => output.present_illness = Some(narrative_section(section)),
        SectionId::PreoperativeDiagnosis => {
            output.preoperative_diagnosis = Some(diagnosis_section(section))
        }
        SectionId::PostoperativeDiagnosis => {
            output.postoperative_diagnosis = Some(diagnosis_section(section))
        }
        SectionId::ProcedureDescription => {
            output.procedure_description = Some(narrative_section(section))
        }
        SectionId::Anesthesia => output.anesthesia = surgical::anesthesia(section),
        SectionId::Complications => output.complications = surgical::complications(section),
        SectionId::BloodLoss => output.blood_loss = Some(narrative_section(section)),
        SectionId::SurgicalSpecimens => {
            output.surgical_specimens = Some(narrative_section(section))
        }
        SectionId::ProcedureIndications => {
            output.procedure_indications = Some(narrative_section(section))
        }
        SectionId::ProcedureFindings => {
            output.procedure_findings = Some(narrative_section(section))
        }
        SectionId::AdmissionDiagnosis => {
            output.admission_diagnosis = Some(diagnosis_section(section))
        }
        SectionId::DischargeDiagnosis => {
            output.discharge_diagnosis = Some(diagnosis_section(section))
        }
        SectionId::HospitalCourse => output.hospital_course = Some(narrative_section(section)),
        SectionId::DischargeInstructions => {
            output.discharge_instructions = Some(narrative_section(section))
        }
        SectionId::HospitalConsultations => {
            output.hospital_consultations = Some(narrative_section(section))
        }
        SectionId::DicomCatalog => output.dicom_catalog = surgical::dicom_catalog(section),
        SectionId::Findings => output.findings = Some(narrative_section(section)),
        SectionId::Impressions => output.impressions = Some(narrative_section(section)),
        SectionId::ReasonForReferral => {
            output.reason_for_referral = Some(narrative_section(section))
        }
        SectionId::ConsultationRequest => {
            output.consultation_request = Some(narrative_section(section))
        }
        SectionId::Recommendations => output.recommendations = Some(narrative_section(section)),
        SectionId::PlanOfTreatment => output.plan_of_treatment = Some(narrative_section(section)),
        SectionId::SubjectiveData => output.subjective_data = Some(narrative_section(section)),
        SectionId::ObjectiveData => output.objective_data = Some(narrative_section(section)),
        SectionId::ReferralRequest => output.referral_request = Some(narrative_section(section)),
        SectionId::ReferringProvider => {
            output.referring_provider = Some(narrative_section(section))
        }
        SectionId::TransferDiagnosis => {
            output.transfer_diagnosis = Some(narrative_section(section))
        }
        SectionId::TransferSummary => output.transfer_summary = Some(narrative_section(section)),
        SectionId::ReceivingProvider => {
            output.receiving_provider = Some(narrative_section(section))
        }
    }
}
