//! Danh mục section lâm sàng: mỗi mục khai báo templateId, loại tài liệu áp
//! dụng và tính bắt buộc. Danh mục không bao giờ đọc cây XML.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::model::ClinicalDocument;
use crate::DocumentKind;

/// Định danh ổn định của một section, trùng tên trường trong `ClinicalDocument`.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[serde(rename_all = "snake_case")]
pub enum SectionId {
    Header,
    Patient,
    Allergies,
    Medications,
    Problems,
    Procedures,
    Encounters,
    Immunizations,
    VitalSigns,
    LabResults,
    SocialHistory,
    FunctionalStatus,
    PlanOfCare,
    Notes,
    AdvanceDirectives,
    Assessment,
    ChiefComplaint,
    FamilyHistory,
    Goals,
    HealthConcerns,
    Interventions,
    Instructions,
    MedicalEquipment,
    MentalStatus,
    Nutrition,
    Payers,
    PhysicalExam,
    ReasonForVisit,
    ReviewOfSystems,
    PresentIllness,
    PreoperativeDiagnosis,
    PostoperativeDiagnosis,
    ProcedureDescription,
    Anesthesia,
    Complications,
    BloodLoss,
    SurgicalSpecimens,
    ProcedureIndications,
    ProcedureFindings,
    AdmissionDiagnosis,
    DischargeDiagnosis,
    HospitalCourse,
    DischargeInstructions,
    HospitalConsultations,
    DicomCatalog,
    Findings,
    Impressions,
    ReasonForReferral,
    ConsultationRequest,
    Recommendations,
    PlanOfTreatment,
    SubjectiveData,
    ObjectiveData,
    ReferralRequest,
    ReferringProvider,
    TransferDiagnosis,
    TransferSummary,
    ReceivingProvider,
}

impl SectionId {
    pub fn as_str(self) -> &'static str {
        match self {
            SectionId::Header => "header",
            SectionId::Patient => "patient",
            SectionId::Allergies => "allergies",
            SectionId::Medications => "medications",
            SectionId::Problems => "problems",
            SectionId::Procedures => "procedures",
            SectionId::Encounters => "encounters",
            SectionId::Immunizations => "immunizations",
            SectionId::VitalSigns => "vital_signs",
            SectionId::LabResults => "lab_results",
            SectionId::SocialHistory => "social_history",
            SectionId::FunctionalStatus => "functional_status",
            SectionId::PlanOfCare => "plan_of_care",
            SectionId::Notes => "notes",
            SectionId::AdvanceDirectives => "advance_directives",
            SectionId::Assessment => "assessment",
            SectionId::ChiefComplaint => "chief_complaint",
            SectionId::FamilyHistory => "family_history",
            SectionId::Goals => "goals",
            SectionId::HealthConcerns => "health_concerns",
            SectionId::Interventions => "interventions",
            SectionId::Instructions => "instructions",
            SectionId::MedicalEquipment => "medical_equipment",
            SectionId::MentalStatus => "mental_status",
            SectionId::Nutrition => "nutrition",
            SectionId::Payers => "payers",
            SectionId::PhysicalExam => "physical_exam",
            SectionId::ReasonForVisit => "reason_for_visit",
            SectionId::ReviewOfSystems => "review_of_systems",
            SectionId::PresentIllness => "present_illness",
            SectionId::PreoperativeDiagnosis => "preoperative_diagnosis",
            SectionId::PostoperativeDiagnosis => "postoperative_diagnosis",
            SectionId::ProcedureDescription => "procedure_description",
            SectionId::Anesthesia => "anesthesia",
            SectionId::Complications => "complications",
            SectionId::BloodLoss => "blood_loss",
            SectionId::SurgicalSpecimens => "surgical_specimens",
            SectionId::ProcedureIndications => "procedure_indications",
            SectionId::ProcedureFindings => "procedure_findings",
            SectionId::AdmissionDiagnosis => "admission_diagnosis",
            SectionId::DischargeDiagnosis => "discharge_diagnosis",
            SectionId::HospitalCourse => "hospital_course",
            SectionId::DischargeInstructions => "discharge_instructions",
            SectionId::HospitalConsultations => "hospital_consultations",
            SectionId::DicomCatalog => "dicom_catalog",
            SectionId::Findings => "findings",
            SectionId::Impressions => "impressions",
            SectionId::ReasonForReferral => "reason_for_referral",
            SectionId::ConsultationRequest => "consultation_request",
            SectionId::Recommendations => "recommendations",
            SectionId::PlanOfTreatment => "plan_of_treatment",
            SectionId::SubjectiveData => "subjective_data",
            SectionId::ObjectiveData => "objective_data",
            SectionId::ReferralRequest => "referral_request",
            SectionId::ReferringProvider => "referring_provider",
            SectionId::TransferDiagnosis => "transfer_diagnosis",
            SectionId::TransferSummary => "transfer_summary",
            SectionId::ReceivingProvider => "receiving_provider",
        }
    }

    /// Section lấy từ phần đầu tài liệu, không nằm trong structuredBody.
    pub fn is_header_based(self) -> bool {
        matches!(self, SectionId::Header | SectionId::Patient)
    }
}

impl fmt::Display for SectionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Phạm vi áp dụng của một section.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Applicability {
    All,
    Kinds(&'static [DocumentKind]),
}

impl Applicability {
    pub fn applies_to(self, kind: DocumentKind) -> bool {
        match self {
            Applicability::All => true,
            Applicability::Kinds(kinds) => kinds.contains(&kind),
        }
    }
}

/// Một mục trong danh mục section.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SectionDescriptor {
    pub id: SectionId,
    pub label: &'static str,
    /// templateId ứng viên, thử theo thứ tự, cái đầu tiên khớp sẽ thắng.
    pub template_ids: &'static [&'static str],
    /// Mã LOINC của section, dùng khi không khớp templateId.
    pub codes: &'static [&'static str],
    /// Chuỗi con (chữ thường) của tiêu đề section, phương án cuối cùng.
    pub title_hints: &'static [&'static str],
    pub applicability: Applicability,
    pub required: bool,
}

impl SectionDescriptor {
    pub fn applies_to(&self, kind: DocumentKind) -> bool {
        self.applicability.applies_to(kind)
    }

    pub fn lists_template(&self, template_id: &str) -> bool {
        self.template_ids.contains(&template_id)
    }
}

/// Section bắt buộc nhưng không có dữ liệu.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct MissingSection {
    pub section: SectionId,
    pub label: String,
}

impl fmt::Display for MissingSection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Missing required section: {}", self.label)
    }
}

/// Thống kê section theo loại tài liệu.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct CatalogStats {
    pub total_sections: usize,
    pub required_sections: usize,
    pub optional_sections: usize,
    pub section_ids: Vec<SectionId>,
}

/// Bảng section tĩnh, truyền tường minh cho bộ trích xuất.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SectionCatalog {
    descriptors: Vec<SectionDescriptor>,
}

impl Default for SectionCatalog {
    fn default() -> Self {
        Self::standard()
    }
}

impl SectionCatalog {
    /// Danh mục tùy chỉnh.
    pub fn new(descriptors: Vec<SectionDescriptor>) -> Self {
        Self { descriptors }
    }

    /// Danh mục chuẩn cho các loại tài liệu C-CDA.
    pub fn standard() -> Self {
        Self::new(standard_descriptors())
    }

    pub fn descriptors(&self) -> &[SectionDescriptor] {
        &self.descriptors
    }

    /// Section áp dụng cho loại tài liệu: bắt buộc trước, sau đó theo nhãn.
    pub fn supported_sections(&self, kind: DocumentKind) -> Vec<&SectionDescriptor> {
        let mut sections: Vec<&SectionDescriptor> = self
            .descriptors
            .iter()
            .filter(|descriptor| descriptor.applies_to(kind))
            .collect();
        sections.sort_by(|a, b| {
            b.required
                .cmp(&a.required)
                .then_with(|| a.label.to_lowercase().cmp(&b.label.to_lowercase()))
        });
        sections
    }

    pub fn required_sections(&self, kind: DocumentKind) -> Vec<&SectionDescriptor> {
        self.supported_sections(kind)
            .into_iter()
            .filter(|descriptor| descriptor.required)
            .collect()
    }

    pub fn optional_sections(&self, kind: DocumentKind) -> Vec<&SectionDescriptor> {
        self.supported_sections(kind)
            .into_iter()
            .filter(|descriptor| !descriptor.required)
            .collect()
    }

    pub fn section(&self, id: SectionId) -> Option<&SectionDescriptor> {
        self.descriptors.iter().find(|descriptor| descriptor.id == id)
    }

    pub fn is_section_supported(&self, id: SectionId, kind: DocumentKind) -> bool {
        self.section(id)
            .map(|descriptor| descriptor.applies_to(kind))
            .unwrap_or(false)
    }

    /// Mục đầu tiên khai báo templateId này.
    pub fn section_by_template_id(&self, template_id: &str) -> Option<&SectionDescriptor> {
        self.descriptors
            .iter()
            .find(|descriptor| descriptor.lists_template(template_id))
    }

    pub fn sections_by_template_id(&self, template_id: &str) -> Vec<&SectionDescriptor> {
        self.descriptors
            .iter()
            .filter(|descriptor| descriptor.lists_template(template_id))
            .collect()
    }

    /// Kiểm tra các section bắt buộc. Chỉ mang tính cảnh báo.
    pub fn validate(&self, document: &ClinicalDocument, kind: DocumentKind) -> Vec<MissingSection> {
        self.required_sections(kind)
            .into_iter()
            .filter(|descriptor| !document.is_section_populated(descriptor.id))
            .map(|descriptor| MissingSection {
                section: descriptor.id,
                label: descriptor.label.to_string(),
            })
            .collect()
    }

    pub fn stats(&self, kind: DocumentKind) -> CatalogStats {
        let supported = self.supported_sections(kind);
        let required = supported.iter().filter(|d| d.required).count();
        CatalogStats {
            total_sections: supported.len(),
            required_sections: required,
            optional_sections: supported.len() - required,
            section_ids: supported.iter().map(|d| d.id).collect(),
        }
    }
}

use DocumentKind::*;

const CLINICAL_SUMMARY: &[DocumentKind] = &[
    ContinuityOfCare,
    DischargeSummary,
    HistoryAndPhysical,
    ConsultationNote,
    ProgressNote,
];
const IMMUNIZATION_KINDS: &[DocumentKind] = &[ContinuityOfCare, HistoryAndPhysical, ProgressNote];
const CCD_ONLY: &[DocumentKind] = &[ContinuityOfCare];
const NOTE_KINDS: &[DocumentKind] = &[ContinuityOfCare, ConsultationNote, ProgressNote];
const EXAM_KINDS: &[DocumentKind] = &[HistoryAndPhysical, ProgressNote];
const VISIT_KINDS: &[DocumentKind] = &[HistoryAndPhysical, ProgressNote, ConsultationNote];
const CARE_PLAN: &[DocumentKind] = &[CarePlan];
const HISTORY_AND_PHYSICAL: &[DocumentKind] = &[HistoryAndPhysical];
const OPERATIVE: &[DocumentKind] = &[OperativeNote];
const SURGICAL: &[DocumentKind] = &[OperativeNote, ProcedureNote];
const PROCEDURE: &[DocumentKind] = &[ProcedureNote];
const DISCHARGE: &[DocumentKind] = &[DischargeSummary];
const INSTRUCTION_KINDS: &[DocumentKind] = &[ProgressNote, DischargeSummary];
const IMAGING: &[DocumentKind] = &[DiagnosticImaging];
const REFERRAL_REASON_KINDS: &[DocumentKind] = &[ConsultationNote, ReferralNote];
const CONSULTATION: &[DocumentKind] = &[ConsultationNote];
const PROGRESS: &[DocumentKind] = &[ProgressNote];
const REFERRAL: &[DocumentKind] = &[ReferralNote];
const TRANSFER: &[DocumentKind] = &[TransferSummary];

fn entry(
    id: SectionId,
    label: &'static str,
    template_ids: &'static [&'static str],
    codes: &'static [&'static str],
    applicability: Applicability,
    required: bool,
) -> SectionDescriptor {
    SectionDescriptor {
        id,
        label,
        template_ids,
        codes,
        title_hints: &[],
        applicability,
        required,
    }
}

fn titled(mut descriptor: SectionDescriptor, hints: &'static [&'static str]) -> SectionDescriptor {
    descriptor.title_hints = hints;
    descriptor
}

fn standard_descriptors() -> Vec<SectionDescriptor> {
    use Applicability::{All, Kinds};
    use SectionId as S;

    vec![
        entry(S::Header, "Document Info", &[], &[], All, true),
        entry(S::Patient, "Patient Info", &[], &[], All, true),
        // Các section lâm sàng chung.
        entry(
            S::Allergies,
            "Allergies",
            &["2.16.840.1.113883.10.20.22.2.6.1", "2.16.840.1.113883.10.20.22.2.6"],
            &["48765-2"],
            Kinds(CLINICAL_SUMMARY),
            false,
        ),
        entry(
            S::Medications,
            "Medications",
            &["2.16.840.1.113883.10.20.22.2.1.1", "2.16.840.1.113883.10.20.22.2.1"],
            &["10160-0"],
            Kinds(CLINICAL_SUMMARY),
            false,
        ),
        entry(
            S::Problems,
            "Problems",
            &["2.16.840.1.113883.10.20.22.2.5.1", "2.16.840.1.113883.10.20.22.2.5"],
            &["11450-4"],
            Kinds(CLINICAL_SUMMARY),
            false,
        ),
        entry(
            S::Procedures,
            "Procedures",
            &["2.16.840.1.113883.10.20.22.2.7.1", "2.16.840.1.113883.10.20.22.2.7"],
            &["47519-4"],
            Kinds(CLINICAL_SUMMARY),
            false,
        ),
        entry(
            S::VitalSigns,
            "Vital Signs",
            &["2.16.840.1.113883.10.20.22.2.4.1", "2.16.840.1.113883.10.20.22.2.4"],
            &["8716-3"],
            Kinds(CLINICAL_SUMMARY),
            false,
        ),
        entry(
            S::LabResults,
            "Lab Results",
            &["2.16.840.1.113883.10.20.22.2.3.1", "2.16.840.1.113883.10.20.22.2.3"],
            &["30954-2"],
            Kinds(CLINICAL_SUMMARY),
            false,
        ),
        entry(
            S::Immunizations,
            "Immunizations",
            &["2.16.840.1.113883.10.20.22.2.2.1", "2.16.840.1.113883.10.20.22.2.2"],
            &["11369-6"],
            Kinds(IMMUNIZATION_KINDS),
            false,
        ),
        entry(
            S::Encounters,
            "Encounters",
            &["2.16.840.1.113883.10.20.22.2.22.1", "2.16.840.1.113883.10.20.22.2.22"],
            &["46240-8"],
            Kinds(CCD_ONLY),
            false,
        ),
        entry(
            S::SocialHistory,
            "Social History",
            &["2.16.840.1.113883.10.20.22.2.17"],
            &["29762-2"],
            Kinds(CCD_ONLY),
            false,
        ),
        entry(
            S::FunctionalStatus,
            "Functional Status",
            &["2.16.840.1.113883.10.20.22.2.14"],
            &["47420-5"],
            Kinds(CCD_ONLY),
            false,
        ),
        entry(
            S::PlanOfCare,
            "Plan of Care",
            &["2.16.840.1.113883.10.20.22.2.10"],
            &["18776-5"],
            Kinds(CCD_ONLY),
            false,
        ),
        titled(
            entry(
                S::Notes,
                "Notes",
                &["2.16.840.1.113883.10.20.22.2.65"],
                &["34109-9", "11488-4", "11506-3"],
                Kinds(NOTE_KINDS),
                false,
            ),
            &["notes"],
        ),
        entry(
            S::AdvanceDirectives,
            "Advance Directives",
            &["2.16.840.1.113883.10.20.22.2.21.1", "2.16.840.1.113883.10.20.22.2.21"],
            &["42348-3"],
            Kinds(CCD_ONLY),
            false,
        ),
        entry(
            S::FamilyHistory,
            "Family History",
            &["2.16.840.1.113883.10.20.22.2.15"],
            &["10157-6"],
            Kinds(CCD_ONLY),
            false,
        ),
        entry(
            S::MedicalEquipment,
            "Medical Equipment",
            &["2.16.840.1.113883.10.20.22.2.23"],
            &["46264-8"],
            Kinds(CCD_ONLY),
            false,
        ),
        entry(
            S::MentalStatus,
            "Mental Status",
            &["2.16.840.1.113883.10.20.22.2.56"],
            &["10190-7"],
            Kinds(CCD_ONLY),
            false,
        ),
        entry(
            S::Nutrition,
            "Nutrition",
            &["2.16.840.1.113883.10.20.22.2.57"],
            &["61144-2"],
            Kinds(CCD_ONLY),
            false,
        ),
        entry(
            S::Payers,
            "Payers",
            &["2.16.840.1.113883.10.20.22.2.18"],
            &["48768-6"],
            Kinds(CCD_ONLY),
            false,
        ),
        // Khám và đánh giá.
        entry(
            S::ChiefComplaint,
            "Chief Complaint",
            &["2.16.840.1.113883.10.20.22.2.13", "1.3.6.1.4.1.19376.1.5.3.1.1.13.2.1"],
            &["10154-3", "46239-0"],
            Kinds(EXAM_KINDS),
            false,
        ),
        entry(
            S::ReviewOfSystems,
            "Review of Systems",
            &["2.16.840.1.113883.10.20.22.2.44", "1.3.6.1.4.1.19376.1.5.3.1.3.18"],
            &["10187-3"],
            Kinds(EXAM_KINDS),
            false,
        ),
        entry(
            S::PhysicalExam,
            "Physical Examination",
            &["2.16.840.1.113883.10.20.2.10"],
            &["29545-1"],
            Kinds(EXAM_KINDS),
            false,
        ),
        entry(
            S::Assessment,
            "Assessment and Plan",
            &["2.16.840.1.113883.10.20.22.2.9", "2.16.840.1.113883.10.20.22.2.8"],
            &["51847-2", "51848-0"],
            Kinds(EXAM_KINDS),
            false,
        ),
        entry(
            S::ReasonForVisit,
            "Reason for Visit",
            &["2.16.840.1.113883.10.20.22.2.12"],
            &["29299-5"],
            Kinds(VISIT_KINDS),
            false,
        ),
        entry(
            S::PresentIllness,
            "History of Present Illness",
            &["1.3.6.1.4.1.19376.1.5.3.1.3.4"],
            &["10164-2"],
            Kinds(HISTORY_AND_PHYSICAL),
            true,
        ),
        // Kế hoạch chăm sóc.
        entry(
            S::HealthConcerns,
            "Health Concerns",
            &["2.16.840.1.113883.10.20.22.2.58"],
            &["75310-3"],
            Kinds(CARE_PLAN),
            true,
        ),
        entry(
            S::Goals,
            "Goals",
            &["2.16.840.1.113883.10.20.22.2.60"],
            &["61146-7"],
            Kinds(CARE_PLAN),
            true,
        ),
        entry(
            S::Interventions,
            "Interventions",
            &["2.16.840.1.113883.10.20.21.2.3"],
            &["62387-6"],
            Kinds(CARE_PLAN),
            true,
        ),
        // Phẫu thuật và thủ thuật.
        entry(
            S::PreoperativeDiagnosis,
            "Preoperative Diagnosis",
            &["2.16.840.1.113883.10.20.22.2.34"],
            &["10219-4"],
            Kinds(OPERATIVE),
            true,
        ),
        entry(
            S::PostoperativeDiagnosis,
            "Postoperative Diagnosis",
            &["2.16.840.1.113883.10.20.22.2.35"],
            &["10218-6"],
            Kinds(OPERATIVE),
            true,
        ),
        entry(
            S::ProcedureDescription,
            "Procedure Description",
            &["2.16.840.1.113883.10.20.22.2.27"],
            &["29554-3"],
            Kinds(SURGICAL),
            true,
        ),
        entry(
            S::Anesthesia,
            "Anesthesia",
            &["2.16.840.1.113883.10.20.22.2.25"],
            &["59774-0"],
            Kinds(SURGICAL),
            false,
        ),
        entry(
            S::Complications,
            "Complications",
            &["2.16.840.1.113883.10.20.22.2.37"],
            &["55109-3"],
            Kinds(SURGICAL),
            false,
        ),
        entry(
            S::BloodLoss,
            "Estimated Blood Loss",
            &["2.16.840.1.113883.10.20.18.2.9"],
            &["55103-6"],
            Kinds(OPERATIVE),
            false,
        ),
        entry(
            S::SurgicalSpecimens,
            "Surgical Specimens",
            &["2.16.840.1.113883.10.20.7.13"],
            &["59773-2"],
            Kinds(OPERATIVE),
            false,
        ),
        entry(
            S::ProcedureIndications,
            "Procedure Indications",
            &["2.16.840.1.113883.10.20.22.2.29"],
            &["59768-2"],
            Kinds(PROCEDURE),
            true,
        ),
        entry(
            S::ProcedureFindings,
            "Procedure Findings",
            &["2.16.840.1.113883.10.20.22.2.28"],
            &["59776-5"],
            Kinds(PROCEDURE),
            false,
        ),
        // Tóm tắt xuất viện.
        entry(
            S::AdmissionDiagnosis,
            "Admission Diagnosis",
            &["2.16.840.1.113883.10.20.22.2.43"],
            &["46241-6"],
            Kinds(DISCHARGE),
            true,
        ),
        entry(
            S::DischargeDiagnosis,
            "Discharge Diagnosis",
            &["2.16.840.1.113883.10.20.22.2.24"],
            &["11535-2"],
            Kinds(DISCHARGE),
            true,
        ),
        entry(
            S::HospitalCourse,
            "Hospital Course",
            &["1.3.6.1.4.1.19376.1.5.3.1.3.5"],
            &["8648-8"],
            Kinds(DISCHARGE),
            true,
        ),
        entry(
            S::DischargeInstructions,
            "Discharge Instructions",
            &["2.16.840.1.113883.10.20.22.2.41"],
            &["8653-8"],
            Kinds(DISCHARGE),
            false,
        ),
        entry(
            S::HospitalConsultations,
            "Hospital Consultations",
            &["2.16.840.1.113883.10.20.22.2.42"],
            &["18841-7"],
            Kinds(DISCHARGE),
            false,
        ),
        entry(
            S::Instructions,
            "Instructions",
            &["2.16.840.1.113883.10.20.22.2.45"],
            &["69730-0"],
            Kinds(INSTRUCTION_KINDS),
            false,
        ),
        // Chẩn đoán hình ảnh.
        entry(
            S::DicomCatalog,
            "DICOM Object Catalog",
            &["2.16.840.1.113883.10.20.6.1.1"],
            &[],
            Kinds(IMAGING),
            true,
        ),
        entry(
            S::Findings,
            "Findings",
            &["2.16.840.1.113883.10.20.6.1.2"],
            &["18782-3"],
            Kinds(IMAGING),
            true,
        ),
        titled(
            entry(S::Impressions, "Impressions", &[], &["19005-8"], Kinds(IMAGING), false),
            &["impression"],
        ),
        // Hội chẩn và chuyển viện.
        titled(
            entry(
                S::ReasonForReferral,
                "Reason for Referral",
                &["1.3.6.1.4.1.19376.1.5.3.1.3.1"],
                &["42349-1"],
                Kinds(REFERRAL_REASON_KINDS),
                true,
            ),
            &["reason for referral", "referral reason"],
        ),
        titled(
            entry(
                S::ConsultationRequest,
                "Consultation Request",
                &[],
                &[],
                Kinds(CONSULTATION),
                false,
            ),
            &["consultation request", "request for consultation"],
        ),
        titled(
            entry(S::Recommendations, "Recommendations", &[], &[], Kinds(CONSULTATION), false),
            &["recommendation"],
        ),
        entry(
            S::PlanOfTreatment,
            "Plan of Treatment",
            &["2.16.840.1.113883.10.20.22.2.10"],
            &["18776-5"],
            Kinds(PROGRESS),
            true,
        ),
        entry(
            S::SubjectiveData,
            "Subjective Data",
            &["2.16.840.1.113883.10.20.21.2.2"],
            &["61150-9"],
            Kinds(PROGRESS),
            false,
        ),
        entry(
            S::ObjectiveData,
            "Objective Data",
            &["2.16.840.1.113883.10.20.21.2.1"],
            &["61149-1"],
            Kinds(PROGRESS),
            false,
        ),
        titled(
            entry(S::ReferralRequest, "Referral Request", &[], &[], Kinds(REFERRAL), true),
            &["referral request", "request for referral"],
        ),
        titled(
            entry(S::ReferringProvider, "Referring Provider", &[], &[], Kinds(REFERRAL), false),
            &["referring provider"],
        ),
        titled(
            entry(S::TransferDiagnosis, "Transfer Diagnosis", &[], &[], Kinds(TRANSFER), true),
            &["transfer diagnos"],
        ),
        titled(
            entry(S::TransferSummary, "Transfer Summary", &[], &[], Kinds(TRANSFER), true),
            &["transfer summary", "reason for transfer"],
        ),
        titled(
            entry(S::ReceivingProvider, "Receiving Provider", &[], &[], Kinds(TRANSFER), false),
            &["receiving provider", "receiving facility"],
        ),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_section_id_has_one_descriptor() {
        let catalog = SectionCatalog::standard();
        let mut ids: Vec<SectionId> = catalog.descriptors().iter().map(|d| d.id).collect();
        let total = ids.len();
        ids.sort();
        ids.dedup();
        assert_eq!(ids.len(), total);
    }

    #[test]
    fn header_sections_apply_everywhere() {
        let catalog = SectionCatalog::standard();
        for kind in DocumentKind::CLASSIFIABLE {
            assert!(catalog.is_section_supported(SectionId::Header, kind));
            assert!(catalog.is_section_supported(SectionId::Patient, kind));
        }
    }
}
