//! Mô hình dữ liệu chuẩn hóa của một tài liệu C-CDA sau khi trích xuất.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::catalog::SectionId;
use crate::{DocumentKind, DocumentVersion, VersionValidation};

/// Định danh template CDA.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TemplateIdentifier {
    pub root: String,
    pub extension: Option<String>,
}

impl TemplateIdentifier {
    pub fn new(root: impl Into<String>, extension: Option<String>) -> Self {
        Self {
            root: root.into(),
            extension,
        }
    }

    /// So khớp chỉ theo root, dùng cho nhận diện loại tài liệu.
    pub fn matches_root(&self, root: &str) -> bool {
        self.root == root
    }

    /// Tương đương phiên bản khi cả root và extension đều trùng.
    pub fn is_version_equivalent(&self, other: &TemplateIdentifier) -> bool {
        self.root == other.root && self.extension == other.extension
    }
}

/// Giá trị mã hóa (CD/CE).
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Default)]
pub struct CodedValue {
    pub code: Option<String>,
    pub code_system: Option<String>,
    pub code_system_name: Option<String>,
    pub display_name: Option<String>,
}

impl CodedValue {
    /// Nhãn hiển thị: displayName, nếu không có thì mã.
    pub fn label(&self) -> Option<&str> {
        self.display_name.as_deref().or(self.code.as_deref())
    }

    pub fn is_empty(&self) -> bool {
        self.code.is_none() && self.display_name.is_none()
    }
}

/// Loại định danh bệnh nhân suy ra từ OID gốc.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum IdentifierType {
    Ssn,
    Npi,
    Tin,
    DriversLicense,
    Passport,
    Medicare,
    Mrn,
}

impl IdentifierType {
    pub fn label(self) -> &'static str {
        match self {
            IdentifierType::Ssn => "SSN",
            IdentifierType::Npi => "NPI",
            IdentifierType::Tin => "TIN",
            IdentifierType::DriversLicense => "Driver's License",
            IdentifierType::Passport => "Passport",
            IdentifierType::Medicare => "Medicare",
            IdentifierType::Mrn => "MRN",
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PatientIdentifier {
    pub root: Option<String>,
    pub extension: Option<String>,
    pub assigning_authority: Option<String>,
    pub id_type: IdentifierType,
}

/// Tên có cấu trúc (tiền tố, tên, họ, hậu tố).
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
pub struct PersonName {
    pub use_code: Option<String>,
    pub prefix: Vec<String>,
    pub given: Vec<String>,
    pub family: Option<String>,
    pub suffix: Vec<String>,
    pub qualifiers: Vec<String>,
    pub full: String,
}

impl PersonName {
    pub fn first(&self) -> Option<&str> {
        self.given.first().map(String::as_str)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
pub struct Address {
    pub lines: Vec<String>,
    pub city: Option<String>,
    pub state: Option<String>,
    pub postal_code: Option<String>,
    pub country: Option<String>,
    pub use_code: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Telecom {
    pub value: String,
    pub use_code: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
pub struct Organization {
    pub name: Option<String>,
    pub address: Option<Address>,
    pub telecom: Vec<Telecom>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
pub struct Author {
    pub id: Option<String>,
    pub time: Option<String>,
    pub name: Option<PersonName>,
    pub organization: Option<Organization>,
}

impl Author {
    /// "Tên (Tổ chức)" như cách hiển thị người ghi chú.
    pub fn display(&self) -> Option<String> {
        let name = self
            .name
            .as_ref()
            .map(|name| name.full.clone())
            .filter(|full| !full.is_empty());
        let org = self
            .organization
            .as_ref()
            .and_then(|org| org.name.clone());
        match (name, org) {
            (Some(name), Some(org)) => Some(format!("{name} ({org})")),
            (Some(name), None) => Some(name),
            (None, org) => org,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
pub struct Performer {
    pub id: Option<String>,
    pub name: Option<PersonName>,
    pub role: Option<String>,
    pub organization: Option<Organization>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
pub struct Guardian {
    pub name: Option<PersonName>,
    pub relationship: Option<String>,
    pub telecom: Vec<Telecom>,
    pub address: Option<Address>,
}

/// Thông tin đầu tài liệu.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
pub struct DocumentHeader {
    pub id: Option<String>,
    pub set_id: Option<String>,
    pub version_number: Option<String>,
    pub title: Option<String>,
    pub code: Option<CodedValue>,
    pub effective_time: Option<String>,
    pub confidentiality_code: Option<String>,
    pub language_code: Option<String>,
    pub template_ids: Vec<TemplateIdentifier>,
    pub author: Option<Author>,
    pub custodian: Option<String>,
}

/// Thông tin bệnh nhân từ recordTarget.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
pub struct Patient {
    pub id: Option<String>,
    pub mrn: Option<String>,
    pub identifiers: Vec<PatientIdentifier>,
    pub name: Option<PersonName>,
    pub gender: Option<String>,
    pub date_of_birth: Option<String>,
    pub race: Option<String>,
    pub ethnicity: Option<String>,
    pub language: Option<String>,
    pub marital_status: Option<String>,
    pub addresses: Vec<Address>,
    pub telecom: Vec<Telecom>,
    pub guardians: Vec<Guardian>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Allergy {
    pub id: Option<String>,
    pub substance: String,
    pub substance_code: Option<CodedValue>,
    pub allergy_type: Option<String>,
    pub reaction: Option<String>,
    pub severity: Option<String>,
    pub status: Option<String>,
    pub onset_date: Option<String>,
    pub notes: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Medication {
    pub id: Option<String>,
    pub name: String,
    pub generic_name: Option<String>,
    pub code: Option<CodedValue>,
    pub dosage: Option<String>,
    pub frequency: Option<String>,
    pub route: Option<String>,
    pub status: Option<String>,
    pub start_date: Option<String>,
    pub end_date: Option<String>,
    pub prescriber: Option<String>,
    pub instructions: Option<String>,
    pub refills: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Problem {
    pub id: Option<String>,
    pub name: String,
    pub code: Option<CodedValue>,
    pub status: Option<String>,
    pub clinical_status: Option<String>,
    pub onset_date: Option<String>,
    pub resolved_date: Option<String>,
    pub severity: Option<String>,
    pub notes: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Procedure {
    pub id: Option<String>,
    pub name: String,
    pub code: Option<CodedValue>,
    pub date: Option<String>,
    pub status: Option<String>,
    pub performer: Option<Performer>,
    pub body_site: Option<String>,
    pub notes: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Encounter {
    pub id: Option<String>,
    pub encounter_type: String,
    pub code: Option<CodedValue>,
    pub date: Option<String>,
    pub end_date: Option<String>,
    pub provider: Option<Performer>,
    pub location: Option<String>,
    pub reason: Option<String>,
    pub discharge_disposition: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Immunization {
    pub id: Option<String>,
    pub vaccine: String,
    pub code: Option<CodedValue>,
    pub date: Option<String>,
    pub status: Option<String>,
    pub refused: bool,
    pub route: Option<String>,
    pub site: Option<String>,
    pub lot_number: Option<String>,
    pub manufacturer: Option<String>,
    pub performer: Option<Performer>,
}

/// Một giá trị đo kèm đơn vị.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Measurement {
    pub value: String,
    pub unit: Option<String>,
}

/// Chỉ số không thuộc ô cố định nào.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct VitalReading {
    pub code: Option<String>,
    pub name: Option<String>,
    pub measurement: Measurement,
}

/// Một lần đo chỉ số sống, gom theo organizer.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
pub struct VitalSignPanel {
    pub id: Option<String>,
    pub date: Option<String>,
    pub systolic_bp: Option<Measurement>,
    pub diastolic_bp: Option<Measurement>,
    pub heart_rate: Option<Measurement>,
    pub respiratory_rate: Option<Measurement>,
    pub temperature: Option<Measurement>,
    pub height: Option<Measurement>,
    pub weight: Option<Measurement>,
    pub bmi: Option<Measurement>,
    pub oxygen_saturation: Option<Measurement>,
    pub head_circumference: Option<Measurement>,
    pub other: Vec<VitalReading>,
}

impl VitalSignPanel {
    pub fn reading_count(&self) -> usize {
        [
            &self.systolic_bp,
            &self.diastolic_bp,
            &self.heart_rate,
            &self.respiratory_rate,
            &self.temperature,
            &self.height,
            &self.weight,
            &self.bmi,
            &self.oxygen_saturation,
            &self.head_circumference,
        ]
        .iter()
        .filter(|slot| slot.is_some())
        .count()
            + self.other.len()
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct LabResult {
    pub id: Option<String>,
    pub test: String,
    pub code: Option<CodedValue>,
    pub value: Option<String>,
    pub unit: Option<String>,
    pub interpretation: Option<String>,
    pub reference_range: Option<String>,
    pub status: Option<String>,
    pub date: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct LabPanel {
    pub id: Option<String>,
    pub panel: Option<String>,
    pub code: Option<CodedValue>,
    pub status: Option<String>,
    pub date: Option<String>,
    pub results: Vec<LabResult>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SocialHistoryObservation {
    pub id: Option<String>,
    pub observation_type: String,
    pub code: Option<CodedValue>,
    pub value: Option<String>,
    pub status: Option<String>,
    pub date: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct FunctionalStatusObservation {
    pub id: Option<String>,
    pub assessment: String,
    pub result: Option<String>,
    pub date: Option<String>,
    pub status: Option<String>,
}

/// Dạng act HL7 của một mục kế hoạch.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum PlanActivity {
    Act,
    Observation,
    Procedure,
    Encounter,
    SubstanceAdministration,
    Supply,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PlanItem {
    pub id: Option<String>,
    pub plan: String,
    pub activity: PlanActivity,
    pub mood_code: Option<String>,
    pub planned_date: Option<String>,
    pub status: Option<String>,
    pub notes: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Note {
    pub id: Option<String>,
    pub note_type: String,
    pub content: String,
    pub date: Option<String>,
    pub author: Option<String>,
    pub status: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct AdvanceDirective {
    pub id: Option<String>,
    pub directive_type: String,
    pub value: Option<String>,
    pub status: Option<String>,
    pub effective_date: Option<String>,
    pub custodian: Option<String>,
    pub description: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct AssessmentItem {
    pub id: Option<String>,
    pub assessment: String,
    pub date: Option<String>,
    pub clinician: Option<String>,
    pub findings: Option<String>,
    pub status: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ChiefComplaint {
    pub id: String,
    pub complaint: String,
    pub date: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct FamilyCondition {
    pub condition: String,
    pub code: Option<CodedValue>,
    pub onset_age: Option<String>,
    pub status: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct FamilyHistoryEntry {
    pub id: Option<String>,
    pub relationship: String,
    pub relative_gender: Option<String>,
    pub conditions: Vec<FamilyCondition>,
    pub status: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Goal {
    pub id: Option<String>,
    pub goal: String,
    pub priority: Option<String>,
    pub status: Option<String>,
    pub start_date: Option<String>,
    pub target_date: Option<String>,
    pub progress: Option<String>,
    pub author: Option<String>,
    pub notes: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct HealthConcern {
    pub id: Option<String>,
    pub concern: String,
    pub category: Option<String>,
    pub status: Option<String>,
    pub date: Option<String>,
    pub author: Option<String>,
    pub priority: Option<String>,
    pub notes: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Intervention {
    pub id: Option<String>,
    pub intervention: String,
    pub status: Option<String>,
    pub planned_date: Option<String>,
    pub completed_date: Option<String>,
    pub author: Option<String>,
    pub notes: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Instruction {
    pub id: Option<String>,
    pub instruction: String,
    pub code: Option<CodedValue>,
    pub status: Option<String>,
    pub date: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct MedicalDevice {
    pub id: Option<String>,
    pub device: String,
    pub code: Option<CodedValue>,
    pub manufacturer: Option<String>,
    pub model: Option<String>,
    pub date: Option<String>,
    pub status: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct MentalStatusObservation {
    pub id: Option<String>,
    pub assessment: String,
    pub result: Option<String>,
    pub date: Option<String>,
    pub examiner: Option<Performer>,
    pub status: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct NutritionObservation {
    pub id: Option<String>,
    pub diet_type: String,
    pub restrictions: Option<String>,
    pub calories: Option<String>,
    pub protein: Option<String>,
    pub date: Option<String>,
    pub status: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Payer {
    pub id: Option<String>,
    pub payer_name: Option<String>,
    pub policy_number: Option<String>,
    pub group_number: Option<String>,
    pub policy_type: Option<String>,
    pub effective_date: Option<String>,
    pub expiration_date: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PhysicalExamFinding {
    pub id: Option<String>,
    pub body_system: String,
    pub findings: Option<String>,
    pub abnormal: bool,
    pub date: Option<String>,
    pub examiner: Option<Performer>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ReasonForVisit {
    pub id: String,
    pub reason: String,
    pub date: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ReviewOfSystemsFinding {
    pub id: Option<String>,
    pub system: String,
    pub findings: Option<String>,
    pub status: Option<String>,
    pub date: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Anesthesia {
    pub id: Option<String>,
    pub anesthesia_type: String,
    pub code: Option<CodedValue>,
    pub performer: Option<Performer>,
    pub start_time: Option<String>,
    pub end_time: Option<String>,
    pub notes: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Complication {
    pub id: Option<String>,
    pub complication: String,
    pub severity: Option<String>,
    pub date: Option<String>,
    pub status: Option<String>,
    pub notes: Option<String>,
}

/// Một study trong DICOM Object Catalog.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct DicomStudy {
    pub id: Option<String>,
    pub study_instance_uid: String,
    pub study_date: Option<String>,
    pub modality: Option<String>,
    pub accession_number: Option<String>,
    pub description: Option<String>,
    pub series_count: usize,
    pub image_count: usize,
}

/// Khối văn bản tường thuật có cấu trúc.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum NarrativeBlock {
    List { items: Vec<String> },
    Paragraph { text: String },
}

/// Section chỉ có văn bản tường thuật.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
pub struct NarrativeSection {
    pub title: Option<String>,
    pub text: Option<String>,
    pub structured_text: Vec<NarrativeBlock>,
    pub code: Option<String>,
    pub code_system: Option<String>,
}

/// Section chẩn đoán: văn bản kèm các chẩn đoán có cấu trúc.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
pub struct DiagnosisSection {
    pub narrative: NarrativeSection,
    pub diagnoses: Vec<Problem>,
}

/// Thông tin về section đã tìm thấy trong cây.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
pub struct SectionMetadata {
    pub template_id: Option<String>,
    pub title: Option<String>,
    pub code: Option<CodedValue>,
    pub narrative: Option<String>,
    pub entry_count: usize,
}

/// Cảnh báo không làm dừng quá trình trích xuất.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ExtractionWarning {
    UnknownDocumentKind { fallback: DocumentKind },
    UnknownVersion,
    UnsupportedKindForVersion { message: String },
    MissingRequiredSection { section: SectionId, label: String },
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
pub struct DocumentMetadata {
    /// Loại tài liệu nhận diện được (có thể là `unknown`).
    pub document_kind: DocumentKind,
    /// Loại tài liệu thực sự dùng để chọn section.
    pub effective_kind: DocumentKind,
    pub document_version: DocumentVersion,
    pub validation: VersionValidation,
    pub supported_sections: Vec<SectionId>,
    pub warnings: Vec<ExtractionWarning>,
}

/// Kết quả trích xuất của một tài liệu.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
pub struct ClinicalDocument {
    pub header: DocumentHeader,
    pub patient: Option<Patient>,

    pub allergies: Vec<Allergy>,
    pub medications: Vec<Medication>,
    pub problems: Vec<Problem>,
    pub procedures: Vec<Procedure>,
    pub encounters: Vec<Encounter>,
    pub immunizations: Vec<Immunization>,
    pub vital_signs: Vec<VitalSignPanel>,
    pub lab_results: Vec<LabPanel>,
    pub social_history: Vec<SocialHistoryObservation>,
    pub functional_status: Vec<FunctionalStatusObservation>,
    pub plan_of_care: Vec<PlanItem>,
    pub notes: Vec<Note>,
    pub advance_directives: Vec<AdvanceDirective>,
    pub assessment: Vec<AssessmentItem>,
    pub chief_complaint: Vec<ChiefComplaint>,
    pub family_history: Vec<FamilyHistoryEntry>,
    pub goals: Vec<Goal>,
    pub health_concerns: Vec<HealthConcern>,
    pub interventions: Vec<Intervention>,
    pub instructions: Vec<Instruction>,
    pub medical_equipment: Vec<MedicalDevice>,
    pub mental_status: Vec<MentalStatusObservation>,
    pub nutrition: Vec<NutritionObservation>,
    pub payers: Vec<Payer>,
    pub physical_exam: Vec<PhysicalExamFinding>,
    pub reason_for_visit: Vec<ReasonForVisit>,
    pub review_of_systems: Vec<ReviewOfSystemsFinding>,

    pub present_illness: Option<NarrativeSection>,
    pub preoperative_diagnosis: Option<DiagnosisSection>,
    pub postoperative_diagnosis: Option<DiagnosisSection>,
    pub procedure_description: Option<NarrativeSection>,
    pub anesthesia: Vec<Anesthesia>,
    pub complications: Vec<Complication>,
    pub blood_loss: Option<NarrativeSection>,
    pub surgical_specimens: Option<NarrativeSection>,
    pub procedure_indications: Option<NarrativeSection>,
    pub procedure_findings: Option<NarrativeSection>,
    pub admission_diagnosis: Option<DiagnosisSection>,
    pub discharge_diagnosis: Option<DiagnosisSection>,
    pub hospital_course: Option<NarrativeSection>,
    pub discharge_instructions: Option<NarrativeSection>,
    pub hospital_consultations: Option<NarrativeSection>,
    pub dicom_catalog: Vec<DicomStudy>,
    pub findings: Option<NarrativeSection>,
    pub impressions: Option<NarrativeSection>,
    pub reason_for_referral: Option<NarrativeSection>,
    pub consultation_request: Option<NarrativeSection>,
    pub recommendations: Option<NarrativeSection>,
    pub plan_of_treatment: Option<NarrativeSection>,
    pub subjective_data: Option<NarrativeSection>,
    pub objective_data: Option<NarrativeSection>,
    pub referral_request: Option<NarrativeSection>,
    pub referring_provider: Option<NarrativeSection>,
    pub transfer_diagnosis: Option<NarrativeSection>,
    pub transfer_summary: Option<NarrativeSection>,
    pub receiving_provider: Option<NarrativeSection>,

    pub section_metadata: BTreeMap<SectionId, SectionMetadata>,
    pub metadata: DocumentMetadata,
    /// Cây gốc `ClinicalDocument`, giữ nguyên để truy vết.
    pub raw: Option<Value>,
}

impl ClinicalDocument {
    /// Trường tương ứng với section có dữ liệu hay không (không rỗng).
    pub fn is_section_populated(&self, id: SectionId) -> bool {
        match id {
            SectionId::Header => true,
            SectionId::Patient => self.patient.is_some(),
            SectionId::Allergies => !self.allergies.is_empty(),
            SectionId::Medications => !self.medications.is_empty(),
            SectionId::Problems => !self.problems.is_empty(),
            SectionId::Procedures => !self.procedures.is_empty(),
            SectionId::Encounters => !self.encounters.is_empty(),
            SectionId::Immunizations => !self.immunizations.is_empty(),
            SectionId::VitalSigns => !self.vital_signs.is_empty(),
            SectionId::LabResults => !self.lab_results.is_empty(),
            SectionId::SocialHistory => !self.social_history.is_empty(),
            SectionId::FunctionalStatus => !self.functional_status.is_empty(),
            SectionId::PlanOfCare => !self.plan_of_care.is_empty(),
            SectionId::Notes => !self.notes.is_empty(),
            SectionId::AdvanceDirectives => !self.advance_directives.is_empty(),
            SectionId::Assessment => !self.assessment.is_empty(),
            SectionId::ChiefComplaint => !self.chief_complaint.is_empty(),
            SectionId::FamilyHistory => !self.family_history.is_empty(),
            SectionId::Goals => !self.goals.is_empty(),
            SectionId::HealthConcerns => !self.health_concerns.is_empty(),
            SectionId::Interventions => !self.interventions.is_empty(),
            SectionId::Instructions => !self.instructions.is_empty(),
            SectionId::MedicalEquipment => !self.medical_equipment.is_empty(),
            SectionId::MentalStatus => !self.mental_status.is_empty(),
            SectionId::Nutrition => !self.nutrition.is_empty(),
            SectionId::Payers => !self.payers.is_empty(),
            SectionId::PhysicalExam => !self.physical_exam.is_empty(),
            SectionId::ReasonForVisit => !self.reason_for_visit.is_empty(),
            SectionId::ReviewOfSystems => !self.review_of_systems.is_empty(),
            SectionId::PresentIllness => self.present_illness.is_some(),
            SectionId::PreoperativeDiagnosis => self.preoperative_diagnosis.is_some(),
            SectionId::PostoperativeDiagnosis => self.postoperative_diagnosis.is_some(),
            SectionId::ProcedureDescription => self.procedure_description.is_some(),
            SectionId::Anesthesia => !self.anesthesia.is_empty(),
            SectionId::Complications => !self.complications.is_empty(),
            SectionId::BloodLoss => self.blood_loss.is_some(),
            SectionId::SurgicalSpecimens => self.surgical_specimens.is_some(),
            SectionId::ProcedureIndications => self.procedure_indications.is_some(),
            SectionId::ProcedureFindings => self.procedure_findings.is_some(),
            SectionId::AdmissionDiagnosis => self.admission_diagnosis.is_some(),
            SectionId::DischargeDiagnosis => self.discharge_diagnosis.is_some(),
            SectionId::HospitalCourse => self.hospital_course.is_some(),
            SectionId::DischargeInstructions => self.discharge_instructions.is_some(),
            SectionId::HospitalConsultations => self.hospital_consultations.is_some(),
            SectionId::DicomCatalog => !self.dicom_catalog.is_empty(),
            SectionId::Findings => self.findings.is_some(),
            SectionId::Impressions => self.impressions.is_some(),
            SectionId::ReasonForReferral => self.reason_for_referral.is_some(),
            SectionId::ConsultationRequest => self.consultation_request.is_some(),
            SectionId::Recommendations => self.recommendations.is_some(),
            SectionId::PlanOfTreatment => self.plan_of_treatment.is_some(),
            SectionId::SubjectiveData => self.subjective_data.is_some(),
            SectionId::ObjectiveData => self.objective_data.is_some(),
            SectionId::ReferralRequest => self.referral_request.is_some(),
            SectionId::ReferringProvider => self.referring_provider.is_some(),
            SectionId::TransferDiagnosis => self.transfer_diagnosis.is_some(),
            SectionId::TransferSummary => self.transfer_summary.is_some(),
            SectionId::ReceivingProvider => self.receiving_provider.is_some(),
        }
    }

    /// Văn bản tường thuật của một section đã tìm thấy.
    pub fn narrative(&self, id: SectionId) -> Option<&str> {
        self.section_metadata
            .get(&id)
            .and_then(|meta| meta.narrative.as_deref())
    }
}
