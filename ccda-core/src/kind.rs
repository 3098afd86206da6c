//! Loại tài liệu C-CDA và bảng nhận diện tương ứng.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// OID của hệ mã LOINC.
pub const LOINC_CODE_SYSTEM: &str = "2.16.840.1.113883.6.1";

/// Loại tài liệu lâm sàng, xác định một lần cho mỗi lần phân tích.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[serde(rename_all = "kebab-case")]
pub enum DocumentKind {
    ContinuityOfCare,
    CarePlan,
    ConsultationNote,
    DiagnosticImaging,
    DischargeSummary,
    HistoryAndPhysical,
    OperativeNote,
    ProcedureNote,
    ProgressNote,
    ReferralNote,
    TransferSummary,
    Unknown,
}

impl Default for DocumentKind {
    fn default() -> Self {
        DocumentKind::Unknown
    }
}

impl DocumentKind {
    /// Thứ tự ưu tiên khi phân loại: loại đầu tiên khớp sẽ thắng.
    pub const CLASSIFIABLE: [DocumentKind; 11] = [
        DocumentKind::ContinuityOfCare,
        DocumentKind::CarePlan,
        DocumentKind::ConsultationNote,
        DocumentKind::DiagnosticImaging,
        DocumentKind::DischargeSummary,
        DocumentKind::HistoryAndPhysical,
        DocumentKind::OperativeNote,
        DocumentKind::ProcedureNote,
        DocumentKind::ProgressNote,
        DocumentKind::ReferralNote,
        DocumentKind::TransferSummary,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            DocumentKind::ContinuityOfCare => "continuity-of-care",
            DocumentKind::CarePlan => "care-plan",
            DocumentKind::ConsultationNote => "consultation-note",
            DocumentKind::DiagnosticImaging => "diagnostic-imaging",
            DocumentKind::DischargeSummary => "discharge-summary",
            DocumentKind::HistoryAndPhysical => "history-and-physical",
            DocumentKind::OperativeNote => "operative-note",
            DocumentKind::ProcedureNote => "procedure-note",
            DocumentKind::ProgressNote => "progress-note",
            DocumentKind::ReferralNote => "referral-note",
            DocumentKind::TransferSummary => "transfer-summary",
            DocumentKind::Unknown => "unknown",
        }
    }

    /// templateId gốc của tài liệu (không tính extension).
    pub fn template_id(self) -> Option<&'static str> {
        let oid = match self {
            DocumentKind::ContinuityOfCare => "2.16.840.1.113883.10.20.22.1.2",
            DocumentKind::CarePlan => "2.16.840.1.113883.10.20.22.1.15",
            DocumentKind::ConsultationNote => "2.16.840.1.113883.10.20.22.1.4",
            DocumentKind::DiagnosticImaging => "2.16.840.1.113883.10.20.22.1.5",
            DocumentKind::DischargeSummary => "2.16.840.1.113883.10.20.22.1.8",
            DocumentKind::HistoryAndPhysical => "2.16.840.1.113883.10.20.22.1.3",
            DocumentKind::OperativeNote => "2.16.840.1.113883.10.20.22.1.7",
            DocumentKind::ProcedureNote => "2.16.840.1.113883.10.20.22.1.6",
            DocumentKind::ProgressNote => "2.16.840.1.113883.10.20.22.1.9",
            DocumentKind::ReferralNote => "2.16.840.1.113883.10.20.22.1.14",
            DocumentKind::TransferSummary => "2.16.840.1.113883.10.20.22.1.13",
            DocumentKind::Unknown => return None,
        };
        Some(oid)
    }

    /// Mã LOINC loại tài liệu.
    pub fn type_code(self) -> Option<&'static str> {
        let code = match self {
            DocumentKind::ContinuityOfCare => "34133-9",
            DocumentKind::CarePlan => "52521-2",
            DocumentKind::ConsultationNote => "11488-4",
            DocumentKind::DiagnosticImaging => "18748-4",
            DocumentKind::DischargeSummary => "18842-5",
            DocumentKind::HistoryAndPhysical => "34117-2",
            DocumentKind::OperativeNote => "11504-8",
            DocumentKind::ProcedureNote => "28570-0",
            DocumentKind::ProgressNote => "11506-3",
            DocumentKind::ReferralNote => "57133-1",
            DocumentKind::TransferSummary => "18761-7",
            DocumentKind::Unknown => return None,
        };
        Some(code)
    }

    pub fn display_name(self) -> &'static str {
        match self {
            DocumentKind::ContinuityOfCare => "Continuity of Care Document",
            DocumentKind::CarePlan => "Care Plan",
            DocumentKind::ConsultationNote => "Consultation Note",
            DocumentKind::DiagnosticImaging => "Diagnostic Imaging Report",
            DocumentKind::DischargeSummary => "Discharge Summary",
            DocumentKind::HistoryAndPhysical => "History and Physical",
            DocumentKind::OperativeNote => "Operative Note",
            DocumentKind::ProcedureNote => "Procedure Note",
            DocumentKind::ProgressNote => "Progress Note",
            DocumentKind::ReferralNote => "Referral Note",
            DocumentKind::TransferSummary => "Transfer Summary",
            DocumentKind::Unknown => "Unknown Document",
        }
    }

    pub fn description(self) -> &'static str {
        match self {
            DocumentKind::ContinuityOfCare => "Comprehensive clinical summary",
            DocumentKind::CarePlan => "Patient care planning and goals",
            DocumentKind::ConsultationNote => "Specialist consultation documentation",
            DocumentKind::DiagnosticImaging => "Radiology and imaging results",
            DocumentKind::DischargeSummary => "Hospital discharge documentation",
            DocumentKind::HistoryAndPhysical => "Clinical assessment and examination",
            DocumentKind::OperativeNote => "Surgical procedure documentation",
            DocumentKind::ProcedureNote => "Medical procedure documentation",
            DocumentKind::ProgressNote => "Ongoing care progress tracking",
            DocumentKind::ReferralNote => "Provider referral documentation",
            DocumentKind::TransferSummary => "Patient transfer documentation",
            DocumentKind::Unknown => "Unrecognized document type",
        }
    }

    pub fn is_known(self) -> bool {
        self != DocumentKind::Unknown
    }

    /// Tra loại tài liệu theo templateId gốc.
    pub fn from_template_id(template_id: &str) -> Option<DocumentKind> {
        Self::CLASSIFIABLE
            .into_iter()
            .find(|kind| kind.template_id() == Some(template_id))
    }

    /// Tra loại tài liệu theo mã LOINC.
    pub fn from_type_code(type_code: &str) -> Option<DocumentKind> {
        Self::CLASSIFIABLE
            .into_iter()
            .find(|kind| kind.type_code() == Some(type_code))
    }
}

impl fmt::Display for DocumentKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for DocumentKind {
    type Err = crate::CcdaError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        Self::CLASSIFIABLE
            .into_iter()
            .chain([DocumentKind::Unknown])
            .find(|kind| kind.as_str() == value)
            .ok_or_else(|| crate::CcdaError::Other(format!("Loại tài liệu không hợp lệ: {value}")))
    }
}
