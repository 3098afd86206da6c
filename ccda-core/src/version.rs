//! Phiên bản C-CDA và siêu dữ liệu phát hành.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::DocumentKind;

/// Phiên bản C-CDA. Thứ tự khai báo chính là thứ tự so sánh.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum DocumentVersion {
    #[serde(rename = "unknown")]
    Unknown,
    #[serde(rename = "1.1")]
    R1_1,
    #[serde(rename = "2.0")]
    R2_0,
    #[serde(rename = "2.1")]
    R2_1,
}

impl Default for DocumentVersion {
    fn default() -> Self {
        DocumentVersion::Unknown
    }
}

const R2_1_KINDS: [DocumentKind; 11] = DocumentKind::CLASSIFIABLE;

const R2_0_KINDS: [DocumentKind; 7] = [
    DocumentKind::ContinuityOfCare,
    DocumentKind::ConsultationNote,
    DocumentKind::DischargeSummary,
    DocumentKind::HistoryAndPhysical,
    DocumentKind::OperativeNote,
    DocumentKind::ProcedureNote,
    DocumentKind::ProgressNote,
];

const R1_1_KINDS: [DocumentKind; 6] = [
    DocumentKind::ContinuityOfCare,
    DocumentKind::ConsultationNote,
    DocumentKind::DischargeSummary,
    DocumentKind::HistoryAndPhysical,
    DocumentKind::OperativeNote,
    DocumentKind::ProcedureNote,
];

impl DocumentVersion {
    /// Các phiên bản đã biết, mới nhất trước.
    pub const KNOWN: [DocumentVersion; 3] = [
        DocumentVersion::R2_1,
        DocumentVersion::R2_0,
        DocumentVersion::R1_1,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            DocumentVersion::Unknown => "unknown",
            DocumentVersion::R1_1 => "1.1",
            DocumentVersion::R2_0 => "2.0",
            DocumentVersion::R2_1 => "2.1",
        }
    }

    /// Ngày phát hành dùng làm extension của templateId.
    pub fn release_date(self) -> Option<&'static str> {
        match self {
            DocumentVersion::Unknown => None,
            DocumentVersion::R1_1 => Some("2012-01-06"),
            DocumentVersion::R2_0 => Some("2014-06-09"),
            DocumentVersion::R2_1 => Some("2015-08-01"),
        }
    }

    pub fn description(self) -> &'static str {
        match self {
            DocumentVersion::Unknown => "Unknown C-CDA release",
            DocumentVersion::R1_1 => "C-CDA Release 1.1",
            DocumentVersion::R2_0 => "C-CDA Release 2.0",
            DocumentVersion::R2_1 => "C-CDA Release 2.1",
        }
    }

    /// Loại tài liệu được hỗ trợ trong phiên bản này.
    pub fn supported_kinds(self) -> &'static [DocumentKind] {
        match self {
            DocumentVersion::Unknown => &[],
            DocumentVersion::R1_1 => &R1_1_KINDS,
            DocumentVersion::R2_0 => &R2_0_KINDS,
            DocumentVersion::R2_1 => &R2_1_KINDS,
        }
    }

    pub fn supports(self, kind: DocumentKind) -> bool {
        self.supported_kinds().contains(&kind)
    }

    pub fn is_known(self) -> bool {
        self != DocumentVersion::Unknown
    }

    pub fn latest() -> DocumentVersion {
        Self::KNOWN
            .into_iter()
            .max()
            .unwrap_or(DocumentVersion::Unknown)
    }

    pub fn is_newer_than(self, other: DocumentVersion) -> bool {
        self > other
    }
}

impl fmt::Display for DocumentVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for DocumentVersion {
    type Err = crate::CcdaError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim() {
            "unknown" => Ok(DocumentVersion::Unknown),
            "1.1" => Ok(DocumentVersion::R1_1),
            "2.0" => Ok(DocumentVersion::R2_0),
            "2.1" => Ok(DocumentVersion::R2_1),
            other => Err(crate::CcdaError::Other(format!(
                "Phiên bản C-CDA không hợp lệ: {other}"
            ))),
        }
    }
}

/// Kết quả kiểm tra loại tài liệu theo phiên bản. Chỉ mang tính cảnh báo.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
pub struct VersionValidation {
    pub valid: bool,
    pub version: DocumentVersion,
    pub document_kind: DocumentKind,
    pub message: Option<String>,
    pub supported_kinds: Vec<DocumentKind>,
}

/// Gợi ý nâng cấp lên phiên bản mới nhất.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct UpgradeRecommendation {
    pub upgrade_available: bool,
    pub current_version: DocumentVersion,
    pub latest_version: DocumentVersion,
    pub recommendations: Vec<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn versions_are_totally_ordered() {
        assert!(DocumentVersion::R2_1 > DocumentVersion::R2_0);
        assert!(DocumentVersion::R2_0 > DocumentVersion::R1_1);
        assert!(DocumentVersion::R1_1 > DocumentVersion::Unknown);
        assert_eq!(DocumentVersion::latest(), DocumentVersion::R2_1);
    }

    #[test]
    fn serializes_release_numbers() {
        let json = serde_json::to_string(&DocumentVersion::R2_1).expect("serialize");
        assert_eq!(json, "\"2.1\"");
        let parsed: DocumentVersion = "2.0".parse().expect("parse");
        assert_eq!(parsed, DocumentVersion::R2_0);
    }

    #[test]
    fn care_plan_only_in_latest_release() {
        assert!(DocumentVersion::R2_1.supports(DocumentKind::CarePlan));
        assert!(!DocumentVersion::R2_0.supports(DocumentKind::CarePlan));
        assert!(!DocumentVersion::Unknown.supports(DocumentKind::ContinuityOfCare));
    }
}
