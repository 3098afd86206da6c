//! Mô hình lõi cho việc đọc tài liệu C-CDA: loại tài liệu, phiên bản,
//! danh mục section và cấu trúc kết quả trích xuất.

use serde::{Deserialize, Serialize};

pub mod catalog;
pub mod cda_time;
pub mod kind;
pub mod model;
pub mod version;

pub use catalog::{
    Applicability, CatalogStats, MissingSection, SectionCatalog, SectionDescriptor, SectionId,
};
pub use kind::{DocumentKind, LOINC_CODE_SYSTEM};
pub use model::*;
pub use version::{DocumentVersion, UpgradeRecommendation, VersionValidation};

/// Cấu hình cho quá trình trích xuất.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct ExtractConfig {
    /// Giữ lại cây `ClinicalDocument` gốc trong kết quả.
    pub retain_raw: bool,
    /// Loại tài liệu dùng khi không nhận diện được.
    pub unknown_kind_fallback: DocumentKind,
    /// Cho phép tìm section theo tiêu đề khi không khớp templateId.
    pub match_section_titles: bool,
    /// Cho phép tìm section theo mã LOINC khi không khớp templateId.
    pub match_section_codes: bool,
}

impl Default for ExtractConfig {
    fn default() -> Self {
        Self {
            retain_raw: true,
            unknown_kind_fallback: DocumentKind::ContinuityOfCare,
            match_section_titles: true,
            match_section_codes: true,
        }
    }
}

/// Lỗi chung khi đọc tài liệu.
#[derive(Debug, thiserror::Error)]
pub enum CcdaError {
    #[error("Tài liệu không hợp lệ: {0}")]
    DocumentFormat(String),
    #[error("Không đọc được dữ liệu: {0}")]
    Parse(String),
    #[error("Lỗi khác: {0}")]
    Other(String),
}

/// Tài liệu rỗng với metadata mặc định (dùng cho mock/testing).
pub fn empty_document() -> ClinicalDocument {
    ClinicalDocument::default()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn partial_config_keeps_defaults() {
        let config: ExtractConfig =
            serde_json::from_str(r#"{ "retain_raw": false }"#).expect("config");
        assert!(!config.retain_raw);
        assert_eq!(config.unknown_kind_fallback, DocumentKind::ContinuityOfCare);
        assert!(config.match_section_titles);
    }

    #[test]
    fn template_equivalence_needs_root_and_extension() {
        let r21 = TemplateIdentifier::new("2.16.840.1.113883.10.20.22.1.2", Some("2015-08-01".into()));
        let r11 = TemplateIdentifier::new("2.16.840.1.113883.10.20.22.1.2", None);

        assert!(r21.matches_root("2.16.840.1.113883.10.20.22.1.2"));
        assert!(r11.matches_root("2.16.840.1.113883.10.20.22.1.2"));
        assert!(!r21.is_version_equivalent(&r11));
        assert!(r21.is_version_equivalent(&r21.clone()));
        assert!(!r21.is_version_equivalent(&TemplateIdentifier::new(
            "2.16.840.1.113883.10.20.22.1.1",
            Some("2015-08-01".into())
        )));
    }

    #[test]
    fn empty_document_has_no_sections() {
        let document = empty_document();
        assert!(document.allergies.is_empty());
        assert!(!document.is_section_populated(SectionId::Patient));
        assert_eq!(document.metadata.document_kind, DocumentKind::Unknown);
    }
}
