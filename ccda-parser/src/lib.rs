//! C-CDA tree to `ClinicalDocument` extraction: document kind and release
//! detection, section lookup, and per-section entry routines.

use ccda_core::{CcdaError, ClinicalDocument, ExtractConfig, SectionCatalog};
use serde_json::Value;

pub mod classify;
pub mod extract;
pub mod locate;
pub mod tree;
pub mod version;

pub use classify::{detect_document_type, validate_document_kind};
pub use extract::ClinicalExtractor;
pub use locate::{find_section, find_section_by_code, find_section_by_title, find_section_flexible};
pub use version::{compatibility_report, detect_version, validate_version, CompatibilityReport};

/// Extract a document from the parsed tree serialized as JSON text.
pub fn extract_document_str(
    tree_json: &str,
    catalog: &SectionCatalog,
    config: &ExtractConfig,
) -> Result<ClinicalDocument, CcdaError> {
    let value: Value =
        serde_json::from_str(tree_json).map_err(|err| CcdaError::Parse(err.to_string()))?;
    extract_document_value(&value, catalog, config)
}

/// Extract a document from a `serde_json::Value` tree.
pub fn extract_document_value(
    tree: &Value,
    catalog: &SectionCatalog,
    config: &ExtractConfig,
) -> Result<ClinicalDocument, CcdaError> {
    ClinicalExtractor::new(catalog, config.clone()).extract(tree)
}
