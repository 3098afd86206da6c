//! Document kind detection from template roots and LOINC type codes.

use ccda_core::{DocumentKind, LOINC_CODE_SYSTEM};
use serde_json::Value;
use tracing::{debug, warn};

use crate::tree::{attr, find_all};

/// Template roots found anywhere in the document, de-duplicated, document order.
pub fn document_template_roots(document: &Value) -> Vec<String> {
    let mut roots: Vec<String> = Vec::new();
    for template in find_all(document, "templateId") {
        if let Some(root) = attr(Some(template), "root") {
            if !roots.contains(&root) {
                roots.push(root);
            }
        }
    }
    roots
}

/// LOINC codes found anywhere in the document, de-duplicated, document order.
pub fn document_loinc_codes(document: &Value) -> Vec<String> {
    let mut codes: Vec<String> = Vec::new();
    for code in find_all(document, "code") {
        if attr(Some(code), "codeSystem").as_deref() != Some(LOINC_CODE_SYSTEM) {
            continue;
        }
        if let Some(value) = attr(Some(code), "code") {
            if !codes.contains(&value) {
                codes.push(value);
            }
        }
    }
    codes
}

/// Classifies a `ClinicalDocument` node. Kinds are tried in priority order;
/// for each, the template root is checked before the LOINC type code.
pub fn detect_document_type(document: &Value) -> DocumentKind {
    let templates = document_template_roots(document);
    let codes = document_loinc_codes(document);

    for kind in DocumentKind::CLASSIFIABLE {
        if let Some(template_id) = kind.template_id() {
            if templates.iter().any(|root| root == template_id) {
                debug!(%kind, template_id, "document kind matched by template");
                return kind;
            }
        }
        if let Some(type_code) = kind.type_code() {
            if codes.iter().any(|code| code == type_code) {
                debug!(%kind, type_code, "document kind matched by LOINC code");
                return kind;
            }
        }
    }

    warn!(?templates, ?codes, "unknown document kind");
    DocumentKind::Unknown
}

pub fn kind_by_template_id(template_id: &str) -> Option<DocumentKind> {
    DocumentKind::from_template_id(template_id)
}

pub fn kind_by_type_code(type_code: &str) -> Option<DocumentKind> {
    DocumentKind::from_type_code(type_code)
}

pub fn validate_document_kind(document: &Value, expected: DocumentKind) -> bool {
    detect_document_type(document) == expected
}
