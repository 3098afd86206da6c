//! C-CDA release detection and kind/release compatibility checks.

use std::collections::HashMap;

use ccda_core::{
    DocumentKind, DocumentVersion, TemplateIdentifier, UpgradeRecommendation, VersionValidation,
};
use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::{debug, warn};

use crate::tree::{attr, children, collect_text, find_all};

pub const US_REALM_HEADER: &str = "2.16.840.1.113883.10.20.22.1.1";
const DOCUMENT_TEMPLATE_PREFIX: &str = "2.16.840.1.113883.10.20.22.1.";
const SECTION_TEMPLATE_PREFIX: &str = "2.16.840.1.113883.10.20.22.2.";

/// Header and document templates, keyed by `root:extension`.
static TEMPLATE_VERSIONS: Lazy<HashMap<String, DocumentVersion>> =
    Lazy::new(|| {
        const R2_1: &[u32] = &[1, 2, 3, 4, 5, 6, 7, 8, 9, 13, 14, 15];
        const R2_0: &[u32] = &[1, 2, 3, 4, 6, 7, 8, 9];
        const R1_1: &[u32] = &[1, 2, 3, 4, 6, 7, 8];

        let mut table = HashMap::new();
        for (version, leaves) in [
            (DocumentVersion::R2_1, R2_1),
            (DocumentVersion::R2_0, R2_0),
            (DocumentVersion::R1_1, R1_1),
        ] {
            let Some(date) = version.release_date() else {
                continue;
            };
            for leaf in leaves {
                table.insert(format!("{DOCUMENT_TEMPLATE_PREFIX}{leaf}:{date}"), version);
            }
        }
        table
    });

/// Release date anywhere in an extension, dashes optional. Newest release first.
static EXTENSION_PATTERNS: Lazy<Vec<(DocumentVersion, Regex)>> = Lazy::new(|| {
    DocumentVersion::KNOWN
        .into_iter()
        .filter_map(|version| {
            let date = version.release_date()?;
            let pattern = date.replace('-', "-?");
            Regex::new(&pattern).ok().map(|regex| (version, regex))
        })
        .collect()
});

/// Every `templateId` pair below `document`, the document's own ones first.
pub fn template_identifiers(document: &Value) -> Vec<TemplateIdentifier> {
    let own = children(Some(document), "templateId");
    let nested = find_all(document, "templateId")
        .into_iter()
        .filter(|template| !own.iter().any(|mine| std::ptr::eq(*mine, *template)));

    own.iter()
        .copied()
        .chain(nested)
        .filter_map(|template| {
            let root = attr(Some(template), "root")?;
            Some(TemplateIdentifier::new(root, attr(Some(template), "extension")))
        })
        .collect()
}

pub fn detect_version(document: &Value) -> DocumentVersion {
    let templates = template_identifiers(document);

    for template in &templates {
        let Some(extension) = template.extension.as_deref() else {
            continue;
        };
        let key = format!("{}:{extension}", template.root);
        if let Some(version) = TEMPLATE_VERSIONS.get(&key) {
            debug!(root = %template.root, extension, %version, "version matched by template table");
            return *version;
        }
    }

    for (version, pattern) in EXTENSION_PATTERNS.iter() {
        let matched = templates
            .iter()
            .filter_map(|template| template.extension.as_deref())
            .any(|extension| pattern.is_match(extension));
        if matched {
            debug!(%version, "version matched by extension pattern");
            return *version;
        }
    }

    let text = collect_text(Some(document));
    for version in DocumentVersion::KNOWN {
        let Some(date) = version.release_date() else {
            continue;
        };
        if text.iter().any(|piece| piece.contains(date)) {
            debug!(%version, "version matched by document text");
            return version;
        }
    }

    warn!(templates = templates.len(), "unable to detect C-CDA version");
    DocumentVersion::Unknown
}

pub fn validate_kind_for_version(version: DocumentVersion, kind: DocumentKind) -> VersionValidation {
    if !version.is_known() {
        return VersionValidation {
            valid: false,
            version,
            document_kind: kind,
            message: Some(format!("Unsupported C-CDA version: {version}")),
            supported_kinds: Vec::new(),
        };
    }

    let valid = version.supports(kind);
    VersionValidation {
        valid,
        version,
        document_kind: kind,
        message: (!valid)
            .then(|| format!("Document type '{kind}' not supported in C-CDA {version}")),
        supported_kinds: version.supported_kinds().to_vec(),
    }
}

pub fn validate_version(document: &Value, kind: DocumentKind) -> VersionValidation {
    validate_kind_for_version(detect_version(document), kind)
}

pub fn is_latest(version: DocumentVersion) -> bool {
    version == DocumentVersion::latest()
}

pub fn upgrade_recommendations(version: DocumentVersion) -> UpgradeRecommendation {
    let latest = DocumentVersion::latest();
    let mut recommendations = Vec::new();
    let upgrade_available = latest.is_newer_than(version);

    if upgrade_available && version.is_known() {
        let new_kinds: Vec<&str> = latest
            .supported_kinds()
            .iter()
            .filter(|kind| !version.supports(**kind))
            .map(|kind| kind.as_str())
            .collect();
        if !new_kinds.is_empty() {
            recommendations.push(format!(
                "New document types available: {}",
                new_kinds.join(", ")
            ));
        }
        recommendations.push("Enhanced template validation and parsing capabilities".to_string());
        recommendations.push("Improved clinical data structure support".to_string());
    }

    UpgradeRecommendation {
        upgrade_available,
        current_version: version,
        latest_version: latest,
        recommendations,
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Default)]
pub struct TemplateSummary {
    pub total_templates: usize,
    pub document_level_templates: usize,
    pub section_level_templates: usize,
    pub has_us_realm_header: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CompatibilityReport {
    pub detected_version: DocumentVersion,
    pub document_kind: DocumentKind,
    pub validation: VersionValidation,
    pub upgrade: UpgradeRecommendation,
    pub templates: Vec<TemplateIdentifier>,
    pub template_summary: TemplateSummary,
}

pub fn summarize_templates(templates: &[TemplateIdentifier]) -> TemplateSummary {
    TemplateSummary {
        total_templates: templates.len(),
        document_level_templates: templates
            .iter()
            .filter(|t| !t.matches_root(US_REALM_HEADER) && t.root.starts_with(DOCUMENT_TEMPLATE_PREFIX))
            .count(),
        section_level_templates: templates
            .iter()
            .filter(|t| t.root.starts_with(SECTION_TEMPLATE_PREFIX))
            .count(),
        has_us_realm_header: templates.iter().any(|t| t.matches_root(US_REALM_HEADER)),
    }
}

pub fn compatibility_report(document: &Value, kind: DocumentKind) -> CompatibilityReport {
    let version = detect_version(document);
    let templates = template_identifiers(document);
    CompatibilityReport {
        detected_version: version,
        document_kind: kind,
        validation: validate_kind_for_version(version, kind),
        upgrade: upgrade_recommendations(version),
        template_summary: summarize_templates(&templates),
        templates,
    }
}
