//! Finds sections in the structured body.

use ccda_core::SectionDescriptor;
use serde_json::Value;

use crate::tree::{attr, child, children, has_template, path, text};

/// Immediate `section` nodes under `component/structuredBody/component`.
pub fn body_sections(document: &Value) -> Vec<&Value> {
    let components = path(Some(document), &["component", "structuredBody"]);
    children(components, "component")
        .into_iter()
        .filter_map(|component| child(Some(component), "section"))
        .collect()
}

/// First body section whose own templateId list contains `template_id`.
pub fn find_section<'a>(document: &'a Value, template_id: &str) -> Option<&'a Value> {
    body_sections(document)
        .into_iter()
        .find(|section| has_template(Some(section), template_id))
}

/// Candidates are tried in order; the first one found wins.
pub fn find_section_flexible<'a>(document: &'a Value, template_ids: &[&str]) -> Option<&'a Value> {
    template_ids
        .iter()
        .find_map(|template_id| find_section(document, template_id))
}

pub fn find_section_by_code<'a>(document: &'a Value, codes: &[&str]) -> Option<&'a Value> {
    body_sections(document).into_iter().find(|section| {
        attr(child(Some(section), "code"), "code")
            .map(|code| codes.contains(&code.as_str()))
            .unwrap_or(false)
    })
}

/// Case-insensitive substring match on the section title.
pub fn find_section_by_title<'a>(document: &'a Value, hints: &[&str]) -> Option<&'a Value> {
    body_sections(document).into_iter().find(|section| {
        text(child(Some(section), "title"))
            .map(|title| {
                let title = title.to_lowercase();
                hints.iter().any(|hint| title.contains(&hint.to_lowercase()))
            })
            .unwrap_or(false)
    })
}

/// How a section was located.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SectionMatch {
    Template(&'static str),
    Code,
    Title,
}

#[derive(Debug, Clone, Copy)]
pub struct LocatedSection<'a> {
    pub node: &'a Value,
    pub matched_by: SectionMatch,
}

impl LocatedSection<'_> {
    pub fn template_id(&self) -> Option<&'static str> {
        match self.matched_by {
            SectionMatch::Template(template_id) => Some(template_id),
            SectionMatch::Code | SectionMatch::Title => None,
        }
    }
}

/// Template candidates first, then LOINC codes, then title hints.
pub fn locate<'a>(
    document: &'a Value,
    descriptor: &SectionDescriptor,
    by_code: bool,
    by_title: bool,
) -> Option<LocatedSection<'a>> {
    for &template_id in descriptor.template_ids {
        if let Some(node) = find_section(document, template_id) {
            return Some(LocatedSection {
                node,
                matched_by: SectionMatch::Template(template_id),
            });
        }
    }

    if by_code && !descriptor.codes.is_empty() {
        if let Some(node) = find_section_by_code(document, descriptor.codes) {
            return Some(LocatedSection {
                node,
                matched_by: SectionMatch::Code,
            });
        }
    }

    if by_title && !descriptor.title_hints.is_empty() {
        if let Some(node) = find_section_by_title(document, descriptor.title_hints) {
            return Some(LocatedSection {
                node,
                matched_by: SectionMatch::Title,
            });
        }
    }

    None
}
