//! Narrative-only sections and their structured blocks.

use ccda_core::{DiagnosisSection, NarrativeBlock, NarrativeSection};
use serde_json::Value;

use super::common::section_entries;
use super::entries::problem;
use crate::tree::{as_sequence, attr, child, narrative_text, text};

/// Section title, flattened text, list/paragraph blocks and code.
pub(crate) fn narrative_section(section: &Value) -> NarrativeSection {
    let node = Some(section);
    let body = child(node, "text");
    NarrativeSection {
        title: text(child(node, "title")),
        text: narrative_text(body),
        structured_text: structured_text(body),
        code: attr(child(node, "code"), "code"),
        code_system: attr(child(node, "code"), "codeSystem"),
    }
}

/// Lists then paragraphs found directly under `<text>`.
pub fn structured_text(body: Option<&Value>) -> Vec<NarrativeBlock> {
    let mut blocks = Vec::new();

    for list in as_sequence(child(body, "list")) {
        let items: Vec<String> = as_sequence(child(Some(list), "item"))
            .into_iter()
            .filter_map(|item| narrative_text(Some(item)))
            .collect();
        if !items.is_empty() {
            blocks.push(NarrativeBlock::List { items });
        }
    }

    for paragraph in as_sequence(child(body, "paragraph")) {
        if let Some(text) = narrative_text(Some(paragraph)) {
            blocks.push(NarrativeBlock::Paragraph { text });
        }
    }

    blocks
}

/// Narrative plus problem-shaped diagnoses from the entries.
pub(crate) fn diagnosis_section(section: &Value) -> DiagnosisSection {
    DiagnosisSection {
        narrative: narrative_section(section),
        diagnoses: section_entries(section)
            .into_iter()
            .filter_map(problem)
            .collect(),
    }
}
