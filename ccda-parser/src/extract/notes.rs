//! Clinical notes, assessment and the single-item narrative sections.

use ccda_core::{AssessmentItem, ChiefComplaint, Note, ReasonForVisit};
use serde_json::Value;

use super::common::{
    author_display, code_label, effective_time, entry_act, entry_text, identifier,
    section_entries, status_code,
};
use crate::tree::{child, children, narrative_text};

const UNKNOWN_AUTHOR: &str = "Unknown";

/// Section text as one note, then one note per act with content.
pub(crate) fn notes(section: &Value) -> Vec<Note> {
    let mut notes = Vec::new();

    if let Some(content) = narrative_text(child(Some(section), "text")) {
        notes.push(Note {
            id: Some("section-text".to_string()),
            note_type: "Section Text".to_string(),
            content,
            date: None,
            author: Some(UNKNOWN_AUTHOR.to_string()),
            status: None,
        });
    }

    notes.extend(
        section_entries(section)
            .into_iter()
            .filter_map(|entry| entry_act(entry, &["act", "observation", "encounter"]))
            .filter_map(note),
    );
    notes
}

fn note(act: &Value) -> Option<Note> {
    let node = Some(act);
    let content = entry_text(node)
        .into_iter()
        .chain(
            children(node, "entryRelationship")
                .into_iter()
                .filter_map(|relationship| {
                    let related = ["act", "observation"]
                        .iter()
                        .find_map(|shape| child(Some(relationship), shape));
                    entry_text(related)
                }),
        )
        .collect::<Vec<_>>()
        .join("\n\n");
    if content.is_empty() {
        return None;
    }

    Some(Note {
        id: identifier(node),
        note_type: code_label(node, "code").unwrap_or_else(|| "Clinical Note".to_string()),
        content,
        date: effective_time(node),
        author: Some(author_display(node).unwrap_or_else(|| UNKNOWN_AUTHOR.to_string())),
        status: status_code(node),
    })
}

pub(crate) fn assessment(section: &Value) -> Vec<AssessmentItem> {
    section_entries(section)
        .into_iter()
        .filter_map(|entry| entry_act(entry, &["act", "observation"]))
        .filter_map(|act| {
            let node = Some(act);
            Some(AssessmentItem {
                id: identifier(node),
                assessment: code_label(node, "code")?,
                date: effective_time(node),
                clinician: author_display(node),
                findings: entry_text(node),
                status: status_code(node),
            })
        })
        .collect()
}

pub(crate) fn chief_complaint(section: &Value) -> Vec<ChiefComplaint> {
    narrative_text(child(Some(section), "text"))
        .map(|complaint| ChiefComplaint {
            id: "chief-complaint".to_string(),
            complaint,
            date: effective_time(Some(section)),
        })
        .into_iter()
        .collect()
}

pub(crate) fn reason_for_visit(section: &Value) -> Vec<ReasonForVisit> {
    narrative_text(child(Some(section), "text"))
        .map(|reason| ReasonForVisit {
            id: "reason-for-visit".to_string(),
            reason,
            date: effective_time(Some(section)),
        })
        .into_iter()
        .collect()
}
