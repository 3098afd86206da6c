//! Operative and imaging sections: anesthesia, complications, DICOM catalog.

use ccda_core::{Anesthesia, Complication, DicomStudy};
use serde_json::Value;

use super::common::{
    code_label, coded_value, display_name, effective_high, effective_low, effective_time,
    entry_act, entry_text, identifier, performer, section_entries, status_code,
};
use super::entries::severity_observation;
use crate::tree::{attr, child, children, path};

pub(crate) fn anesthesia(section: &Value) -> Vec<Anesthesia> {
    section_entries(section)
        .into_iter()
        .filter_map(|entry| entry_act(entry, &["procedure", "substanceAdministration"]))
        .filter_map(|procedure| {
            let node = Some(procedure);
            Some(Anesthesia {
                id: identifier(node),
                anesthesia_type: code_label(node, "code")?,
                code: coded_value(child(node, "code")),
                performer: performer(node),
                start_time: effective_low(node)
                    .or_else(|| attr(child(node, "effectiveTime"), "value")),
                end_time: effective_high(node),
                notes: entry_text(node),
            })
        })
        .collect()
}

pub(crate) fn complications(section: &Value) -> Vec<Complication> {
    section_entries(section)
        .into_iter()
        .filter_map(|entry| {
            child(Some(entry), "observation")
                .or_else(|| path(Some(entry), &["act", "entryRelationship", "observation"]))
        })
        .filter_map(|observation| {
            let node = Some(observation);
            let severity = display_name(path(node, &["value", "qualifier"]), "value")
                .or_else(|| {
                    severity_observation(node)
                        .and_then(|severity| display_name(Some(severity), "value"))
                });
            Some(Complication {
                id: identifier(node),
                complication: display_name(node, "value")
                    .or_else(|| display_name(node, "code"))?,
                severity,
                date: effective_time(node),
                status: status_code(node),
                notes: entry_text(node),
            })
        })
        .collect()
}

pub(crate) fn dicom_catalog(section: &Value) -> Vec<DicomStudy> {
    section_entries(section)
        .into_iter()
        .filter_map(|entry| child(Some(entry), "act"))
        .filter_map(dicom_study)
        .collect()
}

/// Study act. The UID is the first id's extension, or its root when the
/// extension is absent; a second id carries the accession number.
fn dicom_study(act: &Value) -> Option<DicomStudy> {
    let node = Some(act);
    let ids = children(node, "id");
    let first_id = ids.first().copied();
    let study_instance_uid = attr(first_id, "extension").or_else(|| attr(first_id, "root"))?;

    let relationships = children(node, "entryRelationship");
    let series: Vec<&Value> = relationships
        .iter()
        .filter(|relationship| is_component(relationship))
        .filter_map(|relationship| child(Some(*relationship), "act"))
        .collect();
    let image_count = series
        .iter()
        .flat_map(|series| children(Some(*series), "entryRelationship"))
        .filter(|relationship| {
            is_component(relationship) && child(Some(*relationship), "observation").is_some()
        })
        .count();

    Some(DicomStudy {
        id: attr(first_id, "root"),
        study_instance_uid,
        study_date: effective_time(node),
        modality: display_name(node, "code"),
        accession_number: ids.get(1).and_then(|id| attr(Some(*id), "extension")),
        description: entry_text(node),
        series_count: series.len(),
        image_count,
    })
}

fn is_component(relationship: &Value) -> bool {
    attr(Some(relationship), "typeCode").as_deref() == Some("COMP")
}
