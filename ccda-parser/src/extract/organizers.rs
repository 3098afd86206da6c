//! Organizer-shaped sections: vital signs, results, family history.

use ccda_core::{
    FamilyCondition, FamilyHistoryEntry, LabPanel, LabResult, Measurement, VitalReading,
    VitalSignPanel,
};
use serde_json::Value;
use tracing::debug;

use super::common::{
    code_label, coded_value, display_name, effective_time, entry_observations, identifier,
    quantity, related_observations, section_entries, status_code,
};
use crate::tree::{attr, child, children, narrative_text, path, text};

/// Fixed vital sign slots by LOINC code.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum VitalSlot {
    Systolic,
    Diastolic,
    HeartRate,
    RespiratoryRate,
    Temperature,
    Height,
    Weight,
    Bmi,
    OxygenSaturation,
    HeadCircumference,
}

impl VitalSlot {
    fn from_loinc(code: &str) -> Option<Self> {
        let slot = match code {
            "8480-6" => VitalSlot::Systolic,
            "8462-4" => VitalSlot::Diastolic,
            "8867-4" => VitalSlot::HeartRate,
            "9279-1" => VitalSlot::RespiratoryRate,
            "8310-5" => VitalSlot::Temperature,
            "8302-2" => VitalSlot::Height,
            "3141-9" | "29463-7" => VitalSlot::Weight,
            "39156-5" => VitalSlot::Bmi,
            "2708-6" | "59408-5" => VitalSlot::OxygenSaturation,
            "8287-5" | "9843-4" => VitalSlot::HeadCircumference,
            _ => return None,
        };
        Some(slot)
    }

    fn slot_mut(self, panel: &mut VitalSignPanel) -> &mut Option<Measurement> {
        match self {
            VitalSlot::Systolic => &mut panel.systolic_bp,
            VitalSlot::Diastolic => &mut panel.diastolic_bp,
            VitalSlot::HeartRate => &mut panel.heart_rate,
            VitalSlot::RespiratoryRate => &mut panel.respiratory_rate,
            VitalSlot::Temperature => &mut panel.temperature,
            VitalSlot::Height => &mut panel.height,
            VitalSlot::Weight => &mut panel.weight,
            VitalSlot::Bmi => &mut panel.bmi,
            VitalSlot::OxygenSaturation => &mut panel.oxygen_saturation,
            VitalSlot::HeadCircumference => &mut panel.head_circumference,
        }
    }
}

fn measurement(observation: &Value) -> Option<Measurement> {
    let value = child(Some(observation), "value");
    Some(Measurement {
        value: attr(value, "value").or_else(|| text(value))?,
        unit: attr(value, "unit"),
    })
}

pub(crate) fn vital_signs(section: &Value) -> Vec<VitalSignPanel> {
    section_entries(section)
        .into_iter()
        .filter_map(vital_panel)
        .collect()
}

fn vital_panel(entry: &Value) -> Option<VitalSignPanel> {
    let organizer = child(Some(entry), "organizer");
    let mut panel = VitalSignPanel {
        id: identifier(organizer),
        date: effective_time(organizer),
        ..VitalSignPanel::default()
    };

    for observation in entry_observations(entry) {
        let Some(reading) = measurement(observation) else {
            continue;
        };
        let code = attr(child(Some(observation), "code"), "code");
        match code.as_deref().and_then(VitalSlot::from_loinc) {
            Some(slot) => {
                let target = slot.slot_mut(&mut panel);
                if target.is_none() {
                    *target = Some(reading);
                }
            }
            None => {
                debug!(?code, "vital sign routed to other");
                panel.other.push(VitalReading {
                    code,
                    name: display_name(Some(observation), "code"),
                    measurement: reading,
                });
            }
        }
        if panel.date.is_none() {
            panel.date = effective_time(Some(observation));
        }
    }

    (panel.reading_count() > 0).then_some(panel)
}

pub(crate) fn lab_results(section: &Value) -> Vec<LabPanel> {
    section_entries(section)
        .into_iter()
        .filter_map(lab_panel)
        .collect()
}

fn lab_panel(entry: &Value) -> Option<LabPanel> {
    let organizer = child(Some(entry), "organizer");
    let results: Vec<LabResult> = entry_observations(entry)
        .into_iter()
        .filter_map(lab_result)
        .collect();

    if organizer.is_none() {
        // A bare result observation becomes a panel of one.
        let result = results.into_iter().next()?;
        return Some(LabPanel {
            id: result.id.clone(),
            panel: None,
            code: None,
            status: result.status.clone(),
            date: result.date.clone(),
            results: vec![result],
        });
    }

    Some(LabPanel {
        id: identifier(organizer),
        panel: code_label(organizer, "code"),
        code: coded_value(child(organizer, "code")),
        status: status_code(organizer),
        date: effective_time(organizer),
        results,
    })
}

fn lab_result(observation: &Value) -> Option<LabResult> {
    let node = Some(observation);
    let value = child(node, "value");
    Some(LabResult {
        id: identifier(node),
        test: code_label(node, "code")?,
        code: coded_value(child(node, "code")),
        value: attr(value, "value")
            .or_else(|| attr(value, "displayName"))
            .or_else(|| text(value)),
        unit: attr(value, "unit"),
        interpretation: display_name(node, "interpretationCode")
            .or_else(|| attr(child(node, "interpretationCode"), "code")),
        reference_range: reference_range(observation),
        status: status_code(node),
        date: effective_time(node),
    })
}

/// Narrative range text, else `low-high unit` from the range value.
fn reference_range(observation: &Value) -> Option<String> {
    let range = path(Some(observation), &["referenceRange", "observationRange"]);
    if let Some(text) = narrative_text(child(range, "text")) {
        return Some(text);
    }
    let value = child(range, "value");
    let low = attr(child(value, "low"), "value");
    let high = attr(child(value, "high"), "value");
    let unit = attr(child(value, "low"), "unit").or_else(|| attr(child(value, "high"), "unit"));
    let span = match (low, high) {
        (Some(low), Some(high)) => format!("{low}-{high}"),
        (Some(low), None) => format!(">={low}"),
        (None, Some(high)) => format!("<={high}"),
        (None, None) => return None,
    };
    Some(match unit {
        Some(unit) => format!("{span} {unit}"),
        None => span,
    })
}

pub(crate) fn family_history(section: &Value) -> Vec<FamilyHistoryEntry> {
    section_entries(section)
        .into_iter()
        .filter_map(|entry| child(Some(entry), "organizer"))
        .filter_map(family_member)
        .collect()
}

fn family_member(organizer: &Value) -> Option<FamilyHistoryEntry> {
    let node = Some(organizer);
    let relative = path(node, &["subject", "relatedSubject"]);
    let gender = child(child(relative, "subject"), "administrativeGenderCode");

    Some(FamilyHistoryEntry {
        id: identifier(node),
        relationship: code_label(relative, "code")?,
        relative_gender: attr(gender, "displayName").or_else(|| attr(gender, "code")),
        conditions: children(node, "component")
            .into_iter()
            .filter_map(|component| child(Some(component), "observation"))
            .filter_map(family_condition)
            .collect(),
        status: status_code(node),
    })
}

fn family_condition(observation: &Value) -> Option<FamilyCondition> {
    let node = Some(observation);
    let onset_age = related_observations(node)
        .into_iter()
        .find_map(|related| quantity(child(Some(related.observation), "value")));

    Some(FamilyCondition {
        condition: code_label(node, "value")?,
        code: coded_value(child(node, "value")),
        onset_age,
        status: status_code(node),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn vital(code: &str, value: &str, unit: &str) -> Value {
        json!({ "observation": {
            "code": { "@_code": code, "@_displayName": format!("code {code}") },
            "value": { "@_value": value, "@_unit": unit }
        } })
    }

    #[test]
    fn vitals_fill_slots_and_other() {
        let section = json!({ "entry": { "organizer": {
            "effectiveTime": { "@_value": "20240301" },
            "component": [
                vital("8480-6", "120", "mm[Hg]"),
                vital("8462-4", "80", "mm[Hg]"),
                vital("29463-7", "72", "kg"),
                vital("8478-0", "93", "mm[Hg]")
            ]
        } } });

        let panels = vital_signs(&section);
        assert_eq!(panels.len(), 1);
        let panel = &panels[0];
        assert_eq!(panel.date.as_deref(), Some("20240301"));
        assert_eq!(panel.systolic_bp.as_ref().map(|m| m.value.as_str()), Some("120"));
        assert_eq!(panel.diastolic_bp.as_ref().and_then(|m| m.unit.as_deref()), Some("mm[Hg]"));
        assert_eq!(panel.weight.as_ref().map(|m| m.value.as_str()), Some("72"));
        assert_eq!(panel.other.len(), 1);
        assert_eq!(panel.other[0].code.as_deref(), Some("8478-0"));
        assert_eq!(panel.reading_count(), 4);
    }

    #[test]
    fn bare_lab_observation_is_single_result_panel() {
        let section = json!({ "entry": { "observation": {
            "code": { "@_code": "2345-7", "@_displayName": "Glucose" },
            "value": { "@_value": "95", "@_unit": "mg/dL" },
            "referenceRange": { "observationRange": { "value": {
                "low": { "@_value": "70", "@_unit": "mg/dL" },
                "high": { "@_value": "99", "@_unit": "mg/dL" }
            } } }
        } } });
        let panels = lab_results(&section);
        assert_eq!(panels.len(), 1);
        assert!(panels[0].panel.is_none());
        let result = &panels[0].results[0];
        assert_eq!(result.test, "Glucose");
        assert_eq!(result.reference_range.as_deref(), Some("70-99 mg/dL"));
    }

    #[test]
    fn family_member_groups_conditions() {
        let section = json!({ "entry": { "organizer": {
            "subject": { "relatedSubject": {
                "code": { "@_code": "FTH", "@_displayName": "Father" },
                "subject": { "administrativeGenderCode": { "@_code": "M" } }
            } },
            "component": [
                { "observation": {
                    "value": { "@_displayName": "Diabetes" },
                    "entryRelationship": { "observation": { "value": { "@_value": "57", "@_unit": "a" } } }
                } },
                { "observation": { "value": { "@_displayName": "Hypertension" } } }
            ]
        } } });
        let family = family_history(&section);
        assert_eq!(family[0].relationship, "Father");
        assert_eq!(family[0].relative_gender.as_deref(), Some("M"));
        assert_eq!(family[0].conditions.len(), 2);
        assert_eq!(family[0].conditions[0].onset_age.as_deref(), Some("57 a"));
    }
}
