//! Entry routines for the common clinical summary sections.

use ccda_core::{Allergy, Encounter, Immunization, Medication, Problem, Procedure};
use serde_json::Value;

use super::common::{
    author_display, code_label, coded_value, display_name, effective_high, effective_low,
    effective_time, entry_act, entry_text, identifier, performer, quantity, related_observations,
    section_entries, status_code, value_text, Related,
};
use crate::tree::{attr, child, children, has_template, path, text};

const REACTION_TEMPLATE: &str = "2.16.840.1.113883.10.20.22.4.9";
const SEVERITY_TEMPLATE: &str = "2.16.840.1.113883.10.20.22.4.8";
const ALLERGY_STATUS_TEMPLATE: &str = "2.16.840.1.113883.10.20.22.4.28";
const PROBLEM_STATUS_TEMPLATE: &str = "2.16.840.1.113883.10.20.22.4.6";
const STATUS_OBSERVATION_CODE: &str = "33999-4";

pub(crate) fn allergies(section: &Value) -> Vec<Allergy> {
    section_entries(section)
        .into_iter()
        .filter_map(allergy)
        .collect()
}

fn allergy(entry: &Value) -> Option<Allergy> {
    let act = child(Some(entry), "act");
    let observation = Some(
        path(act, &["entryRelationship", "observation"])
            .or_else(|| child(Some(entry), "observation"))?,
    );

    let allergen = path(observation, &["participant", "participantRole", "playingEntity"]);
    let substance = code_label(allergen, "code").or_else(|| text(child(allergen, "name")))?;

    let reaction = reaction_observation(observation);
    let severity = severity_observation(observation)
        .or_else(|| reaction.and_then(|reaction| severity_observation(Some(reaction))));

    Some(Allergy {
        id: identifier(observation).or_else(|| identifier(act)),
        substance,
        substance_code: coded_value(child(allergen, "code")),
        allergy_type: display_name(observation, "value"),
        reaction: reaction.and_then(|reaction| value_text(Some(reaction))),
        severity: severity.and_then(|severity| value_text(Some(severity))),
        status: status_code(observation).or_else(|| status_code(act)),
        onset_date: effective_low(observation).or_else(|| effective_time(observation)),
        notes: entry_text(observation),
    })
}

fn observation_code(observation: &Value) -> Option<String> {
    attr(child(Some(observation), "code"), "code")
}

fn is_severity(observation: &Value) -> bool {
    has_template(Some(observation), SEVERITY_TEMPLATE)
        || observation_code(observation).as_deref() == Some("SEV")
}

fn is_status(observation: &Value) -> bool {
    has_template(Some(observation), ALLERGY_STATUS_TEMPLATE)
        || has_template(Some(observation), PROBLEM_STATUS_TEMPLATE)
        || observation_code(observation).as_deref() == Some(STATUS_OBSERVATION_CODE)
}

/// Manifestation relationship or reaction template. Otherwise, heuristically,
/// the first related observation with a displayable value that is neither a
/// severity nor a status observation.
pub(crate) fn reaction_observation(observation: Option<&Value>) -> Option<&Value> {
    let related = related_observations(observation);
    let explicit = related.iter().find(|related| {
        related.type_code.as_deref() == Some("MFST")
            || has_template(Some(related.observation), REACTION_TEMPLATE)
    });
    explicit
        .or_else(|| {
            related.iter().find(|related| {
                !is_severity(related.observation)
                    && !is_status(related.observation)
                    && value_text(Some(related.observation)).is_some()
            })
        })
        .map(|related| related.observation)
}

pub(crate) fn severity_observation(observation: Option<&Value>) -> Option<&Value> {
    related_observations(observation)
        .into_iter()
        .find(|related| is_severity(related.observation))
        .map(|related| related.observation)
}

fn status_observation(observation: Option<&Value>) -> Option<&Value> {
    related_observations(observation)
        .into_iter()
        .find(|Related { observation, .. }| is_status(observation))
        .map(|related| related.observation)
}

pub(crate) fn medications(section: &Value) -> Vec<Medication> {
    section_entries(section)
        .into_iter()
        .filter_map(|entry| child(Some(entry), "substanceAdministration"))
        .filter_map(medication)
        .collect()
}

fn medication(administration: &Value) -> Option<Medication> {
    let node = Some(administration);
    let material = path(
        node,
        &["consumable", "manufacturedProduct", "manufacturedMaterial"],
    );
    let generic_name = text(child(material, "name"));
    let name = code_label(material, "code").or_else(|| generic_name.clone())?;

    Some(Medication {
        id: identifier(node),
        name,
        generic_name,
        code: coded_value(child(material, "code")),
        dosage: quantity(child(node, "doseQuantity")),
        frequency: frequency(administration),
        route: display_name(node, "routeCode"),
        status: status_code(node),
        start_date: effective_low(node).or_else(|| attr(child(node, "effectiveTime"), "value")),
        end_date: effective_high(node),
        prescriber: author_display(node),
        instructions: entry_text(node),
        refills: attr(child(node, "repeatNumber"), "value"),
    })
}

/// Periodic interval (`PIVL_TS`) as "every N unit".
fn frequency(administration: &Value) -> Option<String> {
    let periodic = children(Some(administration), "effectiveTime")
        .into_iter()
        .find(|time| attr(Some(*time), "type").as_deref() == Some("PIVL_TS"))?;
    let period = child(Some(periodic), "period");
    let value = attr(period, "value")?;
    Some(match attr(period, "unit") {
        Some(unit) => format!("every {value} {unit}"),
        None => format!("every {value}"),
    })
}

pub(crate) fn problems(section: &Value) -> Vec<Problem> {
    section_entries(section)
        .into_iter()
        .filter_map(problem)
        .collect()
}

/// Concern act wrapping an observation, or a bare observation.
pub(crate) fn problem(entry: &Value) -> Option<Problem> {
    let act = child(Some(entry), "act");
    let observation = Some(
        path(act, &["entryRelationship", "observation"])
            .or_else(|| child(Some(entry), "observation"))?,
    );
    let name = code_label(observation, "value")?;

    Some(Problem {
        id: identifier(observation).or_else(|| identifier(act)),
        name,
        code: coded_value(child(observation, "value")),
        status: status_code(act).or_else(|| status_code(observation)),
        clinical_status: status_observation(observation)
            .and_then(|status| value_text(Some(status))),
        onset_date: effective_low(observation).or_else(|| effective_time(observation)),
        resolved_date: effective_high(observation),
        severity: severity_observation(observation).and_then(|sev| value_text(Some(sev))),
        notes: entry_text(observation).or_else(|| entry_text(act)),
    })
}

pub(crate) fn procedures(section: &Value) -> Vec<Procedure> {
    section_entries(section)
        .into_iter()
        .filter_map(|entry| entry_act(entry, &["procedure", "act", "observation"]))
        .filter_map(procedure)
        .collect()
}

pub(crate) fn procedure(act: &Value) -> Option<Procedure> {
    let node = Some(act);
    Some(Procedure {
        id: identifier(node),
        name: code_label(node, "code")?,
        code: coded_value(child(node, "code")),
        date: effective_time(node),
        status: status_code(node),
        performer: performer(node),
        body_site: display_name(node, "targetSiteCode"),
        notes: entry_text(node),
    })
}

pub(crate) fn encounters(section: &Value) -> Vec<Encounter> {
    section_entries(section)
        .into_iter()
        .filter_map(|entry| child(Some(entry), "encounter"))
        .filter_map(encounter)
        .collect()
}

fn encounter(encounter: &Value) -> Option<Encounter> {
    let node = Some(encounter);
    let location = path(node, &["participant", "participantRole"]);
    let reason = related_observations(node)
        .into_iter()
        .find(|related| related.type_code.as_deref() == Some("RSON"))
        .or_else(|| related_observations(node).into_iter().next())
        .and_then(|related| value_text(Some(related.observation)));

    Some(Encounter {
        id: identifier(node),
        encounter_type: code_label(node, "code")?,
        code: coded_value(child(node, "code")),
        date: effective_time(node),
        end_date: effective_high(node),
        provider: performer(node),
        location: text(path(location, &["playingEntity", "name"]))
            .or_else(|| display_name(location, "code")),
        reason,
        discharge_disposition: display_name(node, "dischargeDispositionCode"),
    })
}

pub(crate) fn immunizations(section: &Value) -> Vec<Immunization> {
    section_entries(section)
        .into_iter()
        .filter_map(|entry| child(Some(entry), "substanceAdministration"))
        .filter_map(immunization)
        .collect()
}

fn immunization(administration: &Value) -> Option<Immunization> {
    let node = Some(administration);
    let product = path(node, &["consumable", "manufacturedProduct"]);
    let material = child(product, "manufacturedMaterial");

    Some(Immunization {
        id: identifier(node),
        vaccine: code_label(material, "code").or_else(|| text(child(material, "name")))?,
        code: coded_value(child(material, "code")),
        date: effective_time(node),
        status: status_code(node),
        refused: attr(node, "negationInd").as_deref() == Some("true"),
        route: display_name(node, "routeCode"),
        site: display_name(node, "approachSiteCode"),
        lot_number: text(child(material, "lotNumberText")),
        manufacturer: text(path(product, &["manufacturerOrganization", "name"])),
        performer: performer(node),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn allergy_section(relationships: Value) -> Value {
        json!({
            "entry": { "act": { "entryRelationship": { "observation": {
                "id": { "@_root": "a-1" },
                "value": { "@_displayName": "Drug allergy" },
                "participant": { "participantRole": { "playingEntity": {
                    "code": { "@_code": "7980", "@_displayName": "Penicillin" }
                } } },
                "entryRelationship": relationships
            } } } }
        })
    }

    #[test]
    fn reaction_by_manifestation_and_nested_severity() {
        let section = allergy_section(json!([
            { "@_typeCode": "MFST", "observation": {
                "value": { "@_displayName": "Hives" },
                "entryRelationship": { "@_typeCode": "SUBJ", "observation": {
                    "code": { "@_code": "SEV" },
                    "value": { "@_displayName": "Moderate" }
                } }
            } }
        ]));
        let allergies = allergies(&section);
        assert_eq!(allergies.len(), 1);
        assert_eq!(allergies[0].substance, "Penicillin");
        assert_eq!(allergies[0].reaction.as_deref(), Some("Hives"));
        assert_eq!(allergies[0].severity.as_deref(), Some("Moderate"));
        assert_eq!(allergies[0].allergy_type.as_deref(), Some("Drug allergy"));
    }

    #[test]
    fn reaction_heuristic_skips_severity_and_status() {
        let section = allergy_section(json!([
            { "observation": {
                "templateId": { "@_root": SEVERITY_TEMPLATE },
                "value": { "@_displayName": "Severe" }
            } },
            { "observation": {
                "code": { "@_code": STATUS_OBSERVATION_CODE },
                "value": { "@_displayName": "Active" }
            } },
            { "observation": { "value": { "@_displayName": "Wheezing" } } }
        ]));
        let allergy = &allergies(&section)[0];
        assert_eq!(allergy.reaction.as_deref(), Some("Wheezing"));
        assert_eq!(allergy.severity.as_deref(), Some("Severe"));
    }

    #[test]
    fn allergen_from_original_text() {
        let section = json!({ "entry": { "act": { "entryRelationship": { "observation": {
            "participant": { "participantRole": { "playingEntity": {
                "code": { "@_nullFlavor": "OTH", "originalText": "Shellfish" }
            } } }
        } } } } });
        let allergies = allergies(&section);
        assert_eq!(allergies.len(), 1);
        assert_eq!(allergies[0].substance, "Shellfish");
    }

    #[test]
    fn allergy_without_substance_is_dropped() {
        let section = json!({ "entry": { "act": { "entryRelationship": { "observation": {
            "@_negationInd": "true",
            "value": { "@_displayName": "Allergy to substance" }
        } } } } });
        assert!(allergies(&section).is_empty());
    }

    #[test]
    fn medication_fields() {
        let section = json!({ "entry": { "substanceAdministration": {
            "effectiveTime": [
                { "low": { "@_value": "20230101" }, "high": { "@_value": "20231231" } },
                { "@_type": "PIVL_TS", "period": { "@_value": "12", "@_unit": "h" } }
            ],
            "routeCode": { "@_displayName": "Oral" },
            "doseQuantity": { "@_value": "1" },
            "repeatNumber": { "@_value": "3" },
            "consumable": { "manufacturedProduct": { "manufacturedMaterial": {
                "code": { "@_code": "197361", "@_displayName": "Amlodipine 5 MG" },
                "name": "amlodipine"
            } } }
        } } });
        let medications = medications(&section);
        let medication = &medications[0];
        assert_eq!(medication.name, "Amlodipine 5 MG");
        assert_eq!(medication.generic_name.as_deref(), Some("amlodipine"));
        assert_eq!(medication.frequency.as_deref(), Some("every 12 h"));
        assert_eq!(medication.start_date.as_deref(), Some("20230101"));
        assert_eq!(medication.end_date.as_deref(), Some("20231231"));
        assert_eq!(medication.dosage.as_deref(), Some("1"));
        assert_eq!(medication.refills.as_deref(), Some("3"));
    }

    #[test]
    fn immunization_refusal() {
        let section = json!({ "entry": { "substanceAdministration": {
            "@_negationInd": "true",
            "consumable": { "manufacturedProduct": {
                "manufacturedMaterial": {
                    "code": { "@_displayName": "Influenza vaccine" },
                    "lotNumberText": "L-77"
                },
                "manufacturerOrganization": { "name": "Acme Bio" }
            } }
        } } });
        let immunization = &immunizations(&section)[0];
        assert!(immunization.refused);
        assert_eq!(immunization.lot_number.as_deref(), Some("L-77"));
        assert_eq!(immunization.manufacturer.as_deref(), Some("Acme Bio"));
    }
}
