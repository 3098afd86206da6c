//! Observation-shaped sections.

use ccda_core::{
    AdvanceDirective, FunctionalStatusObservation, MentalStatusObservation, NutritionObservation,
    PhysicalExamFinding, ReviewOfSystemsFinding, SocialHistoryObservation,
};
use serde_json::Value;

use super::common::{
    code_label, coded_value, display_name, effective_low, effective_time, entry_observations,
    entry_text, identifier, performer, quantity, related_observations, section_entries,
    status_code, value_text,
};
use crate::tree::{attr, child, path, text};

fn observations(section: &Value) -> Vec<&Value> {
    section_entries(section)
        .into_iter()
        .flat_map(entry_observations)
        .collect()
}

pub(crate) fn social_history(section: &Value) -> Vec<SocialHistoryObservation> {
    observations(section)
        .into_iter()
        .filter_map(|observation| {
            let node = Some(observation);
            Some(SocialHistoryObservation {
                id: identifier(node),
                observation_type: code_label(node, "code")?,
                code: coded_value(child(node, "code")),
                value: value_text(node),
                status: status_code(node),
                date: effective_time(node),
            })
        })
        .collect()
}

pub(crate) fn functional_status(section: &Value) -> Vec<FunctionalStatusObservation> {
    observations(section)
        .into_iter()
        .filter_map(|observation| {
            let node = Some(observation);
            Some(FunctionalStatusObservation {
                id: identifier(node),
                assessment: display_name(node, "code").or_else(|| display_name(node, "value"))?,
                result: display_name(node, "value").or_else(|| entry_text(node)),
                date: effective_time(node),
                status: status_code(node),
            })
        })
        .collect()
}

pub(crate) fn mental_status(section: &Value) -> Vec<MentalStatusObservation> {
    observations(section)
        .into_iter()
        .filter_map(|observation| {
            let node = Some(observation);
            Some(MentalStatusObservation {
                id: identifier(node),
                assessment: display_name(node, "code").or_else(|| display_name(node, "value"))?,
                result: value_text(node).or_else(|| entry_text(node)),
                date: effective_time(node),
                examiner: performer(node),
                status: status_code(node),
            })
        })
        .collect()
}

pub(crate) fn nutrition(section: &Value) -> Vec<NutritionObservation> {
    observations(section)
        .into_iter()
        .filter_map(|observation| {
            let node = Some(observation);
            Some(NutritionObservation {
                id: identifier(node),
                diet_type: code_label(node, "code").or_else(|| display_name(node, "value"))?,
                restrictions: entry_text(node),
                calories: related_amount(observation, "calorie"),
                protein: related_amount(observation, "protein"),
                date: effective_time(node),
                status: status_code(node),
            })
        })
        .collect()
}

/// Quantity of the first related observation whose code label mentions `keyword`.
fn related_amount(observation: &Value, keyword: &str) -> Option<String> {
    related_observations(Some(observation))
        .into_iter()
        .find(|related| {
            display_name(Some(related.observation), "code")
                .map(|label| label.to_lowercase().contains(keyword))
                .unwrap_or(false)
        })
        .and_then(|related| quantity(child(Some(related.observation), "value")))
}

pub(crate) fn physical_exam(section: &Value) -> Vec<PhysicalExamFinding> {
    observations(section)
        .into_iter()
        .filter_map(|observation| {
            let node = Some(observation);
            Some(PhysicalExamFinding {
                id: identifier(node),
                body_system: code_label(node, "code")?,
                findings: entry_text(node).or_else(|| value_text(node)),
                abnormal: attr(child(node, "interpretationCode"), "code").as_deref() == Some("A"),
                date: effective_time(node),
                examiner: performer(node),
            })
        })
        .collect()
}

pub(crate) fn review_of_systems(section: &Value) -> Vec<ReviewOfSystemsFinding> {
    observations(section)
        .into_iter()
        .filter_map(|observation| {
            let node = Some(observation);
            Some(ReviewOfSystemsFinding {
                id: identifier(node),
                system: code_label(node, "code")?,
                findings: display_name(node, "value").or_else(|| entry_text(node)),
                status: status_code(node),
                date: effective_time(node),
            })
        })
        .collect()
}

pub(crate) fn advance_directives(section: &Value) -> Vec<AdvanceDirective> {
    observations(section)
        .into_iter()
        .filter_map(|observation| {
            let node = Some(observation);
            Some(AdvanceDirective {
                id: identifier(node),
                directive_type: code_label(node, "code")?,
                value: value_text(node),
                status: status_code(node),
                effective_date: effective_low(node).or_else(|| effective_time(node)),
                custodian: text(path(
                    node,
                    &["participant", "participantRole", "playingEntity", "name"],
                )),
                description: entry_text(node),
            })
        })
        .collect()
}
