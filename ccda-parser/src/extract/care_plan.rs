//! Plan of care, goals, health concerns, interventions and instructions.

use ccda_core::{Goal, HealthConcern, Instruction, Intervention, PlanActivity, PlanItem};
use serde_json::Value;

use super::common::{
    author_display, code_label, coded_value, display_name, effective_high, effective_low,
    effective_time, entry_act, entry_text, identifier, related_observations, section_entries,
    status_code,
};
use crate::tree::{attr, child, path};

const PLAN_SHAPES: [(&str, PlanActivity); 6] = [
    ("act", PlanActivity::Act),
    ("observation", PlanActivity::Observation),
    ("procedure", PlanActivity::Procedure),
    ("encounter", PlanActivity::Encounter),
    ("substanceAdministration", PlanActivity::SubstanceAdministration),
    ("supply", PlanActivity::Supply),
];

pub(crate) fn plan_of_care(section: &Value) -> Vec<PlanItem> {
    section_entries(section)
        .into_iter()
        .filter_map(plan_item)
        .collect()
}

fn plan_item(entry: &Value) -> Option<PlanItem> {
    let (node, activity) = PLAN_SHAPES
        .iter()
        .find_map(|(shape, activity)| child(Some(entry), shape).map(|node| (node, *activity)))?;
    let node = Some(node);
    let material = path(
        node,
        &["consumable", "manufacturedProduct", "manufacturedMaterial"],
    );
    let plan = code_label(node, "code")
        .or_else(|| code_label(material, "code"))
        .or_else(|| entry_text(node))?;

    Some(PlanItem {
        id: identifier(node),
        plan,
        activity,
        mood_code: attr(node, "moodCode"),
        planned_date: effective_time(node),
        status: status_code(node),
        notes: entry_text(node),
    })
}

pub(crate) fn goals(section: &Value) -> Vec<Goal> {
    section_entries(section)
        .into_iter()
        .filter_map(|entry| child(Some(entry), "observation"))
        .filter_map(goal)
        .collect()
}

fn goal(observation: &Value) -> Option<Goal> {
    let node = Some(observation);
    let goal = display_name(node, "value")
        .or_else(|| display_name(node, "code"))
        .or_else(|| entry_text(node))?;
    let progress = related_observations(node)
        .into_iter()
        .find(|related| {
            attr(child(Some(related.observation), "code"), "code").as_deref() == Some("ASSERTION")
        })
        .and_then(|related| display_name(Some(related.observation), "value"));

    Some(Goal {
        id: identifier(node),
        goal,
        priority: display_name(node, "priorityCode"),
        status: status_code(node),
        start_date: effective_low(node).or_else(|| attr(child(node, "effectiveTime"), "value")),
        target_date: effective_high(node),
        progress,
        author: author_display(node),
        notes: entry_text(node),
    })
}

pub(crate) fn health_concerns(section: &Value) -> Vec<HealthConcern> {
    section_entries(section)
        .into_iter()
        .filter_map(|entry| child(Some(entry), "act"))
        .filter_map(health_concern)
        .collect()
}

fn health_concern(act: &Value) -> Option<HealthConcern> {
    let node = Some(act);
    let concern = related_observations(node)
        .into_iter()
        .find_map(|related| {
            let observation = Some(related.observation);
            display_name(observation, "value").or_else(|| display_name(observation, "code"))
        })
        .or_else(|| entry_text(node))?;

    Some(HealthConcern {
        id: identifier(node),
        concern,
        category: display_name(node, "code"),
        status: status_code(node),
        date: effective_time(node),
        author: author_display(node),
        priority: display_name(node, "priorityCode"),
        notes: entry_text(node),
    })
}

pub(crate) fn interventions(section: &Value) -> Vec<Intervention> {
    section_entries(section)
        .into_iter()
        .filter_map(|entry| entry_act(entry, &["act", "procedure", "encounter"]))
        .filter_map(intervention)
        .collect()
}

fn intervention(act: &Value) -> Option<Intervention> {
    let node = Some(act);
    Some(Intervention {
        id: identifier(node),
        intervention: code_label(node, "code").or_else(|| entry_text(node))?,
        status: status_code(node),
        planned_date: effective_low(node).or_else(|| attr(child(node, "effectiveTime"), "value")),
        completed_date: effective_high(node),
        author: author_display(node),
        notes: entry_text(node),
    })
}

pub(crate) fn instructions(section: &Value) -> Vec<Instruction> {
    section_entries(section)
        .into_iter()
        .filter_map(|entry| child(Some(entry), "act"))
        .filter_map(instruction)
        .collect()
}

fn instruction(act: &Value) -> Option<Instruction> {
    let node = Some(act);
    Some(Instruction {
        id: identifier(node),
        instruction: entry_text(node).or_else(|| display_name(node, "code"))?,
        code: coded_value(child(node, "code")),
        status: status_code(node),
        date: effective_time(node),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn plan_items_keep_their_shape() {
        let section = json!({ "entry": [
            { "encounter": { "@_moodCode": "INT", "code": { "@_displayName": "Follow-up visit" } } },
            { "substanceAdministration": { "consumable": { "manufacturedProduct": {
                "manufacturedMaterial": { "code": { "@_displayName": "Aspirin" } }
            } } } },
            { "act": { "text": "" } }
        ] });
        let items = plan_of_care(&section);
        assert_eq!(items.len(), 2);
        assert_eq!(items[0].activity, PlanActivity::Encounter);
        assert_eq!(items[0].mood_code.as_deref(), Some("INT"));
        assert_eq!(items[1].plan, "Aspirin");
        assert_eq!(items[1].activity, PlanActivity::SubstanceAdministration);
    }

    #[test]
    fn goal_progress_from_assertion() {
        let section = json!({ "entry": { "observation": {
            "code": { "@_displayName": "Weight loss" },
            "effectiveTime": { "low": { "@_value": "20240101" }, "high": { "@_value": "20241231" } },
            "entryRelationship": { "observation": {
                "code": { "@_code": "ASSERTION" },
                "value": { "@_displayName": "On track" }
            } }
        } } });
        let goal = &goals(&section)[0];
        assert_eq!(goal.goal, "Weight loss");
        assert_eq!(goal.progress.as_deref(), Some("On track"));
        assert_eq!(goal.target_date.as_deref(), Some("20241231"));
    }

    #[test]
    fn concern_falls_back_to_act_text() {
        let section = json!({ "entry": { "act": {
            "code": { "@_displayName": "Health Concern" },
            "text": "Worried about falls"
        } } });
        let concern = &health_concerns(&section)[0];
        assert_eq!(concern.concern, "Worried about falls");
        assert_eq!(concern.category.as_deref(), Some("Health Concern"));
    }
}
