//! Payers and medical equipment.

use ccda_core::{MedicalDevice, Payer};
use serde_json::Value;

use super::common::{
    code_label, coded_value, display_name, effective_high, effective_low, effective_time,
    identifier, section_entries, status_code,
};
use crate::tree::{attr, child, children, path, text};

pub(crate) fn payers(section: &Value) -> Vec<Payer> {
    section_entries(section)
        .into_iter()
        .filter_map(|entry| child(Some(entry), "act"))
        .flat_map(|coverage| {
            let policies: Vec<&Value> = children(Some(coverage), "entryRelationship")
                .into_iter()
                .filter_map(|relationship| child(Some(relationship), "act"))
                .collect();
            if policies.is_empty() {
                vec![coverage]
            } else {
                policies
            }
        })
        .filter_map(payer)
        .collect()
}

/// Policy act. Entries with none of the identifying fields are dropped.
fn payer(policy: &Value) -> Option<Payer> {
    let node = Some(policy);
    let payer = Payer {
        id: identifier(node),
        payer_name: text(path(
            node,
            &["performer", "assignedEntity", "representedOrganization", "name"],
        )),
        policy_number: attr(child(node, "id"), "extension"),
        group_number: attr(path(node, &["participant", "participantRole", "id"]), "extension"),
        policy_type: display_name(node, "code"),
        effective_date: effective_low(node),
        expiration_date: effective_high(node),
    };
    let identified = payer.payer_name.is_some()
        || payer.policy_number.is_some()
        || payer.policy_type.is_some();
    identified.then_some(payer)
}

pub(crate) fn medical_equipment(section: &Value) -> Vec<MedicalDevice> {
    section_entries(section)
        .into_iter()
        .flat_map(|entry| {
            let supplies: Vec<&Value> = match child(Some(entry), "supply") {
                Some(supply) => vec![supply],
                None => children(child(Some(entry), "organizer"), "component")
                    .into_iter()
                    .filter_map(|component| child(Some(component), "supply"))
                    .collect(),
            };
            supplies
        })
        .filter_map(device)
        .collect()
}

fn device(supply: &Value) -> Option<MedicalDevice> {
    let node = Some(supply);
    let role = path(node, &["participant", "participantRole"]);
    let playing_device = child(role, "playingDevice");

    Some(MedicalDevice {
        id: identifier(node),
        device: code_label(playing_device, "code")?,
        code: coded_value(child(playing_device, "code")),
        manufacturer: text(path(role, &["scopingEntity", "desc"])),
        model: text(child(playing_device, "manufacturerModelName")),
        date: effective_time(node),
        status: status_code(node),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn payer_reads_policy_activity() {
        let section = json!({ "entry": { "act": { "entryRelationship": { "act": {
            "id": { "@_root": "pol", "@_extension": "POL-1" },
            "code": { "@_displayName": "PPO" },
            "performer": { "assignedEntity": { "representedOrganization": { "name": "Good Health" } } },
            "participant": { "participantRole": { "id": { "@_extension": "GRP-9" } } },
            "effectiveTime": { "low": { "@_value": "20240101" } }
        } } } } });
        let payer = &payers(&section)[0];
        assert_eq!(payer.payer_name.as_deref(), Some("Good Health"));
        assert_eq!(payer.policy_number.as_deref(), Some("POL-1"));
        assert_eq!(payer.group_number.as_deref(), Some("GRP-9"));
        assert_eq!(payer.effective_date.as_deref(), Some("20240101"));
    }

    #[test]
    fn devices_inside_organizers() {
        let section = json!({ "entry": { "organizer": { "component": [
            { "supply": { "participant": { "participantRole": {
                "playingDevice": { "code": { "@_displayName": "Cardiac pacemaker" }, "manufacturerModelName": "PM-2" },
                "scopingEntity": { "desc": "Medtronic" }
            } } } },
            { "supply": {} }
        ] } } });
        let devices = medical_equipment(&section);
        assert_eq!(devices.len(), 1);
        assert_eq!(devices[0].model.as_deref(), Some("PM-2"));
        assert_eq!(devices[0].manufacturer.as_deref(), Some("Medtronic"));
    }
}
