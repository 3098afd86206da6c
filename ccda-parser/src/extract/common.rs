//! Field readers shared by the section routines.

use ccda_core::{Address, Author, CodedValue, Organization, Performer, PersonName, Telecom};
use serde_json::Value;

use crate::tree::{as_sequence, attr, child, children, first, narrative_text, path, text};

pub(crate) fn section_entries(section: &Value) -> Vec<&Value> {
    children(Some(section), "entry")
}

/// First of the named act shapes present on an entry.
pub(crate) fn entry_act<'a>(entry: &'a Value, shapes: &[&str]) -> Option<&'a Value> {
    shapes.iter().find_map(|shape| child(Some(entry), shape))
}

/// Observations of an entry: the bare one, or every organizer component.
pub(crate) fn entry_observations(entry: &Value) -> Vec<&Value> {
    if let Some(observation) = child(Some(entry), "observation") {
        return vec![observation];
    }
    children(child(Some(entry), "organizer"), "component")
        .into_iter()
        .filter_map(|component| child(Some(component), "observation"))
        .collect()
}

pub(crate) fn identifier(node: Option<&Value>) -> Option<String> {
    let id = child(node, "id");
    attr(id, "root").or_else(|| attr(id, "extension"))
}

pub(crate) fn coded_value(node: Option<&Value>) -> Option<CodedValue> {
    let node = first(node)?;
    let coded = CodedValue {
        code: attr(Some(node), "code"),
        code_system: attr(Some(node), "codeSystem"),
        code_system_name: attr(Some(node), "codeSystemName"),
        display_name: attr(Some(node), "displayName"),
    };
    (!coded.is_empty()).then_some(coded)
}

pub(crate) fn display_name(node: Option<&Value>, field: &str) -> Option<String> {
    attr(child(node, field), "displayName")
}

/// displayName, then originalText, then inline text.
pub(crate) fn code_label(node: Option<&Value>, field: &str) -> Option<String> {
    let code = child(node, field);
    attr(code, "displayName")
        .or_else(|| narrative_text(child(code, "originalText")))
        .or_else(|| text(code))
}

/// Observation value for display: coded label, physical quantity, or text.
pub(crate) fn value_text(node: Option<&Value>) -> Option<String> {
    let value = child(node, "value");
    attr(value, "displayName")
        .or_else(|| quantity(value))
        .or_else(|| text(value))
}

/// `value unit` of a PQ-shaped node.
pub(crate) fn quantity(node: Option<&Value>) -> Option<String> {
    let value = attr(node, "value")?;
    Some(match attr(node, "unit") {
        Some(unit) if unit != "1" => format!("{value} {unit}"),
        _ => value,
    })
}

pub(crate) fn status_code(node: Option<&Value>) -> Option<String> {
    attr(child(node, "statusCode"), "code")
}

/// Point time, or the start of the interval.
pub(crate) fn effective_time(node: Option<&Value>) -> Option<String> {
    let time = child(node, "effectiveTime");
    attr(time, "value").or_else(|| attr(child(time, "low"), "value"))
}

pub(crate) fn effective_low(node: Option<&Value>) -> Option<String> {
    attr(path(node, &["effectiveTime", "low"]), "value")
}

pub(crate) fn effective_high(node: Option<&Value>) -> Option<String> {
    attr(path(node, &["effectiveTime", "high"]), "value")
}

/// Flattened `<text>` of an act.
pub(crate) fn entry_text(node: Option<&Value>) -> Option<String> {
    narrative_text(child(node, "text"))
}

/// Observations reached through `entryRelationship`, with the relationship type.
pub(crate) struct Related<'a> {
    pub type_code: Option<String>,
    pub observation: &'a Value,
}

pub(crate) fn related_observations(node: Option<&Value>) -> Vec<Related<'_>> {
    children(node, "entryRelationship")
        .into_iter()
        .filter_map(|relationship| {
            child(Some(relationship), "observation").map(|observation| Related {
                type_code: attr(Some(relationship), "typeCode"),
                observation,
            })
        })
        .collect()
}

pub(crate) fn person_name(node: Option<&Value>) -> Option<PersonName> {
    let name = first(node)?;
    let parts = |field: &str| -> Vec<String> {
        children(Some(name), field)
            .into_iter()
            .filter_map(|part| text(Some(part)))
            .collect()
    };

    let given = parts("given");
    let family = children(Some(name), "family")
        .into_iter()
        .find_map(|part| text(Some(part)));
    let qualifiers = ["prefix", "given", "family", "suffix"]
        .iter()
        .flat_map(|field| children(Some(name), field))
        .filter_map(|part| attr(Some(part), "qualifier"))
        .collect();

    let mut full = given
        .iter()
        .chain(family.iter())
        .cloned()
        .collect::<Vec<_>>()
        .join(" ");
    if full.is_empty() {
        // Unstructured `<name>John Doe</name>`.
        full = text(Some(name)).unwrap_or_default();
    }

    let parsed = PersonName {
        use_code: attr(Some(name), "use"),
        prefix: parts("prefix"),
        given,
        family,
        suffix: parts("suffix"),
        qualifiers,
        full,
    };
    (!parsed.full.is_empty() || !parsed.prefix.is_empty() || !parsed.suffix.is_empty())
        .then_some(parsed)
}

pub(crate) fn address(node: Option<&Value>) -> Option<Address> {
    let addr = first(node)?;
    let parsed = Address {
        lines: children(Some(addr), "streetAddressLine")
            .into_iter()
            .filter_map(|line| text(Some(line)))
            .collect(),
        city: text(child(Some(addr), "city")),
        state: text(child(Some(addr), "state")),
        postal_code: text(child(Some(addr), "postalCode")),
        country: text(child(Some(addr), "country")),
        use_code: attr(Some(addr), "use"),
    };
    let empty = parsed.lines.is_empty()
        && parsed.city.is_none()
        && parsed.state.is_none()
        && parsed.postal_code.is_none()
        && parsed.country.is_none();
    (!empty).then_some(parsed)
}

pub(crate) fn addresses(node: Option<&Value>) -> Vec<Address> {
    as_sequence(node)
        .into_iter()
        .filter_map(|addr| address(Some(addr)))
        .collect()
}

/// Telecoms without a value are dropped.
pub(crate) fn telecoms(node: Option<&Value>) -> Vec<Telecom> {
    as_sequence(node)
        .into_iter()
        .filter_map(|telecom| {
            Some(Telecom {
                value: attr(Some(telecom), "value")?,
                use_code: attr(Some(telecom), "use"),
            })
        })
        .collect()
}

pub(crate) fn organization(node: Option<&Value>) -> Option<Organization> {
    let org = first(node)?;
    Some(Organization {
        name: text(child(Some(org), "name")),
        address: address(child(Some(org), "addr")),
        telecom: telecoms(child(Some(org), "telecom")),
    })
}

/// First `author/assignedAuthor` of an act or document.
pub(crate) fn author(node: Option<&Value>) -> Option<Author> {
    let author = child(node, "author");
    let assigned = child(author, "assignedAuthor")?;
    Some(Author {
        id: identifier(Some(assigned)),
        time: attr(child(author, "time"), "value"),
        name: person_name(path(Some(assigned), &["assignedPerson", "name"])),
        organization: organization(child(Some(assigned), "representedOrganization")),
    })
}

pub(crate) fn author_display(node: Option<&Value>) -> Option<String> {
    author(node).and_then(|author| author.display())
}

/// First `performer/assignedEntity` of an act.
pub(crate) fn performer(node: Option<&Value>) -> Option<Performer> {
    let performer = child(node, "performer");
    let assigned = child(performer, "assignedEntity")?;
    Some(Performer {
        id: identifier(Some(assigned)),
        name: person_name(path(Some(assigned), &["assignedPerson", "name"])),
        role: display_name(performer, "functionCode")
            .or_else(|| display_name(Some(assigned), "code")),
        organization: organization(child(Some(assigned), "representedOrganization")),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn name_parts_and_full_name() {
        let node = json!({
            "@_use": "L",
            "given": ["John", { "@_qualifier": "CL", "#text": "Johnny" }],
            "family": "Doe",
            "suffix": "Jr."
        });
        let name = person_name(Some(&node)).expect("name");
        assert_eq!(name.full, "John Johnny Doe");
        assert_eq!(name.first(), Some("John"));
        assert_eq!(name.qualifiers, vec!["CL"]);
        assert_eq!(name.suffix, vec!["Jr."]);
        assert_eq!(name.use_code.as_deref(), Some("L"));

        let plain = person_name(Some(&json!("Dr. Smith"))).expect("plain");
        assert_eq!(plain.full, "Dr. Smith");
        assert!(person_name(Some(&json!({ "@_nullFlavor": "UNK" }))).is_none());
    }

    #[test]
    fn value_text_prefers_coded_label() {
        let coded = json!({ "value": { "@_code": "1", "@_displayName": "Hives" } });
        assert_eq!(value_text(Some(&coded)).as_deref(), Some("Hives"));

        let pq = json!({ "value": { "@_value": "7.2", "@_unit": "%" } });
        assert_eq!(value_text(Some(&pq)).as_deref(), Some("7.2 %"));

        let unitless = json!({ "value": { "@_value": "3", "@_unit": "1" } });
        assert_eq!(value_text(Some(&unitless)).as_deref(), Some("3"));
    }

    #[test]
    fn effective_time_reads_point_or_low() {
        let point = json!({ "effectiveTime": { "@_value": "20240101" } });
        assert_eq!(effective_time(Some(&point)).as_deref(), Some("20240101"));

        let interval = json!({ "effectiveTime": { "low": { "@_value": "2020" }, "high": { "@_value": "2021" } } });
        assert_eq!(effective_time(Some(&interval)).as_deref(), Some("2020"));
        assert_eq!(effective_high(Some(&interval)).as_deref(), Some("2021"));
    }

    #[test]
    fn performer_reads_function_code() {
        let act = json!({
            "performer": {
                "functionCode": { "@_displayName": "Surgeon" },
                "assignedEntity": {
                    "id": { "@_root": "npi-1" },
                    "assignedPerson": { "name": { "given": "Ann", "family": "Lee" } }
                }
            }
        });
        let performer = performer(Some(&act)).expect("performer");
        assert_eq!(performer.role.as_deref(), Some("Surgeon"));
        assert_eq!(performer.name.map(|n| n.full).as_deref(), Some("Ann Lee"));
    }
}
