//! Document header and `recordTarget`.

use ccda_core::{
    DocumentHeader, Guardian, IdentifierType, Patient, PatientIdentifier, TemplateIdentifier,
};
use serde_json::Value;

use super::common::{addresses, author, coded_value, display_name, person_name, telecoms};
use crate::tree::{attr, child, children, path, text};

pub(crate) fn document_header(document: &Value) -> DocumentHeader {
    let root = Some(document);
    DocumentHeader {
        id: attr(child(root, "id"), "root"),
        set_id: attr(child(root, "setId"), "root"),
        version_number: attr(child(root, "versionNumber"), "value"),
        title: text(child(root, "title")),
        code: coded_value(child(root, "code")),
        effective_time: attr(child(root, "effectiveTime"), "value"),
        confidentiality_code: attr(child(root, "confidentialityCode"), "code"),
        language_code: attr(child(root, "languageCode"), "code"),
        template_ids: children(root, "templateId")
            .into_iter()
            .filter_map(|template| {
                let root = attr(Some(template), "root")?;
                Some(TemplateIdentifier::new(root, attr(Some(template), "extension")))
            })
            .collect(),
        author: author(root),
        custodian: text(path(
            root,
            &[
                "custodian",
                "assignedCustodian",
                "representedCustodianOrganization",
                "name",
            ],
        )),
    }
}

/// `None` unless both `patientRole` and `patient` are present.
pub(crate) fn patient(document: &Value) -> Option<Patient> {
    let role = path(Some(document), &["recordTarget", "patientRole"])?;
    let person = child(Some(role), "patient")?;

    let identifiers: Vec<PatientIdentifier> = children(Some(role), "id")
        .into_iter()
        .map(|id| {
            let root = attr(Some(id), "root");
            PatientIdentifier {
                id_type: identifier_type(root.as_deref()),
                extension: attr(Some(id), "extension"),
                assigning_authority: attr(Some(id), "assigningAuthorityName"),
                root,
            }
        })
        .collect();
    let mrn = identifiers
        .iter()
        .filter(|id| id.id_type == IdentifierType::Mrn)
        .find_map(|id| id.extension.clone());

    let person = Some(person);
    Some(Patient {
        id: identifiers.first().and_then(|id| id.root.clone()),
        mrn,
        identifiers,
        name: person_name(child(person, "name")),
        gender: attr(child(person, "administrativeGenderCode"), "code"),
        date_of_birth: attr(child(person, "birthTime"), "value"),
        race: display_name(person, "raceCode"),
        ethnicity: display_name(person, "ethnicGroupCode"),
        language: attr(path(person, &["languageCommunication", "languageCode"]), "code"),
        marital_status: display_name(person, "maritalStatusCode"),
        addresses: addresses(child(Some(role), "addr")),
        telecom: telecoms(child(Some(role), "telecom")),
        guardians: children(person, "guardian")
            .into_iter()
            .map(guardian)
            .collect(),
    })
}

fn guardian(node: &Value) -> Guardian {
    let node = Some(node);
    Guardian {
        name: person_name(path(node, &["guardianPerson", "name"])),
        relationship: display_name(node, "code"),
        telecom: telecoms(child(node, "telecom")),
        address: addresses(child(node, "addr")).into_iter().next(),
    }
}

/// Identifier kind by assigning-authority OID. Unlisted roots are record numbers.
pub(crate) fn identifier_type(root: Option<&str>) -> IdentifierType {
    match root {
        Some("2.16.840.1.113883.4.1") => IdentifierType::Ssn,
        Some("2.16.840.1.113883.4.6") => IdentifierType::Npi,
        Some("2.16.840.1.113883.4.2") => IdentifierType::Tin,
        Some("2.16.840.1.113883.4.927") => IdentifierType::Medicare,
        Some(root) if root.starts_with("2.16.840.1.113883.4.3.") => IdentifierType::DriversLicense,
        Some(root) if root.starts_with("2.16.840.1.113883.4.330.") => IdentifierType::Passport,
        _ => IdentifierType::Mrn,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn ssn_is_not_the_mrn() {
        let document = json!({
            "recordTarget": { "patientRole": {
                "id": [
                    { "@_root": "2.16.840.1.113883.4.1", "@_extension": "111-22-3333" },
                    { "@_root": "1.2.3.4", "@_extension": "MRN-9" }
                ],
                "patient": { "name": { "given": "Jane", "family": "Roe" } }
            } }
        });
        let patient = patient(&document).expect("patient");
        assert_eq!(patient.mrn.as_deref(), Some("MRN-9"));
        assert_eq!(patient.identifiers[0].id_type, IdentifierType::Ssn);
        assert_eq!(patient.id.as_deref(), Some("2.16.840.1.113883.4.1"));
    }

    #[test]
    fn identifier_table() {
        assert_eq!(
            identifier_type(Some("2.16.840.1.113883.4.3.25")),
            IdentifierType::DriversLicense
        );
        assert_eq!(
            identifier_type(Some("2.16.840.1.113883.4.330.840")),
            IdentifierType::Passport
        );
        assert_eq!(identifier_type(None), IdentifierType::Mrn);
    }

    #[test]
    fn patient_requires_patient_element() {
        let document = json!({ "recordTarget": { "patientRole": { "id": { "@_root": "x" } } } });
        assert!(patient(&document).is_none());
    }
}
