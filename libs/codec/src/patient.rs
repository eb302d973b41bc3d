//! Patient record ↔ Patient resource.

use arogya_fhir::systems::{extensions, DEFAULT_COUNTRY, V3_MARITAL_STATUS};
use arogya_fhir::{
    datatypes::{extension_string, Address, CodeableConcept, Coding, ContactPoint, Extension, HumanName},
    Patient, PatientContact,
};
use arogya_models::{Gender, PatientRecord};

use crate::support::{non_empty, telecom_value};
use crate::ResourceCodec;

#[derive(Debug, Clone, Copy, Default)]
pub struct PatientCodec;

impl ResourceCodec for PatientCodec {
    type Flat = PatientRecord;
    type Resource = Patient;

    fn encode(&self, record: &PatientRecord) -> Patient {
        let mut patient = Patient::default();

        if let Some(id) = non_empty(&record.id) {
            patient.id = Some(id.to_string());
        }

        // Name
        patient.name.push(HumanName {
            family: record.last_name.clone(),
            given: record.first_name.clone().into_iter().collect(),
            prefix: Vec::new(),
            text: Some(record.full_name()),
        });

        // Gender
        patient.gender = record.gender.map(|g| g.as_code().to_string());

        // Birth date
        patient.birth_date = record.date_of_birth;

        // Telecom
        if let Some(phone) = non_empty(&record.phone) {
            let mut point = ContactPoint::phone(phone);
            point.use_ = Some("mobile".to_string());
            patient.telecom.push(point);
        }
        if let Some(email) = non_empty(&record.email) {
            patient.telecom.push(ContactPoint::email(email));
        }

        // Address
        if record.address.is_some()
            || record.city.is_some()
            || record.state.is_some()
            || record.postal_code.is_some()
        {
            patient.address.push(Address {
                line: record.address.clone().into_iter().collect(),
                city: record.city.clone(),
                state: record.state.clone(),
                postal_code: record.postal_code.clone(),
                country: Some(DEFAULT_COUNTRY.to_string()),
            });
        }

        // Marital status
        if let Some(status) = &record.marital_status {
            patient.marital_status = Some(CodeableConcept::coding(Coding::new(
                V3_MARITAL_STATUS,
                status.to_uppercase(),
                status,
            )));
        }

        patient.active = Some(record.active.unwrap_or(true));

        // Side-channel fields
        if let Some(blood_group) = &record.blood_group {
            patient
                .extension
                .push(Extension::string(extensions::BLOOD_GROUP, blood_group));
        }
        if let Some(pan) = &record.pan_card {
            patient
                .extension
                .push(Extension::string(extensions::PAN_CARD, pan));
        }
        if let Some(aadhaar) = &record.aadhaar_number {
            patient
                .extension
                .push(Extension::string(extensions::AADHAAR, aadhaar));
        }

        // Emergency contact
        if let Some(contact_name) = &record.emergency_contact_name {
            let mut contact = PatientContact {
                name: Some(HumanName {
                    text: Some(contact_name.clone()),
                    ..HumanName::default()
                }),
                ..PatientContact::default()
            };
            if let Some(phone) = &record.emergency_contact_phone {
                contact.telecom.push(ContactPoint::phone(phone));
            }
            if let Some(relation) = &record.emergency_contact_relation {
                contact.relationship.push(CodeableConcept::text(relation));
            }
            patient.contact.push(contact);
        }

        patient
    }

    fn decode(&self, patient: &Patient) -> PatientRecord {
        let name = patient.name.first();
        let address = patient.address.first();
        let contact = patient.contact.first();

        PatientRecord {
            id: patient.id.clone(),
            first_name: name.and_then(given_as_single_string),
            last_name: name.and_then(|n| n.family.clone()),
            date_of_birth: patient.birth_date,
            gender: patient.gender.as_deref().map(Gender::from_code),
            phone: telecom_value(&patient.telecom, "phone").map(str::to_string),
            email: telecom_value(&patient.telecom, "email").map(str::to_string),
            address: address.and_then(|a| a.line.first().cloned()),
            city: address.and_then(|a| a.city.clone()),
            state: address.and_then(|a| a.state.clone()),
            postal_code: address.and_then(|a| a.postal_code.clone()),
            marital_status: patient.marital_status.as_ref().and_then(|concept| {
                concept
                    .first_display()
                    .or(concept.first_code())
                    .map(str::to_string)
            }),
            blood_group: extension_string(&patient.extension, extensions::BLOOD_GROUP)
                .map(str::to_string),
            pan_card: extension_string(&patient.extension, extensions::PAN_CARD)
                .map(str::to_string),
            aadhaar_number: extension_string(&patient.extension, extensions::AADHAAR)
                .map(str::to_string),
            emergency_contact_name: contact
                .and_then(|c| c.name.as_ref())
                .and_then(|n| n.text.clone()),
            emergency_contact_phone: contact
                .and_then(|c| telecom_value(&c.telecom, "phone"))
                .map(str::to_string),
            emergency_contact_relation: contact
                .and_then(|c| c.relationship.first())
                .and_then(|r| r.text.clone()),
            active: patient.active,
        }
    }
}

/// Given-name parts joined into one display string.
fn given_as_single_string(name: &HumanName) -> Option<String> {
    if name.given.is_empty() {
        None
    } else {
        Some(name.given.join(" "))
    }
}
