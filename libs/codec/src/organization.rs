//! Organization record ↔ Organization resource.

use arogya_fhir::systems::{extensions, DEFAULT_COUNTRY, ORGANIZATION_REGISTRATION, ORGANIZATION_TYPE};
use arogya_fhir::{
    datatypes::{extension_string, Address, CodeableConcept, Coding, ContactPoint, Extension, Identifier},
    Organization,
};
use arogya_models::OrganizationRecord;

use crate::support::{non_empty, telecom_value};
use crate::ResourceCodec;

#[derive(Debug, Clone, Copy, Default)]
pub struct OrganizationCodec;

impl ResourceCodec for OrganizationCodec {
    type Flat = OrganizationRecord;
    type Resource = Organization;

    fn encode(&self, record: &OrganizationRecord) -> Organization {
        let mut organization = Organization::default();

        if let Some(id) = non_empty(&record.id) {
            organization.id = Some(id.to_string());
        }

        organization.name = record.name.clone();

        // Type: code is the lowercased, dash-joined form; display keeps the
        // caller's original text.
        if let Some(type_) = &record.type_ {
            organization.type_.push(CodeableConcept::coding(Coding::new(
                ORGANIZATION_TYPE,
                type_.to_lowercase().replace(' ', "-"),
                type_,
            )));
        }

        // Telecom
        if let Some(phone) = non_empty(&record.phone) {
            organization.telecom.push(ContactPoint::phone(phone));
        }
        if let Some(email) = non_empty(&record.email) {
            organization.telecom.push(ContactPoint::email(email));
        }

        // Address
        if record.address.is_some()
            || record.city.is_some()
            || record.state.is_some()
            || record.postal_code.is_some()
        {
            organization.address.push(Address {
                line: record.address.clone().into_iter().collect(),
                city: record.city.clone(),
                state: record.state.clone(),
                postal_code: record.postal_code.clone(),
                country: Some(DEFAULT_COUNTRY.to_string()),
            });
        }

        organization.active = Some(record.active.unwrap_or(true));

        if let Some(registration) = &record.registration_number {
            organization
                .identifier
                .push(Identifier::new(ORGANIZATION_REGISTRATION, registration));
        }

        // Side-channel fields
        if let Some(website) = &record.website {
            organization
                .extension
                .push(Extension::string(extensions::WEBSITE, website));
        }
        if let Some(description) = &record.description {
            organization
                .extension
                .push(Extension::string(extensions::DESCRIPTION, description));
        }

        organization
    }

    fn decode(&self, organization: &Organization) -> OrganizationRecord {
        let address = organization.address.first();

        OrganizationRecord {
            id: organization.id.clone(),
            name: organization.name.clone(),
            type_: organization.type_.first().and_then(|concept| {
                concept
                    .first_display()
                    .or(concept.first_code())
                    .map(str::to_string)
            }),
            phone: telecom_value(&organization.telecom, "phone").map(str::to_string),
            email: telecom_value(&organization.telecom, "email").map(str::to_string),
            address: address.and_then(|a| a.line.first().cloned()),
            city: address.and_then(|a| a.city.clone()),
            state: address.and_then(|a| a.state.clone()),
            postal_code: address.and_then(|a| a.postal_code.clone()),
            registration_number: organization
                .identifier
                .first()
                .and_then(|i| i.value.clone()),
            website: extension_string(&organization.extension, extensions::WEBSITE)
                .map(str::to_string),
            active: organization.active,
            description: extension_string(&organization.extension, extensions::DESCRIPTION)
                .map(str::to_string),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn full_record() -> OrganizationRecord {
        OrganizationRecord {
            id: Some("O1".into()),
            name: Some("City Hospital".into()),
            type_: Some("Hospital".into()),
            phone: Some("9876543210".into()),
            email: Some("front.desk@cityhospital.in".into()),
            address: Some("MG Road".into()),
            city: Some("Pune".into()),
            state: Some("MH".into()),
            postal_code: Some("411001".into()),
            registration_number: Some("REG-778".into()),
            website: Some("https://cityhospital.in".into()),
            active: Some(true),
            description: Some("Multi-speciality hospital".into()),
        }
    }

    #[test]
    fn round_trip_preserves_every_field() {
        let codec = OrganizationCodec;
        let record = full_record();
        assert_eq!(codec.decode(&codec.encode(&record)), record);
    }

    #[test]
    fn type_code_is_normalized_and_display_kept() {
        let codec = OrganizationCodec;
        let mut record = full_record();
        record.type_ = Some("Primary Care".into());
        let organization = codec.encode(&record);
        let coding = &organization.type_[0].coding[0];
        assert_eq!(coding.code.as_deref(), Some("primary-care"));
        assert_eq!(coding.display.as_deref(), Some("Primary Care"));
        // Original casing is restored on decode.
        assert_eq!(codec.decode(&organization).type_.as_deref(), Some("Primary Care"));
    }

    #[test]
    fn decode_falls_back_to_code_when_display_absent() {
        let codec = OrganizationCodec;
        let mut organization = codec.encode(&full_record());
        organization.type_[0].coding[0].display = None;
        assert_eq!(codec.decode(&organization).type_.as_deref(), Some("hospital"));
    }

    #[test]
    fn decode_tolerates_bare_document() {
        let codec = OrganizationCodec;
        let decoded = codec.decode(&Organization::default());
        assert_eq!(decoded.name, None);
        assert_eq!(decoded.type_, None);
        assert_eq!(decoded.website, None);
        assert_eq!(decoded.registration_number, None);
    }
}
