//! Practitioner record ↔ Practitioner resource.

use arogya_fhir::systems::{extensions, MEDICAL_COUNCIL};
use arogya_fhir::{
    datatypes::{
        extension_integer, extension_string, CodeableConcept, ContactPoint, Extension, HumanName,
        Identifier,
    },
    Practitioner, PractitionerQualification,
};
use arogya_models::{Gender, PractitionerRecord};

use crate::support::{non_empty, telecom_value};
use crate::ResourceCodec;

#[derive(Debug, Clone, Copy, Default)]
pub struct PractitionerCodec;

impl ResourceCodec for PractitionerCodec {
    type Flat = PractitionerRecord;
    type Resource = Practitioner;

    fn encode(&self, record: &PractitionerRecord) -> Practitioner {
        let mut practitioner = Practitioner::default();

        if let Some(id) = non_empty(&record.id) {
            practitioner.id = Some(id.to_string());
        }

        // Name, with the professional title prefix
        practitioner.name.push(HumanName {
            family: record.last_name.clone(),
            given: record.first_name.clone().into_iter().collect(),
            prefix: vec!["Dr.".to_string()],
            text: Some(record.full_name()),
        });

        practitioner.gender = record.gender.map(|g| g.as_code().to_string());
        practitioner.birth_date = record.date_of_birth;

        // Telecom
        if let Some(phone) = non_empty(&record.phone) {
            practitioner.telecom.push(ContactPoint::phone(phone));
        }
        if let Some(email) = non_empty(&record.email) {
            practitioner.telecom.push(ContactPoint::email(email));
        }

        // Qualification carries both the degree text and the council
        // registration identifier.
        if record.qualifications.is_some() || record.registration_number.is_some() {
            let mut qualification = PractitionerQualification::default();
            if let Some(qualifications) = &record.qualifications {
                qualification.code = Some(CodeableConcept::text(qualifications));
            }
            if let Some(registration) = &record.registration_number {
                qualification
                    .identifier
                    .push(Identifier::new(MEDICAL_COUNCIL, registration));
            }
            practitioner.qualification.push(qualification);
        }

        practitioner.active = Some(record.active.unwrap_or(true));

        // Side-channel fields
        if let Some(specialization) = &record.specialization {
            practitioner
                .extension
                .push(Extension::string(extensions::SPECIALIZATION, specialization));
        }
        if let Some(department) = &record.department {
            practitioner
                .extension
                .push(Extension::string(extensions::DEPARTMENT, department));
        }
        if let Some(years) = record.years_of_experience {
            practitioner
                .extension
                .push(Extension::integer(extensions::YEARS_EXPERIENCE, years));
        }
        if let Some(organization_id) = &record.organization_id {
            practitioner
                .extension
                .push(Extension::string(extensions::ORGANIZATION, organization_id));
        }

        practitioner
    }

    fn decode(&self, practitioner: &Practitioner) -> PractitionerRecord {
        let name = practitioner.name.first();
        let qualification = practitioner.qualification.first();

        PractitionerRecord {
            id: practitioner.id.clone(),
            first_name: name.filter(|n| !n.given.is_empty()).map(|n| n.given.join(" ")),
            last_name: name.and_then(|n| n.family.clone()),
            gender: practitioner.gender.as_deref().map(Gender::from_code),
            date_of_birth: practitioner.birth_date,
            specialization: extension_string(&practitioner.extension, extensions::SPECIALIZATION)
                .map(str::to_string),
            registration_number: qualification
                .and_then(|q| q.identifier.first())
                .and_then(|i| i.value.clone()),
            phone: telecom_value(&practitioner.telecom, "phone").map(str::to_string),
            email: telecom_value(&practitioner.telecom, "email").map(str::to_string),
            qualifications: qualification
                .and_then(|q| q.code.as_ref())
                .and_then(|c| c.text.clone()),
            years_of_experience: extension_integer(
                &practitioner.extension,
                extensions::YEARS_EXPERIENCE,
            ),
            department: extension_string(&practitioner.extension, extensions::DEPARTMENT)
                .map(str::to_string),
            organization_id: extension_string(&practitioner.extension, extensions::ORGANIZATION)
                .map(str::to_string),
            active: practitioner.active,
        }
    }
}
