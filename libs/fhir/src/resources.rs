//! The five resource documents this system exchanges with the store.
//!
//! Each struct carries its `resourceType` discriminator explicitly so a
//! serialized document is a complete, self-describing FHIR payload.

use chrono::{DateTime, FixedOffset, NaiveDate};
use serde::{Deserialize, Serialize};

use crate::datatypes::{
    Address, CodeableConcept, Coding, ContactPoint, Extension, HumanName, Identifier, Reference,
};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Patient {
    pub resource_type: String,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub name: Vec<HumanName>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub gender: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub birth_date: Option<NaiveDate>,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub telecom: Vec<ContactPoint>,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub address: Vec<Address>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub marital_status: Option<CodeableConcept>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub active: Option<bool>,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub contact: Vec<PatientContact>,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub extension: Vec<Extension>,
}

impl Patient {
    pub const RESOURCE_TYPE: &'static str = "Patient";
}

impl Default for Patient {
    fn default() -> Self {
        Self {
            resource_type: Self::RESOURCE_TYPE.to_string(),
            id: None,
            name: Vec::new(),
            gender: None,
            birth_date: None,
            telecom: Vec::new(),
            address: Vec::new(),
            marital_status: None,
            active: None,
            contact: Vec::new(),
            extension: Vec::new(),
        }
    }
}

/// Emergency contact attached to a patient.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct PatientContact {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<HumanName>,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub telecom: Vec<ContactPoint>,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub relationship: Vec<CodeableConcept>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Practitioner {
    pub resource_type: String,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub name: Vec<HumanName>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub gender: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub birth_date: Option<NaiveDate>,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub telecom: Vec<ContactPoint>,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub qualification: Vec<PractitionerQualification>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub active: Option<bool>,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub extension: Vec<Extension>,
}

impl Practitioner {
    pub const RESOURCE_TYPE: &'static str = "Practitioner";
}

impl Default for Practitioner {
    fn default() -> Self {
        Self {
            resource_type: Self::RESOURCE_TYPE.to_string(),
            id: None,
            name: Vec::new(),
            gender: None,
            birth_date: None,
            telecom: Vec::new(),
            qualification: Vec::new(),
            active: None,
            extension: Vec::new(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct PractitionerQualification {
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub identifier: Vec<Identifier>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub code: Option<CodeableConcept>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Organization {
    pub resource_type: String,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,

    #[serde(rename = "type", default, skip_serializing_if = "Vec::is_empty")]
    pub type_: Vec<CodeableConcept>,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub telecom: Vec<ContactPoint>,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub address: Vec<Address>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub active: Option<bool>,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub identifier: Vec<Identifier>,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub extension: Vec<Extension>,
}

impl Organization {
    pub const RESOURCE_TYPE: &'static str = "Organization";
}

impl Default for Organization {
    fn default() -> Self {
        Self {
            resource_type: Self::RESOURCE_TYPE.to_string(),
            id: None,
            name: None,
            type_: Vec::new(),
            telecom: Vec::new(),
            address: Vec::new(),
            active: None,
            identifier: Vec::new(),
            extension: Vec::new(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Appointment {
    pub resource_type: String,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub participant: Vec<AppointmentParticipant>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub start: Option<DateTime<FixedOffset>>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub end: Option<DateTime<FixedOffset>>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub minutes_duration: Option<i32>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub appointment_type: Option<CodeableConcept>,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub reason_code: Vec<CodeableConcept>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub specialty: Vec<CodeableConcept>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub comment: Option<String>,

    // R4 spells this element with a single "l".
    #[serde(rename = "cancelationReason", skip_serializing_if = "Option::is_none")]
    pub cancelation_reason: Option<CodeableConcept>,
}

impl Appointment {
    pub const RESOURCE_TYPE: &'static str = "Appointment";
}

impl Default for Appointment {
    fn default() -> Self {
        Self {
            resource_type: Self::RESOURCE_TYPE.to_string(),
            id: None,
            status: None,
            participant: Vec::new(),
            start: None,
            end: None,
            minutes_duration: None,
            appointment_type: None,
            reason_code: Vec::new(),
            description: None,
            specialty: Vec::new(),
            comment: None,
            cancelation_reason: None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct AppointmentParticipant {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub actor: Option<Reference>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub required: Option<String>, // required | optional | information-only

    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<String>, // accepted | declined | tentative | needs-action
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AuditEvent {
    pub resource_type: String,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,

    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub type_: Option<Coding>,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub subtype: Vec<Coding>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub action: Option<String>, // C | R | U | D | E

    #[serde(skip_serializing_if = "Option::is_none")]
    pub recorded: Option<DateTime<FixedOffset>>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub outcome: Option<String>, // 0 = success, 4/8/12 = failure grades

    #[serde(skip_serializing_if = "Option::is_none")]
    pub outcome_desc: Option<String>,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub agent: Vec<AuditEventAgent>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub source: Option<AuditEventSource>,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub entity: Vec<AuditEventEntity>,
}

impl AuditEvent {
    pub const RESOURCE_TYPE: &'static str = "AuditEvent";
}

impl Default for AuditEvent {
    fn default() -> Self {
        Self {
            resource_type: Self::RESOURCE_TYPE.to_string(),
            id: None,
            type_: None,
            subtype: Vec::new(),
            action: None,
            recorded: None,
            outcome: None,
            outcome_desc: None,
            agent: Vec::new(),
            source: None,
            entity: Vec::new(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct AuditEventAgent {
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub type_: Option<CodeableConcept>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub who: Option<Reference>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub requestor: Option<bool>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct AuditEventSource {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub observer: Option<Reference>,

    #[serde(rename = "type", default, skip_serializing_if = "Vec::is_empty")]
    pub type_: Vec<Coding>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct AuditEventEntity {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub what: Option<Reference>,

    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub type_: Option<Coding>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn patient_serializes_resource_type_discriminator() {
        let patient = Patient::default();
        let json = serde_json::to_value(&patient).unwrap();
        assert_eq!(json["resourceType"], "Patient");
        // Absent optional sections are omitted entirely.
        assert!(json.get("name").is_none());
        assert!(json.get("birthDate").is_none());
    }

    #[test]
    fn appointment_round_trips_through_json() {
        let appointment = Appointment {
            id: Some("A1".into()),
            status: Some("booked".into()),
            minutes_duration: Some(30),
            cancelation_reason: Some(CodeableConcept::text("patient request")),
            ..Appointment::default()
        };
        let json = serde_json::to_string(&appointment).unwrap();
        assert!(json.contains("\"cancelationReason\""));
        assert!(json.contains("\"minutesDuration\""));
        let back: Appointment = serde_json::from_str(&json).unwrap();
        assert_eq!(back, appointment);
    }

    #[test]
    fn decode_tolerates_foreign_fields() {
        let raw = r#"{
            "resourceType": "Organization",
            "id": "O1",
            "name": "City Hospital",
            "meta": {"versionId": "3"},
            "language": "en"
        }"#;
        let organization: Organization = serde_json::from_str(raw).unwrap();
        assert_eq!(organization.name.as_deref(), Some("City Hospital"));
    }
}
