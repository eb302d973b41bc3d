//! Appointment record ↔ Appointment resource.
//!
//! The patient and practitioner links encode as typed participant
//! references (`"Patient/<id>"`, `"Practitioner/<id>"`) carrying cached
//! display labels; decode routes each participant by its kind prefix.

use chrono::Duration;

use arogya_fhir::systems::V2_APPOINTMENT_TYPE;
use arogya_fhir::{
    datatypes::{CodeableConcept, Coding, Reference},
    Appointment, AppointmentParticipant,
};
use arogya_models::{AppointmentRecord, AppointmentStatus};

use crate::support::{local_instant, non_empty, split_local_instant};
use crate::ResourceCodec;

#[derive(Debug, Clone, Copy, Default)]
pub struct AppointmentCodec;

impl ResourceCodec for AppointmentCodec {
    type Flat = AppointmentRecord;
    type Resource = Appointment;

    fn encode(&self, record: &AppointmentRecord) -> Appointment {
        let mut appointment = Appointment::default();

        if let Some(id) = non_empty(&record.id) {
            appointment.id = Some(id.to_string());
        }

        appointment.status = record.status.map(|s| s.as_code().to_string());

        // Participants
        if let Some(patient_id) = non_empty(&record.patient_id) {
            appointment.participant.push(participant(
                "Patient",
                patient_id,
                record.patient_name.clone(),
            ));
        }
        if let Some(practitioner_id) = non_empty(&record.practitioner_id) {
            appointment.participant.push(participant(
                "Practitioner",
                practitioner_id,
                record.practitioner_name.clone(),
            ));
        }

        // Start/end instants in the local timezone
        if let (Some(date), Some(time)) = (record.appointment_date, record.appointment_time) {
            appointment.start = local_instant(date, time);
            if let (Some(start), Some(minutes)) = (appointment.start, record.duration_minutes) {
                appointment.end = Some(start + Duration::minutes(minutes.into()));
            }
        }

        appointment.minutes_duration = record.duration_minutes;

        if let Some(appointment_type) = &record.appointment_type {
            appointment.appointment_type = Some(CodeableConcept::coding(Coding::new(
                V2_APPOINTMENT_TYPE,
                appointment_type.to_uppercase(),
                appointment_type,
            )));
        }

        if let Some(reason) = &record.reason_code {
            appointment.reason_code.push(CodeableConcept::text(reason));
        }

        appointment.description = record.reason_description.clone();

        if let Some(specialty) = &record.specialty {
            appointment.specialty.push(CodeableConcept::text(specialty));
        }

        appointment.comment = record.comment.clone();

        if let Some(reason) = &record.cancellation_reason {
            appointment.cancelation_reason = Some(CodeableConcept::text(reason));
        }

        appointment
    }

    fn decode(&self, appointment: &Appointment) -> AppointmentRecord {
        let mut record = AppointmentRecord {
            duration_minutes: None,
            ..AppointmentRecord::default()
        };

        record.id = appointment.id.clone();
        record.status = appointment
            .status
            .as_deref()
            .and_then(AppointmentStatus::from_code);

        // Route participants by their reference kind prefix.
        for participant in &appointment.participant {
            let Some(actor) = &participant.actor else {
                continue;
            };
            match actor.parts() {
                Some(("Patient", id)) => {
                    record.patient_id = Some(id.to_string());
                    record.patient_name = actor.display.clone();
                }
                Some(("Practitioner", id)) => {
                    record.practitioner_id = Some(id.to_string());
                    record.practitioner_name = actor.display.clone();
                }
                _ => {}
            }
        }

        if let Some(start) = &appointment.start {
            let (date, time) = split_local_instant(start);
            record.appointment_date = Some(date);
            record.appointment_time = Some(time);
        }

        record.duration_minutes = appointment.minutes_duration;

        record.appointment_type = appointment.appointment_type.as_ref().and_then(|concept| {
            concept
                .first_display()
                .or(concept.first_code())
                .map(str::to_string)
        });

        record.reason_code = appointment
            .reason_code
            .first()
            .and_then(|concept| concept.text.clone());
        record.reason_description = appointment.description.clone();
        record.specialty = appointment
            .specialty
            .first()
            .and_then(|concept| concept.text.clone());
        record.comment = appointment.comment.clone();
        record.cancellation_reason = appointment
            .cancelation_reason
            .as_ref()
            .and_then(|concept| concept.text.clone());

        record
    }
}

fn participant(kind: &str, id: &str, display: Option<String>) -> AppointmentParticipant {
    let mut actor = Reference::new(kind, id);
    actor.display = display;
    AppointmentParticipant {
        actor: Some(actor),
        required: Some("required".to_string()),
        status: Some("accepted".to_string()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{NaiveDate, NaiveTime};

    fn full_record() -> AppointmentRecord {
        AppointmentRecord {
            id: Some("A1".into()),
            patient_id: Some("P1".into()),
            practitioner_id: Some("D1".into()),
            appointment_date: NaiveDate::from_ymd_opt(2026, 9, 15),
            appointment_time: NaiveTime::from_hms_opt(10, 30, 0),
            appointment_type: Some("Consultation".into()),
            status: Some(AppointmentStatus::Booked),
            reason_code: Some("General consultation".into()),
            reason_description: Some("Follow-up on reports".into()),
            specialty: Some("Cardiology".into()),
            duration_minutes: Some(45),
            comment: Some("bring previous ECG".into()),
            patient_name: Some("Asha Rao".into()),
            practitioner_name: Some("Dr. Meera Kulkarni".into()),
            cancellation_reason: None,
        }
    }

    #[test]
    fn round_trip_preserves_every_field() {
        let codec = AppointmentCodec;
        let record = full_record();
        assert_eq!(codec.decode(&codec.encode(&record)), record);
    }

    #[test]
    fn patient_reference_is_kind_prefixed() {
        let codec = AppointmentCodec;
        let appointment = codec.encode(&full_record());
        let actor = appointment.participant[0].actor.as_ref().unwrap();
        assert_eq!(actor.reference.as_deref(), Some("Patient/P1"));
        assert_eq!(actor.display.as_deref(), Some("Asha Rao"));
        // Decode strips the kind prefix back off.
        let decoded = codec.decode(&appointment);
        assert_eq!(decoded.patient_id.as_deref(), Some("P1"));
        assert_eq!(decoded.practitioner_id.as_deref(), Some("D1"));
    }

    #[test]
    fn end_is_derived_from_start_and_duration() {
        let codec = AppointmentCodec;
        let appointment = codec.encode(&full_record());
        let start = appointment.start.unwrap();
        let end = appointment.end.unwrap();
        assert_eq!(end - start, Duration::minutes(45));
    }

    #[test]
    fn end_is_absent_without_duration() {
        let codec = AppointmentCodec;
        let mut record = full_record();
        record.duration_minutes = None;
        let appointment = codec.encode(&record);
        assert!(appointment.start.is_some());
        assert!(appointment.end.is_none());
    }

    #[test]
    fn decode_ignores_foreign_participants() {
        let codec = AppointmentCodec;
        let mut appointment = codec.encode(&full_record());
        appointment.participant.push(AppointmentParticipant {
            actor: Some(Reference {
                reference: Some("Location/L1".into()),
                display: Some("Clinic Room 2".into()),
            }),
            required: None,
            status: None,
        });
        let decoded = codec.decode(&appointment);
        assert_eq!(decoded.patient_id.as_deref(), Some("P1"));
        assert_eq!(decoded.practitioner_id.as_deref(), Some("D1"));
    }

    #[test]
    fn decode_maps_unknown_status_to_absent() {
        let codec = AppointmentCodec;
        let mut appointment = codec.encode(&full_record());
        appointment.status = Some("entered-in-error".into());
        assert_eq!(codec.decode(&appointment).status, None);
    }

    #[test]
    fn cancellation_reason_round_trips() {
        let codec = AppointmentCodec;
        let mut record = full_record();
        record.status = Some(AppointmentStatus::Cancelled);
        record.cancellation_reason = Some("patient request".into());
        let decoded = codec.decode(&codec.encode(&record));
        assert_eq!(decoded.status, Some(AppointmentStatus::Cancelled));
        assert_eq!(decoded.cancellation_reason.as_deref(), Some("patient request"));
    }
}
