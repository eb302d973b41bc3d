//! Appointment record.

use chrono::{Local, NaiveDate, NaiveTime};
use serde::{Deserialize, Serialize};
use validator::{Validate, ValidationError, ValidationErrors};

use crate::enums::AppointmentStatus;

pub const DEFAULT_DURATION_MINUTES: i32 = 30;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct AppointmentRecord {
    pub id: Option<String>,

    /// Weak reference to the Patient resource.
    #[validate(required, length(min = 1, message = "Patient is required"))]
    pub patient_id: Option<String>,

    /// Weak reference to the Practitioner resource.
    #[validate(required, length(min = 1, message = "Practitioner is required"))]
    pub practitioner_id: Option<String>,

    #[validate(required(message = "Appointment date is required"))]
    pub appointment_date: Option<NaiveDate>,

    #[validate(required(message = "Appointment time is required"))]
    pub appointment_time: Option<NaiveTime>,

    #[validate(required, length(min = 1, message = "Appointment type is required"))]
    pub appointment_type: Option<String>, // Consultation, Follow-up, Emergency

    #[validate(required(message = "Status is required"))]
    pub status: Option<AppointmentStatus>,

    pub reason_code: Option<String>,

    pub reason_description: Option<String>,

    pub specialty: Option<String>, // Cardiology, General Medicine, ...

    pub duration_minutes: Option<i32>,

    pub comment: Option<String>,

    /// Display labels recomputed from the referenced entities; never
    /// authoritative input.
    pub patient_name: Option<String>,
    pub practitioner_name: Option<String>,

    pub cancellation_reason: Option<String>,
}

impl Default for AppointmentRecord {
    fn default() -> Self {
        Self {
            id: None,
            patient_id: None,
            practitioner_id: None,
            appointment_date: None,
            appointment_time: None,
            appointment_type: None,
            status: None,
            reason_code: None,
            reason_description: None,
            specialty: None,
            duration_minutes: Some(DEFAULT_DURATION_MINUTES),
            comment: None,
            patient_name: None,
            practitioner_name: None,
            cancellation_reason: None,
        }
    }
}

impl AppointmentRecord {
    pub fn validate_record(&self) -> Result<(), ValidationErrors> {
        let mut errors = match self.validate() {
            Ok(()) => ValidationErrors::new(),
            Err(errors) => errors,
        };
        if let Some(date) = self.appointment_date {
            if date <= Local::now().date_naive() {
                let mut error = ValidationError::new("future");
                error.message = Some("Appointment must be in future".into());
                errors.add("appointment_date", error);
            }
        }
        if errors.is_empty() {
            Ok(())
        } else {
            Err(errors)
        }
    }
}
