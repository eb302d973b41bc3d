//! Patient record.

use chrono::{Local, NaiveDate};
use serde::{Deserialize, Serialize};
use validator::{Validate, ValidationError, ValidationErrors};

use crate::enums::Gender;
use crate::validation::{
    age_in_years, AADHAAR, PAN_CARD, SIX_DIGIT_POSTAL_CODE, TEN_DIGIT_PHONE,
};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct PatientRecord {
    /// Store-assigned identity; absent before the first create.
    pub id: Option<String>,

    #[validate(required, length(min = 1, max = 100, message = "First name is required"))]
    pub first_name: Option<String>,

    #[validate(required, length(min = 1, max = 100, message = "Last name is required"))]
    pub last_name: Option<String>,

    #[validate(required(message = "Date of birth is required"))]
    pub date_of_birth: Option<NaiveDate>,

    #[validate(required(message = "Gender is required"))]
    pub gender: Option<Gender>,

    #[validate(
        required(message = "Phone number is required"),
        regex(path = *TEN_DIGIT_PHONE, message = "Phone number must be 10 digits")
    )]
    pub phone: Option<String>,

    #[validate(email(message = "Invalid email format"))]
    pub email: Option<String>,

    pub address: Option<String>,
    pub city: Option<String>,
    pub state: Option<String>,

    #[validate(regex(path = *SIX_DIGIT_POSTAL_CODE, message = "Postal code must be 6 digits"))]
    pub postal_code: Option<String>,

    pub marital_status: Option<String>, // never_married, married, divorced, widowed

    pub blood_group: Option<String>, // A+, A-, B+, B-, O+, O-, AB+, AB-

    #[validate(regex(path = *PAN_CARD, message = "Invalid PAN format"))]
    pub pan_card: Option<String>,

    #[validate(regex(path = *AADHAAR, message = "Aadhaar must be 12 digits"))]
    pub aadhaar_number: Option<String>,

    pub emergency_contact_name: Option<String>,
    pub emergency_contact_phone: Option<String>,
    pub emergency_contact_relation: Option<String>,

    pub active: Option<bool>,
}

impl Default for PatientRecord {
    fn default() -> Self {
        Self {
            id: None,
            first_name: None,
            last_name: None,
            date_of_birth: None,
            gender: None,
            phone: None,
            email: None,
            address: None,
            city: None,
            state: None,
            postal_code: None,
            marital_status: None,
            blood_group: None,
            pan_card: None,
            aadhaar_number: None,
            emergency_contact_name: None,
            emergency_contact_phone: None,
            emergency_contact_relation: None,
            active: Some(true),
        }
    }
}

impl PatientRecord {
    /// Display name: given name followed by family name.
    pub fn full_name(&self) -> String {
        let first = self.first_name.as_deref().unwrap_or_default();
        let last = self.last_name.as_deref().unwrap_or_default();
        format!("{first} {last}").trim().to_string()
    }

    /// Completed years since the date of birth, as of today.
    pub fn age(&self) -> Option<i32> {
        self.date_of_birth
            .map(|dob| age_in_years(dob, Local::now().date_naive()))
    }

    /// Field-format validation plus the rules that need today's date.
    pub fn validate_record(&self) -> Result<(), ValidationErrors> {
        let mut errors = match self.validate() {
            Ok(()) => ValidationErrors::new(),
            Err(errors) => errors,
        };
        if let Some(dob) = self.date_of_birth {
            if dob > Local::now().date_naive() {
                let mut error = ValidationError::new("past");
                error.message = Some("Date of birth must not be in the future".into());
                errors.add("date_of_birth", error);
            }
        }
        if errors.is_empty() {
            Ok(())
        } else {
            Err(errors)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    fn valid_record() -> PatientRecord {
        PatientRecord {
            first_name: Some("Asha".into()),
            last_name: Some("Rao".into()),
            date_of_birth: NaiveDate::from_ymd_opt(1990, 1, 1),
            gender: Some(Gender::Female),
            phone: Some("9876543210".into()),
            ..PatientRecord::default()
        }
    }

    #[test]
    fn valid_record_passes() {
        assert!(valid_record().validate_record().is_ok());
    }

    #[test]
    fn full_name_joins_given_and_family() {
        assert_eq!(valid_record().full_name(), "Asha Rao");
    }

    #[test]
    fn bad_phone_is_rejected() {
        let mut record = valid_record();
        record.phone = Some("12345".into());
        assert!(record.validate_record().is_err());
    }

    #[test]
    fn missing_required_fields_are_rejected() {
        let mut record = valid_record();
        record.first_name = None;
        assert!(record.validate_record().is_err());
    }

    #[test]
    fn future_date_of_birth_is_rejected() {
        let mut record = valid_record();
        record.date_of_birth = Some(Local::now().date_naive() + Duration::days(1));
        assert!(record.validate_record().is_err());
        // Born today is still allowed.
        record.date_of_birth = Some(Local::now().date_naive());
        assert!(record.validate_record().is_ok());
    }

    #[test]
    fn active_defaults_to_true() {
        assert_eq!(PatientRecord::default().active, Some(true));
    }
}
