//! Practitioner record.

use chrono::{Local, NaiveDate};
use serde::{Deserialize, Serialize};
use validator::{Validate, ValidationError, ValidationErrors};

use crate::enums::Gender;
use crate::validation::{age_in_years, TEN_DIGIT_PHONE};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct PractitionerRecord {
    pub id: Option<String>,

    #[validate(required, length(min = 1, max = 100, message = "First name is required"))]
    pub first_name: Option<String>,

    #[validate(required, length(min = 1, max = 100, message = "Last name is required"))]
    pub last_name: Option<String>,

    #[validate(required(message = "Gender is required"))]
    pub gender: Option<Gender>,

    #[validate(required(message = "Date of birth is required"))]
    pub date_of_birth: Option<NaiveDate>,

    #[validate(required, length(min = 1, message = "Specialization is required"))]
    pub specialization: Option<String>, // General Practitioner, Cardiologist, ...

    #[validate(required, length(min = 1, message = "Registration number is required"))]
    pub registration_number: Option<String>, // medical council registration

    #[validate(
        required(message = "Phone number is required"),
        regex(path = *TEN_DIGIT_PHONE, message = "Phone must be 10 digits")
    )]
    pub phone: Option<String>,

    #[validate(email(message = "Invalid email format"))]
    pub email: Option<String>,

    pub qualifications: Option<String>, // MBBS, MD, ...

    pub years_of_experience: Option<i32>,

    #[validate(required, length(min = 1, message = "Department is required"))]
    pub department: Option<String>,

    /// Weak reference to the employing Organization; lookup only.
    pub organization_id: Option<String>,

    pub active: Option<bool>,
}

impl Default for PractitionerRecord {
    fn default() -> Self {
        Self {
            id: None,
            first_name: None,
            last_name: None,
            gender: None,
            date_of_birth: None,
            specialization: None,
            registration_number: None,
            phone: None,
            email: None,
            qualifications: None,
            years_of_experience: None,
            department: None,
            organization_id: None,
            active: Some(true),
        }
    }
}

impl PractitionerRecord {
    /// Display name with the professional title prefix.
    pub fn full_name(&self) -> String {
        let first = self.first_name.as_deref().unwrap_or_default();
        let last = self.last_name.as_deref().unwrap_or_default();
        format!("Dr. {first} {last}").trim_end().to_string()
    }

    pub fn age(&self) -> Option<i32> {
        self.date_of_birth
            .map(|dob| age_in_years(dob, Local::now().date_naive()))
    }

    pub fn validate_record(&self) -> Result<(), ValidationErrors> {
        let mut errors = match self.validate() {
            Ok(()) => ValidationErrors::new(),
            Err(errors) => errors,
        };
        if let Some(dob) = self.date_of_birth {
            if dob >= Local::now().date_naive() {
                let mut error = ValidationError::new("past");
                error.message = Some("Date of birth must be in the past".into());
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
