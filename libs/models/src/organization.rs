//! Organization record.

use serde::{Deserialize, Serialize};
use validator::{Validate, ValidationErrors};

use crate::validation::{SIX_DIGIT_POSTAL_CODE, TEN_DIGIT_PHONE};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct OrganizationRecord {
    pub id: Option<String>,

    #[validate(required, length(min = 1, max = 200, message = "Organization name is required"))]
    pub name: Option<String>,

    #[serde(rename = "type")]
    #[validate(required, length(min = 1, message = "Type is required"))]
    pub type_: Option<String>, // Hospital, Clinic, Pharmacy, Laboratory

    #[validate(
        required(message = "Phone number is required"),
        regex(path = *TEN_DIGIT_PHONE, message = "Phone must be 10 digits")
    )]
    pub phone: Option<String>,

    #[validate(email(message = "Invalid email format"))]
    pub email: Option<String>,

    pub address: Option<String>,
    pub city: Option<String>,
    pub state: Option<String>,

    #[validate(regex(path = *SIX_DIGIT_POSTAL_CODE, message = "Postal code must be 6 digits"))]
    pub postal_code: Option<String>,

    pub registration_number: Option<String>,

    pub website: Option<String>,

    pub active: Option<bool>,

    pub description: Option<String>,
}

impl Default for OrganizationRecord {
    fn default() -> Self {
        Self {
            id: None,
            name: None,
            type_: None,
            phone: None,
            email: None,
            address: None,
            city: None,
            state: None,
            postal_code: None,
            registration_number: None,
            website: None,
            active: Some(true),
            description: None,
        }
    }
}

impl OrganizationRecord {
    pub fn validate_record(&self) -> Result<(), ValidationErrors> {
        self.validate()
    }
}
