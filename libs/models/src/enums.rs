//! Enumerations shared across entity kinds.
//!
//! Decoding never fails on unfamiliar codes: gender falls back to the
//! `Unknown` sentinel, appointment status and audit action decode to `None`
//! at the call site via their `from_code` constructors.

use serde::{Deserialize, Serialize};

/// Administrative gender.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Gender {
    Male,
    Female,
    Other,
    #[default]
    Unknown,
}

impl Gender {
    /// Lowercased code match; anything unfamiliar becomes `Unknown`.
    pub fn from_code(code: &str) -> Self {
        match code.to_lowercase().as_str() {
            "male" => Self::Male,
            "female" => Self::Female,
            "other" => Self::Other,
            _ => Self::Unknown,
        }
    }

    pub fn as_code(&self) -> &'static str {
        match self {
            Self::Male => "male",
            Self::Female => "female",
            Self::Other => "other",
            Self::Unknown => "unknown",
        }
    }
}

/// Appointment lifecycle status.
///
/// `Cancelled` and `Noshow` are terminal; nothing in this core prevents a
/// terminal appointment from being overwritten (last write wins).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AppointmentStatus {
    Proposed,
    Pending,
    Booked,
    Arrived,
    Fulfilled,
    Cancelled,
    Noshow,
}

impl AppointmentStatus {
    pub fn from_code(code: &str) -> Option<Self> {
        match code.to_lowercase().as_str() {
            "proposed" => Some(Self::Proposed),
            "pending" => Some(Self::Pending),
            "booked" => Some(Self::Booked),
            "arrived" => Some(Self::Arrived),
            "fulfilled" => Some(Self::Fulfilled),
            "cancelled" => Some(Self::Cancelled),
            "noshow" => Some(Self::Noshow),
            _ => None,
        }
    }

    pub fn as_code(&self) -> &'static str {
        match self {
            Self::Proposed => "proposed",
            Self::Pending => "pending",
            Self::Booked => "booked",
            Self::Arrived => "arrived",
            Self::Fulfilled => "fulfilled",
            Self::Cancelled => "cancelled",
            Self::Noshow => "noshow",
        }
    }

    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::Cancelled | Self::Noshow)
    }
}

/// Audit action, carried on the wire as the FHIR single-letter code.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AuditAction {
    Create,
    Read,
    Update,
    Delete,
    Execute,
}

impl AuditAction {
    /// FHIR AuditEvent.action letter.
    pub fn letter(&self) -> &'static str {
        match self {
            Self::Create => "C",
            Self::Read => "R",
            Self::Update => "U",
            Self::Delete => "D",
            Self::Execute => "E",
        }
    }

    pub fn from_letter(letter: &str) -> Option<Self> {
        match letter {
            "C" => Some(Self::Create),
            "R" => Some(Self::Read),
            "U" => Some(Self::Update),
            "D" => Some(Self::Delete),
            "E" => Some(Self::Execute),
            _ => None,
        }
    }

    /// Restful-interaction subtype code.
    pub fn subtype_code(&self) -> &'static str {
        match self {
            Self::Create => "create",
            Self::Read => "read",
            Self::Update => "update",
            Self::Delete => "delete",
            Self::Execute => "execute",
        }
    }

    pub fn from_subtype_code(code: &str) -> Option<Self> {
        match code.to_lowercase().as_str() {
            "create" => Some(Self::Create),
            "read" | "search" => Some(Self::Read),
            "update" => Some(Self::Update),
            "delete" => Some(Self::Delete),
            "execute" => Some(Self::Execute),
            _ => None,
        }
    }

    pub fn display(&self) -> &'static str {
        match self {
            Self::Create => "Create",
            Self::Read => "Read",
            Self::Update => "Update",
            Self::Delete => "Delete",
            Self::Execute => "Execute",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unknown_gender_code_falls_back_to_sentinel() {
        assert_eq!(Gender::from_code("MALE"), Gender::Male);
        assert_eq!(Gender::from_code("nonbinary"), Gender::Unknown);
        assert_eq!(Gender::from_code(""), Gender::Unknown);
    }

    #[test]
    fn appointment_status_codes_round_trip() {
        for status in [
            AppointmentStatus::Proposed,
            AppointmentStatus::Pending,
            AppointmentStatus::Booked,
            AppointmentStatus::Arrived,
            AppointmentStatus::Fulfilled,
            AppointmentStatus::Cancelled,
            AppointmentStatus::Noshow,
        ] {
            assert_eq!(AppointmentStatus::from_code(status.as_code()), Some(status));
        }
        assert_eq!(AppointmentStatus::from_code("entered-in-error"), None);
    }

    #[test]
    fn only_cancelled_and_noshow_are_terminal() {
        assert!(AppointmentStatus::Cancelled.is_terminal());
        assert!(AppointmentStatus::Noshow.is_terminal());
        assert!(!AppointmentStatus::Booked.is_terminal());
    }

    #[test]
    fn audit_action_letters_round_trip() {
        for action in [
            AuditAction::Create,
            AuditAction::Read,
            AuditAction::Update,
            AuditAction::Delete,
            AuditAction::Execute,
        ] {
            assert_eq!(AuditAction::from_letter(action.letter()), Some(action));
        }
        assert_eq!(AuditAction::from_subtype_code("search"), Some(AuditAction::Read));
    }
}
