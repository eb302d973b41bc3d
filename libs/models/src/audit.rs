//! Audit trail record.
//!
//! Write-only from the services' perspective; read back for listings.

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use crate::enums::AuditAction;

/// Outcome code for a successful operation (FHIR audit-event-outcome).
pub const OUTCOME_SUCCESS: &str = "0";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct AuditEventRecord {
    pub id: Option<String>,
    pub action: Option<AuditAction>,
    pub resource_type: Option<String>, // Patient, Practitioner, Organization, Appointment
    pub resource_id: Option<String>,
    pub description: Option<String>,
    pub recorded: Option<NaiveDateTime>,
    pub outcome: Option<String>,
    pub agent_name: Option<String>,
    pub system_name: Option<String>,
}

impl AuditEventRecord {
    pub fn action_display(&self) -> &'static str {
        self.action.map(|a| a.display()).unwrap_or("Unknown")
    }

    pub fn outcome_display(&self) -> &'static str {
        match self.outcome.as_deref() {
            Some(OUTCOME_SUCCESS) => "Success",
            _ => "Failure",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn outcome_zero_reads_as_success() {
        let record = AuditEventRecord {
            outcome: Some(OUTCOME_SUCCESS.to_string()),
            ..AuditEventRecord::default()
        };
        assert_eq!(record.outcome_display(), "Success");
        assert_eq!(AuditEventRecord::default().outcome_display(), "Failure");
    }

    #[test]
    fn action_display_names() {
        let record = AuditEventRecord {
            action: Some(AuditAction::Delete),
            ..AuditEventRecord::default()
        };
        assert_eq!(record.action_display(), "Delete");
    }
}
