//! Entity services.
//!
//! One service per entity kind, each orchestrating the same flow: validate
//! the flat record, encode it, call the remote store, decode the response,
//! and emit a fire-and-forget audit event. The appointment service
//! additionally enriches its denormalized display names through the patient
//! and practitioner services; those lookups are best-effort and never fail
//! the surrounding operation.

pub mod appointment;
pub mod audit;
mod documents;
pub mod error;
pub mod organization;
pub mod patient;
pub mod practitioner;
pub mod query;

pub use appointment::AppointmentService;
pub use audit::AuditRecorder;
pub use error::{Error, Result};
pub use organization::OrganizationService;
pub use patient::PatientService;
pub use practitioner::PractitionerService;
pub use query::{
    appointment_plan, organization_plan, patient_plan, practitioner_plan, AppointmentFilter,
    FetchPlan, OrganizationFilter, PatientFilter, PractitionerFilter,
};
