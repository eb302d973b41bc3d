//! Typed FHIR R4 subset for the Arogya clinical document exchange.
//!
//! Only the elements this system reads or writes are modeled; everything
//! else a remote store may attach to a document survives serde round trips
//! untouched or is ignored on read. No validation - just data
//! representation.

pub mod bundle;
pub mod datatypes;
pub mod resources;
pub mod systems;

pub use bundle::{Bundle, BundleEntry};
pub use datatypes::{
    Address, CodeableConcept, Coding, ContactPoint, Extension, HumanName, Identifier, Reference,
};
pub use resources::{
    Appointment, AppointmentParticipant, AuditEvent, AuditEventAgent, AuditEventEntity,
    AuditEventSource, Organization, Patient, PatientContact, Practitioner,
    PractitionerQualification,
};
