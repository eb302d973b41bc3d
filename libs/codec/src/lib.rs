//! Flat record ↔ FHIR document translation.
//!
//! One codec per entity kind. Encoding is total: every field the flat model
//! defines has an explicit document location, so `decode(encode(x))`
//! reproduces `x` on all fields except store-assigned identity. Decoding is
//! defensive: absent document sections become absent flat fields, repeated
//! sections are read tag-first (falling back to the first element), and
//! unfamiliar codes map to the unknown sentinel instead of failing.

pub mod appointment;
pub mod audit_event;
pub mod organization;
pub mod patient;
pub mod practitioner;
mod support;

pub use appointment::AppointmentCodec;
pub use audit_event::AuditEventCodec;
pub use organization::OrganizationCodec;
pub use patient::PatientCodec;
pub use practitioner::PractitionerCodec;

/// Bidirectional mapping between a flat record and its document form.
pub trait ResourceCodec {
    type Flat;
    type Resource;

    fn encode(&self, flat: &Self::Flat) -> Self::Resource;
    fn decode(&self, resource: &Self::Resource) -> Self::Flat;
}
