//! Access to the remote FHIR document store.
//!
//! `FhirStore` is the seam the service layer depends on; `RestFhirStore`
//! implements it over the FHIR REST API. Documents cross this boundary as
//! raw JSON values - the codec crate owns their typed interpretation.

pub mod config;
pub mod error;
pub mod query;
pub mod rest;
pub mod store;

pub use config::StoreConfig;
pub use error::{Error, Result};
pub use query::SearchQuery;
pub use rest::RestFhirStore;
pub use store::FhirStore;
