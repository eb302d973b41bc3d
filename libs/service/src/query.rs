//! Named filters and their store fetch plans.
//!
//! Filters with first-class search-parameter support translate to a
//! server-side query with that single predicate. Side-channel fields
//! (organization type, practitioner specialization) have no search
//! parameter, so their plans fall back to fetch-all plus an in-memory
//! predicate over the decoded records - the fallback tier is part of the
//! public type so callers can tell the two apart. One filter per call;
//! no conjunctions.

use chrono::{DateTime, Duration, FixedOffset, Local, NaiveDate, NaiveTime, TimeZone, Utc};

use arogya_client::SearchQuery;
use arogya_models::{
    AppointmentRecord, OrganizationRecord, PatientRecord, PractitionerRecord,
};

/// How a listing operation fetches its records.
pub enum FetchPlan<T> {
    /// Single-predicate structured query executed by the store.
    Server(SearchQuery),
    /// Fetch every record of the kind, then filter the decoded records in
    /// memory.
    ClientFiltered {
        query: SearchQuery,
        predicate: Box<dyn Fn(&T) -> bool + Send + Sync>,
    },
}

impl<T> FetchPlan<T> {
    fn fetch_all() -> Self {
        Self::Server(SearchQuery::new())
    }

    pub fn is_client_filtered(&self) -> bool {
        matches!(self, Self::ClientFiltered { .. })
    }

    pub(crate) fn into_parts(self) -> (SearchQuery, Option<Box<dyn Fn(&T) -> bool + Send + Sync>>) {
        match self {
            Self::Server(query) => (query, None),
            Self::ClientFiltered { query, predicate } => (query, Some(predicate)),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PatientFilter {
    /// Name substring match (server-side).
    Name(String),
    /// Exact telecom match (server-side).
    Phone(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PractitionerFilter {
    Name(String),
    /// Side-channel field; client-side substring match.
    Specialization(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OrganizationFilter {
    Name(String),
    /// Side-channel field; client-side substring match.
    Type(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AppointmentFilter {
    /// Reference-equality on the patient participant.
    Patient(String),
    /// Reference-equality on the practitioner participant.
    Practitioner(String),
    /// All appointments starting on the given civil day, local time.
    Date(NaiveDate),
}

pub fn patient_plan(filter: Option<PatientFilter>) -> FetchPlan<PatientRecord> {
    match filter {
        None => FetchPlan::fetch_all(),
        Some(PatientFilter::Name(name)) => {
            FetchPlan::Server(SearchQuery::new().param("name", name))
        }
        Some(PatientFilter::Phone(phone)) => {
            FetchPlan::Server(SearchQuery::new().param("telecom", phone))
        }
    }
}

pub fn practitioner_plan(filter: Option<PractitionerFilter>) -> FetchPlan<PractitionerRecord> {
    match filter {
        None => FetchPlan::fetch_all(),
        Some(PractitionerFilter::Name(name)) => {
            FetchPlan::Server(SearchQuery::new().param("name", name))
        }
        Some(PractitionerFilter::Specialization(needle)) => FetchPlan::ClientFiltered {
            query: SearchQuery::new(),
            predicate: Box::new(move |record: &PractitionerRecord| {
                contains_ignore_case(record.specialization.as_deref(), &needle)
            }),
        },
    }
}

pub fn organization_plan(filter: Option<OrganizationFilter>) -> FetchPlan<OrganizationRecord> {
    match filter {
        None => FetchPlan::fetch_all(),
        Some(OrganizationFilter::Name(name)) => {
            FetchPlan::Server(SearchQuery::new().param("name", name))
        }
        Some(OrganizationFilter::Type(needle)) => FetchPlan::ClientFiltered {
            query: SearchQuery::new(),
            predicate: Box::new(move |record: &OrganizationRecord| {
                contains_ignore_case(record.type_.as_deref(), &needle)
            }),
        },
    }
}

pub fn appointment_plan(filter: Option<AppointmentFilter>) -> FetchPlan<AppointmentRecord> {
    match filter {
        None => FetchPlan::fetch_all(),
        Some(AppointmentFilter::Patient(id)) => {
            FetchPlan::Server(SearchQuery::new().param("patient", id))
        }
        Some(AppointmentFilter::Practitioner(id)) => {
            FetchPlan::Server(SearchQuery::new().param("practitioner", id))
        }
        Some(AppointmentFilter::Date(date)) => {
            // Half-open day window: [startOfDay, startOfNextDay) local time.
            let start = local_midnight(date);
            let end = local_midnight(date + Duration::days(1));
            FetchPlan::Server(
                SearchQuery::new()
                    .param("date", format!("ge{}", start.to_rfc3339()))
                    .param("date", format!("lt{}", end.to_rfc3339())),
            )
        }
    }
}

fn contains_ignore_case(haystack: Option<&str>, needle: &str) -> bool {
    haystack.is_some_and(|value| value.to_lowercase().contains(&needle.to_lowercase()))
}

fn local_midnight(date: NaiveDate) -> DateTime<FixedOffset> {
    let midnight = date.and_time(NaiveTime::MIN);
    match Local.from_local_datetime(&midnight).earliest() {
        Some(instant) => instant.fixed_offset(),
        // Midnight can fall into a DST gap; pin to UTC rather than guessing.
        None => Utc.from_utc_datetime(&midnight).fixed_offset(),
    }
}
