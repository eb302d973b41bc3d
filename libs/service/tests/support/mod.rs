//! Shared test fixtures: an in-memory `FhirStore` with switchable failure
//! injection, plus record builders and a wired service graph.
#![allow(dead_code)]

use std::collections::{HashMap, HashSet};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use chrono::{DateTime, Duration, Local, NaiveDate, NaiveTime};
use serde_json::Value as JsonValue;

use arogya_client::{Error, FhirStore, Result, SearchQuery};
use arogya_models::{
    AppointmentRecord, AppointmentStatus, Gender, OrganizationRecord, PatientRecord,
    PractitionerRecord,
};
use arogya_service::{
    AppointmentService, AuditRecorder, OrganizationService, PatientService, PractitionerService,
};

/// In-memory store with just enough search support for the service tests.
#[derive(Default)]
pub struct InMemoryStore {
    resources: Mutex<HashMap<String, Vec<(String, JsonValue)>>>,
    next_id: AtomicU64,
    failing_creates: Mutex<HashSet<String>>,
    failing_reads: Mutex<HashSet<String>>,
    failing_searches: Mutex<HashSet<String>>,
}

impl InMemoryStore {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    pub fn fail_creates(&self, resource_type: &str) {
        self.failing_creates
            .lock()
            .unwrap()
            .insert(resource_type.to_string());
    }

    pub fn fail_reads(&self, resource_type: &str) {
        self.failing_reads
            .lock()
            .unwrap()
            .insert(resource_type.to_string());
    }

    pub fn allow_reads(&self, resource_type: &str) {
        self.failing_reads.lock().unwrap().remove(resource_type);
    }

    pub fn fail_searches(&self, resource_type: &str) {
        self.failing_searches
            .lock()
            .unwrap()
            .insert(resource_type.to_string());
    }

    pub fn count(&self, resource_type: &str) -> usize {
        self.resources
            .lock()
            .unwrap()
            .get(resource_type)
            .map(Vec::len)
            .unwrap_or(0)
    }

    pub fn document(&self, resource_type: &str, id: &str) -> Option<JsonValue> {
        self.resources
            .lock()
            .unwrap()
            .get(resource_type)?
            .iter()
            .find(|(stored_id, _)| stored_id == id)
            .map(|(_, document)| document.clone())
    }

    fn upstream(message: &str) -> Error {
        Error::Upstream {
            status: 500,
            message: message.to_string(),
        }
    }
}

#[async_trait]
impl FhirStore for InMemoryStore {
    async fn create(&self, resource_type: &str, mut document: JsonValue) -> Result<JsonValue> {
        if self.failing_creates.lock().unwrap().contains(resource_type) {
            return Err(Self::upstream("injected create failure"));
        }
        let id = format!("{resource_type}-{}", self.next_id.fetch_add(1, Ordering::SeqCst) + 1);
        document["id"] = JsonValue::String(id.clone());
        self.resources
            .lock()
            .unwrap()
            .entry(resource_type.to_string())
            .or_default()
            .push((id, document.clone()));
        Ok(document)
    }

    async fn read(&self, resource_type: &str, id: &str) -> Result<Option<JsonValue>> {
        if self.failing_reads.lock().unwrap().contains(resource_type) {
            return Err(Self::upstream("injected read failure"));
        }
        Ok(self.document(resource_type, id))
    }

    async fn update(
        &self,
        resource_type: &str,
        id: &str,
        mut document: JsonValue,
    ) -> Result<JsonValue> {
        document["id"] = JsonValue::String(id.to_string());
        let mut resources = self.resources.lock().unwrap();
        let entries = resources
            .get_mut(resource_type)
            .ok_or_else(|| Error::not_found(resource_type, id))?;
        let entry = entries
            .iter_mut()
            .find(|(stored_id, _)| stored_id == id)
            .ok_or_else(|| Error::not_found(resource_type, id))?;
        entry.1 = document.clone();
        Ok(document)
    }

    async fn delete(&self, resource_type: &str, id: &str) -> Result<()> {
        let mut resources = self.resources.lock().unwrap();
        let entries = resources
            .get_mut(resource_type)
            .ok_or_else(|| Error::not_found(resource_type, id))?;
        let before = entries.len();
        entries.retain(|(stored_id, _)| stored_id != id);
        if entries.len() == before {
            return Err(Error::not_found(resource_type, id));
        }
        Ok(())
    }

    async fn search(&self, resource_type: &str, query: &SearchQuery) -> Result<Vec<JsonValue>> {
        if self.failing_searches.lock().unwrap().contains(resource_type) {
            return Err(Self::upstream("injected search failure"));
        }
        let resources = self.resources.lock().unwrap();
        let mut matches: Vec<JsonValue> = resources
            .get(resource_type)
            .map(|entries| {
                entries
                    .iter()
                    .filter(|(_, document)| {
                        query
                            .params()
                            .iter()
                            .all(|(name, value)| param_matches(document, name, value))
                    })
                    .map(|(_, document)| document.clone())
                    .collect()
            })
            .unwrap_or_default();

        if query.sort() == Some("-date") {
            let mut indexed: Vec<(usize, JsonValue)> = matches.into_iter().enumerate().collect();
            indexed.sort_by(|(index_a, a), (index_b, b)| {
                timestamp_key(b)
                    .cmp(&timestamp_key(a))
                    .then(index_b.cmp(index_a))
            });
            matches = indexed.into_iter().map(|(_, document)| document).collect();
        }

        if let Some(limit) = query.limit() {
            matches.truncate(limit as usize);
        }
        Ok(matches)
    }
}

fn timestamp_key(document: &JsonValue) -> String {
    document
        .get("recorded")
        .or_else(|| document.get("start"))
        .and_then(JsonValue::as_str)
        .unwrap_or_default()
        .to_string()
}

fn param_matches(document: &JsonValue, name: &str, value: &str) -> bool {
    match name {
        "name" => name_matches(document, value),
        "telecom" => document
            .get("telecom")
            .and_then(JsonValue::as_array)
            .is_some_and(|telecom| {
                telecom
                    .iter()
                    .any(|point| point.get("value").and_then(JsonValue::as_str) == Some(value))
            }),
        "patient" => participant_matches(document, &format!("Patient/{value}")),
        "practitioner" => participant_matches(document, &format!("Practitioner/{value}")),
        "date" => date_matches(document, value),
        "subtype" => document
            .get("subtype")
            .and_then(JsonValue::as_array)
            .is_some_and(|subtypes| {
                subtypes
                    .iter()
                    .any(|coding| coding.get("code").and_then(JsonValue::as_str) == Some(value))
            }),
        _ => false,
    }
}

fn name_matches(document: &JsonValue, value: &str) -> bool {
    let needle = value.to_lowercase();
    match document.get("name") {
        Some(JsonValue::String(name)) => name.to_lowercase().contains(&needle),
        Some(JsonValue::Array(names)) => names.iter().any(|name| {
            ["text", "family"]
                .iter()
                .filter_map(|field| name.get(field).and_then(JsonValue::as_str))
                .any(|part| part.to_lowercase().contains(&needle))
                || name
                    .get("given")
                    .and_then(JsonValue::as_array)
                    .is_some_and(|given| {
                        given
                            .iter()
                            .filter_map(JsonValue::as_str)
                            .any(|part| part.to_lowercase().contains(&needle))
                    })
        }),
        _ => false,
    }
}

fn participant_matches(document: &JsonValue, reference: &str) -> bool {
    document
        .get("participant")
        .and_then(JsonValue::as_array)
        .is_some_and(|participants| {
            participants.iter().any(|participant| {
                participant
                    .get("actor")
                    .and_then(|actor| actor.get("reference"))
                    .and_then(JsonValue::as_str)
                    == Some(reference)
            })
        })
}

fn date_matches(document: &JsonValue, value: &str) -> bool {
    let Some(start) = document
        .get("start")
        .and_then(JsonValue::as_str)
        .and_then(|raw| DateTime::parse_from_rfc3339(raw).ok())
    else {
        return false;
    };
    if let Some(bound) = value.strip_prefix("ge") {
        return DateTime::parse_from_rfc3339(bound).is_ok_and(|bound| start >= bound);
    }
    if let Some(bound) = value.strip_prefix("lt") {
        return DateTime::parse_from_rfc3339(bound).is_ok_and(|bound| start < bound);
    }
    false
}

/// The full service graph wired over one store.
pub struct Services {
    pub patients: Arc<PatientService>,
    pub practitioners: Arc<PractitionerService>,
    pub organizations: Arc<OrganizationService>,
    pub appointments: AppointmentService,
    pub audit: Arc<AuditRecorder>,
}

pub fn build_services(store: &Arc<InMemoryStore>) -> Services {
    let store_dyn: Arc<dyn FhirStore> = store.clone();
    let audit = Arc::new(AuditRecorder::new(store_dyn.clone()));
    let patients = Arc::new(PatientService::new(store_dyn.clone(), audit.clone()));
    let practitioners = Arc::new(PractitionerService::new(store_dyn.clone(), audit.clone()));
    let organizations = Arc::new(OrganizationService::new(store_dyn.clone(), audit.clone()));
    let appointments = AppointmentService::new(
        store_dyn,
        audit.clone(),
        patients.clone(),
        practitioners.clone(),
    );
    Services {
        patients,
        practitioners,
        organizations,
        appointments,
        audit,
    }
}

pub fn sample_patient() -> PatientRecord {
    PatientRecord {
        first_name: Some("Asha".into()),
        last_name: Some("Rao".into()),
        date_of_birth: NaiveDate::from_ymd_opt(1990, 1, 1),
        gender: Some(Gender::Female),
        phone: Some("9876543210".into()),
        ..PatientRecord::default()
    }
}

pub fn sample_practitioner() -> PractitionerRecord {
    PractitionerRecord {
        first_name: Some("Meera".into()),
        last_name: Some("Kulkarni".into()),
        gender: Some(Gender::Female),
        date_of_birth: NaiveDate::from_ymd_opt(1980, 4, 2),
        specialization: Some("Cardiologist".into()),
        registration_number: Some("MH-12345".into()),
        phone: Some("9123456780".into()),
        department: Some("Cardiology".into()),
        ..PractitionerRecord::default()
    }
}

pub fn sample_organization(name: &str, type_: &str) -> OrganizationRecord {
    OrganizationRecord {
        name: Some(name.into()),
        type_: Some(type_.into()),
        phone: Some("9876543210".into()),
        address: Some("MG Road".into()),
        city: Some("Pune".into()),
        state: Some("MH".into()),
        ..OrganizationRecord::default()
    }
}

pub fn sample_appointment(
    patient_id: &str,
    practitioner_id: &str,
    date: NaiveDate,
    time: NaiveTime,
) -> AppointmentRecord {
    AppointmentRecord {
        patient_id: Some(patient_id.into()),
        practitioner_id: Some(practitioner_id.into()),
        appointment_date: Some(date),
        appointment_time: Some(time),
        appointment_type: Some("Consultation".into()),
        status: Some(AppointmentStatus::Booked),
        ..AppointmentRecord::default()
    }
}

/// A date safely in the future for appointment validation.
pub fn future_date(days_ahead: i64) -> NaiveDate {
    Local::now().date_naive() + Duration::days(days_ahead)
}
