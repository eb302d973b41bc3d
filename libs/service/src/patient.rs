//! Patient CRUD and search.

use std::sync::Arc;

use arogya_client::FhirStore;
use arogya_codec::{PatientCodec, ResourceCodec};
use arogya_fhir::Patient;
use arogya_models::{AuditAction, PatientRecord};

use crate::query::{patient_plan, FetchPlan, PatientFilter};
use crate::{documents, AuditRecorder, Error, Result};

pub struct PatientService {
    store: Arc<dyn FhirStore>,
    codec: PatientCodec,
    audit: Arc<AuditRecorder>,
}

impl PatientService {
    pub fn new(store: Arc<dyn FhirStore>, audit: Arc<AuditRecorder>) -> Self {
        Self {
            store,
            codec: PatientCodec,
            audit,
        }
    }

    pub async fn create(&self, record: PatientRecord) -> Result<PatientRecord> {
        record.validate_record()?;
        tracing::info!("creating patient: {}", record.full_name());

        let document = documents::to_document(&self.codec.encode(&record))?;
        let created = self.store.create(Patient::RESOURCE_TYPE, document).await?;
        let resource = documents::parse::<Patient>(Patient::RESOURCE_TYPE, created)?;
        let result = self.codec.decode(&resource);

        self.audit
            .record(
                AuditAction::Create,
                Patient::RESOURCE_TYPE,
                result.id.as_deref().unwrap_or_default(),
                "Patient created successfully",
            )
            .await;

        tracing::info!("patient created with id: {}", result.id.as_deref().unwrap_or_default());
        Ok(result)
    }

    /// The path id is authoritative over any id carried in the body.
    pub async fn update(&self, id: &str, mut record: PatientRecord) -> Result<PatientRecord> {
        record.id = Some(id.to_string());
        record.validate_record()?;
        tracing::info!("updating patient id: {id}");

        let document = documents::to_document(&self.codec.encode(&record))?;
        let updated = self.store.update(Patient::RESOURCE_TYPE, id, document).await?;
        let resource = documents::parse::<Patient>(Patient::RESOURCE_TYPE, updated)?;
        let result = self.codec.decode(&resource);

        self.audit
            .record(
                AuditAction::Update,
                Patient::RESOURCE_TYPE,
                id,
                "Patient updated successfully",
            )
            .await;

        Ok(result)
    }

    pub async fn get_by_id(&self, id: &str) -> Result<PatientRecord> {
        tracing::info!("fetching patient id: {id}");
        let document = self
            .store
            .read(Patient::RESOURCE_TYPE, id)
            .await?
            .ok_or_else(|| Error::not_found(Patient::RESOURCE_TYPE, id))?;
        let resource = documents::parse::<Patient>(Patient::RESOURCE_TYPE, document)?;
        Ok(self.codec.decode(&resource))
    }

    pub async fn get_all(&self) -> Result<Vec<PatientRecord>> {
        tracing::info!("fetching all patients");
        self.run_plan(patient_plan(None)).await
    }

    pub async fn search_by_name(&self, name: &str) -> Result<Vec<PatientRecord>> {
        tracing::info!("searching patients by name: {name}");
        self.run_plan(patient_plan(Some(PatientFilter::Name(name.to_string()))))
            .await
    }

    pub async fn search_by_phone(&self, phone: &str) -> Result<Vec<PatientRecord>> {
        tracing::info!("searching patients by phone: {phone}");
        self.run_plan(patient_plan(Some(PatientFilter::Phone(phone.to_string()))))
            .await
    }

    pub async fn delete(&self, id: &str) -> Result<()> {
        tracing::info!("deleting patient id: {id}");
        self.store.delete(Patient::RESOURCE_TYPE, id).await?;

        self.audit
            .record(AuditAction::Delete, Patient::RESOURCE_TYPE, id, "Patient deleted")
            .await;

        Ok(())
    }

    /// Best-effort display-name lookup for enrichment; absence is a normal,
    /// silently-handled case.
    pub async fn display_name(&self, id: &str) -> Option<String> {
        match self.get_by_id(id).await {
            Ok(patient) => Some(patient.full_name()),
            Err(err) => {
                tracing::warn!("could not fetch patient name for id {id}: {err}");
                None
            }
        }
    }

    async fn run_plan(&self, plan: FetchPlan<PatientRecord>) -> Result<Vec<PatientRecord>> {
        let (query, predicate) = plan.into_parts();
        let found = self.store.search(Patient::RESOURCE_TYPE, &query).await?;
        let mut records = documents::decode_all(&self.codec, Patient::RESOURCE_TYPE, found);
        if let Some(predicate) = predicate {
            records.retain(|record| predicate(record));
        }
        tracing::info!("found {} patients", records.len());
        Ok(records)
    }
}
