//! Practitioner CRUD and search.

use std::sync::Arc;

use arogya_client::FhirStore;
use arogya_codec::{PractitionerCodec, ResourceCodec};
use arogya_fhir::Practitioner;
use arogya_models::{AuditAction, PractitionerRecord};

use crate::query::{practitioner_plan, FetchPlan, PractitionerFilter};
use crate::{documents, AuditRecorder, Error, Result};

pub struct PractitionerService {
    store: Arc<dyn FhirStore>,
    codec: PractitionerCodec,
    audit: Arc<AuditRecorder>,
}

impl PractitionerService {
    pub fn new(store: Arc<dyn FhirStore>, audit: Arc<AuditRecorder>) -> Self {
        Self {
            store,
            codec: PractitionerCodec,
            audit,
        }
    }

    pub async fn create(&self, record: PractitionerRecord) -> Result<PractitionerRecord> {
        record.validate_record()?;
        tracing::info!("creating practitioner: {}", record.full_name());

        let document = documents::to_document(&self.codec.encode(&record))?;
        let created = self
            .store
            .create(Practitioner::RESOURCE_TYPE, document)
            .await?;
        let resource = documents::parse::<Practitioner>(Practitioner::RESOURCE_TYPE, created)?;
        let result = self.codec.decode(&resource);

        self.audit
            .record(
                AuditAction::Create,
                Practitioner::RESOURCE_TYPE,
                result.id.as_deref().unwrap_or_default(),
                "Practitioner created successfully",
            )
            .await;

        tracing::info!(
            "practitioner created with id: {}",
            result.id.as_deref().unwrap_or_default()
        );
        Ok(result)
    }

    /// The path id is authoritative over any id carried in the body.
    pub async fn update(
        &self,
        id: &str,
        mut record: PractitionerRecord,
    ) -> Result<PractitionerRecord> {
        record.id = Some(id.to_string());
        record.validate_record()?;
        tracing::info!("updating practitioner id: {id}");

        let document = documents::to_document(&self.codec.encode(&record))?;
        let updated = self
            .store
            .update(Practitioner::RESOURCE_TYPE, id, document)
            .await?;
        let resource = documents::parse::<Practitioner>(Practitioner::RESOURCE_TYPE, updated)?;
        let result = self.codec.decode(&resource);

        self.audit
            .record(
                AuditAction::Update,
                Practitioner::RESOURCE_TYPE,
                id,
                "Practitioner updated successfully",
            )
            .await;

        Ok(result)
    }

    pub async fn get_by_id(&self, id: &str) -> Result<PractitionerRecord> {
        tracing::info!("fetching practitioner id: {id}");
        let document = self
            .store
            .read(Practitioner::RESOURCE_TYPE, id)
            .await?
            .ok_or_else(|| Error::not_found(Practitioner::RESOURCE_TYPE, id))?;
        let resource = documents::parse::<Practitioner>(Practitioner::RESOURCE_TYPE, document)?;
        Ok(self.codec.decode(&resource))
    }

    pub async fn get_all(&self) -> Result<Vec<PractitionerRecord>> {
        tracing::info!("fetching all practitioners");
        self.run_plan(practitioner_plan(None)).await
    }

    pub async fn search_by_name(&self, name: &str) -> Result<Vec<PractitionerRecord>> {
        tracing::info!("searching practitioners by name: {name}");
        self.run_plan(practitioner_plan(Some(PractitionerFilter::Name(
            name.to_string(),
        ))))
        .await
    }

    /// Specialization lives in the side-channel, so this runs on the
    /// client-filtered tier.
    pub async fn search_by_specialization(
        &self,
        specialization: &str,
    ) -> Result<Vec<PractitionerRecord>> {
        tracing::info!("searching practitioners by specialization: {specialization}");
        self.run_plan(practitioner_plan(Some(PractitionerFilter::Specialization(
            specialization.to_string(),
        ))))
        .await
    }

    pub async fn delete(&self, id: &str) -> Result<()> {
        tracing::info!("deleting practitioner id: {id}");
        self.store.delete(Practitioner::RESOURCE_TYPE, id).await?;

        self.audit
            .record(
                AuditAction::Delete,
                Practitioner::RESOURCE_TYPE,
                id,
                "Practitioner deleted",
            )
            .await;

        Ok(())
    }

    /// Best-effort display-name lookup for enrichment.
    pub async fn display_name(&self, id: &str) -> Option<String> {
        match self.get_by_id(id).await {
            Ok(practitioner) => Some(practitioner.full_name()),
            Err(err) => {
                tracing::warn!("could not fetch practitioner name for id {id}: {err}");
                None
            }
        }
    }

    async fn run_plan(
        &self,
        plan: FetchPlan<PractitionerRecord>,
    ) -> Result<Vec<PractitionerRecord>> {
        let (query, predicate) = plan.into_parts();
        let found = self
            .store
            .search(Practitioner::RESOURCE_TYPE, &query)
            .await?;
        let mut records = documents::decode_all(&self.codec, Practitioner::RESOURCE_TYPE, found);
        if let Some(predicate) = predicate {
            records.retain(|record| predicate(record));
        }
        tracing::info!("found {} practitioners", records.len());
        Ok(records)
    }
}
