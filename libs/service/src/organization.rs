//! Organization CRUD and search.

use std::sync::Arc;

use arogya_client::FhirStore;
use arogya_codec::{OrganizationCodec, ResourceCodec};
use arogya_fhir::Organization;
use arogya_models::{AuditAction, OrganizationRecord};

use crate::query::{organization_plan, FetchPlan, OrganizationFilter};
use crate::{documents, AuditRecorder, Error, Result};

pub struct OrganizationService {
    store: Arc<dyn FhirStore>,
    codec: OrganizationCodec,
    audit: Arc<AuditRecorder>,
}

impl OrganizationService {
    pub fn new(store: Arc<dyn FhirStore>, audit: Arc<AuditRecorder>) -> Self {
        Self {
            store,
            codec: OrganizationCodec,
            audit,
        }
    }

    pub async fn create(&self, record: OrganizationRecord) -> Result<OrganizationRecord> {
        record.validate_record()?;
        tracing::info!(
            "creating organization: {}",
            record.name.as_deref().unwrap_or_default()
        );

        let document = documents::to_document(&self.codec.encode(&record))?;
        let created = self
            .store
            .create(Organization::RESOURCE_TYPE, document)
            .await?;
        let resource = documents::parse::<Organization>(Organization::RESOURCE_TYPE, created)?;
        let result = self.codec.decode(&resource);

        self.audit
            .record(
                AuditAction::Create,
                Organization::RESOURCE_TYPE,
                result.id.as_deref().unwrap_or_default(),
                "Organization created successfully",
            )
            .await;

        tracing::info!(
            "organization created with id: {}",
            result.id.as_deref().unwrap_or_default()
        );
        Ok(result)
    }

    /// The path id is authoritative over any id carried in the body.
    pub async fn update(
        &self,
        id: &str,
        mut record: OrganizationRecord,
    ) -> Result<OrganizationRecord> {
        record.id = Some(id.to_string());
        record.validate_record()?;
        tracing::info!("updating organization id: {id}");

        let document = documents::to_document(&self.codec.encode(&record))?;
        let updated = self
            .store
            .update(Organization::RESOURCE_TYPE, id, document)
            .await?;
        let resource = documents::parse::<Organization>(Organization::RESOURCE_TYPE, updated)?;
        let result = self.codec.decode(&resource);

        self.audit
            .record(
                AuditAction::Update,
                Organization::RESOURCE_TYPE,
                id,
                "Organization updated successfully",
            )
            .await;

        Ok(result)
    }

    pub async fn get_by_id(&self, id: &str) -> Result<OrganizationRecord> {
        tracing::info!("fetching organization id: {id}");
        let document = self
            .store
            .read(Organization::RESOURCE_TYPE, id)
            .await?
            .ok_or_else(|| Error::not_found(Organization::RESOURCE_TYPE, id))?;
        let resource = documents::parse::<Organization>(Organization::RESOURCE_TYPE, document)?;
        Ok(self.codec.decode(&resource))
    }

    pub async fn get_all(&self) -> Result<Vec<OrganizationRecord>> {
        tracing::info!("fetching all organizations");
        self.run_plan(organization_plan(None)).await
    }

    pub async fn search_by_name(&self, name: &str) -> Result<Vec<OrganizationRecord>> {
        tracing::info!("searching organizations by name: {name}");
        self.run_plan(organization_plan(Some(OrganizationFilter::Name(
            name.to_string(),
        ))))
        .await
    }

    /// The type is a side-channel field, so this runs on the
    /// client-filtered tier.
    pub async fn search_by_type(&self, type_: &str) -> Result<Vec<OrganizationRecord>> {
        tracing::info!("searching organizations by type: {type_}");
        self.run_plan(organization_plan(Some(OrganizationFilter::Type(
            type_.to_string(),
        ))))
        .await
    }

    pub async fn delete(&self, id: &str) -> Result<()> {
        tracing::info!("deleting organization id: {id}");
        self.store.delete(Organization::RESOURCE_TYPE, id).await?;

        self.audit
            .record(
                AuditAction::Delete,
                Organization::RESOURCE_TYPE,
                id,
                "Organization deleted",
            )
            .await;

        Ok(())
    }

    async fn run_plan(
        &self,
        plan: FetchPlan<OrganizationRecord>,
    ) -> Result<Vec<OrganizationRecord>> {
        let (query, predicate) = plan.into_parts();
        let found = self
            .store
            .search(Organization::RESOURCE_TYPE, &query)
            .await?;
        let mut records = documents::decode_all(&self.codec, Organization::RESOURCE_TYPE, found);
        if let Some(predicate) = predicate {
            records.retain(|record| predicate(record));
        }
        tracing::info!("found {} organizations", records.len());
        Ok(records)
    }
}
