//! Fire-and-forget audit trail.
//!
//! `record` returns nothing at all: construction or persistence failures
//! are logged and discarded here, so an audit gap can never block a
//! clinical-record mutation.

use std::sync::Arc;

use chrono::Local;

use arogya_client::{FhirStore, SearchQuery};
use arogya_codec::{AuditEventCodec, ResourceCodec};
use arogya_fhir::AuditEvent;
use arogya_models::{audit::OUTCOME_SUCCESS, AuditAction, AuditEventRecord};

use crate::{documents, Error, Result};

/// Upper bound on any audit listing.
pub const AUDIT_PAGE_LIMIT: u32 = 100;

const AGENT_NAME: &str = "System User";
const SYSTEM_NAME: &str = "Patient Management System";

pub struct AuditRecorder {
    store: Arc<dyn FhirStore>,
    codec: AuditEventCodec,
}

impl AuditRecorder {
    pub fn new(store: Arc<dyn FhirStore>) -> Self {
        Self {
            store,
            codec: AuditEventCodec,
        }
    }

    /// Record a mutation against the audit trail, best-effort.
    pub async fn record(
        &self,
        action: AuditAction,
        resource_type: &str,
        resource_id: &str,
        description: &str,
    ) {
        tracing::info!(
            "creating audit event: {} on {resource_type} {resource_id}",
            action.subtype_code()
        );
        if let Err(err) = self
            .try_record(action, resource_type, resource_id, description)
            .await
        {
            tracing::error!(
                "failed to create audit event for {resource_type}/{resource_id}: {err}"
            );
        }
    }

    async fn try_record(
        &self,
        action: AuditAction,
        resource_type: &str,
        resource_id: &str,
        description: &str,
    ) -> arogya_client::Result<()> {
        let record = AuditEventRecord {
            id: None,
            action: Some(action),
            resource_type: Some(resource_type.to_string()),
            resource_id: Some(resource_id.to_string()),
            description: Some(description.to_string()),
            recorded: Some(Local::now().naive_local()),
            outcome: Some(OUTCOME_SUCCESS.to_string()),
            agent_name: Some(AGENT_NAME.to_string()),
            system_name: Some(SYSTEM_NAME.to_string()),
        };
        let document = serde_json::to_value(self.codec.encode(&record))?;
        self.store
            .create(AuditEvent::RESOURCE_TYPE, document)
            .await?;
        Ok(())
    }

    /// Newest-first page of audit events. Upstream failures degrade to an
    /// empty listing.
    pub async fn get_all(&self) -> Vec<AuditEventRecord> {
        tracing::info!("fetching all audit events");
        let query = SearchQuery::new()
            .sort_descending("date")
            .count(AUDIT_PAGE_LIMIT);
        self.fetch_or_empty(query).await
    }

    pub async fn get_by_id(&self, id: &str) -> Result<AuditEventRecord> {
        tracing::info!("fetching audit event id: {id}");
        let document = self
            .store
            .read(AuditEvent::RESOURCE_TYPE, id)
            .await?
            .ok_or_else(|| Error::not_found(AuditEvent::RESOURCE_TYPE, id))?;
        let resource = documents::parse::<AuditEvent>(AuditEvent::RESOURCE_TYPE, document)?;
        Ok(self.codec.decode(&resource))
    }

    /// Entity type has no search parameter on the audit event, so this
    /// fetches the bounded page and filters client-side.
    pub async fn search_by_resource_type(&self, resource_type: &str) -> Vec<AuditEventRecord> {
        tracing::info!("searching audit events by resource type: {resource_type}");
        let mut events = self.get_all().await;
        events.retain(|event| {
            event
                .resource_type
                .as_deref()
                .is_some_and(|rt| rt.eq_ignore_ascii_case(resource_type))
        });
        events
    }

    /// The action is a structured query on the subtype coding.
    pub async fn search_by_action(&self, action: AuditAction) -> Vec<AuditEventRecord> {
        tracing::info!("searching audit events by action: {}", action.subtype_code());
        let query = SearchQuery::new()
            .param("subtype", action.subtype_code())
            .sort_descending("date")
            .count(AUDIT_PAGE_LIMIT);
        self.fetch_or_empty(query).await
    }

    async fn fetch_or_empty(&self, query: SearchQuery) -> Vec<AuditEventRecord> {
        match self.store.search(AuditEvent::RESOURCE_TYPE, &query).await {
            Ok(found) => {
                documents::decode_all(&self.codec, AuditEvent::RESOURCE_TYPE, found)
            }
            Err(err) => {
                tracing::error!("error fetching audit events: {err}");
                Vec::new()
            }
        }
    }
}
