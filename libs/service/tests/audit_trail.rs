//! Audit trail: emission alongside mutations, listings, and degradation.

mod support;

use arogya_models::AuditAction;
use arogya_service::Error;
use support::{build_services, sample_organization, sample_patient, InMemoryStore};

#[tokio::test]
async fn mutations_append_audit_events_newest_first() -> anyhow::Result<()> {
    let store = InMemoryStore::new();
    let services = build_services(&store);

    let created = services.patients.create(sample_patient()).await?;
    let id = created.id.clone().unwrap();
    services.patients.update(&id, created).await?;
    services.patients.delete(&id).await?;

    let events = services.audit.get_all().await;
    assert_eq!(events.len(), 3);
    assert_eq!(events[0].action, Some(AuditAction::Delete));
    assert_eq!(events[1].action, Some(AuditAction::Update));
    assert_eq!(events[2].action, Some(AuditAction::Create));
    assert!(events
        .iter()
        .all(|event| event.resource_type.as_deref() == Some("Patient")));
    assert!(events
        .iter()
        .all(|event| event.outcome_display() == "Success"));
    Ok(())
}

#[tokio::test]
async fn action_search_uses_the_subtype_query() -> anyhow::Result<()> {
    let store = InMemoryStore::new();
    let services = build_services(&store);

    let created = services.patients.create(sample_patient()).await?;
    services.patients.delete(&created.id.unwrap()).await?;

    let deletes = services.audit.search_by_action(AuditAction::Delete).await;
    assert_eq!(deletes.len(), 1);
    assert_eq!(deletes[0].description.as_deref(), Some("Patient deleted"));
    Ok(())
}

#[tokio::test]
async fn resource_type_search_filters_the_page_client_side() -> anyhow::Result<()> {
    let store = InMemoryStore::new();
    let services = build_services(&store);

    services.patients.create(sample_patient()).await?;
    services
        .organizations
        .create(sample_organization("City Hospital", "Hospital"))
        .await?;

    let patient_events = services.audit.search_by_resource_type("patient").await;
    assert_eq!(patient_events.len(), 1);
    assert_eq!(patient_events[0].resource_type.as_deref(), Some("Patient"));
    Ok(())
}

#[tokio::test]
async fn listing_degrades_to_empty_on_upstream_failure() -> anyhow::Result<()> {
    let store = InMemoryStore::new();
    let services = build_services(&store);

    services.patients.create(sample_patient()).await?;
    store.fail_searches("AuditEvent");

    assert!(services.audit.get_all().await.is_empty());
    assert!(services
        .audit
        .search_by_action(AuditAction::Create)
        .await
        .is_empty());
    Ok(())
}

#[tokio::test]
async fn get_by_id_surfaces_not_found() {
    let store = InMemoryStore::new();
    let services = build_services(&store);

    let result = services.audit.get_by_id("missing").await;
    assert!(matches!(result, Err(Error::NotFound { .. })));
}

#[tokio::test]
async fn audit_events_round_trip_through_the_store() -> anyhow::Result<()> {
    let store = InMemoryStore::new();
    let services = build_services(&store);

    let created = services.patients.create(sample_patient()).await?;
    let events = services.audit.get_all().await;
    let event_id = events[0].id.clone().unwrap();

    let fetched = services.audit.get_by_id(&event_id).await?;
    assert_eq!(fetched.action, Some(AuditAction::Create));
    assert_eq!(fetched.resource_id, created.id);
    assert_eq!(fetched.agent_name.as_deref(), Some("System User"));
    assert_eq!(
        fetched.system_name.as_deref(),
        Some("Patient Management System")
    );
    assert!(fetched.recorded.is_some());
    Ok(())
}
