//! Audit record ↔ AuditEvent resource.

use chrono::{Local, TimeZone};

use arogya_fhir::systems::{
    AUDIT_EVENT_TYPE, RESOURCE_TYPES, RESTFUL_INTERACTION, SECURITY_ROLE_TYPE,
    SECURITY_SOURCE_TYPE,
};
use arogya_fhir::{
    datatypes::{CodeableConcept, Coding, Reference},
    AuditEvent, AuditEventAgent, AuditEventEntity, AuditEventSource,
};
use arogya_models::{AuditAction, AuditEventRecord};

use crate::support::non_empty;
use crate::ResourceCodec;

#[derive(Debug, Clone, Copy, Default)]
pub struct AuditEventCodec;

impl ResourceCodec for AuditEventCodec {
    type Flat = AuditEventRecord;
    type Resource = AuditEvent;

    fn encode(&self, record: &AuditEventRecord) -> AuditEvent {
        let mut event = AuditEvent::default();

        if let Some(id) = non_empty(&record.id) {
            event.id = Some(id.to_string());
        }

        // What was done
        event.type_ = Some(Coding::new(AUDIT_EVENT_TYPE, "rest", "RESTful Operation"));

        if let Some(action) = record.action {
            event.subtype.push(Coding::new(
                RESTFUL_INTERACTION,
                action.subtype_code(),
                action.display(),
            ));
            event.action = Some(action.letter().to_string());
        }

        event.recorded = record
            .recorded
            .and_then(|recorded| Local.from_local_datetime(&recorded).earliest())
            .map(|instant| instant.fixed_offset());

        event.outcome = record.outcome.clone();
        event.outcome_desc = record.description.clone();

        // Who performed the action
        event.agent.push(AuditEventAgent {
            type_: Some(CodeableConcept::coding(Coding::new(
                SECURITY_ROLE_TYPE,
                "humanuser",
                "Human User",
            ))),
            who: record
                .agent_name
                .as_deref()
                .map(Reference::display_only),
            requestor: Some(true),
        });

        // System that recorded the event
        event.source = Some(AuditEventSource {
            observer: record
                .system_name
                .as_deref()
                .map(Reference::display_only),
            type_: vec![Coding::new(SECURITY_SOURCE_TYPE, "4", "Application Server")],
        });

        // What was affected
        if let (Some(resource_type), Some(resource_id)) =
            (&record.resource_type, &record.resource_id)
        {
            event.entity.push(AuditEventEntity {
                what: Some(Reference::new(resource_type, resource_id)),
                type_: Some(Coding::new(RESOURCE_TYPES, resource_type, resource_type)),
            });
        }

        event
    }

    fn decode(&self, event: &AuditEvent) -> AuditEventRecord {
        let entity_parts = event
            .entity
            .first()
            .and_then(|entity| entity.what.as_ref())
            .and_then(Reference::parts);

        AuditEventRecord {
            id: event.id.clone(),
            action: event.action.as_deref().and_then(AuditAction::from_letter),
            resource_type: entity_parts.map(|(resource_type, _)| resource_type.to_string()),
            resource_id: entity_parts.map(|(_, resource_id)| resource_id.to_string()),
            description: event.outcome_desc.clone(),
            recorded: event
                .recorded
                .map(|instant| instant.with_timezone(&Local).naive_local()),
            outcome: event.outcome.clone(),
            agent_name: event
                .agent
                .first()
                .and_then(|agent| agent.who.as_ref())
                .and_then(|who| who.display.clone()),
            system_name: event
                .source
                .as_ref()
                .and_then(|source| source.observer.as_ref())
                .and_then(|observer| observer.display.clone()),
        }
    }
}
