//! Appointment CRUD, search, cancellation, and display-name enrichment.
//!
//! The denormalized `patient_name`/`practitioner_name` fields are never
//! trusted as input: create recomputes them from the referenced entities,
//! and read paths fill them in when missing. Every lookup is best-effort -
//! a failed one leaves the field as previously set and the operation
//! proceeds.

use std::sync::Arc;

use chrono::NaiveDate;

use arogya_client::FhirStore;
use arogya_codec::{AppointmentCodec, ResourceCodec};
use arogya_fhir::{datatypes::CodeableConcept, Appointment};
use arogya_models::{AppointmentRecord, AppointmentStatus, AuditAction};

use crate::query::{appointment_plan, AppointmentFilter, FetchPlan};
use crate::{documents, AuditRecorder, Error, PatientService, PractitionerService, Result};

pub struct AppointmentService {
    store: Arc<dyn FhirStore>,
    codec: AppointmentCodec,
    audit: Arc<AuditRecorder>,
    patients: Arc<PatientService>,
    practitioners: Arc<PractitionerService>,
}

impl AppointmentService {
    pub fn new(
        store: Arc<dyn FhirStore>,
        audit: Arc<AuditRecorder>,
        patients: Arc<PatientService>,
        practitioners: Arc<PractitionerService>,
    ) -> Self {
        Self {
            store,
            codec: AppointmentCodec,
            audit,
            patients,
            practitioners,
        }
    }

    pub async fn create(&self, mut record: AppointmentRecord) -> Result<AppointmentRecord> {
        record.validate_record()?;
        tracing::info!(
            "creating appointment for patient: {}",
            record.patient_id.as_deref().unwrap_or_default()
        );

        // Recompute display names from the referenced entities.
        if let Some(patient_id) = record.patient_id.clone() {
            if let Some(name) = self.patients.display_name(&patient_id).await {
                record.patient_name = Some(name);
            }
        }
        if let Some(practitioner_id) = record.practitioner_id.clone() {
            if let Some(name) = self.practitioners.display_name(&practitioner_id).await {
                record.practitioner_name = Some(name);
            }
        }

        let document = documents::to_document(&self.codec.encode(&record))?;
        let created = self
            .store
            .create(Appointment::RESOURCE_TYPE, document)
            .await?;
        let resource = documents::parse::<Appointment>(Appointment::RESOURCE_TYPE, created)?;
        let result = self.codec.decode(&resource);

        self.audit
            .record(
                AuditAction::Create,
                Appointment::RESOURCE_TYPE,
                result.id.as_deref().unwrap_or_default(),
                "Appointment created successfully",
            )
            .await;

        tracing::info!(
            "appointment created with id: {}",
            result.id.as_deref().unwrap_or_default()
        );
        Ok(result)
    }

    /// The path id is authoritative over any id carried in the body.
    pub async fn update(
        &self,
        id: &str,
        mut record: AppointmentRecord,
    ) -> Result<AppointmentRecord> {
        record.id = Some(id.to_string());
        record.validate_record()?;
        tracing::info!("updating appointment id: {id}");

        self.fill_missing_names(&mut record).await;

        let document = documents::to_document(&self.codec.encode(&record))?;
        let updated = self
            .store
            .update(Appointment::RESOURCE_TYPE, id, document)
            .await?;
        let resource = documents::parse::<Appointment>(Appointment::RESOURCE_TYPE, updated)?;
        let result = self.codec.decode(&resource);

        self.audit
            .record(
                AuditAction::Update,
                Appointment::RESOURCE_TYPE,
                id,
                "Appointment updated successfully",
            )
            .await;

        Ok(result)
    }

    pub async fn get_by_id(&self, id: &str) -> Result<AppointmentRecord> {
        tracing::info!("fetching appointment id: {id}");
        let document = self
            .store
            .read(Appointment::RESOURCE_TYPE, id)
            .await?
            .ok_or_else(|| Error::not_found(Appointment::RESOURCE_TYPE, id))?;
        let resource = documents::parse::<Appointment>(Appointment::RESOURCE_TYPE, document)?;
        let mut record = self.codec.decode(&resource);
        self.fill_missing_names(&mut record).await;
        Ok(record)
    }

    pub async fn get_all(&self) -> Result<Vec<AppointmentRecord>> {
        tracing::info!("fetching all appointments");
        self.run_plan(appointment_plan(None)).await
    }

    pub async fn get_by_patient(&self, patient_id: &str) -> Result<Vec<AppointmentRecord>> {
        tracing::info!("fetching appointments for patient id: {patient_id}");
        self.run_plan(appointment_plan(Some(AppointmentFilter::Patient(
            patient_id.to_string(),
        ))))
        .await
    }

    pub async fn get_by_practitioner(
        &self,
        practitioner_id: &str,
    ) -> Result<Vec<AppointmentRecord>> {
        tracing::info!("fetching appointments for practitioner id: {practitioner_id}");
        self.run_plan(appointment_plan(Some(AppointmentFilter::Practitioner(
            practitioner_id.to_string(),
        ))))
        .await
    }

    /// Appointments starting on the given civil day, local time.
    pub async fn get_by_date(&self, date: NaiveDate) -> Result<Vec<AppointmentRecord>> {
        tracing::info!("fetching appointments for date: {date}");
        self.run_plan(appointment_plan(Some(AppointmentFilter::Date(date))))
            .await
    }

    /// Force the appointment into the cancelled state, attaching the reason
    /// when given. Cancelling an already-cancelled appointment is a no-op
    /// rewrite; last write wins.
    pub async fn cancel(&self, id: &str, reason: &str) -> Result<AppointmentRecord> {
        tracing::info!("cancelling appointment id: {id}");

        let document = self
            .store
            .read(Appointment::RESOURCE_TYPE, id)
            .await?
            .ok_or_else(|| Error::not_found(Appointment::RESOURCE_TYPE, id))?;
        let mut resource = documents::parse::<Appointment>(Appointment::RESOURCE_TYPE, document)?;

        resource.status = Some(AppointmentStatus::Cancelled.as_code().to_string());
        if !reason.is_empty() {
            resource.cancelation_reason = Some(CodeableConcept::text(reason));
        }

        let document = documents::to_document(&resource)?;
        let updated = self
            .store
            .update(Appointment::RESOURCE_TYPE, id, document)
            .await?;
        let resource = documents::parse::<Appointment>(Appointment::RESOURCE_TYPE, updated)?;
        let result = self.codec.decode(&resource);

        self.audit
            .record(
                AuditAction::Update,
                Appointment::RESOURCE_TYPE,
                id,
                &format!("Appointment cancelled: {reason}"),
            )
            .await;

        Ok(result)
    }

    pub async fn delete(&self, id: &str) -> Result<()> {
        tracing::info!("deleting appointment id: {id}");
        self.store.delete(Appointment::RESOURCE_TYPE, id).await?;

        self.audit
            .record(
                AuditAction::Delete,
                Appointment::RESOURCE_TYPE,
                id,
                "Appointment deleted",
            )
            .await;

        Ok(())
    }

    /// Fill display names that are missing, leaving present ones untouched.
    async fn fill_missing_names(&self, record: &mut AppointmentRecord) {
        if record.patient_name.is_none() {
            if let Some(patient_id) = record.patient_id.clone() {
                record.patient_name = self.patients.display_name(&patient_id).await;
            }
        }
        if record.practitioner_name.is_none() {
            if let Some(practitioner_id) = record.practitioner_id.clone() {
                record.practitioner_name =
                    self.practitioners.display_name(&practitioner_id).await;
            }
        }
    }

    async fn run_plan(&self, plan: FetchPlan<AppointmentRecord>) -> Result<Vec<AppointmentRecord>> {
        let (query, predicate) = plan.into_parts();
        let found = self.store.search(Appointment::RESOURCE_TYPE, &query).await?;
        let mut records = documents::decode_all(&self.codec, Appointment::RESOURCE_TYPE, found);
        if let Some(predicate) = predicate {
            records.retain(|record| predicate(record));
        }
        for record in &mut records {
            self.fill_missing_names(record).await;
        }
        tracing::info!("found {} appointments", records.len());
        Ok(records)
    }
}
