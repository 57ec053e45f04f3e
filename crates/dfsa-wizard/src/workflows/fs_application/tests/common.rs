use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use axum::response::Response;
use chrono::NaiveDate;
use serde_json::Value;

use crate::workflows::fs_application::codes::{
    ActivityCode, FinancialServiceCode, FinancialServicesMatrix, InvestmentType,
};
use crate::workflows::fs_application::domain::{FsApplicationFormData, IndividualDeclaration};
use crate::workflows::fs_application::repository::{
    DraftId, DraftRecord, DraftRepository, DraftStatus, PublishError, RepositoryError,
    SubmissionPublisher, SubmittedApplication,
};
use crate::workflows::fs_application::{application_router, FsApplicationService};

pub(super) fn today() -> NaiveDate {
    NaiveDate::from_ymd_opt(2026, 3, 2).expect("valid date")
}

pub(super) fn form_with(activities: &[ActivityCode]) -> FsApplicationFormData {
    FsApplicationFormData {
        activity_selections: activities.iter().map(|activity| (*activity, true)).collect(),
        ..FsApplicationFormData::default()
    }
}

pub(super) fn matrix(cells: &[(FinancialServiceCode, InvestmentType)]) -> FinancialServicesMatrix {
    cells
        .iter()
        .fold(FinancialServicesMatrix::default(), |matrix, (service, investment)| {
            matrix.with(*service, *investment)
        })
}

pub(super) fn signed_declaration(person_name: &str, role: &str) -> IndividualDeclaration {
    IndividualDeclaration {
        person_name: person_name.to_string(),
        role: role.to_string(),
        declaration_signed: true,
        signed_date: Some(today()),
    }
}

/// Broker-dealer application that clears every readiness check.
pub(super) fn ready_form() -> FsApplicationFormData {
    FsApplicationFormData {
        firm_name: "Gulf Meridian Capital Ltd".to_string(),
        financial_services_matrix: matrix(&[(FinancialServiceCode::FS1, InvestmentType::IT1)]),
        individual_declarations: vec![signed_declaration("Layla Haddad", "senior_executive")],
        submission_declaration: true,
        ..form_with(&[ActivityCode::A1])
    }
}

pub(super) fn build_service() -> (
    FsApplicationService<MemoryRepository, MemoryPublisher>,
    Arc<MemoryRepository>,
    Arc<MemoryPublisher>,
) {
    let repository = Arc::new(MemoryRepository::default());
    let publisher = Arc::new(MemoryPublisher::default());
    let service = FsApplicationService::new(repository.clone(), publisher.clone());
    (service, repository, publisher)
}

#[derive(Default, Clone)]
pub(super) struct MemoryRepository {
    pub(super) records: Arc<Mutex<HashMap<DraftId, DraftRecord>>>,
}

impl DraftRepository for MemoryRepository {
    fn insert(&self, record: DraftRecord, capacity: usize) -> Result<DraftRecord, RepositoryError> {
        let mut guard = self.records.lock().expect("repository mutex poisoned");
        if guard.contains_key(&record.id) {
            return Err(RepositoryError::Conflict);
        }
        if guard.len() >= capacity {
            return Err(RepositoryError::CapacityReached(capacity));
        }
        guard.insert(record.id.clone(), record.clone());
        Ok(record)
    }

    fn update(&self, record: DraftRecord, expected: DraftStatus) -> Result<(), RepositoryError> {
        let mut guard = self.records.lock().expect("repository mutex poisoned");
        let stored = guard.get_mut(&record.id).ok_or(RepositoryError::NotFound)?;
        if stored.status != expected {
            return Err(RepositoryError::StatusChanged(expected));
        }
        *stored = record;
        Ok(())
    }

    fn fetch(&self, id: &DraftId) -> Result<Option<DraftRecord>, RepositoryError> {
        let guard = self.records.lock().expect("repository mutex poisoned");
        Ok(guard.get(id).cloned())
    }
}

#[derive(Default, Clone)]
pub(super) struct MemoryPublisher {
    submissions: Arc<Mutex<Vec<SubmittedApplication>>>,
}

impl MemoryPublisher {
    pub(super) fn submissions(&self) -> Vec<SubmittedApplication> {
        self.submissions
            .lock()
            .expect("publisher mutex poisoned")
            .clone()
    }
}

impl SubmissionPublisher for MemoryPublisher {
    fn publish(&self, application: SubmittedApplication) -> Result<(), PublishError> {
        self.submissions
            .lock()
            .expect("publisher mutex poisoned")
            .push(application);
        Ok(())
    }
}

pub(super) struct OfflinePublisher;

impl SubmissionPublisher for OfflinePublisher {
    fn publish(&self, _application: SubmittedApplication) -> Result<(), PublishError> {
        Err(PublishError::Transport("portal offline".to_string()))
    }
}

pub(super) struct UnavailableRepository;

impl DraftRepository for UnavailableRepository {
    fn insert(
        &self,
        _record: DraftRecord,
        _capacity: usize,
    ) -> Result<DraftRecord, RepositoryError> {
        Err(RepositoryError::Unavailable("database offline".to_string()))
    }

    fn update(&self, _record: DraftRecord, _expected: DraftStatus) -> Result<(), RepositoryError> {
        Err(RepositoryError::Unavailable("database offline".to_string()))
    }

    fn fetch(&self, _id: &DraftId) -> Result<Option<DraftRecord>, RepositoryError> {
        Err(RepositoryError::Unavailable("database offline".to_string()))
    }
}

pub(super) async fn read_json_body(response: Response) -> Value {
    let body = axum::body::to_bytes(response.into_body(), 1024 * 1024)
        .await
        .expect("read body");
    serde_json::from_slice(&body).expect("json payload")
}

pub(super) fn json_request(
    method: &str,
    uri: &str,
    body: Value,
) -> axum::http::Request<axum::body::Body> {
    axum::http::Request::builder()
        .method(method)
        .uri(uri)
        .header(axum::http::header::CONTENT_TYPE, "application/json")
        .body(axum::body::Body::from(
            serde_json::to_vec(&body).expect("body encodes"),
        ))
        .expect("request builds")
}

pub(super) fn application_router_with_service(
    service: FsApplicationService<MemoryRepository, MemoryPublisher>,
) -> axum::Router {
    application_router(Arc::new(service))
}
