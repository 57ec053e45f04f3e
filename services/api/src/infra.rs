use dfsa_wizard::error::AppError;
use dfsa_wizard::workflows::fs_application::{
    DraftId, DraftRecord, DraftRepository, DraftStatus, FsApplicationFormData, PublishError,
    RepositoryError, SubmissionPublisher, SubmittedApplication,
};
use metrics_exporter_prometheus::PrometheusHandle;
use std::collections::HashMap;
use std::path::Path;
use std::sync::atomic::AtomicBool;
use std::sync::{Arc, Mutex};
use tracing::info;

#[derive(Clone)]
pub(crate) struct AppState {
    pub(crate) readiness: Arc<AtomicBool>,
    pub(crate) metrics: Arc<PrometheusHandle>,
}

#[derive(Default, Clone)]
pub(crate) struct InMemoryDraftRepository {
    records: Arc<Mutex<HashMap<DraftId, DraftRecord>>>,
}

impl DraftRepository for InMemoryDraftRepository {
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
        match guard.get_mut(&record.id) {
            Some(stored) if stored.status == expected => {
                *stored = record;
                Ok(())
            }
            Some(_) => Err(RepositoryError::StatusChanged(expected)),
            None => Err(RepositoryError::NotFound),
        }
    }

    fn fetch(&self, id: &DraftId) -> Result<Option<DraftRecord>, RepositoryError> {
        let guard = self.records.lock().expect("repository mutex poisoned");
        Ok(guard.get(id).cloned())
    }
}

/// Keeps submitted applications in memory and logs each hand-off.
#[derive(Default, Clone)]
pub(crate) struct LoggingSubmissionPublisher {
    submissions: Arc<Mutex<Vec<SubmittedApplication>>>,
}

impl SubmissionPublisher for LoggingSubmissionPublisher {
    fn publish(&self, application: SubmittedApplication) -> Result<(), PublishError> {
        info!(
            reference = %application.reference,
            draft_id = %application.draft_id,
            tier = application.fees.tier.label(),
            "application handed to licensing queue"
        );
        let mut guard = self.submissions.lock().expect("publisher mutex poisoned");
        guard.push(application);
        Ok(())
    }
}

impl LoggingSubmissionPublisher {
    pub(crate) fn submissions(&self) -> Vec<SubmittedApplication> {
        self.submissions
            .lock()
            .expect("publisher mutex poisoned")
            .clone()
    }
}

/// Load a saved wizard form. Missing keys fall back to the wizard defaults.
pub(crate) fn read_form(path: &Path) -> Result<FsApplicationFormData, AppError> {
    let raw = std::fs::read_to_string(path)?;
    let form = serde_json::from_str(&raw)?;
    Ok(form)
}

#[cfg(test)]
mod tests {
    use super::*;
    use dfsa_wizard::workflows::fs_application::ActivityCode;

    #[test]
    fn read_form_fills_defaults() {
        let path = std::env::temp_dir().join(format!("dfsa-form-{}.json", std::process::id()));
        std::fs::write(&path, r#"{"firmName": "Meridian", "activitySelections": {"A6": true}}"#)
            .expect("write form");

        let form = read_form(&path).expect("form loads");
        std::fs::remove_file(&path).ok();

        assert_eq!(form.firm_name, "Meridian");
        assert!(form.is_activity_selected(ActivityCode::A6));
        assert!(form.contact_person_internal);
    }

    #[test]
    fn read_form_reports_malformed_json() {
        let path =
            std::env::temp_dir().join(format!("dfsa-form-bad-{}.json", std::process::id()));
        std::fs::write(&path, "{").expect("write form");

        let result = read_form(&path);
        std::fs::remove_file(&path).ok();

        assert!(matches!(result, Err(AppError::Input(_))));
    }

    #[test]
    fn read_form_reports_missing_files() {
        let result = read_form(Path::new("/nonexistent/dfsa-form.json"));
        assert!(matches!(result, Err(AppError::Io(_))));
    }
}
