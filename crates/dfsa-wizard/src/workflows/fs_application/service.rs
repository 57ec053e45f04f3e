use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use chrono::{Datelike, Utc};
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use super::domain::FsApplicationFormData;
use super::fees::calculate_fees;
use super::repository::{
    DraftId, DraftRecord, DraftRepository, DraftStatus, DraftView, PublishError,
    RepositoryError, SubmissionPublisher, SubmittedApplication,
};
use super::rules::VisibilityEngine;
use super::state::{reduce, FormAction, FormDataPatch};
use super::steps::{can_navigate_to_step, next_step_index, previous_step_index, StepId};
use super::submission::{SubmissionGuard, SubmissionViolation};

pub const DEFAULT_MAX_DRAFTS: usize = 1_000;

/// Cursor move requested by the wizard shell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "direction", content = "index", rename_all = "snake_case")]
pub enum NavigationTarget {
    Next,
    Previous,
    Step(usize),
}

/// Service composing the form reducer, visibility rules, submission guard, and storage.
pub struct FsApplicationService<R, P> {
    guard: Arc<SubmissionGuard>,
    repository: Arc<R>,
    publisher: Arc<P>,
    visibility: Arc<VisibilityEngine>,
    max_drafts: usize,
}

static DRAFT_SEQUENCE: AtomicU64 = AtomicU64::new(1);
static SUBMISSION_SEQUENCE: AtomicU64 = AtomicU64::new(1);

fn next_draft_id() -> DraftId {
    let id = DRAFT_SEQUENCE.fetch_add(1, Ordering::Relaxed);
    DraftId(format!("draft-{id:06}"))
}

fn next_reference(year: i32) -> String {
    let sequence = SUBMISSION_SEQUENCE.fetch_add(1, Ordering::Relaxed);
    format!("DFSA-FS-{year}-{sequence:05}")
}

impl<R, P> FsApplicationService<R, P>
where
    R: DraftRepository + 'static,
    P: SubmissionPublisher + 'static,
{
    pub fn new(repository: Arc<R>, publisher: Arc<P>) -> Self {
        Self {
            guard: Arc::new(SubmissionGuard::default()),
            repository,
            publisher,
            visibility: Arc::new(VisibilityEngine::default()),
            max_drafts: DEFAULT_MAX_DRAFTS,
        }
    }

    pub fn with_guard(mut self, guard: SubmissionGuard) -> Self {
        self.guard = Arc::new(guard);
        self
    }

    pub fn with_visibility(mut self, visibility: VisibilityEngine) -> Self {
        self.visibility = Arc::new(visibility);
        self
    }

    pub fn with_max_drafts(mut self, max_drafts: usize) -> Self {
        self.max_drafts = max_drafts.max(1);
        self
    }

    pub fn visibility(&self) -> &VisibilityEngine {
        &self.visibility
    }

    /// Start a new draft, optionally seeded with answers restored from elsewhere.
    pub fn create_draft(
        &self,
        initial: Option<FormDataPatch>,
    ) -> Result<DraftRecord, ApplicationServiceError> {
        let form = FsApplicationFormData::default().merged(initial.unwrap_or_default());
        let now = Utc::now();
        let record = DraftRecord {
            id: next_draft_id(),
            form,
            progress: Default::default(),
            status: DraftStatus::Draft,
            reference: None,
            created_at: now,
            updated_at: now,
            submitted_at: None,
        };

        let stored = self
            .repository
            .insert(record, self.max_drafts)
            .inspect_err(|error| {
                if let RepositoryError::CapacityReached(limit) = error {
                    warn!(limit, "draft store is full");
                }
            })?;
        info!(draft_id = %stored.id, "created application draft");
        Ok(stored)
    }

    pub fn get(&self, id: &DraftId) -> Result<DraftRecord, ApplicationServiceError> {
        let record = self.repository.fetch(id)?.ok_or(RepositoryError::NotFound)?;
        Ok(record)
    }

    pub fn view(&self, id: &DraftId) -> Result<DraftView, ApplicationServiceError> {
        Ok(self.get(id)?.view(&self.visibility))
    }

    /// Shallow-merge a patch into the stored answers.
    pub fn patch(
        &self,
        id: &DraftId,
        patch: FormDataPatch,
    ) -> Result<DraftRecord, ApplicationServiceError> {
        debug!(draft_id = %id, empty = patch.is_empty(), "patching application draft");
        self.edit(id, |form| form.merged(patch))
    }

    pub fn apply(
        &self,
        id: &DraftId,
        action: FormAction,
    ) -> Result<DraftRecord, ApplicationServiceError> {
        debug!(draft_id = %id, action = action.name(), "applying form action");
        self.edit(id, |form| reduce(form, action))
    }

    /// Record `step` as done and move the cursor past it.
    pub fn mark_step_complete(
        &self,
        id: &DraftId,
        step: StepId,
    ) -> Result<DraftRecord, ApplicationServiceError> {
        let mut record = self.editable(id)?;
        let visible = self.visibility.visible_steps(&record.form);
        let position = visible
            .iter()
            .position(|candidate| *candidate == step)
            .ok_or(ApplicationServiceError::StepNotVisible(step))?;

        record.progress.complete(step);
        record.progress.current_step_index =
            next_step_index(position, &visible).unwrap_or(position);
        record.updated_at = Utc::now();

        self.store(record.clone())?;
        debug!(draft_id = %id, step = step.id(), "completed wizard step");
        Ok(record)
    }

    pub fn navigate(
        &self,
        id: &DraftId,
        target: NavigationTarget,
    ) -> Result<DraftRecord, ApplicationServiceError> {
        let mut record = self.editable(id)?;
        let visible = self.visibility.visible_steps(&record.form);
        let current = record.progress.current_step_index;

        let destination = match target {
            NavigationTarget::Next => next_step_index(current, &visible),
            NavigationTarget::Previous => previous_step_index(current),
            NavigationTarget::Step(index) => (index < visible.len()).then_some(index),
        }
        .filter(|index| {
            can_navigate_to_step(*index, current, &record.progress.completed_steps, &visible)
        })
        .ok_or(ApplicationServiceError::NavigationBlocked { current })?;

        record.progress.current_step_index = destination;
        record.updated_at = Utc::now();
        self.store(record.clone())?;
        Ok(record)
    }

    /// Run the readiness checks, lock the draft, and hand the application to the publisher.
    ///
    /// The draft is claimed as submitted before publishing so a concurrent submit fails with
    /// `AlreadySubmitted`. A publisher failure releases the claim.
    pub fn submit(&self, id: &DraftId) -> Result<SubmittedApplication, ApplicationServiceError> {
        let record = self.editable(id)?;

        let violations = self.guard.violations(&record.form);
        if !violations.is_empty() {
            warn!(draft_id = %id, issues = violations.len(), "rejected application submission");
            return Err(ApplicationServiceError::NotReady(violations));
        }

        let now = Utc::now();
        let reference = next_reference(now.year());
        let application = SubmittedApplication {
            reference: reference.clone(),
            draft_id: record.id.clone(),
            firm_name: record.form.firm_name.clone(),
            fees: calculate_fees(&record.form),
            form: record.form.clone(),
            submitted_at: now,
        };

        let claimed = DraftRecord {
            status: DraftStatus::Submitted,
            reference: Some(reference),
            submitted_at: Some(now),
            updated_at: now,
            ..record.clone()
        };
        self.store(claimed)?;

        if let Err(error) = self.publisher.publish(application.clone()) {
            warn!(draft_id = %id, %error, "publishing failed, reopening draft");
            if let Err(restore) = self.repository.update(record, DraftStatus::Submitted) {
                warn!(draft_id = %id, error = %restore, "could not reopen draft");
            }
            return Err(error.into());
        }

        info!(
            draft_id = %id,
            reference = %application.reference,
            total_fee = application.fees.total_fee,
            "submitted application"
        );
        Ok(application)
    }

    fn editable(&self, id: &DraftId) -> Result<DraftRecord, ApplicationServiceError> {
        let record = self.get(id)?;
        if record.is_submitted() {
            return Err(ApplicationServiceError::AlreadySubmitted(record.id));
        }
        Ok(record)
    }

    fn edit(
        &self,
        id: &DraftId,
        change: impl FnOnce(FsApplicationFormData) -> FsApplicationFormData,
    ) -> Result<DraftRecord, ApplicationServiceError> {
        let mut record = self.editable(id)?;
        record.form = change(record.form);

        let visible = self.visibility.visible_steps(&record.form);
        record.progress.clamp_to(&visible);
        record.updated_at = Utc::now();

        self.store(record.clone())?;
        Ok(record)
    }

    /// Write back a record read as a draft, unless it was submitted in the meantime.
    fn store(&self, record: DraftRecord) -> Result<(), ApplicationServiceError> {
        let id = record.id.clone();
        match self.repository.update(record, DraftStatus::Draft) {
            Err(RepositoryError::StatusChanged(_)) => {
                Err(ApplicationServiceError::AlreadySubmitted(id))
            }
            other => Ok(other?),
        }
    }
}

/// Error raised by the application service.
#[derive(Debug, thiserror::Error)]
pub enum ApplicationServiceError {
    #[error("application is not ready for submission ({} issues)", .0.len())]
    NotReady(Vec<SubmissionViolation>),
    #[error("draft {0} has already been submitted")]
    AlreadySubmitted(DraftId),
    #[error("step {} is not part of this application", .0.id())]
    StepNotVisible(StepId),
    #[error("cannot move from step {current} to the requested step")]
    NavigationBlocked { current: usize },
    #[error(transparent)]
    Repository(#[from] RepositoryError),
    #[error(transparent)]
    Publish(#[from] PublishError),
}
