use std::collections::BTreeMap;
use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::domain::FsApplicationFormData;
use super::fees::{calculate_fees, FeeCalculation};
use super::rules::VisibilityEngine;
use super::steps::{StepDefinition, StepId, WizardProgress};

/// Identifier wrapper for stored drafts.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DraftId(pub String);

impl fmt::Display for DraftId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DraftStatus {
    Draft,
    Submitted,
}

impl DraftStatus {
    pub const fn label(self) -> &'static str {
        match self {
            Self::Draft => "draft",
            Self::Submitted => "submitted",
        }
    }
}

/// Repository record: the answers plus where the applicant is in the wizard.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DraftRecord {
    pub id: DraftId,
    pub form: FsApplicationFormData,
    #[serde(default)]
    pub progress: WizardProgress,
    pub status: DraftStatus,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reference: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub submitted_at: Option<DateTime<Utc>>,
}

impl DraftRecord {
    pub fn is_submitted(&self) -> bool {
        self.status == DraftStatus::Submitted
    }

    pub fn view(&self, engine: &VisibilityEngine) -> DraftView {
        let visible = engine.visible_steps(&self.form);
        DraftView {
            id: self.id.clone(),
            status: self.status.label(),
            reference: self.reference.clone(),
            progress_percent: self.progress.percent(&visible),
            current_step_index: self.progress.current_step_index,
            completed_steps: self.progress.completed_steps.iter().copied().collect(),
            hidden_fields: engine.hidden_fields(&visible, &self.form),
            visible_steps: visible.into_iter().map(StepId::definition).collect(),
            fees: calculate_fees(&self.form),
            form: self.form.clone(),
            updated_at: self.updated_at,
        }
    }
}

/// Storage abstraction so the service can run against any backing store.
///
/// Both writes are atomic with respect to their check: the capacity test in `insert` and the
/// status test in `update` must happen under the same lock or transaction as the write.
pub trait DraftRepository: Send + Sync {
    /// Store a new draft, refusing with `CapacityReached` once `capacity` drafts are held.
    fn insert(&self, record: DraftRecord, capacity: usize) -> Result<DraftRecord, RepositoryError>;
    /// Replace a stored draft whose status is still `expected`.
    fn update(&self, record: DraftRecord, expected: DraftStatus) -> Result<(), RepositoryError>;
    fn fetch(&self, id: &DraftId) -> Result<Option<DraftRecord>, RepositoryError>;
}

#[derive(Debug, thiserror::Error)]
pub enum RepositoryError {
    #[error("draft already exists")]
    Conflict,
    #[error("draft not found")]
    NotFound,
    #[error("draft is no longer {}", .0.label())]
    StatusChanged(DraftStatus),
    #[error("draft store is full ({0} drafts)")]
    CapacityReached(usize),
    #[error("repository unavailable: {0}")]
    Unavailable(String),
}

/// Outbound hook receiving finished applications (regulator portal, queue, mailbox).
pub trait SubmissionPublisher: Send + Sync {
    fn publish(&self, application: SubmittedApplication) -> Result<(), PublishError>;
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SubmittedApplication {
    pub reference: String,
    pub draft_id: DraftId,
    pub firm_name: String,
    pub fees: FeeCalculation,
    pub form: FsApplicationFormData,
    pub submitted_at: DateTime<Utc>,
}

#[derive(Debug, thiserror::Error)]
pub enum PublishError {
    #[error("submission transport unavailable: {0}")]
    Transport(String),
}

/// Response body for draft endpoints.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DraftView {
    pub id: DraftId,
    pub status: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reference: Option<String>,
    pub form: FsApplicationFormData,
    pub visible_steps: Vec<StepDefinition>,
    /// Fields not rendered on each visible step, keyed by step id.
    pub hidden_fields: BTreeMap<StepId, Vec<String>>,
    pub fees: FeeCalculation,
    pub progress_percent: u8,
    pub current_step_index: usize,
    pub completed_steps: Vec<StepId>,
    pub updated_at: DateTime<Utc>,
}
