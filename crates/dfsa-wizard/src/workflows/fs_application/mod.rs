//! DFSA financial-services licence application: form state, step visibility, fees, and the
//! draft lifecycle around them.
//!
//! The form state, visibility rules, and fee calculator are pure and synchronous; the service
//! and router layer persistence and submission on top through the `DraftRepository` and
//! `SubmissionPublisher` traits.

pub mod activity_details;
pub mod codes;
pub mod domain;
pub mod fees;
pub mod repository;
pub mod router;
pub mod rules;
pub mod service;
pub mod state;
pub mod steps;
pub(crate) mod submission;

#[cfg(test)]
mod tests;

pub use activity_details::ActivityDetails;
pub use codes::{
    ActivityCode, ActivitySelections, EndorsementCode, EndorsementSelections,
    FinancialServiceCode, FinancialServicesMatrix, InvestmentType,
};
pub use domain::{
    Address, BeneficialOwner, BoardMember, Controller, FsApplicationFormData,
    IndividualDeclaration, Shareholder, WaiverRequest,
};
pub use fees::{calculate_fees, EndorsementFee, FeeCalculation, FeeTier, FEE_CURRENCY};
pub use repository::{
    DraftId, DraftRecord, DraftRepository, DraftStatus, DraftView, PublishError,
    RepositoryError, SubmissionPublisher, SubmittedApplication,
};
pub use router::application_router;
pub use rules::{RuleSet, VisibilityEngine};
pub use service::{
    ApplicationServiceError, FsApplicationService, NavigationTarget, DEFAULT_MAX_DRAFTS,
};
pub use state::{reduce, reduce_on, FormAction, FormDataPatch};
pub use steps::{
    field_visibility, is_field_visible, is_step_visible, steps_in_stage, visible_steps,
    StepDefinition, StepId, WizardProgress, WizardStage,
};
pub use submission::{SubmissionGuard, SubmissionViolation};
