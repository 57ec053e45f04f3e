use super::codes::{ActivityCode, EndorsementCode};
use super::domain::FsApplicationFormData;

/// Reasons a draft cannot be submitted yet.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SubmissionViolation {
    #[error("select at least one activity or apply as a representative office")]
    NoActivitySelected,
    #[error("financial services matrix is populated but activity A1 is not selected")]
    MatrixWithoutFinancialServices,
    #[error("endorsement {} requires activity {}", .endorsement.code(), .activity.code())]
    OrphanedEndorsement {
        endorsement: EndorsementCode,
        activity: ActivityCode,
    },
    #[error("at least one fit and proper declaration is required")]
    MissingDeclarations,
    #[error("declaration {index} is unsigned or missing a name or role")]
    UnsignedDeclaration { index: usize },
    #[error("waiver request {index} needs both a requirement and a justification")]
    IncompleteWaiver { index: usize },
    #[error("submission declaration has not been confirmed")]
    SubmissionNotConfirmed,
}

/// Readiness checks run before a draft leaves the wizard.
#[derive(Debug, Clone)]
pub struct SubmissionGuard {
    require_declarations: bool,
}

impl Default for SubmissionGuard {
    fn default() -> Self {
        Self {
            require_declarations: true,
        }
    }
}

impl SubmissionGuard {
    /// Guard that accepts applications without fit and proper declarations, for firms whose
    /// key individuals file separately.
    pub fn without_declarations() -> Self {
        Self {
            require_declarations: false,
        }
    }

    pub fn check(&self, form: &FsApplicationFormData) -> Result<(), SubmissionViolation> {
        match self.violations(form).into_iter().next() {
            Some(violation) => Err(violation),
            None => Ok(()),
        }
    }

    /// Every violation, in the order the wizard presents its steps.
    pub fn violations(&self, form: &FsApplicationFormData) -> Vec<SubmissionViolation> {
        let mut violations = Vec::new();

        if !form.is_representative_office && !form.activity_selections.any_selected() {
            violations.push(SubmissionViolation::NoActivitySelected);
        }

        if !form.is_activity_selected(ActivityCode::A1)
            && !form.financial_services_matrix.is_empty()
        {
            violations.push(SubmissionViolation::MatrixWithoutFinancialServices);
        }

        for endorsement in form.endorsement_selections.selected() {
            let activity = endorsement.depends_on();
            if !form.is_activity_selected(activity) {
                violations.push(SubmissionViolation::OrphanedEndorsement {
                    endorsement,
                    activity,
                });
            }
        }

        for (index, waiver) in form.waiver_requests.iter().enumerate() {
            if waiver.requirement.trim().is_empty() || waiver.justification.trim().is_empty() {
                violations.push(SubmissionViolation::IncompleteWaiver { index });
            }
        }

        if self.require_declarations && form.individual_declarations.is_empty() {
            violations.push(SubmissionViolation::MissingDeclarations);
        }

        for (index, declaration) in form.individual_declarations.iter().enumerate() {
            let named =
                !declaration.person_name.trim().is_empty() && !declaration.role.trim().is_empty();
            if !declaration.declaration_signed || !named {
                violations.push(SubmissionViolation::UnsignedDeclaration { index });
            }
        }

        if !form.submission_declaration {
            violations.push(SubmissionViolation::SubmissionNotConfirmed);
        }

        violations
    }
}
