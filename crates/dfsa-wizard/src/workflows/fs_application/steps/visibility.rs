use std::collections::BTreeSet;

use super::super::codes::{ActivityCode, EndorsementCode, FinancialServiceCode};
use super::super::domain::FsApplicationFormData;
use super::catalog::{StepId, WizardStage};

/// Dedicated step contributed by each activity. Activities absent from the table (A8) have no
/// screen of their own; A1 contributes the matrix step plus whatever its matrix rows unlock.
const ACTIVITY_STEPS: [(ActivityCode, StepId); 7] = [
    (ActivityCode::A1, StepId::FinancialServicesMatrix),
    (ActivityCode::A2, StepId::DirectInsurance),
    (ActivityCode::A3, StepId::InsuranceIntermediation),
    (ActivityCode::A4, StepId::Crowdfunding),
    (ActivityCode::A5, StepId::MoneyServices),
    (ActivityCode::A6, StepId::Banking),
    (ActivityCode::A7, StepId::FundManagement),
];

/// Steps unlocked by a populated financial services matrix row while A1 is selected. Custody
/// rows (FS6, FS7) unlock nothing here: the client assets screen belongs to its endorsement.
const MATRIX_STEPS: [(FinancialServiceCode, StepId); 7] = [
    (FinancialServiceCode::FS1, StepId::SalesTrading),
    (FinancialServiceCode::FS2, StepId::SalesTrading),
    (FinancialServiceCode::FS3, StepId::AdvisingArranging),
    (FinancialServiceCode::FS4, StepId::AssetManagement),
    (FinancialServiceCode::FS5, StepId::AdvisingArranging),
    (FinancialServiceCode::FS8, StepId::FundManagement),
    (FinancialServiceCode::FS9, StepId::FundManagement),
];

const ENDORSEMENT_STEPS: [(EndorsementCode, StepId); 3] = [
    (EndorsementCode::IslamicFinance, StepId::IslamicEndorsement),
    (EndorsementCode::Retail, StepId::RetailEndorsement),
    (EndorsementCode::ClientAssets, StepId::ClientAssets),
];

/// Ordered, de-duplicated list of steps the applicant must traverse for the current answers.
///
/// Recomputed from scratch on every call. Inconsistent states (a matrix without A1, an
/// endorsement whose activity was dropped) simply hide the affected steps.
pub fn visible_steps(form: &FsApplicationFormData) -> Vec<StepId> {
    let mut steps: BTreeSet<StepId> = StepId::ordered()
        .into_iter()
        .filter(|step| step.stage() == WizardStage::GeneralRequirements)
        .collect();

    if form.is_representative_office {
        steps.insert(StepId::RepresentativeOffice);
    } else {
        steps.extend(activity_steps(form));
        steps.extend(endorsement_steps(form));

        if form.activity_selections.any_selected() {
            steps.extend(StepId::core_profile());
        }
    }

    steps.extend(StepId::finals());

    // BTreeSet iterates in catalogue order, which already places the finals last.
    steps.into_iter().collect()
}

pub fn is_step_visible(step: StepId, form: &FsApplicationFormData) -> bool {
    visible_steps(form).contains(&step)
}

fn activity_steps(form: &FsApplicationFormData) -> impl Iterator<Item = StepId> + '_ {
    let direct = ACTIVITY_STEPS
        .into_iter()
        .filter(|(activity, _)| form.is_activity_selected(*activity))
        .map(|(_, step)| step);

    let matrix = MATRIX_STEPS
        .into_iter()
        .filter(|(service, _)| {
            form.is_activity_selected(ActivityCode::A1)
                && form.financial_services_matrix.has_selections(*service)
        })
        .map(|(_, step)| step);

    direct.chain(matrix)
}

fn endorsement_steps(form: &FsApplicationFormData) -> impl Iterator<Item = StepId> + '_ {
    ENDORSEMENT_STEPS
        .into_iter()
        .filter(|(endorsement, _)| {
            form.endorsement_selections.is_selected(*endorsement)
                && form.is_activity_selected(endorsement.depends_on())
        })
        .map(|(_, step)| step)
}
