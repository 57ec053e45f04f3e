use chrono::{NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use super::super::activity_details::ActivityDetails;
use super::super::codes::{ActivityCode, EndorsementCode, FinancialServiceCode, InvestmentType};
use super::super::domain::{FsApplicationFormData, IndividualDeclaration, WaiverRequest};
use super::cascade::settle;
use super::patch::FormDataPatch;

/// Discrete edits the wizard screens send. Every action goes through the same cascade as a
/// plain patch, so the reducer never leaves the form in a state a patch could not reach.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum FormAction {
    Patch(Box<FormDataPatch>),
    ToggleActivity {
        activity: ActivityCode,
        selected: bool,
    },
    ToggleMatrixCell {
        service: FinancialServiceCode,
        investment: InvestmentType,
        selected: bool,
    },
    ToggleEndorsement {
        endorsement: EndorsementCode,
        selected: bool,
    },
    SetRepresentativeOffice {
        enabled: bool,
    },
    SetHasWaiverRequests {
        enabled: bool,
    },
    AddWaiver,
    RemoveWaiver {
        index: usize,
    },
    UpdateWaiver {
        index: usize,
        waiver: WaiverRequest,
    },
    #[serde(rename_all = "camelCase")]
    AddDeclaration {
        #[serde(default)]
        person_name: String,
        #[serde(default)]
        role: String,
    },
    RemoveDeclaration {
        index: usize,
    },
    SignDeclaration {
        index: usize,
        signed: bool,
    },
    SetActivityDetails {
        details: ActivityDetails,
    },
}

impl FormAction {
    pub const fn name(&self) -> &'static str {
        match self {
            Self::Patch(_) => "patch",
            Self::ToggleActivity { .. } => "toggle_activity",
            Self::ToggleMatrixCell { .. } => "toggle_matrix_cell",
            Self::ToggleEndorsement { .. } => "toggle_endorsement",
            Self::SetRepresentativeOffice { .. } => "set_representative_office",
            Self::SetHasWaiverRequests { .. } => "set_has_waiver_requests",
            Self::AddWaiver => "add_waiver",
            Self::RemoveWaiver { .. } => "remove_waiver",
            Self::UpdateWaiver { .. } => "update_waiver",
            Self::AddDeclaration { .. } => "add_declaration",
            Self::RemoveDeclaration { .. } => "remove_declaration",
            Self::SignDeclaration { .. } => "sign_declaration",
            Self::SetActivityDetails { .. } => "set_activity_details",
        }
    }
}

/// Apply `action` and return the settled form.
pub fn reduce(state: FsApplicationFormData, action: FormAction) -> FsApplicationFormData {
    reduce_on(state, action, Utc::now().date_naive())
}

pub fn reduce_on(
    state: FsApplicationFormData,
    action: FormAction,
    today: NaiveDate,
) -> FsApplicationFormData {
    let previous = state.clone();
    let mut next = state;

    match action {
        FormAction::Patch(patch) => patch.apply_to(&mut next),
        FormAction::ToggleActivity { activity, selected } => {
            next.activity_selections.set(activity, selected);
        }
        FormAction::ToggleMatrixCell {
            service,
            investment,
            selected,
        } => next
            .financial_services_matrix
            .set(service, investment, selected),
        FormAction::ToggleEndorsement {
            endorsement,
            selected,
        } => {
            if selected {
                next.endorsement_selections.set(endorsement, true);
            } else {
                next.endorsement_selections.clear(endorsement);
            }
        }
        FormAction::SetRepresentativeOffice { enabled } => {
            next.is_representative_office = enabled;
        }
        FormAction::SetHasWaiverRequests { enabled } => {
            if !enabled {
                next.waiver_requests.clear();
            } else if next.waiver_requests.is_empty() {
                next.waiver_requests.push(WaiverRequest::default());
            }
        }
        FormAction::AddWaiver => next.waiver_requests.push(WaiverRequest::default()),
        FormAction::RemoveWaiver { index } => {
            if index < next.waiver_requests.len() {
                next.waiver_requests.remove(index);
            }
        }
        FormAction::UpdateWaiver { index, waiver } => {
            if let Some(slot) = next.waiver_requests.get_mut(index) {
                *slot = waiver;
            }
        }
        FormAction::AddDeclaration { person_name, role } => {
            next.individual_declarations.push(IndividualDeclaration {
                person_name,
                role,
                ..IndividualDeclaration::default()
            });
        }
        FormAction::RemoveDeclaration { index } => {
            if index < next.individual_declarations.len() {
                next.individual_declarations.remove(index);
            }
        }
        FormAction::SignDeclaration { index, signed } => {
            if let Some(declaration) = next.individual_declarations.get_mut(index) {
                declaration.declaration_signed = signed;
            }
        }
        FormAction::SetActivityDetails { details } => {
            next.activity_details.insert(details.step(), details);
        }
    }

    settle(&previous, next, today)
}
