use std::collections::BTreeMap;

use chrono::{NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use super::super::activity_details::ActivityDetails;
use super::super::codes::{ActivitySelections, EndorsementSelections, FinancialServicesMatrix};
use super::super::domain::{
    Address, BeneficialOwner, BoardMember, Controller, FsApplicationFormData,
    IndividualDeclaration, Shareholder, WaiverRequest,
};
use super::super::steps::StepId;
use super::cascade::settle;

/// Partial update to the form. `None` (or an absent JSON key) leaves the field untouched;
/// `Some` replaces the whole top-level value, nested records included.
///
/// The fee calculation is derived and therefore not patchable.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct FormDataPatch {
    pub submitter_name: Option<String>,
    pub submitter_function: Option<String>,
    pub submitter_email: Option<String>,
    pub submitter_phone: Option<String>,
    pub contact_person_internal: Option<bool>,
    pub external_adviser_name: Option<String>,
    pub external_adviser_email: Option<String>,
    pub external_adviser_company: Option<String>,
    pub instructions_confirmed: Option<bool>,
    pub disclosure_acknowledged: Option<bool>,
    pub information_accurate: Option<bool>,
    pub authorized_to_submit: Option<bool>,
    pub difca_consent: Option<bool>,
    pub is_representative_office: Option<bool>,
    pub legal_status: Option<String>,
    pub general_structure: Option<String>,
    pub firm_name: Option<String>,
    pub trading_names: Option<Vec<String>>,
    pub registered_country: Option<String>,
    pub registration_number: Option<String>,
    pub registration_date: Option<String>,
    pub financial_year_end: Option<String>,
    pub head_office_address: Option<Address>,
    pub primary_contact_name: Option<String>,
    pub primary_contact_email: Option<String>,
    pub primary_contact_phone: Option<String>,
    pub it_reliance: Option<String>,
    pub it_complexity: Option<String>,
    pub is_part_of_group: Option<bool>,
    pub ultimate_holding_company: Option<String>,
    pub shareholders: Option<Vec<Shareholder>>,
    pub beneficial_owners: Option<Vec<BeneficialOwner>>,
    pub publicly_listed: Option<bool>,
    pub listing_exchange: Option<String>,
    pub has_controllers: Option<bool>,
    pub controllers: Option<Vec<Controller>>,
    pub group_structure_description: Option<String>,
    pub activity_selections: Option<ActivitySelections>,
    pub financial_services_matrix: Option<FinancialServicesMatrix>,
    pub endorsement_selections: Option<EndorsementSelections>,
    pub activity_details: Option<BTreeMap<StepId, ActivityDetails>>,
    pub business_plan_summary: Option<String>,
    pub target_client_segments: Option<Vec<String>>,
    pub risk_management_framework: Option<String>,
    pub board_composition: Option<Vec<BoardMember>>,
    pub waiver_requests: Option<Vec<WaiverRequest>>,
    pub payment_method: Option<String>,
    pub individual_declarations: Option<Vec<IndividualDeclaration>>,
    pub final_review: Option<bool>,
    pub submission_declaration: Option<bool>,
}

macro_rules! merge_fields {
    ($target:ident <- $patch:ident { $($field:ident),* $(,)? }) => {
        $(
            if let Some(value) = $patch.$field {
                $target.$field = value;
            }
        )*
    };
}

impl FormDataPatch {
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }

    /// Copy every supplied field onto `form` without running cascades.
    pub(crate) fn apply_to(self, form: &mut FsApplicationFormData) {
        let patch = self;
        merge_fields!(form <- patch {
            submitter_name,
            submitter_function,
            submitter_email,
            submitter_phone,
            contact_person_internal,
            external_adviser_name,
            external_adviser_email,
            external_adviser_company,
            instructions_confirmed,
            disclosure_acknowledged,
            information_accurate,
            authorized_to_submit,
            difca_consent,
            is_representative_office,
            legal_status,
            general_structure,
            firm_name,
            trading_names,
            registered_country,
            registration_number,
            registration_date,
            financial_year_end,
            head_office_address,
            primary_contact_name,
            primary_contact_email,
            primary_contact_phone,
            it_reliance,
            it_complexity,
            is_part_of_group,
            ultimate_holding_company,
            shareholders,
            beneficial_owners,
            publicly_listed,
            listing_exchange,
            has_controllers,
            controllers,
            group_structure_description,
            activity_selections,
            financial_services_matrix,
            endorsement_selections,
            activity_details,
            business_plan_summary,
            target_client_segments,
            risk_management_framework,
            board_composition,
            waiver_requests,
            payment_method,
            individual_declarations,
            final_review,
            submission_declaration,
        });
    }
}

impl FsApplicationFormData {
    /// Shallow-merge `patch` over the current answers and settle the derived state.
    pub fn merged(self, patch: FormDataPatch) -> Self {
        self.merged_on(patch, Utc::now().date_naive())
    }

    /// As [`merged`](Self::merged), stamping newly signed declarations with `today`.
    pub fn merged_on(self, patch: FormDataPatch, today: NaiveDate) -> Self {
        let previous = self.clone();
        let mut next = self;
        patch.apply_to(&mut next);
        settle(&previous, next, today)
    }
}
