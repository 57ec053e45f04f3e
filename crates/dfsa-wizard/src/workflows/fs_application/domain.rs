use std::collections::BTreeMap;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::activity_details::ActivityDetails;
use super::codes::{
    ActivityCode, ActivitySelections, EndorsementSelections, FinancialServicesMatrix,
};
use super::fees::FeeCalculation;
use super::steps::StepId;

/// Postal address captured on the standing data step.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Address {
    pub line1: String,
    pub line2: String,
    pub city: String,
    pub state: String,
    pub postal_code: String,
    pub country: String,
    pub po_box: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Shareholder {
    pub name: String,
    pub entity_type: String,
    pub country: String,
    pub ownership_percent: f32,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct BeneficialOwner {
    pub name: String,
    pub nationality: String,
    pub ownership_percent: f32,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Controller {
    pub name: String,
    pub controller_type: String,
    pub country: String,
    pub control_percent: f32,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct BoardMember {
    pub name: String,
    pub position: String,
    pub independent: bool,
}

/// Request to waive or modify a standard requirement.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct WaiverRequest {
    pub requirement: String,
    pub justification: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub alternative_approach: Option<String>,
}

/// Fit and proper declaration signed by a key individual.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct IndividualDeclaration {
    pub person_name: String,
    pub role: String,
    pub declaration_signed: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub signed_date: Option<NaiveDate>,
}

/// Every answer collected across the wizard, held as one record per editing session.
///
/// Missing fields deserialize to their defaults so saved drafts written by older builds
/// restore cleanly.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct FsApplicationFormData {
    // introduction & disclosure
    pub submitter_name: String,
    pub submitter_function: String,
    pub submitter_email: String,
    pub submitter_phone: String,
    pub contact_person_internal: bool,
    pub external_adviser_name: String,
    pub external_adviser_email: String,
    pub external_adviser_company: String,
    pub instructions_confirmed: bool,
    pub disclosure_acknowledged: bool,
    pub information_accurate: bool,
    pub authorized_to_submit: bool,
    pub difca_consent: bool,

    // standing data
    pub is_representative_office: bool,
    pub legal_status: String,
    pub general_structure: String,
    pub firm_name: String,
    pub trading_names: Vec<String>,
    pub registered_country: String,
    pub registration_number: String,
    pub registration_date: String,
    pub financial_year_end: String,
    pub head_office_address: Address,
    pub primary_contact_name: String,
    pub primary_contact_email: String,
    pub primary_contact_phone: String,
    pub it_reliance: String,
    pub it_complexity: String,

    // ownership
    pub is_part_of_group: bool,
    pub ultimate_holding_company: String,
    pub shareholders: Vec<Shareholder>,
    pub beneficial_owners: Vec<BeneficialOwner>,
    pub publicly_listed: bool,
    pub listing_exchange: String,

    // controllers & group structure
    pub has_controllers: bool,
    pub controllers: Vec<Controller>,
    pub group_structure_description: String,

    // permissions
    pub activity_selections: ActivitySelections,
    pub financial_services_matrix: FinancialServicesMatrix,
    pub endorsement_selections: EndorsementSelections,
    pub activity_details: BTreeMap<StepId, ActivityDetails>,

    // core profile
    pub business_plan_summary: String,
    pub target_client_segments: Vec<String>,
    pub risk_management_framework: String,
    pub board_composition: Vec<BoardMember>,

    // final submission
    pub waiver_requests: Vec<WaiverRequest>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fee_calculation: Option<FeeCalculation>,
    pub payment_method: String,
    pub individual_declarations: Vec<IndividualDeclaration>,
    pub final_review: bool,
    pub submission_declaration: bool,
}

impl Default for FsApplicationFormData {
    fn default() -> Self {
        Self {
            submitter_name: String::new(),
            submitter_function: String::new(),
            submitter_email: String::new(),
            submitter_phone: String::new(),
            contact_person_internal: true,
            external_adviser_name: String::new(),
            external_adviser_email: String::new(),
            external_adviser_company: String::new(),
            instructions_confirmed: false,
            disclosure_acknowledged: false,
            information_accurate: false,
            authorized_to_submit: false,
            difca_consent: false,
            is_representative_office: false,
            legal_status: String::new(),
            general_structure: String::new(),
            firm_name: String::new(),
            trading_names: Vec::new(),
            registered_country: String::new(),
            registration_number: String::new(),
            registration_date: String::new(),
            financial_year_end: String::new(),
            head_office_address: Address::default(),
            primary_contact_name: String::new(),
            primary_contact_email: String::new(),
            primary_contact_phone: String::new(),
            it_reliance: String::new(),
            it_complexity: String::new(),
            is_part_of_group: false,
            ultimate_holding_company: String::new(),
            shareholders: Vec::new(),
            beneficial_owners: Vec::new(),
            publicly_listed: false,
            listing_exchange: String::new(),
            has_controllers: false,
            controllers: Vec::new(),
            group_structure_description: String::new(),
            activity_selections: ActivitySelections::default(),
            financial_services_matrix: FinancialServicesMatrix::default(),
            endorsement_selections: EndorsementSelections::default(),
            activity_details: BTreeMap::new(),
            business_plan_summary: String::new(),
            target_client_segments: Vec::new(),
            risk_management_framework: String::new(),
            board_composition: Vec::new(),
            waiver_requests: Vec::new(),
            fee_calculation: None,
            payment_method: String::new(),
            individual_declarations: Vec::new(),
            final_review: false,
            submission_declaration: false,
        }
    }
}

impl FsApplicationFormData {
    pub fn is_activity_selected(&self, activity: ActivityCode) -> bool {
        self.activity_selections.is_selected(activity)
    }

    pub fn details_for(&self, step: StepId) -> Option<&ActivityDetails> {
        self.activity_details.get(&step)
    }
}
