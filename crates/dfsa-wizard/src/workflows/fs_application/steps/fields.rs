use std::collections::BTreeMap;

use super::super::codes::{ActivityCode, EndorsementCode};
use super::super::domain::FsApplicationFormData;
use super::catalog::StepId;

/// Field id to "rendered" flag for one step. Fields missing from the map are visible.
pub type FieldVisibilityMap = BTreeMap<&'static str, bool>;

/// Conditional fields on the general-requirements steps. Other steps have no conditional fields.
pub fn field_visibility(step: StepId, form: &FsApplicationFormData) -> FieldVisibilityMap {
    match step {
        StepId::IntroductionDisclosure => {
            let external = !form.contact_person_internal;
            FieldVisibilityMap::from([
                ("externalAdviserName", external),
                ("externalAdviserEmail", external),
                ("externalAdviserCompany", external),
                ("contactDfsaSection", !form.instructions_confirmed),
            ])
        }
        StepId::StandingData => {
            let licensed_firm = !form.is_representative_office;
            FieldVisibilityMap::from([
                ("legalStatus", licensed_firm),
                ("generalStructure", licensed_firm),
                ("registrationDetails", licensed_firm),
                ("registrationNumber", licensed_firm),
                ("registrationDate", licensed_firm),
                ("financialYearEnd", licensed_firm),
                ("listingExchange", form.publicly_listed),
            ])
        }
        StepId::OwnershipInformation => FieldVisibilityMap::from([
            ("ultimateHoldingCompany", form.is_part_of_group),
            ("groupStructureSection", form.is_part_of_group),
            ("listingExchange", form.publicly_listed),
        ]),
        StepId::ControllersGroupStructure => FieldVisibilityMap::from([
            ("controllersSection", form.has_controllers),
            ("controllersList", form.has_controllers),
            ("groupStructureDescription", form.is_part_of_group),
            ("groupStructureChart", form.is_part_of_group),
        ]),
        StepId::PermissionsFinancialServices => {
            let financial_services = form.is_activity_selected(ActivityCode::A1);
            let mut fields = FieldVisibilityMap::from([
                ("financialServicesMatrix", financial_services),
                ("matrixSection", financial_services),
                ("endorsementsSection", !form.is_representative_office),
            ]);
            for endorsement in EndorsementCode::ordered() {
                fields.insert(
                    endorsement.code(),
                    form.is_activity_selected(endorsement.depends_on()),
                );
            }
            fields
        }
        _ => FieldVisibilityMap::new(),
    }
}

pub fn is_field_visible(step: StepId, field: &str, form: &FsApplicationFormData) -> bool {
    field_visibility(step, form)
        .get(field)
        .copied()
        .unwrap_or(true)
}
