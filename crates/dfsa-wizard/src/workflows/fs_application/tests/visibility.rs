use std::collections::BTreeSet;

use super::common::*;
use crate::workflows::fs_application::codes::{
    ActivityCode, EndorsementCode, FinancialServiceCode, InvestmentType,
};
use crate::workflows::fs_application::domain::FsApplicationFormData;
use crate::workflows::fs_application::steps::{
    can_navigate_to_step, field_visibility, is_field_visible, is_step_visible,
    next_step_index, previous_step_index, progress_percent, visible_steps, StepId,
    WizardProgress, WizardStage,
};

const GENERAL: [StepId; 5] = [
    StepId::IntroductionDisclosure,
    StepId::StandingData,
    StepId::OwnershipInformation,
    StepId::ControllersGroupStructure,
    StepId::PermissionsFinancialServices,
];

fn sample_forms() -> Vec<FsApplicationFormData> {
    let mut orphaned = form_with(&[ActivityCode::A5]);
    orphaned
        .endorsement_selections
        .set(EndorsementCode::IslamicFinance, true);

    vec![
        FsApplicationFormData::default(),
        form_with(&[ActivityCode::A6]),
        form_with(&ActivityCode::ordered()),
        FsApplicationFormData {
            is_representative_office: true,
            ..form_with(&[ActivityCode::A1, ActivityCode::A2])
        },
        FsApplicationFormData {
            financial_services_matrix: matrix(&[
                (FinancialServiceCode::FS1, InvestmentType::IT1),
                (FinancialServiceCode::FS9, InvestmentType::IT6),
            ]),
            ..form_with(&[ActivityCode::A1])
        },
        orphaned,
    ]
}

#[test]
fn empty_form_shows_general_steps_and_finals() {
    let steps = visible_steps(&FsApplicationFormData::default());

    let mut expected = GENERAL.to_vec();
    expected.extend(StepId::finals());
    assert_eq!(steps, expected);
}

#[test]
fn finals_always_close_the_list() {
    for form in sample_forms() {
        let steps = visible_steps(&form);
        assert!(steps.len() >= 3);
        assert_eq!(&steps[steps.len() - 3..], &StepId::finals());
    }
}

#[test]
fn steps_are_ordered_and_unique() {
    for form in sample_forms() {
        let steps = visible_steps(&form);
        assert!(steps.windows(2).all(|pair| pair[0] < pair[1]), "{steps:?}");
    }
}

#[test]
fn representative_office_hides_activity_and_core_profile_steps() {
    let mut form = FsApplicationFormData {
        is_representative_office: true,
        financial_services_matrix: matrix(&[(FinancialServiceCode::FS4, InvestmentType::IT1)]),
        ..form_with(&[ActivityCode::A1, ActivityCode::A6, ActivityCode::A5])
    };
    form.endorsement_selections
        .set(EndorsementCode::IslamicFinance, true);

    let steps = visible_steps(&form);

    let mut expected = GENERAL.to_vec();
    expected.push(StepId::RepresentativeOffice);
    expected.extend(StepId::finals());
    assert_eq!(steps, expected);
    for step in StepId::core_profile() {
        assert!(!steps.contains(&step));
    }
}

#[test]
fn representative_office_step_needs_the_flag() {
    let steps = visible_steps(&form_with(&ActivityCode::ordered()));
    assert!(!steps.contains(&StepId::RepresentativeOffice));
}

#[test]
fn activities_contribute_their_dedicated_steps() {
    let cases = [
        (ActivityCode::A1, Some(StepId::FinancialServicesMatrix)),
        (ActivityCode::A2, Some(StepId::DirectInsurance)),
        (ActivityCode::A3, Some(StepId::InsuranceIntermediation)),
        (ActivityCode::A4, Some(StepId::Crowdfunding)),
        (ActivityCode::A5, Some(StepId::MoneyServices)),
        (ActivityCode::A6, Some(StepId::Banking)),
        (ActivityCode::A7, Some(StepId::FundManagement)),
        (ActivityCode::A8, None),
    ];

    for (activity, expected) in cases {
        let steps = visible_steps(&form_with(&[activity]));
        let activity_specific: Vec<StepId> = steps
            .iter()
            .copied()
            .filter(|step| step.stage() == WizardStage::ActivitySpecific)
            .collect();
        assert_eq!(activity_specific, expected.into_iter().collect::<Vec<_>>(), "{activity:?}");
        for step in StepId::core_profile() {
            assert!(steps.contains(&step), "{activity:?} should unlock {step:?}");
        }
    }
}

#[test]
fn matrix_rows_unlock_follow_up_steps() {
    let form = FsApplicationFormData {
        financial_services_matrix: matrix(&[
            (FinancialServiceCode::FS2, InvestmentType::IT7),
            (FinancialServiceCode::FS3, InvestmentType::IT1),
            (FinancialServiceCode::FS4, InvestmentType::IT6),
            (FinancialServiceCode::FS8, InvestmentType::IT6),
            (FinancialServiceCode::FS6, InvestmentType::IT1),
        ]),
        ..form_with(&[ActivityCode::A1, ActivityCode::A7])
    };

    let steps = visible_steps(&form);

    for step in [
        StepId::FinancialServicesMatrix,
        StepId::SalesTrading,
        StepId::AdvisingArranging,
        StepId::AssetManagement,
        StepId::FundManagement,
    ] {
        assert!(steps.contains(&step), "missing {step:?}");
    }
    assert_eq!(
        steps
            .iter()
            .filter(|step| **step == StepId::FundManagement)
            .count(),
        1
    );
    assert!(!steps.contains(&StepId::ClientAssets));
}

#[test]
fn matrix_without_financial_services_stays_hidden() {
    let form = FsApplicationFormData {
        financial_services_matrix: matrix(&[(FinancialServiceCode::FS1, InvestmentType::IT1)]),
        ..form_with(&[ActivityCode::A5])
    };

    let steps = visible_steps(&form);

    assert!(!steps.contains(&StepId::FinancialServicesMatrix));
    assert!(!steps.contains(&StepId::SalesTrading));
    assert!(!is_step_visible(StepId::SalesTrading, &form));
}

#[test]
fn endorsement_steps_require_flag_and_dependency() {
    let endorsement_steps = [
        (EndorsementCode::IslamicFinance, StepId::IslamicEndorsement),
        (EndorsementCode::Retail, StepId::RetailEndorsement),
        (EndorsementCode::ClientAssets, StepId::ClientAssets),
    ];

    for (endorsement, step) in endorsement_steps {
        for flag in [false, true] {
            for dependency_selected in [false, true] {
                let activities: Vec<ActivityCode> = if dependency_selected {
                    vec![endorsement.depends_on(), ActivityCode::A8]
                } else {
                    vec![ActivityCode::A8]
                };
                let mut form = form_with(&activities);
                form.endorsement_selections.set(endorsement, flag);

                assert_eq!(
                    is_step_visible(step, &form),
                    flag && dependency_selected,
                    "{endorsement:?} flag={flag} dependency={dependency_selected}"
                );
            }
        }
    }
}

#[test]
fn core_profile_needs_a_recognised_activity() {
    let form: FsApplicationFormData =
        serde_json::from_str(r#"{"activitySelections": {"A99": true, "A1": false}}"#)
            .expect("form parses");

    let steps = visible_steps(&form);

    assert!(!steps.contains(&StepId::BusinessPlan));
    assert_eq!(steps.len(), GENERAL.len() + 3);
}

#[test]
fn conditional_fields_follow_their_toggles() {
    let mut form = FsApplicationFormData::default();
    assert!(!is_field_visible(
        StepId::IntroductionDisclosure,
        "externalAdviserName",
        &form
    ));
    assert!(is_field_visible(
        StepId::IntroductionDisclosure,
        "contactDfsaSection",
        &form
    ));

    form.contact_person_internal = false;
    form.publicly_listed = true;
    form.is_representative_office = true;

    assert!(is_field_visible(
        StepId::IntroductionDisclosure,
        "externalAdviserEmail",
        &form
    ));
    assert!(is_field_visible(StepId::StandingData, "listingExchange", &form));
    assert!(!is_field_visible(StepId::StandingData, "legalStatus", &form));
    assert!(!is_field_visible(
        StepId::PermissionsFinancialServices,
        "endorsementsSection",
        &form
    ));
}

#[test]
fn endorsement_checkboxes_follow_their_activity() {
    let fields = field_visibility(
        StepId::PermissionsFinancialServices,
        &form_with(&[ActivityCode::A5]),
    );

    assert_eq!(fields.get("E1_A1"), Some(&false));
    assert_eq!(fields.get("E2_A1"), Some(&false));
    assert_eq!(fields.get("E2_A5"), Some(&true));
    assert_eq!(fields.get("matrixSection"), Some(&false));
}

#[test]
fn fields_without_rules_default_to_visible() {
    let form = FsApplicationFormData::default();
    assert!(field_visibility(StepId::Banking, &form).is_empty());
    assert!(is_field_visible(StepId::Banking, "acceptsDeposits", &form));
    assert!(is_field_visible(StepId::StandingData, "firmName", &form));
}

#[test]
fn progress_counts_only_applicable_steps() {
    let applicable = visible_steps(&FsApplicationFormData::default());
    let completed: BTreeSet<StepId> = [
        StepId::IntroductionDisclosure,
        StepId::StandingData,
        StepId::Banking,
    ]
    .into_iter()
    .collect();

    // 2 of 8 visible steps.
    assert_eq!(progress_percent(&completed, &applicable), 25);
    assert_eq!(progress_percent(&completed, &[]), 0);

    let everything: BTreeSet<StepId> = StepId::ordered().into_iter().collect();
    assert_eq!(progress_percent(&everything, &applicable), 100);
}

#[test]
fn forward_navigation_requires_completed_predecessors() {
    let applicable = visible_steps(&FsApplicationFormData::default());
    let mut completed = BTreeSet::new();

    assert!(can_navigate_to_step(0, 2, &completed, &applicable));
    assert!(!can_navigate_to_step(2, 0, &completed, &applicable));

    completed.insert(StepId::IntroductionDisclosure);
    completed.insert(StepId::StandingData);
    assert!(can_navigate_to_step(2, 0, &completed, &applicable));
    assert!(!can_navigate_to_step(3, 0, &completed, &applicable));
}

#[test]
fn step_indices_stay_in_bounds() {
    let applicable = visible_steps(&FsApplicationFormData::default());

    assert_eq!(next_step_index(0, &applicable), Some(1));
    assert_eq!(next_step_index(applicable.len() - 1, &applicable), None);
    assert_eq!(previous_step_index(3), Some(2));
    assert_eq!(previous_step_index(0), None);

    let mut progress = WizardProgress {
        current_step_index: 15,
        ..WizardProgress::default()
    };
    progress.clamp_to(&applicable);
    assert_eq!(progress.current_step_index, applicable.len() - 1);
}
