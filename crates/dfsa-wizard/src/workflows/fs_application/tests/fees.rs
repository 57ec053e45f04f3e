use super::common::*;
use crate::workflows::fs_application::codes::{
    ActivityCode, EndorsementCode, FinancialServiceCode, InvestmentType,
};
use crate::workflows::fs_application::domain::FsApplicationFormData;
use crate::workflows::fs_application::fees::{calculate_fees, FeeTier, FEE_CURRENCY};
use crate::workflows::fs_application::state::FormDataPatch;

#[test]
fn representative_office_pays_the_reduced_tier() {
    let form = FsApplicationFormData {
        is_representative_office: true,
        ..FsApplicationFormData::default()
    };

    let fees = calculate_fees(&form);

    assert_eq!(fees.application_fee, 5_000);
    assert_eq!(fees.annual_fee, 2_500);
    assert_eq!(fees.total_fee, 5_000);
    assert_eq!(fees.currency, "USD");
    assert_eq!(fees.tier, FeeTier::RepresentativeOffice);
    assert!(fees.endorsements.is_empty());
}

#[test]
fn banking_outranks_every_other_activity() {
    let form = FsApplicationFormData {
        financial_services_matrix: matrix(&[(FinancialServiceCode::FS1, InvestmentType::IT1)]),
        ..form_with(&[ActivityCode::A6, ActivityCode::A2, ActivityCode::A1])
    };

    let fees = calculate_fees(&form);

    assert_eq!(fees.tier, FeeTier::Category1);
    assert_eq!(fees.application_fee, 70_000);
    assert_eq!(fees.annual_fee, 50_000);
}

#[test]
fn financial_services_without_matrix_adds_islamic_surcharge() {
    let mut form = form_with(&[ActivityCode::A1]);
    form.endorsement_selections
        .set(EndorsementCode::IslamicFinance, true);

    let fees = calculate_fees(&form);

    assert_eq!(fees.tier, FeeTier::Category3C);
    assert_eq!(fees.application_fee, 15_000);
    assert_eq!(fees.total_fee, 15_000 + 5_000);
    assert_eq!(fees.annual_fee, 10_000);
    assert_eq!(fees.endorsement_total(), 5_000);
}

#[test]
fn either_insurance_activity_selects_category_two() {
    for activity in [ActivityCode::A2, ActivityCode::A3] {
        let fees = calculate_fees(&form_with(&[activity, ActivityCode::A1]));
        assert_eq!(fees.tier, FeeTier::Category2, "{activity:?}");
        assert_eq!(fees.application_fee, 50_000);
    }
}

#[test]
fn dealing_rows_take_priority_over_managing_rows() {
    let dealing_and_managing = FsApplicationFormData {
        financial_services_matrix: matrix(&[
            (FinancialServiceCode::FS4, InvestmentType::IT6),
            (FinancialServiceCode::FS2, InvestmentType::IT7),
        ]),
        ..form_with(&[ActivityCode::A1])
    };
    assert_eq!(calculate_fees(&dealing_and_managing).tier, FeeTier::Category3A);

    let managing_only = FsApplicationFormData {
        financial_services_matrix: matrix(&[(FinancialServiceCode::FS8, InvestmentType::IT6)]),
        ..form_with(&[ActivityCode::A1])
    };
    let fees = calculate_fees(&managing_only);
    assert_eq!(fees.tier, FeeTier::Category3B);
    assert_eq!(fees.application_fee, 20_000);
    assert_eq!(fees.annual_fee, 15_000);

    let advisory_only = FsApplicationFormData {
        financial_services_matrix: matrix(&[(FinancialServiceCode::FS5, InvestmentType::IT2)]),
        ..form_with(&[ActivityCode::A1])
    };
    assert_eq!(calculate_fees(&advisory_only).tier, FeeTier::Category3C);
}

#[test]
fn matrix_without_financial_services_is_ignored() {
    let form = FsApplicationFormData {
        financial_services_matrix: matrix(&[(FinancialServiceCode::FS1, InvestmentType::IT1)]),
        ..form_with(&[ActivityCode::A5])
    };

    let fees = calculate_fees(&form);

    assert_eq!(fees.tier, FeeTier::Default);
    assert_eq!(fees.application_fee, 15_000);
    assert_eq!(fees.annual_fee, 10_000);
}

#[test]
fn surcharges_apply_regardless_of_tier() {
    let mut form = FsApplicationFormData {
        is_representative_office: true,
        ..FsApplicationFormData::default()
    };
    form.endorsement_selections.set(EndorsementCode::Retail, true);
    form.endorsement_selections
        .set(EndorsementCode::IslamicFinance, true);
    form.endorsement_selections
        .set(EndorsementCode::ClientAssets, true);

    let fees = calculate_fees(&form);

    assert_eq!(fees.application_fee, 5_000);
    assert_eq!(fees.total_fee, 5_000 + 5_000 + 3_000);
    assert_eq!(fees.annual_fee, 2_500);
    assert_eq!(
        fees.endorsements
            .iter()
            .map(|line| line.endorsement)
            .collect::<Vec<_>>(),
        vec![EndorsementCode::IslamicFinance, EndorsementCode::Retail]
    );
}

#[test]
fn unknown_codes_do_not_contribute() {
    let form: FsApplicationFormData = serde_json::from_str(
        r#"{
            "activitySelections": {"A99": true, "Z1": true},
            "endorsementSelections": {"E9_A1": true},
            "financialServicesMatrix": {"FS42": ["IT1"]}
        }"#,
    )
    .expect("form parses");

    let fees = calculate_fees(&form);

    assert_eq!(fees.tier, FeeTier::Default);
    assert_eq!(fees.total_fee, 15_000);
    assert!(fees.endorsements.is_empty());
}

#[test]
fn calculation_is_idempotent() {
    let mut form = FsApplicationFormData {
        financial_services_matrix: matrix(&[(FinancialServiceCode::FS1, InvestmentType::IT3)]),
        ..form_with(&[ActivityCode::A1, ActivityCode::A5])
    };
    form.endorsement_selections.set(EndorsementCode::Retail, true);

    let first = calculate_fees(&form);
    let second = calculate_fees(&form);

    assert_eq!(first, second);
    assert_eq!(
        serde_json::to_vec(&first).expect("encodes"),
        serde_json::to_vec(&second).expect("encodes")
    );
}

#[test]
fn fee_summary_serializes_for_the_wizard_shell() {
    let encoded = serde_json::to_value(calculate_fees(&form_with(&[ActivityCode::A6])))
        .expect("fees encode");

    assert_eq!(encoded["applicationFee"], 70_000);
    assert_eq!(encoded["annualFee"], 50_000);
    assert_eq!(encoded["totalFee"], 70_000);
    assert_eq!(encoded["currency"], FEE_CURRENCY);
    assert_eq!(encoded["tier"], "category1");
}

#[test]
fn forms_echoing_the_shell_fee_summary_parse_and_recompute() {
    let form: FsApplicationFormData = serde_json::from_str(
        r#"{"isRepresentativeOffice": true,
            "feeCalculation": {"applicationFee": 5000, "annualFee": 2500,
                               "totalFee": 5000, "currency": "USD"}}"#,
    )
    .expect("form parses");

    let echoed = form.fee_calculation.as_ref().expect("summary kept");
    assert_eq!(echoed.total_fee, 5_000);
    assert!(echoed.endorsements.is_empty());
    assert_eq!(calculate_fees(&form).tier, FeeTier::RepresentativeOffice);

    let settled = form.merged_on(FormDataPatch::default(), today());
    assert_eq!(
        settled.fee_calculation.map(|fees| fees.tier),
        Some(FeeTier::RepresentativeOffice)
    );
}
