use super::super::codes::{ActivityCode, FinancialServiceCode};
use super::super::domain::FsApplicationFormData;
use super::schedule::{endorsement_surcharge, FeeTier, FEE_CURRENCY};
use super::{EndorsementFee, FeeCalculation};

type TierPredicate = fn(&FsApplicationFormData) -> bool;

/// Base tier rules, highest priority first. The first predicate that holds picks the tier.
const TIER_RULES: [(TierPredicate, FeeTier); 6] = [
    (is_representative_office, FeeTier::RepresentativeOffice),
    (has_banking, FeeTier::Category1),
    (has_insurance, FeeTier::Category2),
    (has_dealing_services, FeeTier::Category3A),
    (has_managing_services, FeeTier::Category3B),
    (has_financial_services, FeeTier::Category3C),
];

fn is_representative_office(form: &FsApplicationFormData) -> bool {
    form.is_representative_office
}

fn has_banking(form: &FsApplicationFormData) -> bool {
    form.is_activity_selected(ActivityCode::A6)
}

fn has_insurance(form: &FsApplicationFormData) -> bool {
    form.is_activity_selected(ActivityCode::A2) || form.is_activity_selected(ActivityCode::A3)
}

fn has_financial_services(form: &FsApplicationFormData) -> bool {
    form.is_activity_selected(ActivityCode::A1)
}

fn has_dealing_services(form: &FsApplicationFormData) -> bool {
    has_financial_services(form) && matrix_has(form, FinancialServiceCode::is_dealing)
}

fn has_managing_services(form: &FsApplicationFormData) -> bool {
    has_financial_services(form) && matrix_has(form, FinancialServiceCode::is_managing)
}

fn matrix_has(form: &FsApplicationFormData, class: fn(FinancialServiceCode) -> bool) -> bool {
    form.financial_services_matrix.active_services().any(class)
}

pub(crate) fn base_tier(form: &FsApplicationFormData) -> FeeTier {
    TIER_RULES
        .iter()
        .find(|(applies, _)| applies(form))
        .map(|(_, tier)| *tier)
        .unwrap_or(FeeTier::Default)
}

/// Derive the application fee summary from the current answers.
///
/// Pure and total: incomplete selections fall through to the standard tier and
/// unrecognised codes never contribute.
pub fn calculate_fees(form: &FsApplicationFormData) -> FeeCalculation {
    let tier = base_tier(form);

    let endorsements: Vec<EndorsementFee> = form
        .endorsement_selections
        .selected()
        .filter_map(|endorsement| {
            endorsement_surcharge(endorsement).map(|amount| EndorsementFee {
                endorsement,
                label: endorsement.label().to_string(),
                amount,
            })
        })
        .collect();

    let surcharges: u32 = endorsements.iter().map(|line| line.amount).sum();
    let application_fee = tier.application_fee();

    FeeCalculation {
        application_fee,
        annual_fee: tier.annual_fee(),
        total_fee: application_fee + surcharges,
        currency: FEE_CURRENCY.to_string(),
        tier,
        endorsements,
    }
}
