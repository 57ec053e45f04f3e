use chrono::NaiveDate;

use super::super::codes::{ActivityCode, EndorsementCode};
use super::super::domain::FsApplicationFormData;
use super::super::fees::calculate_fees;

/// Bring `next` back in line with the form invariants after an edit away from `previous`.
///
/// Only transitions trigger clears: a matrix stored while A1 was never selected is left alone.
pub(crate) fn settle(
    previous: &FsApplicationFormData,
    mut next: FsApplicationFormData,
    today: NaiveDate,
) -> FsApplicationFormData {
    for activity in ActivityCode::ordered() {
        if previous.is_activity_selected(activity) && !next.is_activity_selected(activity) {
            drop_dependents(&mut next, activity);
        }
    }

    // A stored date belongs to the signature it was stamped for; unsigning discards it.
    for declaration in &mut next.individual_declarations {
        if !declaration.declaration_signed {
            declaration.signed_date = None;
        } else if declaration.signed_date.is_none() {
            declaration.signed_date = Some(today);
        }
    }

    next.fee_calculation = Some(calculate_fees(&next));
    next
}

fn drop_dependents(form: &mut FsApplicationFormData, activity: ActivityCode) {
    if activity == ActivityCode::A1 {
        form.financial_services_matrix.clear();
    }

    for endorsement in EndorsementCode::ordered() {
        if endorsement.depends_on() == activity {
            form.endorsement_selections.clear(endorsement);
        }
    }
}
