mod calculator;
mod schedule;

pub use calculator::calculate_fees;
pub use schedule::{endorsement_surcharge, FeeTier, FEE_CURRENCY};

use serde::{Deserialize, Serialize};

use super::codes::EndorsementCode;

/// Fee summary shown on the application fees step. The wizard shell sends it back without
/// `tier` or `endorsements`; both are recomputed whenever
/// the form changes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FeeCalculation {
    pub application_fee: u32,
    pub annual_fee: u32,
    pub total_fee: u32,
    pub currency: String,
    #[serde(default)]
    pub tier: FeeTier,
    #[serde(default)]
    pub endorsements: Vec<EndorsementFee>,
}

impl FeeCalculation {
    pub fn endorsement_total(&self) -> u32 {
        self.endorsements.iter().map(|line| line.amount).sum()
    }
}

/// One itemised endorsement surcharge.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EndorsementFee {
    pub endorsement: EndorsementCode,
    pub label: String,
    pub amount: u32,
}
