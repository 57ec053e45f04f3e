use serde::{Deserialize, Serialize};

use super::super::codes::EndorsementCode;

pub const FEE_CURRENCY: &str = "USD";

/// Licence fee tiers, each an (application, annual) pair in whole US dollars.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FeeTier {
    Category1,
    Category2,
    Category3A,
    Category3B,
    Category3C,
    RepresentativeOffice,
    #[default]
    Default,
}

impl FeeTier {
    pub const fn application_fee(self) -> u32 {
        match self {
            Self::Category1 => 70_000,
            Self::Category2 => 50_000,
            Self::Category3A => 25_000,
            Self::Category3B => 20_000,
            Self::Category3C => 15_000,
            Self::RepresentativeOffice => 5_000,
            Self::Default => 15_000,
        }
    }

    pub const fn annual_fee(self) -> u32 {
        match self {
            Self::Category1 => 50_000,
            Self::Category2 => 35_000,
            Self::Category3A => 20_000,
            Self::Category3B => 15_000,
            Self::Category3C => 10_000,
            Self::RepresentativeOffice => 2_500,
            Self::Default => 10_000,
        }
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::Category1 => "Category 1",
            Self::Category2 => "Category 2",
            Self::Category3A => "Category 3A",
            Self::Category3B => "Category 3B",
            Self::Category3C => "Category 3C",
            Self::RepresentativeOffice => "Representative Office",
            Self::Default => "Standard",
        }
    }
}

/// Flat one-off surcharge for requesting an endorsement. Endorsements without an entry are free.
pub const fn endorsement_surcharge(endorsement: EndorsementCode) -> Option<u32> {
    match endorsement {
        EndorsementCode::IslamicFinance => Some(5_000),
        EndorsementCode::Retail => Some(3_000),
        EndorsementCode::ClientAssets => None,
    }
}
