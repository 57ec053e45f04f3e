use std::collections::{BTreeMap, BTreeSet};

use serde::{Deserialize, Serialize};

/// Regulated activity sectors offered on the permissions step.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum ActivityCode {
    A1,
    A2,
    A3,
    A4,
    A5,
    A6,
    A7,
    A8,
}

impl ActivityCode {
    pub const fn ordered() -> [Self; 8] {
        [
            Self::A1,
            Self::A2,
            Self::A3,
            Self::A4,
            Self::A5,
            Self::A6,
            Self::A7,
            Self::A8,
        ]
    }

    pub const fn code(self) -> &'static str {
        match self {
            Self::A1 => "A1",
            Self::A2 => "A2",
            Self::A3 => "A3",
            Self::A4 => "A4",
            Self::A5 => "A5",
            Self::A6 => "A6",
            Self::A7 => "A7",
            Self::A8 => "A8",
        }
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::A1 => "Financial Services",
            Self::A2 => "Insurance Business",
            Self::A3 => "Insurance Intermediation",
            Self::A4 => "Crowdfunding",
            Self::A5 => "Money Services",
            Self::A6 => "Banking Business",
            Self::A7 => "Fund Management",
            Self::A8 => "Operating an Exchange",
        }
    }

    pub fn parse(raw: &str) -> Option<Self> {
        Self::ordered()
            .into_iter()
            .find(|activity| activity.code().eq_ignore_ascii_case(raw.trim()))
    }
}

/// Rows of the financial services matrix, only applicable under activity A1.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum FinancialServiceCode {
    FS1,
    FS2,
    FS3,
    FS4,
    FS5,
    FS6,
    FS7,
    FS8,
    FS9,
}

impl FinancialServiceCode {
    pub const fn ordered() -> [Self; 9] {
        [
            Self::FS1,
            Self::FS2,
            Self::FS3,
            Self::FS4,
            Self::FS5,
            Self::FS6,
            Self::FS7,
            Self::FS8,
            Self::FS9,
        ]
    }

    pub const fn code(self) -> &'static str {
        match self {
            Self::FS1 => "FS1",
            Self::FS2 => "FS2",
            Self::FS3 => "FS3",
            Self::FS4 => "FS4",
            Self::FS5 => "FS5",
            Self::FS6 => "FS6",
            Self::FS7 => "FS7",
            Self::FS8 => "FS8",
            Self::FS9 => "FS9",
        }
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::FS1 => "Dealing in Investments as Principal",
            Self::FS2 => "Dealing in Investments as Agent",
            Self::FS3 => "Arranging Deals in Investments",
            Self::FS4 => "Managing Assets",
            Self::FS5 => "Advising on Financial Products",
            Self::FS6 => "Custody of Investments",
            Self::FS7 => "Arranging Custody",
            Self::FS8 => "Operating a Collective Investment Fund",
            Self::FS9 => "Providing Fund Administration",
        }
    }

    /// Dealing services place an A1 applicant in the Category 3A fee tier.
    pub const fn is_dealing(self) -> bool {
        matches!(self, Self::FS1 | Self::FS2)
    }

    /// Managing services place an A1 applicant in the Category 3B fee tier.
    pub const fn is_managing(self) -> bool {
        matches!(self, Self::FS4 | Self::FS8)
    }

    pub fn parse(raw: &str) -> Option<Self> {
        Self::ordered()
            .into_iter()
            .find(|service| service.code().eq_ignore_ascii_case(raw.trim()))
    }
}

/// Columns of the financial services matrix.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum InvestmentType {
    IT1,
    IT2,
    IT3,
    IT4,
    IT5,
    IT6,
    IT7,
    IT8,
    IT9,
    IT10,
    IT11,
}

impl InvestmentType {
    pub const fn ordered() -> [Self; 11] {
        [
            Self::IT1,
            Self::IT2,
            Self::IT3,
            Self::IT4,
            Self::IT5,
            Self::IT6,
            Self::IT7,
            Self::IT8,
            Self::IT9,
            Self::IT10,
            Self::IT11,
        ]
    }

    pub const fn code(self) -> &'static str {
        match self {
            Self::IT1 => "IT1",
            Self::IT2 => "IT2",
            Self::IT3 => "IT3",
            Self::IT4 => "IT4",
            Self::IT5 => "IT5",
            Self::IT6 => "IT6",
            Self::IT7 => "IT7",
            Self::IT8 => "IT8",
            Self::IT9 => "IT9",
            Self::IT10 => "IT10",
            Self::IT11 => "IT11",
        }
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::IT1 => "Shares",
            Self::IT2 => "Debentures",
            Self::IT3 => "Government & Public Securities",
            Self::IT4 => "Warrants",
            Self::IT5 => "Certificates",
            Self::IT6 => "Units in Collective Investment Fund",
            Self::IT7 => "Options",
            Self::IT8 => "Futures",
            Self::IT9 => "Contracts for Differences",
            Self::IT10 => "Swaps",
            Self::IT11 => "Profit Sharing Investment Accounts",
        }
    }

    pub fn parse(raw: &str) -> Option<Self> {
        Self::ordered()
            .into_iter()
            .find(|investment| investment.code().eq_ignore_ascii_case(raw.trim()))
    }
}

/// Additional permissions layered on top of a selected activity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum EndorsementCode {
    #[serde(rename = "E1_A1")]
    IslamicFinance,
    #[serde(rename = "E2_A1")]
    Retail,
    #[serde(rename = "E2_A5")]
    ClientAssets,
}

impl EndorsementCode {
    pub const fn ordered() -> [Self; 3] {
        [Self::IslamicFinance, Self::Retail, Self::ClientAssets]
    }

    pub const fn code(self) -> &'static str {
        match self {
            Self::IslamicFinance => "E1_A1",
            Self::Retail => "E2_A1",
            Self::ClientAssets => "E2_A5",
        }
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::IslamicFinance => "Islamic Financial Business Endorsement",
            Self::Retail => "Retail Endorsement",
            Self::ClientAssets => "Client Assets Endorsement",
        }
    }

    /// Activity that must stay selected for the endorsement to apply.
    pub const fn depends_on(self) -> ActivityCode {
        match self {
            Self::IslamicFinance | Self::Retail => ActivityCode::A1,
            Self::ClientAssets => ActivityCode::A5,
        }
    }

    pub fn parse(raw: &str) -> Option<Self> {
        Self::ordered()
            .into_iter()
            .find(|endorsement| endorsement.code().eq_ignore_ascii_case(raw.trim()))
    }
}

/// Activity code to "selected" flag. Keys are stored verbatim so drafts carrying codes this
/// build does not know about still round-trip; only recognised codes are ever consulted.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ActivitySelections(BTreeMap<String, bool>);

impl ActivitySelections {
    pub fn is_selected(&self, activity: ActivityCode) -> bool {
        self.0.get(activity.code()).copied().unwrap_or(false)
    }

    pub fn set(&mut self, activity: ActivityCode, selected: bool) {
        self.0.insert(activity.code().to_string(), selected);
    }

    pub fn with(mut self, activity: ActivityCode, selected: bool) -> Self {
        self.set(activity, selected);
        self
    }

    pub fn selected(&self) -> impl Iterator<Item = ActivityCode> + '_ {
        ActivityCode::ordered()
            .into_iter()
            .filter(|activity| self.is_selected(*activity))
    }

    pub fn any_selected(&self) -> bool {
        self.selected().next().is_some()
    }

    pub fn raw(&self) -> &BTreeMap<String, bool> {
        &self.0
    }
}

impl FromIterator<(ActivityCode, bool)> for ActivitySelections {
    fn from_iter<I: IntoIterator<Item = (ActivityCode, bool)>>(iter: I) -> Self {
        iter.into_iter()
            .fold(Self::default(), |selections, (activity, selected)| {
                selections.with(activity, selected)
            })
    }
}

/// Financial service code to the investment types selected under it.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FinancialServicesMatrix(BTreeMap<String, BTreeSet<String>>);

impl FinancialServicesMatrix {
    /// True when at least one recognised investment type sits under the service row.
    pub fn has_selections(&self, service: FinancialServiceCode) -> bool {
        self.0
            .get(service.code())
            .map(|types| types.iter().any(|raw| InvestmentType::parse(raw).is_some()))
            .unwrap_or(false)
    }

    pub fn contains(&self, service: FinancialServiceCode, investment: InvestmentType) -> bool {
        self.0
            .get(service.code())
            .map(|types| types.contains(investment.code()))
            .unwrap_or(false)
    }

    pub fn set(
        &mut self,
        service: FinancialServiceCode,
        investment: InvestmentType,
        selected: bool,
    ) {
        if selected {
            self.0
                .entry(service.code().to_string())
                .or_default()
                .insert(investment.code().to_string());
        } else if let Some(types) = self.0.get_mut(service.code()) {
            types.remove(investment.code());
            if types.is_empty() {
                self.0.remove(service.code());
            }
        }
    }

    pub fn with(mut self, service: FinancialServiceCode, investment: InvestmentType) -> Self {
        self.set(service, investment, true);
        self
    }

    pub fn active_services(&self) -> impl Iterator<Item = FinancialServiceCode> + '_ {
        FinancialServiceCode::ordered()
            .into_iter()
            .filter(|service| self.has_selections(*service))
    }

    pub fn is_empty(&self) -> bool {
        self.0.values().all(BTreeSet::is_empty)
    }

    pub fn clear(&mut self) {
        self.0.clear();
    }

    pub fn raw(&self) -> &BTreeMap<String, BTreeSet<String>> {
        &self.0
    }
}

/// Endorsement code to "requested" flag.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EndorsementSelections(BTreeMap<String, bool>);

impl EndorsementSelections {
    pub fn is_selected(&self, endorsement: EndorsementCode) -> bool {
        self.0.get(endorsement.code()).copied().unwrap_or(false)
    }

    pub fn set(&mut self, endorsement: EndorsementCode, selected: bool) {
        self.0.insert(endorsement.code().to_string(), selected);
    }

    pub fn with(mut self, endorsement: EndorsementCode, selected: bool) -> Self {
        self.set(endorsement, selected);
        self
    }

    pub fn clear(&mut self, endorsement: EndorsementCode) {
        self.0.remove(endorsement.code());
    }

    pub fn selected(&self) -> impl Iterator<Item = EndorsementCode> + '_ {
        EndorsementCode::ordered()
            .into_iter()
            .filter(|endorsement| self.is_selected(*endorsement))
    }

    pub fn raw(&self) -> &BTreeMap<String, bool> {
        &self.0
    }
}

impl FromIterator<(EndorsementCode, bool)> for EndorsementSelections {
    fn from_iter<I: IntoIterator<Item = (EndorsementCode, bool)>>(iter: I) -> Self {
        iter.into_iter()
            .fold(Self::default(), |selections, (endorsement, selected)| {
                selections.with(endorsement, selected)
            })
    }
}
