use serde::{Deserialize, Serialize};

/// Wizard stages, rendered as section headers by the shell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WizardStage {
    GeneralRequirements,
    ActivitySpecific,
    CoreProfile,
    FinalSubmission,
}

impl WizardStage {
    pub const fn ordered() -> [Self; 4] {
        [
            Self::GeneralRequirements,
            Self::ActivitySpecific,
            Self::CoreProfile,
            Self::FinalSubmission,
        ]
    }

    pub const fn number(self) -> u8 {
        match self {
            Self::GeneralRequirements => 1,
            Self::ActivitySpecific => 2,
            Self::CoreProfile => 3,
            Self::FinalSubmission => 4,
        }
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::GeneralRequirements => "General Requirements",
            Self::ActivitySpecific => "Activity-Specific Information",
            Self::CoreProfile => "Core Profile",
            Self::FinalSubmission => "Final Submission",
        }
    }
}

/// Every screen the wizard can show. Declaration order is display order, so the derived
/// `Ord` doubles as the catalogue ordering.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum StepId {
    #[serde(rename = "step-1-1")]
    IntroductionDisclosure,
    #[serde(rename = "step-1-2")]
    StandingData,
    #[serde(rename = "step-1-3")]
    OwnershipInformation,
    #[serde(rename = "step-1-4")]
    ControllersGroupStructure,
    #[serde(rename = "step-1-5")]
    PermissionsFinancialServices,
    #[serde(rename = "step-2-0")]
    FinancialServicesMatrix,
    #[serde(rename = "step-2-1")]
    FundManagement,
    #[serde(rename = "step-2-2")]
    RepresentativeOffice,
    #[serde(rename = "step-2-3")]
    IslamicEndorsement,
    #[serde(rename = "step-2-4")]
    AdvisingArranging,
    #[serde(rename = "step-2-5")]
    InsuranceIntermediation,
    #[serde(rename = "step-2-6")]
    AssetManagement,
    #[serde(rename = "step-2-7")]
    SalesTrading,
    #[serde(rename = "step-2-10")]
    MoneyServices,
    #[serde(rename = "step-2-11")]
    DirectInsurance,
    #[serde(rename = "step-2-12")]
    Banking,
    #[serde(rename = "step-2-13")]
    RetailEndorsement,
    #[serde(rename = "step-2-14")]
    ClientAssets,
    #[serde(rename = "step-2-21")]
    Crowdfunding,
    #[serde(rename = "step-3-1")]
    BusinessPlan,
    #[serde(rename = "step-3-2")]
    Clients,
    #[serde(rename = "step-3-4")]
    RiskManagementCompliance,
    #[serde(rename = "step-3-5")]
    Governance,
    #[serde(rename = "step-4-1")]
    WaiversModifications,
    #[serde(rename = "step-4-2")]
    ApplicationFees,
    #[serde(rename = "step-4-3")]
    FitProperDeclarations,
}

impl StepId {
    pub const fn ordered() -> [Self; 26] {
        [
            Self::IntroductionDisclosure,
            Self::StandingData,
            Self::OwnershipInformation,
            Self::ControllersGroupStructure,
            Self::PermissionsFinancialServices,
            Self::FinancialServicesMatrix,
            Self::FundManagement,
            Self::RepresentativeOffice,
            Self::IslamicEndorsement,
            Self::AdvisingArranging,
            Self::InsuranceIntermediation,
            Self::AssetManagement,
            Self::SalesTrading,
            Self::MoneyServices,
            Self::DirectInsurance,
            Self::Banking,
            Self::RetailEndorsement,
            Self::ClientAssets,
            Self::Crowdfunding,
            Self::BusinessPlan,
            Self::Clients,
            Self::RiskManagementCompliance,
            Self::Governance,
            Self::WaiversModifications,
            Self::ApplicationFees,
            Self::FitProperDeclarations,
        ]
    }

    /// Steps that close every application, in the order they must appear.
    pub const fn finals() -> [Self; 3] {
        [
            Self::WaiversModifications,
            Self::ApplicationFees,
            Self::FitProperDeclarations,
        ]
    }

    pub const fn core_profile() -> [Self; 4] {
        [
            Self::BusinessPlan,
            Self::Clients,
            Self::RiskManagementCompliance,
            Self::Governance,
        ]
    }

    pub const fn id(self) -> &'static str {
        match self {
            Self::IntroductionDisclosure => "step-1-1",
            Self::StandingData => "step-1-2",
            Self::OwnershipInformation => "step-1-3",
            Self::ControllersGroupStructure => "step-1-4",
            Self::PermissionsFinancialServices => "step-1-5",
            Self::FinancialServicesMatrix => "step-2-0",
            Self::FundManagement => "step-2-1",
            Self::RepresentativeOffice => "step-2-2",
            Self::IslamicEndorsement => "step-2-3",
            Self::AdvisingArranging => "step-2-4",
            Self::InsuranceIntermediation => "step-2-5",
            Self::AssetManagement => "step-2-6",
            Self::SalesTrading => "step-2-7",
            Self::MoneyServices => "step-2-10",
            Self::DirectInsurance => "step-2-11",
            Self::Banking => "step-2-12",
            Self::RetailEndorsement => "step-2-13",
            Self::ClientAssets => "step-2-14",
            Self::Crowdfunding => "step-2-21",
            Self::BusinessPlan => "step-3-1",
            Self::Clients => "step-3-2",
            Self::RiskManagementCompliance => "step-3-4",
            Self::Governance => "step-3-5",
            Self::WaiversModifications => "step-4-1",
            Self::ApplicationFees => "step-4-2",
            Self::FitProperDeclarations => "step-4-3",
        }
    }

    pub const fn name(self) -> &'static str {
        match self {
            Self::IntroductionDisclosure => "Introduction & Disclosure",
            Self::StandingData => "Standing Data",
            Self::OwnershipInformation => "Ownership Information",
            Self::ControllersGroupStructure => "Controllers & Group Structure",
            Self::PermissionsFinancialServices => "Permissions & Financial Services",
            Self::FinancialServicesMatrix => "Financial Services Matrix",
            Self::FundManagement => "Fund Management",
            Self::RepresentativeOffice => "Representative Office",
            Self::IslamicEndorsement => "Islamic Endorsement",
            Self::AdvisingArranging => "Advising & Arranging",
            Self::InsuranceIntermediation => "Insurance Intermediation",
            Self::AssetManagement => "Asset Management",
            Self::SalesTrading => "Sales & Trading",
            Self::MoneyServices => "Money Services",
            Self::DirectInsurance => "Direct Insurance",
            Self::Banking => "Banking",
            Self::RetailEndorsement => "Retail Endorsement",
            Self::ClientAssets => "Client Assets",
            Self::Crowdfunding => "Crowdfunding",
            Self::BusinessPlan => "Business Plan",
            Self::Clients => "Clients",
            Self::RiskManagementCompliance => "Risk Management & Compliance",
            Self::Governance => "Governance",
            Self::WaiversModifications => "Waivers & Modifications",
            Self::ApplicationFees => "Application Fees",
            Self::FitProperDeclarations => "Fit & Proper Declarations",
        }
    }

    pub const fn stage(self) -> WizardStage {
        match self {
            Self::IntroductionDisclosure
            | Self::StandingData
            | Self::OwnershipInformation
            | Self::ControllersGroupStructure
            | Self::PermissionsFinancialServices => WizardStage::GeneralRequirements,
            Self::BusinessPlan
            | Self::Clients
            | Self::RiskManagementCompliance
            | Self::Governance => WizardStage::CoreProfile,
            Self::WaiversModifications | Self::ApplicationFees | Self::FitProperDeclarations => {
                WizardStage::FinalSubmission
            }
            _ => WizardStage::ActivitySpecific,
        }
    }

    pub fn parse(raw: &str) -> Option<Self> {
        let raw = raw.trim();
        Self::ordered().into_iter().find(|step| step.id() == raw)
    }

    pub fn definition(self) -> StepDefinition {
        StepDefinition {
            id: self,
            stage: self.stage(),
            stage_number: self.stage().number(),
            name: self.name(),
        }
    }
}

/// Serializable catalogue entry handed to the wizard shell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StepDefinition {
    pub id: StepId,
    pub stage: WizardStage,
    pub stage_number: u8,
    pub name: &'static str,
}

pub fn steps_in_stage(stage: WizardStage) -> Vec<StepDefinition> {
    StepId::ordered()
        .into_iter()
        .filter(|step| step.stage() == stage)
        .map(StepId::definition)
        .collect()
}
