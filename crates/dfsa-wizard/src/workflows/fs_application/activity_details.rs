//! Per-activity answers collected on the stage-two screens.
//!
//! Each screen owns one record type; `ActivityDetails` tags them so the form can keep every
//! screen's answers in a single map keyed by `StepId`.

use serde::{Deserialize, Serialize};

use super::steps::StepId;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ActivityDetails {
    RepresentativeOffice(RepresentativeOfficeDetails),
    FundManagement(FundManagementDetails),
    IslamicEndorsement(IslamicEndorsementDetails),
    AdvisingArranging(AdvisingArrangingDetails),
    InsuranceIntermediation(InsuranceIntermediationDetails),
    AssetManagement(AssetManagementDetails),
    SalesTrading(SalesTradingDetails),
    MoneyServices(MoneyServicesDetails),
    DirectInsurance(DirectInsuranceDetails),
    Banking(BankingDetails),
    RetailEndorsement(RetailEndorsementDetails),
    ClientAssets(ClientAssetsDetails),
    Crowdfunding(CrowdfundingDetails),
}

impl ActivityDetails {
    /// Screen that collects this record.
    pub const fn step(&self) -> StepId {
        match self {
            Self::RepresentativeOffice(_) => StepId::RepresentativeOffice,
            Self::FundManagement(_) => StepId::FundManagement,
            Self::IslamicEndorsement(_) => StepId::IslamicEndorsement,
            Self::AdvisingArranging(_) => StepId::AdvisingArranging,
            Self::InsuranceIntermediation(_) => StepId::InsuranceIntermediation,
            Self::AssetManagement(_) => StepId::AssetManagement,
            Self::SalesTrading(_) => StepId::SalesTrading,
            Self::MoneyServices(_) => StepId::MoneyServices,
            Self::DirectInsurance(_) => StepId::DirectInsurance,
            Self::Banking(_) => StepId::Banking,
            Self::RetailEndorsement(_) => StepId::RetailEndorsement,
            Self::ClientAssets(_) => StepId::ClientAssets,
            Self::Crowdfunding(_) => StepId::Crowdfunding,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct RepresentativeOfficeDetails {
    pub parent_company_name: String,
    pub parent_company_country: String,
    pub parent_regulator: String,
    pub parent_license_number: String,
    pub head_of_office: String,
    pub planned_activities: Vec<String>,
    pub proposed_staff_count: u32,
    pub confirm_no_regulated_activities: bool,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct FundManagementDetails {
    pub fund_type: String,
    pub investment_strategy: String,
    pub target_fund_size: u64,
    pub custodian_name: String,
    pub fund_administrator: String,
    pub auditor_name: String,
    pub has_existing_funds: bool,
    pub target_retail_investors: bool,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct IslamicEndorsementDetails {
    pub sharia_governance_model: String,
    pub ssb_member_count: u8,
    pub ssb_meeting_frequency: String,
    pub planned_products: Vec<String>,
    pub has_written_sharia_policy: bool,
    pub has_internal_sharia_review: bool,
    pub confirm_sharia_compliance: bool,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct AdvisingArrangingDetails {
    pub advisory_services: Vec<String>,
    pub arranging_services: Vec<String>,
    pub primary_client_category: String,
    pub remuneration_model: String,
    pub receives_third_party_payments: bool,
    pub has_written_conflicts_policy: bool,
    pub confirm_suitability_assessment: bool,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct InsuranceIntermediationDetails {
    pub intermediary_type: String,
    pub insurance_classes: Vec<String>,
    pub insurer_count: u32,
    pub has_binding_authority: bool,
    pub has_pi_insurance: bool,
    pub pi_insurance_limit: u64,
    pub confirm_client_money_compliance: bool,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct AssetManagementDetails {
    pub asset_classes: Vec<String>,
    pub management_style: String,
    pub current_aum: u64,
    pub target_aum: u64,
    pub uses_derivatives: bool,
    pub has_risk_committee: bool,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct SalesTradingDetails {
    pub trading_types: Vec<String>,
    pub products: Vec<String>,
    pub primary_execution_venue: String,
    pub clearing_broker: String,
    pub has_best_execution_policy: bool,
    pub has_pre_trade_controls: bool,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct MoneyServicesDetails {
    pub service_types: Vec<String>,
    pub corridors: Vec<String>,
    pub settlement_bank: String,
    pub expected_volume: u64,
    pub has_mlro: bool,
    pub mlro_name: String,
    pub has_sanctions_screening: bool,
    pub has_transaction_monitoring: bool,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct DirectInsuranceDetails {
    pub business_type: String,
    pub general_classes: Vec<String>,
    pub life_classes: Vec<String>,
    pub projected_gwp: u64,
    pub proposed_capital: u64,
    pub has_actuary: bool,
    pub has_reinsurance: bool,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct BankingDetails {
    pub services: Vec<String>,
    pub client_segments: Vec<String>,
    pub accepts_deposits: bool,
    pub deposit_types: String,
    pub projected_deposits: u64,
    pub proposed_capital: u64,
    pub has_alco: bool,
    pub confirm_prudential_compliance: bool,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct RetailEndorsementDetails {
    pub retail_services: Vec<String>,
    pub expected_retail_clients: u32,
    pub minimum_investment: u64,
    pub has_suitability_process: bool,
    pub has_complaints_process: bool,
    pub has_risk_warnings: bool,
    pub confirm_retail_compliance: bool,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ClientAssetsDetails {
    pub asset_types: Vec<String>,
    pub custody_model: String,
    pub segregation_method: String,
    pub uses_sub_custodians: bool,
    pub sub_custodians: Vec<String>,
    pub has_reconciliation: bool,
    pub reconciliation_frequency: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct CrowdfundingDetails {
    pub platform_name: String,
    pub platform_url: String,
    pub crowdfunding_type: String,
    pub investor_categories: Vec<String>,
    pub max_offering_size: u64,
    pub has_cooling_off_period: bool,
    pub cooling_off_days: u8,
    pub has_client_money_arrangements: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn details_are_tagged_by_kind() {
        let details = ActivityDetails::Banking(BankingDetails {
            accepts_deposits: true,
            proposed_capital: 10_000_000,
            ..BankingDetails::default()
        });

        let encoded = serde_json::to_value(&details).expect("details encode");
        assert_eq!(encoded["kind"], "banking");
        assert_eq!(encoded["acceptsDeposits"], true);
        assert_eq!(details.step(), StepId::Banking);
    }

    #[test]
    fn sparse_payloads_fill_defaults() {
        let details: ActivityDetails =
            serde_json::from_str(r#"{"kind": "money_services", "hasMlro": true}"#)
                .expect("sparse payload parses");

        match details {
            ActivityDetails::MoneyServices(money) => {
                assert!(money.has_mlro);
                assert!(money.corridors.is_empty());
            }
            other => panic!("expected money services details, got {other:?}"),
        }
    }
}
