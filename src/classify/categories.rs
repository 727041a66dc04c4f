use std::fmt;

use serde::{Deserialize, Serialize};

/// What kind of operation moved.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Function {
    #[serde(rename = "relocation")]
    Relocation,
    #[serde(rename = "relocation-line")]
    RelocationLine,
    #[serde(rename = "headquarters-move")]
    HeadquartersMove,
    #[serde(rename = "R&D-move")]
    RdMove,
    #[serde(rename = "operations-center-move")]
    OperationsCenterMove,
    #[serde(rename = "undisclosed")]
    Undisclosed,
}

impl Function {
    pub fn label(self) -> &'static str {
        match self {
            Function::Relocation => "relocation",
            Function::RelocationLine => "relocation-line",
            Function::HeadquartersMove => "headquarters-move",
            Function::RdMove => "R&D-move",
            Function::OperationsCenterMove => "operations-center-move",
            Function::Undisclosed => "undisclosed",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Region {
    #[serde(rename = "domestic")]
    Domestic,
    #[serde(rename = "southeast-asia")]
    SoutheastAsia,
    #[serde(rename = "western")]
    Western,
}

impl Region {
    pub fn label(self) -> &'static str {
        match self {
            Region::Domestic => "domestic",
            Region::SoutheastAsia => "southeast-asia",
            Region::Western => "western",
        }
    }
}

pub const NO_PLACE_SENTINEL: &str = "undisclosed — no place name in title";

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Destination {
    Place { name: String, region: Region },
    Undisclosed,
}

impl fmt::Display for Destination {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Destination::Place { name, region } => {
                write!(f, "moving to {}（{}）", name, region.label())
            }
            Destination::Undisclosed => f.write_str(NO_PLACE_SENTINEL),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Industry {
    #[serde(rename = "electronics-info")]
    ElectronicsInfo,
    #[serde(rename = "equipment-manufacturing")]
    EquipmentManufacturing,
    #[serde(rename = "new-energy")]
    NewEnergy,
    #[serde(rename = "materials")]
    Materials,
    #[serde(rename = "biomed-medical-device")]
    BiomedMedicalDevice,
    #[serde(rename = "logistics-supply-chain")]
    LogisticsSupplyChain,
    #[serde(rename = "info-services")]
    InfoServices,
    #[serde(rename = "platform-economy")]
    PlatformEconomy,
    #[serde(rename = "finance-professional-services")]
    FinanceProfessionalServices,
    #[serde(rename = "other-services")]
    OtherServices,
    #[serde(rename = "other-manufacturing")]
    OtherManufacturing,
}

impl Industry {
    pub fn label(self) -> &'static str {
        match self {
            Industry::ElectronicsInfo => "electronics-info",
            Industry::EquipmentManufacturing => "equipment-manufacturing",
            Industry::NewEnergy => "new-energy",
            Industry::Materials => "materials",
            Industry::BiomedMedicalDevice => "biomed-medical-device",
            Industry::LogisticsSupplyChain => "logistics-supply-chain",
            Industry::InfoServices => "info-services",
            Industry::PlatformEconomy => "platform-economy",
            Industry::FinanceProfessionalServices => "finance-professional-services",
            Industry::OtherServices => "other-services",
            Industry::OtherManufacturing => "other-manufacturing",
        }
    }
}

/// Reason codes, declared in taxonomy order. `Ord` follows declaration order,
/// which is the order codes appear in a serialized reasons cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum ReasonCode {
    #[serde(rename = "cost")]
    Cost,
    #[serde(rename = "land-space")]
    LandSpace,
    #[serde(rename = "environmental")]
    Environmental,
    #[serde(rename = "supply-chain")]
    SupplyChain,
    #[serde(rename = "market-proximity")]
    MarketProximity,
    #[serde(rename = "talent")]
    Talent,
    #[serde(rename = "policy-incentive")]
    PolicyIncentive,
    #[serde(rename = "financing-tax")]
    FinancingTax,
    #[serde(rename = "international-environment")]
    InternationalEnvironment,
    #[serde(rename = "strategic-adjustment")]
    StrategicAdjustment,
}

impl ReasonCode {
    pub fn label(self) -> &'static str {
        match self {
            ReasonCode::Cost => "cost",
            ReasonCode::LandSpace => "land-space",
            ReasonCode::Environmental => "environmental",
            ReasonCode::SupplyChain => "supply-chain",
            ReasonCode::MarketProximity => "market-proximity",
            ReasonCode::Talent => "talent",
            ReasonCode::PolicyIncentive => "policy-incentive",
            ReasonCode::FinancingTax => "financing-tax",
            ReasonCode::InternationalEnvironment => "international-environment",
            ReasonCode::StrategicAdjustment => "strategic-adjustment",
        }
    }
}
