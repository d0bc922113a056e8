use crate::tax::allowances::VehicleType;
use rust_decimal::Decimal;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// A depreciable business vehicle as captured during onboarding.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct VehicleAsset {
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub reg: String,
    /// Cost excluding VAT
    #[schemars(with = "f64")]
    pub purchase_cost: Decimal,
    /// Acquisition date; unreadable values fall back to the tax year
    #[serde(default)]
    pub date_acquired: Option<String>,
    /// Business use percentage, nominally 0-100
    #[serde(default = "full_business_use")]
    #[schemars(with = "f64")]
    pub business_use_pct: Decimal,
}

fn full_business_use() -> Decimal {
    Decimal::ONE_HUNDRED
}

impl VehicleAsset {
    pub fn new(purchase_cost: Decimal, date_acquired: &str, business_use_pct: Decimal) -> Self {
        VehicleAsset {
            description: String::new(),
            reg: String::new(),
            purchase_cost,
            date_acquired: Some(date_acquired.to_string()),
            business_use_pct,
        }
    }
}

/// Onboarding answers that feed the annual returns.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct Questionnaire {
    /// Tax year (calendar year) the return covers
    pub tax_year: i32,
    #[serde(default)]
    pub vehicles: Vec<VehicleAsset>,
    /// Business kilometres driven in a private vehicle
    #[serde(default)]
    #[schemars(with = "f64")]
    pub business_mileage_km: Decimal,
    #[serde(default)]
    pub vehicle_type: VehicleType,
    /// Nights away on business (overnight subsistence)
    #[serde(default)]
    pub nights_away: i64,
    /// Day trips of ten hours or more
    #[serde(default)]
    pub days_away: i64,
    /// Age at the end of the tax year, used for pension relief limits
    #[serde(default)]
    pub age: Option<u32>,
}

impl Questionnaire {
    pub fn for_year(tax_year: i32) -> Self {
        Questionnaire {
            tax_year,
            vehicles: Vec::new(),
            business_mileage_km: Decimal::ZERO,
            vehicle_type: VehicleType::default(),
            nights_away: 0,
            days_away: 0,
            age: None,
        }
    }
}
