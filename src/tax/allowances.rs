//! Revenue civil service mileage and subsistence rates, as applied to
//! tax-free reimbursement of business travel.

use super::bands::{apply_bands, Band};
use crate::core::round2;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum VehicleType {
    #[default]
    MotorCar,
    Motorcycle,
    Bicycle,
}

impl VehicleType {
    pub fn display(&self) -> &'static str {
        match self {
            VehicleType::MotorCar => "Motor car",
            VehicleType::Motorcycle => "Motorcycle",
            VehicleType::Bicycle => "Bicycle",
        }
    }
}

impl FromStr for VehicleType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().replace('-', "_").as_str() {
            "motor_car" | "car" => Ok(VehicleType::MotorCar),
            "motorcycle" => Ok(VehicleType::Motorcycle),
            "bicycle" | "bike" => Ok(VehicleType::Bicycle),
            other => Err(format!("unknown vehicle type '{other}'")),
        }
    }
}

/// Kilometric rate schedules.
#[derive(Debug, Clone, Copy)]
pub struct MileageRates {
    /// Motor car, engine 1,501cc and over
    pub motor_car: &'static [Band],
    /// Motorcycle, engine 251cc to 600cc
    pub motorcycle: &'static [Band],
    /// Flat rate per km
    pub bicycle: Decimal,
}

pub const MILEAGE_RATES: MileageRates = MileageRates {
    motor_car: &[
        Band::upto(dec!(1500), dec!(0.5182)),
        Band::upto(dec!(5500), dec!(0.9063)),
        Band::upto(dec!(25000), dec!(0.3999)),
        Band::rest(dec!(0.2400)),
    ],
    motorcycle: &[
        Band::upto(dec!(6437), dec!(0.2413)),
        Band::rest(dec!(0.1554)),
    ],
    bicycle: dec!(0.08),
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct SubsistenceRates {
    pub overnight_normal: Decimal,
    pub overnight_reduced: Decimal,
    /// Day trip of ten hours or more
    pub day_ten_hours: Decimal,
    /// Day trip of five to ten hours
    pub day_five_hours: Decimal,
}

pub const SUBSISTENCE_RATES: SubsistenceRates = SubsistenceRates {
    overnight_normal: dec!(177.14),
    overnight_reduced: dec!(156.88),
    day_ten_hours: dec!(39.08),
    day_five_hours: dec!(16.29),
};

pub const DEFAULT_WORKING_DAYS: u32 = 230;

/// Tax-free mileage allowance for `distance_km` business kilometres.
///
/// Banded vehicles are charged marginally: each band only covers the
/// kilometres between its floor and ceiling.
pub fn calculate_mileage_allowance(distance_km: Decimal, vehicle_type: VehicleType) -> Decimal {
    if distance_km <= Decimal::ZERO {
        return Decimal::ZERO;
    }

    let amount = match vehicle_type {
        VehicleType::Bicycle => distance_km * MILEAGE_RATES.bicycle,
        VehicleType::MotorCar => apply_bands(distance_km, MILEAGE_RATES.motor_car),
        VehicleType::Motorcycle => apply_bands(distance_km, MILEAGE_RATES.motorcycle),
    };
    log::debug!(
        "Mileage {} km by {}: {}",
        distance_km,
        vehicle_type.display(),
        amount
    );
    round2(amount)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct SubsistenceAllowance {
    pub accommodation: Decimal,
    pub meals: Decimal,
    pub total: Decimal,
}

/// Overnight allowance at the normal rate plus ten-hour day allowance.
pub fn calculate_subsistence_allowance(nights_away: i64, days_away: i64) -> SubsistenceAllowance {
    let nights = Decimal::from(nights_away.max(0));
    let days = Decimal::from(days_away.max(0));
    let accommodation = nights * SUBSISTENCE_RATES.overnight_normal;
    let meals = days * SUBSISTENCE_RATES.day_ten_hours;

    SubsistenceAllowance {
        accommodation: round2(accommodation),
        meals: round2(meals),
        total: round2(accommodation + meals),
    }
}

/// Round-trip kilometres over a year of working days. Saturates rather than
/// overflowing on absurd inputs.
pub fn annual_commute_km(one_way_km: Decimal, working_days_per_year: u32) -> Decimal {
    one_way_km
        .max(Decimal::ZERO)
        .saturating_mul(Decimal::TWO)
        .saturating_mul(Decimal::from(working_days_per_year))
}

/// Annual allowance for a round trip of `one_way_km` on each working day,
/// at motor car rates.
pub fn calculate_annual_commute_mileage(one_way_km: Decimal, working_days_per_year: u32) -> Decimal {
    let annual_km = annual_commute_km(one_way_km, working_days_per_year);
    calculate_mileage_allowance(annual_km, VehicleType::MotorCar)
}
