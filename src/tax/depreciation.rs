//! Wear and tear capital allowances on business vehicles.

use crate::core::{parse_iso_date, round2, VehicleAsset};
use chrono::Datelike;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::Serialize;

/// Ceiling on the qualifying cost of a passenger vehicle.
pub const VEHICLE_COST_CAP: Decimal = dec!(24000);
/// Annual wear and tear rate (straight line over eight years).
pub const WEAR_AND_TEAR_RATE: Decimal = dec!(0.125);
pub const CLAIM_YEARS: u32 = 8;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct VehicleDepreciation {
    pub cost: Decimal,
    pub qualifying_cost: Decimal,
    pub years_owned: u32,
    pub annual_allowance_full: Decimal,
    pub annual_allowance: Decimal,
    pub cumulative_allowances: Decimal,
    pub net_book_value: Decimal,
    pub fully_depreciated: bool,
    /// Business use as supplied, before clamping
    pub business_use_pct: Decimal,
}

impl VehicleDepreciation {
    /// Whether an allowance is claimable in the year this was computed for.
    pub fn claimable_this_year(&self) -> bool {
        (1..=CLAIM_YEARS).contains(&self.years_owned)
    }
}

/// Year of acquisition, or `None` when the date cannot be read.
pub fn acquisition_year(date_acquired: Option<&str>) -> Option<i32> {
    let value = date_acquired?.trim();
    if let Some(date) = parse_iso_date(value) {
        return Some(date.year());
    }
    // Fall back to a leading four digit year, e.g. "2021" or "2021-06"
    value
        .get(..4)
        .filter(|year| year.chars().all(|c| c.is_ascii_digit()))
        .and_then(|year| year.parse().ok())
}

pub fn calculate_vehicle_depreciation(vehicle: &VehicleAsset, tax_year: i32) -> VehicleDepreciation {
    let qualifying_cost = vehicle.purchase_cost.min(VEHICLE_COST_CAP);
    let business_fraction = vehicle
        .business_use_pct
        .clamp(Decimal::ZERO, Decimal::ONE_HUNDRED)
        / Decimal::ONE_HUNDRED;

    let acquired_year = acquisition_year(vehicle.date_acquired.as_deref()).unwrap_or(tax_year);
    let years_owned = u32::try_from(tax_year - acquired_year + 1).unwrap_or(0);
    let claimable_years = Decimal::from(years_owned.min(CLAIM_YEARS));

    let annual_allowance_full = round2(qualifying_cost * WEAR_AND_TEAR_RATE);
    let annual_allowance = round2(annual_allowance_full * business_fraction);
    let cumulative_allowances = round2(
        (claimable_years * annual_allowance_full * business_fraction)
            .min(qualifying_cost * business_fraction),
    );
    // Net book value ignores business use: the asset is written down in full.
    let net_book_value =
        round2(qualifying_cost - claimable_years * annual_allowance_full).max(Decimal::ZERO);

    log::debug!(
        "Vehicle {} acquired {} for {}: year {} of {}, allowance {}, NBV {}",
        vehicle.reg,
        acquired_year,
        vehicle.purchase_cost,
        years_owned,
        CLAIM_YEARS,
        annual_allowance,
        net_book_value
    );

    VehicleDepreciation {
        cost: vehicle.purchase_cost,
        qualifying_cost,
        years_owned,
        annual_allowance_full,
        annual_allowance,
        cumulative_allowances,
        net_book_value,
        fully_depreciated: years_owned >= CLAIM_YEARS,
        business_use_pct: vehicle.business_use_pct,
    }
}

/// Depreciation position for each tax year in `from_year..=to_year`.
pub fn depreciation_schedule(
    vehicle: &VehicleAsset,
    from_year: i32,
    to_year: i32,
) -> Vec<(i32, VehicleDepreciation)> {
    (from_year..=to_year)
        .map(|year| (year, calculate_vehicle_depreciation(vehicle, year)))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn vehicle(cost: Decimal, acquired: &str, business_use: Decimal) -> VehicleAsset {
        VehicleAsset {
            description: "Skoda Octavia".to_string(),
            reg: "221-D-1234".to_string(),
            purchase_cost: cost,
            date_acquired: Some(acquired.to_string()),
            business_use_pct: business_use,
        }
    }

    #[test]
    fn first_year_below_cap() {
        let dep = calculate_vehicle_depreciation(&vehicle(dec!(20000), "2024-03-15", dec!(100)), 2024);
        assert_eq!(dep.qualifying_cost, dec!(20000));
        assert_eq!(dep.years_owned, 1);
        assert_eq!(dep.annual_allowance_full, dec!(2500));
        assert_eq!(dep.annual_allowance, dec!(2500));
        assert_eq!(dep.cumulative_allowances, dec!(2500));
        assert_eq!(dep.net_book_value, dec!(17500));
        assert!(!dep.fully_depreciated);
    }

    #[test]
    fn cost_is_capped() {
        let dep = calculate_vehicle_depreciation(&vehicle(dec!(45000), "2024-01-01", dec!(100)), 2024);
        assert_eq!(dep.cost, dec!(45000));
        assert_eq!(dep.qualifying_cost, dec!(24000));
        assert_eq!(dep.annual_allowance_full, dec!(3000));
    }

    #[test]
    fn cost_exactly_at_cap() {
        let dep = calculate_vehicle_depreciation(&vehicle(dec!(24000), "2024-01-01", dec!(100)), 2024);
        assert_eq!(dep.qualifying_cost, dec!(24000));
        assert_eq!(dep.annual_allowance_full, dec!(3000));
    }

    #[test]
    fn business_use_apportions_allowance_but_not_nbv() {
        let dep = calculate_vehicle_depreciation(&vehicle(dec!(24000), "2022-06-01", dec!(60)), 2024);
        assert_eq!(dep.years_owned, 3);
        assert_eq!(dep.annual_allowance_full, dec!(3000));
        assert_eq!(dep.annual_allowance, dec!(1800));
        assert_eq!(dep.cumulative_allowances, dec!(5400));
        assert_eq!(dep.net_book_value, dec!(15000));
    }

    #[test]
    fn business_use_is_linear() {
        let half = calculate_vehicle_depreciation(&vehicle(dec!(30000), "2023-01-01", dec!(50)), 2024);
        let full = calculate_vehicle_depreciation(&vehicle(dec!(30000), "2023-01-01", dec!(100)), 2024);
        assert_eq!(half.annual_allowance, full.annual_allowance / dec!(2));
    }

    #[test]
    fn business_use_clamped_but_echoed_raw() {
        let negative = calculate_vehicle_depreciation(&vehicle(dec!(20000), "2024-01-01", dec!(-10)), 2024);
        assert_eq!(negative.annual_allowance, Decimal::ZERO);
        assert_eq!(negative.cumulative_allowances, Decimal::ZERO);
        assert_eq!(negative.business_use_pct, dec!(-10));

        let over = calculate_vehicle_depreciation(&vehicle(dec!(20000), "2024-01-01", dec!(150)), 2024);
        assert_eq!(over.annual_allowance, dec!(2500));
        assert_eq!(over.business_use_pct, dec!(150));
    }

    #[test]
    fn zero_business_use() {
        let dep = calculate_vehicle_depreciation(&vehicle(dec!(20000), "2024-01-01", dec!(0)), 2024);
        assert_eq!(dep.annual_allowance_full, dec!(2500));
        assert_eq!(dep.annual_allowance, Decimal::ZERO);
        assert_eq!(dep.net_book_value, dec!(17500));
    }

    #[test]
    fn future_acquisition_owns_nothing_yet() {
        let dep = calculate_vehicle_depreciation(&vehicle(dec!(20000), "2026-02-01", dec!(100)), 2024);
        assert_eq!(dep.years_owned, 0);
        assert_eq!(dep.cumulative_allowances, Decimal::ZERO);
        assert_eq!(dep.net_book_value, dec!(20000));
        assert!(!dep.claimable_this_year());
    }

    #[test]
    fn eighth_year_is_fully_depreciated() {
        let v = vehicle(dec!(24000), "2017-05-01", dec!(100));
        let dep = calculate_vehicle_depreciation(&v, 2024);
        assert_eq!(dep.years_owned, 8);
        assert!(dep.fully_depreciated);
        assert_eq!(dep.net_book_value, Decimal::ZERO);
        assert_eq!(dep.cumulative_allowances, dec!(24000));
        assert!(dep.claimable_this_year());
    }

    #[test]
    fn allowances_pinned_after_horizon() {
        let v = vehicle(dec!(32000), "2015-01-01", dec!(75));
        let year_eight = calculate_vehicle_depreciation(&v, 2022);
        let year_sixteen = calculate_vehicle_depreciation(&v, 2030);
        assert!(year_eight.fully_depreciated);
        assert_eq!(
            year_sixteen.cumulative_allowances,
            year_eight.cumulative_allowances
        );
        assert_eq!(year_sixteen.cumulative_allowances, dec!(18000));
        assert_eq!(year_sixteen.net_book_value, Decimal::ZERO);
        // Per-year figures are still reported
        assert_eq!(year_sixteen.annual_allowance_full, dec!(3000));
        assert_eq!(year_sixteen.annual_allowance, dec!(2250));
        assert!(!year_sixteen.claimable_this_year());
    }

    #[test]
    fn missing_or_bad_date_defaults_to_tax_year() {
        let mut v = vehicle(dec!(16000), "not a date", dec!(100));
        assert_eq!(calculate_vehicle_depreciation(&v, 2024).years_owned, 1);
        v.date_acquired = None;
        assert_eq!(calculate_vehicle_depreciation(&v, 2024).years_owned, 1);
    }

    #[test]
    fn acquisition_year_formats() {
        assert_eq!(acquisition_year(Some("2021-06-30")), Some(2021));
        assert_eq!(acquisition_year(Some("2021-06-30T10:00:00Z")), Some(2021));
        assert_eq!(acquisition_year(Some("2019")), Some(2019));
        assert_eq!(acquisition_year(Some("June 2019")), None);
        assert_eq!(acquisition_year(None), None);
    }

    #[test]
    fn schedule_covers_each_year() {
        let v = vehicle(dec!(24000), "2020-01-01", dec!(100));
        let schedule = depreciation_schedule(&v, 2020, 2029);
        assert_eq!(schedule.len(), 10);
        assert_eq!(schedule[0].1.net_book_value, dec!(21000));
        assert_eq!(schedule[7].1.net_book_value, Decimal::ZERO);
        assert!(schedule[7].1.fully_depreciated);
        assert_eq!(schedule[9].1.cumulative_allowances, dec!(24000));
    }

    #[test]
    fn depreciation_is_repeatable() {
        let v = vehicle(dec!(27999.99), "2021-11-11", dec!(33.3));
        assert_eq!(
            calculate_vehicle_depreciation(&v, 2024),
            calculate_vehicle_depreciation(&v, 2024)
        );
    }
}
