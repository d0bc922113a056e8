//! Annual returns assembled from the categorised bank feed and the onboarding
//! questionnaire.

mod ct1;
mod form11;
mod trial_balance;
mod vat3;

pub use ct1::Ct1Summary;
pub use form11::{Form11Summary, TaxCredits};
pub use trial_balance::{TrialBalance, TrialBalanceRow, BANK_ACCOUNT};
pub use vat3::Vat3Return;

use crate::core::{Questionnaire, Transaction, Warning};
use crate::tax::depreciation::acquisition_year;
use crate::tax::{
    calculate_mileage_allowance, calculate_subsistence_allowance, calculate_vehicle_depreciation,
    VehicleDepreciation,
};
use chrono::Datelike;
use rust_decimal::Decimal;
use serde::Serialize;

/// Capital allowance position of one vehicle for the year under review.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct VehicleClaim {
    pub reg: String,
    pub description: String,
    pub depreciation: VehicleDepreciation,
    /// Allowance deducted this year
    pub claimed: Decimal,
}

pub(crate) struct CapitalAllowances {
    pub total: Decimal,
    pub vehicles: Vec<VehicleClaim>,
    pub warnings: Vec<Warning>,
}

pub(crate) fn capital_allowances(questionnaire: &Questionnaire) -> CapitalAllowances {
    let mut allowances = CapitalAllowances {
        total: Decimal::ZERO,
        vehicles: Vec::new(),
        warnings: Vec::new(),
    };

    for vehicle in &questionnaire.vehicles {
        if let Some(value) = vehicle.date_acquired.as_deref() {
            if acquisition_year(Some(value)).is_none() {
                allowances.warnings.push(Warning::UnparseableAcquisitionDate {
                    reg: vehicle.reg.clone(),
                    value: value.to_string(),
                });
            }
        }

        let depreciation = calculate_vehicle_depreciation(vehicle, questionnaire.tax_year);
        let claimed = if depreciation.claimable_this_year() {
            depreciation.annual_allowance
        } else if depreciation.years_owned == 0 {
            allowances.warnings.push(Warning::VehicleNotYetAcquired {
                reg: vehicle.reg.clone(),
            });
            Decimal::ZERO
        } else {
            allowances.warnings.push(Warning::VehicleAllowancesExhausted {
                reg: vehicle.reg.clone(),
            });
            Decimal::ZERO
        };

        allowances.total += claimed;
        allowances.vehicles.push(VehicleClaim {
            reg: vehicle.reg.clone(),
            description: vehicle.description.clone(),
            depreciation,
            claimed,
        });
    }

    allowances
}

/// Civil service mileage and subsistence paid to the owner tax free.
pub(crate) fn travel_allowances(questionnaire: &Questionnaire) -> (Decimal, Decimal) {
    let mileage =
        calculate_mileage_allowance(questionnaire.business_mileage_km, questionnaire.vehicle_type);
    let subsistence =
        calculate_subsistence_allowance(questionnaire.nights_away, questionnaire.days_away).total;
    (mileage, subsistence)
}

pub(crate) fn in_tax_year(transactions: &[Transaction], tax_year: i32) -> Vec<&Transaction> {
    transactions
        .iter()
        .filter(|tx| tx.transaction_date.year() == tax_year)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::VehicleAsset;
    use crate::tax::VehicleType;
    use rust_decimal_macros::dec;

    fn questionnaire(vehicles: Vec<VehicleAsset>) -> Questionnaire {
        Questionnaire {
            vehicles,
            ..Questionnaire::for_year(2024)
        }
    }

    #[test]
    fn claims_only_vehicles_within_horizon() {
        let mut old = VehicleAsset::new(dec!(20000), "2010-01-01", dec!(100));
        old.reg = "10-D-1".to_string();
        let mut future = VehicleAsset::new(dec!(20000), "2026-01-01", dec!(100));
        future.reg = "261-D-2".to_string();
        let current = VehicleAsset::new(dec!(30000), "2023-07-01", dec!(80));

        let allowances = capital_allowances(&questionnaire(vec![old, future, current]));
        assert_eq!(allowances.total, dec!(2400));
        assert_eq!(allowances.vehicles.len(), 3);
        assert_eq!(allowances.vehicles[0].claimed, Decimal::ZERO);
        assert_eq!(
            allowances.warnings,
            vec![
                Warning::VehicleAllowancesExhausted {
                    reg: "10-D-1".to_string()
                },
                Warning::VehicleNotYetAcquired {
                    reg: "261-D-2".to_string()
                },
            ]
        );
    }

    #[test]
    fn unreadable_date_warns_and_claims_first_year() {
        let mut v = VehicleAsset::new(dec!(16000), "sometime", dec!(100));
        v.reg = "X".to_string();
        let allowances = capital_allowances(&questionnaire(vec![v]));
        assert_eq!(allowances.total, dec!(2000));
        assert_eq!(
            allowances.warnings,
            vec![Warning::UnparseableAcquisitionDate {
                reg: "X".to_string(),
                value: "sometime".to_string()
            }]
        );
    }

    #[test]
    fn travel_allowances_from_questionnaire() {
        let q = Questionnaire {
            business_mileage_km: dec!(3000),
            vehicle_type: VehicleType::MotorCar,
            nights_away: 3,
            days_away: 2,
            ..Questionnaire::for_year(2024)
        };
        assert_eq!(travel_allowances(&q), (dec!(2136.75), dec!(609.58)));
    }
}
