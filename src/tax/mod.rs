pub mod allowances;
pub mod bands;
pub mod depreciation;
pub mod ie;
pub mod reliefs;
pub mod vat;

pub use allowances::{
    annual_commute_km, calculate_annual_commute_mileage, calculate_mileage_allowance,
    calculate_subsistence_allowance, SubsistenceAllowance, VehicleType, DEFAULT_WORKING_DAYS,
    MILEAGE_RATES, SUBSISTENCE_RATES,
};
pub use bands::{apply_bands, band_slices, Band, BandSlice};
pub use depreciation::{calculate_vehicle_depreciation, depreciation_schedule, VehicleDepreciation};
pub use ie::TaxYear;
pub use reliefs::{scan_for_reliefs, ReliefCandidate, ReliefCategory, ReliefMatch, ReliefScanResult};
