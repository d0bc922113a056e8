pub mod cross_border;
pub mod rules;
pub mod thresholds;
pub mod validation;

pub use cross_border::{
    determine_cross_border_vat, CrossBorderVatQuery, CrossBorderVatRequest, CrossBorderVatResult,
    CustomerType, Direction, Location, SupplyType, UnknownValue, VatTreatment,
};
pub use rules::{
    find_country, find_vat3_box, EuCountry, Vat3Box, EU_COUNTRIES, IMPORTS_EXPORTS,
    INTRA_COMMUNITY_SUPPLIES, OSS_RULES, PLACE_OF_SUPPLY_SERVICES, REPORTING_OBLIGATIONS,
    STANDARD_VAT_RATE, UK_RULES, VAT3_EU_BOXES,
};
pub use thresholds::{
    calculate_import_vat, check_intrastat_threshold, check_oss_threshold, ImportVatInput,
    ImportVatResult, IntrastatCheck, OssThresholdCheck,
};
pub use validation::{validate_eu_vat_format, VatFormatValidation};
