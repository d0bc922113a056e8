use super::rules::{IMPORTS_EXPORTS, OSS_RULES, REPORTING_OBLIGATIONS};
use crate::core::round2;
use rust_decimal::Decimal;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

fn default_import_vat_rate() -> Decimal {
    IMPORTS_EXPORTS.import_vat_rate
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct ImportVatInput {
    /// Customs value: cost, insurance and freight
    #[schemars(with = "f64")]
    pub cif_value: Decimal,
    #[serde(default)]
    #[schemars(with = "f64")]
    pub customs_duty: Decimal,
    #[serde(default)]
    #[schemars(with = "f64")]
    pub excise_duty: Decimal,
    #[serde(default = "default_import_vat_rate")]
    #[schemars(with = "f64")]
    pub vat_rate: Decimal,
}

impl ImportVatInput {
    pub fn new(cif_value: Decimal) -> Self {
        ImportVatInput {
            cif_value,
            customs_duty: Decimal::ZERO,
            excise_duty: Decimal::ZERO,
            vat_rate: default_import_vat_rate(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ImportVatResult {
    pub vat_base: Decimal,
    pub vat_amount: Decimal,
    pub total_cost: Decimal,
}

/// Import VAT is charged on the customs value plus duties.
pub fn calculate_import_vat(input: &ImportVatInput) -> ImportVatResult {
    let vat_base = input.cif_value + input.customs_duty + input.excise_duty;
    let vat_amount = round2(vat_base * input.vat_rate);
    ImportVatResult {
        vat_base,
        vat_amount,
        total_cost: input.cif_value + input.customs_duty + input.excise_duty + vat_amount,
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OssThresholdCheck {
    pub threshold: Decimal,
    pub annual_eu_sales: Decimal,
    pub exceeds: bool,
    pub recommendation: String,
}

pub fn check_oss_threshold(annual_eu_sales: Decimal) -> OssThresholdCheck {
    let threshold = OSS_RULES.threshold;
    let exceeds = annual_eu_sales > threshold;
    let recommendation = if exceeds {
        format!(
            "EU B2C distance sales exceed €{threshold}. Charge VAT at each customer's member state rate and register for the {} to file {} returns.",
            OSS_RULES.scheme, OSS_RULES.return_frequency
        )
    } else {
        format!(
            "EU B2C distance sales are within the €{threshold} threshold. Irish VAT applies; registering for the {} remains optional.",
            OSS_RULES.scheme
        )
    };

    OssThresholdCheck {
        threshold,
        annual_eu_sales,
        exceeds,
        recommendation,
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct IntrastatCheck {
    pub threshold: Decimal,
    pub arrivals_required: bool,
    pub dispatches_required: bool,
    pub recommendation: String,
}

pub fn check_intrastat_threshold(arrivals_total: Decimal, dispatches_total: Decimal) -> IntrastatCheck {
    let arrivals = REPORTING_OBLIGATIONS.intrastat_arrivals;
    let dispatches = REPORTING_OBLIGATIONS.intrastat_dispatches;
    let arrivals_required = arrivals_total > arrivals.threshold;
    let dispatches_required = dispatches_total > dispatches.threshold;

    let recommendation = match (arrivals_required, dispatches_required) {
        (true, true) => format!(
            "File {} Intrastat returns for both arrivals and dispatches.",
            arrivals.frequency
        ),
        (true, false) => format!(
            "File {} Intrastat returns for arrivals. Dispatches are below €{}.",
            arrivals.frequency, dispatches.threshold
        ),
        (false, true) => format!(
            "File {} Intrastat returns for dispatches. Arrivals are below €{}.",
            dispatches.frequency, arrivals.threshold
        ),
        (false, false) => format!(
            "No Intrastat returns required. Both flows are below €{}.",
            arrivals.threshold
        ),
    };

    IntrastatCheck {
        threshold: arrivals.threshold,
        arrivals_required,
        dispatches_required,
        recommendation,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn import_vat_defaults() {
        let result = calculate_import_vat(&ImportVatInput::new(dec!(1000)));
        assert_eq!(result.vat_base, dec!(1000));
        assert_eq!(result.vat_amount, dec!(230.00));
        assert_eq!(result.total_cost, dec!(1230.00));
    }

    #[test]
    fn import_vat_includes_duties() {
        let input = ImportVatInput {
            cif_value: dec!(1234.56),
            customs_duty: dec!(49.38),
            excise_duty: dec!(10),
            vat_rate: dec!(0.135),
        };
        let result = calculate_import_vat(&input);
        assert_eq!(result.vat_base, dec!(1293.94));
        // 1293.94 * 0.135 = 174.6819
        assert_eq!(result.vat_amount, dec!(174.68));
        assert_eq!(result.total_cost, dec!(1468.62));
    }

    #[test]
    fn import_vat_input_defaults_from_json() {
        let input: ImportVatInput = serde_json::from_str(r#"{"cifValue": 500}"#).unwrap();
        assert_eq!(input, ImportVatInput::new(dec!(500)));
    }

    #[test]
    fn oss_threshold_is_strict() {
        let at = check_oss_threshold(dec!(10000));
        assert!(!at.exceeds);
        let over = check_oss_threshold(dec!(10000.01));
        assert!(over.exceeds);
        assert_ne!(at.recommendation, over.recommendation);
    }

    #[test]
    fn intrastat_flows_are_independent() {
        let arrivals_only = check_intrastat_threshold(dec!(800000), dec!(750000));
        assert!(arrivals_only.arrivals_required);
        assert!(!arrivals_only.dispatches_required);
        assert!(arrivals_only.recommendation.contains("arrivals"));

        let dispatches_only = check_intrastat_threshold(dec!(0), dec!(750000.01));
        assert!(!dispatches_only.arrivals_required);
        assert!(dispatches_only.dispatches_required);

        let neither = check_intrastat_threshold(dec!(100), dec!(100));
        assert!(neither.recommendation.starts_with("No Intrastat"));

        let both = check_intrastat_threshold(dec!(1000000), dec!(1000000));
        assert!(both.arrivals_required && both.dispatches_required);
    }
}
