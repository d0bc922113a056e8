use super::rules::{find_country, EuCountry};
use once_cell::sync::Lazy;
use regex::Regex;
use serde::Serialize;
use std::collections::HashMap;

struct FormatRule {
    country_code: &'static str,
    pattern: &'static str,
    expected: &'static str,
}

const FORMAT_RULES: [FormatRule; 26] = [
    FormatRule { country_code: "AT", pattern: r"^ATU\d{8}$", expected: "ATU followed by 8 digits" },
    FormatRule { country_code: "BE", pattern: r"^BE[01]\d{9}$", expected: "BE followed by 10 digits starting with 0 or 1" },
    FormatRule { country_code: "BG", pattern: r"^BG\d{9,10}$", expected: "BG followed by 9 or 10 digits" },
    FormatRule { country_code: "HR", pattern: r"^HR\d{11}$", expected: "HR followed by 11 digits" },
    FormatRule { country_code: "CY", pattern: r"^CY\d{8}[A-Z]$", expected: "CY followed by 8 digits and a letter" },
    FormatRule { country_code: "CZ", pattern: r"^CZ\d{8,10}$", expected: "CZ followed by 8 to 10 digits" },
    FormatRule { country_code: "DK", pattern: r"^DK\d{8}$", expected: "DK followed by 8 digits" },
    FormatRule { country_code: "EE", pattern: r"^EE\d{9}$", expected: "EE followed by 9 digits" },
    FormatRule { country_code: "FI", pattern: r"^FI\d{8}$", expected: "FI followed by 8 digits" },
    FormatRule { country_code: "FR", pattern: r"^FR[0-9A-Z]{2}\d{9}$", expected: "FR followed by 2 characters and 9 digits" },
    FormatRule { country_code: "DE", pattern: r"^DE\d{9}$", expected: "DE followed by 9 digits" },
    FormatRule { country_code: "GR", pattern: r"^EL\d{9}$", expected: "EL followed by 9 digits" },
    FormatRule { country_code: "HU", pattern: r"^HU\d{8}$", expected: "HU followed by 8 digits" },
    FormatRule { country_code: "IT", pattern: r"^IT\d{11}$", expected: "IT followed by 11 digits" },
    FormatRule { country_code: "LV", pattern: r"^LV\d{11}$", expected: "LV followed by 11 digits" },
    FormatRule { country_code: "LT", pattern: r"^LT(\d{9}|\d{12})$", expected: "LT followed by 9 or 12 digits" },
    FormatRule { country_code: "LU", pattern: r"^LU\d{8}$", expected: "LU followed by 8 digits" },
    FormatRule { country_code: "MT", pattern: r"^MT\d{8}$", expected: "MT followed by 8 digits" },
    FormatRule { country_code: "NL", pattern: r"^NL\d{9}B\d{2}$", expected: "NL followed by 9 digits, B and 2 digits" },
    FormatRule { country_code: "PL", pattern: r"^PL\d{10}$", expected: "PL followed by 10 digits" },
    FormatRule { country_code: "PT", pattern: r"^PT\d{9}$", expected: "PT followed by 9 digits" },
    FormatRule { country_code: "RO", pattern: r"^RO\d{2,10}$", expected: "RO followed by 2 to 10 digits" },
    FormatRule { country_code: "SK", pattern: r"^SK\d{10}$", expected: "SK followed by 10 digits" },
    FormatRule { country_code: "SI", pattern: r"^SI\d{8}$", expected: "SI followed by 8 digits" },
    FormatRule { country_code: "ES", pattern: r"^ES[0-9A-Z]\d{7}[0-9A-Z]$", expected: "ES followed by a character, 7 digits and a character" },
    FormatRule { country_code: "SE", pattern: r"^SE\d{12}$", expected: "SE followed by 12 digits" },
];

static COMPILED_RULES: Lazy<HashMap<&'static str, (Regex, &'static str)>> = Lazy::new(|| {
    FORMAT_RULES
        .iter()
        .map(|rule| {
            let regex = Regex::new(rule.pattern).expect("hardcoded regex should be valid");
            (rule.country_code, (regex, rule.expected))
        })
        .collect()
});

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct VatFormatValidation {
    pub valid: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

impl VatFormatValidation {
    fn valid() -> Self {
        VatFormatValidation {
            valid: true,
            message: None,
        }
    }

    fn invalid(message: String) -> Self {
        VatFormatValidation {
            valid: false,
            message: Some(message),
        }
    }
}

/// Check that a VAT number has the shape used by the given member state.
/// Only the format is checked; registration must be confirmed on VIES.
pub fn validate_eu_vat_format(vat_number: &str, country_code: &str) -> VatFormatValidation {
    let Some(EuCountry { code, name, .. }) = find_country(country_code) else {
        return VatFormatValidation::invalid(format!(
            "Unknown country code: {}",
            country_code.trim()
        ));
    };
    let Some((regex, expected)) = COMPILED_RULES.get(code) else {
        return VatFormatValidation::invalid(format!("Unknown country code: {code}"));
    };

    let normalised: String = vat_number
        .chars()
        .filter(|c| !c.is_whitespace())
        .collect::<String>()
        .to_uppercase();

    if regex.is_match(&normalised) {
        VatFormatValidation::valid()
    } else {
        VatFormatValidation::invalid(format!("Invalid format for {name}. Expected {expected}"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tax::vat::rules::EU_COUNTRIES;
    use rstest::rstest;

    #[rstest]
    #[case("ATU12345678", "AT")]
    #[case("BE0123456789", "BE")]
    #[case("DE 123 456 789", "DE")]
    #[case("el123456789", "GR")]
    #[case("FRXX123456789", "FR")]
    #[case("NL123456789B01", "NL")]
    #[case("ESX1234567X", "ES")]
    #[case("LT123456789012", "LT")]
    #[case("CY12345678L", "cy")]
    fn accepts_valid_numbers(#[case] number: &str, #[case] country: &str) {
        assert_eq!(validate_eu_vat_format(number, country), VatFormatValidation::valid());
    }

    #[test]
    fn every_country_has_a_rule() {
        for country in EU_COUNTRIES.iter() {
            assert!(COMPILED_RULES.contains_key(country.code), "{}", country.code);
        }
        assert_eq!(COMPILED_RULES.len(), 26);
    }

    #[test]
    fn unknown_country() {
        let result = validate_eu_vat_format("IE1234567T", "IE");
        assert!(!result.valid);
        assert!(result.message.unwrap().contains("Unknown country code"));
    }

    #[test]
    fn malformed_austrian_number_names_country_and_prefix() {
        let result = validate_eu_vat_format("AT12345678", "AT");
        assert!(!result.valid);
        let message = result.message.unwrap();
        assert!(message.contains("Invalid format for Austria"));
        assert!(message.contains("ATU"));
    }

    #[test]
    fn greece_rejects_gr_prefix() {
        let result = validate_eu_vat_format("GR123456789", "GR");
        assert!(!result.valid);
        assert!(result.message.unwrap().contains("EL"));
    }

    #[test]
    fn wrong_prefix_for_country() {
        assert!(!validate_eu_vat_format("DE123456789", "FR").valid);
    }
}
