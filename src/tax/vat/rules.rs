//! Reference tables for cross-border VAT: EU member states, post-Brexit UK
//! rules, reporting obligations and the VAT3 boxes they feed.

use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::Serialize;
use tabled::Tabled;

/// Irish standard VAT rate.
pub const STANDARD_VAT_RATE: Decimal = dec!(0.23);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Tabled)]
pub struct EuCountry {
    #[tabled(rename = "Code")]
    pub code: &'static str,
    #[tabled(rename = "Country")]
    pub name: &'static str,
    #[tabled(rename = "VAT Prefix")]
    pub vat_prefix: &'static str,
}

const fn country(code: &'static str, name: &'static str, vat_prefix: &'static str) -> EuCountry {
    EuCountry {
        code,
        name,
        vat_prefix,
    }
}

/// EU member states other than Ireland.
pub const EU_COUNTRIES: [EuCountry; 26] = [
    country("AT", "Austria", "AT"),
    country("BE", "Belgium", "BE"),
    country("BG", "Bulgaria", "BG"),
    country("HR", "Croatia", "HR"),
    country("CY", "Cyprus", "CY"),
    country("CZ", "Czech Republic", "CZ"),
    country("DK", "Denmark", "DK"),
    country("EE", "Estonia", "EE"),
    country("FI", "Finland", "FI"),
    country("FR", "France", "FR"),
    country("DE", "Germany", "DE"),
    // Greek VAT numbers use EL rather than the ISO code
    country("GR", "Greece", "EL"),
    country("HU", "Hungary", "HU"),
    country("IT", "Italy", "IT"),
    country("LV", "Latvia", "LV"),
    country("LT", "Lithuania", "LT"),
    country("LU", "Luxembourg", "LU"),
    country("MT", "Malta", "MT"),
    country("NL", "Netherlands", "NL"),
    country("PL", "Poland", "PL"),
    country("PT", "Portugal", "PT"),
    country("RO", "Romania", "RO"),
    country("SK", "Slovakia", "SK"),
    country("SI", "Slovenia", "SI"),
    country("ES", "Spain", "ES"),
    country("SE", "Sweden", "SE"),
];

pub fn find_country(code: &str) -> Option<&'static EuCountry> {
    let code = code.trim();
    EU_COUNTRIES
        .iter()
        .find(|c| c.code.eq_ignore_ascii_case(code))
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct UkRegionRules {
    pub name: &'static str,
    pub eu_for_goods: bool,
    pub eu_for_services: bool,
    pub vat_prefix: &'static str,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct UkRules {
    pub gb: UkRegionRules,
    pub ni: UkRegionRules,
}

/// Great Britain is a third country for both goods and services. Under the
/// Windsor Framework, Northern Ireland stays in the EU VAT area for goods only.
pub const UK_RULES: UkRules = UkRules {
    gb: UkRegionRules {
        name: "Great Britain",
        eu_for_goods: false,
        eu_for_services: false,
        vat_prefix: "GB",
    },
    ni: UkRegionRules {
        name: "Northern Ireland",
        eu_for_goods: true,
        eu_for_services: false,
        vat_prefix: "XI",
    },
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ReportingObligation {
    pub name: &'static str,
    /// Annual value above which the return is required
    pub threshold: Decimal,
    pub frequency: &'static str,
    pub description: &'static str,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ReportingObligations {
    pub vies: ReportingObligation,
    pub intrastat_arrivals: ReportingObligation,
    pub intrastat_dispatches: ReportingObligation,
}

pub const REPORTING_OBLIGATIONS: ReportingObligations = ReportingObligations {
    vies: ReportingObligation {
        name: "VIES",
        threshold: dec!(0),
        frequency: "quarterly",
        description: "VIES return of intra-Community supplies of goods and services to VAT-registered customers",
    },
    intrastat_arrivals: ReportingObligation {
        name: "Intrastat arrivals",
        threshold: dec!(750000),
        frequency: "monthly",
        description: "Intrastat return of goods arriving from other EU member states",
    },
    intrastat_dispatches: ReportingObligation {
        name: "Intrastat dispatches",
        threshold: dec!(750000),
        frequency: "monthly",
        description: "Intrastat return of goods dispatched to other EU member states",
    },
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct OssRules {
    pub scheme: &'static str,
    /// EU-wide annual B2C distance sales threshold
    pub threshold: Decimal,
    pub return_frequency: &'static str,
    pub description: &'static str,
}

pub const OSS_RULES: OssRules = OssRules {
    scheme: "Union OSS",
    threshold: dec!(10000),
    return_frequency: "quarterly",
    description: "Above the threshold, B2C distance sales of goods and B2C digital services are taxed at the customer's member state rate and declared on the OSS return",
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Tabled)]
pub struct Vat3Box {
    #[tabled(rename = "Box")]
    pub code: &'static str,
    #[tabled(rename = "Description")]
    pub description: &'static str,
}

pub const VAT3_EU_BOXES: [Vat3Box; 9] = [
    Vat3Box {
        code: "T1",
        description: "VAT on sales, including self-accounted VAT on acquisitions and reverse charge services",
    },
    Vat3Box {
        code: "T2",
        description: "VAT on purchases, including deductible self-accounted VAT",
    },
    Vat3Box {
        code: "T3",
        description: "Net VAT payable",
    },
    Vat3Box {
        code: "T4",
        description: "Net VAT repayable",
    },
    Vat3Box {
        code: "E1",
        description: "Intra-Community supplies of goods to other EU member states",
    },
    Vat3Box {
        code: "E2",
        description: "Goods supplied outside the EU VAT area (exports)",
    },
    Vat3Box {
        code: "ES1",
        description: "Intra-Community supplies of services to EU businesses",
    },
    Vat3Box {
        code: "ES2",
        description: "Intra-Community acquisitions of services from EU businesses",
    },
    Vat3Box {
        code: "PA1",
        description: "Goods imported under postponed accounting",
    },
];

pub fn find_vat3_box(code: &str) -> Option<&'static Vat3Box> {
    VAT3_EU_BOXES.iter().find(|b| b.code == code)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct IntraCommunitySupplies {
    pub conditions: &'static [&'static str],
    pub invoice_note: &'static str,
}

pub const INTRA_COMMUNITY_SUPPLIES: IntraCommunitySupplies = IntraCommunitySupplies {
    conditions: &[
        "Customer is VAT-registered in another EU member state",
        "Customer VAT number is valid on VIES at the time of supply",
        "Goods are dispatched from Ireland to another EU member state",
        "Evidence of transport is retained",
        "Supply is included on the VIES return",
    ],
    invoice_note: "Intra-Community supply - zero-rated under Article 138 of Council Directive 2006/112/EC",
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ImportsExports {
    pub import_vat_rate: Decimal,
    pub import_vat_base: &'static str,
    pub postponed_accounting_box: &'static str,
    pub export_evidence: &'static [&'static str],
}

pub const IMPORTS_EXPORTS: ImportsExports = ImportsExports {
    import_vat_rate: STANDARD_VAT_RATE,
    import_vat_base: "Customs value (cost, insurance and freight) plus customs and excise duty",
    postponed_accounting_box: "PA1",
    export_evidence: &[
        "Customs export declaration (MRN)",
        "Commercial invoice",
        "Proof of transport out of the EU",
    ],
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct PlaceOfSupplyServices {
    pub b2b_general_rule: &'static str,
    pub b2c_general_rule: &'static str,
    pub exceptions: &'static [&'static str],
}

pub const PLACE_OF_SUPPLY_SERVICES: PlaceOfSupplyServices = PlaceOfSupplyServices {
    b2b_general_rule: "Where the customer is established; the customer self-accounts under the reverse charge",
    b2c_general_rule: "Where the supplier is established",
    exceptions: &[
        "Services connected with immovable property: where the property is located",
        "Passenger transport: where the transport takes place",
        "Admission to events: where the event takes place",
        "Restaurant and catering: where physically performed",
        "Telecommunications, broadcasting and electronic services to consumers: where the customer is",
    ],
};
