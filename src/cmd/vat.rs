//! VAT command - cross-border treatment, VAT number formats, import VAT and
//! OSS / Intrastat thresholds

use crate::cmd::{print_json, print_table, LineItem};
use clap::{Args, Subcommand};
use ietax::core::{format_eur, format_pct};
use ietax::tax::vat::{
    calculate_import_vat, check_intrastat_threshold, check_oss_threshold,
    determine_cross_border_vat, find_vat3_box, validate_eu_vat_format, CrossBorderVatQuery,
    CustomerType, Direction, ImportVatInput, Location, SupplyType, EU_COUNTRIES, IMPORTS_EXPORTS,
    INTRA_COMMUNITY_SUPPLIES, OSS_RULES, PLACE_OF_SUPPLY_SERVICES, REPORTING_OBLIGATIONS,
    STANDARD_VAT_RATE, UK_RULES, VAT3_EU_BOXES,
};
use rust_decimal::Decimal;

#[derive(Args, Debug)]
pub struct VatCommand {
    #[command(subcommand)]
    query: VatQuery,

    /// Output as JSON instead of a table
    #[arg(long, global = true)]
    json: bool,
}

#[derive(Subcommand, Debug)]
enum VatQuery {
    /// How a supply to or from outside the State is treated
    Treatment {
        /// sale or purchase
        #[arg(short, long)]
        direction: Direction,
        /// eu, gb, ni or non_eu
        #[arg(short, long)]
        location: Location,
        /// goods or services
        #[arg(short, long)]
        supply: SupplyType,
        /// b2b or b2c
        #[arg(short, long, default_value = "b2b")]
        customer: CustomerType,
    },
    /// Check the format of an EU VAT number
    Number {
        /// VAT number including its prefix, e.g. DE123456789
        number: String,
        /// ISO country code, e.g. DE or GR
        #[arg(short, long)]
        country: String,
    },
    /// VAT due on goods imported from outside the EU
    Import {
        /// Customs value (cost, insurance and freight)
        #[arg(long)]
        cif: Decimal,
        #[arg(long, default_value_t = Decimal::ZERO)]
        customs_duty: Decimal,
        #[arg(long, default_value_t = Decimal::ZERO)]
        excise_duty: Decimal,
        #[arg(long, default_value_t = STANDARD_VAT_RATE)]
        rate: Decimal,
    },
    /// Whether EU B2C distance sales require the One Stop Shop
    Oss {
        /// Annual EU B2C distance sales
        sales: Decimal,
    },
    /// Whether Intrastat returns are required
    Intrastat {
        #[arg(long, default_value_t = Decimal::ZERO)]
        arrivals: Decimal,
        #[arg(long, default_value_t = Decimal::ZERO)]
        dispatches: Decimal,
    },
    /// EU member states and their VAT prefixes
    Countries,
    /// VAT3 boxes used for cross-border trade
    Boxes,
    /// Post-Brexit UK rules, reporting obligations and place of supply
    Rules,
}

impl VatCommand {
    pub fn exec(&self) -> anyhow::Result<()> {
        match &self.query {
            VatQuery::Treatment {
                direction,
                location,
                supply,
                customer,
            } => self.treatment(CrossBorderVatQuery::new(
                *direction, *location, *supply, *customer,
            )),
            VatQuery::Number { number, country } => {
                let validation = validate_eu_vat_format(number, country);
                if self.json {
                    return print_json(&validation);
                }
                if validation.valid {
                    println!("VALID: {} matches the {} format", number, country.to_uppercase());
                } else {
                    println!("INVALID: {}", validation.message.unwrap_or_default());
                }
                Ok(())
            }
            VatQuery::Import {
                cif,
                customs_duty,
                excise_duty,
                rate,
            } => {
                let input = ImportVatInput {
                    cif_value: *cif,
                    customs_duty: *customs_duty,
                    excise_duty: *excise_duty,
                    vat_rate: *rate,
                };
                let result = calculate_import_vat(&input);
                if self.json {
                    return print_json(&result);
                }
                print_table([
                    LineItem::eur("Customs value", input.cif_value),
                    LineItem::eur("Customs duty", input.customs_duty),
                    LineItem::eur("Excise duty", input.excise_duty),
                    LineItem::eur("VAT base", result.vat_base),
                    LineItem::eur(format!("Import VAT @ {}", format_pct(input.vat_rate)), result.vat_amount),
                    LineItem::eur("Total landed cost", result.total_cost),
                ]);
                Ok(())
            }
            VatQuery::Oss { sales } => {
                let check = check_oss_threshold(*sales);
                if self.json {
                    return print_json(&check);
                }
                println!(
                    "EU distance sales {} against threshold {}",
                    format_eur(check.annual_eu_sales),
                    format_eur(check.threshold)
                );
                println!("{}", check.recommendation);
                Ok(())
            }
            VatQuery::Intrastat {
                arrivals,
                dispatches,
            } => {
                let check = check_intrastat_threshold(*arrivals, *dispatches);
                if self.json {
                    return print_json(&check);
                }
                print_table([
                    LineItem::text("Arrivals return", required_label(check.arrivals_required)),
                    LineItem::text("Dispatches return", required_label(check.dispatches_required)),
                ]);
                println!("{}", check.recommendation);
                Ok(())
            }
            VatQuery::Countries => {
                if self.json {
                    return print_json(&EU_COUNTRIES);
                }
                print_table(EU_COUNTRIES);
                Ok(())
            }
            VatQuery::Boxes => {
                if self.json {
                    return print_json(&VAT3_EU_BOXES);
                }
                print_table(VAT3_EU_BOXES);
                Ok(())
            }
            VatQuery::Rules => self.rules(),
        }
    }

    fn rules(&self) -> anyhow::Result<()> {
        if self.json {
            return print_json(&serde_json::json!({
                "ukRules": UK_RULES,
                "reportingObligations": REPORTING_OBLIGATIONS,
                "oss": OSS_RULES,
                "intraCommunitySupplies": INTRA_COMMUNITY_SUPPLIES,
                "importsExports": IMPORTS_EXPORTS,
                "placeOfSupplyServices": PLACE_OF_SUPPLY_SERVICES,
            }));
        }

        println!("UNITED KINGDOM");
        for region in [UK_RULES.gb, UK_RULES.ni] {
            println!(
                "  {} ({}): EU for goods {}, EU for services {}",
                region.name,
                region.vat_prefix,
                yes_no_flag(region.eu_for_goods),
                yes_no_flag(region.eu_for_services)
            );
        }
        println!();
        println!("REPORTING");
        for obligation in [
            REPORTING_OBLIGATIONS.vies,
            REPORTING_OBLIGATIONS.intrastat_arrivals,
            REPORTING_OBLIGATIONS.intrastat_dispatches,
        ] {
            println!(
                "  {} ({}, above {}): {}",
                obligation.name,
                obligation.frequency,
                format_eur(obligation.threshold),
                obligation.description
            );
        }
        println!(
            "  {} ({}, above {}): {}",
            OSS_RULES.scheme,
            OSS_RULES.return_frequency,
            format_eur(OSS_RULES.threshold),
            OSS_RULES.description
        );
        println!();
        println!("INTRA-COMMUNITY SUPPLIES OF GOODS");
        for condition in INTRA_COMMUNITY_SUPPLIES.conditions {
            println!("  - {}", condition);
        }
        println!("  Invoice: {}", INTRA_COMMUNITY_SUPPLIES.invoice_note);
        println!();
        println!("IMPORTS AND EXPORTS");
        println!(
            "  Import VAT {} on {}",
            format_pct(IMPORTS_EXPORTS.import_vat_rate),
            IMPORTS_EXPORTS.import_vat_base
        );
        println!("  Postponed accounting box: {}", IMPORTS_EXPORTS.postponed_accounting_box);
        for evidence in IMPORTS_EXPORTS.export_evidence {
            println!("  - {}", evidence);
        }
        println!();
        println!("PLACE OF SUPPLY OF SERVICES");
        println!("  B2B: {}", PLACE_OF_SUPPLY_SERVICES.b2b_general_rule);
        println!("  B2C: {}", PLACE_OF_SUPPLY_SERVICES.b2c_general_rule);
        for exception in PLACE_OF_SUPPLY_SERVICES.exceptions {
            println!("  - {}", exception);
        }
        Ok(())
    }

    fn treatment(&self, query: CrossBorderVatQuery) -> anyhow::Result<()> {
        let result = determine_cross_border_vat(&query);
        if self.json {
            return print_json(&result);
        }

        println!(
            "{} of {} ({}), counterparty {}",
            query.direction, query.supply_type, query.customer_type, query.counterparty_location
        );
        println!("Treatment: {}", result.treatment.display());
        println!("{}", result.explanation);

        if !result.vat3_boxes.is_empty() {
            print_table(
                result
                    .vat3_boxes
                    .iter()
                    .filter_map(|code| find_vat3_box(code))
                    .copied(),
            );
        }
        for obligation in &result.reporting_obligations {
            println!("Report: {}", obligation);
        }
        for warning in &result.warnings {
            println!("Warning: {}", warning);
        }
        Ok(())
    }
}

fn yes_no_flag(flag: bool) -> &'static str {
    if flag {
        "yes"
    } else {
        "no"
    }
}

fn required_label(required: bool) -> &'static str {
    if required {
        "required"
    } else {
        "not required"
    }
}
