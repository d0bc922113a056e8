//! Depreciation command - year-by-year wear and tear schedule for one vehicle

use crate::cmd::{print_json, print_table};
use clap::Args;
use ietax::core::{format_eur, VehicleAsset};
use ietax::tax::depreciation::{acquisition_year, CLAIM_YEARS};
use ietax::tax::depreciation_schedule;
use rust_decimal::Decimal;
use serde::Serialize;
use tabled::Tabled;

#[derive(Args, Debug)]
pub struct DepreciationCommand {
    /// Purchase cost excluding VAT
    #[arg(short, long)]
    cost: Decimal,

    /// Acquisition date (YYYY-MM-DD)
    #[arg(short = 'a', long)]
    acquired: String,

    /// Business use percentage
    #[arg(short, long, default_value_t = Decimal::ONE_HUNDRED)]
    business_use: Decimal,

    /// First tax year to show (defaults to the acquisition year)
    #[arg(long)]
    from: Option<i32>,

    /// Last tax year to show (defaults to the end of the allowance period)
    #[arg(long)]
    to: Option<i32>,

    /// Output as JSON instead of a table
    #[arg(long)]
    json: bool,
}

#[derive(Debug, Serialize, Tabled)]
struct ScheduleRow {
    #[tabled(rename = "Tax Year")]
    tax_year: i32,
    #[tabled(rename = "Year Owned")]
    years_owned: u32,
    #[tabled(rename = "Allowance")]
    annual_allowance: String,
    #[tabled(rename = "Cumulative")]
    cumulative_allowances: String,
    #[tabled(rename = "NBV")]
    net_book_value: String,
    #[tabled(rename = "Claimable")]
    claimable: &'static str,
}

impl DepreciationCommand {
    pub fn exec(&self) -> anyhow::Result<()> {
        let vehicle = VehicleAsset::new(self.cost, &self.acquired, self.business_use);
        let Some(acquired) = acquisition_year(Some(&self.acquired)) else {
            anyhow::bail!("Could not read acquisition date '{}'", self.acquired);
        };
        let from = self.from.unwrap_or(acquired);
        let to = self.to.unwrap_or(acquired + CLAIM_YEARS as i32 - 1);
        if to < from {
            anyhow::bail!("Last year {} is before first year {}", to, from);
        }

        let schedule = depreciation_schedule(&vehicle, from, to);
        if self.json {
            let years: Vec<_> = schedule
                .iter()
                .map(|(year, dep)| serde_json::json!({ "taxYear": year, "depreciation": dep }))
                .collect();
            return print_json(&years);
        }

        if let Some((_, first)) = schedule.first() {
            println!(
                "Cost {} (qualifying {}), {}% business use",
                format_eur(first.cost),
                format_eur(first.qualifying_cost),
                first.business_use_pct.normalize()
            );
        }
        let rows = schedule.iter().map(|(year, dep)| ScheduleRow {
            tax_year: *year,
            years_owned: dep.years_owned,
            annual_allowance: format_eur(dep.annual_allowance),
            cumulative_allowances: format_eur(dep.cumulative_allowances),
            net_book_value: format_eur(dep.net_book_value),
            claimable: if dep.claimable_this_year() { "yes" } else { "no" },
        });
        print_table(rows);
        Ok(())
    }
}
