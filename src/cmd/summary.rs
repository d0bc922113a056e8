//! Summary command - annual returns assembled from bookkeeping data

use crate::cmd::{print_json, print_table, read_bookkeeping, LineItem};
use chrono::Datelike;
use clap::{Args, ValueEnum};
use ietax::core::{format_eur, format_pct, Transaction, Warning};
use ietax::report::{Ct1Summary, Form11Summary, TrialBalance, Vat3Return, VehicleClaim};
use serde::Serialize;
use std::path::PathBuf;

#[derive(Args, Debug)]
pub struct SummaryCommand {
    /// JSON file with transactions and questionnaire ("-" for stdin)
    #[arg(short, long)]
    input: PathBuf,

    /// Which return to produce
    #[arg(short, long, value_enum, default_value_t = ReportArg::All)]
    report: ReportArg,

    /// Tax year, overriding the questionnaire
    #[arg(short, long)]
    year: Option<i32>,

    /// Output as JSON instead of formatted text
    #[arg(long)]
    json: bool,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum ReportArg {
    #[default]
    All,
    TrialBalance,
    Vat3,
    Ct1,
    Form11,
}

/// Summary data for JSON output
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct SummaryData {
    tax_year: i32,
    #[serde(skip_serializing_if = "Option::is_none")]
    trial_balance: Option<TrialBalance>,
    #[serde(skip_serializing_if = "Option::is_none")]
    vat3: Option<Vat3Return>,
    #[serde(skip_serializing_if = "Option::is_none")]
    ct1: Option<Ct1Summary>,
    #[serde(skip_serializing_if = "Option::is_none")]
    form11: Option<Form11Summary>,
}

impl SummaryCommand {
    pub fn exec(&self) -> anyhow::Result<()> {
        let mut input = read_bookkeeping(&self.input)?;
        if let Some(year) = self.year {
            input.questionnaire.tax_year = year;
        }
        let tax_year = input.questionnaire.tax_year;
        let year_transactions: Vec<Transaction> = input
            .transactions
            .iter()
            .filter(|tx| tx.transaction_date.year() == tax_year)
            .cloned()
            .collect();

        let wants = |report: ReportArg| self.report == ReportArg::All || self.report == report;
        let data = SummaryData {
            tax_year,
            trial_balance: wants(ReportArg::TrialBalance)
                .then(|| TrialBalance::from_transactions(&year_transactions)),
            vat3: wants(ReportArg::Vat3)
                .then(|| Vat3Return::assemble_for_year(&input.transactions, tax_year)),
            ct1: wants(ReportArg::Ct1)
                .then(|| Ct1Summary::assemble(&input.transactions, &input.questionnaire)),
            form11: wants(ReportArg::Form11)
                .then(|| Form11Summary::assemble(&input.transactions, &input.questionnaire)),
        };

        if self.json {
            return print_json(&data);
        }

        println!();
        println!("TAX SUMMARY ({})", tax_year);
        if let Some(tb) = &data.trial_balance {
            print_trial_balance(tb);
        }
        if let Some(vat3) = &data.vat3 {
            print_vat3(vat3);
        }
        if let Some(ct1) = &data.ct1 {
            print_ct1(ct1);
        }
        if let Some(form11) = &data.form11 {
            print_form11(form11);
        }
        Ok(())
    }
}

fn print_trial_balance(tb: &TrialBalance) {
    println!();
    println!("TRIAL BALANCE");
    let mut rows: Vec<_> = tb
        .rows
        .iter()
        .map(|row| [row.account.clone(), format_eur(row.debit), format_eur(row.credit)])
        .collect();
    rows.push([
        "Total".to_string(),
        format_eur(tb.total_debits()),
        format_eur(tb.total_credits()),
    ]);
    let mut builder = tabled::builder::Builder::default();
    builder.push_record(["Account", "Debit", "Credit"]);
    for row in rows {
        builder.push_record(row);
    }
    println!("{}", builder.build().with(tabled::settings::Style::rounded()));
    if !tb.is_balanced() {
        println!("WARNING: trial balance does not balance");
    }
}

fn print_vat3(vat3: &Vat3Return) {
    println!();
    println!("VAT3");
    print_table(vat3.boxes().map(|(code, amount)| LineItem::eur(code, amount)));
    let net = vat3.net_position();
    if net.is_sign_negative() {
        println!("Repayable: {}", format_eur(-net));
    } else {
        println!("Payable: {}", format_eur(net));
    }
    print_warnings(&vat3.warnings);
}

fn print_ct1(ct1: &Ct1Summary) {
    println!();
    println!("CT1 (CORPORATION TAX)");
    print_table([
        LineItem::eur("Turnover", ct1.turnover),
        LineItem::eur("Expenses", ct1.expenses),
        LineItem::eur("Mileage allowance", ct1.mileage_allowance),
        LineItem::eur("Subsistence allowance", ct1.subsistence_allowance),
        LineItem::eur("Trading profit", ct1.trading_profit),
        LineItem::eur("Capital allowances", ct1.capital_allowances),
        LineItem::eur("Taxable profit", ct1.taxable_profit),
        LineItem::eur("Loss carried forward", ct1.trading_loss),
        LineItem::eur(
            format!("Corporation tax @ {}", format_pct(ct1.corporation_tax_rate)),
            ct1.corporation_tax,
        ),
    ]);
    print_vehicles(&ct1.vehicles);
    print_warnings(&ct1.warnings);
}

fn print_form11(form11: &Form11Summary) {
    println!();
    println!("FORM 11 (INCOME TAX)");
    print_table([
        LineItem::eur("Trading income", form11.trading_income),
        LineItem::eur("Trading expenses", form11.trading_expenses),
        LineItem::eur("Mileage allowance", form11.mileage_allowance),
        LineItem::eur("Subsistence allowance", form11.subsistence_allowance),
        LineItem::eur("Capital allowances", form11.capital_allowances),
        LineItem::eur("Assessable profit", form11.assessable_profit),
        LineItem::eur("Pension relief", form11.pension_relief),
        LineItem::eur("Taxable income", form11.taxable_income),
        LineItem::eur("Income tax (gross)", form11.gross_income_tax),
        LineItem::eur("Personal credit", form11.credits.personal),
        LineItem::eur("Earned income credit", form11.credits.earned_income),
        LineItem::eur("Medical credit", form11.credits.medical),
        LineItem::eur("Tuition credit", form11.credits.tuition),
        LineItem::eur("Rent credit", form11.credits.rent),
        LineItem::eur("Income tax (net)", form11.net_income_tax),
        LineItem::eur("USC", form11.usc),
        LineItem::eur("PRSI (Class S)", form11.prsi),
        LineItem::eur("Total liability", form11.total_liability),
    ]);
    if !form11.trading_loss.is_zero() {
        println!("Trading loss: {}", format_eur(form11.trading_loss));
    }
    print_vehicles(&form11.vehicles);
    print_warnings(&form11.warnings);
}

fn print_vehicles(vehicles: &[VehicleClaim]) {
    for claim in vehicles {
        println!(
            "  Vehicle {} {}: year {}, allowance {}, NBV {}",
            claim.reg,
            claim.description,
            claim.depreciation.years_owned,
            format_eur(claim.claimed),
            format_eur(claim.depreciation.net_book_value)
        );
    }
}

fn print_warnings(warnings: &[Warning]) {
    for warning in warnings {
        println!("  WARNING: {}", warning);
    }
}
