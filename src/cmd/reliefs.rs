//! Reliefs command - list expenses that may qualify for personal tax reliefs

use crate::cmd::{print_json, print_table, read_transactions};
use clap::Args;
use ietax::core::format_eur;
use ietax::tax::{scan_for_reliefs, ReliefCategory};
use serde::Serialize;
use std::io;
use std::path::PathBuf;
use tabled::Tabled;

#[derive(Args, Debug)]
pub struct ReliefsCommand {
    /// JSON or CSV file of transactions ("-" for JSON on stdin)
    #[arg(short, long)]
    transactions: PathBuf,

    /// List each matched transaction, not just the totals
    #[arg(short, long)]
    detailed: bool,

    /// Output as JSON instead of a table
    #[arg(long, conflicts_with = "csv")]
    json: bool,

    /// Output matched transactions as CSV
    #[arg(long)]
    csv: bool,
}

#[derive(Debug, Tabled)]
struct TotalRow {
    #[tabled(rename = "Relief")]
    relief: &'static str,
    #[tabled(rename = "Statute")]
    statute: &'static str,
    #[tabled(rename = "Count")]
    count: usize,
    #[tabled(rename = "Total")]
    total: String,
}

#[derive(Debug, Tabled, Serialize)]
struct MatchRow {
    #[tabled(rename = "Date")]
    date: String,
    #[tabled(rename = "Relief")]
    relief: &'static str,
    #[tabled(skip)]
    statute: &'static str,
    #[tabled(rename = "Description")]
    description: String,
    #[tabled(rename = "Amount")]
    amount: String,
}

impl ReliefsCommand {
    pub fn exec(&self) -> anyhow::Result<()> {
        let transactions = read_transactions(&self.transactions)?;
        let result = scan_for_reliefs(&transactions);

        if self.json {
            return print_json(&result);
        }

        let totals = ReliefCategory::ALL.iter().map(|category| {
            let bucket = result.bucket(*category);
            TotalRow {
                relief: category.display(),
                statute: category.statute(),
                count: bucket.transactions.len(),
                total: format_eur(bucket.total),
            }
        });

        let mut matches: Vec<MatchRow> = ReliefCategory::ALL
            .iter()
            .flat_map(|category| {
                result
                    .bucket(*category)
                    .transactions
                    .iter()
                    .map(move |m| MatchRow {
                        date: m.date.to_string(),
                        relief: category.display(),
                        statute: category.statute(),
                        description: m.description.clone(),
                        amount: m.amount.to_string(),
                    })
            })
            .collect();
        matches.sort_by(|a, b| a.date.cmp(&b.date));

        if self.csv {
            return write_csv(&matches);
        }

        print_table(totals);
        if self.detailed {
            if matches.is_empty() {
                println!("No qualifying transactions found");
            } else {
                print_table(matches);
            }
        }
        Ok(())
    }
}

fn write_csv(rows: &[MatchRow]) -> anyhow::Result<()> {
    let mut wtr = csv::Writer::from_writer(io::stdout());
    for row in rows {
        wtr.serialize(row)?;
    }
    wtr.flush()?;
    Ok(())
}
